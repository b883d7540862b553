//! Beam schematic over shear and moment diagrams
//!
//! Every value on the page comes from the [`BeamResult`]; the sampled curves
//! come from the beam the result was computed with.

use crate::evaluator::BeamResult;
use crate::topics::LabTopic;

use super::canvas::{Align, Color, Frame, Path, Point, Stroke};
use super::schematic::draw_wall;
use super::{heading, label, Panel, AXIS, DEFLECTION, INK, LOAD, MOMENT, REACTION, SHEAR};

/// Load arrow length on the schematic; independent of the load magnitude
const LOAD_ARROW: f32 = 40.0;

const DEFLECTED_CAPTION: &str = "cantilever deflected shape (qualitative, fixed at left)";

pub(super) fn draw(frame: &mut Frame, topic: LabTopic, result: &BeamResult, samples: usize) {
    heading(frame, topic);
    let body = Panel::page(frame).inset(60.0, 30.0, 40.0, 10.0);
    let panels = body.rows(3);
    let diagrams = result.beam.diagrams(samples);

    draw_schematic(frame, panels[0], result);
    if topic == LabTopic::BeamDeflection {
        draw_deflected_shape(frame, panels[0], &diagrams.deflection_shape);
    }

    draw_shear(frame, panels[1], result, &diagrams.shear);

    let title = match (topic, result.bending_stress_mpa) {
        (LabTopic::BendingStress, Some(sigma)) => {
            format!("Bending Moment M (kN·m), σb = Mmax / S = {:.2} MPa", sigma)
        }
        _ => "Bending Moment M (kN·m)".to_string(),
    };
    draw_moment(frame, panels[2], result, &diagrams.moment, title);
}

fn beam_y(panel: Panel) -> f32 {
    panel.y + panel.height * 0.55
}

fn span_x(panel: Panel, x: f64) -> f32 {
    panel.x + x as f32 * panel.width
}

fn draw_schematic(frame: &mut Frame, panel: Panel, result: &BeamResult) {
    let y = beam_y(panel);
    let support = 12.0;
    let beam = result.beam;

    frame.stroke(
        &Path::line(Point::new(panel.x, y), Point::new(panel.right(), y)),
        Stroke::default().with_color(INK).with_width(4.0),
    );

    // Pin at the left, roller at the right
    let pin = Path::polygon(&[
        Point::new(panel.x, y + 2.0),
        Point::new(panel.x - support / 2.0, y + 2.0 + support),
        Point::new(panel.x + support / 2.0, y + 2.0 + support),
    ]);
    frame.fill(&pin, INK);
    let roller = Path::polygon(&[
        Point::new(panel.right(), y + 2.0),
        Point::new(panel.right() - support / 2.0, y + 2.0 + support * 0.7),
        Point::new(panel.right() + support / 2.0, y + 2.0 + support * 0.7),
    ]);
    frame.stroke(&roller, Stroke::default().with_color(INK).with_width(1.5));
    frame.stroke(
        &Path::circle(Point::new(panel.right(), y + 2.0 + support * 0.7 + 2.5), 2.0),
        Stroke::default().with_color(INK).with_width(1.5),
    );

    // Point load
    let load_x = span_x(panel, beam.position);
    frame.arrow(
        Point::new(load_x, y - LOAD_ARROW - 2.0),
        Point::new(load_x, y - 2.0),
        Stroke::default().with_color(LOAD).with_width(2.5),
        8.0,
    );
    label(
        frame,
        format!("P = {:.1} kN", beam.force_kn),
        Point::new(load_x, y - LOAD_ARROW - 10.0),
        LOAD,
        Align::Center,
    );
    label(
        frame,
        format!("a = {:.2} m", beam.position),
        Point::new(load_x, y + 14.0),
        INK,
        Align::Center,
    );

    // Reactions
    let reaction_top = y + support + 6.0;
    for (x, value, name, align) in [
        (panel.x, result.reaction_left_kn, "R1", Align::Start),
        (panel.right(), result.reaction_right_kn, "R2", Align::End),
    ] {
        frame.arrow(
            Point::new(x, reaction_top + 24.0),
            Point::new(x, reaction_top),
            Stroke::default().with_color(REACTION).with_width(2.0),
            6.0,
        );
        let offset = if align == Align::Start { 6.0 } else { -6.0 };
        label(
            frame,
            format!("{} = {:.2} kN", name, value),
            Point::new(x + offset, reaction_top + 20.0),
            REACTION,
            align,
        );
    }

    label(frame, "L = 1.0 m", Point::new(panel.x + panel.width / 2.0, panel.y + 8.0), AXIS, Align::Center);
}

fn draw_deflected_shape(frame: &mut Frame, panel: Panel, shape: &[(f64, f64)]) {
    let peak = shape.iter().map(|(_, y)| y.abs()).fold(0.0f64, f64::max);
    if peak < 1e-12 {
        return;
    }
    let y0 = beam_y(panel);
    let depth = panel.height * 0.3;

    // The overlay is a cantilever: mark its clamped end over the pin
    draw_wall(frame, panel.x, y0 - depth - 6.0, y0 + 6.0, Color { a: 0.5, ..DEFLECTION });

    let points: Vec<Point> = shape
        .iter()
        .map(|(x, y)| Point::new(span_x(panel, *x), y0 - (*y / peak) as f32 * depth))
        .collect();
    frame.stroke(
        &Path::polyline(&points),
        Stroke::default().with_color(DEFLECTION).with_width(2.0).dashed(),
    );
    if let Some(tip) = points.last() {
        label(
            frame,
            DEFLECTED_CAPTION,
            Point::new(tip.x - 4.0, tip.y + 10.0),
            DEFLECTION,
            Align::End,
        );
    }
}

/// Fill `curve` to the horizontal axis and outline it
fn draw_filled(frame: &mut Frame, points: &[Point], axis_y: f32, color: Color) {
    let (Some(first), Some(last)) = (points.first(), points.last()) else {
        return;
    };
    let mut outline = Vec::with_capacity(points.len() + 2);
    outline.push(Point::new(first.x, axis_y));
    outline.extend_from_slice(points);
    outline.push(Point::new(last.x, axis_y));
    frame.fill(&Path::polygon(&outline), Color { a: 0.3, ..color });
    frame.stroke(&Path::polyline(points), Stroke::default().with_color(color).with_width(2.0));
}

fn draw_shear(frame: &mut Frame, panel: Panel, result: &BeamResult, shear: &[(f64, f64)]) {
    panel.title(frame, "Shear Force V (kN)", 10.0);
    let axis_y = panel.y + panel.height * 0.55;
    let plot_height = panel.height * 0.3;

    frame.stroke(
        &Path::line(Point::new(panel.x, axis_y), Point::new(panel.right(), axis_y)),
        Stroke::default().with_color(AXIS).with_width(1.0),
    );

    let max_v = shear.iter().map(|(_, v)| v.abs()).fold(0.0f64, f64::max);
    if max_v > 1e-9 {
        let points: Vec<Point> = shear
            .iter()
            .map(|(x, v)| Point::new(span_x(panel, *x), axis_y - (*v / max_v) as f32 * plot_height))
            .collect();
        draw_filled(frame, &points, axis_y, SHEAR);
    }

    // End values sit on the side of the axis their sign puts them
    for (x, value, align) in [
        (panel.x + 4.0, result.beam.shear_at(0.0), Align::Start),
        (panel.right() - 4.0, result.beam.shear_at(1.0), Align::End),
    ] {
        let y = if value >= 0.0 {
            axis_y - plot_height - 8.0
        } else {
            axis_y + plot_height + 8.0
        };
        label(frame, format!("{:+.2}", value), Point::new(x, y), SHEAR, align);
    }
    label(
        frame,
        format!("Vmax = {:.2} kN", result.max_shear_kn),
        Point::new(panel.right(), panel.y + 8.0),
        SHEAR,
        Align::End,
    );
}

fn draw_moment(frame: &mut Frame, panel: Panel, result: &BeamResult, moment: &[(f64, f64)], title: String) {
    panel.title(frame, title, 10.0);
    let axis_y = panel.y + panel.height * 0.3;
    let plot_height = panel.height * 0.55;

    frame.stroke(
        &Path::line(Point::new(panel.x, axis_y), Point::new(panel.right(), axis_y)),
        Stroke::default().with_color(AXIS).with_width(1.0),
    );

    // Sagging moment is drawn below the axis
    let max_m = result.max_moment_knm.abs();
    if max_m > 1e-9 {
        let points: Vec<Point> = moment
            .iter()
            .map(|(x, m)| Point::new(span_x(panel, *x), axis_y + (*m / max_m) as f32 * plot_height))
            .collect();
        draw_filled(frame, &points, axis_y, MOMENT);
    }

    let peak = Point::new(span_x(panel, result.beam.position), axis_y + plot_height);
    label(
        frame,
        format!("Mmax = {:.2} kN·m", result.max_moment_knm),
        Point::new(peak.x, peak.y + 12.0),
        MOMENT,
        Align::Center,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evaluator::beam::{bending, deflection, shear_and_moment};

    fn texts(topic: LabTopic, result: &BeamResult) -> Vec<String> {
        let mut frame = Frame::new(640.0, 480.0);
        draw(&mut frame, topic, result, 101);
        frame.texts().into_iter().map(str::to_string).collect()
    }

    #[test]
    fn test_bending_title_only_for_bending_lab() {
        let result = bending(22.0, 500.0, 301.0).unwrap();
        let bending_texts = texts(LabTopic::BendingStress, &result);
        assert!(bending_texts.iter().any(|t| t.ends_with("σb = Mmax / S = 18.27 MPa")));

        let plain = shear_and_moment(22.0, 500.0, 817.0).unwrap();
        let shear_texts = texts(LabTopic::ShearAndMoment, &plain);
        assert!(shear_texts.contains(&"Bending Moment M (kN·m)".to_string()));
        assert!(!shear_texts.iter().any(|t| t.contains("σb")));
    }

    #[test]
    fn test_reactions_and_peak_labels() {
        let result = shear_and_moment(22.0, 500.0, 817.0).unwrap();
        let texts = texts(LabTopic::ShearAndMoment, &result);
        assert!(texts.contains(&"R1 = 11.00 kN".to_string()));
        assert!(texts.contains(&"R2 = 11.00 kN".to_string()));
        assert!(texts.contains(&"Mmax = 5.50 kN·m".to_string()));
    }

    #[test]
    fn test_deflected_shape_only_for_deflection_lab() {
        let result = deflection(22.0, 500.0, 817.0).unwrap();
        let with_shape = texts(LabTopic::BeamDeflection, &result);
        assert!(with_shape.contains(&DEFLECTED_CAPTION.to_string()));
        let without = texts(LabTopic::ShearAndMoment, &result);
        assert!(!without.contains(&DEFLECTED_CAPTION.to_string()));
    }

    #[test]
    fn test_deflected_shape_marks_the_fixed_end() {
        let result = deflection(22.0, 500.0, 817.0).unwrap();
        let mut with_shape = Frame::new(640.0, 480.0);
        draw(&mut with_shape, LabTopic::BeamDeflection, &result, 101);
        let mut without = Frame::new(640.0, 480.0);
        draw(&mut without, LabTopic::ShearAndMoment, &result, 101);

        // Faint deflection green, only on the overlay
        let wall = "rgb(\"#40994d80\")";
        assert!(with_shape.into_source().contains(wall));
        assert!(!without.into_source().contains(wall));
    }

    #[test]
    fn test_shear_labels_carry_their_own_sign() {
        let upward = shear_and_moment(22.0, 500.0, 817.0).unwrap();
        let texts_up = texts(LabTopic::ShearAndMoment, &upward);
        assert!(texts_up.contains(&"+11.00".to_string()));
        assert!(texts_up.contains(&"-11.00".to_string()));

        let downward = shear_and_moment(-22.0, 500.0, 817.0).unwrap();
        let texts_down = texts(LabTopic::ShearAndMoment, &downward);
        assert!(texts_down.contains(&"-11.00".to_string()));
        assert!(texts_down.contains(&"+11.00".to_string()));
        assert!(!texts_down.iter().any(|t| t.contains("+-") || t.contains("-+") || t.contains("--")));
    }

    #[test]
    fn test_zero_load_draws_axes_only() {
        let result = shear_and_moment(0.0, 500.0, 817.0).unwrap();
        let mut frame = Frame::new(640.0, 480.0);
        draw(&mut frame, LabTopic::ShearAndMoment, &result, 101);
        let source = frame.into_source();
        assert!(!source.contains("rgb(\"#3366cc4d\")"));
    }
}
