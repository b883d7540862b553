//! Axial bar and circular shaft schematics

use std::f32::consts::PI;

use crate::evaluator::{DirectStressResult, TorsionResult};
use crate::topics::LabTopic;

use super::canvas::{Align, Color, Frame, Path, Point, Stroke, Text};
use super::{heading, label, Panel, AXIS, INK, LOAD, MEMBER, SHEAR};

/// Schematic geometry is fixed; only label text follows the sliders
const BAR_DEPTH: f32 = 60.0;
const ARROW_LENGTH: f32 = 80.0;
const SHAFT_RADIUS: f32 = 90.0;

/// Draw a hatched wall whose face is the vertical line at `x`
pub(super) fn draw_wall(frame: &mut Frame, x: f32, top: f32, bottom: f32, color: Color) {
    let stroke = Stroke::default().with_color(color).with_width(1.5);
    frame.stroke(&Path::line(Point::new(x, top), Point::new(x, bottom)), stroke);
    let mut y = top;
    while y < bottom {
        frame.stroke(
            &Path::line(Point::new(x, y + 8.0), Point::new(x - 8.0, y)),
            Stroke::default().with_color(color).with_width(0.8),
        );
        y += 8.0;
    }
}

pub(super) fn draw_axial(frame: &mut Frame, topic: LabTopic, result: &DirectStressResult) {
    heading(frame, topic);
    let page = Panel::page(frame);
    let center = Point::new(page.width * 0.45, page.height * 0.45);
    let length = page.width * 0.5;
    let depth = BAR_DEPTH;
    let left = center.x - length / 2.0;

    draw_wall(frame, left, center.y - depth / 2.0 - 20.0, center.y + depth / 2.0 + 20.0, INK);

    let bar = Path::rectangle(Point::new(left, center.y - depth / 2.0), length, depth);
    frame.fill(&bar, MEMBER);
    frame.stroke(&bar, Stroke::default().with_color(INK).with_width(1.5));

    // Tension pulls away from the wall; a negative force pushes into it
    let end = Point::new(left + length, center.y);
    let arrow_length = ARROW_LENGTH;
    let (tail, tip) = if result.force_kn >= 0.0 {
        (end, Point::new(end.x + arrow_length, end.y))
    } else {
        (Point::new(end.x + arrow_length, end.y), end)
    };
    frame.arrow(tail, tip, Stroke::default().with_color(LOAD).with_width(2.5), 10.0);
    label(
        frame,
        format!("P = {:.1} kN", result.force_kn),
        Point::new(end.x + arrow_length / 2.0, end.y - 14.0),
        LOAD,
        Align::Center,
    );

    // Cut section a-a with uniform stress arrows
    let cut_x = left + length * 0.6;
    let cut = Stroke::default().with_color(AXIS).with_width(1.0).dashed();
    frame.stroke(
        &Path::line(Point::new(cut_x, center.y - depth / 2.0 - 14.0), Point::new(cut_x, center.y + depth / 2.0 + 14.0)),
        cut,
    );
    label(frame, "a", Point::new(cut_x, center.y - depth / 2.0 - 22.0), AXIS, Align::Center);
    label(frame, "a", Point::new(cut_x, center.y + depth / 2.0 + 22.0), AXIS, Align::Center);
    let rows = ((depth / 14.0) as usize).clamp(2, 8);
    for row in 0..rows {
        let y = center.y - depth / 2.0 + depth * (row as f32 + 0.5) / rows as f32;
        let direction = if result.stress_mpa >= 0.0 { 1.0 } else { -1.0 };
        frame.arrow(
            Point::new(cut_x + 2.0, y),
            Point::new(cut_x + 2.0 + 16.0 * direction, y),
            Stroke::default().with_color(SHEAR).with_width(1.0),
            4.0,
        );
    }

    label(
        frame,
        format!("A = {:.0} mm²", result.area_mm2),
        Point::new(center.x - length * 0.2, center.y + depth / 2.0 + 22.0),
        INK,
        Align::Center,
    );
    frame.fill_text(Text {
        content: format!(
            "σ = P / A = {:.1} × 1000 / {:.0} = {:.2} MPa",
            result.force_kn, result.area_mm2, result.stress_mpa
        ),
        position: Point::new(page.width / 2.0, page.height * 0.82),
        color: SHEAR,
        size: 13.0,
        bold: true,
        align_x: Align::Center,
    });
    let state = if result.stress_mpa >= 0.0 { "tension" } else { "compression" };
    label(
        frame,
        format!("uniform normal stress on section a-a ({})", state),
        Point::new(page.width / 2.0, page.height * 0.82 + 20.0),
        INK,
        Align::Center,
    );
}

/// Points on an arc, angles in degrees counterclockwise on the page
fn arc(center: Point, radius: f32, from_deg: f32, to_deg: f32, steps: usize) -> Vec<Point> {
    (0..=steps)
        .map(|i| {
            let angle = (from_deg + (to_deg - from_deg) * i as f32 / steps as f32) * PI / 180.0;
            Point::new(center.x + radius * angle.cos(), center.y - radius * angle.sin())
        })
        .collect()
}

pub(super) fn draw_shaft(frame: &mut Frame, topic: LabTopic, result: &TorsionResult) {
    heading(frame, topic);
    let page = Panel::page(frame);
    let center = Point::new(page.width * 0.33, page.height * 0.52);
    let radius = SHAFT_RADIUS;

    let section = Path::circle(center, radius);
    frame.fill(&section, MEMBER);
    frame.stroke(&section, Stroke::default().with_color(INK).with_width(1.5));
    frame.fill(&Path::circle(center, 2.0), INK);

    frame.stroke(
        &Path::line(center, Point::new(center.x + radius, center.y)),
        Stroke::default().with_color(INK).with_width(1.0),
    );
    label(
        frame,
        format!("r = {:.2} mm", result.radius_mm),
        Point::new(center.x + radius / 2.0, center.y + 10.0),
        INK,
        Align::Center,
    );

    // Applied torque, counterclockwise
    let sweep = arc(center, radius + 22.0, -50.0, 230.0, 40);
    frame.stroke(&Path::polyline(&sweep), Stroke::default().with_color(LOAD).with_width(2.0));
    if let [.., before, last] = sweep.as_slice() {
        frame.arrow(*before, *last, Stroke::default().with_color(LOAD).with_width(2.0), 10.0);
    }
    label(
        frame,
        format!("T = P · r = {:.0} N·mm", result.torque_nmm),
        Point::new(center.x, center.y - radius - 40.0),
        LOAD,
        Align::Center,
    );

    // Tangential force at the surface
    let top = Point::new(center.x, center.y - radius);
    frame.arrow(top, Point::new(top.x - 45.0, top.y), Stroke::default().with_color(LOAD).with_width(1.5), 7.0);
    label(
        frame,
        format!("P = {:.1} kN", result.force_kn),
        Point::new(top.x - 50.0, top.y - 10.0),
        LOAD,
        Align::End,
    );

    // Shear distribution along a radius: linear from zero at the axis
    let dist = Panel {
        x: page.width * 0.66,
        y: center.y - radius,
        width: page.width * 0.26,
        height: radius,
    };
    let axis = Stroke::default().with_color(INK).with_width(1.0);
    frame.stroke(&Path::line(Point::new(dist.x, dist.bottom()), Point::new(dist.x, dist.y)), axis);
    frame.stroke(&Path::line(Point::new(dist.x, dist.bottom()), Point::new(dist.right(), dist.bottom())), axis);
    let wedge = Path::polygon(&[
        Point::new(dist.x, dist.bottom()),
        Point::new(dist.x + dist.width * 0.8, dist.y),
        Point::new(dist.x, dist.y),
    ]);
    frame.fill(&wedge, Color { a: 0.3, ..SHEAR });
    frame.stroke(
        &Path::line(Point::new(dist.x, dist.bottom()), Point::new(dist.x + dist.width * 0.8, dist.y)),
        Stroke::default().with_color(SHEAR).with_width(2.0),
    );
    label(
        frame,
        format!("τmax = {:.2} MPa", result.shear_stress_mpa),
        Point::new(dist.x + dist.width * 0.8, dist.y - 10.0),
        SHEAR,
        Align::Center,
    );
    label(frame, "ρ = r", Point::new(dist.x - 6.0, dist.y), INK, Align::End);
    label(frame, "ρ = 0", Point::new(dist.x - 6.0, dist.bottom()), INK, Align::End);
    label(
        frame,
        "τ(ρ) = T·ρ / J",
        Point::new(dist.x + dist.width / 2.0, dist.bottom() + 14.0),
        INK,
        Align::Center,
    );

    frame.fill_text(Text {
        content: format!(
            "J = π r⁴ / 2 = {:.0} mm⁴\nτmax = T · r / J = {:.2} MPa",
            result.polar_moment_mm4, result.shear_stress_mpa
        ),
        position: Point::new(page.width / 2.0, page.height - 40.0),
        color: SHEAR,
        size: 12.0,
        bold: true,
        align_x: Align::Center,
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evaluator::{direct_stress, torsion};

    /// Typst lines for everything except text
    fn geometry(frame: Frame) -> Vec<String> {
        frame
            .into_source()
            .lines()
            .filter(|line| !line.contains("text("))
            .map(str::to_string)
            .collect()
    }

    #[test]
    fn test_axial_geometry_ignores_slider_values() {
        let mut small = Frame::new(640.0, 480.0);
        draw_axial(&mut small, LabTopic::DirectStress, &direct_stress(1.0, 100.0).unwrap());
        let mut large = Frame::new(640.0, 480.0);
        draw_axial(&mut large, LabTopic::DirectStress, &direct_stress(100.0, 2000.0).unwrap());
        assert_eq!(geometry(small), geometry(large));
    }

    #[test]
    fn test_shaft_geometry_ignores_slider_values() {
        let mut small = Frame::new(640.0, 480.0);
        draw_shaft(&mut small, LabTopic::Torsion, &torsion(1.0, 100.0).unwrap());
        let mut large = Frame::new(640.0, 480.0);
        draw_shaft(&mut large, LabTopic::Torsion, &torsion(100.0, 2000.0).unwrap());
        assert_eq!(geometry(small), geometry(large));
    }

    #[test]
    fn test_axial_labels_come_from_results() {
        let result = direct_stress(22.0, 817.0).unwrap();
        let mut frame = Frame::new(640.0, 480.0);
        draw_axial(&mut frame, LabTopic::DirectStress, &result);
        let texts = frame.texts();
        assert!(texts.contains(&"P = 22.0 kN"));
        assert!(texts.contains(&"A = 817 mm²"));
        assert!(texts.iter().any(|t| t.ends_with("= 26.93 MPa")));
    }

    #[test]
    fn test_shaft_labels_come_from_results() {
        let result = torsion(22.0, 817.0).unwrap();
        let mut frame = Frame::new(640.0, 480.0);
        draw_shaft(&mut frame, LabTopic::Torsion, &result);
        let radius_label = format!("r = {:.2} mm", result.radius_mm);
        assert!(frame.texts().contains(&radius_label.as_str()));
        assert!(frame.texts().iter().any(|t| t.contains("τmax = 53.86 MPa")));
    }

    #[test]
    fn test_arc_endpoints() {
        let points = arc(Point::new(0.0, 0.0), 10.0, 0.0, 90.0, 4);
        assert_eq!(points.len(), 5);
        assert!((points[0].x - 10.0).abs() < 1e-4);
        assert!((points[4].y + 10.0).abs() < 1e-4);
    }
}
