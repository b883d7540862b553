//! Stress-strain curve with the current operating point

use crate::evaluator::{CurveRegion, MaterialResponse};
use crate::topics::LabTopic;

use super::canvas::{Align, Color, Frame, Path, Point, Stroke};
use super::{heading, label, Panel, AXIS, INK, LOAD, SHEAR};

pub(super) fn draw(frame: &mut Frame, topic: LabTopic, response: &MaterialResponse) {
    heading(frame, topic);
    let plot = Panel::page(frame).inset(70.0, 50.0, 40.0, 55.0);
    let curve = response.curve;

    let max_strain = curve.max_strain as f32;
    let max_stress = (curve.max_stress_mpa() * 1.1) as f32;
    let to_point = |strain: f64, stress: f64| {
        Point::new(
            plot.x + strain as f32 / max_strain * plot.width,
            plot.bottom() - stress as f32 / max_stress * plot.height,
        )
    };

    // Axes
    let axis_stroke = Stroke::default().with_color(INK).with_width(1.2);
    frame.stroke(&Path::line(Point::new(plot.x, plot.bottom()), Point::new(plot.right(), plot.bottom())), axis_stroke);
    frame.stroke(&Path::line(Point::new(plot.x, plot.bottom()), Point::new(plot.x, plot.y)), axis_stroke);

    for step in 0..=6 {
        let strain = curve.max_strain * step as f64 / 6.0;
        let at = to_point(strain, 0.0);
        frame.stroke(&Path::line(at, Point::new(at.x, at.y + 4.0)), axis_stroke);
        label(frame, format!("{:.1}", strain), Point::new(at.x, at.y + 12.0), INK, Align::Center);
    }
    let mut stress_tick = 0.0;
    while stress_tick <= curve.max_stress_mpa() * 1.1 {
        let at = to_point(0.0, stress_tick);
        frame.stroke(&Path::line(at, Point::new(at.x - 4.0, at.y)), axis_stroke);
        frame.stroke(
            &Path::line(at, Point::new(plot.right(), at.y)),
            Stroke::default().with_color(Color { a: 0.25, ..AXIS }).with_width(0.5),
        );
        label(frame, format!("{:.0}", stress_tick), Point::new(at.x - 7.0, at.y), INK, Align::End);
        stress_tick += 50.0;
    }
    label(
        frame,
        "Strain ε",
        Point::new(plot.x + plot.width / 2.0, plot.bottom() + 30.0),
        INK,
        Align::Center,
    );
    label(frame, "Stress σ (MPa)", Point::new(plot.x - 60.0, plot.y - 12.0), INK, Align::Start);

    // Reference curve
    let points: Vec<Point> = curve
        .sample(61)
        .into_iter()
        .map(|(strain, stress)| to_point(strain, stress))
        .collect();
    frame.stroke(&Path::polyline(&points), Stroke::default().with_color(SHEAR).with_width(2.0));

    let knee = to_point(curve.knee_strain, curve.knee_stress_mpa);
    frame.fill(&Path::circle(knee, 2.5), SHEAR);
    label(
        frame,
        format!("yield knee (ε = {:.2}, σ = {:.0} MPa)", curve.knee_strain, curve.knee_stress_mpa),
        Point::new(knee.x + 8.0, knee.y + 12.0),
        SHEAR,
        Align::Start,
    );

    // Operating point
    let magnitude = response.stress_mpa.abs();
    let region = match response.region {
        CurveRegion::Elastic => "elastic",
        CurveRegion::Plastic => "plastic",
        CurveRegion::BeyondCurve => "beyond curve",
    };
    match response.strain {
        Some(strain) => {
            let marker = to_point(strain, magnitude);
            let guide = Stroke::default().with_color(LOAD).with_width(0.8).dashed();
            frame.stroke(&Path::line(marker, to_point(strain, 0.0)), guide);
            frame.stroke(&Path::line(marker, to_point(0.0, magnitude)), guide);
            frame.fill(&Path::circle(marker, 5.0), LOAD);
            label(
                frame,
                format!("σ = {:.2} MPa\nε = {:.4} ({})", response.stress_mpa, strain, region),
                Point::new(marker.x + 10.0, marker.y - 16.0),
                LOAD,
                Align::Start,
            );
        }
        None => {
            label(
                frame,
                format!(
                    "σ = {:.2} MPa is above the plotted range (max {:.1} MPa)",
                    response.stress_mpa,
                    curve.max_stress_mpa()
                ),
                Point::new(plot.right(), plot.y + 10.0),
                LOAD,
                Align::End,
            );
        }
    }

    label(
        frame,
        format!("P = {:.1} kN, A = {:.0} mm²", response.force_kn, response.area_mm2),
        Point::new(plot.right(), plot.bottom() - 14.0),
        INK,
        Align::End,
    );
}
