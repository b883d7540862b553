//! Mohr's circle with the original, principal and max-shear elements

use crate::evaluator::{ElementStress, MohrCircle};
use crate::topics::LabTopic;

use super::canvas::{Align, Color, Frame, Path, Point, Stroke};
use super::{heading, label, Panel, AXIS, INK, LOAD, MEMBER, MOMENT, SHEAR};

/// Half the side of a drawn element
const HALF_SIDE: f32 = 30.0;

/// Stress magnitudes below this are not drawn as arrows
const NEGLIGIBLE_MPA: f64 = 1e-9;

pub(super) fn draw(frame: &mut Frame, topic: LabTopic, circle: &MohrCircle) {
    heading(frame, topic);
    let cells = Panel::page(frame).inset(10.0, 28.0, 10.0, 6.0).grid(2, 2);

    draw_circle(frame, cells[0], circle);
    draw_element(frame, cells[1], "Original Element", &circle.original_element(), circle);
    draw_element(
        frame,
        cells[2],
        &format!("Principal Element (θp = {:.2}°)", circle.theta_p_deg),
        &circle.principal_element(),
        circle,
    );
    draw_element(
        frame,
        cells[3],
        &format!("Max Shear Element (θs = {:.2}°)", circle.theta_s_deg),
        &circle.max_shear_element(),
        circle,
    );
}

fn draw_circle(frame: &mut Frame, cell: Panel, circle: &MohrCircle) {
    cell.title(frame, "Mohr's Circle", 10.0);
    let plot = cell.inset(20.0, 22.0, 20.0, 26.0);
    let origin = plot.center();
    let radius = circle.diagram_radius();
    let scale = plot.width.min(plot.height) * 0.42 / radius as f32;

    // Page position of a (σ, τ) point; the circle center sits mid-panel
    let at = |sigma: f64, tau: f64| {
        Point::new(
            origin.x + ((sigma - circle.center_mpa) as f32) * scale,
            origin.y - (tau as f32) * scale,
        )
    };

    let axis = Stroke::default().with_color(AXIS).with_width(1.0);
    frame.stroke(&Path::line(Point::new(plot.x, origin.y), Point::new(plot.right(), origin.y)), axis);
    label(frame, "σ", Point::new(plot.right() + 6.0, origin.y), AXIS, Align::Start);
    let zero_x = at(0.0, 0.0).x;
    if zero_x >= plot.x && zero_x <= plot.right() {
        frame.stroke(&Path::line(Point::new(zero_x, plot.y), Point::new(zero_x, plot.bottom())), axis);
        label(frame, "τ", Point::new(zero_x + 6.0, plot.y), AXIS, Align::Start);
    }

    let drawn = Path::circle(at(circle.center_mpa, 0.0), radius as f32 * scale);
    frame.fill(&drawn, Color { a: 0.15, ..SHEAR });
    frame.stroke(&drawn, Stroke::default().with_color(SHEAR).with_width(2.0));

    let (x_sigma, x_tau) = circle.x_face_point();
    let (y_sigma, y_tau) = circle.y_face_point();
    let x_point = at(x_sigma, x_tau);
    let y_point = at(y_sigma, y_tau);
    frame.stroke(&Path::line(x_point, y_point), Stroke::default().with_color(INK).with_width(1.0));
    for (point, name, color) in [(x_point, "X", LOAD), (y_point, "Y", MOMENT)] {
        frame.fill(&Path::circle(point, 3.5), color);
        label(frame, name, Point::new(point.x + 6.0, point.y - 8.0), color, Align::Start);
    }

    let center = at(circle.center_mpa, 0.0);
    frame.fill(&Path::circle(center, 2.5), INK);
    label(frame, "C", Point::new(center.x, center.y + 10.0), INK, Align::Center);
    for (sigma, name) in [(circle.sigma_1_mpa, "σ1"), (circle.sigma_2_mpa, "σ2")] {
        let point = at(sigma, 0.0);
        frame.fill(&Path::circle(point, 3.0), INK);
        label(frame, name, Point::new(point.x, point.y - 10.0), INK, Align::Center);
    }

    label(
        frame,
        format!(
            "C = {:.2}  R = {:.2}  σ1 = {:.2}  σ2 = {:.2}  τmax = {:.2} MPa",
            circle.center_mpa, circle.radius_mpa, circle.sigma_1_mpa, circle.sigma_2_mpa, circle.tau_max_mpa
        ),
        Point::new(cell.x + cell.width / 2.0, cell.bottom() - 10.0),
        INK,
        Align::Center,
    );
}

/// Screen offset of a global x/y vector (page y points down)
fn screen(origin: Point, vector: (f64, f64), length: f32) -> Point {
    Point::new(
        origin.x + vector.0 as f32 * length,
        origin.y - vector.1 as f32 * length,
    )
}

fn draw_element(frame: &mut Frame, cell: Panel, title: &str, element: &ElementStress, circle: &MohrCircle) {
    cell.title(frame, title, 10.0);
    let center = Point::new(cell.x + cell.width / 2.0, cell.y + cell.height * 0.5);
    let faces = element.face_tractions();

    // Corners: +x'+y', -x'+y', -x'-y', +x'-y'
    let (e1, e2) = (faces[0].outward, faces[1].outward);
    let corner = |a: f64, b: f64| screen(center, (a * e1.0 + b * e2.0, a * e1.1 + b * e2.1), HALF_SIDE);
    let square = Path::polygon(&[corner(1.0, 1.0), corner(-1.0, 1.0), corner(-1.0, -1.0), corner(1.0, -1.0)]);
    frame.fill(&square, MEMBER);
    frame.stroke(&square, Stroke::default().with_color(INK).with_width(1.5));

    let largest = [element.sigma_x_mpa, element.sigma_y_mpa, element.tau_mpa]
        .iter()
        .map(|v| v.abs())
        .fold(circle.diagram_radius(), f64::max);
    let arrow_length = |value: f64| 12.0 + 24.0 * (value.abs() / largest) as f32;

    for (index, face) in faces.iter().enumerate() {
        let face_center = screen(center, face.outward, HALF_SIDE);

        // Tension points away from the face, compression into it
        if face.normal_mpa.abs() > NEGLIGIBLE_MPA {
            let length = arrow_length(face.normal_mpa);
            let outer = screen(face_center, face.outward, length + 4.0);
            let inner = screen(face_center, face.outward, 4.0);
            let (tail, tip) = if face.normal_mpa > 0.0 { (inner, outer) } else { (outer, inner) };
            frame.arrow(tail, tip, Stroke::default().with_color(LOAD).with_width(1.8), 6.0);
            if index < 2 {
                let (symbol, value) = if index == 0 {
                    ("σx'", element.sigma_x_mpa)
                } else {
                    ("σy'", element.sigma_y_mpa)
                };
                label(
                    frame,
                    format!("{} = {:.2}", symbol, value),
                    screen(outer, face.outward, 14.0),
                    LOAD,
                    Align::Center,
                );
            }
        }

        // Shear runs along the face, just outside it
        if face.shear_mpa.abs() > NEGLIGIBLE_MPA {
            let length = arrow_length(face.shear_mpa) * 0.8;
            let base = screen(face_center, face.outward, 7.0);
            let sign = face.shear_mpa.signum();
            let direction = (face.shear_direction.0 * sign, face.shear_direction.1 * sign);
            let tail = screen(base, direction, -length / 2.0);
            let tip = screen(base, direction, length / 2.0);
            frame.arrow(tail, tip, Stroke::default().with_color(SHEAR).with_width(1.5), 5.0);
        }
    }

    label(
        frame,
        format!(
            "σx' = {:.2}  σy' = {:.2}  τ = {:.2} MPa",
            element.sigma_x_mpa, element.sigma_y_mpa, element.tau_mpa
        ),
        Point::new(center.x, cell.bottom() - 10.0),
        INK,
        Align::Center,
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(circle: &MohrCircle) -> Vec<String> {
        let mut frame = Frame::new(640.0, 480.0);
        draw(&mut frame, LabTopic::CombinedLoading, circle);
        frame.texts().into_iter().map(str::to_string).collect()
    }

    #[test]
    fn test_panel_titles_carry_angles() {
        let circle = MohrCircle::from_components(100.0, 50.0, 40.0);
        let texts = texts(&circle);
        let principal = format!("Principal Element (θp = {:.2}°)", circle.theta_p_deg);
        let shear = format!("Max Shear Element (θs = {:.2}°)", circle.theta_s_deg);
        assert!(texts.contains(&principal));
        assert!(texts.contains(&shear));
        assert!(texts.contains(&"Original Element".to_string()));
        assert!(texts.iter().any(|t| t.starts_with("C = 75.00  R = 47.17")));
    }

    #[test]
    fn test_degenerate_circle_still_draws() {
        let circle = MohrCircle::from_components(60.0, 60.0, 0.0);
        let mut frame = Frame::new(640.0, 480.0);
        draw(&mut frame, LabTopic::CombinedLoading, &circle);
        let source = frame.into_source();
        assert!(source.contains("circle(radius:"));
        assert!(!source.contains("NaN"));
        assert!(!source.contains("inf"));
    }

    #[test]
    fn test_principal_element_has_no_shear_arrows() {
        let circle = MohrCircle::from_components(100.0, 50.0, 40.0);
        let mut with_shear = Frame::new(640.0, 480.0);
        draw_element(
            &mut with_shear,
            Panel { x: 0.0, y: 0.0, width: 300.0, height: 200.0 },
            "e",
            &circle.original_element(),
            &circle,
        );
        let mut principal = Frame::new(640.0, 480.0);
        let mut element = circle.principal_element();
        element.tau_mpa = 0.0;
        draw_element(
            &mut principal,
            Panel { x: 0.0, y: 0.0, width: 300.0, height: 200.0 },
            "e",
            &element,
            &circle,
        );
        // four shear arrows of two primitives each
        assert_eq!(with_shear.len(), principal.len() + 8);
    }

    #[test]
    fn test_screen_flips_y() {
        let point = screen(Point::new(10.0, 10.0), (0.0, 1.0), 5.0);
        assert_eq!(point, Point::new(10.0, 5.0));
    }
}
