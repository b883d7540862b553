//! Plane Stress and Mohr's Circle
//!
//! ## Sign Convention
//! - Normal stress: tension positive
//! - Shear τxy: positive when it acts in +y on the +x face
//! - Angles: degrees, counterclockwise from the x axis to the x' face normal
//!
//! ## Example
//! ```rust
//! use tutor_core::evaluator::mohr::MohrCircle;
//!
//! let circle = MohrCircle::from_components(100.0, 50.0, 40.0);
//! assert_eq!(circle.center_mpa, 75.0);
//! assert!((circle.radius_mpa - 47.17).abs() < 0.01);
//!
//! // The principal element carries no shear
//! let principal = circle.principal_element();
//! assert!(principal.tau_mpa.abs() < 1e-9);
//! ```

use serde::{Deserialize, Serialize};

/// Radius used for drawing when the true radius vanishes
pub const MIN_DIAGRAM_RADIUS: f64 = 1e-3;

/// Derived Mohr's circle values for a plane stress state
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MohrCircle {
    pub sigma_x_mpa: f64,
    pub sigma_y_mpa: f64,
    pub tau_xy_mpa: f64,
    /// (σx + σy) / 2
    pub center_mpa: f64,
    /// sqrt(((σx - σy)/2)² + τ²)
    pub radius_mpa: f64,
    pub sigma_1_mpa: f64,
    pub sigma_2_mpa: f64,
    pub tau_max_mpa: f64,
    /// Principal angle ½·atan2(2τ, σx - σy), degrees
    pub theta_p_deg: f64,
    /// Max in-plane shear angle θp - 45°, degrees
    pub theta_s_deg: f64,
    /// sqrt(σx² - σxσy + σy² + 3τ²)
    pub von_mises_mpa: f64,
}

impl MohrCircle {
    pub fn from_components(sx: f64, sy: f64, txy: f64) -> Self {
        let von_mises = (sx.powi(2) - sx * sy + sy.powi(2) + 3.0 * txy.powi(2)).sqrt();

        let center = (sx + sy) / 2.0;
        let radius = ((sx - sy).powi(2) / 4.0 + txy.powi(2)).sqrt();
        let theta_p = 0.5 * (2.0 * txy).atan2(sx - sy).to_degrees();

        Self {
            sigma_x_mpa: sx,
            sigma_y_mpa: sy,
            tau_xy_mpa: txy,
            center_mpa: center,
            radius_mpa: radius,
            sigma_1_mpa: center + radius,
            sigma_2_mpa: center - radius,
            tau_max_mpa: radius,
            theta_p_deg: theta_p,
            theta_s_deg: theta_p - 45.0,
            von_mises_mpa: von_mises,
        }
    }

    /// Radius to draw; never zero so the circle stays visible
    pub fn diagram_radius(&self) -> f64 {
        self.radius_mpa.max(MIN_DIAGRAM_RADIUS)
    }

    /// Point X on the circle: (σx, τxy)
    pub fn x_face_point(&self) -> (f64, f64) {
        (self.sigma_x_mpa, self.tau_xy_mpa)
    }

    /// Point Y on the circle: (σy, -τxy)
    pub fn y_face_point(&self) -> (f64, f64) {
        (self.sigma_y_mpa, -self.tau_xy_mpa)
    }

    /// Stresses on an element rotated counterclockwise by `theta_deg`
    pub fn transform(&self, theta_deg: f64) -> ElementStress {
        let two_theta = (2.0 * theta_deg).to_radians();
        let (sin, cos) = two_theta.sin_cos();
        let half_diff = (self.sigma_x_mpa - self.sigma_y_mpa) / 2.0;
        let tau = self.tau_xy_mpa;

        ElementStress {
            angle_deg: theta_deg,
            sigma_x_mpa: self.center_mpa + half_diff * cos + tau * sin,
            sigma_y_mpa: self.center_mpa - half_diff * cos - tau * sin,
            tau_mpa: -half_diff * sin + tau * cos,
        }
    }

    /// Unrotated element
    pub fn original_element(&self) -> ElementStress {
        self.transform(0.0)
    }

    /// Element rotated by θp: σ1 on the x' faces, σ2 on the y' faces
    pub fn principal_element(&self) -> ElementStress {
        self.transform(self.theta_p_deg)
    }

    /// Element rotated by θs: average stress on both faces, +τmax shear
    pub fn max_shear_element(&self) -> ElementStress {
        self.transform(self.theta_s_deg)
    }
}

/// Stress components on a (possibly rotated) square element
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ElementStress {
    pub angle_deg: f64,
    /// Normal stress on the x' faces
    pub sigma_x_mpa: f64,
    /// Normal stress on the y' faces
    pub sigma_y_mpa: f64,
    /// Shear on the x' faces (and, complementary, the y' faces)
    pub tau_mpa: f64,
}

/// Traction on one face of an element, in global x/y
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FaceTraction {
    /// Unit outward normal of the face
    pub outward: (f64, f64),
    pub normal_mpa: f64,
    /// Unit direction of positive shear on this face
    pub shear_direction: (f64, f64),
    pub shear_mpa: f64,
}

impl FaceTraction {
    /// Normal stress vector: points out of the face in tension, into it in
    /// compression
    pub fn normal_vector(&self) -> (f64, f64) {
        (self.outward.0 * self.normal_mpa, self.outward.1 * self.normal_mpa)
    }

    /// Shear stress vector along the face
    pub fn shear_vector(&self) -> (f64, f64) {
        (
            self.shear_direction.0 * self.shear_mpa,
            self.shear_direction.1 * self.shear_mpa,
        )
    }
}

impl ElementStress {
    /// Tractions on the +x', +y', -x', -y' faces.
    ///
    /// Positive shear acts along +y' on the +x' face and along +x' on the
    /// +y' face; the opposite faces carry it reversed, so the four shear
    /// vectors form no net couple.
    pub fn face_tractions(&self) -> [FaceTraction; 4] {
        let (sin, cos) = self.angle_deg.to_radians().sin_cos();
        let e1 = (cos, sin);
        let e2 = (-sin, cos);
        let neg = |v: (f64, f64)| (-v.0, -v.1);

        [
            FaceTraction {
                outward: e1,
                normal_mpa: self.sigma_x_mpa,
                shear_direction: e2,
                shear_mpa: self.tau_mpa,
            },
            FaceTraction {
                outward: e2,
                normal_mpa: self.sigma_y_mpa,
                shear_direction: e1,
                shear_mpa: self.tau_mpa,
            },
            FaceTraction {
                outward: neg(e1),
                normal_mpa: self.sigma_x_mpa,
                shear_direction: neg(e2),
                shear_mpa: self.tau_mpa,
            },
            FaceTraction {
                outward: neg(e2),
                normal_mpa: self.sigma_y_mpa,
                shear_direction: neg(e1),
                shear_mpa: self.tau_mpa,
            },
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: f64, b: f64, tol: f64) -> bool {
        (a - b).abs() < tol
    }

    #[test]
    fn test_reference_state() {
        let circle = MohrCircle::from_components(100.0, 50.0, 40.0);
        assert_eq!(circle.center_mpa, 75.0);
        assert!(approx_eq(circle.radius_mpa, 47.17, 0.005));
        assert!(approx_eq(circle.sigma_1_mpa, 122.17, 0.005));
        assert!(approx_eq(circle.sigma_2_mpa, 27.83, 0.005));
        assert_eq!(circle.tau_max_mpa, circle.radius_mpa);
        assert!(approx_eq(circle.theta_s_deg, circle.theta_p_deg - 45.0, 1e-12));
    }

    #[test]
    fn test_face_points_lie_on_circle() {
        let circle = MohrCircle::from_components(-30.0, 80.0, -25.0);
        for (sigma, tau) in [circle.x_face_point(), circle.y_face_point()] {
            let distance = ((sigma - circle.center_mpa).powi(2) + tau.powi(2)).sqrt();
            assert!(approx_eq(distance, circle.radius_mpa, 1e-9));
        }
    }

    #[test]
    fn test_principal_and_shear_elements() {
        let circle = MohrCircle::from_components(100.0, 50.0, 40.0);
        let principal = circle.principal_element();
        assert!(approx_eq(principal.sigma_x_mpa, circle.sigma_1_mpa, 1e-9));
        assert!(approx_eq(principal.sigma_y_mpa, circle.sigma_2_mpa, 1e-9));
        assert!(approx_eq(principal.tau_mpa, 0.0, 1e-9));

        let shear = circle.max_shear_element();
        assert!(approx_eq(shear.sigma_x_mpa, circle.center_mpa, 1e-9));
        assert!(approx_eq(shear.sigma_y_mpa, circle.center_mpa, 1e-9));
        assert!(approx_eq(shear.tau_mpa, circle.tau_max_mpa, 1e-9));
    }

    #[test]
    fn test_transform_identity_at_zero() {
        let circle = MohrCircle::from_components(12.0, -7.0, 3.0);
        let element = circle.original_element();
        assert!(approx_eq(element.sigma_x_mpa, 12.0, 1e-12));
        assert!(approx_eq(element.sigma_y_mpa, -7.0, 1e-12));
        assert!(approx_eq(element.tau_mpa, 3.0, 1e-12));
    }

    #[test]
    fn test_degenerate_circle_keeps_drawable_radius() {
        let circle = MohrCircle::from_components(60.0, 60.0, 0.0);
        assert_eq!(circle.radius_mpa, 0.0);
        assert_eq!(circle.diagram_radius(), MIN_DIAGRAM_RADIUS);
        assert_eq!(circle.theta_p_deg, 0.0);
    }

    #[test]
    fn test_von_mises_uniaxial() {
        let circle = MohrCircle::from_components(150.0, 0.0, 0.0);
        assert!(approx_eq(circle.von_mises_mpa, 150.0, 1e-12));
    }

    #[test]
    fn test_normal_vectors_point_outward_in_tension() {
        let element = MohrCircle::from_components(80.0, -40.0, 0.0).original_element();
        let faces = element.face_tractions();
        // +x face in tension points along +x
        assert!(faces[0].normal_vector().0 > 0.0);
        // +y face in compression points along -y, into the element
        assert!(faces[1].normal_vector().1 < 0.0);
        // -x face in tension points along -x
        assert!(faces[2].normal_vector().0 < 0.0);
    }

    #[test]
    fn test_shear_vectors_form_no_net_couple() {
        let element = MohrCircle::from_components(10.0, 20.0, 35.0).transform(27.0);
        let couple: f64 = element
            .face_tractions()
            .iter()
            .map(|face| {
                let (nx, ny) = face.outward;
                let (sx, sy) = face.shear_vector();
                nx * sy - ny * sx
            })
            .sum();
        assert!(approx_eq(couple, 0.0, 1e-9));
    }

    #[test]
    fn test_positive_shear_on_x_face_acts_along_y() {
        let element = MohrCircle::from_components(0.0, 0.0, 40.0).original_element();
        let faces = element.face_tractions();
        assert!(approx_eq(faces[0].shear_vector().1, 40.0, 1e-12));
        assert!(approx_eq(faces[1].shear_vector().0, 40.0, 1e-12));
        assert!(approx_eq(faces[2].shear_vector().1, -40.0, 1e-12));
    }
}
