//! Simply-Supported Beam with a Single Point Load
//!
//! The span is normalized to 1 m, so the load position slider (0-1000) maps
//! directly onto metres after dividing by 1000. The position is clamped into
//! `[0.05, 0.95]` to keep the load off the supports.
//!
//! ## Sign Convention
//! - Positive moment: tension on bottom fiber (sagging)
//! - Positive shear: left side up, right side down
//! - Deflection shape: negative is downward
//!
//! ## Example
//! ```rust
//! use tutor_core::evaluator::beam::PointLoadBeam;
//!
//! // 22 kN at midspan
//! let beam = PointLoadBeam::from_slider(22.0, 500.0);
//! assert_eq!(beam.reaction_left_kn(), 11.0);
//! assert_eq!(beam.max_moment_knm(), 5.5);
//! ```

use serde::{Deserialize, Serialize};

use crate::errors::TutorResult;
use crate::units::{CubicMm, KiloCubicMm, KiloNewtons, KnM, NMm, Newtons, SqMm};

use super::require_positive;

/// Closest the load may sit to either support (fraction of span)
pub const MIN_LOAD_POSITION: f64 = 0.05;
/// Furthest the load may sit along the span
pub const MAX_LOAD_POSITION: f64 = 0.95;

/// Normalize the raw 0-1000 slider value to a span fraction
pub fn normalize_load_position(raw: f64) -> f64 {
    if raw.is_nan() {
        return 0.5;
    }
    (raw / 1000.0).clamp(MIN_LOAD_POSITION, MAX_LOAD_POSITION)
}

/// One point load on a unit simply-supported span
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointLoadBeam {
    /// Load magnitude P (kN)
    pub force_kn: f64,
    /// Load position (m from left support, span = 1 m)
    pub position: f64,
}

impl PointLoadBeam {
    /// Build from the raw slider values
    pub fn from_slider(force_kn: f64, raw_position: f64) -> Self {
        Self {
            force_kn,
            position: normalize_load_position(raw_position),
        }
    }

    /// R1 = P(1 - pos)
    pub fn reaction_left_kn(&self) -> f64 {
        self.force_kn * (1.0 - self.position)
    }

    /// R2 = P·pos
    pub fn reaction_right_kn(&self) -> f64 {
        self.force_kn * self.position
    }

    /// Shear force at x (kN). Jumps by -P at the load.
    pub fn shear_at(&self, x: f64) -> f64 {
        if x < self.position {
            self.reaction_left_kn()
        } else {
            -self.reaction_right_kn()
        }
    }

    /// Bending moment at x (kN·m)
    pub fn moment_at(&self, x: f64) -> f64 {
        let r1 = self.reaction_left_kn();
        if x < self.position {
            r1 * x
        } else {
            r1 * x - self.force_kn * (x - self.position)
        }
    }

    /// M_max = R1·pos, under the load
    pub fn max_moment_knm(&self) -> f64 {
        self.reaction_left_kn() * self.position
    }

    /// V_max = max(R1, R2)
    pub fn max_shear_kn(&self) -> f64 {
        self.reaction_left_kn().max(self.reaction_right_kn())
    }

    /// Qualitative cantilever deflected shape with the load at `pos`, fixed
    /// end at x = 0. Unscaled (no E or I); only the shape is meaningful.
    pub fn cantilever_shape_at(&self, x: f64) -> f64 {
        let pos = self.position;
        if x <= pos {
            -self.force_kn * x * x * (3.0 * pos - x)
        } else {
            -self.force_kn * pos * pos * (3.0 * x - pos)
        }
    }

    /// Sample positions across the span, with the load position and points
    /// just either side of it so the shear step draws vertically.
    pub fn sample_positions(&self, points: usize) -> Vec<f64> {
        let points = points.max(2);
        let mut positions: Vec<f64> = (0..points)
            .map(|i| i as f64 / (points - 1) as f64)
            .collect();

        let epsilon = 0.001;
        let pos = self.position;
        if pos > epsilon && pos < 1.0 - epsilon {
            positions.push(pos - epsilon);
            positions.push(pos);
            positions.push(pos + epsilon);
        }

        positions.sort_by(|a, b| a.total_cmp(b));
        positions.dedup_by(|a, b| (*a - *b).abs() < epsilon / 2.0);
        positions
    }

    /// Sampled shear, moment and cantilever-shape curves
    pub fn diagrams(&self, points: usize) -> BeamDiagrams {
        let positions = self.sample_positions(points);
        let mut diagrams = BeamDiagrams::default();
        for &x in &positions {
            diagrams.shear.push((x, self.shear_at(x)));
            diagrams.moment.push((x, self.moment_at(x)));
            diagrams.deflection_shape.push((x, self.cantilever_shape_at(x)));
        }
        diagrams
    }
}

/// Sampled `(x, value)` curves for the beam panels
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BeamDiagrams {
    pub shear: Vec<(f64, f64)>,
    pub moment: Vec<(f64, f64)>,
    pub deflection_shape: Vec<(f64, f64)>,
}

/// Bending stress `σ_b = M_max·1e6 / (S·1e3)` (MPa) with S in 10³ mm³.
///
/// # Errors
///
/// Returns a domain error when the section modulus is not strictly positive.
pub fn bending_stress(max_moment_knm: f64, section_modulus_e3_mm3: f64) -> TutorResult<f64> {
    require_positive(
        "section_modulus_e3_mm3",
        section_modulus_e3_mm3,
        "non-positive section modulus",
    )?;
    let stress = NMm::from(KnM(max_moment_knm)) / CubicMm::from(KiloCubicMm(section_modulus_e3_mm3));
    Ok(stress.value())
}

/// Derived values for SM_4, SM_5 and SM_6
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BeamResult {
    pub beam: PointLoadBeam,
    pub reaction_left_kn: f64,
    pub reaction_right_kn: f64,
    pub max_shear_kn: f64,
    pub max_moment_knm: f64,
    /// V_max·1000 / A, when the area slider is present
    pub average_shear_stress_mpa: Option<f64>,
    /// σ_b, when the section modulus slider is present
    pub bending_stress_mpa: Option<f64>,
    /// Cantilever shape value at the free end, for the deflection lab
    pub tip_deflection_shape: Option<f64>,
}

impl BeamResult {
    fn from_beam(beam: PointLoadBeam) -> Self {
        Self {
            beam,
            reaction_left_kn: beam.reaction_left_kn(),
            reaction_right_kn: beam.reaction_right_kn(),
            max_shear_kn: beam.max_shear_kn(),
            max_moment_knm: beam.max_moment_knm(),
            average_shear_stress_mpa: None,
            bending_stress_mpa: None,
            tip_deflection_shape: None,
        }
    }
}

/// Shear and moment analysis (SM_4). The area feeds the average web shear.
///
/// # Errors
///
/// Returns a domain error when `area_mm2` is not strictly positive.
pub fn shear_and_moment(force_kn: f64, raw_position: f64, area_mm2: f64) -> TutorResult<BeamResult> {
    require_positive("area_mm2", area_mm2, "non-positive area")?;
    let mut result = BeamResult::from_beam(PointLoadBeam::from_slider(force_kn, raw_position));
    let shear = Newtons::from(KiloNewtons(result.max_shear_kn)) / SqMm(area_mm2);
    result.average_shear_stress_mpa = Some(shear.value());
    Ok(result)
}

/// Shear and moment plus peak bending stress (SM_5).
///
/// # Errors
///
/// Returns a domain error when the section modulus is not strictly positive.
pub fn bending(force_kn: f64, raw_position: f64, section_modulus_e3_mm3: f64) -> TutorResult<BeamResult> {
    let mut result = BeamResult::from_beam(PointLoadBeam::from_slider(force_kn, raw_position));
    result.bending_stress_mpa = Some(bending_stress(result.max_moment_knm, section_modulus_e3_mm3)?);
    Ok(result)
}

/// Shear and moment plus the qualitative deflected shape (SM_6).
///
/// # Errors
///
/// Returns a domain error when `area_mm2` is not strictly positive.
pub fn deflection(force_kn: f64, raw_position: f64, area_mm2: f64) -> TutorResult<BeamResult> {
    let mut result = shear_and_moment(force_kn, raw_position, area_mm2)?;
    result.tip_deflection_shape = Some(result.beam.cantilever_shape_at(1.0));
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: f64, b: f64, tol: f64) -> bool {
        (a - b).abs() < tol
    }

    #[test]
    fn test_midspan_reactions_and_moment() {
        let result = shear_and_moment(22.0, 500.0, 817.0).unwrap();
        assert_eq!(result.reaction_left_kn, 11.0);
        assert_eq!(result.reaction_right_kn, 11.0);
        assert_eq!(result.max_moment_knm, 5.5);
        assert_eq!(result.max_shear_kn, 11.0);
    }

    #[test]
    fn test_position_is_clamped_off_supports() {
        assert_eq!(normalize_load_position(0.0), MIN_LOAD_POSITION);
        assert_eq!(normalize_load_position(1000.0), MAX_LOAD_POSITION);
        assert_eq!(normalize_load_position(250.0), 0.25);
        assert_eq!(normalize_load_position(f64::NAN), 0.5);
    }

    #[test]
    fn test_reactions_sum_to_load() {
        let beam = PointLoadBeam::from_slider(37.0, 810.0);
        assert!(approx_eq(beam.reaction_left_kn() + beam.reaction_right_kn(), 37.0, 1e-12));
        assert!(approx_eq(beam.max_shear_kn(), 37.0 * 0.81, 1e-12));
    }

    #[test]
    fn test_shear_steps_at_load() {
        let beam = PointLoadBeam::from_slider(10.0, 300.0);
        assert!(approx_eq(beam.shear_at(0.299), 7.0, 1e-12));
        assert!(approx_eq(beam.shear_at(0.3), -3.0, 1e-12));
    }

    #[test]
    fn test_moment_peaks_under_load_and_vanishes_at_supports() {
        let beam = PointLoadBeam::from_slider(10.0, 300.0);
        assert!(approx_eq(beam.moment_at(0.0), 0.0, 1e-12));
        assert!(approx_eq(beam.moment_at(1.0), 0.0, 1e-12));
        assert_eq!(beam.moment_at(beam.position), beam.max_moment_knm());
        assert!(approx_eq(beam.max_moment_knm(), 2.1, 1e-12));
    }

    #[test]
    fn test_sample_positions_include_critical_points() {
        let beam = PointLoadBeam::from_slider(10.0, 333.0);
        let positions = beam.sample_positions(101);
        assert!(positions.contains(&0.333));
        assert!(positions.iter().any(|x| approx_eq(*x, 0.332, 1e-12)));
        assert!(positions.iter().any(|x| approx_eq(*x, 0.334, 1e-12)));
        assert_eq!(positions.first(), Some(&0.0));
        assert_eq!(positions.last(), Some(&1.0));
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_bending_stress() {
        let result = bending(22.0, 500.0, 301.0).unwrap();
        let sigma = result.bending_stress_mpa.unwrap();
        assert!(approx_eq(sigma, 5.5e6 / 301e3, 1e-9));
    }

    #[test]
    fn test_bending_rejects_zero_section_modulus() {
        let error = bending(22.0, 500.0, 0.0).unwrap_err();
        assert!(error.is_domain());
    }

    #[test]
    fn test_average_shear_needs_positive_area() {
        assert!(shear_and_moment(22.0, 500.0, 0.0).unwrap_err().is_domain());
        let result = shear_and_moment(22.0, 500.0, 1100.0).unwrap();
        assert!(approx_eq(result.average_shear_stress_mpa.unwrap(), 10.0, 1e-12));
    }

    #[test]
    fn test_cantilever_shape_is_downward_and_continuous() {
        let beam = PointLoadBeam::from_slider(10.0, 500.0);
        assert_eq!(beam.cantilever_shape_at(0.0), 0.0);
        let below = beam.cantilever_shape_at(0.5);
        let above = beam.cantilever_shape_at(0.5 + 1e-12);
        assert!(approx_eq(below, above, 1e-9));
        let diagrams = beam.diagrams(21);
        assert!(diagrams.deflection_shape.windows(2).all(|w| w[1].1 <= w[0].1));
        let result = deflection(10.0, 500.0, 817.0).unwrap();
        assert_eq!(result.tip_deflection_shape, Some(beam.cantilever_shape_at(1.0)));
    }
}
