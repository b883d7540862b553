//! Axial members: direct stress, the reference stress-strain curve, and the
//! simplified torsion display.
//!
//! All three take the force/area slider pair. Stress is reported in MPa using
//! `σ = P[kN]·1000 / A[mm²]`.

use std::f64::consts::PI;

use serde::{Deserialize, Serialize};

use crate::errors::TutorResult;
use crate::units::{KiloNewtons, Newtons, SqMm};

use super::require_positive;

/// Direct (normal) stress in an axially loaded member
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DirectStressResult {
    pub force_kn: f64,
    pub area_mm2: f64,
    /// σ = P/A (MPa)
    pub stress_mpa: f64,
}

/// Calculate `σ = P·1000 / A`.
///
/// # Errors
///
/// Returns a domain error when `area_mm2` is not strictly positive.
///
/// # Example
///
/// ```rust
/// use tutor_core::evaluator::axial::direct_stress;
///
/// let result = direct_stress(22.0, 817.0).unwrap();
/// assert!((result.stress_mpa - 26.93).abs() < 0.01);
/// assert!(direct_stress(22.0, 0.0).is_err());
/// ```
pub fn direct_stress(force_kn: f64, area_mm2: f64) -> TutorResult<DirectStressResult> {
    require_positive("area_mm2", area_mm2, "non-positive area")?;
    let stress = Newtons::from(KiloNewtons(force_kn)) / SqMm(area_mm2);
    Ok(DirectStressResult {
        force_kn,
        area_mm2,
        stress_mpa: stress.value(),
    })
}

// ============================================================================
// Reference material curve
// ============================================================================

/// Which branch of the reference curve a stress falls on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CurveRegion {
    /// Linear (Hookean) segment up to the knee
    Elastic,
    /// Square-root hardening segment past the knee
    Plastic,
    /// Above the highest plotted stress
    BeyondCurve,
}

/// Elastic-then-power-law stress-strain curve used by the material lab.
///
/// ```text
///  σ │            ____----
///    │      __---
///    │    /
///    │   /  knee (ε_k, σ_k)
///    │  /
///    └──────────────────── ε
/// ```
///
/// - σ = (σ_k/ε_k)·ε                     for ε ≤ ε_k
/// - σ = σ_k + K·sqrt(ε − ε_k)           for ε_k < ε ≤ ε_max
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MaterialCurve {
    /// Strain at the end of the linear segment
    pub knee_strain: f64,
    /// Stress at the end of the linear segment (MPa)
    pub knee_stress_mpa: f64,
    /// Hardening coefficient K (MPa)
    pub hardening_mpa: f64,
    /// Last plotted strain
    pub max_strain: f64,
}

impl MaterialCurve {
    /// The ductile-steel-like curve shown in the lab
    pub const REFERENCE: MaterialCurve = MaterialCurve {
        knee_strain: 0.05,
        knee_stress_mpa: 250.0,
        hardening_mpa: 150.0,
        max_strain: 0.6,
    };

    /// Slope of the linear segment (MPa per unit strain)
    pub fn elastic_modulus_mpa(&self) -> f64 {
        self.knee_stress_mpa / self.knee_strain
    }

    /// Stress at a strain, clamped to the plotted strain range
    pub fn stress_at(&self, strain: f64) -> f64 {
        let strain = strain.clamp(0.0, self.max_strain);
        if strain <= self.knee_strain {
            self.elastic_modulus_mpa() * strain
        } else {
            self.knee_stress_mpa + self.hardening_mpa * (strain - self.knee_strain).sqrt()
        }
    }

    /// Highest plotted stress
    pub fn max_stress_mpa(&self) -> f64 {
        self.stress_at(self.max_strain)
    }

    /// Branch a (non-negative) stress falls on
    pub fn region(&self, stress_mpa: f64) -> CurveRegion {
        if stress_mpa > self.max_stress_mpa() {
            CurveRegion::BeyondCurve
        } else if stress_mpa <= self.knee_stress_mpa {
            CurveRegion::Elastic
        } else {
            CurveRegion::Plastic
        }
    }

    /// Inverse of [`stress_at`](Self::stress_at). Returns `None` for a
    /// negative stress or one above the curve.
    pub fn strain_at(&self, stress_mpa: f64) -> Option<f64> {
        if stress_mpa < 0.0 || stress_mpa.is_nan() {
            return None;
        }
        match self.region(stress_mpa) {
            CurveRegion::Elastic => Some(stress_mpa / self.elastic_modulus_mpa()),
            CurveRegion::Plastic => {
                let root = (stress_mpa - self.knee_stress_mpa) / self.hardening_mpa;
                Some(self.knee_strain + root * root)
            }
            CurveRegion::BeyondCurve => None,
        }
    }

    /// Evenly spaced `(strain, stress)` points for plotting; the knee is
    /// always included.
    pub fn sample(&self, points: usize) -> Vec<(f64, f64)> {
        let points = points.max(2);
        let mut samples: Vec<(f64, f64)> = (0..points)
            .map(|i| {
                let strain = self.max_strain * i as f64 / (points - 1) as f64;
                (strain, self.stress_at(strain))
            })
            .collect();
        samples.push((self.knee_strain, self.knee_stress_mpa));
        samples.sort_by(|a, b| a.0.total_cmp(&b.0));
        samples.dedup_by(|a, b| (a.0 - b.0).abs() < 1e-12);
        samples
    }
}

/// Operating point on the reference curve for the current slider state
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MaterialResponse {
    pub force_kn: f64,
    pub area_mm2: f64,
    pub stress_mpa: f64,
    /// Strain on the reference curve; `None` above the plotted range
    pub strain: Option<f64>,
    pub region: CurveRegion,
    pub curve: MaterialCurve,
}

/// Locate the current direct stress on the reference curve.
///
/// # Errors
///
/// Returns a domain error when `area_mm2` is not strictly positive.
pub fn material_response(force_kn: f64, area_mm2: f64) -> TutorResult<MaterialResponse> {
    let direct = direct_stress(force_kn, area_mm2)?;
    let curve = MaterialCurve::REFERENCE;
    let magnitude = direct.stress_mpa.abs();
    Ok(MaterialResponse {
        force_kn,
        area_mm2,
        stress_mpa: direct.stress_mpa,
        strain: curve.strain_at(magnitude),
        region: curve.region(magnitude),
        curve,
    })
}

// ============================================================================
// Torsion
// ============================================================================

/// Simplified torsion display for a solid circular shaft
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TorsionResult {
    pub force_kn: f64,
    pub area_mm2: f64,
    /// r = sqrt(A/π)
    pub radius_mm: f64,
    /// T = P·r with P applied tangentially at the surface (N·mm)
    pub torque_nmm: f64,
    /// J = π r⁴ / 2
    pub polar_moment_mm4: f64,
    /// τ_max = T·r / J (MPa)
    pub shear_stress_mpa: f64,
}

/// Shaft radius from the area slider and the resulting surface shear.
///
/// # Errors
///
/// Returns a domain error when `area_mm2` is not strictly positive.
pub fn torsion(force_kn: f64, area_mm2: f64) -> TutorResult<TorsionResult> {
    require_positive("area_mm2", area_mm2, "non-positive area")?;
    let radius_mm = (area_mm2 / PI).sqrt();
    let torque_nmm = Newtons::from(KiloNewtons(force_kn)).value() * radius_mm;
    let polar_moment_mm4 = PI * radius_mm.powi(4) / 2.0;
    Ok(TorsionResult {
        force_kn,
        area_mm2,
        radius_mm,
        torque_nmm,
        polar_moment_mm4,
        shear_stress_mpa: torque_nmm * radius_mm / polar_moment_mm4,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direct_stress_scenario() {
        // 22 kN over 817 mm²
        let result = direct_stress(22.0, 817.0).unwrap();
        assert!((result.stress_mpa - 22.0 * 1000.0 / 817.0).abs() < 1e-12);
        assert!((result.stress_mpa - 26.93).abs() < 0.005);
    }

    #[test]
    fn test_direct_stress_rejects_non_positive_area() {
        for area in [0.0, -10.0, f64::NAN] {
            let error = direct_stress(22.0, area).unwrap_err();
            assert!(error.is_domain(), "area {} should be rejected", area);
        }
    }

    #[test]
    fn test_curve_is_continuous_at_knee() {
        let curve = MaterialCurve::REFERENCE;
        let below = curve.stress_at(curve.knee_strain - 1e-9);
        let above = curve.stress_at(curve.knee_strain + 1e-9);
        assert!((below - above).abs() < 0.01);
        assert_eq!(curve.elastic_modulus_mpa(), 5000.0);
    }

    #[test]
    fn test_curve_inverse_mapping() {
        let curve = MaterialCurve::REFERENCE;
        for strain in [0.0, 0.01, 0.05, 0.1, 0.3, 0.6] {
            let stress = curve.stress_at(strain);
            let back = curve.strain_at(stress).unwrap();
            assert!((back - strain).abs() < 1e-9, "strain {} -> {}", strain, back);
        }
    }

    #[test]
    fn test_curve_omits_stress_above_range() {
        let curve = MaterialCurve::REFERENCE;
        assert_eq!(curve.strain_at(curve.max_stress_mpa() + 1.0), None);
        assert_eq!(curve.region(1000.0), CurveRegion::BeyondCurve);
    }

    #[test]
    fn test_curve_samples_include_knee() {
        let samples = MaterialCurve::REFERENCE.sample(7);
        assert!(samples.iter().any(|(e, s)| *e == 0.05 && *s == 250.0));
        assert!(samples.windows(2).all(|w| w[0].0 < w[1].0 && w[0].1 <= w[1].1));
    }

    #[test]
    fn test_material_response_regions() {
        let elastic = material_response(22.0, 817.0).unwrap();
        assert_eq!(elastic.region, CurveRegion::Elastic);
        assert!((elastic.strain.unwrap() - elastic.stress_mpa / 5000.0).abs() < 1e-12);

        // 100 kN on 300 mm² = 333 MPa, past the knee but on the curve
        let plastic = material_response(100.0, 300.0).unwrap();
        assert_eq!(plastic.region, CurveRegion::Plastic);
        assert!(plastic.strain.unwrap() > 0.05);

        // 100 kN on 100 mm² = 1000 MPa, off the chart
        let beyond = material_response(100.0, 100.0).unwrap();
        assert_eq!(beyond.strain, None);
    }

    #[test]
    fn test_torsion_surface_shear() {
        let result = torsion(22.0, 817.0).unwrap();
        assert!((result.radius_mm - (817.0 / PI).sqrt()).abs() < 1e-12);
        // T·r/J with T = P·r reduces to 2P/A
        assert!((result.shear_stress_mpa - 2.0 * 22_000.0 / 817.0).abs() < 1e-9);
        assert!(torsion(22.0, -1.0).is_err());
    }
}
