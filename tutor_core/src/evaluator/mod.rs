//! # Mechanics Evaluator
//!
//! Closed-form formulas for every lab topic. [`evaluate`] is a pure function
//! of the topic and its slider record; results are recomputed on every call
//! and never cached.
//!
//! ## Example
//!
//! ```rust
//! use tutor_core::evaluator::{evaluate, Quantity};
//! use tutor_core::inputs::SliderInputs;
//! use tutor_core::topics::LabTopic;
//!
//! let inputs = SliderInputs::Axial { force_kn: 22.0, area_mm2: 817.0 };
//! let derived = evaluate(LabTopic::DirectStress, &inputs).unwrap();
//! let stress = derived.get(Quantity::Stress).unwrap();
//! assert!((stress - 26.93).abs() < 0.01);
//! ```

pub mod axial;
pub mod beam;
pub mod mohr;

pub use axial::{
    direct_stress, material_response, torsion, CurveRegion, DirectStressResult, MaterialCurve,
    MaterialResponse, TorsionResult,
};
pub use beam::{bending_stress, BeamDiagrams, BeamResult, PointLoadBeam};
pub use mohr::{ElementStress, FaceTraction, MohrCircle};

use serde::{Deserialize, Serialize};

use crate::errors::{TutorError, TutorResult};
use crate::inputs::SliderInputs;
use crate::topics::LabTopic;

/// Reject zero, negative and NaN divisors
pub(crate) fn require_positive(quantity: &str, value: f64, reason: &str) -> TutorResult<()> {
    if value > 0.0 {
        Ok(())
    } else {
        Err(TutorError::domain(quantity, value, reason))
    }
}

// ============================================================================
// Named quantities
// ============================================================================

/// A displayable derived quantity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Quantity {
    Stress,
    Strain,
    ShaftRadius,
    Torque,
    PolarMoment,
    ShearStress,
    LoadPosition,
    ReactionLeft,
    ReactionRight,
    MaxShear,
    MaxMoment,
    AverageShearStress,
    BendingStress,
    TipDeflectionShape,
    Center,
    Radius,
    Sigma1,
    Sigma2,
    TauMax,
    ThetaP,
    ThetaS,
    VonMises,
}

impl Quantity {
    /// Human-readable name
    pub fn name(self) -> &'static str {
        match self {
            Quantity::Stress => "normal stress",
            Quantity::Strain => "strain",
            Quantity::ShaftRadius => "shaft radius",
            Quantity::Torque => "torque",
            Quantity::PolarMoment => "polar moment of inertia",
            Quantity::ShearStress => "max shear stress",
            Quantity::LoadPosition => "load position",
            Quantity::ReactionLeft => "left reaction",
            Quantity::ReactionRight => "right reaction",
            Quantity::MaxShear => "max shear force",
            Quantity::MaxMoment => "max bending moment",
            Quantity::AverageShearStress => "average shear stress",
            Quantity::BendingStress => "bending stress",
            Quantity::TipDeflectionShape => "tip deflection (relative)",
            Quantity::Center => "circle center",
            Quantity::Radius => "circle radius",
            Quantity::Sigma1 => "major principal stress",
            Quantity::Sigma2 => "minor principal stress",
            Quantity::TauMax => "max in-plane shear",
            Quantity::ThetaP => "principal angle",
            Quantity::ThetaS => "max shear angle",
            Quantity::VonMises => "von Mises stress",
        }
    }

    /// Short symbol used on diagrams
    pub fn symbol(self) -> &'static str {
        match self {
            Quantity::Stress => "σ",
            Quantity::Strain => "ε",
            Quantity::ShaftRadius => "r",
            Quantity::Torque => "T",
            Quantity::PolarMoment => "J",
            Quantity::ShearStress => "τ",
            Quantity::LoadPosition => "a",
            Quantity::ReactionLeft => "R1",
            Quantity::ReactionRight => "R2",
            Quantity::MaxShear => "Vmax",
            Quantity::MaxMoment => "Mmax",
            Quantity::AverageShearStress => "τavg",
            Quantity::BendingStress => "σb",
            Quantity::TipDeflectionShape => "y_tip",
            Quantity::Center => "C",
            Quantity::Radius => "R",
            Quantity::Sigma1 => "σ1",
            Quantity::Sigma2 => "σ2",
            Quantity::TauMax => "τmax",
            Quantity::ThetaP => "θp",
            Quantity::ThetaS => "θs",
            Quantity::VonMises => "σvm",
        }
    }

    /// Unit suffix; empty for dimensionless values
    pub fn unit(self) -> &'static str {
        match self {
            Quantity::Strain | Quantity::TipDeflectionShape => "",
            Quantity::ShaftRadius => "mm",
            Quantity::Torque => "N·mm",
            Quantity::PolarMoment => "mm⁴",
            Quantity::LoadPosition => "m",
            Quantity::ReactionLeft | Quantity::ReactionRight | Quantity::MaxShear => "kN",
            Quantity::MaxMoment => "kN·m",
            Quantity::ThetaP | Quantity::ThetaS => "°",
            Quantity::Stress
            | Quantity::ShearStress
            | Quantity::AverageShearStress
            | Quantity::BendingStress
            | Quantity::Center
            | Quantity::Radius
            | Quantity::Sigma1
            | Quantity::Sigma2
            | Quantity::TauMax
            | Quantity::VonMises => "MPa",
        }
    }
}

// ============================================================================
// Derived quantities
// ============================================================================

/// Evaluator output, one typed record per formula set
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum DerivedQuantities {
    DirectStress(DirectStressResult),
    MaterialResponse(MaterialResponse),
    Torsion(TorsionResult),
    Beam(BeamResult),
    Mohr(MohrCircle),
}

impl DerivedQuantities {
    /// Name -> value view in display order. Optional values are omitted.
    pub fn quantities(&self) -> Vec<(Quantity, f64)> {
        match self {
            DerivedQuantities::DirectStress(r) => vec![(Quantity::Stress, r.stress_mpa)],
            DerivedQuantities::MaterialResponse(r) => {
                let mut values = vec![(Quantity::Stress, r.stress_mpa)];
                if let Some(strain) = r.strain {
                    values.push((Quantity::Strain, strain));
                }
                values
            }
            DerivedQuantities::Torsion(r) => vec![
                (Quantity::ShaftRadius, r.radius_mm),
                (Quantity::Torque, r.torque_nmm),
                (Quantity::PolarMoment, r.polar_moment_mm4),
                (Quantity::ShearStress, r.shear_stress_mpa),
            ],
            DerivedQuantities::Beam(r) => {
                let mut values = vec![
                    (Quantity::LoadPosition, r.beam.position),
                    (Quantity::ReactionLeft, r.reaction_left_kn),
                    (Quantity::ReactionRight, r.reaction_right_kn),
                    (Quantity::MaxShear, r.max_shear_kn),
                    (Quantity::MaxMoment, r.max_moment_knm),
                ];
                let optional = [
                    (Quantity::AverageShearStress, r.average_shear_stress_mpa),
                    (Quantity::BendingStress, r.bending_stress_mpa),
                    (Quantity::TipDeflectionShape, r.tip_deflection_shape),
                ];
                values.extend(
                    optional
                        .into_iter()
                        .filter_map(|(quantity, value)| value.map(|v| (quantity, v))),
                );
                values
            }
            DerivedQuantities::Mohr(c) => vec![
                (Quantity::Center, c.center_mpa),
                (Quantity::Radius, c.radius_mpa),
                (Quantity::Sigma1, c.sigma_1_mpa),
                (Quantity::Sigma2, c.sigma_2_mpa),
                (Quantity::TauMax, c.tau_max_mpa),
                (Quantity::ThetaP, c.theta_p_deg),
                (Quantity::ThetaS, c.theta_s_deg),
                (Quantity::VonMises, c.von_mises_mpa),
            ],
        }
    }

    /// Look up one quantity
    pub fn get(&self, quantity: Quantity) -> Option<f64> {
        self.quantities()
            .into_iter()
            .find(|(q, _)| *q == quantity)
            .map(|(_, value)| value)
    }

    /// Whether this record is what `evaluate` produces for the topic
    pub fn fits(&self, topic: LabTopic) -> bool {
        match (topic, self) {
            (LabTopic::DirectStress, DerivedQuantities::DirectStress(_))
            | (LabTopic::MaterialProperties, DerivedQuantities::MaterialResponse(_))
            | (LabTopic::Torsion, DerivedQuantities::Torsion(_))
            | (LabTopic::CombinedLoading, DerivedQuantities::Mohr(_)) => true,
            (LabTopic::ShearAndMoment, DerivedQuantities::Beam(_)) => true,
            (LabTopic::BendingStress, DerivedQuantities::Beam(r)) => r.bending_stress_mpa.is_some(),
            (LabTopic::BeamDeflection, DerivedQuantities::Beam(r)) => r.tip_deflection_shape.is_some(),
            _ => false,
        }
    }
}

/// Evaluate the formulas for a topic.
///
/// # Errors
///
/// - [`TutorError::InputMismatch`] when the slider record belongs to another
///   topic
/// - [`TutorError::Domain`] for a non-positive area or section modulus
pub fn evaluate(topic: LabTopic, inputs: &SliderInputs) -> TutorResult<DerivedQuantities> {
    let derived = match (topic, *inputs) {
        (LabTopic::DirectStress, SliderInputs::Axial { force_kn, area_mm2 }) => {
            DerivedQuantities::DirectStress(direct_stress(force_kn, area_mm2)?)
        }
        (LabTopic::MaterialProperties, SliderInputs::Axial { force_kn, area_mm2 }) => {
            DerivedQuantities::MaterialResponse(material_response(force_kn, area_mm2)?)
        }
        (LabTopic::Torsion, SliderInputs::Axial { force_kn, area_mm2 }) => {
            DerivedQuantities::Torsion(torsion(force_kn, area_mm2)?)
        }
        (
            LabTopic::ShearAndMoment,
            SliderInputs::PointLoadBeam {
                force_kn,
                load_position,
                area_mm2,
            },
        ) => DerivedQuantities::Beam(beam::shear_and_moment(force_kn, load_position, area_mm2)?),
        (
            LabTopic::BendingStress,
            SliderInputs::BendingBeam {
                force_kn,
                load_position,
                section_modulus_e3_mm3,
            },
        ) => DerivedQuantities::Beam(beam::bending(force_kn, load_position, section_modulus_e3_mm3)?),
        (
            LabTopic::BeamDeflection,
            SliderInputs::PointLoadBeam {
                force_kn,
                load_position,
                area_mm2,
            },
        ) => DerivedQuantities::Beam(beam::deflection(force_kn, load_position, area_mm2)?),
        (
            LabTopic::CombinedLoading,
            SliderInputs::PlaneStress {
                sigma_x_mpa,
                sigma_y_mpa,
                tau_xy_mpa,
            },
        ) => DerivedQuantities::Mohr(MohrCircle::from_components(sigma_x_mpa, sigma_y_mpa, tau_xy_mpa)),
        (topic, _) => {
            return Err(TutorError::input_mismatch(topic.id(), topic.input_kind().name()));
        }
    };

    log::debug!("evaluated {}: {:?}", topic.id(), derived.quantities());
    Ok(derived)
}
