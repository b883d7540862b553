//! # Slider Inputs
//!
//! Typed slider records, one variant per input shape. The UI builds them
//! through [`SliderInputs::from_pairs`], which applies the slider contract
//! (known keys only, values clamped into range, missing keys defaulted).
//! Constructing a variant directly skips that contract; the evaluator still
//! rejects non-positive divisors.
//!
//! ## Example
//!
//! ```rust
//! use tutor_core::inputs::SliderInputs;
//! use tutor_core::topics::LabTopic;
//!
//! let inputs = SliderInputs::from_pairs(LabTopic::DirectStress, &[("P", 250.0)]).unwrap();
//! // Force is clamped to the slider maximum, area keeps its default
//! assert_eq!(inputs.value("P"), Some(100.0));
//! assert_eq!(inputs.value("A"), Some(817.0));
//! ```

use serde::{Deserialize, Serialize};

use crate::errors::{TutorError, TutorResult};
use crate::topics::LabTopic;

/// Static description of one slider
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SliderSpec {
    /// Key used in `from_pairs` and in chat annotations
    pub key: &'static str,
    /// Label shown next to the slider
    pub label: &'static str,
    /// Unit suffix
    pub unit: &'static str,
    pub min: f64,
    pub max: f64,
    pub default: f64,
}

impl SliderSpec {
    /// Clamp a raw value into the slider range
    pub fn clamp(&self, value: f64) -> f64 {
        if value.is_nan() {
            self.default
        } else {
            value.clamp(self.min, self.max)
        }
    }
}

/// Force magnitude P [kN]
pub const FORCE: SliderSpec = SliderSpec {
    key: "P",
    label: "Force Magnitude (P)",
    unit: "kN",
    min: 1.0,
    max: 100.0,
    default: 22.0,
};

/// Cross-sectional area A [mm²]
pub const AREA: SliderSpec = SliderSpec {
    key: "A",
    label: "Area / Geometry (A)",
    unit: "mm²",
    min: 100.0,
    max: 2000.0,
    default: 817.0,
};

/// Raw load location slider (0-1000, normalized by 1000)
pub const LOAD_POSITION: SliderSpec = SliderSpec {
    key: "L_pos",
    label: "Force Location (L_pos)",
    unit: "‰ of span",
    min: 0.0,
    max: 1000.0,
    default: 500.0,
};

/// Section modulus S [10³ mm³]
pub const SECTION_MODULUS: SliderSpec = SliderSpec {
    key: "S",
    label: "Section Modulus (S)",
    unit: "10³ mm³",
    min: 10.0,
    max: 500.0,
    default: 301.0,
};

/// Normal stress on the x face [MPa]
pub const SIGMA_X: SliderSpec = SliderSpec {
    key: "sigma_x",
    label: "Normal Stress (σx)",
    unit: "MPa",
    min: -200.0,
    max: 200.0,
    default: 100.0,
};

/// Normal stress on the y face [MPa]
pub const SIGMA_Y: SliderSpec = SliderSpec {
    key: "sigma_y",
    label: "Normal Stress (σy)",
    unit: "MPa",
    min: -200.0,
    max: 200.0,
    default: 50.0,
};

/// In-plane shear stress [MPa]
pub const TAU_XY: SliderSpec = SliderSpec {
    key: "tau_xy",
    label: "Shear Stress (τxy)",
    unit: "MPa",
    min: -100.0,
    max: 100.0,
    default: 40.0,
};

const AXIAL_SLIDERS: [SliderSpec; 2] = [FORCE, AREA];
const POINT_LOAD_SLIDERS: [SliderSpec; 3] = [FORCE, LOAD_POSITION, AREA];
const BENDING_SLIDERS: [SliderSpec; 3] = [FORCE, LOAD_POSITION, SECTION_MODULUS];
const PLANE_STRESS_SLIDERS: [SliderSpec; 3] = [SIGMA_X, SIGMA_Y, TAU_XY];

/// Shape of a slider record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InputKind {
    Axial,
    PointLoadBeam,
    BendingBeam,
    PlaneStress,
}

impl InputKind {
    pub fn name(self) -> &'static str {
        match self {
            InputKind::Axial => "Axial",
            InputKind::PointLoadBeam => "PointLoadBeam",
            InputKind::BendingBeam => "BendingBeam",
            InputKind::PlaneStress => "PlaneStress",
        }
    }
}

/// Sliders for an input shape, in display order
pub fn slider_specs(kind: InputKind) -> &'static [SliderSpec] {
    match kind {
        InputKind::Axial => &AXIAL_SLIDERS,
        InputKind::PointLoadBeam => &POINT_LOAD_SLIDERS,
        InputKind::BendingBeam => &BENDING_SLIDERS,
        InputKind::PlaneStress => &PLANE_STRESS_SLIDERS,
    }
}

/// Slider values for one UI refresh.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum SliderInputs {
    /// Force over an area (direct stress, material curve, torsion)
    Axial { force_kn: f64, area_mm2: f64 },

    /// Simply-supported beam with one point load; `load_position` is the
    /// raw 0-1000 slider value
    PointLoadBeam {
        force_kn: f64,
        load_position: f64,
        area_mm2: f64,
    },

    /// Point-load beam checked for bending stress
    BendingBeam {
        force_kn: f64,
        load_position: f64,
        section_modulus_e3_mm3: f64,
    },

    /// Plane stress state for Mohr's circle
    PlaneStress {
        sigma_x_mpa: f64,
        sigma_y_mpa: f64,
        tau_xy_mpa: f64,
    },
}

impl SliderInputs {
    /// Slider defaults for a topic
    pub fn defaults(topic: LabTopic) -> Self {
        // Defaults are always in range and every key is known
        Self::build(topic.input_kind(), |spec| spec.default)
    }

    /// Build inputs from `(key, value)` pairs under the slider contract.
    ///
    /// # Errors
    ///
    /// Returns [`TutorError::InvalidInput`] for a key the topic has no slider
    /// for.
    pub fn from_pairs(topic: LabTopic, pairs: &[(&str, f64)]) -> TutorResult<Self> {
        let specs = topic.sliders();
        for (key, value) in pairs {
            if !specs.iter().any(|spec| spec.key == *key) {
                return Err(TutorError::invalid_input(
                    *key,
                    value.to_string(),
                    format!("{} has no such slider", topic.id()),
                ));
            }
        }

        Ok(Self::build(topic.input_kind(), |spec| {
            pairs
                .iter()
                .rev()
                .find(|(key, _)| *key == spec.key)
                .map(|(_, value)| spec.clamp(*value))
                .unwrap_or(spec.default)
        }))
    }

    fn build(kind: InputKind, value_of: impl Fn(&SliderSpec) -> f64) -> Self {
        match kind {
            InputKind::Axial => SliderInputs::Axial {
                force_kn: value_of(&FORCE),
                area_mm2: value_of(&AREA),
            },
            InputKind::PointLoadBeam => SliderInputs::PointLoadBeam {
                force_kn: value_of(&FORCE),
                load_position: value_of(&LOAD_POSITION),
                area_mm2: value_of(&AREA),
            },
            InputKind::BendingBeam => SliderInputs::BendingBeam {
                force_kn: value_of(&FORCE),
                load_position: value_of(&LOAD_POSITION),
                section_modulus_e3_mm3: value_of(&SECTION_MODULUS),
            },
            InputKind::PlaneStress => SliderInputs::PlaneStress {
                sigma_x_mpa: value_of(&SIGMA_X),
                sigma_y_mpa: value_of(&SIGMA_Y),
                tau_xy_mpa: value_of(&TAU_XY),
            },
        }
    }

    /// Shape of this record
    pub fn kind(&self) -> InputKind {
        match self {
            SliderInputs::Axial { .. } => InputKind::Axial,
            SliderInputs::PointLoadBeam { .. } => InputKind::PointLoadBeam,
            SliderInputs::BendingBeam { .. } => InputKind::BendingBeam,
            SliderInputs::PlaneStress { .. } => InputKind::PlaneStress,
        }
    }

    /// Whether these inputs can feed the given topic
    pub fn fits(&self, topic: LabTopic) -> bool {
        self.kind() == topic.input_kind()
    }

    /// `(slider, value)` pairs in display order
    pub fn pairs(&self) -> Vec<(&'static SliderSpec, f64)> {
        let values: Vec<f64> = match *self {
            SliderInputs::Axial { force_kn, area_mm2 } => vec![force_kn, area_mm2],
            SliderInputs::PointLoadBeam {
                force_kn,
                load_position,
                area_mm2,
            } => vec![force_kn, load_position, area_mm2],
            SliderInputs::BendingBeam {
                force_kn,
                load_position,
                section_modulus_e3_mm3,
            } => vec![force_kn, load_position, section_modulus_e3_mm3],
            SliderInputs::PlaneStress {
                sigma_x_mpa,
                sigma_y_mpa,
                tau_xy_mpa,
            } => vec![sigma_x_mpa, sigma_y_mpa, tau_xy_mpa],
        };
        slider_specs(self.kind()).iter().zip(values).collect()
    }

    /// Look up one slider value by key
    pub fn value(&self, key: &str) -> Option<f64> {
        self.pairs()
            .into_iter()
            .find(|(spec, _)| spec.key == key)
            .map(|(_, value)| value)
    }

    /// Force magnitude, when the record has one
    pub fn force_kn(&self) -> Option<f64> {
        match *self {
            SliderInputs::Axial { force_kn, .. }
            | SliderInputs::PointLoadBeam { force_kn, .. }
            | SliderInputs::BendingBeam { force_kn, .. } => Some(force_kn),
            SliderInputs::PlaneStress { .. } => None,
        }
    }
}
