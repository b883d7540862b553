//! # Lab Topics
//!
//! The catalogue of mechanics labs. A [`LabTopic`] is chosen once by the menu
//! and then drives both the formula set and the diagram layout; nothing in
//! the crate dispatches on the human-readable title.
//!
//! ## Example
//!
//! ```rust
//! use tutor_core::topics::LabTopic;
//!
//! let topic: LabTopic = "sm_5".parse().unwrap();
//! assert_eq!(topic, LabTopic::BendingStress);
//! assert_eq!(topic.id(), "SM_5");
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::{TutorError, TutorResult};
use crate::inputs::{slider_specs, InputKind, SliderSpec};

/// Lecture topic selected from the lab menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum LabTopic {
    /// Axial force over a cross-section
    #[serde(rename = "SM_1")]
    DirectStress,
    /// Stress-strain response of a ductile material
    #[serde(rename = "SM_2")]
    MaterialProperties,
    /// Shear stress in a circular shaft
    #[serde(rename = "SM_3")]
    Torsion,
    /// Shear force and bending moment diagrams
    #[serde(rename = "SM_4")]
    ShearAndMoment,
    /// Peak bending stress from the section modulus
    #[serde(rename = "SM_5")]
    BendingStress,
    /// Qualitative deflected shape
    #[serde(rename = "SM_6")]
    BeamDeflection,
    /// Plane stress transformation and Mohr's circle
    #[serde(rename = "SM_7")]
    CombinedLoading,
}

impl LabTopic {
    /// Every topic in menu order
    pub const ALL: [LabTopic; 7] = [
        LabTopic::DirectStress,
        LabTopic::MaterialProperties,
        LabTopic::Torsion,
        LabTopic::ShearAndMoment,
        LabTopic::BendingStress,
        LabTopic::BeamDeflection,
        LabTopic::CombinedLoading,
    ];

    /// Stable lecture identifier (e.g. "SM_4")
    pub fn id(self) -> &'static str {
        match self {
            LabTopic::DirectStress => "SM_1",
            LabTopic::MaterialProperties => "SM_2",
            LabTopic::Torsion => "SM_3",
            LabTopic::ShearAndMoment => "SM_4",
            LabTopic::BendingStress => "SM_5",
            LabTopic::BeamDeflection => "SM_6",
            LabTopic::CombinedLoading => "SM_7",
        }
    }

    /// snake_case key accepted as an alternative to the id
    pub fn key(self) -> &'static str {
        match self {
            LabTopic::DirectStress => "direct_stress",
            LabTopic::MaterialProperties => "material_properties",
            LabTopic::Torsion => "torsion",
            LabTopic::ShearAndMoment => "shear_and_moment",
            LabTopic::BendingStress => "bending_stress",
            LabTopic::BeamDeflection => "beam_deflection",
            LabTopic::CombinedLoading => "combined_loading",
        }
    }

    /// Title shown in the menu and on the lab page
    pub fn title(self) -> &'static str {
        match self {
            LabTopic::DirectStress => "Direct Stress, Deformation, and Design",
            LabTopic::MaterialProperties => "Design Properties of Materials",
            LabTopic::Torsion => "Torsional Shear Stress and Deformation",
            LabTopic::ShearAndMoment => "Shearing Forces and Bending Moments in Beams",
            LabTopic::BendingStress => "Stress Due to Bending",
            LabTopic::BeamDeflection => "Deflection of Beams",
            LabTopic::CombinedLoading => "Combined Stresses and Mohr's Circle",
        }
    }

    /// Parse a lecture id ("SM_3", case-insensitive) or snake_case key.
    ///
    /// # Errors
    ///
    /// Returns [`TutorError::UnknownTopic`] for anything outside the catalogue.
    pub fn from_id(raw: &str) -> TutorResult<Self> {
        let trimmed = raw.trim();
        LabTopic::ALL
            .into_iter()
            .find(|topic| {
                topic.id().eq_ignore_ascii_case(trimmed) || topic.key().eq_ignore_ascii_case(trimmed)
            })
            .ok_or_else(|| TutorError::unknown_topic(trimmed))
    }

    /// Shape of the slider record this topic consumes
    pub fn input_kind(self) -> InputKind {
        match self {
            LabTopic::DirectStress | LabTopic::MaterialProperties | LabTopic::Torsion => InputKind::Axial,
            LabTopic::ShearAndMoment | LabTopic::BeamDeflection => InputKind::PointLoadBeam,
            LabTopic::BendingStress => InputKind::BendingBeam,
            LabTopic::CombinedLoading => InputKind::PlaneStress,
        }
    }

    /// Sliders shown for this topic, in display order
    pub fn sliders(self) -> &'static [SliderSpec] {
        slider_specs(self.input_kind())
    }

    /// Whether the layout is the stacked beam diagram
    pub fn is_beam(self) -> bool {
        matches!(
            self.input_kind(),
            InputKind::PointLoadBeam | InputKind::BendingBeam
        )
    }
}

impl fmt::Display for LabTopic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.title())
    }
}

impl FromStr for LabTopic {
    type Err = TutorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        LabTopic::from_id(s)
    }
}
