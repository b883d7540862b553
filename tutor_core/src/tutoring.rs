//! # Tutoring Helpers
//!
//! Local helpers around the Socratic chat: slider context for the chat
//! collaborator, numeric answer checking, and the end-of-session report.
//! The chat transcript itself is owned by the UI layer; these functions only
//! read it.
//!
//! ## Example
//!
//! ```rust
//! use tutor_core::tutoring::check_numeric_match;
//!
//! // The last number in the answer is compared, within 5 %
//! assert!(check_numeric_match("I got 27 MPa", 26.93, 0.05));
//! assert!(!check_numeric_match("first 26.9, then 40", 26.93, 0.05));
//! ```

use std::fmt;

use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::evaluator::DerivedQuantities;
use crate::inputs::SliderInputs;
use crate::topics::LabTopic;

/// Signed decimal, optionally with an exponent
static NUMBER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[-+]?(?:\d+\.?\d*|\.\d+)(?:[eE][-+]?\d+)?").expect("number pattern is valid")
});

/// Phrases that mark a student asking for guidance
static GUIDANCE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\bi\s+don['’]?t\s+know\b|\bhelp\b").expect("guidance pattern is valid")
});

// ============================================================================
// Chat transcript
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChatRole {
    Tutor,
    Student,
}

impl ChatRole {
    fn as_str(self) -> &'static str {
        match self {
            ChatRole::Tutor => "tutor",
            ChatRole::Student => "student",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatTurn {
    pub role: ChatRole,
    pub text: String,
}

/// Ordered chat history for one lab session
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatTranscript {
    pub turns: Vec<ChatTurn>,
}

impl ChatTranscript {
    /// New transcript opened by the tutor's welcome message
    pub fn with_greeting(topic: LabTopic) -> Self {
        let mut transcript = Self::default();
        transcript.push(
            ChatRole::Tutor,
            format!(
                "Welcome to the lab on {}. I have initialized the simulation. \
                 What observations can you make from the current data?",
                topic.title()
            ),
        );
        transcript
    }

    pub fn push(&mut self, role: ChatRole, text: impl Into<String>) {
        self.turns.push(ChatTurn {
            role,
            text: text.into(),
        });
    }

    /// Student turns only
    pub fn student_turns(&self) -> impl Iterator<Item = &ChatTurn> {
        self.turns.iter().filter(|turn| turn.role == ChatRole::Student)
    }
}

impl fmt::Display for ChatTranscript {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, turn) in self.turns.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{}: {}", turn.role.as_str(), turn.text)?;
        }
        Ok(())
    }
}

// ============================================================================
// Chat context
// ============================================================================

fn format_value(value: f64, unit: &str) -> String {
    let number = if value.fract() == 0.0 && value.abs() < 1e9 {
        format!("{:.0}", value)
    } else if value.abs() >= 1e4 {
        format!("{:.0}", value)
    } else if value.abs() < 0.01 && value != 0.0 {
        format!("{:.5}", value)
    } else {
        format!("{:.2}", value)
    };
    if unit.is_empty() {
        number
    } else {
        format!("{} {}", number, unit)
    }
}

/// Bracketed summary of the slider state and derived values, e.g.
/// `[SM_1 Direct Stress, Deformation, and Design | P = 22 kN, A = 817 mm² | σ = 26.93 MPa]`
pub fn context_annotation(topic: LabTopic, inputs: &SliderInputs, derived: &DerivedQuantities) -> String {
    let sliders: Vec<String> = inputs
        .pairs()
        .into_iter()
        .map(|(spec, value)| format!("{} = {}", spec.key, format_value(value, spec.unit)))
        .collect();
    let quantities: Vec<String> = derived
        .quantities()
        .into_iter()
        .map(|(quantity, value)| format!("{} = {}", quantity.symbol(), format_value(value, quantity.unit())))
        .collect();
    format!(
        "[{} {} | {} | {}]",
        topic.id(),
        topic.title(),
        sliders.join(", "),
        quantities.join(", ")
    )
}

/// Prefix a student message with the current lab context
pub fn annotate_message(
    topic: LabTopic,
    inputs: &SliderInputs,
    derived: &DerivedQuantities,
    message: &str,
) -> String {
    format!("{}\n{}", context_annotation(topic, inputs, derived), message.trim())
}

// ============================================================================
// Answer checking
// ============================================================================

/// Last number mentioned in free text
pub fn last_number(text: &str) -> Option<f64> {
    NUMBER
        .find_iter(text)
        .filter_map(|m| m.as_str().parse::<f64>().ok())
        .last()
}

/// Whether the last number in `answer` matches `target`.
///
/// The relative error must be within `tolerance`; for a zero target the
/// absolute value is compared instead. Text without a number never matches.
pub fn check_numeric_match(answer: &str, target: f64, tolerance: f64) -> bool {
    let Some(value) = last_number(answer) else {
        return false;
    };
    let difference = if target == 0.0 {
        value.abs()
    } else {
        (value - target).abs() / target.abs()
    };
    difference <= tolerance
}

// ============================================================================
// Session report
// ============================================================================

/// Summary judgement of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Observation {
    /// The student asked for help or said they did not know
    NeededGuidance,
    /// The student worked through without asking for help
    IndependentDerivation,
}

impl Observation {
    /// Classify from the student's turns
    pub fn classify(transcript: &ChatTranscript) -> Self {
        if transcript.student_turns().any(|turn| GUIDANCE.is_match(&turn.text)) {
            Observation::NeededGuidance
        } else {
            Observation::IndependentDerivation
        }
    }

    pub fn describe(self) -> &'static str {
        match self {
            Observation::NeededGuidance => "Student requested significant guidance on this topic.",
            Observation::IndependentDerivation => "Student demonstrated strong independent derivation.",
        }
    }
}

/// End-of-session report for the instructor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionReport {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub student: String,
    pub topic: LabTopic,
    pub observation: Observation,
    /// Chat history followed by the student's feedback section
    pub transcript: String,
}

impl SessionReport {
    pub fn compose(student: &str, topic: LabTopic, transcript: &ChatTranscript, feedback: &str) -> Self {
        let observation = Observation::classify(transcript);
        log::debug!("session report for {} on {}: {:?}", student, topic.id(), observation);
        Self {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            student: student.trim().to_string(),
            topic,
            observation,
            transcript: format!("{}\n\n--- STUDENT FEEDBACK ---\n{}", transcript, feedback.trim()),
        }
    }

    pub fn to_markdown(&self) -> String {
        format!(
            "### Session Report for {}\n\
             **Topic:** {} ({})\n\
             **Date:** {}\n\n\
             **Observation:** {}\n\n\
             ```text\n{}\n```\n",
            self.student,
            self.topic.title(),
            self.topic.id(),
            self.created_at.format("%Y-%m-%d %H:%M UTC"),
            self.observation.describe(),
            self.transcript
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evaluator::evaluate;

    #[test]
    fn test_last_number_wins() {
        assert_eq!(last_number("sigma is 26.93 MPa, not 30"), Some(30.0));
        assert_eq!(last_number("about -1.5e2"), Some(-150.0));
        assert_eq!(last_number(".5 of it"), Some(0.5));
        assert_eq!(last_number("no idea"), None);
    }

    #[test]
    fn test_relative_tolerance() {
        assert!(check_numeric_match("26.93", 26.93, 0.05));
        assert!(check_numeric_match("28", 26.93, 0.05));
        assert!(!check_numeric_match("29", 26.93, 0.05));
        assert!(!check_numeric_match("I don't know", 26.93, 0.05));
    }

    #[test]
    fn test_zero_target_uses_absolute_error() {
        assert!(check_numeric_match("shear is 0.03", 0.0, 0.05));
        assert!(!check_numeric_match("shear is 0.3", 0.0, 0.05));
    }

    #[test]
    fn test_context_annotation() {
        let topic = LabTopic::DirectStress;
        let inputs = SliderInputs::defaults(topic);
        let derived = evaluate(topic, &inputs).unwrap();
        assert_eq!(
            context_annotation(topic, &inputs, &derived),
            "[SM_1 Direct Stress, Deformation, and Design | P = 22 kN, A = 817 mm² | σ = 26.93 MPa]"
        );
        let message = annotate_message(topic, &inputs, &derived, "  why is it linear? ");
        assert!(message.ends_with("]\nwhy is it linear?"));
    }

    #[test]
    fn test_observation_reads_student_turns_only() {
        let mut transcript = ChatTranscript::with_greeting(LabTopic::Torsion);
        transcript.push(ChatRole::Tutor, "Ask for help whenever you like.");
        transcript.push(ChatRole::Student, "tau = T r / J");
        assert_eq!(Observation::classify(&transcript), Observation::IndependentDerivation);

        transcript.push(ChatRole::Student, "I don’t know what J is");
        assert_eq!(Observation::classify(&transcript), Observation::NeededGuidance);
    }

    #[test]
    fn test_help_must_be_a_word() {
        let mut transcript = ChatTranscript::default();
        transcript.push(ChatRole::Student, "that was helpful");
        assert_eq!(Observation::classify(&transcript), Observation::IndependentDerivation);
        transcript.push(ChatRole::Student, "Help!");
        assert_eq!(Observation::classify(&transcript), Observation::NeededGuidance);
    }

    #[test]
    fn test_report_sections() {
        let mut transcript = ChatTranscript::with_greeting(LabTopic::BendingStress);
        transcript.push(ChatRole::Student, "sigma = M / S");
        let report = SessionReport::compose(" Ada ", LabTopic::BendingStress, &transcript, "More examples please");

        assert_eq!(report.student, "Ada");
        assert!(report.transcript.starts_with("tutor: Welcome to the lab on Stress Due to Bending."));
        assert!(report
            .transcript
            .ends_with("student: sigma = M / S\n\n--- STUDENT FEEDBACK ---\nMore examples please"));

        let markdown = report.to_markdown();
        assert!(markdown.starts_with("### Session Report for Ada\n**Topic:** Stress Due to Bending (SM_5)"));
        assert!(markdown.contains("Student demonstrated strong independent derivation."));
    }

    #[test]
    fn test_report_ids_are_unique() {
        let transcript = ChatTranscript::default();
        let a = SessionReport::compose("A", LabTopic::Torsion, &transcript, "");
        let b = SessionReport::compose("A", LabTopic::Torsion, &transcript, "");
        assert_ne!(a.id, b.id);
    }
}
