//! # tutor_core - Mechanics Tutor Engine
//!
//! `tutor_core` evaluates closed-form strength-of-materials formulas for an
//! interactive lab and renders the matching diagram as a PNG. It also carries
//! the local tutoring helpers: chat context, answer checking and session
//! reports.
//!
//! ## Design Philosophy
//!
//! - **Stateless**: every call takes its topic, inputs and settings explicitly
//! - **Typed inputs**: one slider record shape per topic family, no string maps
//! - **One source of truth**: every number on a diagram comes from the evaluator
//! - **Rich Errors**: structured error types, never `inf`/`NaN` results
//!
//! ## Quick Start
//!
//! ```rust
//! use tutor_core::{evaluate, LabTopic, Quantity, SliderInputs};
//!
//! let topic = LabTopic::ShearAndMoment;
//! let inputs = SliderInputs::from_pairs(topic, &[("P", 22.0), ("L_pos", 500.0)]).unwrap();
//! let derived = evaluate(topic, &inputs).unwrap();
//!
//! assert_eq!(derived.get(Quantity::ReactionLeft), Some(11.0));
//! assert_eq!(derived.get(Quantity::MaxMoment), Some(5.5));
//! ```
//!
//! ## Modules
//!
//! - [`topics`] - Lab topic catalogue
//! - [`inputs`] - Slider catalogue and typed slider records
//! - [`evaluator`] - Mechanics formulas
//! - [`render`] - Diagram layouts and PNG rasterization
//! - [`tutoring`] - Chat context, answer checking, session reports
//! - [`settings`] - Render and tutoring settings
//! - [`units`] - Type-safe unit wrappers
//! - [`errors`] - Structured error types

pub mod errors;
pub mod evaluator;
pub mod inputs;
pub mod render;
pub mod settings;
pub mod topics;
pub mod tutoring;
pub mod units;

// Re-export commonly used types at crate root for convenience
pub use errors::{TutorError, TutorResult};
pub use evaluator::{evaluate, DerivedQuantities, Quantity};
pub use inputs::SliderInputs;
pub use render::{render, render_lab, render_with, select_layout, DiagramLayout};
pub use settings::{RenderSettings, TutorSettings};
pub use topics::LabTopic;
pub use tutoring::{check_numeric_match, ChatRole, ChatTranscript, SessionReport};
