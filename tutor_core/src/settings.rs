//! # Settings
//!
//! Render and tutoring settings, loaded from a JSON file or defaulted.
//! Settings are passed explicitly to each call; nothing is stored globally.
//!
//! ## File Format
//!
//! ```json
//! {
//!   "render": { "width_pt": 640.0, "height_pt": 480.0, "pixel_per_pt": 1.5, "beam_samples": 101 },
//!   "answer_tolerance": 0.05
//! }
//! ```
//!
//! Missing fields take their defaults.
//!
//! ## Example
//!
//! ```rust,no_run
//! use tutor_core::settings::TutorSettings;
//! use std::path::Path;
//!
//! let settings = TutorSettings::load(Path::new("tutor.json"))?;
//! println!("Tolerance: {}", settings.answer_tolerance);
//! # Ok::<(), tutor_core::errors::TutorError>(())
//! ```

use std::fs::{self, File};
use std::io::{Read, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::errors::{TutorError, TutorResult};

/// Fewest beam samples that still resolve the shear step
pub const MIN_BEAM_SAMPLES: usize = 11;

/// Default relative tolerance for numeric answers
pub const DEFAULT_ANSWER_TOLERANCE: f64 = 0.05;

/// Largest raster side in pixels
pub const MAX_PIXELS_PER_SIDE: u32 = 8192;

/// Diagram page size and raster resolution
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderSettings {
    /// Page width (pt)
    pub width_pt: f32,
    /// Page height (pt)
    pub height_pt: f32,
    /// Raster scale (pixels per pt)
    pub pixel_per_pt: f32,
    /// Regular sample points along the beam, before critical points are added
    pub beam_samples: usize,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            width_pt: 640.0,
            height_pt: 480.0,
            pixel_per_pt: 1.5,
            beam_samples: 101,
        }
    }
}

impl RenderSettings {
    /// Raster size in pixels
    pub fn pixel_size(&self) -> (u32, u32) {
        (
            (self.width_pt * self.pixel_per_pt).round().max(1.0) as u32,
            (self.height_pt * self.pixel_per_pt).round().max(1.0) as u32,
        )
    }

    /// Check sizes and sample count.
    ///
    /// # Errors
    ///
    /// Returns [`TutorError::InvalidInput`] naming the first bad field.
    pub fn validate(&self) -> TutorResult<()> {
        for (field, value) in [
            ("render.width_pt", self.width_pt),
            ("render.height_pt", self.height_pt),
            ("render.pixel_per_pt", self.pixel_per_pt),
        ] {
            if !(value.is_finite() && value > 0.0) {
                return Err(TutorError::invalid_input(field, value.to_string(), "must be positive"));
            }
        }
        let (width_px, height_px) = self.pixel_size();
        if width_px > MAX_PIXELS_PER_SIDE || height_px > MAX_PIXELS_PER_SIDE {
            return Err(TutorError::invalid_input(
                "render.pixel_per_pt",
                self.pixel_per_pt.to_string(),
                format!(
                    "raster would be {}x{} px, at most {} px per side",
                    width_px, height_px, MAX_PIXELS_PER_SIDE
                ),
            ));
        }
        if self.beam_samples < MIN_BEAM_SAMPLES {
            return Err(TutorError::invalid_input(
                "render.beam_samples",
                self.beam_samples.to_string(),
                format!("at least {} samples required", MIN_BEAM_SAMPLES),
            ));
        }
        Ok(())
    }

    /// A copy that is always safe to rasterize. Non-positive or non-finite
    /// sizes take their defaults and the scale shrinks until both raster
    /// sides fit in [`MAX_PIXELS_PER_SIDE`].
    pub fn clamped(&self) -> Self {
        let defaults = Self::default();
        let positive = |value: f32, fallback: f32| {
            if value.is_finite() && value > 0.0 {
                value
            } else {
                fallback
            }
        };
        let width_pt = positive(self.width_pt, defaults.width_pt);
        let height_pt = positive(self.height_pt, defaults.height_pt);
        let mut pixel_per_pt = positive(self.pixel_per_pt, defaults.pixel_per_pt);

        let longest_pt = width_pt.max(height_pt);
        let limit = MAX_PIXELS_PER_SIDE as f32;
        if longest_pt * pixel_per_pt > limit {
            pixel_per_pt = limit / longest_pt;
        }

        Self {
            width_pt,
            height_pt,
            pixel_per_pt,
            beam_samples: self.beam_samples.max(MIN_BEAM_SAMPLES),
        }
    }
}

/// Top-level settings
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TutorSettings {
    pub render: RenderSettings,
    /// Relative tolerance for [`check_numeric_match`](crate::tutoring::check_numeric_match)
    pub answer_tolerance: f64,
}

impl Default for TutorSettings {
    fn default() -> Self {
        Self {
            render: RenderSettings::default(),
            answer_tolerance: DEFAULT_ANSWER_TOLERANCE,
        }
    }
}

impl TutorSettings {
    /// Check every field.
    ///
    /// # Errors
    ///
    /// Returns [`TutorError::InvalidInput`] naming the first bad field.
    pub fn validate(&self) -> TutorResult<()> {
        self.render.validate()?;
        if !(self.answer_tolerance > 0.0 && self.answer_tolerance < 1.0) {
            return Err(TutorError::invalid_input(
                "answer_tolerance",
                self.answer_tolerance.to_string(),
                "must be between 0 and 1",
            ));
        }
        Ok(())
    }

    /// Load and validate settings from a JSON file.
    ///
    /// # Errors
    ///
    /// * `FileError` - the file cannot be opened or read
    /// * `SerializationError` - invalid JSON
    /// * `InvalidInput` - a field is out of range
    pub fn load(path: &Path) -> TutorResult<Self> {
        let mut file = File::open(path)
            .map_err(|e| TutorError::file_error("open", path.display().to_string(), e.to_string()))?;

        let mut contents = String::new();
        file.read_to_string(&mut contents)
            .map_err(|e| TutorError::file_error("read", path.display().to_string(), e.to_string()))?;

        let settings: TutorSettings =
            serde_json::from_str(&contents).map_err(|e| TutorError::SerializationError {
                reason: format!("Invalid JSON in {}: {}", path.display(), e),
            })?;

        settings.validate()?;
        log::debug!("loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Write settings as pretty JSON, through a temp file and rename.
    ///
    /// # Errors
    ///
    /// Returns `FileError` when the temp file cannot be written or renamed.
    pub fn save(&self, path: &Path) -> TutorResult<()> {
        let json = serde_json::to_string_pretty(self)?;
        let tmp_path = path.with_extension("json.tmp");

        let mut tmp_file = File::create(&tmp_path).map_err(|e| {
            TutorError::file_error("create temp file", tmp_path.display().to_string(), e.to_string())
        })?;
        tmp_file.write_all(json.as_bytes()).map_err(|e| {
            TutorError::file_error("write temp file", tmp_path.display().to_string(), e.to_string())
        })?;
        tmp_file.sync_all().map_err(|e| {
            TutorError::file_error("sync temp file", tmp_path.display().to_string(), e.to_string())
        })?;

        fs::rename(&tmp_path, path).map_err(|e| {
            let _ = fs::remove_file(&tmp_path);
            TutorError::file_error("rename to final", path.display().to_string(), e.to_string())
        })?;

        Ok(())
    }
}
