//! # Unit Types
//!
//! Lightweight newtype wrappers for the SI units the lab sliders use. They
//! keep kN/N and kN·m/N·mm apart at compile time while serializing as plain
//! numbers.
//!
//! ## Slider Units
//!
//! - Force: kilonewtons (kN), converted to newtons (N) for stress
//! - Area: square millimetres (mm²)
//! - Stress: megapascals (MPa = N/mm²)
//! - Moment: kilonewton-metres (kN·m), newton-millimetres (N·mm)
//! - Section modulus: 10³ mm³ on the slider, mm³ in formulas
//!
//! ## Example
//!
//! ```rust
//! use tutor_core::units::{KiloNewtons, Newtons, SqMm};
//!
//! let force: Newtons = KiloNewtons(22.0).into();
//! let stress = force / SqMm(817.0);
//! assert!((stress.0 - 26.927).abs() < 1e-3);
//! ```

use serde::{Deserialize, Serialize};
use std::ops::{Add, Div, Mul, Sub};

// ============================================================================
// Force Units
// ============================================================================

/// Force in kilonewtons
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KiloNewtons(pub f64);

/// Force in newtons
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Newtons(pub f64);

impl From<KiloNewtons> for Newtons {
    fn from(kn: KiloNewtons) -> Self {
        Newtons(kn.0 * 1000.0)
    }
}

// ============================================================================
// Area and Section Units
// ============================================================================

/// Area in square millimetres
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SqMm(pub f64);

/// Section modulus in mm³
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CubicMm(pub f64);

/// Section modulus in 10³ mm³ (slider unit)
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KiloCubicMm(pub f64);

impl From<KiloCubicMm> for CubicMm {
    fn from(s: KiloCubicMm) -> Self {
        CubicMm(s.0 * 1e3)
    }
}

// ============================================================================
// Stress Units
// ============================================================================

/// Stress in megapascals (N/mm²)
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Mpa(pub f64);

/// N / mm² = MPa
impl Div<SqMm> for Newtons {
    type Output = Mpa;
    fn div(self, rhs: SqMm) -> Mpa {
        Mpa(self.0 / rhs.0)
    }
}

// ============================================================================
// Moment Units
// ============================================================================

/// Moment in kilonewton-metres
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KnM(pub f64);

/// Moment in newton-millimetres
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NMm(pub f64);

impl From<KnM> for NMm {
    fn from(m: KnM) -> Self {
        NMm(m.0 * 1e6)
    }
}

/// N·mm / mm³ = MPa
impl Div<CubicMm> for NMm {
    type Output = Mpa;
    fn div(self, rhs: CubicMm) -> Mpa {
        Mpa(self.0 / rhs.0)
    }
}

// ============================================================================
// Arithmetic Implementations (macro to reduce boilerplate)
// ============================================================================

macro_rules! impl_arithmetic {
    ($type:ty) => {
        impl Add for $type {
            type Output = Self;
            fn add(self, rhs: Self) -> Self::Output {
                Self(self.0 + rhs.0)
            }
        }

        impl Sub for $type {
            type Output = Self;
            fn sub(self, rhs: Self) -> Self::Output {
                Self(self.0 - rhs.0)
            }
        }

        impl Mul<f64> for $type {
            type Output = Self;
            fn mul(self, rhs: f64) -> Self::Output {
                Self(self.0 * rhs)
            }
        }

        impl Div<f64> for $type {
            type Output = Self;
            fn div(self, rhs: f64) -> Self::Output {
                Self(self.0 / rhs)
            }
        }

        impl $type {
            /// Get the raw f64 value
            pub fn value(self) -> f64 {
                self.0
            }
        }
    };
}

impl_arithmetic!(KiloNewtons);
impl_arithmetic!(Newtons);
impl_arithmetic!(SqMm);
impl_arithmetic!(CubicMm);
impl_arithmetic!(KiloCubicMm);
impl_arithmetic!(Mpa);
impl_arithmetic!(KnM);
impl_arithmetic!(NMm);
