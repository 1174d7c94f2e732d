//! Reduced Planck constant handling.

use serde::{Deserialize, Serialize};

use crate::errors::{ErrorInfo, QpdError};

/// Reduced Planck constant in J·s (CODATA 2018, exact by SI definition of h).
pub const HBAR_SI: f64 = 1.054_571_817e-34;

/// Validated value of the reduced Planck constant ħ.
///
/// The evaluator scales both the phase kernel `exp(2ipy/ħ)` and the
/// `1/(πħ)` normalisation by this value. It is always finite and strictly
/// positive.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Hbar(f64);

impl Hbar {
    /// SI value of ħ.
    pub const SI: Hbar = Hbar(HBAR_SI);
    /// Natural units, ħ = 1.
    pub const NATURAL: Hbar = Hbar(1.0);

    /// Creates a new constant, rejecting non-finite and non-positive values.
    pub fn new(value: f64) -> Result<Self, QpdError> {
        if !value.is_finite() || value <= 0.0 {
            return Err(QpdError::Config(
                ErrorInfo::new("invalid-hbar", "ħ must be finite and strictly positive")
                    .with_context("hbar", value),
            ));
        }
        Ok(Self(value))
    }

    /// Returns the raw value.
    pub fn value(self) -> f64 {
        self.0
    }
}

impl Default for Hbar {
    fn default() -> Self {
        Self::SI
    }
}

impl TryFrom<f64> for Hbar {
    type Error = QpdError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Hbar> for f64 {
    fn from(value: Hbar) -> Self {
        value.0
    }
}
