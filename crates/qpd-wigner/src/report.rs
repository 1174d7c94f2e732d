use qpd_core::errors::QpdError;
use qpd_core::Hbar;
use qpd_quad::{QuadOutcome, QuadStatus};
use serde::{Deserialize, Serialize};

use crate::hash::{canonical_float, stable_hash_string};
use crate::point::PhasePoint;

/// Value of W at one phase space point together with integration diagnostics.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WignerReport {
    /// Query point.
    pub point: PhasePoint,
    /// ħ used for the kernel and normalisation.
    pub hbar: Hbar,
    /// W(x, p, t), the real part of the integral.
    pub value: f64,
    /// Imaginary part of the integral, zero up to quadrature noise for any
    /// physical state.
    pub imaginary_residue: f64,
    /// Quadrature error estimate.
    pub abs_error: f64,
    /// Number of quadrature points evaluated.
    pub evaluations: usize,
    /// Number of bisections performed.
    pub subdivisions: usize,
    /// Quadrature termination status.
    pub status: QuadStatus,
    /// Stable hash of the point, ħ, value and status.
    pub report_hash: String,
}

impl WignerReport {
    pub(crate) fn from_outcome(
        point: PhasePoint,
        hbar: Hbar,
        outcome: &QuadOutcome,
    ) -> Result<Self, QpdError> {
        let value = outcome.value.re;
        let imaginary_residue = outcome.value.im;
        let report_hash = stable_hash_string(&(
            canonical_float(point.x),
            canonical_float(point.p),
            canonical_float(point.t),
            canonical_float(hbar.value()),
            canonical_float(value),
            outcome.status,
        ))?;
        Ok(Self {
            point,
            hbar,
            value,
            imaginary_residue,
            abs_error: outcome.abs_error,
            evaluations: outcome.evaluations,
            subdivisions: outcome.subdivisions,
            status: outcome.status,
            report_hash,
        })
    }

    /// `|Im| / max(|Re|, floor)`, the residue relative to the value.
    ///
    /// The denominator never drops below `f64::MIN_POSITIVE`, so a zero
    /// floor with `W = 0` still yields a finite ratio.
    pub fn relative_residue(&self, floor: f64) -> f64 {
        let scale = self.value.abs().max(floor).max(f64::MIN_POSITIVE);
        self.imaginary_residue.abs() / scale
    }
}
