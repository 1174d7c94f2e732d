use qpd_core::errors::{ErrorInfo, QpdError};
use qpd_core::Hbar;
use qpd_quad::QuadOpts;
use serde::{Deserialize, Serialize};

/// What to do when the quadrature stops before meeting its tolerance.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum ConvergencePolicy {
    /// Fail with a `non-convergence` quadrature error.
    #[default]
    Error,
    /// Return the estimate and emit a warning event.
    Warn,
}

/// Evaluator configuration.
///
/// ħ defaults to its SI value. The quadrature length scale should be
/// comparable to the width of ψ, so SI-scale states need `quad.length_scale`
/// set accordingly; [`WignerOpts::natural_units`] covers the dimensionless case.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct WignerOpts {
    /// Reduced Planck constant.
    #[serde(default)]
    pub hbar: Hbar,
    /// Adaptive quadrature settings.
    #[serde(default)]
    pub quad: QuadOpts,
    /// Non-convergence handling.
    #[serde(default)]
    pub convergence: ConvergencePolicy,
    /// Optional bound on `|Im W| / max(|Re W|, abs_tol)`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub imag_tolerance: Option<f64>,
}

impl WignerOpts {
    /// Options with ħ = 1.
    pub fn natural_units() -> Self {
        Self::default().with_hbar(Hbar::NATURAL)
    }

    /// Replaces ħ.
    pub fn with_hbar(mut self, hbar: Hbar) -> Self {
        self.hbar = hbar;
        self
    }

    /// Replaces the quadrature settings.
    pub fn with_quad(mut self, quad: QuadOpts) -> Self {
        self.quad = quad;
        self
    }

    /// Replaces the non-convergence policy.
    pub fn with_convergence(mut self, convergence: ConvergencePolicy) -> Self {
        self.convergence = convergence;
        self
    }

    /// Checks the options, including the nested quadrature settings.
    pub fn validate(&self) -> Result<(), QpdError> {
        self.quad.validate()?;
        if let Some(tol) = self.imag_tolerance {
            if !tol.is_finite() || tol < 0.0 {
                return Err(QpdError::Config(
                    ErrorInfo::new(
                        "invalid-imag-tolerance",
                        "imag_tolerance must be finite and non-negative",
                    )
                    .with_context("imag_tolerance", tol),
                ));
            }
        }
        Ok(())
    }
}
