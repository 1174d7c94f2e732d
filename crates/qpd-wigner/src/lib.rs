#![deny(missing_docs)]
#![doc = "Wigner quasiprobability evaluation: W(x,p,t) = 1/(πħ) ∫ ψ*(x+y,t) ψ(x−y,t) e^{2ipy/ħ} dy."]

/// Error wrapper for fallible wavefunctions.
pub mod error;
/// The quasiprobability evaluator.
pub mod evaluator;
/// Canonical hashing helpers.
pub mod hash;
/// Evaluator configuration.
pub mod opts;
/// Phase space query points.
pub mod point;
/// Diagnostics report for a single evaluation.
pub mod report;
/// Canonical JSON and YAML serde helpers.
pub mod serde;

pub use error::EvalError;
pub use evaluator::{evaluate, evaluate_report, evaluate_with, try_evaluate};
pub use opts::{ConvergencePolicy, WignerOpts};
pub use point::PhasePoint;
pub use qpd_core::{Complex64, Hbar, QpdError, TryWavefunction, Wavefunction};
pub use qpd_quad::{QuadOpts, QuadStatus};
pub use report::WignerReport;
pub use crate::serde::{
    from_json_slice, from_yaml_slice, load_opts, to_canonical_json_bytes, to_yaml_string,
};
