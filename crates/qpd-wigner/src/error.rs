use qpd_core::QpdError;
use thiserror::Error;

/// Failure of [`crate::try_evaluate`].
///
/// Errors raised by the wavefunction are carried as-is so callers can match
/// on their own error type.
#[derive(Debug, Error)]
pub enum EvalError<E> {
    /// The wavefunction failed for some argument during integration.
    #[error("wavefunction failed: {0}")]
    Wavefunction(E),
    /// The evaluator itself failed (configuration, convergence, reality).
    #[error(transparent)]
    Evaluation(#[from] QpdError),
}

impl<E> EvalError<E> {
    /// Returns the evaluator error, if this is one.
    pub fn evaluation(&self) -> Option<&QpdError> {
        match self {
            EvalError::Evaluation(err) => Some(err),
            EvalError::Wavefunction(_) => None,
        }
    }
}
