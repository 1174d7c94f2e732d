//! Wavefunction contracts accepted by the evaluator.

use num_complex::Complex64;

/// Position space wavefunction ψ(x, t).
///
/// Any `Fn(f64, f64) -> Complex64` implements this trait, so plain closures
/// can be handed to the evaluator directly. Implementations are only ever
/// invoked; their internals are never inspected.
pub trait Wavefunction {
    /// Returns the amplitude at `position` and `time`.
    fn amplitude(&self, position: f64, time: f64) -> Complex64;
}

impl<F> Wavefunction for F
where
    F: Fn(f64, f64) -> Complex64,
{
    fn amplitude(&self, position: f64, time: f64) -> Complex64 {
        self(position, time)
    }
}

/// Fallible wavefunction whose errors are propagated to the caller unchanged.
pub trait TryWavefunction {
    /// Error raised by the wavefunction.
    type Error;

    /// Returns the amplitude at `position` and `time`, or the caller's error.
    fn try_amplitude(&self, position: f64, time: f64) -> Result<Complex64, Self::Error>;
}

impl<F, E> TryWavefunction for F
where
    F: Fn(f64, f64) -> Result<Complex64, E>,
{
    type Error = E;

    fn try_amplitude(&self, position: f64, time: f64) -> Result<Complex64, E> {
        self(position, time)
    }
}
