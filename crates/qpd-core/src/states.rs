//! Analytic reference states with closed-form Wigner functions.
//!
//! These are convenience implementations of [`Wavefunction`] used to check
//! the evaluator against known results. The evaluator itself accepts any
//! callable.

use std::f64::consts::PI;

use num_complex::Complex64;
use serde::{Deserialize, Serialize};

use crate::errors::{ErrorInfo, QpdError};
use crate::units::Hbar;
use crate::wavefunction::Wavefunction;

fn state_error(code: &str, message: impl Into<String>) -> QpdError {
    QpdError::Config(ErrorInfo::new(code, message.into()))
}

fn check_width(sigma: f64) -> Result<(), QpdError> {
    if !sigma.is_finite() || sigma <= 0.0 {
        return Err(state_error(
            "invalid-width",
            format!("state width must be finite and positive, got {sigma}"),
        ));
    }
    Ok(())
}

/// Normalised, time independent Gaussian wave packet centred at `x0` with
/// mean momentum `p0`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GaussianPacket {
    /// Position space width σ.
    pub sigma: f64,
    /// Centre of the packet.
    pub x0: f64,
    /// Mean momentum carried by the plane wave factor.
    pub p0: f64,
    /// Reduced Planck constant used by the plane wave factor.
    pub hbar: Hbar,
}

impl GaussianPacket {
    /// Creates a packet centred at the origin with zero mean momentum.
    pub fn new(sigma: f64, hbar: Hbar) -> Result<Self, QpdError> {
        check_width(sigma)?;
        Ok(Self {
            sigma,
            x0: 0.0,
            p0: 0.0,
            hbar,
        })
    }

    /// Moves the packet to `x0` and boosts it to momentum `p0`.
    pub fn displaced(mut self, x0: f64, p0: f64) -> Self {
        self.x0 = x0;
        self.p0 = p0;
        self
    }

    /// Probability density |ψ(x)|².
    pub fn density(&self, x: f64) -> f64 {
        self.amplitude(x, 0.0).norm_sqr()
    }

    /// Closed-form Wigner function `(1/πħ)·exp(−(x−x0)²/σ² − (p−p0)²σ²/ħ²)`.
    pub fn wigner(&self, x: f64, p: f64) -> f64 {
        let hbar = self.hbar.value();
        let dx = (x - self.x0) / self.sigma;
        let dp = (p - self.p0) * self.sigma / hbar;
        (-(dx * dx) - dp * dp).exp() / (PI * hbar)
    }
}

impl Wavefunction for GaussianPacket {
    fn amplitude(&self, position: f64, _time: f64) -> Complex64 {
        let norm = (PI * self.sigma * self.sigma).powf(-0.25);
        let u = (position - self.x0) / self.sigma;
        let envelope = norm * (-0.5 * u * u).exp();
        Complex64::from_polar(envelope, self.p0 * position / self.hbar.value())
    }
}

/// Energy eigenstate `n` of the harmonic oscillator with ground state width
/// `sigma = sqrt(ħ/(mω))`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HarmonicEigenstate {
    /// Excitation number.
    pub n: u32,
    /// Ground state width.
    pub sigma: f64,
    /// Angular frequency driving the stationary phase.
    pub omega: f64,
    /// Reduced Planck constant.
    pub hbar: Hbar,
}

impl HarmonicEigenstate {
    /// Creates the `n`-th eigenstate.
    pub fn new(n: u32, sigma: f64, omega: f64, hbar: Hbar) -> Result<Self, QpdError> {
        check_width(sigma)?;
        if !omega.is_finite() {
            return Err(state_error("invalid-frequency", "ω must be finite"));
        }
        Ok(Self {
            n,
            sigma,
            omega,
            hbar,
        })
    }

    /// Energy `ħω(n + 1/2)`.
    pub fn energy(&self) -> f64 {
        self.hbar.value() * self.omega * (f64::from(self.n) + 0.5)
    }

    /// Closed-form Wigner function `(−1)ⁿ/(πħ)·e^{−ξ}·Lₙ(2ξ)` with
    /// `ξ = x²/σ² + σ²p²/ħ²`.
    pub fn wigner(&self, x: f64, p: f64) -> f64 {
        let hbar = self.hbar.value();
        let u = x / self.sigma;
        let v = p * self.sigma / hbar;
        let xi = u * u + v * v;
        let sign = if self.n % 2 == 0 { 1.0 } else { -1.0 };
        sign * (-xi).exp() * laguerre(self.n, 2.0 * xi) / (PI * hbar)
    }
}

impl Wavefunction for HarmonicEigenstate {
    fn amplitude(&self, position: f64, time: f64) -> Complex64 {
        let real = hermite_function(self.n, position / self.sigma) / self.sigma.sqrt();
        Complex64::from_polar(real, -self.energy() * time / self.hbar.value())
    }
}

/// Normalised Hermite function `hₙ(u)`, computed by the stable three term
/// recurrence.
pub fn hermite_function(n: u32, u: f64) -> f64 {
    let h0 = PI.powf(-0.25) * (-0.5 * u * u).exp();
    if n == 0 {
        return h0;
    }
    let mut prev = h0;
    let mut curr = 2f64.sqrt() * u * h0;
    for k in 1..n {
        let k = f64::from(k);
        let next = (2.0 / (k + 1.0)).sqrt() * u * curr - (k / (k + 1.0)).sqrt() * prev;
        prev = curr;
        curr = next;
    }
    curr
}

/// Laguerre polynomial `Lₙ(z)`.
pub fn laguerre(n: u32, z: f64) -> f64 {
    if n == 0 {
        return 1.0;
    }
    let mut prev = 1.0;
    let mut curr = 1.0 - z;
    for k in 1..n {
        let k = f64::from(k);
        let next = ((2.0 * k + 1.0 - z) * curr - k * prev) / (k + 1.0);
        prev = curr;
        curr = next;
    }
    curr
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn laguerre_matches_low_order_closed_forms() {
        let z = 0.7;
        assert!((laguerre(1, z) - (1.0 - z)).abs() < 1e-14);
        let l2 = 0.5 * (z * z - 4.0 * z + 2.0);
        assert!((laguerre(2, z) - l2).abs() < 1e-14);
    }

    #[test]
    fn hermite_function_two_matches_polynomial() {
        let u: f64 = 1.3;
        let h2 = (4.0 * u * u - 2.0) / (8.0f64).sqrt() * PI.powf(-0.25) * (-0.5 * u * u).exp();
        assert!((hermite_function(2, u) - h2).abs() < 1e-14);
    }

    #[test]
    fn rejects_degenerate_width() {
        assert!(GaussianPacket::new(0.0, Hbar::NATURAL).is_err());
        assert!(HarmonicEigenstate::new(1, f64::NAN, 1.0, Hbar::NATURAL).is_err());
    }
}
