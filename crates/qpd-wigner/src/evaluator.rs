//! Evaluation of `W(x,p,t) = 1/(πħ) ∫ ψ*(x+y,t) ψ(x−y,t) e^{2ipy/ħ} dy`.
//!
//! The integral runs over the whole real line with the adaptive quadrature
//! from `qpd-quad`. Only the real part is returned as W; the imaginary part
//! is kept in [`WignerReport`] for diagnostics.

use std::convert::Infallible;
use std::f64::consts::PI;

use num_complex::Complex64;
use qpd_core::errors::{ErrorInfo, QpdError};
use qpd_core::{TryWavefunction, Wavefunction};
use qpd_quad::{integrate, Domain, QuadOutcome, QuadStatus};

use crate::error::EvalError;
use crate::opts::{ConvergencePolicy, WignerOpts};
use crate::point::PhasePoint;
use crate::report::WignerReport;

/// Evaluates W(x, p, t) with default options (ħ in SI units).
pub fn evaluate<W>(psi: &W, x: f64, p: f64, t: f64) -> Result<f64, QpdError>
where
    W: Wavefunction + ?Sized,
{
    evaluate_with(psi, PhasePoint::new(x, p).at_time(t), &WignerOpts::default())
}

/// Evaluates W at `point` with explicit options.
pub fn evaluate_with<W>(psi: &W, point: PhasePoint, opts: &WignerOpts) -> Result<f64, QpdError>
where
    W: Wavefunction + ?Sized,
{
    evaluate_report(psi, point, opts).map(|report| report.value)
}

/// Evaluates W at `point` and returns the full diagnostics report.
pub fn evaluate_report<W>(
    psi: &W,
    point: PhasePoint,
    opts: &WignerOpts,
) -> Result<WignerReport, QpdError>
where
    W: Wavefunction + ?Sized,
{
    let infallible = |position: f64, time: f64| Ok::<_, Infallible>(psi.amplitude(position, time));
    try_evaluate(&infallible, point, opts).map_err(|err| match err {
        EvalError::Evaluation(err) => err,
        EvalError::Wavefunction(never) => match never {},
    })
}

/// Evaluates W for a fallible wavefunction.
///
/// The first error raised by `psi` aborts the integration and is returned as
/// [`EvalError::Wavefunction`] without modification.
pub fn try_evaluate<W>(
    psi: &W,
    point: PhasePoint,
    opts: &WignerOpts,
) -> Result<WignerReport, EvalError<W::Error>>
where
    W: TryWavefunction + ?Sized,
{
    opts.validate()?;
    let _span = tracing::debug_span!("wigner", x = point.x, p = point.p, t = point.t).entered();

    let PhasePoint { x, p, t } = point;
    let hbar = opts.hbar.value();
    let norm = 1.0 / (PI * hbar);
    let integrand = |y: f64| -> Result<Complex64, EvalError<W::Error>> {
        let left = psi
            .try_amplitude(x + y, t)
            .map_err(EvalError::Wavefunction)?
            .conj();
        let right = psi.try_amplitude(x - y, t).map_err(EvalError::Wavefunction)?;
        Ok(left * right * Complex64::cis(2.0 * p * y / hbar) * norm)
    };

    let outcome = integrate(integrand, Domain::Real, &opts.quad)?;
    Ok(settle(point, opts, &outcome)?)
}

fn settle(
    point: PhasePoint,
    opts: &WignerOpts,
    outcome: &QuadOutcome,
) -> Result<WignerReport, QpdError> {
    tracing::debug!(
        evaluations = outcome.evaluations,
        subdivisions = outcome.subdivisions,
        abs_error = outcome.abs_error,
        status = ?outcome.status,
        "wigner quadrature finished"
    );

    match outcome.status {
        QuadStatus::Converged | QuadStatus::NonFinite => {}
        QuadStatus::SubdivisionLimit | QuadStatus::RoundoffLimit => {
            let tolerance = opts.quad.abs_tol.max(opts.quad.rel_tol * outcome.value.norm());
            match opts.convergence {
                ConvergencePolicy::Error => {
                    return Err(QpdError::Quadrature(
                        ErrorInfo::new(
                            "non-convergence",
                            "adaptive quadrature stopped before reaching the tolerance",
                        )
                        .with_context("status", format!("{:?}", outcome.status))
                        .with_context("value", outcome.value.re)
                        .with_context("abs_error", outcome.abs_error)
                        .with_context("tolerance", tolerance)
                        .with_context("subdivisions", outcome.subdivisions)
                        .with_hint(
                            "raise quad.max_subdivisions, match quad.length_scale to the width of ψ, or loosen the tolerances",
                        ),
                    ));
                }
                ConvergencePolicy::Warn => {
                    tracing::warn!(
                        x = point.x,
                        p = point.p,
                        t = point.t,
                        abs_error = outcome.abs_error,
                        tolerance,
                        status = ?outcome.status,
                        "returning unconverged wigner estimate"
                    );
                }
            }
        }
    }

    let report = WignerReport::from_outcome(point, opts.hbar, outcome)?;
    if let Some(limit) = opts.imag_tolerance {
        let residue = report.relative_residue(opts.quad.abs_tol);
        if residue > limit {
            return Err(QpdError::Reality(
                ErrorInfo::new(
                    "imaginary-residue",
                    "imaginary part of the wigner integral exceeds the tolerance",
                )
                .with_context("real", report.value)
                .with_context("imag", report.imaginary_residue)
                .with_context("relative_residue", residue)
                .with_context("imag_tolerance", limit),
            ));
        }
    }
    Ok(report)
}
