use std::cmp::Ordering;
use std::collections::BinaryHeap;

use num_complex::Complex64;
use qpd_core::errors::{ErrorInfo, QpdError};
use serde::{Deserialize, Serialize};

use crate::rule::{gauss_kronrod_15, RuleEstimate};

fn quad_error(code: &str, message: impl Into<String>) -> QpdError {
    QpdError::Quadrature(ErrorInfo::new(code, message.into()))
}

fn config_error(code: &str, message: impl Into<String>) -> QpdError {
    QpdError::Config(ErrorInfo::new(code, message.into()))
}

fn default_abs_tol() -> f64 {
    1.49e-8
}

fn default_rel_tol() -> f64 {
    1.49e-8
}

fn default_max_subdivisions() -> usize {
    500
}

fn default_initial_segments() -> usize {
    4
}

fn default_length_scale() -> f64 {
    1.0
}

/// Upper bound on `initial_segments`.
pub const MAX_INITIAL_SEGMENTS: usize = 1 << 16;

/// Segments reserved up front; larger budgets grow the heap on demand.
const PREALLOCATED_SEGMENTS: usize = 1024;

/// Integration domain.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum Domain {
    /// The whole real line (−∞, +∞).
    Real,
    /// Finite interval from `a` to `b`; `a > b` integrates backwards.
    Interval {
        /// Lower limit.
        a: f64,
        /// Upper limit.
        b: f64,
    },
}

/// Adaptive quadrature configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct QuadOpts {
    /// Absolute error target.
    #[serde(default = "default_abs_tol")]
    pub abs_tol: f64,
    /// Relative error target.
    #[serde(default = "default_rel_tol")]
    pub rel_tol: f64,
    /// Maximum number of bisections before giving up.
    #[serde(default = "default_max_subdivisions")]
    pub max_subdivisions: usize,
    /// Number of equal segments the (mapped) domain is split into up front.
    #[serde(default = "default_initial_segments")]
    pub initial_segments: usize,
    /// Length scale `L` of the map `y = L·s/(1−s²)` used on the real line.
    /// Should be comparable to the width of the integrand.
    #[serde(default = "default_length_scale")]
    pub length_scale: f64,
}

impl Default for QuadOpts {
    fn default() -> Self {
        Self {
            abs_tol: default_abs_tol(),
            rel_tol: default_rel_tol(),
            max_subdivisions: default_max_subdivisions(),
            initial_segments: default_initial_segments(),
            length_scale: default_length_scale(),
        }
    }
}

impl QuadOpts {
    /// Checks that the options describe a runnable integration.
    pub fn validate(&self) -> Result<(), QpdError> {
        if !self.abs_tol.is_finite() || self.abs_tol < 0.0 {
            return Err(config_error(
                "invalid-abs-tol",
                format!("abs_tol must be finite and non-negative, got {}", self.abs_tol),
            ));
        }
        if !self.rel_tol.is_finite() || self.rel_tol < 0.0 {
            return Err(config_error(
                "invalid-rel-tol",
                format!("rel_tol must be finite and non-negative, got {}", self.rel_tol),
            ));
        }
        if self.abs_tol == 0.0 && self.rel_tol == 0.0 {
            return Err(QpdError::Config(
                ErrorInfo::new("invalid-tolerance", "abs_tol and rel_tol cannot both be zero")
                    .with_hint("set rel_tol to a small positive value such as 1e-10"),
            ));
        }
        if self.max_subdivisions == 0 {
            return Err(config_error(
                "invalid-max-subdivisions",
                "max_subdivisions must be at least 1",
            ));
        }
        if self.initial_segments == 0 || self.initial_segments > MAX_INITIAL_SEGMENTS {
            return Err(config_error(
                "invalid-initial-segments",
                format!(
                    "initial_segments must be between 1 and {MAX_INITIAL_SEGMENTS}, got {}",
                    self.initial_segments
                ),
            ));
        }
        if !self.length_scale.is_finite() || self.length_scale <= 0.0 {
            return Err(config_error(
                "invalid-length-scale",
                format!(
                    "length_scale must be finite and positive, got {}",
                    self.length_scale
                ),
            ));
        }
        Ok(())
    }
}

/// How the adaptive loop terminated.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum QuadStatus {
    /// The error estimate met the tolerance.
    Converged,
    /// The bisection budget ran out first.
    SubdivisionLimit,
    /// A segment became too narrow to bisect in floating point.
    RoundoffLimit,
    /// The integrand produced a non-finite value; the estimate is non-finite.
    NonFinite,
}

/// Result of an adaptive integration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuadOutcome {
    /// Integral estimate.
    pub value: Complex64,
    /// Estimated absolute error.
    pub abs_error: f64,
    /// Number of quadrature points evaluated (15 per rule application).
    pub evaluations: usize,
    /// Number of bisections performed.
    pub subdivisions: usize,
    /// Termination status.
    pub status: QuadStatus,
}

impl QuadOutcome {
    /// Whether the tolerance was met.
    pub fn converged(&self) -> bool {
        self.status == QuadStatus::Converged
    }
}

#[derive(Debug, Clone, Copy)]
struct Segment {
    a: f64,
    b: f64,
    estimate: RuleEstimate,
}

impl PartialEq for Segment {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Segment {}

impl PartialOrd for Segment {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Segment {
    fn cmp(&self, other: &Self) -> Ordering {
        self.estimate.error.total_cmp(&other.estimate.error)
    }
}

/// Maps the real line onto (−1, 1) through `y = L·s/(1−s²)`.
///
/// Points whose image lies at infinity contribute zero without calling `f`.
fn real_line<F, E>(mut f: F, scale: f64) -> impl FnMut(f64) -> Result<Complex64, E>
where
    F: FnMut(f64) -> Result<Complex64, E>,
{
    move |s| {
        let gap = 1.0 - s * s;
        if gap <= 0.0 {
            return Ok(Complex64::new(0.0, 0.0));
        }
        let y = scale * s / gap;
        let jacobian = scale * (1.0 + s * s) / (gap * gap);
        if !y.is_finite() || !jacobian.is_finite() {
            return Ok(Complex64::new(0.0, 0.0));
        }
        Ok(f(y)? * jacobian)
    }
}

/// Integrates `f` over `domain`, subdividing the worst segment until the
/// combined error estimate satisfies `max(abs_tol, rel_tol·|I|)`.
///
/// The first error returned by `f` aborts the integration and is handed back
/// unchanged. Non-convergence is not an error here; it is reported through
/// [`QuadOutcome::status`].
pub fn integrate<F, E>(f: F, domain: Domain, opts: &QuadOpts) -> Result<QuadOutcome, E>
where
    F: FnMut(f64) -> Result<Complex64, E>,
    E: From<QpdError>,
{
    opts.validate()?;
    match domain {
        Domain::Real => {
            let mapped = real_line(f, opts.length_scale);
            adapt(mapped, -1.0, 1.0, opts)
        }
        Domain::Interval { a, b } => {
            if !a.is_finite() || !b.is_finite() {
                return Err(quad_error(
                    "invalid-domain",
                    format!("interval limits must be finite, got [{a}, {b}]; use Domain::Real"),
                )
                .into());
            }
            if a == b {
                return Ok(QuadOutcome {
                    value: Complex64::new(0.0, 0.0),
                    abs_error: 0.0,
                    evaluations: 0,
                    subdivisions: 0,
                    status: QuadStatus::Converged,
                });
            }
            if a > b {
                let mut outcome = adapt(f, b, a, opts)?;
                outcome.value = -outcome.value;
                return Ok(outcome);
            }
            adapt(f, a, b, opts)
        }
    }
}

/// Convenience wrapper around [`integrate`] for integrands that cannot fail.
pub fn integrate_infallible<F>(
    mut f: F,
    domain: Domain,
    opts: &QuadOpts,
) -> Result<QuadOutcome, QpdError>
where
    F: FnMut(f64) -> Complex64,
{
    integrate(move |y| Ok::<_, QpdError>(f(y)), domain, opts)
}

fn totals(heap: &BinaryHeap<Segment>) -> (Complex64, f64) {
    heap.iter().fold((Complex64::new(0.0, 0.0), 0.0), |(value, error), seg| {
        (value + seg.estimate.value, error + seg.estimate.error)
    })
}

fn adapt<F, E>(mut f: F, a: f64, b: f64, opts: &QuadOpts) -> Result<QuadOutcome, E>
where
    F: FnMut(f64) -> Result<Complex64, E>,
{
    let reserved = opts
        .initial_segments
        .saturating_add(opts.max_subdivisions.min(PREALLOCATED_SEGMENTS));
    let mut heap = BinaryHeap::with_capacity(reserved);
    let mut evaluations = 0usize;
    let width = (b - a) / opts.initial_segments as f64;
    for idx in 0..opts.initial_segments {
        let lo = a + width * idx as f64;
        let hi = if idx + 1 == opts.initial_segments {
            b
        } else {
            a + width * (idx + 1) as f64
        };
        let estimate = gauss_kronrod_15(&mut f, lo, hi)?;
        evaluations += 15;
        heap.push(Segment {
            a: lo,
            b: hi,
            estimate,
        });
    }

    let mut subdivisions = 0usize;
    let status = loop {
        let (value, error) = totals(&heap);
        if !(value.re.is_finite() && value.im.is_finite() && error.is_finite()) {
            break QuadStatus::NonFinite;
        }
        if error <= opts.abs_tol.max(opts.rel_tol * value.norm()) {
            break QuadStatus::Converged;
        }
        if subdivisions >= opts.max_subdivisions {
            break QuadStatus::SubdivisionLimit;
        }
        let Some(worst) = heap.pop() else {
            break QuadStatus::Converged;
        };
        let mid = 0.5 * (worst.a + worst.b);
        if mid <= worst.a || mid >= worst.b {
            heap.push(worst);
            break QuadStatus::RoundoffLimit;
        }
        tracing::trace!(
            a = worst.a,
            b = worst.b,
            error = worst.estimate.error,
            "bisecting segment"
        );
        let left = gauss_kronrod_15(&mut f, worst.a, mid)?;
        let right = gauss_kronrod_15(&mut f, mid, worst.b)?;
        evaluations += 30;
        subdivisions += 1;
        heap.push(Segment {
            a: worst.a,
            b: mid,
            estimate: left,
        });
        heap.push(Segment {
            a: mid,
            b: worst.b,
            estimate: right,
        });
    };

    let (value, abs_error) = totals(&heap);
    Ok(QuadOutcome {
        value,
        abs_error,
        evaluations,
        subdivisions,
        status,
    })
}
