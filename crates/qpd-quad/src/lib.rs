#![deny(missing_docs)]
#![doc = "Globally adaptive Gauss-Kronrod quadrature for complex valued integrands, including the whole real line."]

/// Adaptive driver, options and outcome reporting.
pub mod adaptive;
/// Fixed 7/15 point Gauss-Kronrod rule.
pub mod rule;

pub use adaptive::{
    integrate, integrate_infallible, Domain, QuadOpts, QuadOutcome, QuadStatus,
    MAX_INITIAL_SEGMENTS,
};
pub use rule::{gauss_kronrod_15, RuleEstimate};
