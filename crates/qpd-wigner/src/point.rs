use serde::{Deserialize, Serialize};

/// Phase space coordinate `(x, p)` at time `t`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PhasePoint {
    /// Position.
    pub x: f64,
    /// Momentum.
    pub p: f64,
    /// Time, zero unless set.
    #[serde(default)]
    pub t: f64,
}

impl PhasePoint {
    /// Point `(x, p)` at `t = 0`.
    pub fn new(x: f64, p: f64) -> Self {
        Self { x, p, t: 0.0 }
    }

    /// Same point at time `t`.
    pub fn at_time(self, t: f64) -> Self {
        Self { t, ..self }
    }
}
