use crate::error::{IrrigoError, Result};
use serde::{Deserialize, Serialize};

/// A membership function shape. Maps a crisp value to a degree of truth
/// in [0, 1] for one linguistic term.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum MembershipFunction {
    Triangular { a: f64, b: f64, c: f64 },
    Trapezoidal { a: f64, b: f64, c: f64, d: f64 },
}

impl MembershipFunction {
    pub fn triangular(a: f64, b: f64, c: f64) -> Result<Self> {
        if !(a <= b && b <= c) {
            return Err(IrrigoError::Definition(format!(
                "triangular breakpoints must be ordered a <= b <= c, got ({}, {}, {})",
                a, b, c
            )));
        }
        Ok(Self::Triangular { a, b, c })
    }

    pub fn trapezoidal(a: f64, b: f64, c: f64, d: f64) -> Result<Self> {
        if !(a <= b && b <= c && c <= d) {
            return Err(IrrigoError::Definition(format!(
                "trapezoidal breakpoints must be ordered a <= b <= c <= d, got ({}, {}, {}, {})",
                a, b, c, d
            )));
        }
        Ok(Self::Trapezoidal { a, b, c, d })
    }

    /// Degree of membership at `x`, always in [0, 1].
    ///
    /// Degenerate segments (equal adjacent breakpoints) act as vertical
    /// edges: the strict range checks below keep the linear ramps from
    /// dividing by zero.
    pub fn degree(&self, x: f64) -> f64 {
        match *self {
            Self::Triangular { a, b, c } => {
                if x < a || x > c {
                    0.0
                } else if x < b {
                    (x - a) / (b - a)
                } else if x > b {
                    (c - x) / (c - b)
                } else {
                    1.0
                }
            }
            Self::Trapezoidal { a, b, c, d } => {
                if x < a || x > d {
                    0.0
                } else if x < b {
                    (x - a) / (b - a)
                } else if x > c {
                    (d - x) / (d - c)
                } else {
                    1.0
                }
            }
        }
    }

    /// The interval outside of which the degree is zero.
    pub fn support(&self) -> (f64, f64) {
        match *self {
            Self::Triangular { a, c, .. } => (a, c),
            Self::Trapezoidal { a, d, .. } => (a, d),
        }
    }
}
