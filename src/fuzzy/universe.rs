use crate::error::{IrrigoError, Result};
use serde::{Deserialize, Serialize};

/// A bounded, discretized numeric domain over which a variable's
/// membership functions are evaluated.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Universe {
    min: f64,
    max: f64,
    resolution: usize,
}

impl Universe {
    pub fn new(min: f64, max: f64, resolution: usize) -> Result<Self> {
        if !(min < max) {
            return Err(IrrigoError::Definition(format!(
                "universe bounds must satisfy min < max, got [{}, {}]",
                min, max
            )));
        }
        if resolution < 2 {
            return Err(IrrigoError::Definition(format!(
                "universe resolution must be at least 2, got {}",
                resolution
            )));
        }
        Ok(Self {
            min,
            max,
            resolution,
        })
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn max(&self) -> f64 {
        self.max
    }

    pub fn resolution(&self) -> usize {
        self.resolution
    }

    pub fn midpoint(&self) -> f64 {
        (self.min + self.max) / 2.0
    }

    /// Clamp a raw reading into the domain. Out-of-range inputs are
    /// clipped rather than rejected.
    pub fn clip(&self, x: f64) -> f64 {
        x.clamp(self.min, self.max)
    }

    /// The i-th grid point. The grid spans [min, max] inclusive.
    pub fn point(&self, i: usize) -> f64 {
        let t = i as f64 / (self.resolution - 1) as f64;
        self.min + (self.max - self.min) * t
    }

    pub fn points(&self) -> impl Iterator<Item = f64> + '_ {
        (0..self.resolution).map(|i| self.point(i))
    }
}
