//! Embedding Parameters and Embedder Configuration
//!
//! A delay embedding is fully described by three numbers:
//!
//! - `dim`: coordinates per delay vector
//! - `tau`: spacing between coordinates, in (fractional) samples
//! - `d_t`: stride between the starts of consecutive windows
//!
//! ## Window Extent
//!
//! Two lengths describe one window and they differ by one `tau`:
//!
//! ```text
//!   extent = dim * tau          (row-count formula, displayed "extent")
//!   span   = tau * (dim - 1)    (offset of the rightmost coordinate)
//! ```
//!
//! The row count is always derived from `window_extent()`; nothing else in
//! the crate recomputes it.

use serde::{Deserialize, Serialize};

use crate::error::EmbeddingError;

/// Delay-embedding parameters `{dim, tau, d_t}`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EmbeddingParameters {
    /// Embedding dimension (coordinates per window)
    pub dim: usize,
    /// Spacing between consecutive coordinates
    pub tau: f64,
    /// Stride between consecutive windows
    #[serde(rename = "dT")]
    pub d_t: f64,
}

impl EmbeddingParameters {
    pub fn new(dim: usize, tau: f64, d_t: f64) -> Self {
        Self { dim, tau, d_t }
    }

    /// Choose `tau` so that `dim * tau` equals the requested extent.
    ///
    /// Matching the extent to a known period is the usual starting point
    /// for periodicity detection.
    pub fn from_extent(dim: usize, extent: f64, d_t: f64) -> Result<Self, EmbeddingError> {
        if dim == 0 {
            return Err(EmbeddingError::InvalidParameters {
                reason: "dim must be at least 1".to_string(),
            });
        }
        let params = Self::new(dim, extent / dim as f64, d_t);
        params.validate()?;
        Ok(params)
    }

    /// Check `dim >= 1`, `tau > 0`, `d_t > 0`, all finite
    pub fn validate(&self) -> Result<(), EmbeddingError> {
        if self.dim < 1 {
            return Err(EmbeddingError::InvalidParameters {
                reason: "dim must be at least 1".to_string(),
            });
        }
        if !self.tau.is_finite() || self.tau <= 0.0 {
            return Err(EmbeddingError::InvalidParameters {
                reason: format!("tau must be positive and finite, got {}", self.tau),
            });
        }
        if !self.d_t.is_finite() || self.d_t <= 0.0 {
            return Err(EmbeddingError::InvalidParameters {
                reason: format!("dT must be positive and finite, got {}", self.d_t),
            });
        }
        Ok(())
    }

    /// `dim * tau`, the extent used by the row-count formula
    pub fn window_extent(&self) -> f64 {
        self.dim as f64 * self.tau
    }

    /// `tau * (dim - 1)`, the offset of the last coordinate in a window
    pub fn window_span(&self) -> f64 {
        self.tau * self.dim.saturating_sub(1) as f64
    }

    /// Candidate window count `floor((n - dim*tau) / d_t)`.
    ///
    /// Signed: zero or negative means no window fits.
    pub fn candidate_windows(&self, n: usize) -> i64 {
        ((n as f64 - self.window_extent()) / self.d_t).floor() as i64
    }

    /// Fractional sample positions of window `i`
    pub fn positions(&self, i: usize) -> impl Iterator<Item = f64> + '_ {
        let origin = self.d_t * i as f64;
        (0..self.dim).map(move |j| origin + self.tau * j as f64)
    }
}

impl Default for EmbeddingParameters {
    fn default() -> Self {
        Self {
            dim: 20,
            tau: 1.0,
            d_t: 0.5,
        }
    }
}

/// End conditions for the interpolating cubic spline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SplineBoundary {
    /// Third derivative continuous across the second and penultimate knots
    #[default]
    NotAKnot,
    /// Zero second derivative at both ends
    Natural,
}

/// Configuration for [`crate::SlidingWindowEmbedder`]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EmbedderConfig {
    /// Spline end conditions
    pub boundary: SplineBoundary,
    /// Compute rows on the rayon pool
    pub parallel: bool,
}

impl Default for EmbedderConfig {
    fn default() -> Self {
        Self {
            boundary: SplineBoundary::NotAKnot,
            parallel: true,
        }
    }
}

impl EmbedderConfig {
    /// Single-threaded configuration
    pub fn sequential() -> Self {
        Self {
            parallel: false,
            ..Self::default()
        }
    }

    pub fn with_boundary(mut self, boundary: SplineBoundary) -> Self {
        self.boundary = boundary;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_rejects_each_field() {
        assert!(EmbeddingParameters::new(0, 1.0, 1.0).validate().is_err());
        assert!(EmbeddingParameters::new(3, 0.0, 1.0).validate().is_err());
        assert!(EmbeddingParameters::new(3, -1.0, 1.0).validate().is_err());
        assert!(EmbeddingParameters::new(3, 1.0, 0.0).validate().is_err());
        assert!(EmbeddingParameters::new(3, f64::NAN, 1.0).validate().is_err());
        assert!(EmbeddingParameters::new(3, 1.0, f64::INFINITY).validate().is_err());
        assert!(EmbeddingParameters::new(3, 0.25, 0.1).validate().is_ok());
    }

    #[test]
    fn test_extent_and_span() {
        let p = EmbeddingParameters::new(20, 1.0, 0.5);
        assert_eq!(p.window_extent(), 20.0);
        assert_eq!(p.window_span(), 19.0);

        let single = EmbeddingParameters::new(1, 3.0, 1.0);
        assert_eq!(single.window_extent(), 3.0);
        assert_eq!(single.window_span(), 0.0);
    }

    #[test]
    fn test_candidate_windows() {
        let p = EmbeddingParameters::new(20, 1.0, 0.5);
        assert_eq!(p.candidate_windows(160), 280);
        assert_eq!(p.candidate_windows(20), 0);
        assert!(p.candidate_windows(10) < 0);
    }

    #[test]
    fn test_from_extent() {
        let p = EmbeddingParameters::from_extent(10, 40.0, 1.0).unwrap();
        assert_eq!(p.tau, 4.0);
        assert_eq!(p.window_extent(), 40.0);
        assert!(EmbeddingParameters::from_extent(0, 40.0, 1.0).is_err());
        assert!(EmbeddingParameters::from_extent(10, 0.0, 1.0).is_err());
    }

    #[test]
    fn test_positions() {
        let p = EmbeddingParameters::new(3, 1.5, 0.5);
        let pos: Vec<f64> = p.positions(2).collect();
        assert_eq!(pos, vec![1.0, 2.5, 4.0]);
    }

    #[test]
    fn test_default_config() {
        let cfg = EmbedderConfig::default();
        assert_eq!(cfg.boundary, SplineBoundary::NotAKnot);
        assert!(cfg.parallel);
        assert!(!EmbedderConfig::sequential().parallel);
    }
}
