//! Sliding-Window Embedding Construction
//!
//! Window i samples the signal at the fractional positions
//!
//!   pⱼ = dT·i + τ·j,   j = 0, …, dim-1
//!
//! Each window is reconstructed by a cubic spline fitted to the integer
//! samples [⌊p₀⌋, ⌈p_{dim-1}⌉ + 2]. The two extra samples on the right give
//! the spline support past the last coordinate.
//!
//! ## Row Count
//!
//! The candidate count is M = ⌊(N - dim·τ) / dT⌋. Construction stops at the
//! first window whose padded right end reaches N, so the emitted row count
//! may be smaller than M. That truncation is part of the output contract and
//! is reported by [`EmbeddingMatrix::truncated_windows`].

use ndarray::{Array2, ArrayView1, ArrayViewMut1, Axis};
use rayon::prelude::*;
use tracing::debug;

use super::spline::CubicSpline;
use crate::config::{EmbedderConfig, EmbeddingParameters};
use crate::error::EmbeddingError;

/// Samples of right padding beyond the last coordinate's ceiling
const RIGHT_PADDING: usize = 2;

/// Integer sample range `[start, end]` (inclusive) supporting one window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowSupport {
    pub start: usize,
    pub end: usize,
}

impl WindowSupport {
    /// Support for window `i`
    pub fn for_window(params: &EmbeddingParameters, i: usize) -> Self {
        let first = params.d_t * i as f64;
        let last = first + params.window_span();
        Self {
            start: first.floor() as usize,
            end: last.ceil() as usize + RIGHT_PADDING,
        }
    }

    /// Does the signal hold every sample of this support?
    pub fn fits(&self, len: usize) -> bool {
        self.end < len
    }
}

/// Delay vectors produced by one embedding call
#[derive(Debug, Clone, PartialEq)]
pub struct EmbeddingMatrix {
    points: Array2<f64>,
    params: EmbeddingParameters,
    candidate_windows: usize,
}

impl EmbeddingMatrix {
    /// Row-major `rows × dim` point cloud
    pub fn points(&self) -> &Array2<f64> {
        &self.points
    }

    pub fn into_points(self) -> Array2<f64> {
        self.points
    }

    /// Number of emitted windows
    pub fn nrows(&self) -> usize {
        self.points.nrows()
    }

    pub fn dim(&self) -> usize {
        self.points.ncols()
    }

    pub fn is_empty(&self) -> bool {
        self.points.nrows() == 0
    }

    pub fn params(&self) -> &EmbeddingParameters {
        &self.params
    }

    /// M = ⌊(N - dim·τ) / dT⌋
    pub fn candidate_windows(&self) -> usize {
        self.candidate_windows
    }

    /// Candidates dropped because their support ran past the signal
    pub fn truncated_windows(&self) -> usize {
        self.candidate_windows - self.nrows()
    }

    pub fn row(&self, i: usize) -> ArrayView1<'_, f64> {
        self.points.row(i)
    }

    /// Fractional start position of window `i`
    pub fn window_start(&self, i: usize) -> f64 {
        self.params.d_t * i as f64
    }
}

/// Builds delay embeddings with a fixed spline and threading configuration
#[derive(Debug, Clone, Default)]
pub struct SlidingWindowEmbedder {
    config: EmbedderConfig,
}

impl SlidingWindowEmbedder {
    pub fn new(config: EmbedderConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EmbedderConfig {
        &self.config
    }

    /// Embed `signal` with the given parameters.
    ///
    /// # Errors
    /// * `InvalidParameters` if `params` fails validation
    /// * `NonFiniteSignal` if any sample is NaN or infinite
    /// * `InsufficientSignalLength` if no window fits
    pub fn embed(
        &self,
        signal: &[f64],
        params: &EmbeddingParameters,
    ) -> Result<EmbeddingMatrix, EmbeddingError> {
        params.validate()?;

        if let Some(index) = signal.iter().position(|v| !v.is_finite()) {
            return Err(EmbeddingError::NonFiniteSignal { index });
        }

        let n = signal.len();
        let candidates = params.candidate_windows(n);
        if candidates <= 0 {
            return Err(EmbeddingError::InsufficientSignalLength {
                len: n,
                extent: params.window_extent(),
                d_t: params.d_t,
            });
        }
        let candidates = candidates as usize;

        // Supports move right monotonically, so the first misfit ends the matrix
        let rows = (0..candidates)
            .position(|i| !WindowSupport::for_window(params, i).fits(n))
            .unwrap_or(candidates);

        if rows < candidates {
            debug!(
                candidates,
                rows,
                len = n,
                "Truncated trailing windows lacking spline support"
            );
        }

        let mut points = Array2::<f64>::zeros((rows, params.dim));
        if self.config.parallel {
            points
                .axis_iter_mut(Axis(0))
                .into_par_iter()
                .enumerate()
                .try_for_each(|(i, row)| self.fill_window(signal, params, i, row))?;
        } else {
            for (i, row) in points.axis_iter_mut(Axis(0)).enumerate() {
                self.fill_window(signal, params, i, row)?;
            }
        }

        debug!(
            rows,
            dim = params.dim,
            tau = params.tau,
            d_t = params.d_t,
            "Built sliding-window embedding"
        );

        Ok(EmbeddingMatrix {
            points,
            params: *params,
            candidate_windows: candidates,
        })
    }

    /// Write the interpolated values of window `i` into `row`
    fn fill_window(
        &self,
        signal: &[f64],
        params: &EmbeddingParameters,
        i: usize,
        mut row: ArrayViewMut1<'_, f64>,
    ) -> Result<(), EmbeddingError> {
        let support = WindowSupport::for_window(params, i);
        let spline = CubicSpline::through_samples(
            &signal[support.start..=support.end],
            support.start,
            self.config.boundary,
        )?;
        for (value, p) in row.iter_mut().zip(params.positions(i)) {
            *value = spline.evaluate(p);
        }
        Ok(())
    }
}

/// Embed with the default configuration.
///
/// Shorthand for `SlidingWindowEmbedder::default().embed(signal, &params)`.
pub fn embed(
    signal: &[f64],
    dim: usize,
    tau: f64,
    d_t: f64,
) -> Result<EmbeddingMatrix, EmbeddingError> {
    SlidingWindowEmbedder::default().embed(signal, &EmbeddingParameters::new(dim, tau, d_t))
}
