//! # Sliding-Window TDA
//!
//! Delay-coordinate ("sliding window") embedding of sampled time series,
//! and the geometric read-outs that quantify periodicity.
//!
//! ## Theoretical Framework
//!
//! A signal x sampled at integer times becomes the point cloud
//!
//!   SW(t) = [x(t), x(t + τ), …, x(t + (dim-1)τ)],   t = 0, dT, 2dT, …
//!
//! ### Central Observation
//!
//! A periodic signal maps to a closed loop. The loop is round when the
//! window extent dim·τ matches the period, and persistent homology
//! (a long-lived H₁ class) certifies it. Harmonic frequency mixtures give
//! closed curves; incommensurate ones fill a torus.
//!
//! ### Methodology
//!
//! 1. **Embedding**: cubic-spline interpolation at fractional positions,
//!    so τ and dT may be any positive reals
//!
//! 2. **Reduction**: PCA of the embedding; equal leading variances
//!    indicate a circle
//!
//! 3. **Persistence**: diagrams over ℤ/p from a pluggable backend
//!
//! ## Example
//!
//! ```
//! use sliding_window_tda::embed;
//!
//! let signal: Vec<f64> = (0..160)
//!     .map(|k| (2.0 * std::f64::consts::PI * k as f64 / 40.0).cos())
//!     .collect();
//!
//! let embedding = embed(&signal, 20, 1.0, 0.5).unwrap();
//! assert_eq!(embedding.candidate_windows(), 280);
//! assert_eq!(embedding.nrows(), 277);
//! ```
//!
//! ## References
//!
//! - Perea & Harer, "Sliding Windows and Persistence" (2015)
//! - Takens, "Detecting strange attractors in turbulence" (1981)

pub mod analysis;
pub mod config;
pub mod embedding;
pub mod error;

pub use config::{EmbedderConfig, EmbeddingParameters, SplineBoundary};
pub use error::{AnalysisError, EmbeddingError};

// Re-exports from embedding
pub use embedding::{
    embed,
    CubicSpline,
    EmbeddingMatrix,
    SlidingWindowEmbedder,
    WindowSupport,
};

// Re-exports from analysis
pub use analysis::{
    // Collaborator seams
    DimensionReduction,
    PersistenceBackend,
    // PCA
    Pca,
    Projection,
    // Diagrams
    CoefficientField,
    PersistenceDiagrams,
    PersistencePair,
    // Spectrum
    power_spectrum,
    dominant_period,
    // Pipeline
    TopologicalPipeline,
    TopologicalSummary,
};
