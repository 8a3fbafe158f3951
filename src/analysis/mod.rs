//! Analysis Module: Downstream Collaborators of the Embedder
//!
//! The embedding matrix is consumed by three kinds of analysis:
//!
//! - `pca.rs`: dimensionality reduction, reading off dominant variances
//! - `persistence.rs`: persistence diagrams over a prime field, behind the
//!   [`PersistenceBackend`] trait (no backend ships with this crate)
//! - `spectrum.rs`: power spectrum, for contrast with the topological view
//!
//! `pipeline.rs` chains embedding, reduction and persistence.

mod pca;
mod persistence;
mod pipeline;
mod spectrum;

pub use pca::{DimensionReduction, Pca, Projection};
pub use persistence::{
    CoefficientField, PersistenceBackend, PersistenceDiagrams, PersistencePair,
};
pub use pipeline::{TopologicalPipeline, TopologicalSummary};
pub use spectrum::{dominant_period, power_spectrum};
