//! Embed → Reduce → Persist
//!
//! Chains the embedder with the two geometric collaborators and collects
//! the read-outs used to judge periodicity:
//!
//! - ratio of the two leading PCA variances (≈ 1 for a round loop)
//! - largest H₁ lifetime (long-lived loop ⇒ periodic)

use tracing::{debug, instrument};

use super::pca::{DimensionReduction, Projection};
use super::persistence::{CoefficientField, PersistenceBackend, PersistenceDiagrams};
use crate::config::EmbeddingParameters;
use crate::embedding::SlidingWindowEmbedder;
use crate::error::AnalysisError;

/// Read-outs of one pipeline run
#[derive(Debug, Clone)]
pub struct TopologicalSummary {
    /// Windows emitted by the embedder
    pub rows: usize,
    /// Windows the row-count formula allowed
    pub candidate_windows: usize,
    pub projection: Projection,
    pub diagrams: PersistenceDiagrams,
}

impl TopologicalSummary {
    /// Second over first PCA variance
    pub fn roundness(&self) -> Option<f64> {
        self.projection.variance_ratio(0, 1)
    }

    /// Largest finite H₁ lifetime
    pub fn max_h1_persistence(&self) -> f64 {
        self.diagrams.max_persistence(1)
    }
}

/// Sliding-window pipeline over pluggable collaborators
#[derive(Debug, Clone)]
pub struct TopologicalPipeline<R, B> {
    pub embedder: SlidingWindowEmbedder,
    pub reducer: R,
    pub backend: B,
    /// PCA components to keep
    pub components: usize,
    /// Highest homology degree requested from the backend
    pub max_degree: usize,
    pub field: CoefficientField,
}

impl<R: DimensionReduction, B: PersistenceBackend> TopologicalPipeline<R, B> {
    pub fn new(reducer: R, backend: B) -> Self {
        Self {
            embedder: SlidingWindowEmbedder::default(),
            reducer,
            backend,
            components: 2,
            max_degree: 1,
            field: CoefficientField::Z2,
        }
    }

    pub fn with_field(mut self, field: CoefficientField) -> Self {
        self.field = field;
        self
    }

    #[instrument(skip(self, signal), fields(len = signal.len()))]
    pub fn run(
        &self,
        signal: &[f64],
        params: &EmbeddingParameters,
    ) -> Result<TopologicalSummary, AnalysisError> {
        let embedding = self.embedder.embed(signal, params)?;
        let components = self.components.min(embedding.dim());
        let projection = self.reducer.reduce(embedding.points(), components)?;
        let diagrams =
            self.backend
                .persistence_diagrams(embedding.points(), self.max_degree, self.field)?;

        debug!(
            rows = embedding.nrows(),
            h1_pairs = diagrams.count(1),
            "Pipeline finished"
        );

        Ok(TopologicalSummary {
            rows: embedding.nrows(),
            candidate_windows: embedding.candidate_windows(),
            projection,
            diagrams,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::Pca;
    use crate::error::EmbeddingError;
    use ndarray::Array2;
    use std::f64::consts::PI;

    /// Reports one H₁ pair whose lifetime is the cloud's row count
    struct CountingBackend;

    impl PersistenceBackend for CountingBackend {
        fn persistence_diagrams(
            &self,
            points: &Array2<f64>,
            max_degree: usize,
            field: CoefficientField,
        ) -> Result<PersistenceDiagrams, AnalysisError> {
            let mut pairs = vec![(0, 0.0, f64::INFINITY)];
            if max_degree >= 1 {
                pairs.push((1, 1.0, 1.0 + points.nrows() as f64));
            }
            Ok(PersistenceDiagrams::from_pairs(field, pairs))
        }
    }

    struct FailingBackend;

    impl PersistenceBackend for FailingBackend {
        fn persistence_diagrams(
            &self,
            _points: &Array2<f64>,
            _max_degree: usize,
            _field: CoefficientField,
        ) -> Result<PersistenceDiagrams, AnalysisError> {
            Err(AnalysisError::Backend("unavailable".to_string()))
        }
    }

    fn tone(n: usize, period: f64) -> Vec<f64> {
        (0..n).map(|k| (2.0 * PI * k as f64 / period).cos()).collect()
    }

    #[test]
    fn test_pipeline_reads_out_loop() {
        let pipeline = TopologicalPipeline::new(Pca, CountingBackend).with_field(CoefficientField::Z3);
        let summary = pipeline
            .run(&tone(160, 40.0), &EmbeddingParameters::new(20, 1.0, 0.5))
            .unwrap();

        assert_eq!(summary.candidate_windows, 280);
        assert_eq!(summary.rows, 277);
        assert_eq!(summary.diagrams.field(), CoefficientField::Z3);
        assert_eq!(summary.max_h1_persistence(), 277.0);
        assert!(summary.roundness().unwrap() > 0.99);
    }

    #[test]
    fn test_pipeline_propagates_embedding_error() {
        let pipeline = TopologicalPipeline::new(Pca, CountingBackend);
        let err = pipeline
            .run(&tone(10, 40.0), &EmbeddingParameters::new(20, 1.0, 0.5))
            .unwrap_err();
        assert!(matches!(
            err,
            AnalysisError::Embedding(EmbeddingError::InsufficientSignalLength { .. })
        ));
    }

    #[test]
    fn test_pipeline_propagates_backend_error() {
        let pipeline = TopologicalPipeline::new(Pca, FailingBackend);
        let err = pipeline
            .run(&tone(160, 40.0), &EmbeddingParameters::new(20, 1.0, 0.5))
            .unwrap_err();
        assert_eq!(err, AnalysisError::Backend("unavailable".to_string()));
    }
}
