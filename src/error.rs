//! Error types for embedding construction and downstream analysis

use thiserror::Error;

/// Errors raised while building a sliding-window embedding.
///
/// Truncation of trailing windows is normal output and never appears here.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum EmbeddingError {
    /// `dim < 1`, `tau <= 0`, `d_t <= 0`, or a non-finite parameter.
    #[error("Invalid embedding parameters: {reason}")]
    InvalidParameters {
        /// Which constraint was violated
        reason: String,
    },

    /// A sample is NaN or infinite; no spline can pass through it.
    #[error("Non-finite signal value at sample {index}")]
    NonFiniteSignal {
        /// First offending sample
        index: usize,
    },

    /// Not even one window of the requested extent fits in the signal.
    ///
    /// `Constraint: floor((len - extent) / d_t) >= 1`
    #[error(
        "Insufficient signal length: {len} samples cannot hold a window of extent {extent} with stride {d_t}"
    )]
    InsufficientSignalLength {
        /// Number of samples in the signal
        len: usize,
        /// Window extent `dim * tau`
        extent: f64,
        /// Stride between consecutive windows
        d_t: f64,
    },

    /// Spline knots were empty, mismatched, unsorted or non-finite.
    #[error("Invalid spline knots: {0}")]
    InvalidKnots(String),
}

/// Errors raised by the analysis collaborators (reduction, persistence, spectra).
#[derive(Debug, Clone, Error, PartialEq)]
pub enum AnalysisError {
    /// Input matrix or signal cannot be analysed
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Eigendecomposition produced unusable output
    #[error("Decomposition error: {0}")]
    Decomposition(String),

    /// A persistence backend reported a failure
    #[error("Persistence backend error: {0}")]
    Backend(String),

    /// Embedding step failed before analysis could start
    #[error(transparent)]
    Embedding(#[from] EmbeddingError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insufficient_length_message() {
        let err = EmbeddingError::InsufficientSignalLength {
            len: 10,
            extent: 12.0,
            d_t: 0.5,
        };
        let msg = err.to_string();
        assert!(msg.contains("10 samples"));
        assert!(msg.contains("extent 12"));
    }

    #[test]
    fn test_non_finite_message() {
        let err = EmbeddingError::NonFiniteSignal { index: 90 };
        assert_eq!(err.to_string(), "Non-finite signal value at sample 90");
    }

    #[test]
    fn test_embedding_error_converts() {
        let err: AnalysisError = EmbeddingError::InvalidParameters {
            reason: "dim must be at least 1".to_string(),
        }
        .into();
        assert!(matches!(err, AnalysisError::Embedding(_)));
        assert!(err.to_string().contains("dim must be at least 1"));
    }
}
