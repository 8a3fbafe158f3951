//! Principal Component Analysis
//!
//! Projects a point cloud onto the eigenvectors of its sample covariance
//!
//!   C = Xᶜᵀ Xᶜ / (n - 1),   Xᶜ = X - mean(X)
//!
//! sorted by decreasing eigenvalue. For a sliding-window embedding of a
//! pure tone, the two leading variances are nearly equal (the loop is a
//! circle); for a trend they differ by orders of magnitude.

use nalgebra::{DMatrix, SymmetricEigen};
use ndarray::{Array2, Axis};
use std::cmp::Ordering;

use crate::error::AnalysisError;

/// Output of a dimensionality reduction
#[derive(Debug, Clone)]
pub struct Projection {
    /// Points in the reduced coordinates (`n × k`)
    pub points: Array2<f64>,
    /// Principal axes as columns (`dim × k`)
    pub components: Array2<f64>,
    /// Variance along each retained axis, descending
    pub explained_variance: Vec<f64>,
    /// Fraction of total variance along each retained axis
    pub explained_variance_ratio: Vec<f64>,
}

impl Projection {
    /// `variance[b] / variance[a]`, or `None` if `a` carries no variance
    pub fn variance_ratio(&self, a: usize, b: usize) -> Option<f64> {
        let va = *self.explained_variance.get(a)?;
        let vb = *self.explained_variance.get(b)?;
        if va > 0.0 {
            Some(vb / va)
        } else {
            None
        }
    }
}

/// Contract for dimensionality reduction collaborators
pub trait DimensionReduction {
    /// Reduce `matrix` (rows are points) to `k` coordinates
    fn reduce(&self, matrix: &Array2<f64>, k: usize) -> Result<Projection, AnalysisError>;
}

/// Exact PCA via symmetric eigendecomposition
#[derive(Debug, Clone, Copy, Default)]
pub struct Pca;

impl DimensionReduction for Pca {
    fn reduce(&self, matrix: &Array2<f64>, k: usize) -> Result<Projection, AnalysisError> {
        let (n, dim) = matrix.dim();
        if n < 2 {
            return Err(AnalysisError::InvalidInput(format!(
                "PCA needs at least 2 points, got {}",
                n
            )));
        }
        if k == 0 || k > dim {
            return Err(AnalysisError::InvalidInput(format!(
                "cannot keep {} components of a {}-dimensional cloud",
                k, dim
            )));
        }

        let mean = matrix
            .mean_axis(Axis(0))
            .ok_or_else(|| AnalysisError::InvalidInput("empty matrix".to_string()))?;
        let centered = matrix - &mean;
        let cov = centered.t().dot(&centered) / (n - 1) as f64;

        let eig = SymmetricEigen::new(DMatrix::from_fn(dim, dim, |i, j| cov[[i, j]]));
        if eig.eigenvalues.iter().any(|v| !v.is_finite()) {
            return Err(AnalysisError::Decomposition(
                "non-finite eigenvalue in covariance".to_string(),
            ));
        }

        let mut order: Vec<usize> = (0..dim).collect();
        order.sort_by(|&a, &b| {
            eig.eigenvalues[b]
                .partial_cmp(&eig.eigenvalues[a])
                .unwrap_or(Ordering::Equal)
        });

        // Round-off can leave tiny negative eigenvalues
        let variances: Vec<f64> = order.iter().map(|&c| eig.eigenvalues[c].max(0.0)).collect();
        let total: f64 = variances.iter().sum();

        let mut components = Array2::<f64>::zeros((dim, k));
        for (out, &c) in order.iter().take(k).enumerate() {
            for row in 0..dim {
                components[[row, out]] = eig.eigenvectors[(row, c)];
            }
        }

        let explained_variance: Vec<f64> = variances[..k].to_vec();
        let explained_variance_ratio = explained_variance
            .iter()
            .map(|v| if total > 0.0 { v / total } else { 0.0 })
            .collect();

        Ok(Projection {
            points: centered.dot(&components),
            components,
            explained_variance,
            explained_variance_ratio,
        })
    }
}
