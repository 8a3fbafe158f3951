//! Interpolating Cubic Spline
//!
//! Piecewise cubic S(t) through knots (xᵢ, yᵢ) with continuous first and
//! second derivatives. On [xₖ, xₖ₊₁] with h = xₖ₊₁ - xₖ and Mₖ = S''(xₖ):
//!
//!   S(t) = Mₖ (xₖ₊₁ - t)³ / 6h + Mₖ₊₁ (t - xₖ)³ / 6h
//!        + (yₖ/h - Mₖ h/6)(xₖ₊₁ - t) + (yₖ₊₁/h - Mₖ₊₁ h/6)(t - xₖ)
//!
//! The interior moments satisfy the tridiagonal system
//!
//!   hᵢ₋₁ Mᵢ₋₁ + 2(hᵢ₋₁ + hᵢ) Mᵢ + hᵢ Mᵢ₊₁ = 6 (Δᵢ - Δᵢ₋₁),   Δᵢ = (yᵢ₊₁ - yᵢ)/hᵢ
//!
//! closed by the end conditions:
//!
//! - **Natural**: M₀ = Mₙ₋₁ = 0
//! - **Not-a-knot**: S''' continuous at x₁ and xₙ₋₂. M₀ and Mₙ₋₁ are
//!   eliminated so the system stays tridiagonal.
//!
//! Evaluation at a knot returns the stored sample unchanged.

use crate::config::SplineBoundary;
use crate::error::EmbeddingError;

/// Cubic spline in second-moment form
#[derive(Debug, Clone)]
pub struct CubicSpline {
    knots: Vec<f64>,
    values: Vec<f64>,
    /// Second derivative at each knot
    moments: Vec<f64>,
}

impl CubicSpline {
    /// Fit a spline through `(knots[i], values[i])`.
    ///
    /// Knots must be finite and strictly increasing. One knot gives a
    /// constant, two a line; three knots under not-a-knot give the
    /// interpolating parabola.
    pub fn new(
        knots: &[f64],
        values: &[f64],
        boundary: SplineBoundary,
    ) -> Result<Self, EmbeddingError> {
        if knots.is_empty() {
            return Err(EmbeddingError::InvalidKnots("no knots".to_string()));
        }
        if knots.len() != values.len() {
            return Err(EmbeddingError::InvalidKnots(format!(
                "{} knots but {} values",
                knots.len(),
                values.len()
            )));
        }
        if knots.iter().chain(values).any(|v| !v.is_finite()) {
            return Err(EmbeddingError::InvalidKnots("non-finite knot or value".to_string()));
        }
        if knots.windows(2).any(|w| w[1] <= w[0]) {
            return Err(EmbeddingError::InvalidKnots(
                "knots must be strictly increasing".to_string(),
            ));
        }

        let moments = compute_moments(knots, values, boundary);

        Ok(Self {
            knots: knots.to_vec(),
            values: values.to_vec(),
            moments,
        })
    }

    /// Fit through consecutive samples located at integer indices
    /// `first, first + 1, ...`.
    pub fn through_samples(
        samples: &[f64],
        first: usize,
        boundary: SplineBoundary,
    ) -> Result<Self, EmbeddingError> {
        let knots: Vec<f64> = (first..first + samples.len()).map(|k| k as f64).collect();
        Self::new(&knots, samples, boundary)
    }

    /// Evaluate S(t). Outside the knot range the end pieces are extended.
    pub fn evaluate(&self, t: f64) -> f64 {
        let n = self.knots.len();
        let upper = self.knots.partition_point(|&x| x <= t);
        if upper > 0 && self.knots[upper - 1] == t {
            return self.values[upper - 1];
        }
        if n == 1 {
            return self.values[0];
        }

        let k = upper.saturating_sub(1).min(n - 2);
        let (x0, x1) = (self.knots[k], self.knots[k + 1]);
        let (y0, y1) = (self.values[k], self.values[k + 1]);
        let (m0, m1) = (self.moments[k], self.moments[k + 1]);
        let h = x1 - x0;
        let a = x1 - t;
        let b = t - x0;

        m0 * a.powi(3) / (6.0 * h)
            + m1 * b.powi(3) / (6.0 * h)
            + (y0 / h - m0 * h / 6.0) * a
            + (y1 / h - m1 * h / 6.0) * b
    }

    /// Second derivatives S''(xᵢ) at the knots
    pub fn moments(&self) -> &[f64] {
        &self.moments
    }

    pub fn knots(&self) -> &[f64] {
        &self.knots
    }
}

fn compute_moments(x: &[f64], y: &[f64], boundary: SplineBoundary) -> Vec<f64> {
    let n = x.len();
    if n < 3 {
        return vec![0.0; n];
    }

    let h: Vec<f64> = x.windows(2).map(|w| w[1] - w[0]).collect();
    let slope: Vec<f64> = (0..n - 1).map(|i| (y[i + 1] - y[i]) / h[i]).collect();

    if n == 3 && boundary == SplineBoundary::NotAKnot {
        // Single parabola: S'' = 2 f[x0, x1, x2]
        let m = 2.0 * (slope[1] - slope[0]) / (h[0] + h[1]);
        return vec![m; 3];
    }

    // Unknowns M₁..Mₙ₋₂
    let size = n - 2;
    let mut sub = vec![0.0; size];
    let mut diag = vec![0.0; size];
    let mut sup = vec![0.0; size];
    let mut rhs = vec![0.0; size];

    for r in 0..size {
        let i = r + 1;
        sub[r] = h[i - 1];
        diag[r] = 2.0 * (h[i - 1] + h[i]);
        sup[r] = h[i];
        rhs[r] = 6.0 * (slope[i] - slope[i - 1]);
    }

    let mut moments = vec![0.0; n];

    match boundary {
        SplineBoundary::Natural => {
            let interior = solve_tridiagonal(&sub, &diag, &sup, &rhs);
            moments[1..n - 1].copy_from_slice(&interior);
        }
        SplineBoundary::NotAKnot => {
            // M₀ = ((h₀ + h₁) M₁ - h₀ M₂) / h₁
            let (h0, h1) = (h[0], h[1]);
            diag[0] += h0 * (h0 + h1) / h1;
            sup[0] -= h0 * h0 / h1;

            // Mₙ₋₁ = ((a + b) Mₙ₋₂ - b Mₙ₋₃) / a
            let (a, b) = (h[n - 3], h[n - 2]);
            diag[size - 1] += b * (a + b) / a;
            sub[size - 1] -= b * b / a;

            let interior = solve_tridiagonal(&sub, &diag, &sup, &rhs);
            moments[1..n - 1].copy_from_slice(&interior);
            moments[0] = ((h0 + h1) * moments[1] - h0 * moments[2]) / h1;
            moments[n - 1] = ((a + b) * moments[n - 2] - b * moments[n - 3]) / a;
        }
    }

    moments
}

/// Thomas algorithm. `sub[0]` and `sup[last]` are ignored.
fn solve_tridiagonal(sub: &[f64], diag: &[f64], sup: &[f64], rhs: &[f64]) -> Vec<f64> {
    let m = diag.len();
    let mut c = vec![0.0; m];
    let mut d = vec![0.0; m];

    c[0] = sup[0] / diag[0];
    d[0] = rhs[0] / diag[0];
    for i in 1..m {
        let w = diag[i] - sub[i] * c[i - 1];
        c[i] = sup[i] / w;
        d[i] = (rhs[i] - sub[i] * d[i - 1]) / w;
    }

    let mut x = vec![0.0; m];
    x[m - 1] = d[m - 1];
    for i in (0..m - 1).rev() {
        x[i] = d[i] - c[i] * x[i + 1];
    }
    x
}
