//! Persistence Diagrams and the Persistent-Homology Seam
//!
//! A persistence pair [b, d) records a homology class born at filtration
//! value b and dying at d. For a sliding-window embedding of a periodic
//! signal, the most persistent H₁ class measures how round the loop is.
//!
//! The diagrams themselves come from a [`PersistenceBackend`]; this module
//! only defines the data model and the read-outs computed from it.
//!
//! ## Coefficient Field
//!
//! Homology is computed over ℤ/p for a prime p. The answer may depend on
//! p (a loop that wraps twice is invisible over ℤ/2 but not over ℤ/3), so
//! the field is part of every request and stored with the result.

use ndarray::Array2;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::AnalysisError;

/// Prime field ℤ/p used for homology coefficients
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct CoefficientField(u32);

impl CoefficientField {
    pub const Z2: Self = Self(2);
    pub const Z3: Self = Self(3);

    /// Field of characteristic `p`; fails unless `p` is prime
    pub fn new(p: u32) -> Result<Self, AnalysisError> {
        if is_prime(p) {
            Ok(Self(p))
        } else {
            Err(AnalysisError::InvalidInput(format!(
                "coefficient field characteristic must be prime, got {}",
                p
            )))
        }
    }

    pub fn characteristic(&self) -> u32 {
        self.0
    }
}

impl Default for CoefficientField {
    fn default() -> Self {
        Self::Z2
    }
}

impl TryFrom<u32> for CoefficientField {
    type Error = AnalysisError;

    fn try_from(p: u32) -> Result<Self, Self::Error> {
        Self::new(p)
    }
}

impl From<CoefficientField> for u32 {
    fn from(field: CoefficientField) -> u32 {
        field.0
    }
}

fn is_prime(p: u32) -> bool {
    if p < 2 {
        return false;
    }
    let mut d = 2u32;
    while d.saturating_mul(d) <= p {
        if p % d == 0 {
            return false;
        }
        d += 1;
    }
    true
}

/// A persistence pair [birth, death)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PersistencePair {
    pub birth: f64,
    pub death: f64,
}

impl PersistencePair {
    pub fn new(birth: f64, death: f64) -> Self {
        Self { birth, death }
    }

    /// Lifetime of the feature
    pub fn persistence(&self) -> f64 {
        if self.death.is_infinite() {
            f64::INFINITY
        } else {
            self.death - self.birth
        }
    }

    /// Is this an essential class (never dies)?
    pub fn is_essential(&self) -> bool {
        self.death.is_infinite()
    }
}

/// Persistence diagrams indexed by homology degree
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersistenceDiagrams {
    field: CoefficientField,
    diagrams: BTreeMap<usize, Vec<PersistencePair>>,
}

impl PersistenceDiagrams {
    pub fn new(field: CoefficientField) -> Self {
        Self {
            field,
            diagrams: BTreeMap::new(),
        }
    }

    /// Collect `(degree, birth, death)` triples
    pub fn from_pairs(
        field: CoefficientField,
        pairs: impl IntoIterator<Item = (usize, f64, f64)>,
    ) -> Self {
        let mut diagrams = Self::new(field);
        for (degree, birth, death) in pairs {
            diagrams.add(degree, PersistencePair::new(birth, death));
        }
        diagrams
    }

    pub fn add(&mut self, degree: usize, pair: PersistencePair) {
        self.diagrams.entry(degree).or_default().push(pair);
    }

    pub fn field(&self) -> CoefficientField {
        self.field
    }

    /// All pairs in degree `d` (empty if none were reported)
    pub fn degree(&self, d: usize) -> &[PersistencePair] {
        self.diagrams.get(&d).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Highest degree with at least one pair
    pub fn max_degree(&self) -> Option<usize> {
        self.diagrams
            .iter()
            .rev()
            .find(|(_, pairs)| !pairs.is_empty())
            .map(|(&d, _)| d)
    }

    fn finite(&self, d: usize) -> impl Iterator<Item = &PersistencePair> {
        self.degree(d).iter().filter(|p| !p.is_essential())
    }

    /// Number of finite pairs in degree `d`
    pub fn count(&self, d: usize) -> usize {
        self.finite(d).count()
    }

    /// Largest finite lifetime in degree `d`
    pub fn max_persistence(&self, d: usize) -> f64 {
        self.finite(d).map(|p| p.persistence()).fold(0.0, f64::max)
    }

    /// Sum of finite lifetimes in degree `d`
    pub fn total_persistence(&self, d: usize) -> f64 {
        self.finite(d).map(|p| p.persistence()).sum()
    }

    /// Shannon entropy of normalised finite lifetimes in degree `d`
    ///
    /// H = -Σᵢ pᵢ ln pᵢ,   pᵢ = lᵢ / Σⱼ lⱼ
    pub fn persistence_entropy(&self, d: usize) -> f64 {
        let lifetimes: Vec<f64> = self
            .finite(d)
            .map(|p| p.persistence())
            .filter(|&l| l > 0.0)
            .collect();

        let total: f64 = lifetimes.iter().sum();
        if total <= 0.0 {
            return 0.0;
        }

        let mut entropy = 0.0;
        for l in lifetimes {
            let p = l / total;
            entropy -= p * p.ln();
        }
        entropy
    }
}

/// Contract for persistent-homology collaborators.
///
/// Implementations compute diagrams of degree `0..=max_degree` for the
/// Rips filtration of `points` (rows are points) over `field`.
pub trait PersistenceBackend {
    fn persistence_diagrams(
        &self,
        points: &Array2<f64>,
        max_degree: usize,
        field: CoefficientField,
    ) -> Result<PersistenceDiagrams, AnalysisError>;
}
