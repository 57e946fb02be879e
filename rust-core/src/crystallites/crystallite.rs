use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

use crate::interfaces::ColumnLayout;

/// A single orientation sample used in powder averaging.
///
/// Angles are Euler angles in degrees: alpha in [0, 360), beta in [0, 180],
/// gamma in [0, 360). The weight is the solid angle covered by the sample.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Crystallite {
    pub alpha: f64,
    pub beta: f64,
    pub gamma: f64,
    pub weight: f64,
}

impl Crystallite {
    pub fn new(alpha: f64, beta: f64, gamma: f64, weight: f64) -> Self {
        Self {
            alpha,
            beta,
            gamma,
            weight,
        }
    }

    /// Euler angles as a vector (alpha, beta, gamma).
    pub fn euler_angles(&self) -> Vector3<f64> {
        Vector3::new(self.alpha, self.beta, self.gamma)
    }

    /// L1 distance over the raw Euler angles: |Δα| + |Δβ| + |Δγ|.
    ///
    /// No periodic wraparound is applied, so 359° and 1° are 358° apart.
    /// Cached grid maps depend on this exact metric.
    pub fn angular_distance(&self, other: &Crystallite) -> f64 {
        (self.euler_angles() - other.euler_angles()).abs().sum()
    }
}

/// An ordered, immutable set of crystallites.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrientationSet {
    crystallites: Vec<Crystallite>,
    layout: ColumnLayout,
}

impl OrientationSet {
    /// Wrap already validated crystallites. Loaders reject zero weights
    /// before calling this.
    pub fn new(crystallites: Vec<Crystallite>, layout: ColumnLayout) -> Self {
        Self {
            crystallites,
            layout,
        }
    }

    pub fn len(&self) -> usize {
        self.crystallites.len()
    }

    pub fn is_empty(&self) -> bool {
        self.crystallites.is_empty()
    }

    /// Crystallite by 1-based index, matching the numbering in crystallite files.
    pub fn get(&self, index: usize) -> Option<&Crystallite> {
        index.checked_sub(1).and_then(|i| self.crystallites.get(i))
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Crystallite> {
        self.crystallites.iter()
    }

    pub fn as_slice(&self) -> &[Crystallite] {
        &self.crystallites
    }

    /// Whether the source listed gamma explicitly.
    pub fn layout(&self) -> ColumnLayout {
        self.layout
    }

    /// Raw sum of weights. Not normalized; well-formed full sets sum to 1.
    pub fn sum_weights(&self) -> f64 {
        self.crystallites.iter().map(|c| c.weight).sum()
    }

    /// Copy with weights rescaled to sum to 1.
    pub fn normalized(&self) -> OrientationSet {
        let total = self.sum_weights();
        let crystallites = self
            .crystallites
            .iter()
            .map(|c| Crystallite {
                weight: c.weight / total,
                ..*c
            })
            .collect();
        OrientationSet::new(crystallites, self.layout)
    }
}

impl<'a> IntoIterator for &'a OrientationSet {
    type Item = &'a Crystallite;
    type IntoIter = std::slice::Iter<'a, Crystallite>;

    fn into_iter(self) -> Self::IntoIter {
        self.crystallites.iter()
    }
}
