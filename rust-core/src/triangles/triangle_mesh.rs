use serde::{Deserialize, Serialize};

/// Three crystallite indices forming one face of a triangulated grid.
///
/// Indices are logical references into some orientation set; they are not
/// checked against a concrete set and may be zero or negative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Triangle {
    pub a: i64,
    pub b: i64,
    pub c: i64,
}

impl Triangle {
    pub fn new(a: i64, b: i64, c: i64) -> Self {
        Self { a, b, c }
    }

    pub fn vertices(&self) -> [i64; 3] {
        [self.a, self.b, self.c]
    }
}

/// Triangulation over a crystallite grid, in file order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TriangleMesh {
    triangles: Vec<Triangle>,
}

impl TriangleMesh {
    pub fn new(triangles: Vec<Triangle>) -> Self {
        Self { triangles }
    }

    pub fn len(&self) -> usize {
        self.triangles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }

    /// Triangle by 1-based index (line order in the source file).
    pub fn get(&self, index: usize) -> Option<&Triangle> {
        index.checked_sub(1).and_then(|i| self.triangles.get(i))
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Triangle> {
        self.triangles.iter()
    }

    pub fn as_slice(&self) -> &[Triangle] {
        &self.triangles
    }

    /// Largest vertex index referenced, useful for checking a mesh against a set.
    pub fn max_index(&self) -> Option<i64> {
        self.triangles.iter().flat_map(|t| t.vertices()).max()
    }
}
