// Triangles module: triangulated connectivity over a crystallite grid
// This module provides the triangle mesh type and the `.tri` file loader

// ======================== MODULE DECLARATIONS ========================
pub mod triangle_loader;
pub mod triangle_mesh;


// ======================== MESH TYPES ========================
pub use triangle_mesh::{
    Triangle,     // struct - three logical crystallite indices (a, b, c)
    TriangleMesh, // struct - ordered triangles, one per non-empty file line
};
// TriangleMesh impl methods:
//   new(triangles: Vec<Triangle>) -> Self                          - wraps parsed triangles
//   len(&self) -> usize / is_empty(&self) -> bool                  - number of triangles
//   get(&self, index: usize) -> Option<&Triangle>                  - 1-based access
//   max_index(&self) -> Option<i64>                                - largest referenced crystallite

// ======================== LOADING ========================
pub use triangle_loader::load_triangle_file; // fn(name: &str, verbosity: Verbosity) -> Result<TriangleMesh>
