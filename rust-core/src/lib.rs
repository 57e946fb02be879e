//! Crystallite grid library for powder-averaged spectral simulation
//!
//! This library loads orientation grids (crystallite sets) from built-in tables or
//! external files, reads triangulations over those grids, and maps one grid onto
//! another by nearest neighbour with an on-disk cache.
//!
//! Quick reference
//! - Sets: [`crystallites::CrystalliteLoader`], [`crystallites::OrientationSet`], [`crystallites::CrystalliteCatalog`]
//! - Meshes: [`triangles::load_triangle_file`], [`triangles::TriangleMesh`]
//! - Maps: [`mapping::NearestNeighborMapper`], [`mapping::nearest_neighbor_map`]

pub mod config;
pub mod crystallites;
pub mod error;
pub mod interfaces;
pub mod mapping;
pub mod triangles;
pub mod utils;

pub use error::{CrystalliteError, Result};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// A convenience prelude for importing common items.
pub mod prelude {
    #[doc(no_inline)]
    pub use super::crystallites::{Crystallite, CrystalliteCatalog, CrystalliteLoader, OrientationSet};
    #[doc(no_inline)]
    pub use super::interfaces::Verbosity;
    #[doc(no_inline)]
    pub use super::mapping::{CorrespondenceMap, NearestNeighborMapper};
    #[doc(no_inline)]
    pub use super::triangles::{load_triangle_file, TriangleMesh};
}
