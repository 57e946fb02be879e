// Crystallites module: orientation samples for powder averaging and how they are loaded
// This module provides the crystallite data types, the built-in table catalog and the set loader

// ======================== MODULE DECLARATIONS ========================
pub mod catalog;
pub mod crystallite;
pub mod crystallite_loader;

// Test modules
mod _tests_crystallite_loader;

// ======================== ORIENTATION DATA ========================
pub use crystallite::{
    Crystallite,    // struct - Euler angles (alpha, beta, gamma) in degrees plus integration weight
    OrientationSet, // struct - ordered, immutable collection of crystallites
};
// Crystallite impl methods:
//   new(alpha: f64, beta: f64, gamma: f64, weight: f64) -> Self   - creates a crystallite
//   euler_angles(&self) -> Vector3<f64>                           - (alpha, beta, gamma) as a vector
//   angular_distance(&self, other: &Crystallite) -> f64           - raw L1 distance over Euler angles

// OrientationSet impl methods:
//   new(crystallites: Vec<Crystallite>, layout: ColumnLayout) -> Self - wraps validated crystallites
//   len(&self) -> usize / is_empty(&self) -> bool                  - number of crystallites
//   get(&self, index: usize) -> Option<&Crystallite>               - 1-based access
//   iter(&self) / as_slice(&self)                                  - ordered access
//   layout(&self) -> ColumnLayout                                  - 3 or 4 column source
//   sum_weights(&self) -> f64                                      - raw weight sum
//   normalized(&self) -> OrientationSet                            - copy with weights summing to 1

// ======================== BUILT-IN TABLES ========================
pub use catalog::{
    CatalogTable,       // struct - named table of (alpha, beta, weight) entries
    CrystalliteCatalog, // struct - read-only collection of tables addressed as <basename>_cryst
    zcw_entries,        // fn(n: usize, g: usize) -> Vec<(f64, f64, f64)> - ZCW full-sphere grid
};
// CrystalliteCatalog impl methods:
//   new() -> Self / builtin() -> Self                              - empty or standard catalog
//   insert(&mut self, basename, entries) / with_table(self, ...)   - add or replace a table
//   get(&self, full_name: &str) -> Option<&CatalogTable>           - exact suffixed-name lookup
//   names(&self) -> Vec<&str>                                      - base names in insertion order

// ======================== LOADING ========================
pub use crystallite_loader::{
    CrystalliteLoader, // struct - resolves names via catalog or file, validates and slices
    CrystalliteRange,  // struct - validated inclusive 1-based from/to range
};
// CrystalliteLoader impl methods:
//   new(catalog: CrystalliteCatalog) -> Self                       - loader with injected catalog
//   load(&self, name: &str, from: i64, to: i64, verbosity: Verbosity) -> Result<OrientationSet>
