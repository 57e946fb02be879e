// Mapping module: correspondence between crystallite grids of different resolution
// This module provides the nearest-neighbour search and its on-disk cache

// ======================== MODULE DECLARATIONS ========================
pub mod correspondence_map;
pub mod nearest_neighbor;


// ======================== MAP TYPE ========================
pub use correspondence_map::CorrespondenceMap; // struct - target index → nearest source index (1-based)
// CorrespondenceMap impl methods:
//   new(sources: Vec<usize>) -> Self                               - sources[i] belongs to target i + 1
//   source_for(&self, target: usize) -> Option<usize>              - 1-based lookup
//   iter(&self) -> impl Iterator<Item = (usize, usize)>            - (target, source) pairs
//   write_pairs(&self, writer: &mut W) -> io::Result<()>           - `.map` file format

// ======================== NEAREST NEIGHBOUR SEARCH ========================
pub use nearest_neighbor::{
    NearestNeighborMapper, // struct - cached map construction keyed by set names
    nearest_neighbor_map,  // fn(source: &OrientationSet, target: &OrientationSet) -> Result<CorrespondenceMap>
    nearest_source,        // fn(target: &Crystallite, source: &OrientationSet) -> Option<(usize, f64)>
};
// NearestNeighborMapper impl methods:
//   new(cache_dir: impl Into<PathBuf>) -> Self                     - cache files live in cache_dir
//   cache_path(&self, source_name: &str, target_name: &str) -> PathBuf - <target>_<source>.map
//   map(&self, source_name, source, target_name, target, verbosity) -> Result<CorrespondenceMap>
