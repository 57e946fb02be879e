// Constants

// Naming conventions
pub const CATALOG_SUFFIX: &str = "_cryst"; // Built-in tables are stored as <basename>_cryst
pub const CRYSTALLITE_EXTENSION: &str = "cry"; // Tried only when the literal name fails to open
pub const TRIANGLE_EXTENSION: &str = "tri";
pub const MAP_EXTENSION: &str = "map";
pub const MAP_SEPARATOR: &str = "_"; // <target>_<source>.map

// Built-in ZCW tables (Fibonacci sizes within this window)
pub const ZCW_MIN_SIZE: usize = 21;
pub const ZCW_MAX_SIZE: usize = 1597;
