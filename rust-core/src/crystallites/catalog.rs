use serde::{Deserialize, Serialize};

use crate::config::{CATALOG_SUFFIX, ZCW_MAX_SIZE, ZCW_MIN_SIZE};

/// A named, precomputed crystallite table. Entries are `(alpha, beta, weight)`;
/// gamma is always zero for built-in tables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogTable {
    name: String,
    entries: Vec<(f64, f64, f64)>,
}

impl CatalogTable {
    /// Full table name including the `_cryst` suffix.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Name as a user would type it.
    pub fn basename(&self) -> &str {
        self.name.strip_suffix(CATALOG_SUFFIX).unwrap_or(&self.name)
    }

    pub fn entries(&self) -> &[(f64, f64, f64)] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Read-only collection of built-in crystallite tables, injected into
/// [`CrystalliteLoader`](super::CrystalliteLoader).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CrystalliteCatalog {
    tables: Vec<CatalogTable>,
}

impl CrystalliteCatalog {
    /// An empty catalog: every name resolves to an external file.
    pub fn new() -> Self {
        Self::default()
    }

    /// The standard tables: two single-orientation sets and ZCW full-sphere
    /// sets for every Fibonacci size between 21 and 1597.
    pub fn builtin() -> Self {
        let mut catalog = Self::new();
        catalog.insert("alpha0beta0", vec![(0.0, 0.0, 1.0)]);
        catalog.insert("alpha0beta90", vec![(0.0, 90.0, 1.0)]);

        // Sliding window over F(k-2), F(k-1), F(k)
        let mut window = [1usize, 1, 2];
        while window[2] <= ZCW_MAX_SIZE {
            if window[2] >= ZCW_MIN_SIZE {
                catalog.insert(
                    format!("zcw{}", window[2]),
                    zcw_entries(window[2], window[0]),
                );
            }
            window = [window[1], window[2], window[1] + window[2]];
        }
        catalog
    }

    /// Store a table under `<basename>_cryst`, replacing any table of that name.
    pub fn insert(&mut self, basename: impl Into<String>, entries: Vec<(f64, f64, f64)>) {
        let name = format!("{}{}", basename.into(), CATALOG_SUFFIX);
        let table = CatalogTable { name, entries };
        match self.tables.iter_mut().find(|t| t.name == table.name) {
            Some(existing) => *existing = table,
            None => self.tables.push(table),
        }
    }

    /// Builder-style [`insert`](Self::insert).
    pub fn with_table(mut self, basename: impl Into<String>, entries: Vec<(f64, f64, f64)>) -> Self {
        self.insert(basename, entries);
        self
    }

    /// Exact match against the full (suffixed) table name.
    pub fn get(&self, full_name: &str) -> Option<&CatalogTable> {
        self.tables.iter().find(|t| t.name == full_name)
    }

    /// Base names in insertion order.
    pub fn names(&self) -> Vec<&str> {
        self.tables.iter().map(CatalogTable::basename).collect()
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }
}

/// Zaremba-Conroy-Wolfsberg full-sphere grid of `n` points with generator `g`
/// (for Fibonacci `n = F(k)` use `g = F(k-2)`). Uniform weights `1/n`.
pub fn zcw_entries(n: usize, g: usize) -> Vec<(f64, f64, f64)> {
    let size = n as f64;
    (0..n)
        .map(|j| {
            let alpha = 360.0 * ((j * g) % n) as f64 / size;
            // clamp absorbs rounding at the pole
            let beta = (2.0 * j as f64 / size - 1.0)
                .acos()
                .to_degrees()
                .clamp(0.0, 180.0);
            (alpha, beta, 1.0 / size)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_builtin_names() {
        let catalog = CrystalliteCatalog::builtin();
        let names = catalog.names();
        assert_eq!(names[0], "alpha0beta0");
        assert_eq!(names[1], "alpha0beta90");
        assert_eq!(
            &names[2..],
            &[
                "zcw21", "zcw34", "zcw55", "zcw89", "zcw144", "zcw233", "zcw377", "zcw610",
                "zcw987", "zcw1597"
            ]
        );
    }

    #[test]
    fn test_lookup_requires_suffix() {
        let catalog = CrystalliteCatalog::builtin();
        assert!(catalog.get("zcw21").is_none());
        let table = catalog.get("zcw21_cryst").unwrap();
        assert_eq!(table.len(), 21);
        assert_eq!(table.basename(), "zcw21");
    }

    #[test]
    fn test_zcw_tables_cover_sphere() {
        let catalog = CrystalliteCatalog::builtin();
        for name in ["zcw21_cryst", "zcw144_cryst", "zcw1597_cryst"] {
            let table = catalog.get(name).unwrap();
            let total: f64 = table.entries().iter().map(|e| e.2).sum();
            assert_relative_eq!(total, 1.0, epsilon = 1e-10);
            for &(alpha, beta, weight) in table.entries() {
                assert!((0.0..360.0).contains(&alpha), "alpha {} out of range", alpha);
                assert!((0.0..=180.0).contains(&beta), "beta {} out of range", beta);
                assert!(weight > 0.0);
            }
        }
    }

    #[test]
    fn test_insert_replaces_existing() {
        let catalog = CrystalliteCatalog::new()
            .with_table("tiny", vec![(0.0, 0.0, 1.0)])
            .with_table("tiny", vec![(0.0, 0.0, 0.5), (90.0, 90.0, 0.5)]);
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.get("tiny_cryst").unwrap().len(), 2);
    }
}
