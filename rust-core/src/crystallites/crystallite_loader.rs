// Crystallite loader: resolves a set name to an OrientationSet, either from the
// built-in catalog or from an external `.cry` file, and applies the from/to slice.

use std::io::{BufRead, BufReader};

use log::{debug, error, info};

use crate::config::{CATALOG_SUFFIX, CRYSTALLITE_EXTENSION};
use crate::crystallites::catalog::{CatalogTable, CrystalliteCatalog};
use crate::crystallites::crystallite::{Crystallite, OrientationSet};
use crate::error::{CrystalliteError, Result};
use crate::interfaces::{ColumnLayout, Verbosity};
use crate::utils::{expand_home, next_line, open_with_fallback};

/// Inclusive, 1-based crystallite range after clamping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CrystalliteRange {
    pub from: usize,
    pub to: usize,
}

impl CrystalliteRange {
    /// Validate `from` against `available` and clamp `to`.
    ///
    /// `to` larger than `available` or negative selects everything up to the end.
    pub fn resolve(name: &str, from: i64, to: i64, available: usize) -> Result<Self> {
        let range_error = |reason: &str| CrystalliteError::Range {
            name: name.to_string(),
            from,
            to,
            available,
            reason: reason.to_string(),
        };

        if from < 1 {
            return Err(range_error("initial value must be at least 1"));
        }
        let from = from as usize;
        if from > available {
            return Err(range_error("initial value too large"));
        }
        let clamped = if to < 0 || to as u64 > available as u64 {
            available
        } else {
            to as usize
        };
        if clamped < from {
            return Err(range_error("range selects no crystallites"));
        }
        Ok(CrystalliteRange { from, to: clamped })
    }

    pub fn len(&self) -> usize {
        self.to - self.from + 1
    }

    pub fn is_empty(&self) -> bool {
        self.to < self.from
    }
}

/// Loads crystallite sets by name.
#[derive(Debug, Clone)]
pub struct CrystalliteLoader {
    catalog: CrystalliteCatalog,
}

impl Default for CrystalliteLoader {
    fn default() -> Self {
        Self::new(CrystalliteCatalog::builtin())
    }
}

impl CrystalliteLoader {
    pub fn new(catalog: CrystalliteCatalog) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> &CrystalliteCatalog {
        &self.catalog
    }

    /// Load crystallites `from..=to` (1-based) of the set called `name`.
    ///
    /// `name` is first looked up in the catalog as `<name>_cryst`; otherwise it is
    /// opened as a file, retrying with `.cry` appended. Use `./name` to force an
    /// external file that shadows a built-in table.
    pub fn load(&self, name: &str, from: i64, to: i64, verbosity: Verbosity) -> Result<OrientationSet> {
        let full_name = format!("{}{}", name, CATALOG_SUFFIX);
        if let Some(table) = self.catalog.get(&full_name) {
            if verbosity.is_verbose() {
                info!("found internal crystallite file '{}'", name);
                info!("to overwrite with external file, specify './{}' instead", name);
            }
            return load_from_table(name, table, from, to, verbosity);
        }
        self.load_from_file(name, from, to, verbosity)
    }

    fn load_from_file(&self, name: &str, from: i64, to: i64, verbosity: Verbosity) -> Result<OrientationSet> {
        let (path, file) = open_with_fallback(&expand_home(name), CRYSTALLITE_EXTENSION).map_err(|err| {
            error!("internal crystallite files are: {}", self.catalog.names().join(" "));
            err
        })?;
        if verbosity.is_verbose() {
            info!("loading external crystallite file '{}'", path.display());
        }

        let origin = path.display().to_string();
        let mut lines = BufReader::new(file).lines();

        let header = next_line(&mut lines, &path, 1)?;
        let available = parse_count(&header).ok_or_else(|| {
            CrystalliteError::config(&origin, 1, "unable to read number of crystallites")
        })?;
        let range = CrystalliteRange::resolve(name, from, to, available)?;
        debug!(
            "crystallites ({} - {}): {} of {} in '{}'",
            range.from,
            range.to,
            range.len(),
            available,
            origin
        );

        // Crystallite number k sits on physical line k + 1
        for number in 1..range.from {
            next_line(&mut lines, &path, number + 1)?;
        }

        let mut layout: Option<ColumnLayout> = None;
        let mut crystallites = Vec::with_capacity(range.len());
        for number in range.from..=range.to {
            let line_no = number + 1;
            let line = next_line(&mut lines, &path, line_no)?;
            let values = parse_numbers(&line).map_err(|token| {
                CrystalliteError::config(&origin, line_no, format!("unable to parse '{}' as a number", token))
            })?;
            let record_layout = ColumnLayout::from_columns(values.len()).ok_or_else(|| {
                CrystalliteError::config(
                    &origin,
                    line_no,
                    format!("wrong number of parameters: expected 3 or 4, found {}", values.len()),
                )
            })?;
            match layout {
                None => layout = Some(record_layout),
                Some(expected) if expected != record_layout => {
                    return Err(CrystalliteError::config(
                        &origin,
                        line_no,
                        format!(
                            "wrong number of parameters: expected {} like the first record, found {}",
                            expected.columns(),
                            record_layout.columns()
                        ),
                    ));
                }
                Some(_) => {}
            }

            let crystallite = match record_layout {
                ColumnLayout::AlphaBetaWeight => Crystallite::new(values[0], values[1], 0.0, values[2]),
                ColumnLayout::AlphaBetaGammaWeight => {
                    Crystallite::new(values[0], values[1], values[2], values[3])
                }
            };
            if crystallite.weight == 0.0 {
                return Err(CrystalliteError::config(
                    &origin,
                    line_no,
                    format!("crystallite number {} in '{}' has zero weight", number, name),
                ));
            }
            log_record(verbosity, number, &crystallite);
            crystallites.push(crystallite);
        }

        Ok(OrientationSet::new(crystallites, layout.unwrap_or_default()))
    }
}

fn load_from_table(
    name: &str,
    table: &CatalogTable,
    from: i64,
    to: i64,
    verbosity: Verbosity,
) -> Result<OrientationSet> {
    let range = CrystalliteRange::resolve(name, from, to, table.len())?;
    debug!(
        "crystallites ({} - {}): {} from internal table '{}'",
        range.from,
        range.to,
        range.len(),
        table.name()
    );

    let mut crystallites = Vec::with_capacity(range.len());
    for (offset, &(alpha, beta, weight)) in table.entries()[range.from - 1..range.to].iter().enumerate() {
        let number = range.from + offset;
        if weight == 0.0 {
            return Err(CrystalliteError::config(
                table.name(),
                number,
                format!("crystallite number {} in '{}' has zero weight", number, name),
            ));
        }
        let crystallite = Crystallite::new(alpha, beta, 0.0, weight);
        log_record(verbosity, number, &crystallite);
        crystallites.push(crystallite);
    }

    Ok(OrientationSet::new(crystallites, ColumnLayout::AlphaBetaWeight))
}

fn log_record(verbosity: Verbosity, number: usize, c: &Crystallite) {
    if verbosity.is_verbose() {
        info!(
            "{:5} {:>15} {:>15} {:>15} {:>15}",
            number, c.alpha, c.beta, c.gamma, c.weight
        );
    }
}

/// Leading integer of the header line.
fn parse_count(line: &str) -> Option<usize> {
    line.split_whitespace().next()?.parse().ok()
}

/// All whitespace-separated numbers on a line, or the first token that is not one.
fn parse_numbers(line: &str) -> std::result::Result<Vec<f64>, String> {
    line.split_whitespace()
        .map(|token| token.parse::<f64>().map_err(|_| token.to_string()))
        .collect()
}
