// Nearest-neighbour correspondence between two crystallite grids, memoized on disk
// as `<target>_<source>.map` so that later runs reuse the O(N*M) search.

use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use log::{debug, info, warn};
use tempfile::NamedTempFile;

use crate::config::{MAP_EXTENSION, MAP_SEPARATOR};
use crate::crystallites::{Crystallite, OrientationSet};
use crate::error::{CrystalliteError, Result};
use crate::interfaces::Verbosity;
use crate::mapping::correspondence_map::CorrespondenceMap;
use crate::utils::read_error;

/// 1-based index of the source crystallite closest to `target`, with its distance.
///
/// Scans in ascending order and only replaces the current best on a strictly
/// smaller distance, so ties go to the lowest index. Non-finite distances never
/// win; `None` means no source had a finite distance.
pub fn nearest_source(target: &Crystallite, source: &OrientationSet) -> Option<(usize, f64)> {
    let mut best: Option<(usize, f64)> = None;
    for (offset, candidate) in source.iter().enumerate() {
        let distance = candidate.angular_distance(target);
        if distance < best.map_or(f64::INFINITY, |(_, d)| d) {
            best = Some((offset + 1, distance));
        }
    }
    best
}

fn nearest_or_internal(index: usize, target: &Crystallite, source: &OrientationSet) -> Result<usize> {
    nearest_source(target, source)
        .map(|(j, _)| j)
        .ok_or_else(|| {
            CrystalliteError::Internal(format!(
                "can not find nearest source crystallite for target {}",
                index
            ))
        })
}

/// Compute the target → source map without touching the cache.
pub fn nearest_neighbor_map(source: &OrientationSet, target: &OrientationSet) -> Result<CorrespondenceMap> {
    #[cfg(feature = "parallel")]
    let sources = {
        use rayon::prelude::*;
        target
            .as_slice()
            .par_iter()
            .enumerate()
            .map(|(offset, crystallite)| nearest_or_internal(offset + 1, crystallite, source))
            .collect::<Result<Vec<_>>>()?
    };
    #[cfg(not(feature = "parallel"))]
    let sources = target
        .iter()
        .enumerate()
        .map(|(offset, crystallite)| nearest_or_internal(offset + 1, crystallite, source))
        .collect::<Result<Vec<_>>>()?;

    Ok(CorrespondenceMap::new(sources))
}

/// Builds nearest-neighbour maps and keeps them in a cache directory.
///
/// An existing cache file always wins over recomputation, even if the sets
/// have changed since it was written.
#[derive(Debug, Clone)]
pub struct NearestNeighborMapper {
    cache_dir: PathBuf,
}

impl Default for NearestNeighborMapper {
    fn default() -> Self {
        Self::new(".")
    }
}

impl NearestNeighborMapper {
    pub fn new(cache_dir: impl Into<PathBuf>) -> Self {
        Self {
            cache_dir: cache_dir.into(),
        }
    }

    pub fn cache_dir(&self) -> &Path {
        &self.cache_dir
    }

    /// `<cache_dir>/<target>_<source>.map`
    pub fn cache_path(&self, source_name: &str, target_name: &str) -> PathBuf {
        self.cache_dir.join(format!(
            "{}{}{}.{}",
            target_name, MAP_SEPARATOR, source_name, MAP_EXTENSION
        ))
    }

    pub fn map(
        &self,
        source_name: &str,
        source: &OrientationSet,
        target_name: &str,
        target: &OrientationSet,
        verbosity: Verbosity,
    ) -> Result<CorrespondenceMap> {
        let path = self.cache_path(source_name, target_name);
        match File::open(&path) {
            Ok(file) => {
                if verbosity.is_verbose() {
                    info!("Reading crystallites NEAREST map from file {}", path.display());
                }
                read_cache(&path, file, source.len(), target.len(), verbosity)
            }
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                if verbosity.is_verbose() {
                    info!("Creating crystallites NEAREST map and saving to file {}", path.display());
                }
                let map = nearest_neighbor_map(source, target)?;
                if verbosity.is_verbose() {
                    for (i, j) in map.iter() {
                        info!("{:5} {:5}", i, j);
                    }
                }
                write_cache(&path, &map)?;
                Ok(map)
            }
            Err(err) => Err(CrystalliteError::io(&path, err)),
        }
    }
}

fn read_cache(
    path: &Path,
    file: File,
    source_len: usize,
    target_len: usize,
    verbosity: Verbosity,
) -> Result<CorrespondenceMap> {
    let origin = path.display().to_string();
    let mut sources: Vec<Option<usize>> = vec![None; target_len];
    let mut lines = BufReader::new(file).lines();

    for line_no in 1..=target_len {
        let line = match lines.next() {
            Some(Ok(line)) => line,
            Some(Err(source)) => return Err(read_error(path, line_no, source)),
            None => {
                return Err(CrystalliteError::config(
                    &origin,
                    line_no,
                    format!("map ends after {} of {} entries", line_no - 1, target_len),
                ))
            }
        };
        let (target_index, source_index) = parse_pair(&line).ok_or_else(|| {
            CrystalliteError::config(&origin, line_no, "can not read 2 integers")
        })?;
        if target_index == 0 || target_index > target_len {
            return Err(CrystalliteError::config(
                &origin,
                line_no,
                format!("target index {} outside 1..={}", target_index, target_len),
            ));
        }
        if source_index == 0 || source_index > source_len {
            return Err(CrystalliteError::config(
                &origin,
                line_no,
                format!("source index {} outside 1..={}", source_index, source_len),
            ));
        }
        sources[target_index - 1] = Some(source_index);
        if verbosity.is_verbose() {
            info!("{:5} {:5}", target_index, source_index);
        }
    }

    let trailing = lines
        .map_while(|line| line.ok())
        .filter(|line| !line.trim().is_empty())
        .count();
    if trailing > 0 {
        warn!(
            "ignoring {} lines in '{}' after the {} expected entries",
            trailing, origin, target_len
        );
    }

    let sources = sources
        .into_iter()
        .enumerate()
        .map(|(offset, entry)| {
            entry.ok_or_else(|| {
                CrystalliteError::config_file(
                    &origin,
                    format!("target crystallite {} is missing from the map", offset + 1),
                )
            })
        })
        .collect::<Result<Vec<_>>>()?;
    debug!("read {} map entries from '{}'", sources.len(), origin);
    Ok(CorrespondenceMap::new(sources))
}

fn parse_pair(line: &str) -> Option<(usize, usize)> {
    let mut tokens = line.split_whitespace();
    let target = tokens.next()?.parse().ok()?;
    let source = tokens.next()?.parse().ok()?;
    Some((target, source))
}

/// Write through a temporary file in the same directory and rename, so readers
/// never see a partial map.
fn write_cache(path: &Path, map: &CorrespondenceMap) -> Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut temp = NamedTempFile::new_in(dir).map_err(|source| CrystalliteError::io(dir, source))?;
    {
        let mut writer = BufWriter::new(temp.as_file_mut());
        map.write_pairs(&mut writer)
            .and_then(|_| writer.flush())
            .map_err(|source| CrystalliteError::io(path, source))?;
    }
    temp.persist(path)
        .map_err(|err| CrystalliteError::io(path, err.error))?;
    debug!("wrote {} map entries to '{}'", map.len(), path.display());
    Ok(())
}
