use std::io::{self, Write};

use serde::{Deserialize, Serialize};

/// Map from every target crystallite to its nearest source crystallite.
///
/// Both sides use 1-based indices, the numbering written to `.map` files.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CorrespondenceMap {
    sources: Vec<usize>,
}

impl CorrespondenceMap {
    /// `sources[i]` is the source index for target `i + 1`.
    pub fn new(sources: Vec<usize>) -> Self {
        Self { sources }
    }

    pub fn len(&self) -> usize {
        self.sources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }

    /// Source index for a 1-based target index.
    pub fn source_for(&self, target: usize) -> Option<usize> {
        target.checked_sub(1).and_then(|i| self.sources.get(i).copied())
    }

    /// `(target, source)` pairs in target order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.sources
            .iter()
            .enumerate()
            .map(|(offset, &source)| (offset + 1, source))
    }

    pub fn as_slice(&self) -> &[usize] {
        &self.sources
    }

    /// Write one `target source` line per entry.
    pub fn write_pairs<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        for (target, source) in self.iter() {
            writeln!(writer, "{} {}", target, source)?;
        }
        Ok(())
    }
}
