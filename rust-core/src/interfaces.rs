// Definitions that are used throughout all modules

use serde::{Deserialize, Serialize};

// Controls whether loaders emit per-record diagnostics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Verbosity {
    #[default]
    Quiet,
    Powder,
}

impl Verbosity {
    pub fn is_verbose(&self) -> bool {
        matches!(self, Verbosity::Powder)
    }
}

impl From<bool> for Verbosity {
    fn from(verbose: bool) -> Self {
        if verbose {
            Verbosity::Powder
        } else {
            Verbosity::Quiet
        }
    }
}

// Column layout of a crystallite source: `alpha beta weight` or `alpha beta gamma weight`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ColumnLayout {
    #[default]
    AlphaBetaWeight,
    AlphaBetaGammaWeight,
}

impl ColumnLayout {
    pub fn from_columns(columns: usize) -> Option<Self> {
        match columns {
            3 => Some(ColumnLayout::AlphaBetaWeight),
            4 => Some(ColumnLayout::AlphaBetaGammaWeight),
            _ => None,
        }
    }

    pub fn columns(&self) -> usize {
        match self {
            ColumnLayout::AlphaBetaWeight => 3,
            ColumnLayout::AlphaBetaGammaWeight => 4,
        }
    }
}
