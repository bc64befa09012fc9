use crate::error::{ConvertError, Result};
use crate::topology::Mode;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Records between progress reports unless configured otherwise.
pub const DEFAULT_PROGRESS_INTERVAL: usize = 10_000_000;

/// Settings for one conversion run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConvertConfig {
    pub mode: Mode,
    /// Drop isolated vertices and compact identifiers
    pub renumber: bool,
    /// Merge parallel edges
    pub clean: bool,
    /// Records (or vertices) between progress reports; 0 disables them
    pub progress_interval: usize,
}

impl Default for ConvertConfig {
    fn default() -> Self {
        Self {
            mode: Mode::Unweighted,
            renumber: true,
            clean: true,
            progress_interval: DEFAULT_PROGRESS_INTERVAL,
        }
    }
}

impl ConvertConfig {
    pub fn weighted() -> Self {
        Self {
            mode: Mode::Weighted,
            ..Self::default()
        }
    }

    pub fn from_json_file(path: &Path) -> Result<Self> {
        let content =
            std::fs::read_to_string(path).map_err(|e| ConvertError::open(path, e))?;
        Ok(serde_json::from_str(&content)?)
    }
}
