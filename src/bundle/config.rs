//! Bundle configuration: part size and per-area exclusions.
use anyhow::{anyhow, Result};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;

pub const DEFAULT_PART_SIZE_KB: u64 = 1024;

fn default_part_size_kb() -> u64 {
    DEFAULT_PART_SIZE_KB
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct AreaExclusions {
    /// Asset paths excluded verbatim.
    #[serde(default)]
    pub excluded_files: Vec<String>,
    /// Directory fragments; an asset whose directory contains one is excluded.
    #[serde(default)]
    pub excluded_dirs: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct BundleConfig {
    #[serde(default = "default_part_size_kb")]
    pub part_size_kb: u64,
    #[serde(default)]
    pub areas: BTreeMap<String, AreaExclusions>,
}

impl Default for BundleConfig {
    fn default() -> Self {
        Self {
            part_size_kb: DEFAULT_PART_SIZE_KB,
            areas: BTreeMap::new(),
        }
    }
}

impl BundleConfig {
    /// Load and validate a config file; a missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let config: BundleConfig = crate::fsio::read_json_or_default(path)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.part_size_kb == 0 {
            return Err(anyhow!("part_size_kb must be greater than zero"));
        }
        for (area, exclusions) in &self.areas {
            if exclusions.excluded_dirs.iter().any(|dir| dir.is_empty()) {
                return Err(anyhow!(
                    "excluded_dirs for area {area:?} must not contain empty entries"
                ));
            }
        }
        Ok(())
    }

    pub fn part_size_bytes(&self) -> usize {
        usize::try_from(self.part_size_kb.saturating_mul(1024)).unwrap_or(usize::MAX)
    }

    pub fn excluded_files(&self, area: &str) -> &[String] {
        self.areas
            .get(area)
            .map(|exclusions| exclusions.excluded_files.as_slice())
            .unwrap_or_default()
    }

    pub fn excluded_dirs(&self, area: &str) -> &[String] {
        self.areas
            .get(area)
            .map(|exclusions| exclusions.excluded_dirs.as_slice())
            .unwrap_or_default()
    }
}
