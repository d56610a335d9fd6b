//! Known configuration fields and their sensitivity.
use super::tree::normalize_path;
use crate::fsio::read_json_or_default;
use anyhow::Result;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;

pub const MASKED_VALUE: &str = "******";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ConfigField {
    pub path: String,
    #[serde(default)]
    pub sensitive: bool,
}

#[derive(Debug, Default, Deserialize)]
struct StructureFile {
    #[serde(default)]
    fields: Vec<ConfigField>,
}

/// Field paths a caller may ask for.
///
/// An empty structure declares nothing, so every path is accepted and no
/// value is masked.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigStructure {
    fields: BTreeMap<String, bool>,
}

impl ConfigStructure {
    pub fn from_fields<I: IntoIterator<Item = ConfigField>>(fields: I) -> Self {
        let fields = fields
            .into_iter()
            .map(|field| (normalize_path(&field.path), field.sensitive))
            .collect();
        Self { fields }
    }

    pub fn load(path: &Path) -> Result<Self> {
        let file: StructureFile = read_json_or_default(path)?;
        Ok(Self::from_fields(file.fields))
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// A path is known when it names a field or a section/group above one.
    pub fn is_known(&self, path: &str) -> bool {
        let path = normalize_path(path);
        if self.is_empty() || self.fields.contains_key(&path) {
            return true;
        }
        let prefix = format!("{path}/");
        self.fields.keys().any(|field| field.starts_with(&prefix))
    }

    pub fn is_sensitive(&self, path: &str) -> bool {
        self.fields
            .get(&normalize_path(path))
            .copied()
            .unwrap_or(false)
    }

    /// The value to display for `path`.
    pub fn display_value<'a>(&self, path: &str, value: &'a str) -> &'a str {
        if self.is_sensitive(path) {
            MASKED_VALUE
        } else {
            value
        }
    }
}
