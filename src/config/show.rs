//! `config:show`: validate a scope and path, then render resolved values.
use super::error::ConfigShowError;
use super::paths::StoreRootPaths;
use super::scope::{resolve_scope, StoreRegistry};
use super::sources::ConfigSources;
use super::structure::ConfigStructure;
use super::tree::{normalize_path, ConfigNode};
use anyhow::Result;

#[derive(Debug, Clone, Copy)]
pub struct ShowRequest<'a> {
    pub path: &'a str,
    pub scope: &'a str,
    pub scope_code: Option<&'a str>,
}

pub struct ConfigShow {
    sources: ConfigSources,
    structure: ConfigStructure,
    registry: StoreRegistry,
}

impl ConfigShow {
    pub fn new(sources: ConfigSources, structure: ConfigStructure, registry: StoreRegistry) -> Self {
        Self {
            sources,
            structure,
            registry,
        }
    }

    /// Load sources, structure, and registry from a store root.
    pub fn load<I>(paths: &StoreRootPaths, env_vars: I) -> Result<Self>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        tracing::debug!(root = %paths.root().display(), "loading store config");
        let sources = ConfigSources::load(paths, env_vars)?;
        let structure = ConfigStructure::load(&paths.structure_path())?;
        let registry = StoreRegistry::load(&paths.stores_path())?;
        Ok(Self::new(sources, structure, registry))
    }

    /// Output lines for a request: the bare value for a leaf, otherwise one
    /// `path - value` line per leaf below the requested path.
    pub fn show(&self, request: &ShowRequest<'_>) -> Result<Vec<String>, ConfigShowError> {
        let path = request.path.trim_matches('/');
        let scope = resolve_scope(request.scope, request.scope_code, &self.registry)?;
        if !path.is_empty() && !self.structure.is_known(path) {
            return Err(ConfigShowError::UnknownPath(path.to_string()));
        }

        let key = normalize_path(path);
        let tree = self.sources.resolve(&scope);
        let leaves = if key.is_empty() {
            tree.leaves("")
        } else {
            match tree.get(&key) {
                Some(ConfigNode::Value(value)) => {
                    return Ok(vec![self.structure.display_value(path, value).to_string()]);
                }
                Some(ConfigNode::Branch(subtree)) => subtree.leaves(&key),
                None => Vec::new(),
            }
        };
        if leaves.is_empty() {
            return Err(ConfigShowError::MissingValue(path.to_string()));
        }
        tracing::debug!(path, count = leaves.len(), "resolved config subtree");
        Ok(leaves
            .iter()
            .map(|(leaf_path, value)| {
                format!(
                    "{leaf_path} - {}",
                    self.structure.display_value(leaf_path, value)
                )
            })
            .collect())
    }
}

#[cfg(test)]
#[path = "show_tests.rs"]
mod tests;
