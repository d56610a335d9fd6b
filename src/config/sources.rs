//! Config sources and their priority merge.
//!
//! Each source yields one tree per scope key. Sources are layered from lowest
//! to highest priority: stored rows, shared deployment config, local
//! deployment config, then `CONFIG__*` environment variables.
use super::paths::StoreRootPaths;
use super::scope::{ResolvedScope, ScopeKey, ScopeType};
use super::tree::{path_segments, ConfigTree};
use crate::fsio::read_json_or_default;
use anyhow::Result;
use serde::Deserialize;
use serde_json::Value;
use std::collections::BTreeMap;

pub const ENV_PREFIX: &str = "CONFIG__";
const ENV_SEPARATOR: &str = "__";
const SYSTEM_SECTION: &str = "system";

/// One stored config row from `db/config_data.json`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ConfigRow {
    pub scope: String,
    #[serde(default)]
    pub scope_code: Option<String>,
    pub path: String,
    pub value: String,
}

/// Config trees from a single source, keyed by scope.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceLayer {
    name: &'static str,
    scopes: BTreeMap<ScopeKey, ConfigTree>,
}

impl SourceLayer {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            scopes: BTreeMap::new(),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn tree(&self, key: &ScopeKey) -> Option<&ConfigTree> {
        self.scopes.get(key)
    }

    pub fn set(&mut self, key: ScopeKey, path: &str, value: impl Into<String>) {
        self.scopes.entry(key).or_default().set(path, value);
    }

    /// Read the `system` section of a deployment config document:
    /// `{"default": {...}, "websites": {code: {...}}, "stores": {code: {...}}}`.
    pub fn from_deployment_config(name: &'static str, document: &Value) -> Self {
        let mut layer = Self::new(name);
        let Some(Value::Object(system)) = document.get(SYSTEM_SECTION) else {
            return layer;
        };
        for (scope_name, body) in system {
            match ScopeType::parse(scope_name) {
                Some(ScopeType::Default) => layer.insert_tree(ScopeKey::Default, body),
                Some(scope @ (ScopeType::Websites | ScopeType::Stores)) => {
                    let Value::Object(codes) = body else {
                        continue;
                    };
                    for (code, tree) in codes {
                        if let Some(key) = ScopeKey::new(scope, Some(code)) {
                            layer.insert_tree(key, tree);
                        }
                    }
                }
                None => {
                    tracing::warn!(source = name, scope = %scope_name, "ignoring unknown scope");
                }
            }
        }
        layer
    }

    pub fn from_rows(name: &'static str, rows: &[ConfigRow]) -> Self {
        let mut layer = Self::new(name);
        for row in rows {
            let key = ScopeType::parse(&row.scope)
                .and_then(|scope| ScopeKey::new(scope, row.scope_code.as_deref()));
            match key {
                Some(key) => layer.set(key, &row.path, row.value.clone()),
                None => tracing::warn!(
                    source = name,
                    scope = %row.scope,
                    path = %row.path,
                    "ignoring config row with unusable scope"
                ),
            }
        }
        layer
    }

    /// Collect `CONFIG__<SCOPE>[__<CODE>]__<PATH>` variables.
    pub fn from_env_vars<I>(name: &'static str, vars: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut layer = Self::new(name);
        for (var, value) in vars {
            let Some(path) = env_var_to_path(&var) else {
                continue;
            };
            match split_scoped_path(&path) {
                Some((key, config_path)) => {
                    tracing::debug!(var = %var, scope = %key, path = %config_path, "env override");
                    layer.set(key, &config_path, value);
                }
                None => tracing::debug!(var = %var, "env variable does not name a scope"),
            }
        }
        layer
    }

    fn insert_tree(&mut self, key: ScopeKey, body: &Value) {
        let tree = ConfigTree::from_json(body);
        if !tree.is_empty() {
            self.scopes.entry(key).or_default().overlay(&tree);
        }
    }
}

/// Map `CONFIG__WEBSITES__BASE__WEB__TEST__VALUE` to `websites/base/web/test/value`.
pub fn env_var_to_path(name: &str) -> Option<String> {
    let rest = name.strip_prefix(ENV_PREFIX)?;
    let well_formed = !rest.is_empty()
        && rest
            .chars()
            .all(|ch| ch.is_ascii_uppercase() || ch.is_ascii_digit() || ch == '_');
    if !well_formed {
        return None;
    }
    Some(rest.replace(ENV_SEPARATOR, "/").to_ascii_lowercase())
}

/// Split `default/<path>` or `<scope>/<code>/<path>` into a scope key and path.
pub fn split_scoped_path(path: &str) -> Option<(ScopeKey, String)> {
    let mut segments = path_segments(path);
    let scope = ScopeType::parse(segments.next()?)?;
    let code = match scope {
        ScopeType::Default => None,
        ScopeType::Websites | ScopeType::Stores => Some(segments.next()?),
    };
    let key = ScopeKey::new(scope, code)?;
    let rest: Vec<&str> = segments.collect();
    if rest.is_empty() {
        return None;
    }
    Some((key, rest.join("/")))
}

/// All sources for one store root, lowest priority first.
#[derive(Debug, Clone, Default)]
pub struct ConfigSources {
    layers: Vec<SourceLayer>,
}

impl ConfigSources {
    pub fn new(layers: Vec<SourceLayer>) -> Self {
        Self { layers }
    }

    /// Load every file-backed source under `paths` plus the given env vars.
    pub fn load<I>(paths: &StoreRootPaths, env_vars: I) -> Result<Self>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let rows: Vec<ConfigRow> = read_json_or_default(&paths.config_data_path())?;
        let shared: Value = read_json_or_default(&paths.shared_config_path())?;
        let local: Value = read_json_or_default(&paths.env_config_path())?;
        Ok(Self::new(vec![
            SourceLayer::from_rows("database", &rows),
            SourceLayer::from_deployment_config("config.json", &shared),
            SourceLayer::from_deployment_config("env.json", &local),
            SourceLayer::from_env_vars("environment", env_vars),
        ]))
    }

    /// One scope's tree with all sources applied by priority.
    pub fn merged(&self, key: &ScopeKey) -> ConfigTree {
        let mut tree = ConfigTree::new();
        for layer in &self.layers {
            if let Some(layer_tree) = layer.tree(key) {
                tracing::debug!(source = layer.name(), scope = %key, "applying source");
                tree.overlay(layer_tree);
            }
        }
        tree
    }

    /// The effective tree for a scope, with default and website fallback.
    pub fn resolve(&self, scope: &ResolvedScope) -> ConfigTree {
        let mut tree = ConfigTree::new();
        for key in scope.fallback_chain() {
            tree.overlay(&self.merged(&key));
        }
        tree
    }
}

#[cfg(test)]
#[path = "sources_tests.rs"]
mod tests;
