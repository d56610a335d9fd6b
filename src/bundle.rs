//! Static asset bundling.
//!
//! AMD scripts are grouped by area, theme, and locale into a module bundle
//! and a library bundle, then written out as numbered part files.
use anyhow::{Context, Result};
use regex::Regex;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

pub mod config;
pub mod discover;
pub mod part;

pub use config::BundleConfig;
pub use part::Bundle;

pub const CONTENT_TYPE_JS: &str = "js";
const LIB_BUNDLE_NAME: &str = "lib-bundle";
const MODULE_BUNDLE_NAME: &str = "bundle";

fn amd_regex() -> &'static Regex {
    static AMD_RE: OnceLock<Regex> = OnceLock::new();
    AMD_RE.get_or_init(|| Regex::new(r"\Wdefine\s*\(").expect("amd pattern compiles"))
}

/// A deployed static file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Asset {
    /// File extension, e.g. `js`, `css`.
    pub content_type: String,
    /// Path within the locale directory, e.g. `Vendor_Module/js/widget.js`.
    pub file_path: String,
    pub content: String,
}

impl Asset {
    /// Directory part of `file_path`; empty for top-level files.
    pub fn directory(&self) -> &str {
        self.file_path
            .rsplit_once('/')
            .map(|(dir, _)| dir)
            .unwrap_or("")
    }
}

/// Where an asset was deployed. An empty `module` marks a library asset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BundleContext {
    pub area: String,
    pub theme: String,
    pub locale: String,
    pub module: String,
}

impl BundleContext {
    pub fn bundle_path(&self) -> String {
        let name = if self.module.is_empty() {
            LIB_BUNDLE_NAME
        } else {
            MODULE_BUNDLE_NAME
        };
        format!("{}/{}/{}/{name}", self.area, self.theme, self.locale)
    }
}

/// Content heuristic for AMD modules: a `define(` call preceded by a non-word character.
pub fn is_amd(asset: &Asset) -> bool {
    amd_regex().is_match(&asset.content)
}

/// Collects assets into bundles keyed by bundle path.
#[derive(Debug, Default)]
pub struct BundleService {
    config: BundleConfig,
    bundles: BTreeMap<String, Bundle>,
}

impl BundleService {
    pub fn new(config: BundleConfig) -> Self {
        Self {
            config,
            bundles: BTreeMap::new(),
        }
    }

    /// Listed verbatim for the area, or inside an excluded directory fragment.
    pub fn is_excluded(&self, area: &str, asset: &Asset) -> bool {
        if self
            .config
            .excluded_files(area)
            .iter()
            .any(|file| file == &asset.file_path)
        {
            return true;
        }
        let directory = asset.directory();
        self.config
            .excluded_dirs(area)
            .iter()
            .any(|dir| directory.contains(dir.as_str()))
    }

    fn is_valid_asset(&self, asset: &Asset, context: &BundleContext) -> bool {
        asset.content_type == CONTENT_TYPE_JS
            && !self.is_excluded(&context.area, asset)
            && is_amd(asset)
    }

    /// Add an eligible asset to its bundle; returns whether it was accepted.
    pub fn collect(&mut self, asset: Asset, context: &BundleContext) -> bool {
        if !self.is_valid_asset(&asset, context) {
            tracing::debug!(path = %asset.file_path, area = %context.area, "asset not bundled");
            return false;
        }
        let bundle_path = context.bundle_path();
        self.bundles
            .entry(bundle_path.clone())
            .or_insert_with(|| Bundle::new(bundle_path))
            .add_asset(asset);
        true
    }

    pub fn bundles(&self) -> impl Iterator<Item = &Bundle> {
        self.bundles.values()
    }

    /// Write every part of every bundle as `<static_dir>/<bundle path><index>.js`.
    pub fn save_bundles(&self, static_dir: &Path) -> Result<Vec<PathBuf>> {
        let part_size = self.config.part_size_bytes();
        let mut written = Vec::new();
        for bundle in self.bundles.values() {
            let parts = bundle
                .content(part_size)
                .with_context(|| format!("render bundle {}", bundle.path()))?;
            for (index, part) in parts.iter().enumerate() {
                let rel = format!("{}{index}.js", bundle.path());
                let path = crate::fsio::write_text(static_dir, &rel, part)?;
                written.push(path);
            }
            tracing::info!(
                bundle = bundle.path(),
                assets = bundle.assets().len(),
                parts = parts.len(),
                "bundle saved"
            );
        }
        Ok(written)
    }
}

#[cfg(test)]
#[path = "bundle_tests.rs"]
mod tests;
