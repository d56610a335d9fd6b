//! A single bundle: accumulated assets and their serialized parts.
use super::Asset;
use anyhow::{Context, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bundle {
    path: String,
    assets: Vec<Asset>,
}

impl Bundle {
    pub fn new(path: String) -> Self {
        Self {
            path,
            assets: Vec::new(),
        }
    }

    /// Output path without the part index or extension, e.g. `frontend/Vendor/theme/en_US/bundle`.
    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn assets(&self) -> &[Asset] {
        &self.assets
    }

    pub fn add_asset(&mut self, asset: Asset) {
        self.assets.push(asset);
    }

    /// Group assets, in order, into parts of at most `part_size` content bytes.
    /// An asset larger than the limit gets a part to itself.
    pub fn parts(&self, part_size: usize) -> Vec<&[Asset]> {
        let mut parts = Vec::new();
        let mut start = 0;
        let mut size = 0usize;
        for (index, asset) in self.assets.iter().enumerate() {
            let len = asset.content.len();
            if index > start && size.saturating_add(len) > part_size {
                parts.push(&self.assets[start..index]);
                start = index;
                size = 0;
            }
            size = size.saturating_add(len);
        }
        if start < self.assets.len() {
            parts.push(&self.assets[start..]);
        }
        parts
    }

    /// Serialized JavaScript for each part, in part order.
    pub fn content(&self, part_size: usize) -> Result<Vec<String>> {
        self.parts(part_size)
            .into_iter()
            .map(render_part)
            .collect()
    }
}

/// Wrap a part as a RequireJS preload map keyed by asset path.
fn render_part(assets: &[Asset]) -> Result<String> {
    let mut entries = Vec::with_capacity(assets.len());
    for asset in assets {
        let key = serde_json::to_string(&asset.file_path).context("encode asset path")?;
        let value = serde_json::to_string(&asset.content)
            .with_context(|| format!("encode asset {}", asset.file_path))?;
        entries.push(format!("{key}: {value}"));
    }
    Ok(format!(
        "require.config({{\"config\": {{\"jsbuild\": {{{}}}}}}});\n",
        entries.join(",\n")
    ))
}
