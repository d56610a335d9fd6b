//! Discover assets in a deployed static tree.
//!
//! Layout: `<area>/<vendor>/<theme>/<locale>/<rest>`. A `Vendor_Module` first
//! segment in `<rest>` names the owning module; anything else is a library file.
use super::{Asset, BundleContext, CONTENT_TYPE_JS};
use crate::fsio::collect_files_recursive;
use anyhow::{Context, Result};
use regex::Regex;
use std::path::{Component, Path};
use std::sync::OnceLock;

fn module_regex() -> &'static Regex {
    static MODULE_RE: OnceLock<Regex> = OnceLock::new();
    MODULE_RE.get_or_init(|| {
        Regex::new(r"^[A-Z][A-Za-z0-9]*_[A-Za-z0-9]+$").expect("module pattern compiles")
    })
}

/// `bundle<N>.js` / `lib-bundle<N>.js` written next to a locale by a previous run.
fn bundle_output_regex() -> &'static Regex {
    static OUTPUT_RE: OnceLock<Regex> = OnceLock::new();
    OUTPUT_RE.get_or_init(|| {
        Regex::new(r"^(?:lib-)?bundle[0-9]+\.js$").expect("bundle output pattern compiles")
    })
}

/// An asset paired with the context it was deployed under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveredAsset {
    pub asset: Asset,
    pub context: BundleContext,
}

/// Split a path relative to the static root into its context and asset path.
/// Bundle files written by an earlier run are not assets.
pub fn classify(rel_path: &Path) -> Option<(BundleContext, String)> {
    let segments: Vec<&str> = rel_path
        .components()
        .map(|component| match component {
            Component::Normal(segment) => segment.to_str(),
            _ => None,
        })
        .collect::<Option<Vec<_>>>()?;
    let [area, vendor, theme, locale, rest @ ..] = segments.as_slice() else {
        return None;
    };
    if rest.is_empty() {
        return None;
    }
    if rest.len() == 1 && bundle_output_regex().is_match(rest[0]) {
        return None;
    }
    let module = if rest.len() > 1 && module_regex().is_match(rest[0]) {
        rest[0].to_string()
    } else {
        String::new()
    };
    let context = BundleContext {
        area: (*area).to_string(),
        theme: format!("{vendor}/{theme}"),
        locale: (*locale).to_string(),
        module,
    };
    Some((context, rest.join("/")))
}

/// Every asset under `root`, sorted by path. Only script content is read.
pub fn discover_assets(root: &Path) -> Result<Vec<DiscoveredAsset>> {
    let mut discovered = Vec::new();
    for path in collect_files_recursive(root)? {
        let rel = path.strip_prefix(root).context("strip static root prefix")?;
        let Some((context, file_path)) = classify(rel) else {
            tracing::debug!(path = %rel.display(), "outside area/theme/locale layout");
            continue;
        };
        let content_type = path
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or("")
            .to_ascii_lowercase();
        let content = if content_type == CONTENT_TYPE_JS {
            let bytes =
                std::fs::read(&path).with_context(|| format!("read {}", path.display()))?;
            String::from_utf8_lossy(&bytes).into_owned()
        } else {
            String::new()
        };
        discovered.push(DiscoveredAsset {
            asset: Asset {
                content_type,
                file_path,
                content,
            },
            context,
        });
    }
    Ok(discovered)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fsio::write_text;

    #[test]
    fn classify_separates_module_and_library_assets() {
        let (context, file_path) =
            classify(Path::new("frontend/Magento/luma/en_US/Magento_Catalog/js/gallery.js"))
                .expect("module asset");
        assert_eq!(context.area, "frontend");
        assert_eq!(context.theme, "Magento/luma");
        assert_eq!(context.locale, "en_US");
        assert_eq!(context.module, "Magento_Catalog");
        assert_eq!(file_path, "Magento_Catalog/js/gallery.js");

        let (context, file_path) =
            classify(Path::new("frontend/Magento/luma/en_US/jquery/ui.js")).expect("lib asset");
        assert_eq!(context.module, "");
        assert_eq!(file_path, "jquery/ui.js");
    }

    #[test]
    fn classify_treats_top_level_module_like_files_as_library() {
        let (context, _) =
            classify(Path::new("adminhtml/Magento/backend/en_US/Some_File")).expect("lib file");
        assert_eq!(context.module, "");
    }

    #[test]
    fn classify_rejects_paths_outside_the_layout() {
        assert_eq!(classify(Path::new("frontend/Magento/luma/en_US")), None);
        assert_eq!(classify(Path::new("frontend/Magento/luma/en_US/bundle0.js")), None);
        assert_eq!(classify(Path::new("frontend/Magento/luma/en_US/lib-bundle12.js")), None);
        assert!(classify(Path::new("frontend/Magento/luma/en_US/js/bundle0.js")).is_some());
        assert!(classify(Path::new("frontend/Magento/luma/en_US/bundle.js")).is_some());
        assert_eq!(classify(Path::new("deployed_version.txt")), None);
    }

    #[test]
    fn discover_reads_scripts_and_skips_other_content() {
        let temp = tempfile::tempdir().expect("create temp dir");
        let root = temp.path();
        write_text(root, "frontend/Vendor/theme/en_US/Vendor_Mod/js/a.js", "define([], 1);")
            .expect("write");
        write_text(root, "frontend/Vendor/theme/en_US/css/styles.css", "body {}").expect("write");
        write_text(root, "deployed_version.txt", "1").expect("write");

        let discovered = discover_assets(root).expect("discover");
        assert_eq!(discovered.len(), 2);
        let js = &discovered[0];
        assert_eq!(js.asset.file_path, "Vendor_Mod/js/a.js");
        assert_eq!(js.asset.content, "define([], 1);");
        assert_eq!(js.context.module, "Vendor_Mod");
        let css = &discovered[1];
        assert_eq!(css.asset.content_type, "css");
        assert!(css.asset.content.is_empty());
    }
}
