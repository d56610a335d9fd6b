use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use std::fs;
use std::path::{Path, PathBuf};

pub fn write_bytes(root: &Path, rel_path: &str, bytes: &[u8]) -> Result<PathBuf> {
    let path = root.join(rel_path);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).with_context(|| format!("create {}", parent.display()))?;
    }
    fs::write(&path, bytes).with_context(|| format!("write {}", path.display()))?;
    Ok(path)
}

pub fn write_text(root: &Path, rel_path: &str, text: &str) -> Result<PathBuf> {
    write_bytes(root, rel_path, text.as_bytes())
}

pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let bytes = fs::read(path).with_context(|| format!("read {}", path.display()))?;
    serde_json::from_slice(&bytes).with_context(|| format!("parse {}", path.display()))
}

/// Read a JSON document, treating a missing file as the type's default.
pub fn read_json_or_default<T: DeserializeOwned + Default>(path: &Path) -> Result<T> {
    if !path.exists() {
        tracing::debug!(path = %path.display(), "optional input missing");
        return Ok(T::default());
    }
    read_json(path)
}

/// Files under `root`, recursively, in sorted order.
pub fn collect_files_recursive(root: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    if !root.exists() {
        return Ok(files);
    }
    for entry in fs::read_dir(root).with_context(|| format!("read {}", root.display()))? {
        let entry = entry?;
        let path = entry.path();
        if path.is_dir() {
            files.extend(collect_files_recursive(&path)?);
        } else if path.is_file() {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn write_text_creates_parent_directories() {
        let temp = tempfile::tempdir().expect("create temp dir");
        let written = write_text(temp.path(), "a/b/c.txt", "hello").expect("write text");
        assert_eq!(written, temp.path().join("a/b/c.txt"));
        assert_eq!(fs::read_to_string(&written).expect("read back"), "hello");
    }

    #[test]
    fn collect_files_recursive_is_sorted_and_skips_missing_roots() {
        let temp = tempfile::tempdir().expect("create temp dir");
        write_text(temp.path(), "b/2.js", "").expect("write");
        write_text(temp.path(), "a/1.js", "").expect("write");
        write_text(temp.path(), "a/z/0.js", "").expect("write");

        let files = collect_files_recursive(temp.path()).expect("collect");
        let rel: Vec<_> = files
            .iter()
            .map(|path| path.strip_prefix(temp.path()).expect("prefix").to_path_buf())
            .collect();
        assert_eq!(
            rel,
            vec![
                PathBuf::from("a/1.js"),
                PathBuf::from("a/z/0.js"),
                PathBuf::from("b/2.js")
            ]
        );

        let missing = collect_files_recursive(&temp.path().join("nope")).expect("collect");
        assert!(missing.is_empty());
    }

    #[test]
    fn read_json_or_default_handles_missing_and_invalid_files() {
        let temp = tempfile::tempdir().expect("create temp dir");
        let missing: Vec<String> =
            read_json_or_default(&temp.path().join("missing.json")).expect("missing is default");
        assert!(missing.is_empty());

        let bad = write_text(temp.path(), "bad.json", "{not json").expect("write");
        let err = read_json_or_default::<Vec<String>>(&bad).expect_err("invalid json");
        assert!(err.to_string().contains("parse"));
    }

    #[test]
    fn read_json_requires_the_file() {
        let temp = tempfile::tempdir().expect("create temp dir");
        let err = read_json::<Vec<String>>(&temp.path().join("missing.json"))
            .expect_err("missing file");
        assert!(err.to_string().contains("read"));

        let path = write_text(temp.path(), "list.json", r#"["a", "b"]"#).expect("write");
        let list: Vec<String> = read_json(&path).expect("read list");
        assert_eq!(list, vec!["a".to_string(), "b".to_string()]);
    }
}
