//! Nested configuration tree addressed by slash-separated paths.
use serde_json::Value;
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigNode {
    Value(String),
    Branch(ConfigTree),
}

/// Segment-keyed tree; iteration order is sorted by segment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigTree {
    children: BTreeMap<String, ConfigNode>,
}

pub fn path_segments(path: &str) -> impl Iterator<Item = &str> {
    path.split('/').filter(|segment| !segment.is_empty())
}

/// Config paths are case-insensitive; keys are stored lowercased.
fn segment_key(segment: &str) -> String {
    segment.to_ascii_lowercase()
}

/// `path` in stored form: lowercase, no empty or edge slashes.
pub fn normalize_path(path: &str) -> String {
    path_segments(path)
        .map(segment_key)
        .collect::<Vec<_>>()
        .join("/")
}

impl ConfigTree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// Build a tree from a JSON object. Scalars become values and nulls are
    /// dropped; arrays have no config meaning and are skipped.
    pub fn from_json(value: &Value) -> Self {
        let mut tree = Self::new();
        let Value::Object(map) = value else {
            return tree;
        };
        for (key, child) in map {
            let key = segment_key(key);
            match child {
                Value::Null => {}
                Value::String(text) => {
                    tree.children.insert(key, ConfigNode::Value(text.clone()));
                }
                Value::Bool(flag) => {
                    let text = if *flag { "1" } else { "0" };
                    tree.children.insert(key, ConfigNode::Value(text.to_string()));
                }
                Value::Number(number) => {
                    tree.children.insert(key, ConfigNode::Value(number.to_string()));
                }
                Value::Object(_) => {
                    let subtree = Self::from_json(child);
                    if !subtree.is_empty() {
                        tree.children.insert(key, ConfigNode::Branch(subtree));
                    }
                }
                Value::Array(_) => {
                    tracing::debug!(key = %key, "skipping array config value");
                }
            }
        }
        tree
    }

    /// Set a leaf, replacing any value or branch already at that path.
    pub fn set(&mut self, path: &str, value: impl Into<String>) {
        let segments: Vec<&str> = path_segments(path).collect();
        let Some((last, parents)) = segments.split_last() else {
            return;
        };
        let mut node = self;
        for segment in parents {
            let entry = node
                .children
                .entry(segment_key(segment))
                .or_insert_with(|| ConfigNode::Branch(ConfigTree::new()));
            if !matches!(entry, ConfigNode::Branch(_)) {
                *entry = ConfigNode::Branch(ConfigTree::new());
            }
            let ConfigNode::Branch(tree) = entry else {
                return;
            };
            node = tree;
        }
        node.children
            .insert(segment_key(last), ConfigNode::Value(value.into()));
    }

    pub fn get(&self, path: &str) -> Option<&ConfigNode> {
        let mut segments = path_segments(path);
        let first = segments.next()?;
        let mut node = self.children.get(&segment_key(first))?;
        for segment in segments {
            match node {
                ConfigNode::Branch(tree) => node = tree.children.get(&segment_key(segment))?,
                ConfigNode::Value(_) => return None,
            }
        }
        Some(node)
    }

    /// Merge `other` into `self`; `other` wins on conflicts.
    pub fn overlay(&mut self, other: &ConfigTree) {
        for (key, incoming) in &other.children {
            if let (Some(ConfigNode::Branch(existing)), ConfigNode::Branch(subtree)) =
                (self.children.get_mut(key), incoming)
            {
                existing.overlay(subtree);
                continue;
            }
            self.children.insert(key.clone(), incoming.clone());
        }
    }

    /// Every leaf below this tree as `(full path, value)`, sorted by path.
    pub fn leaves(&self, prefix: &str) -> Vec<(String, String)> {
        let mut out = Vec::new();
        self.collect_leaves(prefix, &mut out);
        out
    }

    fn collect_leaves(&self, prefix: &str, out: &mut Vec<(String, String)>) {
        for (key, node) in &self.children {
            let path = if prefix.is_empty() {
                key.clone()
            } else {
                format!("{prefix}/{key}")
            };
            match node {
                ConfigNode::Value(value) => out.push((path, value.clone())),
                ConfigNode::Branch(tree) => tree.collect_leaves(&path, out),
            }
        }
    }
}
