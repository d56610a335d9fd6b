//! Scope types, the website/store registry, and scope argument validation.
use super::error::ConfigShowError;
use anyhow::Result;
use regex::Regex;
use serde::Deserialize;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::path::Path;
use std::sync::OnceLock;

pub const SCOPE_DEFAULT: &str = "default";
pub const SCOPE_WEBSITES: &str = "websites";
pub const SCOPE_STORES: &str = "stores";

const SCOPE_CODE_PATTERN: &str = r"(?i)^[a-z]+[a-z0-9_]*$";

fn scope_code_regex() -> &'static Regex {
    static SCOPE_CODE_RE: OnceLock<Regex> = OnceLock::new();
    SCOPE_CODE_RE.get_or_init(|| Regex::new(SCOPE_CODE_PATTERN).expect("scope code pattern compiles"))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ScopeType {
    Default,
    Websites,
    Stores,
}

impl ScopeType {
    /// Parse a scope name; singular forms are accepted as aliases.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            SCOPE_DEFAULT => Some(Self::Default),
            SCOPE_WEBSITES | "website" => Some(Self::Websites),
            SCOPE_STORES | "store" => Some(Self::Stores),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Default => SCOPE_DEFAULT,
            Self::Websites => SCOPE_WEBSITES,
            Self::Stores => SCOPE_STORES,
        }
    }
}

/// Key of one scope's config tree. Codes are stored lowercase.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum ScopeKey {
    Default,
    Website(String),
    Store(String),
}

impl ScopeKey {
    pub fn new(scope: ScopeType, code: Option<&str>) -> Option<Self> {
        match (scope, code) {
            (ScopeType::Default, _) => Some(Self::Default),
            (ScopeType::Websites, Some(code)) => Some(Self::Website(code.to_ascii_lowercase())),
            (ScopeType::Stores, Some(code)) => Some(Self::Store(code.to_ascii_lowercase())),
            _ => None,
        }
    }
}

impl fmt::Display for ScopeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Default => f.write_str(ScopeType::Default.as_str()),
            Self::Website(code) => write!(f, "{}/{code}", ScopeType::Websites.as_str()),
            Self::Store(code) => write!(f, "{}/{code}", ScopeType::Stores.as_str()),
        }
    }
}

/// A validated scope with the store's website resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolvedScope {
    Default,
    Website { code: String },
    Store { code: String, website: String },
}

impl ResolvedScope {
    /// Scope keys from least to most specific.
    pub fn fallback_chain(&self) -> Vec<ScopeKey> {
        match self {
            Self::Default => vec![ScopeKey::Default],
            Self::Website { code } => vec![ScopeKey::Default, ScopeKey::Website(code.clone())],
            Self::Store { code, website } => vec![
                ScopeKey::Default,
                ScopeKey::Website(website.clone()),
                ScopeKey::Store(code.clone()),
            ],
        }
    }
}

#[derive(Debug, Deserialize)]
struct StoreRecord {
    code: String,
    website: String,
}

#[derive(Debug, Default, Deserialize)]
struct StoreRegistryFile {
    #[serde(default)]
    websites: Vec<String>,
    #[serde(default)]
    stores: Vec<StoreRecord>,
}

/// Known websites and stores, keyed by lowercase code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreRegistry {
    websites: BTreeSet<String>,
    stores: BTreeMap<String, String>,
}

impl Default for StoreRegistry {
    /// A fresh install: one `base` website with one `default` store.
    fn default() -> Self {
        let mut registry = Self::empty();
        registry.add_website("base");
        registry.add_store("default", "base");
        registry
    }
}

impl StoreRegistry {
    pub fn empty() -> Self {
        Self {
            websites: BTreeSet::new(),
            stores: BTreeMap::new(),
        }
    }

    /// Load `db/stores.json`; a missing file yields the fresh-install registry.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let file: StoreRegistryFile = crate::fsio::read_json_or_default(path)?;
        let mut registry = Self::empty();
        for website in &file.websites {
            registry.add_website(website);
        }
        for store in &file.stores {
            registry.add_store(&store.code, &store.website);
        }
        Ok(registry)
    }

    pub fn add_website(&mut self, code: &str) {
        self.websites.insert(code.to_ascii_lowercase());
    }

    /// Register a store; its website is registered too.
    pub fn add_store(&mut self, code: &str, website: &str) {
        self.add_website(website);
        self.stores
            .insert(code.to_ascii_lowercase(), website.to_ascii_lowercase());
    }

    pub fn has_website(&self, code: &str) -> bool {
        self.websites.contains(&code.to_ascii_lowercase())
    }

    pub fn store_website(&self, code: &str) -> Option<&str> {
        self.stores
            .get(&code.to_ascii_lowercase())
            .map(String::as_str)
    }
}

/// Check a `--scope`/`--scope-code` pair and resolve it against the registry.
pub fn resolve_scope(
    scope: &str,
    scope_code: Option<&str>,
    registry: &StoreRegistry,
) -> Result<ResolvedScope, ConfigShowError> {
    let scope_code = scope_code.filter(|code| !code.is_empty());
    if scope == SCOPE_DEFAULT {
        if scope_code.is_some() {
            return Err(ConfigShowError::DefaultScopeWithCode);
        }
        return Ok(ResolvedScope::Default);
    }
    if scope.is_empty() {
        return Err(ConfigShowError::MissingScope);
    }
    let code = scope_code.ok_or(ConfigShowError::MissingScopeCode)?;
    if !scope_code_regex().is_match(code) {
        return Err(ConfigShowError::InvalidScopeCode);
    }
    match ScopeType::parse(scope) {
        Some(ScopeType::Websites) if registry.has_website(code) => Ok(ResolvedScope::Website {
            code: code.to_ascii_lowercase(),
        }),
        Some(ScopeType::Stores) => match registry.store_website(code) {
            Some(website) => Ok(ResolvedScope::Store {
                code: code.to_ascii_lowercase(),
                website: website.to_string(),
            }),
            None => Err(ConfigShowError::UnknownScopeCode(code.to_string())),
        },
        Some(ScopeType::Websites) => Err(ConfigShowError::UnknownScopeCode(code.to_string())),
        Some(ScopeType::Default) | None => Err(ConfigShowError::UnknownScope(scope.to_string())),
    }
}

#[cfg(test)]
#[path = "scope_tests.rs"]
mod tests;
