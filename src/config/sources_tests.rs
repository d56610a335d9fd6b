use super::{env_var_to_path, split_scoped_path, ConfigRow, ConfigSources, SourceLayer};
use crate::config::paths::StoreRootPaths;
use crate::config::scope::{ResolvedScope, ScopeKey};
use crate::config::tree::ConfigNode;
use serde_json::json;

fn value(text: &str) -> Option<ConfigNode> {
    Some(ConfigNode::Value(text.to_string()))
}

fn vars(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
    pairs
        .iter()
        .map(|(name, value)| (name.to_string(), value.to_string()))
        .collect()
}

#[test]
fn env_var_names_map_to_lowercase_slash_paths() {
    assert_eq!(
        env_var_to_path("CONFIG__DEFAULT__WEB__TEST2__TEST_VALUE_4").as_deref(),
        Some("default/web/test2/test_value_4")
    );
    assert_eq!(
        env_var_to_path("CONFIG__WEBSITES__THIRD_WEBSITE__WEB__TEST__VALUE").as_deref(),
        Some("websites/third_website/web/test/value")
    );
    assert_eq!(env_var_to_path("PATH"), None);
    assert_eq!(env_var_to_path("CONFIG__"), None);
    assert_eq!(env_var_to_path("CONFIG__default__web"), None);
    assert_eq!(env_var_to_path("CONFIG__DEFAULT__WEB-TEST"), None);
}

#[test]
fn scoped_paths_split_into_scope_key_and_config_path() {
    assert_eq!(
        split_scoped_path("default/web/test/value"),
        Some((ScopeKey::Default, "web/test/value".to_string()))
    );
    assert_eq!(
        split_scoped_path("stores/secondstore/web/test/value"),
        Some((
            ScopeKey::Store("secondstore".to_string()),
            "web/test/value".to_string()
        ))
    );
    assert_eq!(split_scoped_path("websites/base"), None);
    assert_eq!(split_scoped_path("global/web/test"), None);
}

#[test]
fn env_layer_ignores_unrelated_variables() {
    let layer = SourceLayer::from_env_vars(
        "environment",
        vars(&[
            ("HOME", "/root"),
            ("CONFIG__DEFAULT__WEB__TEST__VALUE", "env-default"),
            ("CONFIG__NOWHERE__WEB__TEST__VALUE", "ignored"),
        ]),
    );
    let tree = layer.tree(&ScopeKey::Default).expect("default tree");
    assert_eq!(tree.get("web/test/value").cloned(), value("env-default"));
    assert_eq!(tree.leaves("").len(), 1);
}

#[test]
fn deployment_config_reads_every_scope_of_the_system_section() {
    let layer = SourceLayer::from_deployment_config(
        "env.json",
        &json!({
            "db": {"host": "localhost"},
            "system": {
                "default": {"web": {"test": {"value": "d"}}},
                "websites": {"Base": {"web": {"test": {"value": "w"}}}},
                "stores": {"default": {"web": {"test": {"value": "s"}}}},
                "bogus": {"web": {}}
            }
        }),
    );
    let get = |key: ScopeKey| {
        layer
            .tree(&key)
            .and_then(|tree| tree.get("web/test/value"))
            .cloned()
    };
    assert_eq!(get(ScopeKey::Default), value("d"));
    assert_eq!(get(ScopeKey::Website("base".to_string())), value("w"));
    assert_eq!(get(ScopeKey::Store("default".to_string())), value("s"));
}

#[test]
fn rows_without_a_usable_scope_are_skipped() {
    let rows = vec![
        ConfigRow {
            scope: "websites".to_string(),
            scope_code: None,
            path: "web/test/value".to_string(),
            value: "no code".to_string(),
        },
        ConfigRow {
            scope: "default".to_string(),
            scope_code: None,
            path: "web/test/value".to_string(),
            value: "kept".to_string(),
        },
    ];
    let layer = SourceLayer::from_rows("database", &rows);
    assert_eq!(
        layer
            .tree(&ScopeKey::Default)
            .and_then(|tree| tree.get("web/test/value"))
            .cloned(),
        value("kept")
    );
}

#[test]
fn higher_priority_sources_win_within_a_scope() {
    let mut database = SourceLayer::new("database");
    database.set(ScopeKey::Default, "web/a", "db");
    database.set(ScopeKey::Default, "web/b", "db");
    let mut environment = SourceLayer::new("environment");
    environment.set(ScopeKey::Default, "web/b", "env");
    let sources = ConfigSources::new(vec![database, environment]);

    let merged = sources.merged(&ScopeKey::Default);
    assert_eq!(merged.get("web/a").cloned(), value("db"));
    assert_eq!(merged.get("web/b").cloned(), value("env"));
}

#[test]
fn more_specific_scope_wins_over_a_higher_priority_default() {
    let mut database = SourceLayer::new("database");
    database.set(ScopeKey::Website("base".to_string()), "web/a", "db-website");
    database.set(ScopeKey::Store("default".to_string()), "web/c", "db-store");
    let mut environment = SourceLayer::new("environment");
    environment.set(ScopeKey::Default, "web/a", "env-default");
    environment.set(ScopeKey::Default, "web/b", "env-default");
    let sources = ConfigSources::new(vec![database, environment]);

    let store = sources.resolve(&ResolvedScope::Store {
        code: "default".to_string(),
        website: "base".to_string(),
    });
    assert_eq!(store.get("web/a").cloned(), value("db-website"));
    assert_eq!(store.get("web/b").cloned(), value("env-default"));
    assert_eq!(store.get("web/c").cloned(), value("db-store"));

    let default = sources.resolve(&ResolvedScope::Default);
    assert_eq!(default.get("web/a").cloned(), value("env-default"));
    assert_eq!(default.get("web/c"), None);
}

#[test]
fn load_reads_store_root_files_and_tolerates_missing_ones() {
    let temp = tempfile::tempdir().expect("create temp dir");
    let paths = StoreRootPaths::new(temp.path().to_path_buf());
    std::fs::create_dir_all(paths.db_dir()).expect("create db dir");
    std::fs::write(
        paths.config_data_path(),
        r#"[{"scope": "default", "path": "web/test/value", "value": "from-db"}]"#,
    )
    .expect("write rows");

    let sources = ConfigSources::load(&paths, Vec::new()).expect("load sources");
    let tree = sources.resolve(&ResolvedScope::Default);
    assert_eq!(tree.get("web/test/value").cloned(), value("from-db"));
}
