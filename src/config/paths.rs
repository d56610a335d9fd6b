//! Typed paths into a store root.
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct StoreRootPaths {
    root: PathBuf,
}

impl StoreRootPaths {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Return the `app/etc/` directory path.
    pub fn etc_dir(&self) -> PathBuf {
        self.root.join("app").join("etc")
    }

    /// Return the shared deployment config path, `app/etc/config.json`.
    pub fn shared_config_path(&self) -> PathBuf {
        self.etc_dir().join("config.json")
    }

    /// Return the environment-local deployment config path, `app/etc/env.json`.
    pub fn env_config_path(&self) -> PathBuf {
        self.etc_dir().join("env.json")
    }

    /// Return the config field structure path, `app/etc/structure.json`.
    pub fn structure_path(&self) -> PathBuf {
        self.etc_dir().join("structure.json")
    }

    pub fn db_dir(&self) -> PathBuf {
        self.root.join("db")
    }

    /// Return the stored config rows path, `db/config_data.json`.
    pub fn config_data_path(&self) -> PathBuf {
        self.db_dir().join("config_data.json")
    }

    /// Return the website/store registry path, `db/stores.json`.
    pub fn stores_path(&self) -> PathBuf {
        self.db_dir().join("stores.json")
    }
}
