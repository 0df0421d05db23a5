//! Configuration for SlotDB
//!
//! Centralized configuration with sensible defaults.

use std::path::PathBuf;

/// Main configuration for a SlotDB store and its batch driver
#[derive(Debug, Clone)]
pub struct Config {
    // -------------------------------------------------------------------------
    // Storage Configuration
    // -------------------------------------------------------------------------
    /// The single data file holding the header and every slot
    pub data_path: PathBuf,

    /// Create the data file (with an empty free list) when it does not exist
    pub create_if_missing: bool,

    /// fsync the data file after every insert, delete and compaction
    pub sync_writes: bool,

    // -------------------------------------------------------------------------
    // Driver Configuration
    // -------------------------------------------------------------------------
    /// Operations script replayed by `exec`
    pub operations_path: PathBuf,

    /// Text log written by `exec`
    pub log_path: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from("./records.dat"),
            create_if_missing: false,
            sync_writes: false,
            operations_path: PathBuf::from("./operations.txt"),
            log_path: PathBuf::from("./operations.log"),
        }
    }
}

impl Config {
    /// Create a new config builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }
}

/// Builder for Config
#[derive(Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Set the data file path
    pub fn data_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.data_path = path.into();
        self
    }

    /// Create the data file on open if it is missing
    pub fn create_if_missing(mut self, create: bool) -> Self {
        self.config.create_if_missing = create;
        self
    }

    /// fsync after every mutation
    pub fn sync_writes(mut self, sync: bool) -> Self {
        self.config.sync_writes = sync;
        self
    }

    /// Set the operations script path
    pub fn operations_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.operations_path = path.into();
        self
    }

    /// Set the log output path
    pub fn log_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.log_path = path.into();
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}

impl Config {
    /// Reject configurations that cannot name a data file
    pub fn validate(&self) -> crate::Result<()> {
        if self.data_path.as_os_str().is_empty() {
            return Err(crate::SlotDbError::Config(
                "data_path must not be empty".to_string(),
            ));
        }
        if self.data_path.is_dir() {
            return Err(crate::SlotDbError::Config(format!(
                "data_path {} is a directory",
                self.data_path.display()
            )));
        }
        Ok(())
    }
}
