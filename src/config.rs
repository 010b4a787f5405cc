//! Fixture configuration
//!
//! The fixture root is always explicit: it is carried by this struct (or
//! passed directly to the free loader functions), never derived from
//! process state.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{FixtureError, Result};

/// Name of the multivariant playlist inside each stream directory
pub const DEFAULT_ENTRY_PLAYLIST: &str = "stream.m3u8";

/// Default fixture root, relative to the working directory
pub const DEFAULT_ROOT: &str = "files";

/// Fixture loader configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FixtureConfig {
    /// Directory containing one sub-directory per fixture stream
    pub root: PathBuf,

    /// File name of the entry playlist within a stream directory
    #[serde(default = "default_entry_playlist")]
    pub entry_playlist: String,
}

fn default_entry_playlist() -> String {
    DEFAULT_ENTRY_PLAYLIST.to_string()
}

impl Default for FixtureConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from(DEFAULT_ROOT),
            entry_playlist: default_entry_playlist(),
        }
    }
}

impl FixtureConfig {
    /// Configuration rooted at `root` with the default entry playlist
    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            ..Default::default()
        }
    }

    /// Directory of the named stream
    pub fn stream_dir(&self, name: &str) -> PathBuf {
        self.root.join(name)
    }

    /// Entry playlist path of the named stream
    pub fn entry_path(&self, name: &str) -> PathBuf {
        self.stream_dir(name).join(&self.entry_playlist)
    }

    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        toml::from_str(&content).map_err(|e| FixtureError::Config(e.to_string()))
    }

    /// Save configuration to a TOML file
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content =
            toml::to_string_pretty(self).map_err(|e| FixtureError::Config(e.to_string()))?;
        std::fs::write(path.as_ref(), content)?;
        Ok(())
    }
}
