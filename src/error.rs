use std::path::PathBuf;

use thiserror::Error;

use crate::parse::PlaylistKind;

/// Main error type for fixture loading
#[derive(Error, Debug)]
pub enum FixtureError {
    /// A fixture file could not be read (missing, permissions, not UTF-8)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The playlist parser rejected the file contents
    #[error("Failed to parse playlist {}: {message}", path.display())]
    Parse { path: PathBuf, message: String },

    /// The stream entry playlist parsed, but is not a multivariant playlist
    #[error("file at {} was not a multivariant playlist (found {found})", path.display())]
    NotAMasterPlaylist { path: PathBuf, found: PlaylistKind },

    /// A variant URI pointed at something other than a media playlist
    #[error("file at {uri} was not a media playlist (found {found})")]
    NotAMediaPlaylist {
        uri: String,
        path: PathBuf,
        found: PlaylistKind,
    },

    /// Fixture configuration could not be loaded
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, FixtureError>;
