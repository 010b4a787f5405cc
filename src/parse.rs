//! Parsing boundary
//!
//! Playlist syntax is handled entirely by `m3u8_rs`. This module reads the
//! file, hands the text over and returns its tagged union so call sites can
//! match master vs. media exhaustively.

use m3u8_rs::Playlist;
use std::fmt;
use std::path::Path;

use crate::error::{FixtureError, Result};

/// Which kind of playlist a file turned out to be
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaylistKind {
    Master,
    Media,
}

impl PlaylistKind {
    pub fn of(playlist: &Playlist) -> Self {
        match playlist {
            Playlist::MasterPlaylist(_) => PlaylistKind::Master,
            Playlist::MediaPlaylist(_) => PlaylistKind::Media,
        }
    }
}

impl fmt::Display for PlaylistKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlaylistKind::Master => f.write_str("multivariant playlist"),
            PlaylistKind::Media => f.write_str("media playlist"),
        }
    }
}

/// Parse playlist text. `path` is only used for error context.
pub fn parse_playlist(path: &Path, text: &str) -> Result<Playlist> {
    m3u8_rs::parse_playlist_res(text.as_bytes()).map_err(|e| FixtureError::Parse {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Read a playlist file as UTF-8 and parse it
pub async fn read_playlist(path: &Path) -> Result<Playlist> {
    tracing::debug!("Reading playlist {}", path.display());
    let text = tokio::fs::read_to_string(path).await?;
    parse_playlist(path, &text)
}
