//! Fixture stream loader
//!
//! Builds the `FixtureStream` graph for a stream directory:
//! - Reads `<root>/<name>/stream.m3u8`, which must be a multivariant playlist
//! - Loads every variant's media playlist concurrently, in variant order
//! - Resolves each segment against its media playlist's directory
//!
//! Every failure is returned to the caller as-is; nothing is retried.

use futures_util::future::try_join_all;
use m3u8_rs::Playlist;
use std::path::{Path, PathBuf};

use crate::config::FixtureConfig;
use crate::error::{FixtureError, Result};
use crate::fixture::{FixtureMediaPlaylist, FixtureStream};
use crate::parse::{read_playlist, PlaylistKind};
use crate::path::{join_uri, normalize, FixtureFile};

/// Loads fixture streams from a configured root directory
#[derive(Debug, Clone, Default)]
pub struct FixtureLoader {
    config: FixtureConfig,
}

impl FixtureLoader {
    pub fn new(config: FixtureConfig) -> Self {
        Self { config }
    }

    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self::new(FixtureConfig::with_root(root))
    }

    pub fn config(&self) -> &FixtureConfig {
        &self.config
    }

    /// Load the named stream and all of its variants
    pub async fn load_stream(&self, name: &str) -> Result<FixtureStream> {
        let root = &self.config.root;
        let stream_path = self.config.entry_path(name);

        let master = match read_playlist(&stream_path).await? {
            Playlist::MasterPlaylist(master) => master,
            other @ Playlist::MediaPlaylist(_) => {
                return Err(FixtureError::NotAMasterPlaylist {
                    path: stream_path,
                    found: PlaylistKind::of(&other),
                });
            }
        };

        let variants = try_join_all(
            master
                .variants
                .iter()
                .map(|variant| self.load_media_playlist(name, &variant.uri)),
        )
        .await?;

        let segment_count: usize = variants.iter().map(FixtureMediaPlaylist::len).sum();
        tracing::info!(
            "Loaded fixture stream {}: {} variants, {} segments",
            name,
            variants.len(),
            segment_count
        );

        Ok(FixtureStream {
            stream_name: name.to_string(),
            playlist_file: FixtureFile::new(root, &stream_path),
            master_playlist: master,
            variants,
        })
    }

    /// Load one media playlist referenced by `uri` from the named stream's directory
    pub async fn load_media_playlist(
        &self,
        stream_name: &str,
        uri: &str,
    ) -> Result<FixtureMediaPlaylist> {
        let root = &self.config.root;
        let playlist_path = normalize(&join_uri(&self.config.stream_dir(stream_name), uri));

        let media = match read_playlist(&playlist_path).await? {
            Playlist::MediaPlaylist(media) => media,
            other @ Playlist::MasterPlaylist(_) => {
                return Err(FixtureError::NotAMediaPlaylist {
                    uri: uri.to_string(),
                    path: playlist_path,
                    found: PlaylistKind::of(&other),
                });
            }
        };

        // segment URIs are relative to the media playlist, not the stream
        let playlist_dir = playlist_path.parent().unwrap_or(Path::new(""));
        let playlist = FixtureMediaPlaylist::from_segments(
            FixtureFile::new(root, &playlist_path),
            media,
            |segment| FixtureFile::new(root, &join_uri(playlist_dir, &segment.uri)),
        );

        tracing::debug!(
            "Loaded media playlist {} ({} segments)",
            playlist_path.display(),
            playlist.len()
        );

        Ok(playlist)
    }
}

/// Load `<root_dir>/<name>/stream.m3u8` and every variant it lists
pub async fn parse_fixture_stream(name: &str, root_dir: impl AsRef<Path>) -> Result<FixtureStream> {
    FixtureLoader::with_root(root_dir.as_ref())
        .load_stream(name)
        .await
}

/// Load the media playlist at `<root_dir>/<stream_name>/<uri>`
pub async fn parse_media_playlist(
    root_dir: impl AsRef<Path>,
    stream_name: &str,
    uri: &str,
) -> Result<FixtureMediaPlaylist> {
    FixtureLoader::with_root(root_dir.as_ref())
        .load_media_playlist(stream_name, uri)
        .await
}
