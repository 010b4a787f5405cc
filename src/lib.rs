//! HLS Test Fixtures
//!
//! Loads on-disk HLS fixture streams (a multivariant playlist plus the media
//! playlists and segments it references), records the route each file is
//! served at, and answers "which segment plays at time T" queries for test
//! suites and mock servers.

pub mod config;
pub mod error;
pub mod fixture;
pub mod loader;
pub mod parse;
pub mod path;
pub mod router;
pub mod timeline;

#[cfg(test)]
mod tests;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

pub use config::FixtureConfig;
pub use error::{FixtureError, Result};
pub use fixture::{FixtureMediaPlaylist, FixtureSegment, FixtureStream};
pub use loader::{parse_fixture_stream, parse_media_playlist, FixtureLoader};
pub use parse::PlaylistKind;
pub use path::FixtureFile;
pub use router::fixture_router;

/// Initialize logging with tracing, writing through the test harness.
///
/// Safe to call from every test; only the first call installs a subscriber.
pub fn init_logging() {
    let _ = tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "hls_fixtures=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_test_writer())
        .try_init();
}
