//! Axum router serving loaded fixtures
//!
//! Every `FixtureFile` of the given streams becomes a GET route returning
//! that file's bytes. Files are read from disk on each request. Binding the
//! router to a listener is up to the test harness.
//!
//! Route segments are percent-encoded before registration, so a fixture
//! named `seg{1}.ts` is served at `/…/seg%7B1%7D.ts` and never read as an
//! axum capture. Files resolving outside the fixture root are not served.

use axum::{
    extract::State,
    http::{header, HeaderMap, HeaderValue, Method, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use bytes::Bytes;
use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};
use std::collections::HashSet;
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::fixture::FixtureStream;
use crate::path::FixtureFile;

/// Characters escaped in a route segment (RFC 3986 path, plus braces)
const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// Request path a fixture file is registered at.
///
/// `None` when the file lies outside the fixture root.
pub fn request_path(file: &FixtureFile) -> Option<String> {
    let mut path = String::new();
    for component in file.relative_path.components() {
        match component {
            Component::Normal(segment) => {
                path.push('/');
                path.extend(utf8_percent_encode(&segment.to_string_lossy(), PATH_SEGMENT));
            }
            _ => return None,
        }
    }
    if path.is_empty() {
        return None;
    }
    Some(path)
}

/// Shared state of the fixture router
#[derive(Debug)]
pub struct FixtureRoutes {
    root: PathBuf,
    routes: Vec<(String, FixtureFile)>,
}

impl FixtureRoutes {
    pub fn new(root: impl Into<PathBuf>, streams: &[FixtureStream]) -> Self {
        let mut seen = HashSet::new();
        let mut routes = Vec::new();
        for stream in streams {
            for file in stream.files() {
                let Some(path) = request_path(file) else {
                    tracing::warn!("Not serving fixture outside root: {}", file.route);
                    continue;
                };
                // a segment may be listed by several variants
                if seen.insert(path.clone()) {
                    routes.push((path, file.clone()));
                }
            }
        }
        Self {
            root: root.into(),
            routes,
        }
    }

    /// Served files, in registration order
    pub fn files(&self) -> impl Iterator<Item = &FixtureFile> {
        self.routes.iter().map(|(_, file)| file)
    }

    /// Registered request paths, in registration order
    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.routes.iter().map(|(path, _)| path.as_str())
    }
}

/// MIME type for a fixture file, by extension
pub fn content_type(path: &Path) -> &'static str {
    match path.extension().and_then(|e| e.to_str()) {
        Some("m3u8") => "application/vnd.apple.mpegurl",
        Some("ts") => "video/mp2t",
        Some("m4s") | Some("mp4") => "video/mp4",
        Some("aac") => "audio/aac",
        Some("vtt") => "text/vtt",
        _ => "application/octet-stream",
    }
}

/// Create the router for `streams`, reading files below `root`
pub fn fixture_router(root: impl Into<PathBuf>, streams: &[FixtureStream]) -> Router {
    let state = Arc::new(FixtureRoutes::new(root, streams));

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::OPTIONS, Method::HEAD])
        .allow_headers([header::ACCEPT, header::RANGE, header::ORIGIN]);

    let mut router = Router::new().route("/debug/routes", get(list_routes));
    for (route, file) in &state.routes {
        let path = file.absolute_path(&state.root);
        router = router.route(route, get(move || serve_file(path)));
    }

    router
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// GET /debug/routes
async fn list_routes(State(state): State<Arc<FixtureRoutes>>) -> Json<Vec<FixtureFile>> {
    Json(state.files().cloned().collect())
}

async fn serve_file(path: PathBuf) -> Response {
    match tokio::fs::read(&path).await {
        Ok(data) => {
            let mut headers = HeaderMap::new();
            headers.insert(
                header::CONTENT_TYPE,
                HeaderValue::from_static(content_type(&path)),
            );
            headers.insert(header::CACHE_CONTROL, HeaderValue::from_static("no-cache"));
            (headers, Bytes::from(data)).into_response()
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            tracing::warn!("Fixture file missing: {}", path.display());
            (StatusCode::NOT_FOUND, format!("Fixture file not found: {}", path.display()))
                .into_response()
        }
        Err(e) => {
            tracing::error!("Failed to read fixture {}: {}", path.display(), e);
            (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response()
        }
    }
}
