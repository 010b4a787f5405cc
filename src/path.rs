//! Fixture file paths and routes
//!
//! Paths are resolved lexically: `.` and `..` are folded without touching
//! the filesystem, so a fixture tree can be described before it exists and
//! symlinks inside it are left alone.

use serde::{Deserialize, Serialize};
use std::path::{Component, Path, PathBuf};

/// A file inside the fixture root, with the HTTP route that serves it
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FixtureFile {
    /// Path relative to the fixture root
    pub relative_path: PathBuf,
    /// `"/"` + the relative path with `/` separators
    pub route: String,
}

impl FixtureFile {
    /// Describe `path` relative to `root`
    pub fn new(root: &Path, path: &Path) -> Self {
        let relative_path = relative_path(root, path);
        let route = route_for(&relative_path);
        Self {
            relative_path,
            route,
        }
    }

    /// Location of this file on disk given the fixture root it was computed against
    pub fn absolute_path(&self, root: &Path) -> PathBuf {
        normalize(&root.join(&self.relative_path))
    }
}

/// Fold `.` and `..` components out of `path`.
///
/// `..` directly under a root is dropped; leading `..` of a relative path
/// are kept.
pub fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match out.components().next_back() {
                Some(Component::Normal(_)) => {
                    out.pop();
                }
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => out.push(".."),
            },
            other => out.push(other.as_os_str()),
        }
    }
    out
}

/// Join a playlist URI onto `base`, keeping a leading `/` under `base`
pub fn join_uri(base: &Path, uri: &str) -> PathBuf {
    let mut out = base.to_path_buf();
    for component in Path::new(uri).components() {
        match component {
            Component::RootDir | Component::Prefix(_) => {}
            other => out.push(other.as_os_str()),
        }
    }
    out
}

/// Path of `target` as seen from `base`, both normalized first
pub fn relative_path(base: &Path, target: &Path) -> PathBuf {
    let base = normalize(base);
    let target = normalize(target);

    let base_components: Vec<Component> = base.components().collect();
    let target_components: Vec<Component> = target.components().collect();
    let common = base_components
        .iter()
        .zip(&target_components)
        .take_while(|(a, b)| a == b)
        .count();

    let mut out = PathBuf::new();
    for _ in common..base_components.len() {
        out.push("..");
    }
    for component in &target_components[common..] {
        out.push(component.as_os_str());
    }
    out
}

/// Route for a root-relative path: leading `/`, forward-slash separated
pub fn route_for(relative: &Path) -> String {
    let parts: Vec<String> = relative
        .components()
        .filter_map(|c| match c {
            Component::Normal(s) => Some(s.to_string_lossy().into_owned()),
            Component::ParentDir => Some("..".to_string()),
            _ => None,
        })
        .collect();
    format!("/{}", parts.join("/"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_folds_dots() {
        assert_eq!(
            normalize(Path::new("/root/files/sample/./low/../high/seg.ts")),
            PathBuf::from("/root/files/sample/high/seg.ts")
        );
        assert_eq!(normalize(Path::new("../a/./b/..")), PathBuf::from("../a"));
        assert_eq!(normalize(Path::new("/..")), PathBuf::from("/"));
    }

    #[test]
    fn test_join_uri_keeps_absolute_uri_under_base() {
        assert_eq!(
            join_uri(Path::new("/fixtures/s"), "/x/a.ts"),
            PathBuf::from("/fixtures/s/x/a.ts")
        );
        assert_eq!(
            join_uri(Path::new("/fixtures/s"), "low/../b.ts"),
            PathBuf::from("/fixtures/s/low/../b.ts")
        );
    }

    #[test]
    fn test_relative_path_below_root() {
        let rel = relative_path(
            Path::new("/fixtures"),
            Path::new("/fixtures/sample/low/../low/index.m3u8"),
        );
        assert_eq!(rel, PathBuf::from("sample/low/index.m3u8"));
    }

    #[test]
    fn test_relative_path_outside_root() {
        let rel = relative_path(Path::new("/fixtures/a"), Path::new("/fixtures/b/c.ts"));
        assert_eq!(rel, PathBuf::from("../b/c.ts"));
    }

    #[test]
    fn test_relative_roots_work() {
        let rel = relative_path(Path::new("files"), Path::new("files/sample/stream.m3u8"));
        assert_eq!(rel, PathBuf::from("sample/stream.m3u8"));
    }

    #[test]
    fn test_fixture_file_route() {
        let file = FixtureFile::new(
            Path::new("/fixtures"),
            Path::new("/fixtures/sample/hi/seg0.ts"),
        );
        assert_eq!(file.relative_path, PathBuf::from("sample/hi/seg0.ts"));
        assert_eq!(file.route, "/sample/hi/seg0.ts");
        assert_eq!(
            file.absolute_path(Path::new("/fixtures")),
            PathBuf::from("/fixtures/sample/hi/seg0.ts")
        );
    }
}
