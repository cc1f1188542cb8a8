//! Lexical path helpers.
//!
//! These operate on the path text only; nothing here consults the
//! filesystem.

use std::path::{Component, Path, PathBuf};

/// Normalize a path lexically: collapse `.` components and resolve `..`
/// against preceding components where possible.
pub fn normalize_path(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                let last_is_normal =
                    matches!(out.components().next_back(), Some(Component::Normal(_)));
                if last_is_normal {
                    out.pop();
                } else {
                    out.push("..");
                }
            }
            other => out.push(other),
        }
    }
    if out.as_os_str().is_empty() {
        out.push(".");
    }
    out
}

/// The directory portion of a path, or the empty path when there is none.
pub fn directory_name(path: &Path) -> PathBuf {
    path.parent().map(Path::to_path_buf).unwrap_or_default()
}

/// The final component with its extension removed.
pub fn base_name_without_extension(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_collapses_dot_components() {
        assert_eq!(
            normalize_path(Path::new("/a/./b/../c")),
            PathBuf::from("/a/c")
        );
        assert_eq!(normalize_path(Path::new("a/b/")), PathBuf::from("a/b"));
        assert_eq!(normalize_path(Path::new("./")), PathBuf::from("."));
    }

    #[test]
    fn normalize_keeps_leading_parent_components() {
        assert_eq!(normalize_path(Path::new("../a")), PathBuf::from("../a"));
        assert_eq!(normalize_path(Path::new("a/../../b")), PathBuf::from("../b"));
    }

    #[test]
    fn directory_and_base_names() {
        let path = Path::new("/work/HelloWorld.xcodeproj");
        assert_eq!(directory_name(path), PathBuf::from("/work"));
        assert_eq!(base_name_without_extension(path), "HelloWorld");
    }
}
