//! Turning an animation name into a URI the display surface can load.
//!
//! The display surface is an external collaborator; the core only defines the
//! seam and one filesystem-backed implementation.

use std::path::PathBuf;

use crate::error::{LoopreelError, LoopreelResult};

/// Converts an asset name into a displayable URI, once per selection.
pub trait UriResolver {
    fn resolve(&self, name: &str) -> LoopreelResult<String>;
}

/// Resolves names against a root directory as `file://` URIs.
#[derive(Clone, Debug)]
pub struct FileUriResolver {
    root: PathBuf,
}

impl FileUriResolver {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl UriResolver for FileUriResolver {
    fn resolve(&self, name: &str) -> LoopreelResult<String> {
        let rel = normalize_rel_path(name)?;
        let path = self.root.join(&rel);
        Ok(format!("file://{}", path.display()))
    }
}

/// Normalize and validate a root-relative asset name.
///
/// The normalized result uses `/` separators, removes `.` segments, and
/// rejects absolute paths or parent traversals (`..`).
pub(crate) fn normalize_rel_path(source: &str) -> LoopreelResult<String> {
    let s = source.replace('\\', "/");
    if s.starts_with('/') {
        return Err(LoopreelError::validation("asset names must be relative"));
    }
    if s.is_empty() {
        return Err(LoopreelError::validation("asset name must be non-empty"));
    }

    let mut out = Vec::<&str>::new();
    for part in s.split('/') {
        if part.is_empty() || part == "." {
            continue;
        }
        if part == ".." {
            return Err(LoopreelError::validation("asset names must not contain '..'"));
        }
        out.push(part);
    }

    if out.is_empty() {
        return Err(LoopreelError::validation(
            "asset name must contain a file name",
        ));
    }

    Ok(out.join("/"))
}
