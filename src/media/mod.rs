// SPDX-License-Identifier: MPL-2.0
//! Reading files from disk into selection candidates.
//!
//! The declared content type of a file is guessed from its extension, the way
//! a browser fills in `File.type`. Contents are never sniffed, so a `.txt`
//! renamed to `.png` is still offered as an image and left for the server to
//! reject.

use crate::application::selection::Candidate;
use crate::error::Result;
use std::path::Path;

pub use extensions::IMAGE_EXTENSIONS;

/// Supported media extensions
pub mod extensions {
    /// Image file extensions offered by the open dialog.
    pub const IMAGE_EXTENSIONS: &[&str] = &[
        "jpg", "jpeg", "png", "gif", "tiff", "tif", "webp", "bmp", "ico", "svg",
    ];

    /// Upper-cased list used for the "supported formats" hint.
    #[must_use]
    pub fn display_list() -> String {
        let mut seen: Vec<String> = Vec::new();
        for ext in IMAGE_EXTENSIONS {
            let upper = match *ext {
                "jpeg" => "JPG".to_string(),
                "tif" => "TIFF".to_string(),
                other => other.to_ascii_uppercase(),
            };
            if !seen.contains(&upper) {
                seen.push(upper);
            }
        }
        seen.join(", ")
    }
}

/// Guesses the declared MIME type of `path` from its extension.
///
/// Returns `None` when the extension is missing or unknown.
#[must_use]
pub fn declared_content_type(path: &Path) -> Option<String> {
    mime_guess::from_path(path)
        .first()
        .map(|mime| mime.essence_str().to_string())
}

/// Display name of `path` (its last component).
#[must_use]
pub fn file_name(path: &Path) -> String {
    path.file_name().map_or_else(
        || path.to_string_lossy().into_owned(),
        |name| name.to_string_lossy().into_owned(),
    )
}

/// Reads `path` into a [`Candidate`].
///
/// # Errors
///
/// Returns [`Error::Io`](crate::error::Error::Io) if the file cannot be read
/// (missing, a directory, permission denied...).
pub async fn read_candidate(path: &Path) -> Result<Candidate> {
    let bytes = tokio::fs::read(path).await?;
    let content_type = declared_content_type(path);
    tracing::debug!(
        path = %path.display(),
        content_type = content_type.as_deref().unwrap_or("unknown"),
        len = bytes.len(),
        "file read"
    );
    Ok(Candidate::new(file_name(path), content_type.as_deref(), bytes))
}
