//! Cover image storage.
//!
//! The static directory holds at most one cover file, `cover.<ext>`.
//! Storing a new cover deletes whichever extension was there before.

use std::io::Cursor;
use std::path::{Path, PathBuf};

use image::{ImageReader, imageops::FilterType};
use tracing::debug;

use crate::error::{ShindigError, ShindigResult};

pub const ALLOWED_EXTENSIONS: [&str; 4] = ["png", "jpg", "jpeg", "webp"];

/// Uploaded images are downsampled to fit within this box.
pub const MAX_WIDTH: u32 = 1600;
pub const MAX_HEIGHT: u32 = 900;

/// Validate an uploaded filename against the extension allow-list.
/// Returns the lowercased extension when accepted.
pub fn allowed_extension(filename: &str) -> Option<String> {
    let ext = Path::new(filename).extension()?.to_str()?.to_lowercase();
    ALLOWED_EXTENSIONS.contains(&ext.as_str()).then_some(ext)
}

/// The current cover file, if any.
pub fn find_cover(static_dir: &Path) -> Option<PathBuf> {
    ALLOWED_EXTENSIONS
        .iter()
        .map(|ext| static_dir.join(format!("cover.{ext}")))
        .find(|path| path.exists())
}

/// Decode, downsample, and persist a new cover image, then delete covers
/// left behind under other extensions. `ext` must come from
/// [`allowed_extension`].
pub fn store_cover(static_dir: &Path, ext: &str, bytes: &[u8]) -> ShindigResult<PathBuf> {
    let img = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()?
        .decode()
        .map_err(|e| ShindigError::InvalidImage(e.to_string()))?;

    let img = if img.width() > MAX_WIDTH || img.height() > MAX_HEIGHT {
        debug!(
            width = img.width(),
            height = img.height(),
            "downsampling cover image"
        );
        img.resize(MAX_WIDTH, MAX_HEIGHT, FilterType::Lanczos3)
    } else {
        img
    };

    std::fs::create_dir_all(static_dir)?;
    let path = static_dir.join(format!("cover.{ext}"));
    img.save(&path)
        .map_err(|e| ShindigError::InvalidImage(e.to_string()))?;

    for other in ALLOWED_EXTENSIONS.iter().filter(|other| **other != ext) {
        let sibling = static_dir.join(format!("cover.{other}"));
        if sibling.exists() {
            std::fs::remove_file(&sibling)?;
        }
    }

    Ok(path)
}
