//! Directory discovery of timestamped image files.

use std::path::Path;

use chrono::{DateTime, Utc};
use mkmovies_common::error::{MkmoviesError, MkmoviesResult};

use crate::group::TimestampedFile;

/// Scan `dir` for files whose names end in `.` + `image_ext` and read each
/// one's modification time.
///
/// An unreadable directory fails the scan. A single entry whose metadata
/// cannot be read is skipped with a warning rather than failing the run.
pub fn discover_images(dir: &Path, image_ext: &str) -> MkmoviesResult<Vec<TimestampedFile>> {
    let suffix = format!(".{image_ext}");

    let entries = std::fs::read_dir(dir).map_err(|e| {
        MkmoviesError::discovery(format!("Failed to read directory {}: {e}", dir.display()))
    })?;

    let mut files = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| {
            MkmoviesError::discovery(format!("Failed to read entry in {}: {e}", dir.display()))
        })?;

        let name = entry.file_name();
        let Some(name) = name.to_str() else {
            continue;
        };
        // At least one character must precede the suffix; a bare `.jpg`
        // is a hidden file with no extension, not an image.
        if name.len() <= suffix.len() || !name.ends_with(&suffix) {
            continue;
        }

        match entry.metadata().and_then(|meta| meta.modified()) {
            Ok(mtime) => files.push(TimestampedFile {
                mtime: DateTime::<Utc>::from(mtime),
                path: entry.path(),
            }),
            Err(err) => {
                tracing::warn!(
                    path = %entry.path().display(),
                    error = %err,
                    "Skipping file with unreadable modification time"
                );
            }
        }
    }

    Ok(files)
}
