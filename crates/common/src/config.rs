//! Run configuration.
//!
//! The original tool kept these as module-level constants; here they travel
//! as an explicit struct so the grouper and assembler take them as plain
//! inputs.

use serde::{Deserialize, Serialize};

/// Parameters for one grouping-and-assembly run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunConfig {
    /// Maximum gap in seconds between consecutive frames of one movie.
    pub max_gap_secs: i64,

    /// Output frame rate passed to the encoder.
    pub frame_rate: u32,

    /// Literal prefix of output artifact names.
    pub movie_prefix: String,

    /// Extension selecting input images (and naming staged links).
    pub image_ext: String,

    /// Extension of output artifacts.
    pub video_ext: String,

    /// Zero-pad width of staged link names.
    pub frame_index_width: usize,

    /// Zero-pad width of the numeric part of artifact names.
    pub movie_index_width: usize,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "mkmovies=debug,warn").
    pub level: String,

    /// Whether to output structured JSON logs.
    pub json: bool,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            max_gap_secs: 30,
            frame_rate: 4,
            movie_prefix: "movie_".to_string(),
            image_ext: "jpg".to_string(),
            video_ext: "mp4".to_string(),
            frame_index_width: 6,
            movie_index_width: 3,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

impl RunConfig {
    /// Name of the staged link for the frame at `index`, e.g. `000000.jpg`.
    pub fn frame_link_name(&self, index: usize) -> String {
        format!(
            "{index:0width$}.{ext}",
            width = self.frame_index_width,
            ext = self.image_ext
        )
    }

    /// Sequential-name pattern the encoder reads, e.g. `%06d.jpg`.
    pub fn frame_pattern(&self) -> String {
        format!("%0{}d.{}", self.frame_index_width, self.image_ext)
    }

    /// Base name (no extension) of the artifact for group `index`,
    /// e.g. `movie_000`.
    pub fn movie_name(&self, index: usize) -> String {
        format!(
            "{prefix}{index:0width$}",
            prefix = self.movie_prefix,
            width = self.movie_index_width
        )
    }

    /// Artifact file name for group `index`, e.g. `movie_000.mp4`.
    pub fn movie_file_name(&self, index: usize) -> String {
        format!("{}.{}", self.movie_name(index), self.video_ext)
    }
}
