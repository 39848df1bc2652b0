//! Gap computation and single-pass temporal grouping.

use std::path::PathBuf;

use chrono::{DateTime, Utc};

/// An input image file together with its modification time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimestampedFile {
    /// Modification time, subsecond precision.
    pub mtime: DateTime<Utc>,
    /// Path as discovered (relative to the scanned directory).
    pub path: PathBuf,
}

/// A non-empty run of files sorted ascending by mtime, where every adjacent
/// pair is closer than the gap threshold.
pub type Group = Vec<TimestampedFile>;

/// Time difference between two instants in whole seconds.
///
/// Rounded to the nearest second with ties away from zero, so a 29.5s
/// difference counts as 30.
pub fn gap_seconds(a: &DateTime<Utc>, b: &DateTime<Utc>) -> i64 {
    let millis = b.signed_duration_since(*a).num_milliseconds().abs();
    (millis as f64 / 1000.0).round() as i64
}

/// Partition `files` into groups separated by gaps of at least
/// `max_gap_secs` seconds.
///
/// Input order does not matter: files are stable-sorted by mtime first, so
/// equal timestamps keep their relative order and always land in the same
/// group. Each file is compared against the last file appended to the
/// current group, not the group's first, so a long burst of closely spaced
/// frames stays together however long it runs.
pub fn group_by_mtime(mut files: Vec<TimestampedFile>, max_gap_secs: i64) -> Vec<Group> {
    files.sort_by_key(|f| f.mtime);

    let mut groups: Vec<Group> = Vec::new();
    let mut current: Group = Vec::new();
    for file in files {
        if let Some(last) = current.last() {
            if gap_seconds(&last.mtime, &file.mtime) >= max_gap_secs {
                groups.push(std::mem::take(&mut current));
            }
        }
        current.push(file);
    }
    if !current.is_empty() {
        groups.push(current);
    }
    groups
}
