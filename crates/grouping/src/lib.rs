//! Temporal grouping for mkmovies.
//!
//! Discovers timestamped image files and partitions them into maximal runs
//! where consecutive modification times stay within a gap threshold. Pure
//! apart from the directory scan; no process invocation happens here.

pub mod discover;
pub mod group;

pub use discover::discover_images;
pub use group::{gap_seconds, group_by_mtime, Group, TimestampedFile};
