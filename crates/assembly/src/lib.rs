//! Movie assembly for mkmovies.
//!
//! One group of images goes in, one encoder invocation comes out. The
//! filesystem side (unique staging directory, sequential links, recursive
//! removal) sits behind [`staging::Stager`] and the encoder behind
//! [`encoder::EncoderBackend`], so the per-group orchestration in
//! [`assemble`] is testable without touching real external tools.

pub mod assemble;
pub mod encoder;
pub mod staging;

pub use assemble::assemble;
pub use encoder::{EncoderBackend, FfmpegEncoder};
pub use staging::{ExternalStager, Stager, StagingArea};
