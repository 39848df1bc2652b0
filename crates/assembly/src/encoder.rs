//! External encoder invocation.

use std::path::Path;
use std::process::Command;

use mkmovies_common::error::{MkmoviesError, MkmoviesResult};

/// Trait for encoder backends.
pub trait EncoderBackend {
    /// Encode the sequentially named frames matched by `input_pattern` into
    /// `output` at `frame_rate` frames per second, returning the encoder
    /// process's exit code (0 = success).
    fn encode(&self, input_pattern: &Path, frame_rate: u32, output: &Path)
        -> MkmoviesResult<i32>;

    /// Check if this backend is available on the system.
    fn is_available(&self) -> bool;

    /// Backend name.
    fn name(&self) -> &str;
}

/// Encoder backed by an external `ffmpeg` process.
#[derive(Debug, Default)]
pub struct FfmpegEncoder;

impl EncoderBackend for FfmpegEncoder {
    fn encode(
        &self,
        input_pattern: &Path,
        frame_rate: u32,
        output: &Path,
    ) -> MkmoviesResult<i32> {
        let mut cmd = Command::new("ffmpeg");
        cmd.arg("-f")
            .arg("image2")
            .arg("-i")
            .arg(input_pattern)
            .arg("-r")
            .arg(frame_rate.to_string())
            .arg(output);

        tracing::debug!(args = ?cmd.get_args().collect::<Vec<_>>(), "Running ffmpeg");
        let status = cmd
            .status()
            .map_err(|e| MkmoviesError::encoder(format!("Failed to start ffmpeg: {e}")))?;
        Ok(status.code().unwrap_or(-1))
    }

    fn is_available(&self) -> bool {
        command_exists("ffmpeg")
    }

    fn name(&self) -> &str {
        "ffmpeg"
    }
}

fn command_exists(binary: &str) -> bool {
    Command::new("sh")
        .arg("-c")
        .arg(format!("command -v {binary} >/dev/null 2>&1"))
        .status()
        .map(|status| status.success())
        .unwrap_or(false)
}
