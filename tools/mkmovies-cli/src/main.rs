//! mkmovies CLI — group images by modification time, encode one movie each.
//!
//! Scans the working directory for `.jpg` files, partitions them into runs
//! of temporally close frames, and drives an external `ffmpeg` over a
//! staged copy of each run. Outputs land in the working directory as
//! `movie_000.mp4`, `movie_001.mp4`, ...
//!
//! The run exits nonzero if any group fails; one group's failure never
//! stops the groups after it.

use std::path::{Path, PathBuf};

use clap::Parser;
use mkmovies_assembly::{assemble, EncoderBackend, ExternalStager, FfmpegEncoder};
use mkmovies_common::config::{LoggingConfig, RunConfig};
use mkmovies_grouping::{discover_images, group_by_mtime};

#[derive(Parser)]
#[command(
    name = "mkmovies",
    about = "Group images by capture time and assemble one movie per group",
    version,
    author
)]
struct Cli {
    /// Directory to scan; movies are written there as well
    #[arg(short, long, default_value = ".")]
    dir: PathBuf,

    /// Maximum gap in seconds between consecutive frames of one movie
    #[arg(long, default_value = "30")]
    max_gap: i64,

    /// Output frame rate
    #[arg(long, default_value = "4")]
    rate: u32,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    mkmovies_common::logging::init_logging(&LoggingConfig {
        level: log_level.to_string(),
        json: false,
    });

    let config = RunConfig {
        max_gap_secs: cli.max_gap,
        frame_rate: cli.rate,
        ..RunConfig::default()
    };

    // Discovery, staging, and output all resolve against the working
    // directory, so move there up front.
    std::env::set_current_dir(&cli.dir)?;

    let encoder = FfmpegEncoder;
    if !encoder.is_available() {
        anyhow::bail!("No supported encoder found (expected ffmpeg in PATH)");
    }
    let stager = ExternalStager;

    let files = discover_images(Path::new("."), &config.image_ext)?;
    tracing::info!(files = files.len(), "Discovered image files");

    let groups = group_by_mtime(files, config.max_gap_secs);
    tracing::info!(groups = groups.len(), "Grouped by modification time");

    let total = groups.len();
    let mut failures = 0usize;
    for (index, group) in groups.iter().enumerate() {
        tracing::info!(group = index, size = group.len(), "Assembling group");

        let name = config.movie_name(index);
        let paths: Vec<PathBuf> = group.iter().map(|f| f.path.clone()).collect();
        match assemble(&paths, &name, &config, &stager, &encoder) {
            Ok(0) => {
                tracing::info!(
                    group = index,
                    output = config.movie_file_name(index),
                    "Movie assembled"
                );
            }
            Ok(code) => {
                tracing::warn!(group = index, code, "Encoder returned nonzero exit code");
                failures += 1;
            }
            Err(err) => {
                tracing::error!(group = index, error = %err, "Group assembly failed");
                failures += 1;
            }
        }
    }

    if failures > 0 {
        anyhow::bail!("{failures} of {total} groups failed");
    }
    Ok(())
}
