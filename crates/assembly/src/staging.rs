//! Staging directories for encoder input.

use std::path::{Path, PathBuf};
use std::process::Command;

use mkmovies_common::config::RunConfig;
use mkmovies_common::error::{MkmoviesError, MkmoviesResult};

/// Filesystem operations needed to stage a group for encoding.
///
/// The production implementation delegates to external utilities; tests
/// substitute an in-memory one.
pub trait Stager {
    /// Create a uniquely named directory under the temporary root.
    fn create_unique_dir(&self) -> MkmoviesResult<PathBuf>;

    /// Create a symbolic link at `link` pointing to `target`.
    fn create_link(&self, target: &Path, link: &Path) -> MkmoviesResult<()>;

    /// Remove `path` and everything under it.
    fn remove_recursive(&self, path: &Path) -> MkmoviesResult<()>;
}

/// Stager backed by the external `mktemp`, `ln`, and `rm` utilities.
#[derive(Debug, Default)]
pub struct ExternalStager;

impl Stager for ExternalStager {
    fn create_unique_dir(&self) -> MkmoviesResult<PathBuf> {
        let output = Command::new("mktemp")
            .args(["-d", "-p", "/tmp", "mkmovies.XXXXXX"])
            .output()?;
        if !output.status.success() {
            return Err(MkmoviesError::StagingDir {
                code: output.status.code().unwrap_or(-1),
            });
        }

        let path = String::from_utf8_lossy(&output.stdout).trim().to_string();
        if path.is_empty() {
            return Err(MkmoviesError::StagingDir { code: -1 });
        }
        Ok(PathBuf::from(path))
    }

    fn create_link(&self, target: &Path, link: &Path) -> MkmoviesResult<()> {
        let status = Command::new("ln").arg("-s").arg(target).arg(link).status()?;
        if !status.success() {
            return Err(MkmoviesError::Link {
                target: target.to_path_buf(),
                link: link.to_path_buf(),
                code: status.code().unwrap_or(-1),
            });
        }
        Ok(())
    }

    fn remove_recursive(&self, path: &Path) -> MkmoviesResult<()> {
        let status = Command::new("rm").arg("-rf").arg(path).status()?;
        if !status.success() {
            return Err(MkmoviesError::Cleanup {
                path: path.to_path_buf(),
                code: status.code().unwrap_or(-1),
            });
        }
        Ok(())
    }
}

/// A staging directory scoped to one assembly invocation.
///
/// The directory is removed when the guard drops, whichever way control
/// leaves the scope: encoder success, encoder failure, or a link error
/// partway through staging.
pub struct StagingArea<'a> {
    path: PathBuf,
    stager: &'a dyn Stager,
}

impl<'a> StagingArea<'a> {
    /// Acquire a fresh uniquely named staging directory.
    pub fn create(stager: &'a dyn Stager) -> MkmoviesResult<Self> {
        let path = stager.create_unique_dir()?;
        tracing::debug!(path = %path.display(), "Created staging directory");
        Ok(Self { path, stager })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Link `targets` in order under zero-padded sequential names,
    /// `000000.jpg` onward. Stops at the first failure; links created so
    /// far stay until the guard drops.
    pub fn link_sequential(&self, targets: &[PathBuf], config: &RunConfig) -> MkmoviesResult<()> {
        for (index, target) in targets.iter().enumerate() {
            let link = self.path.join(config.frame_link_name(index));
            self.stager.create_link(target, &link)?;
        }
        Ok(())
    }
}

impl Drop for StagingArea<'_> {
    fn drop(&mut self) {
        tracing::debug!(path = %self.path.display(), "Removing staging directory");
        if let Err(err) = self.stager.remove_recursive(&self.path) {
            tracing::warn!(
                path = %self.path.display(),
                error = %err,
                "Failed to remove staging directory"
            );
        }
    }
}
