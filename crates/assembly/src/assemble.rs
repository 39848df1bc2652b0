//! Per-group movie assembly.

use std::path::PathBuf;

use mkmovies_common::config::RunConfig;
use mkmovies_common::error::{MkmoviesError, MkmoviesResult};

use crate::encoder::EncoderBackend;
use crate::staging::{Stager, StagingArea};

/// Assemble one group of image files into a single movie.
///
/// `files` is the group in mtime order; paths may be relative to the
/// working directory. Only paths carrying the configured image extension
/// are staged; if none remain, the group fails before any staging resource
/// is created.
///
/// `Ok(code)` means the encoder ran to completion and exited with `code`.
/// A nonzero code is the caller's to report, not an error here. `Err`
/// covers conditions that abort the group before or instead of the encoder:
/// staging directory creation failure, link failure, empty group, encoder
/// spawn failure. The staging directory is removed on every return path.
pub fn assemble(
    files: &[PathBuf],
    output_name: &str,
    config: &RunConfig,
    stager: &dyn Stager,
    encoder: &dyn EncoderBackend,
) -> MkmoviesResult<i32> {
    let cwd = std::env::current_dir()?;
    let images: Vec<PathBuf> = files
        .iter()
        .filter(|path| {
            path.extension().and_then(|ext| ext.to_str()) == Some(config.image_ext.as_str())
        })
        .map(|path| cwd.join(path))
        .collect();

    if images.is_empty() {
        return Err(MkmoviesError::NoImages);
    }

    let staging = StagingArea::create(stager)?;
    staging.link_sequential(&images, config)?;

    let input_pattern = staging.path().join(config.frame_pattern());
    let output = PathBuf::from(format!("{output_name}.{}", config.video_ext));

    tracing::info!(
        output = %output.display(),
        frames = images.len(),
        "Assembling movie"
    );
    encoder.encode(&input_pattern, config.frame_rate, &output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::path::Path;

    #[derive(Default)]
    struct MockStager {
        dirs_created: RefCell<usize>,
        links: RefCell<Vec<(PathBuf, PathBuf)>>,
        removed: RefCell<Vec<PathBuf>>,
        fail_dir: bool,
        fail_link_at: Option<usize>,
    }

    impl Stager for MockStager {
        fn create_unique_dir(&self) -> MkmoviesResult<PathBuf> {
            if self.fail_dir {
                return Err(MkmoviesError::StagingDir { code: 1 });
            }
            let mut count = self.dirs_created.borrow_mut();
            *count += 1;
            Ok(PathBuf::from(format!("/tmp/mock.{:06}", *count)))
        }

        fn create_link(&self, target: &Path, link: &Path) -> MkmoviesResult<()> {
            if self.fail_link_at == Some(self.links.borrow().len()) {
                return Err(MkmoviesError::Link {
                    target: target.to_path_buf(),
                    link: link.to_path_buf(),
                    code: 1,
                });
            }
            self.links
                .borrow_mut()
                .push((target.to_path_buf(), link.to_path_buf()));
            Ok(())
        }

        fn remove_recursive(&self, path: &Path) -> MkmoviesResult<()> {
            self.removed.borrow_mut().push(path.to_path_buf());
            Ok(())
        }
    }

    #[derive(Default)]
    struct MockEncoder {
        exit_code: i32,
        fail_spawn: bool,
        invocations: RefCell<Vec<(PathBuf, u32, PathBuf)>>,
    }

    impl EncoderBackend for MockEncoder {
        fn encode(
            &self,
            input_pattern: &Path,
            frame_rate: u32,
            output: &Path,
        ) -> MkmoviesResult<i32> {
            if self.fail_spawn {
                return Err(MkmoviesError::encoder("Failed to start mock encoder"));
            }
            self.invocations.borrow_mut().push((
                input_pattern.to_path_buf(),
                frame_rate,
                output.to_path_buf(),
            ));
            Ok(self.exit_code)
        }

        fn is_available(&self) -> bool {
            true
        }

        fn name(&self) -> &str {
            "mock"
        }
    }

    fn paths(names: &[&str]) -> Vec<PathBuf> {
        names.iter().map(PathBuf::from).collect()
    }

    #[test]
    fn test_empty_group_fails_without_staging() {
        let stager = MockStager::default();
        let encoder = MockEncoder::default();
        let config = RunConfig::default();

        let err = assemble(&[], "movie_000", &config, &stager, &encoder).unwrap_err();
        assert!(matches!(err, MkmoviesError::NoImages));
        assert_eq!(*stager.dirs_created.borrow(), 0);
        assert!(encoder.invocations.borrow().is_empty());
    }

    #[test]
    fn test_group_without_images_fails_without_staging() {
        let stager = MockStager::default();
        let encoder = MockEncoder::default();
        let config = RunConfig::default();

        let files = paths(&["notes.txt", "clip.mp4"]);
        let err = assemble(&files, "movie_000", &config, &stager, &encoder).unwrap_err();
        assert!(matches!(err, MkmoviesError::NoImages));
        assert_eq!(*stager.dirs_created.borrow(), 0);
    }

    #[test]
    fn test_links_are_sequential_and_skip_non_images() {
        let stager = MockStager::default();
        let encoder = MockEncoder::default();
        let config = RunConfig::default();

        let files = paths(&["a.jpg", "skip.txt", "b.jpg", "c.jpg"]);
        let code = assemble(&files, "movie_000", &config, &stager, &encoder).unwrap();
        assert_eq!(code, 0);

        let links = stager.links.borrow();
        assert_eq!(links.len(), 3);
        let cwd = std::env::current_dir().unwrap();
        assert_eq!(links[0].0, cwd.join("a.jpg"));
        assert_eq!(
            links[0].1.file_name().unwrap().to_str().unwrap(),
            "000000.jpg"
        );
        assert_eq!(
            links[1].1.file_name().unwrap().to_str().unwrap(),
            "000001.jpg"
        );
        assert_eq!(
            links[2].1.file_name().unwrap().to_str().unwrap(),
            "000002.jpg"
        );
    }

    #[test]
    fn test_encoder_sees_pattern_rate_and_output() {
        let stager = MockStager::default();
        let encoder = MockEncoder::default();
        let config = RunConfig::default();

        assemble(&paths(&["a.jpg"]), "movie_007", &config, &stager, &encoder).unwrap();

        let invocations = encoder.invocations.borrow();
        assert_eq!(invocations.len(), 1);
        let (pattern, rate, output) = &invocations[0];
        assert_eq!(
            pattern.file_name().unwrap().to_str().unwrap(),
            "%06d.jpg"
        );
        assert_eq!(pattern.parent().unwrap(), Path::new("/tmp/mock.000001"));
        assert_eq!(*rate, 4);
        assert_eq!(output, &PathBuf::from("movie_007.mp4"));
    }

    #[test]
    fn test_nonzero_encoder_code_is_returned_not_raised() {
        let stager = MockStager::default();
        let encoder = MockEncoder {
            exit_code: 1,
            ..MockEncoder::default()
        };
        let config = RunConfig::default();

        let code = assemble(&paths(&["a.jpg"]), "movie_000", &config, &stager, &encoder).unwrap();
        assert_eq!(code, 1);
    }

    #[test]
    fn test_staging_removed_after_encoder_failure() {
        let stager = MockStager::default();
        let encoder = MockEncoder {
            fail_spawn: true,
            ..MockEncoder::default()
        };
        let config = RunConfig::default();

        let err = assemble(&paths(&["a.jpg"]), "movie_000", &config, &stager, &encoder)
            .unwrap_err();
        assert!(matches!(err, MkmoviesError::Encoder { .. }));
        assert_eq!(
            stager.removed.borrow().as_slice(),
            &[PathBuf::from("/tmp/mock.000001")]
        );
    }

    #[test]
    fn test_staging_removed_after_nonzero_encoder_code() {
        let stager = MockStager::default();
        let encoder = MockEncoder {
            exit_code: 187,
            ..MockEncoder::default()
        };
        let config = RunConfig::default();

        let code = assemble(&paths(&["a.jpg"]), "movie_000", &config, &stager, &encoder).unwrap();
        assert_eq!(code, 187);
        assert_eq!(stager.removed.borrow().len(), 1);
    }

    #[test]
    fn test_link_failure_aborts_group_and_cleans_up() {
        let stager = MockStager {
            fail_link_at: Some(1),
            ..MockStager::default()
        };
        let encoder = MockEncoder::default();
        let config = RunConfig::default();

        let files = paths(&["a.jpg", "b.jpg", "c.jpg"]);
        let err = assemble(&files, "movie_000", &config, &stager, &encoder).unwrap_err();
        assert!(matches!(err, MkmoviesError::Link { .. }));

        // Only the first link landed, the encoder never ran, and the
        // staging directory still came down.
        assert_eq!(stager.links.borrow().len(), 1);
        assert!(encoder.invocations.borrow().is_empty());
        assert_eq!(stager.removed.borrow().len(), 1);
    }

    #[test]
    fn test_staging_dir_failure_aborts_before_linking() {
        let stager = MockStager {
            fail_dir: true,
            ..MockStager::default()
        };
        let encoder = MockEncoder::default();
        let config = RunConfig::default();

        let err = assemble(&paths(&["a.jpg"]), "movie_000", &config, &stager, &encoder)
            .unwrap_err();
        assert!(matches!(err, MkmoviesError::StagingDir { code: 1 }));
        assert!(stager.links.borrow().is_empty());
        assert!(stager.removed.borrow().is_empty());
    }
}
