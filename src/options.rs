//! Configuration for the revving engine.
//!
//! [`RevverOptions`] is an explicit, validated configuration record built
//! through [`RevverOptionsBuilder`]. Validation happens eagerly in
//! [`RevverOptionsBuilder::build`], so a constructed `RevverOptions` always
//! refers to an existing, writable destination directory.

use std::path::{Path, PathBuf};

use crate::error::{Result, RevError};

/// Validated configuration held by a [`Revver`](crate::revver::Revver).
///
/// The engine itself is otherwise stateless; one options value can serve
/// any number of `rev_file` calls that share a destination directory.
#[derive(Clone, Debug)]
pub struct RevverOptions {
    destination_directory: PathBuf,
    clean_up: bool,
    revision_count: u32,
}

impl RevverOptions {
    /// Create a new builder for constructing `RevverOptions`.
    pub fn builder() -> RevverOptionsBuilder {
        RevverOptionsBuilder::default()
    }

    /// The directory revved copies are placed in, with trailing separators
    /// stripped.
    pub fn destination_directory(&self) -> &Path {
        &self.destination_directory
    }

    /// Whether superseded revisions are deleted after a rev.
    pub fn clean_up(&self) -> bool {
        self.clean_up
    }

    /// The number of old revisions kept on disk when cleanup is enabled.
    ///
    /// The current revision is always retained; this count applies to its
    /// predecessors, so `0` keeps only the current revision.
    pub fn revision_count(&self) -> u32 {
        self.revision_count
    }
}

/// Builder for [`RevverOptions`].
#[derive(Debug)]
pub struct RevverOptionsBuilder {
    destination_directory: Option<PathBuf>,
    clean_up: bool,
    revision_count: u32,
}

impl Default for RevverOptionsBuilder {
    fn default() -> Self {
        Self {
            destination_directory: None,
            clean_up: false,
            // One retained old revision unless the caller says otherwise;
            // the CLI surface passes its own default of 0 explicitly
            revision_count: 1,
        }
    }
}

impl RevverOptionsBuilder {
    /// Set the destination directory for revved copies.
    pub fn destination_directory(mut self, dir: impl Into<PathBuf>) -> Self {
        self.destination_directory = Some(dir.into());
        self
    }

    /// Enable or disable deletion of superseded revisions.
    pub fn clean_up(mut self, clean_up: bool) -> Self {
        self.clean_up = clean_up;
        self
    }

    /// Set the number of old revisions to retain when cleanup is enabled.
    pub fn revision_count(mut self, count: u32) -> Self {
        self.revision_count = count;
        self
    }

    /// Build the options, validating the destination directory.
    ///
    /// # Errors
    ///
    /// Returns [`RevError::Config`] if no destination directory was set,
    /// [`RevError::NotADirectory`] if it does not exist or is not a
    /// directory, and [`RevError::UnwritableDirectory`] if it cannot be
    /// written to.
    pub fn build(self) -> Result<RevverOptions> {
        let dir = self.destination_directory.ok_or_else(|| {
            RevError::Config("The destination directory has not been set".to_string())
        })?;
        let dir = strip_trailing_separators(&dir);

        if !dir.is_dir() {
            return Err(RevError::NotADirectory(dir));
        }

        let metadata = dir
            .metadata()
            .map_err(|_| RevError::NotADirectory(dir.clone()))?;
        if metadata.permissions().readonly() {
            return Err(RevError::UnwritableDirectory(dir));
        }

        Ok(RevverOptions {
            destination_directory: dir,
            clean_up: self.clean_up,
            revision_count: self.revision_count,
        })
    }
}

/// Remove trailing path separators so joining a filename never produces
/// doubled separators.
fn strip_trailing_separators(dir: &Path) -> PathBuf {
    let text = dir.to_string_lossy();
    let trimmed = text.trim_end_matches(['/', '\\']);
    if trimmed.is_empty() {
        dir.to_path_buf()
    } else {
        PathBuf::from(trimmed)
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    #[test]
    fn test_build_with_valid_directory() {
        let temp_dir = TempDir::new().unwrap();
        let options = RevverOptions::builder()
            .destination_directory(temp_dir.path())
            .build()
            .unwrap();

        assert_eq!(options.destination_directory(), temp_dir.path());
        assert!(!options.clean_up());
        assert_eq!(options.revision_count(), 1);
    }

    #[test]
    fn test_trailing_separators_are_stripped() {
        let temp_dir = TempDir::new().unwrap();
        let with_slash = format!("{}//", temp_dir.path().display());
        let options = RevverOptions::builder()
            .destination_directory(with_slash)
            .build()
            .unwrap();

        assert_eq!(options.destination_directory(), temp_dir.path());
    }

    #[test]
    fn test_missing_directory_is_rejected() {
        let result = RevverOptions::builder().build();
        assert!(matches!(result, Err(RevError::Config(_))));
    }

    #[test]
    fn test_nonexistent_directory_is_rejected() {
        let result = RevverOptions::builder()
            .destination_directory("/nonexistent/destination")
            .build();
        assert!(matches!(result, Err(RevError::NotADirectory(_))));
    }

    #[test]
    fn test_file_as_directory_is_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let file = temp_dir.path().join("not-a-dir");
        std::fs::write(&file, "x").unwrap();

        let result = RevverOptions::builder().destination_directory(&file).build();
        assert!(matches!(result, Err(RevError::NotADirectory(_))));
    }

    #[test]
    #[cfg(unix)]
    fn test_readonly_directory_is_rejected() {
        use std::fs;
        use std::os::unix::fs::PermissionsExt;

        let temp_dir = TempDir::new().unwrap();
        let dir = temp_dir.path().join("readonly");
        fs::create_dir(&dir).unwrap();
        fs::set_permissions(&dir, fs::Permissions::from_mode(0o555)).unwrap();

        let result = RevverOptions::builder().destination_directory(&dir).build();

        // Restore permissions so the TempDir can be cleaned up
        fs::set_permissions(&dir, fs::Permissions::from_mode(0o755)).unwrap();
        assert!(matches!(result, Err(RevError::UnwritableDirectory(_))));
    }

    #[test]
    fn test_builder_settings_are_kept() {
        let temp_dir = TempDir::new().unwrap();
        let options = RevverOptions::builder()
            .destination_directory(temp_dir.path())
            .clean_up(true)
            .revision_count(3)
            .build()
            .unwrap();

        assert!(options.clean_up());
        assert_eq!(options.revision_count(), 3);
    }
}
