//! Path resolution for pomowork configuration and data files.
//!
//! All pomowork data is stored in `~/.pomowork/`:
//! - `config.yaml` - Configuration file
//! - `pomowork.db` - `SQLite` database holding the to-do list
//! - `pomowork.log` - Log output (the terminal UI owns the screen)

use std::path::PathBuf;

use crate::error::PomoworkError;

/// Paths to pomowork configuration and data files.
#[derive(Debug, Clone)]
pub struct Paths {
    /// Root directory: `~/.pomowork/`
    pub root: PathBuf,
    /// Config file: `~/.pomowork/config.yaml`
    pub config_file: PathBuf,
    /// Database file: `~/.pomowork/pomowork.db`
    pub database: PathBuf,
    /// Log file: `~/.pomowork/pomowork.log`
    pub log_file: PathBuf,
}

impl Paths {
    /// Create paths based on the user's home directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the home directory cannot be determined.
    pub fn new() -> Result<Self, PomoworkError> {
        let home = std::env::var("HOME").map_err(|_| {
            PomoworkError::Config("Could not determine home directory".to_string())
        })?;

        Ok(Self::with_root(PathBuf::from(home).join(".pomowork")))
    }

    /// Create paths with a custom root directory (useful for testing).
    #[must_use]
    pub fn with_root(root: PathBuf) -> Self {
        Self {
            config_file: root.join("config.yaml"),
            database: root.join("pomowork.db"),
            log_file: root.join("pomowork.log"),
            root,
        }
    }

    /// Ensure the root directory exists.
    ///
    /// # Errors
    ///
    /// Returns an error if directory creation fails.
    pub fn ensure_dirs(&self) -> Result<(), PomoworkError> {
        if !self.root.exists() {
            std::fs::create_dir_all(&self.root).map_err(|e| {
                PomoworkError::Config(format!(
                    "Failed to create directory {}: {e}",
                    self.root.display()
                ))
            })?;
        }
        Ok(())
    }
}

impl Default for Paths {
    fn default() -> Self {
        Self::new().unwrap_or_else(|_| Self::with_root(PathBuf::from(".pomowork")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_paths_with_root() {
        let root = PathBuf::from("/tmp/test-pomowork");
        let paths = Paths::with_root(root.clone());

        assert_eq!(paths.root, root);
        assert_eq!(paths.config_file, root.join("config.yaml"));
        assert_eq!(paths.database, root.join("pomowork.db"));
        assert_eq!(paths.log_file, root.join("pomowork.log"));
    }

    #[test]
    fn test_ensure_dirs() {
        let temp_dir = TempDir::new().unwrap();
        let paths = Paths::with_root(temp_dir.path().join("nested").join(".pomowork"));

        paths.ensure_dirs().unwrap();
        assert!(paths.root.exists());

        // Second call is a no-op
        paths.ensure_dirs().unwrap();
    }
}
