use std::{
    fs,
    path::{Path, PathBuf},
};

use serde::Deserialize;

use crate::error::{LibraryError, Result};

/// Settings for the command-line front end
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LibraryConfig {
    /// Name given to a freshly created library
    pub library_name: String,
    /// Where the library snapshot is kept
    pub snapshot_path: PathBuf,
    /// Load the demonstration data set when no snapshot exists yet
    pub seed_sample_data: bool,
    /// Tracing filter used when `RUST_LOG` is unset
    pub log_filter: String,
}

impl Default for LibraryConfig {
    fn default() -> Self {
        Self {
            library_name: "Narnia".to_string(),
            snapshot_path: PathBuf::from("library.json"),
            seed_sample_data: true,
            log_filter: "lending_library=info".to_string(),
        }
    }
}

impl LibraryConfig {
    /// Read a JSON config file; a missing file means defaults
    ///
    /// # Errors
    ///
    /// Returns a `LibraryError::Config` if the file exists but cannot be read
    /// or is not valid config JSON
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let contents = fs::read_to_string(path)
            .map_err(|e| LibraryError::Config(format!("Failed to read {}: {e}", path.display())))?;
        serde_json::from_str(&contents)
            .map_err(|e| LibraryError::Config(format!("Failed to parse {}: {e}", path.display())))
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::LibraryConfig;
    use crate::error::ErrorKind;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = LibraryConfig::load(&dir.path().join("absent.json")).unwrap();
        assert_eq!(config, LibraryConfig::default());
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{ "library_name": "Cair Paravel", "seed_sample_data": false }"#)
            .unwrap();

        let config = LibraryConfig::load(&path).unwrap();
        assert_eq!(config.library_name, "Cair Paravel");
        assert!(!config.seed_sample_data);
        assert_eq!(config.snapshot_path, LibraryConfig::default().snapshot_path);
    }

    #[test]
    fn test_malformed_file_is_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, "not json").unwrap();

        let err = LibraryConfig::load(&path).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Config);
    }
}
