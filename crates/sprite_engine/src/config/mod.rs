//! Configuration files
//!
//! Any serde settings type opts into file loading by implementing
//! [`Config`]. TOML and RON are supported; the format comes from the file
//! extension and missing fields fall back to `Default` when the type uses
//! `#[serde(default)]`.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

/// On-disk config format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    /// `.toml`
    Toml,
    /// `.ron`
    Ron,
}

impl ConfigFormat {
    /// Pick the format from a path's extension, ignoring case
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);
        match extension.as_deref() {
            Some("toml") => Ok(Self::Toml),
            Some("ron") => Ok(Self::Ron),
            _ => Err(ConfigError::UnsupportedFormat(path.to_path_buf())),
        }
    }
}

impl fmt::Display for ConfigFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Toml => f.write_str("TOML"),
            Self::Ron => f.write_str("RON"),
        }
    }
}

/// Settings that can be read from and written to disk
pub trait Config: Serialize + for<'de> Deserialize<'de> + Default {
    /// Parse settings from text in the given format
    fn from_text(text: &str, format: ConfigFormat) -> Result<Self, ConfigError> {
        let parsed = match format {
            ConfigFormat::Toml => toml::from_str(text).map_err(|e| e.to_string()),
            ConfigFormat::Ron => ron::from_str(text).map_err(|e| e.to_string()),
        };
        parsed.map_err(|message| ConfigError::Parse { format, message })
    }

    /// Render settings as pretty-printed text in the given format
    fn to_text(&self, format: ConfigFormat) -> Result<String, ConfigError> {
        match format {
            ConfigFormat::Toml => toml::to_string_pretty(self).map_err(|e| ConfigError::Serialize(e.to_string())),
            ConfigFormat::Ron => ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::new())
                .map_err(|e| ConfigError::Serialize(e.to_string())),
        }
    }

    /// Load settings from a `.toml` or `.ron` file
    fn load_from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let format = ConfigFormat::from_path(path)?;
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        log::debug!("Loading {format} config from {}", path.display());
        Self::from_text(&text, format)
    }

    /// Save settings to a `.toml` or `.ron` file
    fn save_to_file(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        let text = self.to_text(ConfigFormat::from_path(path)?)?;
        std::fs::write(path, text).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Configuration errors
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    /// The file could not be read or written
    #[error("IO error on {}: {source}", .path.display())]
    Io {
        /// File being accessed
        path: PathBuf,
        /// Underlying failure
        source: std::io::Error,
    },

    /// The text is not valid for the format or the settings type
    #[error("{format} parse error: {message}")]
    Parse {
        /// Format the text was read as
        format: ConfigFormat,
        /// Parser message
        message: String,
    },

    /// The settings could not be rendered as text
    #[error("Serialization error: {0}")]
    Serialize(String),

    /// The extension is neither `.toml` nor `.ron`
    #[error("Unsupported config format: {}", .0.display())]
    UnsupportedFormat(PathBuf),
}
