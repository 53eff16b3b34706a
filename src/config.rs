use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
};

use crate::error::ConfigError;
use crate::freetext::history::DEFAULT_HISTORY_LIMIT;

const QUALIFIER: &str = "dev";
const ORGANIZATION: &str = "Folio";
const APPLICATION: &str = "folio";
const CONFIG_FILE_NAME: &str = "config.toml";

/// Language assigned to newly created code blocks
pub const DEFAULT_CODE_LANGUAGE: &str = "javascript";

/// Languages offered by the code block language picker
pub const CODE_LANGUAGES: [&str; 7] = [
    "javascript",
    "typescript",
    "python",
    "html",
    "css",
    "jsx",
    "bash",
];

/// Editor settings, read from `config.toml` in the platform config directory.
///
/// Every key is optional; missing keys keep their defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Language tag given to new code blocks
    pub default_language: String,
    /// Languages the code block editor offers
    pub code_languages: Vec<String>,
    /// Maximum number of free-text snapshots kept; 0 keeps all of them
    pub history_limit: usize,
}

impl Default for EditorConfig {
    fn default() -> Self {
        EditorConfig {
            default_language: DEFAULT_CODE_LANGUAGE.to_string(),
            code_languages: CODE_LANGUAGES.iter().map(|l| l.to_string()).collect(),
            history_limit: DEFAULT_HISTORY_LIMIT,
        }
    }
}

pub fn config_file_path() -> Option<PathBuf> {
    ProjectDirs::from(QUALIFIER, ORGANIZATION, APPLICATION)
        .map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
}

impl EditorConfig {
    /// Load the config from `path`. A missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = match fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(Self::default()),
            Err(err) => return Err(err.into()),
        };
        Ok(toml::from_str::<EditorConfig>(&contents)?)
    }

    /// Load the config from the platform location, falling back to the
    /// defaults (with a warning) when it cannot be read.
    pub fn load_default() -> Self {
        let Some(path) = config_file_path() else {
            return Self::default();
        };
        match Self::load(&path) {
            Ok(config) => config,
            Err(err) => {
                log::warn!("Ignoring config file {}: {err}", path.display());
                Self::default()
            }
        }
    }

    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, self.to_toml()?)?;
        Ok(())
    }

    pub fn is_supported_language(&self, language: &str) -> bool {
        self.code_languages.iter().any(|l| l == language)
    }
}
