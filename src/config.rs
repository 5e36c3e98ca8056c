use serde::{Deserialize, Serialize};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::{
    app_dirs::AppDirs,
    error::{KeyrushError, Result},
    game::{GameSettings, DEFAULT_BUDGET_SECS, DEFAULT_SEQUENCE_LENGTH},
    sequence::{Alphabet, LATIN_LETTERS},
    ui::theme::Theme,
};

/// Parameters of the earliest, shorter variant of the game
pub const CLASSIC_BUDGET_SECS: u32 = 10;
pub const CLASSIC_ALPHABET: &str = "ABCD";

/// Longest sequence the play screen can show on one line of an 80 column terminal
pub const MAX_SEQUENCE_LENGTH: usize = 20;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub budget_secs: u32,
    pub sequence_length: usize,
    pub alphabet: String,
    pub theme: Theme,
    pub sound: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            budget_secs: DEFAULT_BUDGET_SECS,
            sequence_length: DEFAULT_SEQUENCE_LENGTH,
            alphabet: LATIN_LETTERS.to_string(),
            theme: Theme::default(),
            sound: true,
        }
    }
}

impl Config {
    pub fn classic() -> Self {
        Self {
            budget_secs: CLASSIC_BUDGET_SECS,
            alphabet: CLASSIC_ALPHABET.to_string(),
            ..Self::default()
        }
    }

    pub fn settings(&self) -> Result<GameSettings> {
        if self.budget_secs == 0 {
            return Err(KeyrushError::InvalidSetting {
                name: "budget_secs",
                reason: "must be at least one second".into(),
            });
        }
        if self.sequence_length == 0 {
            return Err(KeyrushError::InvalidSetting {
                name: "sequence_length",
                reason: "must be at least one letter".into(),
            });
        }
        if self.sequence_length > MAX_SEQUENCE_LENGTH {
            return Err(KeyrushError::InvalidSetting {
                name: "sequence_length",
                reason: format!("must be at most {MAX_SEQUENCE_LENGTH} letters"),
            });
        }

        Ok(GameSettings {
            budget_secs: self.budget_secs,
            sequence_length: self.sequence_length,
        })
    }

    pub fn alphabet(&self) -> Result<Alphabet> {
        Alphabet::parse(&self.alphabet)
    }
}

pub trait ConfigStore {
    fn load(&self) -> Config;
    fn save(&self, cfg: &Config) -> Result<()>;
}

#[derive(Debug, Clone)]
pub struct FileConfigStore {
    path: PathBuf,
}

impl FileConfigStore {
    #[allow(clippy::new_without_default)]
    pub fn new() -> Self {
        Self {
            path: AppDirs::config_path(),
        }
    }

    pub fn with_path<P: AsRef<Path>>(p: P) -> Self {
        Self {
            path: p.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Default for FileConfigStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigStore for FileConfigStore {
    fn load(&self) -> Config {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "no config file, using defaults");
                return Config::default();
            }
            Err(err) => {
                warn!(path = %self.path.display(), %err, "could not read config, using defaults");
                return Config::default();
            }
        };

        match serde_json::from_slice::<Config>(&bytes) {
            Ok(cfg) => cfg,
            Err(err) => {
                warn!(path = %self.path.display(), %err, "malformed config, using defaults");
                Config::default()
            }
        }
    }

    fn save(&self, cfg: &Config) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let data = serde_json::to_vec_pretty(cfg)?;
        fs::write(&self.path, data)?;
        Ok(())
    }
}
