//! Configuration loading for Kanagi.
//!
//! The TOML file is read into raw `Option`-laden structs, then resolved into
//! [`CoreSettings`] at this boundary. Nothing past this crate ever sees an
//! unvalidated value.
//!
//! ```toml
//! [loop]
//! threshold = 3
//!
//! [lexicon]
//! fire = ["火", "陽", "fire"]
//!
//! [evidence]
//! fallback_law_limit = 4
//! ```

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use kanagi_types::{CoreSettings, EvidencePolicy, KeywordList, Lexicon, LoopPolicy, SettingsError};

/// Environment variable that overrides the config file location.
pub const CONFIG_ENV: &str = "KANAGI_CONFIG";

#[derive(Debug, Default, Deserialize)]
pub struct KanagiConfig {
    #[serde(rename = "loop")]
    pub loop_detection: Option<LoopConfig>,
    pub lexicon: Option<LexiconConfig>,
    pub evidence: Option<EvidenceConfig>,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config at {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse config at {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("invalid config at {}: {source}", path.display())]
    Invalid {
        path: PathBuf,
        source: SettingsError,
    },
}

impl ConfigError {
    #[must_use]
    pub fn path(&self) -> &Path {
        match self {
            ConfigError::Read { path, .. }
            | ConfigError::Parse { path, .. }
            | ConfigError::Invalid { path, .. } => path,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct LoopConfig {
    /// Consecutive identical signatures before the loop is resolved. Minimum 2.
    pub threshold: Option<u32>,
}

/// Keyword overrides. Each list that is present replaces the built-in one.
#[derive(Debug, Default, Deserialize)]
pub struct LexiconConfig {
    pub tai: Option<Vec<String>>,
    pub yo: Option<Vec<String>>,
    pub fire: Option<Vec<String>>,
    pub water: Option<Vec<String>>,
    pub domain_terms: Option<Vec<String>>,
}

#[derive(Debug, Default, Deserialize)]
pub struct EvidenceConfig {
    pub fallback_law_limit: Option<usize>,
}

impl KanagiConfig {
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(err) => {
                tracing::warn!("Failed to read config at {:?}: {}", path, err);
                return Err(ConfigError::Read {
                    path: path.to_path_buf(),
                    source: err,
                });
            }
        };

        match toml::from_str(&content) {
            Ok(config) => Ok(config),
            Err(err) => {
                tracing::warn!("Failed to parse config at {:?}: {}", path, err);
                Err(ConfigError::Parse {
                    path: path.to_path_buf(),
                    source: err,
                })
            }
        }
    }

    /// `KANAGI_CONFIG` when set and non-empty, else `~/.kanagi/config.toml`.
    #[must_use]
    pub fn path() -> Option<PathBuf> {
        select_path(std::env::var_os(CONFIG_ENV), dirs::home_dir())
    }

    /// Validate and fill defaults for every section.
    pub fn resolve(self) -> Result<CoreSettings, SettingsError> {
        let loop_policy = match self.loop_detection.and_then(|l| l.threshold) {
            Some(threshold) => LoopPolicy::new(threshold)?,
            None => LoopPolicy::default(),
        };

        let lexicon = match self.lexicon {
            Some(raw) => raw.resolve()?,
            None => Lexicon::default(),
        };

        let evidence = match self.evidence.and_then(|e| e.fallback_law_limit) {
            Some(limit) => EvidencePolicy::new(limit)?,
            None => EvidencePolicy::default(),
        };

        Ok(CoreSettings {
            loop_policy,
            lexicon,
            evidence,
        })
    }
}

impl LexiconConfig {
    fn resolve(self) -> Result<Lexicon, SettingsError> {
        let defaults = Lexicon::default();
        let pick = |name: &'static str, raw: Option<Vec<String>>, default: KeywordList| match raw {
            Some(words) => KeywordList::new(name, words),
            None => Ok(default),
        };
        Ok(Lexicon {
            tai: pick("tai", self.tai, defaults.tai)?,
            yo: pick("yo", self.yo, defaults.yo)?,
            fire: pick("fire", self.fire, defaults.fire)?,
            water: pick("water", self.water, defaults.water)?,
            domain_terms: pick("domain_terms", self.domain_terms, defaults.domain_terms)?,
        })
    }
}

/// Load and resolve settings from the default location.
///
/// A missing file yields defaults; an unreadable, unparsable or invalid one
/// is an error carrying the path.
pub fn load_settings() -> Result<CoreSettings, ConfigError> {
    let Some(path) = KanagiConfig::path() else {
        return Ok(CoreSettings::default());
    };
    if !path.exists() {
        tracing::debug!(path = %path.display(), "no config file, using defaults");
        return Ok(CoreSettings::default());
    }
    load_settings_from(&path)
}

pub fn load_settings_from(path: &Path) -> Result<CoreSettings, ConfigError> {
    KanagiConfig::load_from(path)?
        .resolve()
        .map_err(|source| {
            tracing::warn!("Invalid config at {:?}: {}", path, source);
            ConfigError::Invalid {
                path: path.to_path_buf(),
                source,
            }
        })
}

fn select_path(override_path: Option<OsString>, home: Option<PathBuf>) -> Option<PathBuf> {
    match override_path {
        Some(path) if !path.is_empty() => Some(PathBuf::from(path)),
        _ => home.map(|home| home.join(".kanagi").join("config.toml")),
    }
}
