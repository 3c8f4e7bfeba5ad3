//! Layered CLI settings: defaults, then the config file, then flags and
//! environment.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use tq_game::GameConfig;
use tq_oracle::{DEFAULT_TIMEOUT, HttpOracle};

/// Contents of `config.toml`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileSettings {
    pub endpoint: Option<String>,
    pub token: Option<String>,
    pub timeout_secs: Option<f64>,
    pub max_questions: Option<u32>,
}

/// Values given on the command line or through the environment.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub endpoint: Option<String>,
    pub token: Option<String>,
    pub timeout_secs: Option<f64>,
    pub max_questions: Option<u32>,
}

/// Resolved settings for one run.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub endpoint: Option<String>,
    pub token: Option<String>,
    pub timeout: Duration,
    pub max_questions: u32,
}

impl Default for Settings {
    fn default() -> Self {
        let game = GameConfig::default();
        Self {
            endpoint: None,
            token: None,
            timeout: DEFAULT_TIMEOUT,
            max_questions: game.max_questions,
        }
    }
}

/// `<config dir>/twenty-questions/config.toml`, if the platform has a config dir.
pub fn default_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("twenty-questions").join("config.toml"))
}

impl Settings {
    /// Load settings from `path`, or from the default location if it exists.
    ///
    /// An explicit path that cannot be read is an error; a missing default
    /// file is not.
    pub fn load(path: Option<&Path>) -> Result<Self, String> {
        let file = match path {
            Some(path) => read_file(path)?,
            None => match default_path() {
                Some(path) if path.is_file() => read_file(&path)?,
                _ => FileSettings::default(),
            },
        };
        Self::default().with_file(file)
    }

    /// Apply values from a config file.
    pub fn with_file(self, file: FileSettings) -> Result<Self, String> {
        self.with_overrides(Overrides {
            endpoint: file.endpoint,
            token: file.token,
            timeout_secs: file.timeout_secs,
            max_questions: file.max_questions,
        })
    }

    /// Apply every value that is set, leaving the rest untouched.
    pub fn with_overrides(mut self, overrides: Overrides) -> Result<Self, String> {
        if let Some(endpoint) = overrides.endpoint {
            self.endpoint = Some(endpoint);
        }
        if let Some(token) = overrides.token {
            self.token = Some(token);
        }
        if let Some(secs) = overrides.timeout_secs {
            self.timeout = parse_timeout(secs)?;
        }
        if let Some(max) = overrides.max_questions {
            if max == 0 {
                return Err("max questions must be at least 1".into());
            }
            self.max_questions = max;
        }
        Ok(self)
    }

    /// Build the HTTP oracle these settings describe.
    pub fn oracle(&self) -> Result<HttpOracle, String> {
        let endpoint = self.endpoint.as_deref().ok_or(
            "no oracle endpoint configured (use --endpoint, TQ_ENDPOINT, or the config file)",
        )?;
        let oracle = HttpOracle::with_timeout(endpoint, self.timeout).map_err(|e| e.to_string())?;
        tracing::debug!(
            endpoint = %oracle.endpoint(),
            timeout_ms = oracle.timeout().as_millis() as u64,
            authenticated = self.token.is_some(),
            "oracle client ready"
        );
        Ok(match &self.token {
            Some(token) => oracle.with_bearer_token(token.clone()),
            None => oracle,
        })
    }

    /// Game configuration for these settings.
    pub fn game_config(&self) -> GameConfig {
        GameConfig::default()
            .with_max_questions(self.max_questions)
            .with_oracle_timeout(self.timeout)
    }
}

fn read_file(path: &Path) -> Result<FileSettings, String> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| format!("cannot read config '{}': {e}", path.display()))?;
    toml::from_str(&content).map_err(|e| format!("invalid config '{}': {e}", path.display()))
}

fn parse_timeout(secs: f64) -> Result<Duration, String> {
    match Duration::try_from_secs_f64(secs) {
        Ok(timeout) if !timeout.is_zero() => Ok(timeout),
        _ => Err(format!("invalid timeout '{secs}': expected a positive number of seconds")),
    }
}
