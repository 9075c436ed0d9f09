use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

const APP_DIR_NAME: &str = "tearleads-search";
const CONFIG_FILE_NAME: &str = "config.json5";
const FILES_DB_NAME: &str = "files.sqlite3";

pub const DEFAULT_DEBOUNCE_MS: u64 = 200;
pub const DEFAULT_RESULT_LIMIT: u16 = 50;
const MAX_DEBOUNCE_MS: u64 = 5_000;
const MAX_RESULT_LIMIT: u16 = 500;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("io error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse {path}: {message}")]
    Parse { path: PathBuf, message: String },
    #[error("failed to encode config: {0}")]
    Encode(String),
    #[error("invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub debounce_ms: u64,
    pub result_limit: u16,
    pub files_db_path: PathBuf,
    #[serde(skip)]
    pub config_path: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        let base = stable_app_data_dir();
        Self {
            debounce_ms: DEFAULT_DEBOUNCE_MS,
            result_limit: DEFAULT_RESULT_LIMIT,
            files_db_path: base.join(FILES_DB_NAME),
            config_path: base.join(CONFIG_FILE_NAME),
        }
    }
}

impl Config {
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    pub fn limit(&self) -> usize {
        self.result_limit as usize
    }
}

pub fn stable_app_data_dir() -> PathBuf {
    let base = std::env::var_os("APPDATA")
        .or_else(|| std::env::var_os("XDG_DATA_HOME"))
        .map(PathBuf::from)
        .or_else(|| {
            std::env::var_os("HOME").map(|home| PathBuf::from(home).join(".local").join("share"))
        })
        .unwrap_or_else(std::env::temp_dir);
    base.join(APP_DIR_NAME)
}

pub fn default_config_path() -> PathBuf {
    stable_app_data_dir().join(CONFIG_FILE_NAME)
}

pub fn validate(cfg: &Config) -> Result<(), String> {
    if cfg.debounce_ms > MAX_DEBOUNCE_MS {
        return Err(format!("debounce_ms must be at most {MAX_DEBOUNCE_MS}"));
    }

    if cfg.result_limit == 0 || cfg.result_limit > MAX_RESULT_LIMIT {
        return Err(format!("result_limit must be between 1 and {MAX_RESULT_LIMIT}"));
    }

    if cfg.files_db_path.as_os_str().is_empty() {
        return Err("files_db_path is required".into());
    }

    if cfg.config_path.as_os_str().is_empty() {
        return Err("config_path is required".into());
    }

    Ok(())
}

pub fn load(path: Option<&Path>) -> Result<Config, ConfigError> {
    let config_path = path
        .map(Path::to_path_buf)
        .unwrap_or_else(default_config_path);

    let mut config = if config_path.exists() {
        let raw = std::fs::read_to_string(&config_path).map_err(|source| ConfigError::Io {
            path: config_path.clone(),
            source,
        })?;
        parse(&config_path, &raw)?
    } else {
        Config::default()
    };
    config.config_path = config_path;

    validate(&config).map_err(ConfigError::Invalid)?;
    Ok(config)
}

pub fn save(cfg: &Config) -> Result<(), ConfigError> {
    validate(cfg).map_err(ConfigError::Invalid)?;
    if let Some(parent) = cfg.config_path.parent() {
        std::fs::create_dir_all(parent).map_err(|source| ConfigError::Io {
            path: parent.to_path_buf(),
            source,
        })?;
    }

    let encoded = if is_toml(&cfg.config_path) {
        toml::to_string_pretty(cfg).map_err(|e| ConfigError::Encode(e.to_string()))?
    } else {
        serde_json::to_string_pretty(cfg).map_err(|e| ConfigError::Encode(e.to_string()))?
    };

    std::fs::write(&cfg.config_path, encoded).map_err(|source| ConfigError::Io {
        path: cfg.config_path.clone(),
        source,
    })
}

fn parse(path: &Path, raw: &str) -> Result<Config, ConfigError> {
    let parsed = if is_toml(path) {
        toml::from_str::<Config>(raw).map_err(|e| e.to_string())
    } else {
        json5::from_str::<Config>(raw).map_err(|e| e.to_string())
    };

    parsed.map_err(|message| ConfigError::Parse {
        path: path.to_path_buf(),
        message,
    })
}

fn is_toml(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case("toml"))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::{is_toml, Config};
    use std::path::Path;

    #[test]
    fn debounce_converts_to_duration() {
        let cfg = Config {
            debounce_ms: 350,
            ..Default::default()
        };
        assert_eq!(cfg.debounce().as_millis(), 350);
    }

    #[test]
    fn detects_toml_by_extension() {
        assert!(is_toml(Path::new("/tmp/config.TOML")));
        assert!(!is_toml(Path::new("/tmp/config.json5")));
        assert!(!is_toml(Path::new("/tmp/config")));
    }
}
