//! Configuration bootstrap.
//!
//! A `config.json` with per-source OAuth application blocks lives in the
//! platform config directory; a default skeleton is written on first run
//! and validation tells the user which values still need filling in.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use log::info;
use serde::{Deserialize, Serialize};

use crate::shared::errors::{AppError, AppResult};

pub const ENV_HOME_PATH: &str = "SHIKISYNC_HOME";
const ENV_APPDATA: &str = "APPDATA";
const ENV_XDG_CONFIG: &str = "XDG_CONFIG_HOME";
const CONFIG_FILE: &str = "config.json";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub shikimori: ShikimoriConfig,
    #[serde(default)]
    pub myanimelist: MalConfig,
}

/// Shikimori OAuth application block. The app name doubles as the
/// User-Agent the API requires.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShikimoriConfig {
    pub app_name: String,
    pub client_id: String,
    pub client_secret: String,
    /// Loopback port for the authorization redirect
    pub port: u16,
    /// Shikimori TLD ("one" or "me")
    pub domain: String,
}

impl Default for ShikimoriConfig {
    fn default() -> Self {
        Self {
            app_name: String::new(),
            client_id: String::new(),
            client_secret: String::new(),
            port: 0,
            domain: "one".to_string(),
        }
    }
}

impl ShikimoriConfig {
    /// Site root, e.g. `https://shikimori.one`.
    pub fn site_url(&self) -> String {
        format!("https://shikimori.{}", self.domain)
    }
}

/// MyAnimeList OAuth application block (public client, PKCE — no secret).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MalConfig {
    pub client_id: String,
    /// Loopback port for the authorization redirect
    pub port: u16,
}

impl Config {
    /// Load `config.json` from `dir`, writing the default skeleton first
    /// when the file does not exist yet.
    pub fn load_or_init(dir: &Path) -> AppResult<Self> {
        fs::create_dir_all(dir)?;
        let path = dir.join(CONFIG_FILE);
        if !path.is_file() {
            info!(
                "Configuration file not found, writing default to {}",
                path.display()
            );
            fs::write(&path, serde_json::to_string_pretty(&Config::default())?)?;
        }
        let config: Config = serde_json::from_str(&fs::read_to_string(&path)?)
            .map_err(|e| AppError::ConfigError(format!("{}: {}", path.display(), e)))?;
        config
            .validate()
            .map_err(|e| AppError::ConfigError(format!("{}: {}", path.display(), e)))?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), String> {
        let shiki = &self.shikimori;
        if shiki.app_name.is_empty()
            || shiki.client_id.is_empty()
            || shiki.client_secret.is_empty()
            || shiki.domain.is_empty()
            || shiki.port == 0
        {
            return Err(
                "incomplete shikimori block; fill in app_name, client_id, client_secret, \
                 port and domain"
                    .to_string(),
            );
        }
        let mal = &self.myanimelist;
        if mal.client_id.is_empty() || mal.port == 0 {
            return Err("incomplete myanimelist block; fill in client_id and port".to_string());
        }
        Ok(())
    }
}

/// Resolve the config directory: explicit override, then the
/// `SHIKISYNC_HOME` environment variable, then the platform default.
pub fn config_dir(override_dir: Option<&Path>) -> AppResult<PathBuf> {
    if let Some(dir) = override_dir {
        return Ok(dir.to_path_buf());
    }
    if let Ok(home) = env::var(ENV_HOME_PATH) {
        return Ok(PathBuf::from(home));
    }
    if cfg!(windows) {
        let appdata = env::var(ENV_APPDATA)
            .map_err(|_| AppError::ConfigError(format!("{} is not set", ENV_APPDATA)))?;
        return Ok(PathBuf::from(appdata).join(".shikisync"));
    }
    if let Ok(xdg) = env::var(ENV_XDG_CONFIG) {
        return Ok(PathBuf::from(xdg).join("shikisync"));
    }
    let home = env::var("HOME")
        .map_err(|_| AppError::ConfigError("HOME is not set".to_string()))?;
    Ok(PathBuf::from(home).join(".config").join("shikisync"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete() -> Config {
        Config {
            shikimori: ShikimoriConfig {
                app_name: "shikisync".to_string(),
                client_id: "abc".to_string(),
                client_secret: "def".to_string(),
                port: 8080,
                domain: "one".to_string(),
            },
            myanimelist: MalConfig {
                client_id: "ghi".to_string(),
                port: 8081,
            },
        }
    }

    #[test]
    fn test_default_config_does_not_validate() {
        assert!(Config::default().validate().is_err());
    }

    #[test]
    fn test_complete_config_validates() {
        assert!(complete().validate().is_ok());
    }

    #[test]
    fn test_first_load_writes_skeleton_and_fails_validation() {
        let dir = tempfile::tempdir().unwrap();
        let err = Config::load_or_init(dir.path()).unwrap_err();
        assert!(matches!(err, AppError::ConfigError(_)));
        assert!(dir.path().join("config.json").is_file());
    }

    #[test]
    fn test_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, serde_json::to_string_pretty(&complete()).unwrap()).unwrap();

        let config = Config::load_or_init(dir.path()).unwrap();
        assert_eq!(config.shikimori.site_url(), "https://shikimori.one");
        assert_eq!(config.myanimelist.port, 8081);
    }

    #[test]
    fn test_explicit_override_wins() {
        let dir = config_dir(Some(Path::new("/tmp/custom"))).unwrap();
        assert_eq!(dir, PathBuf::from("/tmp/custom"));
    }
}
