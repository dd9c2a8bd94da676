use std::fs;
use std::path::{Path, PathBuf};

use chrono::Utc;
use log::info;
use serde::{Deserialize, Serialize};

use crate::domain::value_objects::ListSource;
use crate::shared::errors::{AppError, AppResult};

/// OAuth2 token as returned by either source's token endpoint.
///
/// Shikimori stamps `created_at` itself; MyAnimeList omits it, so the
/// store stamps receipt time before persisting.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OAuthToken {
    pub access_token: String,
    pub token_type: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
    /// Seconds until the access token expires
    #[serde(default)]
    pub expires_in: Option<i64>,
    /// Unix timestamp of issuance
    #[serde(default)]
    pub created_at: Option<i64>,
}

impl OAuthToken {
    /// False once the expiry window has passed, or when expiry cannot be
    /// established at all.
    pub fn is_valid(&self) -> bool {
        match (self.created_at, self.expires_in) {
            (Some(created_at), Some(expires_in)) => {
                Utc::now().timestamp() < created_at + expires_in
            }
            _ => false,
        }
    }

    /// Fill in `created_at` when the server omitted it.
    pub fn stamp(&mut self) {
        if self.created_at.is_none() {
            self.created_at = Some(Utc::now().timestamp());
        }
    }

    /// `Authorization` header value.
    pub fn authorization(&self) -> String {
        format!("{} {}", self.token_type, self.access_token)
    }
}

/// Persists one source's token as `{source}.auth.json` in the config dir.
#[derive(Debug, Clone)]
pub struct TokenStore {
    path: PathBuf,
    source: ListSource,
}

impl TokenStore {
    pub fn new(config_dir: &Path, source: ListSource) -> Self {
        Self {
            path: config_dir.join(format!("{}.auth.json", source)),
            source,
        }
    }

    pub fn load(&self) -> AppResult<Option<OAuthToken>> {
        if !self.path.is_file() {
            return Ok(None);
        }
        let contents = fs::read_to_string(&self.path)?;
        let token = serde_json::from_str(&contents).map_err(|e| {
            AppError::ConfigError(format!("Corrupt token file {}: {}", self.path.display(), e))
        })?;
        Ok(Some(token))
    }

    pub fn save(&self, token: &OAuthToken) -> AppResult<()> {
        fs::write(&self.path, serde_json::to_string_pretty(token)?)?;
        info!("{} token saved", self.source);
        Ok(())
    }
}
