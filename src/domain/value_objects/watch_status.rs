use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::shared::errors::AppError;

/// User's watch status for a title, in the canonical vocabulary shared by
/// both sources. Shikimori already speaks it; MyAnimeList needs translation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WatchStatus {
    #[default]
    Planned,
    Watching,
    Completed,
    Rewatching,
    OnHold,
    Dropped,
}

impl WatchStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            WatchStatus::Planned => "planned",
            WatchStatus::Watching => "watching",
            WatchStatus::Completed => "completed",
            WatchStatus::Rewatching => "rewatching",
            WatchStatus::OnHold => "on_hold",
            WatchStatus::Dropped => "dropped",
        }
    }

    /// Translate a MyAnimeList status literal into the canonical vocabulary.
    ///
    /// An active `is_rewatching`/`is_rereading` flag wins over the literal
    /// status field.
    pub fn from_myanimelist(status: &str, rewatching: bool) -> Result<Self, AppError> {
        if rewatching {
            return Ok(WatchStatus::Rewatching);
        }
        match status {
            "plan_to_watch" | "plan_to_read" => Ok(WatchStatus::Planned),
            "watching" | "reading" => Ok(WatchStatus::Watching),
            "completed" => Ok(WatchStatus::Completed),
            "on_hold" => Ok(WatchStatus::OnHold),
            "dropped" => Ok(WatchStatus::Dropped),
            other => Err(AppError::ValidationError(format!(
                "Unknown MyAnimeList status '{}'",
                other
            ))),
        }
    }
}

impl fmt::Display for WatchStatus {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for WatchStatus {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "planned" => Ok(WatchStatus::Planned),
            "watching" => Ok(WatchStatus::Watching),
            "completed" => Ok(WatchStatus::Completed),
            "rewatching" => Ok(WatchStatus::Rewatching),
            "on_hold" => Ok(WatchStatus::OnHold),
            "dropped" => Ok(WatchStatus::Dropped),
            other => Err(AppError::ValidationError(format!(
                "Unknown watch status '{}'",
                other
            ))),
        }
    }
}
