use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::shared::errors::AppError;

/// Supported tracked-list services
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ListSource {
    #[serde(rename = "shikimori")]
    Shikimori,
    #[serde(rename = "myanimelist")]
    MyAnimeList,
}

impl ListSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            ListSource::Shikimori => "shikimori",
            ListSource::MyAnimeList => "myanimelist",
        }
    }

    /// The counterpart service in a two-sided reconciliation.
    pub fn other(&self) -> Self {
        match self {
            ListSource::Shikimori => ListSource::MyAnimeList,
            ListSource::MyAnimeList => ListSource::Shikimori,
        }
    }
}

impl fmt::Display for ListSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ListSource {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "shikimori" => Ok(ListSource::Shikimori),
            "myanimelist" => Ok(ListSource::MyAnimeList),
            other => Err(AppError::UnsupportedSource(format!(
                "'{}' (expected 'shikimori' or 'myanimelist')",
                other
            ))),
        }
    }
}
