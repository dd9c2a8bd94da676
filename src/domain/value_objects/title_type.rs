use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::shared::errors::AppError;

/// Kind of tracked media. Ranobe is a manga-typed record whose Shikimori
/// URL contains `/ranobe/`; MyAnimeList files those under manga.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TitleType {
    #[default]
    Anime,
    Manga,
    Ranobe,
}

impl TitleType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TitleType::Anime => "anime",
            TitleType::Manga => "manga",
            TitleType::Ranobe => "ranobe",
        }
    }
}

impl fmt::Display for TitleType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for TitleType {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "anime" => Ok(TitleType::Anime),
            "manga" => Ok(TitleType::Manga),
            "ranobe" => Ok(TitleType::Ranobe),
            other => Err(AppError::ValidationError(format!(
                "Unknown title type '{}'",
                other
            ))),
        }
    }
}
