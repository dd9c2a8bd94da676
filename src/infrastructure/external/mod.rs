pub mod common;
pub mod myanimelist;
pub mod shikimori;

use crate::domain::entities::Title;
use crate::domain::value_objects::{ListSource, TitleType};
use crate::shared::errors::{AppError, AppResult};

use myanimelist::{MalListEntry, MalMapper};
use shikimori::{ShikimoriMapper, ShikimoriUserRate};

/// Normalize one raw record of the given source into a canonical Title.
///
/// The per-source variants are plain functions selected by tag, not
/// dynamic dispatch; malformed records surface as validation errors.
pub fn normalize(source: ListSource, raw: serde_json::Value) -> AppResult<Title> {
    match source {
        ListSource::Shikimori => {
            let rate: ShikimoriUserRate = serde_json::from_value(raw).map_err(|e| {
                AppError::ValidationError(format!("Malformed shikimori record: {}", e))
            })?;
            ShikimoriMapper::to_title(rate)
        }
        ListSource::MyAnimeList => {
            let entry: MalListEntry = serde_json::from_value(raw).map_err(|e| {
                AppError::ValidationError(format!("Malformed myanimelist record: {}", e))
            })?;
            let kind = MalMapper::kind_of(&entry.node, TitleType::Anime);
            MalMapper::to_title(entry, kind)
        }
    }
}
