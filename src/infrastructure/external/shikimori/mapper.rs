use crate::domain::entities::{Title, TitleData};
use crate::domain::value_objects::TitleType;
use crate::domain::TitleList;
use crate::shared::errors::{AppError, AppResult};

use super::dto::ShikimoriUserRate;

/// Maps Shikimori user-rate records into canonical titles.
///
/// The watch status comes verbatim (Shikimori already speaks the canonical
/// vocabulary); null counters and comments coerce to their defaults.
#[derive(Debug, Clone)]
pub struct ShikimoriMapper;

impl ShikimoriMapper {
    pub fn to_title(rate: ShikimoriUserRate) -> AppResult<Title> {
        let raw = serde_json::to_value(&rate)?;

        let (title_type, brief) = match (&rate.anime, &rate.manga) {
            (Some(brief), _) => (TitleType::Anime, brief),
            (None, Some(brief)) => {
                // Ranobe is served under manga with a /ranobe/ URL.
                let title_type = if brief.url.contains("/ranobe/") {
                    TitleType::Ranobe
                } else {
                    TitleType::Manga
                };
                (title_type, brief)
            }
            (None, None) => {
                return Err(AppError::ValidationError(
                    "Shikimori rate carries neither an anime nor a manga object".to_string(),
                ))
            }
        };

        Title::new(TitleData {
            id: brief.id,
            title_type,
            name: brief.name.clone(),
            watch_status: rate.status.parse()?,
            episodes: rate.episodes.unwrap_or(0),
            chapters: rate.chapters.unwrap_or(0),
            volumes: rate.volumes.unwrap_or(0),
            score: rate.score.unwrap_or(0),
            rewatches: rate.rewatches.unwrap_or(0),
            comment: rate.text.clone().unwrap_or_default(),
            raw: Some(raw),
        })
    }

    pub fn to_title_list(rates: Vec<ShikimoriUserRate>) -> AppResult<TitleList> {
        rates
            .into_iter()
            .map(Self::to_title)
            .collect::<AppResult<TitleList>>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_objects::WatchStatus;

    fn rate_json(kind: &str, url: &str) -> ShikimoriUserRate {
        let mut value = serde_json::json!({
            "status": "watching",
            "score": 8,
            "text": null,
            "episodes": 12,
            "chapters": null,
            "volumes": null,
            "rewatches": 1,
        });
        value[kind] =
            serde_json::json!({"id": 5114, "name": "Fullmetal Alchemist", "url": url});
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_anime_rate_maps_to_anime_title() {
        let title = ShikimoriMapper::to_title(rate_json("anime", "/animes/5114-fma")).unwrap();
        assert_eq!(title.id(), 5114);
        assert_eq!(title.title_type(), TitleType::Anime);
        assert_eq!(title.watch_status(), WatchStatus::Watching);
        assert_eq!(title.episodes(), 12);
        // Nulls coerce to defaults.
        assert_eq!(title.chapters(), 0);
        assert_eq!(title.comment(), "");
    }

    #[test]
    fn test_manga_rate_maps_to_manga_title() {
        let title = ShikimoriMapper::to_title(rate_json("manga", "/mangas/25-berserk")).unwrap();
        assert_eq!(title.title_type(), TitleType::Manga);
    }

    #[test]
    fn test_ranobe_is_detected_by_url() {
        let title = ShikimoriMapper::to_title(rate_json("manga", "/ranobe/9115-overlord")).unwrap();
        assert_eq!(title.title_type(), TitleType::Ranobe);
    }

    #[test]
    fn test_rate_without_nested_object_is_rejected() {
        let rate: ShikimoriUserRate =
            serde_json::from_value(serde_json::json!({"status": "watching"})).unwrap();
        assert!(ShikimoriMapper::to_title(rate).is_err());
    }

    #[test]
    fn test_noncanonical_status_is_rejected() {
        let mut rate = rate_json("anime", "/animes/1");
        rate.status = "binging".to_string();
        assert!(ShikimoriMapper::to_title(rate).is_err());
    }

    #[test]
    fn test_raw_payload_is_retained() {
        let title = ShikimoriMapper::to_title(rate_json("anime", "/animes/5114")).unwrap();
        assert!(title.raw().is_some());
    }
}
