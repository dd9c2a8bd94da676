use crate::domain::entities::{Title, TitleData};
use crate::domain::value_objects::{TitleType, WatchStatus};
use crate::domain::TitleList;
use crate::shared::errors::AppResult;

use super::dto::{MalListEntry, MalNode};

// MAL media_type values filed under manga. Light novels are manga on MAL;
// the ranobe kind only exists on the Shikimori side.
const MANGA_MEDIA_TYPES: [&str; 8] = [
    "manga",
    "novel",
    "light_novel",
    "one_shot",
    "doujinshi",
    "manhwa",
    "manhua",
    "oel",
];

/// Maps MyAnimeList `{node, list_status}` entries into canonical titles,
/// translating the MAL status vocabulary and counter field names.
#[derive(Debug, Clone)]
pub struct MalMapper;

impl MalMapper {
    /// Media kind of a node. `media_type` decides when present; otherwise
    /// the kind of the endpoint the entry was fetched from applies.
    pub fn kind_of(node: &MalNode, endpoint_kind: TitleType) -> TitleType {
        match node.media_type.as_deref() {
            Some(media_type) if MANGA_MEDIA_TYPES.contains(&media_type) => TitleType::Manga,
            Some(_) => TitleType::Anime,
            None => endpoint_kind,
        }
    }

    pub fn to_title(entry: MalListEntry, endpoint_kind: TitleType) -> AppResult<Title> {
        let raw = serde_json::to_value(&entry)?;
        let MalListEntry { node, list_status } = entry;

        let rewatching = list_status.is_rewatching.unwrap_or(false)
            || list_status.is_rereading.unwrap_or(false);
        let watch_status = WatchStatus::from_myanimelist(&list_status.status, rewatching)?;
        let rewatches = list_status
            .num_times_rewatched
            .or(list_status.num_times_reread)
            .unwrap_or(0);

        Title::new(TitleData {
            id: node.id,
            title_type: Self::kind_of(&node, endpoint_kind),
            name: node.title,
            watch_status,
            episodes: list_status.num_episodes_watched.unwrap_or(0),
            chapters: list_status.num_chapters_read.unwrap_or(0),
            volumes: list_status.num_volumes_read.unwrap_or(0),
            score: list_status.score.unwrap_or(0),
            rewatches,
            comment: list_status.comments.unwrap_or_default(),
            raw: Some(raw),
        })
    }

    pub fn to_title_list(
        entries: Vec<MalListEntry>,
        endpoint_kind: TitleType,
    ) -> AppResult<TitleList> {
        entries
            .into_iter()
            .map(|entry| Self::to_title(entry, endpoint_kind))
            .collect::<AppResult<TitleList>>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(status: &str, extra: serde_json::Value) -> MalListEntry {
        let mut list_status = serde_json::json!({"status": status, "score": 7});
        for (key, value) in extra.as_object().cloned().unwrap_or_default() {
            list_status[key.as_str()] = value;
        }
        serde_json::from_value(serde_json::json!({
            "node": {"id": 30, "title": "Neon Genesis Evangelion", "media_type": "tv"},
            "list_status": list_status,
        }))
        .unwrap()
    }

    #[test]
    fn test_plan_to_watch_normalizes_to_planned() {
        let title =
            MalMapper::to_title(entry("plan_to_watch", serde_json::json!({})), TitleType::Anime)
                .unwrap();
        assert_eq!(title.watch_status(), WatchStatus::Planned);
    }

    #[test]
    fn test_rereading_flag_forces_rewatching() {
        let title = MalMapper::to_title(
            entry("reading", serde_json::json!({"is_rereading": true})),
            TitleType::Manga,
        )
        .unwrap();
        assert_eq!(title.watch_status(), WatchStatus::Rewatching);
    }

    #[test]
    fn test_counters_use_mal_field_names_and_default_to_zero() {
        let title = MalMapper::to_title(
            entry(
                "watching",
                serde_json::json!({"num_episodes_watched": 18}),
            ),
            TitleType::Anime,
        )
        .unwrap();
        assert_eq!(title.episodes(), 18);
        assert_eq!(title.chapters(), 0);
        assert_eq!(title.volumes(), 0);
    }

    #[test]
    fn test_rewatch_count_falls_back_to_reread_count() {
        let title = MalMapper::to_title(
            entry("completed", serde_json::json!({"num_times_reread": 2})),
            TitleType::Manga,
        )
        .unwrap();
        assert_eq!(title.rewatches(), 2);
    }

    #[test]
    fn test_missing_comment_becomes_empty_string() {
        let title =
            MalMapper::to_title(entry("watching", serde_json::json!({})), TitleType::Anime)
                .unwrap();
        assert_eq!(title.comment(), "");
    }

    #[test]
    fn test_light_novel_media_type_is_manga() {
        let node: MalNode = serde_json::from_value(serde_json::json!({
            "id": 21479, "title": "Sword Art Online", "media_type": "light_novel"
        }))
        .unwrap();
        assert_eq!(MalMapper::kind_of(&node, TitleType::Manga), TitleType::Manga);
    }

    #[test]
    fn test_missing_media_type_falls_back_to_endpoint_kind() {
        let node: MalNode =
            serde_json::from_value(serde_json::json!({"id": 1, "title": "Cowboy Bebop"})).unwrap();
        assert_eq!(MalMapper::kind_of(&node, TitleType::Anime), TitleType::Anime);
    }

    #[test]
    fn test_unknown_status_is_rejected() {
        assert!(
            MalMapper::to_title(entry("binging", serde_json::json!({})), TitleType::Anime)
                .is_err()
        );
    }
}
