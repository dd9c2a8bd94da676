//! Normalization from raw source JSON through the per-source strategy
//! table, plus the error taxonomy at the list boundaries.

use serde_json::json;

use shikisync::domain::value_objects::{ListSource, TitleType, WatchStatus};
use shikisync::domain::TitleList;
use shikisync::infrastructure::external::normalize;
use shikisync::shared::errors::AppError;

#[test]
fn test_shikimori_anime_record_normalizes() {
    let raw = json!({
        "status": "completed",
        "score": 9,
        "text": "rewatch yearly",
        "episodes": 26,
        "chapters": null,
        "volumes": null,
        "rewatches": 3,
        "anime": {"id": 1, "name": "Cowboy Bebop", "url": "/animes/1-cowboy-bebop"}
    });

    let title = normalize(ListSource::Shikimori, raw).unwrap();
    assert_eq!(title.id(), 1);
    assert_eq!(title.title_type(), TitleType::Anime);
    assert_eq!(title.watch_status(), WatchStatus::Completed);
    assert_eq!(title.episodes(), 26);
    assert_eq!(title.chapters(), 0);
    assert_eq!(title.score(), 9);
    assert_eq!(title.rewatches(), 3);
    assert_eq!(title.comment(), "rewatch yearly");
}

#[test]
fn test_shikimori_ranobe_record_normalizes() {
    let raw = json!({
        "status": "watching",
        "score": 0,
        "text": null,
        "episodes": null,
        "chapters": 45,
        "volumes": 11,
        "rewatches": 0,
        "manga": {"id": 9115, "name": "Overlord", "url": "/ranobe/9115-overlord"}
    });

    let title = normalize(ListSource::Shikimori, raw).unwrap();
    assert_eq!(title.title_type(), TitleType::Ranobe);
    assert_eq!(title.watch_count(), 45);
    assert_eq!(title.comment(), "");
}

#[test]
fn test_myanimelist_record_normalizes_with_translation() {
    let raw = json!({
        "node": {"id": 30, "title": "Neon Genesis Evangelion", "media_type": "tv"},
        "list_status": {
            "status": "plan_to_watch",
            "score": 0
        }
    });

    let title = normalize(ListSource::MyAnimeList, raw).unwrap();
    assert_eq!(title.id(), 30);
    assert_eq!(title.title_type(), TitleType::Anime);
    assert_eq!(title.watch_status(), WatchStatus::Planned);
    assert_eq!(title.episodes(), 0);
}

#[test]
fn test_myanimelist_rereading_record_normalizes_to_rewatching() {
    let raw = json!({
        "node": {"id": 2, "title": "Berserk", "media_type": "manga"},
        "list_status": {
            "status": "reading",
            "score": 10,
            "num_chapters_read": 364,
            "num_volumes_read": 41,
            "is_rereading": true,
            "num_times_reread": 1,
            "comments": "again"
        }
    });

    let title = normalize(ListSource::MyAnimeList, raw).unwrap();
    assert_eq!(title.title_type(), TitleType::Manga);
    assert_eq!(title.watch_status(), WatchStatus::Rewatching);
    assert_eq!(title.chapters(), 364);
    assert_eq!(title.rewatches(), 1);
    assert_eq!(title.comment(), "again");
}

#[test]
fn test_malformed_record_is_a_validation_error() {
    let err = normalize(ListSource::MyAnimeList, json!({"nonsense": true})).unwrap_err();
    assert!(matches!(err, AppError::ValidationError(_)));

    let err = normalize(ListSource::Shikimori, json!([1, 2, 3])).unwrap_err();
    assert!(matches!(err, AppError::ValidationError(_)));
}

#[test]
fn test_out_of_range_score_fails_normalization() {
    let raw = json!({
        "status": "watching",
        "score": 11,
        "text": null,
        "episodes": 1,
        "chapters": null,
        "volumes": null,
        "rewatches": 0,
        "anime": {"id": 1, "name": "X", "url": "/animes/1"}
    });
    assert!(matches!(
        normalize(ListSource::Shikimori, raw),
        Err(AppError::ValidationError(_))
    ));
}

#[test]
fn test_unknown_source_name_is_unsupported() {
    let err = "kitsu".parse::<ListSource>().unwrap_err();
    assert!(matches!(err, AppError::UnsupportedSource(_)));
}

#[test]
fn test_normalized_records_round_trip_through_the_list_boundary() {
    let raw = json!({
        "status": "on_hold",
        "score": 6,
        "text": null,
        "episodes": 13,
        "chapters": null,
        "volumes": null,
        "rewatches": 0,
        "anime": {"id": 227, "name": "FLCL", "url": "/animes/227-flcl"}
    });
    let title = normalize(ListSource::Shikimori, raw).unwrap();
    let list: TitleList = [title].into_iter().collect();

    let values: Vec<_> = list
        .to_records()
        .into_iter()
        .map(|record| serde_json::to_value(record).unwrap())
        .collect();
    let rebuilt = TitleList::from_records(values).unwrap();

    assert!(list.delta(&rebuilt).is_empty());
}

#[test]
fn test_garbage_records_are_a_malformed_list() {
    let err = TitleList::from_records(vec![json!("not a record")]).unwrap_err();
    assert!(matches!(err, AppError::MalformedList(_)));
}
