use std::collections::HashMap;

use crate::domain::entities::{Title, TitleRecord};
use crate::domain::services::formatter;
use crate::domain::value_objects::ModifyType;
use crate::shared::errors::{AppError, AppResult};

/// Id-keyed collection of [`Title`]s for one source.
///
/// Ids are unique; insertion order is preserved only so iteration and
/// printing stay deterministic. Merges and deltas produce new lists, the
/// inputs are never mutated.
#[derive(Debug, Clone, Default)]
pub struct TitleList {
    titles: HashMap<i64, Title>,
    order: Vec<i64>,
}

impl TitleList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite by id. An overwrite keeps the original
    /// insertion position; the content is last-writer-wins.
    pub fn append(&mut self, title: Title) {
        let id = title.id();
        if self.titles.insert(id, title).is_none() {
            self.order.push(id);
        }
    }

    /// Merge another list's entries by id, last-writer-wins.
    pub fn update(&mut self, other: TitleList) {
        for title in other.into_iter() {
            self.append(title);
        }
    }

    /// Membership is defined purely by id equality.
    pub fn contains(&self, title: &Title) -> bool {
        self.contains_id(title.id())
    }

    pub fn contains_id(&self, id: i64) -> bool {
        self.titles.contains_key(&id)
    }

    /// Membership test for an externally supplied record form.
    pub fn contains_record(&self, record: &TitleRecord) -> bool {
        self.contains_id(record.id)
    }

    pub fn get(&self, id: i64) -> Option<&Title> {
        self.titles.get(&id)
    }

    pub fn len(&self) -> usize {
        self.titles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.titles.is_empty()
    }

    /// Iterate in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Title> {
        self.order.iter().filter_map(|id| self.titles.get(id))
    }

    /// Reconcile this list (the `self` side) against `other`.
    ///
    /// Every id present only here is emitted as `added` with its full
    /// comparable field set as delta; every id present only in `other` is
    /// emitted as `removed`, symmetrically. Ids present on both sides are
    /// compared field by field over the fixed comparable field list: any
    /// difference emits the `self`-side title as `edited`, its delta
    /// holding the `self`-side value of each differing field. Unchanged
    /// titles are not emitted at all.
    ///
    /// The three buckets partition the id space, so the result holds each
    /// id at most once.
    pub fn delta(&self, other: &TitleList) -> TitleList {
        let mut result = TitleList::new();

        for title in self.iter() {
            if !other.contains_id(title.id()) {
                result.append(title.with_delta(ModifyType::Added, title.snapshot()));
            }
        }

        for title in self.iter() {
            if let Some(theirs) = other.get(title.id()) {
                let changed = title.field_delta(theirs);
                if !changed.is_empty() {
                    result.append(title.with_delta(ModifyType::Edited, changed));
                }
            }
        }

        for title in other.iter() {
            if !self.contains_id(title.id()) {
                result.append(title.with_delta(ModifyType::Removed, title.snapshot()));
            }
        }

        result
    }

    /// Serialized record forms, in insertion order.
    pub fn to_records(&self) -> Vec<TitleRecord> {
        self.iter().map(Title::to_record).collect()
    }

    /// Rebuild a list from serialized records. Anything that does not
    /// match the record shape or fails the title invariants is a
    /// malformed-list usage error, never silently coerced.
    pub fn from_records(records: Vec<serde_json::Value>) -> AppResult<Self> {
        records
            .into_iter()
            .enumerate()
            .map(|(index, value)| {
                let record: TitleRecord = serde_json::from_value(value)
                    .map_err(|e| AppError::MalformedList(format!("record {}: {}", index, e)))?;
                Title::from_record(record)
                    .map_err(|e| AppError::MalformedList(format!("record {}: {}", index, e)))
            })
            .collect()
    }

    /// Render one line per title against `template`, in insertion order.
    pub fn render(&self, template: &str) -> AppResult<Vec<String>> {
        self.iter()
            .map(|title| formatter::render(title, template))
            .collect()
    }
}

impl FromIterator<Title> for TitleList {
    fn from_iter<I: IntoIterator<Item = Title>>(iter: I) -> Self {
        let mut list = TitleList::new();
        for title in iter {
            list.append(title);
        }
        list
    }
}

impl IntoIterator for TitleList {
    type Item = Title;
    type IntoIter = std::vec::IntoIter<Title>;

    fn into_iter(self) -> Self::IntoIter {
        let Self { mut titles, order } = self;
        order
            .into_iter()
            .filter_map(|id| titles.remove(&id))
            .collect::<Vec<_>>()
            .into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::TitleData;
    use crate::domain::value_objects::{TitleType, WatchStatus};
    use serde_json::json;

    fn title(id: i64, name: &str, score: i64) -> Title {
        Title::new(TitleData {
            id,
            title_type: TitleType::Anime,
            name: name.to_string(),
            watch_status: WatchStatus::Watching,
            episodes: 5,
            score,
            ..Default::default()
        })
        .unwrap()
    }

    #[test]
    fn test_append_overwrites_by_id_keeping_position() {
        let mut list = TitleList::new();
        list.append(title(1, "A", 5));
        list.append(title(2, "B", 5));
        list.append(title(1, "A2", 7));

        assert_eq!(list.len(), 2);
        let names: Vec<_> = list.iter().map(|t| t.name().to_string()).collect();
        assert_eq!(names, vec!["A2", "B"]);
    }

    #[test]
    fn test_update_is_last_writer_wins() {
        let mut base: TitleList = [title(1, "A", 5), title(2, "B", 5)].into_iter().collect();
        let incoming: TitleList = [title(2, "B2", 9), title(3, "C", 5)].into_iter().collect();

        base.update(incoming);

        assert_eq!(base.len(), 3);
        assert_eq!(base.get(2).unwrap().score(), 9);
        assert_eq!(base.get(3).unwrap().name(), "C");
    }

    #[test]
    fn test_membership_is_by_id_only() {
        let list: TitleList = [title(1, "A", 5)].into_iter().collect();
        // Same id, different content: still a member.
        assert!(list.contains(&title(1, "completely different", 9)));
        assert!(list.contains_record(&title(1, "also different", 3).to_record()));
        assert!(!list.contains_id(2));
    }

    #[test]
    fn test_delta_against_identical_copy_is_empty() {
        let list: TitleList = [title(1, "A", 5), title(2, "B", 7)].into_iter().collect();
        assert!(list.delta(&list.clone()).is_empty());
    }

    #[test]
    fn test_delta_classifies_added_and_removed() {
        let a: TitleList = [title(1, "X", 8)].into_iter().collect();
        let b: TitleList = [title(2, "Y", 0)].into_iter().collect();

        let delta = a.delta(&b);
        assert_eq!(delta.len(), 2);

        let added = delta.get(1).unwrap();
        assert_eq!(added.modify_type(), ModifyType::Added);
        assert_eq!(added.delta().len(), 10);
        assert_eq!(added.delta()["name"], json!("X"));

        let removed = delta.get(2).unwrap();
        assert_eq!(removed.modify_type(), ModifyType::Removed);
        assert_eq!(removed.delta()["name"], json!("Y"));
    }

    #[test]
    fn test_delta_add_remove_symmetry() {
        let a: TitleList = [title(1, "X", 8), title(3, "Z", 2)].into_iter().collect();
        let b: TitleList = [title(2, "Y", 0)].into_iter().collect();

        let forward = a.delta(&b);
        let backward = b.delta(&a);

        for id in [1, 3] {
            let fwd = forward.get(id).unwrap();
            let bwd = backward.get(id).unwrap();
            assert_eq!(fwd.modify_type(), ModifyType::Added);
            assert_eq!(bwd.modify_type(), ModifyType::Removed);
            assert_eq!(fwd.delta(), bwd.delta());
        }
    }

    #[test]
    fn test_delta_score_only_edit() {
        let a: TitleList = [title(1, "X", 8)].into_iter().collect();
        let b: TitleList = [title(1, "X", 9)].into_iter().collect();

        let delta = a.delta(&b);
        assert_eq!(delta.len(), 1);

        let edited = delta.get(1).unwrap();
        assert_eq!(edited.modify_type(), ModifyType::Edited);
        assert_eq!(edited.delta().len(), 1);
        assert_eq!(edited.delta()["score"], json!(8));
    }

    #[test]
    fn test_delta_emits_no_unmodified_entries() {
        let shared = title(1, "same", 5);
        let a: TitleList = [shared.clone(), title(2, "only a", 5)].into_iter().collect();
        let b: TitleList = [shared, title(3, "only b", 5)].into_iter().collect();

        let delta = a.delta(&b);
        assert!(!delta.contains_id(1));
        assert_eq!(delta.len(), 2);
    }

    #[test]
    fn test_delta_orders_added_then_edited_then_removed() {
        let a: TitleList = [title(1, "edit me", 8), title(2, "added", 5)]
            .into_iter()
            .collect();
        let b: TitleList = [title(1, "edit me", 3), title(4, "removed", 5)]
            .into_iter()
            .collect();

        let kinds: Vec<_> = a.delta(&b).iter().map(|t| t.modify_type()).collect();
        assert_eq!(
            kinds,
            vec![ModifyType::Added, ModifyType::Edited, ModifyType::Removed]
        );
    }

    #[test]
    fn test_from_records_round_trip() {
        let list: TitleList = [title(1, "A", 5), title(2, "B", 7)].into_iter().collect();
        let values: Vec<_> = list
            .to_records()
            .into_iter()
            .map(|r| serde_json::to_value(r).unwrap())
            .collect();

        let rebuilt = TitleList::from_records(values).unwrap();
        assert_eq!(rebuilt.len(), 2);
        assert!(list.delta(&rebuilt).is_empty());
    }

    #[test]
    fn test_from_records_rejects_unrecognized_shape() {
        let err = TitleList::from_records(vec![json!({"whatever": true})]).unwrap_err();
        assert!(matches!(err, AppError::MalformedList(_)));
    }

    #[test]
    fn test_from_records_rejects_invalid_titles() {
        let mut record = title(1, "A", 5).to_record();
        record.score = 99;
        let err =
            TitleList::from_records(vec![serde_json::to_value(record).unwrap()]).unwrap_err();
        assert!(matches!(err, AppError::MalformedList(_)));
    }
}
