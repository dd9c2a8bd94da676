use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::domain::value_objects::{ModifyType, TitleType, WatchStatus};
use crate::shared::errors::{AppError, AppResult};

/// Field-level change set attached to a title produced by a delta.
/// Keys are comparable field names, values are the kept side's values.
pub type FieldDelta = BTreeMap<String, Value>;

/// The comparable field set, in record order. Bookkeeping fields
/// (`title_type`, `modify_type`, `delta`) are deliberately absent so a
/// delta never diffs against itself.
pub const COMPARABLE_FIELDS: [&str; 10] = [
    "id",
    "name",
    "watch_status",
    "watch_count",
    "episodes",
    "chapters",
    "volumes",
    "comment",
    "score",
    "rewatches",
];

/// Unvalidated field set for building a [`Title`]. Mappers fill one of
/// these from a source record; [`Title::new`] is the only gate.
#[derive(Debug, Clone, Default)]
pub struct TitleData {
    pub id: i64,
    pub title_type: TitleType,
    pub name: String,
    pub watch_status: WatchStatus,
    pub episodes: i64,
    pub chapters: i64,
    pub volumes: i64,
    pub score: i64,
    pub rewatches: i64,
    pub comment: String,
    /// Raw source payload, kept for diagnostics only. Never compared,
    /// never serialized into the record form.
    pub raw: Option<Value>,
}

/// One tracked media item as seen on one source at one point in time.
///
/// A `Title` cannot exist in an invalid state: construction validates the
/// id, counters and score, and the vocabulary fields are closed enums.
#[derive(Debug, Clone)]
pub struct Title {
    data: TitleData,
    modify_type: ModifyType,
    delta: FieldDelta,
}

impl Title {
    pub fn new(data: TitleData) -> AppResult<Self> {
        Self::validate(&data)?;
        Ok(Self {
            data,
            modify_type: ModifyType::Unmodified,
            delta: FieldDelta::new(),
        })
    }

    fn validate(data: &TitleData) -> AppResult<()> {
        if data.id < 1 {
            return Err(Self::invalid(data, format!("id {}", data.id)));
        }
        if data.name.is_empty() {
            return Err(Self::invalid(data, "empty name".to_string()));
        }
        if data.episodes < 0 {
            return Err(Self::invalid(data, format!("episodes {}", data.episodes)));
        }
        if data.chapters < 0 {
            return Err(Self::invalid(data, format!("chapters {}", data.chapters)));
        }
        if data.volumes < 0 {
            return Err(Self::invalid(data, format!("volumes {}", data.volumes)));
        }
        if !(0..=10).contains(&data.score) {
            return Err(Self::invalid(data, format!("score {}", data.score)));
        }
        if data.rewatches < 0 {
            return Err(Self::invalid(data, format!("rewatches {}", data.rewatches)));
        }
        Ok(())
    }

    fn invalid(data: &TitleData, what: String) -> AppError {
        AppError::ValidationError(format!(
            "Title '{}' (id {}) not valid: {}",
            data.name, data.id, what
        ))
    }

    /// Re-wrap this title as a delta entry. Field data is untouched, so
    /// validity carries over.
    pub fn with_delta(&self, modify_type: ModifyType, delta: FieldDelta) -> Self {
        Self {
            data: self.data.clone(),
            modify_type,
            delta,
        }
    }

    pub fn id(&self) -> i64 {
        self.data.id
    }

    pub fn title_type(&self) -> TitleType {
        self.data.title_type
    }

    pub fn name(&self) -> &str {
        &self.data.name
    }

    pub fn watch_status(&self) -> WatchStatus {
        self.data.watch_status
    }

    pub fn episodes(&self) -> i64 {
        self.data.episodes
    }

    pub fn chapters(&self) -> i64 {
        self.data.chapters
    }

    pub fn volumes(&self) -> i64 {
        self.data.volumes
    }

    /// Derived progress counter: max(episodes, chapters).
    pub fn watch_count(&self) -> i64 {
        self.data.episodes.max(self.data.chapters)
    }

    pub fn score(&self) -> i64 {
        self.data.score
    }

    pub fn rewatches(&self) -> i64 {
        self.data.rewatches
    }

    pub fn comment(&self) -> &str {
        &self.data.comment
    }

    pub fn modify_type(&self) -> ModifyType {
        self.modify_type
    }

    pub fn delta(&self) -> &FieldDelta {
        &self.delta
    }

    pub fn raw(&self) -> Option<&Value> {
        self.data.raw.as_ref()
    }

    fn comparable_value(&self, field: &str) -> Value {
        match field {
            "id" => json!(self.id()),
            "name" => json!(self.name()),
            "watch_status" => json!(self.watch_status()),
            "watch_count" => json!(self.watch_count()),
            "episodes" => json!(self.episodes()),
            "chapters" => json!(self.chapters()),
            "volumes" => json!(self.volumes()),
            "comment" => json!(self.comment()),
            "score" => json!(self.score()),
            "rewatches" => json!(self.rewatches()),
            _ => Value::Null,
        }
    }

    /// Full comparable field set, used as the delta payload for added and
    /// removed entries.
    pub fn snapshot(&self) -> FieldDelta {
        COMPARABLE_FIELDS
            .iter()
            .map(|field| (field.to_string(), self.comparable_value(field)))
            .collect()
    }

    /// Field-by-field difference against `other` over the fixed comparable
    /// field list. For every differing field the returned map carries this
    /// side's value; equal fields are absent. Empty map means the two
    /// records are equal for reconciliation purposes.
    pub fn field_delta(&self, other: &Title) -> FieldDelta {
        COMPARABLE_FIELDS
            .iter()
            .filter_map(|field| {
                let mine = self.comparable_value(field);
                if mine != other.comparable_value(field) {
                    Some((field.to_string(), mine))
                } else {
                    None
                }
            })
            .collect()
    }

    pub fn to_record(&self) -> TitleRecord {
        TitleRecord {
            id: self.id(),
            name: self.name().to_string(),
            watch_status: self.watch_status(),
            watch_count: self.watch_count(),
            episodes: self.episodes(),
            chapters: self.chapters(),
            volumes: self.volumes(),
            comment: self.comment().to_string(),
            score: self.score(),
            rewatches: self.rewatches(),
            title_type: self.title_type(),
            modify_type: self.modify_type(),
            delta: self.delta.clone(),
        }
    }

    /// Rebuild a title from its serialized record form, re-running the
    /// construction invariants. The stored `watch_count` must agree with
    /// the derived one.
    pub fn from_record(record: TitleRecord) -> AppResult<Self> {
        let title = Title::new(TitleData {
            id: record.id,
            title_type: record.title_type,
            name: record.name,
            watch_status: record.watch_status,
            episodes: record.episodes,
            chapters: record.chapters,
            volumes: record.volumes,
            score: record.score,
            rewatches: record.rewatches,
            comment: record.comment,
            raw: None,
        })?;
        if record.watch_count != title.watch_count() {
            return Err(AppError::ValidationError(format!(
                "Title id {}: watch_count {} disagrees with max(episodes, chapters) {}",
                title.id(),
                record.watch_count,
                title.watch_count()
            )));
        }
        Ok(title.with_delta(record.modify_type, record.delta))
    }
}

impl fmt::Display for Title {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} '{}' with delta {}",
            self.modify_type(),
            self.title_type(),
            self.id(),
            self.name(),
            serde_json::to_string(&self.delta).unwrap_or_else(|_| "{}".to_string())
        )
    }
}

/// Serialized form of a [`Title`]: the programmatic output shape and the
/// accepted shape for list interchange.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TitleRecord {
    pub id: i64,
    pub name: String,
    pub watch_status: WatchStatus,
    pub watch_count: i64,
    pub episodes: i64,
    pub chapters: i64,
    pub volumes: i64,
    pub comment: String,
    pub score: i64,
    pub rewatches: i64,
    pub title_type: TitleType,
    pub modify_type: ModifyType,
    #[serde(default)]
    pub delta: FieldDelta,
}
