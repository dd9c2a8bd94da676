use serde::{Deserialize, Serialize};

/// One page of a `/users/@me/{anime,manga}list` response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MalListResponse {
    pub data: Vec<MalListEntry>,
    #[serde(default)]
    pub paging: Option<MalPaging>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MalPaging {
    #[serde(default)]
    pub next: Option<String>,
    #[serde(default)]
    pub previous: Option<String>,
}

/// One list entry: the title node plus the user's list status.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MalListEntry {
    pub node: MalNode,
    pub list_status: MalListStatus,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MalNode {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub media_type: Option<String>,
    #[serde(default)]
    pub alternative_titles: Option<MalAlternativeTitles>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MalAlternativeTitles {
    #[serde(default)]
    pub en: Option<String>,
    #[serde(default)]
    pub ja: Option<String>,
    #[serde(default)]
    pub synonyms: Vec<String>,
}

/// The user's status block. Counter names differ between the anime and
/// manga shapes; everything optional defaults away.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MalListStatus {
    pub status: String,
    #[serde(default)]
    pub score: Option<i64>,
    #[serde(default)]
    pub num_episodes_watched: Option<i64>,
    #[serde(default)]
    pub num_chapters_read: Option<i64>,
    #[serde(default)]
    pub num_volumes_read: Option<i64>,
    #[serde(default)]
    pub is_rewatching: Option<bool>,
    #[serde(default)]
    pub is_rereading: Option<bool>,
    #[serde(default)]
    pub num_times_rewatched: Option<i64>,
    #[serde(default)]
    pub num_times_reread: Option<i64>,
    #[serde(default)]
    pub comments: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}
