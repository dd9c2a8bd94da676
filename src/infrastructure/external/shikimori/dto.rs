use serde::{Deserialize, Serialize};

/// One entry of a `/users/{id}/{anime,manga}_rates` response.
///
/// Numeric fields are nullable on the wire and normalize to 0; `text` is
/// the user's comment, nullable.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShikimoriUserRate {
    pub status: String,
    pub score: Option<i64>,
    pub text: Option<String>,
    pub episodes: Option<i64>,
    pub chapters: Option<i64>,
    pub volumes: Option<i64>,
    pub rewatches: Option<i64>,
    #[serde(default)]
    pub anime: Option<ShikimoriTitleBrief>,
    #[serde(default)]
    pub manga: Option<ShikimoriTitleBrief>,
}

/// The nested anime/manga object inside a user rate. Manga doubles as
/// ranobe; the URL tells them apart.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShikimoriTitleBrief {
    pub id: i64,
    pub name: String,
    pub url: String,
    #[serde(default)]
    pub russian: Option<String>,
    #[serde(default)]
    pub english: Option<serde_json::Value>,
    #[serde(default)]
    pub japanese: Option<serde_json::Value>,
}

/// `/users/whoami` response (only the id is needed downstream).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShikimoriUser {
    pub id: i64,
    pub nickname: Option<String>,
}
