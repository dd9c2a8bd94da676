use serde::{Deserialize, Serialize};
use std::fmt;

/// How a title changed between two lists. `Unmodified` is the default for
/// titles not produced by a delta; the delta itself never emits it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModifyType {
    Added,
    Edited,
    Removed,
    #[default]
    Unmodified,
}

impl ModifyType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ModifyType::Added => "added",
            ModifyType::Edited => "edited",
            ModifyType::Removed => "removed",
            ModifyType::Unmodified => "unmodified",
        }
    }
}

impl fmt::Display for ModifyType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
