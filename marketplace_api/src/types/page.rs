use std::hash::Hash;

use serde::{Deserialize, Serialize};

/// One page of a cursor-paginated list.
///
/// The backend names the item array either `items` or `data`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    #[serde(alias = "data")]
    pub items: Vec<T>,
    #[serde(default)]
    pub next_cursor: Option<String>,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, next_cursor: Option<&str>) -> Self {
        Self {
            items,
            next_cursor: next_cursor.map(str::to_string),
        }
    }

    /// True when the server handed out a usable (non-blank) cursor.
    pub fn has_more(&self) -> bool {
        self.next_cursor
            .as_deref()
            .is_some_and(|c| !c.trim().is_empty())
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Response<T> {
    pub data: T,
}

/// Items with a stable server-assigned identity, used to de-duplicate pages.
pub trait Identified {
    type Key: Eq + Hash + Clone;

    fn identity(&self) -> Self::Key;
}
