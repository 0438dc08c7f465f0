use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Page size used when a search request does not name one.
pub const DEFAULT_LIMIT: usize = 10;

/// Ordering of search results by creation date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SortBy {
    #[serde(rename = "createDate_ASC")]
    CreateDateAsc,
    #[default]
    #[serde(rename = "createDate_DESC")]
    CreateDateDesc,
}

impl SortBy {
    pub const fn as_str(self) -> &'static str {
        match self {
            SortBy::CreateDateAsc => "createDate_ASC",
            SortBy::CreateDateDesc => "createDate_DESC",
        }
    }

    pub const fn is_descending(self) -> bool {
        matches!(self, SortBy::CreateDateDesc)
    }
}

impl FromStr for SortBy {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "createDate_ASC" => Ok(SortBy::CreateDateAsc),
            "createDate_DESC" => Ok(SortBy::CreateDateDesc),
            other => Err(CoreError::InvalidSort(other.to_string())),
        }
    }
}

impl fmt::Display for SortBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Text search with offset pagination.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchParams {
    pub text: Option<String>,
    pub limit: usize,
    pub skip: usize,
    pub sort_by: SortBy,
}

impl SearchParams {
    /// The search term, if one was given and is not blank.
    pub fn text_query(&self) -> Option<&str> {
        self.text
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
    }
}

impl Default for SearchParams {
    fn default() -> Self {
        Self {
            text: None,
            limit: DEFAULT_LIMIT,
            skip: 0,
            sort_by: SortBy::default(),
        }
    }
}
