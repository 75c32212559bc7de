//! Wire representation of item records
//!
//! `ItemRecord` is the payload shape the remote store speaks. Its
//! identifier is a server-assigned numeric string and is absent on create
//! requests; timestamps travel as epoch seconds, not formatted strings.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Lifecycle status of a lost/found item.
///
/// Encoded as one of the literal strings `lost` / `found` / `returned`.
/// Unknown or missing values decode to `Lost`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemStatus {
    Found,
    Returned,
    // `other` has to stay on the last variant for the derive to accept it.
    #[default]
    #[serde(other)]
    Lost,
}

impl ItemStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ItemStatus::Lost => "lost",
            ItemStatus::Found => "found",
            ItemStatus::Returned => "returned",
        }
    }
}

/// Item payload as exchanged with the remote store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemRecord {
    /// Server-assigned numeric-string identifier.
    ///
    /// Absent on create requests; present on every other exchange.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    pub title: String,

    pub detail: String,

    /// Opaque image reference (typically a URL); never interpreted here.
    pub image_url: String,

    pub latitude: f64,

    pub longitude: f64,

    #[serde(default)]
    pub status: ItemStatus,

    #[serde(with = "chrono::serde::ts_seconds")]
    pub recorded_at: DateTime<Utc>,
}
