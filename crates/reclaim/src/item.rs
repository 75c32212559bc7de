//! The `Item` entity and its wire-record conversions

use chrono::{DateTime, Utc};
use reclaim_api::{ItemRecord, ItemStatus};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::ids;

/// A lost/found item as held by the local store.
///
/// The identifier is assigned locally at creation time and never changes;
/// remote records are addressed through [`crate::ids`]. Field constraints
/// (non-empty title, finite coordinates) are enforced by the write path,
/// not by the entity itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub id: Uuid,

    pub title: String,

    pub detail: String,

    /// Opaque image reference (typically a URL); never interpreted.
    pub image_url: String,

    pub latitude: f64,

    pub longitude: f64,

    pub status: ItemStatus,

    /// Set at creation; carried through updates unless a remote record
    /// supplies a different value during reconciliation.
    pub recorded_at: DateTime<Utc>,
}

/// User-supplied fields for a new item.
#[derive(Debug, Clone)]
pub struct ItemDraft {
    pub title: String,
    pub detail: String,
    pub image_url: String,
    pub latitude: f64,
    pub longitude: f64,
    pub status: ItemStatus,
}

impl Item {
    /// Construct a brand-new local item with a freshly minted identifier.
    ///
    /// The identifier is not derived from any remote id; it stays unmapped
    /// until a later reconciliation aligns it with its remote counterpart.
    pub fn new(draft: ItemDraft) -> Self {
        Self {
            id: ids::new_local_id(),
            title: draft.title,
            detail: draft.detail,
            image_url: draft.image_url,
            latitude: draft.latitude,
            longitude: draft.longitude,
            status: draft.status,
            recorded_at: Utc::now(),
        }
    }

    /// Build a local entity for a remote record that has no counterpart
    /// yet.
    pub fn from_record(id: Uuid, record: &ItemRecord) -> Self {
        Self {
            id,
            title: record.title.clone(),
            detail: record.detail.clone(),
            image_url: record.image_url.clone(),
            latitude: record.latitude,
            longitude: record.longitude,
            status: record.status,
            recorded_at: record.recorded_at,
        }
    }

    /// Overwrite the mutable fields from a remote record, keeping the
    /// local identifier.
    pub fn apply_record(&mut self, record: &ItemRecord) {
        self.title = record.title.clone();
        self.detail = record.detail.clone();
        self.image_url = record.image_url.clone();
        self.latitude = record.latitude;
        self.longitude = record.longitude;
        self.status = record.status;
        self.recorded_at = record.recorded_at;
    }

    /// Render this item as a wire record.
    ///
    /// `remote_id` is `None` for create requests and the mapped
    /// numeric-string identifier otherwise.
    pub fn to_record(&self, remote_id: Option<String>) -> ItemRecord {
        ItemRecord {
            id: remote_id,
            title: self.title.clone(),
            detail: self.detail.clone(),
            image_url: self.image_url.clone(),
            latitude: self.latitude,
            longitude: self.longitude,
            status: self.status,
            recorded_at: self.recorded_at,
        }
    }
}
