//! Local-first writes mirrored to the remote store
//!
//! Every user-initiated create/update/delete funnels through here: the
//! local mutation is applied and committed first (the local store is what
//! the user sees), then the corresponding remote call is attempted. A
//! failed remote call is surfaced but never reverses the local mutation;
//! re-running the mutation or a full reconcile is the caller's recourse.

use std::sync::Arc;

use tracing::{debug, warn};
use uuid::Uuid;

use crate::error::{MirrorOperation, SyncError};
use crate::gateway::RemoteGateway;
use crate::ids;
use crate::item::{Item, ItemDraft};
use crate::store::SharedStore;

/// The write path of the local collection.
///
/// Shares the store lock with [`crate::sync::Reconciler`], so a mutation
/// and a reconciliation cycle never interleave.
pub struct MutationMirror {
    gateway: Arc<dyn RemoteGateway>,
    store: SharedStore,
}

impl MutationMirror {
    pub fn new(gateway: Arc<dyn RemoteGateway>, store: SharedStore) -> Self {
        Self { gateway, store }
    }

    /// Create an item locally, then mirror it with a remote create.
    ///
    /// The new item keeps its locally minted identifier even though the
    /// remote store assigns its own; the two are merged into alignment by
    /// the next reconciliation cycle. Until then the item has no remote
    /// mapping.
    pub async fn create(&self, draft: ItemDraft) -> Result<Item, SyncError> {
        validate(&draft.title, draft.latitude, draft.longitude)?;

        let mut store = self.store.lock().await;
        let item = Item::new(draft);
        store.insert(item.clone());
        store.commit().map_err(SyncError::Commit)?;

        match self.gateway.create(&item.to_record(None)).await {
            Ok(created) => {
                debug!(
                    local_id = %item.id,
                    remote_id = ?created.id,
                    "remote assigned an identifier; alignment deferred to the next reconcile"
                );
                Ok(item)
            }
            Err(source) => {
                warn!(local_id = %item.id, error = %source, "remote create failed; local item stands");
                Err(SyncError::RemoteMirror {
                    operation: MirrorOperation::Create,
                    source,
                })
            }
        }
    }

    /// Overwrite an item locally, then mirror the change remotely.
    ///
    /// Items whose identifier maps to a remote id are replaced in place;
    /// items that were never synced (no mapping) are created remotely
    /// instead.
    pub async fn update(&self, item: Item) -> Result<(), SyncError> {
        validate(&item.title, item.latitude, item.longitude)?;

        let mut store = self.store.lock().await;
        store.insert(item.clone());
        store.commit().map_err(SyncError::Commit)?;

        let result = match ids::to_remote(&item.id) {
            Some(remote_id) => {
                let record = item.to_record(Some(remote_id.clone()));
                self.gateway
                    .replace(&remote_id, &record)
                    .await
                    .map_err(|source| SyncError::RemoteMirror {
                        operation: MirrorOperation::Replace,
                        source,
                    })
            }
            None => self
                .gateway
                .create(&item.to_record(None))
                .await
                .map(|_| ())
                .map_err(|source| SyncError::RemoteMirror {
                    operation: MirrorOperation::Create,
                    source,
                }),
        };

        if let Err(err) = &result {
            warn!(local_id = %item.id, error = %err, "remote mirror failed; local update stands");
        }
        result
    }

    /// Remove an item locally, then mirror the deletion remotely.
    ///
    /// Items without a remote mapping were never synced, so no remote call
    /// is made for them.
    pub async fn delete(&self, id: Uuid) -> Result<(), SyncError> {
        let mut store = self.store.lock().await;
        store.remove(&id);
        store.commit().map_err(SyncError::Commit)?;

        let Some(remote_id) = ids::to_remote(&id) else {
            debug!(local_id = %id, "deleted item had no remote counterpart");
            return Ok(());
        };

        self.gateway.delete(&remote_id).await.map_err(|source| {
            warn!(local_id = %id, error = %source, "remote delete failed; local removal stands");
            SyncError::RemoteMirror {
                operation: MirrorOperation::Delete,
                source,
            }
        })
    }
}

fn validate(title: &str, latitude: f64, longitude: f64) -> Result<(), SyncError> {
    if title.trim().is_empty() {
        return Err(SyncError::Invalid {
            message: "title must not be empty".to_string(),
        });
    }
    if !latitude.is_finite() || !longitude.is_finite() {
        return Err(SyncError::Invalid {
            message: "coordinates must be finite".to_string(),
        });
    }
    Ok(())
}
