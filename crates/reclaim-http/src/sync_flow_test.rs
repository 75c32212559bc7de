//! End-to-end engine tests against the in-memory remote fake

use std::sync::Arc;

use chrono::{TimeZone, Utc};

use reclaim::{
    ids, shared, Item, ItemDraft, MemoryStore, MutationMirror, Reconciler, RemoteGateway, SyncError,
};
use reclaim_api::{ItemRecord, ItemStatus};

use crate::fake::FakeRemote;

fn record(title: &str, status: ItemStatus) -> ItemRecord {
    ItemRecord {
        id: None,
        title: title.to_string(),
        detail: String::new(),
        image_url: String::new(),
        latitude: 52.52,
        longitude: 13.405,
        status,
        recorded_at: Utc.timestamp_opt(1_700_000_000, 0).unwrap(),
    }
}

fn draft(title: &str) -> ItemDraft {
    ItemDraft {
        title: title.to_string(),
        detail: "seen near the fountain".to_string(),
        image_url: String::new(),
        latitude: 52.52,
        longitude: 13.405,
        status: ItemStatus::Lost,
    }
}

fn sorted(mut items: Vec<Item>) -> Vec<Item> {
    items.sort_by_key(|item| item.id);
    items
}

#[tokio::test]
async fn remote_snapshot_is_upserted_into_an_empty_store() {
    let remote = Arc::new(FakeRemote::new());
    let wallet_id = remote.seed(record("Wallet", ItemStatus::Found));

    let store = shared(MemoryStore::new());
    let reconciler = Reconciler::new(remote, Arc::clone(&store));
    let stats = reconciler.reconcile().await.unwrap();

    assert_eq!(stats.fetched, 1);
    assert_eq!(stats.inserted, 1);
    let items = store.lock().await.fetch_all();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].id, ids::to_local(&wallet_id));
    assert_eq!(items[0].title, "Wallet");
}

#[tokio::test]
async fn remotely_deleted_records_are_pruned_locally() {
    let remote = Arc::new(FakeRemote::new());
    let keep_a = remote.seed(record("A", ItemStatus::Lost));
    let drop_b = remote.seed(record("B", ItemStatus::Lost));
    let keep_c = remote.seed(record("C", ItemStatus::Lost));

    let store = shared(MemoryStore::new());
    let reconciler = Reconciler::new(Arc::clone(&remote) as _, Arc::clone(&store));
    reconciler.reconcile().await.unwrap();
    assert_eq!(store.lock().await.fetch_all().len(), 3);

    remote.delete(&drop_b).await.unwrap();
    let stats = reconciler.reconcile().await.unwrap();

    assert_eq!(stats.pruned, 1);
    let store = store.lock().await;
    assert!(store.get(&ids::to_local(&keep_a)).is_some());
    assert!(store.get(&ids::to_local(&drop_b)).is_none());
    assert!(store.get(&ids::to_local(&keep_c)).is_some());
}

#[tokio::test]
async fn reconcile_is_idempotent_against_an_unchanged_snapshot() {
    let remote = Arc::new(FakeRemote::new());
    remote.seed(record("Wallet", ItemStatus::Found));
    remote.seed(record("Keys", ItemStatus::Lost));

    let store = shared(MemoryStore::new());
    let reconciler = Reconciler::new(remote, Arc::clone(&store));

    reconciler.reconcile().await.unwrap();
    let before = sorted(store.lock().await.fetch_all());
    let stats = reconciler.reconcile().await.unwrap();
    let after = sorted(store.lock().await.fetch_all());

    assert_eq!(before, after);
    assert_eq!(stats.inserted, 0);
    assert_eq!(stats.pruned, 0);
}

#[tokio::test]
async fn listing_failure_aborts_with_no_local_side_effects() {
    let remote = Arc::new(FakeRemote::new());
    remote.seed(record("Wallet", ItemStatus::Found));

    let store = shared(MemoryStore::new());
    let reconciler = Reconciler::new(Arc::clone(&remote) as _, Arc::clone(&store));
    reconciler.reconcile().await.unwrap();
    let before = sorted(store.lock().await.fetch_all());

    remote.set_fail_listing(true);
    let err = reconciler.reconcile().await.unwrap_err();

    assert!(matches!(err, SyncError::Fetch(_)));
    assert_eq!(sorted(store.lock().await.fetch_all()), before);
}

#[tokio::test]
async fn locally_created_item_aligns_on_the_next_reconcile() {
    let remote = Arc::new(FakeRemote::new());
    let store = shared(MemoryStore::new());
    let mirror = MutationMirror::new(Arc::clone(&remote) as _, Arc::clone(&store));
    let reconciler = Reconciler::new(Arc::clone(&remote) as _, Arc::clone(&store));

    let created = mirror.create(draft("Wallet")).await.unwrap();
    // Until the next cycle the item lives under its unmapped local id.
    assert_eq!(ids::to_remote(&created.id), None);
    assert_eq!(remote.records().len(), 1);

    reconciler.reconcile().await.unwrap();

    let items = store.lock().await.fetch_all();
    assert_eq!(items.len(), 1);
    let remote_id = remote.records()[0].id.clone().unwrap();
    assert_eq!(items[0].id, ids::to_local(&remote_id));
    assert_eq!(items[0].title, "Wallet");
}

#[tokio::test]
async fn updating_an_unsynced_item_creates_it_remotely() {
    let remote = Arc::new(FakeRemote::new());
    let store = shared(MemoryStore::new());
    let mirror = MutationMirror::new(Arc::clone(&remote) as _, Arc::clone(&store));

    let mut item = Item::new(draft("Umbrella"));
    store.lock().await.insert(item.clone());

    item.status = ItemStatus::Found;
    mirror.update(item).await.unwrap();

    let records = remote.records();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].title, "Umbrella");
    assert_eq!(records[0].status, ItemStatus::Found);
}

#[tokio::test]
async fn updating_a_synced_item_replaces_it_remotely() {
    let remote = Arc::new(FakeRemote::new());
    let wallet_id = remote.seed(record("Wallet", ItemStatus::Lost));

    let store = shared(MemoryStore::new());
    let mirror = MutationMirror::new(Arc::clone(&remote) as _, Arc::clone(&store));
    let reconciler = Reconciler::new(Arc::clone(&remote) as _, Arc::clone(&store));
    reconciler.reconcile().await.unwrap();

    let mut item = store.lock().await.get(&ids::to_local(&wallet_id)).unwrap();
    item.status = ItemStatus::Returned;
    mirror.update(item).await.unwrap();

    let records = remote.records();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].status, ItemStatus::Returned);
}

#[tokio::test]
async fn deleting_a_synced_item_removes_it_remotely() {
    let remote = Arc::new(FakeRemote::new());
    let wallet_id = remote.seed(record("Wallet", ItemStatus::Lost));

    let store = shared(MemoryStore::new());
    let mirror = MutationMirror::new(Arc::clone(&remote) as _, Arc::clone(&store));
    let reconciler = Reconciler::new(Arc::clone(&remote) as _, Arc::clone(&store));
    reconciler.reconcile().await.unwrap();

    mirror.delete(ids::to_local(&wallet_id)).await.unwrap();

    assert!(!remote.contains(&wallet_id));
    assert!(store.lock().await.fetch_all().is_empty());
}

#[tokio::test]
async fn remote_write_failure_keeps_the_local_mutation() {
    let remote = Arc::new(FakeRemote::new());
    remote.set_fail_writes(true);

    let store = shared(MemoryStore::new());
    let mirror = MutationMirror::new(Arc::clone(&remote) as _, Arc::clone(&store));

    let err = mirror.create(draft("Phone")).await.unwrap_err();

    assert!(matches!(err, SyncError::RemoteMirror { .. }));
    assert_eq!(store.lock().await.fetch_all().len(), 1);
    assert!(remote.records().is_empty());
}
