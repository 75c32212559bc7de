//! In-memory remote gateway for tests and offline use
//!
//! `FakeRemote` behaves like the real item store: it assigns numeric
//! identifiers on create, serves full snapshots, and can be switched into
//! failure modes to exercise the engine's error paths.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use reclaim::gateway::RemoteGateway;
use reclaim_api::{GatewayError, ItemRecord};

#[derive(Debug, Default)]
struct FakeState {
    records: BTreeMap<u64, ItemRecord>,
    next_id: u64,
}

/// Server-side double of the remote item store.
pub struct FakeRemote {
    state: Mutex<FakeState>,
    fail_listing: AtomicBool,
    fail_writes: AtomicBool,
}

impl FakeRemote {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(FakeState {
                records: BTreeMap::new(),
                next_id: 1,
            }),
            fail_listing: AtomicBool::new(false),
            fail_writes: AtomicBool::new(false),
        }
    }

    /// Insert a record server-side, assigning the next numeric id.
    /// Returns the assigned id.
    pub fn seed(&self, record: ItemRecord) -> String {
        let mut state = self.state.lock().unwrap();
        let id = state.next_id;
        state.next_id += 1;
        let mut stored = record;
        stored.id = Some(id.to_string());
        state.records.insert(id, stored);
        id.to_string()
    }

    /// Snapshot of everything currently stored, in id order.
    pub fn records(&self) -> Vec<ItemRecord> {
        self.state.lock().unwrap().records.values().cloned().collect()
    }

    pub fn contains(&self, id: &str) -> bool {
        match id.parse::<u64>() {
            Ok(numeric) => self.state.lock().unwrap().records.contains_key(&numeric),
            Err(_) => false,
        }
    }

    /// Make `list_all` fail until switched back.
    pub fn set_fail_listing(&self, fail: bool) {
        self.fail_listing.store(fail, Ordering::SeqCst);
    }

    /// Make create/replace/delete fail until switched back.
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    fn check_writes(&self) -> Result<(), GatewayError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            Err(GatewayError::Network {
                message: "simulated write failure".to_string(),
            })
        } else {
            Ok(())
        }
    }

    fn parse_id(id: &str) -> Result<u64, GatewayError> {
        id.parse::<u64>().map_err(|_| GatewayError::Status {
            status: 404,
            url: format!("/items/{id}"),
            body: "no such item".to_string(),
        })
    }
}

impl Default for FakeRemote {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RemoteGateway for FakeRemote {
    async fn list_all(&self) -> Result<Vec<ItemRecord>, GatewayError> {
        if self.fail_listing.load(Ordering::SeqCst) {
            return Err(GatewayError::Network {
                message: "simulated listing failure".to_string(),
            });
        }
        Ok(self.records())
    }

    async fn create(&self, record: &ItemRecord) -> Result<ItemRecord, GatewayError> {
        self.check_writes()?;
        let mut state = self.state.lock().unwrap();
        let id = state.next_id;
        state.next_id += 1;
        let mut stored = record.clone();
        stored.id = Some(id.to_string());
        state.records.insert(id, stored.clone());
        Ok(stored)
    }

    async fn replace(&self, id: &str, record: &ItemRecord) -> Result<(), GatewayError> {
        self.check_writes()?;
        let numeric = Self::parse_id(id)?;
        let mut state = self.state.lock().unwrap();
        if !state.records.contains_key(&numeric) {
            return Err(GatewayError::Status {
                status: 404,
                url: format!("/items/{id}"),
                body: "no such item".to_string(),
            });
        }
        let mut stored = record.clone();
        stored.id = Some(id.to_string());
        state.records.insert(numeric, stored);
        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<(), GatewayError> {
        self.check_writes()?;
        let numeric = Self::parse_id(id)?;
        // Deleting an absent record is fine; delete is idempotent.
        self.state.lock().unwrap().records.remove(&numeric);
        Ok(())
    }
}
