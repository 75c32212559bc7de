//! One-shot reconcile of a local JSON store against a remote item store.
//!
//! Usage: sync_once [BASE_URL] [STORE_PATH]

use std::sync::Arc;

use anyhow::Result;
use reclaim::{shared, JsonFileStore, Reconciler};
use reclaim_http::{ItemsClient, RemoteConfig};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt().init();

    let mut args = std::env::args().skip(1);
    let base_url = args
        .next()
        .unwrap_or_else(|| "http://localhost:8080".to_string());
    let store_path = args.next().unwrap_or_else(|| "items.json".to_string());

    let store = shared(JsonFileStore::open(store_path)?);
    let client = ItemsClient::new(&RemoteConfig::new(base_url))?;

    let stats = Reconciler::new(Arc::new(client), store).reconcile().await?;
    println!(
        "reconciled: {} fetched, {} inserted, {} updated, {} pruned, {} skipped",
        stats.fetched, stats.inserted, stats.updated, stats.pruned, stats.skipped
    );
    Ok(())
}
