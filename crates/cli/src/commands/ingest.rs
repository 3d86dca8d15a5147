//! `deskrail ingest`: collect documents from disk into the retrieval store.
//!
//! Walks the configured document root (or a subpath of it), loads every
//! `.md` and `.txt` file, and indexes the contents through the same
//! collection logic the gateway uses for `/ingest-path`.

use deskrail_agent::SessionRegistry;
use deskrail_config::AppConfig;
use deskrail_gateway::ingest::collect_documents;
use std::path::Path;

pub async fn run(
    config: AppConfig,
    path: Option<String>,
) -> Result<(), Box<dyn std::error::Error>> {
    let registry = SessionRegistry::from_config(&config)?;

    let root = Path::new(&config.gateway.docs_dir);
    let collected = collect_documents(root, path.as_deref())?;
    let count = collected.documents.len();

    registry.store().add(collected.documents).await?;

    println!("Ingested {count} documents from {}", root.display());
    for file in &collected.files {
        println!("  {file}");
    }

    Ok(())
}
