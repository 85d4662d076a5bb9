use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use copyguard_config::Config;
use copyguard_engine::{Engine, EngineOptions, Pacing};
use copyguard_host::{DocumentFixture, MemoryDocument};
use copyguard_store::{JsonFileBackend, StorageBackend};

pub mod bridge;
pub mod memory;
pub mod scan;

/// Load a document file and build an engine per the config. The fixture
/// as read from disk is returned alongside, for change detection on save.
pub async fn open_engine(
    config: &Config,
    document: &Path,
) -> Result<(Engine<MemoryDocument>, DocumentFixture)> {
    let raw = std::fs::read_to_string(document)
        .with_context(|| format!("reading document {}", document.display()))?;
    let fixture: DocumentFixture = serde_json::from_str(&raw)
        .with_context(|| format!("parsing document {}", document.display()))?;
    let host = MemoryDocument::from_fixture(fixture.clone());

    let backend: Box<dyn StorageBackend> = match &config.storage.dir {
        Some(dir) => Box::new(JsonFileBackend::new(dir.clone())),
        None => Box::new(JsonFileBackend::default_dir()?),
    };

    let options = EngineOptions {
        namespaced: config.storage.namespaced,
        pacing: Pacing {
            scan_start: Duration::from_millis(config.scan.scan_start_delay_ms),
            track: Duration::from_millis(config.scan.track_delay_ms),
        },
        tracking: config.scan.tracking,
    };

    let engine = Engine::new(host, backend, options).await?;
    Ok((engine, fixture))
}

/// Write document state (content edits, selection, the assigned
/// namespace) back to the file when anything changed.
pub fn persist_document(
    document: &Path,
    before: &DocumentFixture,
    host: &MemoryDocument,
) -> Result<()> {
    let after = host.snapshot();
    if after != *before {
        let raw = serde_json::to_string_pretty(&after)?;
        std::fs::write(document, format!("{raw}\n"))
            .with_context(|| format!("writing document {}", document.display()))?;
    }
    Ok(())
}
