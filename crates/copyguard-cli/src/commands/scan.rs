use std::path::Path;

use anyhow::Result;
use copyguard_bridge::EMPTY_SELECTION_MESSAGE;
use copyguard_config::Config;

pub async fn handle(
    config: &Config,
    document: &Path,
    terms: &str,
    all: bool,
    track: bool,
) -> Result<()> {
    let (mut engine, before) = super::open_engine(config, document).await?;

    let matches = if all {
        let units = engine.document_units().await?;
        engine.scan_document(&units, terms, track).await?
    } else {
        let units = engine.selection_units().await?;
        if units.is_empty() {
            println!("{EMPTY_SELECTION_MESSAGE}");
            return Ok(());
        }
        engine.scan_selection(&units, terms).await?
    };

    if matches.is_empty() {
        println!("No matches.");
    } else {
        println!("Matches ({}):", matches.len());
        for m in &matches {
            println!("  [{}] \"{}\" in {}: {}", m.unit_id, m.term, m.location, m.excerpt);
        }
    }

    super::persist_document(document, &before, engine.host())?;

    Ok(())
}
