use std::path::Path;

use anyhow::Result;
use copyguard_config::Config;
use tracing::info;

pub async fn handle(config: &Config, document: &Path) -> Result<()> {
    let (mut engine, before) = super::open_engine(config, document).await?;

    info!(document = %document.display(), "bridge serving on stdin/stdout");
    copyguard_bridge::run_stdio(&mut engine).await?;

    super::persist_document(document, &before, engine.host())?;

    Ok(())
}
