use anyhow::Result;
use copyguard_config::Config;

use crate::cli::MemoryCommands;

pub async fn handle(cmd: MemoryCommands, config: &Config) -> Result<()> {
    match cmd {
        MemoryCommands::Show { document } => {
            let (engine, before) = super::open_engine(config, &document).await?;

            let decisions = engine.decisions().await?;
            if decisions.is_empty() {
                println!("No recorded decisions.");
            } else {
                println!("Decisions ({}):", decisions.len());
                let mut entries: Vec<_> = decisions.iter().collect();
                entries.sort_by(|(a, _), (b, _)| a.cmp(b));
                for (key, decision) in entries {
                    println!("  {} -> {}", key, decision.state.as_str());
                }
            }

            super::persist_document(&document, &before, engine.host())?;
            Ok(())
        }
        MemoryCommands::Clear { document } => {
            let (engine, before) = super::open_engine(config, &document).await?;

            engine.clear_memory().await?;
            println!("✓ Decision memory cleared.");

            super::persist_document(&document, &before, engine.host())?;
            Ok(())
        }
    }
}
