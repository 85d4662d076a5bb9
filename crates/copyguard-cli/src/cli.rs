use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "copyguard")]
#[command(about = "Content review for design documents", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Scan a document for forbidden terms
    Scan {
        /// Path to a document file (JSON)
        document: PathBuf,

        /// Comma-separated forbidden terms
        #[arg(long)]
        terms: String,

        /// Scan the whole document instead of the selection
        #[arg(long)]
        all: bool,

        /// Follow each unit with the viewport during a full scan
        #[arg(long)]
        track: bool,
    },

    /// Serve UI requests over stdin/stdout
    Bridge {
        /// Path to a document file (JSON)
        document: PathBuf,
    },

    /// Inspect or clear decision memory
    #[command(subcommand)]
    Memory(MemoryCommands),
}

#[derive(Subcommand)]
pub enum MemoryCommands {
    /// Show recorded decisions for a document
    Show {
        /// Path to a document file (JSON)
        document: PathBuf,
    },

    /// Forget every recorded decision for a document
    Clear {
        /// Path to a document file (JSON)
        document: PathBuf,
    },
}
