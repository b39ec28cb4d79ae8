use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "legalrag", about = "Legal document retrieval over an exhaustive vector store")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Chunk, embed and store a plain-text document
    Ingest {
        /// Path to a UTF-8 text file
        file: PathBuf,
        /// Source label stored in metadata (defaults to the file name)
        #[arg(long)]
        source: Option<String>,
        /// Page number stored in metadata
        #[arg(long)]
        page: Option<u32>,
        /// Keep the additions in memory only
        #[arg(long)]
        no_save: bool,
    },
    /// Nearest-neighbour search for a question
    Search {
        query: String,
        #[arg(long, default_value = "5")]
        limit: usize,
    },
    /// Print retrieved chunks formatted as answer context
    Context {
        query: String,
        #[arg(long, default_value = "5")]
        limit: usize,
    },
    /// Show store statistics
    Stats,
    /// Remove every stored record
    Clear {
        /// Clear in memory without persisting the empty store
        #[arg(long)]
        no_save: bool,
    },
    /// List legal citations found in a text file
    Refs {
        file: PathBuf,
    },
}
