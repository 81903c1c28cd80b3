//! CLI command definitions and parsing
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "docent",
    version,
    about = "Ask questions about your own PDF documents",
    long_about = "Docent indexes PDF documents (by URL or local path) into a hybrid \
                  keyword + embedding retrieval pipeline with cross-encoder reranking, \
                  and answers natural-language questions with a hosted LLM, either \
                  one-shot or as a multi-turn chat."
)]
pub struct Cli {
    /// Global config file path (defaults to ~/.config/docent/config.toml)
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start an interactive multi-turn chat over the given documents
    Chat {
        /// Document locators (PDF URLs or local paths), repeatable
        #[arg(short, long = "source", value_name = "URL|PATH", required = true)]
        sources: Vec<String>,

        /// Target chunk size in characters
        #[arg(long)]
        chunk_size: Option<usize>,
    },

    /// Ask a single question over the given documents (no chat history)
    Ask {
        /// Question to ask
        question: String,

        /// Document locators (PDF URLs or local paths), repeatable
        #[arg(short, long = "source", value_name = "URL|PATH", required = true)]
        sources: Vec<String>,

        /// Target chunk size in characters
        #[arg(long)]
        chunk_size: Option<usize>,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Initialize default configuration
    Init {
        /// Force overwrite existing config
        #[arg(short, long)]
        force: bool,
    },

    /// Validate configuration file
    Validate {
        /// Path to config file (defaults to standard location)
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
}

impl Cli {
    /// Parse CLI arguments from command line
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
