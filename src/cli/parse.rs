//! CLI parse: clap types for ideate. No behavior; definitions only.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Ideate CLI - schema-grounded analytic prompt generation
#[derive(Parser)]
#[command(name = "ideate")]
#[command(about = "Suggest analytic search prompts grounded in a data-model schema")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Workspace root directory (config/ is read from here)
    #[arg(long, default_value = ".")]
    pub workspace: PathBuf,

    /// Configuration file path (overrides default config loading)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(long, default_value = "false")]
    pub verbose: bool,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long)]
    pub log_format: Option<String>,

    /// Log output (stdout, stderr, file)
    #[arg(long)]
    pub log_output: Option<String>,

    /// Log file path (when output is "file")
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate analytic prompts for a schema
    Generate {
        /// Business domain the prompts are about (e.g. "contact center")
        #[arg(long)]
        domain: String,
        /// Schema document (JSON)
        #[arg(long)]
        schema: PathBuf,
        /// Search-history document (JSON)
        #[arg(long)]
        history: Option<PathBuf>,
        /// Maximum number of prompts (overrides config)
        #[arg(long)]
        max: Option<usize>,
        /// Attribute annotation mode: substring or delegated (overrides config)
        #[arg(long)]
        mode: Option<String>,
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Classify a schema into attribute and entity taxonomies
    Classify {
        /// Schema document (JSON)
        #[arg(long)]
        schema: PathBuf,
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Show the grounding passages built for a schema
    Context {
        /// Schema document (JSON)
        #[arg(long)]
        schema: PathBuf,
        /// Search-history document (JSON)
        #[arg(long)]
        history: Option<PathBuf>,
        /// Show the attribute-extraction passages instead
        #[arg(long)]
        extraction: bool,
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Label the declared entity relations of a schema
    Relations {
        /// Schema document (JSON)
        #[arg(long)]
        schema: PathBuf,
        /// Business domain the schema describes
        #[arg(long, default_value = "analytics")]
        domain: String,
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Show the effective configuration
    ShowConfig {
        /// Output format (text/toml or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
}
