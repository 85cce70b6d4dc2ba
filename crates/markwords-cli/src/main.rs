//! markwords CLI — inspect, check and author Mark the Words content.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "markwords", version, about = "Mark the Words exercise toolkit")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the selectable words of a passage
    Inspect {
        /// Path to a .json or .toml content file
        #[arg(long)]
        content: PathBuf,
    },

    /// Select words, check the answer and report the score
    Check {
        /// Path to a .json or .toml content file
        #[arg(long)]
        content: PathBuf,

        /// Word indices to select (e.g. "0,2,5")
        #[arg(long)]
        select: Option<String>,

        /// Saved state to resume from, as a JSON array of word indices
        #[arg(long)]
        state: Option<String>,

        /// Output format: text, json, xapi, html
        #[arg(long, default_value = "text")]
        format: String,

        /// Write the output to a file instead of stdout
        #[arg(long)]
        output: Option<PathBuf>,

        /// Report config file path
        #[arg(long)]
        config: Option<PathBuf>,

        /// Content id used in the xAPI activity id (default: file stem)
        #[arg(long)]
        content_id: Option<String>,
    },

    /// Compute the max score the authoring tool stores on save
    Presave {
        /// Path to a .json or .toml content file
        #[arg(long)]
        content: PathBuf,
    },

    /// Upgrade content parameters from an older version
    Upgrade {
        /// Path to a .json content file
        #[arg(long)]
        content: PathBuf,

        /// Version the content was written for (e.g. "1.0")
        #[arg(long)]
        from: String,
    },

    /// Validate content files
    Validate {
        /// Path to a content file or directory
        #[arg(long)]
        content: PathBuf,
    },

    /// Create starter config and example content
    Init,
}

fn main() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("markwords=info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Inspect { content } => commands::inspect::execute(content),
        Commands::Check {
            content,
            select,
            state,
            format,
            output,
            config,
            content_id,
        } => commands::check::execute(content, select, state, format, output, config, content_id),
        Commands::Presave { content } => commands::presave::execute(content),
        Commands::Upgrade { content, from } => commands::upgrade::execute(content, from),
        Commands::Validate { content } => commands::validate::execute(content),
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
