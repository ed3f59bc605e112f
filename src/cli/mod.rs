pub mod commands;
pub mod output;

use crate::errors::Result;
use clap::{Parser, Subcommand};
use clap_complete::Shell;

#[derive(Parser)]
#[command(name = "shelf")]
#[command(about = "Shelf - branch-aware stash management for Git")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(long, short, global = true)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List stash entries created by shelf
    List {
        /// Emit machine-readable JSON
        #[arg(long)]
        json: bool,
    },

    /// Stash the working directory changes for the current branch
    Save,

    /// Restore a stash entry's changes to the working directory
    Apply {
        /// Stash commit sha (defaults to the latest entry for the current branch)
        sha: Option<String>,
    },

    /// Restore a stash entry and remove it from the stack
    Pop {
        /// Stash commit sha (defaults to the latest entry for the current branch)
        sha: Option<String>,
    },

    /// Remove a stash entry
    Drop {
        /// Stash commit sha
        sha: String,

        /// Skip the confirmation prompt
        #[arg(long, short)]
        yes: bool,
    },

    /// Show the files recorded in a stash entry
    Show {
        /// Stash commit sha (a unique prefix is enough)
        sha: String,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        // Set up logging based on verbosity
        self.setup_logging();

        match self.command {
            Commands::List { json } => commands::list::run(json).await,
            Commands::Save => commands::save::run().await,
            Commands::Apply { sha } => commands::apply::run(sha, false).await,
            Commands::Pop { sha } => commands::apply::run(sha, true).await,
            Commands::Drop { sha, yes } => commands::drop::run(sha, yes).await,
            Commands::Show { sha } => commands::show::run(sha).await,
            Commands::Completions { shell } => commands::completions::generate_completions(shell),
        }
    }

    fn setup_logging(&self) {
        let level = if self.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        };

        let subscriber = tracing_subscriber::fmt()
            .with_max_level(level)
            .with_target(false)
            .without_time();

        if self.no_color {
            subscriber.with_ansi(false).init();
        } else {
            subscriber.init();
        }
    }
}
