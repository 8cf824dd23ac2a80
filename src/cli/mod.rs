use clap::{Parser, Subcommand};
use std::path::PathBuf;

pub mod commands;

#[derive(Parser)]
#[command(name = "resource-workflow")]
#[command(about = "Validate and exercise resource lifecycle workflows")]
#[command(long_about = "Loads the bundled resource workflows (blog_post, pull_request, subscription) \
                       plus any configured in resource-workflow.toml, validates them, and lets you \
                       dry-run transitions from a given state.")]
pub struct Cli {
    /// Additional configuration file
    #[arg(long, global = true, help = "Path to a TOML file with extra workflow definitions")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Load and validate every workflow definition
    Validate,
    /// Describe a workflow: states, transitions and terminal states
    Show {
        /// Workflow name
        workflow: String,
    },
    /// List transitions enabled from a state
    Enabled {
        /// Workflow name
        workflow: String,
        /// State to evaluate from
        #[arg(long, help = "State to evaluate from (defaults to the initial state)")]
        state: Option<String>,
    },
    /// Dry-run a transition from a state
    Apply {
        /// Workflow name
        workflow: String,
        /// Transition name
        transition: String,
        /// State to apply from
        #[arg(long, help = "State to apply from (defaults to the initial state)")]
        state: Option<String>,
        /// Print the applied transition as JSON
        #[arg(long, help = "Print the applied transition as JSON")]
        json: bool,
    },
}
