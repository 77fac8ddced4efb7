//! CLI interface for Cardkeep

pub mod commands;
mod output;

pub use output::*;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "cardkeep")]
#[command(version)]
#[command(about = "User and card service with a session-gated API", long_about = None)]
pub struct Cli {
    /// Path to the configuration file (defaults to searching for cardkeep.toml)
    #[arg(short, long, global = true, env = "CARDKEEP_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize a new cardkeep.toml configuration file
    Init,

    /// Start the HTTP API server
    Serve {
        /// Host to bind to (overrides config)
        #[arg(long)]
        host: Option<String>,

        /// Port to listen on (overrides config)
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Print a bcrypt hash of a password using the configured cost
    HashPassword {
        password: String,
    },

    /// Check whether a token verifies with the configured signing key
    VerifyToken {
        token: String,
    },
}
