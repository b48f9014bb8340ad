//! CLI interface for Gerencial

pub mod commands;
mod output;

pub use output::*;

use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(name = "gerencial")]
#[command(version)]
#[command(about = "Session-gated financial management dashboard", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize a new gerencial.toml configuration file
    Init,

    /// Start the dashboard server
    Serve {
        /// Host to bind to (defaults to the configured host)
        #[arg(long, env = "GERENCIAL_HOST")]
        host: Option<String>,

        /// Port to listen on (defaults to the configured port)
        #[arg(short, long, env = "GERENCIAL_PORT")]
        port: Option<u16>,
    },

    /// Show how the guards decide a single path
    Guard {
        /// Request path, e.g. /clients
        path: String,

        /// Evaluate as an authenticated session
        #[arg(short, long)]
        authenticated: bool,

        /// Which enforcement point to evaluate
        #[arg(short, long, default_value = "both")]
        layer: GuardLayer,
    },

    /// Print the decision matrix of both guards over the known pages
    Routes {
        /// Output format
        #[arg(short, long, default_value = "table")]
        format: OutputFormat,
    },

    /// Check credentials against the configured authenticator
    Login {
        /// Username or e-mail
        #[arg(short, long)]
        username: String,

        /// Password
        #[arg(short, long, env = "GERENCIAL_PASSWORD")]
        password: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum GuardLayer {
    Edge,
    Render,
    Both,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
    Yaml,
}
