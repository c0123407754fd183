//! Command line interface
//!
//! `serve` (the default) runs the HTTP server.

pub mod serve;

use clap::{Args, Parser, Subcommand};

/// Thesis Gateway - study assistant API backed by YandexGPT and Gemini
#[derive(Parser, Debug)]
#[command(name = "thesis-gateway")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Cli {
    /// Subcommand to run; `serve` with no overrides when none was given
    pub fn command(self) -> Command {
        self.command
            .unwrap_or_else(|| Command::Serve(ServeArgs::default()))
    }
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the API server (default)
    Serve(ServeArgs),
}

#[derive(Args, Debug, Default, Clone)]
pub struct ServeArgs {
    /// Bind address, overrides `server.host`
    #[arg(long)]
    pub host: Option<String>,

    /// Listen port, overrides `server.port`
    #[arg(long)]
    pub port: Option<u16>,
}
