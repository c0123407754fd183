use clap::Parser;
use thesis_gateway::cli::{self, Cli, Command};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    match Cli::parse().command() {
        Command::Serve(args) => cli::serve::run(args).await,
    }
}
