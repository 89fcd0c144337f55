use clap::Parser;
use semantic_agent::cli::{self, Cli, Command};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Chat => cli::chat::run().await,
        Command::Demo => cli::demo::run().await,
    }
}
