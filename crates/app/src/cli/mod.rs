use clap::{Parser, Subcommand};

mod migrate;
mod session;

#[derive(Debug, Parser)]
#[command(name = "platter-app", about = "Platter operator CLI", long_about = None)]
pub(crate) struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Apply pending schema migrations
    Migrate(migrate::MigrateArgs),
    Session(session::SessionCommand),
}

impl Cli {
    pub(crate) async fn run(self) -> Result<(), String> {
        match self.command {
            Commands::Migrate(args) => migrate::run(args).await,
            Commands::Session(command) => session::run(command).await,
        }
    }
}
