mod commands;
mod utils;

use clap::{Parser, Subcommand};
use commands::dashboard::{handle_dashboard, DashboardOptions};
use commands::version::handle_version;
use utils::logger::error;

#[derive(Parser)]
#[command(name = "pulse")]
#[command(about = "pulse CLI - live CPU view of the local host")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Full-screen CPU gauge and sparkline; press q to quit
    Dashboard(DashboardOptions),
    Version,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Dashboard(opts) => handle_dashboard(opts).await,
        Commands::Version => handle_version(),
    };

    if let Err(e) = result {
        error(&format!("{:#}", e));
        std::process::exit(1);
    }
}
