use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::{info, warn};

use gameroom_bootstrap::{init_logging, print_snapshot, render_to_file, run_standalone, AppContext};
use gameroom_infrastructure::AppConfig;

#[derive(Parser, Debug)]
#[command(name = "gameroom")]
#[command(about = "GameRoom analytics dashboard", long_about = None)]
struct Args {
    /// Path to config file
    #[arg(short, long)]
    config: Option<String>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Serve the JSON API and HTML dashboard (default)
    Serve,
    /// Print the dashboard as JSON to stdout
    Snapshot,
    /// Write the HTML dashboard to a file
    Render {
        #[arg(short, long)]
        output: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let config_path = AppConfig::config_path(args.config.as_deref());
    let config = AppConfig::load_from(Some(&config_path)).await?;
    // The subscriber depends on `log_dir`, so config warnings are re-emitted here.
    let _guard = init_logging(config.log_dir.as_deref());
    if !Path::new(&config_path).exists() {
        warn!("{} not found, using defaults", config_path);
    }
    info!(
        config = %config_path,
        bind_addr = %config.bind_addr,
        data_dir = %config.data_dir,
        "configuration loaded"
    );
    let context = AppContext::from_config(&config);

    match args.command.unwrap_or(Command::Serve) {
        Command::Serve => run_standalone(context).await,
        Command::Snapshot => print_snapshot(context).await,
        Command::Render { output } => render_to_file(context, &output).await,
    }
}
