//! breachlock-ci - CI companion for the BreachLock Platform

use clap::Parser;

mod cli;
mod client;
mod config;
mod error;
mod output;
mod scan;
mod validation;

use cli::args::GlobalOptions;
use cli::{AssetCommands, Cli, Commands};
use error::Result;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::parse();
    init_logging(cli.debug);

    if let Err(err) = run(cli).await {
        eprintln!("Error: {}", err);
        std::process::exit(1);
    }
}

fn init_logging(debug: bool) {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
    if debug {
        builder.filter_module("breachlock_ci", log::LevelFilter::Debug);
    }
    builder.format_timestamp(None).init();
}

async fn run(cli: Cli) -> Result<()> {
    let opts = GlobalOptions::from_cli(&cli);

    match cli.command {
        Commands::Init => cli::init::run(&opts).await,
        Commands::Status { check } => cli::status::run(&opts, check).await,
        Commands::Version => {
            println!("breachlock-ci version {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        Commands::Asset(asset_cmd) => match asset_cmd {
            AssetCommands::List => cli::asset::list(&opts).await,
            AssetCommands::Register => cli::asset::register(&opts).await,
        },
        Commands::Scan => cli::scan::run(&opts).await,
        Commands::Completion { shell } => {
            cli::completions::run(shell);
            Ok(())
        }
    }
}
