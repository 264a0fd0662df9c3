//! Canteen storefront CLI

use std::process;

use clap::Parser;

mod commands;
mod config;
mod context;
mod logging;
mod render;

use commands::Cli;

#[tokio::main]
async fn main() {
    let _env = dotenvy::dotenv();

    let cli = Cli::parse();

    if let Err(error) = logging::init(&cli.config.logging) {
        eprintln!("failed to initialise logging: {error}");
        process::exit(1);
    }

    if let Err(error) = cli.run().await {
        eprintln!("{error}");
        process::exit(1);
    }
}
