use clap::{Parser, Subcommand};

use crate::{config::AppConfig, context::AppContext};

mod admin;
mod auth;
mod cart;
mod checkout;
mod menu;

#[derive(Debug, Parser)]
#[command(name = "canteen", about = "Canteen storefront CLI", long_about = None)]
pub(crate) struct Cli {
    #[command(flatten)]
    pub(crate) config: AppConfig,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Browse the menu
    Menu(menu::MenuArgs),
    /// Inspect and edit the cart
    Cart(cart::CartCommand),
    /// Submit the cart as an order
    Checkout(checkout::CheckoutArgs),
    /// Authenticate a staff account
    Login(auth::LoginArgs),
    /// End the staff session
    Logout,
    /// Show the authenticated account
    Whoami,
    /// Staff-only management commands
    Admin(admin::AdminCommand),
}

impl Cli {
    pub(crate) async fn run(self) -> Result<(), String> {
        let context = AppContext::from_config(&self.config);

        match self.command {
            Commands::Menu(args) => menu::run(&context, args).await,
            Commands::Cart(command) => cart::run(&context, command).await,
            Commands::Checkout(args) => checkout::run(&context, args).await,
            Commands::Login(args) => auth::login(&context, args).await,
            Commands::Logout => auth::logout(&context).await,
            Commands::Whoami => auth::whoami(&context).await,
            Commands::Admin(command) => admin::run(&context, command).await,
        }
    }
}
