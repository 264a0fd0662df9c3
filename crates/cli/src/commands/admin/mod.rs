use clap::{Args, Subcommand};

use crate::context::AppContext;

mod orders;
mod products;

#[derive(Debug, Args)]
pub(crate) struct AdminCommand {
    #[command(subcommand)]
    command: AdminSubcommand,
}

#[derive(Debug, Subcommand)]
enum AdminSubcommand {
    /// Manage the product catalog
    Products(products::ProductsCommand),
    /// Manage orders
    Orders(orders::OrdersCommand),
}

pub(crate) async fn run(context: &AppContext, command: AdminCommand) -> Result<(), String> {
    match command.command {
        AdminSubcommand::Products(command) => products::run(context, command).await,
        AdminSubcommand::Orders(command) => orders::run(context, command).await,
    }
}
