use clap::{Args, Subcommand};
use uuid::Uuid;

use canteen::currency::format_price;

use crate::{context::AppContext, render};

#[derive(Debug, Args)]
pub(crate) struct CartCommand {
    #[command(subcommand)]
    command: CartSubcommand,
}

#[derive(Debug, Subcommand)]
enum CartSubcommand {
    /// Show the cart contents and total
    Show,
    /// Add a product to the cart
    Add(AddArgs),
    /// Remove a product from the cart
    Remove(RemoveArgs),
    /// Set the quantity of a product already in the cart
    Set(SetArgs),
    /// Empty the cart
    Clear,
}

#[derive(Debug, Args)]
struct AddArgs {
    /// Product UUID to add
    product_id: Uuid,

    /// Quantity to add
    #[arg(long, default_value_t = 1)]
    quantity: u32,
}

#[derive(Debug, Args)]
struct RemoveArgs {
    /// Product UUID to remove
    product_id: Uuid,
}

#[derive(Debug, Args)]
struct SetArgs {
    /// Product UUID whose quantity changes
    product_id: Uuid,

    /// New quantity; zero or less removes the line
    quantity: i64,
}

pub(crate) async fn run(context: &AppContext, command: CartCommand) -> Result<(), String> {
    match command.command {
        CartSubcommand::Show => show(context),
        CartSubcommand::Add(args) => add(context, args).await,
        CartSubcommand::Remove(args) => {
            let mut store = context.cart_store();
            store.remove_item(args.product_id);
            show(context)
        }
        CartSubcommand::Set(args) => {
            let mut store = context.cart_store();
            store.update_quantity(args.product_id, args.quantity);
            show(context)
        }
        CartSubcommand::Clear => {
            let mut store = context.cart_store();
            store.clear();
            println!("cart cleared");
            Ok(())
        }
    }
}

fn show(context: &AppContext) -> Result<(), String> {
    let store = context.cart_store();
    let cart = store.cart();

    if cart.is_empty() {
        println!("your cart is empty");
        return Ok(());
    }

    println!("{}", render::cart_table(cart));
    println!("items: {}", cart.item_count());
    println!("total: {}", format_price(cart.total(), cart.currency()));

    Ok(())
}

async fn add(context: &AppContext, args: AddArgs) -> Result<(), String> {
    let product = context
        .products
        .get(args.product_id)
        .await
        .map_err(|error| format!("failed to fetch product: {error}"))?;

    if !product.available {
        return Err(format!("{} is currently unavailable", product.name));
    }

    let name = product.name.clone();
    let mut store = context.cart_store();

    store
        .add_item(product, args.quantity)
        .map_err(|error| format!("cannot add {name}: {error}"))?;

    println!("added {} x {name}", args.quantity);
    show(context)
}
