use clap::{Args, Subcommand};
use rust_decimal::Decimal;
use uuid::Uuid;

use canteen::{
    access::AdminAction,
    currency::Currency,
    products::{NewProduct, ProductFilters, ProductPatch},
};

use crate::{context::AppContext, render};

#[derive(Debug, Args)]
pub(crate) struct ProductsCommand {
    #[command(subcommand)]
    command: ProductsSubcommand,
}

#[derive(Debug, Subcommand)]
enum ProductsSubcommand {
    /// List catalog products, including unavailable ones
    List(ListArgs),
    /// Create a product
    Create(CreateArgs),
    /// Replace every field of a product
    Update(UpdateArgs),
    /// Change selected fields of a product
    Edit(EditArgs),
    /// Toggle whether a product can be ordered
    Availability(AvailabilityArgs),
    /// Delete a product
    Delete(DeleteArgs),
}

#[derive(Debug, Args)]
struct ListArgs {
    /// Restrict to one category
    #[arg(long)]
    category: Option<String>,

    /// Case-insensitive search over name and description
    #[arg(long)]
    search: Option<String>,
}

#[derive(Debug, Args)]
struct CreateArgs {
    /// Display name
    #[arg(long)]
    name: String,

    /// Unit price
    #[arg(long)]
    price: Decimal,

    /// Category label
    #[arg(long)]
    category: String,

    /// Long description
    #[arg(long)]
    description: Option<String>,

    /// Currency code; the backend default applies when omitted
    #[arg(long)]
    currency: Option<Currency>,

    /// Image reference
    #[arg(long)]
    image_url: Option<String>,

    /// Create the product as unavailable
    #[arg(long)]
    unavailable: bool,
}

#[derive(Debug, Args)]
struct UpdateArgs {
    /// Product UUID to replace
    id: Uuid,

    #[command(flatten)]
    fields: CreateArgs,
}

#[derive(Debug, Args)]
struct EditArgs {
    /// Product UUID to edit
    id: Uuid,

    /// Replacement name
    #[arg(long)]
    name: Option<String>,

    /// Replacement price
    #[arg(long)]
    price: Option<Decimal>,

    /// Replacement category
    #[arg(long)]
    category: Option<String>,

    /// Replacement description
    #[arg(long)]
    description: Option<String>,

    /// Replacement currency
    #[arg(long)]
    currency: Option<Currency>,

    /// Replacement image reference
    #[arg(long)]
    image_url: Option<String>,
}

#[derive(Debug, Args)]
struct AvailabilityArgs {
    /// Product UUID to toggle
    id: Uuid,

    /// New availability
    #[arg(long)]
    available: bool,
}

#[derive(Debug, Args)]
struct DeleteArgs {
    /// Product UUID to delete
    id: Uuid,
}

pub(crate) async fn run(context: &AppContext, command: ProductsCommand) -> Result<(), String> {
    context
        .session
        .authorize(AdminAction::ManageProducts)
        .await
        .map_err(|error| error.to_string())?;

    match command.command {
        ProductsSubcommand::List(args) => list(context, args).await,
        ProductsSubcommand::Create(args) => create(context, args).await,
        ProductsSubcommand::Update(args) => update(context, args).await,
        ProductsSubcommand::Edit(args) => edit(context, args).await,
        ProductsSubcommand::Availability(args) => availability(context, args).await,
        ProductsSubcommand::Delete(args) => delete(context, args).await,
    }
}

async fn list(context: &AppContext, args: ListArgs) -> Result<(), String> {
    let mut products = context
        .products
        .list(&ProductFilters::default())
        .await
        .map_err(|error| format!("failed to fetch products: {error}"))?;

    let filters = ProductFilters {
        category: args.category,
        available: None,
        search: args.search,
        currency: None,
    };

    filters.apply(&mut products);

    if products.is_empty() {
        println!("no products match");
        return Ok(());
    }

    println!("{}", render::product_table(&products));

    Ok(())
}

fn new_product(fields: CreateArgs) -> NewProduct {
    NewProduct {
        name: fields.name,
        description: fields.description,
        price: fields.price,
        currency: fields.currency,
        image_url: fields.image_url,
        category: fields.category,
        available: fields.unavailable.then_some(false),
    }
}

async fn create(context: &AppContext, args: CreateArgs) -> Result<(), String> {
    let product = context
        .products
        .create(&new_product(args))
        .await
        .map_err(|error| format!("failed to create product: {error}"))?;

    println!("created {} ({})", product.name, product.id);

    Ok(())
}

async fn update(context: &AppContext, args: UpdateArgs) -> Result<(), String> {
    let product = context
        .products
        .update(args.id, &new_product(args.fields))
        .await
        .map_err(|error| format!("failed to update product: {error}"))?;

    println!("updated {} ({})", product.name, product.id);

    Ok(())
}

async fn edit(context: &AppContext, args: EditArgs) -> Result<(), String> {
    let patch = ProductPatch {
        name: args.name,
        description: args.description,
        price: args.price,
        currency: args.currency,
        image_url: args.image_url,
        category: args.category,
        available: None,
    };

    let product = context
        .products
        .patch(args.id, &patch)
        .await
        .map_err(|error| format!("failed to edit product: {error}"))?;

    println!("updated {} ({})", product.name, product.id);

    Ok(())
}

async fn availability(context: &AppContext, args: AvailabilityArgs) -> Result<(), String> {
    let product = context
        .products
        .set_availability(args.id, args.available)
        .await
        .map_err(|error| format!("failed to change availability: {error}"))?;

    println!(
        "{} is now {}",
        product.name,
        if product.available { "available" } else { "unavailable" }
    );

    Ok(())
}

async fn delete(context: &AppContext, args: DeleteArgs) -> Result<(), String> {
    context
        .session
        .authorize(AdminAction::DeleteProduct)
        .await
        .map_err(|error| error.to_string())?;

    context
        .products
        .delete(args.id)
        .await
        .map_err(|error| format!("failed to delete product: {error}"))?;

    println!("deleted product {}", args.id);

    Ok(())
}
