use clap::Args;

use canteen::{currency::Currency, products::ProductFilters};

use crate::{context::AppContext, render};

#[derive(Debug, Args)]
pub(crate) struct MenuArgs {
    /// Restrict to one category
    #[arg(long)]
    category: Option<String>,

    /// Case-insensitive search over name and description
    #[arg(long)]
    search: Option<String>,

    /// Restrict to one currency code (for example EGP)
    #[arg(long)]
    currency: Option<Currency>,

    /// Include products that cannot currently be ordered
    #[arg(long)]
    all: bool,

    /// List only the known categories instead of products
    #[arg(long)]
    categories: bool,

    /// List the supported currencies instead of products
    #[arg(long)]
    currencies: bool,
}

pub(crate) async fn run(context: &AppContext, args: MenuArgs) -> Result<(), String> {
    if args.currencies {
        let currencies = context
            .products
            .currencies()
            .await
            .map_err(|error| format!("failed to fetch currencies: {error}"))?;

        for currency in currencies {
            let default = if currency.is_default { " (default)" } else { "" };
            println!("{} {}{default}", currency.code, currency.symbol);
        }

        return Ok(());
    }

    if args.categories {
        let categories = context
            .products
            .categories()
            .await
            .map_err(|error| format!("failed to fetch categories: {error}"))?;

        for category in categories {
            println!("{category}");
        }

        return Ok(());
    }

    let filters = ProductFilters {
        category: args.category,
        available: if args.all { None } else { Some(true) },
        search: args.search,
        currency: args.currency,
    };

    let products = context
        .products
        .list(&filters)
        .await
        .map_err(|error| format!("failed to fetch the menu: {error}"))?;

    if products.is_empty() {
        println!("no products match");
        return Ok(());
    }

    println!("{}", render::product_table(&products));

    Ok(())
}
