use clap::Args;

use canteen::{checkout::OrderDraft, currency::format_price};
use canteen_app::checkout::{CheckoutError, CheckoutService};

use crate::context::AppContext;

#[derive(Debug, Args)]
pub(crate) struct CheckoutArgs {
    /// Customer name
    #[arg(long)]
    name: String,

    /// Customer email
    #[arg(long)]
    email: Option<String>,

    /// Customer phone
    #[arg(long)]
    phone: Option<String>,

    /// Free-text notes for the kitchen
    #[arg(long)]
    notes: Option<String>,
}

pub(crate) async fn run(context: &AppContext, args: CheckoutArgs) -> Result<(), String> {
    let mut store = context.cart_store();
    store.open_cart();
    store.begin_checkout();

    let draft = OrderDraft {
        name: args.name,
        email: args.email.unwrap_or_default(),
        phone: args.phone.unwrap_or_default(),
        notes: args.notes.unwrap_or_default(),
    };

    let service = CheckoutService::new(context.orders.clone());

    match service.submit(&mut store, &draft).await {
        Ok(order) => {
            println!("order #{} placed", order.order_number);
            println!("status: {}", order.status);
            println!(
                "total: {}",
                format_price(order.total_amount, order.currency)
            );

            Ok(())
        }
        Err(CheckoutError::Invalid(errors)) => {
            let mut lines = Vec::new();

            if let Some(error) = errors.name {
                lines.push(format!("name: {error}"));
            }

            if let Some(error) = errors.email {
                lines.push(format!("email: {error}"));
            }

            if let Some(error) = errors.phone {
                lines.push(format!("phone: {error}"));
            }

            Err(lines.join("\n"))
        }
        Err(error) => Err(error.user_message()),
    }
}
