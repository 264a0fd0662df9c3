use clap::{Args, Subcommand};
use uuid::Uuid;

use canteen::{
    access::{self, AdminAction, Role},
    orders::{matches_search, OrderStatus},
};

use crate::{context::AppContext, render};

#[derive(Debug, Args)]
pub(crate) struct OrdersCommand {
    #[command(subcommand)]
    command: OrdersSubcommand,
}

#[derive(Debug, Subcommand)]
enum OrdersSubcommand {
    /// List orders, optionally filtered by status or search text
    List(ListArgs),
    /// Show an order with its lines
    Show(ShowArgs),
    /// Request a status change
    SetStatus(SetStatusArgs),
    /// Delete an order
    Delete(DeleteArgs),
}

#[derive(Debug, Args)]
struct ListArgs {
    /// Restrict to one status
    #[arg(long)]
    status: Option<OrderStatus>,

    /// Case-insensitive search over customer name, number, email, and phone
    #[arg(long)]
    search: Option<String>,
}

#[derive(Debug, Args)]
struct ShowArgs {
    /// Order UUID to show
    id: Uuid,
}

#[derive(Debug, Args)]
struct SetStatusArgs {
    /// Order UUID to change
    id: Uuid,

    /// Target status
    status: OrderStatus,
}

#[derive(Debug, Args)]
struct DeleteArgs {
    /// Order UUID to delete
    id: Uuid,
}

pub(crate) async fn run(context: &AppContext, command: OrdersCommand) -> Result<(), String> {
    let user = context
        .session
        .authorize(AdminAction::ManageOrders)
        .await
        .map_err(|error| error.to_string())?;

    match command.command {
        OrdersSubcommand::List(args) => list(context, args).await,
        OrdersSubcommand::Show(args) => show(context, args).await,
        OrdersSubcommand::SetStatus(args) => set_status(context, args).await,
        OrdersSubcommand::Delete(args) => delete(context, user.role, args).await,
    }
}

async fn list(context: &AppContext, args: ListArgs) -> Result<(), String> {
    let mut orders = context
        .orders
        .list(args.status)
        .await
        .map_err(|error| format!("failed to fetch orders: {error}"))?;

    if let Some(query) = &args.search {
        orders.retain(|order| matches_search(order, query));
    }

    if orders.is_empty() {
        println!("no orders match");
        return Ok(());
    }

    println!("{}", render::order_table(&orders));

    Ok(())
}

async fn show(context: &AppContext, args: ShowArgs) -> Result<(), String> {
    let order = context
        .orders
        .get(args.id)
        .await
        .map_err(|error| format!("failed to fetch order: {error}"))?;

    println!("{}", render::order_detail(&order));

    Ok(())
}

async fn set_status(context: &AppContext, args: SetStatusArgs) -> Result<(), String> {
    let current = context
        .orders
        .get(args.id)
        .await
        .map_err(|error| format!("failed to fetch order: {error}"))?
        .order
        .status;

    if !current.can_transition(args.status) {
        if current.is_terminal() {
            return Err(format!("order is {current}; its status can no longer change"));
        }

        return Err(format!("cannot move a {current} order to {}", args.status));
    }

    let order = context
        .orders
        .update_status(args.id, args.status)
        .await
        .map_err(|error| format!("failed to update order status: {error}"))?;

    println!("order #{} is now {}", order.order_number, order.status);

    Ok(())
}

async fn delete(context: &AppContext, role: Role, args: DeleteArgs) -> Result<(), String> {
    let order = context
        .orders
        .get(args.id)
        .await
        .map_err(|error| format!("failed to fetch order: {error}"))?
        .order;

    if !access::may_delete_order(role, order.status) {
        return Err(format!(
            "only pending or cancelled orders can be deleted, and only by a manager or admin; \
             order #{} is {} and your role is {role}",
            order.order_number, order.status
        ));
    }

    context
        .orders
        .delete(args.id)
        .await
        .map_err(|error| format!("failed to delete order: {error}"))?;

    println!("deleted order #{}", order.order_number);

    Ok(())
}
