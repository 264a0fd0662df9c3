//! Table rendering for command output.

use jiff::Timestamp;
use tabled::{
    builder::Builder,
    settings::{
        Alignment, Color, Style,
        object::{Columns, Rows},
    },
};

use canteen::{
    cart::Cart,
    currency::format_price,
    orders::{Order, OrderWithItems},
    products::Product,
};

fn render(builder: Builder, numeric_columns: std::ops::Range<usize>) -> String {
    let mut table = builder.build();

    table.with(Style::modern_rounded());
    table.modify(Rows::first(), Color::BOLD);
    table.modify(Columns::new(numeric_columns), Alignment::right());

    table.to_string()
}

pub fn product_table(products: &[Product]) -> String {
    let mut builder = Builder::default();

    builder.push_record(["ID", "Name", "Category", "Price", "Available"]);

    for product in products {
        builder.push_record([
            product.id.to_string(),
            product.name.clone(),
            product.category.clone(),
            format_price(product.price, product.currency),
            if product.available { "yes" } else { "no" }.to_string(),
        ]);
    }

    render(builder, 3..4)
}

pub fn cart_table(cart: &Cart) -> String {
    let mut builder = Builder::default();

    builder.push_record(["Product", "Qty", "Unit", "Line total"]);

    for line in cart.lines() {
        builder.push_record([
            line.product.name.clone(),
            line.quantity.to_string(),
            format_price(line.product.price, line.product.currency),
            format_price(line.line_total(), line.product.currency),
        ]);
    }

    render(builder, 1..4)
}

pub fn order_table(orders: &[Order]) -> String {
    let mut builder = Builder::default();

    builder.push_record(["Number", "ID", "Customer", "Total", "Status", "Placed"]);

    for order in orders {
        builder.push_record([
            order.order_number.to_string(),
            order.id.to_string(),
            order.customer_name.clone(),
            format_price(order.total_amount, order.currency),
            order.status.to_string(),
            format_timestamp(order.created_at),
        ]);
    }

    render(builder, 3..4)
}

pub fn order_detail(order: &OrderWithItems) -> String {
    let mut out = String::new();

    out.push_str(&format!(
        "Order #{} ({})\n",
        order.order.order_number, order.order.status
    ));
    out.push_str(&format!("Customer: {}\n", order.order.customer_name));

    if let Some(email) = &order.order.customer_email {
        out.push_str(&format!("Email: {email}\n"));
    }

    if let Some(phone) = &order.order.customer_phone {
        out.push_str(&format!("Phone: {phone}\n"));
    }

    if let Some(notes) = &order.order.notes {
        out.push_str(&format!("Notes: {notes}\n"));
    }

    out.push_str(&format!(
        "Placed: {}\n\n",
        format_timestamp(order.order.created_at)
    ));

    let mut builder = Builder::default();

    builder.push_record(["Product", "Qty", "Unit", "Total"]);

    for item in &order.items {
        builder.push_record([
            item.product_name.clone(),
            item.quantity.to_string(),
            format_price(item.unit_price, item.currency),
            format_price(item.total_price, item.currency),
        ]);
    }

    out.push_str(&render(builder, 1..4));
    out.push_str(&format!(
        "\nTotal: {}",
        format_price(order.order.total_amount, order.order.currency)
    ));

    out
}

pub fn format_timestamp(timestamp: Timestamp) -> String {
    timestamp.strftime("%Y-%m-%d %H:%M").to_string()
}

#[cfg(test)]
mod tests {
    use jiff::Timestamp;
    use rust_decimal::dec;
    use testresult::TestResult;
    use uuid::Uuid;

    use canteen::{
        cart::Cart,
        currency::Currency,
        orders::{Order, OrderItem, OrderStatus, OrderWithItems},
        products::Product,
    };

    use super::*;

    fn product() -> Product {
        Product {
            id: Uuid::from_u128(1),
            name: "Koshari".to_string(),
            description: None,
            price: dec!(50.00),
            currency: Currency::Egp,
            image_url: None,
            category: "mains".to_string(),
            available: true,
            created_at: Timestamp::UNIX_EPOCH,
            updated_at: Timestamp::UNIX_EPOCH,
        }
    }

    fn order() -> Order {
        Order {
            id: Uuid::from_u128(100),
            order_number: 1042,
            customer_name: "Jane Doe".to_string(),
            customer_email: Some("jane@example.com".to_string()),
            customer_phone: None,
            total_amount: dec!(100.00),
            currency: Currency::Egp,
            status: OrderStatus::Pending,
            notes: Some("no onions".to_string()),
            created_at: Timestamp::UNIX_EPOCH,
            updated_at: Timestamp::UNIX_EPOCH,
        }
    }

    #[test]
    fn cart_table_formats_line_and_line_total() -> TestResult {
        let mut cart = Cart::new();
        cart.add(product(), 2)?;

        let table = cart_table(&cart);

        assert!(table.contains("Koshari"), "product name expected in {table}");
        assert!(table.contains("E£50.00"), "unit price expected in {table}");
        assert!(table.contains("E£100.00"), "line total expected in {table}");

        Ok(())
    }

    #[test]
    fn product_table_marks_availability() {
        let mut unavailable = product();
        unavailable.available = false;

        let table = product_table(&[product(), unavailable]);

        assert!(table.contains("yes"), "available row expected in {table}");
        assert!(table.contains("no"), "unavailable row expected in {table}");
    }

    #[test]
    fn order_detail_prints_present_contact_fields_only() {
        let with_items = OrderWithItems {
            order: order(),
            items: vec![OrderItem {
                id: Uuid::from_u128(200),
                order_id: Uuid::from_u128(100),
                product_id: Uuid::from_u128(1),
                product_name: "Koshari".to_string(),
                quantity: 2,
                unit_price: dec!(50.00),
                currency: Currency::Egp,
                total_price: dec!(100.00),
                created_at: Timestamp::UNIX_EPOCH,
            }],
        };

        let detail = order_detail(&with_items);

        assert!(detail.contains("Order #1042 (pending)"), "header expected in {detail}");
        assert!(detail.contains("Email: jane@example.com"));
        assert!(detail.contains("Notes: no onions"));
        assert!(!detail.contains("Phone:"), "absent phone must not be printed");
        assert!(detail.contains("Total: E£100.00"));
    }

    #[test]
    fn timestamps_render_at_minute_precision() {
        assert_eq!(format_timestamp(Timestamp::UNIX_EPOCH), "1970-01-01 00:00");
    }
}
