//! Orders and the status lifecycle.
//!
//! Orders are backend-owned: the client never constructs an order identity,
//! order number, or status value. The transition rules here only decide what
//! the staff UI may *request*; the backend independently rejects illegal
//! transitions.

use std::{fmt, str::FromStr};

use jiff::Timestamp;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::currency::Currency;

/// The closed set of order statuses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    /// Submitted, awaiting staff confirmation.
    Pending,
    /// Accepted by staff.
    Confirmed,
    /// Being prepared.
    Preparing,
    /// Ready for pickup or delivery.
    Ready,
    /// Fulfilled. Terminal.
    Completed,
    /// Cancelled. Terminal.
    Cancelled,
}

impl OrderStatus {
    /// Every status, in lifecycle order.
    pub const ALL: [Self; 6] = [
        Self::Pending,
        Self::Confirmed,
        Self::Preparing,
        Self::Ready,
        Self::Completed,
        Self::Cancelled,
    ];

    /// Lowercase wire value, as the backend expects it.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Confirmed => "confirmed",
            Self::Preparing => "preparing",
            Self::Ready => "ready",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        }
    }

    /// Whether no further transitions may be requested.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::Cancelled)
    }

    /// Position along the forward chain; `None` for `cancelled`, which sits
    /// outside it.
    const fn chain_position(self) -> Option<u8> {
        match self {
            Self::Pending => Some(0),
            Self::Confirmed => Some(1),
            Self::Preparing => Some(2),
            Self::Ready => Some(3),
            Self::Completed => Some(4),
            Self::Cancelled => None,
        }
    }

    /// Whether the staff UI may request a transition from `self` to `to`:
    /// any forward step along the chain, direct cancellation from any
    /// non-terminal state, or direct completion from `ready`.
    #[must_use]
    pub fn can_transition(self, to: Self) -> bool {
        if self.is_terminal() {
            return false;
        }

        if to == Self::Cancelled {
            return true;
        }

        match (self.chain_position(), to.chain_position()) {
            (Some(from), Some(target)) => target > from,
            _ => false,
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = UnknownOrderStatus;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "pending" => Ok(Self::Pending),
            "confirmed" => Ok(Self::Confirmed),
            "preparing" => Ok(Self::Preparing),
            "ready" => Ok(Self::Ready),
            "completed" => Ok(Self::Completed),
            "cancelled" => Ok(Self::Cancelled),
            _ => Err(UnknownOrderStatus(value.to_string())),
        }
    }
}

/// Error returned when parsing an unrecognised status value.
#[derive(Debug, Clone, Error)]
#[error("unknown order status: {0}")]
pub struct UnknownOrderStatus(pub String);

/// Persisted order as the backend returns it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    /// Backend-assigned identity.
    pub id: Uuid,

    /// Backend-assigned sequential number, surfaced to the customer.
    pub order_number: u64,

    /// Customer name as submitted.
    pub customer_name: String,

    /// Customer email, when provided.
    pub customer_email: Option<String>,

    /// Customer phone, when provided.
    pub customer_phone: Option<String>,

    /// Backend-computed total.
    pub total_amount: Decimal,

    /// Currency of the total.
    pub currency: Currency,

    /// Current lifecycle status.
    pub status: OrderStatus,

    /// Free-text notes, when provided.
    pub notes: Option<String>,

    /// Creation timestamp.
    pub created_at: Timestamp,

    /// Last update timestamp.
    pub updated_at: Timestamp,
}

/// One line of a persisted order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderItem {
    /// Backend-assigned identity.
    pub id: Uuid,

    /// Owning order.
    pub order_id: Uuid,

    /// Ordered product.
    pub product_id: Uuid,

    /// Product name captured at order time.
    pub product_name: String,

    /// Ordered quantity.
    pub quantity: u32,

    /// Unit price captured at order time.
    pub unit_price: Decimal,

    /// Currency of the prices.
    pub currency: Currency,

    /// Unit price × quantity.
    pub total_price: Decimal,

    /// Creation timestamp.
    pub created_at: Timestamp,
}

/// Order with its lines, as `GET /orders/:id` returns it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderWithItems {
    /// The order itself.
    #[serde(flatten)]
    pub order: Order,

    /// The order's lines.
    pub items: Vec<OrderItem>,
}

/// Case-insensitive admin search over customer name, order number, email,
/// and phone.
#[must_use]
pub fn matches_search(order: &Order, query: &str) -> bool {
    let query = query.to_lowercase();

    if query.is_empty() {
        return true;
    }

    order.customer_name.to_lowercase().contains(&query)
        || order.order_number.to_string().contains(&query)
        || order
            .customer_email
            .as_ref()
            .is_some_and(|email| email.to_lowercase().contains(&query))
        || order
            .customer_phone
            .as_ref()
            .is_some_and(|phone| phone.contains(&query))
}

#[cfg(test)]
mod tests {
    use rust_decimal::dec;
    use testresult::TestResult;

    use super::*;

    fn order(status: OrderStatus) -> Order {
        Order {
            id: Uuid::nil(),
            order_number: 1042,
            customer_name: "Jane Doe".to_string(),
            customer_email: Some("jane@example.com".to_string()),
            customer_phone: Some("+20 123 456 7890".to_string()),
            total_amount: dec!(100.00),
            currency: Currency::Egp,
            status,
            notes: None,
            created_at: Timestamp::UNIX_EPOCH,
            updated_at: Timestamp::UNIX_EPOCH,
        }
    }

    #[test]
    fn terminal_statuses_admit_no_transitions() {
        for terminal in [OrderStatus::Completed, OrderStatus::Cancelled] {
            for target in OrderStatus::ALL {
                assert!(
                    !terminal.can_transition(target),
                    "{terminal} must not transition to {target}"
                );
            }
        }
    }

    #[test]
    fn forward_steps_are_allowed() {
        assert!(OrderStatus::Pending.can_transition(OrderStatus::Confirmed));
        assert!(OrderStatus::Confirmed.can_transition(OrderStatus::Preparing));
        assert!(OrderStatus::Preparing.can_transition(OrderStatus::Ready));
        assert!(OrderStatus::Ready.can_transition(OrderStatus::Completed));
    }

    #[test]
    fn backward_steps_are_rejected() {
        assert!(!OrderStatus::Completed.can_transition(OrderStatus::Pending));
        assert!(!OrderStatus::Ready.can_transition(OrderStatus::Preparing));
        assert!(!OrderStatus::Confirmed.can_transition(OrderStatus::Pending));
    }

    #[test]
    fn cancellation_is_reachable_from_any_non_terminal_state() {
        for status in [
            OrderStatus::Pending,
            OrderStatus::Confirmed,
            OrderStatus::Preparing,
            OrderStatus::Ready,
        ] {
            assert!(
                status.can_transition(OrderStatus::Cancelled),
                "{status} should allow cancellation"
            );
        }
    }

    #[test]
    fn status_serializes_lowercase() -> TestResult {
        assert_eq!(serde_json::to_string(&OrderStatus::Preparing)?, "\"preparing\"");
        assert_eq!(
            serde_json::from_str::<OrderStatus>("\"cancelled\"")?,
            OrderStatus::Cancelled
        );

        Ok(())
    }

    #[test]
    fn search_matches_name_number_email_and_phone() {
        let order = order(OrderStatus::Pending);

        assert!(matches_search(&order, "jane"));
        assert!(matches_search(&order, "1042"));
        assert!(matches_search(&order, "JANE@EXAMPLE.COM"));
        assert!(matches_search(&order, "456"));
        assert!(!matches_search(&order, "smith"));
        assert!(matches_search(&order, ""));
    }

    #[test]
    fn order_with_items_flattens_on_the_wire() -> TestResult {
        let with_items = OrderWithItems {
            order: order(OrderStatus::Ready),
            items: Vec::new(),
        };

        let value = serde_json::to_value(&with_items)?;
        let body = value.as_object().ok_or("expected object body")?;

        assert!(body.contains_key("order_number"), "flattened order fields expected");
        assert!(body.contains_key("items"), "items array expected");

        Ok(())
    }
}
