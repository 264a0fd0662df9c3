//! Role capabilities.
//!
//! One capability table drives every admin gate: command guards and
//! destructive action checks consult the same lookup instead of scattering
//! role comparisons at call sites.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::orders::OrderStatus;

/// Staff roles assigned by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Full access, including product deletion.
    Admin,
    /// Product and order management.
    Manager,
    /// Order management only.
    Cashier,
}

/// Gated admin actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdminAction {
    /// Reach the product-management surface and its CRUD mutations.
    ManageProducts,
    /// Delete a product.
    DeleteProduct,
    /// Reach the order-management surface and change order status.
    ManageOrders,
    /// Delete an order (further conditioned on the order's status).
    DeleteOrder,
}

impl Role {
    /// The actions this role may perform.
    #[must_use]
    pub const fn permitted_actions(self) -> &'static [AdminAction] {
        match self {
            Self::Admin => &[
                AdminAction::ManageProducts,
                AdminAction::DeleteProduct,
                AdminAction::ManageOrders,
                AdminAction::DeleteOrder,
            ],
            Self::Manager => &[
                AdminAction::ManageProducts,
                AdminAction::ManageOrders,
                AdminAction::DeleteOrder,
            ],
            Self::Cashier => &[AdminAction::ManageOrders],
        }
    }

    /// Whether this role may perform `action`.
    #[must_use]
    pub fn may(self, action: AdminAction) -> bool {
        self.permitted_actions().contains(&action)
    }

    /// Lowercase wire value.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Manager => "manager",
            Self::Cashier => "cashier",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = UnknownRole;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "admin" => Ok(Self::Admin),
            "manager" => Ok(Self::Manager),
            "cashier" => Ok(Self::Cashier),
            _ => Err(UnknownRole(value.to_string())),
        }
    }
}

/// Error returned when parsing an unrecognised role.
#[derive(Debug, Clone, Error)]
#[error("unknown role: {0}")]
pub struct UnknownRole(pub String);

/// Whether `role` may delete an order in `status`: requires the
/// [`AdminAction::DeleteOrder`] capability, and only `pending` or
/// `cancelled` orders may be deleted at all.
#[must_use]
pub fn may_delete_order(role: Role, status: OrderStatus) -> bool {
    role.may(AdminAction::DeleteOrder)
        && matches!(status, OrderStatus::Pending | OrderStatus::Cancelled)
}
