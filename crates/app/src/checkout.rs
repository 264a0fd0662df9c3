//! Checkout submission.
//!
//! Validation happens before any network call; a failed submission leaves
//! the cart untouched and the drawer open so the user can retry without
//! re-entering items.

use tracing::info;

use canteen::{
    checkout::{DraftErrors, OrderDraft},
    orders::Order,
};

use crate::{api::ApiError, api::OrdersBackend, store::CartStore};

/// Errors produced by a checkout attempt.
#[derive(Debug, thiserror::Error)]
pub enum CheckoutError {
    /// The cart has no lines to submit.
    #[error("cart is empty")]
    EmptyCart,

    /// One or more contact fields failed validation; no request was sent.
    #[error("checkout form is invalid")]
    Invalid(DraftErrors),

    /// The backend rejected the order or the call failed.
    #[error(transparent)]
    Submit(#[from] ApiError),
}

impl CheckoutError {
    /// Message to show the user: the backend's own message verbatim when
    /// it provided one, a generic retry prompt otherwise.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::EmptyCart => "Your cart is empty.".to_string(),
            Self::Invalid(_) => "Please correct the highlighted fields.".to_string(),
            Self::Submit(error) => error
                .backend_message()
                .map_or_else(
                    || "Failed to place order. Please try again.".to_string(),
                    ToString::to_string,
                ),
        }
    }
}

/// Turns a cart and a validated draft into a submitted order.
pub struct CheckoutService<B> {
    backend: B,
}

impl<B: OrdersBackend> CheckoutService<B> {
    /// Creates the service over an orders backend.
    #[must_use]
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    /// Validates `draft`, submits the cart, and on success clears the
    /// cart store and closes the drawer. On failure the cart is left
    /// exactly as it was, drawer still open.
    ///
    /// # Errors
    ///
    /// [`CheckoutError::EmptyCart`] for an empty cart,
    /// [`CheckoutError::Invalid`] when validation blocks submission, and
    /// [`CheckoutError::Submit`] when the backend call fails.
    pub async fn submit(
        &self,
        store: &mut CartStore,
        draft: &OrderDraft,
    ) -> Result<Order, CheckoutError> {
        if store.cart().is_empty() {
            return Err(CheckoutError::EmptyCart);
        }

        let request = draft
            .to_request(store.cart())
            .map_err(CheckoutError::Invalid)?;

        let order = self.backend.create_order(request).await?;

        info!(order_number = order.order_number, "order placed");

        store.clear();
        store.close_cart();

        Ok(order)
    }
}
