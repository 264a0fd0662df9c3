//! Checkout validation and order-creation payloads.
//!
//! All rules run client-side, before any network call; a draft that fails
//! validation never produces a request.

use serde::Serialize;
use thiserror::Error;
use uuid::Uuid;

use crate::cart::Cart;

/// Customer contact details captured during checkout. Transient; discarded
/// once submission succeeds or the form is cancelled.
#[derive(Debug, Clone, Default)]
pub struct OrderDraft {
    /// Customer name (required).
    pub name: String,

    /// Customer email (optional).
    pub email: String,

    /// Customer phone (optional).
    pub phone: String,

    /// Free-text notes (optional).
    pub notes: String,
}

/// Checkout form fields that can carry a validation error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DraftField {
    /// Customer name field.
    Name,
    /// Customer email field.
    Email,
    /// Customer phone field.
    Phone,
}

/// A single field-level validation failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DraftFieldError {
    /// Name was empty.
    #[error("name is required")]
    NameRequired,

    /// Name was shorter than two trimmed characters.
    #[error("name must be at least 2 characters")]
    NameTooShort,

    /// Email did not match the `local@domain.tld` shape.
    #[error("invalid email format")]
    InvalidEmail,

    /// Phone was not 7–20 characters of digits, spaces, hyphens, plus, or
    /// parentheses.
    #[error("invalid phone number format")]
    InvalidPhone,
}

/// Field-scoped validation errors. Errors clear individually as the user
/// edits the offending field.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DraftErrors {
    /// Error on the name field, if any.
    pub name: Option<DraftFieldError>,

    /// Error on the email field, if any.
    pub email: Option<DraftFieldError>,

    /// Error on the phone field, if any.
    pub phone: Option<DraftFieldError>,
}

impl DraftErrors {
    /// Whether every field passed.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.name.is_none() && self.email.is_none() && self.phone.is_none()
    }

    /// Clears the error attached to one field.
    pub fn clear(&mut self, field: DraftField) {
        match field {
            DraftField::Name => self.name = None,
            DraftField::Email => self.email = None,
            DraftField::Phone => self.phone = None,
        }
    }
}

impl OrderDraft {
    /// Validates every field, collecting all failures.
    #[must_use]
    pub fn validate(&self) -> DraftErrors {
        let mut errors = DraftErrors::default();
        let name = self.name.trim();

        if name.is_empty() {
            errors.name = Some(DraftFieldError::NameRequired);
        } else if name.chars().count() < 2 {
            errors.name = Some(DraftFieldError::NameTooShort);
        }

        let email = self.email.trim();
        if !email.is_empty() && !is_valid_email(email) {
            errors.email = Some(DraftFieldError::InvalidEmail);
        }

        let phone = self.phone.trim();
        if !phone.is_empty() && !is_valid_phone(phone) {
            errors.phone = Some(DraftFieldError::InvalidPhone);
        }

        errors
    }

    /// Builds the order-creation request from this draft and the cart.
    /// Optional fields left blank are omitted from the payload entirely.
    ///
    /// # Errors
    ///
    /// Returns the field-scoped errors when any field fails validation; no
    /// request is produced.
    pub fn to_request(&self, cart: &Cart) -> Result<CreateOrderRequest, DraftErrors> {
        let errors = self.validate();

        if !errors.is_empty() {
            return Err(errors);
        }

        Ok(CreateOrderRequest {
            customer_name: self.name.trim().to_string(),
            customer_email: non_empty(&self.email),
            customer_phone: non_empty(&self.phone),
            notes: non_empty(&self.notes),
            items: cart
                .lines()
                .iter()
                .map(|line| OrderItemRequest {
                    product_id: line.product.id,
                    quantity: line.quantity,
                })
                .collect(),
        })
    }
}

fn non_empty(value: &str) -> Option<String> {
    let trimmed = value.trim();

    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// `local@domain.tld`: no whitespace, exactly one `@`, and a `.` after the
/// `@` with at least one character on each side.
fn is_valid_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }

    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };

    if local.is_empty() || domain.is_empty() || domain.contains('@') {
        return false;
    }

    domain
        .char_indices()
        .any(|(index, character)| {
            character == '.' && index > 0 && index + 1 < domain.len()
        })
}

/// 7–20 characters drawn from digits, spaces, hyphens, plus, parentheses.
fn is_valid_phone(phone: &str) -> bool {
    let length = phone.chars().count();

    if !(7..=20).contains(&length) {
        return false;
    }

    phone
        .chars()
        .all(|character| character.is_ascii_digit() || matches!(character, ' ' | '-' | '+' | '(' | ')'))
}

/// One (product, quantity) pair of an order-creation request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderItemRequest {
    /// Identity of the ordered product.
    pub product_id: Uuid,

    /// Ordered quantity.
    pub quantity: u32,
}

/// Payload for `POST /orders`. Unset optionals are omitted from the JSON
/// body, never sent as empty strings.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreateOrderRequest {
    /// Customer name.
    pub customer_name: String,

    /// Customer email, when provided.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_email: Option<String>,

    /// Customer phone, when provided.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_phone: Option<String>,

    /// Free-text notes, when provided.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,

    /// The cart lines as (product, quantity) pairs.
    pub items: Vec<OrderItemRequest>,
}
