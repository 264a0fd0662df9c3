//! Product Models

use jiff::Timestamp;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::currency::Currency;

/// Product as the backend returns it. Immutable from the client's
/// perspective; only admin CRUD calls mutate it, backend-side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Backend-assigned identity.
    pub id: Uuid,

    /// Display name.
    pub name: String,

    /// Optional long description.
    pub description: Option<String>,

    /// Unit price in `currency`.
    pub price: Decimal,

    /// Currency the price is tagged with.
    pub currency: Currency,

    /// Optional image reference.
    pub image_url: Option<String>,

    /// Category label used for menu grouping and filtering.
    pub category: String,

    /// Whether the product can currently be ordered.
    pub available: bool,

    /// Creation timestamp.
    pub created_at: Timestamp,

    /// Last update timestamp.
    pub updated_at: Timestamp,
}

/// Payload for `POST /products`. Optional fields are omitted from the body
/// when unset rather than sent as nulls.
#[derive(Debug, Clone, Serialize)]
pub struct NewProduct {
    /// Display name.
    pub name: String,

    /// Optional long description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Unit price.
    pub price: Decimal,

    /// Currency; the backend falls back to its default when omitted.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency: Option<Currency>,

    /// Optional image reference.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,

    /// Category label.
    pub category: String,

    /// Availability; the backend defaults to available when omitted.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub available: Option<bool>,
}

/// Partial update payload for `PATCH /products/:id`.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ProductPatch {
    /// Replacement name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Replacement description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Replacement price.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<Decimal>,

    /// Replacement currency.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency: Option<Currency>,

    /// Replacement image reference.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,

    /// Replacement category.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,

    /// Replacement availability flag.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub available: Option<bool>,
}

/// Catalog query filters. Sent as query parameters to `GET /products`, and
/// reusable locally to refine an already-fetched list.
#[derive(Debug, Clone, Default)]
pub struct ProductFilters {
    /// Restrict to one category.
    pub category: Option<String>,

    /// Restrict by availability.
    pub available: Option<bool>,

    /// Case-insensitive substring over name and description.
    pub search: Option<String>,

    /// Restrict to one currency.
    pub currency: Option<Currency>,
}

impl ProductFilters {
    /// Query parameters for the catalog endpoint; unset filters are omitted.
    #[must_use]
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();

        if let Some(category) = &self.category {
            pairs.push(("category", category.clone()));
        }

        if let Some(available) = self.available {
            pairs.push(("available", available.to_string()));
        }

        if let Some(search) = &self.search {
            pairs.push(("search", search.clone()));
        }

        if let Some(currency) = self.currency {
            pairs.push(("currency", currency.code().to_string()));
        }

        pairs
    }

    /// Whether `product` satisfies every set filter.
    #[must_use]
    pub fn matches(&self, product: &Product) -> bool {
        if let Some(category) = &self.category
            && product.category != *category
        {
            return false;
        }

        if let Some(available) = self.available
            && product.available != available
        {
            return false;
        }

        if let Some(currency) = self.currency
            && product.currency != currency
        {
            return false;
        }

        if let Some(search) = &self.search {
            let needle = search.to_lowercase();
            let in_name = product.name.to_lowercase().contains(&needle);
            let in_description = product
                .description
                .as_ref()
                .is_some_and(|description| description.to_lowercase().contains(&needle));

            if !in_name && !in_description {
                return false;
            }
        }

        true
    }

    /// Filters a fetched list in place, preserving order.
    pub fn apply(&self, products: &mut Vec<Product>) {
        products.retain(|product| self.matches(product));
    }
}
