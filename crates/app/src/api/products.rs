//! Catalog and product-management endpoints.

use serde::Serialize;
use uuid::Uuid;

use canteen::{
    currency::CurrencyInfo,
    products::{NewProduct, Product, ProductFilters, ProductPatch},
};

use crate::api::{ApiClient, ApiError};

/// Typed wrapper over the `/products` endpoints.
#[derive(Clone)]
pub struct ProductsApi {
    client: ApiClient,
}

#[derive(Serialize)]
struct AvailabilityBody {
    available: bool,
}

impl ProductsApi {
    /// Creates the wrapper over a shared client.
    #[must_use]
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// Fetches the catalog; set filters become query parameters.
    ///
    /// # Errors
    ///
    /// Returns backend or transport errors.
    pub async fn list(&self, filters: &ProductFilters) -> Result<Vec<Product>, ApiError> {
        self.client
            .get_list("/products", &filters.query_pairs())
            .await
    }

    /// Fetches a single product.
    ///
    /// # Errors
    ///
    /// Returns backend or transport errors.
    pub async fn get(&self, id: Uuid) -> Result<Product, ApiError> {
        self.client.get(&format!("/products/{id}"), &[]).await
    }

    /// The distinct category labels.
    ///
    /// # Errors
    ///
    /// Returns backend or transport errors.
    pub async fn categories(&self) -> Result<Vec<String>, ApiError> {
        self.client.get_list("/products/categories", &[]).await
    }

    /// The currencies the backend supports.
    ///
    /// # Errors
    ///
    /// Returns backend or transport errors.
    pub async fn currencies(&self) -> Result<Vec<CurrencyInfo>, ApiError> {
        self.client.get_list("/products/currencies", &[]).await
    }

    /// Creates a product.
    ///
    /// # Errors
    ///
    /// Returns backend or transport errors.
    pub async fn create(&self, product: &NewProduct) -> Result<Product, ApiError> {
        self.client.post("/products", product).await
    }

    /// Replaces a product.
    ///
    /// # Errors
    ///
    /// Returns backend or transport errors.
    pub async fn update(&self, id: Uuid, product: &NewProduct) -> Result<Product, ApiError> {
        self.client.put(&format!("/products/{id}"), product).await
    }

    /// Partially updates a product.
    ///
    /// # Errors
    ///
    /// Returns backend or transport errors.
    pub async fn patch(&self, id: Uuid, patch: &ProductPatch) -> Result<Product, ApiError> {
        self.client.patch(&format!("/products/{id}"), patch).await
    }

    /// Deletes a product.
    ///
    /// # Errors
    ///
    /// Returns backend or transport errors.
    pub async fn delete(&self, id: Uuid) -> Result<(), ApiError> {
        self.client.delete(&format!("/products/{id}")).await
    }

    /// Toggles a product's availability.
    ///
    /// # Errors
    ///
    /// Returns backend or transport errors.
    pub async fn set_availability(&self, id: Uuid, available: bool) -> Result<Product, ApiError> {
        self.client
            .patch(
                &format!("/products/{id}/availability"),
                &AvailabilityBody { available },
            )
            .await
    }
}
