//! Order endpoints.

use async_trait::async_trait;
use mockall::automock;
use serde::Serialize;
use uuid::Uuid;

use canteen::{
    checkout::CreateOrderRequest,
    orders::{Order, OrderStatus, OrderWithItems},
};

use crate::api::{ApiClient, ApiError};

/// The order-submission seam checkout depends on, mockable in tests.
#[automock]
#[async_trait]
pub trait OrdersBackend: Send + Sync {
    /// Submits an order-creation request.
    async fn create_order(&self, request: CreateOrderRequest) -> Result<Order, ApiError>;
}

/// Typed wrapper over the `/orders` endpoints.
#[derive(Clone)]
pub struct OrdersApi {
    client: ApiClient,
}

#[derive(Serialize)]
struct StatusBody {
    status: OrderStatus,
}

impl OrdersApi {
    /// Creates the wrapper over a shared client.
    #[must_use]
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// Lists orders, optionally restricted to one status.
    ///
    /// # Errors
    ///
    /// Returns backend or transport errors.
    pub async fn list(&self, status: Option<OrderStatus>) -> Result<Vec<Order>, ApiError> {
        let query = match status {
            Some(status) => vec![("status", status.as_str().to_string())],
            None => Vec::new(),
        };

        self.client.get_list("/orders", &query).await
    }

    /// Fetches one order with its lines.
    ///
    /// # Errors
    ///
    /// Returns backend or transport errors.
    pub async fn get(&self, id: Uuid) -> Result<OrderWithItems, ApiError> {
        self.client.get(&format!("/orders/{id}"), &[]).await
    }

    /// Requests a status transition. The backend remains the authority on
    /// legality; this call just forwards the request.
    ///
    /// # Errors
    ///
    /// Returns backend or transport errors.
    pub async fn update_status(&self, id: Uuid, status: OrderStatus) -> Result<Order, ApiError> {
        self.client
            .patch(&format!("/orders/{id}/status"), &StatusBody { status })
            .await
    }

    /// Deletes an order.
    ///
    /// # Errors
    ///
    /// Returns backend or transport errors.
    pub async fn delete(&self, id: Uuid) -> Result<(), ApiError> {
        self.client.delete(&format!("/orders/{id}")).await
    }
}

#[async_trait]
impl OrdersBackend for OrdersApi {
    async fn create_order(&self, request: CreateOrderRequest) -> Result<Order, ApiError> {
        self.client.post("/orders", &request).await
    }
}
