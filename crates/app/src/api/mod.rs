//! Typed access to the backend REST surface.

mod auth;
mod client;
mod envelope;
mod error;
mod orders;
mod products;

pub use auth::{AuthApi, AuthBackend, LoginResponse, MockAuthBackend, TokenPair};
pub use client::{ApiClient, ApiConfig};
pub use envelope::Envelope;
pub use error::ApiError;
pub use orders::{MockOrdersBackend, OrdersApi, OrdersBackend};
pub use products::ProductsApi;
