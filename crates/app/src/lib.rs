//! Client-side services for the Canteen storefront: the REST API client,
//! the persisted cart store, checkout submission, and session handling.

pub mod api;
pub mod checkout;
pub mod session;
pub mod storage;
pub mod store;
