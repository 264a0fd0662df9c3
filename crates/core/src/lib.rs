//! Domain types and client-side business rules for the Canteen storefront.
//!
//! Everything in this crate is pure: cart arithmetic, checkout validation,
//! the order status machine, and role capabilities. Network and persistence
//! live in `canteen-app`.

pub mod access;
pub mod cart;
pub mod checkout;
pub mod currency;
pub mod orders;
pub mod products;
pub mod users;
