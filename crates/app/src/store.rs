//! The persisted cart store.
//!
//! Wraps the pure [`Cart`] with view state (the cart drawer and its
//! checkout sub-view) and write-through persistence: every mutation
//! rewrites the full snapshot. Adding items never opens the drawer, so
//! building an order does not interrupt browsing.

use tracing::warn;

use canteen::{
    cart::{Cart, CartError},
    products::Product,
};
use uuid::Uuid;

use crate::storage::CartStorage;

/// Which sub-view the cart drawer is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CartPanel {
    /// The line list.
    #[default]
    Lines,
    /// The checkout form.
    Checkout,
}

/// Cart state for one client session.
pub struct CartStore {
    cart: Cart,
    open: bool,
    panel: CartPanel,
    storage: Box<dyn CartStorage>,
}

impl CartStore {
    /// Restores the cart from storage; a missing or corrupt snapshot
    /// yields an empty cart.
    #[must_use]
    pub fn load(storage: Box<dyn CartStorage>) -> Self {
        let cart = Cart::from_lines(storage.load());

        Self {
            cart,
            open: false,
            panel: CartPanel::default(),
            storage,
        }
    }

    /// Adds `quantity` of `product`, merging lines for the same product.
    /// Does not open the drawer.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::CurrencyMismatch`] for a product priced in a
    /// different currency than the cart; nothing is persisted.
    pub fn add_item(&mut self, product: Product, quantity: u32) -> Result<(), CartError> {
        self.cart.add(product, quantity)?;
        self.persist();

        Ok(())
    }

    /// Removes the line for `product_id`; no-op when absent.
    pub fn remove_item(&mut self, product_id: Uuid) {
        self.cart.remove(product_id);
        self.persist();
    }

    /// Replaces a line's quantity; zero or below removes the line.
    pub fn update_quantity(&mut self, product_id: Uuid, quantity: i64) {
        self.cart.set_quantity(product_id, quantity);
        self.persist();
    }

    /// Empties the cart.
    pub fn clear(&mut self) {
        self.cart.clear();
        self.persist();
    }

    /// Shows the cart drawer.
    pub fn open_cart(&mut self) {
        self.open = true;
    }

    /// Hides the drawer and resets any in-progress checkout sub-view.
    pub fn close_cart(&mut self) {
        self.open = false;
        self.panel = CartPanel::Lines;
    }

    /// Switches the drawer to the checkout form.
    pub fn begin_checkout(&mut self) {
        self.panel = CartPanel::Checkout;
    }

    /// Returns from the checkout form to the line list.
    pub fn cancel_checkout(&mut self) {
        self.panel = CartPanel::Lines;
    }

    /// Whether the drawer is visible.
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.open
    }

    /// The drawer's current sub-view.
    #[must_use]
    pub fn panel(&self) -> CartPanel {
        self.panel
    }

    /// The underlying cart.
    #[must_use]
    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    fn persist(&self) {
        if let Err(error) = self.storage.save(self.cart.lines()) {
            warn!("failed to persist cart snapshot: {error}");
        }
    }
}

#[cfg(test)]
mod tests {
    use jiff::Timestamp;
    use rust_decimal::dec;
    use testresult::TestResult;

    use canteen::{cart::CartLine, currency::Currency};

    use crate::storage::MockCartStorage;

    use super::*;

    fn product(id: u128) -> Product {
        Product {
            id: Uuid::from_u128(id),
            name: format!("Product {id}"),
            description: None,
            price: dec!(25.00),
            currency: Currency::Egp,
            image_url: None,
            category: "mains".to_string(),
            available: true,
            created_at: Timestamp::UNIX_EPOCH,
            updated_at: Timestamp::UNIX_EPOCH,
        }
    }

    fn empty_storage(expected_saves: usize) -> MockCartStorage {
        let mut storage = MockCartStorage::new();

        storage.expect_load().return_const(Vec::new());
        storage
            .expect_save()
            .times(expected_saves)
            .returning(|_| Ok(()));

        storage
    }

    #[test]
    fn every_mutation_rewrites_the_snapshot() -> TestResult {
        let mut store = CartStore::load(Box::new(empty_storage(4)));

        store.add_item(product(1), 2)?;
        store.update_quantity(Uuid::from_u128(1), 5);
        store.remove_item(Uuid::from_u128(1));
        store.clear();

        Ok(())
    }

    #[test]
    fn rejected_add_persists_nothing() -> TestResult {
        let mut store = CartStore::load(Box::new(empty_storage(1)));

        store.add_item(product(1), 1)?;

        let mut usd = product(2);
        usd.currency = Currency::Usd;

        let result = store.add_item(usd, 1);

        assert!(result.is_err(), "mixed-currency add should fail");
        assert_eq!(store.cart().item_count(), 1);

        Ok(())
    }

    #[test]
    fn adding_items_does_not_open_the_drawer() -> TestResult {
        let mut store = CartStore::load(Box::new(empty_storage(1)));

        store.add_item(product(1), 1)?;

        assert!(!store.is_open(), "add must not open the cart view");

        Ok(())
    }

    #[test]
    fn closing_the_drawer_resets_the_checkout_view() {
        let mut store = CartStore::load(Box::new(empty_storage(0)));

        store.open_cart();
        store.begin_checkout();
        assert_eq!(store.panel(), CartPanel::Checkout);

        store.close_cart();

        assert!(!store.is_open());
        assert_eq!(store.panel(), CartPanel::Lines);
    }

    #[test]
    fn cancelling_checkout_returns_to_the_line_list() {
        let mut store = CartStore::load(Box::new(empty_storage(0)));

        store.open_cart();
        store.begin_checkout();
        store.cancel_checkout();

        assert!(store.is_open(), "cancelling checkout keeps the drawer open");
        assert_eq!(store.panel(), CartPanel::Lines);
    }

    #[test]
    fn restores_persisted_lines() {
        let mut storage = MockCartStorage::new();

        storage.expect_load().return_const(vec![CartLine {
            product: product(1),
            quantity: 3,
        }]);

        let store = CartStore::load(Box::new(storage));

        assert_eq!(store.cart().item_count(), 3);
    }

    #[test]
    fn save_failure_keeps_in_memory_state() -> TestResult {
        let mut storage = MockCartStorage::new();

        storage.expect_load().return_const(Vec::new());
        storage.expect_save().returning(|_| {
            Err(crate::storage::StorageError::Io(std::io::Error::other(
                "disk full",
            )))
        });

        let mut store = CartStore::load(Box::new(storage));

        store.add_item(product(1), 2)?;

        assert_eq!(store.cart().item_count(), 2, "memory state survives save failure");

        Ok(())
    }
}
