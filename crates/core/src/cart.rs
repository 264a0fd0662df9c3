//! Cart arithmetic.
//!
//! [`Cart`] is the pure line-list: no persistence, no visibility flags.
//! `canteen-app` wraps it with write-through storage and view state.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::{currency::Currency, products::Product};

/// One selected product with its quantity. Quantity is always ≥ 1; a line
/// that would drop to zero is removed instead.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartLine {
    /// Snapshot of the product at the time it was added.
    pub product: Product,

    /// Selected quantity.
    pub quantity: u32,
}

impl CartLine {
    /// Price × quantity for this line.
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.product.price * Decimal::from(self.quantity)
    }
}

/// Ordered collection of cart lines with at most one line per product.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Cart {
    lines: Vec<CartLine>,
}

/// Errors produced by cart mutations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CartError {
    /// The product's currency differs from the cart's governing currency.
    #[error("cart is priced in {cart}, cannot add a product priced in {product}")]
    CurrencyMismatch {
        /// Currency of the existing lines.
        cart: Currency,
        /// Currency of the rejected product.
        product: Currency,
    },
}

impl Cart {
    /// Creates an empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self { lines: Vec::new() }
    }

    /// Rebuilds a cart from a persisted snapshot, dropping any line whose
    /// quantity has been corrupted to zero.
    #[must_use]
    pub fn from_lines(lines: Vec<CartLine>) -> Self {
        let lines = lines
            .into_iter()
            .filter(|line| line.quantity >= 1)
            .collect();

        Self { lines }
    }

    /// Adds `quantity` of `product`, merging into an existing line for the
    /// same product identity. A zero quantity is a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::CurrencyMismatch`] when the product's currency
    /// differs from the cart's governing currency; the cart is unchanged.
    pub fn add(&mut self, product: Product, quantity: u32) -> Result<(), CartError> {
        if quantity == 0 {
            return Ok(());
        }

        if !self.lines.is_empty() && product.currency != self.currency() {
            return Err(CartError::CurrencyMismatch {
                cart: self.currency(),
                product: product.currency,
            });
        }

        if let Some(line) = self
            .lines
            .iter_mut()
            .find(|line| line.product.id == product.id)
        {
            line.quantity = line.quantity.saturating_add(quantity);
        } else {
            self.lines.push(CartLine { product, quantity });
        }

        Ok(())
    }

    /// Removes the line matching `product_id`; no-op when absent.
    pub fn remove(&mut self, product_id: Uuid) {
        self.lines.retain(|line| line.product.id != product_id);
    }

    /// Replaces the quantity of the matching line. A quantity of zero or
    /// below removes the line; an unknown product is a no-op.
    pub fn set_quantity(&mut self, product_id: Uuid, quantity: i64) {
        if quantity <= 0 {
            self.remove(product_id);
            return;
        }

        let quantity = u32::try_from(quantity).unwrap_or(u32::MAX);

        if let Some(line) = self
            .lines
            .iter_mut()
            .find(|line| line.product.id == product_id)
        {
            line.quantity = quantity;
        }
    }

    /// Empties the cart.
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Sum of quantities across all lines.
    #[must_use]
    pub fn item_count(&self) -> u64 {
        self.lines
            .iter()
            .map(|line| u64::from(line.quantity))
            .sum()
    }

    /// Sum of price × quantity across all lines.
    #[must_use]
    pub fn total(&self) -> Decimal {
        self.lines.iter().map(CartLine::line_total).sum()
    }

    /// Currency of the first line, or the default when the cart is empty.
    #[must_use]
    pub fn currency(&self) -> Currency {
        self.lines
            .first()
            .map_or(Currency::DEFAULT, |line| line.product.currency)
    }

    /// Whether the cart has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// The current lines, in insertion order.
    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }
}

#[cfg(test)]
mod tests {
    use jiff::Timestamp;
    use rust_decimal::dec;
    use testresult::TestResult;

    use super::*;

    fn product(id: u128, price: Decimal, currency: Currency) -> Product {
        Product {
            id: Uuid::from_u128(id),
            name: format!("Product {id}"),
            description: None,
            price,
            currency,
            image_url: None,
            category: "mains".to_string(),
            available: true,
            created_at: Timestamp::UNIX_EPOCH,
            updated_at: Timestamp::UNIX_EPOCH,
        }
    }

    #[test]
    fn adding_same_product_twice_merges_quantities() -> TestResult {
        let mut cart = Cart::new();
        let koshari = product(1, dec!(50.00), Currency::Egp);

        cart.add(koshari.clone(), 2)?;
        cart.add(koshari, 3)?;

        assert_eq!(cart.lines().len(), 1, "expected a single merged line");
        assert_eq!(cart.item_count(), 5);

        Ok(())
    }

    #[test]
    fn item_count_matches_sum_of_quantities() -> TestResult {
        let mut cart = Cart::new();

        cart.add(product(1, dec!(10.00), Currency::Egp), 2)?;
        cart.add(product(2, dec!(5.00), Currency::Egp), 1)?;
        cart.set_quantity(Uuid::from_u128(2), 4);
        cart.remove(Uuid::from_u128(1));

        let sum: u64 = cart.lines().iter().map(|line| u64::from(line.quantity)).sum();

        assert_eq!(cart.item_count(), sum);
        assert!(
            cart.lines().iter().all(|line| line.quantity >= 1),
            "no line may persist with quantity below one"
        );

        Ok(())
    }

    #[test]
    fn set_quantity_zero_removes_the_line() -> TestResult {
        let mut cart = Cart::new();

        cart.add(product(1, dec!(10.00), Currency::Egp), 2)?;
        cart.set_quantity(Uuid::from_u128(1), 0);

        assert!(cart.is_empty(), "zero quantity must remove the line");

        Ok(())
    }

    #[test]
    fn set_quantity_negative_removes_the_line() -> TestResult {
        let mut cart = Cart::new();

        cart.add(product(1, dec!(10.00), Currency::Egp), 2)?;
        cart.set_quantity(Uuid::from_u128(1), -5);

        assert!(cart.is_empty(), "negative quantity must remove the line");

        Ok(())
    }

    #[test]
    fn set_quantity_replaces_rather_than_increments() -> TestResult {
        let mut cart = Cart::new();

        cart.add(product(1, dec!(10.00), Currency::Egp), 2)?;
        cart.set_quantity(Uuid::from_u128(1), 7);

        assert_eq!(cart.item_count(), 7);

        Ok(())
    }

    #[test]
    fn total_is_sum_of_line_totals() -> TestResult {
        let mut cart = Cart::new();

        cart.add(product(1, dec!(50.00), Currency::Egp), 2)?;
        cart.add(product(2, dec!(12.50), Currency::Egp), 3)?;

        assert_eq!(cart.total(), dec!(137.50));

        Ok(())
    }

    #[test]
    fn noop_set_quantity_leaves_total_unchanged() -> TestResult {
        let mut cart = Cart::new();

        cart.add(product(1, dec!(50.00), Currency::Egp), 2)?;

        let before = cart.total();
        cart.set_quantity(Uuid::from_u128(1), 2);

        assert_eq!(cart.total(), before);

        Ok(())
    }

    #[test]
    fn empty_cart_reports_default_currency() {
        let cart = Cart::new();

        assert_eq!(cart.currency(), Currency::DEFAULT);
        assert_eq!(cart.total(), Decimal::ZERO);
        assert_eq!(cart.item_count(), 0);
    }

    #[test]
    fn mixed_currency_add_is_rejected_and_leaves_cart_unchanged() -> TestResult {
        let mut cart = Cart::new();

        cart.add(product(1, dec!(50.00), Currency::Egp), 1)?;

        let before = cart.clone();
        let result = cart.add(product(2, dec!(9.99), Currency::Usd), 1);

        assert_eq!(
            result,
            Err(CartError::CurrencyMismatch {
                cart: Currency::Egp,
                product: Currency::Usd,
            })
        );
        assert_eq!(cart, before, "rejected add must not mutate the cart");

        Ok(())
    }

    #[test]
    fn adding_zero_quantity_is_a_noop() -> TestResult {
        let mut cart = Cart::new();

        cart.add(product(1, dec!(10.00), Currency::Egp), 0)?;

        assert!(cart.is_empty(), "zero-quantity add must not create a line");

        Ok(())
    }

    #[test]
    fn removing_unknown_product_is_a_noop() -> TestResult {
        let mut cart = Cart::new();

        cart.add(product(1, dec!(10.00), Currency::Egp), 1)?;
        cart.remove(Uuid::from_u128(99));

        assert_eq!(cart.item_count(), 1);

        Ok(())
    }

    #[test]
    fn from_lines_drops_zero_quantity_lines() {
        let good = CartLine {
            product: product(1, dec!(10.00), Currency::Egp),
            quantity: 2,
        };
        let corrupt = CartLine {
            product: product(2, dec!(5.00), Currency::Egp),
            quantity: 0,
        };

        let cart = Cart::from_lines(vec![good.clone(), corrupt]);

        assert_eq!(cart.lines(), &[good]);
    }
}
