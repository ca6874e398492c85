use serde::{Deserialize, Serialize};

use stockledger_core::{Amount, DomainError, DomainResult, Entity, ProductId};

/// One purchase or order event: how many units moved and at what unit price.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockMovement {
    pub quantity: i64,
    pub unit_price: f64,
}

impl StockMovement {
    pub fn new(quantity: i64, unit_price: f64) -> Self {
        Self {
            quantity,
            unit_price,
        }
    }

    /// `quantity × unit_price`.
    pub fn line_total(&self) -> f64 {
        self.quantity as f64 * self.unit_price
    }
}

/// Entity: Product.
///
/// Stock is kept incrementally: every recorded movement adjusts `quantity`
/// by its own amount, so `quantity` always equals purchased minus ordered.
/// The histories are append-only and keep the price at the time of the event.
/// A movement that would overflow stock or either running total is rejected
/// and leaves the product untouched.
#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    id: ProductId,
    name: String,
    price: f64,
    quantity: i64,
    purchased: i64,
    ordered: i64,
    purchase_history: Vec<StockMovement>,
    order_history: Vec<StockMovement>,
}

impl Product {
    /// Create a product with no stock and no history.
    pub fn new(id: ProductId, name: impl Into<String>, price: f64) -> Self {
        Self {
            id,
            name: name.into(),
            price,
            quantity: 0,
            purchased: 0,
            ordered: 0,
            purchase_history: Vec::new(),
            order_history: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Current list price.
    pub fn price(&self) -> f64 {
        self.price
    }

    /// Units currently in stock.
    pub fn quantity(&self) -> i64 {
        self.quantity
    }

    pub fn purchase_history(&self) -> &[StockMovement] {
        &self.purchase_history
    }

    pub fn order_history(&self) -> &[StockMovement] {
        &self.order_history
    }

    pub fn rename(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// Change the list price. Already recorded movements keep their prices.
    pub fn reprice(&mut self, price: f64) {
        self.price = price;
    }

    /// Record inbound stock.
    ///
    /// The quantity is taken as given, sign included.
    pub fn record_purchase(&mut self, quantity: i64, unit_price: f64) -> DomainResult<()> {
        let (Some(stock), Some(purchased)) = (
            self.quantity.checked_add(quantity),
            self.purchased.checked_add(quantity),
        ) else {
            return Err(DomainError::quantity_overflow(&self.id));
        };

        self.purchase_history
            .push(StockMovement::new(quantity, unit_price));
        self.quantity = stock;
        self.purchased = purchased;
        Ok(())
    }

    /// Record a sale.
    ///
    /// Does not check stock; callers decide whether the order is allowed.
    pub fn record_order(&mut self, quantity: i64, unit_price: f64) -> DomainResult<()> {
        let (Some(stock), Some(ordered)) = (
            self.quantity.checked_sub(quantity),
            self.ordered.checked_add(quantity),
        ) else {
            return Err(DomainError::quantity_overflow(&self.id));
        };

        self.order_history.push(StockMovement::new(quantity, unit_price));
        self.quantity = stock;
        self.ordered = ordered;
        Ok(())
    }

    /// Quantity-weighted average over the purchase history, zero when empty.
    pub fn average_purchase_price(&self) -> Amount {
        weighted_average(&self.purchase_history, self.purchased)
    }

    /// Quantity-weighted average over the order history, zero when empty.
    pub fn average_order_price(&self) -> Amount {
        weighted_average(&self.order_history, self.ordered)
    }

    /// Total units ever ordered.
    pub fn total_ordered_quantity(&self) -> i64 {
        self.ordered
    }

    /// `(average order price − average purchase price) × quantity`, summed
    /// over every order.
    ///
    /// Both averages are taken over the full histories, so every order line
    /// uses the same per-unit margin.
    pub fn profit(&self) -> Amount {
        let margin = self.average_order_price().value() - self.average_purchase_price().value();
        let profit = self
            .order_history
            .iter()
            .map(|m| margin * m.quantity as f64)
            .sum();
        Amount::new(profit)
    }
}

impl Entity for Product {
    type Id = ProductId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

// A history whose quantities cancel out has no meaningful average; report zero
// rather than dividing by zero.
fn weighted_average(history: &[StockMovement], total_quantity: i64) -> Amount {
    if total_quantity == 0 {
        return Amount::ZERO;
    }
    let total_value: f64 = history.iter().map(StockMovement::line_total).sum();
    Amount::new(total_value / total_quantity as f64)
}
