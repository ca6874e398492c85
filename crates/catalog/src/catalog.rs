use std::collections::HashMap;
use std::path::Path;

use stockledger_core::{Amount, DomainError, DomainResult, ProductId};
use stockledger_products::Product;

use crate::report::{self, ExportError, OrderReportRow};

/// Whether `save_product` registered a new product or updated an existing one.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum SaveOutcome {
    Created,
    Updated,
}

/// In-memory product catalog.
///
/// Products are kept in insertion order; ties in aggregate queries go to the
/// product saved first, and the orders report walks products in that order.
#[derive(Debug, Default)]
pub struct Catalog {
    products: Vec<Product>,
    index: HashMap<ProductId, usize>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    pub fn get(&self, id: &ProductId) -> Option<&Product> {
        self.index.get(id).map(|&i| &self.products[i])
    }

    /// Products in insertion order.
    pub fn products(&self) -> impl Iterator<Item = &Product> {
        self.products.iter()
    }

    fn require(&self, id: &ProductId) -> DomainResult<&Product> {
        self.get(id).ok_or_else(|| {
            tracing::warn!(product_id = %id, "unknown product");
            DomainError::not_found(id)
        })
    }

    fn require_mut(&mut self, id: &ProductId) -> DomainResult<&mut Product> {
        match self.index.get(id) {
            Some(&i) => Ok(&mut self.products[i]),
            None => {
                tracing::warn!(product_id = %id, "unknown product");
                Err(DomainError::not_found(id))
            }
        }
    }

    /// Register a product, or update name and price of an existing one.
    ///
    /// Updating never touches stock or history.
    pub fn save_product(
        &mut self,
        id: ProductId,
        name: impl Into<String>,
        price: f64,
    ) -> SaveOutcome {
        let name = name.into();
        if let Some(product) = self.index.get(&id).map(|&i| &mut self.products[i]) {
            product.rename(name);
            product.reprice(price);
            tracing::debug!(product_id = %id, price, "product updated");
            return SaveOutcome::Updated;
        }

        tracing::debug!(product_id = %id, price, "product created");
        self.index.insert(id.clone(), self.products.len());
        self.products.push(Product::new(id, name, price));
        SaveOutcome::Created
    }

    /// Record inbound stock at the given unit price.
    pub fn purchase_product(
        &mut self,
        id: &ProductId,
        quantity: i64,
        unit_price: f64,
    ) -> DomainResult<()> {
        let product = self.require_mut(id)?;
        product.record_purchase(quantity, unit_price)?;
        tracing::debug!(
            product_id = %id,
            quantity,
            unit_price,
            stock = product.quantity(),
            "purchase recorded"
        );
        Ok(())
    }

    /// Record a sale at the product's current price.
    ///
    /// Rejected without side effects when it asks for more than is in stock.
    pub fn order_product(&mut self, id: &ProductId, quantity: i64) -> DomainResult<()> {
        let product = self.require_mut(id)?;
        let available = product.quantity();
        if quantity > available {
            tracing::warn!(product_id = %id, requested = quantity, available, "order rejected");
            return Err(DomainError::insufficient_stock(id, quantity, available));
        }

        let price = product.price();
        product.record_order(quantity, price)?;
        tracing::debug!(
            product_id = %id,
            quantity,
            unit_price = price,
            stock = product.quantity(),
            "order recorded"
        );
        Ok(())
    }

    pub fn get_quantity(&self, id: &ProductId) -> DomainResult<i64> {
        Ok(self.require(id)?.quantity())
    }

    /// Average purchase price; displays with two decimals.
    pub fn get_average_price(&self, id: &ProductId) -> DomainResult<Amount> {
        Ok(self.require(id)?.average_purchase_price())
    }

    /// Profit over all orders; displays with two decimals.
    pub fn get_product_profit(&self, id: &ProductId) -> DomainResult<Amount> {
        Ok(self.require(id)?.profit())
    }

    /// The product with the least stock.
    pub fn get_fewest_product(&self) -> DomainResult<&Product> {
        first_by(&self.products, |candidate, best| {
            candidate.quantity() < best.quantity()
        })
    }

    /// The product with the most units ordered.
    pub fn get_most_popular_product(&self) -> DomainResult<&Product> {
        first_by(&self.products, |candidate, best| {
            candidate.total_ordered_quantity() > best.total_ordered_quantity()
        })
    }

    /// One row per order event, products in catalog order, orders in the
    /// order they were placed.
    pub fn get_orders_report(&self) -> Vec<OrderReportRow> {
        self.products
            .iter()
            .flat_map(|product| {
                let average_cost = product.average_purchase_price().value();
                product
                    .order_history()
                    .iter()
                    .map(move |order| OrderReportRow::new(product, average_cost, order))
            })
            .collect()
    }

    /// Write the orders report to `path` as CSV and return the rows written.
    pub fn export_orders_report(
        &self,
        path: impl AsRef<Path>,
    ) -> Result<Vec<OrderReportRow>, ExportError> {
        let path = path.as_ref();
        let rows = self.get_orders_report();
        report::write_csv_file(path, &rows)?;
        tracing::info!(path = %path.display(), rows = rows.len(), "orders report exported");
        Ok(rows)
    }
}

// Keeps the earliest product unless a later one strictly beats it, so ties
// resolve to insertion order. `Iterator::min_by_key` would keep the last.
fn first_by<'a>(
    products: &'a [Product],
    beats: impl Fn(&Product, &Product) -> bool,
) -> DomainResult<&'a Product> {
    products
        .iter()
        .reduce(|best, candidate| if beats(candidate, best) { candidate } else { best })
        .ok_or(DomainError::EmptyCatalog)
}
