//! Orders report rows and their CSV form.

use std::fs::File;
use std::io;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use stockledger_core::Entity;
use stockledger_products::{Product, StockMovement};

/// CSV header, in column order.
pub const REPORT_HEADER: [&str; 6] = [
    "ProductID",
    "ProductName",
    "COGS",
    "Quantity",
    "Price",
    "SellPrice",
];

/// One order event as it appears in the orders report.
///
/// - `cogs`: average purchase price × quantity
/// - `price`: unit price recorded when the order was placed
/// - `sell_price`: price × quantity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderReportRow {
    #[serde(rename = "ProductID")]
    pub product_id: String,
    #[serde(rename = "ProductName")]
    pub product_name: String,
    #[serde(rename = "COGS")]
    pub cogs: f64,
    #[serde(rename = "Quantity")]
    pub quantity: i64,
    #[serde(rename = "Price")]
    pub price: f64,
    #[serde(rename = "SellPrice")]
    pub sell_price: f64,
}

impl OrderReportRow {
    pub(crate) fn new(product: &Product, average_cost: f64, order: &StockMovement) -> Self {
        Self {
            product_id: product.id().to_string(),
            product_name: product.name().to_string(),
            cogs: average_cost * order.quantity as f64,
            quantity: order.quantity,
            price: order.unit_price,
            sell_price: order.line_total(),
        }
    }
}

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("failed to write orders report: {0}")]
    Io(#[from] io::Error),

    #[error("failed to encode orders report: {0}")]
    Csv(#[from] csv::Error),
}

/// Write `rows` as CSV. The header is written even when there are no rows.
pub fn write_csv<W: io::Write>(writer: W, rows: &[OrderReportRow]) -> Result<(), ExportError> {
    let mut csv = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);
    csv.write_record(REPORT_HEADER)?;
    for row in rows {
        csv.serialize(row)?;
    }
    csv.flush()?;
    Ok(())
}

pub fn write_csv_file(path: &Path, rows: &[OrderReportRow]) -> Result<(), ExportError> {
    let file = File::create(path)?;
    write_csv(io::BufWriter::new(file), rows)
}

/// Read rows back from CSV produced by [`write_csv`].
pub fn read_csv<R: io::Read>(reader: R) -> Result<Vec<OrderReportRow>, ExportError> {
    let mut csv = csv::Reader::from_reader(reader);
    let rows = csv.deserialize().collect::<Result<Vec<OrderReportRow>, _>>()?;
    Ok(rows)
}

pub fn read_csv_file(path: &Path) -> Result<Vec<OrderReportRow>, ExportError> {
    let file = File::open(path)?;
    read_csv(io::BufReader::new(file))
}
