//! Command execution against an owned catalog, and the interactive loop.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use thiserror::Error;

use stockledger_catalog::{Catalog, ExportError, OrderReportRow};
use stockledger_core::DomainError;

use crate::command::{Command, CommandError};
use crate::config::DEFAULT_PROMPT;

/// What a successfully executed command produced.
#[derive(Debug, Clone, PartialEq)]
pub enum Reply {
    /// Nothing to print (mutations).
    Done,
    /// A single line of output.
    Text(String),
    /// Orders report rows.
    Report(Vec<OrderReportRow>),
    /// Rows that were written to `path`.
    Exported {
        path: PathBuf,
        rows: Vec<OrderReportRow>,
    },
    /// Stop the loop.
    Exit,
}

/// Anything a single line can fail with. None of these stop the loop.
#[derive(Debug, Error)]
pub enum ShellError {
    #[error(transparent)]
    Command(#[from] CommandError),

    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Export(#[from] ExportError),
}

/// Interactive shell owning its catalog.
#[derive(Debug)]
pub struct Shell {
    catalog: Catalog,
    prompt: String,
}

impl Default for Shell {
    fn default() -> Self {
        Self::new()
    }
}

impl Shell {
    pub fn new() -> Self {
        Self::with_catalog(Catalog::new())
    }

    pub fn with_catalog(catalog: Catalog) -> Self {
        Self {
            catalog,
            prompt: DEFAULT_PROMPT.to_string(),
        }
    }

    pub fn with_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = prompt.into();
        self
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Parse and execute one line. Blank lines reply [`Reply::Done`].
    pub fn handle_line(&mut self, line: &str) -> Result<Reply, ShellError> {
        match Command::parse(line)? {
            Some(command) => self.execute(command),
            None => Ok(Reply::Done),
        }
    }

    pub fn execute(&mut self, command: Command) -> Result<Reply, ShellError> {
        tracing::debug!(command = command.name(), "executing command");

        let reply = match command {
            Command::SaveProduct { id, name, price } => {
                self.catalog.save_product(id, name, price);
                Reply::Done
            }
            Command::PurchaseProduct {
                id,
                quantity,
                price,
            } => {
                self.catalog.purchase_product(&id, quantity, price)?;
                Reply::Done
            }
            Command::OrderProduct { id, quantity } => {
                self.catalog.order_product(&id, quantity)?;
                Reply::Done
            }
            Command::GetQuantityOfProduct { id } => {
                Reply::Text(self.catalog.get_quantity(&id)?.to_string())
            }
            Command::GetAveragePrice { id } => {
                Reply::Text(self.catalog.get_average_price(&id)?.to_string())
            }
            Command::GetProductProfit { id } => {
                Reply::Text(self.catalog.get_product_profit(&id)?.to_string())
            }
            Command::GetFewestProduct => {
                Reply::Text(self.catalog.get_fewest_product()?.name().to_string())
            }
            Command::GetMostPopularProduct => {
                Reply::Text(self.catalog.get_most_popular_product()?.name().to_string())
            }
            Command::GetOrdersReport => Reply::Report(self.catalog.get_orders_report()),
            Command::ExportOrdersReport { path } => {
                let rows = self.catalog.export_orders_report(&path)?;
                Reply::Exported { path, rows }
            }
            Command::Exit => Reply::Exit,
        };

        Ok(reply)
    }

    /// Read commands from `input` until `exit` or end of input, writing
    /// replies and error messages to `output`.
    ///
    /// Only I/O failures on `input`/`output` end the loop with an error.
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, mut output: W) -> io::Result<()> {
        tracing::info!("shell started");
        let mut lines = input.lines();

        loop {
            write!(output, "{}", self.prompt)?;
            output.flush()?;

            let Some(line) = lines.next() else {
                break;
            };
            let line = line?;

            match self.handle_line(&line) {
                Ok(Reply::Exit) => break,
                Ok(reply) => render(&mut output, &reply)?,
                Err(err) => {
                    tracing::warn!(error = %err, line = %line.trim(), "command failed");
                    writeln!(output, "{err}")?;
                }
            }
        }

        tracing::info!(products = self.catalog.len(), "shell stopped");
        Ok(())
    }
}

fn render<W: Write>(output: &mut W, reply: &Reply) -> io::Result<()> {
    match reply {
        Reply::Done | Reply::Exit => Ok(()),
        Reply::Text(text) => writeln!(output, "{text}"),
        Reply::Report(rows) => render_rows(output, rows),
        Reply::Exported { path, rows } => {
            render_rows(output, rows)?;
            writeln!(
                output,
                "Exported {} order(s) to {}",
                rows.len(),
                path.display()
            )
        }
    }
}

// One JSON object per row.
fn render_rows<W: Write>(output: &mut W, rows: &[OrderReportRow]) -> io::Result<()> {
    for row in rows {
        let json = serde_json::to_string(row).map_err(io::Error::other)?;
        writeln!(output, "{json}")?;
    }
    Ok(())
}
