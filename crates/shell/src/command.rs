//! Typed shell commands and their text syntax.
//!
//! A line is `<name> <arg>...` separated by whitespace. Arguments are
//! positional; extra trailing arguments are ignored.

use core::str::FromStr;
use std::path::PathBuf;
use std::str::SplitWhitespace;

use thiserror::Error;

use stockledger_core::ProductId;

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    SaveProduct {
        id: ProductId,
        name: String,
        price: f64,
    },
    PurchaseProduct {
        id: ProductId,
        quantity: i64,
        price: f64,
    },
    OrderProduct {
        id: ProductId,
        quantity: i64,
    },
    GetQuantityOfProduct {
        id: ProductId,
    },
    GetAveragePrice {
        id: ProductId,
    },
    GetProductProfit {
        id: ProductId,
    },
    GetFewestProduct,
    GetMostPopularProduct,
    GetOrdersReport,
    ExportOrdersReport {
        path: PathBuf,
    },
    Exit,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CommandError {
    #[error("Invalid command: {0}")]
    Unknown(String),

    #[error("{command}: missing argument <{argument}>")]
    MissingArgument {
        command: &'static str,
        argument: &'static str,
    },

    #[error("{command}: invalid value '{value}' for <{argument}>")]
    InvalidArgument {
        command: &'static str,
        argument: &'static str,
        value: String,
    },
}

impl Command {
    /// Parse one input line. Blank lines yield `Ok(None)`.
    pub fn parse(line: &str) -> Result<Option<Command>, CommandError> {
        let mut tokens = line.split_whitespace();
        let Some(name) = tokens.next() else {
            return Ok(None);
        };

        let command = match name {
            "save_product" => {
                let mut args = Args::new("save_product", tokens);
                Command::SaveProduct {
                    id: args.parse("id")?,
                    name: args.parse("name")?,
                    price: args.parse("price")?,
                }
            }
            "purchase_product" => {
                let mut args = Args::new("purchase_product", tokens);
                Command::PurchaseProduct {
                    id: args.parse("id")?,
                    quantity: args.parse("quantity")?,
                    price: args.parse("price")?,
                }
            }
            "order_product" => {
                let mut args = Args::new("order_product", tokens);
                Command::OrderProduct {
                    id: args.parse("id")?,
                    quantity: args.parse("quantity")?,
                }
            }
            "get_quantity_of_product" => Command::GetQuantityOfProduct {
                id: Args::new("get_quantity_of_product", tokens).parse("id")?,
            },
            "get_average_price" => Command::GetAveragePrice {
                id: Args::new("get_average_price", tokens).parse("id")?,
            },
            "get_product_profit" => Command::GetProductProfit {
                id: Args::new("get_product_profit", tokens).parse("id")?,
            },
            "get_fewest_product" => Command::GetFewestProduct,
            "get_most_popular_product" => Command::GetMostPopularProduct,
            "get_orders_report" => Command::GetOrdersReport,
            "export_orders_report" => Command::ExportOrdersReport {
                path: Args::new("export_orders_report", tokens).parse("path")?,
            },
            "exit" => Command::Exit,
            other => return Err(CommandError::Unknown(other.to_string())),
        };

        Ok(Some(command))
    }

    /// Command name as typed at the prompt.
    pub fn name(&self) -> &'static str {
        match self {
            Command::SaveProduct { .. } => "save_product",
            Command::PurchaseProduct { .. } => "purchase_product",
            Command::OrderProduct { .. } => "order_product",
            Command::GetQuantityOfProduct { .. } => "get_quantity_of_product",
            Command::GetAveragePrice { .. } => "get_average_price",
            Command::GetProductProfit { .. } => "get_product_profit",
            Command::GetFewestProduct => "get_fewest_product",
            Command::GetMostPopularProduct => "get_most_popular_product",
            Command::GetOrdersReport => "get_orders_report",
            Command::ExportOrdersReport { .. } => "export_orders_report",
            Command::Exit => "exit",
        }
    }
}

struct Args<'a> {
    command: &'static str,
    tokens: SplitWhitespace<'a>,
}

impl<'a> Args<'a> {
    fn new(command: &'static str, tokens: SplitWhitespace<'a>) -> Self {
        Self { command, tokens }
    }

    fn parse<T: FromStr>(&mut self, argument: &'static str) -> Result<T, CommandError> {
        let raw = self.tokens.next().ok_or(CommandError::MissingArgument {
            command: self.command,
            argument,
        })?;
        raw.parse().map_err(|_| CommandError::InvalidArgument {
            command: self.command,
            argument,
            value: raw.to_string(),
        })
    }
}
