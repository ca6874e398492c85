//! Line-oriented command shell over the product catalog.
//!
//! Parsing turns a text line into a typed [`Command`]; the [`Shell`] owns the
//! catalog, executes commands against it and renders the replies.

pub mod command;
pub mod config;
pub mod shell;

pub use command::{Command, CommandError};
pub use config::{ConfigError, ShellConfig};
pub use shell::{Reply, Shell, ShellError};
