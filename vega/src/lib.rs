//! An IRC bot that answers title-search and stock-quote commands.

pub mod command;
pub mod config;
pub mod consts;
mod error;
pub mod http;
mod plugin;
pub mod tracing;
mod vega;

pub use config::Config;
pub use error::Error;
pub use plugin::{Plugin, Registry};
pub use vega::Vega;
