//! Market data tools for the stock advisor
//!
//! This crate provides the four tools the reasoning loop can call:
//!
//! - `Stock Ticker Search`: DuckDuckGo HTML search for tickers and context
//! - `Get Stock Historical Price`: one year of daily closes and volumes
//! - `Get Recent News`: headlines scraped from a news search page
//! - `Get Financial Statements`: the latest annual balance sheet
//!
//! Every tool answers with an [`advisor_tools::ToolOutcome`]; data source
//! failures never escape as errors.
//!
//! # Example
//!
//! ```rust,ignore
//! use advisor_market::{MarketConfig, market_registry};
//!
//! let registry = market_registry(&MarketConfig::default())?;
//! let prices = registry.get("Get Stock Historical Price").unwrap();
//! println!("{}", prices.invoke("TSLA").await.to_observation("TSLA"));
//! ```

pub mod api;
pub mod config;
pub mod error;
pub mod table;
pub mod tools;

pub use config::{DEFAULT_USER_AGENT, MarketConfig, MarketConfigBuilder};
pub use error::{MarketError, Result};
pub use table::TextTable;
pub use tools::{MarketTool, market_registry};
