//! Clients for the external data sources

pub mod news;
pub mod search;
pub mod yahoo;

pub use news::NewsClient;
pub use search::{DuckDuckGoSearch, SearchResult};
pub use yahoo::{BalanceSheet, PriceBar, YahooFinanceClient, strip_exchange_suffix};
