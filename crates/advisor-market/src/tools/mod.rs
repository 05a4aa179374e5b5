//! Market data tools exposed to the reasoning loop
//!
//! The shipped tool set is closed: [`MarketTool`] has one variant per tool,
//! each holding the client it needs, and [`market_registry`] registers them
//! in the order the prompt lists them.

pub mod financials;
pub mod news;
pub mod prices;
pub mod search;

use crate::api::{DuckDuckGoSearch, NewsClient, YahooFinanceClient};
use crate::config::MarketConfig;
use crate::error::Result;
use advisor_tools::{Tool, ToolOutcome, ToolRegistry};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::debug;

/// The closed set of market data tools
#[derive(Debug, Clone)]
pub enum MarketTool {
    TickerSearch(DuckDuckGoSearch),
    HistoricalPrice(YahooFinanceClient),
    RecentNews(NewsClient),
    FinancialStatements(YahooFinanceClient),
}

impl MarketTool {
    /// All tools, in prompt order
    pub fn all(config: &MarketConfig) -> Result<Vec<Self>> {
        let yahoo = YahooFinanceClient::new(config)?;

        Ok(vec![
            Self::TickerSearch(DuckDuckGoSearch::new(config)?),
            Self::HistoricalPrice(yahoo.clone()),
            Self::RecentNews(NewsClient::new(config)?),
            Self::FinancialStatements(yahoo),
        ])
    }
}

#[async_trait]
impl Tool for MarketTool {
    async fn invoke(&self, input: &str) -> ToolOutcome {
        debug!(tool = %self.name(), input = %input, "Invoking market tool");

        match self {
            Self::TickerSearch(client) => search::ticker_search(client, input).await,
            Self::HistoricalPrice(client) => prices::historical_price(client, input).await,
            Self::RecentNews(client) => news::recent_news(client, input).await,
            Self::FinancialStatements(client) => financials::financial_statements(client, input).await,
        }
    }

    fn name(&self) -> &str {
        match self {
            Self::TickerSearch(_) => search::NAME,
            Self::HistoricalPrice(_) => prices::NAME,
            Self::RecentNews(_) => news::NAME,
            Self::FinancialStatements(_) => financials::NAME,
        }
    }

    fn description(&self) -> &str {
        match self {
            Self::TickerSearch(_) => search::DESCRIPTION,
            Self::HistoricalPrice(_) => prices::DESCRIPTION,
            Self::RecentNews(_) => news::DESCRIPTION,
            Self::FinancialStatements(_) => financials::DESCRIPTION,
        }
    }
}

/// Registry holding every market tool
pub fn market_registry(config: &MarketConfig) -> advisor_core::Result<ToolRegistry> {
    config.validate()?;

    Ok(MarketTool::all(config)?
        .into_iter()
        .fold(ToolRegistry::new(), |registry, tool| {
            registry.with_tool(Arc::new(tool))
        }))
}
