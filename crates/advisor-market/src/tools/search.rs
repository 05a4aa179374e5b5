//! `Stock Ticker Search`

use crate::api::search::{DuckDuckGoSearch, format_results};
use advisor_tools::ToolOutcome;
use tracing::warn;

pub const NAME: &str = "Stock Ticker Search";
pub const DESCRIPTION: &str = "Use only when you need to get stock ticker from internet, you can also get recent stock related news.";

pub async fn ticker_search(search: &DuckDuckGoSearch, query: &str) -> ToolOutcome {
    match search.search(query).await {
        Ok(results) => ToolOutcome::from_text(format_results(&results)),
        Err(e) => {
            warn!(query = %query, error = %e, "Web search failed");
            ToolOutcome::Failed(e.to_string())
        }
    }
}
