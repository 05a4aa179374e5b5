//! `Get Recent News`

use crate::api::news::{NewsClient, format_news};
use advisor_tools::ToolOutcome;
use tracing::warn;

pub const NAME: &str = "Get Recent News";
pub const DESCRIPTION: &str = "Use this to fetch recent news about stocks.";

/// Numbered recent headlines for a company
pub async fn recent_news(client: &NewsClient, company: &str) -> ToolOutcome {
    match client.recent_headlines(company).await {
        Ok(headlines) if headlines.is_empty() => ToolOutcome::Empty,
        Ok(headlines) => ToolOutcome::Data(format_news(&headlines)),
        Err(e) => {
            warn!(company = %company, error = %e, "News lookup failed");
            ToolOutcome::Failed(e.to_string())
        }
    }
}
