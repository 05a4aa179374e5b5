//! `Get Stock Historical Price`

use crate::api::yahoo::{PriceHistory, price_table, strip_exchange_suffix};
use advisor_tools::ToolOutcome;
use tracing::warn;

pub const NAME: &str = "Get Stock Historical Price";
pub const DESCRIPTION: &str = "Use when you are asked to evaluate or analyze a stock. This will output historic share price data. You should input the stock ticker to it.";

/// One year of daily closes and volumes for a ticker
pub async fn historical_price(source: &dyn PriceHistory, ticker: &str) -> ToolOutcome {
    let symbol = strip_exchange_suffix(ticker);

    match source.daily_bars(symbol).await {
        Ok(bars) if bars.is_empty() => ToolOutcome::Empty,
        Ok(bars) => ToolOutcome::Data(price_table(&bars).render()),
        Err(e) => {
            warn!(symbol = %symbol, error = %e, "Price history lookup failed");
            ToolOutcome::Failed(e.to_string())
        }
    }
}
