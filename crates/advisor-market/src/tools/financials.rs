//! `Get Financial Statements`

use crate::api::yahoo::{YahooFinanceClient, strip_exchange_suffix};
use advisor_tools::ToolOutcome;
use tracing::warn;

pub const NAME: &str = "Get Financial Statements";
pub const DESCRIPTION: &str = "Use this to get financial statement of the company. With the help of this data company's historic performance can be evaluated.";

/// Number of most recent annual periods shown
pub const PERIODS: usize = 3;

/// The latest annual balance sheet, complete rows only
pub async fn financial_statements(client: &YahooFinanceClient, ticker: &str) -> ToolOutcome {
    let symbol = strip_exchange_suffix(ticker);

    match client.balance_sheet(symbol).await {
        Ok(sheet) => {
            let sheet = sheet.latest_periods(PERIODS).drop_incomplete();
            if sheet.is_empty() {
                ToolOutcome::Empty
            } else {
                ToolOutcome::Data(sheet.to_table().render())
            }
        }
        Err(e) => {
            warn!(symbol = %symbol, error = %e, "Balance sheet lookup failed");
            ToolOutcome::Failed(e.to_string())
        }
    }
}
