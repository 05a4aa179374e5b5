//! Yahoo Finance API client
//!
//! Daily prices come from the chart API through `yahoo_finance_api`. The
//! annual balance sheet comes from the fundamentals-timeseries endpoint,
//! which the crate does not cover, so it is fetched directly.

use crate::config::MarketConfig;
use crate::error::{MarketError, Result};
use crate::table::TextTable;
use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use serde::Deserialize;
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::fmt;
use std::sync::Arc;
use time::OffsetDateTime;
use tracing::{debug, instrument};
use yahoo_finance_api as yahoo;

/// Start of the fundamentals window (1985), as Yahoo's own pages request it
const FUNDAMENTALS_PERIOD_START: i64 = 493_590_046;

/// Annual balance-sheet line items, in display order
pub const BALANCE_SHEET_ITEMS: &[&str] = &[
    "TreasurySharesNumber",
    "OrdinarySharesNumber",
    "ShareIssued",
    "NetDebt",
    "TotalDebt",
    "TangibleBookValue",
    "InvestedCapital",
    "WorkingCapital",
    "NetTangibleAssets",
    "CapitalLeaseObligations",
    "CommonStockEquity",
    "TotalCapitalization",
    "TotalEquityGrossMinorityInterest",
    "StockholdersEquity",
    "RetainedEarnings",
    "CommonStock",
    "TotalLiabilitiesNetMinorityInterest",
    "TotalNonCurrentLiabilitiesNetMinorityInterest",
    "LongTermDebt",
    "CurrentLiabilities",
    "CurrentDebt",
    "AccountsPayable",
    "TotalAssets",
    "TotalNonCurrentAssets",
    "NetPPE",
    "Goodwill",
    "CurrentAssets",
    "Inventory",
    "AccountsReceivable",
    "CashAndCashEquivalents",
    "CashCashEquivalentsAndShortTermInvestments",
];

/// Strip an exchange suffix: `RELIANCE.NS` → `RELIANCE`
pub fn strip_exchange_suffix(ticker: &str) -> &str {
    ticker.split('.').next().unwrap_or(ticker)
}

/// One trading day
#[derive(Debug, Clone, PartialEq)]
pub struct PriceBar {
    pub date: NaiveDate,
    pub close: f64,
    pub volume: u64,
}

/// Render daily bars as a `Date | Close | Volume` table
pub fn price_table(bars: &[PriceBar]) -> TextTable {
    let mut table = TextTable::new("Date", ["Close", "Volume"]);
    for bar in bars {
        table.push_row(
            bar.date.format("%Y-%m-%d").to_string(),
            vec![format!("{:.6}", bar.close), bar.volume.to_string()],
        );
    }
    table
}

/// A balance-sheet line item across reporting periods
#[derive(Debug, Clone, PartialEq)]
pub struct BalanceSheetRow {
    pub label: String,
    /// One value per period, aligned with [`BalanceSheet::periods`]
    pub values: Vec<Option<f64>>,
}

/// Annual balance sheet, most recent period first
#[derive(Debug, Clone, PartialEq)]
pub struct BalanceSheet {
    pub symbol: String,
    pub periods: Vec<NaiveDate>,
    pub rows: Vec<BalanceSheetRow>,
}

impl BalanceSheet {
    /// Keep only the `n` most recent periods
    pub fn latest_periods(mut self, n: usize) -> Self {
        self.periods.truncate(n);
        for row in &mut self.rows {
            row.values.truncate(n);
        }
        self
    }

    /// Drop every row that is missing a value for any period
    pub fn drop_incomplete(mut self) -> Self {
        self.rows
            .retain(|row| row.values.len() == self.periods.len() && row.values.iter().all(Option::is_some));
        self
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Line items as rows, periods as columns
    pub fn to_table(&self) -> TextTable {
        let mut table = TextTable::new(
            "",
            self.periods.iter().map(|date| date.format("%Y-%m-%d").to_string()),
        );
        for row in &self.rows {
            table.push_row(
                &row.label,
                row.values
                    .iter()
                    .map(|value| value.map_or_else(|| "NaN".to_string(), |v| format!("{v:.1}")))
                    .collect(),
            );
        }
        table
    }
}

#[derive(Debug, Deserialize)]
struct TimeseriesEnvelope {
    timeseries: TimeseriesBody,
}

#[derive(Debug, Deserialize)]
struct TimeseriesBody {
    #[serde(default)]
    result: Vec<TimeseriesResult>,
    #[serde(default)]
    error: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct TimeseriesResult {
    meta: TimeseriesMeta,
    #[serde(flatten)]
    series: HashMap<String, serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct TimeseriesMeta {
    #[serde(rename = "type", default)]
    kind: Vec<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DataPoint {
    as_of_date: String,
    reported_value: ReportedValue,
}

#[derive(Debug, Deserialize)]
struct ReportedValue {
    raw: f64,
}

/// Parse a fundamentals-timeseries response into a balance sheet
pub fn parse_balance_sheet(symbol: &str, body: &str) -> Result<BalanceSheet> {
    let envelope: TimeseriesEnvelope = serde_json::from_str(body)?;

    if let Some(error) = envelope.timeseries.error.filter(|e| !e.is_null()) {
        return Err(MarketError::YahooFinanceError(error.to_string()));
    }

    let mut items: HashMap<String, BTreeMap<NaiveDate, f64>> = HashMap::new();
    for mut result in envelope.timeseries.result {
        let Some(kind) = result.meta.kind.first().cloned() else {
            continue;
        };
        let Some(raw_points) = result.series.remove(&kind) else {
            continue;
        };

        let points: Vec<Option<DataPoint>> = serde_json::from_value(raw_points)?;
        let by_date = points
            .into_iter()
            .flatten()
            .filter_map(|point| {
                NaiveDate::parse_from_str(&point.as_of_date, "%Y-%m-%d")
                    .ok()
                    .map(|date| (date, point.reported_value.raw))
            })
            .collect();

        let name = kind.strip_prefix("annual").unwrap_or(&kind).to_string();
        items.insert(name, by_date);
    }

    let periods: Vec<NaiveDate> = items
        .values()
        .flat_map(BTreeMap::keys)
        .copied()
        .collect::<BTreeSet<_>>()
        .into_iter()
        .rev()
        .collect();

    let rows = BALANCE_SHEET_ITEMS
        .iter()
        .filter_map(|item| {
            let values = items.get(*item).filter(|values| !values.is_empty())?;
            Some(BalanceSheetRow {
                label: humanize(item),
                values: periods.iter().map(|date| values.get(date).copied()).collect(),
            })
        })
        .collect();

    Ok(BalanceSheet {
        symbol: symbol.to_string(),
        periods,
        rows,
    })
}

/// `TotalAssets` → `Total Assets`, `NetPPE` → `Net PPE`
fn humanize(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 8);
    let mut prev_lower = false;
    for c in name.chars() {
        if c.is_uppercase() && prev_lower {
            out.push(' ');
        }
        prev_lower = c.is_lowercase();
        out.push(c);
    }
    out
}

/// Source of daily price bars
#[async_trait]
pub trait PriceHistory: Send + Sync {
    /// One year of daily bars for an exchange-less symbol, oldest first
    async fn daily_bars(&self, symbol: &str) -> Result<Vec<PriceBar>>;
}

/// Yahoo Finance API client
#[derive(Clone)]
pub struct YahooFinanceClient {
    http: reqwest::Client,
    chart: Arc<yahoo::YahooConnector>,
    fundamentals_base_url: String,
}

impl fmt::Debug for YahooFinanceClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("YahooFinanceClient")
            .field("fundamentals_base_url", &self.fundamentals_base_url)
            .finish_non_exhaustive()
    }
}

impl YahooFinanceClient {
    /// Create a new Yahoo Finance client
    ///
    /// The chart connector and the fundamentals client share the configured
    /// timeout and user agent.
    pub fn new(config: &MarketConfig) -> Result<Self> {
        let chart = yahoo::YahooConnector::builder()
            .timeout(config.request_timeout)
            .user_agent(&config.user_agent)
            .build()
            .map_err(|e| MarketError::YahooFinanceError(e.to_string()))?;

        Ok(Self {
            http: config.http_client()?,
            chart: Arc::new(chart),
            fundamentals_base_url: config.fundamentals_base_url.trim_end_matches('/').to_string(),
        })
    }

    /// One year of daily split- and dividend-adjusted closes and volumes, oldest first
    #[instrument(skip(self))]
    pub async fn historical_prices(&self, symbol: &str) -> Result<Vec<PriceBar>> {
        let end = OffsetDateTime::now_utc();
        let start = end - time::Duration::days(365);

        let response = self
            .chart
            .get_quote_history(symbol, start, end)
            .await
            .map_err(|e| MarketError::YahooFinanceError(e.to_string()))?;

        let quotes = response
            .quotes()
            .map_err(|e| MarketError::YahooFinanceError(e.to_string()))?;

        debug!(count = quotes.len(), "Received daily quotes");

        Ok(quotes
            .iter()
            .filter_map(|q| {
                DateTime::<Utc>::from_timestamp(q.timestamp, 0).map(|ts| PriceBar {
                    date: ts.date_naive(),
                    close: q.adjclose,
                    volume: q.volume,
                })
            })
            .collect())
    }

    /// Annual balance sheet across every period Yahoo reports
    #[instrument(skip(self))]
    pub async fn balance_sheet(&self, symbol: &str) -> Result<BalanceSheet> {
        let types = BALANCE_SHEET_ITEMS
            .iter()
            .map(|item| format!("annual{item}"))
            .collect::<Vec<_>>()
            .join(",");
        let url = format!(
            "{}/ws/fundamentals-timeseries/v1/finance/timeseries/{symbol}",
            self.fundamentals_base_url
        );

        let body = self
            .http
            .get(&url)
            .query(&[
                ("symbol", symbol.to_string()),
                ("type", types),
                ("period1", FUNDAMENTALS_PERIOD_START.to_string()),
                ("period2", Utc::now().timestamp().to_string()),
            ])
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;

        debug!(bytes = body.len(), "Received fundamentals timeseries");
        parse_balance_sheet(symbol, &body)
    }
}

#[async_trait]
impl PriceHistory for YahooFinanceClient {
    async fn daily_bars(&self, symbol: &str) -> Result<Vec<PriceBar>> {
        self.historical_prices(symbol).await
    }
}

/// Canned fundamentals-timeseries response
#[cfg(test)]
pub(crate) fn fundamentals_fixture() -> String {
    let point = |date: &str, raw: f64| {
        serde_json::json!({"asOfDate": date, "periodType": "12M", "reportedValue": {"raw": raw, "fmt": "x"}})
    };
    serde_json::json!({
        "timeseries": {
            "result": [
                {
                    "meta": {"symbol": ["AAPL"], "type": ["annualTotalAssets"]},
                    "timestamp": [1],
                    "annualTotalAssets": [
                        point("2020-09-30", 323.0),
                        point("2021-09-30", 351.0),
                        point("2022-09-30", 352.0),
                        point("2023-09-30", 352.5)
                    ]
                },
                {
                    "meta": {"symbol": ["AAPL"], "type": ["annualGoodwill"]},
                    "annualGoodwill": [null, point("2023-09-30", 0.0)]
                },
                {
                    "meta": {"symbol": ["AAPL"], "type": ["annualNetPPE"]},
                    "annualNetPPE": [
                        point("2021-09-30", 39.4),
                        point("2022-09-30", 42.1),
                        point("2023-09-30", 43.7)
                    ]
                },
                {
                    "meta": {"symbol": ["AAPL"], "type": ["annualInventory"]}
                }
            ],
            "error": null
        }
    })
    .to_string()
}
