//! Recent headlines scraped from a search results page

use crate::config::MarketConfig;
use crate::error::{MarketError, Result};
use regex::Regex;
use scraper::{Html, Selector};
use std::sync::LazyLock;
use tracing::{debug, instrument};

/// Headline blocks on the results page, collected in this order
const HEADLINE_SELECTORS: [&str; 2] = ["div.n0jPhd.ynAwRc.tNxQIb.nDgy9d", "div.IJl0Z"];

/// With more raw matches than this the page is noisy and only the top few are kept
const NOISY_THRESHOLD: usize = 6;
const NOISY_KEEP: usize = 4;

static WHITESPACE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s").expect("whitespace regex is valid"));

/// Build the search URL for a company's news
///
/// `" stock news"` is appended unless the term already mentions news, and
/// every whitespace character becomes `+`.
pub fn build_search_query(base_url: &str, term: &str) -> String {
    let term = if term.contains("news") {
        term.to_string()
    } else {
        format!("{term} stock news")
    };
    let url = format!("{}/search?q={term}", base_url.trim_end_matches('/'));
    WHITESPACE_RE.replace_all(&url, "+").into_owned()
}

/// Collect headline texts from a results page
pub fn extract_headlines(html: &str) -> Result<Vec<String>> {
    let document = Html::parse_document(html);

    let mut headlines = Vec::new();
    for css in HEADLINE_SELECTORS {
        let selector = Selector::parse(css).map_err(|e| MarketError::HtmlError(format!("{css}: {e}")))?;
        headlines.extend(
            document
                .select(&selector)
                .map(|element| element.text().collect::<String>().trim().to_string()),
        );
    }

    Ok(headlines)
}

/// Keep the first four headlines when more than six were found
pub fn cap_headlines(mut headlines: Vec<String>) -> Vec<String> {
    if headlines.len() > NOISY_THRESHOLD {
        headlines.truncate(NOISY_KEEP);
    }
    headlines
}

/// Render headlines as a numbered list, counting from 0
pub fn format_news(headlines: &[String]) -> String {
    let mut out = String::from("Recent News:\n\n");
    for (i, headline) in headlines.iter().enumerate() {
        out.push_str(&format!("{i}. {headline}\n"));
    }
    out
}

/// Fetches and scrapes news search results
#[derive(Debug, Clone)]
pub struct NewsClient {
    http: reqwest::Client,
    base_url: String,
}

impl NewsClient {
    pub fn new(config: &MarketConfig) -> Result<Self> {
        Ok(Self {
            http: config.http_client()?,
            base_url: config.news_base_url.clone(),
        })
    }

    /// Recent headlines for a company, already capped
    #[instrument(skip(self))]
    pub async fn recent_headlines(&self, company: &str) -> Result<Vec<String>> {
        let url = build_search_query(&self.base_url, company);
        debug!(url = %url, "Fetching news search page");

        let html = self
            .http
            .get(&url)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;

        let headlines = extract_headlines(&html)?;
        debug!(found = headlines.len(), "Extracted headlines");
        Ok(cap_headlines(headlines))
    }
}

#[cfg(test)]
pub(crate) fn results_page(first: usize, second: usize) -> String {
    let mut body = String::from("<html><body>");
    for i in 0..first {
        body.push_str(&format!(
            "<div class=\"n0jPhd ynAwRc tNxQIb nDgy9d\">Top story {i}</div>"
        ));
    }
    for i in 0..second {
        body.push_str(&format!("<div class=\"IJl0Z\"><span>More {i}</span></div>"));
    }
    body.push_str("<div class=\"other\">Ignore me</div></body></html>");
    body
}
