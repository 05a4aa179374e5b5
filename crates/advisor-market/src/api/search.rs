//! DuckDuckGo HTML search

use crate::config::MarketConfig;
use crate::error::{MarketError, Result};
use scraper::{ElementRef, Html, Selector};
use std::fmt;
use tracing::{debug, instrument};
use url::Url;

/// One web search hit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchResult {
    pub title: String,
    pub link: String,
    pub snippet: String,
}

impl fmt::Display for SearchResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}\n{}\n{}", self.title, self.link, self.snippet)
    }
}

/// Render hits separated by blank lines
pub fn format_results(results: &[SearchResult]) -> String {
    results
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Parse a DuckDuckGo HTML results page
pub fn parse_results(html: &str, max_results: usize) -> Result<Vec<SearchResult>> {
    let document = Html::parse_document(html);
    let selector = |css: &str| {
        Selector::parse(css).map_err(|e| MarketError::HtmlError(format!("{css}: {e}")))
    };

    let result_selector = selector(".web-result")?;
    let title_selector = selector(".result__a")?;
    let url_selector = selector(".result__url")?;
    let snippet_selector = selector(".result__snippet")?;

    let first_text = |element: ElementRef<'_>, selector: &Selector| {
        element
            .select(selector)
            .next()
            .map(|node| node.text().collect::<String>().trim().to_string())
    };

    Ok(document
        .select(&result_selector)
        .filter_map(|result| {
            Some(SearchResult {
                title: first_text(result, &title_selector)?,
                link: first_text(result, &url_selector)?,
                snippet: first_text(result, &snippet_selector)?,
            })
        })
        .take(max_results)
        .collect())
}

/// DuckDuckGo HTML search client
#[derive(Debug, Clone)]
pub struct DuckDuckGoSearch {
    http: reqwest::Client,
    url: String,
    max_results: usize,
}

impl DuckDuckGoSearch {
    pub fn new(config: &MarketConfig) -> Result<Self> {
        Ok(Self {
            http: config.http_client()?,
            url: config.search_url.clone(),
            max_results: config.max_search_results,
        })
    }

    #[instrument(skip(self))]
    pub async fn search(&self, query: &str) -> Result<Vec<SearchResult>> {
        let mut url = Url::parse(&self.url)?;
        url.query_pairs_mut().append_pair("q", query);

        let body = self
            .http
            .get(url)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;

        let results = parse_results(&body, self.max_results)?;
        debug!(count = results.len(), "Parsed search results");
        Ok(results)
    }
}

#[cfg(test)]
pub(crate) fn search_page(hits: usize) -> String {
    let mut body = String::from("<html><body>");
    for i in 0..hits {
        body.push_str(&format!(
            r#"<div class="result web-result">
                 <a class="result__a" href="https://example.com/{i}">Tesla, Inc. (TSLA) {i}</a>
                 <a class="result__url"> finance.example.com/{i} </a>
                 <a class="result__snippet">Tesla stock quote and news {i}</a>
               </div>"#
        ));
    }
    body.push_str(r#"<div class="result web-result"><a class="result__a">No snippet</a></div>"#);
    body.push_str("</body></html>");
    body
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_results() {
        let results = parse_results(&search_page(2), 4).unwrap();

        assert_eq!(results.len(), 2);
        assert_eq!(results[0].title, "Tesla, Inc. (TSLA) 0");
        assert_eq!(results[0].link, "finance.example.com/0");
        assert_eq!(results[1].snippet, "Tesla stock quote and news 1");
    }

    #[test]
    fn test_parse_results_respects_limit() {
        assert_eq!(parse_results(&search_page(6), 4).unwrap().len(), 4);
        assert!(parse_results("<html></html>", 4).unwrap().is_empty());
    }

    #[test]
    fn test_format_results() {
        let text = format_results(&parse_results(&search_page(2), 4).unwrap());
        assert!(text.starts_with("Tesla, Inc. (TSLA) 0\nfinance.example.com/0\nTesla stock quote and news 0\n\n"));
    }

    #[tokio::test]
    async fn test_search_against_mock_server() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/html/")
            .match_query(mockito::Matcher::UrlEncoded("q".into(), "Tesla stock ticker".into()))
            .with_status(200)
            .with_body(search_page(3))
            .create_async()
            .await;

        let config = MarketConfig::builder()
            .search_url(format!("{}/html/", server.url()))
            .build()
            .unwrap();
        let results = DuckDuckGoSearch::new(&config)
            .unwrap()
            .search("Tesla stock ticker")
            .await
            .unwrap();

        assert_eq!(results.len(), 3);
        mock.assert_async().await;
    }

    #[tokio::test]
    #[ignore] // Requires network access
    async fn test_search_live() {
        let search = DuckDuckGoSearch::new(&MarketConfig::default()).unwrap();
        let results = search.search("Tesla stock ticker").await.unwrap();
        assert!(!results.is_empty());
    }
}
