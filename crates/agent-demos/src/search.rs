//! Thin DuckDuckGo web search client
//!
//! One GET against the DuckDuckGo HTML endpoint, result blocks scraped with
//! regular expressions. There is no retry and no paging: callers get at most
//! `max_results` entries from the first page.

use crate::config::DemoConfig;
use crate::error::{DemoError, Result};
use async_trait::async_trait;
use regex::Regex;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

const USER_AGENT: &str = "Mozilla/5.0 (X11; Linux x86_64; rv:128.0) Gecko/20100101 Firefox/128.0";

/// One search hit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    pub title: String,
    pub link: String,
    pub snippet: String,
}

/// Web search backend used by the demo tools
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait WebSearch: Send + Sync {
    /// Return up to `max_results` hits for `query`
    async fn search(&self, query: &str, max_results: usize) -> Result<Vec<SearchResult>>;
}

/// DuckDuckGo HTML search
pub struct DuckDuckGoSearch {
    client: Client,
    base_url: String,
    parser: ResultParser,
}

impl DuckDuckGoSearch {
    /// Create a client against `base_url` (e.g. `https://html.duckduckgo.com`)
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        Self::with_client(base_url, Client::builder().user_agent(USER_AGENT).build()?)
    }

    /// Create a client from the demo configuration
    pub fn from_config(config: &DemoConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(config.search_timeout)
            .build()?;
        Self::with_client(&config.search_base_url, client)
    }

    fn with_client(base_url: impl Into<String>, client: Client) -> Result<Self> {
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            parser: ResultParser::new()?,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl WebSearch for DuckDuckGoSearch {
    async fn search(&self, query: &str, max_results: usize) -> Result<Vec<SearchResult>> {
        info!(query, max_results, "DuckDuckGo search");

        let response = self
            .client
            .get(format!("{}/html/", self.base_url))
            .query(&[("q", query)])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(DemoError::Search(format!(
                "DuckDuckGo returned HTTP {status} for '{query}'"
            )));
        }

        let body = response.text().await?;
        let mut results = self.parser.parse(&body);
        results.truncate(max_results);
        debug!(count = results.len(), "Search results parsed");
        Ok(results)
    }
}

/// Extracts result blocks from the DuckDuckGo HTML page
struct ResultParser {
    title: Regex,
    href: Regex,
    snippet: Regex,
    tag: Regex,
    entity: Regex,
}

impl ResultParser {
    fn new() -> Result<Self> {
        let compile = |pattern: &str| {
            Regex::new(pattern)
                .map_err(|e| DemoError::Search(format!("Invalid result pattern '{pattern}': {e}")))
        };
        Ok(Self {
            title: compile(r#"(?s)<a([^>]*class="result__a"[^>]*)>(.*?)</a>"#)?,
            href: compile(r#"href="([^"]*)""#)?,
            snippet: compile(r#"(?s)class="result__snippet"[^>]*>(.*?)</(?:a|div|td)>"#)?,
            tag: compile(r"<[^>]+>")?,
            entity: compile(r"&(#[0-9]+|#[xX][0-9a-fA-F]+|[a-zA-Z]+);")?,
        })
    }

    fn parse(&self, html: &str) -> Vec<SearchResult> {
        // every organic hit starts with its title block
        html.split(r#"class="result__title""#)
            .skip(1)
            .filter_map(|block| self.parse_block(block))
            .collect()
    }

    fn parse_block(&self, block: &str) -> Option<SearchResult> {
        let title = self.title.captures(block)?;
        let attrs = title.get(1)?.as_str();
        let raw_link = self.href.captures(attrs)?.get(1)?.as_str();
        let link = resolve_link(&self.decode_entities(raw_link));

        // ads point back through a DuckDuckGo tracking endpoint
        if link.contains("duckduckgo.com/y.js") {
            return None;
        }

        let snippet = self
            .snippet
            .captures(block)
            .and_then(|c| c.get(1))
            .map(|m| self.clean_text(m.as_str()))
            .unwrap_or_default();

        Some(SearchResult {
            title: self.clean_text(title.get(2)?.as_str()),
            link,
            snippet,
        })
    }

    fn clean_text(&self, fragment: &str) -> String {
        let stripped = self.tag.replace_all(fragment, "");
        let decoded = self.decode_entities(&stripped);
        decoded.split_whitespace().collect::<Vec<_>>().join(" ")
    }

    fn decode_entities(&self, text: &str) -> String {
        self.entity
            .replace_all(text, |caps: &regex::Captures<'_>| {
                let entity = &caps[1];
                decode_entity(entity).unwrap_or_else(|| caps[0].to_string())
            })
            .into_owned()
    }
}

fn decode_entity(entity: &str) -> Option<String> {
    let named = match entity {
        "amp" => "&",
        "lt" => "<",
        "gt" => ">",
        "quot" => "\"",
        "apos" => "'",
        "nbsp" => " ",
        _ => {
            let code = if let Some(hex) = entity
                .strip_prefix("#x")
                .or_else(|| entity.strip_prefix("#X"))
            {
                u32::from_str_radix(hex, 16).ok()?
            } else {
                entity.strip_prefix('#')?.parse().ok()?
            };
            return char::from_u32(code).map(String::from);
        }
    };
    Some(named.to_string())
}

/// Unwrap DuckDuckGo redirect links (`//duckduckgo.com/l/?uddg=<target>`)
fn resolve_link(link: &str) -> String {
    let absolute = if link.starts_with("//") {
        format!("https:{link}")
    } else {
        link.to_string()
    };

    url::Url::parse(&absolute)
        .ok()
        .filter(|url| url.path() == "/l/")
        .and_then(|url| {
            url.query_pairs()
                .find(|(key, _)| key == "uddg")
                .map(|(_, target)| target.into_owned())
        })
        .unwrap_or(absolute)
}
