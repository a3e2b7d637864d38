//! `duckduckgo_results_json` tool used by the stock advisor agents

use crate::search::WebSearch;
use agent_core::Result as AgentResult;
use agent_llm::tools::schema;
use agent_tools::{Tool, ToolContext, required_str};
use async_trait::async_trait;
use serde_json::{Value, json};
use std::sync::Arc;
use tracing::info;

pub const SEARCH_TOOL_NAME: &str = "duckduckgo_results_json";

/// Web search returning a JSON list of `{title, link, snippet}`
pub struct DuckDuckGoSearchTool {
    search: Arc<dyn WebSearch>,
    max_results: usize,
}

impl DuckDuckGoSearchTool {
    pub fn new(search: Arc<dyn WebSearch>, max_results: usize) -> Self {
        Self {
            search,
            max_results,
        }
    }
}

#[async_trait]
impl Tool for DuckDuckGoSearchTool {
    async fn execute(&self, args: Value, ctx: &mut ToolContext) -> AgentResult<Value> {
        let query = required_str(&args, "query")?;
        info!(agent = ctx.agent_name(), query, "Running web search");

        let results = self
            .search
            .search(query, self.max_results)
            .await
            .map_err(agent_core::Error::from)?;
        Ok(json!(results))
    }

    fn name(&self) -> &str {
        SEARCH_TOOL_NAME
    }

    fn description(&self) -> &str {
        "A wrapper around Duck Duck Go Search. Useful for when you need to answer questions about current events. Input should be a search query. Output is a JSON array of the query results"
    }

    fn input_schema(&self) -> Value {
        schema::object(json!({"query": schema::string("search query to look up")}), &["query"])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::{MockWebSearch, SearchResult};
    use agent_core::State;

    #[tokio::test]
    async fn test_returns_result_list() {
        let mut search = MockWebSearch::new();
        search
            .expect_search()
            .withf(|query, max| query == "NVDA stock price" && *max == 5)
            .returning(|_, _| {
                Ok(vec![SearchResult {
                    title: "NVIDIA Corporation (NVDA)".to_string(),
                    link: "https://finance.example.com/NVDA".to_string(),
                    snippet: "NVDA closed at 120.15".to_string(),
                }])
            });

        let tool = DuckDuckGoSearchTool::new(Arc::new(search), 5);
        let mut ctx = ToolContext::new("StockPriceAgent", "call_1", State::new());
        let out = tool
            .execute(json!({"query": "NVDA stock price"}), &mut ctx)
            .await
            .unwrap();

        assert_eq!(out[0]["title"], "NVIDIA Corporation (NVDA)");
        assert_eq!(out[0]["snippet"], "NVDA closed at 120.15");
        assert_eq!(out.as_array().map(Vec::len), Some(1));
    }

    #[tokio::test]
    async fn test_requires_query() {
        let tool = DuckDuckGoSearchTool::new(Arc::new(MockWebSearch::new()), 5);
        let mut ctx = ToolContext::new("StockPriceAgent", "call_1", State::new());
        assert!(tool.execute(json!({}), &mut ctx).await.is_err());
    }
}
