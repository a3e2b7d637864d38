//! Stock advisor workflow
//!
//! ```text
//! StockAdvisorWorkflow (sequential)
//! ├── ParallelAgent
//! │   ├── StockPriceAgent          -> state["stock_price"]
//! │   └── CompetitorAnalysisAgent  -> state["competitor_analysis"]
//! └── SummarizerAgent              -> state["summarizer"]
//! ```
//!
//! `CompanyNewsRetrieverAgent` and `AcquisitionResearchAgent` are built
//! alongside but are not part of the default parallel group.

use crate::config::DemoConfig;
use crate::error::Result;
use crate::models::ModelSource;
use crate::search::WebSearch;
use crate::state_keys::{
    ACQUISITION_RESEARCH, COMPANY_NEWS, COMPETITOR_ANALYSIS, STOCK_PRICE, SUMMARIZER,
};
use crate::tools::{DuckDuckGoSearchTool, SEARCH_TOOL_NAME, todays_date_callback};
use agent_core::Agent;
use agent_runtime::LlmAgent;
use agent_workflow::{ParallelAgent, SequentialAgent};
use std::sync::Arc;
use tracing::info;

pub const WORKFLOW_AGENT: &str = "StockAdvisorWorkflow";
pub const PARALLEL_AGENT: &str = "ParallelAgent";
pub const STOCK_PRICE_AGENT: &str = "StockPriceAgent";
pub const COMPETITOR_ANALYSIS_AGENT: &str = "CompetitorAnalysisAgent";
pub const COMPANY_NEWS_AGENT: &str = "CompanyNewsRetrieverAgent";
pub const ACQUISITION_RESEARCH_AGENT: &str = "AcquisitionResearchAgent";
pub const SUMMARIZER_AGENT: &str = "SummarizerAgent";

const SUMMARIZER_INSTRUCTION: &str = "Summarize JSON responses into a single summary document with all the information provided by the other agents into a detailed report in the markdown format. Make sure to include all the relevant information from the other agents.
1. Stock Price Agent: {{stock_price}}
2. Competitor Analysis Agent: {{competitor_analysis}}

- Ensure the summary is well-structured and clearly presents all the details in an organized manner.";

/// Instruction shared by the search-driven research agents
fn research_instruction(role: &str, subject: &str) -> String {
    format!(
        "Acts as a {role} agent. You can access the following tools to get information about {subject}.

Tools Available:
- {SEARCH_TOOL_NAME}

Output Instructions:
- If the user does not provide specific details, make reasonable assumptions about the company and search for information about {subject}.
- If the user provides specific details, search for information about {subject} based on the user's input.
- If the user provides invalid details, return a valid JSON with all the relevant information about {subject} and news.
- You return a valid JSON with all the relevant information about {subject} and news."
    )
}

struct Research<'a> {
    name: &'a str,
    description: &'a str,
    role: &'a str,
    subject: &'a str,
    output_key: &'a str,
}

fn research_agent(
    research: &Research<'_>,
    models: &dyn ModelSource,
    search: Arc<dyn WebSearch>,
    config: &DemoConfig,
) -> Result<agent_runtime::LlmAgentBuilder> {
    Ok(LlmAgent::builder(research.name)
        .model(models.model(research.name, &config.stock_model)?)
        .description(research.description)
        .instruction(research_instruction(research.role, research.subject))
        .tool(Arc::new(DuckDuckGoSearchTool::new(search, config.stock_search_results)))
        .output_key(research.output_key))
}

pub fn stock_price_agent(
    models: &dyn ModelSource,
    search: Arc<dyn WebSearch>,
    config: &DemoConfig,
) -> Result<LlmAgent> {
    let research = Research {
        name: STOCK_PRICE_AGENT,
        description: "You are a stock price agent",
        role: "stock price",
        subject: "stock prices",
        output_key: STOCK_PRICE,
    };
    Ok(research_agent(&research, models, search, config)?.build()?)
}

pub fn competitor_analysis_agent(
    models: &dyn ModelSource,
    search: Arc<dyn WebSearch>,
    config: &DemoConfig,
) -> Result<LlmAgent> {
    let research = Research {
        name: COMPETITOR_ANALYSIS_AGENT,
        description: "You are a competitor analysis agent",
        role: "competitor analysis",
        subject: "competitors",
        output_key: COMPETITOR_ANALYSIS,
    };
    Ok(research_agent(&research, models, search, config)?.build()?)
}

pub fn company_news_retriever_agent(
    models: &dyn ModelSource,
    search: Arc<dyn WebSearch>,
    config: &DemoConfig,
) -> Result<LlmAgent> {
    let research = Research {
        name: COMPANY_NEWS_AGENT,
        description: "You are a company news retriever agent",
        role: "company news retriever",
        subject: "company news",
        output_key: COMPANY_NEWS,
    };
    Ok(research_agent(&research, models, search, config)?.build()?)
}

/// Acquisition research; its searches get today's date appended
pub fn acquisition_research_agent(
    models: &dyn ModelSource,
    search: Arc<dyn WebSearch>,
    config: &DemoConfig,
) -> Result<LlmAgent> {
    let research = Research {
        name: ACQUISITION_RESEARCH_AGENT,
        description: "You are an acquisition finder agent",
        role: "acquisition finder",
        subject: "acquisitions and mergers",
        output_key: ACQUISITION_RESEARCH,
    };
    Ok(research_agent(&research, models, search, config)?
        .before_tool_callback(todays_date_callback())
        .build()?)
}

pub fn summarizer_agent(models: &dyn ModelSource, config: &DemoConfig) -> Result<LlmAgent> {
    let agent = LlmAgent::builder(SUMMARIZER_AGENT)
        .model(models.model(SUMMARIZER_AGENT, &config.stock_model)?)
        .description("You are a summarizer agent")
        .instruction(SUMMARIZER_INSTRUCTION)
        .output_key(SUMMARIZER)
        .build()?;
    Ok(agent)
}

/// The assembled workflow plus the agents kept outside it
pub struct StockAdvisor {
    pub root: Arc<SequentialAgent>,
    pub company_news: Arc<LlmAgent>,
    pub acquisition_research: Arc<LlmAgent>,
}

impl StockAdvisor {
    pub fn assemble(
        models: &dyn ModelSource,
        search: Arc<dyn WebSearch>,
        config: &DemoConfig,
    ) -> Result<Self> {
        let stock_price = stock_price_agent(models, Arc::clone(&search), config)?;
        let competitors = competitor_analysis_agent(models, Arc::clone(&search), config)?;
        let company_news = company_news_retriever_agent(models, Arc::clone(&search), config)?;
        let acquisition_research = acquisition_research_agent(models, search, config)?;
        let summarizer = summarizer_agent(models, config)?;

        let research = ParallelAgent::builder(PARALLEL_AGENT)
            .description("Runs the stock price and competitor research agents concurrently")
            .add_agent(Arc::new(stock_price) as Arc<dyn Agent>)
            .add_agent(Arc::new(competitors) as Arc<dyn Agent>)
            .build()?;

        let root = SequentialAgent::builder(WORKFLOW_AGENT)
            .description(
                "Orchestrates stock price, company news, acquisition research, competitor analysis, and then summarizes the information.",
            )
            .add_agent(Arc::new(research) as Arc<dyn Agent>)
            .add_agent(Arc::new(summarizer) as Arc<dyn Agent>)
            .build()?;
        info!(agent = WORKFLOW_AGENT, "Stock advisor workflow created");

        Ok(Self {
            root: Arc::new(root),
            company_news: Arc::new(company_news),
            acquisition_research: Arc::new(acquisition_research),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ScriptedModels;
    use crate::search::MockWebSearch;
    use agent_llm::ScriptedLlm;

    fn all_models() -> ScriptedModels {
        [
            STOCK_PRICE_AGENT,
            COMPETITOR_ANALYSIS_AGENT,
            COMPANY_NEWS_AGENT,
            ACQUISITION_RESEARCH_AGENT,
            SUMMARIZER_AGENT,
        ]
        .into_iter()
        .fold(ScriptedModels::new(), |models, name| {
            models.with(name, Arc::new(ScriptedLlm::new("scripted/stock")))
        })
    }

    #[test]
    fn test_workflow_shape() {
        let advisor =
            StockAdvisor::assemble(&all_models(), Arc::new(MockWebSearch::new()), &DemoConfig::default())
                .unwrap();

        let root = advisor.root;
        let steps: Vec<&str> = root.sub_agents().iter().map(|a| a.name()).collect();
        assert_eq!(steps, vec![PARALLEL_AGENT, SUMMARIZER_AGENT]);

        let branches: Vec<&str> = root.sub_agents()[0]
            .sub_agents()
            .iter()
            .map(|a| a.name())
            .collect();
        assert_eq!(branches, vec![STOCK_PRICE_AGENT, COMPETITOR_ANALYSIS_AGENT]);

        assert!(root.find_sub_agent(COMPANY_NEWS_AGENT).is_none());
        assert_eq!(advisor.company_news.output_key(), Some(COMPANY_NEWS));
        assert_eq!(advisor.acquisition_research.output_key(), Some(ACQUISITION_RESEARCH));
    }

    #[test]
    fn test_research_instruction() {
        let text = research_instruction("stock price", "stock prices");
        assert!(text.starts_with("Acts as a stock price agent."));
        assert!(text.contains("- duckduckgo_results_json"));
        assert!(text.ends_with("information about stock prices and news."));
    }

    #[test]
    fn test_summarizer_reads_research_keys() {
        let summarizer = summarizer_agent(&all_models(), &DemoConfig::default()).unwrap();
        assert!(summarizer.instruction().contains("{{stock_price}}"));
        assert!(summarizer.instruction().contains("{{competitor_analysis}}"));
        assert!(summarizer.tool_names().is_empty());
    }
}
