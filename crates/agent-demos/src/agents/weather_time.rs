//! Single agent answering time and weather questions

use crate::config::DemoConfig;
use crate::error::Result;
use crate::models::ModelSource;
use crate::search::WebSearch;
use crate::tools::{WeatherMockTool, current_time_tool};
use agent_runtime::LlmAgent;
use std::sync::Arc;

pub const AGENT_NAME: &str = "weather_time_agent";

pub fn weather_time_agent(
    models: &dyn ModelSource,
    search: Arc<dyn WebSearch>,
    config: &DemoConfig,
) -> Result<LlmAgent> {
    let agent = LlmAgent::builder(AGENT_NAME)
        .model(models.model(AGENT_NAME, &config.weather_time_model)?)
        .description("Agent to answer questions about time and weather in a city")
        .instruction(
            "You are a helpful agent who can answer user questions about the time and weather in a city.",
        )
        .tool(Arc::new(WeatherMockTool::new(search, config.weather_time_results)))
        .tool(Arc::new(current_time_tool()))
        .build()?;
    Ok(agent)
}
