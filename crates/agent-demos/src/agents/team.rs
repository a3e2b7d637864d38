//! Weather agent team: a coordinator that delegates greetings and farewells

use crate::agents::log_built;
use crate::config::DemoConfig;
use crate::error::Result;
use crate::models::ModelSource;
use crate::search::WebSearch;
use crate::tools::{WeatherTool, say_goodbye_tool, say_hello_tool};
use agent_core::Agent;
use agent_runtime::LlmAgent;
use std::sync::Arc;
use tracing::{error, info};

pub const WEATHER_AGENT: &str = "weather_agent_v1";
pub const GREETING_AGENT: &str = "greeting_agent_v1";
pub const FAREWELL_AGENT: &str = "farewell_agent_v1";
pub const ROOT_AGENT: &str = "weather_agent_v2";

const ROOT_INSTRUCTION: &str = "Use the `get_weather` tool ONLY for specific weather requests (e.g., `weather in London`). \
You have specialized sub-agents: \
1. `greeting_agent`: Handles simple greetings like `Hi`, `Hello`. Delegate to it for these. \
2. `farewell_agent`: Handles simple farewells like `Bye`, `Goodbye`. Delegate to it for these. \
Analyze the user's query. If it's a greeting, delegate to `greeting_agent`. \
If it is a farewell, delegate to `farewell_agent`. \
If it is a weather request, handle it yourself using `get_weather`. \
For anything else, respond appropriately or state you cannot handle it.";

/// Stand-alone weather assistant
pub fn weather_agent(
    models: &dyn ModelSource,
    search: Arc<dyn WebSearch>,
    config: &DemoConfig,
) -> Result<LlmAgent> {
    let agent = LlmAgent::builder(WEATHER_AGENT)
        .model(models.model(WEATHER_AGENT, &config.team_model)?)
        .description("Provides weather information for specific cities.")
        .instruction(
            "You are a helpful weather assistant. When the user asks for the weather in a specific city, \
use the `get_weather` tool to find the information. If the tool returns an error, inform the user politely. \
If the tool is successful, present the weather report clearly.",
        )
        .tool(Arc::new(WeatherTool::new(search, config.team_weather_results)))
        .build()?;
    Ok(agent)
}

pub fn greeting_agent(models: &dyn ModelSource, config: &DemoConfig) -> Result<LlmAgent> {
    let agent = LlmAgent::builder(GREETING_AGENT)
        .model(models.model(GREETING_AGENT, &config.team_model)?)
        .description("Handles simple greetings and hellos using the `say_hello` tool.")
        .instruction(
            "You are the Greeting Agent. Your ONLY task is to provide a friendly greeting to the user. \
Use the `say_hello` tool to generate the greeting. If the user provides their name, make sure to pass it to the tool. \
Do not engage in any other conversation or tasks.",
        )
        .tool(Arc::new(say_hello_tool()))
        .build()?;
    Ok(agent)
}

pub fn farewell_agent(models: &dyn ModelSource, config: &DemoConfig) -> Result<LlmAgent> {
    let agent = LlmAgent::builder(FAREWELL_AGENT)
        .model(models.model(FAREWELL_AGENT, &config.team_model)?)
        .description("Handles simple goodbyes and farewells using the `say_goodbye` tool.")
        .instruction(
            "You are the Farewell Agent. Your ONLY task is to provide a friendly farewell to the user. \
Use the `say_goodbye` tool to generate the farewell. Do not engage in any other conversation or tasks.",
        )
        .tool(Arc::new(say_goodbye_tool()))
        .build()?;
    Ok(agent)
}

/// The team's agents; a member is `None` when it failed to build
pub struct WeatherTeam {
    pub weather_agent: Option<Arc<LlmAgent>>,
    pub greeting_agent: Option<Arc<LlmAgent>>,
    pub farewell_agent: Option<Arc<LlmAgent>>,
    /// Coordinator, only built when both specialists exist
    pub root: Option<Arc<LlmAgent>>,
}

impl WeatherTeam {
    /// Build every member, logging failures instead of returning them
    pub fn assemble(models: &dyn ModelSource, search: Arc<dyn WebSearch>, config: &DemoConfig) -> Self {
        let weather_agent = log_built(weather_agent(models, Arc::clone(&search), config), WEATHER_AGENT);
        let greeting_agent = log_built(greeting_agent(models, config), GREETING_AGENT);
        let farewell_agent = log_built(farewell_agent(models, config), FAREWELL_AGENT);

        let root = match (&greeting_agent, &farewell_agent) {
            (Some(greeting), Some(farewell)) => {
                let root = log_built(
                    root_agent(models, search, config, Arc::clone(greeting), Arc::clone(farewell)),
                    ROOT_AGENT,
                );
                if let Some(root) = &root {
                    info!(agent = ROOT_AGENT, sub_agents = ?[GREETING_AGENT, FAREWELL_AGENT], model = root.model(), "Root agent created with sub-agents");
                }
                root
            }
            _ => {
                error!("Cannot create root agent because one or more sub agents failed to initialize");
                if greeting_agent.is_none() {
                    error!(" - Greeting Agent is missing");
                }
                if farewell_agent.is_none() {
                    error!(" - Farewell Agent is missing");
                }
                None
            }
        };

        Self {
            weather_agent,
            greeting_agent,
            farewell_agent,
            root,
        }
    }
}

fn root_agent(
    models: &dyn ModelSource,
    search: Arc<dyn WebSearch>,
    config: &DemoConfig,
    greeting: Arc<LlmAgent>,
    farewell: Arc<LlmAgent>,
) -> Result<LlmAgent> {
    let agent = LlmAgent::builder(ROOT_AGENT)
        .model(models.model(ROOT_AGENT, &config.team_model)?)
        .description(
            "The main coordinator agent. Handles weather requests and delegates greetings/farewells to specialists.",
        )
        .instruction(ROOT_INSTRUCTION)
        .tool(Arc::new(WeatherTool::new(search, config.team_weather_results)))
        .sub_agent(greeting as Arc<dyn Agent>)
        .sub_agent(farewell as Arc<dyn Agent>)
        .build()?;
    Ok(agent)
}
