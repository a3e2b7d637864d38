//! State-aware weather team: temperature unit from session state, report saved to state

use crate::agents::log_built;
use crate::config::DemoConfig;
use crate::error::Result;
use crate::models::ModelSource;
use crate::search::WebSearch;
use crate::state_keys::LAST_WEATHER_REPORT;
use crate::tools::{StatefulWeatherTool, say_goodbye_tool, say_hello_tool};
use agent_core::Agent;
use agent_runtime::LlmAgent;
use std::sync::Arc;
use tracing::{error, info, warn};

pub const GREETING_AGENT: &str = "greeting_agent";
pub const FAREWELL_AGENT: &str = "farewell_agent";
pub const ROOT_AGENT: &str = "weather_agent_v4_stateful";

pub fn greeting_agent(models: &dyn ModelSource, config: &DemoConfig) -> Result<LlmAgent> {
    let agent = LlmAgent::builder(GREETING_AGENT)
        .model(models.model(GREETING_AGENT, &config.team_model)?)
        .description("Handles simple greetings and hellos using the 'say_hello' tool.")
        .instruction(
            "You are the Greeting Agent. Your ONLY task is to provide a friendly greeting using the `say_hello` tool. Do nothing else.",
        )
        .tool(Arc::new(say_hello_tool()))
        .build()?;
    Ok(agent)
}

pub fn farewell_agent(models: &dyn ModelSource, config: &DemoConfig) -> Result<LlmAgent> {
    let agent = LlmAgent::builder(FAREWELL_AGENT)
        .model(models.model(FAREWELL_AGENT, &config.team_model)?)
        .description("Handles simple farewells and goodbyes using the 'say_goodbye' tool.")
        .instruction(
            "You are the Farewell Agent. Your ONLY task is to provide a polite goodbye message using the 'say_goodbye' tool. \
Do not perform any other actions.",
        )
        .tool(Arc::new(say_goodbye_tool()))
        .build()?;
    Ok(agent)
}

/// Agents of the stateful team; `root` is `None` when a prerequisite failed
pub struct StatefulTeam {
    pub greeting_agent: Option<Arc<LlmAgent>>,
    pub farewell_agent: Option<Arc<LlmAgent>>,
    pub root: Option<Arc<LlmAgent>>,
}

impl StatefulTeam {
    pub fn assemble(models: &dyn ModelSource, search: Arc<dyn WebSearch>, config: &DemoConfig) -> Self {
        let greeting_agent = log_built(greeting_agent(models, config), GREETING_AGENT);
        let farewell_agent = log_built(farewell_agent(models, config), FAREWELL_AGENT);

        let root = if let (Some(greeting), Some(farewell)) = (&greeting_agent, &farewell_agent) {
            let root = log_built(
                root_agent(models, search, config, Arc::clone(greeting), Arc::clone(farewell)),
                ROOT_AGENT,
            );
            if root.is_some() {
                info!(agent = ROOT_AGENT, "Root agent created using stateful tool and output_key");
            }
            root
        } else {
            warn!("Cannot create stateful root agent. Prerequisite missing.");
            if greeting_agent.is_none() {
                error!("- greeting_agent definition missing");
            }
            if farewell_agent.is_none() {
                error!("- farewell_agent definition missing");
            }
            None
        };

        Self {
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
            "Main agent: Provides weather (state-aware unit), delegates greetings/farewells, saves report to state.",
        )
        .instruction(
            "You are the main Weather Agent. Your job is to provide weather using 'get_weather_stateful'. \
The Tool will format the temperature based on user preference stored in the state. \
Delegate simple greetings to 'greeting_agent' and farewells to 'farewell_agent'. \
Handle only weather requests, greetings, and farewells.",
        )
        .tool(Arc::new(StatefulWeatherTool::new(search, config.team_weather_results)))
        .sub_agent(greeting as Arc<dyn Agent>)
        .sub_agent(farewell as Arc<dyn Agent>)
        .output_key(LAST_WEATHER_REPORT)
        .build()?;
    Ok(agent)
}
