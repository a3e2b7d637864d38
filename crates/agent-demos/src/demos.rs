//! Demo flows: session setup, prompts and conversation turns
//!
//! Each `run_*` function reads from and writes to a [`Prompter`], so the
//! binary drives them from stdin/stdout and tests from in-memory buffers.

use crate::agents::stock_advisor::SUMMARIZER_AGENT;
use crate::agents::{StatefulTeam, StockAdvisor, WeatherTeam, weather_time_agent};
use crate::config::DemoConfig;
use crate::conversation::{call_agent_async, call_agent_until_author};
use crate::error::Result;
use crate::models::{LiteLlmModels, ModelSource};
use crate::repl::Prompter;
use crate::search::{DuckDuckGoSearch, WebSearch};
use crate::state_keys::{LAST_CITY_CHECKED, LAST_WEATHER_REPORT, TEMPERATURE_UNIT};
use crate::tools::stateful::{DEFAULT_UNIT, FAHRENHEIT};
use crate::tools::{get_weather, say_goodbye, say_hello};
use agent_core::{Agent, SessionKey, SessionService, State};
use agent_runtime::{InMemorySessionService, Runner};
use agent_utils::AppConfig;
use std::io::{BufRead, Write};
use std::sync::Arc;
use tracing::{error, info, warn};

/// Everything a demo needs from the outside world
#[derive(Clone)]
pub struct DemoEnv {
    pub config: DemoConfig,
    pub models: Arc<dyn ModelSource>,
    pub search: Arc<dyn WebSearch>,
}

impl DemoEnv {
    pub fn new(config: DemoConfig, models: Arc<dyn ModelSource>, search: Arc<dyn WebSearch>) -> Self {
        Self {
            config,
            models,
            search,
        }
    }

    /// LiteLLM backends and DuckDuckGo search
    pub fn live(config: DemoConfig) -> Result<Self> {
        let search = DuckDuckGoSearch::from_config(&config)?;
        Ok(Self::new(config, Arc::new(LiteLlmModels), Arc::new(search)))
    }
}

/// Session ids each demo runs under by default
pub mod sessions {
    use agent_utils::AppConfig;

    pub fn weather_time() -> AppConfig {
        AppConfig::new("weather_time_tool_agent", "user_123", "session_123")
    }

    pub fn weather() -> AppConfig {
        AppConfig::new("weather_tutorial_app", "user_123", "session_123")
    }

    pub fn team() -> AppConfig {
        AppConfig::new("weather_tutorial_agent_team", "user_1_agent_team", "session_1_agent_team")
    }

    pub fn stateful_team() -> AppConfig {
        AppConfig::new("stateful_weather_agent_team", "user_state_1", "session_state_demo_1")
    }

    pub fn stock_advisor() -> AppConfig {
        AppConfig::new("stock_advisor_workflow", "user_123", "session_123")
    }
}

/// Fresh in-memory service holding the demo's session
async fn open_session(
    app: &AppConfig,
    initial_state: Option<State>,
) -> Result<Arc<InMemorySessionService>> {
    let service = Arc::new(InMemorySessionService::new());
    service
        .create_session(
            &app.app_name,
            &app.user_id,
            Some(app.session_id.clone()),
            initial_state,
        )
        .await?;
    info!(app = %app.app_name, user = %app.user_id, session = %app.session_id, "Session created");
    Ok(service)
}

/// Weather/time agent, one `User:` query
pub async fn run_weather_time<R: BufRead, W: Write>(
    env: &DemoEnv,
    app: &AppConfig,
    prompter: &mut Prompter<R, W>,
) -> Result<Option<String>> {
    let agent = weather_time_agent(env.models.as_ref(), Arc::clone(&env.search), &env.config)?;
    let service = open_session(app, None).await?;
    let runner = Runner::new(&app.app_name, Arc::new(agent), service);

    let Some(query) = prompter.read_line("User: ")?.filter(|q| !q.is_empty()) else {
        info!("No query given");
        return Ok(None);
    };

    let response = call_agent_async(&query, &runner, &app.user_id, &app.session_id).await?;
    prompter.println(&response)?;
    Ok(Some(response))
}

/// Plain weather agent in a `User:` loop until `exit`
pub async fn run_weather<R: BufRead, W: Write>(
    env: &DemoEnv,
    app: &AppConfig,
    prompter: &mut Prompter<R, W>,
) -> Result<()> {
    let team = WeatherTeam::assemble(env.models.as_ref(), Arc::clone(&env.search), &env.config);
    let Some(agent) = team.weather_agent else {
        error!("Weather agent is not available, nothing to run");
        return Ok(());
    };

    let service = open_session(app, None).await?;
    let runner = Runner::new(&app.app_name, agent as Arc<dyn Agent>, service);
    conversation_loop(&runner, app, prompter).await
}

/// Weather team with greeting/farewell delegation in a `User:` loop
pub async fn run_team<R: BufRead, W: Write>(
    env: &DemoEnv,
    app: &AppConfig,
    prompter: &mut Prompter<R, W>,
) -> Result<()> {
    info!("-- Testing Agent Team Delegation --");
    let team = WeatherTeam::assemble(env.models.as_ref(), Arc::clone(&env.search), &env.config);
    let Some(root) = team.root else {
        error!("Root agent not available. Cannot run the team conversation.");
        return Ok(());
    };
    info!(agent = root.name(), "Root agent");

    let service = open_session(app, None).await?;
    let runner = Runner::new(&app.app_name, root as Arc<dyn Agent>, service);
    conversation_loop(&runner, app, prompter).await?;
    info!("-- Agent Team Delegation Test Completed --");
    Ok(())
}

async fn conversation_loop<R: BufRead, W: Write>(
    runner: &Runner,
    app: &AppConfig,
    prompter: &mut Prompter<R, W>,
) -> Result<()> {
    while let Some(query) = prompter.next_query("User: ")? {
        match call_agent_async(&query, runner, &app.user_id, &app.session_id).await {
            Ok(response) => prompter.println(&response)?,
            Err(e) => error!(error = %e, "Turn failed"),
        }
    }
    Ok(())
}

/// Stateful team: a user turn, a manual switch to Fahrenheit, two scripted turns
///
/// Returns the session state at the end, or `None` when the demo did not run.
pub async fn run_stateful_team<R: BufRead, W: Write>(
    env: &DemoEnv,
    app: &AppConfig,
    prompter: &mut Prompter<R, W>,
) -> Result<Option<State>> {
    let team = StatefulTeam::assemble(env.models.as_ref(), Arc::clone(&env.search), &env.config);
    let Some(root) = team.root else {
        error!("Stateful root agent not available. Cannot run the state demonstration.");
        return Ok(None);
    };

    info!("--- New InMemorySessionService created for state demonstration ---");
    let initial_state = State::new().with(TEMPERATURE_UNIT, DEFAULT_UNIT);
    let service = open_session(app, Some(initial_state)).await?;
    let runner = Runner::new(&app.app_name, root as Arc<dyn Agent>, Arc::clone(&service) as Arc<dyn SessionService>);
    let key = SessionKey::new(&app.app_name, &app.user_id, &app.session_id);

    let Some(query) = prompter.next_query("Enter your query: ")? else {
        info!("No query given");
        return Ok(None);
    };
    let response = call_agent_async(&query, &runner, &app.user_id, &app.session_id).await?;
    prompter.println(&response)?;

    info!("--- Manually Updating State: Setting unit to Fahrenheit ---");
    match service
        .update_state(&key, State::new().with(TEMPERATURE_UNIT, FAHRENHEIT))
        .await
    {
        Ok(session) => info!(
            unit = session.state.get_str_or(TEMPERATURE_UNIT, "Not Set"),
            "Stored session state updated"
        ),
        Err(e) => error!(session = %key, error = %e, "Could not update stored session state"),
    }

    info!("Turn 2: Requesting weather in New York (expect Fahrenheit)");
    let response =
        call_agent_async("Tell me the weather in New York", &runner, &app.user_id, &app.session_id)
            .await?;
    prompter.println(&response)?;

    info!("Turn 3: Sending a greeting");
    let response = call_agent_async("Hi!", &runner, &app.user_id, &app.session_id).await?;
    prompter.println(&response)?;

    info!("--- Inspecting Final Session State ---");
    let Some(session) = service.get_session(&key).await? else {
        warn!(session = %key, "Could not retrieve final session state");
        return Ok(None);
    };
    let state = session.state;
    info!("Final Preference: {}", state.get_str_or(TEMPERATURE_UNIT, "Not Set"));
    info!(
        "Final Last Weather Report (from output_key): {}",
        state.render(LAST_WEATHER_REPORT).as_deref().unwrap_or("Not Set")
    );
    info!(
        "Final Last City Checked (by tool): {}",
        state.get_str_or(LAST_CITY_CHECKED, "Not Set")
    );
    Ok(Some(state))
}

/// Stock advisor workflow, one `User:` query
///
/// Prints the first final event, which usually comes from a research agent.
/// With `stock_summary_only` set the turn runs on until the summarizer answers.
pub async fn run_stock_advisor<R: BufRead, W: Write>(
    env: &DemoEnv,
    app: &AppConfig,
    prompter: &mut Prompter<R, W>,
) -> Result<Option<String>> {
    let advisor = StockAdvisor::assemble(env.models.as_ref(), Arc::clone(&env.search), &env.config)?;
    let service = open_session(app, None).await?;
    let runner = Runner::new(&app.app_name, advisor.root as Arc<dyn Agent>, service);

    let Some(query) = prompter.read_line("User: ")?.filter(|q| !q.is_empty()) else {
        info!("No query given");
        return Ok(None);
    };

    let response = if env.config.stock_summary_only {
        call_agent_until_author(
            &query,
            &runner,
            &app.user_id,
            &app.session_id,
            SUMMARIZER_AGENT,
        )
        .await?
    } else {
        call_agent_async(&query, &runner, &app.user_id, &app.session_id).await?
    };
    prompter.println(&response)?;
    Ok(Some(response))
}

/// Tool check without any agent: weather for an entered city, then the greeting tools
pub async fn run_lookup<R: BufRead, W: Write>(
    env: &DemoEnv,
    prompter: &mut Prompter<R, W>,
) -> Result<()> {
    let Some(city) = prompter.read_line("Enter city: ")? else {
        return Ok(());
    };

    let response = get_weather(env.search.as_ref(), &city, env.config.team_weather_results).await?;
    prompter.println(&serde_json::to_string_pretty(&response)?)?;
    prompter.println(&say_hello(Some("John")))?;
    prompter.println(&say_goodbye())?;
    Ok(())
}
