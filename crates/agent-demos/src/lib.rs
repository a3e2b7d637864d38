//! Weather, time and stock advisor demos
//!
//! This crate wires the agent framework crates into runnable demos:
//!
//! - Helper tools: temperature conversion, mock and search-backed weather,
//!   current time, greetings and farewells
//! - A weather/time agent, a weather agent team with greeting/farewell
//!   delegation, and a state-aware variant of the team
//! - A stock advisor workflow: parallel research agents feeding a summarizer
//! - The conversation turn helper and the line prompts the demos run on
//!
//! # Example
//!
//! ```rust,ignore
//! use agent_demos::{DemoConfig, DemoEnv, demos, repl::Prompter};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let env = DemoEnv::live(DemoConfig::from_env()?)?;
//!     let mut prompter = Prompter::stdio();
//!     demos::run_team(&env, &demos::sessions::team(), &mut prompter).await?;
//!     Ok(())
//! }
//! ```

pub mod agents;
pub mod config;
pub mod conversation;
pub mod demos;
pub mod error;
pub mod models;
pub mod repl;
pub mod search;
pub mod tools;

pub use config::DemoConfig;
pub use conversation::{NO_FINAL_RESPONSE, call_agent_async, call_agent_until_author};
pub use demos::DemoEnv;
pub use error::{DemoError, Result};
pub use models::{LiteLlmModels, ModelSource, ScriptedModels};
pub use search::{DuckDuckGoSearch, SearchResult, WebSearch};

/// Session state keys shared by tools and agents
pub mod state_keys {
    /// `"Celsius"` (default) or `"Fahrenheit"`
    pub const TEMPERATURE_UNIT: &str = "user_preference_temperature_unit";
    /// Last city looked up by the stateful weather tool
    pub const LAST_CITY_CHECKED: &str = "last_city_checked_stateful";
    /// Final answer of the stateful root agent
    pub const LAST_WEATHER_REPORT: &str = "last_weather_report";

    pub const STOCK_PRICE: &str = "stock_price";
    pub const COMPETITOR_ANALYSIS: &str = "competitor_analysis";
    pub const COMPANY_NEWS: &str = "company_news";
    pub const ACQUISITION_RESEARCH: &str = "acquisition_research";
    pub const SUMMARIZER: &str = "summarizer";
}
