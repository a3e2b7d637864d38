//! Agent definitions for each demo
//!
//! Constructors take a [`ModelSource`](crate::models::ModelSource) so the same
//! definitions run against real backends or canned scripts.

pub mod stateful_team;
pub mod stock_advisor;
pub mod team;
pub mod weather_time;

pub use stateful_team::StatefulTeam;
pub use stock_advisor::StockAdvisor;
pub use team::WeatherTeam;
pub use weather_time::weather_time_agent;

use crate::error::Result;
use agent_runtime::LlmAgent;
use std::sync::Arc;
use tracing::{error, info};

/// Keep a successfully built agent, log and drop a failed one
fn log_built(result: Result<LlmAgent>, name: &str) -> Option<Arc<LlmAgent>> {
    match result {
        Ok(agent) => {
            info!(agent = name, model = agent.model(), "Agent created");
            Some(Arc::new(agent))
        }
        Err(e) => {
            error!(agent = name, error = %e, "Failed to create agent");
            None
        }
    }
}
