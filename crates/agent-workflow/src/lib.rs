//! Multi-agent composition for the agent demos
//!
//! Workflow agents have no model of their own. They run their sub-agents in a
//! fixed pattern inside the same invocation, so every sub-agent shares the
//! session and sees the state its predecessors wrote.

pub mod parallel;
pub mod sequential;

pub use parallel::{ParallelAgent, ParallelAgentBuilder};
pub use sequential::{SequentialAgent, SequentialAgentBuilder};

use agent_core::{Agent, Error, Result};
use std::collections::HashSet;
use std::sync::Arc;

/// Reject empty or duplicate sub-agent names
fn validate_sub_agents(parent: &str, agents: &[Arc<dyn Agent>]) -> Result<()> {
    if parent.trim().is_empty() {
        return Err(Error::InitializationFailed(
            "Workflow agent name must not be empty".to_string(),
        ));
    }
    let mut seen = HashSet::new();
    for agent in agents {
        if !seen.insert(agent.name()) || agent.name() == parent {
            return Err(Error::InitializationFailed(format!(
                "Duplicate agent name '{}' under '{parent}'",
                agent.name()
            )));
        }
    }
    Ok(())
}
