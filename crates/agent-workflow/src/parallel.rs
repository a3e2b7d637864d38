//! Parallel composition

use agent_core::{Agent, InvocationContext, Result};
use async_trait::async_trait;
use futures::future::join_all;
use std::sync::Arc;
use tracing::{info, warn};

/// Runs its sub-agents concurrently, each on its own branch
///
/// A child runs on branch `{parent}.{child}` (nested under the current branch
/// if there is one), so siblings do not see each other's conversation. State
/// deltas still land in the shared session; once every child has finished the
/// session is reloaded so later agents see all of them. If several children
/// fail, the first error in declaration order is returned.
pub struct ParallelAgent {
    name: String,
    description: String,
    sub_agents: Vec<Arc<dyn Agent>>,
}

impl ParallelAgent {
    pub fn builder(name: impl Into<String>) -> ParallelAgentBuilder {
        ParallelAgentBuilder::new(name)
    }
}

#[async_trait]
impl Agent for ParallelAgent {
    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn sub_agents(&self) -> &[Arc<dyn Agent>] {
        &self.sub_agents
    }

    async fn run(&self, ctx: &mut InvocationContext) -> Result<()> {
        info!(
            workflow = %self.name,
            branches = self.sub_agents.len(),
            "Starting parallel agents"
        );

        let mut forks: Vec<InvocationContext> = self
            .sub_agents
            .iter()
            .map(|agent| ctx.fork_branch(&self.name, agent.name()))
            .collect();

        let results = join_all(
            self.sub_agents
                .iter()
                .zip(forks.iter_mut())
                .map(|(agent, fork)| agent.run(fork)),
        )
        .await;

        ctx.refresh_session().await?;

        let mut first_error = None;
        for (agent, result) in self.sub_agents.iter().zip(results) {
            if let Err(e) = result {
                warn!(workflow = %self.name, agent = agent.name(), error = %e, "Parallel branch failed");
                first_error.get_or_insert(e);
            }
        }

        match first_error {
            Some(e) => Err(e),
            None => {
                info!(workflow = %self.name, "All parallel agents finished");
                Ok(())
            }
        }
    }
}

/// Builder for [`ParallelAgent`]
pub struct ParallelAgentBuilder {
    name: String,
    description: String,
    sub_agents: Vec<Arc<dyn Agent>>,
}

impl ParallelAgentBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            sub_agents: Vec::new(),
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn add_agent(mut self, agent: Arc<dyn Agent>) -> Self {
        self.sub_agents.push(agent);
        self
    }

    pub fn build(self) -> Result<ParallelAgent> {
        crate::validate_sub_agents(&self.name, &self.sub_agents)?;
        Ok(ParallelAgent {
            name: self.name,
            description: self.description,
            sub_agents: self.sub_agents,
        })
    }
}
