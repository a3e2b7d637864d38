//! Sequential composition

use agent_core::{Agent, InvocationContext, Result};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::info;

/// Runs its sub-agents one after another in the same invocation
///
/// # Example
///
/// ```no_run
/// use agent_workflow::{ParallelAgent, SequentialAgent};
/// use agent_core::Agent;
/// use std::sync::Arc;
///
/// # fn example(price: Arc<dyn Agent>, peers: Arc<dyn Agent>, summary: Arc<dyn Agent>) -> agent_core::Result<()> {
/// let research = ParallelAgent::builder("ParallelAgent")
///     .add_agent(price)
///     .add_agent(peers)
///     .build()?;
///
/// let workflow = SequentialAgent::builder("StockAdvisorWorkflow")
///     .add_agent(Arc::new(research))
///     .add_agent(summary)
///     .build()?;
/// # Ok(())
/// # }
/// ```
pub struct SequentialAgent {
    name: String,
    description: String,
    sub_agents: Vec<Arc<dyn Agent>>,
}

impl SequentialAgent {
    pub fn builder(name: impl Into<String>) -> SequentialAgentBuilder {
        SequentialAgentBuilder::new(name)
    }
}

#[async_trait]
impl Agent for SequentialAgent {
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
        for (index, agent) in self.sub_agents.iter().enumerate() {
            info!(
                workflow = %self.name,
                step = index + 1,
                total = self.sub_agents.len(),
                agent = agent.name(),
                "Running workflow step"
            );
            agent.run(ctx).await?;
        }
        Ok(())
    }
}

/// Builder for [`SequentialAgent`]
pub struct SequentialAgentBuilder {
    name: String,
    description: String,
    sub_agents: Vec<Arc<dyn Agent>>,
}

impl SequentialAgentBuilder {
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

    /// Append a step
    pub fn add_agent(mut self, agent: Arc<dyn Agent>) -> Self {
        self.sub_agents.push(agent);
        self
    }

    pub fn build(self) -> Result<SequentialAgent> {
        crate::validate_sub_agents(&self.name, &self.sub_agents)?;
        Ok(SequentialAgent {
            name: self.name,
            description: self.description,
            sub_agents: self.sub_agents,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use agent_core::{Content, Event, SessionKey, SessionService, State};
    use agent_llm::ScriptedLlm;
    use agent_runtime::{InMemorySessionService, LlmAgent, Runner};
    use futures::StreamExt;

    fn text_agent(name: &str, instruction: &str, reply: &str, output_key: &str) -> Arc<dyn Agent> {
        Arc::new(
            LlmAgent::builder(name)
                .model(Arc::new(ScriptedLlm::new("scripted/test").then_text(reply)))
                .instruction(instruction)
                .output_key(output_key)
                .build()
                .unwrap(),
        )
    }

    #[tokio::test]
    async fn test_steps_run_in_order_and_share_state() {
        let first = text_agent("first", "Go.", "draft", "draft");
        let second_llm = Arc::new(ScriptedLlm::new("scripted/test").then_text("final"));
        let second: Arc<dyn Agent> = Arc::new(
            LlmAgent::builder("second")
                .model(second_llm.clone())
                .instruction("Improve: {draft}")
                .output_key("final")
                .build()
                .unwrap(),
        );

        let workflow = SequentialAgent::builder("pipeline")
            .add_agent(first)
            .add_agent(second)
            .build()
            .unwrap();
        assert_eq!(workflow.sub_agents().len(), 2);

        let service = Arc::new(InMemorySessionService::new());
        service
            .create_session("app", "u", Some("s".into()), None)
            .await
            .unwrap();
        let runner = Runner::new("app", Arc::new(workflow), service.clone());
        let events: Vec<Event> = runner
            .run_async("u", "s", Content::user("start"))
            .map(|e| e.unwrap())
            .collect()
            .await;

        let authors: Vec<&str> = events.iter().map(|e| e.author.as_str()).collect();
        assert_eq!(authors, vec!["first", "second"]);
        assert_eq!(
            second_llm.requests()[0].system_instruction.as_deref(),
            Some("Improve: draft")
        );

        let state: State = service
            .get_session(&SessionKey::new("app", "u", "s"))
            .await
            .unwrap()
            .unwrap()
            .state;
        assert_eq!(state.get_str("final"), Some("final"));
    }

    #[tokio::test]
    async fn test_failed_step_does_not_skip_later_steps() {
        let failing: Arc<dyn Agent> = Arc::new(
            LlmAgent::builder("failing")
                .model(Arc::new(ScriptedLlm::new("scripted/test").then_fail("backend down")))
                .build()
                .unwrap(),
        );
        let workflow = SequentialAgent::builder("pipeline")
            .add_agent(failing)
            .add_agent(text_agent("after", "Go.", "done", "after"))
            .build()
            .unwrap();

        let service = Arc::new(InMemorySessionService::new());
        service
            .create_session("app", "u", Some("s".into()), None)
            .await
            .unwrap();
        let runner = Runner::new("app", Arc::new(workflow), service);
        let events: Vec<Event> = runner
            .run_async("u", "s", Content::user("start"))
            .map(|e| e.unwrap())
            .collect()
            .await;

        assert_eq!(events.len(), 2);
        assert!(events[0].actions.escalate);
        assert_eq!(events[1].author, "after");
        assert_eq!(events[1].first_text(), Some("done"));
    }

    #[test]
    fn test_duplicate_names_rejected() {
        let result = SequentialAgent::builder("pipeline")
            .add_agent(text_agent("same", "", "a", "a"))
            .add_agent(text_agent("same", "", "b", "b"))
            .build();
        assert!(result.is_err());
    }
}
