//! Core Agent trait definition

use crate::{InvocationContext, Result};
use async_trait::async_trait;
use std::sync::Arc;

/// Core trait that all agents must implement
///
/// An agent handles one invocation by emitting events through the context.
/// It does not return its answer; the consumer reads it from the event stream.
#[async_trait]
pub trait Agent: Send + Sync {
    /// Get the agent's name, unique within an agent tree
    fn name(&self) -> &str;

    /// One-line description other agents use to decide on transfers
    fn description(&self) -> &str {
        ""
    }

    /// Direct children of this agent
    fn sub_agents(&self) -> &[Arc<dyn Agent>] {
        &[]
    }

    /// Run the agent for the current invocation
    async fn run(&self, ctx: &mut InvocationContext) -> Result<()>;

    /// Depth-first search of the descendants for `name`
    fn find_sub_agent(&self, name: &str) -> Option<Arc<dyn Agent>> {
        for agent in self.sub_agents() {
            if agent.name() == name {
                return Some(Arc::clone(agent));
            }
            if let Some(found) = agent.find_sub_agent(name) {
                return Some(found);
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Leaf(&'static str);

    #[async_trait]
    impl Agent for Leaf {
        fn name(&self) -> &str {
            self.0
        }

        async fn run(&self, _ctx: &mut InvocationContext) -> Result<()> {
            Ok(())
        }
    }

    struct Parent {
        children: Vec<Arc<dyn Agent>>,
    }

    #[async_trait]
    impl Agent for Parent {
        fn name(&self) -> &str {
            "parent"
        }

        fn sub_agents(&self) -> &[Arc<dyn Agent>] {
            &self.children
        }

        async fn run(&self, _ctx: &mut InvocationContext) -> Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_find_sub_agent() {
        let inner = Parent {
            children: vec![Arc::new(Leaf("deep"))],
        };
        let root = Parent {
            children: vec![Arc::new(Leaf("greeting_agent")), Arc::new(inner)],
        };

        assert_eq!(
            root.find_sub_agent("greeting_agent").map(|a| a.name().to_string()),
            Some("greeting_agent".to_string())
        );
        assert!(root.find_sub_agent("deep").is_some());
        assert!(root.find_sub_agent("missing").is_none());
        assert_eq!(root.description(), "");
    }
}
