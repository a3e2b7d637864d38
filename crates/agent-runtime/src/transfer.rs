//! `transfer_to_agent` tool given to agents that have sub-agents

use agent_core::Result;
use agent_tools::{Tool, ToolContext, ToolResponse, required_str};
use async_trait::async_trait;
use serde_json::{Value, json};
use tracing::info;

pub const TRANSFER_TOOL_NAME: &str = "transfer_to_agent";

/// Records a hand-off to one of the known agents
///
/// The transfer itself happens after the function response event is emitted;
/// the tool only validates the name and sets `actions.transfer_to_agent`.
pub struct TransferToAgentTool {
    targets: Vec<String>,
}

impl TransferToAgentTool {
    pub fn new(targets: Vec<String>) -> Self {
        Self { targets }
    }
}

#[async_trait]
impl Tool for TransferToAgentTool {
    async fn execute(&self, args: Value, ctx: &mut ToolContext) -> Result<Value> {
        let agent_name = required_str(&args, "agent_name")?;
        if !self.targets.iter().any(|t| t == agent_name) {
            return Ok(ToolResponse::error(format!(
                "Unknown agent '{agent_name}'. Available agents: {}",
                self.targets.join(", ")
            ))
            .into());
        }

        info!(from = ctx.agent_name(), to = agent_name, "Transfer requested");
        ctx.actions_mut().transfer_to_agent = Some(agent_name.to_string());
        Ok(ToolResponse::result(format!("Transferred to {agent_name}")).into())
    }

    fn name(&self) -> &str {
        TRANSFER_TOOL_NAME
    }

    fn description(&self) -> &str {
        "Transfer the question to another agent. Use it when another agent's description fits the request better than yours."
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "agent_name": {
                    "type": "string",
                    "description": "Name of the agent to transfer to",
                    "enum": self.targets,
                }
            },
            "required": ["agent_name"],
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use agent_core::State;

    fn tool() -> TransferToAgentTool {
        TransferToAgentTool::new(vec!["greeting_agent".into(), "farewell_agent".into()])
    }

    #[tokio::test]
    async fn test_known_target_sets_action() {
        let mut ctx = ToolContext::new("weather_agent", "call_1", State::new());
        let out = tool()
            .execute(json!({"agent_name": "farewell_agent"}), &mut ctx)
            .await
            .unwrap();

        assert_eq!(out["status"], "success");
        assert_eq!(
            ctx.actions().transfer_to_agent.as_deref(),
            Some("farewell_agent")
        );
    }

    #[tokio::test]
    async fn test_unknown_target_is_error_response() {
        let mut ctx = ToolContext::new("weather_agent", "call_1", State::new());
        let out = tool()
            .execute(json!({"agent_name": "stock_agent"}), &mut ctx)
            .await
            .unwrap();

        assert_eq!(out["status"], "error");
        assert!(ctx.actions().transfer_to_agent.is_none());
    }

    #[test]
    fn test_schema_lists_targets() {
        let schema = tool().input_schema();
        assert_eq!(
            schema["properties"]["agent_name"]["enum"],
            json!(["greeting_agent", "farewell_agent"])
        );
    }
}
