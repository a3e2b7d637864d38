//! Tool context

use agent_core::{EventActions, State};
use serde_json::Value;

/// What a tool sees of the invocation while it runs
///
/// Reads go through the pending delta first, then the session state snapshot.
/// Writes land in the delta, which the agent attaches to the function
/// response event so the session service applies them.
#[derive(Debug, Clone)]
pub struct ToolContext {
    agent_name: String,
    function_call_id: String,
    state: State,
    actions: EventActions,
}

impl ToolContext {
    pub fn new(
        agent_name: impl Into<String>,
        function_call_id: impl Into<String>,
        state: State,
    ) -> Self {
        Self {
            agent_name: agent_name.into(),
            function_call_id: function_call_id.into(),
            state,
            actions: EventActions::default(),
        }
    }

    pub fn agent_name(&self) -> &str {
        &self.agent_name
    }

    pub fn function_call_id(&self) -> &str {
        &self.function_call_id
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.actions
            .state_delta
            .get(key)
            .or_else(|| self.state.get(key))
    }

    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(Value::as_str)
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.actions.state_delta.set(key, value);
    }

    /// Changes written by the tool so far
    pub fn state_delta(&self) -> &State {
        &self.actions.state_delta
    }

    pub fn actions(&self) -> &EventActions {
        &self.actions
    }

    pub fn actions_mut(&mut self) -> &mut EventActions {
        &mut self.actions
    }

    pub fn into_actions(self) -> EventActions {
        self.actions
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_reads_prefer_delta() {
        let state = State::new().with("user_preference_temperature_unit", "Celsius");
        let mut ctx = ToolContext::new("weather_agent", "call_1", state);

        assert_eq!(ctx.get_str("user_preference_temperature_unit"), Some("Celsius"));
        ctx.set("user_preference_temperature_unit", "Fahrenheit");
        assert_eq!(
            ctx.get_str("user_preference_temperature_unit"),
            Some("Fahrenheit")
        );
        assert_eq!(ctx.state_delta().len(), 1);
    }

    #[test]
    fn test_into_actions() {
        let mut ctx = ToolContext::new("agent", "call_2", State::new());
        ctx.set("last_city_checked_stateful", "London");
        ctx.actions_mut().skip_summarization = true;

        let actions = ctx.into_actions();
        assert!(actions.skip_summarization);
        assert_eq!(
            actions.state_delta.get("last_city_checked_stateful"),
            Some(&json!("London"))
        );
    }
}
