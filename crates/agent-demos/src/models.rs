//! Where demo agents get their model backends from

use agent_core::{Error, Result};
use agent_llm::{LiteLlm, LlmProvider, ScriptedLlm};
use std::collections::HashMap;
use std::sync::Arc;

/// Resolves the backend for one agent
pub trait ModelSource: Send + Sync {
    /// Backend for `agent_name`, configured with the `provider/model` string `model`
    fn model(&self, agent_name: &str, model: &str) -> Result<Arc<dyn LlmProvider>>;
}

/// Real backends: one [`LiteLlm`] per agent, configured from the environment
#[derive(Debug, Clone, Copy, Default)]
pub struct LiteLlmModels;

impl ModelSource for LiteLlmModels {
    fn model(&self, _agent_name: &str, model: &str) -> Result<Arc<dyn LlmProvider>> {
        Ok(Arc::new(LiteLlm::from_env(model)?))
    }
}

/// Canned backends keyed by agent name
#[derive(Default)]
pub struct ScriptedModels {
    scripts: HashMap<String, Arc<ScriptedLlm>>,
}

impl ScriptedModels {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the script `agent_name` will run
    pub fn with(mut self, agent_name: impl Into<String>, llm: Arc<ScriptedLlm>) -> Self {
        self.scripts.insert(agent_name.into(), llm);
        self
    }
}

impl ModelSource for ScriptedModels {
    fn model(&self, agent_name: &str, _model: &str) -> Result<Arc<dyn LlmProvider>> {
        self.scripts
            .get(agent_name)
            .map(|llm| Arc::clone(llm) as Arc<dyn LlmProvider>)
            .ok_or_else(|| {
                Error::InitializationFailed(format!("No scripted model for agent '{agent_name}'"))
            })
    }
}
