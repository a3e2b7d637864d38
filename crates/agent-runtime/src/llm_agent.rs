//! LLM-backed agent
//!
//! [`LlmAgent`] runs the model loop for one invocation:
//! 1. Render the instruction against session state
//! 2. Call the model with the visible history and the agent's tools
//! 3. Emit the model turn; stop if it carries no function calls
//! 4. Execute the calls, emit one function response event, loop back
//!
//! Agents with sub-agents also get a `transfer_to_agent` tool. After a
//! transfer the named sub-agent continues the same invocation.

use crate::instruction::inject_state;
use crate::transfer::{TRANSFER_TOOL_NAME, TransferToAgentTool};
use agent_core::{
    Agent, Content, Error, EventActions, FunctionCall, FunctionResponse, InvocationContext,
    Part, Result, Role, USER_AUTHOR,
};
use agent_llm::{FunctionDeclaration, LlmProvider, LlmRequest};
use agent_tools::{BeforeToolCallback, Tool, ToolContext, ToolRegistry, ToolResponse};
use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, error, info, warn};

const DEFAULT_MAX_ITERATIONS: usize = 10;

/// Agent driven by a language model, tools and sub-agents
pub struct LlmAgent {
    name: String,
    description: String,
    model: Arc<dyn LlmProvider>,
    instruction: String,
    tools: ToolRegistry,
    sub_agents: Vec<Arc<dyn Agent>>,
    output_key: Option<String>,
    before_tool_callback: Option<BeforeToolCallback>,
    max_iterations: usize,
    temperature: Option<f32>,
}

impl LlmAgent {
    /// Create a new builder
    pub fn builder(name: impl Into<String>) -> LlmAgentBuilder {
        LlmAgentBuilder::new(name)
    }

    pub fn model(&self) -> &str {
        self.model.model()
    }

    pub fn instruction(&self) -> &str {
        &self.instruction
    }

    pub fn output_key(&self) -> Option<&str> {
        self.output_key.as_deref()
    }

    /// Names of the tools offered to the model, including `transfer_to_agent`
    pub fn tool_names(&self) -> Vec<String> {
        self.tools.names()
    }

    fn system_instruction(&self, ctx: &InvocationContext) -> Result<String> {
        let mut instruction = inject_state(&self.instruction, ctx.state())?;

        if !self.sub_agents.is_empty() {
            instruction.push_str(&format!(
                "\n\nYou can hand the conversation to another agent by calling `{TRANSFER_TOOL_NAME}` with its name:\n"
            ));
            for agent in &self.sub_agents {
                instruction.push_str(&format!("- {}: {}\n", agent.name(), agent.description()));
            }
        }
        Ok(instruction)
    }

    fn declarations(&self) -> Vec<FunctionDeclaration> {
        self.tools
            .list_tools()
            .iter()
            .map(|tool| FunctionDeclaration::new(tool.name(), tool.description(), tool.input_schema()))
            .collect()
    }

    /// Session history as this agent should see it
    ///
    /// User turns and this agent's own turns are kept as-is. Turns from other
    /// agents are presented as user-side context so the model does not mistake
    /// them for its own output.
    fn history(&self, ctx: &InvocationContext) -> Vec<Content> {
        ctx.session()
            .events
            .iter()
            .filter(|event| event.is_visible_from(ctx.branch()))
            .filter_map(|event| {
                let content = event.content.as_ref().filter(|c| !c.parts.is_empty())?;
                if event.author == USER_AUTHOR || event.author == self.name {
                    Some(content.clone())
                } else {
                    foreign_as_context(&event.author, content)
                }
            })
            .collect()
    }

    async fn call_tools(
        &self,
        ctx: &InvocationContext,
        calls: &[FunctionCall],
    ) -> (Vec<Part>, EventActions) {
        let mut parts = Vec::with_capacity(calls.len());
        let mut actions = EventActions::default();

        for call in calls {
            let mut tool_ctx = ToolContext::new(&self.name, &call.id, ctx.state().clone());
            tool_ctx.actions_mut().state_delta = actions.state_delta.clone();

            let response = match self.tools.get(&call.name) {
                Some(tool) => self.run_tool(tool.as_ref(), call, &mut tool_ctx).await,
                None => {
                    warn!(agent = %self.name, tool_name = %call.name, "Model called unknown tool");
                    ToolResponse::error(format!("Tool '{}' not found", call.name)).into()
                }
            };

            merge_actions(&mut actions, tool_ctx.into_actions());
            parts.push(Part::FunctionResponse(FunctionResponse {
                id: call.id.clone(),
                name: call.name.clone(),
                response,
            }));
        }

        (parts, actions)
    }

    async fn run_tool(&self, tool: &dyn Tool, call: &FunctionCall, tool_ctx: &mut ToolContext) -> Value {
        let mut args = call.args.clone();

        if let Some(callback) = &self.before_tool_callback {
            if let Some(response) = callback(tool, &mut args, tool_ctx) {
                info!(agent = %self.name, tool_name = %call.name, "Tool call answered by callback");
                return response;
            }
        }

        let input_preview: String = args.to_string().chars().take(500).collect();
        info!(
            agent = %self.name,
            tool_name = %call.name,
            tool_id = %call.id,
            input_preview = %input_preview,
            "Executing tool"
        );

        let start_time = std::time::Instant::now();
        match tool.execute(args, tool_ctx).await {
            Ok(result) => {
                let result_preview: String = result.to_string().chars().take(500).collect();
                info!(
                    tool_name = %call.name,
                    duration_ms = start_time.elapsed().as_millis() as u64,
                    result_preview = %result_preview,
                    "Tool execution succeeded"
                );
                result
            }
            Err(e) => {
                warn!(tool_name = %call.name, error = %e, "Tool execution failed");
                ToolResponse::error(e.to_string()).into()
            }
        }
    }

    async fn fail(&self, ctx: &mut InvocationContext, message: String) -> Result<()> {
        error!(agent = %self.name, error = %message, "Agent turn failed");
        let event = ctx.new_event(&self.name).with_error(message);
        ctx.emit(event).await
    }
}

#[async_trait]
impl Agent for LlmAgent {
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
        let declarations = self.declarations();

        for iteration in 1..=self.max_iterations {
            info!(
                agent = %self.name,
                iteration = iteration,
                max_iterations = self.max_iterations,
                "Agent iteration started"
            );

            let system_instruction = match self.system_instruction(ctx) {
                Ok(instruction) => instruction,
                Err(e) => return self.fail(ctx, e.to_string()).await,
            };

            let mut request = LlmRequest::builder(self.model.model())
                .contents(self.history(ctx))
                .system_instruction(system_instruction)
                .tools(declarations.clone());
            if let Some(temperature) = self.temperature {
                request = request.temperature(temperature);
            }
            let request = request.build();

            debug!(
                agent = %self.name,
                contents = request.contents.len(),
                tool_count = request.tools.len(),
                "Sending request to LLM"
            );

            let response = match self.model.generate(request).await {
                Ok(response) => response,
                Err(e) => return self.fail(ctx, e.to_string()).await,
            };

            info!(
                agent = %self.name,
                finish_reason = ?response.finish_reason,
                input_tokens = response.usage.input_tokens,
                output_tokens = response.usage.output_tokens,
                "LLM response received"
            );

            let content = response
                .content
                .unwrap_or_else(|| Content::new(Role::Model, Vec::new()));
            let calls: Vec<FunctionCall> = content.function_calls().into_iter().cloned().collect();
            let mut event = ctx.new_event(&self.name).with_content(content);

            if calls.is_empty() {
                if let (Some(key), Some(text)) = (
                    &self.output_key,
                    event.content.as_ref().and_then(Content::text),
                ) {
                    event.actions.state_delta.set(key.clone(), text);
                }
                info!(agent = %self.name, iteration = iteration, "Agent completed naturally");
                return ctx.emit(event).await;
            }

            info!(agent = %self.name, tool_count = calls.len(), "Agent requested tool use");
            ctx.emit(event).await?;

            let (parts, actions) = self.call_tools(ctx, &calls).await;
            let transfer = actions.transfer_to_agent.clone();
            let skip_summarization = actions.skip_summarization;
            let response_event = ctx
                .new_event(&self.name)
                .with_content(Content::new(Role::User, parts))
                .with_actions(actions);
            ctx.emit(response_event).await?;

            if let Some(target) = transfer {
                let Some(agent) = self.find_sub_agent(&target) else {
                    return self.fail(ctx, Error::AgentNotFound(target).to_string()).await;
                };
                info!(from = %self.name, to = %target, "Transferring invocation");
                return agent.run(ctx).await;
            }

            if skip_summarization {
                return Ok(());
            }
        }

        warn!(agent = %self.name, max_iterations = self.max_iterations, "Max iterations reached, stopping");
        self.fail(
            ctx,
            format!(
                "Max iterations ({}) reached without a final response",
                self.max_iterations
            ),
        )
        .await
    }
}

/// Other agents' turns rewritten as context for this agent
fn foreign_as_context(author: &str, content: &Content) -> Option<Content> {
    let mut pieces = Vec::new();
    for part in &content.parts {
        match part {
            Part::Text(text) if !text.trim().is_empty() => {
                pieces.push(format!("[{author}] said: {text}"));
            }
            Part::Text(_) => {}
            Part::FunctionCall(call) => pieces.push(format!(
                "[{author}] called tool `{}` with parameters: {}",
                call.name, call.args
            )),
            Part::FunctionResponse(response) => pieces.push(format!(
                "[{author}] `{}` tool returned result: {}",
                response.name, response.response
            )),
        }
    }

    if pieces.is_empty() {
        return None;
    }
    Some(Content::user(format!("For context: {}", pieces.join(" "))))
}

fn merge_actions(into: &mut EventActions, from: EventActions) {
    into.state_delta.apply_delta(&from.state_delta);
    if from.transfer_to_agent.is_some() {
        into.transfer_to_agent = from.transfer_to_agent;
    }
    into.escalate |= from.escalate;
    into.skip_summarization |= from.skip_summarization;
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Builder for [`LlmAgent`]
pub struct LlmAgentBuilder {
    name: String,
    description: String,
    model: Option<Arc<dyn LlmProvider>>,
    instruction: String,
    tools: Vec<Arc<dyn Tool>>,
    sub_agents: Vec<Arc<dyn Agent>>,
    output_key: Option<String>,
    before_tool_callback: Option<BeforeToolCallback>,
    max_iterations: usize,
    temperature: Option<f32>,
}

impl LlmAgentBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            model: None,
            instruction: String::new(),
            tools: Vec::new(),
            sub_agents: Vec::new(),
            output_key: None,
            before_tool_callback: None,
            max_iterations: DEFAULT_MAX_ITERATIONS,
            temperature: None,
        }
    }

    pub fn model(mut self, model: Arc<dyn LlmProvider>) -> Self {
        self.model = Some(model);
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn instruction(mut self, instruction: impl Into<String>) -> Self {
        self.instruction = instruction.into();
        self
    }

    pub fn tool(mut self, tool: Arc<dyn Tool>) -> Self {
        self.tools.push(tool);
        self
    }

    pub fn tools(mut self, tools: impl IntoIterator<Item = Arc<dyn Tool>>) -> Self {
        self.tools.extend(tools);
        self
    }

    pub fn sub_agent(mut self, agent: Arc<dyn Agent>) -> Self {
        self.sub_agents.push(agent);
        self
    }

    /// Save the final response text to this state key
    pub fn output_key(mut self, key: impl Into<String>) -> Self {
        self.output_key = Some(key.into());
        self
    }

    pub fn before_tool_callback(mut self, callback: BeforeToolCallback) -> Self {
        self.before_tool_callback = Some(callback);
        self
    }

    pub fn max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    pub fn temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    pub fn build(self) -> Result<LlmAgent> {
        if !is_identifier(&self.name) {
            return Err(Error::InitializationFailed(format!(
                "Agent name '{}' must be an identifier",
                self.name
            )));
        }
        if self.name == USER_AUTHOR {
            return Err(Error::InitializationFailed(
                "Agent name 'user' is reserved".to_string(),
            ));
        }
        let model = self.model.ok_or_else(|| {
            Error::InitializationFailed(format!("Agent '{}' requires a model", self.name))
        })?;
        if self.max_iterations == 0 {
            return Err(Error::InitializationFailed(
                "max_iterations must be at least 1".to_string(),
            ));
        }

        let mut seen = HashSet::new();
        for agent in &self.sub_agents {
            if !seen.insert(agent.name().to_string()) || agent.name() == self.name {
                return Err(Error::InitializationFailed(format!(
                    "Duplicate agent name '{}' under '{}'",
                    agent.name(),
                    self.name
                )));
            }
        }

        let tools = ToolRegistry::new();
        for tool in self.tools {
            if tool.name() == TRANSFER_TOOL_NAME {
                return Err(Error::InitializationFailed(format!(
                    "Tool name '{TRANSFER_TOOL_NAME}' is reserved"
                )));
            }
            tools.register(tool);
        }
        if !self.sub_agents.is_empty() {
            let targets = self.sub_agents.iter().map(|a| a.name().to_string()).collect();
            tools.register(Arc::new(TransferToAgentTool::new(targets)));
        }

        info!(
            agent = %self.name,
            model = model.model(),
            tool_count = tools.len(),
            sub_agents = self.sub_agents.len(),
            "LlmAgent created"
        );

        Ok(LlmAgent {
            name: self.name,
            description: self.description,
            model,
            instruction: self.instruction,
            tools,
            sub_agents: self.sub_agents,
            output_key: self.output_key,
            before_tool_callback: self.before_tool_callback,
            max_iterations: self.max_iterations,
            temperature: self.temperature,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{InMemorySessionService, Runner};
    use agent_core::{Event, SessionKey, SessionService, State};
    use agent_llm::ScriptedLlm;
    use agent_tools::FunctionTool;
    use futures::StreamExt;
    use serde_json::json;

    const APP: &str = "test_app";
    const USER: &str = "user_1";
    const SESSION: &str = "session_1";

    async fn service_with(state: State) -> Arc<InMemorySessionService> {
        let service = Arc::new(InMemorySessionService::new());
        service
            .create_session(APP, USER, Some(SESSION.into()), Some(state))
            .await
            .unwrap();
        service
    }

    async fn run_turn(
        agent: Arc<dyn Agent>,
        service: &Arc<InMemorySessionService>,
        text: &str,
    ) -> Vec<Event> {
        let runner = Runner::new(APP, agent, service.clone());
        runner
            .run_async(USER, SESSION, Content::user(text))
            .map(|item| item.unwrap())
            .collect()
            .await
    }

    async fn stored_state(service: &Arc<InMemorySessionService>) -> State {
        service
            .get_session(&SessionKey::new(APP, USER, SESSION))
            .await
            .unwrap()
            .unwrap()
            .state
    }

    fn city_tool() -> Arc<dyn Tool> {
        Arc::new(FunctionTool::new(
            "get_weather",
            "Weather for a city",
            json!({"type": "object"}),
            |args, ctx| {
                let city = agent_tools::required_str(args, "city")?;
                ctx.set("last_city", city);
                Ok(ToolResponse::report(format!("Sunny in {city}")).into())
            },
        ))
    }

    #[tokio::test]
    async fn test_text_response_with_output_key() {
        let llm = Arc::new(ScriptedLlm::new("scripted/test").then_text("It is sunny."));
        let agent = LlmAgent::builder("weather_agent")
            .model(llm.clone())
            .instruction("Answer weather questions.")
            .output_key("last_weather_report")
            .build()
            .unwrap();

        let service = service_with(State::new()).await;
        let events = run_turn(Arc::new(agent), &service, "Weather?").await;

        assert_eq!(events.len(), 1);
        assert!(events[0].is_final_response());
        assert_eq!(events[0].first_text(), Some("It is sunny."));
        assert_eq!(
            stored_state(&service).await.get_str("last_weather_report"),
            Some("It is sunny.")
        );

        let requests = llm.requests();
        assert_eq!(requests[0].system_instruction.as_deref(), Some("Answer weather questions."));
        assert_eq!(requests[0].contents.len(), 1);
        assert!(requests[0].tools.is_empty());
    }

    #[tokio::test]
    async fn test_tool_loop_applies_state_delta() {
        let llm = Arc::new(
            ScriptedLlm::new("scripted/test")
                .then_call("get_weather", json!({"city": "Paris"}))
                .then_text("Paris is sunny."),
        );
        let agent = LlmAgent::builder("weather_agent")
            .model(llm.clone())
            .tool(city_tool())
            .build()
            .unwrap();

        let service = service_with(State::new()).await;
        let events = run_turn(Arc::new(agent), &service, "Weather in Paris?").await;

        let kinds: Vec<&str> = events.iter().map(Event::kind).collect();
        assert_eq!(kinds, vec!["function_call", "function_response", "text"]);
        assert!(!events[0].is_final_response());
        assert!(!events[1].is_final_response());
        assert!(events[2].is_final_response());

        let response = &events[1].function_responses()[0].response;
        assert_eq!(response["report"], "Sunny in Paris");
        assert_eq!(stored_state(&service).await.get_str("last_city"), Some("Paris"));

        // second model call sees the call and its response
        let second = &llm.requests()[1];
        assert_eq!(second.contents.len(), 3);
        assert_eq!(second.contents[2].function_responses()[0].name, "get_weather");
        assert_eq!(second.tools[0].name, "get_weather");
    }

    #[tokio::test]
    async fn test_unknown_tool_and_tool_error_become_error_responses() {
        let llm = Arc::new(
            ScriptedLlm::new("scripted/test")
                .then_call("no_such_tool", json!({}))
                .then_call("get_weather", json!({}))
                .then_text("Sorry."),
        );
        let agent = LlmAgent::builder("weather_agent")
            .model(llm)
            .tool(city_tool())
            .build()
            .unwrap();

        let service = service_with(State::new()).await;
        let events = run_turn(Arc::new(agent), &service, "Weather?").await;

        assert_eq!(events.len(), 5);
        assert_eq!(events[1].function_responses()[0].response["status"], "error");
        let second_error = &events[3].function_responses()[0].response;
        assert_eq!(second_error["status"], "error");
        assert!(second_error["error_message"].as_str().unwrap().contains("city"));
        assert_eq!(events[4].first_text(), Some("Sorry."));
    }

    #[tokio::test]
    async fn test_provider_failure_escalates() {
        let llm = Arc::new(ScriptedLlm::new("scripted/test").then_fail("connection refused"));
        let agent = LlmAgent::builder("weather_agent").model(llm).build().unwrap();

        let service = service_with(State::new()).await;
        let events = run_turn(Arc::new(agent), &service, "Hi").await;

        assert_eq!(events.len(), 1);
        assert!(events[0].is_final_response());
        assert!(events[0].actions.escalate);
        assert!(events[0].content.is_none());
        assert!(
            events[0]
                .error_message
                .as_deref()
                .unwrap()
                .contains("connection refused")
        );
    }

    #[tokio::test]
    async fn test_instruction_templating_and_missing_key() {
        let llm = Arc::new(ScriptedLlm::new("scripted/test").then_text("ok"));
        let agent = LlmAgent::builder("summarizer")
            .model(llm.clone())
            .instruction("Price: {stock_price}. News: {company_news?}.")
            .build()
            .unwrap();
        let agent: Arc<dyn Agent> = Arc::new(agent);

        let service = service_with(State::new().with("stock_price", "AAPL 190")).await;
        run_turn(agent.clone(), &service, "Summarize").await;
        assert_eq!(
            llm.requests()[0].system_instruction.as_deref(),
            Some("Price: AAPL 190. News: .")
        );

        let empty = service_with(State::new()).await;
        let events = run_turn(agent, &empty, "Summarize").await;
        assert_eq!(events.len(), 1);
        assert!(
            events[0]
                .error_message
                .as_deref()
                .unwrap()
                .contains("stock_price")
        );
    }

    #[tokio::test]
    async fn test_max_iterations() {
        let llm = Arc::new(
            ScriptedLlm::new("scripted/test")
                .then_call("get_weather", json!({"city": "A"}))
                .then_call("get_weather", json!({"city": "B"})),
        );
        let agent = LlmAgent::builder("looping_agent")
            .model(llm)
            .tool(city_tool())
            .max_iterations(2)
            .build()
            .unwrap();

        let service = service_with(State::new()).await;
        let events = run_turn(Arc::new(agent), &service, "Loop").await;

        assert_eq!(events.len(), 5);
        let last = events.last().unwrap();
        assert!(last.actions.escalate);
        assert!(last.error_message.as_deref().unwrap().contains("Max iterations (2)"));
    }

    #[tokio::test]
    async fn test_transfer_to_sub_agent() {
        let greeting_llm = Arc::new(ScriptedLlm::new("scripted/greeting").then_text("Hello there!"));
        let greeting = LlmAgent::builder("greeting_agent")
            .model(greeting_llm.clone())
            .description("Handles simple greetings and hellos")
            .build()
            .unwrap();

        let root_llm = Arc::new(
            ScriptedLlm::new("scripted/root")
                .then_call(TRANSFER_TOOL_NAME, json!({"agent_name": "greeting_agent"})),
        );
        let root = LlmAgent::builder("weather_agent")
            .model(root_llm.clone())
            .instruction("You are the main weather agent.")
            .sub_agent(Arc::new(greeting))
            .build()
            .unwrap();
        assert!(root.tool_names().contains(&TRANSFER_TOOL_NAME.to_string()));

        let service = service_with(State::new()).await;
        let events = run_turn(Arc::new(root), &service, "Hi!").await;

        let authors: Vec<&str> = events.iter().map(|e| e.author.as_str()).collect();
        assert_eq!(authors, vec!["weather_agent", "weather_agent", "greeting_agent"]);
        assert_eq!(
            events[1].actions.transfer_to_agent.as_deref(),
            Some("greeting_agent")
        );
        assert_eq!(events[2].first_text(), Some("Hello there!"));

        let root_instruction = root_llm.requests()[0].system_instruction.clone().unwrap();
        assert!(root_instruction.contains("- greeting_agent: Handles simple greetings and hellos"));

        let greeting_request = &greeting_llm.requests()[0];
        assert_eq!(greeting_request.contents[0].first_text(), Some("Hi!"));
        assert!(
            greeting_request.contents[1]
                .first_text()
                .unwrap()
                .starts_with("For context: [weather_agent] called tool `transfer_to_agent`")
        );
    }

    #[tokio::test]
    async fn test_before_tool_callback_rewrites_and_short_circuits() {
        let callback: BeforeToolCallback = Arc::new(
            |tool: &dyn Tool, args: &mut Value, _ctx: &ToolContext| -> Option<Value> {
                if tool.name() == "get_weather" {
                    args["city"] = json!("Rewritten");
                    None
                } else {
                    Some(json!({"status": "success", "report": "blocked"}))
                }
            },
        );
        let goodbye: Arc<dyn Tool> = Arc::new(FunctionTool::new(
            "say_goodbye",
            "",
            json!({}),
            |_, _| Ok(ToolResponse::report("Goodbye! Have a great day!").into()),
        ));

        let llm = Arc::new(
            ScriptedLlm::new("scripted/test")
                .then_call("get_weather", json!({"city": "Paris"}))
                .then_call("say_goodbye", json!({}))
                .then_text("done"),
        );
        let agent = LlmAgent::builder("agent")
            .model(llm)
            .tools(vec![city_tool(), goodbye])
            .before_tool_callback(callback)
            .build()
            .unwrap();

        let service = service_with(State::new()).await;
        let events = run_turn(Arc::new(agent), &service, "go").await;

        assert_eq!(
            events[1].function_responses()[0].response["report"],
            "Sunny in Rewritten"
        );
        assert_eq!(events[3].function_responses()[0].response["report"], "blocked");
    }

    #[test]
    fn test_builder_validation() {
        let llm: Arc<dyn LlmProvider> = Arc::new(ScriptedLlm::new("scripted/test"));

        assert!(LlmAgent::builder("no_model").build().is_err());
        assert!(LlmAgent::builder("bad name").model(llm.clone()).build().is_err());
        assert!(LlmAgent::builder("user").model(llm.clone()).build().is_err());

        let child = || -> Arc<dyn Agent> {
            Arc::new(
                LlmAgent::builder("child")
                    .model(Arc::new(ScriptedLlm::new("scripted/child")))
                    .build()
                    .unwrap(),
            )
        };
        let dup = LlmAgent::builder("parent")
            .model(llm.clone())
            .sub_agent(child())
            .sub_agent(child())
            .build();
        assert!(matches!(dup, Err(Error::InitializationFailed(_))));

        let ok = LlmAgent::builder("weather_agent_v1")
            .model(llm)
            .description("Weather")
            .build()
            .unwrap();
        assert_eq!(ok.name(), "weather_agent_v1");
        assert_eq!(ok.model(), "scripted/test");
        assert!(ok.tool_names().is_empty());
    }

    #[test]
    fn test_foreign_content_rewrite() {
        let content = Content::model("Hello!");
        let rewritten = foreign_as_context("greeting_agent", &content).unwrap();
        assert_eq!(rewritten.role, Role::User);
        assert_eq!(
            rewritten.first_text(),
            Some("For context: [greeting_agent] said: Hello!")
        );
        assert!(foreign_as_context("x", &Content::model("  ")).is_none());
    }
}
