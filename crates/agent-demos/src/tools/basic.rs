//! Synchronous helper tools: greetings, farewells, temperature and time

use agent_llm::tools::schema;
use agent_tools::{FunctionTool, ToolResponse, optional_str, required_str};
use chrono::{DateTime, Utc};
use chrono_tz::America::New_York;
use serde_json::json;
use tracing::info;

/// Convert Celsius to Fahrenheit
pub fn to_fahrenheit(celsius: f64) -> f64 {
    celsius * 9.0 / 5.0 + 32.0
}

/// Friendly greeting, personalised when a non-empty name is given
pub fn say_hello(name: Option<&str>) -> String {
    match name.filter(|n| !n.is_empty()) {
        Some(name) => {
            info!(name, "--- Tool: say_hello called ---");
            format!("Hello, {name}!")
        }
        None => {
            info!("--- Tool: say_hello called without name ---");
            "Hello There!".to_string()
        }
    }
}

/// Fixed farewell message
pub fn say_goodbye() -> String {
    info!("--- Tool: say_goodbye called ---");
    "Goodbye! Have a great day!".to_string()
}

/// Current time for a city; only New York is known
pub fn get_current_time(city: &str) -> ToolResponse {
    current_time_at(city, Utc::now())
}

/// `get_current_time` evaluated at a fixed instant
pub fn current_time_at(city: &str, now: DateTime<Utc>) -> ToolResponse {
    if !city.eq_ignore_ascii_case("new york") {
        return ToolResponse::error(format!("Sorry, I don't have time information for {city}"));
    }

    let local = now.with_timezone(&New_York);
    ToolResponse::result(format!(
        "The current time in {city} is {}",
        local.format("%Y-%m-%d %H:%M:%S %Z%z")
    ))
}

/// `say_hello` as a model-callable tool
pub fn say_hello_tool() -> FunctionTool {
    FunctionTool::new(
        "say_hello",
        "Provides a simple greeting. If a name is provided, it will be used.",
        schema::object(
            json!({"name": schema::string("The name to greet. Optional.")}),
            &[],
        ),
        |args, _ctx| Ok(json!({"result": say_hello(optional_str(args, "name"))})),
    )
}

/// `say_goodbye` as a model-callable tool
pub fn say_goodbye_tool() -> FunctionTool {
    FunctionTool::new(
        "say_goodbye",
        "Provides a simple farewell message to conclude the conversation.",
        schema::empty(),
        |_args, _ctx| Ok(json!({"result": say_goodbye()})),
    )
}

/// `get_current_time` as a model-callable tool
pub fn current_time_tool() -> FunctionTool {
    FunctionTool::new(
        "get_current_time",
        "Retrieves the current time for a specified city.",
        schema::object(
            json!({"city": schema::string("The city to retrieve the current time for.")}),
            &["city"],
        ),
        |args, _ctx| Ok(get_current_time(required_str(args, "city")?).into()),
    )
}
