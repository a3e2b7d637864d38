//! Demo tools
//!
//! Every tool answers with the status mapping of [`agent_tools::ToolResponse`]
//! except the greeting/farewell tools, which return `{"result": "<text>"}`,
//! and the raw web search tool.

pub mod basic;
pub mod callbacks;
pub mod search_tool;
pub mod stateful;
pub mod weather;

pub use basic::{
    current_time_at, current_time_tool, get_current_time, say_goodbye, say_goodbye_tool,
    say_hello, say_hello_tool, to_fahrenheit,
};
pub use callbacks::{add_todays_date_to_search, todays_date_callback};
pub use search_tool::{DuckDuckGoSearchTool, SEARCH_TOOL_NAME};
pub use stateful::{StatefulWeatherTool, format_stateful_report, get_weather_stateful};
pub use weather::{WeatherMockTool, WeatherTool, get_weather, get_weather_mock, normalize_city};
