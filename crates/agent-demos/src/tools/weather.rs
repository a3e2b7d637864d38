//! Search-backed weather lookups

use crate::error::Result;
use crate::search::WebSearch;
use agent_core::Result as AgentResult;
use agent_llm::tools::schema;
use agent_tools::{Tool, ToolContext, ToolResponse, required_str};
use async_trait::async_trait;
use serde_json::{Value, json};
use std::sync::Arc;
use tracing::{debug, info};

const NEW_YORK_REPORT: &str = "The weather in New York is sunny with a temperature of 25 degrees Celsius (77 degrees Fahrenheit)";

/// Today's local date as `YYYY-MM-DD`
pub(crate) fn today() -> String {
    chrono::Local::now().format("%Y-%m-%d").to_string()
}

/// Title-case every word of a trimmed, lowercased city name
///
/// ```
/// use agent_demos::tools::normalize_city;
///
/// assert_eq!(normalize_city("  new YORK "), "New York");
/// assert_eq!(normalize_city("saint-louis"), "Saint-Louis");
/// ```
pub fn normalize_city(city: &str) -> String {
    let mut normalized = String::with_capacity(city.len());
    let mut at_word_start = true;
    for ch in city.trim().chars() {
        if at_word_start {
            normalized.extend(ch.to_uppercase());
        } else {
            normalized.extend(ch.to_lowercase());
        }
        at_word_start = !ch.is_alphabetic();
    }
    normalized
}

/// Weather/time demo lookup: canned report for New York, raw search results otherwise
pub async fn get_weather_mock(
    search: &dyn WebSearch,
    city: &str,
    max_results: usize,
) -> Result<ToolResponse> {
    if city.eq_ignore_ascii_case("new york") {
        return Ok(ToolResponse::report(NEW_YORK_REPORT));
    }

    let query = format!("{city} weather on {}", today());
    let results = search.search(&query, max_results).await?;
    let results_json = serde_json::to_string(&results)?;
    Ok(ToolResponse::report(format!("The weather in {city} is {results_json}")))
}

/// Agent team lookup: search snippets joined into one report
pub async fn get_weather(
    search: &dyn WebSearch,
    city: &str,
    max_results: usize,
) -> Result<ToolResponse> {
    info!(city, "--- Tool: get_weather called ---");
    let city = normalize_city(city);

    let query = format!("{city} weather on {}", today());
    let results = search.search(&query, max_results).await?;
    debug!(?results, "Weather search response");

    if results.is_empty() {
        return Ok(ToolResponse::error(format!(
            "Failed to retrieve weather information for {city}."
        )));
    }

    let report = results
        .iter()
        .map(|hit| hit.snippet.as_str())
        .collect::<Vec<_>>()
        .join(", ");
    Ok(ToolResponse::report(report))
}

pub(crate) fn city_schema(description: &str) -> Value {
    schema::object(json!({"city": schema::string(description)}), &["city"])
}

/// `get_weather` tool of the weather/time agent
pub struct WeatherMockTool {
    search: Arc<dyn WebSearch>,
    max_results: usize,
}

impl WeatherMockTool {
    pub fn new(search: Arc<dyn WebSearch>, max_results: usize) -> Self {
        Self {
            search,
            max_results,
        }
    }
}

#[async_trait]
impl Tool for WeatherMockTool {
    async fn execute(&self, args: Value, _ctx: &mut ToolContext) -> AgentResult<Value> {
        let city = required_str(&args, "city")?;
        let response = get_weather_mock(self.search.as_ref(), city, self.max_results).await?;
        Ok(response.into())
    }

    fn name(&self) -> &str {
        "get_weather"
    }

    fn description(&self) -> &str {
        "Retrieves the current city weather report for a specified city."
    }

    fn input_schema(&self) -> Value {
        city_schema("The city to retrieve the weather report for.")
    }
}

/// `get_weather` tool of the weather team agents
pub struct WeatherTool {
    search: Arc<dyn WebSearch>,
    max_results: usize,
}

impl WeatherTool {
    pub fn new(search: Arc<dyn WebSearch>, max_results: usize) -> Self {
        Self {
            search,
            max_results,
        }
    }
}

#[async_trait]
impl Tool for WeatherTool {
    async fn execute(&self, args: Value, _ctx: &mut ToolContext) -> AgentResult<Value> {
        let city = required_str(&args, "city")?;
        let response = get_weather(self.search.as_ref(), city, self.max_results).await?;
        Ok(response.into())
    }

    fn name(&self) -> &str {
        "get_weather"
    }

    fn description(&self) -> &str {
        "Retrieves the weather for a given city. Returns a status of 'success' with a 'report', or 'error' with an 'error_message'."
    }

    fn input_schema(&self) -> Value {
        city_schema("The name of the city.")
    }
}
