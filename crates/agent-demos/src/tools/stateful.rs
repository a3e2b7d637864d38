//! Weather lookup that formats temperatures by the user's preferred unit

use crate::error::Result;
use crate::search::WebSearch;
use crate::state_keys::{LAST_CITY_CHECKED, TEMPERATURE_UNIT};
use crate::tools::basic::to_fahrenheit;
use crate::tools::weather::{city_schema, get_weather};
use agent_core::Result as AgentResult;
use agent_tools::{Tool, ToolContext, ToolResponse, required_str};
use async_trait::async_trait;
use rand::Rng;
use serde_json::Value;
use std::sync::Arc;
use tracing::info;

pub const DEFAULT_UNIT: &str = "Celsius";
pub const FAHRENHEIT: &str = "Fahrenheit";

/// Append the mock temperature to a weather condition
///
/// Only the exact preference `"Fahrenheit"` converts; any other value reports Celsius.
pub fn format_stateful_report(condition: &str, mock_temp: u32, preferred_unit: &str) -> String {
    let (value, unit) = if preferred_unit == FAHRENHEIT {
        (to_fahrenheit(f64::from(mock_temp)), "F")
    } else {
        (f64::from(mock_temp), "C")
    };
    format!("{condition}. Temperature is {value:.2}{unit}")
}

/// Weather report honouring `user_preference_temperature_unit`
///
/// On success the city is recorded under `last_city_checked_stateful`.
pub async fn get_weather_stateful(
    search: &dyn WebSearch,
    city: &str,
    ctx: &mut ToolContext,
    max_results: usize,
) -> Result<ToolResponse> {
    let mock_temp = rand::thread_rng().gen_range(0..100);
    weather_with_temperature(search, city, ctx, max_results, mock_temp).await
}

async fn weather_with_temperature(
    search: &dyn WebSearch,
    city: &str,
    ctx: &mut ToolContext,
    max_results: usize,
    mock_temp: u32,
) -> Result<ToolResponse> {
    info!(city, "--- Tool: get_weather_stateful called ---");

    let preferred_unit = ctx.get_str(TEMPERATURE_UNIT).unwrap_or(DEFAULT_UNIT).to_string();
    info!(preferred_unit = %preferred_unit, "--- Tool: Reading state '{TEMPERATURE_UNIT}' ---");

    let mut response = get_weather(search, city, max_results).await?;
    if !response.is_success() {
        return Ok(response);
    }

    let condition = response.report.take().unwrap_or_default();
    response.report = Some(format_stateful_report(&condition, mock_temp, &preferred_unit));
    info!(?response, preferred_unit = %preferred_unit, "--- Tool: Generated report ---");

    ctx.set(LAST_CITY_CHECKED, city);
    info!(city, "--- Tool: Updated state '{LAST_CITY_CHECKED}' ---");

    Ok(response)
}

/// `get_weather_stateful` as a model-callable tool
pub struct StatefulWeatherTool {
    search: Arc<dyn WebSearch>,
    max_results: usize,
}

impl StatefulWeatherTool {
    pub fn new(search: Arc<dyn WebSearch>, max_results: usize) -> Self {
        Self {
            search,
            max_results,
        }
    }
}

#[async_trait]
impl Tool for StatefulWeatherTool {
    async fn execute(&self, args: Value, ctx: &mut ToolContext) -> AgentResult<Value> {
        let city = required_str(&args, "city")?;
        let response = get_weather_stateful(self.search.as_ref(), city, ctx, self.max_results).await?;
        Ok(response.into())
    }

    fn name(&self) -> &str {
        "get_weather_stateful"
    }

    fn description(&self) -> &str {
        "Retrieves weather, converts temp unit based on session state."
    }

    fn input_schema(&self) -> Value {
        city_schema("The name of the city.")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::{MockWebSearch, SearchResult};
    use agent_core::State;
    use serde_json::json;

    fn sunny_search() -> MockWebSearch {
        let mut search = MockWebSearch::new();
        search.expect_search().returning(|_, _| {
            Ok(vec![SearchResult {
                title: "t".to_string(),
                link: "l".to_string(),
                snippet: "Sunny".to_string(),
            }])
        });
        search
    }

    #[test]
    fn test_report_unit_selection() {
        assert_eq!(format_stateful_report("Sunny", 25, "Celsius"), "Sunny. Temperature is 25.00C");
        assert_eq!(
            format_stateful_report("Sunny", 25, "Fahrenheit"),
            "Sunny. Temperature is 77.00F"
        );
        // anything but the exact preference stays Celsius
        assert_eq!(format_stateful_report("Sunny", 0, "fahrenheit"), "Sunny. Temperature is 0.00C");
        assert_eq!(format_stateful_report("Sunny", 10, "Kelvin"), "Sunny. Temperature is 10.00C");
    }

    #[tokio::test]
    async fn test_reads_preference_and_records_city() {
        let search = sunny_search();
        let state = State::new().with(TEMPERATURE_UNIT, FAHRENHEIT);
        let mut ctx = ToolContext::new("weather_agent_v4_stateful", "call_1", state);

        let response = weather_with_temperature(&search, "New York", &mut ctx, 4, 30)
            .await
            .unwrap();

        assert_eq!(response.report.as_deref(), Some("Sunny. Temperature is 86.00F"));
        assert_eq!(ctx.state_delta().get_str(LAST_CITY_CHECKED), Some("New York"));
    }

    #[tokio::test]
    async fn test_defaults_to_celsius() {
        let search = sunny_search();
        let mut ctx = ToolContext::new("agent", "call_1", State::new());

        let response = get_weather_stateful(&search, "London", &mut ctx, 4).await.unwrap();
        let report = response.report.unwrap();
        assert!(report.starts_with("Sunny. Temperature is "));
        assert!(report.ends_with('C'));

        let value: f64 = report
            .trim_start_matches("Sunny. Temperature is ")
            .trim_end_matches('C')
            .parse()
            .unwrap();
        assert!((0.0..100.0).contains(&value));
    }

    #[tokio::test]
    async fn test_error_passes_through_without_state_write() {
        let mut search = MockWebSearch::new();
        search.expect_search().returning(|_, _| Ok(Vec::new()));
        let tool = StatefulWeatherTool::new(Arc::new(search), 4);
        let mut ctx = ToolContext::new("agent", "call_1", State::new());

        let out = tool.execute(json!({"city": "nowhere"}), &mut ctx).await.unwrap();
        assert_eq!(
            out,
            json!({
                "status": "error",
                "error_message": "Failed to retrieve weather information for Nowhere."
            })
        );
        assert!(ctx.state_delta().is_empty());
    }
}
