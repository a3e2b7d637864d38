//! Function declarations advertised to the model

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A callable function the model may request
///
/// `parameters` is a JSON Schema object describing the arguments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionDeclaration {
    pub name: String,
    pub description: String,
    pub parameters: Value,
}

impl FunctionDeclaration {
    pub fn new(name: impl Into<String>, description: impl Into<String>, parameters: Value) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            parameters,
        }
    }
}

/// JSON Schema helpers for tool parameters
pub mod schema {
    use serde_json::{Value, json};

    /// Object schema with the given properties
    ///
    /// # Example
    ///
    /// ```
    /// use agent_llm::tools::schema;
    /// use serde_json::json;
    ///
    /// let params = schema::object(
    ///     json!({ "city": schema::string("The name of the city") }),
    ///     &["city"],
    /// );
    /// assert_eq!(params["required"][0], "city");
    /// ```
    pub fn object(properties: Value, required: &[&str]) -> Value {
        json!({
            "type": "object",
            "properties": properties,
            "required": required,
        })
    }

    /// Object schema without parameters
    pub fn empty() -> Value {
        object(json!({}), &[])
    }

    pub fn string(description: &str) -> Value {
        json!({
            "type": "string",
            "description": description,
        })
    }

    pub fn number(description: &str) -> Value {
        json!({
            "type": "number",
            "description": description,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_declaration() {
        let params = schema::object(json!({"city": schema::string("City name")}), &["city"]);
        let decl = FunctionDeclaration::new("get_weather", "Weather lookup", params.clone());

        assert_eq!(decl.name, "get_weather");
        assert_eq!(decl.parameters, params);
        assert_eq!(decl.parameters["properties"]["city"]["type"], "string");
    }

    #[test]
    fn test_empty_schema() {
        let params = schema::empty();
        assert_eq!(params["type"], "object");
        assert_eq!(params["required"], json!([]));
        assert_eq!(schema::number("celsius")["type"], "number");
    }
}
