//! Session state
//!
//! `State` is the key-value store scoped to a conversation. Tools read and
//! write it by convention-named keys, agents write their final text to it
//! through an output key, and the runner applies every event's state delta
//! to the stored session.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Key-value session state
///
/// # Example
///
/// ```
/// use agent_core::State;
///
/// let mut state = State::new().with("user_preference_temperature_unit", "Celsius");
/// assert_eq!(state.get_str("user_preference_temperature_unit"), Some("Celsius"));
///
/// state.set("user_preference_temperature_unit", "Fahrenheit");
/// assert_eq!(state.get_str_or("user_preference_temperature_unit", "Celsius"), "Fahrenheit");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct State {
    data: HashMap<String, serde_json::Value>,
}

impl State {
    /// Create an empty state
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert
    pub fn with(mut self, key: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        self.set(key, value);
        self
    }

    /// Insert or overwrite a value
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<serde_json::Value>) {
        self.data.insert(key.into(), value.into());
    }

    /// Get a raw value
    pub fn get(&self, key: &str) -> Option<&serde_json::Value> {
        self.data.get(key)
    }

    /// Get a value as a string slice, if it is a JSON string
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(|v| v.as_str())
    }

    /// Get a string value, falling back to `default` when missing or not a string
    pub fn get_str_or<'a>(&'a self, key: &str, default: &'a str) -> &'a str {
        self.get_str(key).unwrap_or(default)
    }

    /// Insert a serializable value
    pub fn set_typed<T: Serialize>(&mut self, key: impl Into<String>, value: &T) -> crate::Result<()> {
        let json_value = serde_json::to_value(value).map_err(|e| {
            crate::Error::ProcessingFailed(format!("Failed to serialize state value: {e}"))
        })?;
        self.data.insert(key.into(), json_value);
        Ok(())
    }

    /// Get a value deserialized into `T`
    pub fn get_typed<T: for<'de> Deserialize<'de>>(&self, key: &str) -> crate::Result<Option<T>> {
        match self.data.get(key) {
            None => Ok(None),
            Some(value) => {
                let typed = serde_json::from_value(value.clone()).map_err(|e| {
                    crate::Error::ProcessingFailed(format!(
                        "Failed to deserialize state value '{key}': {e}"
                    ))
                })?;
                Ok(Some(typed))
            }
        }
    }

    /// Render a value for prompt text: strings verbatim, everything else as JSON
    pub fn render(&self, key: &str) -> Option<String> {
        self.get(key).map(|value| match value {
            serde_json::Value::String(s) => s.clone(),
            other => other.to_string(),
        })
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.data.contains_key(key)
    }

    pub fn remove(&mut self, key: &str) -> Option<serde_json::Value> {
        self.data.remove(key)
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Iterate over entries
    pub fn iter(&self) -> impl Iterator<Item = (&String, &serde_json::Value)> {
        self.data.iter()
    }

    /// Apply a delta on top of this state (delta values win)
    pub fn apply_delta(&mut self, delta: &State) {
        for (key, value) in &delta.data {
            self.data.insert(key.clone(), value.clone());
        }
    }
}

impl From<HashMap<String, serde_json::Value>> for State {
    fn from(data: HashMap<String, serde_json::Value>) -> Self {
        Self { data }
    }
}

impl<K: Into<String>, V: Into<serde_json::Value>> FromIterator<(K, V)> for State {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            data: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}
