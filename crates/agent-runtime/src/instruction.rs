//! Instruction templating against session state
//!
//! `{key}` and `{{key}}` are replaced by the state value. A trailing `?`
//! (`{key?}`) makes the placeholder optional: a missing key renders as
//! nothing instead of failing. Braced text that is not an identifier, such as
//! a JSON example inside the instruction, is left untouched.

use agent_core::{Error, Result, State};
use regex::{Captures, Regex};

const PLACEHOLDER: &str = r"\{+[^{}]*\}+";
const STATE_KEY: &str = r"^(?:(?:app|user|temp):)?[A-Za-z_][A-Za-z0-9_]*$";

/// Render `template` with values from `state`
pub fn inject_state(template: &str, state: &State) -> Result<String> {
    let placeholder =
        Regex::new(PLACEHOLDER).map_err(|e| Error::InitializationFailed(e.to_string()))?;
    let state_key = Regex::new(STATE_KEY).map_err(|e| Error::InitializationFailed(e.to_string()))?;

    let mut missing = None;
    let rendered = placeholder.replace_all(template, |caps: &Captures<'_>| {
        let whole = &caps[0];
        let inner = whole.trim_matches(|c| c == '{' || c == '}').trim();
        let (key, optional) = match inner.strip_suffix('?') {
            Some(key) => (key, true),
            None => (inner, false),
        };

        if !state_key.is_match(key) {
            return whole.to_string();
        }

        match state.render(key) {
            Some(value) => value,
            None if optional => String::new(),
            None => {
                missing.get_or_insert_with(|| key.to_string());
                String::new()
            }
        }
    });

    match missing {
        Some(key) => Err(Error::MissingStateKey(key)),
        None => Ok(rendered.into_owned()),
    }
}
