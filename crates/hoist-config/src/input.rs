//! Parsed invocation inputs.
//!
//! The command layer hands the orchestrator two disjoint lists of `Input`
//! records: positional `inputs` (the target application name) and named
//! `options` (config path, watch flag, and so on). Name uniqueness within a
//! list is a caller invariant and is not enforced here.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One parsed command-line argument or flag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Input {
    pub name: String,
    pub value: OptionValue,
}

impl Input {
    pub fn new(name: impl Into<String>, value: impl Into<OptionValue>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }

    /// Find the value for `name` in a list of inputs.
    ///
    /// Returns `None` both when no record carries the name and when the
    /// record exists but its value is [`OptionValue::Unset`]. An empty
    /// string is *present*: it short-circuits lower-precedence sources.
    pub fn lookup<'a>(inputs: &'a [Input], name: &str) -> Option<&'a OptionValue> {
        inputs
            .iter()
            .find(|input| input.name == name)
            .map(|input| &input.value)
            .filter(|value| !matches!(value, OptionValue::Unset))
    }
}

/// The value carried by an [`Input`].
///
/// `Unset` models an option the parser knows about but that the user did not
/// supply; it is indistinguishable from an absent record during resolution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OptionValue {
    Unset,
    Bool(bool),
    String(String),
}

impl OptionValue {
    /// Convert to a JSON value for type-erased resolution.
    pub fn to_json(&self) -> Option<Value> {
        match self {
            OptionValue::Unset => None,
            OptionValue::Bool(flag) => Some(Value::Bool(*flag)),
            OptionValue::String(text) => Some(Value::String(text.clone())),
        }
    }
}

impl From<bool> for OptionValue {
    fn from(flag: bool) -> Self {
        OptionValue::Bool(flag)
    }
}

impl From<String> for OptionValue {
    fn from(text: String) -> Self {
        OptionValue::String(text)
    }
}

impl From<&str> for OptionValue {
    fn from(text: &str) -> Self {
        OptionValue::String(text.to_string())
    }
}

impl<T: Into<OptionValue>> From<Option<T>> for OptionValue {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(OptionValue::Unset)
    }
}
