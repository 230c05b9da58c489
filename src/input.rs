use serde_json::{Map, Value};
use std::sync::LazyLock;

static EMPTY_OBJECT: LazyLock<Value> = LazyLock::new(|| Value::Object(Map::new()));

/// Input JSON from the Claude Code hook system.
///
/// Kept as a raw JSON object so handlers see every field the host sends,
/// including ones this crate does not know about. Anything that is not a
/// JSON object degrades to the empty record.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct InvocationRecord {
    fields: Map<String, Value>,
}

impl InvocationRecord {
    /// Parse raw stdin bytes. Never fails: blank, malformed or non-object
    /// input yields the empty record.
    pub fn parse(raw: &[u8]) -> Self {
        if raw.iter().all(u8::is_ascii_whitespace) {
            return Self::default();
        }

        match serde_json::from_slice::<Value>(raw) {
            Ok(Value::Object(fields)) => Self { fields },
            Ok(other) => {
                tracing::debug!(
                    kind = json_kind(&other),
                    "input is not an object, using empty record"
                );
                Self::default()
            }
            Err(err) => {
                tracing::debug!(error = %err, "input is not valid JSON, using empty record");
                Self::default()
            }
        }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// String field, or "" when absent or not a string
    fn str_field(&self, key: &str) -> &str {
        self.get(key).and_then(Value::as_str).unwrap_or("")
    }

    /// Object-ish field, or `{}` when absent
    fn value_field(&self, key: &str) -> &Value {
        match self.get(key) {
            Some(Value::Null) | None => &*EMPTY_OBJECT,
            Some(value) => value,
        }
    }

    pub fn event_name(&self) -> &str {
        self.str_field("hook_event_name")
    }

    /// Prompt text (UserPromptSubmit)
    pub fn prompt(&self) -> &str {
        self.str_field("prompt")
    }

    /// Tool name (PreToolUse/PostToolUse)
    pub fn tool_name(&self) -> &str {
        self.str_field("tool_name")
    }

    pub fn tool_input(&self) -> &Value {
        self.value_field("tool_input")
    }

    pub fn tool_response(&self) -> &Value {
        self.value_field("tool_response")
    }

    /// Notification payload; hosts send either a string or an object here.
    pub fn notification(&self) -> Option<&Value> {
        self.get("notification").filter(|v| !v.is_null())
    }

    pub fn session_id(&self) -> &str {
        self.str_field("session_id")
    }

    /// Working directory of the host session, if it sent one
    pub fn cwd(&self) -> Option<&str> {
        self.get("cwd").and_then(Value::as_str).filter(|s| !s.is_empty())
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
