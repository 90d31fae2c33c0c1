use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A tool invocation made by the agent during one assistant turn.
///
/// Two descriptors with the same `call_id` describe the same call at different
/// lifecycle stages (started, then completed).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct ToolCall {
    /// Unique per call within a turn
    pub call_id: String,
    /// Name of the tool (e.g. "duckduckgo_search")
    pub name: String,
    /// Structured arguments the tool was called with
    #[serde(default)]
    pub arguments: Map<String, Value>,
    /// Tool output, present once the call completed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<String>,
    /// Execution time in seconds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<f64>,
}

impl ToolCall {
    /// Create a descriptor with just an id and a name
    pub fn new(call_id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            call_id: call_id.into(),
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_argument(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.arguments.insert(key.into(), value.into());
        self
    }

    pub fn with_result(mut self, result: impl Into<String>) -> Self {
        self.result = Some(result.into());
        self
    }

    pub fn with_duration(mut self, secs: f64) -> Self {
        self.duration = Some(secs);
        self
    }

    /// Merge a later descriptor for the same call into this one.
    ///
    /// Fields present on `newer` win; fields it leaves empty keep their
    /// current value, so late-arriving arguments or results never erase
    /// what an earlier event already reported.
    pub fn merge_from(&mut self, newer: ToolCall) {
        if !newer.name.is_empty() {
            self.name = newer.name;
        }
        self.arguments.extend(newer.arguments);
        if newer.result.is_some() {
            self.result = newer.result;
        }
        if newer.duration.is_some() {
            self.duration = newer.duration;
        }
    }

    /// One-line summary used by the terminal printer, e.g. `search(query="rust")`
    pub fn summary(&self) -> String {
        let args: Vec<String> = self
            .arguments
            .iter()
            .map(|(k, v)| match v {
                Value::String(s) => format!("{}=\"{}\"", k, s),
                other => format!("{}={}", k, other),
            })
            .collect();
        format!("{}({})", self.name, args.join(", "))
    }
}
