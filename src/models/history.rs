use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Role of an entry in the server-side conversation log
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum HistoryRole {
    User,
    Assistant,
    Tool,
}

/// One entry of a past conversation, as returned by the sessions endpoint
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HistoryEntry {
    pub role: HistoryRole,
    #[serde(default)]
    pub content: String,
    /// Unix timestamp in seconds
    pub created_at: i64,
}

impl HistoryEntry {
    pub fn new(role: HistoryRole, content: impl Into<String>, created_at: i64) -> Self {
        Self {
            role,
            content: content.into(),
            created_at,
        }
    }

    /// Creation time as a UTC timestamp; out-of-range values fall back to now
    pub fn timestamp(&self) -> DateTime<Utc> {
        DateTime::from_timestamp(self.created_at, 0).unwrap_or_else(Utc::now)
    }
}

/// Envelope of `GET /sessions/{id}`
#[derive(Debug, Clone, Deserialize)]
pub struct HistoryResponse {
    pub success: bool,
    #[serde(default)]
    pub data: Option<HistoryData>,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HistoryData {
    #[serde(default)]
    pub history: Vec<HistoryEntry>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_history_response() {
        let json = r#"{
            "success": true,
            "data": {"history": [
                {"role": "user", "content": "hi", "created_at": 1700000000},
                {"role": "tool", "content": "search(q=x) completed in 0.1s.", "created_at": 1700000001},
                {"role": "assistant", "content": "hello", "created_at": 1700000002}
            ]}
        }"#;
        let response: HistoryResponse = serde_json::from_str(json).unwrap();
        assert!(response.success);
        let history = response.data.unwrap().history;
        assert_eq!(history.len(), 3);
        assert_eq!(history[1].role, HistoryRole::Tool);
    }

    #[test]
    fn test_failed_response_without_data() {
        let json = r#"{"success": false, "message": "session not found"}"#;
        let response: HistoryResponse = serde_json::from_str(json).unwrap();
        assert!(!response.success);
        assert!(response.data.is_none());
        assert_eq!(response.message.as_deref(), Some("session not found"));
    }

    #[test]
    fn test_timestamp_conversion() {
        let entry = HistoryEntry::new(HistoryRole::User, "x", 1_700_000_000);
        assert_eq!(entry.timestamp().timestamp(), 1_700_000_000);
    }
}
