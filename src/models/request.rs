use serde::{Deserialize, Serialize};

/// Request body for starting an agent run
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RunRequest {
    /// The user's message text
    pub message: String,
    /// Persistent anonymous user identifier
    pub user_id: String,
    /// Session to continue - None starts a new conversation
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
}

impl RunRequest {
    /// Create a RunRequest for a new conversation
    pub fn new(message: impl Into<String>, user_id: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            user_id: user_id.into(),
            session_id: None,
        }
    }

    /// Continue an existing session
    pub fn with_session(mut self, session_id: Option<String>) -> Self {
        self.session_id = session_id.filter(|s| !s.is_empty());
        self
    }

    /// Encode as `application/x-www-form-urlencoded`
    pub fn to_form_body(&self) -> String {
        let mut pairs = vec![
            ("message", self.message.as_str()),
            ("user_id", self.user_id.as_str()),
        ];
        if let Some(session_id) = &self.session_id {
            pairs.push(("session_id", session_id.as_str()));
        }
        pairs
            .into_iter()
            .map(|(k, v)| format!("{}={}", k, urlencoding::encode(v)))
            .collect::<Vec<_>>()
            .join("&")
    }
}
