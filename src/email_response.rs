use chrono::{DateTime, FixedOffset};

/// Outcome reported by the API for one message.
///
/// A rejected message is still a `SendResult`: check [`SendResult::is_success`]
/// (or the error code) after every call that returned `Ok`.
#[derive(serde::Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(rename_all = "PascalCase", default)]
pub struct SendResult {
    error_code: i64,
    message: String,
    #[serde(rename = "MessageID")]
    message_id: String,
    submitted_at: String,
    to: String,
}

impl SendResult {
    /// Zero on success, otherwise the API's error code.
    pub fn error_code(&self) -> i64 {
        self.error_code
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn message_id(&self) -> &str {
        &self.message_id
    }

    pub fn submitted_at(&self) -> &str {
        &self.submitted_at
    }

    pub fn to(&self) -> &str {
        &self.to
    }

    pub fn is_success(&self) -> bool {
        self.error_code == 0
    }

    /// `SubmittedAt` as a timestamp, when present and well formed.
    pub fn submitted_at_utc(&self) -> Option<DateTime<FixedOffset>> {
        DateTime::parse_from_rfc3339(&self.submitted_at).ok()
    }
}

/// Body of an `email/batch` response.
///
/// A batch the API refuses as a whole (bad token, malformed request) is
/// answered with a single object instead of one result per message.
#[derive(serde::Deserialize, Debug)]
#[serde(untagged)]
pub enum BatchResponse {
    Results(Vec<SendResult>),
    Rejected(SendResult),
}
