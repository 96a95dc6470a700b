use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub message_id: String,
    pub sender_id: String,
    pub receiver_id: String,
    pub content: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct NewMessage {
    pub sender_id: String,
    pub receiver_id: String,
    pub content: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionStatus {
    Booked,
    Cancelled,
}

impl SessionStatus {
    pub fn label(&self) -> &'static str {
        match self {
            SessionStatus::Booked => "Booked",
            SessionStatus::Cancelled => "Cancelled",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub session_id: String,
    pub customer_id: String,
    pub counsellor_id: String,
    #[serde(rename = "date_time")]
    pub date: String,
    #[serde(rename = "session_time")]
    pub time: String,
    pub created_at: DateTime<Utc>,
    pub status: SessionStatus,
}

#[derive(Debug, Clone, Serialize)]
pub struct NewSession {
    pub customer_id: String,
    pub counsellor_id: String,
    #[serde(rename = "date_time")]
    pub date: String,
    #[serde(rename = "session_time")]
    pub time: String,
    pub created_at: DateTime<Utc>,
    pub status: SessionStatus,
}

/// Partial update for `PUT /sessions/{id}`. Absent fields are left alone.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SessionUpdate {
    #[serde(rename = "date_time", skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(rename = "session_time", skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<SessionStatus>,
}

impl SessionUpdate {
    pub fn cancel() -> Self {
        Self {
            status: Some(SessionStatus::Cancelled),
            ..Default::default()
        }
    }

    pub fn reschedule(date: impl Into<String>, time: impl Into<String>) -> Self {
        Self {
            date: Some(date.into()),
            time: Some(time.into()),
            status: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Counsellor {
    #[serde(default)]
    pub counsellor_id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub specialization: String,
    pub email: String,
}

impl Counsellor {
    /// The id used when booking or messaging; older records only carry an email.
    pub fn identity(&self) -> &str {
        self.counsellor_id.as_deref().unwrap_or(&self.email)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ProfileType {
    Customer,
    Counsellor,
}

#[derive(Debug, Clone, Serialize)]
pub struct Registration {
    pub name: String,
    pub email: String,
    pub password: String,
    pub profile_type: ProfileType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub specialization: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RegisterResponse {
    #[serde(default)]
    pub message: String,
    pub user_id: String,
    /// Whether the identity service already considers the account confirmed.
    #[serde(default)]
    pub status: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    #[serde(default)]
    pub message: String,
    pub access_token: String,
    pub id_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
    pub expires_in: u64,
    pub token_type: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Acknowledgement {
    #[serde(default)]
    pub message: String,
}

/// `{"message": ..., "data": ...}` wrapper the messaging service puts around
/// created and updated records.
#[derive(Debug, Clone, Deserialize)]
pub struct Envelope<T> {
    #[serde(default)]
    pub message: String,
    pub data: T,
}
