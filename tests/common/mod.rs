#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use uuid::Uuid;
use wellness::auth::AuthSession;
use wellness::gateway::models::{
    Acknowledgement, Counsellor, LoginResponse, Message, NewMessage, NewSession, RegisterResponse,
    Registration, Session, SessionStatus, SessionUpdate,
};
use wellness::gateway::{RemoteError, RemoteGateway};

pub const VIEWER: &str = "alice@example.com";

pub fn auth() -> AuthSession {
    AuthSession::new("test-token", VIEWER)
}

pub fn at(secs: i64) -> DateTime<Utc> {
    Utc.timestamp_opt(1_714_550_400 + secs, 0).unwrap()
}

pub fn message(id: &str, sender: &str, receiver: &str, secs: i64) -> Message {
    Message {
        message_id: id.to_string(),
        sender_id: sender.to_string(),
        receiver_id: receiver.to_string(),
        content: format!("message {}", id),
        timestamp: at(secs),
    }
}

pub fn session(id: &str, customer: &str, counsellor: &str, status: SessionStatus) -> Session {
    Session {
        session_id: id.to_string(),
        customer_id: customer.to_string(),
        counsellor_id: counsellor.to_string(),
        date: "2024-05-01".to_string(),
        time: "10:00".to_string(),
        created_at: at(0),
        status,
    }
}

#[derive(Default)]
struct StubState {
    sessions: Vec<Session>,
    messages: Vec<Message>,
    counsellors: Vec<Counsellor>,
    calls: Vec<String>,
    emails: Vec<String>,
    failures: Vec<(String, RemoteError)>,
}

/// In-memory stand-in for the three services. Records every call as
/// `"METHOD /path"` and can be told to fail calls by prefix.
#[derive(Default)]
pub struct StubGateway {
    state: Mutex<StubState>,
}

impl StubGateway {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn with_sessions(self: Arc<Self>, sessions: Vec<Session>) -> Arc<Self> {
        self.state.lock().unwrap().sessions = sessions;
        self
    }

    pub fn with_messages(self: Arc<Self>, messages: Vec<Message>) -> Arc<Self> {
        self.state.lock().unwrap().messages = messages;
        self
    }

    pub fn with_counsellors(self: Arc<Self>, counsellors: Vec<Counsellor>) -> Arc<Self> {
        self.state.lock().unwrap().counsellors = counsellors;
        self
    }

    pub fn fail(&self, call_prefix: &str, status: u16, message: &str) {
        self.state
            .lock()
            .unwrap()
            .failures
            .push((call_prefix.to_string(), RemoteError::new(status, message)));
    }

    pub fn heal(&self) {
        self.state.lock().unwrap().failures.clear();
    }

    pub fn calls(&self) -> Vec<String> {
        self.state.lock().unwrap().calls.clone()
    }

    /// Emails received by `confirm` and `login`, in call order.
    pub fn emails(&self) -> Vec<String> {
        self.state.lock().unwrap().emails.clone()
    }

    pub fn sessions(&self) -> Vec<Session> {
        self.state.lock().unwrap().sessions.clone()
    }

    fn record(&self, call: String) -> Result<(), RemoteError> {
        let mut state = self.state.lock().unwrap();
        let failure = state
            .failures
            .iter()
            .find(|(prefix, _)| call.starts_with(prefix.as_str()))
            .map(|(_, err)| err.clone());
        state.calls.push(call);
        match failure {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl RemoteGateway for StubGateway {
    async fn register(&self, registration: &Registration) -> Result<RegisterResponse, RemoteError> {
        self.record("POST /register".to_string())?;
        Ok(RegisterResponse {
            message: "User registered successfully".to_string(),
            user_id: format!("sub-{}", registration.email),
            status: false,
        })
    }

    async fn confirm(&self, email: &str, _code: &str) -> Result<Acknowledgement, RemoteError> {
        self.record("POST /confirm".to_string())?;
        self.state.lock().unwrap().emails.push(email.to_string());
        Ok(Acknowledgement {
            message: "User confirmed successfully".to_string(),
        })
    }

    async fn login(&self, email: &str, _password: &str) -> Result<LoginResponse, RemoteError> {
        self.record("POST /login".to_string())?;
        self.state.lock().unwrap().emails.push(email.to_string());
        Ok(LoginResponse {
            message: "Login successful".to_string(),
            access_token: "access".to_string(),
            id_token: "id-token".to_string(),
            refresh_token: None,
            expires_in: 3600,
            token_type: "Bearer".to_string(),
        })
    }

    async fn list_counsellors(&self, _token: &str) -> Result<Vec<Counsellor>, RemoteError> {
        self.record("GET /counsellors".to_string())?;
        Ok(self.state.lock().unwrap().counsellors.clone())
    }

    async fn list_messages(&self, _token: &str, user_id: &str) -> Result<Vec<Message>, RemoteError> {
        self.record("GET /messages".to_string())?;
        let state = self.state.lock().unwrap();
        Ok(state
            .messages
            .iter()
            .filter(|m| m.sender_id == user_id || m.receiver_id == user_id)
            .cloned()
            .collect())
    }

    async fn create_message(&self, _token: &str, message: &NewMessage) -> Result<Message, RemoteError> {
        self.record("POST /messages".to_string())?;
        let mut state = self.state.lock().unwrap();
        let created = Message {
            message_id: Uuid::new_v4().to_string(),
            sender_id: message.sender_id.clone(),
            receiver_id: message.receiver_id.clone(),
            content: message.content.clone(),
            timestamp: at(10_000 + state.messages.len() as i64),
        };
        state.messages.push(created.clone());
        Ok(created)
    }

    async fn list_sessions(&self, _token: &str, customer_id: &str) -> Result<Vec<Session>, RemoteError> {
        self.record("GET /sessions".to_string())?;
        let state = self.state.lock().unwrap();
        Ok(state
            .sessions
            .iter()
            .filter(|s| s.customer_id == customer_id)
            .cloned()
            .collect())
    }

    async fn create_session(&self, _token: &str, session: &NewSession) -> Result<Session, RemoteError> {
        self.record("POST /sessions".to_string())?;
        let created = Session {
            session_id: Uuid::new_v4().to_string(),
            customer_id: session.customer_id.clone(),
            counsellor_id: session.counsellor_id.clone(),
            date: session.date.clone(),
            time: session.time.clone(),
            created_at: session.created_at,
            status: session.status,
        };
        self.state.lock().unwrap().sessions.push(created.clone());
        Ok(created)
    }

    async fn update_session(
        &self,
        _token: &str,
        session_id: &str,
        update: &SessionUpdate,
    ) -> Result<Session, RemoteError> {
        self.record(format!("PUT /sessions/{}", session_id))?;
        let mut state = self.state.lock().unwrap();
        let target = state
            .sessions
            .iter_mut()
            .find(|s| s.session_id == session_id)
            .ok_or_else(|| RemoteError::new(404, "Session not found"))?;
        if let Some(date) = &update.date {
            target.date = date.clone();
        }
        if let Some(time) = &update.time {
            target.time = time.clone();
        }
        if let Some(status) = update.status {
            target.status = status;
        }
        Ok(target.clone())
    }
}
