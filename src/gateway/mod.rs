pub mod http;
pub mod models;

pub use http::HttpGateway;

use async_trait::async_trait;
use thiserror::Error;

use models::{
    Acknowledgement, Counsellor, LoginResponse, Message, NewMessage, NewSession, RegisterResponse,
    Registration, Session, SessionUpdate,
};

/// A failed remote call: a non-2xx response, or a transport failure when
/// `status` is `None`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct RemoteError {
    pub status: Option<u16>,
    pub message: String,
}

impl RemoteError {
    pub fn new(status: u16, message: impl Into<String>) -> Self {
        Self {
            status: Some(status),
            message: message.into(),
        }
    }

    pub fn transport(message: impl Into<String>) -> Self {
        Self {
            status: None,
            message: message.into(),
        }
    }
}

/// Every remote operation the client consumes. Protected endpoints take the
/// bearer credential explicitly so a gateway can be shared across users.
#[async_trait]
pub trait RemoteGateway: Send + Sync {
    async fn register(&self, registration: &Registration) -> Result<RegisterResponse, RemoteError>;

    async fn confirm(&self, email: &str, code: &str) -> Result<Acknowledgement, RemoteError>;

    async fn login(&self, email: &str, password: &str) -> Result<LoginResponse, RemoteError>;

    async fn list_counsellors(&self, token: &str) -> Result<Vec<Counsellor>, RemoteError>;

    async fn list_messages(&self, token: &str, user_id: &str) -> Result<Vec<Message>, RemoteError>;

    async fn create_message(&self, token: &str, message: &NewMessage) -> Result<Message, RemoteError>;

    async fn list_sessions(&self, token: &str, customer_id: &str) -> Result<Vec<Session>, RemoteError>;

    async fn create_session(&self, token: &str, session: &NewSession) -> Result<Session, RemoteError>;

    async fn update_session(
        &self,
        token: &str,
        session_id: &str,
        update: &SessionUpdate,
    ) -> Result<Session, RemoteError>;
}
