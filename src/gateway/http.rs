use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde_json::json;
use tracing::{debug, warn};

use crate::config::{HttpConfig, ServicesConfig};
use crate::gateway::{
    models::{
        Acknowledgement, Counsellor, Envelope, LoginResponse, Message, NewMessage, NewSession,
        RegisterResponse, Registration, Session, SessionUpdate,
    },
    RemoteError, RemoteGateway,
};

pub struct HttpGateway {
    client: Client,
    user_base_url: String,
    counsellor_base_url: String,
    messaging_base_url: String,
}

impl HttpGateway {
    pub fn new(services: &ServicesConfig, http: &HttpConfig) -> Result<Self, RemoteError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(http.timeout_secs))
            .build()
            .map_err(|e| RemoteError::transport(e.to_string()))?;

        Ok(Self {
            client,
            user_base_url: trim_base(&services.user_base_url),
            counsellor_base_url: trim_base(&services.counsellor_base_url),
            messaging_base_url: trim_base(&services.messaging_base_url),
        })
    }

    fn authorized(&self, req: RequestBuilder, token: &str) -> RequestBuilder {
        req.header("Authorization", format!("Bearer {}", token))
    }

    async fn send<T: DeserializeOwned>(&self, req: RequestBuilder) -> Result<T, RemoteError> {
        let response = req
            .send()
            .await
            .map_err(|e| RemoteError::transport(e.to_string()))?;

        let response = check_status(response).await?;

        response
            .json::<T>()
            .await
            .map_err(|e| RemoteError::transport(format!("Malformed response: {}", e)))
    }
}

fn trim_base(url: &str) -> String {
    url.trim_end_matches('/').to_string()
}

/// Passes 2xx responses through; everything else becomes a `RemoteError`
/// carrying the service's `error` field when the body has one.
async fn check_status(response: Response) -> Result<Response, RemoteError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let text = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<serde_json::Value>(&text)
        .ok()
        .and_then(|body| body.get("error").and_then(|e| e.as_str()).map(str::to_string))
        .unwrap_or_else(|| {
            status
                .canonical_reason()
                .map(str::to_string)
                .unwrap_or_else(|| format!("Request failed with status {}", status.as_u16()))
        });

    warn!("Remote call failed with {}: {}", status, message);
    Err(RemoteError::new(status.as_u16(), message))
}

#[async_trait]
impl RemoteGateway for HttpGateway {
    async fn register(&self, registration: &Registration) -> Result<RegisterResponse, RemoteError> {
        debug!("POST /register for {}", registration.email);
        let req = self
            .client
            .post(format!("{}/register", self.user_base_url))
            .json(registration);
        self.send(req).await
    }

    async fn confirm(&self, email: &str, code: &str) -> Result<Acknowledgement, RemoteError> {
        debug!("POST /confirm for {}", email);
        let req = self
            .client
            .post(format!("{}/confirm", self.user_base_url))
            .json(&json!({
                "email": email,
                "confirmation_code": code,
            }));
        self.send(req).await
    }

    async fn login(&self, email: &str, password: &str) -> Result<LoginResponse, RemoteError> {
        debug!("POST /login for {}", email);
        let req = self
            .client
            .post(format!("{}/login", self.user_base_url))
            .json(&json!({
                "email": email,
                "password": password,
            }));
        self.send(req).await
    }

    async fn list_counsellors(&self, token: &str) -> Result<Vec<Counsellor>, RemoteError> {
        let req = self.authorized(
            self.client.get(format!("{}/counsellors", self.counsellor_base_url)),
            token,
        );
        self.send(req).await
    }

    async fn list_messages(&self, token: &str, user_id: &str) -> Result<Vec<Message>, RemoteError> {
        let req = self.authorized(
            self.client
                .get(format!("{}/messages", self.messaging_base_url))
                .query(&[("userId", user_id)]),
            token,
        );
        self.send(req).await
    }

    async fn create_message(&self, token: &str, message: &NewMessage) -> Result<Message, RemoteError> {
        let req = self.authorized(
            self.client
                .post(format!("{}/messages", self.messaging_base_url))
                .json(message),
            token,
        );
        let envelope: Envelope<Message> = self.send(req).await?;
        Ok(envelope.data)
    }

    async fn list_sessions(&self, token: &str, customer_id: &str) -> Result<Vec<Session>, RemoteError> {
        let req = self.authorized(
            self.client
                .get(format!("{}/sessions", self.messaging_base_url))
                .query(&[("customerId", customer_id)]),
            token,
        );
        self.send(req).await
    }

    async fn create_session(&self, token: &str, session: &NewSession) -> Result<Session, RemoteError> {
        let req = self.authorized(
            self.client
                .post(format!("{}/sessions", self.messaging_base_url))
                .json(session),
            token,
        );
        let envelope: Envelope<Session> = self.send(req).await?;
        Ok(envelope.data)
    }

    async fn update_session(
        &self,
        token: &str,
        session_id: &str,
        update: &SessionUpdate,
    ) -> Result<Session, RemoteError> {
        let req = self.authorized(
            self.client
                .put(format!("{}/sessions/{}", self.messaging_base_url, session_id))
                .json(update),
            token,
        );
        let envelope: Envelope<Session> = self.send(req).await?;
        Ok(envelope.data)
    }
}
