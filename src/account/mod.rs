use std::sync::Arc;

use tracing::info;

use crate::auth::{AuthSession, CredentialStore};
use crate::error::{Result, WellnessError};
use crate::gateway::models::{Counsellor, ProfileType, RegisterResponse, Registration};
use crate::gateway::RemoteGateway;

/// Account flows against the identity service.
pub struct AccountService {
    gateway: Arc<dyn RemoteGateway>,
}

impl AccountService {
    pub fn new(gateway: Arc<dyn RemoteGateway>) -> Self {
        Self { gateway }
    }

    pub async fn register(&self, registration: Registration) -> Result<RegisterResponse> {
        let registration = validate_registration(registration)?;
        let response = self.gateway.register(&registration).await?;
        info!(
            "Registered {} as {:?} (user {})",
            registration.email, registration.profile_type, response.user_id
        );
        Ok(response)
    }

    pub async fn confirm(&self, email: &str, code: &str) -> Result<()> {
        let email = email.trim();
        if email.is_empty() || code.trim().is_empty() {
            return Err(WellnessError::validation(
                "Email and confirmation code are required.",
            ));
        }
        self.gateway.confirm(email, code.trim()).await?;
        info!("Confirmed account {}", email);
        Ok(())
    }

    /// Signs in and returns a session carrying the identity token.
    pub async fn login(&self, email: &str, password: &str) -> Result<AuthSession> {
        let email = email.trim();
        if email.is_empty() || password.is_empty() {
            return Err(WellnessError::validation("Email and password are required."));
        }
        let response = self.gateway.login(email, password).await?;
        info!("Logged in as {}", email);
        Ok(AuthSession::new(response.id_token, email))
    }

    pub fn logout(&self, store: &CredentialStore) -> Result<()> {
        store.clear()
    }

    pub async fn counsellors(&self, auth: &AuthSession) -> Result<Vec<Counsellor>> {
        let counsellors = self.gateway.list_counsellors(&auth.token).await?;
        info!("Fetched {} counsellors", counsellors.len());
        Ok(counsellors)
    }
}

fn validate_registration(mut registration: Registration) -> Result<Registration> {
    registration.email = registration.email.trim().to_string();
    if registration.name.trim().is_empty()
        || registration.email.is_empty()
        || registration.password.is_empty()
    {
        return Err(WellnessError::validation("Missing required fields"));
    }

    match registration.profile_type {
        ProfileType::Counsellor => {
            let specialization = registration
                .specialization
                .as_deref()
                .map(str::trim)
                .unwrap_or_default();
            if specialization.is_empty() {
                return Err(WellnessError::validation(
                    "Counsellors must provide specialization",
                ));
            }
            registration.specialization = Some(specialization.to_string());
        }
        ProfileType::Customer => registration.specialization = None,
    }

    Ok(registration)
}
