use std::sync::Arc;

use chrono::Utc;
use tracing::{info, warn};

use crate::auth::AuthSession;
use crate::error::{Result, WellnessError};
use crate::gateway::models::{NewSession, Session, SessionStatus, SessionUpdate};
use crate::gateway::RemoteGateway;

/// Proposed new slot for one session, held between beginning and confirming
/// a reschedule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RescheduleDraft {
    pub session_id: String,
    pub date: String,
    pub time: String,
}

/// Fields to overwrite on the active draft. `None` leaves a field as is.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RescheduleFields {
    pub date: Option<String>,
    pub time: Option<String>,
}

impl RescheduleFields {
    pub fn is_empty(&self) -> bool {
        self.date.is_none() && self.time.is_none()
    }
}

/// Owns the viewer's sessions as last fetched and runs every lifecycle
/// operation against the messaging service.
///
/// Mutations never touch the local roster directly. Each successful command
/// is followed by a full [`fetch_all`](Self::fetch_all), so the roster only
/// ever holds what the server returned.
pub struct SessionRosterController {
    gateway: Arc<dyn RemoteGateway>,
    auth: AuthSession,
    roster: Vec<Session>,
    draft: Option<RescheduleDraft>,
}

impl SessionRosterController {
    pub fn new(gateway: Arc<dyn RemoteGateway>, auth: AuthSession) -> Self {
        Self {
            gateway,
            auth,
            roster: Vec::new(),
            draft: None,
        }
    }

    pub fn roster(&self) -> &[Session] {
        &self.roster
    }

    pub fn draft(&self) -> Option<&RescheduleDraft> {
        self.draft.as_ref()
    }

    pub fn find(&self, session_id: &str) -> Option<&Session> {
        self.roster.iter().find(|s| s.session_id == session_id)
    }

    /// Whether the viewer may cancel or reschedule `session`.
    pub fn can_modify(&self, session: &Session) -> bool {
        session.status == SessionStatus::Booked && session.customer_id == self.auth.viewer()
    }

    /// Replaces the roster with the viewer's sessions. Last fetch wins.
    pub async fn fetch_all(&mut self) -> Result<&[Session]> {
        let viewer = self.auth.viewer();
        let sessions = self
            .gateway
            .list_sessions(&self.auth.token, viewer)
            .await
            .map_err(|e| {
                warn!("Failed to fetch sessions for {}: {}", viewer, e);
                WellnessError::from(e)
            })?;

        info!("Fetched {} sessions for {}", sessions.len(), viewer);
        self.roster = sessions;
        Ok(&self.roster)
    }

    pub async fn book(&mut self, counsellor_id: &str, date: &str, time: &str) -> Result<Session> {
        if counsellor_id.trim().is_empty() || date.trim().is_empty() || time.trim().is_empty() {
            return Err(WellnessError::validation(
                "Please select a counsellor, date, and time.",
            ));
        }

        let new_session = NewSession {
            customer_id: self.auth.viewer().to_string(),
            counsellor_id: counsellor_id.to_string(),
            date: date.to_string(),
            time: time.to_string(),
            created_at: Utc::now(),
            status: SessionStatus::Booked,
        };

        let created = self
            .gateway
            .create_session(&self.auth.token, &new_session)
            .await?;
        info!(
            "Booked session {} with {} on {} at {}",
            created.session_id, counsellor_id, date, time
        );

        self.fetch_all().await?;
        Ok(created)
    }

    /// Marks `session_id` cancelled. Whether the viewer may do so is checked
    /// by the caller, see [`can_modify`](Self::can_modify).
    pub async fn cancel(&mut self, session_id: &str) -> Result<()> {
        self.gateway
            .update_session(&self.auth.token, session_id, &SessionUpdate::cancel())
            .await?;
        info!("Cancelled session {}", session_id);

        self.fetch_all().await?;
        Ok(())
    }

    /// Starts a reschedule seeded with the session's current slot, dropping
    /// any draft already in progress.
    pub fn begin_reschedule(&mut self, session: &Session) {
        self.draft = Some(RescheduleDraft {
            session_id: session.session_id.clone(),
            date: session.date.clone(),
            time: session.time.clone(),
        });
    }

    pub fn update_reschedule(&mut self, fields: RescheduleFields) -> Result<()> {
        let draft = self
            .draft
            .as_mut()
            .ok_or_else(|| WellnessError::validation("No reschedule in progress."))?;

        if let Some(date) = fields.date {
            draft.date = date;
        }
        if let Some(time) = fields.time {
            draft.time = time;
        }
        Ok(())
    }

    pub fn discard_reschedule(&mut self) {
        self.draft = None;
    }

    /// Sends the drafted slot. The draft is kept on validation or remote
    /// failure and cleared once the update is accepted.
    pub async fn confirm_reschedule(&mut self) -> Result<()> {
        let draft = match &self.draft {
            Some(draft) => draft,
            None => return Err(WellnessError::validation("No reschedule in progress.")),
        };
        if draft.date.trim().is_empty() || draft.time.trim().is_empty() {
            return Err(WellnessError::validation(
                "Please provide both new date and time for rescheduling.",
            ));
        }

        let update = SessionUpdate::reschedule(draft.date.clone(), draft.time.clone());
        let session_id = draft.session_id.clone();

        self.gateway
            .update_session(&self.auth.token, &session_id, &update)
            .await?;
        info!("Rescheduled session {}", session_id);

        self.draft = None;
        self.fetch_all().await?;
        Ok(())
    }
}
