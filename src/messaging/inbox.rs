use std::sync::Arc;

use tracing::{info, warn};

use crate::auth::AuthSession;
use crate::error::{Result, WellnessError};
use crate::gateway::models::{Message, NewMessage};
use crate::gateway::RemoteGateway;
use crate::messaging::grouper::{group_messages, ConversationThread, Conversations};

/// The viewer's message list, grouped into threads, with one thread
/// optionally selected.
pub struct InboxController {
    gateway: Arc<dyn RemoteGateway>,
    auth: AuthSession,
    messages: Vec<Message>,
    conversations: Conversations,
    selected: Option<String>,
}

impl InboxController {
    pub fn new(gateway: Arc<dyn RemoteGateway>, auth: AuthSession) -> Self {
        Self {
            gateway,
            auth,
            messages: Vec::new(),
            conversations: Conversations::default(),
            selected: None,
        }
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn conversations(&self) -> &Conversations {
        &self.conversations
    }

    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    pub fn selected_thread(&self) -> Option<&ConversationThread> {
        self.selected
            .as_deref()
            .and_then(|counterpart| self.conversations.get(counterpart))
    }

    /// Refetches every message involving the viewer and rebuilds the threads.
    /// On any failure the previous messages, threads and selection stay.
    pub async fn refresh(&mut self) -> Result<()> {
        let viewer = self.auth.viewer();
        let fetched = self
            .gateway
            .list_messages(&self.auth.token, viewer)
            .await
            .map_err(|e| {
                warn!("Failed to fetch messages for {}: {}", viewer, e);
                WellnessError::from(e)
            })?;

        let mut regrouped = group_messages(viewer, &fetched)?;

        // Conversations started locally stay visible until their first message lands.
        for thread in self.conversations.iter() {
            if thread.messages.is_empty() {
                regrouped.ensure(&thread.counterpart_id);
            }
        }

        info!(
            "Fetched {} messages in {} conversations for {}",
            fetched.len(),
            regrouped.len(),
            viewer
        );

        self.messages = fetched;
        self.conversations = regrouped;
        if self.selected.is_none() {
            self.selected = self.conversations.default_selection().map(str::to_string);
        }
        Ok(())
    }

    pub fn select(&mut self, counterpart_id: &str) -> Result<()> {
        if !self.conversations.contains(counterpart_id) {
            return Err(WellnessError::validation(format!(
                "No conversation with {}",
                counterpart_id
            )));
        }
        self.selected = Some(counterpart_id.to_string());
        Ok(())
    }

    /// Opens a thread with `counterpart_id`, creating an empty one when no
    /// messages have been exchanged yet.
    pub fn start_conversation(&mut self, counterpart_id: &str) -> Result<()> {
        let counterpart_id = counterpart_id.trim();
        if counterpart_id.is_empty() {
            return Err(WellnessError::validation("Please select a counsellor."));
        }
        if counterpart_id == self.auth.viewer() {
            return Err(WellnessError::validation(
                "You cannot start a conversation with yourself.",
            ));
        }
        self.conversations.ensure(counterpart_id);
        self.selected = Some(counterpart_id.to_string());
        Ok(())
    }

    /// Sends `content` to the selected counterpart, then refetches.
    pub async fn send(&mut self, content: &str) -> Result<Message> {
        let receiver_id = match self.selected.as_deref() {
            Some(counterpart) => counterpart.to_string(),
            None => {
                return Err(WellnessError::validation(
                    "Select a conversation or start a new one.",
                ))
            }
        };
        if content.trim().is_empty() {
            return Err(WellnessError::validation("Message content cannot be empty."));
        }

        let new_message = NewMessage {
            sender_id: self.auth.viewer().to_string(),
            receiver_id,
            content: content.to_string(),
        };

        let created = self
            .gateway
            .create_message(&self.auth.token, &new_message)
            .await?;
        info!("Sent message {} to {}", created.message_id, created.receiver_id);

        self.refresh().await?;
        Ok(created)
    }
}
