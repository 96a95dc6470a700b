use std::collections::HashMap;

use crate::error::{Result, WellnessError};
use crate::gateway::models::Message;

const PREVIEW_CHARS: usize = 30;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversationThread {
    pub counterpart_id: String,
    /// Ascending by timestamp, fetch order among equal timestamps.
    pub messages: Vec<Message>,
}

impl ConversationThread {
    /// A thread with nobody having written yet. Lives only on the client
    /// until the first message goes out.
    pub fn empty(counterpart_id: impl Into<String>) -> Self {
        Self {
            counterpart_id: counterpart_id.into(),
            messages: Vec::new(),
        }
    }

    pub fn latest(&self) -> Option<&Message> {
        self.messages.last()
    }

    pub fn preview(&self) -> String {
        match self.latest() {
            Some(msg) => {
                let head: String = msg.content.chars().take(PREVIEW_CHARS).collect();
                format!("{}...", head)
            }
            None => "No messages yet".to_string(),
        }
    }
}

/// Threads keyed by counterpart, kept in the order each counterpart first
/// appeared in the fetched list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Conversations {
    threads: Vec<ConversationThread>,
}

impl Conversations {
    pub fn len(&self) -> usize {
        self.threads.len()
    }

    pub fn is_empty(&self) -> bool {
        self.threads.is_empty()
    }

    pub fn get(&self, counterpart_id: &str) -> Option<&ConversationThread> {
        self.threads.iter().find(|t| t.counterpart_id == counterpart_id)
    }

    pub fn contains(&self, counterpart_id: &str) -> bool {
        self.get(counterpart_id).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ConversationThread> {
        self.threads.iter()
    }

    pub fn counterparts(&self) -> impl Iterator<Item = &str> {
        self.threads.iter().map(|t| t.counterpart_id.as_str())
    }

    /// Adds an empty thread for `counterpart_id` unless one already exists.
    pub fn ensure(&mut self, counterpart_id: &str) {
        if !self.contains(counterpart_id) {
            self.threads.push(ConversationThread::empty(counterpart_id));
        }
    }

    /// The thread to show when nothing is selected: the first counterpart in
    /// insertion order.
    pub fn default_selection(&self) -> Option<&str> {
        self.threads.first().map(|t| t.counterpart_id.as_str())
    }
}

impl IntoIterator for Conversations {
    type Item = ConversationThread;
    type IntoIter = std::vec::IntoIter<ConversationThread>;

    fn into_iter(self) -> Self::IntoIter {
        self.threads.into_iter()
    }
}

/// Works out who the other side of `msg` is from `viewer`'s point of view.
pub fn counterpart_of<'a>(viewer: &str, msg: &'a Message) -> Result<&'a str> {
    if msg.sender_id == msg.receiver_id {
        return Err(WellnessError::Integrity(format!(
            "message {} has the same sender and receiver ({})",
            msg.message_id, msg.sender_id
        )));
    }

    let counterpart = if msg.sender_id == viewer {
        msg.receiver_id.as_str()
    } else if msg.receiver_id == viewer {
        msg.sender_id.as_str()
    } else {
        return Err(WellnessError::Integrity(format!(
            "message {} does not involve {}",
            msg.message_id, viewer
        )));
    };

    if counterpart.is_empty() {
        return Err(WellnessError::Integrity(format!(
            "message {} has no counterpart",
            msg.message_id
        )));
    }

    Ok(counterpart)
}

/// Partitions `messages` into per-counterpart threads relative to `viewer`.
///
/// Fails on the first message that cannot be attributed rather than dropping
/// it.
pub fn group_messages(viewer: &str, messages: &[Message]) -> Result<Conversations> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut threads: Vec<ConversationThread> = Vec::new();

    for msg in messages {
        let counterpart = counterpart_of(viewer, msg)?;
        let slot = *index.entry(counterpart).or_insert_with(|| {
            threads.push(ConversationThread::empty(counterpart));
            threads.len() - 1
        });
        threads[slot].messages.push(msg.clone());
    }

    for thread in &mut threads {
        // sort_by is stable, so equal timestamps keep fetch order
        thread.messages.sort_by(|a, b| a.timestamp.cmp(&b.timestamp));
    }

    Ok(Conversations { threads })
}
