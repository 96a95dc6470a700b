pub mod grouper;
pub mod inbox;

pub use grouper::{counterpart_of, group_messages, ConversationThread, Conversations};
pub use inbox::InboxController;
