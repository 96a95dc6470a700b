pub mod roster;

pub use roster::{RescheduleDraft, RescheduleFields, SessionRosterController};
