use clap::{Parser, Subcommand};

use crate::gateway::models::ProfileType;

#[derive(Parser)]
#[command(name = "wellness", version, about = "Better Wellness client", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Override the config file path globally
    #[arg(short, long, global = true, default_value = "config.yaml")]
    pub config: String,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create a customer or counsellor account
    Register {
        #[arg(short, long)]
        name: String,
        #[arg(short, long)]
        email: String,
        #[arg(short, long)]
        password: String,
        #[arg(long, value_enum, default_value = "customer")]
        profile_type: ProfileType,
        /// Required for counsellors
        #[arg(long)]
        specialization: Option<String>,
    },

    /// Confirm an account with the code sent by email
    Confirm {
        #[arg(short, long)]
        email: String,
        #[arg(long)]
        code: String,
    },

    /// Sign in and remember the credentials
    Login {
        #[arg(short, long)]
        email: String,
        #[arg(short, long)]
        password: String,
    },

    /// Forget the stored credentials
    Logout,

    /// List available counsellors
    Counsellors,

    /// Manage booked sessions
    Sessions {
        #[command(subcommand)]
        action: SessionAction,
    },

    /// Read and send messages
    Messages {
        #[command(subcommand)]
        action: MessageAction,
    },
}

#[derive(Subcommand)]
pub enum SessionAction {
    /// List your sessions
    List,

    /// Book a session with a counsellor
    Book {
        #[arg(long)]
        counsellor: String,
        /// Date as YYYY-MM-DD
        #[arg(short, long)]
        date: String,
        /// Time as HH:MM
        #[arg(short, long)]
        time: String,
    },

    /// Cancel a booked session
    Cancel {
        id: String,
    },

    /// Move a booked session to a new date and/or time
    Reschedule {
        id: String,
        #[arg(short, long)]
        date: Option<String>,
        #[arg(short, long)]
        time: Option<String>,
    },
}

#[derive(Subcommand)]
pub enum MessageAction {
    /// List conversations with their latest message
    Inbox,

    /// Show one conversation
    Thread {
        /// The other participant's id
        counterpart: String,
    },

    /// Send a message, starting a new conversation if needed
    Send {
        #[arg(long)]
        to: String,
        #[arg(long)]
        content: String,
    },
}
