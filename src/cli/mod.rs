pub mod commands;

use std::sync::Arc;

use crate::account::AccountService;
use crate::auth::{AuthSession, CredentialStore};
use crate::cli::commands::{Commands, MessageAction, SessionAction};
use crate::config::AppConfig;
use crate::error::{Result, WellnessError};
use crate::gateway::models::{Registration, Session};
use crate::gateway::RemoteGateway;
use crate::messaging::InboxController;
use crate::sessions::{RescheduleFields, SessionRosterController};

pub async fn run_cli(
    command: Commands,
    config: &AppConfig,
    gateway: Arc<dyn RemoteGateway>,
) -> Result<()> {
    let store = CredentialStore::new(&config.auth.credentials_path);
    let account = AccountService::new(gateway.clone());

    match command {
        Commands::Register {
            name,
            email,
            password,
            profile_type,
            specialization,
        } => {
            let email = email.trim().to_string();
            let response = account
                .register(Registration {
                    name,
                    email: email.clone(),
                    password,
                    profile_type,
                    specialization,
                })
                .await?;
            println!("Registered {} (user id {}).", email, response.user_id);
            if !response.status {
                println!("Check your email for the confirmation code, then run `wellness confirm`.");
            }
        }
        Commands::Confirm { email, code } => {
            account.confirm(&email, &code).await?;
            println!("Your account has been confirmed. You can now log in.");
        }
        Commands::Login { email, password } => {
            let auth = account.login(&email, &password).await?;
            store.save(&auth)?;
            println!("Logged in as {}", auth.viewer());
        }
        Commands::Logout => {
            account.logout(&store)?;
            println!("Logged out.");
        }
        Commands::Counsellors => {
            let auth = require_auth(&store)?;
            let counsellors = account.counsellors(&auth).await?;
            if counsellors.is_empty() {
                println!("No counsellors available.");
            } else {
                println!("{:<36} | {:<24} | {}", "ID", "Name", "Specialization");
                println!("{:-<36}-+-{:-<24}-+-{:-<20}", "", "", "");
                for c in counsellors {
                    println!("{:<36} | {:<24} | {}", c.identity(), c.name, c.specialization);
                }
            }
        }
        Commands::Sessions { action } => {
            let auth = require_auth(&store)?;
            let mut roster = SessionRosterController::new(gateway, auth);
            run_sessions(action, &mut roster).await?;
        }
        Commands::Messages { action } => {
            let auth = require_auth(&store)?;
            let mut inbox = InboxController::new(gateway, auth);
            run_messages(action, &mut inbox).await?;
        }
    }

    Ok(())
}

fn require_auth(store: &CredentialStore) -> Result<AuthSession> {
    store
        .load()?
        .ok_or_else(|| WellnessError::validation("Not logged in. Run `wellness login` first."))
}

async fn run_sessions(action: SessionAction, roster: &mut SessionRosterController) -> Result<()> {
    match action {
        SessionAction::List => {
            roster.fetch_all().await?;
            print_sessions(roster.roster());
        }
        SessionAction::Book {
            counsellor,
            date,
            time,
        } => {
            let created = roster.book(&counsellor, &date, &time).await?;
            println!("Booked session {}", created.session_id);
            print_sessions(roster.roster());
        }
        SessionAction::Cancel { id } => {
            let session = modifiable_session(roster, &id).await?;
            roster.cancel(&session.session_id).await?;
            println!("Cancelled session {}", id);
            print_sessions(roster.roster());
        }
        SessionAction::Reschedule { id, date, time } => {
            let fields = RescheduleFields { date, time };
            if fields.is_empty() {
                return Err(WellnessError::validation("Provide a new date and/or time."));
            }
            let session = modifiable_session(roster, &id).await?;
            roster.begin_reschedule(&session);
            roster.update_reschedule(fields)?;
            roster.confirm_reschedule().await?;
            println!("Rescheduled session {}", id);
            print_sessions(roster.roster());
        }
    }
    Ok(())
}

async fn modifiable_session(roster: &mut SessionRosterController, id: &str) -> Result<Session> {
    roster.fetch_all().await?;
    let session = roster
        .find(id)
        .cloned()
        .ok_or_else(|| WellnessError::validation(format!("Session {} not found.", id)))?;
    if !roster.can_modify(&session) {
        return Err(WellnessError::validation(format!(
            "Session {} is {} and cannot be changed.",
            id,
            session.status.label().to_lowercase()
        )));
    }
    Ok(session)
}

fn print_sessions(sessions: &[Session]) {
    if sessions.is_empty() {
        println!("No sessions booked.");
        return;
    }
    println!(
        "{:<36} | {:<24} | {:<10} | {:<5} | {}",
        "ID", "Counsellor", "Date", "Time", "Status"
    );
    println!("{:-<36}-+-{:-<24}-+-{:-<10}-+-{:-<5}-+-{:-<9}", "", "", "", "", "");
    for s in sessions {
        println!(
            "{:<36} | {:<24} | {:<10} | {:<5} | {}",
            s.session_id,
            s.counsellor_id,
            s.date,
            s.time,
            s.status.label()
        );
    }
}

async fn run_messages(action: MessageAction, inbox: &mut InboxController) -> Result<()> {
    inbox.refresh().await?;

    match action {
        MessageAction::Inbox => {
            if inbox.conversations().is_empty() {
                println!("No conversations yet.");
            }
            for thread in inbox.conversations().iter() {
                println!("{:<36} | {}", thread.counterpart_id, thread.preview());
            }
        }
        MessageAction::Thread { counterpart } => {
            inbox.select(&counterpart)?;
            print_thread(inbox);
        }
        MessageAction::Send { to, content } => {
            inbox.start_conversation(&to)?;
            inbox.send(&content).await?;
            print_thread(inbox);
        }
    }
    Ok(())
}

fn print_thread(inbox: &InboxController) {
    let thread = match inbox.selected_thread() {
        Some(thread) => thread,
        None => {
            println!("Select a conversation or start a new one.");
            return;
        }
    };

    println!("--- Conversation with {} ---", thread.counterpart_id);
    for m in &thread.messages {
        println!("[{}] {}: {}", m.timestamp.format("%Y-%m-%d %H:%M"), m.sender_id, m.content);
    }
}
