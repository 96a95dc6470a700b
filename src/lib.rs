pub mod account;
pub mod auth;
pub mod cli;
pub mod config;
pub mod error;
pub mod gateway;
pub mod messaging;
pub mod sessions;

pub use error::{Result, WellnessError};
