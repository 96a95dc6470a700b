#[allow(clippy::module_inception)]
mod config;

pub use self::config::{AppConfig, AuthConfig, HttpConfig, ServicesConfig};
