use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct ServicesConfig {
    pub user_base_url: String,
    pub counsellor_base_url: String,
    pub messaging_base_url: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct HttpConfig {
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct AuthConfig {
    #[serde(default = "default_credentials_path")]
    pub credentials_path: String,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            credentials_path: default_credentials_path(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub services: ServicesConfig,
    #[serde(default)]
    pub http: HttpConfig,
    #[serde(default)]
    pub auth: AuthConfig,
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_credentials_path() -> String {
    ".wellness/credentials.json".to_string()
}

impl AppConfig {
    pub fn load(path: &str) -> Result<Self, config::ConfigError> {
        dotenv::dotenv().ok();

        let settings = config::Config::builder()
            .add_source(config::File::with_name(path).required(false))
            .add_source(config::Environment::with_prefix("WELLNESS").separator("__"))
            .build()?;

        let mut app_config: AppConfig = settings.try_deserialize()?;

        // Expand environment variables if present like ${MESSAGING_URL}
        let services = &mut app_config.services;
        services.user_base_url = expand_env(&services.user_base_url);
        services.counsellor_base_url = expand_env(&services.counsellor_base_url);
        services.messaging_base_url = expand_env(&services.messaging_base_url);
        app_config.auth.credentials_path = expand_env(&app_config.auth.credentials_path);

        Ok(app_config)
    }
}

pub(crate) fn expand_env(val: &str) -> String {
    if val.starts_with("${") && val.ends_with('}') {
        let var_name = &val[2..val.len() - 1];
        std::env::var(var_name).unwrap_or_default()
    } else {
        val.to_string()
    }
}
