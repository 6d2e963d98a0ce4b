use std::{collections::HashMap, env, fmt, path::Path, time::Duration};

use config::{Config as ConfigBuilder, ConfigError, Environment as EnvSource, File};
use serde::Deserialize;
use validator::ValidateEmail;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    #[serde(default)]
    pub app: AppConfig,
    #[serde(default)]
    pub email: EmailConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Built marketing site served as the router fallback
    #[serde(default)]
    pub public_dir: Option<String>,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub environment: Environment,
}

#[derive(Debug, Deserialize, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Production,
}

impl Environment {
    /// Error details are only sent to clients outside production
    pub fn exposes_error_details(self) -> bool {
        self != Environment::Production
    }
}

#[derive(Debug, Deserialize, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum EmailProvider {
    #[default]
    Resend,
    Log,
}

#[derive(Deserialize, Clone)]
pub struct EmailConfig {
    #[serde(default)]
    pub provider: EmailProvider,
    #[serde(default)]
    pub api_key: String,
    #[serde(default = "default_api_url")]
    pub api_url: String,
    #[serde(default = "default_from_email")]
    pub from_email: String,
    #[serde(default = "default_from_name")]
    pub from_name: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for EmailConfig {
    fn default() -> Self {
        Self {
            provider: EmailProvider::default(),
            api_key: String::new(),
            api_url: default_api_url(),
            from_email: default_from_email(),
            from_name: default_from_name(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl fmt::Debug for EmailConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let api_key = if self.api_key.is_empty() {
            "<unset>"
        } else {
            "<redacted>"
        };

        f.debug_struct("EmailConfig")
            .field("provider", &self.provider)
            .field("api_key", &api_key)
            .field("api_url", &self.api_url)
            .field("from_email", &self.from_email)
            .field("from_name", &self.from_name)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl EmailConfig {
    /// Sender mailbox, `Name <address>`
    pub fn sender(&self) -> String {
        format!("{} <{}>", self.from_name, self.from_email)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

fn default_api_url() -> String {
    gym_site_mailer::DEFAULT_API_URL.to_string()
}

fn default_from_email() -> String {
    "onboarding@resend.dev".to_string()
}

fn default_from_name() -> String {
    "Forja Gym".to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

#[derive(Debug, Deserialize, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default)]
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: LogFormat::default(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Config {
    /// Load configuration from file and environment variables
    ///
    /// Priority (highest to lowest):
    /// 1. Plain variables (RESEND_API_KEY, APP_ENV, ENVIRONMENT)
    /// 2. Prefixed variables (GYM_SITE__EMAIL__FROM_EMAIL, etc.)
    /// 3. Config file specified by path, CONFIG_PATH or config/default.toml
    /// 4. Hardcoded defaults
    pub fn load(config_path: Option<String>) -> Result<Self, ConfigError> {
        Self::load_with(config_path, env::vars().collect())
    }

    /// Same as [`Config::load`] with an explicit variable set instead of the process environment
    pub fn load_with(
        config_path: Option<String>,
        vars: HashMap<String, String>,
    ) -> Result<Self, ConfigError> {
        let mut builder = ConfigBuilder::builder();

        builder = builder
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 3000)?
            .set_default("app.environment", "development")?
            .set_default("email.provider", "resend")?
            .set_default("logging.level", "info")?
            .set_default("logging.format", "pretty")?;

        let config_file_path = config_path
            .or_else(|| vars.get("CONFIG_PATH").cloned())
            .unwrap_or_else(|| "config/default.toml".to_string());

        // Config file is optional
        if Path::new(&config_file_path).exists() {
            builder = builder.add_source(File::with_name(&config_file_path));
        }

        builder = builder.add_source(
            EnvSource::with_prefix("GYM_SITE")
                .separator("__")
                .try_parsing(true)
                .source(Some(vars.clone())),
        );

        let environment = vars
            .get("APP_ENV")
            .or_else(|| vars.get("ENVIRONMENT"))
            .map(|value| value.trim().to_lowercase());
        if let Some(environment) = environment {
            builder = builder.set_override("app.environment", environment)?;
        }
        if let Some(api_key) = vars.get("RESEND_API_KEY") {
            builder = builder.set_override("email.api_key", api_key.as_str())?;
        }

        builder.build()?.try_deserialize()
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.server.port == 0 {
            return Err("Server port must be greater than 0".to_string());
        }
        if !self.email.from_email.validate_email() {
            return Err(format!(
                "email.from_email is not a valid address: {:?}",
                self.email.from_email
            ));
        }
        if self.email.provider == EmailProvider::Resend && self.email.api_key.trim().is_empty() {
            return Err(
                "RESEND_API_KEY (email.api_key) is required when email.provider is \"resend\""
                    .to_string(),
            );
        }
        if self.email.provider == EmailProvider::Log
            && self.app.environment == Environment::Production
        {
            return Err(
                "email.provider \"log\" does not deliver mail and is not allowed in production"
                    .to_string(),
            );
        }
        if self.email.timeout_secs == 0 {
            return Err("email.timeout_secs must be greater than 0".to_string());
        }
        if let Some(dir) = &self.server.public_dir {
            if !Path::new(dir).is_dir() {
                return Err(format!("server.public_dir does not exist: {dir}"));
            }
        }
        Ok(())
    }
}
