//! Process settings read from the environment

use std::net::SocketAddr;
use std::time::Duration;

use auth::AuthConfig;
use platform::config::{ConfigError, env_bool, env_list, env_opt, env_or, env_parse, env_required};
use platform::database::{DEFAULT_MAX_CONNECTIONS, DatabaseConfig};
use platform::mail::{DEFAULT_SMTP_HOST, DEFAULT_SMTP_PORT, MailerConfig};

const DEFAULT_FRONTEND_ORIGINS: &str = "http://localhost:3000,http://127.0.0.1:3000";

/// Not `Debug`: carries the pepper and mail password
#[derive(Clone)]
pub struct Settings {
    pub listen_addr: SocketAddr,
    pub frontend_origins: Vec<String>,
    pub database: DatabaseConfig,
    pub mailer: MailerConfig,
    pub auth: AuthConfig,
}

impl Settings {
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut database = DatabaseConfig::new(env_required("DATABASE_URL")?);
        database.max_connections = env_parse("DATABASE_MAX_CONNECTIONS", DEFAULT_MAX_CONNECTIONS)?;
        database.acquire_timeout = Duration::from_secs(env_parse(
            "DATABASE_ACQUIRE_TIMEOUT_SECS",
            database.acquire_timeout.as_secs(),
        )?);

        let mailer = MailerConfig {
            host: env_or("SMTP_HOST", DEFAULT_SMTP_HOST),
            port: env_parse("SMTP_PORT", DEFAULT_SMTP_PORT)?,
            username: env_opt("EMAIL_USER"),
            password: env_opt("EMAIL_PASSWORD"),
            from_name: env_or("MAIL_FROM_NAME", &MailerConfig::default().from_name),
            ..MailerConfig::default()
        };

        let defaults = AuthConfig::default();
        let auth = AuthConfig {
            public_base_url: env_or("PUBLIC_APP_URL", &defaults.public_base_url),
            password_pepper: env_opt("PASSWORD_PEPPER").map(String::into_bytes),
            dev_endpoints_enabled: env_bool("ENABLE_DEV_ENDPOINTS", cfg!(debug_assertions))?,
        };

        Ok(Self {
            listen_addr: env_parse("LISTEN_ADDR", SocketAddr::from(([0, 0, 0, 0], 31113)))?,
            frontend_origins: env_list("FRONTEND_ORIGINS", DEFAULT_FRONTEND_ORIGINS),
            database,
            mailer,
            auth,
        })
    }
}
