//! SMTP mail delivery
//!
//! Thin wrapper over `lettre`'s async SMTP transport (STARTTLS relay with
//! username/password credentials).

use std::fmt;
use std::time::Duration;

use lettre::message::header::ContentType;
use lettre::message::{Mailbox, Message};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Address, AsyncSmtpTransport, AsyncTransport, Tokio1Executor};
use thiserror::Error;

pub const DEFAULT_SMTP_HOST: &str = "smtp.gmail.com";
pub const DEFAULT_SMTP_PORT: u16 = 587;
pub const DEFAULT_SEND_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Error)]
pub enum MailError {
    #[error("Mail credentials are not configured")]
    NotConfigured,

    #[error("Invalid mail address: {0}")]
    InvalidAddress(String),

    #[error("Failed to build message: {0}")]
    Build(String),

    #[error("SMTP transport error: {0}")]
    Transport(String),
}

#[derive(Clone)]
pub struct MailerConfig {
    pub host: String,
    pub port: u16,
    pub username: Option<String>,
    pub password: Option<String>,
    /// Display name on the `From` header
    pub from_name: String,
    pub timeout: Duration,
}

impl Default for MailerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_SMTP_HOST.to_string(),
            port: DEFAULT_SMTP_PORT,
            username: None,
            password: None,
            from_name: "Career Guidance".to_string(),
            timeout: DEFAULT_SEND_TIMEOUT,
        }
    }
}

impl MailerConfig {
    /// Both username and password are present
    pub fn is_configured(&self) -> bool {
        self.username.is_some() && self.password.is_some()
    }
}

impl fmt::Debug for MailerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MailerConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "[REDACTED]"))
            .field("from_name", &self.from_name)
            .finish()
    }
}

#[derive(Clone)]
pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
}

impl SmtpMailer {
    /// Build a mailer; fails with [`MailError::NotConfigured`] without credentials
    pub fn new(config: &MailerConfig) -> Result<Self, MailError> {
        let (Some(username), Some(password)) = (&config.username, &config.password) else {
            return Err(MailError::NotConfigured);
        };

        let from = Mailbox::new(Some(config.from_name.clone()), parse_address(username)?);
        let transport = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.host)
            .map_err(|e| MailError::Transport(e.to_string()))?
            .port(config.port)
            .credentials(Credentials::new(username.clone(), password.clone()))
            .timeout(Some(config.timeout))
            .build();

        Ok(Self { transport, from })
    }

    pub async fn send_html(&self, to: &str, subject: &str, html: String) -> Result<(), MailError> {
        let message = build_message(self.from.clone(), to, subject, html)?;
        self.transport
            .send(message)
            .await
            .map_err(|e| MailError::Transport(e.to_string()))?;
        Ok(())
    }
}

impl fmt::Debug for SmtpMailer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SmtpMailer")
            .field("from", &self.from.to_string())
            .finish()
    }
}

fn parse_address(raw: &str) -> Result<Address, MailError> {
    raw.parse::<Address>()
        .map_err(|e| MailError::InvalidAddress(e.to_string()))
}

fn build_message(from: Mailbox, to: &str, subject: &str, html: String) -> Result<Message, MailError> {
    Message::builder()
        .from(from)
        .to(Mailbox::new(None, parse_address(to)?))
        .subject(subject)
        .header(ContentType::TEXT_HTML)
        .body(html)
        .map_err(|e| MailError::Build(e.to_string()))
}
