//! SMTP Verification Notifier
//!
//! Sends the verification link through `platform::mail::SmtpMailer`.
//! Without credentials the notifier still constructs; every send then fails
//! and is logged.

use std::sync::Arc;

use platform::mail::{MailerConfig, SmtpMailer};

use crate::application::config::AuthConfig;
use crate::domain::notifier::VerificationNotifier;
use crate::domain::value_object::{
    email::Email,
    verification_token::{VERIFICATION_TOKEN_TTL_HOURS, VerificationToken},
};

pub const VERIFICATION_SUBJECT: &str = "Verify Your Email";

pub struct MailNotifier {
    mailer: Option<SmtpMailer>,
    config: Arc<AuthConfig>,
}

impl MailNotifier {
    pub fn from_config(mail: &MailerConfig, config: Arc<AuthConfig>) -> Self {
        let mailer = match SmtpMailer::new(mail) {
            Ok(mailer) => Some(mailer),
            Err(e) => {
                tracing::warn!(error = %e, "Email transport unavailable; verification emails will not be sent");
                None
            }
        };
        Self { mailer, config }
    }

    pub fn is_configured(&self) -> bool {
        self.mailer.is_some()
    }
}

impl VerificationNotifier for MailNotifier {
    async fn send_verification(&self, email: &Email, token: &VerificationToken) -> bool {
        let Some(mailer) = &self.mailer else {
            tracing::error!("Email configuration is missing; verification email not sent");
            return false;
        };

        let link = self.config.verification_link(token.as_str());
        match mailer
            .send_html(email.as_str(), VERIFICATION_SUBJECT, render_verification_email(&link))
            .await
        {
            Ok(()) => {
                tracing::info!(to = %email.masked(), "Verification email sent");
                true
            }
            Err(e) => {
                tracing::error!(to = %email.masked(), error = %e, "Verification email failed");
                false
            }
        }
    }
}

/// HTML body carrying the link as a button and as plain text
pub fn render_verification_email(link: &str) -> String {
    format!(
        r#"<div style="font-family: Arial, sans-serif; max-width: 600px; margin: 0 auto;">
  <h1 style="color: #2563eb;">Verify Your Email</h1>
  <p>Thank you for registering! Please click the button below to verify your email address:</p>
  <div style="text-align: center; margin: 30px 0;">
    <a href="{link}" style="background-color: #2563eb; color: white; padding: 12px 24px; text-decoration: none; border-radius: 6px; display: inline-block;">Verify Email</a>
  </div>
  <p>If the button doesn't work, copy and paste this link into your browser:</p>
  <p style="color: #666; word-break: break-all;">{link}</p>
  <p>This link will expire in {hours} hours.</p>
  <p>If you didn't create an account, you can safely ignore this email.</p>
</div>"#,
        link = link,
        hours = VERIFICATION_TOKEN_TTL_HOURS,
    )
}
