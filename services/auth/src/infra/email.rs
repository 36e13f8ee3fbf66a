//! SMTP adapter for the mail port.

use anyhow::Context as _;
use lettre::message::{Mailbox, header::ContentType};
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

use crate::config::AuthConfig;
use crate::domain::repository::MailPort;
use crate::domain::types::OTC_TTL_MINUTES;
use crate::error::AuthServiceError;

#[derive(Clone)]
pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
    app_url: String,
}

impl SmtpMailer {
    pub fn from_config(config: &AuthConfig) -> anyhow::Result<Self> {
        let transport = AsyncSmtpTransport::<Tokio1Executor>::from_url(&config.smtp_url)
            .context("parse SMTP_URL")?
            .build();
        let from = config.smtp_from.parse().context("parse SMTP_FROM")?;
        Ok(Self {
            transport,
            from,
            app_url: config.app_url.clone(),
        })
    }

    /// Local unencrypted transport, for tests and development.
    pub fn localhost(app_url: &str, from: &str) -> anyhow::Result<Self> {
        Ok(Self {
            transport: AsyncSmtpTransport::<Tokio1Executor>::unencrypted_localhost(),
            from: from.parse().context("parse from address")?,
            app_url: app_url.to_owned(),
        })
    }

    async fn send(&self, to: &str, subject: &str, body: String) -> Result<(), AuthServiceError> {
        let message = Message::builder()
            .from(self.from.clone())
            .to(to.parse().context("parse recipient address")?)
            .subject(subject)
            .header(ContentType::TEXT_PLAIN)
            .body(body)
            .context("build message")?;
        self.transport.send(message).await.context("smtp send")?;
        Ok(())
    }
}

impl MailPort for SmtpMailer {
    async fn send_verification_email(
        &self,
        to: &str,
        token: &str,
    ) -> Result<(), AuthServiceError> {
        let link = format!("{}/auth/verify-email?token={token}", self.app_url);
        self.send(
            to,
            "Verify your Equiptrack email",
            format!("Welcome to Equiptrack.\n\nConfirm your email address by opening this link:\n{link}\n\nThe link expires in 24 hours."),
        )
        .await
    }

    async fn send_one_time_code_email(
        &self,
        to: &str,
        code: &str,
    ) -> Result<(), AuthServiceError> {
        self.send(
            to,
            "Your Equiptrack sign-in code",
            format!("Your one-time sign-in code is {code}.\n\nIt expires in {OTC_TTL_MINUTES} minutes. If you did not try to sign in, you can ignore this email."),
        )
        .await
    }
}
