//! Lead email delivery via SMTP.
//!
//! [`SmtpMailer`] wraps the `lettre` async SMTP transport and sends each
//! message as a plain-text part plus an HTML alternative. Configuration is
//! loaded from environment variables; if any of `SMTP_HOST`, `SMTP_USER` or
//! `SMTP_PASS` is missing, [`EmailConfig::from_env`] returns `None` and no
//! mailer should be constructed.

use async_trait::async_trait;
use lettre::message::{Mailbox, MultiPart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

// ---------------------------------------------------------------------------
// Error
// ---------------------------------------------------------------------------

/// Error type for email delivery failures.
#[derive(Debug, thiserror::Error)]
pub enum EmailError {
    /// SMTP transport-level failure (authentication, connection, etc.).
    #[error("SMTP transport error: {0}")]
    Transport(#[from] lettre::transport::smtp::Error),

    /// The recipient or sender address could not be parsed.
    #[error("Email address parse error: {0}")]
    Address(#[from] lettre::address::AddressError),

    /// The MIME message could not be assembled.
    #[error("Email build error: {0}")]
    Build(String),
}

// ---------------------------------------------------------------------------
// EmailConfig
// ---------------------------------------------------------------------------

/// Default SMTP port (STARTTLS).
const DEFAULT_SMTP_PORT: u16 = 587;

/// Port on which the server expects TLS from the first byte.
const IMPLICIT_TLS_PORT: u16 = 465;

/// Sender name used in the subject when the SMTP user has no local part.
const DEFAULT_SENDER_NAME: &str = "Brainexia";

/// Configuration for the SMTP mailer.
#[derive(Debug, Clone)]
pub struct EmailConfig {
    pub smtp_host: String,
    /// SMTP server port (defaults to 587; 465 selects implicit TLS).
    pub smtp_port: u16,
    pub smtp_user: String,
    pub smtp_password: String,
    /// RFC 5322 "From" address. Defaults to the SMTP user.
    pub from_address: String,
}

impl EmailConfig {
    /// Load configuration from environment variables.
    ///
    /// | Variable    | Required | Default       |
    /// |-------------|----------|---------------|
    /// | `SMTP_HOST` | yes      |               |
    /// | `SMTP_USER` | yes      |               |
    /// | `SMTP_PASS` | yes      |               |
    /// | `SMTP_PORT` | no       | `587`         |
    /// | `SMTP_FROM` | no       | `SMTP_USER`   |
    pub fn from_env() -> Option<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable source. Blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Option<Self> {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let smtp_host = var("SMTP_HOST")?;
        let smtp_user = var("SMTP_USER")?;
        let smtp_password = var("SMTP_PASS")?;
        let smtp_port = var("SMTP_PORT")
            .and_then(|p| p.trim().parse().ok())
            .unwrap_or(DEFAULT_SMTP_PORT);
        let from_address = var("SMTP_FROM").unwrap_or_else(|| smtp_user.clone());

        Some(Self {
            smtp_host,
            smtp_port,
            smtp_user,
            smtp_password,
            from_address,
        })
    }

    /// Subject line for every outreach email: `Message from <sender>`.
    pub fn subject(&self) -> String {
        let sender = self
            .smtp_user
            .split('@')
            .next()
            .filter(|local| !local.is_empty())
            .unwrap_or(DEFAULT_SENDER_NAME);
        format!("Message from {sender}")
    }
}

/// Render a plain-text body as HTML: escape markup, then turn line breaks
/// into `<br>`.
pub fn html_body(text: &str) -> String {
    let mut html = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => html.push_str("&amp;"),
            '<' => html.push_str("&lt;"),
            '>' => html.push_str("&gt;"),
            '"' => html.push_str("&quot;"),
            '\'' => html.push_str("&#39;"),
            '\n' => html.push_str("<br>"),
            other => html.push(other),
        }
    }
    html
}

// ---------------------------------------------------------------------------
// EmailTransport
// ---------------------------------------------------------------------------

/// Something that can deliver a text email to one recipient.
#[async_trait]
pub trait EmailTransport: Send + Sync {
    async fn send(&self, to: &str, body: &str) -> Result<(), EmailError>;
}

// ---------------------------------------------------------------------------
// SmtpMailer
// ---------------------------------------------------------------------------

/// Sends lead emails through a configured SMTP relay.
pub struct SmtpMailer {
    config: EmailConfig,
    transport: AsyncSmtpTransport<Tokio1Executor>,
}

impl SmtpMailer {
    /// Build the SMTP transport. No connection is made until the first send.
    pub fn new(config: EmailConfig) -> Result<Self, EmailError> {
        let builder = if config.smtp_port == IMPLICIT_TLS_PORT {
            AsyncSmtpTransport::<Tokio1Executor>::relay(&config.smtp_host)?
        } else {
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.smtp_host)?
        };

        let transport = builder
            .port(config.smtp_port)
            .credentials(Credentials::new(
                config.smtp_user.clone(),
                config.smtp_password.clone(),
            ))
            .build();

        Ok(Self { config, transport })
    }
}

#[async_trait]
impl EmailTransport for SmtpMailer {
    async fn send(&self, to: &str, body: &str) -> Result<(), EmailError> {
        let from: Mailbox = self.config.from_address.parse()?;
        let to_mailbox: Mailbox = to.trim().parse()?;

        let email = Message::builder()
            .from(from)
            .to(to_mailbox)
            .subject(self.config.subject())
            .multipart(MultiPart::alternative_plain_html(
                body.to_string(),
                html_body(body),
            ))
            .map_err(|e| EmailError::Build(e.to_string()))?;

        self.transport.send(email).await?;

        tracing::info!(to, host = %self.config.smtp_host, "Lead email sent");
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn all_three_credentials_are_required() {
        assert!(EmailConfig::from_lookup(lookup(&[
            ("SMTP_HOST", "smtp.example.com"),
            ("SMTP_USER", "sales@example.com"),
        ]))
        .is_none());
        assert!(EmailConfig::from_lookup(lookup(&[
            ("SMTP_HOST", "smtp.example.com"),
            ("SMTP_USER", "sales@example.com"),
            ("SMTP_PASS", "  "),
        ]))
        .is_none());
    }

    #[test]
    fn defaults_port_and_sender() {
        let config = EmailConfig::from_lookup(lookup(&[
            ("SMTP_HOST", "smtp.example.com"),
            ("SMTP_USER", "sales@example.com"),
            ("SMTP_PASS", "secret"),
            ("SMTP_PORT", "not-a-port"),
        ]))
        .unwrap();
        assert_eq!(config.smtp_port, 587);
        assert_eq!(config.from_address, "sales@example.com");
    }

    #[test]
    fn subject_uses_user_local_part() {
        let config = EmailConfig::from_lookup(lookup(&[
            ("SMTP_HOST", "smtp.example.com"),
            ("SMTP_USER", "sales@example.com"),
            ("SMTP_PASS", "secret"),
        ]))
        .unwrap();
        assert_eq!(config.subject(), "Message from sales");

        let config = EmailConfig {
            smtp_user: "@example.com".into(),
            ..config
        };
        assert_eq!(config.subject(), "Message from Brainexia");
    }

    #[test]
    fn html_body_keeps_line_breaks() {
        assert_eq!(html_body("Hi Ana,\n\nThanks"), "Hi Ana,<br><br>Thanks");
    }

    #[test]
    fn html_body_escapes_markup() {
        assert_eq!(
            html_body("<b>Tom & Jerry's</b>\n\"quote\""),
            "&lt;b&gt;Tom &amp; Jerry&#39;s&lt;/b&gt;<br>&quot;quote&quot;"
        );
    }

    #[test]
    fn email_error_display_build() {
        let err = EmailError::Build("missing body".to_string());
        assert_eq!(err.to_string(), "Email build error: missing body");
    }

    #[tokio::test]
    async fn invalid_recipient_fails_before_connecting() {
        let config = EmailConfig::from_lookup(lookup(&[
            ("SMTP_HOST", "smtp.invalid"),
            ("SMTP_USER", "sales@example.com"),
            ("SMTP_PASS", "secret"),
        ]))
        .unwrap();
        let mailer = SmtpMailer::new(config).unwrap();
        let err = mailer.send("not-an-email", "hello").await.unwrap_err();
        assert!(matches!(err, EmailError::Address(_)));
    }
}
