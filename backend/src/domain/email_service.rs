//! Delivery of magic login links.
//!
//! With `email.enabled` set, links go out over SMTP. Otherwise the link is
//! written to the server log so a developer can follow it by hand.

use std::sync::Arc;

use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use lettre::message::Mailbox;
use lettre::{
    transport::smtp::authentication::Credentials,
    transport::smtp::client::{Tls, TlsParameters},
    Message, SmtpTransport, Transport,
};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmailConfig {
    pub enabled: bool,
    pub smtp_server: String,
    pub smtp_port: u16,
    pub username: String,
    pub password: String,
    pub from_email: String,
    /// Page that completes the sign in; the token is appended as `?token=`
    pub link_base_url: String,
}

impl Default for EmailConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            smtp_server: "smtp.gmail.com".to_string(),
            smtp_port: 587,
            username: String::new(),
            password: String::new(),
            from_email: String::new(),
            link_base_url: "http://localhost:8080/login".to_string(),
        }
    }
}

/// Sends a sign-in link to an email address
#[async_trait]
pub trait MagicLinkSender: Send + Sync {
    async fn send_magic_link(&self, email: &str, link: &str) -> Result<()>;
}

/// Build the link a user follows to finish signing in
pub fn magic_link_url(base: &str, token: &str) -> String {
    let separator = if base.contains('?') { '&' } else { '?' };
    format!("{}{}token={}", base, separator, token)
}

/// Pick the sender for the configuration
pub fn sender_from_config(config: &EmailConfig) -> Result<Arc<dyn MagicLinkSender>> {
    if config.enabled {
        Ok(Arc::new(SmtpMagicLinkSender::new(config)?))
    } else {
        warn!("Email delivery disabled, magic links will be written to the log");
        Ok(Arc::new(LogMagicLinkSender))
    }
}

pub struct SmtpMagicLinkSender {
    from: Mailbox,
    transport: SmtpTransport,
}

impl SmtpMagicLinkSender {
    pub fn new(config: &EmailConfig) -> Result<Self> {
        info!(
            "Initializing email delivery via {}:{}",
            config.smtp_server, config.smtp_port
        );

        let from = config
            .from_email
            .parse::<Mailbox>()
            .context("Failed to parse from email")?;

        let tls_params = TlsParameters::new(config.smtp_server.clone())
            .context("Failed to create TLS parameters")?;

        let transport = SmtpTransport::relay(&config.smtp_server)
            .context("Failed to create SMTP relay")?
            .port(config.smtp_port)
            .tls(Tls::Required(tls_params))
            .credentials(Credentials::new(
                config.username.clone(),
                config.password.clone(),
            ))
            .build();

        Ok(Self { from, transport })
    }
}

#[async_trait]
impl MagicLinkSender for SmtpMagicLinkSender {
    async fn send_magic_link(&self, email: &str, link: &str) -> Result<()> {
        let message = Message::builder()
            .from(self.from.clone())
            .to(email.parse::<Mailbox>().context("Failed to parse recipient email")?)
            .subject("Your Sales Tracker login link")
            .body(format!(
                "Hello!\n\nUse the link below to sign in to Sales Tracker:\n\n{}\n\nThe link can be used once and expires shortly.\n",
                link
            ))
            .context("Failed to build email")?;

        // SmtpTransport blocks
        let transport = self.transport.clone();
        tokio::task::spawn_blocking(move || transport.send(&message))
            .await
            .map_err(|e| anyhow!("email task failed: {}", e))?
            .context("Failed to send email")?;

        info!("Magic link email sent to {}", email);
        Ok(())
    }
}

/// Development delivery: the link goes to the server log
pub struct LogMagicLinkSender;

#[async_trait]
impl MagicLinkSender for LogMagicLinkSender {
    async fn send_magic_link(&self, email: &str, link: &str) -> Result<()> {
        warn!("Magic link for {}: {}", email, link);
        Ok(())
    }
}
