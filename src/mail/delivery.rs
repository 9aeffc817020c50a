//! SMTP delivery: a fresh connection per message and a single attempt.

use std::fmt::Display;

use lettre::transport::smtp::authentication::Credentials as SmtpCredentials;
use lettre::{SmtpTransport, Transport};
use secrecy::ExposeSecret;
use tracing::{error, info, warn};

use crate::config::{Encryption, TransportConfig};
use crate::error::{AttachmentMissing, DeliveryError, Error};
use crate::mail::message::OutgoingMessage;

/// What a successful submission looked like.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeliveryReport {
    pub recipient: String,
    pub skipped_attachments: Vec<AttachmentMissing>,
}

/// Assembles messages and hands them to a lettre transport.
///
/// Generic over the transport so the real [`SmtpTransport`] and test
/// doubles share the same assembly and error handling.
pub struct DeliveryAgent<T> {
    transport: T,
}

impl DeliveryAgent<SmtpTransport> {
    /// Agent backed by a real SMTP connection built from `config`.
    pub fn smtp(config: &TransportConfig) -> Result<Self, DeliveryError> {
        build_smtp_transport(config).map(Self::new)
    }
}

impl<T> DeliveryAgent<T>
where
    T: Transport,
    T::Error: Display,
{
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    /// Assemble and submit, returning the typed error on failure.
    pub fn send(&self, message: &OutgoingMessage) -> Result<DeliveryReport, Error> {
        let assembled = message.assemble()?;

        self.transport
            .send(&assembled.message)
            .map_err(|e| DeliveryError::SendFailed(e.to_string()))?;

        Ok(DeliveryReport {
            recipient: message.to.clone(),
            skipped_attachments: assembled.skipped,
        })
    }

    /// Assemble and submit, reporting the outcome as a boolean.
    ///
    /// Every failure is logged with its underlying detail; nothing panics.
    pub fn deliver(&self, message: &OutgoingMessage) -> bool {
        match self.send(message) {
            Ok(report) => {
                info!("Email sent successfully to {}", report.recipient);
                true
            }
            Err(e) => {
                error!("Failed to send email: {e}");
                false
            }
        }
    }
}

/// Install ring as the process-wide rustls crypto provider.
///
/// Must run before the first TLS handshake. Later calls are no-ops.
pub fn install_crypto_provider() {
    let _ = rustls::crypto::ring::default_provider().install_default();
}

/// Build the SMTP transport for the configured encryption mode.
///
/// TLS, when used, verifies the server against the default root store.
/// The transport is built without connection pooling, so each submission
/// opens its own session and closes it afterwards.
pub fn build_smtp_transport(config: &TransportConfig) -> Result<SmtpTransport, DeliveryError> {
    let creds = SmtpCredentials::new(
        config.credentials.username.clone(),
        config.credentials.password.expose_secret().to_string(),
    );

    let transport_err = |e: lettre::transport::smtp::Error| DeliveryError::Transport {
        host: config.host.clone(),
        reason: e.to_string(),
    };

    let builder = match config.encryption {
        Encryption::ImplicitTls => SmtpTransport::relay(&config.host).map_err(transport_err)?,
        Encryption::StartTls => {
            SmtpTransport::starttls_relay(&config.host).map_err(transport_err)?
        }
        Encryption::None => {
            warn!(
                host = %config.host,
                "SMTP encryption disabled; credentials will be sent in clear text"
            );
            SmtpTransport::builder_dangerous(&config.host)
        }
    };

    info!(
        host = %config.host,
        port = config.port,
        encryption = config.encryption.label(),
        "SMTP transport configured"
    );

    Ok(builder.port(config.port).credentials(creds).build())
}

/// Build the SMTP agent and deliver `message` in one step.
///
/// Transport setup failures are reported the same way as send failures.
pub fn deliver_over_smtp(message: &OutgoingMessage, config: &TransportConfig) -> bool {
    match DeliveryAgent::smtp(config) {
        Ok(agent) => agent.deliver(message),
        Err(e) => {
            error!("Failed to send email: {e}");
            false
        }
    }
}
