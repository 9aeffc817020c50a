//! Command-line surface.

use std::path::PathBuf;

use clap::Parser;
use secrecy::SecretString;

use crate::config::{BodyKind, Credentials, Encryption, TransportConfig};
use crate::content::ContentSource;
use crate::error::UsageError;
use crate::pipeline::SendRequest;

#[derive(Parser)]
#[command(name = "send-email")]
#[command(version)]
#[command(about = "Send email via SMTP", long_about = None)]
pub struct Cli {
    /// Recipient email address
    #[arg(long)]
    pub to: String,

    /// Email subject
    #[arg(long)]
    pub subject: String,

    /// Email body content (or use --template)
    #[arg(long)]
    pub content: Option<String>,

    /// Path to email template file
    #[arg(long)]
    pub template: Option<PathBuf>,

    /// JSON object of template variables
    #[arg(long)]
    pub template_vars: Option<String>,

    /// SMTP server hostname
    #[arg(long, env = "SMTP_SERVER")]
    pub smtp_server: String,

    /// SMTP server port
    #[arg(long, env = "SMTP_PORT")]
    pub smtp_port: u16,

    /// SMTP username
    #[arg(long, env = "SMTP_USERNAME")]
    pub username: String,

    /// SMTP password
    #[arg(long, env = "SMTP_PASSWORD", hide_env_values = true)]
    pub password: String,

    /// Sender email address (default: username)
    #[arg(long)]
    pub from_addr: Option<String>,

    /// Sender display name
    #[arg(long)]
    pub from_name: Option<String>,

    /// Content type
    #[arg(long, value_enum, default_value_t = BodyKind::Plain)]
    pub content_type: BodyKind,

    /// File attachment (can be used multiple times)
    #[arg(long = "attach")]
    pub attachments: Vec<PathBuf>,

    /// Disable STARTTLS
    #[arg(long)]
    pub no_tls: bool,

    /// Use implicit TLS instead of STARTTLS
    #[arg(long)]
    pub use_ssl: bool,
}

impl Cli {
    /// Validate the arguments into a pipeline request. No I/O happens here.
    pub fn into_request(self) -> Result<SendRequest, UsageError> {
        let source = ContentSource::from_inputs(
            self.content,
            self.template,
            self.template_vars.as_deref(),
        )?;

        let transport = TransportConfig::new(
            self.smtp_server,
            self.smtp_port,
            Credentials {
                username: self.username,
                password: SecretString::from(self.password),
            },
        )
        .with_encryption(Encryption::from_flags(self.no_tls, self.use_ssl));

        Ok(SendRequest {
            to: self.to,
            subject: self.subject,
            source,
            declared_kind: self.content_type,
            from_address: self.from_addr,
            from_name: self.from_name,
            attachments: self.attachments,
            transport,
        })
    }
}
