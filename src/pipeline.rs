//! The send pipeline: resolve content, detect Markdown, render, deliver.

use std::path::PathBuf;

use tracing::info;

use crate::config::{BodyKind, TransportConfig};
use crate::content::{ContentSource, is_markdown, markdown_to_email_html};
use crate::error::Result;
use crate::mail::{OutgoingMessage, deliver_over_smtp};

/// Everything one invocation needs, validated but not yet resolved.
#[derive(Debug, Clone)]
pub struct SendRequest {
    pub to: String,
    pub subject: String,
    pub source: ContentSource,
    pub declared_kind: BodyKind,
    /// Defaults to the SMTP username when absent.
    pub from_address: Option<String>,
    pub from_name: Option<String>,
    pub attachments: Vec<PathBuf>,
    pub transport: TransportConfig,
}

/// Promote plain-declared Markdown to a rendered HTML document.
///
/// HTML-declared and empty bodies pass through untouched.
pub fn prepare_body(content: String, declared: BodyKind) -> (String, BodyKind) {
    if declared == BodyKind::Plain && !content.is_empty() && is_markdown(&content) {
        info!("Detected markdown content, converting to HTML...");
        (markdown_to_email_html(&content), BodyKind::Html)
    } else {
        (content, declared)
    }
}

impl SendRequest {
    /// Resolve the body and build the message to send.
    ///
    /// Fails only if the template cannot be read.
    pub fn prepare(self) -> Result<(OutgoingMessage, TransportConfig)> {
        let content = self.source.resolve()?;
        let (body, kind) = prepare_body(content, self.declared_kind);

        let from_address = self
            .from_address
            .filter(|a| !a.is_empty())
            .unwrap_or_else(|| self.transport.credentials.username.clone());

        let mut message = OutgoingMessage::new(self.to, self.subject, from_address)
            .with_body(body, kind)
            .with_attachments(self.attachments);
        if let Some(name) = self.from_name.filter(|n| !n.is_empty()) {
            message = message.with_from_name(name);
        }

        Ok((message, self.transport))
    }
}

/// Run the whole pipeline against a live SMTP server.
///
/// `Err` means the message could not be prepared; `Ok(false)` means it was
/// prepared but delivery failed (already logged).
pub fn run(request: SendRequest) -> Result<bool> {
    let (message, transport) = request.prepare()?;
    Ok(deliver_over_smtp(&message, &transport))
}
