//! Outgoing message model and MIME assembly.

use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use lettre::Address;
use lettre::message::header::ContentType;
use lettre::message::{Attachment, Mailbox, MultiPart, SinglePart};
use tracing::warn;

use crate::config::BodyKind;
use crate::error::{AttachmentMissing, ContentError, DeliveryError, Error, UsageError};

static OCTET_STREAM: LazyLock<ContentType> = LazyLock::new(|| {
    ContentType::parse("application/octet-stream").expect("octet-stream is a valid content type")
});

/// One email, fully resolved and ready to be assembled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingMessage {
    pub to: String,
    pub subject: String,
    pub body: String,
    pub body_kind: BodyKind,
    pub from_address: String,
    pub from_name: Option<String>,
    pub attachments: Vec<PathBuf>,
}

/// A lettre message plus the attachments that had to be left out.
#[derive(Debug)]
pub struct AssembledMessage {
    pub message: lettre::Message,
    pub skipped: Vec<AttachmentMissing>,
}

impl OutgoingMessage {
    pub fn new(
        to: impl Into<String>,
        subject: impl Into<String>,
        from_address: impl Into<String>,
    ) -> Self {
        Self {
            to: to.into(),
            subject: subject.into(),
            body: String::new(),
            body_kind: BodyKind::default(),
            from_address: from_address.into(),
            from_name: None,
            attachments: Vec::new(),
        }
    }

    pub fn with_body(mut self, body: impl Into<String>, kind: BodyKind) -> Self {
        self.body = body.into();
        self.body_kind = kind;
        self
    }

    pub fn with_from_name(mut self, name: impl Into<String>) -> Self {
        self.from_name = Some(name.into());
        self
    }

    pub fn with_attachments<I, P>(mut self, paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        self.attachments = paths.into_iter().map(Into::into).collect();
        self
    }

    /// Build the MIME message.
    ///
    /// Missing attachments are logged once each and skipped. Without any
    /// attachment the body is the only part; otherwise the message is
    /// `multipart/mixed` with the body first.
    pub fn assemble(&self) -> Result<AssembledMessage, Error> {
        let from = compose_from(&self.from_address, self.from_name.as_deref())?;
        let to: Mailbox = self
            .to
            .parse()
            .map_err(|e: lettre::address::AddressError| UsageError::InvalidAddress {
                field: "recipient",
                value: self.to.clone(),
                reason: e.to_string(),
            })?;

        let builder = lettre::Message::builder()
            .from(from)
            .to(to)
            .subject(self.subject.as_str());

        let body = match self.body_kind {
            BodyKind::Plain => SinglePart::plain(self.body.clone()),
            BodyKind::Html => SinglePart::html(self.body.clone()),
        };

        let mut skipped = Vec::new();
        let mut parts = Vec::new();
        for path in &self.attachments {
            if let Err(missing) = check_attachment(path) {
                warn!("{missing}");
                skipped.push(missing);
                continue;
            }
            parts.push(load_attachment(path)?);
        }

        let built = if parts.is_empty() {
            builder.singlepart(body)
        } else {
            let mixed = parts
                .into_iter()
                .fold(MultiPart::mixed().singlepart(body), |mixed, part| {
                    mixed.singlepart(part)
                });
            builder.multipart(mixed)
        };

        let message = built.map_err(|e| DeliveryError::Build(e.to_string()))?;
        Ok(AssembledMessage { message, skipped })
    }
}

/// Compose the From mailbox.
///
/// A display name, when given and non-blank, is quoted or encoded as the
/// header rules require when the mailbox is formatted.
pub fn compose_from(address: &str, display_name: Option<&str>) -> Result<Mailbox, UsageError> {
    let email: Address = address
        .trim()
        .parse()
        .map_err(|e: lettre::address::AddressError| UsageError::InvalidAddress {
            field: "sender",
            value: address.to_string(),
            reason: e.to_string(),
        })?;

    let name = display_name
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .map(str::to_string);

    Ok(Mailbox::new(name, email))
}

/// Existence check for one attachment path.
pub fn check_attachment(path: &Path) -> Result<(), AttachmentMissing> {
    if path.exists() {
        Ok(())
    } else {
        Err(AttachmentMissing {
            path: path.to_path_buf(),
        })
    }
}

/// MIME type guessed from the file name, `application/octet-stream` when
/// the extension is unknown.
pub fn guess_content_type(path: &Path) -> ContentType {
    let mime = mime_guess::from_path(path).first_or_octet_stream();
    ContentType::parse(mime.essence_str()).unwrap_or_else(|_| OCTET_STREAM.clone())
}

fn load_attachment(path: &Path) -> Result<SinglePart, ContentError> {
    let bytes = std::fs::read(path).map_err(|source| ContentError::AttachmentRead {
        path: path.to_path_buf(),
        source,
    })?;

    let filename = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "attachment".to_string());

    Ok(Attachment::new(filename).body(bytes, guess_content_type(path)))
}
