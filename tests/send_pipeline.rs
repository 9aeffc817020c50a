//! End-to-end pipeline tests: CLI arguments in, MIME message out.
//!
//! Delivery goes through lettre's stub transport, so no network is used.

use std::path::Path;

use clap::Parser;
use lettre::transport::stub::StubTransport;

use send_email::cli::Cli;
use send_email::config::BodyKind;
use send_email::error::{ContentError, Error, UsageError};
use send_email::mail::DeliveryAgent;

fn cli(extra: &[&str]) -> Cli {
    let mut args = vec![
        "send-email",
        "--to",
        "bob@example.com",
        "--subject",
        "Weekly digest",
        "--smtp-server",
        "smtp.example.com",
        "--smtp-port",
        "587",
        "--username",
        "robot@example.com",
        "--password",
        "pw",
    ];
    args.extend_from_slice(extra);
    Cli::try_parse_from(args).unwrap()
}

fn path_str(path: &Path) -> &str {
    path.to_str().unwrap()
}

#[test]
fn markdown_template_with_attachment_is_sent_as_html() {
    let dir = tempfile::tempdir().unwrap();
    let template = dir.path().join("digest.md");
    std::fs::write(
        &template,
        "# Hello {{name}}\n\n- builds: {{builds}}\n- failures: 0\n- {{missing}}\n",
    )
    .unwrap();
    let attachment = dir.path().join("summary.txt");
    std::fs::write(&attachment, "all green").unwrap();

    let request = cli(&[
        "--template",
        path_str(&template),
        "--template-vars",
        r#"{"name": "Ana", "builds": 12}"#,
        "--attach",
        path_str(&attachment),
        "--from-name",
        "Build Robot",
    ])
    .into_request()
    .unwrap();

    let (message, _transport) = request.prepare().unwrap();
    assert_eq!(message.body_kind, BodyKind::Html);
    assert!(message.body.contains("<h1>Hello Ana</h1>"));
    assert!(message.body.contains("builds: 12"));
    assert!(message.body.contains("{{missing}}"));
    assert_eq!(message.from_address, "robot@example.com");

    let agent = DeliveryAgent::new(StubTransport::new_ok());
    let report = agent.send(&message).unwrap();
    assert_eq!(report.recipient, "bob@example.com");
    assert!(report.skipped_attachments.is_empty());
}

#[test]
fn plain_text_literal_stays_plain() {
    let request = cli(&["--content", "Hi Bob,\nthe deploy finished.\nAna"])
        .into_request()
        .unwrap();
    let (message, _) = request.prepare().unwrap();
    assert_eq!(message.body_kind, BodyKind::Plain);
    assert_eq!(message.body, "Hi Bob,\nthe deploy finished.\nAna");

    let assembled = message.assemble().unwrap();
    let raw = String::from_utf8_lossy(&assembled.message.formatted()).into_owned();
    assert!(raw.contains("text/plain"));
}

#[test]
fn missing_attachment_does_not_block_delivery() {
    let dir = tempfile::tempdir().unwrap();
    let ghost = dir.path().join("ghost.pdf");

    let request = cli(&["--content", "see attached", "--attach", path_str(&ghost)])
        .into_request()
        .unwrap();
    let (message, _) = request.prepare().unwrap();

    let agent = DeliveryAgent::new(StubTransport::new_ok());
    let report = agent.send(&message).unwrap();
    assert_eq!(report.skipped_attachments.len(), 1);
    assert_eq!(report.skipped_attachments[0].path, ghost);
    assert!(agent.deliver(&message));
}

#[test]
fn transport_failure_returns_false() {
    let request = cli(&["--content", "hello"]).into_request().unwrap();
    let (message, _) = request.prepare().unwrap();

    let agent = DeliveryAgent::new(StubTransport::new_error());
    assert!(!agent.deliver(&message));
    assert!(matches!(agent.send(&message), Err(Error::Delivery(_))));
}

#[test]
fn conflicting_sources_fail_before_io() {
    let err = cli(&["--content", "x", "--template", "/does/not/exist.md"])
        .into_request()
        .unwrap_err();
    assert!(matches!(err, UsageError::ConflictingSources));
}

#[test]
fn missing_template_is_reported() {
    let request = cli(&["--template", "/does/not/exist.md", "--template-vars", "{}"])
        .into_request()
        .unwrap();
    let err = request.prepare().unwrap_err();
    assert!(matches!(
        err,
        Error::Content(ContentError::TemplateNotFound { .. })
    ));
}
