//! send-email: one email per invocation over SMTP, with template
//! substitution, Markdown-to-HTML promotion and file attachments.

pub mod cli;
pub mod config;
pub mod content;
pub mod error;
pub mod mail;
pub mod pipeline;

#[cfg(test)]
pub(crate) mod test_support;
