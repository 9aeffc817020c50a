//! Message body preparation: resolve, classify, render.

pub mod classify;
pub mod render;
pub mod source;

pub use classify::is_markdown;
pub use render::markdown_to_email_html;
pub use source::{ContentSource, TemplateVars};
