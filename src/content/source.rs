//! Content resolution from literal body text or a `{{placeholder}}` template.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::LazyLock;

use regex::{Captures, Regex};
use tracing::warn;

use crate::error::{ContentError, UsageError};

/// Placeholder name to substitution value.
pub type TemplateVars = HashMap<String, String>;

/// `{{name}}` where the name holds no braces, so `{{{x}}}` resolves the
/// innermost pair.
static PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{\{([^{}]*)\}\}").expect("placeholder pattern is valid"));

/// The single active source of the message body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentSource {
    Literal(String),
    Template { path: PathBuf, vars: TemplateVars },
    Empty,
}

impl ContentSource {
    /// Pick the content source from raw caller input.
    ///
    /// Touches neither the filesystem nor the network, so a conflicting
    /// invocation fails before anything observable happens. Empty strings
    /// count as "not given", including a blank variables string.
    pub fn from_inputs(
        content: Option<String>,
        template: Option<PathBuf>,
        template_vars: Option<&str>,
    ) -> Result<Self, UsageError> {
        let content = content.filter(|c| !c.is_empty());
        let template = template.filter(|t| !t.as_os_str().is_empty());
        let template_vars = template_vars.filter(|v| !v.trim().is_empty());

        match (content, template) {
            (Some(_), Some(_)) => Err(UsageError::ConflictingSources),
            (Some(text), None) => Ok(Self::Literal(text)),
            (None, Some(path)) => {
                let vars = match template_vars {
                    Some(json) => parse_template_vars(json)?,
                    None => {
                        warn!("No template variables provided");
                        TemplateVars::new()
                    }
                };
                Ok(Self::Template { path, vars })
            }
            (None, None) => Ok(Self::Empty),
        }
    }

    /// Produce the final body text.
    pub fn resolve(self) -> Result<String, ContentError> {
        match self {
            Self::Literal(text) => Ok(text),
            Self::Template { path, vars } => {
                let raw = std::fs::read_to_string(&path)
                    .map_err(|source| ContentError::TemplateNotFound { path, source })?;
                Ok(substitute(&raw, &vars))
            }
            Self::Empty => Ok(String::new()),
        }
    }
}

/// Parse a JSON object of template variables.
///
/// String values are used as-is; any other JSON value is substituted using
/// its JSON text (`42`, `true`, `null`).
pub fn parse_template_vars(json: &str) -> Result<TemplateVars, UsageError> {
    let value: serde_json::Value = serde_json::from_str(json)
        .map_err(|e| UsageError::InvalidTemplateVars(e.to_string()))?;

    let serde_json::Value::Object(map) = value else {
        return Err(UsageError::InvalidTemplateVars(
            "expected a JSON object".into(),
        ));
    };

    Ok(map
        .into_iter()
        .map(|(key, value)| {
            let text = match value {
                serde_json::Value::String(s) => s,
                other => other.to_string(),
            };
            (key, text)
        })
        .collect())
}

/// Replace every `{{name}}` that has a value in `vars`; leave the rest.
///
/// Single pass over the template: substituted values are never re-scanned.
pub fn substitute(template: &str, vars: &TemplateVars) -> String {
    PLACEHOLDER
        .replace_all(template, |caps: &Captures<'_>| match vars.get(&caps[1]) {
            Some(value) => value.clone(),
            None => caps[0].to_string(),
        })
        .into_owned()
}
