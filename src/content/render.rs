//! Markdown to standalone HTML email body.
//!
//! Email clients routinely strip `<link>` stylesheets and remote assets, so
//! everything the document needs lives in one embedded `<style>` block.

use comrak::{Options, markdown_to_html};

/// Stylesheet embedded in every rendered document.
const STYLESHEET: &str = r#"
    body {
        margin: 0 auto;
        padding: 24px;
        max-width: 760px;
        background-color: #f4f5f7;
        color: #2d3339;
        font-family: -apple-system, BlinkMacSystemFont, "Segoe UI", Helvetica, Arial, sans-serif;
        font-size: 15px;
        line-height: 1.6;
    }
    .email-content {
        padding: 28px 32px;
        background-color: #ffffff;
        border: 1px solid #dfe3e8;
        border-radius: 6px;
    }
    h1, h2, h3, h4, h5, h6 { color: #1f2a37; line-height: 1.3; margin: 24px 0 12px; }
    h1 { font-size: 1.9em; border-bottom: 2px solid #2f80ed; padding-bottom: 8px; margin-top: 0; }
    h2 { font-size: 1.5em; border-bottom: 1px solid #c9d1da; padding-bottom: 6px; }
    h3 { font-size: 1.25em; }
    h4 { font-size: 1.1em; }
    h5, h6 { font-size: 1em; color: #4a5561; }
    p { margin: 10px 0; }
    ul, ol { margin: 10px 0; padding-left: 28px; }
    li { margin: 4px 0; }
    a { color: #2f80ed; text-decoration: underline; }
    strong { font-weight: 600; }
    del { color: #7b8794; }
    blockquote {
        margin: 14px 0;
        padding: 4px 16px;
        border-left: 4px solid #2f80ed;
        background-color: #f7f9fc;
        color: #4a5561;
    }
    code {
        padding: 2px 5px;
        background-color: #f1f3f5;
        border-radius: 3px;
        font-family: Menlo, Consolas, "Courier New", monospace;
        font-size: 0.9em;
    }
    pre {
        padding: 14px;
        background-color: #f1f3f5;
        border: 1px solid #dfe3e8;
        border-radius: 4px;
        overflow-x: auto;
        white-space: pre;
    }
    pre code { padding: 0; background-color: transparent; }
    hr { border: 0; border-top: 1px solid #dfe3e8; margin: 24px 0; }
    table { width: 100%; margin: 16px 0; border-collapse: collapse; }
    th, td { padding: 8px 12px; border: 1px solid #dfe3e8; text-align: left; }
    th { background-color: #2f80ed; color: #ffffff; font-weight: 600; }
    tr:nth-child(even) td { background-color: #f7f9fc; }
"#;

/// Render a Markdown fragment without the surrounding document.
///
/// GFM tables, strikethrough, footnotes and definition lists are on, and
/// every soft line break is emitted as `<br />`. Inline HTML passes through.
pub fn render_fragment(markdown: &str) -> String {
    let mut options = Options::default();
    options.extension.table = true;
    options.extension.strikethrough = true;
    options.extension.footnotes = true;
    options.extension.description_lists = true;
    options.render.hardbreaks = true;
    options.render.unsafe_ = true;
    markdown_to_html(markdown, &options)
}

/// Render Markdown into a complete, self-contained HTML email document.
pub fn markdown_to_email_html(markdown: &str) -> String {
    let fragment = render_fragment(markdown);

    let mut html = String::with_capacity(STYLESHEET.len() + fragment.len() + 512);
    html.push_str("<!DOCTYPE html>\n");
    html.push_str("<html>\n<head>\n");
    html.push_str("<meta charset=\"UTF-8\">\n");
    html.push_str(
        "<meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">\n",
    );
    html.push_str("<style>");
    html.push_str(STYLESHEET);
    html.push_str("</style>\n</head>\n<body>\n");
    html.push_str("<div class=\"email-content\">\n");
    html.push_str(&fragment);
    html.push_str("</div>\n</body>\n</html>\n");
    html
}
