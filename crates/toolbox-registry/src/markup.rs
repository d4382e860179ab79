//! Markup helpers shared by the loader views

/// Escape text for inclusion in HTML content or a quoted attribute.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Inline error block shown in a container when loading fails.
pub(crate) fn error_view(class: &str, message: &str) -> String {
    format!(
        r#"<div class="{}">{}</div>"#,
        escape(class),
        escape(message)
    )
}
