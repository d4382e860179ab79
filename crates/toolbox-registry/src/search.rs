//! Keyword search and highlighting for the tool catalog

use regex::RegexBuilder;

use crate::markup;
use crate::registry::ToolDefinition;

const MARK_OPEN: &str = "<mark>";
const MARK_CLOSE: &str = "</mark>";

/// Filter `tools` to those whose name or description contains `keyword`.
///
/// Matching is case-insensitive and ignores surrounding whitespace in the
/// keyword. A blank keyword returns `tools` as given.
pub fn search<'a>(tools: &[&'a ToolDefinition], keyword: &str) -> Vec<&'a ToolDefinition> {
    let keyword = keyword.trim();
    if keyword.is_empty() {
        return tools.to_vec();
    }

    let keyword = keyword.to_lowercase();
    tools
        .iter()
        .copied()
        .filter(|tool| tool.matches_lowercase(&keyword))
        .collect()
}

/// Wrap every case-insensitive occurrence of `keyword` in `text` with
/// `<mark>` tags. The keyword is matched literally.
///
/// `text` is plain text: everything outside the tags comes back
/// HTML-escaped, so the result is safe to insert as markup.
pub fn highlight(text: &str, keyword: &str) -> String {
    let keyword = keyword.trim();
    if keyword.is_empty() {
        return markup::escape(text);
    }

    let pattern = RegexBuilder::new(&regex::escape(keyword))
        .case_insensitive(true)
        .build();
    let re = match pattern {
        Ok(re) => re,
        Err(e) => {
            tracing::warn!("Cannot highlight {:?}: {}", keyword, e);
            return markup::escape(text);
        }
    };

    let mut out = String::with_capacity(text.len());
    let mut last = 0;
    for found in re.find_iter(text) {
        out.push_str(&markup::escape(&text[last..found.start()]));
        out.push_str(MARK_OPEN);
        out.push_str(&markup::escape(found.as_str()));
        out.push_str(MARK_CLOSE);
        last = found.end();
    }
    out.push_str(&markup::escape(&text[last..]));
    out
}
