//! Page data and rendered page views.

use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::sync::Arc;

/// Turns the items of one page into displayable text.
pub type PageFormatter = Arc<dyn Fn(&[JsonValue]) -> String + Send + Sync>;

/// Formatter that renders each item on its own line.
///
/// Strings are written without quotes, everything else as compact JSON.
pub fn join_lines() -> PageFormatter {
    Arc::new(|items: &[JsonValue]| {
        items
            .iter()
            .map(|item| match item {
                JsonValue::String(s) => s.clone(),
                other => other.to_string(),
            })
            .collect::<Vec<_>>()
            .join("\n")
    })
}

/// One page of a cursor-paged result, as reported by the remote side.
///
/// The flags are taken from the result, never derived locally.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Getters)]
pub struct Page {
    items: Vec<JsonValue>,
    cursor: Option<String>,
    has_next: bool,
    has_previous: bool,
    #[serde(default)]
    total_count: Option<u64>,
}

impl Page {
    /// Create a page.
    pub fn new(
        items: Vec<JsonValue>,
        cursor: Option<String>,
        has_next: bool,
        has_previous: bool,
    ) -> Self {
        Self {
            items,
            cursor,
            has_next,
            has_previous,
            total_count: None,
        }
    }

    /// Attach the total number of items across all pages.
    pub fn with_total_count(mut self, total_count: u64) -> Self {
        self.total_count = Some(total_count);
        self
    }

    /// Whether the page holds no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// What a reply shows for the current page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Getters)]
pub struct PageView {
    title: Option<String>,
    content: String,
    footer: String,
    has_next: bool,
    has_previous: bool,
}

impl PageView {
    /// Create a view.
    pub fn new(
        content: impl Into<String>,
        footer: impl Into<String>,
        has_next: bool,
        has_previous: bool,
    ) -> Self {
        Self {
            title: None,
            content: content.into(),
            footer: footer.into(),
            has_next,
            has_previous,
        }
    }

    /// Attach a bold heading shown above the content.
    pub fn with_title(mut self, title: Option<String>) -> Self {
        self.title = title;
        self
    }

    /// The whole message body: heading, content in a code block, footer.
    ///
    /// Content longer than `max_content_len` characters is cut.
    pub fn render(&self, max_content_len: usize) -> String {
        let body = format!(
            "```\n{}\n```\n{}",
            truncate_content(&self.content, max_content_len),
            self.footer
        );
        match &self.title {
            Some(title) => format!("**{title}**\n{body}"),
            None => body,
        }
    }
}

/// Cut `content` to at most `max_len` characters, marking the cut with `...`.
///
/// # Examples
///
/// ```
/// use lorebot_paging::truncate_content;
///
/// assert_eq!(truncate_content("abcdef", 10), "abcdef");
/// assert_eq!(truncate_content("abcdef", 5), "ab...");
/// ```
pub fn truncate_content(content: &str, max_len: usize) -> String {
    if content.chars().count() <= max_len {
        return content.to_string();
    }
    let keep = max_len.saturating_sub(3);
    let mut cut: String = content.chars().take(keep).collect();
    cut.push_str("...");
    cut
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_join_lines_unquotes_strings() {
        let format = join_lines();
        assert_eq!(format(&[json!("a"), json!(2)]), "a\n2");
    }

    #[test]
    fn test_render_wraps_content() {
        let view = PageView::new("x", "Page 1", false, false);
        assert_eq!(view.render(100), "```\nx\n```\nPage 1");

        let titled = view.with_title(Some("All characters (3 total)".into()));
        assert_eq!(
            titled.render(100),
            "**All characters (3 total)**\n```\nx\n```\nPage 1"
        );
    }
}
