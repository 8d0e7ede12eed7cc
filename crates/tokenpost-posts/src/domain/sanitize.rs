//! Input sanitization for untrusted titles and contents.

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::Regex;

static SCRIPT_OR_STYLE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)<(?:script|style)\b[^>]*>.*?</(?:script|style)\s*>")
        .expect("script/style pattern is valid")
});

static TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<[a-zA-Z/!?][^>]*>").expect("tag pattern is valid"));

static PERCENT_OCTET: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"%[a-fA-F0-9]{2}").expect("octet pattern is valid"));

static WHITESPACE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("whitespace pattern is valid"));

/// Escapes every `<` that is not closed by a `>` before the next `<` or the
/// end of input, so it reads as text instead of opening a tag.
fn escape_unterminated_angles(raw: &str) -> Cow<'_, str> {
    if !raw.contains('<') {
        return Cow::Borrowed(raw);
    }

    let mut escaped = String::with_capacity(raw.len());
    for (index, c) in raw.char_indices() {
        if c != '<' {
            escaped.push(c);
            continue;
        }
        let rest = &raw[index + 1..];
        let closed = rest
            .find(['<', '>'])
            .is_some_and(|at| rest.as_bytes()[at] == b'>');
        if closed {
            escaped.push('<');
        } else {
            escaped.push_str("&lt;");
        }
    }
    Cow::Owned(escaped)
}

/// Reduces a title to single-line plain text.
///
/// A `<` that never closes is escaped to `&lt;` and kept. Then
/// `<script>`/`<style>` blocks are removed with their contents, followed by
/// every remaining tag, percent-encoded octets and control characters.
/// Whitespace is collapsed and the result trimmed.
#[must_use]
pub fn sanitize_title(raw: &str) -> String {
    let escaped = escape_unterminated_angles(raw);
    let without_blocks = SCRIPT_OR_STYLE.replace_all(&escaped, "");
    let without_tags = TAG.replace_all(&without_blocks, "");
    let without_octets = PERCENT_OCTET.replace_all(&without_tags, "");
    let printable: String = without_octets
        .chars()
        .map(|c| if c.is_control() { ' ' } else { c })
        .collect();
    WHITESPACE_RUN
        .replace_all(&printable, " ")
        .trim()
        .to_owned()
}

/// Reduces content to an allow-listed rich-text subset.
///
/// Formatting tags (paragraphs, emphasis, links, lists, headings, quotes,
/// code) survive; scripts, styles, event handlers and unsafe URL schemes
/// are dropped.
#[must_use]
pub fn sanitize_content(raw: &str) -> String {
    ammonia::clean(raw)
}
