use aho_corasick::{AhoCorasick, MatchKind};
use once_cell::sync::Lazy;
use std::borrow::Cow;

// Use LeftmostLongest to ensure longer entities are matched first (e.g., &amp; instead of &lt;)
static XML_UNESCAPER: Lazy<AhoCorasick> = Lazy::new(|| {
    AhoCorasick::builder()
        .match_kind(MatchKind::LeftmostLongest)
        .build(["&amp;", "&lt;", "&gt;", "&quot;", "&apos;"])
        .expect("Failed to build XML unescaper")
});

/// Unescape XML special characters and numeric character references.
///
/// Replaces the five predefined entities and `&#NN;` / `&#xHH;` references.
/// Unknown or malformed entities are left unchanged.
///
/// # Examples
///
/// ```
/// use odfgrid::common::xml::unescape_xml;
/// assert_eq!(unescape_xml("&lt;a &amp; b&gt;"), "<a & b>");
/// assert_eq!(unescape_xml("&#65;&#x42;"), "AB");
/// assert_eq!(unescape_xml("&amp;lt;"), "&lt;"); // &amp; is matched first
/// assert_eq!(unescape_xml("&invalid;"), "&invalid;");
/// ```
pub fn unescape_xml(s: &str) -> Cow<'_, str> {
    if !s.contains('&') {
        return Cow::Borrowed(s);
    }

    let named = if s.contains("&#") {
        Cow::Owned(resolve_char_refs(s))
    } else {
        Cow::Borrowed(s)
    };
    Cow::Owned(XML_UNESCAPER.replace_all(&named, &["&", "<", ">", "\"", "'"]))
}

/// Resolve the name of a general entity reference (the part between `&` and `;`).
///
/// Returns `None` for entities that are neither predefined nor numeric.
pub fn resolve_entity(name: &str) -> Option<char> {
    match name {
        "amp" => Some('&'),
        "lt" => Some('<'),
        "gt" => Some('>'),
        "quot" => Some('"'),
        "apos" => Some('\''),
        _ => parse_char_ref(name.strip_prefix('#')?),
    }
}

fn parse_char_ref(code: &str) -> Option<char> {
    let value = match code.strip_prefix('x').or_else(|| code.strip_prefix('X')) {
        Some(hex) => u32::from_str_radix(hex, 16).ok()?,
        None => code.parse::<u32>().ok()?,
    };
    char::from_u32(value)
}

// Numeric references are resolved first; `&#38;` must not feed the named pass,
// so a literal ampersand produced here is re-escaped.
fn resolve_char_refs(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut rest = s;

    while let Some(pos) = rest.find("&#") {
        out.push_str(&rest[..pos]);
        let tail = &rest[pos + 2..];
        match tail.find(';').and_then(|end| Some((parse_char_ref(&tail[..end])?, end))) {
            Some(('&', end)) => {
                out.push_str("&amp;");
                rest = &tail[end + 1..];
            },
            Some((ch, end)) => {
                out.push(ch);
                rest = &tail[end + 1..];
            },
            None => {
                out.push_str("&#");
                rest = tail;
            },
        }
    }
    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unescape_passthrough() {
        assert!(matches!(unescape_xml("plain"), Cow::Borrowed("plain")));
        assert_eq!(unescape_xml("a & b"), "a & b");
        assert_eq!(unescape_xml("&amp"), "&amp");
    }

    #[test]
    fn test_unescape_numeric() {
        assert_eq!(unescape_xml("caf&#233;"), "café");
        assert_eq!(unescape_xml("&#x20AC;5"), "€5");
        assert_eq!(unescape_xml("&#38;lt;"), "&lt;");
        assert_eq!(unescape_xml("&#zz;"), "&#zz;");
    }

    #[test]
    fn test_resolve_entity() {
        assert_eq!(resolve_entity("amp"), Some('&'));
        assert_eq!(resolve_entity("#x41"), Some('A'));
        assert_eq!(resolve_entity("#10"), Some('\n'));
        assert_eq!(resolve_entity("nbsp"), None);
    }
}
