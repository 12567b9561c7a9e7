use std::sync::LazyLock;

use regex::Regex;

// Named, decimal and hex character references that must survive escaping.
static ENTITY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:[A-Za-z][A-Za-z0-9]*|#[0-9]+|#[xX][0-9A-Fa-f]+);").unwrap()
});

/// Escape `&`, `<`, `>`, `"` and `'` for use in text or a quoted attribute.
///
/// An `&` that already starts a character reference is left alone, so
/// escaping escaped text is a no-op.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut pieces = text.split('&');

    if let Some(first) = pieces.next() {
        html_escape::encode_quoted_attribute_to_string(first, &mut out);
    }

    for piece in pieces {
        if ENTITY_RE.is_match(piece) {
            out.push('&');
        } else {
            out.push_str("&amp;");
        }
        html_escape::encode_quoted_attribute_to_string(piece, &mut out);
    }

    out
}

#[cfg(test)]
mod tests {
    use super::escape_html;

    #[test]
    fn escapes_markup_characters() {
        assert_eq!(escape_html("<b> & \"q\""), "&lt;b&gt; &amp; &quot;q&quot;");
    }

    #[test]
    fn single_quote_is_escaped() {
        assert!(!escape_html("it's").contains('\''));
    }

    #[test]
    fn keeps_existing_references() {
        assert_eq!(escape_html("&amp; &#38; &#x26; &copy;"), "&amp; &#38; &#x26; &copy;");
    }

    #[test]
    fn bare_ampersands() {
        assert_eq!(escape_html("a & b &c &;"), "a &amp; b &amp;c &amp;;");
        assert_eq!(escape_html("&"), "&amp;");
    }

    #[test]
    fn idempotent() {
        let once = escape_html("1 < 2 && 'x' > \"y\"");
        assert_eq!(escape_html(&once), once);
    }
}
