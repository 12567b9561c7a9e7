//! Inline formatting: bold, italic, code spans and links.
//!
//! Each construct is handled by its own pass over the text, in a fixed order
//! (bold, italic, code, link). A pass only scans text that no earlier pass
//! has turned into markup, so a construct is never formatted twice and the
//! content of e.g. a code span can't be picked apart by a later pass.

use crate::escape::escape_html;
use crate::url::UrlSanitizer;

/// Formatter for free-running text.
///
/// Without a URL sanitizer, link targets are only HTML-escaped. Text outside
/// any construct is passed through as-is unless `escape_plain_text` is set.
#[derive(Clone, Copy, Default)]
pub struct InlineFormatter<'a> {
    url_sanitizer: Option<&'a dyn UrlSanitizer>,
    escape_plain_text: bool,
}

impl<'a> InlineFormatter<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_url_sanitizer(mut self, sanitizer: &'a dyn UrlSanitizer) -> Self {
        self.url_sanitizer = Some(sanitizer);
        self
    }

    pub fn escape_plain_text(mut self, escape: bool) -> Self {
        self.escape_plain_text = escape;
        self
    }

    /// Rewrite inline markers in `text` into HTML.
    pub fn format(&self, text: &str) -> String {
        let mut pieces = vec![Piece::Text(text.to_string())];

        pieces = rewrite(pieces, |s, i| delimited(s, i, "**", "strong"));
        pieces = rewrite(pieces, |s, i| delimited(s, i, "__", "strong"));
        pieces = rewrite(pieces, |s, i| emphasis(s, i, '*'));
        pieces = rewrite(pieces, |s, i| emphasis(s, i, '_'));
        pieces = rewrite(pieces, |s, i| delimited(s, i, "`", "code"));
        pieces = rewrite(pieces, |s, i| self.link(s, i));

        let mut out = String::with_capacity(text.len());
        for piece in pieces {
            match piece {
                Piece::Text(text) if self.escape_plain_text => out.push_str(&escape_html(&text)),
                Piece::Text(text) | Piece::Markup(text) => out.push_str(&text),
            }
        }
        out
    }

    /// `[label](target)` starting at `start`.
    fn link(&self, text: &str, start: usize) -> Option<(usize, String)> {
        let rest = text[start..].strip_prefix('[')?;
        let label_len = rest.find(']')?;
        if label_len == 0 {
            return None;
        }
        let label = &rest[..label_len];

        let after_label = rest[label_len + 1..].strip_prefix('(')?;
        let target_len = after_label.find(')')?;
        if target_len == 0 {
            return None;
        }
        let target = &after_label[..target_len];

        let href = match self.url_sanitizer {
            Some(sanitizer) => sanitizer.sanitize(target),
            None => escape_html(target),
        };
        let end = start + 1 + label_len + 2 + target_len + 1;
        let html = format!(
            "<a href=\"{href}\" rel=\"nofollow\">{}</a>",
            escape_html(label)
        );
        Some((end, html))
    }
}

/// Format `text` with no URL sanitizer and plain text left unescaped.
pub fn format(text: &str) -> String {
    InlineFormatter::new().format(text)
}

#[derive(Debug)]
enum Piece {
    Text(String),
    Markup(String),
}

/// Run `matcher` over every text piece, splitting it around each match.
///
/// `matcher(text, i)` is tried at each char boundary `i`, leftmost first;
/// on success it returns the end of the match and its replacement markup,
/// and scanning resumes after the match.
fn rewrite<F>(pieces: Vec<Piece>, matcher: F) -> Vec<Piece>
where
    F: Fn(&str, usize) -> Option<(usize, String)>,
{
    let mut out = Vec::with_capacity(pieces.len());

    for piece in pieces {
        let text = match piece {
            Piece::Text(text) => text,
            markup => {
                out.push(markup);
                continue;
            }
        };

        let mut plain_start = 0;
        let mut pos = 0;
        while let Some(c) = text[pos..].chars().next() {
            match matcher(&text, pos) {
                Some((end, html)) => {
                    if plain_start < pos {
                        out.push(Piece::Text(text[plain_start..pos].to_string()));
                    }
                    out.push(Piece::Markup(html));
                    plain_start = end;
                    pos = end;
                }
                None => pos += c.len_utf8(),
            }
        }

        if plain_start < text.len() {
            out.push(Piece::Text(text[plain_start..].to_string()));
        }
    }

    out
}

/// `delim X delim` with the shortest possible (possibly empty) `X`.
fn delimited(text: &str, start: usize, delim: &str, tag: &str) -> Option<(usize, String)> {
    let rest = text[start..].strip_prefix(delim)?;
    let len = rest.find(delim)?;
    let end = start + delim.len() + len + delim.len();
    Some((end, format!("<{tag}>{}</{tag}>", escape_html(&rest[..len]))))
}

/// Single-marker emphasis, `*X*` or `_X_`.
///
/// The markers must not touch a word character or another marker on their
/// outer side. `X` runs up to the next marker and can't start or end with
/// whitespace.
fn emphasis(text: &str, start: usize, marker: char) -> Option<(usize, String)> {
    let rest = text[start..].strip_prefix(marker)?;

    if let Some(prev) = text[..start].chars().next_back() {
        if prev == marker || is_word_char(prev) {
            return None;
        }
    }

    let len = rest.find(marker)?;
    let content = &rest[..len];
    let first = content.chars().next()?;
    let last = content.chars().next_back()?;
    if first.is_whitespace() || last.is_whitespace() {
        return None;
    }

    let end = start + marker.len_utf8() + len + marker.len_utf8();
    if let Some(next) = text[end..].chars().next() {
        if next == marker || is_word_char(next) {
            return None;
        }
    }

    Some((end, format!("<em>{}</em>", escape_html(content))))
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}
