//! Allow-list HTML cleaning for converter output.
//!
//! Plain text outside inline constructs reaches the HTML unescaped, so the
//! converter output has to go through this (or an equivalent cleaner) before
//! it is shown to anyone.

use std::collections::{HashMap, HashSet};

/// Tags that survive cleaning. Everything the converter emits, plus a few
/// harmless formatting tags users tend to type by hand.
pub const ALLOWED_TAGS: &[&str] = &[
    "p", "br", "h1", "h2", "h3", "h4", "h5", "h6", "ul", "ol", "li", "strong", "b", "em", "i",
    "code", "pre", "blockquote", "a",
];

/// Strip everything but [`ALLOWED_TAGS`] from `html`.
///
/// Links keep only `href` (with a safe scheme) and get `rel="nofollow"`.
/// `script` and `style` elements are dropped together with their content.
pub fn clean_html(html: &str) -> String {
    let mut builder = ammonia::Builder::default();
    builder
        .tags(ALLOWED_TAGS.iter().copied().collect())
        .tag_attributes(HashMap::from([("a", HashSet::from(["href"]))]))
        .generic_attributes(HashSet::new())
        .link_rel(Some("nofollow"));

    builder.clean(html).to_string()
}
