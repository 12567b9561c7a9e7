/// Kind of list a run of list items belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListKind {
    Unordered,
    Ordered,
}

impl ListKind {
    pub fn tag(self) -> &'static str {
        match self {
            ListKind::Unordered => "ul",
            ListKind::Ordered => "ol",
        }
    }
}

/// Line-level units produced by the block segmenter.
///
/// Heading and list item content has already been through the inline
/// formatter and is treated as opaque HTML from here on. `RawText` is the
/// only variant still waiting for inline formatting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Fragment {
    Blank,
    Heading { level: u8, content: String },
    ListOpen(ListKind),
    ListItem(String),
    ListClose(ListKind),
    RawText(String),
    /// Block HTML emitted verbatim by the grouper
    Preformatted(String),
}

impl Fragment {
    /// HTML for fragments that are complete blocks on their own.
    /// Returns None for `Blank` and `RawText`.
    pub fn block_html(&self) -> Option<String> {
        match self {
            Fragment::Heading { level, content } => Some(format!("<h{level}>{content}</h{level}>")),
            Fragment::ListOpen(kind) => Some(format!("<{}>", kind.tag())),
            Fragment::ListItem(content) => Some(format!("<li>{content}</li>")),
            Fragment::ListClose(kind) => Some(format!("</{}>", kind.tag())),
            Fragment::Preformatted(html) => Some(html.clone()),
            Fragment::Blank | Fragment::RawText(_) => None,
        }
    }
}
