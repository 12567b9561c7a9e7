use std::sync::LazyLock;

use regex::Regex;

use crate::fragment::{Fragment, ListKind};
use crate::inline::InlineFormatter;

static HEADING_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^(#{1,6})\s+(.+)").unwrap());
static UNORDERED_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[-*+–]\s+(.+)").unwrap());
static ORDERED_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[0-9]+\.\s+(.+)").unwrap());

/// Split text into block fragments, one classification per line.
pub fn segment(text: &str, formatter: &InlineFormatter) -> Vec<Fragment> {
    let mut state = SegmentState::default();

    for line in text.split('\n') {
        process_line(line.trim(), &mut state, formatter);
    }
    state.close_list();

    state.fragments
}

#[derive(Default)]
struct SegmentState {
    // The list currently open, if any. Lists don't nest.
    open_list: Option<ListKind>,
    fragments: Vec<Fragment>,
}

impl SegmentState {
    fn close_list(&mut self) {
        if let Some(kind) = self.open_list.take() {
            self.fragments.push(Fragment::ListClose(kind));
        }
    }

    /// Make sure a list of `kind` is open, closing one of the other kind.
    fn ensure_list(&mut self, kind: ListKind) {
        if self.open_list == Some(kind) {
            return;
        }
        self.close_list();
        self.fragments.push(Fragment::ListOpen(kind));
        self.open_list = Some(kind);
    }
}

fn process_line(line: &str, state: &mut SegmentState, formatter: &InlineFormatter) {
    if line.is_empty() {
        state.close_list();
        state.fragments.push(Fragment::Blank);
        return;
    }

    // Headings
    if let Some(caps) = HEADING_RE.captures(line) {
        state.close_list();
        let level = caps[1].len() as u8;
        let content = formatter.format(caps[2].trim());
        state.fragments.push(Fragment::Heading { level, content });
        return;
    }

    // List items
    let item = if let Some(caps) = UNORDERED_RE.captures(line) {
        Some((ListKind::Unordered, caps.get(1)))
    } else {
        ORDERED_RE
            .captures(line)
            .map(|caps| (ListKind::Ordered, caps.get(1)))
    };
    if let Some((kind, Some(content))) = item {
        state.ensure_list(kind);
        let content = formatter.format(content.as_str().trim());
        state.fragments.push(Fragment::ListItem(content));
        return;
    }

    // Anything else is paragraph text, formatted once the paragraph is known
    state.close_list();
    state.fragments.push(Fragment::RawText(line.to_string()));
}
