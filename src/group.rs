use crate::fragment::Fragment;
use crate::inline::InlineFormatter;

/// Render fragments to HTML, folding runs of raw text into paragraphs.
///
/// Output blocks are joined with `\n`. Blank fragments only end paragraphs;
/// they produce no output of their own.
pub fn group(fragments: &[Fragment], formatter: &InlineFormatter) -> String {
    let mut out: Vec<String> = Vec::new();
    let mut paragraph: Vec<&str> = Vec::new();

    for fragment in fragments {
        match fragment {
            Fragment::RawText(line) => paragraph.push(line),
            Fragment::Blank => flush(&mut paragraph, formatter, &mut out),
            block => {
                flush(&mut paragraph, formatter, &mut out);
                if let Some(html) = block.block_html() {
                    out.push(html);
                }
            }
        }
    }
    flush(&mut paragraph, formatter, &mut out);

    out.join("\n")
}

fn flush(paragraph: &mut Vec<&str>, formatter: &InlineFormatter, out: &mut Vec<String>) {
    if paragraph.is_empty() {
        return;
    }
    let text = paragraph.join(" ");
    tracing::trace!(lines = paragraph.len(), "flushing paragraph");
    out.push(format!("<p>{}</p>", formatter.format(&text)));
    paragraph.clear();
}
