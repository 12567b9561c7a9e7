//! Comment-sized Markdown to HTML.
//!
//! A deliberately small, line-oriented converter: ATX headings, flat
//! ordered/unordered lists, paragraphs, and bold/italic/code/link inline
//! constructs. Anything else is kept as text.

mod config;
mod escape;
mod fragment;
mod group;
mod inline;
pub mod sanitize;
mod segment;
pub mod url;

pub use config::{Config, ConfigError, LinksConfig, OutputConfig};
pub use escape::escape_html;
pub use fragment::{Fragment, ListKind};
pub use inline::{InlineFormatter, format};
pub use url::{SafeUrl, UrlSanitizer};

use tracing::debug;

/// Syntax summary shown next to comment inputs.
pub const HELP_TEXT: &str =
    "You can use Markdown: **bold**, *italic*, `code`, [link](url), # headings, - lists";

/// Switches for a conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Options {
    /// When false, input is returned untouched.
    pub enabled: bool,
    /// Escape text outside inline constructs too.
    pub escape_plain_text: bool,
    /// Run the result through [`sanitize::clean_html`].
    pub sanitize_output: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            enabled: true,
            escape_plain_text: false,
            sanitize_output: false,
        }
    }
}

/// Split markdown into block fragments.
pub fn segment(markdown: &str) -> Vec<Fragment> {
    segment::segment(markdown, &InlineFormatter::new())
}

/// Render fragments to HTML, grouping raw text into paragraphs.
pub fn group(fragments: &[Fragment]) -> String {
    group::group(fragments, &InlineFormatter::new())
}

/// Convert markdown to HTML with the given options and no URL sanitizer.
pub fn convert_to_html(markdown: &str, options: &Options) -> String {
    Converter::new(*options).convert(markdown)
}

/// Undo typographic dash substitution so list markers parse again.
pub fn normalize_typography(text: &str) -> String {
    text.replace('–', "-").replace('—', "--")
}

/// Full conversion pipeline with an optional link sanitizer.
#[derive(Default)]
pub struct Converter {
    options: Options,
    url_sanitizer: Option<Box<dyn UrlSanitizer>>,
}

impl Converter {
    pub fn new(options: Options) -> Self {
        Self {
            options,
            url_sanitizer: None,
        }
    }

    /// Build a converter from a loaded [`Config`].
    pub fn from_config(config: &Config) -> Self {
        let converter = Self::new(config.options());
        match config.url_sanitizer() {
            Some(sanitizer) => converter.with_url_sanitizer(sanitizer),
            None => converter,
        }
    }

    pub fn with_url_sanitizer(mut self, sanitizer: impl UrlSanitizer + 'static) -> Self {
        self.url_sanitizer = Some(Box::new(sanitizer));
        self
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    /// The inline formatter this converter applies to free text.
    pub fn formatter(&self) -> InlineFormatter<'_> {
        let formatter = InlineFormatter::new().escape_plain_text(self.options.escape_plain_text);
        match &self.url_sanitizer {
            Some(sanitizer) => formatter.with_url_sanitizer(sanitizer.as_ref()),
            None => formatter,
        }
    }

    pub fn convert(&self, markdown: &str) -> String {
        if !self.options.enabled {
            debug!("markdown disabled, passing text through");
            return markdown.to_string();
        }

        let text = normalize_typography(markdown);
        let formatter = self.formatter();
        let fragments = segment::segment(&text, &formatter);
        let html = group::group(&fragments, &formatter);
        debug!(
            input_bytes = markdown.len(),
            fragments = fragments.len(),
            output_bytes = html.len(),
            "converted markdown"
        );

        if self.options.sanitize_output {
            sanitize::clean_html(&html)
        } else {
            html
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn disabled_returns_input_verbatim() {
        let text = "# Not a heading — *really*\n\n- x";
        let options = Options {
            enabled: false,
            ..Options::default()
        };
        assert_eq!(convert_to_html(text, &options), text);
    }

    #[test]
    fn examples() {
        let options = Options::default();
        assert_eq!(convert_to_html("**bold**", &options), "<p><strong>bold</strong></p>");
        assert_eq!(
            convert_to_html("# Title\n\nBody text", &options),
            "<h1>Title</h1>\n<p>Body text</p>"
        );
        assert_eq!(
            convert_to_html("- one\n- two\n\nPara", &options),
            "<ul>\n<li>one</li>\n<li>two</li>\n</ul>\n<p>Para</p>"
        );
    }

    #[test]
    fn dashes_are_normalized() {
        assert_eq!(normalize_typography("a – b — c"), "a - b -- c");
        assert_eq!(
            convert_to_html("— a\n– b", &Options::default()),
            "<p>-- a</p>\n<ul>\n<li>b</li>\n</ul>"
        );
    }

    #[test]
    fn converter_sanitizes_links() {
        let converter = Converter::new(Options::default()).with_url_sanitizer(SafeUrl::default());
        assert_eq!(
            converter.convert("[x](javascript:alert(1))"),
            "<p><a href=\"\" rel=\"nofollow\">x</a>)</p>"
        );
        assert_eq!(
            converter.convert("[x](example.com)"),
            "<p><a href=\"http://example.com\" rel=\"nofollow\">x</a></p>"
        );
    }

    #[test]
    fn converter_from_config() {
        let converter = Converter::from_config(&Config::default());
        assert!(converter.options().sanitize_output);
        let html = converter.convert("hi <script>alert(1)</script> *there*");
        assert_eq!(html, "<p>hi  <em>there</em></p>");
    }

    #[test]
    fn strict_escaping() {
        let options = Options {
            escape_plain_text: true,
            ..Options::default()
        };
        assert_eq!(
            convert_to_html("a < b & **c**", &options),
            "<p>a &lt; b &amp; <strong>c</strong></p>"
        );
    }

    #[test]
    fn fragment_api() {
        let fragments = segment("# H\ntext");
        assert_eq!(
            fragments,
            vec![
                Fragment::Heading {
                    level: 1,
                    content: "H".into()
                },
                Fragment::RawText("text".into()),
            ]
        );
        assert_eq!(group(&fragments), "<h1>H</h1>\n<p>text</p>");
    }

    #[test]
    fn converter_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Converter>();
    }
}
