use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::config::Config;
use crate::html::class_attr;

// Bold and italic spans never cross a line terminator (\n, \r, U+2028, U+2029).
static BOLD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\*\*([^\n\r\x{2028}\x{2029}]*?)\*\*").expect("Invalid bold regex")
});

static ITALIC: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\*([^\n\r\x{2028}\x{2029}]*?)\*").expect("Invalid italic regex")
});

static INLINE_CODE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"`([^`]+)`").expect("Invalid inline code regex"));

/// One substitution pass: every shortest delimited run matched by `pattern`
/// is wrapped in `tag`.
struct InlineRule<'a> {
    pattern: &'a Regex,
    tag: &'static str,
    class: Option<&'a str>,
}

impl InlineRule<'_> {
    fn apply(&self, text: &str) -> String {
        let open = format!("<{}{}>", self.tag, class_attr(self.class));
        let close = format!("</{}>", self.tag);
        self.pattern
            .replace_all(text, |caps: &Captures| format!("{open}{}{close}", &caps[1]))
            .into_owned()
    }
}

/// Resolve bold, italic and inline code spans in `text`.
///
/// The passes run in sequence over the output of the previous one. Bold
/// must run before italic so that `**` delimiters are consumed before the
/// single-star pattern sees them. Inline code content is not escaped.
pub fn render_inline(text: &str, config: &Config) -> String {
    let rules = [
        InlineRule {
            pattern: &BOLD,
            tag: "strong",
            class: None,
        },
        InlineRule {
            pattern: &ITALIC,
            tag: "em",
            class: None,
        },
        InlineRule {
            pattern: &INLINE_CODE,
            tag: "code",
            class: config.code.inline_class.as_deref(),
        },
    ];

    rules
        .iter()
        .fold(text.to_string(), |acc, rule| rule.apply(&acc))
}
