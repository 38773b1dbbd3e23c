use crate::block::{Block, List};
use crate::config::Config;
use crate::inline::render_inline;

const LINE_BREAK: &str = "<br />";

/// Convert blocks to markup, concatenated in order with no separator.
pub fn blocks_to_html(blocks: &[Block], config: &Config) -> String {
    let mut out = String::new();
    for block in blocks {
        emit_block(block, config, &mut out);
    }
    out
}

/// ` class="..."` for a configured class, or nothing.
pub(crate) fn class_attr(class: Option<&str>) -> String {
    match class {
        Some(class) => format!(
            " class=\"{}\"",
            html_escape::encode_double_quoted_attribute(class)
        ),
        None => String::new(),
    }
}

fn emit_block(block: &Block, config: &Config, out: &mut String) {
    match block {
        Block::CodeBlock { language, content } => {
            out.push_str("<pre");
            out.push_str(&class_attr(config.code.block_class.as_deref()));
            out.push_str("><code class=\"");
            out.push_str(&config.code.language_prefix);
            out.push_str(language);
            out.push_str("\">");
            out.push_str(&html_escape::encode_text(content));
            out.push_str("</code></pre>");
        }
        Block::Heading { level, content } => {
            out.push_str(&format!(
                "<h{level}{}>",
                class_attr(config.headings.class_for_heading(*level))
            ));
            out.push_str(&render_inline(content, config));
            out.push_str(&format!("</h{level}>"));
        }
        Block::List(list) => emit_list(list, config, out),
        Block::Paragraph { content } => {
            out.push_str("<p");
            out.push_str(&class_attr(config.paragraph.class.as_deref()));
            out.push('>');
            // Author line breaks inside a paragraph are kept
            out.push_str(&render_inline(content, config).replace('\n', LINE_BREAK));
            out.push_str("</p>");
        }
    }
}

fn emit_list(list: &List, config: &Config, out: &mut String) {
    let tag = if list.ordered { "ol" } else { "ul" };

    out.push('<');
    out.push_str(tag);
    out.push_str(&class_attr(config.lists.class_for_list(list.ordered)));
    out.push('>');
    for item in &list.items {
        out.push_str("<li>");
        out.push_str(&render_inline(item, config));
        out.push_str("</li>");
    }
    out.push_str("</");
    out.push_str(tag);
    out.push('>');
}

#[cfg(test)]
mod tests {
    use crate::{Config, render, render_with_config};
    use pretty_assertions::assert_eq;

    fn plain(markdown: &str) -> String {
        render_with_config(markdown, &Config::default())
    }

    #[test]
    fn empty_document() {
        assert_eq!(plain(""), "");
        assert_eq!(render(""), "");
        assert_eq!(plain("\n\n   \n"), "");
    }

    #[test]
    fn heading() {
        assert_eq!(plain("### Title"), "<h3>Title</h3>");
    }

    #[test]
    fn headings_in_order() {
        assert_eq!(plain("# A\n\n## B"), "<h1>A</h1><h2>B</h2>");
    }

    #[test]
    fn heading_with_inline_spans() {
        assert_eq!(
            plain("## The **chain** rule"),
            "<h2>The <strong>chain</strong> rule</h2>"
        );
    }

    #[test]
    fn paragraph() {
        assert_eq!(plain("Hello world"), "<p>Hello world</p>");
    }

    #[test]
    fn paragraph_line_breaks() {
        assert_eq!(plain("line1\nline2"), "<p>line1<br />line2</p>");
    }

    #[test]
    fn block_separation() {
        assert_eq!(plain("A\n\n\n\nB"), "<p>A</p><p>B</p>");
    }

    #[test]
    fn code_block() {
        let html = plain("```js\nlet x = 1 < 2;\n```");
        assert_eq!(
            html,
            "<pre><code class=\"language-js\">let x = 1 &lt; 2;</code></pre>"
        );
    }

    #[test]
    fn code_block_escapes_ampersand_once() {
        assert_eq!(
            plain("```\na && b > c &lt;\n```"),
            "<pre><code class=\"language-\">a &amp;&amp; b &gt; c &amp;lt;</code></pre>"
        );
    }

    #[test]
    fn code_block_skips_inline_spans() {
        assert_eq!(
            plain("```md\n**not bold** *nor* `this`\n```"),
            "<pre><code class=\"language-md\">**not bold** *nor* `this`</code></pre>"
        );
    }

    #[test]
    fn unterminated_fence_is_paragraph() {
        let html = plain("```js\nlet x=1;");
        assert!(!html.contains("<pre"));
        assert!(html.starts_with("<p>"));
    }

    #[test]
    fn unordered_list() {
        assert_eq!(
            plain("- one\n- two\n- three"),
            "<ul><li>one</li><li>two</li><li>three</li></ul>"
        );
    }

    #[test]
    fn ordered_list() {
        assert_eq!(plain("1. a\n2. b"), "<ol><li>a</li><li>b</li></ol>");
    }

    #[test]
    fn list_items_get_inline_spans() {
        assert_eq!(
            plain("* **term**: `def`"),
            "<ul><li><strong>term</strong>: <code>def</code></li></ul>"
        );
    }

    #[test]
    fn bold_before_italic() {
        assert_eq!(
            plain("**bold *and* text**"),
            "<p><strong>bold <em>and</em> text</strong></p>"
        );
    }

    #[test]
    fn mixed_document() {
        let md = "# Derivatives\n\nThe *slope* of a curve.\n\n- rate\n- change\n\n```py\nprint(1)\n```";
        assert_eq!(
            plain(md),
            "<h1>Derivatives</h1><p>The <em>slope</em> of a curve.</p><ul><li>rate</li><li>change</li></ul><pre><code class=\"language-py\">print(1)</code></pre>"
        );
    }

    #[test]
    fn compiled_default_styles_elements() {
        assert_eq!(
            render("# Hi"),
            "<h1 class=\"text-3xl font-bold mb-4 mt-6\">Hi</h1>"
        );
        assert_eq!(
            render("```rs\nfn main() {}\n```"),
            "<pre class=\"bg-slate-800 text-white p-4 rounded-md my-4 overflow-x-auto\"><code class=\"language-rs\">fn main() {}</code></pre>"
        );
        assert!(render("1. a").starts_with("<ol class=\"list-decimal pl-6 space-y-2 mb-4\">"));
        assert!(render("text").starts_with("<p class=\"leading-relaxed mb-4\">"));
    }

    #[test]
    fn class_values_are_attribute_escaped() {
        let mut config = Config::default();
        config.paragraph.class = Some("a\"b".to_string());
        assert_eq!(
            render_with_config("x", &config),
            "<p class=\"a&quot;b\">x</p>"
        );
    }

    #[test]
    fn custom_language_prefix() {
        let mut config = Config::default();
        config.code.language_prefix = "lang-".to_string();
        assert_eq!(
            render_with_config("```c\nx\n```", &config),
            "<pre><code class=\"lang-c\">x</code></pre>"
        );
    }
}
