use std::sync::LazyLock;

use regex::Regex;

use crate::block::{Block, List};

const FENCE: &str = "```";

const HEADING_MARKERS: [(&str, u8); 3] = [("# ", 1), ("## ", 2), ("### ", 3)];

// A newline, any whitespace (including further newlines), then a newline.
static BLOCK_SEPARATOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n\s*\n").expect("Invalid block separator regex"));

static UNORDERED_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[-*] ").expect("Invalid unordered marker regex"));

static ORDERED_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]+\. ").expect("Invalid ordered marker regex"));

/// Split a document into blocks and classify each one.
pub fn parse(markdown: &str) -> Vec<Block> {
    let blocks: Vec<Block> = BLOCK_SEPARATOR
        .split(markdown)
        .map(trim_block)
        .filter(|block| !block.is_empty())
        .map(classify)
        .collect();

    tracing::debug!(blocks = blocks.len(), "parsed lesson document");
    blocks
}

/// Strip surrounding whitespace, including a byte-order mark.
fn trim_block(block: &str) -> &str {
    block.trim_matches(|c: char| c.is_whitespace() || c == '\u{feff}')
}

/// Classify a single trimmed block.
///
/// Precedence: fenced code, heading, unordered list, ordered list, then
/// paragraph as the fallback for anything else.
pub fn classify(block: &str) -> Block {
    if let Some(code) = fenced_code(block) {
        return code;
    }

    for (marker, level) in HEADING_MARKERS {
        if let Some(rest) = block.strip_prefix(marker) {
            return Block::Heading {
                level,
                content: rest.to_string(),
            };
        }
    }

    // Only the first line decides list-ness; later lines become items
    // whether or not they repeat the marker.
    if UNORDERED_MARKER.is_match(block) {
        return Block::List(list_items(block, false, &UNORDERED_MARKER));
    }
    if ORDERED_MARKER.is_match(block) {
        return Block::List(list_items(block, true, &ORDERED_MARKER));
    }

    Block::Paragraph {
        content: block.to_string(),
    }
}

/// A fence only counts when it opens and closes within the same block.
fn fenced_code(block: &str) -> Option<Block> {
    if !(block.starts_with(FENCE) && block.ends_with(FENCE)) {
        return None;
    }

    let lines: Vec<&str> = block.split('\n').collect();
    let language = lines[0][FENCE.len()..].trim().to_string();
    let content = if lines.len() > 2 {
        lines[1..lines.len() - 1].join("\n")
    } else {
        String::new()
    };

    Some(Block::CodeBlock { language, content })
}

fn list_items(block: &str, ordered: bool, marker: &Regex) -> List {
    let items = block
        .split('\n')
        .map(|line| marker.replace(line, "").into_owned())
        .collect();
    List { ordered, items }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn paragraph(text: &str) -> Block {
        Block::Paragraph {
            content: text.to_string(),
        }
    }

    #[test]
    fn empty_document_has_no_blocks() {
        assert!(parse("").is_empty());
        assert!(parse("  \n\n \t\n").is_empty());
    }

    #[test]
    fn multiple_blank_lines_separate_exactly_two_blocks() {
        assert_eq!(parse("A\n\n\n\nB"), vec![paragraph("A"), paragraph("B")]);
    }

    #[test]
    fn whitespace_only_lines_separate_blocks() {
        assert_eq!(parse("A\n   \t\nB"), vec![paragraph("A"), paragraph("B")]);
    }

    #[test]
    fn crlf_blank_lines_separate_blocks() {
        assert_eq!(parse("A\r\n\r\nB"), vec![paragraph("A"), paragraph("B")]);
    }

    #[test]
    fn single_newline_stays_in_one_block() {
        assert_eq!(parse("line1\nline2"), vec![paragraph("line1\nline2")]);
    }

    #[test]
    fn blocks_are_trimmed() {
        assert_eq!(parse("\n\n   # Title   \n\n"), vec![Block::Heading {
            level: 1,
            content: "Title".to_string(),
        }]);
    }

    #[test]
    fn byte_order_mark_is_trimmed() {
        assert_eq!(parse("\u{feff}# Title\n\nBody\u{feff}"), vec![
            Block::Heading {
                level: 1,
                content: "Title".to_string(),
            },
            paragraph("Body"),
        ]);
    }

    #[test]
    fn fenced_code_with_language() {
        assert_eq!(classify("```js\nlet x = 1 < 2;\n```"), Block::CodeBlock {
            language: "js".to_string(),
            content: "let x = 1 < 2;".to_string(),
        });
    }

    #[test]
    fn fenced_code_keeps_inner_lines() {
        assert_eq!(classify("```  \na\n\tb\n```"), Block::CodeBlock {
            language: String::new(),
            content: "a\n\tb".to_string(),
        });
    }

    #[test]
    fn lone_fence_is_empty_code() {
        assert_eq!(classify("```"), Block::CodeBlock {
            language: String::new(),
            content: String::new(),
        });
    }

    #[test]
    fn unterminated_fence_is_paragraph() {
        assert_eq!(classify("```js\nlet x=1;"), paragraph("```js\nlet x=1;"));
    }

    #[test]
    fn blank_line_inside_fence_splits_it() {
        // Each half lacks a matching fence, so both degrade to paragraphs.
        assert_eq!(parse("```\na\n\nb\n```"), vec![
            paragraph("```\na"),
            paragraph("b\n```"),
        ]);
    }

    #[rstest]
    #[case("# Title", 1, "Title")]
    #[case("## Title", 2, "Title")]
    #[case("### Title", 3, "Title")]
    #[case("#  Spaced", 1, " Spaced")]
    fn headings(#[case] input: &str, #[case] level: u8, #[case] content: &str) {
        assert_eq!(classify(input), Block::Heading {
            level,
            content: content.to_string(),
        });
    }

    #[rstest]
    #[case("#Title")]
    #[case("#### Deep")]
    #[case("-no space")]
    #[case("1.no space")]
    #[case("**bold** start")]
    #[case("a. letter")]
    fn marker_without_shape_is_paragraph(#[case] input: &str) {
        assert_eq!(classify(input), paragraph(input));
    }

    #[test]
    fn two_headings_in_order() {
        assert_eq!(parse("# A\n\n## B"), vec![
            Block::Heading {
                level: 1,
                content: "A".to_string(),
            },
            Block::Heading {
                level: 2,
                content: "B".to_string(),
            },
        ]);
    }

    #[test]
    fn unordered_list_items() {
        assert_eq!(
            classify("- one\n- two\n- three"),
            Block::List(List {
                ordered: false,
                items: vec!["one".into(), "two".into(), "three".into()],
            })
        );
    }

    #[test]
    fn star_marker_is_unordered() {
        assert_eq!(
            classify("* one\n- two"),
            Block::List(List {
                ordered: false,
                items: vec!["one".into(), "two".into()],
            })
        );
    }

    #[test]
    fn ordered_list_items() {
        assert_eq!(
            classify("1. a\n2. b\n10. c"),
            Block::List(List {
                ordered: true,
                items: vec!["a".into(), "b".into(), "c".into()],
            })
        );
    }

    #[test]
    fn list_lines_without_marker_are_kept_raw() {
        assert_eq!(
            classify("- one\ncontinued\n  - indented"),
            Block::List(List {
                ordered: false,
                items: vec!["one".into(), "continued".into(), "  - indented".into()],
            })
        );
    }

    #[test]
    fn ordered_list_only_strips_its_own_marker() {
        assert_eq!(
            classify("1. a\n- b"),
            Block::List(List {
                ordered: true,
                items: vec!["a".into(), "- b".into()],
            })
        );
    }

    #[test]
    fn heading_wins_over_later_list_lines() {
        assert_eq!(classify("# Title\n- item"), Block::Heading {
            level: 1,
            content: "Title\n- item".to_string(),
        });
    }

    #[test]
    fn code_wins_over_heading_inside() {
        assert_eq!(classify("```\n# not a heading\n```"), Block::CodeBlock {
            language: String::new(),
            content: "# not a heading".to_string(),
        });
    }
}
