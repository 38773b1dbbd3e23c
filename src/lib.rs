mod block;
mod config;
mod html;
mod inline;
mod parser;

pub mod ingest;
pub mod progress;
pub mod quiz;
pub mod session;
pub mod tutor;

pub use block::{Block, List};
pub use config::{CodeConfig, Config, ConfigError, HeadingsConfig, ListsConfig, ParagraphConfig};
pub use parser::classify;

/// Parse lesson markdown into a vector of blocks.
pub fn parse(markdown: &str) -> Vec<Block> {
    parser::parse(markdown)
}

/// Convert lesson markdown to markup using the compiled default styling.
///
/// Never fails: anything unrecognised degrades to a paragraph, and an empty
/// document renders to an empty string.
pub fn render(markdown: &str) -> String {
    render_with_config(markdown, &Config::compiled_default())
}

/// Convert lesson markdown to markup with custom styling.
pub fn render_with_config(markdown: &str, config: &Config) -> String {
    let blocks = parse(markdown);
    html::blocks_to_html(&blocks, config)
}

/// Resolve only the inline spans (bold, italic, inline code) of `text`.
pub fn render_inline(text: &str, config: &Config) -> String {
    inline::render_inline(text, config)
}
