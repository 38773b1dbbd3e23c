/// A list (ordered or unordered). Items hold raw text with the leading
/// marker stripped; inline spans are resolved when emitting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct List {
    pub ordered: bool,
    pub items: Vec<String>,
}

/// Block-level elements classified from a lesson document.
///
/// Each block yields exactly one top-level element; nothing nests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    CodeBlock {
        /// Text after the opening fence, trimmed. May be empty.
        language: String,
        content: String,
    },
    Heading {
        level: u8,
        content: String,
    },
    List(List),
    Paragraph {
        content: String,
    },
}
