/// Block-level display node produced from an article body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    Heading { level: u8, content: Vec<Inline> },
    Paragraph(Vec<Inline>),
    /// Loose inline content, e.g. the text of a tight list item.
    Text(Vec<Inline>),
    List {
        ordered: bool,
        start: u64,
        items: Vec<Vec<Block>>,
    },
    CodeBlock {
        language: Option<String>,
        code: String,
    },
    BlockQuote(Vec<Block>),
    Table {
        head: Vec<Vec<Inline>>,
        rows: Vec<Vec<Vec<Inline>>>,
    },
    Rule,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Inline {
    Text(String),
    Emphasis(Vec<Inline>),
    Strong(Vec<Inline>),
    Code(String),
    Link { href: String, content: Vec<Inline> },
    LineBreak,
}

impl Inline {
    pub fn plain_text(&self) -> String {
        match self {
            Inline::Text(text) | Inline::Code(text) => text.clone(),
            Inline::Emphasis(content) | Inline::Strong(content) | Inline::Link { content, .. } => {
                inlines_text(content)
            }
            Inline::LineBreak => " ".to_string(),
        }
    }
}

impl Block {
    pub fn plain_text(&self) -> String {
        match self {
            Block::Heading { content, .. } | Block::Paragraph(content) | Block::Text(content) => {
                inlines_text(content)
            }
            Block::List { items, .. } => join(items.iter().map(|item| blocks_text(item))),
            Block::CodeBlock { code, .. } => code.trim_end().to_string(),
            Block::BlockQuote(blocks) => blocks_text(blocks),
            Block::Table { head, rows } => join(
                std::iter::once(head)
                    .chain(rows.iter())
                    .map(|row| join(row.iter().map(|cell| inlines_text(cell)))),
            ),
            Block::Rule => String::new(),
        }
    }
}

pub fn inlines_text(inlines: &[Inline]) -> String {
    inlines.iter().map(Inline::plain_text).collect()
}

pub fn blocks_text(blocks: &[Block]) -> String {
    join(blocks.iter().map(Block::plain_text))
}

fn join(parts: impl Iterator<Item = String>) -> String {
    parts
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}
