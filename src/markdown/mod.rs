//! Article body markdown to display blocks.
//!
//! Anything the block model has no shape for (HTML, images, footnotes,
//! strikethrough, math) keeps its text and loses its structure.

pub mod block;
pub mod html;
pub mod rules;

use pulldown_cmark::{CodeBlockKind, Event, Options, Parser, Tag};

pub use block::{blocks_text, Block, Inline};
pub use html::to_html;
pub use rules::{ElementKind, StyleRules};

pub fn render(body: &str) -> Vec<Block> {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_TASKLISTS);
    options.insert(Options::ENABLE_FOOTNOTES);

    let mut state = RenderState::new();
    state.process(Parser::new_ext(body, options));
    state.finish()
}

/// Plain text of a body, for previews.
pub fn excerpt(body: &str, max_chars: usize) -> String {
    let text = blocks_text(&render(body));
    match text.char_indices().nth(max_chars) {
        Some((cut, _)) => format!("{}…", text[..cut].trim_end()),
        None => text,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Container {
    Root,
    Quote,
    /// Blocks spliced into the parent when closed (footnote definitions).
    Transparent,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Leaf {
    Paragraph,
    Heading(u8),
    Cell,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum SpanKind {
    Emphasis,
    Strong,
    Link(String),
    Plain,
}

#[derive(Debug)]
enum Frame {
    Blocks(Container, Vec<Block>),
    List {
        ordered: bool,
        start: u64,
        items: Vec<Vec<Block>>,
    },
    Item {
        blocks: Vec<Block>,
        inlines: Vec<Inline>,
    },
    Leaf(Leaf, Vec<Inline>),
    Span(SpanKind, Vec<Inline>),
    Code {
        language: Option<String>,
        code: String,
    },
    Table {
        head: Vec<Vec<Inline>>,
        rows: Vec<Vec<Vec<Inline>>>,
    },
    Row {
        head: bool,
        cells: Vec<Vec<Inline>>,
    },
}

/// Every `Start` pushes one frame and every `End` pops one.
struct RenderState {
    stack: Vec<Frame>,
}

impl RenderState {
    fn new() -> Self {
        Self {
            stack: vec![Frame::Blocks(Container::Root, Vec::new())],
        }
    }

    fn process<'a>(&mut self, parser: impl Iterator<Item = Event<'a>>) {
        for event in parser {
            match event {
                Event::Start(tag) => self.start_tag(tag),
                Event::End(_) => self.end_tag(),
                Event::Text(text) => self.text(&text),
                Event::Code(code) => self.inline(Inline::Code(code.to_string())),
                Event::Html(html) | Event::InlineHtml(html) => self.text(&html),
                Event::SoftBreak => self.text(" "),
                Event::HardBreak => self.inline(Inline::LineBreak),
                Event::Rule => self.block(Block::Rule),
                Event::TaskListMarker(checked) => {
                    self.text(if checked { "[x] " } else { "[ ] " })
                }
                Event::FootnoteReference(label) => self.text(&format!("[{label}]")),
                Event::InlineMath(math) | Event::DisplayMath(math) => self.text(&math),
            }
        }
    }

    fn finish(mut self) -> Vec<Block> {
        while self.stack.len() > 1 {
            self.end_tag();
        }
        match self.stack.pop() {
            Some(Frame::Blocks(_, blocks)) => blocks,
            _ => Vec::new(),
        }
    }

    fn start_tag(&mut self, tag: Tag) {
        let frame = match tag {
            Tag::Paragraph | Tag::HtmlBlock => Frame::Leaf(Leaf::Paragraph, Vec::new()),
            Tag::Heading { level, .. } => Frame::Leaf(Leaf::Heading(level as u8), Vec::new()),
            Tag::BlockQuote(_) => Frame::Blocks(Container::Quote, Vec::new()),
            Tag::CodeBlock(kind) => Frame::Code {
                language: match kind {
                    CodeBlockKind::Fenced(info) => info
                        .split_whitespace()
                        .next()
                        .map(str::to_owned),
                    CodeBlockKind::Indented => None,
                },
                code: String::new(),
            },
            Tag::List(start) => Frame::List {
                ordered: start.is_some(),
                start: start.unwrap_or(1),
                items: Vec::new(),
            },
            Tag::Item => Frame::Item {
                blocks: Vec::new(),
                inlines: Vec::new(),
            },
            Tag::Table(_) => Frame::Table {
                head: Vec::new(),
                rows: Vec::new(),
            },
            Tag::TableHead => Frame::Row {
                head: true,
                cells: Vec::new(),
            },
            Tag::TableRow => Frame::Row {
                head: false,
                cells: Vec::new(),
            },
            Tag::TableCell => Frame::Leaf(Leaf::Cell, Vec::new()),
            Tag::Emphasis => Frame::Span(SpanKind::Emphasis, Vec::new()),
            Tag::Strong => Frame::Span(SpanKind::Strong, Vec::new()),
            Tag::Link { dest_url, .. } => Frame::Span(SpanKind::Link(dest_url.to_string()), Vec::new()),
            Tag::FootnoteDefinition(_) => Frame::Blocks(Container::Transparent, Vec::new()),
            _ => Frame::Span(SpanKind::Plain, Vec::new()),
        };
        self.stack.push(frame);
    }

    fn end_tag(&mut self) {
        if self.stack.len() <= 1 {
            return;
        }
        let Some(frame) = self.stack.pop() else {
            return;
        };

        match frame {
            Frame::Blocks(Container::Quote, blocks) => self.block(Block::BlockQuote(blocks)),
            Frame::Blocks(_, blocks) => blocks.into_iter().for_each(|b| self.block(b)),
            Frame::List {
                ordered,
                start,
                items,
            } => self.block(Block::List {
                ordered,
                start,
                items,
            }),
            Frame::Item {
                mut blocks,
                inlines,
            } => {
                if !inlines.is_empty() {
                    blocks.push(Block::Text(inlines));
                }
                match self.stack.last_mut() {
                    Some(Frame::List { items, .. }) => items.push(blocks),
                    _ => blocks.into_iter().for_each(|b| self.block(b)),
                }
            }
            Frame::Leaf(Leaf::Paragraph, content) => self.block(Block::Paragraph(content)),
            Frame::Leaf(Leaf::Heading(level), content) => {
                self.block(Block::Heading { level, content })
            }
            Frame::Leaf(Leaf::Cell, content) => match self.stack.last_mut() {
                Some(Frame::Row { cells, .. }) => cells.push(content),
                _ => content.into_iter().for_each(|i| self.inline(i)),
            },
            Frame::Row { head, cells } => match self.stack.last_mut() {
                Some(Frame::Table { head: table_head, .. }) if head => *table_head = cells,
                Some(Frame::Table { rows, .. }) => rows.push(cells),
                _ => cells.into_iter().flatten().for_each(|i| self.inline(i)),
            },
            Frame::Table { head, rows } => self.block(Block::Table { head, rows }),
            Frame::Span(kind, content) => match kind {
                SpanKind::Emphasis => self.inline(Inline::Emphasis(content)),
                SpanKind::Strong => self.inline(Inline::Strong(content)),
                SpanKind::Link(href) => self.inline(Inline::Link { href, content }),
                SpanKind::Plain => content.into_iter().for_each(|i| self.inline(i)),
            },
            Frame::Code { language, code } => self.block(Block::CodeBlock { language, code }),
        }
    }

    fn text(&mut self, text: &str) {
        if let Some(Frame::Code { code, .. }) = self.stack.last_mut() {
            code.push_str(text);
            return;
        }
        self.inline(Inline::Text(text.to_string()));
    }

    fn inline(&mut self, inline: Inline) {
        match self.stack.last_mut() {
            Some(Frame::Leaf(_, content)) | Some(Frame::Span(_, content)) => content.push(inline),
            Some(Frame::Item { inlines, .. }) => inlines.push(inline),
            Some(Frame::Code { code, .. }) => code.push_str(&inline.plain_text()),
            Some(Frame::Row { cells, .. }) => cells.push(vec![inline]),
            Some(Frame::List { items, .. }) => items.push(vec![Block::Text(vec![inline])]),
            Some(Frame::Table { rows, .. }) => rows.push(vec![vec![inline]]),
            Some(Frame::Blocks(_, blocks)) => blocks.push(Block::Paragraph(vec![inline])),
            None => {}
        }
    }

    fn block(&mut self, block: Block) {
        match self.stack.last_mut() {
            Some(Frame::Blocks(_, blocks)) => blocks.push(block),
            Some(Frame::Item { blocks, inlines }) => {
                if !inlines.is_empty() {
                    blocks.push(Block::Text(std::mem::take(inlines)));
                }
                blocks.push(block);
            }
            Some(Frame::List { items, .. }) => items.push(vec![block]),
            Some(_) => {
                let text = block.plain_text();
                if !text.is_empty() {
                    self.inline(Inline::Text(text));
                }
            }
            None => {}
        }
    }
}
