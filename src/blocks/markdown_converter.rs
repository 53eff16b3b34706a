// Markdown Converter
// Converts between block lists and Markdown text, for exporting posts and
// importing drafts written elsewhere.

use pulldown_cmark::{CodeBlockKind, Event, HeadingLevel, Parser, Tag, TagEnd};

use super::block::{Block, BlockType};
use crate::config::DEFAULT_CODE_LANGUAGE;

/// Convert blocks to Markdown text. Blocks of unknown type are skipped.
pub fn blocks_to_markdown(blocks: &[Block]) -> String {
    blocks
        .iter()
        .filter_map(block_to_markdown)
        .collect::<Vec<_>>()
        .join("\n\n")
}

fn block_to_markdown(block: &Block) -> Option<String> {
    let markdown = match &block.block_type {
        BlockType::Paragraph => block.content.clone(),
        BlockType::Heading1 => format!("# {}", block.content),
        BlockType::Heading2 => format!("## {}", block.content),
        BlockType::Heading3 => format!("### {}", block.content),
        BlockType::Quote => {
            if block.content.is_empty() {
                ">".to_string()
            } else {
                block
                    .content
                    .lines()
                    .map(|line| format!("> {line}"))
                    .collect::<Vec<_>>()
                    .join("\n")
            }
        }
        BlockType::Code => {
            let fence = code_fence(&block.content);
            format!("{fence}{}\n{}\n{fence}", block.language, block.content)
        }
        BlockType::List => {
            if block.list_items.is_empty() {
                return None;
            }
            block
                .list_items
                .iter()
                .map(|item| format!("- {item}"))
                .collect::<Vec<_>>()
                .join("\n")
        }
        BlockType::Image => {
            if block.image_caption.is_empty() {
                format!("![{}]({})", block.image_alt, block.image_url)
            } else {
                format!(
                    "![{}]({} \"{}\")",
                    block.image_alt,
                    block.image_url,
                    block.image_caption.replace('"', "\\\"")
                )
            }
        }
        BlockType::Other(_) => return None,
    };
    Some(markdown)
}

/// A backtick fence longer than any backtick run inside `code`
fn code_fence(code: &str) -> String {
    let longest = code
        .split(|c| c != '`')
        .map(str::len)
        .max()
        .unwrap_or(0);
    "`".repeat(longest.max(2) + 1)
}

#[derive(Debug, Default)]
struct ImageDraft {
    url: String,
    title: String,
    alt: String,
}

impl ImageDraft {
    fn into_block(self) -> Block {
        Block::new(BlockType::Image, 0).with_image(self.url, self.alt, self.title)
    }
}

/// Accumulates blocks while walking pulldown-cmark events
#[derive(Default)]
struct BlockBuilder {
    blocks: Vec<Block>,
    current: Option<Block>,
    text: String,
    quote_depth: usize,
    list_depth: usize,
    item: Option<String>,
    image: Option<ImageDraft>,
    paragraph_images: Vec<ImageDraft>,
}

impl BlockBuilder {
    fn nested(&self) -> bool {
        self.quote_depth > 0 || self.list_depth > 0
    }

    fn begin(&mut self, block: Block) {
        self.current = Some(block);
        self.text.clear();
    }

    fn finish(&mut self) {
        if let Some(mut block) = self.current.take() {
            let text = std::mem::take(&mut self.text);
            match block.block_type {
                // Code keeps its indentation; only the final newline goes
                BlockType::Code => {
                    block.content = text.strip_suffix('\n').unwrap_or(&text).to_string()
                }
                BlockType::List => {}
                _ => block.content = text.trim().to_string(),
            }
            self.blocks.push(block);
        }
    }

    // Images met inside a paragraph or heading follow it as their own blocks
    fn flush_images(&mut self) {
        let images = std::mem::take(&mut self.paragraph_images);
        self.blocks
            .extend(images.into_iter().map(ImageDraft::into_block));
    }

    fn push_text(&mut self, text: &str) {
        if let Some(image) = self.image.as_mut() {
            image.alt.push_str(text);
        } else if let Some(item) = self.item.as_mut() {
            item.push_str(text);
        } else if self.current.is_some() {
            self.text.push_str(text);
        }
    }

    fn start(&mut self, tag: Tag<'_>) {
        match tag {
            Tag::Heading { level, .. } if !self.nested() => {
                let block_type = match level {
                    HeadingLevel::H1 => BlockType::Heading1,
                    HeadingLevel::H2 => BlockType::Heading2,
                    _ => BlockType::Heading3,
                };
                self.begin(Block::new(block_type, 0));
            }
            Tag::Paragraph if !self.nested() => {
                self.begin(Block::new(BlockType::Paragraph, 0));
            }
            Tag::Paragraph if self.quote_depth > 0 && !self.text.is_empty() => {
                self.push_text("\n\n");
            }
            Tag::BlockQuote(_) => {
                self.quote_depth += 1;
                if self.quote_depth == 1 && self.list_depth == 0 {
                    self.begin(Block::new(BlockType::Quote, 0));
                }
            }
            Tag::CodeBlock(kind) if !self.nested() => {
                let language = match kind {
                    CodeBlockKind::Fenced(info) => info
                        .split_whitespace()
                        .next()
                        .unwrap_or(DEFAULT_CODE_LANGUAGE)
                        .to_string(),
                    CodeBlockKind::Indented => DEFAULT_CODE_LANGUAGE.to_string(),
                };
                self.begin(Block::new(BlockType::Code, 0).with_language(language));
            }
            Tag::List(_) => {
                self.list_depth += 1;
                if self.list_depth == 1 && self.quote_depth == 0 {
                    self.begin(Block::new(BlockType::List, 0));
                }
            }
            Tag::Item => {
                if let Some(item) = self.item.as_mut() {
                    // Nested items are flattened into their parent
                    if !item.is_empty() {
                        item.push(' ');
                    }
                } else if self.list_depth == 1 && self.quote_depth == 0 {
                    self.item = Some(String::new());
                }
            }
            Tag::Image {
                dest_url, title, ..
            } => {
                self.image = Some(ImageDraft {
                    url: dest_url.to_string(),
                    title: title.to_string(),
                    alt: String::new(),
                });
            }
            _ => {}
        }
    }

    fn end(&mut self, tag: TagEnd) {
        match tag {
            TagEnd::Heading(_) if !self.nested() => {
                self.finish();
                self.flush_images();
            }
            TagEnd::CodeBlock if !self.nested() => self.finish(),
            TagEnd::Paragraph if !self.nested() => {
                if self.text.trim().is_empty() && !self.paragraph_images.is_empty() {
                    self.current = None;
                    self.text.clear();
                } else {
                    self.finish();
                }
                self.flush_images();
            }
            TagEnd::BlockQuote(_) => {
                self.quote_depth = self.quote_depth.saturating_sub(1);
                if self.quote_depth == 0 && self.list_depth == 0 {
                    self.finish();
                }
            }
            TagEnd::Item if self.list_depth == 1 && self.quote_depth == 0 => {
                if let Some(item) = self.item.take() {
                    if let Some(list) = self.current.as_mut() {
                        list.list_items.push(item.trim().to_string());
                    }
                }
            }
            TagEnd::List(_) => {
                self.list_depth = self.list_depth.saturating_sub(1);
                if self.list_depth == 0 && self.quote_depth == 0 {
                    self.finish();
                }
            }
            TagEnd::Image => {
                if let Some(image) = self.image.take() {
                    if self.nested() {
                        self.push_text(&image.alt);
                    } else {
                        self.paragraph_images.push(image);
                    }
                }
            }
            _ => {}
        }
    }

    fn into_blocks(mut self) -> Vec<Block> {
        self.finish();
        for (order, block) in self.blocks.iter_mut().enumerate() {
            block.order = order;
        }
        self.blocks
    }
}

/// Convert Markdown text to blocks.
///
/// Heading levels below three become `heading3`, each top-level list becomes
/// one list block and images standing in a paragraph become image blocks.
pub fn markdown_to_blocks(markdown: &str) -> Vec<Block> {
    let mut builder = BlockBuilder::default();

    for event in Parser::new(markdown) {
        match event {
            Event::Start(tag) => builder.start(tag),
            Event::End(tag) => builder.end(tag),
            Event::Text(text) | Event::Code(text) => builder.push_text(&text),
            Event::SoftBreak => builder.push_text(" "),
            Event::HardBreak => builder.push_text("\n"),
            _ => {}
        }
    }

    builder.into_blocks()
}
