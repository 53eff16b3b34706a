// Block Renderer
// Maps blocks to display nodes. Only the fields meaningful for a block's
// type are read; stale values in the other fields are ignored.

use regex::Regex;
use std::sync::LazyLock;

use super::block::{Alignment, Block, BlockType};

/// Semantic tag of a text node
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextTag {
    Paragraph,
    Heading1,
    Heading2,
    Heading3,
    Quote,
}

impl TextTag {
    pub fn html_tag(&self) -> &'static str {
        match self {
            TextTag::Paragraph => "p",
            TextTag::Heading1 => "h1",
            TextTag::Heading2 => "h2",
            TextTag::Heading3 => "h3",
            TextTag::Quote => "blockquote",
        }
    }
}

/// Structured display form of one block
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderNode {
    Text {
        tag: TextTag,
        text: String,
    },
    Figure {
        src: String,
        alt: String,
        caption: Option<String>,
        alignment: Alignment,
    },
    /// Source code, left for the display surface to highlight
    Code {
        language: String,
        source: String,
    },
    List {
        items: Vec<String>,
    },
}

impl RenderNode {
    fn text(tag: TextTag, text: &str) -> Self {
        RenderNode::Text {
            tag,
            text: text.to_string(),
        }
    }

    pub fn to_html(&self) -> String {
        match self {
            RenderNode::Text { tag, text } => {
                let tag = tag.html_tag();
                format!("<{tag}>{}</{tag}>", escape_html(text))
            }
            RenderNode::Figure {
                src,
                alt,
                caption,
                alignment,
            } => {
                let mut html = format!(
                    "<figure class=\"align-{}\"><img src=\"{}\" alt=\"{}\">",
                    alignment.as_str(),
                    escape_html(src),
                    escape_html(alt)
                );
                if let Some(caption) = caption {
                    html.push_str(&format!("<figcaption>{}</figcaption>", escape_html(caption)));
                }
                html.push_str("</figure>");
                html
            }
            RenderNode::Code { language, source } => format!(
                "<pre><code class=\"language-{}\">{}</code></pre>",
                escape_html(language),
                escape_html(source)
            ),
            RenderNode::List { items } => {
                let items: String = items
                    .iter()
                    .map(|item| format!("<li>{}</li>", escape_html(item)))
                    .collect();
                format!("<ul>{items}</ul>")
            }
        }
    }
}

/// Render one block. Types this renderer does not know render nothing.
pub fn render_block(block: &Block) -> Option<RenderNode> {
    let node = match &block.block_type {
        BlockType::Paragraph => RenderNode::text(TextTag::Paragraph, &block.content),
        BlockType::Heading1 => RenderNode::text(TextTag::Heading1, &block.content),
        BlockType::Heading2 => RenderNode::text(TextTag::Heading2, &block.content),
        BlockType::Heading3 => RenderNode::text(TextTag::Heading3, &block.content),
        BlockType::Quote => RenderNode::text(TextTag::Quote, &block.content),
        BlockType::Image => RenderNode::Figure {
            src: block.image_url.clone(),
            alt: block.image_alt.clone(),
            caption: (!block.image_caption.is_empty()).then(|| block.image_caption.clone()),
            alignment: block.alignment,
        },
        BlockType::Code => RenderNode::Code {
            language: block.language.clone(),
            source: block.content.clone(),
        },
        BlockType::List => RenderNode::List {
            items: block.list_items.clone(),
        },
        BlockType::Other(name) => {
            log::debug!("Skipping block of unknown type '{name}'");
            return None;
        }
    };
    Some(node)
}

pub fn render_blocks(blocks: &[Block]) -> Vec<RenderNode> {
    blocks.iter().filter_map(render_block).collect()
}

static BLANK_LINES: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n\s*\n").expect("blank line pattern is valid"));

/// Split legacy plain-text post content into paragraphs at blank lines
pub fn split_legacy_content(text: &str) -> Vec<String> {
    BLANK_LINES
        .split(text)
        .map(str::trim)
        .filter(|segment| !segment.is_empty())
        .map(str::to_string)
        .collect()
}

/// Render a whole post.
///
/// Posts written before the block editor existed only carry a single plain
/// text body; when there are no blocks, that body is shown as paragraphs.
pub fn render_post(blocks: &[Block], legacy_content: Option<&str>) -> Vec<RenderNode> {
    if !blocks.is_empty() {
        return render_blocks(blocks);
    }

    legacy_content
        .map(|text| {
            split_legacy_content(text)
                .into_iter()
                .map(|text| RenderNode::Text {
                    tag: TextTag::Paragraph,
                    text,
                })
                .collect()
        })
        .unwrap_or_default()
}

/// Serialize rendered nodes as HTML, one node per line
pub fn to_html(nodes: &[RenderNode]) -> String {
    nodes
        .iter()
        .map(RenderNode::to_html)
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_types_map_to_tags() {
        let cases = [
            (BlockType::Paragraph, TextTag::Paragraph),
            (BlockType::Heading1, TextTag::Heading1),
            (BlockType::Heading2, TextTag::Heading2),
            (BlockType::Heading3, TextTag::Heading3),
            (BlockType::Quote, TextTag::Quote),
        ];
        for (block_type, tag) in cases {
            let block = Block::new(block_type, 0).with_content("hi");
            assert_eq!(
                render_block(&block),
                Some(RenderNode::Text {
                    tag,
                    text: "hi".to_string()
                })
            );
        }
    }

    #[test]
    fn test_image_without_caption() {
        let block = Block::new(BlockType::Image, 0).with_image("cat.png", "A cat", "");
        let node = render_block(&block).unwrap();
        assert_eq!(
            node,
            RenderNode::Figure {
                src: "cat.png".to_string(),
                alt: "A cat".to_string(),
                caption: None,
                alignment: Alignment::Left,
            }
        );
        assert!(!node.to_html().contains("figcaption"));
    }

    #[test]
    fn test_stale_fields_are_ignored() {
        let block = Block::paragraph("text")
            .with_image("stale.png", "stale", "stale")
            .with_items(["stale"]);
        assert_eq!(
            render_block(&block).unwrap().to_html(),
            "<p>text</p>"
        );
    }

    #[test]
    fn test_empty_list_renders_empty_container() {
        let block = Block::new(BlockType::List, 0);
        let node = render_block(&block).unwrap();
        assert_eq!(node, RenderNode::List { items: Vec::new() });
        assert_eq!(node.to_html(), "<ul></ul>");
    }

    #[test]
    fn test_unknown_type_renders_nothing() {
        let block = Block::new(BlockType::from_name("carousel"), 0).with_content("x");
        assert_eq!(render_block(&block), None);
        assert!(render_blocks(&[block]).is_empty());
    }

    #[test]
    fn test_code_is_passed_through() {
        let block = Block::new(BlockType::Code, 0)
            .with_language("python")
            .with_content("if a < b:\n    pass");
        assert_eq!(
            render_block(&block).unwrap().to_html(),
            "<pre><code class=\"language-python\">if a &lt; b:\n    pass</code></pre>"
        );
    }

    #[test]
    fn test_legacy_split_on_blank_lines() {
        let text = "First paragraph\nstill first.\n\n\nSecond.\n  \t\nThird.\n\n";
        assert_eq!(
            split_legacy_content(text),
            ["First paragraph\nstill first.", "Second.", "Third."]
        );
    }

    #[test]
    fn test_legacy_fallback_only_for_empty_documents() {
        let legacy = Some("one\n\ntwo");
        assert_eq!(render_post(&[], legacy).len(), 2);

        let blocks = [Block::paragraph("blocks win")];
        let nodes = render_post(&blocks, legacy);
        assert_eq!(nodes.len(), 1);
        assert_eq!(nodes[0].to_html(), "<p>blocks win</p>");

        assert!(render_post(&[], Some("  \n\n ")).is_empty());
        assert!(render_post(&[], None).is_empty());
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html(r#"<a href="x">Tom & 'Jerry'</a>"#),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; &#39;Jerry&#39;&lt;/a&gt;"
        );
    }
}
