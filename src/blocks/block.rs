// Content Block
// One typed unit of post content. A block carries the fields of every type;
// which of them are meaningful depends on `block_type`.

use serde::{Deserialize, Serialize};
use std::fmt;
use unicode_segmentation::UnicodeSegmentation;

use crate::config::DEFAULT_CODE_LANGUAGE;

/// Block-level content types
///
/// Type names outside the known set are preserved as `Other` so that
/// documents written by a newer editor still load and save unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum BlockType {
    Paragraph,
    Heading1,
    Heading2,
    Heading3,
    Image,
    Quote,
    Code,
    List,
    Other(String),
}

impl BlockType {
    /// All types the editor can create
    pub const KNOWN: [BlockType; 8] = [
        BlockType::Paragraph,
        BlockType::Heading1,
        BlockType::Heading2,
        BlockType::Heading3,
        BlockType::Image,
        BlockType::Quote,
        BlockType::Code,
        BlockType::List,
    ];

    pub fn from_name(name: &str) -> Self {
        match name {
            "paragraph" => BlockType::Paragraph,
            "heading1" => BlockType::Heading1,
            "heading2" => BlockType::Heading2,
            "heading3" => BlockType::Heading3,
            "image" => BlockType::Image,
            "quote" => BlockType::Quote,
            "code" => BlockType::Code,
            "list" => BlockType::List,
            other => BlockType::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            BlockType::Paragraph => "paragraph",
            BlockType::Heading1 => "heading1",
            BlockType::Heading2 => "heading2",
            BlockType::Heading3 => "heading3",
            BlockType::Image => "image",
            BlockType::Quote => "quote",
            BlockType::Code => "code",
            BlockType::List => "list",
            BlockType::Other(name) => name,
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, BlockType::Other(_))
    }
}

impl From<String> for BlockType {
    fn from(name: String) -> Self {
        BlockType::from_name(&name)
    }
}

impl From<BlockType> for String {
    fn from(block_type: BlockType) -> Self {
        match block_type {
            BlockType::Other(name) => name,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for BlockType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// Horizontal placement of an image block
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Alignment {
    #[default]
    Left,
    Center,
    Right,
}

impl Alignment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Alignment::Left => "left",
            Alignment::Center => "center",
            Alignment::Right => "right",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "left" => Some(Alignment::Left),
            "center" => Some(Alignment::Center),
            "right" => Some(Alignment::Right),
            _ => None,
        }
    }
}

fn default_language() -> String {
    DEFAULT_CODE_LANGUAGE.to_string()
}

/// A block of content, in its persisted shape.
///
/// `order` is only a hint recorded at creation time; the position of the
/// block inside its document is authoritative.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Block {
    #[serde(rename = "type")]
    pub block_type: BlockType,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub image_url: String,
    #[serde(default)]
    pub image_caption: String,
    #[serde(default)]
    pub image_alt: String,
    #[serde(default = "default_language")]
    pub language: String,
    #[serde(default)]
    pub list_items: Vec<String>,
    #[serde(default)]
    pub alignment: Alignment,
    #[serde(default)]
    pub order: usize,
}

impl Block {
    /// Create an empty block of the given type
    pub fn new(block_type: BlockType, order: usize) -> Self {
        Block {
            block_type,
            content: String::new(),
            image_url: String::new(),
            image_caption: String::new(),
            image_alt: String::new(),
            language: default_language(),
            list_items: Vec::new(),
            alignment: Alignment::Left,
            order,
        }
    }

    pub fn paragraph(text: impl Into<String>) -> Self {
        Self::new(BlockType::Paragraph, 0).with_content(text)
    }

    pub fn with_content(mut self, text: impl Into<String>) -> Self {
        self.content = text.into();
        self
    }

    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    pub fn with_image(
        mut self,
        url: impl Into<String>,
        alt: impl Into<String>,
        caption: impl Into<String>,
    ) -> Self {
        self.image_url = url.into();
        self.image_alt = alt.into();
        self.image_caption = caption.into();
        self
    }

    pub fn with_items<I, S>(mut self, items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.list_items = items.into_iter().map(Into::into).collect();
        self
    }

    /// Merge the fields present in `update` into this block
    pub fn apply(&mut self, update: BlockUpdate) {
        let BlockUpdate {
            content,
            image_url,
            image_caption,
            image_alt,
            language,
            list_items,
            alignment,
        } = update;

        if let Some(content) = content {
            self.content = content;
        }
        if let Some(url) = image_url {
            self.image_url = url;
        }
        if let Some(caption) = image_caption {
            self.image_caption = caption;
        }
        if let Some(alt) = image_alt {
            self.image_alt = alt;
        }
        if let Some(language) = language {
            self.language = language;
        }
        if let Some(items) = list_items {
            self.list_items = items;
        }
        if let Some(alignment) = alignment {
            self.alignment = alignment;
        }
    }

    /// One-line summary shown in the block list of the editor
    pub fn preview(&self) -> String {
        match &self.block_type {
            BlockType::Paragraph => {
                let (head, truncated) = truncate_graphemes(&self.content, 50);
                if truncated { format!("{head}...") } else { head }
            }
            BlockType::Heading1 | BlockType::Heading2 | BlockType::Heading3 => {
                let (head, _) = truncate_graphemes(&self.content, 40);
                format!("{}: {}", self.block_type, head)
            }
            BlockType::Image => {
                let label = [&self.image_caption, &self.image_alt]
                    .into_iter()
                    .find(|s| !s.is_empty())
                    .map(String::as_str)
                    .unwrap_or("No caption");
                format!("Image: {label}")
            }
            BlockType::Quote => {
                let (head, _) = truncate_graphemes(&self.content, 40);
                format!("\"{head}...\"")
            }
            BlockType::Code => {
                let (head, _) = truncate_graphemes(&self.content, 30);
                format!("Code ({}): {}...", self.language, head)
            }
            BlockType::List => format!("List: {} items", self.list_items.len()),
            BlockType::Other(_) => "Unknown block".to_string(),
        }
    }
}

/// Take at most `max` user-perceived characters of `text`
fn truncate_graphemes(text: &str, max: usize) -> (String, bool) {
    let mut graphemes = text.graphemes(true);
    let head: String = graphemes.by_ref().take(max).collect();
    let truncated = graphemes.next().is_some();
    (head, truncated)
}

/// A partial set of block fields; `None` leaves the field untouched.
///
/// The block type is deliberately absent: a block keeps the type it was
/// created with.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BlockUpdate {
    pub content: Option<String>,
    pub image_url: Option<String>,
    pub image_caption: Option<String>,
    pub image_alt: Option<String>,
    pub language: Option<String>,
    pub list_items: Option<Vec<String>>,
    pub alignment: Option<Alignment>,
}

impl BlockUpdate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn content(mut self, text: impl Into<String>) -> Self {
        self.content = Some(text.into());
        self
    }

    pub fn image_url(mut self, url: impl Into<String>) -> Self {
        self.image_url = Some(url.into());
        self
    }

    pub fn image_caption(mut self, caption: impl Into<String>) -> Self {
        self.image_caption = Some(caption.into());
        self
    }

    pub fn image_alt(mut self, alt: impl Into<String>) -> Self {
        self.image_alt = Some(alt.into());
        self
    }

    pub fn language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }

    pub fn list_items(mut self, items: Vec<String>) -> Self {
        self.list_items = Some(items);
        self
    }

    pub fn alignment(mut self, alignment: Alignment) -> Self {
        self.alignment = Some(alignment);
        self
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}
