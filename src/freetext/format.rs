// Formatting commands of the free-text toolbar and the markup each produces

use crate::blocks::block_renderer::escape_html;

/// Text wrapped by block-level commands when nothing is selected
pub const BLOCK_PLACEHOLDER: &str = "Click to edit...";
/// Text of an inserted link when nothing is selected
pub const LINK_PLACEHOLDER: &str = "Link";
/// Markup inserted for the tab key
pub const INDENT: &str = "&nbsp;&nbsp;&nbsp;&nbsp;";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormatCommand {
    Bold,
    Italic,
    Heading1,
    Heading2,
    Quote,
    Paragraph,
    Link { url: String },
    Image { src: String },
    Indent,
    /// Plain text typed at the caret; escaped before insertion
    InsertText(String),
}

impl FormatCommand {
    /// Markup replacing `selected` (already markup) when this command is applied
    pub fn markup_for(&self, selected: Option<&str>) -> String {
        let selected = selected.filter(|s| !s.is_empty());
        match self {
            FormatCommand::Bold => format!("<b>{}</b>", selected.unwrap_or_default()),
            FormatCommand::Italic => format!("<i>{}</i>", selected.unwrap_or_default()),
            FormatCommand::Heading1 => wrap_block("h1", selected),
            FormatCommand::Heading2 => wrap_block("h2", selected),
            FormatCommand::Quote => wrap_block("blockquote", selected),
            FormatCommand::Paragraph => wrap_block("p", selected),
            FormatCommand::Link { url } => format!(
                "<a href=\"{}\">{}</a>",
                escape_html(url),
                selected.unwrap_or(LINK_PLACEHOLDER)
            ),
            FormatCommand::Image { src } => format!("<img src=\"{}\">", escape_html(src)),
            FormatCommand::Indent => INDENT.to_string(),
            FormatCommand::InsertText(text) => escape_html(text),
        }
    }

    /// Commands whose target was left empty (a cancelled URL prompt)
    pub fn is_empty_target(&self) -> bool {
        match self {
            FormatCommand::Link { url } => url.trim().is_empty(),
            FormatCommand::Image { src } => src.trim().is_empty(),
            _ => false,
        }
    }
}

fn wrap_block(tag: &str, selected: Option<&str>) -> String {
    format!("<{tag}>{}</{tag}>", selected.unwrap_or(BLOCK_PLACEHOLDER))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inline_wraps_selection() {
        assert_eq!(FormatCommand::Bold.markup_for(Some("hi")), "<b>hi</b>");
        assert_eq!(FormatCommand::Italic.markup_for(None), "<i></i>");
    }

    #[test]
    fn test_block_placeholder() {
        assert_eq!(
            FormatCommand::Heading1.markup_for(Some("")),
            "<h1>Click to edit...</h1>"
        );
        assert_eq!(
            FormatCommand::Quote.markup_for(Some("<b>x</b>")),
            "<blockquote><b>x</b></blockquote>"
        );
    }

    #[test]
    fn test_link_and_image_escape_targets() {
        let link = FormatCommand::Link {
            url: "https://x.dev/?a=1&b=\"2\"".to_string(),
        };
        assert_eq!(
            link.markup_for(None),
            "<a href=\"https://x.dev/?a=1&amp;b=&quot;2&quot;\">Link</a>"
        );
        let image = FormatCommand::Image {
            src: "pic.png".to_string(),
        };
        assert_eq!(image.markup_for(Some("dropped")), "<img src=\"pic.png\">");
    }

    #[test]
    fn test_inserted_text_is_escaped() {
        assert_eq!(
            FormatCommand::InsertText("a < b".to_string()).markup_for(None),
            "a &lt; b"
        );
    }

    #[test]
    fn test_empty_targets() {
        assert!(FormatCommand::Link { url: " ".to_string() }.is_empty_target());
        assert!(!FormatCommand::Bold.is_empty_target());
    }
}
