// Block editor: typed content blocks, the document store that edits them
// and the renderer that displays them

pub mod block;
pub mod block_document;
pub mod block_renderer;
pub mod markdown_converter;

pub use block::{Alignment, Block, BlockType, BlockUpdate};
pub use block_document::{BlockDocument, Direction};
pub use block_renderer::{RenderNode, TextTag, render_block, render_post};

/// Parse a persisted block document (a JSON array of blocks)
pub fn load_blocks(json: &str) -> Result<Vec<Block>, serde_json::Error> {
    serde_json::from_str(json)
}

/// Serialize blocks in their persisted JSON form
pub fn blocks_to_json(blocks: &[Block]) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(blocks)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_persisted_post() {
        let json = r#"[
            {"type": "heading2", "content": "Intro", "order": 0},
            {"type": "list", "listItems": ["a", "b"], "order": 1},
            {"type": "image", "imageUrl": "x.png", "alignment": "center", "order": 2}
        ]"#;
        let blocks = load_blocks(json).unwrap();
        assert_eq!(blocks.len(), 3);
        assert_eq!(blocks[1].list_items, ["a", "b"]);
        assert_eq!(blocks[2].alignment, Alignment::Center);
    }

    #[test]
    fn test_json_round_trip_preserves_order() {
        let blocks = vec![
            Block::new(BlockType::Quote, 0).with_content("q"),
            Block::paragraph("p"),
        ];
        let json = blocks_to_json(&blocks).unwrap();
        assert_eq!(load_blocks(&json).unwrap(), blocks);
    }

    #[test]
    fn test_invalid_alignment_is_rejected() {
        assert!(load_blocks(r#"[{"type":"image","alignment":"justify"}]"#).is_err());
    }
}
