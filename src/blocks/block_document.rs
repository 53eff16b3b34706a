// Block Document Store
// Holds the ordered blocks of one post during an editing session, together
// with the session state of the editor (selected block, preview toggle).
// Blocks have no identity besides their position, so every operation is
// index-addressed.

use super::block::{Block, BlockType, BlockUpdate};
use crate::config::EditorConfig;
use crate::error::{EditError, EditResult};

/// Direction of a pairwise move
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
}

/// The block editor's document and session state
#[derive(Debug, Clone, PartialEq)]
pub struct BlockDocument {
    blocks: Vec<Block>,
    selected: Option<usize>,
    show_preview: bool,
    default_language: String,
}

impl BlockDocument {
    /// Create an empty document
    pub fn new() -> Self {
        Self::from_blocks(Vec::new())
    }

    /// Create a document from previously persisted blocks
    pub fn from_blocks(blocks: Vec<Block>) -> Self {
        BlockDocument {
            blocks,
            selected: None,
            show_preview: false,
            default_language: EditorConfig::default().default_language,
        }
    }

    pub fn with_config(blocks: Vec<Block>, config: &EditorConfig) -> Self {
        BlockDocument {
            default_language: config.default_language.clone(),
            ..Self::from_blocks(blocks)
        }
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    pub fn get(&self, index: usize) -> Option<&Block> {
        self.blocks.get(index)
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    fn check_index(&self, index: usize) -> EditResult {
        if index < self.blocks.len() {
            Ok(())
        } else {
            log::warn!(
                "Rejected operation on block {index}: document has {} blocks",
                self.blocks.len()
            );
            Err(EditError::OutOfRange {
                index,
                len: self.blocks.len(),
            })
        }
    }

    /// Append an empty block of the given type and select it.
    /// Returns the index of the new block.
    pub fn append(&mut self, block_type: BlockType) -> usize {
        let index = self.blocks.len();
        let block = Block::new(block_type, index).with_language(self.default_language.clone());
        log::debug!("Appending {} block at {index}", block.block_type);
        self.blocks.push(block);
        self.selected = Some(index);
        index
    }

    /// Merge `update` into the block at `index`
    pub fn update(&mut self, index: usize, update: BlockUpdate) -> EditResult {
        self.check_index(index)?;
        log::debug!("Updating block {index}");
        self.blocks[index].apply(update);
        Ok(())
    }

    /// Remove the block at `index`, shifting later blocks down by one.
    /// Returns the removed block.
    pub fn delete(&mut self, index: usize) -> EditResult<Block> {
        self.check_index(index)?;
        log::debug!("Deleting block {index}");
        let removed = self.blocks.remove(index);

        self.selected = match self.selected {
            Some(sel) if sel == index => None,
            // Keep following the same block after the shift
            Some(sel) if sel > index => Some(sel - 1),
            other => other,
        };

        Ok(removed)
    }

    /// Swap the block at `index` with its neighbour in `direction`.
    ///
    /// Returns `Ok(false)` without changing anything when the block is
    /// already at that end of the document. On success the selection
    /// follows the moved block.
    pub fn move_block(&mut self, index: usize, direction: Direction) -> EditResult<bool> {
        self.check_index(index)?;

        let target = match direction {
            Direction::Up if index > 0 => index - 1,
            Direction::Down if index + 1 < self.blocks.len() => index + 1,
            _ => return Ok(false),
        };

        log::debug!("Moving block {index} to {target}");
        self.blocks.swap(index, target);
        self.selected = Some(target);
        Ok(true)
    }

    /// Hand the current blocks to the caller. The session stays editable.
    pub fn commit(&self) -> Vec<Block> {
        log::debug!("Committing {} blocks", self.blocks.len());
        self.blocks.clone()
    }

    fn list_items(&self, index: usize) -> EditResult<&[String]> {
        self.check_index(index)?;
        let block = &self.blocks[index];
        if block.block_type != BlockType::List {
            return Err(EditError::NotAList { index });
        }
        Ok(&block.list_items)
    }

    /// Append an empty item to the list block at `index`.
    /// Returns the index of the new item.
    pub fn push_list_item(&mut self, index: usize) -> EditResult<usize> {
        let mut items = self.list_items(index)?.to_vec();
        items.push(String::new());
        let item = items.len() - 1;
        self.update(index, BlockUpdate::new().list_items(items))?;
        Ok(item)
    }

    pub fn set_list_item(
        &mut self,
        index: usize,
        item: usize,
        text: impl Into<String>,
    ) -> EditResult {
        let mut items = self.list_items(index)?.to_vec();
        let len = items.len();
        let slot = items
            .get_mut(item)
            .ok_or(EditError::ListItemOutOfRange { item, len })?;
        *slot = text.into();
        self.update(index, BlockUpdate::new().list_items(items))
    }

    pub fn remove_list_item(&mut self, index: usize, item: usize) -> EditResult<String> {
        let mut items = self.list_items(index)?.to_vec();
        if item >= items.len() {
            return Err(EditError::ListItemOutOfRange {
                item,
                len: items.len(),
            });
        }
        let removed = items.remove(item);
        self.update(index, BlockUpdate::new().list_items(items))?;
        Ok(removed)
    }

    /// Index of the block currently open for editing
    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    pub fn selected_block(&self) -> Option<&Block> {
        self.selected.and_then(|index| self.blocks.get(index))
    }

    pub fn select(&mut self, index: usize) -> EditResult {
        self.check_index(index)?;
        self.selected = Some(index);
        Ok(())
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    /// Flip between editing and previewing. Returns the new state.
    pub fn toggle_preview(&mut self) -> bool {
        self.show_preview = !self.show_preview;
        self.show_preview
    }

    pub fn is_previewing(&self) -> bool {
        self.show_preview
    }
}

impl Default for BlockDocument {
    fn default() -> Self {
        Self::new()
    }
}
