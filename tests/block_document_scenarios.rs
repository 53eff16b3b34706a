// Editing sessions against the block document store

use folio::blocks::block_renderer::{RenderNode, render_block};
use folio::blocks::{Block, BlockDocument, BlockType, BlockUpdate, Direction};

fn named(names: &[&str]) -> BlockDocument {
    BlockDocument::from_blocks(names.iter().map(|n| Block::paragraph(*n)).collect())
}

fn contents(blocks: &[Block]) -> Vec<String> {
    blocks.iter().map(|b| b.content.clone()).collect()
}

#[test]
fn test_appended_blocks_commit_in_order() {
    let types = [
        BlockType::Heading1,
        BlockType::Paragraph,
        BlockType::Image,
        BlockType::Code,
        BlockType::List,
        BlockType::Quote,
        BlockType::Paragraph,
    ];
    let mut doc = BlockDocument::new();
    for block_type in &types {
        doc.append(block_type.clone());
    }

    let committed = doc.commit();
    let committed_types: Vec<BlockType> = committed.iter().map(|b| b.block_type.clone()).collect();
    assert_eq!(committed_types, types);
}

#[test]
fn test_moving_past_either_end_changes_nothing() {
    let mut doc = named(&["A", "B", "C"]);
    let before = doc.commit();

    assert_eq!(doc.move_block(0, Direction::Up), Ok(false));
    assert_eq!(doc.move_block(2, Direction::Down), Ok(false));
    assert_eq!(doc.commit(), before);
}

#[test]
fn test_move_is_a_pairwise_swap() {
    let mut doc = named(&["A", "B", "C"]);

    assert_eq!(doc.move_block(1, Direction::Up), Ok(true));
    assert_eq!(contents(doc.blocks()), ["B", "A", "C"]);
    assert_eq!(doc.selected(), Some(0));

    assert_eq!(doc.move_block(0, Direction::Down), Ok(true));
    assert_eq!(contents(doc.blocks()), ["A", "B", "C"]);
    assert_eq!(doc.selected(), Some(1));
}

#[test]
fn test_delete_reindexes_following_blocks() {
    let mut doc = named(&["A", "B", "C"]);
    doc.delete(1).unwrap();
    assert_eq!(contents(doc.blocks()), ["A", "C"]);

    doc.update(1, BlockUpdate::new().content("was C")).unwrap();
    assert_eq!(contents(doc.blocks()), ["A", "was C"]);
}

#[test]
fn test_update_touches_only_the_given_field() {
    let mut doc = BlockDocument::from_blocks(vec![
        Block::new(BlockType::Image, 0).with_image("a.png", "alt", "cap"),
        Block::new(BlockType::Code, 1)
            .with_language("bash")
            .with_content("ls"),
        Block::new(BlockType::List, 2).with_items(["x"]),
    ]);
    let before = doc.commit();

    doc.update(1, BlockUpdate::new().content("x")).unwrap();
    let after = doc.commit();

    assert_eq!(after[0], before[0]);
    assert_eq!(after[2], before[2]);
    let expected = Block {
        content: "x".to_string(),
        ..before[1].clone()
    };
    assert_eq!(after[1], expected);
}

#[test]
fn test_empty_list_and_unknown_type_render_safely() {
    let list = Block::new(BlockType::List, 0);
    assert_eq!(
        render_block(&list),
        Some(RenderNode::List { items: Vec::new() })
    );

    let invented = Block::new(BlockType::from_name("hologram"), 0);
    assert_eq!(render_block(&invented), None);
}

#[test]
fn test_heading_and_paragraph_session() {
    let mut doc = BlockDocument::new();
    doc.append(BlockType::Heading2);
    doc.append(BlockType::Paragraph);
    doc.update(1, BlockUpdate::new().content("Hello world"))
        .unwrap();
    doc.move_block(0, Direction::Down).unwrap();

    let committed = doc.commit();
    assert_eq!(committed.len(), 2);
    assert_eq!(committed[0].block_type, BlockType::Paragraph);
    assert_eq!(committed[0].content, "Hello world");
    assert_eq!(committed[1].block_type, BlockType::Heading2);
    assert_eq!(committed[1].content, "");
}

#[test]
fn test_empty_document_commits_empty_sequence() {
    let doc = BlockDocument::new();
    assert!(doc.commit().is_empty());
}

#[test]
fn test_failed_operations_leave_document_intact() {
    let mut doc = named(&["A", "B"]);
    doc.select(1).unwrap();
    let before = doc.clone();

    assert!(doc.update(5, BlockUpdate::new().content("x")).is_err());
    assert!(doc.delete(2).is_err());
    assert!(doc.move_block(9, Direction::Up).is_err());
    assert!(doc.set_list_item(0, 0, "x").is_err());
    assert!(doc.select(4).is_err());

    assert_eq!(doc, before);
}

#[test]
fn test_list_items_edit_independently() {
    let mut doc = BlockDocument::new();
    let list = doc.append(BlockType::List);
    for _ in 0..3 {
        doc.push_list_item(list).unwrap();
    }
    doc.set_list_item(list, 0, "first").unwrap();
    doc.set_list_item(list, 2, "third").unwrap();
    doc.set_list_item(list, 1, "second").unwrap();
    doc.remove_list_item(list, 0).unwrap();

    assert_eq!(doc.blocks()[list].list_items, ["second", "third"]);
}
