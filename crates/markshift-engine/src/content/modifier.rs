//! Range edits over [`ContentState`].
//!
//! Every function takes the current content plus a selection describing the
//! target range and returns new content. Selections that name blocks missing
//! from the content leave it unchanged.

use std::ops::Range;

use crate::content::{
    BlockKey, BlockType, ContentBlock, ContentState, InlineStyle, SelectionState, StyleSet,
};

/// Replace the selected range with `text`, every new character carrying `style`
pub fn replace_text(
    content: &ContentState,
    range: &SelectionState,
    text: &str,
    style: &StyleSet,
) -> ContentState {
    let removed = remove_range(content, range);
    insert_text(&removed, &range.collapse_to_start(), text, style)
}

/// Insert `text` at the start of `at`
pub fn insert_text(
    content: &ContentState,
    at: &SelectionState,
    text: &str,
    style: &StyleSet,
) -> ContentState {
    let Some(block) = content.block_for_key(at.start_key()) else {
        return content.clone();
    };
    let offset = at.start_offset();
    content.with_block(block.replace_range(offset..offset, text, style))
}

/// Delete the selected range, joining the first and last blocks when it spans several
pub fn remove_range(content: &ContentState, range: &SelectionState) -> ContentState {
    if range.is_collapsed() {
        return content.clone();
    }
    let Some((first, last)) = block_span(content, range) else {
        return content.clone();
    };

    let blocks = content.blocks();
    let none = StyleSet::new();
    if first == last {
        let block = &blocks[first];
        return content.with_block(block.replace_range(
            range.start_offset()..range.end_offset(),
            "",
            &none,
        ));
    }

    let head = &blocks[first];
    let tail = &blocks[last];
    let head = head.replace_range(range.start_offset()..head.len(), "", &none);
    let tail = tail.replace_range(0..range.end_offset(), "", &none);
    content.splice(first..=last, vec![head.join(&tail)])
}

/// Set the type of every block touched by the selection
pub fn set_block_type(
    content: &ContentState,
    range: &SelectionState,
    block_type: BlockType,
) -> ContentState {
    map_blocks_in_range(content, range, |block, _| block.with_type(block_type))
}

/// Add `style` to every character in the selected range
pub fn apply_inline_style(
    content: &ContentState,
    range: &SelectionState,
    style: InlineStyle,
) -> ContentState {
    map_blocks_in_range(content, range, |block, chars| block.add_style(chars, style))
}

/// Remove `style` from every character in the selected range
pub fn remove_inline_style(
    content: &ContentState,
    range: &SelectionState,
    style: InlineStyle,
) -> ContentState {
    map_blocks_in_range(content, range, |block, chars| {
        block.remove_style(chars, style)
    })
}

/// Whether every selected character carries `style`; false for empty ranges
pub fn range_has_style(content: &ContentState, range: &SelectionState, style: InlineStyle) -> bool {
    let Some((first, last)) = block_span(content, range) else {
        return false;
    };
    let mut saw_text = false;
    for (index, block) in content.blocks()[first..=last].iter().enumerate() {
        let chars = char_range(block, range, index == 0, first + index == last);
        if chars.is_empty() {
            continue;
        }
        saw_text = true;
        if !block.has_style_throughout(chars, style) {
            return false;
        }
    }
    saw_text
}

/// Split the block at the selection start after removing any selected text.
///
/// Returns the new content and a cursor at the start of the new block.
pub fn split_block(
    content: &ContentState,
    range: &SelectionState,
) -> (ContentState, SelectionState) {
    let removed = remove_range(content, range);
    let at = range.collapse_to_start();
    let Some(index) = removed.block_index(at.start_key()) else {
        return (removed, at);
    };

    let tail_key = BlockKey::generate();
    let (head, tail) = removed.blocks()[index].split_at(at.start_offset(), tail_key.clone());
    let split = removed.splice(index..=index, vec![head, tail]);
    (split, SelectionState::collapsed(tail_key, 0))
}

fn block_span(content: &ContentState, range: &SelectionState) -> Option<(usize, usize)> {
    let first = content.block_index(range.start_key())?;
    let last = content.block_index(range.end_key())?;
    (first <= last).then_some((first, last))
}

fn char_range(
    block: &ContentBlock,
    range: &SelectionState,
    is_first: bool,
    is_last: bool,
) -> Range<usize> {
    let len = block.len();
    let start = if is_first { range.start_offset().min(len) } else { 0 };
    let end = if is_last { range.end_offset().min(len) } else { len };
    start..end.max(start)
}

fn map_blocks_in_range(
    content: &ContentState,
    range: &SelectionState,
    f: impl Fn(&ContentBlock, Range<usize>) -> ContentBlock,
) -> ContentState {
    let Some((first, last)) = block_span(content, range) else {
        return content.clone();
    };
    let updated = content.blocks()[first..=last]
        .iter()
        .enumerate()
        .map(|(index, block)| {
            let chars = char_range(block, range, index == 0, first + index == last);
            f(block, chars)
        })
        .collect();
    content.splice(first..=last, updated)
}
