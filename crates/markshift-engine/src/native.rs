//! Built-in editing commands that are not markup conversions.

use crate::content::{BlockType, InlineStyle, SelectionState, modifier};
use crate::document::{ChangeType, DocumentState};

/// Engine-native command produced by the default key bindings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NativeCommand {
    SplitBlock,
    SoftNewline,
    Backspace,
    Delete,
    Bold,
    Italic,
    Underline,
    Code,
    Undo,
    Redo,
}

impl NativeCommand {
    pub fn name(&self) -> &'static str {
        match self {
            NativeCommand::SplitBlock => "split-block",
            NativeCommand::SoftNewline => "insert-soft-newline",
            NativeCommand::Backspace => "backspace",
            NativeCommand::Delete => "delete",
            NativeCommand::Bold => "bold",
            NativeCommand::Italic => "italic",
            NativeCommand::Underline => "underline",
            NativeCommand::Code => "code",
            NativeCommand::Undo => "undo",
            NativeCommand::Redo => "redo",
        }
    }

    fn toggled_style(&self) -> Option<InlineStyle> {
        match self {
            NativeCommand::Bold => Some(InlineStyle::Bold),
            NativeCommand::Italic => Some(InlineStyle::Italic),
            NativeCommand::Underline => Some(InlineStyle::Underline),
            NativeCommand::Code => Some(InlineStyle::Code),
            _ => None,
        }
    }
}

/// Apply a native command; `None` means the command had nothing to do
pub fn handle_native_command(
    state: &DocumentState,
    command: NativeCommand,
) -> Option<DocumentState> {
    if let Some(style) = command.toggled_style() {
        return Some(toggle_inline_style(state, style));
    }

    match command {
        NativeCommand::SplitBlock => Some(split_block(state)),
        NativeCommand::SoftNewline => Some(state.insert_characters("\n")),
        NativeCommand::Backspace => backspace(state),
        NativeCommand::Delete => delete(state),
        NativeCommand::Undo => state.undo(),
        NativeCommand::Redo => state.redo(),
        _ => None,
    }
}

/// Toggle a style over the selection, or for the next typed characters when collapsed
pub fn toggle_inline_style(state: &DocumentState, style: InlineStyle) -> DocumentState {
    let selection = state.selection();

    if selection.is_collapsed() {
        let mut styles = state.current_inline_style();
        if !styles.remove(&style) {
            styles.insert(style);
        }
        return state.with_inline_style_override(Some(styles));
    }

    let content = state.content();
    let content = if modifier::range_has_style(content, selection, style) {
        modifier::remove_inline_style(content, selection, style)
    } else {
        modifier::apply_inline_style(content, selection, style)
    };
    state.push(content, selection.clone(), ChangeType::ChangeInlineStyle)
}

fn split_block(state: &DocumentState) -> DocumentState {
    let selection = state.selection();
    let at_heading_end = state
        .content()
        .block_for_key(selection.start_key())
        .is_some_and(|block| {
            block.block_type().is_heading()
                && selection.is_collapsed()
                && selection.start_offset() >= block.len()
        });

    let (content, after) = modifier::split_block(state.content(), selection);
    let content = if at_heading_end {
        modifier::set_block_type(&content, &after, BlockType::Unstyled)
    } else {
        content
    };
    state.push(
        content,
        after.with_focus(selection.has_focus()),
        ChangeType::SplitBlock,
    )
}

fn backspace(state: &DocumentState) -> Option<DocumentState> {
    let selection = state.selection();
    if !selection.is_collapsed() {
        return Some(remove_selection(state));
    }

    let content = state.content();
    let block = content.block_for_key(selection.start_key())?;
    let offset = selection.start_offset().min(block.len());

    if offset > 0 {
        let range = SelectionState::within_block(block.key().clone(), offset - 1, offset);
        let removed = modifier::remove_range(content, &range);
        let after = range.collapse_to_start().with_focus(selection.has_focus());
        return Some(state.push(removed, after, ChangeType::RemoveRange));
    }

    if block.block_type() != BlockType::Unstyled {
        let reset = modifier::set_block_type(content, selection, BlockType::Unstyled);
        return Some(state.push(reset, selection.clone(), ChangeType::ChangeBlockType));
    }

    let prev = content.block_before(block.key())?;
    let range = SelectionState::span(prev.key().clone(), prev.len(), block.key().clone(), 0);
    let joined = modifier::remove_range(content, &range);
    let after = range.collapse_to_start().with_focus(selection.has_focus());
    Some(state.push(joined, after, ChangeType::RemoveRange))
}

fn delete(state: &DocumentState) -> Option<DocumentState> {
    let selection = state.selection();
    if !selection.is_collapsed() {
        return Some(remove_selection(state));
    }

    let content = state.content();
    let block = content.block_for_key(selection.start_key())?;
    let offset = selection.start_offset().min(block.len());

    let range = if offset < block.len() {
        SelectionState::within_block(block.key().clone(), offset, offset + 1)
    } else {
        let next = content.block_after(block.key())?;
        SelectionState::span(block.key().clone(), offset, next.key().clone(), 0)
    };
    let removed = modifier::remove_range(content, &range);
    let after = range.collapse_to_start().with_focus(selection.has_focus());
    Some(state.push(removed, after, ChangeType::RemoveRange))
}

fn remove_selection(state: &DocumentState) -> DocumentState {
    let selection = state.selection();
    let removed = modifier::remove_range(state.content(), selection);
    state.push(removed, selection.collapse_to_start(), ChangeType::RemoveRange)
}
