use std::collections::VecDeque;
use std::rc::Rc;

use crate::content::{ContentState, SelectionState, StyleSet, modifier};

/// Maximum number of undo steps kept per document
pub const UNDO_LIMIT: usize = 200;

/// Kind of edit that produced a document state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeType {
    InsertCharacters,
    ChangeBlockType,
    ChangeInlineStyle,
    SplitBlock,
    RemoveRange,
    Undo,
    Redo,
}

impl ChangeType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChangeType::InsertCharacters => "insert-characters",
            ChangeType::ChangeBlockType => "change-block-type",
            ChangeType::ChangeInlineStyle => "change-inline-style",
            ChangeType::SplitBlock => "split-block",
            ChangeType::RemoveRange => "remove-range",
            ChangeType::Undo => "undo",
            ChangeType::Redo => "redo",
        }
    }
}

/// Caret movements a host can request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaretMotion {
    Left,
    Right,
    Up,
    Down,
    LineStart,
    LineEnd,
}

#[derive(Debug, Clone, PartialEq)]
struct HistoryEntry {
    content: ContentState,
    selection: SelectionState,
}

/// Undo/redo stack shared between successive states; copied on write only
type History = Rc<VecDeque<Rc<HistoryEntry>>>;

/// Immutable snapshot of the whole editable document.
///
/// Every change yields a new `DocumentState`; the host keeps exactly one
/// current value and swaps it on each accepted edit.
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentState {
    content: ContentState,
    selection: SelectionState,
    /// Set when the selection must be applied by the host as-is (after programmatic edits)
    force_selection: bool,
    /// Styles for the next inserted characters, overriding the preceding character's styles
    inline_style_override: Option<StyleSet>,
    last_change_type: Option<ChangeType>,
    /// The caret is still where the last character insertion left it
    typing_run: bool,
    undo_stack: History,
    redo_stack: History,
}

impl DocumentState {
    pub fn create_empty() -> Self {
        Self::create_with_content(ContentState::create_empty())
    }

    /// Wrap existing content, with the cursor at the start of the first block
    pub fn create_with_content(content: ContentState) -> Self {
        let selection = SelectionState::collapsed(content.first_block().key().clone(), 0);
        Self {
            content,
            selection,
            force_selection: false,
            inline_style_override: None,
            last_change_type: None,
            typing_run: false,
            undo_stack: History::default(),
            redo_stack: History::default(),
        }
    }

    pub fn content(&self) -> &ContentState {
        &self.content
    }

    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    pub fn is_selection_forced(&self) -> bool {
        self.force_selection
    }

    pub fn inline_style_override(&self) -> Option<&StyleSet> {
        self.inline_style_override.as_ref()
    }

    pub fn last_change_type(&self) -> Option<ChangeType> {
        self.last_change_type
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    /// Styles the next typed character would receive
    pub fn current_inline_style(&self) -> StyleSet {
        if let Some(styles) = &self.inline_style_override {
            return styles.clone();
        }

        let Some(block) = self.content.block_for_key(self.selection.start_key()) else {
            return StyleSet::new();
        };
        let offset = self.selection.start_offset().min(block.len());
        if offset > 0 {
            return block.styles()[offset - 1].clone();
        }
        if let Some(first) = block.style_at(0) {
            return first.clone();
        }

        // Empty block: inherit from the closest earlier block that has text
        let index = self.content.block_index(block.key()).unwrap_or(0);
        self.content.blocks()[..index]
            .iter()
            .rev()
            .find_map(|b| b.styles().last().cloned())
            .unwrap_or_default()
    }

    /// Record new content as an undoable change.
    ///
    /// Consecutive character insertions share one undo step as long as the
    /// caret has not moved between them. The override style and any forced
    /// selection are cleared.
    pub fn push(
        &self,
        content: ContentState,
        selection_after: SelectionState,
        change_type: ChangeType,
    ) -> Self {
        let is_insert = change_type == ChangeType::InsertCharacters;
        let coalesce = is_insert && self.typing_run;

        let mut undo_stack = Rc::clone(&self.undo_stack);
        if !coalesce {
            let stack = Rc::make_mut(&mut undo_stack);
            stack.push_back(self.history_entry());
            if stack.len() > UNDO_LIMIT {
                stack.pop_front();
            }
        }

        Self {
            content,
            selection: selection_after,
            force_selection: false,
            inline_style_override: None,
            last_change_type: Some(change_type),
            typing_run: is_insert,
            undo_stack,
            redo_stack: History::default(),
        }
    }

    /// Accept a selection reported by the host without forcing it back
    pub fn with_selection(&self, selection: SelectionState) -> Self {
        Self {
            typing_run: self.typing_run && selection == self.selection,
            selection,
            force_selection: false,
            ..self.clone()
        }
    }

    /// Make `selection` authoritative: the host must move its caret there
    pub fn force_selection(&self, selection: SelectionState) -> Self {
        let selection = selection.with_focus(true);
        Self {
            typing_run: self.typing_run && selection == self.selection,
            selection,
            force_selection: true,
            ..self.clone()
        }
    }

    /// Collapse the selection to the end of the last block
    pub fn move_selection_to_end(&self) -> Self {
        let last = self.content.last_block();
        self.with_selection(
            SelectionState::collapsed(last.key().clone(), last.len()).with_focus(true),
        )
    }

    pub fn with_inline_style_override(&self, styles: Option<StyleSet>) -> Self {
        Self {
            inline_style_override: styles,
            ..self.clone()
        }
    }

    /// Default text insertion: replace the selection with `text` at the current style
    pub fn insert_characters(&self, text: &str) -> Self {
        let style = self.current_inline_style();
        let content = modifier::replace_text(&self.content, &self.selection, text, &style);
        let start = self.selection.collapse_to_start();
        let after = SelectionState::collapsed(
            start.start_key().clone(),
            start.start_offset() + text.chars().count(),
        )
        .with_focus(self.selection.has_focus());

        let next = self.push(content, after, ChangeType::InsertCharacters);
        // The override keeps applying while the user keeps typing
        next.with_inline_style_override(self.inline_style_override.clone())
    }

    pub fn undo(&self) -> Option<Self> {
        self.undo_stack.back()?;
        let mut undo_stack = Rc::clone(&self.undo_stack);
        let entry = Rc::make_mut(&mut undo_stack).pop_back()?;
        let mut redo_stack = Rc::clone(&self.redo_stack);
        Rc::make_mut(&mut redo_stack).push_back(self.history_entry());
        Some(self.restore(&entry, undo_stack, redo_stack, ChangeType::Undo))
    }

    pub fn redo(&self) -> Option<Self> {
        self.redo_stack.back()?;
        let mut redo_stack = Rc::clone(&self.redo_stack);
        let entry = Rc::make_mut(&mut redo_stack).pop_back()?;
        let mut undo_stack = Rc::clone(&self.undo_stack);
        Rc::make_mut(&mut undo_stack).push_back(self.history_entry());
        Some(self.restore(&entry, undo_stack, redo_stack, ChangeType::Redo))
    }

    /// Move the caret, collapsing any span. Clears the override style.
    pub fn move_caret(&self, motion: CaretMotion) -> Self {
        let selection = &self.selection;
        let key = selection.focus_key();
        let Some(block) = self.content.block_for_key(key) else {
            return self.clone();
        };
        let offset = selection.focus_offset().min(block.len());

        let target = match motion {
            CaretMotion::Left if !selection.is_collapsed() => selection.collapse_to_start(),
            CaretMotion::Right if !selection.is_collapsed() => SelectionState::collapsed(
                selection.end_key().clone(),
                selection.end_offset(),
            ),
            CaretMotion::Left if offset > 0 => SelectionState::collapsed(key.clone(), offset - 1),
            CaretMotion::Left => match self.content.block_before(key) {
                Some(prev) => SelectionState::collapsed(prev.key().clone(), prev.len()),
                None => SelectionState::collapsed(key.clone(), 0),
            },
            CaretMotion::Right if offset < block.len() => {
                SelectionState::collapsed(key.clone(), offset + 1)
            }
            CaretMotion::Right => match self.content.block_after(key) {
                Some(next) => SelectionState::collapsed(next.key().clone(), 0),
                None => SelectionState::collapsed(key.clone(), block.len()),
            },
            CaretMotion::Up => match self.content.block_before(key) {
                Some(prev) => SelectionState::collapsed(prev.key().clone(), offset.min(prev.len())),
                None => SelectionState::collapsed(key.clone(), 0),
            },
            CaretMotion::Down => match self.content.block_after(key) {
                Some(next) => SelectionState::collapsed(next.key().clone(), offset.min(next.len())),
                None => SelectionState::collapsed(key.clone(), block.len()),
            },
            CaretMotion::LineStart => SelectionState::collapsed(key.clone(), 0),
            CaretMotion::LineEnd => SelectionState::collapsed(key.clone(), block.len()),
        };

        self.with_selection(target.with_focus(selection.has_focus()))
            .with_inline_style_override(None)
    }

    fn history_entry(&self) -> Rc<HistoryEntry> {
        Rc::new(HistoryEntry {
            content: self.content.clone(),
            selection: self.selection.clone(),
        })
    }

    fn restore(
        &self,
        entry: &HistoryEntry,
        undo_stack: History,
        redo_stack: History,
        change_type: ChangeType,
    ) -> Self {
        Self {
            content: entry.content.clone(),
            selection: entry.selection.clone().with_focus(true),
            force_selection: true,
            inline_style_override: None,
            last_change_type: Some(change_type),
            typing_run: false,
            undo_stack,
            redo_stack,
        }
    }
}

impl Default for DocumentState {
    fn default() -> Self {
        Self::create_empty()
    }
}
