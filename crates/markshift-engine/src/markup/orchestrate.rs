use std::borrow::Cow;
use std::fmt;

use crate::content::{ContentBlock, SelectionState, StyleSet};
use crate::document::{ChangeType, DocumentState};
use crate::markup::transform::{
    apply_block_type, apply_inline_style, move_focus_to_end, strip_marker,
};
use crate::markup::{Command, Conversion, RuleTable};
use crate::native::handle_native_command;

/// Answer given back to the host's key-command dispatch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandleOutcome {
    Handled,
    NotHandled,
}

impl HandleOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            HandleOutcome::Handled => "handled",
            HandleOutcome::NotHandled => "not-handled",
        }
    }
}

impl fmt::Display for HandleOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of dispatching one command
#[derive(Debug, Clone, PartialEq)]
pub enum KeyCommandResult {
    /// The command produced a new document state to publish
    Handled(DocumentState),
    /// Leave the keystroke to default text insertion
    NotHandled,
}

impl KeyCommandResult {
    pub fn outcome(&self) -> HandleOutcome {
        match self {
            KeyCommandResult::Handled(_) => HandleOutcome::Handled,
            KeyCommandResult::NotHandled => HandleOutcome::NotHandled,
        }
    }

    pub fn into_state(self) -> Option<DocumentState> {
        match self {
            KeyCommandResult::Handled(state) => Some(state),
            KeyCommandResult::NotHandled => None,
        }
    }
}

impl From<Option<DocumentState>> for KeyCommandResult {
    fn from(state: Option<DocumentState>) -> Self {
        state.map_or(KeyCommandResult::NotHandled, KeyCommandResult::Handled)
    }
}

/// Dispatch a classified command against the current document state.
///
/// Each call is atomic: it either returns a complete new state or leaves the
/// input alone. Nothing is carried between keystrokes.
pub fn handle_key_command(
    state: &DocumentState,
    command: Command,
    rules: &RuleTable,
) -> KeyCommandResult {
    match command {
        Command::Native(native) => handle_native_command(state, native).into(),
        Command::Unhandled => KeyCommandResult::NotHandled,
        markup => convert_markup(state, markup, rules).into(),
    }
}

/// Strip the command's marker from the current block and apply its conversion.
///
/// Returns `None` when the block does not carry the marker.
pub fn convert_markup(
    state: &DocumentState,
    command: Command,
    rules: &RuleTable,
) -> Option<DocumentState> {
    let marker = rules.marker_for(command)?;
    let conversion = rules.conversion_for(command)?;
    let selection = state.selection();
    let key = selection.start_key().clone();

    let Cow::Owned(stripped) = strip_marker(state.content(), selection, marker) else {
        log::debug!("{command}: block {key} does not start with {marker:?}");
        return None;
    };

    let next = match conversion {
        Conversion::Block(block_type) => {
            let target = SelectionState::collapsed(key.clone(), 0);
            let content = apply_block_type(&stripped, &target, block_type);
            state.push(content, selection.clone(), ChangeType::ChangeBlockType)
        }
        Conversion::Inline(style) => {
            let len = stripped.block_for_key(&key).map_or(0, ContentBlock::len);
            let whole_line = SelectionState::within_block(key.clone(), 0, len);
            let content = apply_inline_style(&stripped, &whole_line, style);
            state
                .push(content, selection.clone(), ChangeType::ChangeInlineStyle)
                .with_inline_style_override(Some(StyleSet::from([style])))
        }
    };

    log::debug!("{command} applied to block {key}");
    Some(move_focus_to_end(&next))
}
