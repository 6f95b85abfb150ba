//! Shared fixtures for unit tests

use tempfile::TempDir;

use crate::content::{BlockType, ContentBlock, ContentState, SelectionState};
use crate::document::DocumentState;
use crate::io::SnapshotStore;
use crate::keys::{Key, KeyEvent};
use crate::session::EditorSession;

/// One unstyled block keyed `a` holding `text`, caret at `offset`
pub fn single_block_state(text: &str, offset: usize) -> DocumentState {
    let block = ContentBlock::new("a".into(), BlockType::Unstyled, text);
    DocumentState::create_with_content(ContentState::from_blocks(vec![block]))
        .with_selection(SelectionState::collapsed("a".into(), offset))
}

pub fn create_test_storage_dir() -> TempDir {
    TempDir::new().expect("Failed to create temp dir")
}

/// Feed `text` to the session one key at a time, like a user typing it
pub fn type_text<S: SnapshotStore>(session: &mut EditorSession<S>, text: &str) {
    for c in text.chars() {
        session.handle_key(&KeyEvent::plain(Key::Char(c)));
    }
}
