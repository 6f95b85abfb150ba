pub mod content;
pub mod document;
pub mod io;
pub mod keys;
pub mod markup;
pub mod native;
pub mod raw;
pub mod session;

#[cfg(test)]
pub mod tests;

// Re-export key types for easier usage
pub use content::{
    BlockKey, BlockType, ContentBlock, ContentState, InlineStyle, SelectionState, StyleSet,
};
pub use document::{CaretMotion, ChangeType, DocumentState, UNDO_LIMIT};
pub use io::{FileStore, MemoryStore, SnapshotStore, StorageError};
pub use keys::{Key, KeyEvent, Modifiers, default_key_binding};
pub use markup::{
    AsteriskVariant, Command, HandleOutcome, KeyCommandResult, RuleTable, RuleTableError,
};
pub use native::NativeCommand;
pub use raw::RawError;
pub use session::{DEFAULT_STORAGE_KEY, EditorSession, SessionError, SessionOptions};
