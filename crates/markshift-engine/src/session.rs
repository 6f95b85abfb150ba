//! The host-side editing loop: one current [`DocumentState`] plus the store it
//! is persisted to.

use crate::document::{CaretMotion, DocumentState};
use crate::io::{SnapshotStore, StorageError};
use crate::keys::{Key, KeyEvent};
use crate::markup::{HandleOutcome, KeyCommandResult, RuleTable, classify, handle_key_command};
use crate::raw::{self, RawError};

/// Key the document is saved under unless configured otherwise
pub const DEFAULT_STORAGE_KEY: &str = "SavedContent";

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error(transparent)]
    Raw(#[from] RawError),
}

#[derive(Debug, Clone)]
pub struct SessionOptions {
    pub storage_key: String,
    /// Save after every content change
    pub autosave: bool,
    pub rules: RuleTable,
}

impl SessionOptions {
    pub fn new(rules: RuleTable) -> Self {
        Self {
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            autosave: true,
            rules,
        }
    }

    pub fn with_storage_key(mut self, key: impl Into<String>) -> Self {
        self.storage_key = key.into();
        self
    }

    pub fn with_autosave(mut self, autosave: bool) -> Self {
        self.autosave = autosave;
        self
    }
}

pub struct EditorSession<S: SnapshotStore> {
    store: S,
    options: SessionOptions,
    state: DocumentState,
    dirty: bool,
    /// Set while the stored snapshot could not be read. Only an explicit
    /// [`EditorSession::save`] may replace it.
    autosave_suspended: bool,
}

impl<S: SnapshotStore> EditorSession<S> {
    /// Open the document saved under the configured key, or an empty one.
    ///
    /// A snapshot that can't be read or parsed is logged and replaced by an
    /// empty document. Autosave stays off until the next explicit save, so
    /// the stored bytes survive editing.
    pub fn open(store: S, options: SessionOptions) -> Self {
        let key = options.storage_key.as_str();
        let mut autosave_suspended = false;
        let state = match store.load(key) {
            Ok(Some(json)) => match raw::from_json(&json) {
                Ok(content) => {
                    log::info!("Loaded {} block(s) from {key}", content.block_count());
                    DocumentState::create_with_content(content)
                }
                Err(e) => {
                    log::warn!("Ignoring unreadable snapshot {key}: {e}");
                    autosave_suspended = true;
                    DocumentState::create_empty()
                }
            },
            Ok(None) => {
                log::info!("No snapshot under {key}, starting with an empty document");
                DocumentState::create_empty()
            }
            Err(e) => {
                log::warn!("Failed to load snapshot {key}: {e}");
                autosave_suspended = true;
                DocumentState::create_empty()
            }
        };
        if autosave_suspended && options.autosave {
            log::warn!("Autosave suspended until {key} is saved explicitly");
        }

        Self {
            store,
            options,
            state,
            dirty: false,
            autosave_suspended,
        }
    }

    pub fn state(&self) -> &DocumentState {
        &self.state
    }

    pub fn options(&self) -> &SessionOptions {
        &self.options
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Content changed since the last successful save
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// The stored snapshot was unreadable and autosave is holding off
    pub fn is_autosave_suspended(&self) -> bool {
        self.autosave_suspended
    }

    /// Feed one keystroke through the editor.
    ///
    /// Returns the key-command outcome. On `NotHandled` a printable key is
    /// still inserted as text, the way a host's default input handling would.
    pub fn handle_key(&mut self, event: &KeyEvent) -> HandleOutcome {
        if let Some(motion) = caret_motion(event) {
            let next = self.state.move_caret(motion);
            self.on_change(next);
            return HandleOutcome::Handled;
        }

        let rules = &self.options.rules;
        let block_text = self
            .state
            .content()
            .block_for_key(self.state.selection().start_key())
            .map_or("", |b| b.text());
        let command = classify(event, block_text, rules);

        match handle_key_command(&self.state, command, rules) {
            KeyCommandResult::Handled(next) => {
                log::trace!("{command} handled");
                self.on_change(next);
                HandleOutcome::Handled
            }
            KeyCommandResult::NotHandled => {
                if let Some(c) = event.printable_char() {
                    let next = self.state.insert_characters(c.encode_utf8(&mut [0; 4]));
                    self.on_change(next);
                }
                HandleOutcome::NotHandled
            }
        }
    }

    /// Publish a new state. Autosave failures are logged and never undo the edit.
    pub fn on_change(&mut self, state: DocumentState) {
        let content_changed = state.content() != self.state.content();
        self.state = state;
        if !content_changed {
            return;
        }

        self.dirty = true;
        if self.options.autosave
            && !self.autosave_suspended
            && let Err(e) = self.save()
        {
            log::warn!("Autosave to {} failed: {e}", self.options.storage_key);
        }
    }

    /// Serialize the current content and write it to the store
    pub fn save(&mut self) -> Result<(), SessionError> {
        let json = raw::to_json(self.state.content())?;
        self.store.save(&self.options.storage_key, &json)?;
        self.dirty = false;
        self.autosave_suspended = false;
        Ok(())
    }
}

fn caret_motion(event: &KeyEvent) -> Option<CaretMotion> {
    if event.modifiers.ctrl || event.modifiers.alt {
        return None;
    }
    match event.key {
        Key::Left => Some(CaretMotion::Left),
        Key::Right => Some(CaretMotion::Right),
        Key::Up => Some(CaretMotion::Up),
        Key::Down => Some(CaretMotion::Down),
        Key::Home => Some(CaretMotion::LineStart),
        Key::End => Some(CaretMotion::LineEnd),
        _ => None,
    }
}
