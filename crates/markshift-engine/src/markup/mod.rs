//! # Markup conversion
//!
//! Turns line-start markers into rich-text formatting when the user types a
//! space after them:
//!
//! | marker | result (default table) |
//! |---|---|
//! | `#` | block becomes `header-one` |
//! | `*` | line styled RED |
//! | `**` | line styled BOLD |
//! | `***` | line styled UNDERLINE |
//!
//! The pipeline for one keystroke is `classify` → `handle_key_command`, which
//! strips the marker, applies the conversion and puts the caret at the end of
//! the block. All functions are pure over [`DocumentState`](crate::DocumentState).
//!
//! ```rust
//! use markshift_engine::{DocumentState, ContentState, Key, KeyEvent};
//! use markshift_engine::markup::{AsteriskVariant, RuleTable, classify, handle_key_command};
//!
//! let rules = RuleTable::for_variant(AsteriskVariant::Red).unwrap();
//! let state = DocumentState::create_with_content(ContentState::from_text("# hello"))
//!     .move_selection_to_end();
//!
//! let text = state.content().first_block().text();
//! let command = classify(&KeyEvent::plain(Key::Char(' ')), text, &rules);
//! let next = handle_key_command(&state, command, &rules).into_state().unwrap();
//!
//! assert_eq!(next.content().first_block().text(), "hello");
//! ```

pub mod classify;
pub mod orchestrate;
pub mod rules;
pub mod transform;

pub use classify::classify;
pub use orchestrate::{HandleOutcome, KeyCommandResult, convert_markup, handle_key_command};
pub use rules::{AsteriskVariant, Command, Conversion, MarkupRule, RuleTable, RuleTableError};
pub use transform::{apply_block_type, apply_inline_style, move_focus_to_end, strip_marker};
