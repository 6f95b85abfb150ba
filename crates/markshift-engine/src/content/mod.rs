//! Rich-text content model: blocks, inline styles, and selections.
//!
//! These are the primitives the markup engine rewrites. Everything here is
//! immutable; edits go through [`modifier`] and produce new values.

pub mod block;
pub mod modifier;
pub mod selection;
pub mod state;
pub mod style;

pub use block::{BlockKey, BlockType, ContentBlock};
pub use selection::SelectionState;
pub use state::ContentState;
pub use style::{InlineStyle, StyleSet};
