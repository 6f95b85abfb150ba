// Benchmark helper functions - Rust's dead code analysis doesn't understand
// that these are used by benchmark files in the same directory
// See: https://users.rust-lang.org/t/cargo-rustc-benches-awarnings/110111/2
use markshift_engine::{ChangeType, ContentState, DocumentState, SelectionState, UNDO_LIMIT};

/// Document of `lines` plain paragraphs with one marker line in the middle
#[allow(dead_code)]
pub fn document_with_marker(lines: usize, marker: &str) -> DocumentState {
    let mut text = String::new();
    for i in 0..lines {
        if i == lines / 2 {
            text.push_str(&format!("{marker} heading {i}\n"));
        } else {
            text.push_str(&format!("Paragraph {i} with some ordinary text in it.\n"));
        }
    }

    let content = ContentState::from_text(text.trim_end());
    let target = content.blocks()[lines / 2].clone();
    DocumentState::create_with_content(content)
        .with_selection(SelectionState::collapsed(target.key().clone(), target.len()))
}

#[allow(dead_code)]
pub fn plain_document(lines: usize) -> DocumentState {
    let text = "Paragraph with some ordinary text in it.\n".repeat(lines);
    DocumentState::create_with_content(ContentState::from_text(text.trim_end()))
        .move_selection_to_end()
}

/// `plain_document` with a full undo history behind it
#[allow(dead_code)]
pub fn document_with_full_history(lines: usize) -> DocumentState {
    let mut state = plain_document(lines);
    for _ in 0..UNDO_LIMIT {
        state = state.push(
            state.content().clone(),
            state.selection().clone(),
            ChangeType::ChangeInlineStyle,
        );
    }
    state
}
