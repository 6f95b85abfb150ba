use std::borrow::Cow;

use crate::content::{BlockType, ContentState, InlineStyle, SelectionState, StyleSet, modifier};
use crate::document::DocumentState;

/// Remove `marker` (and the single space after it) from the block at the selection start.
///
/// The whole block text is replaced with the stripped text, which drops any
/// inline styles the line had. Returns the input untouched when the block is
/// missing, empty, or does not start with the marker.
pub fn strip_marker<'a>(
    content: &'a ContentState,
    selection: &SelectionState,
    marker: &str,
) -> Cow<'a, ContentState> {
    let Some(block) = content.block_for_key(selection.start_key()) else {
        return Cow::Borrowed(content);
    };

    let trimmed = block.text().trim_start();
    if marker.is_empty() || block.is_empty() || !trimmed.starts_with(marker) {
        return Cow::Borrowed(content);
    }

    let rest = &trimmed[marker.len()..];
    let rest = rest.strip_prefix(' ').unwrap_or(rest);
    let whole_line = SelectionState::within_block(block.key().clone(), 0, block.len());
    Cow::Owned(modifier::replace_text(
        content,
        &whole_line,
        rest,
        &StyleSet::new(),
    ))
}

/// Set the block type of the block(s) under the selection
pub fn apply_block_type(
    content: &ContentState,
    selection: &SelectionState,
    block_type: BlockType,
) -> ContentState {
    modifier::set_block_type(content, selection, block_type)
}

/// Add an inline style to the selected range
pub fn apply_inline_style(
    content: &ContentState,
    selection: &SelectionState,
    style: InlineStyle,
) -> ContentState {
    modifier::apply_inline_style(content, selection, style)
}

/// Collapse the caret onto the end of the block at the selection start and force it.
///
/// Needed after every transform: the pre-edit offsets point past the end of
/// the now shorter text.
pub fn move_focus_to_end(state: &DocumentState) -> DocumentState {
    let key = state.selection().start_key();
    match state.content().block_for_key(key) {
        Some(block) => {
            state.force_selection(SelectionState::collapsed(block.key().clone(), block.len()))
        }
        None => {
            let at_end = state.move_selection_to_end();
            at_end.force_selection(at_end.selection().clone())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::{ContentBlock, modifier::apply_inline_style as style_range};
    use crate::tests::single_block_state;
    use pretty_assertions::assert_eq;

    fn cursor() -> SelectionState {
        SelectionState::collapsed("a".into(), 0)
    }

    fn content(text: &str) -> ContentState {
        ContentState::from_blocks(vec![ContentBlock::new(
            "a".into(),
            BlockType::Unstyled,
            text,
        )])
    }

    #[test]
    fn test_strip_removes_marker_and_one_space() {
        for (text, marker, expected) in [
            ("# hello", "#", "hello"),
            ("#", "#", ""),
            ("*** warn", "***", "warn"),
            ("**  two spaces", "**", " two spaces"),
            ("*tight", "*", "tight"),
            ("  # indented", "#", "indented"),
        ] {
            let input = content(text);
            let stripped = strip_marker(&input, &cursor(), marker);
            assert!(matches!(stripped, Cow::Owned(_)), "{text:?} should match");
            assert_eq!(stripped.first_block().text(), expected, "stripping {text:?}");
        }
    }

    #[test]
    fn test_strip_miss_returns_input_unchanged() {
        for (text, marker) in [("hello", "#"), ("", "#"), ("x # y", "#"), ("*", "**")] {
            let input = content(text);
            let stripped = strip_marker(&input, &cursor(), marker);
            assert!(matches!(stripped, Cow::Borrowed(_)));
            assert_eq!(*stripped, input);
        }
    }

    #[test]
    fn test_strip_with_unknown_block_is_a_no_op() {
        let input = content("# hello");
        let elsewhere = SelectionState::collapsed("zzz".into(), 0);
        assert!(matches!(strip_marker(&input, &elsewhere, "#"), Cow::Borrowed(_)));
    }

    #[test]
    fn test_strip_discards_existing_inline_styles() {
        let input = style_range(
            &content("** keep me"),
            &SelectionState::within_block("a".into(), 3, 10),
            InlineStyle::Italic,
        );

        let stripped = strip_marker(&input, &cursor(), "**");

        let block = stripped.first_block();
        assert_eq!(block.text(), "keep me");
        assert!(block.styles().iter().all(StyleSet::is_empty));
    }

    #[test]
    fn test_strip_keeps_block_count() {
        let input = ContentState::from_blocks(vec![
            ContentBlock::new("a".into(), BlockType::Unstyled, "# title"),
            ContentBlock::new("b".into(), BlockType::Unstyled, "body"),
        ]);
        let stripped = strip_marker(&input, &cursor(), "#");
        assert_eq!(stripped.block_count(), 2);
        assert_eq!(stripped.blocks()[1].text(), "body");
    }

    #[test]
    fn test_apply_block_type_and_inline_style() {
        let input = content("hello");
        let heading = apply_block_type(&input, &cursor(), BlockType::HeaderOne);
        assert_eq!(heading.first_block().block_type(), BlockType::HeaderOne);

        let whole = SelectionState::within_block("a".into(), 0, 5);
        let red = apply_inline_style(&input, &whole, InlineStyle::Red);
        assert!(red.first_block().has_style_throughout(0..5, InlineStyle::Red));
    }

    #[test]
    fn test_move_focus_to_end_collapses_and_forces() {
        let state = single_block_state("hello", 0)
            .with_selection(SelectionState::within_block("a".into(), 1, 9));

        let focused = move_focus_to_end(&state);

        assert!(focused.selection().is_collapsed());
        assert_eq!(focused.selection().focus_offset(), 5);
        assert!(focused.selection().has_focus());
        assert!(focused.is_selection_forced());
    }
}
