use crate::content::BlockKey;

/// Anchor/focus pair describing a cursor or a span.
///
/// Offsets are character offsets within the named blocks. `is_backward` is set
/// when the focus comes before the anchor in document order, which decides
/// which end is the start.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionState {
    anchor_key: BlockKey,
    anchor_offset: usize,
    focus_key: BlockKey,
    focus_offset: usize,
    is_backward: bool,
    has_focus: bool,
}

impl SelectionState {
    /// Collapsed cursor inside a block
    pub fn collapsed(key: BlockKey, offset: usize) -> Self {
        Self {
            anchor_key: key.clone(),
            anchor_offset: offset,
            focus_key: key,
            focus_offset: offset,
            is_backward: false,
            has_focus: false,
        }
    }

    /// Forward span from anchor to focus
    pub fn span(
        anchor_key: BlockKey,
        anchor_offset: usize,
        focus_key: BlockKey,
        focus_offset: usize,
    ) -> Self {
        Self {
            anchor_key,
            anchor_offset,
            focus_key,
            focus_offset,
            is_backward: false,
            has_focus: false,
        }
    }

    /// Character range `[start, end)` within a single block
    pub fn within_block(key: BlockKey, start: usize, end: usize) -> Self {
        Self::span(key.clone(), start, key, end)
    }

    pub fn with_backward(self, is_backward: bool) -> Self {
        Self {
            is_backward,
            ..self
        }
    }

    pub fn with_focus(self, has_focus: bool) -> Self {
        Self { has_focus, ..self }
    }

    pub fn anchor_key(&self) -> &BlockKey {
        &self.anchor_key
    }

    pub fn anchor_offset(&self) -> usize {
        self.anchor_offset
    }

    pub fn focus_key(&self) -> &BlockKey {
        &self.focus_key
    }

    pub fn focus_offset(&self) -> usize {
        self.focus_offset
    }

    pub fn is_backward(&self) -> bool {
        self.is_backward
    }

    pub fn has_focus(&self) -> bool {
        self.has_focus
    }

    pub fn is_collapsed(&self) -> bool {
        self.anchor_key == self.focus_key && self.anchor_offset == self.focus_offset
    }

    pub fn start_key(&self) -> &BlockKey {
        if self.is_backward {
            &self.focus_key
        } else {
            &self.anchor_key
        }
    }

    pub fn start_offset(&self) -> usize {
        if self.is_backward {
            self.focus_offset
        } else {
            self.anchor_offset
        }
    }

    pub fn end_key(&self) -> &BlockKey {
        if self.is_backward {
            &self.anchor_key
        } else {
            &self.focus_key
        }
    }

    pub fn end_offset(&self) -> usize {
        if self.is_backward {
            self.anchor_offset
        } else {
            self.focus_offset
        }
    }

    /// Collapse onto the start of the selection
    pub fn collapse_to_start(&self) -> Self {
        Self::collapsed(self.start_key().clone(), self.start_offset()).with_focus(self.has_focus)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collapsed_selection() {
        let sel = SelectionState::collapsed(BlockKey::from("a"), 3);
        assert!(sel.is_collapsed());
        assert_eq!(sel.start_offset(), 3);
        assert_eq!(sel.end_offset(), 3);
        assert!(!sel.has_focus());
    }

    #[test]
    fn test_backward_selection_swaps_start_and_end() {
        let sel = SelectionState::span(BlockKey::from("b"), 2, BlockKey::from("a"), 5)
            .with_backward(true);

        assert!(!sel.is_collapsed());
        assert_eq!(sel.start_key().as_str(), "a");
        assert_eq!(sel.start_offset(), 5);
        assert_eq!(sel.end_key().as_str(), "b");
        assert_eq!(sel.end_offset(), 2);

        let collapsed = sel.collapse_to_start();
        assert_eq!(collapsed, SelectionState::collapsed(BlockKey::from("a"), 5));
    }
}
