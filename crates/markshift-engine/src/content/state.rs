use crate::content::{BlockKey, BlockType, ContentBlock};

/// Immutable ordered sequence of blocks.
///
/// A content state always holds at least one block. Edits never mutate a
/// `ContentState` in place; the modifier functions return a new one.
#[derive(Debug, Clone, PartialEq)]
pub struct ContentState {
    blocks: Vec<ContentBlock>,
}

impl ContentState {
    /// A document with a single empty unstyled block
    pub fn create_empty() -> Self {
        Self {
            blocks: vec![ContentBlock::empty()],
        }
    }

    /// Build from blocks; an empty list yields the empty document
    pub fn from_blocks(blocks: Vec<ContentBlock>) -> Self {
        if blocks.is_empty() {
            return Self::create_empty();
        }
        Self { blocks }
    }

    /// One unstyled block per line of `text`
    pub fn from_text(text: &str) -> Self {
        let blocks = text
            .split('\n')
            .map(|line| {
                let line = line.strip_suffix('\r').unwrap_or(line);
                ContentBlock::new(BlockKey::generate(), BlockType::Unstyled, line)
            })
            .collect();
        Self::from_blocks(blocks)
    }

    pub fn blocks(&self) -> &[ContentBlock] {
        &self.blocks
    }

    pub fn block_count(&self) -> usize {
        self.blocks.len()
    }

    pub fn block_for_key(&self, key: &BlockKey) -> Option<&ContentBlock> {
        self.blocks.iter().find(|block| block.key() == key)
    }

    pub fn block_index(&self, key: &BlockKey) -> Option<usize> {
        self.blocks.iter().position(|block| block.key() == key)
    }

    pub fn block_before(&self, key: &BlockKey) -> Option<&ContentBlock> {
        let index = self.block_index(key)?;
        index.checked_sub(1).and_then(|i| self.blocks.get(i))
    }

    pub fn block_after(&self, key: &BlockKey) -> Option<&ContentBlock> {
        let index = self.block_index(key)?;
        self.blocks.get(index + 1)
    }

    pub fn first_block(&self) -> &ContentBlock {
        &self.blocks[0]
    }

    pub fn last_block(&self) -> &ContentBlock {
        &self.blocks[self.blocks.len() - 1]
    }

    /// All block text joined with newlines
    pub fn plain_text(&self) -> String {
        self.blocks
            .iter()
            .map(ContentBlock::text)
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// True when the document is a single block with no text
    pub fn is_blank(&self) -> bool {
        self.blocks.len() == 1 && self.blocks[0].is_empty()
    }

    /// Replace the block with the same key; unknown keys leave the content unchanged
    pub(crate) fn with_block(&self, block: ContentBlock) -> Self {
        let mut blocks = self.blocks.clone();
        if let Some(slot) = blocks.iter_mut().find(|b| b.key() == block.key()) {
            *slot = block;
        }
        Self { blocks }
    }

    /// Replace blocks `range` with `replacement`
    pub(crate) fn splice(
        &self,
        range: std::ops::RangeInclusive<usize>,
        replacement: Vec<ContentBlock>,
    ) -> Self {
        let mut blocks = self.blocks.clone();
        blocks.splice(range, replacement);
        Self::from_blocks(blocks)
    }
}

impl Default for ContentState {
    fn default() -> Self {
        Self::create_empty()
    }
}
