use std::fmt;
use std::ops::Range;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::content::{InlineStyle, StyleSet};

/// Stable identifier for a block that survives edits to its text and type
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BlockKey(String);

impl BlockKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// Fresh random key for a newly created block
    pub fn generate() -> Self {
        Self(Uuid::new_v4().simple().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BlockKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for BlockKey {
    fn from(key: &str) -> Self {
        Self::new(key)
    }
}

/// Paragraph-level type tag of a block
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub enum BlockType {
    #[default]
    Unstyled,
    HeaderOne,
    HeaderTwo,
    HeaderThree,
    Blockquote,
    UnorderedListItem,
    OrderedListItem,
    CodeBlock,
}

impl BlockType {
    /// Interchange tag, e.g. `"header-one"`
    pub fn as_str(&self) -> &'static str {
        match self {
            BlockType::Unstyled => "unstyled",
            BlockType::HeaderOne => "header-one",
            BlockType::HeaderTwo => "header-two",
            BlockType::HeaderThree => "header-three",
            BlockType::Blockquote => "blockquote",
            BlockType::UnorderedListItem => "unordered-list-item",
            BlockType::OrderedListItem => "ordered-list-item",
            BlockType::CodeBlock => "code-block",
        }
    }

    /// Parse an interchange tag; anything unknown is treated as plain text
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "header-one" => BlockType::HeaderOne,
            "header-two" => BlockType::HeaderTwo,
            "header-three" => BlockType::HeaderThree,
            "blockquote" => BlockType::Blockquote,
            "unordered-list-item" => BlockType::UnorderedListItem,
            "ordered-list-item" => BlockType::OrderedListItem,
            "code-block" => BlockType::CodeBlock,
            _ => BlockType::Unstyled,
        }
    }

    pub fn is_heading(&self) -> bool {
        matches!(
            self,
            BlockType::HeaderOne | BlockType::HeaderTwo | BlockType::HeaderThree
        )
    }
}

impl fmt::Display for BlockType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One paragraph of editable text.
///
/// Offsets into a block are counted in `char`s, and every character carries
/// its own [`StyleSet`] so `styles.len()` always equals the character count.
#[derive(Debug, Clone, PartialEq)]
pub struct ContentBlock {
    key: BlockKey,
    block_type: BlockType,
    text: String,
    styles: Vec<StyleSet>,
    depth: u8,
}

impl ContentBlock {
    /// Create a block whose characters carry no styles
    pub fn new(key: BlockKey, block_type: BlockType, text: impl Into<String>) -> Self {
        let text = text.into();
        let styles = vec![StyleSet::new(); text.chars().count()];
        Self {
            key,
            block_type,
            text,
            styles,
            depth: 0,
        }
    }

    /// Empty unstyled block with a fresh key
    pub fn empty() -> Self {
        Self::new(BlockKey::generate(), BlockType::Unstyled, String::new())
    }

    pub fn key(&self) -> &BlockKey {
        &self.key
    }

    pub fn block_type(&self) -> BlockType {
        self.block_type
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn depth(&self) -> u8 {
        self.depth
    }

    /// Length in characters
    pub fn len(&self) -> usize {
        self.styles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.styles.is_empty()
    }

    /// Per-character styles, parallel to `text().chars()`
    pub fn styles(&self) -> &[StyleSet] {
        &self.styles
    }

    pub fn style_at(&self, offset: usize) -> Option<&StyleSet> {
        self.styles.get(offset)
    }

    /// Text between two character offsets
    pub fn slice(&self, range: Range<usize>) -> &str {
        let range = self.clamp(range);
        &self.text[self.byte_offset(range.start)..self.byte_offset(range.end)]
    }

    pub fn with_type(&self, block_type: BlockType) -> Self {
        Self {
            block_type,
            ..self.clone()
        }
    }

    pub fn with_depth(&self, depth: u8) -> Self {
        Self {
            depth,
            ..self.clone()
        }
    }

    pub fn with_key(&self, key: BlockKey) -> Self {
        Self {
            key,
            ..self.clone()
        }
    }

    /// Replace a character range with `text`, giving every inserted character `style`
    pub fn replace_range(&self, range: Range<usize>, text: &str, style: &StyleSet) -> Self {
        let range = self.clamp(range);
        let start_byte = self.byte_offset(range.start);
        let end_byte = self.byte_offset(range.end);

        let mut new_text = String::with_capacity(self.text.len() + text.len());
        new_text.push_str(&self.text[..start_byte]);
        new_text.push_str(text);
        new_text.push_str(&self.text[end_byte..]);

        let mut styles = Vec::with_capacity(self.styles.len() + text.len());
        styles.extend_from_slice(&self.styles[..range.start]);
        styles.extend(std::iter::repeat_n(style.clone(), text.chars().count()));
        styles.extend_from_slice(&self.styles[range.end..]);

        Self {
            text: new_text,
            styles,
            ..self.clone()
        }
    }

    pub fn add_style(&self, range: Range<usize>, style: InlineStyle) -> Self {
        self.map_styles(range, |set| {
            set.insert(style);
        })
    }

    pub fn remove_style(&self, range: Range<usize>, style: InlineStyle) -> Self {
        self.map_styles(range, |set| {
            set.remove(&style);
        })
    }

    /// Whether every character in a non-empty range carries `style`
    pub fn has_style_throughout(&self, range: Range<usize>, style: InlineStyle) -> bool {
        let range = self.clamp(range);
        !range.is_empty() && self.styles[range].iter().all(|set| set.contains(&style))
    }

    /// Split at a character offset; the tail becomes a new block keyed `tail_key`
    pub fn split_at(&self, offset: usize, tail_key: BlockKey) -> (Self, Self) {
        let offset = offset.min(self.len());
        let byte = self.byte_offset(offset);

        let head = Self {
            text: self.text[..byte].to_string(),
            styles: self.styles[..offset].to_vec(),
            ..self.clone()
        };
        let tail = Self {
            key: tail_key,
            text: self.text[byte..].to_string(),
            styles: self.styles[offset..].to_vec(),
            ..self.clone()
        };
        (head, tail)
    }

    /// Append another block's text and styles, keeping this block's key and type
    pub fn join(&self, other: &ContentBlock) -> Self {
        let mut text = self.text.clone();
        text.push_str(&other.text);
        let mut styles = self.styles.clone();
        styles.extend_from_slice(&other.styles);
        Self {
            text,
            styles,
            ..self.clone()
        }
    }

    pub(crate) fn from_parts(
        key: BlockKey,
        block_type: BlockType,
        text: String,
        styles: Vec<StyleSet>,
        depth: u8,
    ) -> Self {
        debug_assert_eq!(text.chars().count(), styles.len());
        Self {
            key,
            block_type,
            text,
            styles,
            depth,
        }
    }

    fn map_styles(&self, range: Range<usize>, f: impl Fn(&mut StyleSet)) -> Self {
        let range = self.clamp(range);
        let mut styles = self.styles.clone();
        styles[range].iter_mut().for_each(f);
        Self {
            styles,
            ..self.clone()
        }
    }

    fn clamp(&self, range: Range<usize>) -> Range<usize> {
        let start = range.start.min(self.len());
        let end = range.end.min(self.len()).max(start);
        start..end
    }

    fn byte_offset(&self, char_offset: usize) -> usize {
        self.text
            .char_indices()
            .nth(char_offset)
            .map(|(byte, _)| byte)
            .unwrap_or(self.text.len())
    }
}
