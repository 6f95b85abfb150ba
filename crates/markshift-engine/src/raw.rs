//! Raw interchange format: the JSON form used to persist a [`ContentState`].
//!
//! ```json
//! {"blocks":[{"key":"a1","text":"hello","type":"header-one","depth":0,
//!   "inlineStyleRanges":[{"offset":0,"length":5,"style":"BOLD"}],
//!   "entityRanges":[],"data":{}}],"entityMap":{}}
//! ```
//!
//! Offsets and lengths count characters. Entities are not supported; they are
//! written empty and ignored on load. Loading is lenient about anything that
//! can be repaired: style ranges are clipped to their block and `depth` is
//! capped at 255.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::content::{BlockKey, BlockType, ContentBlock, ContentState, InlineStyle, StyleSet};

#[derive(Debug, thiserror::Error)]
pub enum RawError {
    #[error("Invalid raw content: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawContent {
    pub blocks: Vec<RawBlock>,
    #[serde(default)]
    pub entity_map: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawBlock {
    pub key: String,
    pub text: String,
    #[serde(rename = "type")]
    pub block_type: String,
    #[serde(default)]
    pub depth: usize,
    #[serde(default)]
    pub inline_style_ranges: Vec<RawStyleRange>,
    #[serde(default)]
    pub entity_ranges: Vec<Value>,
    #[serde(default)]
    pub data: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawStyleRange {
    pub offset: usize,
    pub length: usize,
    /// Kept as a string so unknown styles from other writers don't fail the load
    pub style: String,
}

/// Convert content to its raw form
pub fn convert_to_raw(content: &ContentState) -> RawContent {
    RawContent {
        blocks: content.blocks().iter().map(raw_block).collect(),
        entity_map: Map::new(),
    }
}

/// Rebuild content from its raw form
pub fn convert_from_raw(raw: &RawContent) -> ContentState {
    ContentState::from_blocks(raw.blocks.iter().map(content_block).collect())
}

pub fn to_json(content: &ContentState) -> Result<String, RawError> {
    Ok(serde_json::to_string(&convert_to_raw(content))?)
}

pub fn from_json(json: &str) -> Result<ContentState, RawError> {
    let raw: RawContent = serde_json::from_str(json)?;
    Ok(convert_from_raw(&raw))
}

fn raw_block(block: &ContentBlock) -> RawBlock {
    let mut inline_style_ranges = Vec::new();
    for style in InlineStyle::ALL {
        let mut run_start = None;
        for (offset, styles) in block.styles().iter().enumerate() {
            match (styles.contains(&style), run_start) {
                (true, None) => run_start = Some(offset),
                (false, Some(start)) => {
                    inline_style_ranges.push(style_range(start, offset, style));
                    run_start = None;
                }
                _ => {}
            }
        }
        if let Some(start) = run_start {
            inline_style_ranges.push(style_range(start, block.len(), style));
        }
    }

    RawBlock {
        key: block.key().to_string(),
        text: block.text().to_string(),
        block_type: block.block_type().as_str().to_string(),
        depth: block.depth().into(),
        inline_style_ranges,
        entity_ranges: Vec::new(),
        data: Map::new(),
    }
}

fn style_range(start: usize, end: usize, style: InlineStyle) -> RawStyleRange {
    RawStyleRange {
        offset: start,
        length: end - start,
        style: style.as_str().to_string(),
    }
}

fn content_block(raw: &RawBlock) -> ContentBlock {
    let block_len = raw.text.chars().count();
    let mut styles = vec![StyleSet::new(); block_len];

    for range in &raw.inline_style_ranges {
        let Some(style) = InlineStyle::from_name(&range.style) else {
            log::debug!("Ignoring unknown inline style {:?} in block {}", range.style, raw.key);
            continue;
        };
        let end = range.offset.saturating_add(range.length);
        if end > block_len {
            log::warn!(
                "Clipping {} range {}+{} to block {} of length {block_len}",
                range.style,
                range.offset,
                range.length,
                raw.key
            );
        }
        let start = range.offset.min(block_len);
        for set in &mut styles[start..end.min(block_len)] {
            set.insert(style);
        }
    }

    let depth = u8::try_from(raw.depth).unwrap_or_else(|_| {
        log::warn!("Capping depth {} of block {} at {}", raw.depth, raw.key, u8::MAX);
        u8::MAX
    });

    let key = if raw.key.is_empty() {
        BlockKey::generate()
    } else {
        BlockKey::new(raw.key.clone())
    };

    ContentBlock::from_parts(
        key,
        BlockType::from_tag(&raw.block_type),
        raw.text.clone(),
        styles,
        depth,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn styled_block() -> ContentBlock {
        ContentBlock::new("a".into(), BlockType::HeaderOne, "hello world")
            .add_style(0..5, InlineStyle::Bold)
            .add_style(3..11, InlineStyle::Red)
    }

    #[test]
    fn test_style_runs_become_ranges() {
        let raw = convert_to_raw(&ContentState::from_blocks(vec![styled_block()]));

        let block = &raw.blocks[0];
        assert_eq!(block.block_type, "header-one");
        assert_eq!(
            block.inline_style_ranges,
            vec![
                RawStyleRange {
                    offset: 0,
                    length: 5,
                    style: "BOLD".into()
                },
                RawStyleRange {
                    offset: 3,
                    length: 8,
                    style: "RED".into()
                },
            ]
        );
    }

    #[test]
    fn test_split_runs_produce_separate_ranges() {
        let block = ContentBlock::new("a".into(), BlockType::Unstyled, "abcde")
            .add_style(0..1, InlineStyle::Italic)
            .add_style(3..5, InlineStyle::Italic);

        let raw = raw_block(&block);

        let spans: Vec<_> = raw
            .inline_style_ranges
            .iter()
            .map(|r| (r.offset, r.length))
            .collect();
        assert_eq!(spans, vec![(0, 1), (3, 2)]);
    }

    #[test]
    fn test_json_round_trip_preserves_content() {
        let content = ContentState::from_blocks(vec![
            styled_block(),
            ContentBlock::new("b".into(), BlockType::Unstyled, "naïve 日本"),
        ]);

        let json = to_json(&content).unwrap();
        let restored = from_json(&json).unwrap();

        assert_eq!(restored, content);
    }

    #[test]
    fn test_missing_optional_fields_default() {
        let json = r#"{"blocks":[{"key":"k","text":"hi","type":"mystery"}]}"#;

        let content = from_json(json).unwrap();

        let block = content.first_block();
        assert_eq!(block.key().as_str(), "k");
        assert_eq!(block.block_type(), BlockType::Unstyled);
        assert_eq!(block.text(), "hi");
    }

    #[test]
    fn test_unknown_styles_are_skipped() {
        let json = r#"{"blocks":[{"key":"k","text":"hi","type":"unstyled",
            "inlineStyleRanges":[{"offset":0,"length":2,"style":"SPARKLE"},
                                 {"offset":0,"length":1,"style":"BOLD"}]}]}"#;

        let content = from_json(json).unwrap();

        let block = content.first_block();
        assert!(block.has_style_throughout(0..1, InlineStyle::Bold));
        assert_eq!(block.style_at(1), Some(&StyleSet::new()));
    }

    #[test]
    fn test_overlong_range_is_clipped_to_block() {
        let json = r#"{"blocks":[{"key":"k","text":"hi","type":"unstyled",
            "inlineStyleRanges":[{"offset":1,"length":5,"style":"BOLD"},
                                 {"offset":7,"length":2,"style":"RED"}]}]}"#;

        let content = from_json(json).unwrap();

        let block = content.first_block();
        assert_eq!(block.text(), "hi");
        assert_eq!(block.style_at(0), Some(&StyleSet::new()));
        assert_eq!(block.style_at(1), Some(&StyleSet::from([InlineStyle::Bold])));
    }

    #[test]
    fn test_large_depth_is_capped() {
        let json = r#"{"blocks":[{"key":"k","text":"deep","type":"unstyled","depth":300}]}"#;

        let content = from_json(json).unwrap();

        let block = content.first_block();
        assert_eq!(block.text(), "deep");
        assert_eq!(block.depth(), u8::MAX);
    }

    #[test]
    fn test_malformed_json_is_an_error() {
        assert!(matches!(from_json("not json"), Err(RawError::Json(_))));
    }

    #[test]
    fn test_empty_block_list_loads_as_empty_document() {
        let content = from_json(r#"{"blocks":[],"entityMap":{}}"#).unwrap();
        assert!(content.is_blank());
    }
}
