//! Presentation of engine content as ratatui lines.

use markshift_engine::{
    BlockType, ContentBlock, ContentState, DocumentState, InlineStyle, StyleSet,
};
use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
};

pub const PLACEHOLDER: &str = "Write here...";

/// Visual treatment of an inline style set
pub fn inline_style(styles: &StyleSet) -> Style {
    styles.iter().fold(Style::default(), |style, inline| match inline {
        InlineStyle::Bold => style.add_modifier(Modifier::BOLD),
        InlineStyle::Italic => style.add_modifier(Modifier::ITALIC),
        InlineStyle::Underline => style.add_modifier(Modifier::UNDERLINED),
        InlineStyle::Code => style.fg(Color::Cyan).bg(Color::DarkGray),
        InlineStyle::Red => style.fg(Color::Red),
    })
}

fn block_style(block_type: BlockType) -> Style {
    match block_type {
        BlockType::HeaderOne => Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
        BlockType::HeaderTwo | BlockType::HeaderThree => {
            Style::default().add_modifier(Modifier::BOLD)
        }
        BlockType::Blockquote => Style::default().add_modifier(Modifier::ITALIC),
        BlockType::CodeBlock => Style::default().fg(Color::Cyan),
        _ => Style::default(),
    }
}

/// Text drawn before the block's own text
fn block_prefix(block_type: BlockType) -> &'static str {
    match block_type {
        BlockType::Blockquote => "│ ",
        BlockType::UnorderedListItem => "• ",
        BlockType::OrderedListItem => "1. ",
        _ => "",
    }
}

/// Screen lines for one block; soft newlines start a new line
pub fn block_lines(block: &ContentBlock) -> Vec<Line<'static>> {
    let base = block_style(block.block_type());
    let prefix = block_prefix(block.block_type());

    let mut lines = Vec::new();
    let mut spans = vec![Span::styled(prefix.to_string(), base)];
    let mut run = String::new();
    let mut run_styles: Option<&StyleSet> = None;

    for (c, styles) in block.text().chars().zip(block.styles()) {
        if (c == '\n' || run_styles.is_some_and(|current| current != styles))
            && let Some(current) = run_styles.take()
        {
            spans.push(Span::styled(
                std::mem::take(&mut run),
                base.patch(inline_style(current)),
            ));
        }
        if c == '\n' {
            lines.push(Line::from(std::mem::take(&mut spans)));
            spans.push(Span::styled(" ".repeat(prefix.chars().count()), base));
            continue;
        }
        run.push(c);
        run_styles = Some(styles);
    }

    if let Some(current) = run_styles {
        spans.push(Span::styled(run, base.patch(inline_style(current))));
    }
    lines.push(Line::from(spans));
    lines
}

pub fn document_lines(content: &ContentState) -> Vec<Line<'static>> {
    if content.is_blank() {
        return vec![Line::from(Span::styled(
            PLACEHOLDER,
            Style::default().fg(Color::DarkGray),
        ))];
    }
    content.blocks().iter().flat_map(block_lines).collect()
}

/// Column and row of the caret relative to the top-left of the document
pub fn caret_position(state: &DocumentState) -> (u16, u16) {
    let selection = state.selection();
    let content = state.content();
    let mut row = 0usize;

    for block in content.blocks() {
        if block.key() != selection.focus_key() {
            row += block.text().split('\n').count();
            continue;
        }

        let offset = selection.focus_offset().min(block.len());
        let before: String = block.text().chars().take(offset).collect();
        let line_in_block = before.matches('\n').count();
        let column = before.rsplit('\n').next().map_or(0, |s| s.chars().count())
            + block_prefix(block.block_type()).chars().count();
        row += line_in_block;
        return (to_u16(column), to_u16(row));
    }

    (0, to_u16(row))
}

fn to_u16(value: usize) -> u16 {
    u16::try_from(value).unwrap_or(u16::MAX)
}
