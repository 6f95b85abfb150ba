use std::fmt;

use serde::{Deserialize, Serialize};

use crate::content::{BlockType, InlineStyle};
use crate::native::NativeCommand;

/// A classified user intent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    ConvertToHeading,
    ConvertToBold,
    ConvertToUnderline,
    ConvertToRed,
    Native(NativeCommand),
    Unhandled,
}

impl Command {
    /// Commands that rewrite a marker prefix
    pub const MARKUP: [Command; 4] = [
        Command::ConvertToHeading,
        Command::ConvertToBold,
        Command::ConvertToUnderline,
        Command::ConvertToRed,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Command::ConvertToHeading => "convert-to-heading",
            Command::ConvertToBold => "convert-to-bold",
            Command::ConvertToUnderline => "convert-to-underline",
            Command::ConvertToRed => "convert-to-red",
            Command::Native(native) => native.name(),
            Command::Unhandled => "unhandled",
        }
    }

    pub fn is_markup(&self) -> bool {
        Self::MARKUP.contains(self)
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// What a markup command does to the block once its marker is gone
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Conversion {
    Block(BlockType),
    Inline(InlineStyle),
}

/// Which inline style a single `*` produces.
///
/// `Red` maps `*` to RED and `**` to BOLD; `Bold` swaps the two.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AsteriskVariant {
    #[default]
    Red,
    Bold,
}

/// A marker prefix and the command it triggers
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkupRule {
    pub marker: String,
    pub command: Command,
}

impl MarkupRule {
    pub fn new(marker: impl Into<String>, command: Command) -> Self {
        Self {
            marker: marker.into(),
            command,
        }
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum RuleTableError {
    #[error("No marker configured for command {0}")]
    MissingMarker(Command),
    #[error("No conversion configured for command {0}")]
    MissingConversion(Command),
    #[error("Marker {0:?} is used by more than one rule")]
    DuplicateMarker(String),
    #[error("Empty marker for command {0}")]
    EmptyMarker(Command),
    #[error("Command {0} cannot be bound to a marker")]
    NotMarkup(Command),
}

/// Ordered marker rules plus the conversion for each markup command.
///
/// Rules are kept longest marker first so `***` is never shadowed by `**` or `*`.
#[derive(Debug, Clone, PartialEq)]
pub struct RuleTable {
    rules: Vec<MarkupRule>,
    conversions: Vec<(Command, Conversion)>,
}

impl RuleTable {
    /// Build and validate a table; every markup command needs a marker and a conversion
    pub fn new(
        mut rules: Vec<MarkupRule>,
        conversions: Vec<(Command, Conversion)>,
    ) -> Result<Self, RuleTableError> {
        rules.sort_by_key(|rule| std::cmp::Reverse(rule.marker.chars().count()));

        for (index, rule) in rules.iter().enumerate() {
            if !rule.command.is_markup() {
                return Err(RuleTableError::NotMarkup(rule.command));
            }
            if rule.marker.is_empty() {
                return Err(RuleTableError::EmptyMarker(rule.command));
            }
            if rules[..index].iter().any(|other| other.marker == rule.marker) {
                return Err(RuleTableError::DuplicateMarker(rule.marker.clone()));
            }
        }

        for command in Command::MARKUP {
            if !rules.iter().any(|rule| rule.command == command) {
                return Err(RuleTableError::MissingMarker(command));
            }
            if !conversions.iter().any(|(c, _)| *c == command) {
                return Err(RuleTableError::MissingConversion(command));
            }
        }

        Ok(Self { rules, conversions })
    }

    /// The standard `#`, `*`, `**`, `***` rules
    pub fn for_variant(variant: AsteriskVariant) -> Result<Self, RuleTableError> {
        let (single, double) = match variant {
            AsteriskVariant::Red => (InlineStyle::Red, InlineStyle::Bold),
            AsteriskVariant::Bold => (InlineStyle::Bold, InlineStyle::Red),
        };
        let (single_command, double_command) = match variant {
            AsteriskVariant::Red => (Command::ConvertToRed, Command::ConvertToBold),
            AsteriskVariant::Bold => (Command::ConvertToBold, Command::ConvertToRed),
        };

        Self::new(
            vec![
                MarkupRule::new("#", Command::ConvertToHeading),
                MarkupRule::new("***", Command::ConvertToUnderline),
                MarkupRule::new("**", double_command),
                MarkupRule::new("*", single_command),
            ],
            vec![
                (Command::ConvertToHeading, Conversion::Block(BlockType::HeaderOne)),
                (Command::ConvertToUnderline, Conversion::Inline(InlineStyle::Underline)),
                (double_command, Conversion::Inline(double)),
                (single_command, Conversion::Inline(single)),
            ],
        )
    }

    /// Rules in evaluation order
    pub fn rules(&self) -> &[MarkupRule] {
        &self.rules
    }

    /// First (longest) rule whose marker starts `text`
    pub fn match_prefix(&self, text: &str) -> Option<&MarkupRule> {
        self.rules.iter().find(|rule| text.starts_with(&rule.marker))
    }

    pub fn marker_for(&self, command: Command) -> Option<&str> {
        self.rules
            .iter()
            .find(|rule| rule.command == command)
            .map(|rule| rule.marker.as_str())
    }

    pub fn conversion_for(&self, command: Command) -> Option<Conversion> {
        self.conversions
            .iter()
            .find(|(c, _)| *c == command)
            .map(|(_, conversion)| *conversion)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_standard_table_is_longest_first() {
        let table = RuleTable::for_variant(AsteriskVariant::Red).unwrap();
        let markers: Vec<_> = table.rules().iter().map(|r| r.marker.as_str()).collect();
        assert_eq!(markers, vec!["***", "**", "#", "*"]);
    }

    #[test]
    fn test_red_variant_mapping() {
        let table = RuleTable::for_variant(AsteriskVariant::Red).unwrap();
        assert_eq!(table.marker_for(Command::ConvertToRed), Some("*"));
        assert_eq!(table.marker_for(Command::ConvertToBold), Some("**"));
        assert_eq!(
            table.conversion_for(Command::ConvertToRed),
            Some(Conversion::Inline(InlineStyle::Red))
        );
        assert_eq!(
            table.conversion_for(Command::ConvertToHeading),
            Some(Conversion::Block(BlockType::HeaderOne))
        );
    }

    #[test]
    fn test_bold_variant_swaps_single_and_double() {
        let table = RuleTable::for_variant(AsteriskVariant::Bold).unwrap();
        assert_eq!(table.match_prefix("*x").unwrap().command, Command::ConvertToBold);
        assert_eq!(table.match_prefix("**x").unwrap().command, Command::ConvertToRed);
        assert_eq!(
            table.conversion_for(Command::ConvertToBold),
            Some(Conversion::Inline(InlineStyle::Bold))
        );
    }

    #[test]
    fn test_match_prefix_prefers_longest_marker() {
        let table = RuleTable::for_variant(AsteriskVariant::Red).unwrap();
        assert_eq!(table.match_prefix("*** x").unwrap().command, Command::ConvertToUnderline);
        assert_eq!(table.match_prefix("****").unwrap().command, Command::ConvertToUnderline);
        assert_eq!(table.match_prefix("** x").unwrap().command, Command::ConvertToBold);
        assert_eq!(table.match_prefix("* x").unwrap().command, Command::ConvertToRed);
        assert!(table.match_prefix("x *").is_none());
    }

    #[test]
    fn test_missing_marker_fails_fast() {
        let result = RuleTable::new(
            vec![MarkupRule::new("#", Command::ConvertToHeading)],
            vec![(Command::ConvertToHeading, Conversion::Block(BlockType::HeaderOne))],
        );
        assert_eq!(result, Err(RuleTableError::MissingMarker(Command::ConvertToBold)));
    }

    #[test]
    fn test_missing_conversion_fails_fast() {
        let result = RuleTable::new(
            vec![
                MarkupRule::new("#", Command::ConvertToHeading),
                MarkupRule::new("**", Command::ConvertToBold),
                MarkupRule::new("***", Command::ConvertToUnderline),
                MarkupRule::new("*", Command::ConvertToRed),
            ],
            vec![(Command::ConvertToHeading, Conversion::Block(BlockType::HeaderOne))],
        );
        assert_eq!(result, Err(RuleTableError::MissingConversion(Command::ConvertToBold)));
    }

    #[test]
    fn test_duplicate_and_invalid_rules_rejected() {
        let duplicate = RuleTable::new(
            vec![
                MarkupRule::new("*", Command::ConvertToBold),
                MarkupRule::new("*", Command::ConvertToRed),
            ],
            Vec::new(),
        );
        assert_eq!(duplicate, Err(RuleTableError::DuplicateMarker("*".to_string())));

        let empty = RuleTable::new(vec![MarkupRule::new("", Command::ConvertToRed)], Vec::new());
        assert_eq!(empty, Err(RuleTableError::EmptyMarker(Command::ConvertToRed)));

        let native = RuleTable::new(
            vec![MarkupRule::new("!", Command::Native(NativeCommand::Bold))],
            Vec::new(),
        );
        assert_eq!(
            native,
            Err(RuleTableError::NotMarkup(Command::Native(NativeCommand::Bold)))
        );
    }
}
