use crate::keys::{KeyEvent, default_key_binding};
use crate::markup::{Command, RuleTable};

/// Classify a keystroke against the text of the block under the cursor.
///
/// Only a space can trigger a markup conversion, and only when the block text
/// (as it was before the keystroke) starts with a marker. Anything else falls
/// through to the default key bindings.
pub fn classify(event: &KeyEvent, block_text: &str, rules: &RuleTable) -> Command {
    if event.is_space()
        && let Some(rule) = rules.match_prefix(block_text)
    {
        return rule.command;
    }

    default_key_binding(event)
        .map(Command::Native)
        .unwrap_or(Command::Unhandled)
}
