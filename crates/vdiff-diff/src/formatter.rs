//! Text decoration for rendered diffs.

use std::fmt;

use colored::Colorize;

/// What a piece of rendered text represents.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Role {
    /// Lines or labels belonging to `b`.
    Addition,
    /// Lines or labels belonging to `a`.
    Removal,
    /// Common lines and messages.
    Neutral,
    /// Trailing whitespace on a changed line.
    TrailingWhitespace,
    /// Changed characters inside a changed line.
    Change,
    /// Hunk headers (`@@ -1,2 +1,2 @@`).
    Patch,
}

/// Decorates text according to its [`Role`].
pub trait Formatter: fmt::Debug + Send + Sync {
    fn decorate(&self, text: &str, role: Role) -> String;
}

/// Returns text unchanged.
#[derive(Clone, Copy, Debug, Default)]
pub struct PlainFormatter;

impl Formatter for PlainFormatter {
    fn decorate(&self, text: &str, _role: Role) -> String {
        text.to_string()
    }
}

/// ANSI colours via the `colored` crate.
///
/// Removals are red, additions green, common lines dimmed. The expected
/// side is always a removal and the received side an addition, so the
/// header labels and the type names in a type-mismatch message take the
/// same colours as their lines.
///
/// Whether escape codes are actually emitted follows `colored`'s global
/// override and the `NO_COLOR`/`CLICOLOR` environment.
#[derive(Clone, Copy, Debug, Default)]
pub struct ColoredFormatter;

impl Formatter for ColoredFormatter {
    fn decorate(&self, text: &str, role: Role) -> String {
        if text.is_empty() {
            return String::new();
        }
        let styled = match role {
            Role::Addition => text.green(),
            Role::Removal => text.red(),
            Role::Neutral => text.dimmed(),
            Role::TrailingWhitespace => text.on_yellow(),
            Role::Change => text.reversed(),
            Role::Patch => text.yellow(),
        };
        styled.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_is_identity() {
        assert_eq!(PlainFormatter.decorate("- a", Role::Removal), "- a");
        assert_eq!(PlainFormatter.decorate("", Role::Patch), "");
    }

    #[test]
    fn colored_wraps_text_when_forced() {
        colored::control::set_override(true);
        let removed = ColoredFormatter.decorate("- a", Role::Removal);
        let added = ColoredFormatter.decorate("+ a", Role::Addition);
        colored::control::unset_override();

        assert!(removed.contains("- a"));
        assert!(removed.starts_with("\u{1b}["));
        assert_ne!(removed, added);
    }

    #[test]
    fn colored_leaves_empty_text_alone() {
        assert_eq!(ColoredFormatter.decorate("", Role::Addition), "");
    }
}
