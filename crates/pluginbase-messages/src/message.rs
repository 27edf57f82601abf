//! Messages, their keys, and messages bundled with arguments.

use std::fmt;
use tracing::warn;

use crate::color::translate_shorthand;
use crate::format::{self, Arg};
use crate::theme::{self, ThemeRegistry};
use pluginbase_core::Locale;

/// Placeholder counted by [`count_args`].
const ARG_PLACEHOLDER: &str = "%s";

/// Number of non-overlapping `%s` placeholders in `text`.
pub fn count_args(text: &str) -> usize {
    text.matches(ARG_PLACEHOLDER).count()
}

/// Dotted path of a message inside the language file.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MessageKey(Vec<String>);

impl MessageKey {
    /// Split `key` on `.`, dropping only trailing empty segments.
    ///
    /// `"a..b"` keeps its empty middle segment; `"a.b.."` becomes `a`, `b`.
    pub fn parse(key: &str) -> Self {
        let mut segments: Vec<String> = key.split('.').map(str::to_string).collect();
        while segments.last().is_some_and(|s| s.is_empty()) {
            segments.pop();
        }
        Self(segments)
    }

    pub fn segments(&self) -> &[String] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<String>> for MessageKey {
    fn from(segments: Vec<String>) -> Self {
        Self(segments)
    }
}

impl From<&str> for MessageKey {
    fn from(key: &str) -> Self {
        Self::parse(key)
    }
}

impl fmt::Display for MessageKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.join("."))
    }
}

/// A translatable message template.
///
/// The default text is theme-expanded once, when the message is created.
/// Messages without a key are static: never persisted, formatted inline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    key: Option<MessageKey>,
    default: String,
    arg_count: usize,
}

impl Message {
    /// Keyed message; `extra_lines` are appended to `default` with line breaks.
    pub fn create(key: &str, default: &str, extra_lines: &[&str]) -> Self {
        Self::create_with_theme(&theme::global(), Some(key), default, extra_lines)
    }

    /// Message with no key.
    pub fn create_static(text: &str, extra_lines: &[&str]) -> Self {
        Self::create_with_theme(&theme::global(), None, text, extra_lines)
    }

    /// Like [`Message::create`], expanding tags with a specific theme.
    pub fn create_with_theme(
        theme: &ThemeRegistry,
        key: Option<&str>,
        default: &str,
        extra_lines: &[&str],
    ) -> Self {
        let mut text = default.to_string();
        for line in extra_lines {
            text.push('\n');
            text.push_str(line);
        }
        let default = theme.expand(&text);
        Self {
            key: key.map(MessageKey::parse),
            arg_count: count_args(&default),
            default,
        }
    }

    pub fn key(&self) -> Option<&MessageKey> {
        self.key.as_ref()
    }

    /// Theme-expanded default text.
    pub fn default_text(&self) -> &str {
        &self.default
    }

    /// Number of `%s` placeholders in the default text.
    pub fn arg_count(&self) -> usize {
        self.arg_count
    }

    /// Pair this message with arguments for later rendering.
    pub fn bundle(&self, args: Vec<Arg>) -> BundledMessage {
        if args.len() != self.arg_count {
            warn!(
                "bundling {} with {} argument(s), expected {}",
                self.describe(),
                args.len(),
                self.arg_count
            );
        }
        BundledMessage {
            message: self.clone(),
            args,
        }
    }

    fn describe(&self) -> String {
        match &self.key {
            Some(key) => key.to_string(),
            None => format!("static message '{}'", self.default),
        }
    }
}

/// A message together with the arguments to render it with.
#[derive(Debug, Clone, PartialEq)]
pub struct BundledMessage {
    message: Message,
    args: Vec<Arg>,
}

impl BundledMessage {
    pub fn message(&self) -> &Message {
        &self.message
    }

    pub fn args(&self) -> &[Arg] {
        &self.args
    }

    /// The default text, shorthand-translated and formatted with the default
    /// locale. Falls back to the unformatted text if formatting fails.
    pub fn default_text(&self) -> String {
        let template = translate_shorthand('&', self.message.default_text());
        match format::format(&Locale::default(), &template, &self.args) {
            Ok(text) => text,
            Err(e) => {
                warn!("cannot format {}: {e}", self.message.describe());
                template
            }
        }
    }
}

impl fmt::Display for BundledMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.default_text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::args;
    use crate::color::{ColorCode, MARKER};

    #[test]
    fn test_parse_key_segments() {
        assert_eq!(MessageKey::parse("a.b.c").segments(), ["a", "b", "c"]);
        assert_eq!(MessageKey::parse("single").segments(), ["single"]);
    }

    #[test]
    fn test_parse_key_drops_only_trailing_empty() {
        assert_eq!(MessageKey::parse("a.b..").segments(), ["a", "b"]);
        assert_eq!(MessageKey::parse("a..b").segments(), ["a", "", "b"]);
        assert_eq!(MessageKey::parse(".a").segments(), ["", "a"]);
        assert!(MessageKey::parse("").is_empty());
        assert!(MessageKey::parse("...").is_empty());
    }

    #[test]
    fn test_key_rejoins_to_input() {
        for key in ["generic.success", "a..b", "x", "deep.path.to.message"] {
            assert_eq!(MessageKey::parse(key).to_string(), key);
        }
    }

    #[test]
    fn test_count_args() {
        assert_eq!(count_args(""), 0);
        assert_eq!(count_args("no placeholders"), 0);
        assert_eq!(count_args("%s and %s"), 2);
        assert_eq!(count_args("%%s"), 1);
        assert_eq!(count_args("%d %s"), 1);
    }

    #[test]
    fn test_create_joins_extra_lines() {
        let theme = ThemeRegistry::new();
        let msg = Message::create_with_theme(&theme, Some("a.b"), "first", &["second", "third %s"]);
        assert_eq!(msg.default_text(), "first\nsecond\nthird %s");
        assert_eq!(msg.arg_count(), 1);
        assert_eq!(msg.key().map(ToString::to_string), Some("a.b".to_string()));
    }

    #[test]
    fn test_create_expands_theme_tags() {
        let theme = ThemeRegistry::new();
        let msg = Message::create_with_theme(&theme, Some("x"), "$+Done", &[]);
        assert_eq!(msg.default_text(), format!("{}Done", ColorCode::Green));
    }

    #[test]
    fn test_static_message_has_no_key() {
        let msg = Message::create_static("Value: %s", &[]);
        assert!(msg.key().is_none());
        assert_eq!(msg.arg_count(), 1);
    }

    #[test]
    fn test_bundle_default_text() {
        let msg = Message::create_static("&cHi %s", &[]);
        let bundle = msg.bundle(args!["Bob"]);
        assert_eq!(bundle.default_text(), format!("{MARKER}cHi Bob"));
        assert_eq!(bundle.to_string(), bundle.default_text());
    }

    #[test]
    fn test_bundle_with_wrong_arg_count_still_created() {
        let msg = Message::create_static("Hi %s", &[]);
        let bundle = msg.bundle(vec![]);
        assert!(bundle.args().is_empty());
        // Formatting fails, so the template comes back unformatted.
        assert_eq!(bundle.default_text(), "Hi %s");
    }
}
