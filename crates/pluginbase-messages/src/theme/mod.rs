//! Theme tags: `$x` shorthand that expands to color and style codes.
//!
//! Each built-in [`Theme`] has a default tag character and a color and/or
//! style. A theme definition document can reassign tags and colors:
//!
//! ```toml
//! [success]
//! tag = "+"
//! color = "green"
//!
//! [important]
//! tag = "!"
//! style = "bold"
//! ```
//!
//! Blocks are processed in document order; the first block to claim a tag
//! wins. Built-in themes that no block claims keep their current settings.

#[cfg(test)]
mod tests;

use serde::Deserialize;
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::sync::{LazyLock, PoisonError, RwLock, RwLockReadGuard};
use tracing::{debug, trace, warn};

use crate::color::ColorCode;
use pluginbase_core::PluginBaseError;

/// Character that starts a theme tag.
pub const THEME_MARKER: char = '$';

/// Character that, placed right before [`THEME_MARKER`], keeps it literal.
pub const THEME_ESCAPE: char = '\\';

/// Well-known name of the theme definition document.
pub const THEME_RESOURCE: &str = "theme.toml";

/// Environment variable that overrides where the theme document is found.
pub const THEME_ENV: &str = "PLUGINBASE_THEME";

/// Built-in theme identities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Theme {
    Success,
    Error,
    Failure,
    Plain,
    Important,
    Important2,
    Important3,
    Help,
    Info,
    Sorry,
    Retry,
    DoThis,
    Value,
    Title,
    PleaseWait,
    CmdUsage,
    CmdFlag,
    OptArg,
    ReqArg,
    CmdHighlight,
    Header,
    ListOdd,
    ListEven,
}

impl Theme {
    /// All built-in themes in declaration order.
    pub const ALL: [Theme; 23] = [
        Self::Success,
        Self::Error,
        Self::Failure,
        Self::Plain,
        Self::Important,
        Self::Important2,
        Self::Important3,
        Self::Help,
        Self::Info,
        Self::Sorry,
        Self::Retry,
        Self::DoThis,
        Self::Value,
        Self::Title,
        Self::PleaseWait,
        Self::CmdUsage,
        Self::CmdFlag,
        Self::OptArg,
        Self::ReqArg,
        Self::CmdHighlight,
        Self::Header,
        Self::ListOdd,
        Self::ListEven,
    ];

    /// Name used for the theme's block in a definition document.
    pub fn name(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Error => "error",
            Self::Failure => "failure",
            Self::Plain => "plain",
            Self::Important => "important",
            Self::Important2 => "important2",
            Self::Important3 => "important3",
            Self::Help => "help",
            Self::Info => "info",
            Self::Sorry => "sorry",
            Self::Retry => "retry",
            Self::DoThis => "do_this",
            Self::Value => "value",
            Self::Title => "title",
            Self::PleaseWait => "please_wait",
            Self::CmdUsage => "cmd_usage",
            Self::CmdFlag => "cmd_flag",
            Self::OptArg => "opt_arg",
            Self::ReqArg => "req_arg",
            Self::CmdHighlight => "cmd_highlight",
            Self::Header => "header",
            Self::ListOdd => "list_odd",
            Self::ListEven => "list_even",
        }
    }

    /// Case-insensitive lookup by block name.
    pub fn by_name(name: &str) -> Option<Theme> {
        let wanted = name.trim().to_ascii_lowercase();
        Self::ALL.iter().copied().find(|t| t.name() == wanted)
    }

    /// Compiled-in (tag, color, style).
    fn defaults(self) -> (char, Option<ColorCode>, Option<ColorCode>) {
        use ColorCode::*;
        match self {
            Self::Success => ('+', Some(Green), None),
            Self::Error => ('-', Some(Red), None),
            Self::Failure => ('^', Some(Red), None),
            Self::Plain => ('.', Some(Reset), None),
            Self::Important => ('!', None, Some(Bold)),
            Self::Important2 => ('*', None, Some(Italic)),
            Self::Important3 => ('_', None, Some(Underline)),
            Self::Help => ('h', Some(White), None),
            Self::Info => ('i', Some(Aqua), None),
            Self::Sorry => ('$', Some(DarkGray), None),
            Self::Retry => (',', Some(Gray), None),
            Self::DoThis => ('~', Some(Blue), None),
            Self::Value => ('v', Some(DarkGreen), None),
            Self::Title => ('t', Some(DarkAqua), None),
            Self::PleaseWait => ('w', Some(Gray), None),
            Self::CmdUsage => ('c', Some(White), None),
            Self::CmdFlag => ('f', Some(Gold), Some(Italic)),
            Self::OptArg => ('o', Some(Gold), None),
            Self::ReqArg => ('r', Some(Green), None),
            Self::CmdHighlight => ('C', None, Some(Bold)),
            Self::Header => ('=', Some(LightPurple), None),
            Self::ListOdd => (':', Some(White), None),
            Self::ListEven => (';', Some(Yellow), None),
        }
    }

    /// Compiled-in tag character.
    pub fn default_tag(self) -> char {
        self.defaults().0
    }
}

/// Current settings of one built-in theme.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThemeEntry {
    pub theme: Theme,
    pub tag: char,
    pub color: Option<ColorCode>,
    pub style: Option<ColorCode>,
}

impl ThemeEntry {
    fn builtin(theme: Theme) -> Self {
        let (tag, color, style) = theme.defaults();
        Self {
            theme,
            tag,
            color,
            style,
        }
    }

    /// Color followed by style, or reset when neither is set.
    pub fn code(&self) -> String {
        compose(self.color, self.style)
    }
}

fn compose(color: Option<ColorCode>, style: Option<ColorCode>) -> String {
    let mut out = String::new();
    if let Some(color) = color {
        out.push_str(&color.to_string());
    }
    if let Some(style) = style {
        out.push_str(&style.to_string());
    }
    if out.is_empty() {
        ColorCode::Reset.to_string()
    } else {
        out
    }
}

/// One block of a theme definition document.
#[derive(Debug, Default, Deserialize)]
struct ThemeBlock {
    tag: Option<String>,
    color: Option<String>,
    style: Option<String>,
}

fn parse_code(block: &str, field: &str, raw: Option<&str>) -> Option<ColorCode> {
    let raw = raw.filter(|v| !v.is_empty())?;
    match raw.parse() {
        Ok(code) => Some(code),
        Err(e) => {
            debug!("theme: ignoring {field} in [{block}]: {e}");
            None
        }
    }
}

/// Maps tag characters to composed code strings.
#[derive(Debug, Clone)]
pub struct ThemeRegistry {
    entries: Vec<ThemeEntry>,
    tags: HashMap<char, String>,
}

impl Default for ThemeRegistry {
    fn default() -> Self {
        let mut registry = Self {
            entries: Theme::ALL.iter().map(|&t| ThemeEntry::builtin(t)).collect(),
            tags: HashMap::new(),
        };
        registry.fill_unclaimed(&HashSet::new());
        registry
    }
}

impl ThemeRegistry {
    /// Registry holding only the compiled-in themes.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry loaded from `document`, or the defaults if it does not parse.
    pub fn from_document(document: &str) -> Self {
        let mut registry = Self::new();
        if let Err(e) = registry.load(document) {
            warn!("theme: {e}; using default theme");
        }
        registry
    }

    /// Registry loaded from the well-known theme resource.
    ///
    /// Looks at `$PLUGINBASE_THEME` first, then `theme.toml` in the working
    /// directory. A missing resource yields the defaults silently.
    pub fn from_resource() -> Self {
        let path = std::env::var_os(THEME_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(THEME_RESOURCE));
        Self::from_file(&path)
    }

    /// Registry loaded from a theme file, falling back to defaults.
    pub fn from_file(path: &Path) -> Self {
        if !path.exists() {
            debug!("theme: no definition at {}, using defaults", path.display());
            return Self::new();
        }
        match std::fs::read_to_string(path) {
            Ok(content) => {
                debug!("theme: loading {}", path.display());
                Self::from_document(&content)
            }
            Err(e) => {
                warn!("theme: failed to read {}: {e}", path.display());
                Self::new()
            }
        }
    }

    /// Apply a theme definition document.
    ///
    /// A document that does not parse leaves the registry untouched.
    pub fn load(&mut self, document: &str) -> Result<(), PluginBaseError> {
        let table: toml::Table = toml::from_str(document)
            .map_err(|e| PluginBaseError::Theme(format!("failed to parse definition: {e}")))?;

        self.tags.clear();
        let mut claimed = HashSet::new();

        for (name, value) in table {
            let applicable = Theme::by_name(&name);
            let block: ThemeBlock = match value.try_into() {
                Ok(block) => block,
                Err(e) => {
                    warn!("theme: skipping malformed block [{name}]: {e}");
                    continue;
                }
            };

            let tag = block.tag.as_deref().and_then(|t| t.chars().next());
            let color = parse_code(&name, "color", block.color.as_deref());
            let style = parse_code(&name, "style", block.style.as_deref());

            let Some(tag) = tag else {
                continue;
            };
            if color.is_none() && style.is_none() {
                continue;
            }
            if self.tags.contains_key(&tag) {
                debug!("theme: tag '{tag}' already claimed, ignoring [{name}]");
                continue;
            }

            self.tags.insert(tag, compose(color, style));
            trace!("theme: [{name}] -> '{tag}'");
            if let Some(theme) = applicable {
                claimed.insert(theme);
                let entry = &mut self.entries[theme as usize];
                entry.tag = tag;
                entry.color = color;
                entry.style = style;
            }
        }

        self.fill_unclaimed(&claimed);
        Ok(())
    }

    fn fill_unclaimed(&mut self, claimed: &HashSet<Theme>) {
        for entry in &self.entries {
            if claimed.contains(&entry.theme) {
                continue;
            }
            self.tags.entry(entry.tag).or_insert_with(|| entry.code());
        }
    }

    /// Current settings of a built-in theme.
    pub fn entry(&self, theme: Theme) -> &ThemeEntry {
        &self.entries[theme as usize]
    }

    /// Composed code string of a built-in theme.
    pub fn code(&self, theme: Theme) -> String {
        self.entry(theme).code()
    }

    /// Composed code string selected by `tag`.
    pub fn lookup(&self, tag: char) -> Option<&str> {
        self.tags.get(&tag).map(String::as_str)
    }

    /// Every active tag with its code string, sorted by tag.
    pub fn tags(&self) -> Vec<(char, &str)> {
        let mut tags: Vec<(char, &str)> =
            self.tags.iter().map(|(k, v)| (*k, v.as_str())).collect();
        tags.sort_by_key(|(tag, _)| *tag);
        tags
    }

    /// Replace `$x` tags in `text` with their code strings.
    ///
    /// A marker right after [`THEME_ESCAPE`] or followed by an unknown tag is
    /// copied as is. The last character is always copied verbatim.
    pub fn expand(&self, text: &str) -> String {
        let chars: Vec<char> = text.chars().collect();
        let mut out = String::with_capacity(text.len() + 10);
        let mut previous = ' ';
        let mut i = 0;
        while i + 1 < chars.len() {
            let current = chars[i];
            if current == THEME_MARKER && previous != THEME_ESCAPE {
                match self.lookup(chars[i + 1]) {
                    Some(code) => {
                        out.push_str(code);
                        i += 1;
                    }
                    None => out.push(current),
                }
            } else {
                out.push(current);
            }
            previous = current;
            i += 1;
        }
        if let Some(&last) = chars.last() {
            out.push(last);
        }
        out
    }
}

static GLOBAL: LazyLock<RwLock<ThemeRegistry>> =
    LazyLock::new(|| RwLock::new(ThemeRegistry::from_resource()));

/// The process-wide theme, loaded from the theme resource on first use.
pub fn global() -> RwLockReadGuard<'static, ThemeRegistry> {
    GLOBAL.read().unwrap_or_else(PoisonError::into_inner)
}

/// Re-apply a definition document to the process-wide theme.
pub fn reload_global(document: &str) -> Result<(), PluginBaseError> {
    let mut theme = GLOBAL.write().unwrap_or_else(PoisonError::into_inner);
    theme.load(document)
}

/// Expand theme tags with the process-wide theme.
pub fn expand(text: &str) -> String {
    global().expand(text)
}
