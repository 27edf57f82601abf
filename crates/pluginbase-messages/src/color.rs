//! Chat color and style codes.
//!
//! A code is embedded in text as [`MARKER`] followed by the code's character,
//! e.g. `§c` for red. Message templates use `&` as a typing-friendly
//! stand-in which [`translate_shorthand`] turns into the real marker.

use std::fmt;
use std::str::FromStr;

/// Character that prefixes every color code embedded in text.
pub const MARKER: char = '\u{00A7}';

/// Characters that may follow a marker or shorthand character.
const CODE_CHARS: &str = "0123456789AaBbCcDdEeFfKkLlMmNnOoRr";

/// Every supported color and format code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColorCode {
    Black,
    DarkBlue,
    DarkGreen,
    DarkAqua,
    DarkRed,
    DarkPurple,
    Gold,
    Gray,
    DarkGray,
    Blue,
    Green,
    Aqua,
    Red,
    LightPurple,
    Yellow,
    White,
    /// Characters that change around randomly.
    Magic,
    Bold,
    Strikethrough,
    Underline,
    Italic,
    /// Resets all previous colors and formats.
    Reset,
}

impl ColorCode {
    /// All codes, indexed by ordinal.
    pub const ALL: [ColorCode; 22] = [
        Self::Black,
        Self::DarkBlue,
        Self::DarkGreen,
        Self::DarkAqua,
        Self::DarkRed,
        Self::DarkPurple,
        Self::Gold,
        Self::Gray,
        Self::DarkGray,
        Self::Blue,
        Self::Green,
        Self::Aqua,
        Self::Red,
        Self::LightPurple,
        Self::Yellow,
        Self::White,
        Self::Magic,
        Self::Bold,
        Self::Strikethrough,
        Self::Underline,
        Self::Italic,
        Self::Reset,
    ];

    /// The character written after [`MARKER`].
    pub fn char(self) -> char {
        match self {
            Self::Black => '0',
            Self::DarkBlue => '1',
            Self::DarkGreen => '2',
            Self::DarkAqua => '3',
            Self::DarkRed => '4',
            Self::DarkPurple => '5',
            Self::Gold => '6',
            Self::Gray => '7',
            Self::DarkGray => '8',
            Self::Blue => '9',
            Self::Green => 'a',
            Self::Aqua => 'b',
            Self::Red => 'c',
            Self::LightPurple => 'd',
            Self::Yellow => 'e',
            Self::White => 'f',
            Self::Magic => 'k',
            Self::Bold => 'l',
            Self::Strikethrough => 'm',
            Self::Underline => 'n',
            Self::Italic => 'o',
            Self::Reset => 'r',
        }
    }

    /// Numeric code; colors use 0x0..=0xF, formats follow.
    pub fn ordinal(self) -> u8 {
        self as u8
    }

    /// Lowercase snake_case name, as used in theme definitions.
    pub fn name(self) -> &'static str {
        match self {
            Self::Black => "black",
            Self::DarkBlue => "dark_blue",
            Self::DarkGreen => "dark_green",
            Self::DarkAqua => "dark_aqua",
            Self::DarkRed => "dark_red",
            Self::DarkPurple => "dark_purple",
            Self::Gold => "gold",
            Self::Gray => "gray",
            Self::DarkGray => "dark_gray",
            Self::Blue => "blue",
            Self::Green => "green",
            Self::Aqua => "aqua",
            Self::Red => "red",
            Self::LightPurple => "light_purple",
            Self::Yellow => "yellow",
            Self::White => "white",
            Self::Magic => "magic",
            Self::Bold => "bold",
            Self::Strikethrough => "strikethrough",
            Self::Underline => "underline",
            Self::Italic => "italic",
            Self::Reset => "reset",
        }
    }

    /// True for style codes (bold, italic, ...).
    pub fn is_format(self) -> bool {
        matches!(
            self,
            Self::Magic | Self::Bold | Self::Strikethrough | Self::Underline | Self::Italic
        )
    }

    /// True for actual colors; neither formats nor reset.
    pub fn is_color(self) -> bool {
        !self.is_format() && self != Self::Reset
    }

    /// Look up a code by its character. Case-insensitive.
    pub fn by_char(c: char) -> Option<ColorCode> {
        let code = match c.to_ascii_lowercase() {
            '0' => Self::Black,
            '1' => Self::DarkBlue,
            '2' => Self::DarkGreen,
            '3' => Self::DarkAqua,
            '4' => Self::DarkRed,
            '5' => Self::DarkPurple,
            '6' => Self::Gold,
            '7' => Self::Gray,
            '8' => Self::DarkGray,
            '9' => Self::Blue,
            'a' => Self::Green,
            'b' => Self::Aqua,
            'c' => Self::Red,
            'd' => Self::LightPurple,
            'e' => Self::Yellow,
            'f' => Self::White,
            'k' => Self::Magic,
            'l' => Self::Bold,
            'm' => Self::Strikethrough,
            'n' => Self::Underline,
            'o' => Self::Italic,
            'r' => Self::Reset,
            _ => return None,
        };
        Some(code)
    }

    /// Look up a code by its ordinal.
    pub fn by_ordinal(ordinal: u8) -> Option<ColorCode> {
        Self::ALL.get(ordinal as usize).copied()
    }
}

impl fmt::Display for ColorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{MARKER}{}", self.char())
    }
}

impl FromStr for ColorCode {
    type Err = String;

    /// Parse a code name such as `dark_green` or `BOLD`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Self::ALL
            .iter()
            .copied()
            .find(|code| code.name() == wanted)
            .ok_or_else(|| format!("unknown color code '{s}'"))
    }
}

/// Remove every `§` code sequence from `text`.
pub fn strip_all(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        if c == MARKER {
            if let Some(&next) = chars.peek() {
                if CODE_CHARS.contains(next) {
                    chars.next();
                    continue;
                }
            }
        }
        out.push(c);
    }
    out
}

/// Replace `alt` followed by a code character with [`MARKER`] and the
/// lowercased code character.
///
/// A trailing `alt` with nothing after it is left alone.
pub fn translate_shorthand(alt: char, text: &str) -> String {
    let mut chars: Vec<char> = text.chars().collect();
    for i in 0..chars.len().saturating_sub(1) {
        if chars[i] == alt && CODE_CHARS.contains(chars[i + 1]) {
            chars[i] = MARKER;
            chars[i + 1] = chars[i + 1].to_ascii_lowercase();
        }
    }
    chars.into_iter().collect()
}

/// Codes still in effect at the end of `text`, to carry onto a new line.
///
/// Scans backwards collecting codes until a color or reset is found. Format
/// codes seen on the way are kept in front of it.
pub fn trailing_codes(text: &str) -> String {
    let chars: Vec<char> = text.chars().collect();
    let mut result = String::new();
    for index in (0..chars.len().saturating_sub(1)).rev() {
        if chars[index] != MARKER {
            continue;
        }
        if let Some(code) = ColorCode::by_char(chars[index + 1]) {
            result.insert_str(0, &code.to_string());
            if code.is_color() || code == ColorCode::Reset {
                break;
            }
        }
    }
    result
}
