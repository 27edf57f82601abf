//! printf-style formatting of message templates.
//!
//! Supports the subset of conversions language files actually use:
//! `%s`, `%S`, `%d`, `%f`, `%b`, `%n` and `%%`, with optional explicit
//! argument index (`%2$s`), `,` grouping and `-` left-justify flags, width,
//! and precision. Number separators follow the target [`Locale`].

use std::fmt;
use std::iter::Peekable;
use std::str::Chars;
use thiserror::Error;

use pluginbase_core::{Locale, PluginBaseError};

/// A value substituted into a template.
#[derive(Debug, Clone, PartialEq)]
pub enum Arg {
    Text(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    Null,
}

impl Arg {
    fn kind(&self) -> &'static str {
        match self {
            Self::Text(_) => "text",
            Self::Int(_) => "integer",
            Self::Float(_) => "float",
            Self::Bool(_) => "bool",
            Self::Null => "null",
        }
    }
}

impl fmt::Display for Arg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(s) => f.write_str(s),
            Self::Int(i) => write!(f, "{i}"),
            // Whole floats keep a trailing `.0` so they read as floats.
            Self::Float(v) if v.is_finite() && v.fract() == 0.0 && v.abs() < 1e16 => {
                write!(f, "{v:.1}")
            }
            Self::Float(v) => write!(f, "{v}"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Null => f.write_str("null"),
        }
    }
}

impl From<&str> for Arg {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for Arg {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<&String> for Arg {
    fn from(value: &String) -> Self {
        Self::Text(value.clone())
    }
}

impl From<char> for Arg {
    fn from(value: char) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<i32> for Arg {
    fn from(value: i32) -> Self {
        Self::Int(value.into())
    }
}

impl From<u32> for Arg {
    fn from(value: u32) -> Self {
        Self::Int(value.into())
    }
}

impl From<i64> for Arg {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<u64> for Arg {
    fn from(value: u64) -> Self {
        i64::try_from(value)
            .map(Self::Int)
            .unwrap_or_else(|_| Self::Text(value.to_string()))
    }
}

impl From<usize> for Arg {
    fn from(value: usize) -> Self {
        i64::try_from(value)
            .map(Self::Int)
            .unwrap_or_else(|_| Self::Text(value.to_string()))
    }
}

impl From<f32> for Arg {
    fn from(value: f32) -> Self {
        Self::Float(value.into())
    }
}

impl From<f64> for Arg {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<bool> for Arg {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl<T: Into<Arg>> From<Option<T>> for Arg {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

/// Build a `Vec<Arg>` from mixed values: `args!["Bob", 3, 2.5]`.
#[macro_export]
macro_rules! args {
    ($($arg:expr),* $(,)?) => {
        vec![$($crate::format::Arg::from($arg)),*]
    };
}

/// Why a template could not be formatted.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
    #[error("no argument for '{0}'")]
    MissingArgument(String),
    #[error("'{directive}' cannot format a {kind} argument")]
    IllegalConversion { directive: String, kind: &'static str },
    #[error("unknown conversion '{0}'")]
    UnknownConversion(String),
    #[error("template ends with a lone '%'")]
    DanglingPercent,
    #[error("'{0}' exceeds the maximum width or precision of {max}", max = MAX_WIDTH)]
    TooWide(String),
}

impl From<FormatError> for PluginBaseError {
    fn from(e: FormatError) -> Self {
        PluginBaseError::Format(e.to_string())
    }
}

/// Largest width or precision a directive may request.
pub const MAX_WIDTH: usize = 1024;

/// One parsed `%...` specifier.
struct Directive {
    index: Option<usize>,
    grouping: bool,
    left: bool,
    width: Option<usize>,
    precision: Option<usize>,
    conversion: char,
    text: String,
}

fn take_number(chars: &mut Peekable<Chars<'_>>, text: &mut String) -> Option<usize> {
    let mut digits = String::new();
    while let Some(&c) = chars.peek() {
        if !c.is_ascii_digit() {
            break;
        }
        digits.push(c);
        chars.next();
    }
    text.push_str(&digits);
    if digits.is_empty() {
        return None;
    }
    Some(digits.parse().unwrap_or(usize::MAX))
}

fn parse_directive(chars: &mut Peekable<Chars<'_>>) -> Result<Directive, FormatError> {
    let mut text = String::from("%");
    let mut index = None;
    let mut width = None;

    let lead = take_number(chars, &mut text);
    if lead.is_some() && chars.peek() == Some(&'$') {
        chars.next();
        text.push('$');
        index = lead;
    } else {
        width = lead;
    }

    let (mut grouping, mut left) = (false, false);
    if width.is_none() {
        while let Some(&flag) = chars.peek() {
            match flag {
                ',' => grouping = true,
                '-' => left = true,
                _ => break,
            }
            text.push(flag);
            chars.next();
        }
        width = take_number(chars, &mut text);
    }

    let mut precision = None;
    if chars.peek() == Some(&'.') {
        chars.next();
        text.push('.');
        precision = take_number(chars, &mut text);
        if precision.is_none() {
            return Err(FormatError::UnknownConversion(text));
        }
    }

    let conversion = chars.next().ok_or(FormatError::DanglingPercent)?;
    text.push(conversion);
    if index == Some(0) {
        return Err(FormatError::UnknownConversion(text));
    }
    if width.is_some_and(|w| w > MAX_WIDTH) || precision.is_some_and(|p| p > MAX_WIDTH) {
        return Err(FormatError::TooWide(text));
    }

    Ok(Directive {
        index,
        grouping,
        left,
        width,
        precision,
        conversion,
        text,
    })
}

/// Insert `sep` between groups of three digits of an integer string.
fn group_digits(digits: &str, sep: char) -> String {
    let (sign, digits) = match digits.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", digits),
    };
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(sep);
        }
        out.push(c);
    }
    format!("{sign}{out}")
}

fn render(locale: &Locale, directive: &Directive, arg: &Arg) -> Result<String, FormatError> {
    let illegal = || FormatError::IllegalConversion {
        directive: directive.text.clone(),
        kind: arg.kind(),
    };
    let body = match directive.conversion {
        's' | 'S' => {
            let mut s = arg.to_string();
            if let Some(p) = directive.precision {
                s = s.chars().take(p).collect();
            }
            if directive.conversion == 'S' {
                s = s.to_uppercase();
            }
            s
        }
        'd' => {
            let Arg::Int(i) = arg else {
                return Err(illegal());
            };
            let digits = i.to_string();
            if directive.grouping {
                group_digits(&digits, locale.grouping_separator())
            } else {
                digits
            }
        }
        'f' => {
            let value = match arg {
                Arg::Float(v) => *v,
                Arg::Int(i) => *i as f64,
                _ => return Err(illegal()),
            };
            let precision = directive.precision.unwrap_or(6);
            let raw = format!("{value:.precision$}");
            let (int_part, frac_part) = match raw.split_once('.') {
                Some((i, f)) => (i.to_string(), Some(f.to_string())),
                None => (raw, None),
            };
            let int_part = if directive.grouping {
                group_digits(&int_part, locale.grouping_separator())
            } else {
                int_part
            };
            match frac_part {
                Some(frac) => format!("{int_part}{}{frac}", locale.decimal_separator()),
                None => int_part,
            }
        }
        'b' => match arg {
            Arg::Bool(b) => b.to_string(),
            Arg::Null => "false".to_string(),
            _ => "true".to_string(),
        },
        _ => return Err(FormatError::UnknownConversion(directive.text.clone())),
    };

    let len = body.chars().count();
    Ok(match directive.width {
        Some(width) if width > len => {
            let pad = " ".repeat(width - len);
            if directive.left {
                format!("{body}{pad}")
            } else {
                format!("{pad}{body}")
            }
        }
        _ => body,
    })
}

/// Substitute `args` into `template` using `locale`'s number conventions.
///
/// Extra arguments are ignored.
pub fn format(locale: &Locale, template: &str, args: &[Arg]) -> Result<String, FormatError> {
    let mut out = String::with_capacity(template.len());
    let mut chars = template.chars().peekable();
    let mut next_arg = 0;

    while let Some(c) = chars.next() {
        if c != '%' {
            out.push(c);
            continue;
        }
        let directive = parse_directive(&mut chars)?;
        match directive.conversion {
            '%' => out.push('%'),
            'n' => out.push('\n'),
            _ => {
                let index = match directive.index {
                    Some(i) => i - 1,
                    None => {
                        next_arg += 1;
                        next_arg - 1
                    }
                };
                let arg = args
                    .get(index)
                    .ok_or_else(|| FormatError::MissingArgument(directive.text.clone()))?;
                out.push_str(&render(locale, &directive, arg)?);
            }
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn en() -> Locale {
        Locale::default()
    }

    fn de() -> Locale {
        "de_DE".parse().unwrap()
    }

    #[test]
    fn test_plain_substitution() {
        assert_eq!(format(&en(), "Hi %s", &args!["Bob"]).unwrap(), "Hi Bob");
        assert_eq!(format(&en(), "no args", &[]).unwrap(), "no args");
    }

    #[test]
    fn test_substitution_in_order() {
        let out = format(&en(), "%s gave %s %s coins", &args!["Ann", "Bob", 3]).unwrap();
        assert_eq!(out, "Ann gave Bob 3 coins");
    }

    #[test]
    fn test_explicit_index() {
        let out = format(&en(), "%2$s before %1$s", &args!["a", "b"]).unwrap();
        assert_eq!(out, "b before a");
    }

    #[test]
    fn test_percent_and_newline() {
        assert_eq!(format(&en(), "100%% done%n", &[]).unwrap(), "100% done\n");
    }

    #[test]
    fn test_extra_args_ignored() {
        assert_eq!(format(&en(), "only %s", &args!["one", "two"]).unwrap(), "only one");
    }

    #[test]
    fn test_missing_argument() {
        let err = format(&en(), "%s and %s", &args!["one"]).unwrap_err();
        assert_eq!(err, FormatError::MissingArgument("%s".to_string()));
    }

    #[test]
    fn test_illegal_conversion() {
        let err = format(&en(), "%d", &args!["abc"]).unwrap_err();
        assert!(matches!(err, FormatError::IllegalConversion { kind: "text", .. }));
    }

    #[test]
    fn test_unknown_conversion_and_dangling() {
        assert!(matches!(
            format(&en(), "%q", &args!["x"]),
            Err(FormatError::UnknownConversion(_))
        ));
        assert_eq!(format(&en(), "50%", &[]), Err(FormatError::DanglingPercent));
    }

    #[test]
    fn test_locale_decimal_separator() {
        assert_eq!(format(&en(), "%.2f", &args![1234.5]).unwrap(), "1234.50");
        assert_eq!(format(&de(), "%.2f", &args![1234.5]).unwrap(), "1234,50");
        assert_eq!(format(&de(), "%,.1f", &args![1234.5]).unwrap(), "1.234,5");
    }

    #[test]
    fn test_locale_grouping() {
        assert_eq!(format(&en(), "%,d", &args![1234567]).unwrap(), "1,234,567");
        assert_eq!(format(&de(), "%,d", &args![-1234567]).unwrap(), "-1.234.567");
        assert_eq!(format(&en(), "%,d", &args![123]).unwrap(), "123");
    }

    #[test]
    fn test_string_form_of_numbers_not_localized() {
        assert_eq!(format(&de(), "%s", &args![2.5]).unwrap(), "2.5");
        assert_eq!(format(&de(), "%s", &args![2.0]).unwrap(), "2.0");
    }

    #[test]
    fn test_width_and_precision() {
        assert_eq!(format(&en(), "[%5s]", &args!["ab"]).unwrap(), "[   ab]");
        assert_eq!(format(&en(), "[%-5s]", &args!["ab"]).unwrap(), "[ab   ]");
        assert_eq!(format(&en(), "%.3s", &args!["abcdef"]).unwrap(), "abc");
        assert_eq!(format(&en(), "%S", &args!["loud"]).unwrap(), "LOUD");
    }

    #[test]
    fn test_oversized_width_rejected() {
        let err = format(&en(), "%s%1$99999999999999s", &args!["x"]).unwrap_err();
        assert_eq!(err, FormatError::TooWide("%1$99999999999999s".to_string()));
        assert!(matches!(
            format(&en(), "%.999999999f", &args![1.5]),
            Err(FormatError::TooWide(_))
        ));
        // Digits past usize still count as too wide, not as no width.
        assert!(matches!(
            format(&en(), "%99999999999999999999999s", &args!["x"]),
            Err(FormatError::TooWide(_))
        ));
    }

    #[test]
    fn test_width_at_limit_allowed() {
        let out = format(&en(), "%1024s", &args!["x"]).unwrap();
        assert_eq!(out.len(), MAX_WIDTH);
        assert!(out.ends_with('x'));
    }

    #[test]
    fn test_bool_and_null() {
        assert_eq!(format(&en(), "%b %b", &args![true, None::<i32>]).unwrap(), "true false");
        assert_eq!(format(&en(), "%s", &args![None::<&str>]).unwrap(), "null");
    }
}
