//! Locale identifiers and the number conventions the formatter needs.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::error::PluginBaseError;

/// A language with an optional region, e.g. `en_US` or `de`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Locale {
    language: String,
    region: Option<String>,
}

impl Locale {
    /// Build a locale from a language code and optional region code.
    pub fn new(language: &str, region: Option<&str>) -> Self {
        Self {
            language: language.to_ascii_lowercase(),
            region: region
                .filter(|r| !r.is_empty())
                .map(|r| r.to_ascii_uppercase()),
        }
    }

    /// Lowercase ISO 639 language code.
    pub fn language(&self) -> &str {
        &self.language
    }

    /// Uppercase region code, if any.
    pub fn region(&self) -> Option<&str> {
        self.region.as_deref()
    }

    /// Character placed between the integer and fractional parts of a number.
    pub fn decimal_separator(&self) -> char {
        match self.language.as_str() {
            "de" | "es" | "it" | "nl" | "pt" | "da" | "id" | "tr" | "fr" | "ru" | "pl" | "sv"
            | "nb" | "no" | "fi" | "cs" | "uk" => ',',
            _ => '.',
        }
    }

    /// Character placed between groups of three integer digits.
    pub fn grouping_separator(&self) -> char {
        match self.language.as_str() {
            "de" | "es" | "it" | "nl" | "pt" | "da" | "id" | "tr" => '.',
            "fr" | "ru" | "pl" | "sv" | "nb" | "no" | "fi" | "cs" | "uk" => '\u{00A0}',
            _ => ',',
        }
    }
}

impl Default for Locale {
    fn default() -> Self {
        Self::new("en", Some("US"))
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.region {
            Some(region) => write!(f, "{}_{region}", self.language),
            None => f.write_str(&self.language),
        }
    }
}

impl FromStr for Locale {
    type Err = PluginBaseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let (language, region) = match s.split_once(&['_', '-'][..]) {
            Some((lang, region)) => (lang, Some(region)),
            None => (s, None),
        };
        let valid = |part: &str| !part.is_empty() && part.chars().all(|c| c.is_ascii_alphanumeric());
        if !valid(language) || region.is_some_and(|r| !valid(r)) {
            return Err(PluginBaseError::Config(format!("invalid locale: '{s}'")));
        }
        Ok(Self::new(language, region))
    }
}

impl Serialize for Locale {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Locale {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}
