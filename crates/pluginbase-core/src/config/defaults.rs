use crate::locale::Locale;

pub(super) fn default_language_file() -> String {
    "english.toml".to_string()
}
pub(super) fn default_locale() -> Locale {
    Locale::default()
}
pub(super) fn default_theme_file() -> String {
    "theme.toml".to_string()
}
pub(super) fn default_log_level() -> String {
    "info".to_string()
}
