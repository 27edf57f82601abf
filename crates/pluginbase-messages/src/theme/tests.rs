use super::*;

fn green() -> String {
    ColorCode::Green.to_string()
}

fn red() -> String {
    ColorCode::Red.to_string()
}

#[test]
fn test_defaults_cover_every_theme() {
    let theme = ThemeRegistry::new();
    for t in Theme::ALL {
        assert_eq!(
            theme.lookup(t.default_tag()),
            Some(theme.code(t).as_str()),
            "theme {} should be reachable by its default tag",
            t.name()
        );
    }
}

#[test]
fn test_compose_color_and_style() {
    let theme = ThemeRegistry::new();
    assert_eq!(
        theme.code(Theme::CmdFlag),
        format!("{}{}", ColorCode::Gold, ColorCode::Italic)
    );
    assert_eq!(theme.code(Theme::Important), ColorCode::Bold.to_string());
    assert_eq!(theme.code(Theme::Plain), ColorCode::Reset.to_string());
}

#[test]
fn test_expand_success_and_fail() {
    let theme = ThemeRegistry::new();
    assert_eq!(
        theme.expand("$+Success$-Fail"),
        format!("{}Success{}Fail", green(), red())
    );
}

#[test]
fn test_expand_escaped_marker_is_literal() {
    let theme = ThemeRegistry::new();
    assert_eq!(theme.expand("\\$+Success"), "\\$+Success");
}

#[test]
fn test_expand_unknown_tag_keeps_marker() {
    let theme = ThemeRegistry::new();
    assert_eq!(theme.expand("cost: $5"), "cost: $5");
}

#[test]
fn test_expand_short_inputs() {
    let theme = ThemeRegistry::new();
    assert_eq!(theme.expand(""), "");
    assert_eq!(theme.expand("$"), "$");
    assert_eq!(theme.expand("a"), "a");
}

#[test]
fn test_expand_copies_final_character() {
    let theme = ThemeRegistry::new();
    // The scan stops before the last character, which is then copied as is.
    assert_eq!(theme.expand("x$+"), format!("x{}+", green()));
}

#[test]
fn test_load_reassigns_tag() {
    let mut theme = ThemeRegistry::new();
    theme
        .load(
            r#"
            [success]
            tag = "@"
            color = "dark_green"
            "#,
        )
        .unwrap();
    let entry = theme.entry(Theme::Success);
    assert_eq!(entry.tag, '@');
    assert_eq!(entry.color, Some(ColorCode::DarkGreen));
    assert_eq!(theme.lookup('@'), Some(ColorCode::DarkGreen.to_string().as_str()));
    // '+' is no longer claimed by anything.
    assert_eq!(theme.lookup('+'), None);
    assert_eq!(theme.expand("$@ok"), format!("{}ok", ColorCode::DarkGreen));
}

#[test]
fn test_load_first_block_wins_tag() {
    let mut theme = ThemeRegistry::new();
    theme
        .load(
            r#"
            [custom]
            tag = "+"
            color = "blue"

            [success]
            tag = "+"
            color = "green"
            "#,
        )
        .unwrap();
    assert_eq!(theme.lookup('+'), Some(ColorCode::Blue.to_string().as_str()));
    // The success block lost the tag so the built-in keeps its settings.
    assert_eq!(theme.entry(Theme::Success).tag, '+');
}

#[test]
fn test_load_requires_tag_and_color_or_style() {
    let mut theme = ThemeRegistry::new();
    theme
        .load(
            r#"
            [error]
            color = "gold"

            [info]
            tag = "i"

            [important]
            tag = "!"
            style = "underline"
            "#,
        )
        .unwrap();
    assert_eq!(theme.code(Theme::Error), red());
    assert_eq!(theme.code(Theme::Info), ColorCode::Aqua.to_string());
    assert_eq!(theme.code(Theme::Important), ColorCode::Underline.to_string());
}

#[test]
fn test_load_block_names_case_insensitive() {
    let mut theme = ThemeRegistry::new();
    theme
        .load(
            r#"
            [CMD_USAGE]
            tag = "u"
            color = "YELLOW"
            "#,
        )
        .unwrap();
    assert_eq!(theme.entry(Theme::CmdUsage).tag, 'u');
    assert_eq!(theme.code(Theme::CmdUsage), ColorCode::Yellow.to_string());
}

#[test]
fn test_load_unknown_color_ignored() {
    let mut theme = ThemeRegistry::new();
    theme
        .load(
            r#"
            [help]
            tag = "h"
            color = "mauve"
            "#,
        )
        .unwrap();
    assert_eq!(theme.code(Theme::Help), ColorCode::White.to_string());
}

#[test]
fn test_load_malformed_keeps_existing_mapping() {
    let mut theme = ThemeRegistry::new();
    assert!(theme.load("[success\ntag = ").is_err());
    assert_eq!(theme.lookup('+'), Some(green().as_str()));
}

#[test]
fn test_load_skips_non_table_blocks() {
    let mut theme = ThemeRegistry::new();
    theme
        .load(
            r#"
            success = 3

            [error]
            tag = "-"
            color = "dark_red"
            "#,
        )
        .unwrap();
    assert_eq!(theme.lookup('+'), Some(green().as_str()));
    assert_eq!(theme.lookup('-'), Some(ColorCode::DarkRed.to_string().as_str()));
}

#[test]
fn test_from_document_falls_back_to_defaults() {
    let theme = ThemeRegistry::from_document("not = [valid");
    assert_eq!(theme.tags().len(), ThemeRegistry::new().tags().len());
}

#[test]
fn test_from_file_missing_uses_defaults() {
    let theme = ThemeRegistry::from_file(Path::new("/tmp/__pluginbase_no_such_theme__.toml"));
    assert_eq!(theme.lookup('-'), Some(red().as_str()));
}

#[test]
fn test_from_file_reads_document() {
    let tmp = std::env::temp_dir().join("__pluginbase_test_theme_file__.toml");
    std::fs::write(&tmp, "[value]\ntag = \"v\"\ncolor = \"gold\"\n").unwrap();
    let theme = ThemeRegistry::from_file(&tmp);
    assert_eq!(theme.code(Theme::Value), ColorCode::Gold.to_string());
    let _ = std::fs::remove_file(&tmp);
}

#[test]
fn test_reload_global_rejects_malformed() {
    assert!(reload_global("[[[").is_err());
    assert_eq!(global().lookup('+'), Some(green().as_str()));
}
