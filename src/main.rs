use clap::{Parser, Subcommand};
use pluginbase_core::config;
use pluginbase_messages::color::{self, MARKER};
use pluginbase_messages::provider::SHORTHAND;
use pluginbase_messages::theme::{self, Theme};
use pluginbase_messages::{
    format, generic, Arg, DefaultMessageProvider, Message, MessageGroup, MessageProvider, Messages,
};
use std::path::Path;
use tracing::debug;

/// Owner name used for the CLI's own language file.
const OWNER: &str = "pluginbase";

#[derive(Parser)]
#[command(
    name = "pluginbase",
    version,
    about = "Localized message catalogs with theme markup"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to config file.
    #[arg(short, long, default_value = "config.toml")]
    config: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Expand theme tags and color shorthand, then fill in arguments.
    Render {
        /// Message template, e.g. "$+Saved %s".
        text: String,
        /// Values for the template's placeholders.
        #[arg(trailing_var_arg = true)]
        args: Vec<String>,
    },
    /// Remove color codes from text.
    Strip {
        /// Text containing `&` or `§` color codes.
        text: String,
    },
    /// Print the active theme tags.
    Theme,
    /// Bring the configured language file in step with the built-in messages.
    Sync,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let cfg = config::load(&cli.config)?;

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&cfg.logging.level)),
        )
        .init();

    load_theme(&cfg.theme.file)?;

    match cli.command {
        Commands::Render { text, args } => {
            let message = Message::create_static(&text, &[]);
            let args: Vec<Arg> = args.iter().map(String::as_str).map(parse_arg).collect();
            let template = color::translate_shorthand(SHORTHAND, message.default_text());
            let rendered = format::format(&cfg.messages.locale, &template, &args)
                .map_err(pluginbase_core::PluginBaseError::from)?;
            println!("{rendered}");
        }
        Commands::Strip { text } => {
            println!(
                "{}",
                color::strip_all(&color::translate_shorthand(SHORTHAND, &text))
            );
        }
        Commands::Theme => {
            let theme = theme::global();
            for (tag, code) in theme.tags() {
                let names: Vec<&str> = Theme::ALL
                    .iter()
                    .filter(|t| theme.entry(**t).tag == tag)
                    .map(|t| t.name())
                    .collect();
                println!(
                    "${tag}  {:<6} {}",
                    code.replace(MARKER, &SHORTHAND.to_string()),
                    names.join(", ")
                );
            }
        }
        Commands::Sync => {
            let mut messages = Messages::new();
            messages.register_messages(OWNER, &MessageGroup::new(OWNER));

            let mut store = pluginbase_store::from_config(&cfg.messages);
            let provider = DefaultMessageProvider::load(
                &messages,
                OWNER,
                store.as_mut(),
                cfg.messages.locale.clone(),
            )?;

            let report = provider.report();
            println!(
                "Language file: {} ({})",
                store.describe(),
                cfg.messages.format.display_name()
            );
            for key in &report.inserted {
                println!("  + {key}");
            }
            for key in &report.repaired {
                println!("  ~ {key}");
            }
            for key in &report.pruned {
                println!("  - {key}");
            }
            let status = if report.is_clean() {
                "up to date"
            } else {
                "updated"
            };
            println!(
                "{} {status}",
                provider.localized(&generic::SUCCESS, &[])
            );
        }
    }

    Ok(())
}

/// Apply the configured theme document, if there is one.
fn load_theme(file: &str) -> anyhow::Result<()> {
    let path = config::shellexpand(file);
    let path = Path::new(&path);
    if !path.exists() {
        debug!("no theme file at {}", path.display());
        return Ok(());
    }
    let document = std::fs::read_to_string(path)?;
    theme::reload_global(&document)?;
    Ok(())
}

/// Interpret a command-line value as the most specific argument type.
fn parse_arg(raw: &str) -> Arg {
    if let Ok(i) = raw.parse::<i64>() {
        Arg::Int(i)
    } else if let Ok(f) = raw.parse::<f64>() {
        Arg::Float(f)
    } else if let Ok(b) = raw.parse::<bool>() {
        Arg::Bool(b)
    } else {
        Arg::Text(raw.to_string())
    }
}
