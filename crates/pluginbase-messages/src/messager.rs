//! Sending localized messages to whoever asked for them.

use tracing::info;

use crate::color::{strip_all, trailing_codes};
use crate::format::Arg;
use crate::generic;
use crate::message::{BundledMessage, Message, MessageKey};
use crate::provider::MessageProvider;
use pluginbase_core::Locale;

/// Something that can be shown lines of text: a player, the console, a buffer.
pub trait MessageReceiver {
    /// Show one line. Never contains a line break.
    fn send_message(&mut self, line: &str);

    /// Players see messages in game; everything else is assumed to read the log.
    fn is_player(&self) -> bool {
        false
    }
}

impl MessageReceiver for Vec<String> {
    fn send_message(&mut self, line: &str) {
        self.push(line.to_string());
    }
}

/// Renders messages through a provider and delivers them line by line.
///
/// Text is split on line breaks. Each line after the first starts with the
/// color and format codes still in effect where the previous line ended.
#[derive(Debug, Clone)]
pub struct Messager<P> {
    provider: P,
}

impl<P: MessageProvider> Messager<P> {
    pub fn new(provider: P) -> Self {
        Self { provider }
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    pub fn into_provider(self) -> P {
        self.provider
    }

    /// Send `message` with no prefix.
    pub fn message(&self, to: &mut dyn MessageReceiver, message: &Message, args: &[Arg]) {
        self.send(to, None, message, args);
    }

    pub fn message_bundle(&self, to: &mut dyn MessageReceiver, bundle: &BundledMessage) {
        self.message(to, bundle.message(), bundle.args());
    }

    /// Send already rendered text.
    pub fn message_text(&self, to: &mut dyn MessageReceiver, text: &str) {
        self.send_lines(to, text.split('\n'));
    }

    /// Send each entry of `lines`, carrying codes from one line to the next.
    pub fn send_lines<'a>(
        &self,
        to: &mut dyn MessageReceiver,
        lines: impl IntoIterator<Item = &'a str>,
    ) {
        let mut carried = String::new();
        for entry in lines {
            for line in entry.split('\n') {
                let line = format!("{carried}{line}");
                carried = trailing_codes(&line);
                to.send_message(&line);
            }
        }
    }

    /// Send `message` after the localized success marker.
    pub fn message_success(&self, to: &mut dyn MessageReceiver, message: &Message, args: &[Arg]) {
        self.send(to, Some(&generic::SUCCESS), message, args);
    }

    pub fn message_success_bundle(&self, to: &mut dyn MessageReceiver, bundle: &BundledMessage) {
        self.message_success(to, bundle.message(), bundle.args());
    }

    pub fn message_success_text(&self, to: &mut dyn MessageReceiver, text: &str) {
        let text = prefixed(&self.provider.localized(&generic::SUCCESS, &[]), text);
        self.message_text(to, &text);
    }

    /// Send `message` after the localized error marker.
    pub fn message_error(&self, to: &mut dyn MessageReceiver, message: &Message, args: &[Arg]) {
        self.send(to, Some(&generic::ERROR), message, args);
    }

    pub fn message_error_bundle(&self, to: &mut dyn MessageReceiver, bundle: &BundledMessage) {
        self.message_error(to, bundle.message(), bundle.args());
    }

    pub fn message_error_text(&self, to: &mut dyn MessageReceiver, text: &str) {
        let text = prefixed(&self.provider.localized(&generic::ERROR, &[]), text);
        self.message_text(to, &text);
    }

    /// Send `message` to players and log it at info level either way.
    ///
    /// The logged copy has its color codes removed.
    pub fn message_and_log(&self, to: &mut dyn MessageReceiver, message: &Message, args: &[Arg]) {
        let text = self.provider.localized(message, args);
        if to.is_player() {
            self.message_text(to, &text);
        }
        info!("{}", strip_all(&text));
    }

    fn send(
        &self,
        to: &mut dyn MessageReceiver,
        prefix: Option<&Message>,
        message: &Message,
        args: &[Arg],
    ) {
        let text = self.provider.localized(message, args);
        let text = match prefix {
            Some(prefix) => prefixed(&self.provider.localized(prefix, &[]), &text),
            None => text,
        };
        self.message_text(to, &text);
    }
}

fn prefixed(prefix: &str, text: &str) -> String {
    if prefix.is_empty() {
        text.to_string()
    } else {
        format!("{prefix} {text}")
    }
}

impl<P: MessageProvider> MessageProvider for Messager<P> {
    fn locale(&self) -> &Locale {
        self.provider.locale()
    }

    fn localized(&self, message: &Message, args: &[Arg]) -> String {
        self.provider.localized(message, args)
    }

    fn localized_key(&self, key: &MessageKey, args: &[Arg]) -> String {
        self.provider.localized_key(key, args)
    }
}
