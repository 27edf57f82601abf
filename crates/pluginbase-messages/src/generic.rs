//! Built-in messages every owner gets.

use std::sync::LazyLock;

use crate::message::Message;
use crate::registry::{DeclarationError, Declarations};
use crate::theme::{self, Theme};

fn themed(key: &str, kind: Theme, text: &str) -> Message {
    let code = theme::global().code(kind);
    Message::create(key, &format!("{code}{text}"), &[])
}

/// Empty static message, returned for lookups without a key.
pub static BLANK: LazyLock<Message> = LazyLock::new(|| Message::create_static("", &[]));

pub static SUCCESS: LazyLock<Message> =
    LazyLock::new(|| themed("generic.success", Theme::Success, "[SUCCESS]"));

pub static ERROR: LazyLock<Message> =
    LazyLock::new(|| themed("generic.error", Theme::Error, "[ERROR]"));

pub static EXCEPTION: LazyLock<Message> =
    LazyLock::new(|| themed("generic.exception", Theme::Plain, "%s"));

pub static CAUSE_EXCEPTION: LazyLock<Message> =
    LazyLock::new(|| themed("generic.cause_exception", Theme::Plain, "Caused by: %s"));

pub static COULD_NOT_LOAD: LazyLock<Message> =
    LazyLock::new(|| Message::create("generic.could_not_load", "Could not load: %s", &[]));

pub static COULD_NOT_SAVE: LazyLock<Message> =
    LazyLock::new(|| Message::create("generic.could_not_save", "Could not save: %s", &[]));

/// Built-in messages that have a key, in file order.
pub fn keyed() -> [&'static Message; 6] {
    [
        &*SUCCESS,
        &*ERROR,
        &*EXCEPTION,
        &*CAUSE_EXCEPTION,
        &*COULD_NOT_LOAD,
        &*COULD_NOT_SAVE,
    ]
}

/// The built-in group. Never registered directly; its keyed messages are
/// seeded into every owner instead.
#[derive(Debug, Default, Clone, Copy)]
pub struct GenericMessages;

impl Declarations for GenericMessages {
    fn group_name(&self) -> &str {
        "generic"
    }

    fn declared(&self) -> Vec<Result<Message, DeclarationError>> {
        std::iter::once(&*BLANK)
            .chain(keyed())
            .map(|m| Ok(m.clone()))
            .collect()
    }

    fn is_builtin(&self) -> bool {
        true
    }
}
