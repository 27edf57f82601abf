//! Per-owner message registry.
//!
//! Owners declare their messages through [`Declarations`] and register them
//! with [`Messages::register_messages`]. Every owner map is seeded with the
//! keyed built-ins from [`crate::generic`] first; the first message to claim
//! a key keeps it.

#[cfg(test)]
mod tests;

use indexmap::IndexMap;
use std::collections::HashMap;
use thiserror::Error;
use tracing::{debug, trace, warn};

use crate::generic;
use crate::message::{Message, MessageKey};
use pluginbase_core::PluginBaseError;

/// A declared message that could not be read.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("cannot read '{field}': {reason}")]
pub struct DeclarationError {
    pub field: String,
    pub reason: String,
}

/// A group of message declarations, possibly containing nested groups.
pub trait Declarations {
    /// Name used in log lines.
    fn group_name(&self) -> &str;

    /// Every message declared directly in this group, in declaration order.
    fn declared(&self) -> Vec<Result<Message, DeclarationError>>;

    /// Groups declared inside this one.
    fn nested(&self) -> Vec<&dyn Declarations> {
        Vec::new()
    }

    /// True only for the built-in generic group.
    fn is_builtin(&self) -> bool {
        false
    }
}

/// Builder-style [`Declarations`] implementation.
///
/// ```ignore
/// let group = MessageGroup::new("shop")
///     .message(Message::create("shop.bought", "You bought %s", &[]))
///     .group(MessageGroup::new("shop.admin").message(restock));
/// ```
#[derive(Debug, Default)]
pub struct MessageGroup {
    name: String,
    entries: Vec<Result<Message, DeclarationError>>,
    nested: Vec<MessageGroup>,
}

impl MessageGroup {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn message(mut self, message: Message) -> Self {
        self.entries.push(Ok(message));
        self
    }

    /// Declare an entry that cannot be read; registration logs and skips it.
    pub fn unreadable(mut self, field: impl Into<String>, reason: impl Into<String>) -> Self {
        self.entries.push(Err(DeclarationError {
            field: field.into(),
            reason: reason.into(),
        }));
        self
    }

    pub fn group(mut self, nested: MessageGroup) -> Self {
        self.nested.push(nested);
        self
    }
}

impl Declarations for MessageGroup {
    fn group_name(&self) -> &str {
        &self.name
    }

    fn declared(&self) -> Vec<Result<Message, DeclarationError>> {
        self.entries.clone()
    }

    fn nested(&self) -> Vec<&dyn Declarations> {
        self.nested.iter().map(|g| g as &dyn Declarations).collect()
    }
}

/// Registered messages of every owner.
#[derive(Debug, Default)]
pub struct Messages {
    owners: HashMap<String, IndexMap<MessageKey, Message>>,
}

impl Messages {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register every message declared in `group` and its nested groups for
    /// `owner`. Returns how many user messages were accepted.
    pub fn register_messages(&mut self, owner: &str, group: &dyn Declarations) -> usize {
        if group.is_builtin() {
            debug!("not registering built-in group '{}'", group.group_name());
            return 0;
        }
        trace!("registering messages in {} to {owner}", group.group_name());

        let map = self.owners.entry(owner.to_string()).or_default();
        for message in generic::keyed() {
            let Some(key) = message.key() else {
                continue;
            };
            if !map.contains_key(key) {
                trace!("seeding {key} for {owner}");
                map.insert(key.clone(), message.clone());
            }
        }
        register_group(owner, map, group)
    }

    /// Keys registered for `owner`, in registration order.
    pub fn message_keys(&self, owner: &str) -> Result<Vec<&MessageKey>, PluginBaseError> {
        Ok(self.owner_map(owner)?.keys().collect())
    }

    /// The registered message for `key`. A `None` key yields the blank message.
    pub fn get_message(
        &self,
        owner: &str,
        key: Option<&MessageKey>,
    ) -> Result<Option<&Message>, PluginBaseError> {
        let map = self.owner_map(owner)?;
        Ok(match key {
            Some(key) => map.get(key),
            None => Some(&*generic::BLANK),
        })
    }

    pub fn contains_message_key(
        &self,
        owner: &str,
        key: &MessageKey,
    ) -> Result<bool, PluginBaseError> {
        Ok(self.owner_map(owner)?.contains_key(key))
    }

    /// Every `(key, message)` registered for `owner`, in registration order.
    pub fn messages(
        &self,
        owner: &str,
    ) -> Result<impl Iterator<Item = (&MessageKey, &Message)>, PluginBaseError> {
        Ok(self.owner_map(owner)?.iter())
    }

    /// Owners with a registered map, sorted by name.
    pub fn owners(&self) -> Vec<&str> {
        let mut owners: Vec<&str> = self.owners.keys().map(String::as_str).collect();
        owners.sort_unstable();
        owners
    }

    pub fn is_registered(&self, owner: &str) -> bool {
        self.owners.contains_key(owner)
    }

    fn owner_map(&self, owner: &str) -> Result<&IndexMap<MessageKey, Message>, PluginBaseError> {
        self.owners
            .get(owner)
            .ok_or_else(|| PluginBaseError::NotRegistered(owner.to_string()))
    }
}

fn register_group(
    owner: &str,
    map: &mut IndexMap<MessageKey, Message>,
    group: &dyn Declarations,
) -> usize {
    let mut accepted = 0;
    for declared in group.declared() {
        let message = match declared {
            Ok(message) => message,
            Err(e) => {
                warn!("could not register message in {}: {e}", group.group_name());
                continue;
            }
        };
        let Some(key) = message.key().cloned() else {
            trace!("skipping static message in {}", group.group_name());
            continue;
        };
        if key.is_empty() {
            warn!("skipping message with empty key in {}", group.group_name());
            continue;
        }
        if map.contains_key(&key) {
            debug!("rejected duplicate {key} for {owner}");
            continue;
        }
        debug!("registered {key} for {owner}");
        map.insert(key, message);
        accepted += 1;
    }
    for nested in group.nested() {
        if nested.is_builtin() {
            continue;
        }
        accepted += register_group(owner, map, nested);
    }
    accepted
}
