//! Keeps a language tree in step with the registered messages.

use std::collections::HashSet;
use tracing::{debug, warn};

use crate::message::{count_args, Message, MessageKey};
use pluginbase_core::LanguageTree;

/// What a reconciliation pass changed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReconcileReport {
    /// Keys that were missing and got their default text.
    pub inserted: Vec<MessageKey>,
    /// Keys whose stored text was replaced by the default text.
    pub repaired: Vec<MessageKey>,
    /// Leaves removed because no message is registered for them.
    pub pruned: Vec<MessageKey>,
}

impl ReconcileReport {
    /// True when the pass changed nothing.
    pub fn is_clean(&self) -> bool {
        self.inserted.is_empty() && self.repaired.is_empty() && self.pruned.is_empty()
    }
}

/// Insert missing messages, repair entries whose placeholder count no longer
/// matches, then prune leaves that belong to no registered message.
///
/// Running it twice with the same messages leaves the second report clean.
pub fn reconcile<'a>(
    tree: &mut LanguageTree,
    messages: impl IntoIterator<Item = (&'a MessageKey, &'a Message)>,
) -> ReconcileReport {
    let mut report = ReconcileReport::default();
    let messages: Vec<_> = messages.into_iter().collect();
    let registered: HashSet<&MessageKey> = messages.iter().map(|(key, _)| *key).collect();

    for (key, message) in messages.iter().copied() {
        prune_leaves_on_path(tree, key, &registered, &mut report);
        let node = tree.get_or_create_node(key.segments());
        if node.is_virgin() {
            debug!("adding {key} to language file");
            node.set_string(message.default_text());
            report.inserted.push(key.clone());
            continue;
        }
        match node.get_string() {
            Some(stored) => {
                let found = count_args(stored);
                if found != message.arg_count() {
                    warn!(
                        "language entry {key} has {found} argument(s), expected {}; restoring default",
                        message.arg_count()
                    );
                    node.set_string(message.default_text());
                    report.repaired.push(key.clone());
                }
            }
            None => {
                warn!("language entry {key} is a section, not a message; restoring default");
                node.set_string(message.default_text());
                report.repaired.push(key.clone());
            }
        }
    }

    for path in tree.leaves() {
        let key = MessageKey::from(path);
        if registered.contains(&key) {
            continue;
        }
        debug!("removing unregistered {key} from language file");
        tree.remove(key.segments());
        report.pruned.push(key);
    }

    report
}

/// Report unregistered leaves sitting where `key` needs a section.
///
/// Creating the node for `key` turns such a leaf into a branch, which drops
/// its text.
fn prune_leaves_on_path(
    tree: &LanguageTree,
    key: &MessageKey,
    registered: &HashSet<&MessageKey>,
    report: &mut ReconcileReport,
) {
    let segments = key.segments();
    for end in 1..segments.len() {
        let prefix = &segments[..end];
        if tree.get_string(prefix).is_none() {
            continue;
        }
        let stale = MessageKey::from(prefix.to_vec());
        if registered.contains(&stale) {
            continue;
        }
        debug!("removing unregistered {stale} from language file to make room for {key}");
        report.pruned.push(stale);
    }
}
