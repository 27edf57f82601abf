//! Runtime lookup of localized message text.

use tracing::{info, warn};

use crate::color::translate_shorthand;
use crate::format::{self, Arg};
use crate::message::{BundledMessage, Message, MessageKey};
use crate::reconcile::{reconcile, ReconcileReport};
use crate::registry::Messages;
use pluginbase_core::{LanguageTree, Locale, PluginBaseError, TreeStore};

/// Character language files use in place of the color marker.
pub const SHORTHAND: char = '&';

/// Turns messages into display text for one locale.
pub trait MessageProvider {
    fn locale(&self) -> &Locale;

    /// Render `message`. Static messages are formatted from their default text.
    fn localized(&self, message: &Message, args: &[Arg]) -> String;

    /// Render the message stored under `key`.
    fn localized_key(&self, key: &MessageKey, args: &[Arg]) -> String;

    fn localized_bundle(&self, bundle: &BundledMessage) -> String {
        self.localized(bundle.message(), bundle.args())
    }
}

/// Provider backed by a reconciled language tree.
#[derive(Debug, Clone)]
pub struct DefaultMessageProvider {
    owner: String,
    locale: Locale,
    tree: LanguageTree,
    report: ReconcileReport,
}

impl DefaultMessageProvider {
    /// Load the owner's language file, bring it in step with the registered
    /// messages, and write it back.
    ///
    /// A file that cannot be loaded is replaced by an empty tree, and a failed
    /// save is only logged. The only error is an owner with no messages.
    pub fn load(
        messages: &Messages,
        owner: &str,
        store: &mut dyn TreeStore,
        locale: Locale,
    ) -> Result<Self, PluginBaseError> {
        let registered = messages.messages(owner)?;

        let mut tree = match store.load() {
            Ok(tree) => tree,
            Err(e) => {
                warn!("problem loading language file {}: {e}", store.describe());
                store.create_empty()
            }
        };

        let report = reconcile(&mut tree, registered);

        if let Err(e) = store.save(&tree) {
            warn!("problem saving language file {}: {e}", store.describe());
        }

        info!(
            "language file {} ready for {owner} ({locale}): {} inserted, {} repaired, {} pruned",
            store.describe(),
            report.inserted.len(),
            report.repaired.len(),
            report.pruned.len()
        );

        Ok(Self {
            owner: owner.to_string(),
            locale,
            tree,
            report,
        })
    }

    pub fn owner(&self) -> &str {
        &self.owner
    }

    /// The reconciled tree this provider serves from.
    pub fn tree(&self) -> &LanguageTree {
        &self.tree
    }

    /// What reconciliation changed when the provider was loaded.
    pub fn report(&self) -> &ReconcileReport {
        &self.report
    }

    fn render(&self, source: &dyn std::fmt::Display, template: &str, args: &[Arg]) -> String {
        let translated = translate_shorthand(SHORTHAND, template);
        match format::format(&self.locale, &translated, args) {
            Ok(text) => text,
            Err(e) => {
                warn!("language string for {source} is incorrect: '{template}': {e}");
                translated
            }
        }
    }
}

impl MessageProvider for DefaultMessageProvider {
    fn locale(&self) -> &Locale {
        &self.locale
    }

    fn localized(&self, message: &Message, args: &[Arg]) -> String {
        match message.key() {
            Some(key) => self.localized_key(key, args),
            None => self.render(&"static message", message.default_text(), args),
        }
    }

    fn localized_key(&self, key: &MessageKey, args: &[Arg]) -> String {
        match self.tree.get_string(key.segments()) {
            Some(template) => self.render(key, template, args),
            None => {
                warn!("no language entry for {key}; was it registered?");
                key.to_string()
            }
        }
    }
}
