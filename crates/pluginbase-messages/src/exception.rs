//! Errors that carry a translatable message.

use std::fmt;
use tracing::{debug, error, info, trace, warn, Level};

use crate::format::Arg;
use crate::generic::{CAUSE_EXCEPTION, EXCEPTION};
use crate::message::{BundledMessage, Message};
use crate::provider::MessageProvider;

/// An error whose text is a [`BundledMessage`], with an optional cause chain.
#[derive(Debug, Clone)]
pub struct LocalizedError {
    bundle: BundledMessage,
    cause: Option<Box<LocalizedError>>,
}

impl LocalizedError {
    pub fn new(bundle: BundledMessage) -> Self {
        Self {
            bundle,
            cause: None,
        }
    }

    /// Error with fixed, untranslated text.
    pub fn from_text(text: &str) -> Self {
        Self::new(Message::create_static(text, &[]).bundle(Vec::new()))
    }

    pub fn with_cause(bundle: BundledMessage, cause: LocalizedError) -> Self {
        Self {
            bundle,
            cause: Some(Box::new(cause)),
        }
    }

    /// Wrap any error, keeping its source chain as causes.
    pub fn from_error(err: &(dyn std::error::Error + 'static)) -> Self {
        let bundle = EXCEPTION.bundle(vec![Arg::from(err.to_string())]);
        Self {
            bundle,
            cause: err.source().map(|source| Box::new(Self::from_error(source))),
        }
    }

    pub fn bundle(&self) -> &BundledMessage {
        &self.bundle
    }

    pub fn cause(&self) -> Option<&LocalizedError> {
        self.cause.as_deref()
    }

    /// Causes from the nearest to the root.
    pub fn causes(&self) -> impl Iterator<Item = &LocalizedError> {
        std::iter::successors(self.cause(), |e| e.cause())
    }

    /// The message text rendered through `provider`.
    pub fn localized(&self, provider: &dyn MessageProvider) -> String {
        provider.localized_bundle(&self.bundle)
    }

    /// Log this error and one `Caused by:` line per cause.
    pub fn log_chain(&self, level: Level) {
        emit(level, &self.to_string());
        for cause in self.causes() {
            let line = CAUSE_EXCEPTION.bundle(vec![Arg::from(cause.to_string())]);
            emit(level, &line.default_text());
        }
    }
}

fn emit(level: Level, line: &str) {
    if level == Level::ERROR {
        error!("{line}");
    } else if level == Level::WARN {
        warn!("{line}");
    } else if level == Level::INFO {
        info!("{line}");
    } else if level == Level::DEBUG {
        debug!("{line}");
    } else {
        trace!("{line}");
    }
}

impl fmt::Display for LocalizedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.bundle.default_text())
    }
}

impl std::error::Error for LocalizedError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.cause
            .as_deref()
            .map(|cause| cause as &(dyn std::error::Error + 'static))
    }
}
