//! Message catalog: declared message templates, color themes, and language
//! files kept in step with what a program registers.

pub mod color;
pub mod exception;
pub mod format;
pub mod generic;
pub mod message;
pub mod messager;
pub mod provider;
pub mod reconcile;
pub mod registry;
pub mod theme;

pub use color::ColorCode;
pub use exception::LocalizedError;
pub use format::{Arg, FormatError};
pub use message::{count_args, BundledMessage, Message, MessageKey};
pub use messager::{MessageReceiver, Messager};
pub use provider::{DefaultMessageProvider, MessageProvider};
pub use reconcile::{reconcile, ReconcileReport};
pub use registry::{DeclarationError, Declarations, MessageGroup, Messages};
pub use theme::{Theme, ThemeRegistry};
