//! Foundation types for the parlance command engine.
//!
//! Shared by every crate in the workspace: the error types, the collaborator
//! traits the engine is parameterized over (text lookup, output sink), and
//! the text-key scheme used for localized command names and help.

pub mod error;
pub mod text;

/// Build-time configuration fault (malformed declaration, duplicate name).
pub use error::ConfigError;
/// Recoverable failure to interpret one line of input.
pub use error::{ParseError, ParseErrorKind};
/// Localized text provider for command names, shortcuts, and help.
pub use text::TextLookup;
/// Destination for command responses and help output.
pub use text::OutputSink;
/// Map-backed [`TextLookup`] for composition roots and tests.
pub use text::TableTextLookup;
/// Engine message templates with built-in English fallbacks.
pub use text::CommonText;
/// `{n}` placeholder substitution used by every message template.
pub use text::format_text;
