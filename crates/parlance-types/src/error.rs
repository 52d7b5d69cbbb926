//! Error types for the parlance command engine.

/// Errors raised while declaring commands or registering handlers.
///
/// These are programming mistakes in command metadata, surfaced once during
/// the startup build pass. End-user input can never produce one.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("command {command}: empty display name")]
    EmptyName { command: &'static str },

    #[error("command {command}: numeric name {name:?} is reserved for the numeric fallback")]
    NumericName { command: &'static str, name: String },

    #[error("command {command}: numeric shortcut {shortcut:?} is not allowed")]
    NumericShortcut { command: &'static str, shortcut: String },

    #[error("command {command}: name and shortcut are both {name:?}")]
    NameEqualsShortcut { command: &'static str, name: String },

    #[error("command {command}: name {name:?} already in use by {existing}")]
    DuplicateName {
        command: &'static str,
        name: String,
        existing: &'static str,
    },

    #[error("command {command}: shortcut {shortcut:?} already in use by {existing}")]
    DuplicateShortcut {
        command: &'static str,
        shortcut: String,
        existing: &'static str,
    },

    #[error("command {command}: parameter {param:?} declared after a consume-remaining parameter")]
    ParamAfterConsumeRemaining {
        command: &'static str,
        param: &'static str,
    },

    #[error("command {command}: required parameter {param:?} declared after an optional parameter")]
    RequiredAfterOptional {
        command: &'static str,
        param: &'static str,
    },

    #[error("command {command}: generated pattern failed to compile: {message}")]
    BadPattern {
        command: &'static str,
        message: String,
    },

    #[error("duplicate handler registered for {type_name}")]
    DuplicateHandler { type_name: &'static str },
}

/// Which grammar rule an input line violated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseErrorKind {
    /// The line did not match the command's compiled pattern.
    Unparseable,
    /// A capture inside the required-parameter range was absent.
    MissingParameter,
    /// Captured text could not be coerced to the declared parameter type.
    BadValue,
    /// No registered name or shortcut matched the command word.
    UnknownCommand,
    /// The command word prefix-matched more than one registered name.
    AmbiguousCommand,
}

/// A failure to interpret one line of user input.
///
/// Recovered locally by the caller; `message` is already localized and names
/// the offending token or parameter.
#[derive(Debug, Clone, thiserror::Error)]
#[error("{message}")]
pub struct ParseError {
    pub kind: ParseErrorKind,
    pub message: String,
}

impl ParseError {
    pub fn new(kind: ParseErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}
