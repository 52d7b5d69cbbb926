//! Declarative slash-command engine.
//!
//! Commands are plain types implementing [`SlashCommand`]: each declares its
//! parameters once, and the registry compiles that declaration into an
//! anchored pattern at build time. At runtime a line of input is resolved to
//! a command (exact shortcut, unique name prefix, or numeric fallback),
//! matched against the compiled grammar, coerced parameter by parameter, and
//! dispatched to the handler registered for the command's concrete type.
//!
//! The registry is built once at startup and frozen; parsing and help are
//! read-only afterwards, so one registry serves every worker thread. Handler
//! registries are per worker and may hold mutable state.

pub mod dispatch;
pub mod grammar;
pub mod help;
pub mod parse;
pub mod registry;

/// Dispatchable object recoverable as its concrete type.
pub use dispatch::Handleable;
/// A type-to-handler pairing ready to install.
pub use dispatch::HandlerEntry;
/// Per-worker table routing parsed commands to handlers.
pub use dispatch::HandlerRegistry;
/// Legal values of an enum-typed parameter.
pub use grammar::EnumSpec;
/// Required, optional, or documentation-only.
pub use grammar::ParamKind;
/// Target type a captured parameter is coerced into.
pub use grammar::ParamType;
/// One declared command parameter.
pub use grammar::ParameterSpec;
/// Built-in `/help [topic]` command.
pub use help::HelpCommand;
/// Output category attached to help responses.
pub use help::REQUEST_RESULT;
/// Handler entry answering help requests against a shared registry.
pub use help::help_handler_entry;
/// Coerced parameter value handed to `SlashCommand::assign`.
pub use parse::ArgValue;
/// A command's complete self-description.
pub use registry::CommandDeclaration;
/// Ordered member list for one command group.
pub use registry::CommandGroup;
/// Uppercased key naming a command group.
pub use registry::GroupKey;
/// Startup builder validating declarations and compiling grammars.
pub use registry::RegistryBuilder;
/// A command type the registry can construct, fill, and dispatch.
pub use registry::SlashCommand;
/// Frozen registry: resolution, parsing, and help.
pub use registry::SlashCommandRegistry;
