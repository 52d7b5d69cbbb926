//! Localized text plumbing.
//!
//! The engine never hardcodes user-facing strings: command names, shortcuts,
//! help blurbs, and error templates all come through [`TextLookup`], keyed by
//! the scheme in [`keys`]. Engine-internal templates carry built-in English
//! fallbacks ([`CommonText`]) so an empty lookup table still produces
//! specific messages.

use std::collections::HashMap;

/// Localized text provider for command names, shortcuts, and help.
pub trait TextLookup {
    /// Look up a string by key. `None` when no text is registered.
    fn get_text(&self, key: &str) -> Option<String>;

    /// Look up a format template and substitute `{0}`, `{1}`, ... arguments.
    fn get_text_fmt(&self, key: &str, args: &[&str]) -> Option<String> {
        self.get_text(key).map(|template| format_text(&template, args))
    }
}

/// Destination for command responses and help output.
pub trait OutputSink {
    /// Emit uncategorized text.
    fn emit(&mut self, text: &str);

    /// Emit text tagged with an output category (e.g. a request result).
    fn emit_categorized(&mut self, category: &str, text: &str);
}

/// Map-backed [`TextLookup`] for composition roots and tests.
#[derive(Debug, Default, Clone)]
pub struct TableTextLookup {
    entries: HashMap<String, String>,
}

impl TableTextLookup {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a table from `(key, text)` pairs.
    pub fn from_pairs(pairs: &[(&str, &str)]) -> Self {
        let mut table = Self::new();
        for (key, text) in pairs {
            table.insert(*key, *text);
        }
        table
    }

    pub fn insert(&mut self, key: impl Into<String>, text: impl Into<String>) {
        self.entries.insert(key.into(), text.into());
    }
}

impl TextLookup for TableTextLookup {
    fn get_text(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }
}

/// Substitute `{0}`, `{1}`, ... placeholders in a template.
///
/// Placeholders without a matching argument, and braces that are not part of
/// a `{digits}` sequence, pass through unchanged.
pub fn format_text(template: &str, args: &[&str]) -> String {
    let mut out = String::with_capacity(template.len() + 16);
    let mut rest = template;
    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let tail = &rest[open + 1..];
        match tail.find('}') {
            Some(close)
                if !tail[..close].is_empty()
                    && tail[..close].bytes().all(|b| b.is_ascii_digit()) =>
            {
                match tail[..close].parse::<usize>().ok().and_then(|i| args.get(i)) {
                    Some(arg) => out.push_str(arg),
                    None => {
                        out.push('{');
                        out.push_str(&tail[..close]);
                        out.push('}');
                    },
                }
                rest = &tail[close + 1..];
            },
            _ => {
                out.push('{');
                rest = tail;
            },
        }
    }
    out.push_str(rest);
    out
}

/// Text-key builders for command metadata lookups.
///
/// One key per piece of localizable metadata, derived from the command's
/// symbolic text-id suffix.
pub mod keys {
    /// Display name of a command.
    pub fn command_name(suffix: &str) -> String {
        format!("Command_Name_{suffix}")
    }

    /// Exact-match shortcut of a command. Absence is valid.
    pub fn command_shortcut(suffix: &str) -> String {
        format!("Command_Shortcut_{suffix}")
    }

    /// Per-command help blurb.
    pub fn command_help(suffix: &str) -> String {
        format!("Help_Command_{suffix}")
    }

    /// Display name of one command parameter.
    pub fn command_param(suffix: &str, param: &str) -> String {
        format!("Command_{suffix}_Param_{param}")
    }

    /// Display name of a command group.
    pub fn group_name(group: &str) -> String {
        format!("CommandGroup_{group}")
    }

    /// Help blurb of a command group.
    pub fn group_help(group: &str) -> String {
        format!("Help_CommandGroup_{group}")
    }
}

/// Engine message templates, each with a lookup key and an English fallback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommonText {
    /// General help: `{0}` is the comma-joined group list.
    Help,
    /// `usage:` line under every per-command help text: `{0}` is the usage string.
    HelpUsageCommand,
    /// Marker appended to optional parameters in usage strings.
    HelpOptional,
    /// Placeholder shown for a parameter with no registered display name.
    UndocumentedParameter,
    /// Substitute blurb when a command has no registered help text.
    HelpNoHelp,
    /// Member list under a group's help blurb: `{0}` is the command list.
    HelpCommandGroupCommands,
    /// Unknown help topic: `{0}` is the topic, `{1}` the general help.
    HelpBadInput,
    /// The line did not match the command's grammar.
    UnableToParseCommand,
    /// A required parameter was absent.
    MissingParameter,
    /// Coercion failure: `{0}` value, `{1}` parameter name, `{2}` index,
    /// `{3}` declared type, `{4}` command name.
    UnableToParseParameter,
    /// No command matched: `{0}` is the typed word.
    UnknownCommand,
    /// More than one command matched: `{0}` is the typed word.
    MultipleCommandsMatched,
}

impl CommonText {
    /// The [`TextLookup`] key for this template.
    pub const fn key(self) -> &'static str {
        match self {
            CommonText::Help => "Help",
            CommonText::HelpUsageCommand => "Help_Usage_Command",
            CommonText::HelpOptional => "Help_Optional",
            CommonText::UndocumentedParameter => "Undocumented_Parameter",
            CommonText::HelpNoHelp => "Help_No_Help_For_Command",
            CommonText::HelpCommandGroupCommands => "Help_CommandGroup_Commands",
            CommonText::HelpBadInput => "Help_Bad_Input",
            CommonText::UnableToParseCommand => "Unable_To_Parse_Slash_Command",
            CommonText::MissingParameter => "Slash_Command_Missing_Parameter",
            CommonText::UnableToParseParameter => "Unable_To_Parse_Parameter",
            CommonText::UnknownCommand => "Unknown_Command",
            CommonText::MultipleCommandsMatched => "Multiple_Commands_Matched",
        }
    }

    const fn fallback(self) -> &'static str {
        match self {
            CommonText::Help => {
                "available command groups: {0}\ntype /help [group or command] for details"
            },
            CommonText::HelpUsageCommand => "usage: {0}",
            CommonText::HelpOptional => " (optional)",
            CommonText::UndocumentedParameter => "undocumented parameter",
            CommonText::HelpNoHelp => "no help available for this command",
            CommonText::HelpCommandGroupCommands => "\ncommands: {0}",
            CommonText::HelpBadInput => "no command or group named \"{0}\"\n\n{1}",
            CommonText::UnableToParseCommand => "unable to parse command line",
            CommonText::MissingParameter => "missing required parameter",
            CommonText::UnableToParseParameter => {
                "cannot convert \"{0}\" into parameter {1} (index {2}, type {3}) of command {4}"
            },
            CommonText::UnknownCommand => "unknown command \"{0}\"",
            CommonText::MultipleCommandsMatched => "\"{0}\" matches more than one command",
        }
    }

    /// Resolve through the lookup, falling back to the built-in English text.
    pub fn resolve(self, text: &dyn TextLookup) -> String {
        text.get_text(self.key())
            .unwrap_or_else(|| self.fallback().to_string())
    }

    /// Resolve and substitute `{n}` arguments.
    pub fn resolve_fmt(self, text: &dyn TextLookup, args: &[&str]) -> String {
        format_text(&self.resolve(text), args)
    }
}
