//! Command registry: declaration, one-time build, resolution, and help.
//!
//! The registry follows a build-then-freeze discipline. A [`RegistryBuilder`]
//! runs single-threaded at startup, validating every declaration and
//! compiling its grammar; the frozen [`SlashCommandRegistry`] is read-only
//! and safe to share across threads (help text is computed lazily behind
//! `OnceLock`).

use std::any::TypeId;
use std::collections::HashMap;
use std::fmt;
use std::sync::OnceLock;

use parlance_types::error::{ConfigError, ParseError, ParseErrorKind};
use parlance_types::text::{CommonText, TextLookup, keys};

use crate::dispatch::Handleable;
use crate::grammar::{self, CompiledGrammar, ParameterSpec};
use crate::parse::ArgValue;

/// Uppercased, comparable key naming a command group.
///
/// Applications with a fixed set of groups convert their own enum through
/// `Into<GroupKey>`; free-form strings work directly.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GroupKey(String);

impl GroupKey {
    pub fn new(key: impl AsRef<str>) -> Self {
        Self(key.as_ref().to_uppercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for GroupKey {
    fn from(key: &str) -> Self {
        Self::new(key)
    }
}

impl From<String> for GroupKey {
    fn from(key: String) -> Self {
        Self::new(key)
    }
}

impl fmt::Display for GroupKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A command's complete self-description, returned by
/// [`SlashCommand::declaration`] and evaluated once at registry build time.
#[derive(Debug, Clone)]
pub struct CommandDeclaration {
    /// Symbolic suffix keying every localized text lookup for this command.
    /// Doubles as the display name when no localization is registered.
    pub text_id_suffix: &'static str,
    pub group: Option<GroupKey>,
    /// Permit symbol characters and `#` in bareword parameters.
    pub allow_symbols: bool,
    pub params: Vec<ParameterSpec>,
}

impl CommandDeclaration {
    pub fn new(text_id_suffix: &'static str) -> Self {
        Self {
            text_id_suffix,
            group: None,
            allow_symbols: false,
            params: Vec::new(),
        }
    }

    pub fn group(mut self, key: impl Into<GroupKey>) -> Self {
        self.group = Some(key.into());
        self
    }

    pub fn allow_symbols(mut self) -> Self {
        self.allow_symbols = true;
        self
    }

    pub fn param(mut self, spec: ParameterSpec) -> Self {
        self.params.push(spec);
        self
    }
}

/// A command type the registry can construct, fill, and dispatch.
///
/// Implementors are plain data carriers: `Default` supplies the parameter
/// defaults, [`assign`](Self::assign) stores coerced values, and the
/// [`Handleable`] supertrait makes finished objects dispatchable.
pub trait SlashCommand: Handleable + fmt::Debug {
    /// Describe this command's text-id suffix, group, and parameters.
    fn declaration() -> CommandDeclaration
    where
        Self: Sized;

    /// Store one coerced parameter value. `index` counts declared,
    /// non-ignored parameters in order.
    fn assign(&mut self, index: usize, value: ArgValue);

    /// Called with the uppercased command word the user actually typed.
    /// The numeric fallback command receives its number through this.
    fn on_command_word(&mut self, _word: &str) {}
}

/// Immutable compiled record for one registered command.
pub(crate) struct CommandInfo {
    pub(crate) type_id: TypeId,
    pub(crate) type_name: &'static str,
    pub(crate) display_name: String,
    pub(crate) grammar: CompiledGrammar,
    pub(crate) help: String,
    pub(crate) factory: fn() -> Box<dyn SlashCommand>,
}

/// Ordered member list for one command group, with lazily built help text.
pub struct CommandGroup {
    key: GroupKey,
    label: String,
    members: Vec<usize>,
    help: OnceLock<String>,
}

impl CommandGroup {
    pub fn key(&self) -> &GroupKey {
        &self.key
    }

    /// Localized group label shown in the general help listing.
    pub fn label(&self) -> &str {
        &self.label
    }

    fn help<'a>(&'a self, registry: &'a SlashCommandRegistry) -> &'a str {
        self.help.get_or_init(|| {
            let names: Vec<&str> = self
                .members
                .iter()
                .map(|&i| registry.infos[i].display_name.as_str())
                .collect();
            let blurb = registry
                .text
                .get_text(&keys::group_help(self.key.as_str()))
                .unwrap_or_default();
            let list = CommonText::HelpCommandGroupCommands
                .resolve_fmt(registry.text.as_ref(), &[&names.join(", ")]);
            format!("{blurb}{list}")
        })
    }
}

fn make_command<C: SlashCommand + Default + 'static>() -> Box<dyn SlashCommand> {
    Box::new(C::default())
}

fn build_help(text_id_suffix: &str, usage: &str, text: &dyn TextLookup) -> String {
    let blurb = text
        .get_text(&keys::command_help(text_id_suffix))
        .unwrap_or_else(|| CommonText::HelpNoHelp.resolve(text));
    let usage_line = CommonText::HelpUsageCommand.resolve_fmt(text, &[usage]);
    format!("{blurb}\n\n{usage_line}")
}

/// Single-threaded startup builder for a [`SlashCommandRegistry`].
pub struct RegistryBuilder {
    text: Box<dyn TextLookup + Send + Sync>,
    infos: Vec<CommandInfo>,
    by_name: HashMap<String, usize>,
    by_shortcut: HashMap<String, usize>,
    groups: Vec<CommandGroup>,
    group_index: HashMap<GroupKey, usize>,
}

impl fmt::Debug for RegistryBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegistryBuilder")
            .field("commands", &self.infos.len())
            .field("groups", &self.groups.len())
            .finish_non_exhaustive()
    }
}

impl RegistryBuilder {
    pub fn new(text: Box<dyn TextLookup + Send + Sync>) -> Self {
        Self {
            text,
            infos: Vec::new(),
            by_name: HashMap::new(),
            by_shortcut: HashMap::new(),
            groups: Vec::new(),
            group_index: HashMap::new(),
        }
    }

    /// Declare one command type: resolve its localized name and shortcut,
    /// validate global uniqueness, and compile its grammar.
    pub fn declare<C>(&mut self) -> Result<&mut Self, ConfigError>
    where
        C: SlashCommand + Default + 'static,
    {
        let decl = C::declaration();
        let command_type = std::any::type_name::<C>();

        let display_name = self
            .text
            .get_text(&keys::command_name(decl.text_id_suffix))
            .unwrap_or_else(|| decl.text_id_suffix.to_string());
        let upper_name = display_name.to_uppercase();
        let shortcut = self
            .text
            .get_text(&keys::command_shortcut(decl.text_id_suffix))
            .map(|s| s.to_uppercase())
            .filter(|s| !s.is_empty());

        if upper_name.is_empty() {
            return Err(ConfigError::EmptyName {
                command: command_type,
            });
        }
        if upper_name.parse::<i32>().is_ok() {
            return Err(ConfigError::NumericName {
                command: command_type,
                name: display_name,
            });
        }
        if shortcut.as_deref() == Some(upper_name.as_str()) {
            return Err(ConfigError::NameEqualsShortcut {
                command: command_type,
                name: display_name,
            });
        }
        if let Some(&existing) = self
            .by_name
            .get(&upper_name)
            .or_else(|| self.by_shortcut.get(&upper_name))
        {
            return Err(ConfigError::DuplicateName {
                command: command_type,
                name: display_name,
                existing: self.infos[existing].type_name,
            });
        }
        if let Some(shortcut) = &shortcut {
            if shortcut.parse::<i32>().is_ok() {
                return Err(ConfigError::NumericShortcut {
                    command: command_type,
                    shortcut: shortcut.clone(),
                });
            }
            if let Some(&existing) = self
                .by_name
                .get(shortcut)
                .or_else(|| self.by_shortcut.get(shortcut))
            {
                return Err(ConfigError::DuplicateShortcut {
                    command: command_type,
                    shortcut: shortcut.clone(),
                    existing: self.infos[existing].type_name,
                });
            }
        }

        let grammar = grammar::compile(
            command_type,
            &display_name,
            decl.text_id_suffix,
            &decl.params,
            decl.allow_symbols,
            self.text.as_ref(),
        )?;
        let help = build_help(decl.text_id_suffix, &grammar.usage, self.text.as_ref());

        let index = self.infos.len();
        if let Some(key) = decl.group.clone() {
            let group_index = *self.group_index.entry(key.clone()).or_insert_with(|| {
                let label = self
                    .text
                    .get_text(&keys::group_name(key.as_str()))
                    .unwrap_or_else(|| key.as_str().to_string());
                log::debug!("created command group {key} ({label})");
                self.groups.push(CommandGroup {
                    key,
                    label,
                    members: Vec::new(),
                    help: OnceLock::new(),
                });
                self.groups.len() - 1
            });
            self.groups[group_index].members.push(index);
        }

        log::debug!("declared slash command {display_name} ({command_type})");
        self.by_name.insert(upper_name, index);
        if let Some(shortcut) = shortcut {
            self.by_shortcut.insert(shortcut, index);
        }
        self.infos.push(CommandInfo {
            type_id: TypeId::of::<C>(),
            type_name: command_type,
            display_name,
            grammar,
            help,
            factory: make_command::<C>,
        });
        Ok(self)
    }

    /// Freeze into the read-only registry.
    pub fn build(self) -> SlashCommandRegistry {
        SlashCommandRegistry {
            text: self.text,
            infos: self.infos,
            by_name: self.by_name,
            by_shortcut: self.by_shortcut,
            groups: self.groups,
            general_help: OnceLock::new(),
        }
    }
}

/// Frozen command registry: resolution, parsing, and help are read-only.
pub struct SlashCommandRegistry {
    pub(crate) text: Box<dyn TextLookup + Send + Sync>,
    pub(crate) infos: Vec<CommandInfo>,
    by_name: HashMap<String, usize>,
    by_shortcut: HashMap<String, usize>,
    groups: Vec<CommandGroup>,
    general_help: OnceLock<String>,
}

impl SlashCommandRegistry {
    /// Resolve an uppercased command word to a registered command.
    ///
    /// Shortcuts match exactly and are never prefix-matched. Names match by
    /// unique prefix; a tie is ambiguous even when one candidate is an exact
    /// full-name match. An unmatched integer token falls back to the `#`
    /// command when one is registered.
    pub(crate) fn resolve(&self, upper_word: &str) -> Result<usize, ParseError> {
        if let Some(&index) = self.by_shortcut.get(upper_word) {
            return Ok(index);
        }

        let mut matched = None;
        let mut match_count = 0usize;
        for (name, &index) in &self.by_name {
            if name.starts_with(upper_word) {
                matched = Some(index);
                match_count += 1;
            }
        }

        match match_count {
            1 => Ok(matched.unwrap_or_default()),
            0 => {
                if upper_word.parse::<i32>().is_ok()
                    && let Some(&index) = self.by_name.get("#")
                {
                    return Ok(index);
                }
                Err(ParseError::new(
                    ParseErrorKind::UnknownCommand,
                    CommonText::UnknownCommand.resolve_fmt(self.text.as_ref(), &[upper_word]),
                ))
            },
            _ => Err(ParseError::new(
                ParseErrorKind::AmbiguousCommand,
                CommonText::MultipleCommandsMatched.resolve_fmt(self.text.as_ref(), &[upper_word]),
            )),
        }
    }

    /// Whether command type `C` was declared into this registry.
    pub fn has_command<C: SlashCommand + 'static>(&self) -> bool {
        self.infos.iter().any(|info| info.type_id == TypeId::of::<C>())
    }

    /// Registered groups in declaration order.
    pub fn groups(&self) -> impl Iterator<Item = &CommandGroup> {
        self.groups.iter()
    }

    /// Help text for a group, a command name, or (with no topic) the general
    /// group listing. Groups and command names share one namespace; groups
    /// are consulted first. An unmatched topic wraps the general help in the
    /// bad-input template.
    pub fn help_text(&self, topic: Option<&str>) -> String {
        let Some(topic) = topic.filter(|t| !t.is_empty()) else {
            return self.general_help().to_string();
        };
        let upper = topic.to_uppercase();
        if let Some(group) = self.groups.iter().find(|g| g.key.as_str() == upper) {
            return group.help(self).to_string();
        }
        if let Some(&index) = self.by_name.get(&upper) {
            return self.infos[index].help.clone();
        }
        CommonText::HelpBadInput.resolve_fmt(self.text.as_ref(), &[topic, self.general_help()])
    }

    fn general_help(&self) -> &str {
        self.general_help.get_or_init(|| {
            let labels: Vec<&str> = self.groups.iter().map(|g| g.label.as_str()).collect();
            CommonText::Help.resolve_fmt(self.text.as_ref(), &[&labels.join(", ")])
        })
    }
}
