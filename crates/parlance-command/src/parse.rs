//! Line parsing and parameter coercion.
//!
//! [`SlashCommandRegistry::try_parse`] turns one input line into a filled
//! command object: extract the command word, resolve it, match the command's
//! compiled grammar, coerce each capture to its declared type, and hand the
//! values to a fresh instance through [`SlashCommand::assign`].

use std::sync::OnceLock;

use parlance_types::error::{ParseError, ParseErrorKind};
use parlance_types::text::CommonText;
use regex::Regex;

use crate::grammar::{self, ParamType, ParameterSpec};
use crate::registry::{SlashCommand, SlashCommandRegistry};

/// A parameter value after coercion, handed to [`SlashCommand::assign`].
#[derive(Debug, Clone, PartialEq)]
pub enum ArgValue {
    Str(String),
    I32(i32),
    U32(u32),
    I64(i64),
    U64(u64),
    F32(f32),
    F64(f64),
    Bool(bool),
    /// Canonical value name from the parameter's [`EnumSpec`](grammar::EnumSpec).
    Enum(&'static str),
}

/// Coerce one captured token to its declared type. Quoted and
/// consume-remaining text passes through verbatim; enum values match their
/// canonical names case-insensitively.
fn coerce(raw: &str, ty: ParamType) -> Option<ArgValue> {
    match ty {
        ParamType::Str => Some(ArgValue::Str(raw.to_string())),
        ParamType::I32 => raw.parse().ok().map(ArgValue::I32),
        ParamType::U32 => raw.parse().ok().map(ArgValue::U32),
        ParamType::I64 => raw.parse().ok().map(ArgValue::I64),
        ParamType::U64 => raw.parse().ok().map(ArgValue::U64),
        ParamType::F32 => raw.parse().ok().map(ArgValue::F32),
        ParamType::F64 => raw.parse().ok().map(ArgValue::F64),
        ParamType::Bool => match raw.to_ascii_lowercase().as_str() {
            "true" => Some(ArgValue::Bool(true)),
            "false" => Some(ArgValue::Bool(false)),
            _ => None,
        },
        ParamType::Enum(spec) => spec
            .values
            .iter()
            .find(|v| v.eq_ignore_ascii_case(raw))
            .copied()
            .map(ArgValue::Enum),
    }
}

/// Word-only pattern used to pick the command out of a line before the
/// command-specific grammar is known.
fn command_word_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^/(?P<command>\w+)").unwrap_or_else(|e| {
            // Literal pattern, cannot fail to compile.
            unreachable!("command word pattern: {e}")
        })
    })
}

impl SlashCommandRegistry {
    /// Interpret one line of input as a slash command.
    ///
    /// Returns the filled command object ready for dispatch, or a localized
    /// [`ParseError`] naming exactly what went wrong.
    pub fn try_parse(&self, line: &str) -> Result<Box<dyn SlashCommand>, ParseError> {
        let word = command_word_pattern()
            .captures(line)
            .and_then(|caps| caps.name("command"))
            .ok_or_else(|| {
                ParseError::new(
                    ParseErrorKind::Unparseable,
                    CommonText::UnableToParseCommand.resolve(self.text.as_ref()),
                )
            })?;
        let upper_word = word.as_str().to_uppercase();

        let index = self.resolve(&upper_word)?;
        let info = &self.infos[index];
        let grammar = &info.grammar;

        let caps = grammar.pattern.captures(line).ok_or_else(|| {
            log::debug!("line rejected by {} grammar: {line:?}", info.display_name);
            ParseError::new(
                ParseErrorKind::Unparseable,
                CommonText::UnableToParseCommand.resolve(self.text.as_ref()),
            )
        })?;

        let mut command = (info.factory)();
        command.on_command_word(&upper_word);

        for (i, spec) in grammar.params.iter().enumerate() {
            let capture = caps
                .name(&grammar::bare_group(i))
                .or_else(|| caps.name(&grammar::quoted_group(i)));
            let Some(capture) = capture else {
                if i < grammar.required {
                    return Err(ParseError::new(
                        ParseErrorKind::MissingParameter,
                        CommonText::MissingParameter.resolve(self.text.as_ref()),
                    ));
                }
                // Optional and absent: the command keeps its default.
                continue;
            };
            let value = self.coerce_capture(capture.as_str(), i, spec, &info.display_name)?;
            command.assign(i, value);
        }

        Ok(command)
    }

    fn coerce_capture(
        &self,
        raw: &str,
        index: usize,
        spec: &ParameterSpec,
        command_name: &str,
    ) -> Result<ArgValue, ParseError> {
        coerce(raw, spec.ty).ok_or_else(|| {
            ParseError::new(
                ParseErrorKind::BadValue,
                CommonText::UnableToParseParameter.resolve_fmt(
                    self.text.as_ref(),
                    &[
                        raw,
                        spec.name,
                        &index.to_string(),
                        spec.ty.name(),
                        command_name,
                    ],
                ),
            )
        })
    }
}
