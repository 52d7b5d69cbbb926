//! Parameter grammar compiler.
//!
//! Turns one command's ordered parameter declarations into a single anchored
//! pattern with a named capture group per parameter, plus the usage string
//! shown in help output. Compilation runs once per command at registry build
//! time; the result is immutable afterwards.

use parlance_types::error::ConfigError;
use parlance_types::text::{CommonText, TextLookup, keys};
use regex::Regex;

/// How a declared parameter participates in parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamKind {
    /// Must be present; its clause is mandatory in the pattern.
    Required,
    /// May be absent; its clause is wrapped as optional.
    Optional,
    /// Declared for documentation only; contributes nothing to the pattern.
    Ignored,
}

/// Legal values of an enum-typed parameter.
#[derive(Debug, PartialEq, Eq)]
pub struct EnumSpec {
    /// Type name used in bad-value messages and usage strings.
    pub name: &'static str,
    /// Canonical value names, matched case-insensitively during coercion.
    pub values: &'static [&'static str],
}

/// Target type a captured parameter is coerced into.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ParamType {
    Str,
    I32,
    U32,
    I64,
    U64,
    F32,
    F64,
    Bool,
    Enum(&'static EnumSpec),
}

impl ParamType {
    /// Short type name used in bad-value error messages.
    pub fn name(self) -> &'static str {
        match self {
            ParamType::Str => "string",
            ParamType::I32 => "int32",
            ParamType::U32 => "uint32",
            ParamType::I64 => "int64",
            ParamType::U64 => "uint64",
            ParamType::F32 => "float32",
            ParamType::F64 => "float64",
            ParamType::Bool => "bool",
            ParamType::Enum(spec) => spec.name,
        }
    }
}

/// One declared command parameter.
#[derive(Debug, Clone)]
pub struct ParameterSpec {
    pub name: &'static str,
    pub kind: ParamKind,
    pub ty: ParamType,
    /// Capture every remaining character to end of line, verbatim.
    pub consume_remaining: bool,
}

impl ParameterSpec {
    pub fn required(name: &'static str, ty: ParamType) -> Self {
        Self {
            name,
            kind: ParamKind::Required,
            ty,
            consume_remaining: false,
        }
    }

    pub fn optional(name: &'static str, ty: ParamType) -> Self {
        Self {
            kind: ParamKind::Optional,
            ..Self::required(name, ty)
        }
    }

    pub fn ignored(name: &'static str) -> Self {
        Self {
            kind: ParamKind::Ignored,
            ..Self::required(name, ParamType::Str)
        }
    }

    pub fn consume_remaining(mut self) -> Self {
        self.consume_remaining = true;
        self
    }
}

/// Named capture group for the bareword/remainder form of parameter `index`.
pub(crate) fn bare_group(index: usize) -> String {
    format!("p{}", index + 1)
}

/// Named capture group for the quoted form of parameter `index`.
///
/// The regex crate rejects duplicate group names, so the two alternatives of
/// one logical capture use paired names.
pub(crate) fn quoted_group(index: usize) -> String {
    format!("q{}", index + 1)
}

/// A command's pattern and usage string, compiled once at build time.
#[derive(Debug)]
pub(crate) struct CompiledGrammar {
    pub(crate) pattern: Regex,
    pub(crate) required: usize,
    pub(crate) optional: usize,
    /// Declared parameters in order, `Ignored` ones filtered out.
    pub(crate) params: Vec<ParameterSpec>,
    pub(crate) usage: String,
}

/// Compile ordered parameter declarations into a grammar.
///
/// `command_type` is the declaring Rust type, used only in error values.
pub(crate) fn compile(
    command_type: &'static str,
    display_name: &str,
    text_id_suffix: &str,
    params: &[ParameterSpec],
    allow_symbols: bool,
    text: &dyn TextLookup,
) -> Result<CompiledGrammar, ConfigError> {
    let word_class = if allow_symbols { r"(?:\w|\p{S}|#)" } else { r"\w" };

    let mut pattern = String::from(r"^/(?P<command>\w+)");
    let mut usage = String::from(display_name);
    let mut compiled = Vec::new();
    let mut required = 0usize;
    let mut optional = 0usize;
    let mut remaining_consumed = false;

    for spec in params {
        if remaining_consumed {
            return Err(ConfigError::ParamAfterConsumeRemaining {
                command: command_type,
                param: spec.name,
            });
        }
        if spec.kind == ParamKind::Ignored {
            continue;
        }

        let is_required = spec.kind == ParamKind::Required;
        if is_required && optional > 0 {
            return Err(ConfigError::RequiredAfterOptional {
                command: command_type,
                param: spec.name,
            });
        }
        if spec.consume_remaining {
            remaining_consumed = true;
        }

        let index = compiled.len();
        let bare = bare_group(index);
        if spec.consume_remaining {
            pattern.push_str(&format!(r"(?:\s+(?P<{bare}>[^\r\n]*))"));
        } else {
            // Every word parameter also accepts a double-quoted form.
            let quoted = quoted_group(index);
            pattern.push_str(&format!(
                r#"(?:\s+(?:(?P<{bare}>{word_class}+)|"(?P<{quoted}>.*?)"))"#
            ));
        }
        if !is_required {
            pattern.push('?');
        }

        usage.push_str(" [");
        usage.push_str(&param_display_name(text_id_suffix, spec.name, text));
        if !is_required {
            usage.push_str(&CommonText::HelpOptional.resolve(text));
        }
        if let ParamType::Enum(spec) = spec.ty {
            usage.push_str(" ( ");
            usage.push_str(&spec.values.join(", "));
            usage.push_str(" )");
        }
        usage.push(']');

        if is_required {
            required += 1;
        } else {
            optional += 1;
        }
        compiled.push(spec.clone());
    }

    let pattern = Regex::new(&pattern).map_err(|e| ConfigError::BadPattern {
        command: command_type,
        message: e.to_string(),
    })?;

    Ok(CompiledGrammar {
        pattern,
        required,
        optional,
        params: compiled,
        usage,
    })
}

fn param_display_name(text_id_suffix: &str, param: &str, text: &dyn TextLookup) -> String {
    text.get_text(&keys::command_param(text_id_suffix, param))
        .unwrap_or_else(|| CommonText::UndocumentedParameter.resolve(text))
}

#[cfg(test)]
mod tests {
    use super::*;
    use parlance_types::text::TableTextLookup;

    fn compile_params(params: &[ParameterSpec]) -> Result<CompiledGrammar, ConfigError> {
        compile(
            "tests::Cmd",
            "test",
            "TEST",
            params,
            false,
            &TableTextLookup::new(),
        )
    }

    #[test]
    fn empty_declaration_compiles_word_only_pattern() {
        let grammar = compile_params(&[]).unwrap();
        assert_eq!(grammar.pattern.as_str(), r"^/(?P<command>\w+)");
        assert_eq!(grammar.required, 0);
        assert_eq!(grammar.optional, 0);
        assert_eq!(grammar.usage, "test");
    }

    #[test]
    fn compilation_is_deterministic() {
        let params = [
            ParameterSpec::required("Target", ParamType::Str),
            ParameterSpec::optional("Count", ParamType::I32),
        ];
        let a = compile_params(&params).unwrap();
        let b = compile_params(&params).unwrap();
        assert_eq!(a.pattern.as_str(), b.pattern.as_str());
        assert_eq!(a.usage, b.usage);
    }

    #[test]
    fn required_clause_is_mandatory_optional_is_not() {
        let grammar = compile_params(&[
            ParameterSpec::required("A", ParamType::Str),
            ParameterSpec::optional("B", ParamType::Str),
        ])
        .unwrap();
        assert!(grammar.pattern.is_match("/test one"));
        assert!(grammar.pattern.is_match("/test one two"));
        assert!(!grammar.pattern.is_match("/test"));
    }

    #[test]
    fn quoted_alternative_captures_without_quotes() {
        let grammar =
            compile_params(&[ParameterSpec::required("Text", ParamType::Str)]).unwrap();
        let caps = grammar.pattern.captures("/test \"hello there\"").unwrap();
        assert!(caps.name("p1").is_none());
        assert_eq!(caps.name("q1").unwrap().as_str(), "hello there");
    }

    #[test]
    fn every_word_parameter_accepts_the_quoted_form() {
        let grammar = compile_params(&[
            ParameterSpec::required("A", ParamType::Str),
            ParameterSpec::optional("B", ParamType::Str),
        ])
        .unwrap();
        let caps = grammar.pattern.captures("/test \"one two\" \"three\"").unwrap();
        assert_eq!(caps.name("q1").unwrap().as_str(), "one two");
        assert_eq!(caps.name("q2").unwrap().as_str(), "three");
    }

    #[test]
    fn bareword_rejects_symbols_unless_allowed() {
        let plain = compile_params(&[ParameterSpec::required("Name", ParamType::Str)]).unwrap();
        let caps = plain.pattern.captures("/test a+b").unwrap();
        // `\w` stops at the symbol.
        assert_eq!(caps.name("p1").unwrap().as_str(), "a");

        let symbols = compile(
            "tests::Cmd",
            "test",
            "TEST",
            &[ParameterSpec::required("Name", ParamType::Str)],
            true,
            &TableTextLookup::new(),
        )
        .unwrap();
        let caps = symbols.pattern.captures("/test a+b#2").unwrap();
        assert_eq!(caps.name("p1").unwrap().as_str(), "a+b#2");
    }

    #[test]
    fn consume_remaining_captures_verbatim() {
        let grammar = compile_params(&[
            ParameterSpec::required("Text", ParamType::Str).consume_remaining(),
        ])
        .unwrap();
        let caps = grammar
            .pattern
            .captures("/test \"not a quote group\" + #stuff ")
            .unwrap();
        assert_eq!(
            caps.name("p1").unwrap().as_str(),
            "\"not a quote group\" + #stuff "
        );
    }

    #[test]
    fn ignored_params_are_skipped() {
        let grammar = compile_params(&[
            ParameterSpec::ignored("Internal"),
            ParameterSpec::required("Level", ParamType::I32),
        ])
        .unwrap();
        assert_eq!(grammar.params.len(), 1);
        assert_eq!(grammar.params[0].name, "Level");
        assert_eq!(grammar.required, 1);
    }

    #[test]
    fn param_after_consume_remaining_rejected() {
        let err = compile_params(&[
            ParameterSpec::required("Text", ParamType::Str).consume_remaining(),
            ParameterSpec::optional("Extra", ParamType::Str),
        ])
        .unwrap_err();
        assert!(matches!(err, ConfigError::ParamAfterConsumeRemaining { param: "Extra", .. }));
    }

    #[test]
    fn required_after_optional_rejected() {
        let err = compile_params(&[
            ParameterSpec::optional("A", ParamType::Str),
            ParameterSpec::required("B", ParamType::Str),
        ])
        .unwrap_err();
        assert!(matches!(err, ConfigError::RequiredAfterOptional { param: "B", .. }));
    }

    #[test]
    fn usage_marks_optionals_and_lists_enum_values() {
        static COLOR: EnumSpec = EnumSpec {
            name: "Color",
            values: &["Red", "Green", "Blue"],
        };
        let text = TableTextLookup::from_pairs(&[
            ("Command_TEST_Param_Target", "Target"),
            ("Command_TEST_Param_Color", "Color"),
        ]);
        let grammar = compile(
            "tests::Cmd",
            "test",
            "TEST",
            &[
                ParameterSpec::required("Target", ParamType::Str),
                ParameterSpec::optional("Color", ParamType::Enum(&COLOR)),
            ],
            false,
            &text,
        )
        .unwrap();
        assert_eq!(
            grammar.usage,
            "test [Target] [Color (optional) ( Red, Green, Blue )]"
        );
    }

    #[test]
    fn unnamed_param_shows_undocumented_placeholder() {
        let grammar = compile_params(&[ParameterSpec::required("Target", ParamType::Str)]).unwrap();
        assert_eq!(grammar.usage, "test [undocumented parameter]");
    }

    #[test]
    fn usage_prefers_localized_param_names() {
        let text = TableTextLookup::from_pairs(&[("Command_TEST_Param_Target", "who")]);
        let grammar = compile(
            "tests::Cmd",
            "test",
            "TEST",
            &[ParameterSpec::required("Target", ParamType::Str)],
            false,
            &text,
        )
        .unwrap();
        assert_eq!(grammar.usage, "test [who]");
    }
}
