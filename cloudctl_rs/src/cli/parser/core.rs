//! Core parsing logic: the merged flag table and the single parsing pass.

use std::collections::HashMap;

use super::super::failure::Failure;
use super::super::schema::{GlobalOptionSpec, OptionSpec, RESERVED_FLAGS, ValueKind};
use super::super::state::Options;
use super::helpers::{looks_like_flag, split_inline_value};

/// Result of one parsing pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedArgs {
    /// Recognized options by semantic name
    pub options: Options,
    /// Non-flag tokens in original order
    pub positional: Vec<String>,
    /// Flag-like tokens nobody recognized
    pub invalid: Vec<String>,
    /// Tokens eaten by recognized flags (flag and value), plus `--`
    pub consumed: Vec<String>,
}

impl ParsedArgs {
    /// What a handler sees as its args: positional tokens, then the invalid ones.
    pub fn handler_args(&self) -> Vec<String> {
        self.positional
            .iter()
            .chain(self.invalid.iter())
            .cloned()
            .collect()
    }
}

#[derive(Debug, Clone, Copy)]
struct Flag<'a> {
    name: &'a str,
    long: &'a str,
    kind: ValueKind,
}

/// Every flag form mapped to its option. Globals go in first and keep an
/// exact-form collision.
struct FlagTable<'a> {
    flags: HashMap<&'a str, Flag<'a>>,
}

impl<'a> FlagTable<'a> {
    fn build(globals: &'a [GlobalOptionSpec], command: &'a [OptionSpec]) -> Self {
        let mut flags = HashMap::new();

        for spec in globals {
            let kind = spec.kind();
            let long = spec
                .flags()
                .find(|f| f.starts_with("--"))
                .unwrap_or(spec.name.as_str());
            for form in spec.flags() {
                flags.entry(form).or_insert(Flag {
                    name: spec.name.as_str(),
                    long,
                    kind,
                });
            }
        }

        for spec in command {
            for form in spec.flags() {
                flags.entry(form).or_insert(Flag {
                    name: spec.name.as_str(),
                    long: spec.long.as_str(),
                    kind: spec.kind,
                });
            }
        }

        Self { flags }
    }

    fn get(&self, form: &str) -> Option<Flag<'a>> {
        self.flags.get(form).copied()
    }
}

/// Parse `tokens` against the global and command options in one pass.
///
/// Unknown flag-like tokens (including the reserved `-v`/`--version`) are
/// collected and scanning continues. The only hard error is a value-taking
/// flag with no value, reported as `Failure::OptionParse`.
pub fn parse(
    globals: &[GlobalOptionSpec],
    command: &[OptionSpec],
    tokens: &[String],
) -> Result<ParsedArgs, Failure> {
    let table = FlagTable::build(globals, command);
    let mut parsed = ParsedArgs::default();
    let mut i = 0;

    while i < tokens.len() {
        let token = &tokens[i];
        i += 1;

        if token == "--" {
            parsed.consumed.push(token.clone());
            parsed.positional.extend(tokens[i..].iter().cloned());
            break;
        }

        if !looks_like_flag(token) {
            parsed.positional.push(token.clone());
            continue;
        }

        let (form, inline) = split_inline_value(token);
        if RESERVED_FLAGS.contains(&form) {
            tracing::trace!(token = %token, "reserved flag treated as invalid");
            parsed.invalid.push(token.clone());
            continue;
        }

        let Some(flag) = table.get(form) else {
            parsed.invalid.push(token.clone());
            continue;
        };

        match (flag.kind, inline) {
            (ValueKind::Switch, None) => {
                parsed.options.insert(flag.name, "true");
                parsed.consumed.push(token.clone());
            }
            (ValueKind::Switch, Some(_)) => {
                parsed.invalid.push(token.clone());
            }
            (ValueKind::Value, Some(value)) if !value.is_empty() => {
                parsed.options.insert(flag.name, value);
                parsed.consumed.push(token.clone());
            }
            (ValueKind::Value, Some(_)) => return Err(missing_value(flag.long)),
            (ValueKind::Value, None) => match tokens.get(i) {
                Some(value) if !looks_like_flag(value) => {
                    parsed.options.insert(flag.name, value.as_str());
                    parsed.consumed.push(token.clone());
                    parsed.consumed.push(value.clone());
                    i += 1;
                }
                _ => return Err(missing_value(flag.long)),
            },
        }
    }

    tracing::trace!(
        options = parsed.options.len(),
        positional = parsed.positional.len(),
        invalid = parsed.invalid.len(),
        "parsed arguments"
    );
    Ok(parsed)
}

fn missing_value(long: &str) -> Failure {
    Failure::OptionParse(format!("No value provided for option '{long}'"))
}

// ============================================================================
// Tests
// ============================================================================
