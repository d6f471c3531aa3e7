//! Option descriptors for global and per-command flags.
//!
//! Descriptors carry no behavior beyond describing a flag, except for the
//! optional `on_parse` callback on global options.

use std::fmt;
use std::sync::Arc;

/// Flags intercepted by the parser and always reported as invalid. The
/// dispatcher turns a bare `cloudctl --version` into the `version` command.
pub const RESERVED_FLAGS: &[&str] = &["--version", "-v"];

/// Flags that redirect any invocation to `help`.
pub const HELP_FLAGS: &[&str] = &["--help", "-h"];

/// Whether a flag stands alone or consumes a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    /// `--force`
    Switch,
    /// `--api-key KEY`, `--api-key=KEY`
    Value,
}

/// Callback run with the parsed value of a global option.
pub type OnParse = Arc<dyn Fn(&str) + Send + Sync>;

/// Turn a flag or option name into its semantic name: `--api-key` -> `api_key`.
pub fn normalize_name(flag: &str) -> String {
    flag.trim_start_matches('-').replace('-', "_")
}

/// A command-specific option.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionSpec {
    pub name: String,
    pub short: Option<String>,
    pub long: String,
    pub description: String,
    pub kind: ValueKind,
    /// Placeholder shown in help for value-taking options
    pub value_name: Option<String>,
}

impl OptionSpec {
    /// A boolean flag. `long` is given with its dashes (`--force`).
    pub fn switch(long: &str, description: &str) -> Self {
        Self {
            name: normalize_name(long),
            short: None,
            long: long.to_string(),
            description: description.to_string(),
            kind: ValueKind::Switch,
            value_name: None,
        }
    }

    /// A flag taking one value.
    pub fn value(long: &str, value_name: &str, description: &str) -> Self {
        Self {
            kind: ValueKind::Value,
            value_name: Some(value_name.to_string()),
            ..Self::switch(long, description)
        }
    }

    /// Attach a short form (`-f`).
    pub fn short(mut self, short: &str) -> Self {
        self.short = Some(short.to_string());
        self
    }

    /// Every form this option answers to, long form first.
    pub fn flags(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.long.as_str()).chain(self.short.as_deref())
    }

    /// `-k, --api-key KEY`
    pub fn usage(&self) -> String {
        let mut usage = match &self.short {
            Some(short) => format!("{}, {}", short, self.long),
            None => format!("    {}", self.long),
        };
        if let Some(value) = &self.value_name {
            usage.push(' ');
            usage.push_str(value);
        }
        usage
    }
}

/// A flag recognized by every command.
#[derive(Clone)]
pub struct GlobalOptionSpec {
    pub name: String,
    /// Flag forms in registration order; a form with a placeholder
    /// (`--project PROJECT`) takes a value.
    pub flag_forms: Vec<String>,
    pub description: String,
    pub on_parse: Option<OnParse>,
}

impl fmt::Debug for GlobalOptionSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GlobalOptionSpec")
            .field("name", &self.name)
            .field("flag_forms", &self.flag_forms)
            .field("description", &self.description)
            .field("on_parse", &self.on_parse.is_some())
            .finish()
    }
}

impl GlobalOptionSpec {
    pub fn new(name: &str, flag_forms: &[&str], description: &str) -> Self {
        Self {
            name: normalize_name(name),
            flag_forms: flag_forms.iter().map(|f| f.to_string()).collect(),
            description: description.to_string(),
            on_parse: None,
        }
    }

    pub fn on_parse(mut self, callback: impl Fn(&str) + Send + Sync + 'static) -> Self {
        self.on_parse = Some(Arc::new(callback));
        self
    }

    /// The bare flags, placeholders stripped: `--project PROJECT` -> `--project`.
    pub fn flags(&self) -> impl Iterator<Item = &str> {
        self.flag_forms
            .iter()
            .filter_map(|form| form.split_whitespace().next())
    }

    pub fn kind(&self) -> ValueKind {
        if self
            .flag_forms
            .iter()
            .any(|form| form.split_whitespace().nth(1).is_some())
        {
            ValueKind::Value
        } else {
            ValueKind::Switch
        }
    }

    /// `-p, --project PROJECT`
    pub fn usage(&self) -> String {
        let mut forms: Vec<&str> = self.flag_forms.iter().map(String::as_str).collect();
        forms.sort_by_key(|form| form.starts_with("--"));
        forms.join(", ")
    }
}

/// Global options every cloudctl invocation understands.
pub fn default_global_options() -> Vec<GlobalOptionSpec> {
    vec![
        GlobalOptionSpec::new("help", &["--help", "-h"], "Show help for a command"),
        GlobalOptionSpec::new(
            "project",
            &["--project PROJECT", "-p PROJECT"],
            "Project to operate on",
        ),
        GlobalOptionSpec::new(
            "remote",
            &["--remote REMOTE"],
            "Git remote that identifies the project",
        ),
    ]
}

pub fn is_help_flag(token: &str) -> bool {
    HELP_FLAGS.contains(&token)
}

pub fn is_version_flag(token: &str) -> bool {
    RESERVED_FLAGS.contains(&token)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_name() {
        assert_eq!(normalize_name("--api-key"), "api_key");
        assert_eq!(normalize_name("-p"), "p");
        assert_eq!(normalize_name("dry-run"), "dry_run");
    }

    #[test]
    fn test_option_spec_builders() {
        let force = OptionSpec::switch("--force", "Skip confirmation").short("-f");
        assert_eq!(force.name, "force");
        assert_eq!(force.kind, ValueKind::Switch);
        assert_eq!(force.flags().collect::<Vec<_>>(), vec!["--force", "-f"]);
        assert_eq!(force.usage(), "-f, --force");

        let key = OptionSpec::value("--api-key", "KEY", "API key to store");
        assert_eq!(key.name, "api_key");
        assert_eq!(key.kind, ValueKind::Value);
        assert_eq!(key.usage(), "    --api-key KEY");
    }

    #[test]
    fn test_global_spec_kind_from_forms() {
        let globals = default_global_options();
        let help = &globals[0];
        let project = &globals[1];
        assert_eq!(help.kind(), ValueKind::Switch);
        assert_eq!(project.kind(), ValueKind::Value);
        assert_eq!(project.flags().collect::<Vec<_>>(), vec!["--project", "-p"]);
        assert_eq!(project.usage(), "-p PROJECT, --project PROJECT");
    }

    #[test]
    fn test_help_and_version_flags() {
        assert!(is_help_flag("-h"));
        assert!(is_help_flag("--help"));
        assert!(!is_help_flag("help"));
        assert!(is_version_flag("-v"));
        assert!(is_version_flag("--version"));
        assert!(!is_version_flag("-V"));
    }
}
