//! Help text generation: the command overview and per-command usage.

use super::registry::{CommandDescriptor, Registry};
use super::schema::GlobalOptionSpec;

/// Overview listing every command, grouped by namespace.
pub fn format_overview(registry: &Registry, binary: &str) -> String {
    let mut help = String::new();
    help.push_str(&format!(
        "Usage: {binary} COMMAND [--project PROJECT] [--remote REMOTE]\n\n"
    ));
    help.push_str(&format!(
        "Type \"{binary} help COMMAND\" for more details on a command.\n"
    ));

    let mut listed: Vec<&str> = Vec::new();
    for (namespace, members) in registry.namespaces() {
        let rows: Vec<&CommandDescriptor> = members
            .iter()
            .filter_map(|name| registry.resolve(name))
            .collect();
        if rows.is_empty() {
            continue;
        }
        help.push_str(&format!("\n{}:\n", namespace));
        push_command_rows(&mut help, &rows);
        listed.extend(rows.iter().map(|d| d.name.as_str()));
    }

    let rest: Vec<&CommandDescriptor> = registry
        .command_names()
        .into_iter()
        .filter(|name| !listed.contains(name))
        .filter_map(|name| registry.resolve(name))
        .collect();
    if !rest.is_empty() {
        help.push_str(if listed.is_empty() {
            "\nCommands:\n"
        } else {
            "\nAdditional commands:\n"
        });
        push_command_rows(&mut help, &rest);
    }

    let aliases: Vec<(&str, &str)> = registry.aliases().collect();
    if !aliases.is_empty() {
        help.push_str("\nAliases:\n");
        let width = aliases.iter().map(|(a, _)| a.len()).max().unwrap_or(0);
        for (alias, canonical) in aliases {
            help.push_str(&format!("  {alias:<width$}  -> {canonical}\n"));
        }
    }

    push_global_rows(&mut help, registry.globals());
    help
}

/// Usage for one command (resolved through aliases), or `None` if unknown.
pub fn format_command_help(registry: &Registry, name: &str, binary: &str) -> Option<String> {
    let descriptor = registry.resolve(name)?;
    let mut help = String::new();

    let mut usage = format!("Usage: {} {}", binary, descriptor.name);
    if !descriptor.usage.is_empty() {
        usage.push(' ');
        usage.push_str(&descriptor.usage);
    }
    for option in &descriptor.options {
        match &option.value_name {
            Some(value) => usage.push_str(&format!(" [{} {}]", option.long, value)),
            None => usage.push_str(&format!(" [{}]", option.long)),
        }
    }
    help.push_str(&usage);
    help.push_str("\n\n");
    help.push_str(&descriptor.summary);
    help.push('\n');

    if !descriptor.options.is_empty() {
        help.push_str("\nOptions:\n");
        let rows: Vec<(String, &str)> = descriptor
            .options
            .iter()
            .map(|o| (o.usage(), o.description.as_str()))
            .collect();
        push_rows(&mut help, &rows);
    }

    let aliases = registry.aliases_for(&descriptor.name);
    if !aliases.is_empty() {
        help.push_str(&format!("\nAliases: {}\n", aliases.join(", ")));
    }

    push_global_rows(&mut help, registry.globals());
    Some(help)
}

fn push_command_rows(help: &mut String, rows: &[&CommandDescriptor]) {
    let rows: Vec<(String, &str)> = rows
        .iter()
        .map(|d| (d.name.clone(), d.summary.as_str()))
        .collect();
    push_rows(help, &rows);
}

fn push_global_rows(help: &mut String, globals: &[GlobalOptionSpec]) {
    if globals.is_empty() {
        return;
    }
    help.push_str("\nGlobal options:\n");
    let rows: Vec<(String, &str)> = globals
        .iter()
        .map(|g| (g.usage(), g.description.as_str()))
        .collect();
    push_rows(help, &rows);
}

fn push_rows(help: &mut String, rows: &[(String, &str)]) {
    let width = rows.iter().map(|(left, _)| left.len()).max().unwrap_or(0);
    for (left, right) in rows {
        help.push_str(&format!("  {left:<width$}  {right}\n"));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::schema::OptionSpec;

    fn registry() -> Registry {
        let mut registry = Registry::with_default_globals();
        registry.register(
            CommandDescriptor::new("login", "Log in with your API key", |_| Ok(()))
                .option(OptionSpec::value("--api-key", "KEY", "API key to store").short("-k")),
        );
        registry.register(CommandDescriptor::new("version", "Show version", |_| Ok(())));
        registry.register(CommandDescriptor::new("apps", "List apps", |_| Ok(())));
        registry.register_namespace("auth", "login");
        registry.register_namespace("core", "version");
        registry.register_alias("signin", "login");
        registry
    }

    #[test]
    fn test_overview_groups_by_namespace() {
        let help = format_overview(&registry(), "cloudctl");
        assert!(help.starts_with("Usage: cloudctl COMMAND"));
        assert!(help.contains("\nauth:\n  login"));
        assert!(help.contains("\ncore:\n  version"));
        assert!(help.contains("Additional commands:\n  apps"));
        assert!(help.contains("signin  -> login"));
        assert!(help.contains("-p PROJECT, --project PROJECT"));
    }

    #[test]
    fn test_command_help_through_alias() {
        let help = format_command_help(&registry(), "signin", "cloudctl").expect("known command");
        assert!(help.starts_with("Usage: cloudctl login [--api-key KEY]"));
        assert!(help.contains("Log in with your API key"));
        assert!(help.contains("-k, --api-key KEY  API key to store"));
        assert!(help.contains("Aliases: signin"));
        assert!(help.contains("Global options:"));
    }

    #[test]
    fn test_unknown_command_help() {
        assert!(format_command_help(&registry(), "nope", "cloudctl").is_none());
    }
}
