//! Command registry: descriptors, aliases and namespaces.
//!
//! Built once at startup and handed to the `Dispatcher`; read-only after
//! that. Registering a name twice replaces the earlier descriptor, which is
//! how a build can override a built-in command.

use std::collections::{BTreeMap, HashMap};
use std::fmt;

use super::dispatch::Invocation;
use super::failure::CommandResult;
use super::schema::{GlobalOptionSpec, OptionSpec, default_global_options};

/// A command handler. Receives the parsed invocation, returns success or one failure kind.
pub type Handler = Box<dyn Fn(&mut Invocation<'_>) -> CommandResult + Send + Sync>;

pub struct CommandDescriptor {
    pub name: String,
    /// Label of the handler entry point, shown in debug logs
    pub method: String,
    pub summary: String,
    /// Positional part of the usage line, e.g. `[COMMAND]`
    pub usage: String,
    /// Options in registration order; names are unique
    pub options: Vec<OptionSpec>,
    handler: Handler,
}

impl fmt::Debug for CommandDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandDescriptor")
            .field("name", &self.name)
            .field("method", &self.method)
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

impl CommandDescriptor {
    pub fn new(
        name: &str,
        summary: &str,
        handler: impl Fn(&mut Invocation<'_>) -> CommandResult + Send + Sync + 'static,
    ) -> Self {
        Self {
            name: name.to_string(),
            method: name.to_string(),
            summary: summary.to_string(),
            usage: String::new(),
            options: Vec::new(),
            handler: Box::new(handler),
        }
    }

    pub fn method(mut self, method: &str) -> Self {
        self.method = method.to_string();
        self
    }

    pub fn usage(mut self, usage: &str) -> Self {
        self.usage = usage.to_string();
        self
    }

    /// Add an option; an option with the same name is replaced in place.
    pub fn option(mut self, spec: OptionSpec) -> Self {
        match self.options.iter_mut().find(|o| o.name == spec.name) {
            Some(existing) => *existing = spec,
            None => self.options.push(spec),
        }
        self
    }

    pub fn find_option(&self, name: &str) -> Option<&OptionSpec> {
        self.options.iter().find(|o| o.name == name)
    }

    pub(crate) fn invoke(&self, invocation: &mut Invocation<'_>) -> CommandResult {
        (self.handler)(invocation)
    }
}

#[derive(Debug, Default)]
pub struct Registry {
    commands: HashMap<String, CommandDescriptor>,
    aliases: BTreeMap<String, String>,
    namespaces: BTreeMap<String, Vec<String>>,
    globals: Vec<GlobalOptionSpec>,
}

impl Registry {
    /// An empty registry with no global options.
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry pre-loaded with `--help`, `--project` and `--remote`.
    pub fn with_default_globals() -> Self {
        let mut registry = Self::new();
        for spec in default_global_options() {
            registry.register_global(spec);
        }
        registry
    }

    /// Insert or overwrite the descriptor under its name.
    pub fn register(&mut self, descriptor: CommandDescriptor) {
        tracing::trace!(command = %descriptor.name, "registering command");
        self.commands.insert(descriptor.name.clone(), descriptor);
    }

    /// Map `alias` to `canonical`. The target is looked up lazily at resolve time.
    pub fn register_alias(&mut self, alias: &str, canonical: &str) {
        self.aliases
            .insert(alias.to_string(), canonical.to_string());
    }

    /// File `command` under `namespace` for help listings.
    pub fn register_namespace(&mut self, namespace: &str, command: &str) {
        let members = self.namespaces.entry(namespace.to_string()).or_default();
        if !members.iter().any(|m| m == command) {
            members.push(command.to_string());
        }
    }

    /// Add a global option. A global with the same name replaces the earlier one.
    pub fn register_global(&mut self, spec: GlobalOptionSpec) {
        match self.globals.iter_mut().find(|g| g.name == spec.name) {
            Some(existing) => *existing = spec,
            None => self.globals.push(spec),
        }
    }

    /// Look up `name` directly, then through the alias table.
    pub fn resolve(&self, name: &str) -> Option<&CommandDescriptor> {
        self.commands.get(name).or_else(|| {
            self.aliases
                .get(name)
                .and_then(|canonical| self.commands.get(canonical))
        })
    }

    /// Canonical name behind `name`, if it resolves.
    pub fn canonical_name(&self, name: &str) -> Option<&str> {
        self.resolve(name).map(|d| d.name.as_str())
    }

    pub fn globals(&self) -> &[GlobalOptionSpec] {
        &self.globals
    }

    /// Canonical command names, sorted.
    pub fn command_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.commands.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// `(alias, canonical)` pairs, sorted by alias.
    pub fn aliases(&self) -> impl Iterator<Item = (&str, &str)> {
        self.aliases.iter().map(|(a, c)| (a.as_str(), c.as_str()))
    }

    /// Alias names, sorted.
    pub fn alias_names(&self) -> Vec<&str> {
        self.aliases.keys().map(String::as_str).collect()
    }

    /// Aliases pointing at `canonical`.
    pub fn aliases_for(&self, canonical: &str) -> Vec<&str> {
        self.aliases()
            .filter(|(_, target)| *target == canonical)
            .map(|(alias, _)| alias)
            .collect()
    }

    /// `(namespace, members)` pairs, sorted by namespace.
    pub fn namespaces(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.namespaces
            .iter()
            .map(|(ns, members)| (ns.as_str(), members.as_slice()))
    }

    /// Every name a user could type: commands and aliases.
    pub fn known_names(&self) -> Vec<&str> {
        let mut names = self.command_names();
        names.extend(self.alias_names());
        names
    }
}
