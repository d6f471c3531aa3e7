//! What a handler receives: copies of its args and options, plus access to
//! the per-invocation warnings and the registry.

use crate::colors::Painter;
use crate::exitcode;

use super::super::help::format_command_help;
use super::super::output::{bang, flush_warnings};
use super::super::parser::invalid_arguments_message;
use super::super::registry::Registry;
use super::super::state::Options;
use super::DispatchOptions;

pub struct Invocation<'a> {
    command: &'a str,
    args: Vec<String>,
    options: Options,
    invalid: Vec<String>,
    warnings: &'a mut Vec<String>,
    registry: &'a Registry,
    app: &'a DispatchOptions,
    painter: Painter,
}

impl<'a> Invocation<'a> {
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn new(
        command: &'a str,
        args: Vec<String>,
        options: Options,
        invalid: Vec<String>,
        warnings: &'a mut Vec<String>,
        registry: &'a Registry,
        app: &'a DispatchOptions,
        painter: Painter,
    ) -> Self {
        Self {
            command,
            args,
            options,
            invalid,
            warnings,
            registry,
            app,
            painter,
        }
    }

    /// Canonical name of the running command.
    pub fn command(&self) -> &str {
        self.command
    }

    /// Positional args; rejected flag-like tokens are appended at the end.
    pub fn args(&self) -> &[String] {
        &self.args
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    pub fn option(&self, name: &str) -> Option<&str> {
        self.options.get(name)
    }

    pub fn flag(&self, name: &str) -> bool {
        self.options.flag(name)
    }

    pub fn invalid_arguments(&self) -> &[String] {
        &self.invalid
    }

    /// Queue a warning; printed to stderr when the invocation ends.
    pub fn warn(&mut self, message: impl Into<String>) {
        self.warnings.push(message.into());
    }

    pub fn registry(&self) -> &Registry {
        self.registry
    }

    pub fn binary_name(&self) -> &str {
        self.app.binary_name
    }

    pub fn version(&self) -> &str {
        self.app.version
    }

    pub fn painter(&self) -> Painter {
        self.painter
    }

    /// Exit the process with status 1 if the parser rejected any token.
    ///
    /// Prints `Invalid argument(s): ...`, this command's help and any pending
    /// warnings first. Does not return in that case.
    pub fn validate_arguments(&mut self) {
        let Some(message) = invalid_arguments_message(&self.invalid) else {
            return;
        };
        tracing::debug!(command = self.command, invalid = ?self.invalid, "rejecting invalid arguments");
        bang(&self.painter, &message);
        if let Some(help) = format_command_help(self.registry, self.command, self.app.binary_name)
        {
            println!("{help}");
        }
        flush_warnings(&self.painter, self.warnings);
        std::process::exit(exitcode::INVALID_ARGUMENTS);
    }
}
