//! Dispatcher: resolves a command, parses its arguments, runs its handler
//! and routes any failure to exactly one user-facing behavior.
//!
//! One `run` goes through:
//!
//! 1. `--help`/`-h` anywhere -> `help <command>`; bare `--version`/`-v` -> `version`
//! 2. Registry lookup (name, then alias); unknown names get a suggestion
//! 3. One parsing pass over global and command options
//! 4. The handler, with its own copies of args and options
//! 5. On failure, [`Dispatcher::failure_action`]; an authentication failure
//!    without a configured credential runs `login` and retries once
//!
//! Warnings queued during an attempt are printed when the attempt ends,
//! whatever the outcome.

pub mod handlers;
mod invocation;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::colors::{ColorMode, Painter};
use crate::{config, exitcode};

use super::extract::{extract_or, extract_or_generic};
use super::failure::{CommandResult, Failure};
use super::output::{bang, flush_warnings};
use super::parser::{parse, suggest_similar_command};
use super::registry::Registry;
use super::schema::{ValueKind, is_help_flag, is_version_flag};
use super::state::{InvocationState, Options};

pub use invocation::Invocation;

pub const HELP_COMMAND: &str = "help";
pub const VERSION_COMMAND: &str = "version";
pub const LOGIN_COMMAND: &str = "login";

pub const AUTH_FAILURE_MESSAGE: &str = "Authentication failure";
pub const TIMEOUT_MESSAGE: &str =
    "The request timed out. Please try again later, and if the problem persists contact support.";

static NOT_FOUND_PHRASE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)[\w-]+(?: [\w-]+)*? not found").unwrap());

/// Answers "is a credential configured right now?". Called at failure time.
pub type CredentialCheck = Box<dyn Fn() -> bool + Send + Sync>;

/// Binary-level settings the dispatcher and handlers need.
#[derive(Debug, Clone)]
pub struct DispatchOptions {
    /// Name used in usage lines and "not a command" messages
    pub binary_name: &'static str,
    /// Printed by the `version` command
    pub version: &'static str,
    pub color: ColorMode,
}

impl Default for DispatchOptions {
    fn default() -> Self {
        Self {
            binary_name: "cloudctl",
            version: env!("CARGO_PKG_VERSION"),
            color: ColorMode::Auto,
        }
    }
}

/// What to do with a failed invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureAction {
    /// Report the failure, run `login`, then retry the original invocation.
    Reauthenticate,
    /// Print the message and stop.
    Report(String),
    /// Print the message, then help for `topic` (the overview when `None`).
    ShowHelp {
        message: String,
        topic: Option<String>,
    },
}

pub struct Dispatcher {
    registry: Registry,
    options: DispatchOptions,
    credentials: CredentialCheck,
    /// Option values applied when the command line leaves them out
    defaults: Options,
    painter: Painter,
}

impl Dispatcher {
    pub fn new(registry: Registry, options: DispatchOptions) -> Self {
        let painter = Painter::new(options.color);
        Self {
            registry,
            options,
            credentials: Box::new(config::has_credentials),
            defaults: Options::new(),
            painter,
        }
    }

    /// Replace the credential check (defaults to [`config::has_credentials`]).
    pub fn with_credential_check(mut self, check: impl Fn() -> bool + Send + Sync + 'static) -> Self {
        self.credentials = Box::new(check);
        self
    }

    /// Value for option `name` when an invocation does not set it.
    /// Global `on_parse` callbacks only see values from the command line.
    pub fn with_default_option(mut self, name: &str, value: impl Into<String>) -> Self {
        self.defaults.insert(name, value);
        self
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Run `argv` (program name already stripped). No arguments shows help.
    pub fn run_argv(&self, argv: &[String]) -> i32 {
        match argv.split_first() {
            Some((command, args)) => self.run(command, args),
            None => self.run(HELP_COMMAND, &[]),
        }
    }

    /// Run one invocation to completion and return the process exit code.
    pub fn run(&self, command: &str, args: &[String]) -> i32 {
        let mut retried = false;
        loop {
            let failure = match self.attempt(command, args) {
                Ok(()) => return exitcode::OK,
                Err(failure) => failure,
            };
            tracing::debug!(command, kind = failure.kind(), "invocation failed");

            match self.failure_action(command, &failure, retried) {
                FailureAction::Reauthenticate => {
                    bang(&self.painter, AUTH_FAILURE_MESSAGE);
                    retried = true;
                    if let Err(login_failure) = self.attempt(LOGIN_COMMAND, &[]) {
                        let action = self.failure_action(LOGIN_COMMAND, &login_failure, true);
                        return self.conclude(action);
                    }
                    tracing::info!(command, "logged in, retrying");
                }
                action => return self.conclude(action),
            }
        }
    }

    /// Map a failure to its behavior. First match wins, in this order:
    /// authentication, not found, project, timeout, API, command, option parsing.
    /// `retried` is true once a re-login has already happened for this run.
    pub fn failure_action(&self, command: &str, failure: &Failure, retried: bool) -> FailureAction {
        match failure {
            Failure::Authentication => {
                if retried || (self.credentials)() {
                    FailureAction::Report(AUTH_FAILURE_MESSAGE.to_string())
                } else {
                    FailureAction::Reauthenticate
                }
            }
            Failure::NotFound { message, body } => {
                let fallback = || not_found_message(message);
                FailureAction::Report(match body {
                    Some(body) => extract_or(body, fallback),
                    None => fallback(),
                })
            }
            Failure::Project(message) => FailureAction::Report(message.clone()),
            Failure::Timeout => FailureAction::Report(TIMEOUT_MESSAGE.to_string()),
            Failure::Api { body, .. } => FailureAction::Report(extract_or_generic(body)),
            Failure::Command(message) => FailureAction::Report(message.clone()),
            Failure::OptionParse(message) => FailureAction::ShowHelp {
                message: message.clone(),
                topic: self.registry.resolve(command).map(|d| d.name.clone()),
            },
            Failure::UnknownCommand { name, suggestion } => {
                FailureAction::Report(self.unknown_command_message(name, suggestion.as_deref()))
            }
        }
    }

    /// Resolve and parse without running the handler.
    pub fn prepare(&self, command: &str, args: &[String]) -> Result<InvocationState, Failure> {
        let (command, args) = self.redirect(command, args);
        let descriptor = self
            .registry
            .resolve(&command)
            .ok_or_else(|| self.unknown_command(&command))?;
        tracing::debug!(requested = %command, command = %descriptor.name, "resolved command");

        let mut parsed = parse(self.registry.globals(), &descriptor.options, &args)?;
        self.run_global_callbacks(&parsed.options);
        for (name, value) in self.defaults.iter() {
            if !parsed.options.contains(name) {
                parsed.options.insert(name, value);
            }
        }

        Ok(InvocationState {
            command: descriptor.name.clone(),
            args: parsed.handler_args(),
            options: parsed.options,
            invalid_arguments: parsed.invalid,
            warnings: Vec::new(),
        })
    }

    fn attempt(&self, command: &str, args: &[String]) -> CommandResult {
        let mut state = self.prepare(command, args)?;
        let result = self.invoke(&mut state);
        flush_warnings(&self.painter, &mut state.warnings);
        result
    }

    fn invoke(&self, state: &mut InvocationState) -> CommandResult {
        let descriptor = self
            .registry
            .resolve(&state.command)
            .ok_or_else(|| self.unknown_command(&state.command))?;
        tracing::debug!(command = %descriptor.name, method = %descriptor.method, "invoking handler");

        let mut invocation = Invocation::new(
            &descriptor.name,
            state.args.clone(),
            state.options.clone(),
            state.invalid_arguments.clone(),
            &mut state.warnings,
            &self.registry,
            &self.options,
            self.painter,
        );
        descriptor.invoke(&mut invocation)
    }

    /// Help and version shortcuts, applied before resolution.
    fn redirect(&self, command: &str, args: &[String]) -> (String, Vec<String>) {
        if is_help_flag(command) {
            let topic = self.help_topic(args);
            return (HELP_COMMAND.to_string(), topic.into_iter().collect());
        }
        if command != HELP_COMMAND && args.iter().any(|a| is_help_flag(a)) {
            let topic = (!command.starts_with('-')).then(|| command.to_string());
            return (HELP_COMMAND.to_string(), topic.into_iter().collect());
        }
        if is_version_flag(command) && self.registry.resolve(command).is_none() {
            return (VERSION_COMMAND.to_string(), Vec::new());
        }
        (command.to_string(), args.to_vec())
    }

    /// First positional token, skipping the values of value-taking globals.
    fn help_topic(&self, args: &[String]) -> Option<String> {
        let mut tokens = args.iter();
        while let Some(token) = tokens.next() {
            if !token.starts_with('-') {
                return Some(token.clone());
            }
            if !token.contains('=') && self.global_takes_value(token) {
                tokens.next();
            }
        }
        None
    }

    fn global_takes_value(&self, flag: &str) -> bool {
        self.registry
            .globals()
            .iter()
            .any(|g| g.kind() == ValueKind::Value && g.flags().any(|f| f == flag))
    }

    fn run_global_callbacks(&self, options: &Options) {
        for spec in self.registry.globals() {
            if let (Some(callback), Some(value)) = (&spec.on_parse, options.get(&spec.name)) {
                callback(value);
            }
        }
    }

    fn unknown_command(&self, name: &str) -> Failure {
        Failure::UnknownCommand {
            name: name.to_string(),
            suggestion: suggest_similar_command(name, self.registry.known_names())
                .map(str::to_string),
        }
    }

    fn unknown_command_message(&self, name: &str, suggestion: Option<&str>) -> String {
        let binary = self.options.binary_name;
        let mut message = format!("`{name}` is not a {binary} command.");
        if let Some(suggestion) = suggestion {
            message.push_str(&format!("\nPerhaps you meant `{suggestion}`."));
        }
        message.push_str(&format!(
            "\nSee `{binary} help` for a list of available commands."
        ));
        message
    }

    fn conclude(&self, action: FailureAction) -> i32 {
        match action {
            FailureAction::Reauthenticate => bang(&self.painter, AUTH_FAILURE_MESSAGE),
            FailureAction::Report(message) => bang(&self.painter, &message),
            FailureAction::ShowHelp { message, topic } => {
                bang(&self.painter, &message);
                let args: Vec<String> = topic.into_iter().collect();
                if let Err(failure) = self.attempt(HELP_COMMAND, &args) {
                    bang(&self.painter, &failure.to_string());
                }
            }
        }
        exitcode::FAILURE
    }
}

/// "X not found" phrase from `message`, or the message itself.
fn not_found_message(message: &str) -> String {
    NOT_FOUND_PHRASE
        .find(message)
        .map(|m| m.as_str().to_string())
        .unwrap_or_else(|| message.to_string())
}
