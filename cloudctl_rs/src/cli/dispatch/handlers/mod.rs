//! Built-in command handlers split by domain
//!
//! - [`meta`] - help, version
//! - [`auth`] - login, logout, whoami

pub mod auth;
pub mod meta;

use crate::cli::registry::{CommandDescriptor, Registry};
use crate::cli::schema::OptionSpec;

/// Register the built-in commands, their aliases and namespaces.
///
/// Later registrations under the same name replace these, so a build can
/// override any built-in.
pub fn register_builtins(registry: &mut Registry) {
    registry.register(
        CommandDescriptor::new("help", "List commands or show usage for one", meta::help)
            .method("meta::help")
            .usage("[COMMAND]"),
    );
    registry.register(
        CommandDescriptor::new("version", "Show the client version", meta::version)
            .method("meta::version"),
    );
    registry.register(
        CommandDescriptor::new("login", "Log in with your API key", auth::login)
            .method("auth::login")
            .option(OptionSpec::value("--api-key", "KEY", "API key to store").short("-k")),
    );
    registry.register(
        CommandDescriptor::new("logout", "Remove stored credentials", auth::logout)
            .method("auth::logout"),
    );
    registry.register(
        CommandDescriptor::new("whoami", "Show the active credential", auth::whoami)
            .method("auth::whoami"),
    );

    registry.register_alias("signin", "login");
    registry.register_alias("me", "whoami");

    for command in ["login", "logout", "whoami"] {
        registry.register_namespace("auth", command);
    }
    for command in ["help", "version"] {
        registry.register_namespace("core", command);
    }
}
