//! # cloudctl
//!
//! **Command dispatch core for the cloudctl hosting client.**
//!
//! Everything a `cloudctl <command> [args...] [flags...]` invocation goes
//! through before and after a command handler runs lives here:
//!
//! - **Registry** - commands, aliases and namespaces, registered once at startup
//! - **Parser** - one left-to-right pass over global and command flags together
//! - **Dispatcher** - help/version shortcuts, "did you mean" for typos,
//!   failure routing and a single re-login retry on authentication failure
//! - **Error extraction** - XML, JSON or plain-text API error bodies turned
//!   into one readable line
//!
//! ## Library Usage
//!
//! ```rust,no_run
//! use cloudctl::cli::{CommandDescriptor, DispatchOptions, Dispatcher, Registry};
//! use cloudctl::cli::dispatch::handlers::register_builtins;
//!
//! let mut registry = Registry::with_default_globals();
//! register_builtins(&mut registry);
//! registry.register(CommandDescriptor::new("ping", "Check connectivity", |inv| {
//!     inv.validate_arguments();
//!     println!("pong");
//!     Ok(())
//! }));
//!
//! let dispatcher = Dispatcher::new(registry, DispatchOptions::default());
//! let code = dispatcher.run("ping", &[]);
//! std::process::exit(code);
//! ```

pub mod cli;
pub mod colors;
pub mod config;
pub mod exitcode;

pub use cli::{
    CommandDescriptor, CommandResult, DispatchOptions, Dispatcher, Failure, Invocation, Registry,
    ResponseBody,
};
