//! CLI module: everything between argv and a command handler.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                 argv: <command> [args...] [flags...]          │
//! └──────────────────────────────────────────────────────────────┘
//!                               │
//!                               ▼
//! ┌──────────────────────────────────────────────────────────────┐
//! │ Dispatcher                                                   │
//! │   --help / --version shortcuts                               │
//! │   Registry::resolve (direct name, then alias)                │
//! │   parser::parse (global + command flags, one pass)           │
//! │   handler(&mut Invocation)                                   │
//! └──────────────────────────────┬───────────────────────────────┘
//!                                │ Err(Failure)
//!                                ▼
//! ┌──────────────────────────────────────────────────────────────┐
//! │ Failure routing: re-login + retry once on auth failure,      │
//! │ extract::extract_* for API bodies, help for bad options      │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Module Structure
//!
//! - [`schema`] - Option descriptors (global and per-command)
//! - [`registry`] - Commands, aliases and namespaces
//! - [`parser`] - Single-pass argument parser
//! - [`state`] - Per-invocation state
//! - [`failure`] - Closed set of failure kinds
//! - [`extract`] - API error body decoding
//! - [`dispatch`] - Dispatcher, handler context and built-in handlers
//! - [`help`] - Help text rendering
//! - [`output`] - Bang-prefixed failure lines and warnings

pub mod dispatch;
pub mod extract;
pub mod failure;
pub mod help;
pub mod output;
pub mod parser;
pub mod registry;
pub mod schema;
pub mod state;

pub use dispatch::{CredentialCheck, DispatchOptions, Dispatcher, FailureAction, Invocation};
pub use failure::{CommandResult, Failure, ResponseBody};
pub use parser::{ParsedArgs, parse};
pub use registry::{CommandDescriptor, Handler, Registry};
pub use schema::{GlobalOptionSpec, OptionSpec, ValueKind};
pub use state::{InvocationState, Options};
