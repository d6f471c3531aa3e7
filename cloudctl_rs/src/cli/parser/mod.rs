//! Argument parser for `cloudctl <command> [args...] [flags...]`.
//!
//! Global and command options are merged into one grammar and scanned in a
//! single left-to-right pass. Each token ends up in exactly one bucket:
//! consumed by a recognized flag, positional, or invalid.
//!
//! # Module Structure
//!
//! - [`core`] - The merged flag table and the parsing pass
//! - [`helpers`] - Command suggestions and invalid-argument messages

mod core;
pub mod helpers;

pub use core::{ParsedArgs, parse};
pub use helpers::{invalid_arguments_message, join_sentence, suggest_similar_command};
