//! Meta commands: help, version

use crate::cli::dispatch::Invocation;
use crate::cli::failure::{CommandResult, Failure};
use crate::cli::help::{format_command_help, format_overview};

/// `help [COMMAND]`
pub fn help(inv: &mut Invocation<'_>) -> CommandResult {
    inv.validate_arguments();
    let binary = inv.binary_name().to_string();
    let text = match inv.args().first() {
        None => format_overview(inv.registry(), &binary),
        Some(topic) => format_command_help(inv.registry(), topic, &binary)
            .ok_or_else(|| Failure::command(format!("No help available for `{topic}`.")))?,
    };
    print!("{text}");
    Ok(())
}

/// `version`
pub fn version(inv: &mut Invocation<'_>) -> CommandResult {
    inv.validate_arguments();
    println!("{} {}", inv.binary_name(), inv.version());
    Ok(())
}
