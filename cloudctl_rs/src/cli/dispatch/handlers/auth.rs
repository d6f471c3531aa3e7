//! Credential commands: login, logout, whoami
//!
//! Credentials live in `<config dir>/credentials.toml`; `CLOUDCTL_API_KEY`
//! takes precedence when set.

use std::io::{self, BufRead, Write};

use crate::cli::dispatch::Invocation;
use crate::cli::failure::{CommandResult, Failure};
use crate::config;

/// `login [--api-key KEY]`. Prompts on stdin when no key is given.
pub fn login(inv: &mut Invocation<'_>) -> CommandResult {
    inv.validate_arguments();

    if config::env_api_key().is_some() {
        inv.warn(format!(
            "{} is set and overrides the stored key.",
            config::API_KEY_ENV
        ));
    }

    let key = match inv.option("api_key") {
        Some(key) => key.trim().to_string(),
        None => prompt_for_key()?,
    };
    if key.is_empty() {
        return Err(Failure::command("No API key provided."));
    }

    let dir = config::config_dir();
    let path = config::store_credentials(&dir, &key)
        .map_err(|e| Failure::command(format!("Could not save credentials: {e}")))?;
    tracing::info!(path = %path.display(), "stored credentials");

    println!("{}", inv.painter().ok("Authentication successful."));
    Ok(())
}

/// `logout`
pub fn logout(inv: &mut Invocation<'_>) -> CommandResult {
    inv.validate_arguments();

    let dir = config::config_dir();
    let removed = config::clear_credentials(&dir)
        .map_err(|e| Failure::command(format!("Could not remove credentials: {e}")))?;
    if removed {
        println!("Local credentials cleared.");
    } else {
        println!("No stored credentials.");
    }
    if config::env_api_key().is_some() {
        inv.warn(format!(
            "{} is still set; unset it to log out completely.",
            config::API_KEY_ENV
        ));
    }
    Ok(())
}

/// `whoami`. An unconfigured client is an authentication failure, which
/// lets the dispatcher offer a login.
pub fn whoami(inv: &mut Invocation<'_>) -> CommandResult {
    inv.validate_arguments();

    let key = config::api_key().ok_or(Failure::Authentication)?;
    let painter = inv.painter();
    println!("{} {}", painter.bold("API key:"), config::mask_key(&key));
    if let Some(project) = inv.option("project") {
        println!("{} {}", painter.bold("Project:"), project);
    }
    if let Some(remote) = inv.option("remote") {
        println!("{} {}", painter.bold("Remote:"), remote);
    }
    Ok(())
}

fn prompt_for_key() -> Result<String, Failure> {
    eprint!("Enter your API key: ");
    // prompt must be visible before blocking on stdin
    let _ = io::stderr().flush();

    let mut line = String::new();
    io::stdin()
        .lock()
        .read_line(&mut line)
        .map_err(|e| Failure::command(format!("Could not read API key: {e}")))?;
    Ok(line.trim().to_string())
}
