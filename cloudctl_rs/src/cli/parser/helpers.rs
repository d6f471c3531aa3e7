//! Helper functions for command parsing.
//!
//! - Command suggestion via Levenshtein distance, then unique prefix
//! - "Invalid argument(s)" message formatting

use strsim::levenshtein;

/// Suggest a similar command name.
/// Returns the closest candidate within distance 2, else the only candidate
/// starting with `input`.
pub fn suggest_similar_command<'a>(
    input: &str,
    candidates: impl IntoIterator<Item = &'a str>,
) -> Option<&'a str> {
    let input_lower = input.to_lowercase();
    if input_lower.is_empty() {
        return None;
    }

    let candidates: Vec<&str> = candidates.into_iter().collect();
    let mut best_match: Option<(&str, usize)> = None;

    for &cmd in &candidates {
        let distance = levenshtein(&input_lower, cmd);
        // Only suggest if distance is small (max 2 for reasonable similarity)
        if distance <= 2 {
            match best_match {
                Some((_, best_dist)) if distance >= best_dist => {}
                _ => best_match = Some((cmd, distance)),
            }
        }
    }

    if let Some((cmd, _)) = best_match {
        return Some(cmd);
    }

    let mut prefixed = candidates
        .iter()
        .filter(|cmd| cmd.starts_with(&input_lower));
    match (prefixed.next(), prefixed.next()) {
        (Some(only), None) => Some(*only),
        _ => None,
    }
}

/// Join items as `A`, `A and B`, `A, B and C`.
pub fn join_sentence(items: &[String]) -> String {
    match items {
        [] => String::new(),
        [only] => only.clone(),
        [init @ .., last] => format!("{} and {}", init.join(", "), last),
    }
}

/// `Invalid argument: "x"` / `Invalid arguments: "x", "y" and "z"`; `None` when nothing is invalid.
pub fn invalid_arguments_message(invalid: &[String]) -> Option<String> {
    if invalid.is_empty() {
        return None;
    }
    let quoted: Vec<String> = invalid.iter().map(|arg| format!("\"{arg}\"")).collect();
    let noun = if invalid.len() == 1 {
        "argument"
    } else {
        "arguments"
    };
    Some(format!("Invalid {}: {}", noun, join_sentence(&quoted)))
}

/// Flag-like: starts with `-`, isn't a bare `-`, isn't a negative number.
pub(super) fn looks_like_flag(token: &str) -> bool {
    token.len() > 1 && token.starts_with('-') && !is_negative_number(token)
}

fn is_negative_number(token: &str) -> bool {
    let digits = &token[1..];
    digits.chars().any(|c| c.is_ascii_digit())
        && digits.chars().all(|c| c.is_ascii_digit() || c == '.')
}

/// `--name=value` -> (`--name`, Some(`value`)).
pub(super) fn split_inline_value(token: &str) -> (&str, Option<&str>) {
    match token.split_once('=') {
        Some((flag, value)) => (flag, Some(value)),
        None => (token, None),
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_suggest_close_match() {
        let names = ["foo", "login", "logout"];
        assert_eq!(suggest_similar_command("fooo", names), Some("foo"));
        assert_eq!(suggest_similar_command("logn", names), Some("login"));
        assert_eq!(suggest_similar_command("LOGIN", names), Some("login"));
    }

    #[test]
    fn test_suggest_prefers_smallest_distance() {
        let names = ["logs", "login"];
        assert_eq!(suggest_similar_command("logins", names), Some("login"));
    }

    #[test]
    fn test_suggest_unique_prefix() {
        let names = ["domains", "databases", "deploy"];
        assert_eq!(suggest_similar_command("dom", names), Some("domains"));
        // ambiguous prefix, nothing close enough
        assert_eq!(suggest_similar_command("d", ["databases", "deploy"]), None);
    }

    #[test]
    fn test_suggest_nothing_for_unrelated() {
        assert_eq!(suggest_similar_command("zzzzzz", ["login", "logout"]), None);
        assert_eq!(suggest_similar_command("", ["login"]), None);
    }

    #[test]
    fn test_join_sentence() {
        assert_eq!(join_sentence(&[]), "");
        assert_eq!(join_sentence(&strings(&["a"])), "a");
        assert_eq!(join_sentence(&strings(&["a", "b"])), "a and b");
        assert_eq!(join_sentence(&strings(&["a", "b", "c"])), "a, b and c");
    }

    #[test]
    fn test_invalid_arguments_message() {
        assert_eq!(invalid_arguments_message(&[]), None);
        assert_eq!(
            invalid_arguments_message(&strings(&["x"])).as_deref(),
            Some("Invalid argument: \"x\"")
        );
        assert_eq!(
            invalid_arguments_message(&strings(&["x", "y"])).as_deref(),
            Some("Invalid arguments: \"x\" and \"y\"")
        );
        assert_eq!(
            invalid_arguments_message(&strings(&["x", "y", "z"])).as_deref(),
            Some("Invalid arguments: \"x\", \"y\" and \"z\"")
        );
    }

    #[test]
    fn test_looks_like_flag() {
        assert!(looks_like_flag("--force"));
        assert!(looks_like_flag("-f"));
        assert!(!looks_like_flag("-"));
        assert!(!looks_like_flag("-5"));
        assert!(!looks_like_flag("-1.5"));
        assert!(looks_like_flag("-inf"));
        assert!(!looks_like_flag("web"));
    }

    #[test]
    fn test_split_inline_value() {
        assert_eq!(split_inline_value("--project=shop"), ("--project", Some("shop")));
        assert_eq!(split_inline_value("--project="), ("--project", Some("")));
        assert_eq!(split_inline_value("--force"), ("--force", None));
    }
}
