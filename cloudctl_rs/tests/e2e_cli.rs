//! End-to-End CLI Tests for cloudctl
//!
//! Every test runs the binary against its own temporary config directory
//! with `CLOUDCTL_API_KEY` cleared unless the test sets it.

use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use tempfile::TempDir;

/// A cloudctl command isolated in `config_dir`
fn cloudctl(config_dir: &TempDir) -> Command {
    let mut cmd = cargo_bin_cmd!("cloudctl");
    cmd.env("CLOUDCTL_CONFIG_DIR", config_dir.path())
        .env_remove("CLOUDCTL_API_KEY")
        .env("NO_COLOR", "1");
    cmd
}

// ============================================
// Help and version
// ============================================

mod cli_basics {
    use super::*;

    #[test]
    fn shows_help() {
        let dir = TempDir::new().unwrap();
        cloudctl(&dir)
            .arg("--help")
            .assert()
            .success()
            .stdout(predicate::str::contains("Usage: cloudctl COMMAND"))
            .stdout(predicate::str::contains("auth:"))
            .stdout(predicate::str::contains("login"));
    }

    #[test]
    fn no_arguments_shows_help() {
        let dir = TempDir::new().unwrap();
        cloudctl(&dir)
            .assert()
            .success()
            .stdout(predicate::str::contains("Global options:"));
    }

    #[test]
    fn shows_version() {
        let dir = TempDir::new().unwrap();
        cloudctl(&dir)
            .arg("--version")
            .assert()
            .success()
            .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
    }

    #[test]
    fn help_flag_after_command_shows_command_usage() {
        let dir = TempDir::new().unwrap();
        cloudctl(&dir)
            .args(["signin", "--help"])
            .assert()
            .success()
            .stdout(predicate::str::contains("Usage: cloudctl login [--api-key KEY]"));
    }

    #[test]
    fn help_topic_skips_global_option_values() {
        let dir = TempDir::new().unwrap();
        cloudctl(&dir)
            .args(["--help", "-p", "shop", "login"])
            .assert()
            .success()
            .stdout(predicate::str::contains("Usage: cloudctl login"));
    }

    #[test]
    fn help_rejects_invalid_flags() {
        let dir = TempDir::new().unwrap();
        cloudctl(&dir)
            .args(["help", "--bogus"])
            .assert()
            .code(1)
            .stderr(predicate::str::contains(r#"Invalid argument: "--bogus""#))
            .stderr(predicate::str::contains("No help available").not());
    }

    #[test]
    fn help_for_unknown_topic_fails() {
        let dir = TempDir::new().unwrap();
        cloudctl(&dir)
            .args(["help", "nosuch"])
            .assert()
            .code(1)
            .stderr(predicate::str::contains(" !    No help available for `nosuch`."));
    }
}

// ============================================
// Command resolution
// ============================================

mod resolution {
    use super::*;

    #[test]
    fn unknown_command_suggests_close_match() {
        let dir = TempDir::new().unwrap();
        cloudctl(&dir)
            .arg("whoamii")
            .assert()
            .code(1)
            .stderr(predicate::str::contains(
                "`whoamii` is not a cloudctl command.",
            ))
            .stderr(predicate::str::contains("Perhaps you meant `whoami`."))
            .stderr(predicate::str::contains("See `cloudctl help`"));
    }

    #[test]
    fn unknown_command_without_match() {
        let dir = TempDir::new().unwrap();
        cloudctl(&dir)
            .arg("zzzzzzzz")
            .assert()
            .code(1)
            .stderr(predicate::str::contains("Perhaps").not());
    }

    #[test]
    fn alias_runs_canonical_command() {
        let dir = TempDir::new().unwrap();
        cloudctl(&dir)
            .env("CLOUDCTL_API_KEY", "abcdefgh1234")
            .args(["me", "-p", "shop"])
            .assert()
            .success()
            .stdout(predicate::str::contains("********1234"))
            .stdout(predicate::str::contains("Project: shop"));
    }
}

// ============================================
// Argument validation
// ============================================

mod arguments {
    use super::*;

    #[test]
    fn invalid_flag_is_rejected_with_usage() {
        let dir = TempDir::new().unwrap();
        cloudctl(&dir)
            .args(["login", "--bogus"])
            .assert()
            .code(1)
            .stderr(predicate::str::contains(r#"Invalid argument: "--bogus""#))
            .stdout(predicate::str::contains("Usage: cloudctl login"));
    }

    #[test]
    fn missing_option_value_shows_usage() {
        let dir = TempDir::new().unwrap();
        cloudctl(&dir)
            .args(["login", "--api-key"])
            .assert()
            .code(1)
            .stderr(predicate::str::contains(
                "No value provided for option '--api-key'",
            ))
            .stdout(predicate::str::contains("Usage: cloudctl login"));
    }

    #[test]
    fn version_flag_after_command_is_invalid() {
        let dir = TempDir::new().unwrap();
        cloudctl(&dir)
            .args(["whoami", "-v"])
            .assert()
            .code(1)
            .stderr(predicate::str::contains(r#"Invalid argument: "-v""#));
    }
}

// ============================================
// Authentication flow
// ============================================

mod auth {
    use super::*;

    #[test]
    fn login_with_option_then_whoami() {
        let dir = TempDir::new().unwrap();
        cloudctl(&dir)
            .args(["login", "--api-key=secret-key-9876"])
            .assert()
            .success()
            .stdout(predicate::str::contains("Authentication successful."));

        assert!(dir.path().join("credentials.toml").exists());

        cloudctl(&dir)
            .arg("whoami")
            .assert()
            .success()
            .stdout(predicate::str::contains("9876"));
    }

    #[test]
    fn auth_failure_logs_in_and_retries() {
        let dir = TempDir::new().unwrap();
        cloudctl(&dir)
            .arg("whoami")
            .write_stdin("secret-key-1234\n")
            .assert()
            .success()
            .stderr(predicate::str::contains(" !    Authentication failure"))
            .stdout(predicate::str::contains("Authentication successful."))
            .stdout(predicate::str::contains("1234"));
    }

    #[test]
    fn failed_login_ends_the_retry() {
        let dir = TempDir::new().unwrap();
        cloudctl(&dir)
            .arg("whoami")
            .write_stdin("")
            .assert()
            .code(1)
            .stderr(predicate::str::contains("No API key provided."));

        assert!(!dir.path().join("credentials.toml").exists());
    }

    #[test]
    fn logout_removes_credentials() {
        let dir = TempDir::new().unwrap();
        cloudctl(&dir)
            .args(["login", "-k", "secret-key-1234"])
            .assert()
            .success();

        cloudctl(&dir)
            .arg("logout")
            .assert()
            .success()
            .stdout(predicate::str::contains("Local credentials cleared."));

        assert!(!dir.path().join("credentials.toml").exists());
    }

    #[test]
    fn logout_warns_about_env_key() {
        let dir = TempDir::new().unwrap();
        cloudctl(&dir)
            .env("CLOUDCTL_API_KEY", "abcdefgh1234")
            .arg("logout")
            .assert()
            .success()
            .stderr(predicate::str::contains("WARNING: CLOUDCTL_API_KEY is still set"));
    }

    #[test]
    fn warnings_are_printed_when_the_command_fails() {
        let dir = TempDir::new().unwrap();
        cloudctl(&dir)
            .env("CLOUDCTL_API_KEY", "abcdefgh1234")
            .arg("login")
            .write_stdin("")
            .assert()
            .code(1)
            .stderr(predicate::str::contains(
                "WARNING: CLOUDCTL_API_KEY is set and overrides the stored key.",
            ))
            .stderr(predicate::str::contains(" !    No API key provided."));
    }
}

// ============================================
// Settings
// ============================================

mod settings {
    use super::*;

    #[test]
    fn default_project_applies_when_flag_is_absent() {
        let dir = TempDir::new().unwrap();
        std::fs::write(
            dir.path().join("config.toml"),
            "default_project = \"shop\"\ndefault_remote = \"production\"\n",
        )
        .unwrap();

        cloudctl(&dir)
            .env("CLOUDCTL_API_KEY", "abcdefgh1234")
            .arg("whoami")
            .assert()
            .success()
            .stdout(predicate::str::contains("Project: shop"))
            .stdout(predicate::str::contains("Remote: production"));

        cloudctl(&dir)
            .env("CLOUDCTL_API_KEY", "abcdefgh1234")
            .args(["whoami", "--project", "blog"])
            .assert()
            .success()
            .stdout(predicate::str::contains("Project: blog"))
            .stdout(predicate::str::contains("Project: shop").not());
    }
}
