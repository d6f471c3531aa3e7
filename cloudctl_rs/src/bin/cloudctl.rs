use std::any::Any;
use std::panic;

use anyhow::Result;
use tracing_subscriber::EnvFilter;

use cloudctl::cli::dispatch::handlers::register_builtins;
use cloudctl::cli::{DispatchOptions, Dispatcher, Registry};
use cloudctl::config::{self, Settings};

const LOG_ENV: &str = "CLOUDCTL_LOG";

fn install_broken_pipe_handler() {
    let default_hook = panic::take_hook();
    panic::set_hook(Box::new(move |info| {
        let payload = info.payload();
        let is_broken = <dyn Any>::downcast_ref::<&str>(payload)
            .is_some_and(|s| s.contains("Broken pipe"))
            || <dyn Any>::downcast_ref::<String>(payload)
                .is_some_and(|s| s.contains("Broken pipe"));

        if is_broken {
            // Downstream closed the pipe (e.g. `cloudctl help | head`).
            std::process::exit(0);
        }

        default_hook(info);
    }));
}

fn init_logging() -> Result<()> {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .with_target(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!("failed to initialise logging: {e}"))
}

fn build_dispatcher(settings: &Settings) -> Dispatcher {
    let mut registry = Registry::with_default_globals();
    register_builtins(&mut registry);

    let mut dispatcher = Dispatcher::new(
        registry,
        DispatchOptions {
            binary_name: "cloudctl",
            version: env!("CARGO_PKG_VERSION"),
            color: settings.color,
        },
    );
    if let Some(project) = &settings.default_project {
        dispatcher = dispatcher.with_default_option("project", project.as_str());
    }
    if let Some(remote) = &settings.default_remote {
        dispatcher = dispatcher.with_default_option("remote", remote.as_str());
    }
    dispatcher
}

fn main() -> Result<()> {
    install_broken_pipe_handler();
    init_logging()?;

    let dir = config::config_dir();
    let settings = Settings::load(&dir);
    tracing::debug!(config_dir = %dir.display(), "loaded settings");

    let argv: Vec<String> = std::env::args().skip(1).collect();
    let code = build_dispatcher(&settings).run_argv(&argv);
    std::process::exit(code);
}
