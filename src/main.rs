//! Entry point for **snaptile**.
//!
//! ```text
//! snaptile <left|right|top|bottom|min|max>
//! ```
//!
//! Exits with status 0 when the action was carried out (or there was
//! nothing to do) and 1 on any error.

use log::{error, info};
use snaptile::action::Action;
use snaptile::config::Config;
use snaptile::dispatcher::ActionDispatcher;
use snaptile::x11::session::X11Session;
use std::process::ExitCode;

/// Resolve the config directory (`$XDG_CONFIG_HOME/snaptile`).
fn config_dir() -> std::path::PathBuf {
    let base = std::env::var("XDG_CONFIG_HOME").unwrap_or_else(|_| {
        let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".into());
        format!("{}/.config", home)
    });
    std::path::PathBuf::from(base).join("snaptile")
}

/// Try to load the config from `$XDG_CONFIG_HOME/snaptile/config.json`,
/// falling back to compiled-in defaults.
fn load_config() -> Config {
    let path = config_dir().join("config.json");
    match Config::load(&path) {
        Ok(cfg) => {
            info!("loaded config from {}", path.display());
            cfg
        }
        Err(e) => {
            info!("no usable config file ({}), using defaults", e);
            Config::default()
        }
    }
}

fn main() -> ExitCode {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let (Some(arg), None) = (args.next(), args.next()) else {
        error!("usage: snaptile <left|right|top|bottom|min|max>");
        return ExitCode::FAILURE;
    };
    let action: Action = match arg.parse() {
        Ok(a) => a,
        Err(e) => {
            error!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    let config = load_config();

    let session = match X11Session::connect() {
        Ok(s) => s,
        Err(e) => {
            error!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    let dispatcher = ActionDispatcher::new(session, config);
    let result = dispatcher.handle(action);
    // Flush whatever was issued, even when the action stopped half way.
    let flushed = dispatcher.flush();

    match (result, flushed) {
        (Ok(outcome), Ok(())) => {
            info!("{:?}", outcome);
            ExitCode::SUCCESS
        }
        (Err(e), _) | (Ok(_), Err(e)) => {
            error!("{} failed: {}", action, e);
            ExitCode::FAILURE
        }
    }
}
