use env_logger::{Builder, Env};

/// Filter used when `RUST_LOG` is unset: rig transitions and battle events
/// at debug under `--verbose`, only resolutions and the run summary otherwise.
fn fallback_filter(verbose: bool) -> &'static str {
    if verbose {
        "debug"
    } else {
        "info"
    }
}

/// Installs `env_logger` for the hookline binary.
///
/// An explicit `RUST_LOG` always overrides `--verbose`. Calling this after a
/// logger is installed leaves the existing one in place.
pub fn init(verbose: bool) {
    let env = Env::default().default_filter_or(fallback_filter(verbose));
    if Builder::from_env(env).try_init().is_err() {
        log::debug!("logger already installed, keeping it");
    }
}
