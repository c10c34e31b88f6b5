//! Logger bootstrap for the demo binary and tests.

use env_logger::{Builder, Env};
use log::LevelFilter;

/// Initializes the global logger.
///
/// When `verbose` is `true`, per-tick pursuit decisions and dialogue
/// transitions (logged at debug level) are printed. Otherwise only info level
/// and above are shown. `RUST_LOG` overrides either default.
///
/// Returns `false` when a logger was already installed.
#[must_use]
pub fn init(verbose: bool) -> bool {
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    let env = Env::default().default_filter_or(level.to_string());

    // A second `try_init` only fails because a logger is already set, which
    // is expected when several tests share the process.
    Builder::from_env(env).try_init().is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn init_is_idempotent() {
        let _first = init(false);
        assert!(!init(true), "second init should report an existing logger");
    }
}
