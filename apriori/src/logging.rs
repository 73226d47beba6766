use env_logger::{Builder, Env, Target};

/// Installs the stderr logger used by the binaries. Library events are
/// `tracing` macros forwarded through its `log` bridge. `RUST_LOG` wins over
/// `verbosity` (0 = info, 1 = debug, 2+ = trace).
pub fn init(verbosity: u8) {
    let default = match verbosity {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    // no-op when a logger is already installed
    let _ = Builder::from_env(Env::default().default_filter_or(default))
        .target(Target::Stderr)
        .try_init();
}
