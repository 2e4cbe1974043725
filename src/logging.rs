use tracing_subscriber::EnvFilter;

/// Filter directive for the given `-v` count. `RUST_LOG` still takes precedence.
pub fn level_for(default_level: &str, verbosity: u8) -> String {
    match verbosity {
        0 => default_level.to_string(),
        1 => "info".to_string(),
        2 => "debug".to_string(),
        _ => "trace".to_string(),
    }
}

/// Installs the stderr subscriber. Safe to call more than once.
pub fn init(default_level: &str, verbosity: u8) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level_for(default_level, verbosity)));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
