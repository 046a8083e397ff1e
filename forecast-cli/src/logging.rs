use tracing_subscriber::EnvFilter;

/// Install the global subscriber. `RUST_LOG` wins over the `-v` count.
pub fn init(verbose: u8) {
    let default_directives = match verbose {
        0 => "warn",
        1 => "warn,forecast_core=info,forecast=info",
        _ => "info,forecast_core=debug,forecast=debug",
    };

    let filter = std::env::var("RUST_LOG")
        .ok()
        .and_then(|rust_log| EnvFilter::try_new(rust_log).ok())
        .unwrap_or_else(|| EnvFilter::new(default_directives));

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .with_target(verbose > 1)
        .init();
}
