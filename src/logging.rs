use tracing_subscriber::EnvFilter;

/// Install the global fmt subscriber.
/// With `debug` on, `RUST_LOG` may override the level; otherwise it is pinned to info.
pub fn init(debug: bool) {
    let filter = if debug {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("canvasflow=debug,info"))
    } else {
        EnvFilter::new("canvasflow=info,warn")
    };

    // A second init (tests, embedding) is not an error worth reporting.
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}
