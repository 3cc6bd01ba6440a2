use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Filter directive covering both the library and the binary (`uxshell_core`
/// shares the `uxshell` target prefix).
fn directive(quiet: bool) -> &'static str {
    if quiet { "uxshell=error" } else { "uxshell=info" }
}

/// Initialize logging with optional quiet mode.
///
/// Logs go to stderr as JSON so stdout stays free for what the windows drew.
/// `RUST_LOG` can add directives, e.g. `uxshell_core::scheduler=debug` to
/// trace refresh cycles.
pub fn init_logging(quiet: bool) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_writer(std::io::stderr)
                .with_current_span(false)
                .with_span_list(false),
        )
        .with(
            EnvFilter::from_default_env()
                .add_directive(directive(quiet).parse().expect("Invalid log directive")),
        )
        .init();
}
