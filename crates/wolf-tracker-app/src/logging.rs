use tracing_subscriber::{EnvFilter, fmt::format::FmtSpan};

/// Install a compact stderr subscriber for hosts embedding the tracker.
///
/// `RUST_LOG` directives are honoured on top of an INFO default. Calling this
/// more than once is harmless; later calls leave the first subscriber in place.
pub fn install_tracing() {
    let filter = EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into());
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_span_events(FmtSpan::NONE)
        .with_writer(std::io::stderr)
        .compact()
        .try_init();
}
