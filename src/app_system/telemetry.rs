/// Configure tracing once for the whole process.
///
/// Verbosity comes from `RUST_LOG` (default `info`), e.g.
/// `RUST_LOG=notes_checkout::clients=debug,info`.
pub fn setup_tracing() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_timer(tracing_subscriber::fmt::time::uptime())
        .compact()
        .init();
}
