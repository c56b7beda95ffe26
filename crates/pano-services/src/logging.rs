/// Install the global tracing subscriber. The embedding process calls
/// this once at startup; repeated calls are ignored.
pub fn init() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pano=debug".into()),
        )
        .try_init();
}
