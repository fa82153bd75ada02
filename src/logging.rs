use tracing_subscriber::{EnvFilter, Layer, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize console logging.
///
/// Enables console output for all tracing macros (info!, warn!, error!,
/// debug!, etc.) throughout the application.
///
/// # Configuration
///
/// - **Log Level**: Controlled by `LOG_LEVEL` environment variable (default: "info")
/// - **Filtering**: Noisy dependencies filtered to warn level for cleaner output
/// - **Format**: Compact format with timestamps and ANSI colors (auto-detected)
/// - **Target**: Shows module paths (e.g., "collegium::modules::approvals")
///
/// Safe to call more than once; subsequent calls are no-ops, so tests can
/// initialize logging without coordinating.
pub fn init_console_logging() {
    let log_level = std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "{}={},hyper=warn,reqwest=warn",
            env!("CARGO_PKG_NAME"),
            log_level
        ))
    });

    let console_layer = fmt::layer()
        .compact()
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .with_filter(env_filter);

    let _ = tracing_subscriber::registry().with(console_layer).try_init();
}
