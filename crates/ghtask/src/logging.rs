use tracing_subscriber::EnvFilter;

/// Crates whose events are shown by default
const LOG_TARGETS: [&str; 3] = ["ghtask", "github_connector", "task_core"];

/// Install the stderr subscriber.
///
/// `RUST_LOG` wins when set; otherwise `verbose` picks warn, info or debug
/// for this workspace's crates.
pub fn init(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let directives: Vec<String> = LOG_TARGETS
            .iter()
            .map(|target| format!("{}={}", target, level))
            .collect();
        EnvFilter::new(directives.join(","))
    });

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
