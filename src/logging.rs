use tracing_subscriber::EnvFilter;

/// Used when neither `--debug` nor `RUST_LOG` says otherwise.
const DEFAULT_DIRECTIVES: &str = "warn,annoview=info";
const DEBUG_DIRECTIVES: &str = "info,annoview=debug";

/// Filter directives for this run. `--debug` beats `RUST_LOG`; a blank
/// `RUST_LOG` counts as unset.
pub fn filter_directives(enable_debug: bool, rust_log: Option<&str>) -> String {
    if enable_debug {
        return DEBUG_DIRECTIVES.to_string();
    }
    match rust_log.map(str::trim) {
        Some(directives) if !directives.is_empty() => directives.to_string(),
        _ => DEFAULT_DIRECTIVES.to_string(),
    }
}

/// Install the fmt subscriber and route `log` records through it.
/// Loader threads are named, so thread names are part of every line.
pub fn init_tracing(enable_debug: bool) {
    let _ = tracing_log::LogTracer::init();

    let rust_log = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    let directives = filter_directives(enable_debug, rust_log.as_deref());
    let (env_filter, rejected) = match EnvFilter::try_new(&directives) {
        Ok(filter) => (filter, None),
        Err(e) => (EnvFilter::new(DEFAULT_DIRECTIVES), Some(e)),
    };

    let installed = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_thread_names(true)
        .try_init()
        .is_ok();

    if let (true, Some(e)) = (installed, rejected) {
        log::warn!("Ignoring RUST_LOG '{}': {}", directives, e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_flag_overrides_rust_log() {
        assert_eq!(filter_directives(true, Some("error")), DEBUG_DIRECTIVES);
    }

    #[test]
    fn rust_log_used_when_present() {
        assert_eq!(filter_directives(false, Some(" reqwest=trace ")), "reqwest=trace");
        assert_eq!(filter_directives(false, Some("  ")), DEFAULT_DIRECTIVES);
        assert_eq!(filter_directives(false, None), DEFAULT_DIRECTIVES);
    }

    #[test]
    fn directives_parse_as_filters() {
        assert!(EnvFilter::try_new(DEFAULT_DIRECTIVES).is_ok());
        assert!(EnvFilter::try_new(DEBUG_DIRECTIVES).is_ok());
    }
}
