use crate::error::MetricError;
use once_cell::sync::Lazy;
use regex::Regex;

// Units must appear in descending order, each at most once.
static PROMETHEUS_DURATION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\d+y)?(\d+w)?(\d+d)?(\d+h)?(\d+m)?(\d+s)?(\d+ms)?$").unwrap()
});

/// Checks that `window` is usable inside a range selector, e.g. `3m` or `1h30m`.
pub fn validate_rate_window(window: &str) -> Result<(), MetricError> {
    if window.is_empty() || !PROMETHEUS_DURATION.is_match(window) {
        return Err(MetricError::Configuration(format!(
            "Invalid rate window: {:?}",
            window
        )));
    }
    Ok(())
}
