use crate::datamodel::{MetricSet, RawSeries, Scope};
use crate::parsing::uid::normalize_uid;
use tracing::{debug, warn};

/// Folds raw series into `set`, keyed by raw identifier.
///
/// Repeated identifiers keep the largest value seen for that dimension.
/// Returns the number of series consumed.
pub fn merge_series(set: &mut MetricSet, series: impl IntoIterator<Item = RawSeries>) -> usize {
    let mut count = 0;
    for s in series {
        if s.kind.is_latency() {
            set.add_or_set_latency(&s.identifier, s.value);
        } else {
            set.add_or_set_rps(&s.identifier, s.value);
        }
        count += 1;
    }
    count
}

/// Re-keys a raw-identifier set by canonical identifier.
///
/// Entries whose identifier does not normalize are dropped. Two raw
/// identifiers that normalize to the same key are merged with the same
/// keep-the-largest rule.
pub fn normalize_metric_set(scope: Scope, set: MetricSet) -> MetricSet {
    if set.is_empty() {
        warn!("Failed to get any {} metrics.", scope);
        return set;
    }

    let mut result = MetricSet::new();
    for (uid, metric) in set {
        match normalize_uid(scope, &uid) {
            Ok(key) => {
                if result.contains(&key) {
                    debug!("{} and another identifier both map to {}", uid, key);
                }
                result.add_or_set_latency(&key, metric.latency);
                result.add_or_set_rps(&key, metric.requests_per_second);
            }
            Err(err) => debug!("Dropping {} metric {}: {}", scope, uid, err),
        }
    }

    result
}
