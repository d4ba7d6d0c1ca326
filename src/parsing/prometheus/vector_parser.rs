use super::response_models::{QueryData, RESULT_TYPE_VECTOR, VectorSample};
use crate::datamodel::{MetricKind, RawSeries};
use crate::error::MetricError;
use tracing::trace;

/// Label carrying the raw entity identifier.
pub const DESTINATION_UID: &str = "destination_uid";

/// Throughput is exposed per millisecond-equivalent, not per second.
pub const THROUGHPUT_SCALE: f64 = 1000.0;

/// Decodes an instant vector into raw series of the given kind.
///
/// The payload is decoded up front, so malformed JSON fails here and not
/// while iterating. The returned iterator skips non-finite samples and
/// samples without a destination identifier.
pub fn parse_vector(
    data: QueryData,
    kind: MetricKind,
) -> Result<impl Iterator<Item = RawSeries>, MetricError> {
    if data.result_type != RESULT_TYPE_VECTOR {
        return Err(MetricError::UnexpectedResultType(data.result_type));
    }

    let samples: Vec<VectorSample> = serde_json::from_value(data.result)?;

    Ok(samples
        .into_iter()
        .enumerate()
        .filter_map(move |(i, sample)| to_raw_series(i, sample, kind)))
}

fn to_raw_series(index: usize, sample: VectorSample, kind: MetricKind) -> Option<RawSeries> {
    let mut value = sample.value.value;
    if !value.is_finite() {
        trace!("[{}] {} sample is {}, skipped", index, kind, value);
        return None;
    }

    let Some(identifier) = sample.metric.get(DESTINATION_UID).cloned() else {
        trace!("[{}] no {} label: {:?}", index, DESTINATION_UID, sample.metric);
        return None;
    };

    if kind.is_throughput() {
        value *= THROUGHPUT_SCALE;
    }

    trace!("[{}] {}={:.5}, uid={}", index, kind, value, identifier);
    Some(RawSeries::new(kind, identifier, value).with_labels(sample.metric))
}
