pub mod entity_metric;
pub mod metric_kind;
pub mod object_metric;
pub mod raw_series;

pub use entity_metric::{EntityMetric, EntityType, MetricResponse};
pub use metric_kind::{MetricKind, Scope};
pub use object_metric::{MetricSet, ObjectMetric};
pub use raw_series::RawSeries;
