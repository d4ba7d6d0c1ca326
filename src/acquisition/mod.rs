pub mod acquirer;
pub mod aggregator;
pub mod getter;
pub mod getter_factory;

pub use acquirer::{MetricsAcquirer, ScopedMetrics};
pub use aggregator::Aggregator;
pub use getter::{EntityMetricGetter, IstioEntityGetter};
pub use getter_factory::GetterFactory;
