pub mod builder;
pub mod duration;

pub use builder::MetricQuery;
pub use duration::validate_rate_window;
