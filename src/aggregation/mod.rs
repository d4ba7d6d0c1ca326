pub mod entity_merge;
pub mod merge;

pub use entity_merge::EntityMerger;
pub use merge::{merge_series, normalize_metric_set};
