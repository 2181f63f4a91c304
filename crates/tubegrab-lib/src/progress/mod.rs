mod aggregator;
mod types;

pub use aggregator::ProgressAggregator;
pub use types::{CountPolicy, ProgressEvent, ProgressSink};
