mod set;
mod snapshot;

pub use set::ComparisonSet;
pub use snapshot::CorridorMetricSnapshot;
