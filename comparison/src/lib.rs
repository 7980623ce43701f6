pub mod config;
pub mod error;
pub mod export;
pub mod metrics;
pub mod model;
pub mod ranking;
pub mod selection;
pub mod source;

pub use error::ComparisonError;
pub use export::csv::{CsvExport, to_csv, to_csv_at};
pub use metrics::{Direction, METRIC_DEFINITIONS, MetricDefinition, MetricKey};
pub use model::{ComparisonSet, CorridorMetricSnapshot};
pub use ranking::types::{Classification, ClassificationBands, MetricRanking, RankingResult};
pub use ranking::{rank, rank_with_bands};
