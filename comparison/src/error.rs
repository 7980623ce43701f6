use thiserror::Error;

use crate::metrics::MetricKey;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ComparisonError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("corridor {corridor_id} has no usable value for {metric}")]
    MissingMetric {
        corridor_id: String,
        metric: MetricKey,
    },
}

impl ComparisonError {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }
}
