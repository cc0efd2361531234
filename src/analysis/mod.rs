use thiserror::Error;

pub mod density;
pub mod statistics;
pub mod summary;

pub use density::{density_estimate, DensityEstimate};
pub use statistics::{describe, describe_values, inter_arrival, DescriptiveStats};
pub use summary::{
    device_summary, protocol_summary, DeviceCount, DeviceSummary, ProtocolShare, ProtocolSummary,
};

/// Raised when an aggregation needs a column the dataset does not carry.
/// The affected view section degrades to a notice; everything else renders.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AggregateError {
    #[error("Column '{column}' not found in this capture")]
    MissingColumn { column: String },
}

impl AggregateError {
    pub fn missing_column(column: impl Into<String>) -> Self {
        Self::MissingColumn {
            column: column.into(),
        }
    }
}
