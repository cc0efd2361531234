pub mod formatting;

pub use formatting::{format_count, format_metric, format_percent, truncate_string};
