pub mod selector;
pub mod tree;

pub use selector::{build_view, Tab, PLACEHOLDER_TEXT};
pub use tree::{
    AxisSpec, BarPoint, ChartData, ChartSpec, MetricsRow, MetricsTable, Orientation, TableSpec,
    ViewNode, ViewTree,
};
