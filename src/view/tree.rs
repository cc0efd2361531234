use serde::{Deserialize, Serialize};

/// Ordered, renderer-agnostic description of one dashboard view.
///
/// The terminal adapter walks the nodes top to bottom; snapshot mode
/// serializes the whole tree to JSON instead.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ViewTree {
    pub nodes: Vec<ViewNode>,
}

impl ViewTree {
    pub fn new(nodes: Vec<ViewNode>) -> Self {
        Self { nodes }
    }

    /// Tree with no content at all, e.g. for an unrecognized tab
    pub fn empty() -> Self {
        Self::default()
    }

    /// Tree holding only the no-selection placeholder
    pub fn placeholder(message: impl Into<String>) -> Self {
        Self {
            nodes: vec![ViewNode::Placeholder {
                message: message.into(),
            }],
        }
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Put a notice in front of the existing nodes
    pub fn prepend_notice(&mut self, message: impl Into<String>) {
        self.nodes.insert(
            0,
            ViewNode::Notice {
                message: message.into(),
            },
        );
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ViewNode {
    Heading { text: String },
    Counter { label: String, value: u64 },
    Chart { spec: ChartSpec },
    Table { spec: TableSpec },
    Metrics { table: MetricsTable },
    Text { body: String },
    Notice { message: String },
    Placeholder { message: String },
}

/// One chart with explicit axis bindings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSpec {
    pub title: String,
    pub x: AxisSpec,
    pub y: AxisSpec,
    pub data: ChartData,
}

/// Field binding and human-readable label for one axis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AxisSpec {
    pub field: String,
    pub label: String,
}

impl AxisSpec {
    pub fn new(field: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            label: label.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Orientation {
    Horizontal,
    Vertical,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "shape", rename_all = "snake_case")]
pub enum ChartData {
    Bars {
        bars: Vec<BarPoint>,
        /// Category ordering across the whole population, not just the
        /// plotted subset
        category_order: Vec<String>,
        orientation: Orientation,
    },
    /// Smoothed distribution curve, no histogram or rug overlay
    Density {
        points: Vec<(f64, f64)>,
        bin_width: f64,
        bandwidth: f64,
        show_y_ticks: bool,
    },
}

/// One bar: scale by `value`, print `display` next to it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BarPoint {
    pub label: String,
    pub value: f64,
    pub display: String,
}

/// Raw data table, possibly capped to a leading slice of the rows
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableSpec {
    pub title: String,
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
    /// Fixed rendered width for every column
    pub column_width: u16,
    /// Row count before the detail cap was applied
    pub total_rows: usize,
}

impl TableSpec {
    pub fn is_truncated(&self) -> bool {
        self.rows.len() < self.total_rows
    }
}

/// Small metric grid: one row per statistic, one value column per series
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricsTable {
    pub columns: Vec<String>,
    pub rows: Vec<MetricsRow>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricsRow {
    pub metric: String,
    pub length: Option<f64>,
    pub inter_arrival: Option<f64>,
}
