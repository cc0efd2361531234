use log::{debug, warn};

use crate::analysis::density::{density_estimate, DensityEstimate};
use crate::analysis::statistics::{describe, describe_values, inter_arrival, DescriptiveStats};
use crate::analysis::summary::{device_summary, protocol_summary, DeviceSummary, ProtocolSummary};
use crate::config::settings::Config;
use crate::store::dataset::{Dataset, LENGTH_COLUMN};
use crate::utils::formatting::{format_count, format_percent};
use crate::view::tree::{
    AxisSpec, BarPoint, ChartData, ChartSpec, MetricsRow, MetricsTable, Orientation, TableSpec,
    ViewNode, ViewTree,
};

/// Shown when the selected scenario slot has no dataset yet
pub const PLACEHOLDER_TEXT: &str = "Select a capture file to analyze.";

/// One-line explanation per statistic, shown under the metrics table
const METRIC_NOTES: &str = "mean: arithmetic average of the observed values.\n\
median: middle value; half the observations fall below it.\n\
std: sample spread of the values around the mean.";

/// Dashboard tabs in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Overview,
    Details,
    Statistics,
}

impl Tab {
    pub const ALL: [Tab; 3] = [Tab::Overview, Tab::Details, Tab::Statistics];

    /// Parse a tab value. Unknown values parse to nothing; the selector
    /// renders no content for them rather than failing.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "overview" => Some(Tab::Overview),
            "details" => Some(Tab::Details),
            "statistics" => Some(Tab::Statistics),
            _ => None,
        }
    }

    /// Stable identifier used in events and config files
    pub fn key(self) -> &'static str {
        match self {
            Tab::Overview => "overview",
            Tab::Details => "details",
            Tab::Statistics => "statistics",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Tab::Overview => "Overview",
            Tab::Details => "Details",
            Tab::Statistics => "Statistics",
        }
    }

    pub fn next(self) -> Self {
        match self {
            Tab::Overview => Tab::Details,
            Tab::Details => Tab::Statistics,
            Tab::Statistics => Tab::Overview,
        }
    }
}

/// Build the view tree for one tab value over the given dataset
pub fn build_view(tab: &str, dataset: &Dataset, config: &Config) -> ViewTree {
    debug!("building {} view over {} rows", tab, dataset.row_count());
    match Tab::parse(tab) {
        Some(Tab::Overview) => overview_view(dataset, config),
        Some(Tab::Details) => details_view(dataset, config),
        Some(Tab::Statistics) => statistics_view(dataset, config),
        None => ViewTree::empty(),
    }
}

/// Heading, packet counter, protocol share chart, busiest-device chart.
/// A summary whose column is missing degrades to a notice; the other
/// sections still render.
fn overview_view(dataset: &Dataset, config: &Config) -> ViewTree {
    let analysis = &config.analysis;
    let mut nodes = vec![
        ViewNode::Heading {
            text: config.ui.title.clone(),
        },
        ViewNode::Counter {
            label: "Packets captured".into(),
            value: dataset.row_count() as u64,
        },
    ];

    match protocol_summary(dataset, analysis.protocol_top_n) {
        Ok(summary) => nodes.push(ViewNode::Chart {
            spec: protocol_chart(&summary, analysis.protocol_top_n),
        }),
        Err(e) => {
            warn!("overview: {}", e);
            nodes.push(ViewNode::Notice {
                message: e.to_string(),
            });
        }
    }

    match device_summary(dataset, analysis.device_top_n) {
        Ok(summary) => nodes.push(ViewNode::Chart {
            spec: device_chart(&summary, analysis.device_top_n),
        }),
        Err(e) => {
            warn!("overview: {}", e);
            nodes.push(ViewNode::Notice {
                message: e.to_string(),
            });
        }
    }

    ViewTree::new(nodes)
}

/// Every column and row of the raw dataset, capped to `max_detail_rows`
/// (0 disables the cap) with an explicit notice when the cap bites
fn details_view(dataset: &Dataset, config: &Config) -> ViewTree {
    let total = dataset.row_count();
    let cap = match config.analysis.max_detail_rows {
        0 => total,
        n => n,
    };
    let spec = TableSpec {
        title: "Packet Details".into(),
        columns: dataset.columns().to_vec(),
        rows: dataset.rows().iter().take(cap).cloned().collect(),
        column_width: config.ui.detail_column_width,
        total_rows: total,
    };

    let mut nodes = vec![ViewNode::Heading {
        text: "Packet Details".into(),
    }];
    if spec.is_truncated() {
        nodes.push(ViewNode::Notice {
            message: format!("Showing first {} of {} rows", spec.rows.len(), total),
        });
    }
    nodes.push(ViewNode::Table { spec });

    ViewTree::new(nodes)
}

/// Metrics table (mean/median/std for packet length and inter-arrival
/// time), explanation text, and the two smoothed distribution curves
fn statistics_view(dataset: &Dataset, config: &Config) -> ViewTree {
    let analysis = &config.analysis;
    let mut nodes = vec![ViewNode::Heading {
        text: "Statistical Metrics".into(),
    }];

    let length_stats = match describe(dataset, LENGTH_COLUMN) {
        Ok(stats) => Some(stats),
        Err(e) => {
            warn!("statistics: {}", e);
            nodes.push(ViewNode::Notice {
                message: e.to_string(),
            });
            None
        }
    };
    let arrivals = match inter_arrival(dataset) {
        Ok(values) => Some(values),
        Err(e) => {
            warn!("statistics: {}", e);
            nodes.push(ViewNode::Notice {
                message: e.to_string(),
            });
            None
        }
    };
    let arrival_stats = arrivals.as_deref().map(describe_values);

    if length_stats.is_some() || arrival_stats.is_some() {
        nodes.push(ViewNode::Metrics {
            table: metrics_table(length_stats, arrival_stats),
        });
        nodes.push(ViewNode::Text {
            body: METRIC_NOTES.into(),
        });
    }

    if let Some(stats) = length_stats {
        if stats.is_empty() {
            nodes.push(ViewNode::Notice {
                message: "Column 'Length' has no numeric values".into(),
            });
        } else if let Some(cells) = dataset.numeric_column(LENGTH_COLUMN) {
            let values: Vec<f64> = cells.into_iter().flatten().collect();
            nodes.push(ViewNode::Chart {
                spec: density_chart(
                    "Packet Size Distribution",
                    "Length",
                    "Packet Length (bytes)",
                    density_estimate(&values, analysis.length_bin_width),
                ),
            });
        }
    }

    if let Some(values) = &arrivals {
        if values.is_empty() {
            nodes.push(ViewNode::Notice {
                message: "Not enough timestamps for inter-arrival analysis".into(),
            });
        } else {
            nodes.push(ViewNode::Chart {
                spec: density_chart(
                    "Inter-Arrival Time Distribution",
                    "InterArrival",
                    "Inter-Arrival Time (s)",
                    density_estimate(values, analysis.inter_arrival_bin_width),
                ),
            });
        }
    }

    ViewTree::new(nodes)
}

fn protocol_chart(summary: &ProtocolSummary, top_n: usize) -> ChartSpec {
    ChartSpec {
        title: format!("Percentage of Packets per Protocol (Top {})", top_n),
        x: AxisSpec::new("Percentage", "Percentage of Total"),
        y: AxisSpec::new("Protocol", "Communication Protocol"),
        data: ChartData::Bars {
            bars: summary
                .shares
                .iter()
                .map(|share| BarPoint {
                    label: share.protocol.clone(),
                    value: share.percentage,
                    display: format_percent(share.percentage),
                })
                .collect(),
            category_order: summary.category_order.clone(),
            orientation: Orientation::Horizontal,
        },
    }
}

fn device_chart(summary: &DeviceSummary, top_n: usize) -> ChartSpec {
    let bars: Vec<BarPoint> = summary
        .devices
        .iter()
        .map(|device| BarPoint {
            label: device.device.clone(),
            value: device.count as f64,
            display: format_count(device.count),
        })
        .collect();
    let category_order = bars.iter().map(|b| b.label.clone()).collect();

    ChartSpec {
        title: format!("Packets per Device (Top {})", top_n),
        x: AxisSpec::new("Count", "Number of Packets"),
        y: AxisSpec::new("Source", "Device IP"),
        data: ChartData::Bars {
            bars,
            category_order,
            orientation: Orientation::Horizontal,
        },
    }
}

fn density_chart(title: &str, field: &str, label: &str, estimate: DensityEstimate) -> ChartSpec {
    ChartSpec {
        title: title.to_string(),
        x: AxisSpec::new(field, label),
        y: AxisSpec::new("Density", "Density"),
        data: ChartData::Density {
            points: estimate.points,
            bin_width: estimate.bin_width,
            bandwidth: estimate.bandwidth,
            show_y_ticks: false,
        },
    }
}

fn metrics_table(
    length: Option<DescriptiveStats>,
    arrival: Option<DescriptiveStats>,
) -> MetricsTable {
    let row = |metric: &str, pick: fn(&DescriptiveStats) -> Option<f64>| MetricsRow {
        metric: metric.to_string(),
        length: length.as_ref().and_then(pick),
        inter_arrival: arrival.as_ref().and_then(pick),
    };

    MetricsTable {
        columns: vec![
            "Metric".into(),
            "Packet Length".into(),
            "Inter-Arrival Time".into(),
        ],
        rows: vec![
            row("mean", |s| s.mean),
            row("median", |s| s.p50),
            row("std", |s| s.std),
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(t: &str, s: &str, p: &str, l: &str) -> Vec<String> {
        vec![t.into(), s.into(), p.into(), l.into()]
    }

    fn sample_dataset() -> Dataset {
        Dataset::new(
            vec![
                "Time".into(),
                "Source".into(),
                "Protocol".into(),
                "Length".into(),
            ],
            vec![
                row("0.0", "10.0.0.1", "TCP", "60"),
                row("0.5", "10.0.0.2", "DNS", "73"),
                row("1.0", "10.0.0.1", "TCP", "1500"),
            ],
        )
    }

    #[test]
    fn test_tab_parsing() {
        assert_eq!(Tab::parse("overview"), Some(Tab::Overview));
        assert_eq!(Tab::parse("details"), Some(Tab::Details));
        assert_eq!(Tab::parse("statistics"), Some(Tab::Statistics));
        assert_eq!(Tab::parse("Overview"), None);
        assert_eq!(Tab::parse("nonsense"), None);
    }

    #[test]
    fn test_tab_cycle() {
        assert_eq!(Tab::Overview.next(), Tab::Details);
        assert_eq!(Tab::Details.next(), Tab::Statistics);
        assert_eq!(Tab::Statistics.next(), Tab::Overview);
    }

    #[test]
    fn test_unknown_tab_renders_nothing() {
        let tree = build_view("bogus", &sample_dataset(), &Config::default());
        assert!(tree.is_empty());
    }

    #[test]
    fn test_overview_nodes() {
        let tree = build_view("overview", &sample_dataset(), &Config::default());
        assert_eq!(tree.nodes.len(), 4);

        assert!(matches!(tree.nodes[0], ViewNode::Heading { .. }));
        match &tree.nodes[1] {
            ViewNode::Counter { value, .. } => assert_eq!(*value, 3),
            other => panic!("expected counter, got {:?}", other),
        }

        match &tree.nodes[2] {
            ViewNode::Chart { spec } => {
                assert_eq!(spec.x.field, "Percentage");
                assert_eq!(spec.y.label, "Communication Protocol");
                match &spec.data {
                    ChartData::Bars {
                        bars,
                        category_order,
                        orientation,
                    } => {
                        assert_eq!(*orientation, Orientation::Horizontal);
                        assert_eq!(bars[0].label, "TCP");
                        assert_eq!(bars[0].display, "66.7%");
                        assert_eq!(category_order, &["TCP", "DNS"]);
                    }
                    other => panic!("expected bars, got {:?}", other),
                }
            }
            other => panic!("expected chart, got {:?}", other),
        }

        match &tree.nodes[3] {
            ViewNode::Chart { spec } => {
                assert_eq!(spec.x.field, "Count");
                assert_eq!(spec.y.label, "Device IP");
                match &spec.data {
                    ChartData::Bars { bars, .. } => {
                        assert_eq!(bars[0].label, "10.0.0.1");
                        assert_eq!(bars[0].display, "2");
                    }
                    other => panic!("expected bars, got {:?}", other),
                }
            }
            other => panic!("expected chart, got {:?}", other),
        }
    }

    #[test]
    fn test_overview_degrades_per_missing_column() {
        let ds = Dataset::new(
            vec!["Time".into(), "Source".into(), "Length".into()],
            vec![vec!["0.0".into(), "10.0.0.1".into(), "60".into()]],
        );
        let tree = build_view("overview", &ds, &Config::default());

        let notices = tree
            .nodes
            .iter()
            .filter(|n| matches!(n, ViewNode::Notice { .. }))
            .count();
        let charts = tree
            .nodes
            .iter()
            .filter(|n| matches!(n, ViewNode::Chart { .. }))
            .count();
        assert_eq!(notices, 1);
        assert_eq!(charts, 1);
    }

    #[test]
    fn test_details_caps_rows_with_notice() {
        let mut config = Config::default();
        config.analysis.max_detail_rows = 2;
        let tree = build_view("details", &sample_dataset(), &config);

        match &tree.nodes[1] {
            ViewNode::Notice { message } => {
                assert_eq!(message, "Showing first 2 of 3 rows");
            }
            other => panic!("expected notice, got {:?}", other),
        }
        match &tree.nodes[2] {
            ViewNode::Table { spec } => {
                assert_eq!(spec.rows.len(), 2);
                assert_eq!(spec.total_rows, 3);
                assert_eq!(spec.columns.len(), 4);
                assert!(spec.is_truncated());
            }
            other => panic!("expected table, got {:?}", other),
        }
    }

    #[test]
    fn test_details_below_cap_has_no_notice() {
        let tree = build_view("details", &sample_dataset(), &Config::default());
        assert_eq!(tree.nodes.len(), 2);
        match &tree.nodes[1] {
            ViewNode::Table { spec } => assert!(!spec.is_truncated()),
            other => panic!("expected table, got {:?}", other),
        }
    }

    #[test]
    fn test_details_zero_cap_means_unlimited() {
        let mut config = Config::default();
        config.analysis.max_detail_rows = 0;
        let tree = build_view("details", &sample_dataset(), &config);

        match &tree.nodes[1] {
            ViewNode::Table { spec } => {
                assert_eq!(spec.rows.len(), 3);
                assert!(!spec.is_truncated());
            }
            other => panic!("expected table, got {:?}", other),
        }
    }

    #[test]
    fn test_statistics_nodes() {
        let tree = build_view("statistics", &sample_dataset(), &Config::default());

        let metrics = tree.nodes.iter().find_map(|n| match n {
            ViewNode::Metrics { table } => Some(table),
            _ => None,
        });
        let table = metrics.expect("metrics table missing");
        assert_eq!(table.rows.len(), 3);
        assert_eq!(table.rows[0].metric, "mean");
        assert_eq!(table.rows[1].metric, "median");
        assert_eq!(table.rows[2].metric, "std");
        assert!(table.rows[0].length.is_some());
        assert!(table.rows[0].inter_arrival.is_some());

        assert!(tree
            .nodes
            .iter()
            .any(|n| matches!(n, ViewNode::Text { .. })));

        let densities: Vec<_> = tree
            .nodes
            .iter()
            .filter_map(|n| match n {
                ViewNode::Chart { spec } => match &spec.data {
                    ChartData::Density {
                        bin_width,
                        show_y_ticks,
                        ..
                    } => Some((*bin_width, *show_y_ticks)),
                    _ => None,
                },
                _ => None,
            })
            .collect();
        assert_eq!(densities.len(), 2);
        assert_eq!(densities[0], (10.0, false));
        assert_eq!(densities[1], (0.01, false));
    }

    #[test]
    fn test_statistics_degrades_without_time_column() {
        let ds = Dataset::new(
            vec!["Source".into(), "Length".into()],
            vec![
                vec!["10.0.0.1".into(), "60".into()],
                vec!["10.0.0.2".into(), "90".into()],
            ],
        );
        let tree = build_view("statistics", &ds, &Config::default());

        assert!(tree.nodes.iter().any(
            |n| matches!(n, ViewNode::Notice { message } if message.contains("'Time'")),
        ));

        let table = tree
            .nodes
            .iter()
            .find_map(|n| match n {
                ViewNode::Metrics { table } => Some(table),
                _ => None,
            })
            .expect("metrics table missing");
        assert!(table.rows[0].length.is_some());
        assert!(table.rows[0].inter_arrival.is_none());

        let charts = tree
            .nodes
            .iter()
            .filter(|n| matches!(n, ViewNode::Chart { .. }))
            .count();
        assert_eq!(charts, 1);
    }
}
