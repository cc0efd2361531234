use std::collections::HashMap;

use serde::Serialize;

use crate::analysis::AggregateError;
use crate::store::dataset::{Dataset, PROTOCOL_COLUMN, SOURCE_COLUMN};

/// Share of total traffic carried by one protocol
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProtocolShare {
    pub protocol: String,
    pub count: u64,
    pub percentage: f64,
}

/// Protocol distribution of one capture, largest share first
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProtocolSummary {
    /// Leading shares, at most the requested limit
    pub shares: Vec<ProtocolShare>,
    /// Every protocol in descending share order, for chart category ordering
    pub category_order: Vec<String>,
    pub total_packets: u64,
}

/// Packets attributed to one sending device
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DeviceCount {
    pub device: String,
    pub count: u64,
}

/// Busiest sending devices of one capture, largest count first
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DeviceSummary {
    pub devices: Vec<DeviceCount>,
    pub total_packets: u64,
}

/// Group rows by the Protocol column and rank protocols by their share of
/// the total row count. Percentages are against all rows, so rows with a
/// blank protocol cell lower every share without forming a group of their
/// own. Ties keep first-seen order.
pub fn protocol_summary(
    dataset: &Dataset,
    top_n: usize,
) -> Result<ProtocolSummary, AggregateError> {
    let cells = dataset
        .text_column(PROTOCOL_COLUMN)
        .ok_or_else(|| AggregateError::missing_column(PROTOCOL_COLUMN))?;
    let total = dataset.row_count() as u64;

    let mut groups = count_groups(&cells);
    groups.sort_by(|a, b| b.1.cmp(&a.1));

    let category_order: Vec<String> = groups.iter().map(|(name, _)| name.clone()).collect();
    let mut shares: Vec<ProtocolShare> = groups
        .into_iter()
        .map(|(protocol, count)| ProtocolShare {
            protocol,
            count,
            percentage: if total > 0 {
                count as f64 / total as f64 * 100.0
            } else {
                0.0
            },
        })
        .collect();
    shares.truncate(top_n);

    Ok(ProtocolSummary {
        shares,
        category_order,
        total_packets: total,
    })
}

/// Group rows by the Source column and rank devices by packet count.
/// Ties keep first-seen order.
pub fn device_summary(dataset: &Dataset, top_n: usize) -> Result<DeviceSummary, AggregateError> {
    let cells = dataset
        .text_column(SOURCE_COLUMN)
        .ok_or_else(|| AggregateError::missing_column(SOURCE_COLUMN))?;
    let total = dataset.row_count() as u64;

    let mut groups = count_groups(&cells);
    groups.sort_by(|a, b| b.1.cmp(&a.1));

    let mut devices: Vec<DeviceCount> = groups
        .into_iter()
        .map(|(device, count)| DeviceCount { device, count })
        .collect();
    devices.truncate(top_n);

    Ok(DeviceSummary {
        devices,
        total_packets: total,
    })
}

/// Count cell occurrences, keeping groups in first-seen row order.
/// Blank cells are not a group.
fn count_groups(cells: &[&str]) -> Vec<(String, u64)> {
    let mut order: Vec<String> = Vec::new();
    let mut counts: HashMap<String, u64> = HashMap::new();

    for cell in cells {
        let value = cell.trim();
        if value.is_empty() {
            continue;
        }
        match counts.get_mut(value) {
            Some(n) => *n += 1,
            None => {
                order.push(value.to_string());
                counts.insert(value.to_string(), 1);
            }
        }
    }

    order
        .into_iter()
        .map(|name| {
            let count = counts.get(&name).copied().unwrap_or(0);
            (name, count)
        })
        .collect()
}
