use serde::{Deserialize, Serialize};
use std::fs;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    pub ui: UiConfig,
    pub analysis: AnalysisConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct UiConfig {
    /// Dashboard title shown as the overview heading
    pub title: String,
    /// Tab presented on startup (overview, details, statistics)
    pub default_tab: String,
    /// One label per scenario slot; the label count decides how many
    /// slots the dashboard binds
    pub scenario_labels: Vec<String>,
    /// Fixed rendered width of each detail-table column
    pub detail_column_width: u16,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AnalysisConfig {
    /// Protocols plotted in the overview share chart
    pub protocol_top_n: usize,
    /// Devices plotted in the overview device chart
    pub device_top_n: usize,
    /// Grid step for the packet-length density curve
    pub length_bin_width: f64,
    /// Grid step for the inter-arrival-time density curve
    pub inter_arrival_bin_width: f64,
    /// Rows the detail table shows before cutting off; 0 disables the cap
    pub max_detail_rows: usize,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            title: "Network Capture Analysis".to_string(),
            default_tab: "overview".to_string(),
            scenario_labels: vec!["Scenario 1".to_string(), "Scenario 2".to_string()],
            detail_column_width: 18,
        }
    }
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            protocol_top_n: 13,
            device_top_n: 10,
            length_bin_width: 10.0,
            inter_arrival_bin_width: 0.01,
            max_detail_rows: 1000,
        }
    }
}

impl Config {
    pub fn load_from_file(path: &str) -> Result<Self, Box<dyn std::error::Error>> {
        let content = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    pub fn save_to_file(&self, path: &str) -> Result<(), Box<dyn std::error::Error>> {
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }
}
