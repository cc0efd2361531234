// Library exports for capture-dashboard
pub mod analysis;
pub mod config;
pub mod controller;
pub mod store;
pub mod ui;
pub mod utils;
pub mod view;
pub mod visualization;

pub use analysis::{density, statistics, summary};
pub use config::settings;
pub use controller::reducer;
pub use store::{dataset, loader, slots};
pub use ui::app;
pub use utils::formatting;
pub use view::{selector, tree};
pub use visualization::{charts, widgets, layouts};

// Error types
pub use anyhow::{Error, Result};
