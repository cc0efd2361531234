pub mod charts;
pub mod layouts;
pub mod widgets;

pub use charts::render_chart;
pub use layouts::ViewLayout;
pub use widgets::{
    render_counter, render_heading, render_metrics, render_notice, render_placeholder,
    render_text, DetailTable,
};
