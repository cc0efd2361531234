use ratatui::{
    prelude::*,
    style::{Color, Modifier, Style},
    symbols,
    widgets::{Axis, BarChart, Block, Borders, Chart, Dataset, GraphType, List, ListItem},
};

use crate::utils::formatting::truncate_string;
use crate::view::tree::{BarPoint, ChartData, ChartSpec, Orientation};

const BAR_LABEL_WIDTH: usize = 16;

/// Render one chart spec into the given area
pub fn render_chart(spec: &ChartSpec, area: Rect, frame: &mut Frame) {
    match &spec.data {
        ChartData::Bars {
            bars, orientation, ..
        } => match orientation {
            Orientation::Horizontal => render_horizontal_bars(spec, bars, area, frame),
            Orientation::Vertical => render_vertical_bars(spec, bars, area, frame),
        },
        ChartData::Density {
            points,
            show_y_ticks,
            ..
        } => render_density(spec, points, *show_y_ticks, area, frame),
    }
}

/// Horizontal bars drawn as one row per category: label, proportional bar
/// glyphs, value. The terminal backend has no horizontal bar widget, so the
/// rows are plain list items.
fn render_horizontal_bars(spec: &ChartSpec, bars: &[BarPoint], area: Rect, frame: &mut Frame) {
    let block = Block::default()
        .title(spec.title.clone())
        .borders(Borders::ALL);
    if bars.is_empty() {
        frame.render_widget(block, area);
        return;
    }

    let max_value = bars.iter().map(|b| b.value).fold(0.0, f64::max);
    let value_width = bars.iter().map(|b| b.display.len()).max().unwrap_or(0);
    let inner_width = area.width.saturating_sub(2) as usize;
    let bar_width = inner_width.saturating_sub(BAR_LABEL_WIDTH + value_width + 3);

    // First row names the bindings, since glyph rows carry no axes
    let caption = format!("{} by {}", spec.x.label, spec.y.label);
    let mut items = vec![ListItem::new(caption).style(Style::default().fg(Color::DarkGray))];

    let visible = area.height.saturating_sub(3) as usize;
    items.extend(bars.iter().take(visible).map(|bar| {
        let filled = scaled_bar_len(bar.value, max_value, bar_width);
        let text = format!(
            "{:<label_width$} {} {}",
            truncate_string(&bar.label, BAR_LABEL_WIDTH),
            "█".repeat(filled),
            bar.display,
            label_width = BAR_LABEL_WIDTH,
        );
        ListItem::new(text).style(Style::default().fg(Color::Cyan))
    }));

    let list = List::new(items)
        .block(block)
        .style(Style::default().fg(Color::White));
    frame.render_widget(list, area);
}

fn render_vertical_bars(spec: &ChartSpec, bars: &[BarPoint], area: Rect, frame: &mut Frame) {
    let block = Block::default()
        .title(spec.title.clone())
        .borders(Borders::ALL);
    if bars.is_empty() {
        frame.render_widget(block, area);
        return;
    }

    let data: Vec<(&str, u64)> = bars
        .iter()
        .map(|bar| (bar.label.as_str(), bar.value.round().max(0.0) as u64))
        .collect();

    let chart = BarChart::default()
        .block(block)
        .data(&data)
        .bar_width(7)
        .bar_style(Style::default().fg(Color::Yellow))
        .value_style(Style::default().fg(Color::Black).bg(Color::Yellow));
    frame.render_widget(chart, area);
}

/// Smoothed distribution curve via a Braille line chart. Y tick labels are
/// dropped when the spec hides them; the y axis itself stays.
fn render_density(
    spec: &ChartSpec,
    points: &[(f64, f64)],
    show_y_ticks: bool,
    area: Rect,
    frame: &mut Frame,
) {
    if points.is_empty() {
        let block = Block::default()
            .title(spec.title.clone())
            .borders(Borders::ALL);
        frame.render_widget(block, area);
        return;
    }

    let datasets = vec![Dataset::default()
        .name(spec.x.label.clone())
        .marker(symbols::Marker::Braille)
        .style(Style::default().fg(Color::Cyan))
        .graph_type(GraphType::Line)
        .data(points)];

    let (min_x, max_x) = x_bounds(points);
    let max_y = points
        .iter()
        .map(|(_, y)| *y)
        .fold(0.0, f64::max)
        .max(f64::MIN_POSITIVE);

    let y_labels = if show_y_ticks {
        vec![
            "0".into(),
            format!("{:.3}", max_y / 2.0).into(),
            format!("{:.3}", max_y).into(),
        ]
    } else {
        Vec::new()
    };

    let chart = Chart::new(datasets)
        .block(
            Block::default()
                .title(Span::styled(
                    spec.title.clone(),
                    Style::default().add_modifier(Modifier::BOLD),
                ))
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::White)),
        )
        .x_axis(
            Axis::default()
                .title(spec.x.label.clone())
                .style(Style::default().fg(Color::Gray))
                .bounds([min_x, max_x])
                .labels(vec![
                    format!("{:.2}", min_x).into(),
                    format!("{:.2}", (min_x + max_x) / 2.0).into(),
                    format!("{:.2}", max_x).into(),
                ]),
        )
        .y_axis(
            Axis::default()
                .title(spec.y.label.clone())
                .style(Style::default().fg(Color::Gray))
                .bounds([0.0, max_y])
                .labels(y_labels),
        );

    frame.render_widget(chart, area);
}

/// Bar cells for a value against the chart maximum; nonzero values always
/// show at least one cell
fn scaled_bar_len(value: f64, max_value: f64, width: usize) -> usize {
    if max_value <= 0.0 || width == 0 || value <= 0.0 {
        return 0;
    }
    let cells = ((value / max_value).clamp(0.0, 1.0) * width as f64).round() as usize;
    cells.max(1).min(width)
}

/// Chart bounds over an ordered grid; degenerate single-point grids get a
/// half-unit margin so the axis mapping stays finite
fn x_bounds(points: &[(f64, f64)]) -> (f64, f64) {
    let min = points.first().map(|p| p.0).unwrap_or(0.0);
    let max = points.last().map(|p| p.0).unwrap_or(1.0);
    if max - min < f64::EPSILON {
        (min - 0.5, max + 0.5)
    } else {
        (min, max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scaled_bar_len() {
        assert_eq!(scaled_bar_len(50.0, 100.0, 40), 20);
        assert_eq!(scaled_bar_len(100.0, 100.0, 40), 40);
        assert_eq!(scaled_bar_len(0.0, 100.0, 40), 0);
        // Small but nonzero values stay visible
        assert_eq!(scaled_bar_len(0.1, 100.0, 40), 1);
        assert_eq!(scaled_bar_len(5.0, 0.0, 40), 0);
        assert_eq!(scaled_bar_len(5.0, 100.0, 0), 0);
    }

    #[test]
    fn test_x_bounds_widens_degenerate_grid() {
        let (min, max) = x_bounds(&[(3.0, 1.0)]);
        assert!(min < 3.0 && max > 3.0);

        let (min, max) = x_bounds(&[(0.0, 0.1), (10.0, 0.2)]);
        assert_eq!((min, max), (0.0, 10.0));
    }
}
