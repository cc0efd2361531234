use ratatui::{
    prelude::*,
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, Wrap},
};

use crate::utils::formatting::{format_count, format_metric, truncate_string};
use crate::view::tree::{MetricsTable, TableSpec};

/// Scrollable raw-data table. The widget owns only the scroll position;
/// the table spec flows in fresh on every frame.
pub struct DetailTable {
    row_offset: usize,
    col_offset: usize,
}

impl DetailTable {
    pub fn new() -> Self {
        Self {
            row_offset: 0,
            col_offset: 0,
        }
    }

    pub fn reset(&mut self) {
        self.row_offset = 0;
        self.col_offset = 0;
    }

    pub fn scroll_rows(&mut self, delta: isize, total_rows: usize) {
        self.row_offset = step(self.row_offset, delta, total_rows);
    }

    pub fn scroll_cols(&mut self, delta: isize, total_cols: usize) {
        self.col_offset = step(self.col_offset, delta, total_cols);
    }

    pub fn render(&self, spec: &TableSpec, area: Rect, frame: &mut Frame) {
        let col_width = spec.column_width.max(4);
        let inner_width = area.width.saturating_sub(2) as usize;
        let visible_cols = (inner_width / (col_width as usize + 1)).max(1);
        let visible_height = area.height.saturating_sub(4) as usize;

        let col_range = self.col_offset..spec.columns.len().min(self.col_offset + visible_cols);

        let header_cells = spec.columns[col_range.clone()].iter().map(|name| {
            Cell::from(truncate_string(name, col_width as usize)).style(
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            )
        });
        let header = Row::new(header_cells).height(1).bottom_margin(1);

        let rows = spec
            .rows
            .iter()
            .skip(self.row_offset)
            .take(visible_height)
            .map(|row| {
                let cells = col_range.clone().map(|idx| {
                    let text = row.get(idx).map(String::as_str).unwrap_or("");
                    Cell::from(truncate_string(text, col_width as usize))
                });
                Row::new(cells).style(Style::default().fg(Color::White))
            });

        let widths = vec![Constraint::Length(col_width); col_range.len()];
        let title = format!(
            "{} (row {}/{}, col {}/{})",
            spec.title,
            self.row_offset.min(spec.rows.len().saturating_sub(1)) + 1,
            spec.rows.len(),
            self.col_offset + 1,
            spec.columns.len()
        );

        let table = Table::new(rows)
            .widths(&widths)
            .header(header)
            .block(Block::default().borders(Borders::ALL).title(title));
        frame.render_widget(table, area);
    }
}

impl Default for DetailTable {
    fn default() -> Self {
        Self::new()
    }
}

/// Move an offset by `delta`, clamped to the addressable range
fn step(offset: usize, delta: isize, limit: usize) -> usize {
    let max = limit.saturating_sub(1);
    if delta.is_negative() {
        offset.saturating_sub(delta.unsigned_abs())
    } else {
        offset.saturating_add(delta as usize).min(max)
    }
}

/// Metric grid: one row per statistic, one value column per series
pub fn render_metrics(table: &MetricsTable, area: Rect, frame: &mut Frame) {
    let header_cells = table.columns.iter().map(|name| {
        Cell::from(name.as_str()).style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
    });
    let header = Row::new(header_cells).height(1).bottom_margin(1);

    let rows = table.rows.iter().map(|row| {
        Row::new(vec![
            Cell::from(row.metric.clone()).style(Style::default().fg(Color::Cyan)),
            Cell::from(format_metric(row.length)),
            Cell::from(format_metric(row.inter_arrival)),
        ])
        .style(Style::default().fg(Color::White))
    });

    let widths = [
        Constraint::Length(10),
        Constraint::Length(20),
        Constraint::Length(20),
    ];
    let widget = Table::new(rows)
        .widths(&widths)
        .header(header)
        .block(Block::default().borders(Borders::ALL).title("Metrics"));
    frame.render_widget(widget, area);
}

pub fn render_heading(text: &str, area: Rect, frame: &mut Frame) {
    let heading = Paragraph::new(Line::from(Span::styled(
        text.to_string(),
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    )))
    .alignment(Alignment::Center);
    frame.render_widget(heading, area);
}

pub fn render_counter(label: &str, value: u64, area: Rect, frame: &mut Frame) {
    let paragraph = Paragraph::new(Line::from(vec![
        Span::styled(
            format_count(value),
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(format!(" {}", label)),
    ]))
    .block(Block::default().borders(Borders::ALL));
    frame.render_widget(paragraph, area);
}

pub fn render_text(body: &str, area: Rect, frame: &mut Frame) {
    let paragraph = Paragraph::new(body.to_string())
        .style(Style::default().fg(Color::Gray))
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL).title("Notes"));
    frame.render_widget(paragraph, area);
}

pub fn render_notice(message: &str, area: Rect, frame: &mut Frame) {
    let paragraph = Paragraph::new(message.to_string())
        .style(Style::default().fg(Color::Yellow))
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Notice")
                .border_style(Style::default().fg(Color::Yellow)),
        );
    frame.render_widget(paragraph, area);
}

pub fn render_placeholder(message: &str, area: Rect, frame: &mut Frame) {
    let paragraph = Paragraph::new(message.to_string())
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(paragraph, area);
}
