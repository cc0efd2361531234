use ratatui::{
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame, Terminal,
};
use crossterm::{
    event::{self, Event, KeyCode},
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand,
};
use log::{info, warn};
use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::PathBuf;
use std::time::Duration;

use crate::config::settings::Config;
use crate::controller::reducer::{reduce, DashboardEvent, DashboardState, UploadPayload};
use crate::store::slots::{RecordStore, SlotId};
use crate::view::selector::Tab;
use crate::view::tree::{ViewNode, ViewTree};
use crate::visualization::charts::render_chart;
use crate::visualization::layouts::ViewLayout;
use crate::visualization::widgets::{self, DetailTable};

/// Terminal front end: owns the record store and dashboard state, feeds
/// every key press through the reducer, renders the returned view tree.
pub struct App {
    pub should_quit: bool,
    pub config: Config,
    pub store: RecordStore,
    pub state: DashboardState,
    pub tree: ViewTree,
    slot_files: HashMap<SlotId, PathBuf>,
    detail_table: DetailTable,
}

impl App {
    pub fn new(config: Config) -> App {
        let state = DashboardState::new(config.ui.default_tab.clone(), SlotId::scenario(1));
        let mut app = App {
            should_quit: false,
            store: RecordStore::new(),
            state,
            tree: ViewTree::empty(),
            slot_files: HashMap::new(),
            detail_table: DetailTable::new(),
            config,
        };
        app.refresh();
        app
    }

    /// Feed one event through the reducer and adopt the new state and tree
    pub fn dispatch(&mut self, event: DashboardEvent) {
        let (state, tree) = reduce(event, &self.state, &mut self.store, &self.config);
        self.state = state;
        self.tree = tree;
        // Offsets from the previous tree may be out of range in the new one
        self.detail_table.reset();
    }

    /// Recompute the tree for the current state without changing it
    pub fn refresh(&mut self) {
        self.dispatch(DashboardEvent::TabChanged(self.state.active_tab.clone()));
    }

    /// Load each file into scenario slots in argument order
    pub fn load_files(&mut self, files: &[PathBuf]) {
        for (i, path) in files.iter().enumerate() {
            self.load_file(SlotId::scenario(i + 1), path.clone());
        }
    }

    /// Select the n-th scenario slot (1-based)
    pub fn select_scenario(&mut self, index: usize) {
        self.dispatch(DashboardEvent::SlotSelected(SlotId::scenario(index)));
    }

    /// Switch to the given tab value, recognized or not; unrecognized
    /// values render no content
    pub fn select_tab_value(&mut self, tab: &str) {
        self.dispatch(DashboardEvent::TabChanged(tab.to_string()));
    }

    fn load_file(&mut self, slot: SlotId, path: PathBuf) {
        match fs::read(&path) {
            Ok(bytes) => {
                info!("loading {} into {}", path.display(), slot);
                self.slot_files.insert(slot.clone(), path);
                self.dispatch(DashboardEvent::UploadReceived {
                    slot,
                    payload: UploadPayload::Raw(bytes),
                });
            }
            Err(e) => {
                warn!("cannot read {}: {}", path.display(), e);
            }
        }
    }

    fn reload_selected(&mut self) {
        if let Some(path) = self.slot_files.get(&self.state.selected_slot).cloned() {
            self.load_file(self.state.selected_slot.clone(), path);
        }
    }

    fn select_tab(&mut self, tab: Tab) {
        self.select_tab_value(tab.key());
    }

    fn cycle_tab(&mut self) {
        let next = Tab::parse(&self.state.active_tab)
            .map(Tab::next)
            .unwrap_or(Tab::Overview);
        self.select_tab(next);
    }

    fn cycle_slot(&mut self) {
        let count = self.config.ui.scenario_labels.len().max(1);
        let current = (1..=count)
            .position(|i| SlotId::scenario(i) == self.state.selected_slot)
            .unwrap_or(0);
        self.select_scenario((current + 1) % count + 1);
    }

    fn scroll_rows(&mut self, delta: isize) {
        let total = self.current_table_rows();
        if let Some(total) = total {
            self.detail_table.scroll_rows(delta, total);
        }
    }

    fn scroll_cols(&mut self, delta: isize) {
        let total = self.current_table_cols();
        if let Some(total) = total {
            self.detail_table.scroll_cols(delta, total);
        }
    }

    fn current_table_rows(&self) -> Option<usize> {
        self.tree.nodes.iter().find_map(|n| match n {
            ViewNode::Table { spec } => Some(spec.rows.len()),
            _ => None,
        })
    }

    fn current_table_cols(&self) -> Option<usize> {
        self.tree.nodes.iter().find_map(|n| match n {
            ViewNode::Table { spec } => Some(spec.columns.len()),
            _ => None,
        })
    }

    pub fn run(&mut self) -> Result<(), Box<dyn std::error::Error>> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        stdout.execute(EnterAlternateScreen)?;

        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        loop {
            terminal.draw(|f| self.draw(f))?;

            if self.should_quit {
                break;
            }

            if event::poll(Duration::from_millis(100))? {
                if let Event::Key(key) = event::read()? {
                    match key.code {
                        KeyCode::Char('q') => self.should_quit = true,
                        KeyCode::Tab => self.cycle_tab(),
                        KeyCode::Char('1') => self.select_tab(Tab::Overview),
                        KeyCode::Char('2') => self.select_tab(Tab::Details),
                        KeyCode::Char('3') => self.select_tab(Tab::Statistics),
                        KeyCode::Char('s') => self.cycle_slot(),
                        KeyCode::Char('r') => self.reload_selected(),
                        KeyCode::Up => self.scroll_rows(-1),
                        KeyCode::Down => self.scroll_rows(1),
                        KeyCode::Left => self.scroll_cols(-1),
                        KeyCode::Right => self.scroll_cols(1),
                        _ => {}
                    }
                }
            }
        }

        disable_raw_mode()?;
        io::stdout().execute(LeaveAlternateScreen)?;
        Ok(())
    }

    fn draw(&mut self, f: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .margin(1)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Min(0),    // View tree
                Constraint::Length(3), // Footer
            ])
            .split(f.size());

        self.draw_header(f, chunks[0]);
        self.draw_tree(f, chunks[1]);
        self.draw_footer(f, chunks[2]);
    }

    fn draw_header(&self, f: &mut Frame, area: Rect) {
        let active = Tab::parse(&self.state.active_tab);
        let selected_style = Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD);
        let normal_style = Style::default().fg(Color::White);

        let mut spans: Vec<Span> = Vec::new();
        for (i, tab) in Tab::ALL.iter().enumerate() {
            let style = if Some(*tab) == active {
                selected_style
            } else {
                normal_style
            };
            spans.push(Span::styled(format!(" {} ", tab.title()), style));
            if i + 1 < Tab::ALL.len() {
                spans.push(Span::raw("|"));
            }
        }
        spans.push(Span::raw("  "));
        spans.push(Span::styled(
            self.selected_slot_label(),
            Style::default().fg(Color::Green),
        ));

        let header = Paragraph::new(Line::from(spans))
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(self.config.ui.title.clone()),
            )
            .alignment(Alignment::Center);
        f.render_widget(header, area);
    }

    fn draw_tree(&mut self, f: &mut Frame, area: Rect) {
        if self.tree.is_empty() {
            f.render_widget(Block::default().borders(Borders::ALL), area);
            return;
        }

        let nodes = ViewLayout::visible_nodes(&self.tree, area);
        let rects = ViewLayout::split(&nodes, area);

        for (node, rect) in nodes.iter().zip(rects.iter()) {
            match node {
                ViewNode::Heading { text } => widgets::render_heading(text, *rect, f),
                ViewNode::Counter { label, value } => {
                    widgets::render_counter(label, *value, *rect, f)
                }
                ViewNode::Chart { spec } => render_chart(spec, *rect, f),
                ViewNode::Table { spec } => self.detail_table.render(spec, *rect, f),
                ViewNode::Metrics { table } => widgets::render_metrics(table, *rect, f),
                ViewNode::Text { body } => widgets::render_text(body, *rect, f),
                ViewNode::Notice { message } => widgets::render_notice(message, *rect, f),
                ViewNode::Placeholder { message } => {
                    widgets::render_placeholder(message, *rect, f)
                }
            }
        }
    }

    fn draw_footer(&self, f: &mut Frame, area: Rect) {
        let help = "q quit | Tab/1-3 switch view | s scenario | r reload | arrows scroll table";
        let footer = Paragraph::new(help)
            .block(Block::default().borders(Borders::ALL))
            .alignment(Alignment::Center);
        f.render_widget(footer, area);
    }

    fn selected_slot_label(&self) -> String {
        let count = self.config.ui.scenario_labels.len();
        (1..=count)
            .position(|i| SlotId::scenario(i) == self.state.selected_slot)
            .and_then(|idx| self.config.ui.scenario_labels.get(idx))
            .cloned()
            .unwrap_or_else(|| self.state.selected_slot.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const CSV: &str = "Time,Source,Protocol,Length\n0.0,10.0.0.1,TCP,60\n0.5,10.0.0.2,DNS,73\n";

    fn temp_csv(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_new_app_shows_placeholder() {
        let app = App::new(Config::default());
        assert_eq!(app.state.active_tab, "overview");
        assert_eq!(app.state.selected_slot, SlotId::scenario(1));
        assert!(matches!(app.tree.nodes[0], ViewNode::Placeholder { .. }));
    }

    #[test]
    fn test_tab_cycling() {
        let mut app = App::new(Config::default());
        app.cycle_tab();
        assert_eq!(app.state.active_tab, "details");
        app.cycle_tab();
        assert_eq!(app.state.active_tab, "statistics");
        app.cycle_tab();
        assert_eq!(app.state.active_tab, "overview");
    }

    #[test]
    fn test_unknown_tab_cycles_to_overview() {
        let mut config = Config::default();
        config.ui.default_tab = "bogus".to_string();
        let mut app = App::new(config);

        assert!(app.tree.is_empty() || matches!(app.tree.nodes[0], ViewNode::Placeholder { .. }));
        app.cycle_tab();
        assert_eq!(app.state.active_tab, "overview");
    }

    #[test]
    fn test_slot_cycling_wraps() {
        let mut app = App::new(Config::default());
        app.cycle_slot();
        assert_eq!(app.state.selected_slot, SlotId::scenario(2));
        app.cycle_slot();
        assert_eq!(app.state.selected_slot, SlotId::scenario(1));
    }

    #[test]
    fn test_load_files_fills_slots_in_order() {
        let first = temp_csv(CSV);
        let second = temp_csv("Time,Source,Protocol,Length\n0.0,10.0.0.9,MQTT,54\n");

        let mut app = App::new(Config::default());
        app.load_files(&[first.path().to_path_buf(), second.path().to_path_buf()]);

        assert_eq!(app.store.dataset(&SlotId::scenario(1)).unwrap().row_count(), 2);
        assert_eq!(app.store.dataset(&SlotId::scenario(2)).unwrap().row_count(), 1);
        assert!(app
            .tree
            .nodes
            .iter()
            .any(|n| matches!(n, ViewNode::Counter { value, .. } if *value == 2)));
    }

    #[test]
    fn test_missing_file_keeps_placeholder() {
        let mut app = App::new(Config::default());
        app.load_files(&[PathBuf::from("/nonexistent/capture.csv")]);
        assert!(matches!(app.tree.nodes[0], ViewNode::Placeholder { .. }));
    }

    #[test]
    fn test_reload_picks_up_changed_file() {
        let file = temp_csv(CSV);
        let mut app = App::new(Config::default());
        app.load_files(&[file.path().to_path_buf()]);
        assert_eq!(app.store.dataset(&SlotId::scenario(1)).unwrap().row_count(), 2);

        fs::write(file.path(), "Time,Source,Protocol,Length\n0.0,10.0.0.1,TCP,60\n").unwrap();
        app.reload_selected();
        assert_eq!(app.store.dataset(&SlotId::scenario(1)).unwrap().row_count(), 1);
    }

    #[test]
    fn test_scrolling_without_table_is_a_no_op() {
        let mut app = App::new(Config::default());
        app.scroll_rows(1);
        app.scroll_cols(1);
    }

    #[test]
    fn test_select_scenario_by_index() {
        let mut app = App::new(Config::default());
        app.select_scenario(2);
        assert_eq!(app.state.selected_slot, SlotId::scenario(2));
    }
}
