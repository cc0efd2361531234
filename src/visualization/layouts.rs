use ratatui::prelude::*;

use crate::view::tree::{ViewNode, ViewTree};

/// Terminals shorter than this drop the explanation text nodes
const COMPACT_HEIGHT: u16 = 20;

pub struct ViewLayout;

impl ViewLayout {
    /// Nodes worth rendering at this terminal size, in tree order
    pub fn visible_nodes(tree: &ViewTree, area: Rect) -> Vec<&ViewNode> {
        if area.height >= COMPACT_HEIGHT {
            tree.nodes.iter().collect()
        } else {
            tree.nodes
                .iter()
                .filter(|node| !matches!(node, ViewNode::Text { .. }))
                .collect()
        }
    }

    /// One rect per node, stacked vertically. Fixed-height nodes take what
    /// they need; charts and tables share the rest.
    pub fn split(nodes: &[&ViewNode], area: Rect) -> Vec<Rect> {
        let constraints: Vec<Constraint> = nodes
            .iter()
            .map(|node| Self::node_constraint(node))
            .collect();

        Layout::default()
            .direction(Direction::Vertical)
            .constraints(constraints)
            .split(area)
            .to_vec()
    }

    fn node_constraint(node: &ViewNode) -> Constraint {
        match node {
            ViewNode::Heading { .. } => Constraint::Length(1),
            ViewNode::Counter { .. } => Constraint::Length(3),
            ViewNode::Notice { .. } => Constraint::Length(3),
            ViewNode::Text { .. } => Constraint::Length(5),
            ViewNode::Metrics { .. } => Constraint::Length(7),
            ViewNode::Chart { .. } => Constraint::Min(8),
            ViewNode::Table { .. } => Constraint::Min(8),
            ViewNode::Placeholder { .. } => Constraint::Min(3),
        }
    }
}
