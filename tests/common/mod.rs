//! Shared helpers for integration tests

#![allow(dead_code)]

use treeviz::{TreeNode, Visualizer, VisualizerConfig};

/// Session with `input` already laid out on an 800px viewport.
pub fn session(input: &str) -> Visualizer {
    let mut viz = Visualizer::new(VisualizerConfig::for_viewport(800.0));
    viz.set_input(input).expect("input parses");
    viz
}

/// Compact shape signature: `1(2(4,5),3(6,_))`.
pub fn shape(node: &TreeNode) -> String {
    let label = node
        .value
        .map(|value| value.to_string())
        .unwrap_or_else(|| "?".to_string());
    if node.is_leaf() {
        return label;
    }
    let side = |child: Option<&TreeNode>| child.map(shape).unwrap_or_else(|| "_".to_string());
    let (left, right) = node.children();
    format!("{}({},{})", label, side(left), side(right))
}

/// `(value, x, y)` for every drawn node, sorted by value.
pub fn coordinates(viz: &Visualizer) -> Vec<(i64, f64, f64)> {
    let mut drawn: Vec<(i64, f64, f64)> = viz
        .scene()
        .nodes()
        .iter()
        .map(|node| (node.value, node.x, node.y))
        .collect();
    drawn.sort_by_key(|&(value, _, _)| value);
    drawn
}
