//! Flattened render projection
//!
//! A pre-order walk of the laid-out tree yields one [`RenderNode`] per node and
//! one [`RenderEdge`] per parent/child link. Entries are addressed by
//! [`NodeId`], so two nodes that happen to share coordinates never get
//! confused with each other.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::tree::{NodeId, Phase, TraversalEvent, Tree, TreeNode};

/// Display status of a node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeStatus {
    /// Not reached by the current run
    #[default]
    Unvisited,
    /// Reached, value not yet processed
    Exploring,
    /// Value processed
    Visited,
}

impl From<Phase> for NodeStatus {
    fn from(phase: Phase) -> Self {
        match phase {
            Phase::Exploring => Self::Exploring,
            Phase::Visited => Self::Visited,
        }
    }
}

/// Drawable node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderNode {
    /// Stable id
    pub id: NodeId,
    /// Value label
    pub value: i64,
    /// Center x
    pub x: f64,
    /// Center y
    pub y: f64,
    /// Current status
    pub status: NodeStatus,
}

/// Drawable link; `(x1, y1)` is the child end, `(x2, y2)` the parent end
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderEdge {
    /// Parent node
    pub parent: NodeId,
    /// Child node
    pub child: NodeId,
    /// Child x
    pub x1: f64,
    /// Child y
    pub y1: f64,
    /// Parent x
    pub x2: f64,
    /// Parent y
    pub y2: f64,
}

/// Errors from scene updates
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RenderError {
    /// No node with this id is drawn
    #[error("Node {0} is not part of the scene")]
    UnknownNode(NodeId),
}

/// Ordered node and edge lists handed to a drawing surface
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RenderScene {
    nodes: Vec<RenderNode>,
    edges: Vec<RenderEdge>,
    #[serde(skip)]
    index: HashMap<NodeId, usize>,
}

impl RenderScene {
    /// Empty scene
    pub fn new() -> Self {
        Self::default()
    }

    /// Project a tree; placeholder subtrees are skipped.
    pub fn from_tree(tree: &Tree) -> Self {
        let mut scene = Self::new();
        let mut stack: Vec<(&TreeNode, Option<usize>)> = vec![(tree.root(), None)];

        while let Some((node, parent)) = stack.pop() {
            let Some(value) = node.value else {
                continue;
            };

            let slot = scene.nodes.len();
            scene.index.insert(node.id, slot);
            scene.nodes.push(RenderNode {
                id: node.id,
                value,
                x: node.x,
                y: node.y,
                status: NodeStatus::Unvisited,
            });

            if let Some(parent) = parent.map(|idx| &scene.nodes[idx]) {
                scene.edges.push(RenderEdge {
                    parent: parent.id,
                    child: node.id,
                    x1: node.x,
                    y1: node.y,
                    x2: parent.x,
                    y2: parent.y,
                });
            }

            let (left, right) = node.children();
            stack.extend(right.map(|child| (child, Some(slot))));
            stack.extend(left.map(|child| (child, Some(slot))));
        }

        scene
    }

    /// Nodes in draw order
    pub fn nodes(&self) -> &[RenderNode] {
        &self.nodes
    }

    /// Edges in draw order
    pub fn edges(&self) -> &[RenderEdge] {
        &self.edges
    }

    /// Number of drawn nodes
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Nothing to draw
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Drop everything
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.edges.clear();
        self.index.clear();
    }

    /// x of the root (first node in draw order)
    pub fn root_x(&self) -> Option<f64> {
        self.nodes.first().map(|node| node.x)
    }

    /// Look up a node
    pub fn node(&self, id: NodeId) -> Option<&RenderNode> {
        self.index.get(&id).map(|&idx| &self.nodes[idx])
    }

    fn node_mut(&mut self, id: NodeId) -> Result<&mut RenderNode, RenderError> {
        let idx = *self.index.get(&id).ok_or(RenderError::UnknownNode(id))?;
        Ok(&mut self.nodes[idx])
    }

    /// Set one node's status
    pub fn set_status(&mut self, id: NodeId, status: NodeStatus) -> Result<(), RenderError> {
        self.node_mut(id)?.status = status;
        Ok(())
    }

    /// Apply a released traversal event
    pub fn apply(&mut self, event: &TraversalEvent) -> Result<(), RenderError> {
        self.set_status(event.node, event.phase.into())
    }

    /// Put every node back to `Unvisited`
    pub fn reset_status(&mut self) {
        for node in &mut self.nodes {
            node.status = NodeStatus::Unvisited;
        }
    }

    /// Move a node (e.g. after a drag) and every edge end attached to it.
    pub fn move_node(&mut self, id: NodeId, x: f64, y: f64) -> Result<(), RenderError> {
        let node = self.node_mut(id)?;
        node.x = x;
        node.y = y;

        for edge in &mut self.edges {
            if edge.child == id {
                edge.x1 = x;
                edge.y1 = y;
            }
            if edge.parent == id {
                edge.x2 = x;
                edge.y2 = y;
            }
        }
        Ok(())
    }

    /// Count nodes in a given status
    pub fn count_status(&self, status: NodeStatus) -> usize {
        self.nodes.iter().filter(|node| node.status == status).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::{build_tree, pad, BuildOptions};

    fn scene() -> RenderScene {
        let slots = [Some(1), Some(2), Some(3), Some(4)];
        let tree = build_tree(&slots, &BuildOptions::default()).unwrap();
        RenderScene::from_tree(&tree)
    }

    #[test]
    fn test_pre_order_projection() {
        let scene = scene();
        let values: Vec<i64> = scene.nodes().iter().map(|node| node.value).collect();
        assert_eq!(values, vec![1, 2, 4, 3]);

        let links: Vec<(u32, u32)> = scene.edges().iter().map(|e| (e.parent.0, e.child.0)).collect();
        assert_eq!(links, vec![(0, 1), (1, 3), (0, 2)]);
        assert_eq!(scene.count_status(NodeStatus::Unvisited), 4);
    }

    #[test]
    fn test_placeholders_not_drawn() {
        let slots = [Some(1), None, Some(2)];
        let mut tree = build_tree(&slots, &BuildOptions::default()).unwrap();
        pad(&mut tree);
        let scene = RenderScene::from_tree(&tree);
        assert_eq!(scene.len(), 2);
        assert_eq!(scene.edges().len(), 1);
    }

    #[test]
    fn test_move_node_updates_edges() {
        let mut scene = scene();
        scene.move_node(NodeId(1), 11.0, 22.0).unwrap();

        assert_eq!(scene.node(NodeId(1)).map(|n| (n.x, n.y)), Some((11.0, 22.0)));
        let into_parent = scene.edges().iter().find(|e| e.child == NodeId(1)).unwrap();
        assert_eq!((into_parent.x1, into_parent.y1), (11.0, 22.0));
        let out_of = scene.edges().iter().find(|e| e.parent == NodeId(1)).unwrap();
        assert_eq!((out_of.x2, out_of.y2), (11.0, 22.0));
    }

    #[test]
    fn test_shared_coordinates_stay_distinct() {
        let mut scene = scene();
        scene.move_node(NodeId(2), 5.0, 5.0).unwrap();
        scene.move_node(NodeId(3), 5.0, 5.0).unwrap();
        scene.set_status(NodeId(3), NodeStatus::Visited).unwrap();

        assert_eq!(scene.node(NodeId(2)).unwrap().status, NodeStatus::Unvisited);
        assert_eq!(scene.node(NodeId(3)).unwrap().status, NodeStatus::Visited);
    }

    #[test]
    fn test_unknown_node() {
        let mut scene = scene();
        assert_eq!(
            scene.set_status(NodeId(99), NodeStatus::Visited),
            Err(RenderError::UnknownNode(NodeId(99)))
        );
    }
}
