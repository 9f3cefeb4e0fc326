//! Horizontal layout
//!
//! Positions follow a complete binary grid reaching one level below
//! `total_levels`:
//! 1. The grid's bottom row is evenly spaced, `base_offset + i * spacing`.
//! 2. Every node above sits at the mean of its two grid children.
//!
//! Unrolling the mean gives a closed form. A node at level `L` with grid
//! index `g` (root `0`, children `2g` and `2g + 1`) covers the bottom-row
//! slots `g * 2^k .. (g + 1) * 2^k` with `k = total_levels + 1 - L`, and its
//! x is the midpoint of that range. Only real nodes are visited, so the cost
//! is linear in the tree size whatever its depth; padding the tree first
//! yields the same coordinates for every node.

use thiserror::Error;
use tracing::debug;

use crate::tree::{Tree, TreeNode};

/// Deepest tree [`layout`] accepts.
///
/// Bottom-row offsets grow as `2^total_levels`; past this depth they no
/// longer fit in an `f64`.
pub const MAX_LEVELS: u32 = 1000;

/// Spacing parameters for the layout
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutOptions {
    /// x of the first slot in the bottom grid row
    pub base_offset: f64,

    /// Distance between neighbouring bottom-row slots
    pub spacing: f64,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            base_offset: 100.0,
            spacing: 25.0,
        }
    }
}

/// Errors from the layout pass
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LayoutError {
    /// Tree is deeper than [`MAX_LEVELS`]
    #[error("Tree has {levels} levels, layout supports at most {limit}")]
    TooDeep {
        /// Levels in the rejected tree
        levels: u32,
        /// Accepted maximum
        limit: u32,
    },
}

/// Compute x for every node in place.
pub fn layout(tree: &mut Tree, options: &LayoutOptions) -> Result<(), LayoutError> {
    let total_levels = tree.total_levels();
    if total_levels > MAX_LEVELS {
        return Err(LayoutError::TooDeep {
            levels: total_levels,
            limit: MAX_LEVELS,
        });
    }

    let grid_depth = total_levels as i32 + 1;
    let mut placed = 0usize;
    let mut stack: Vec<(&mut TreeNode, f64)> = vec![(tree.root_mut(), 0.0)];

    while let Some((node, index)) = stack.pop() {
        let span = 2f64.powi(grid_depth - node.level as i32);
        node.x = options.base_offset + options.spacing * ((index + 0.5) * span - 0.5);
        placed += 1;

        let (left, right) = node.children_mut();
        stack.extend(right.map(|child| (child, 2.0 * index + 1.0)));
        stack.extend(left.map(|child| (child, 2.0 * index)));
    }

    debug!(placed, total_levels, root_x = tree.root().x, "layout computed");
    Ok(())
}

/// Shift the whole tree so the root sits at the viewport center.
pub fn recenter(tree: &mut Tree, viewport_width: f64) {
    let diff = viewport_width / 2.0 - tree.root().x;
    tree.for_each_mut(|node| node.x += diff);
    debug!(diff, "tree recentered");
}
