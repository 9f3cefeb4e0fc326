//! # Binary tree visualizer core
//!
//! Turns a level-order array such as `[1,null,2,3]` into a laid-out binary
//! tree ready for SVG drawing, and animates depth-first traversals over it.
//!
//! ## Pipeline
//!
//! 1. **Parse**: text → flat `Option<i64>` slots ([`parse`])
//! 2. **Build**: queue-driven level-order construction ([`tree::build_tree`])
//! 3. **Layout**: positions on a complete grid one level below the deepest
//!    real level, parents centered over children ([`layout::layout`]). The
//!    grid stays virtual; [`tree::pad`] and [`tree::prune`] materialize and
//!    remove it when a caller wants the placeholders themselves.
//! 4. **Recenter**: root moved to the viewport center ([`layout::recenter`])
//! 5. **Project**: flattened node/edge lists ([`render::RenderScene`])
//!
//! Traversals ([`tree::events`]) produce `(node, phase)` events that an
//! [`animation::Animation`] releases one per step delay.
//!
//! ## Usage Example
//!
//! ```
//! use std::time::Duration;
//! use treeviz::{TraversalOrder, Visualizer, VisualizerConfig};
//!
//! let mut viz = Visualizer::new(VisualizerConfig::for_viewport(800.0));
//! viz.set_input("1,2,3,4,5,6")?;
//! assert_eq!(viz.scene().root_x(), Some(400.0));
//!
//! viz.start_traversal(TraversalOrder::InOrder, Duration::ZERO)?;
//! assert_eq!(viz.tick(Duration::from_millis(1_000)), 2);
//! # Ok::<(), treeviz::VisualizerError>(())
//! ```

#![warn(missing_docs, missing_debug_implementations)]

pub mod animation; // Throttled event release
pub mod layout; // Coordinate passes
pub mod parse; // Flat array parsing
pub mod render; // Drawable projection
pub mod tree; // Tree model, construction, traversal

// Re-exports for convenience
pub use animation::{Animation, AnimationError, Player, PlayerHandle, RunState, DEFAULT_STEP_DELAY};
pub use layout::{LayoutError, LayoutOptions, MAX_LEVELS};
pub use parse::{FlatSlot, ParseError};
pub use render::{NodeStatus, RenderEdge, RenderError, RenderNode, RenderScene};
pub use tree::{BuildOptions, NodeId, Phase, TraversalEvent, TraversalOrder, Tree, TreeNode};

use std::time::Duration;

use thiserror::Error;
use tracing::{debug, warn};

/// Default array shown when a session starts
pub const DEFAULT_INPUT: &str = "1,2,3,4,5,6";

/// Configuration parameters for a visualizer session
#[derive(Debug, Clone, PartialEq)]
pub struct VisualizerConfig {
    /// Host viewport width in pixels
    pub viewport_width: f64,

    /// Root y coordinate
    pub base_y: f64,

    /// Vertical gap below a level-1 node
    pub level_gap: f64,

    /// Gap reduction per level
    pub level_shrink: f64,

    /// Horizontal spacing parameters
    pub layout: LayoutOptions,

    /// Delay between two animation steps
    pub step_delay: Duration,
}

impl VisualizerConfig {
    /// Defaults for a given viewport width
    pub fn for_viewport(viewport_width: f64) -> Self {
        let build = BuildOptions::for_viewport(viewport_width);
        Self {
            viewport_width,
            base_y: build.base_y,
            level_gap: build.level_gap,
            level_shrink: build.level_shrink,
            layout: LayoutOptions::default(),
            step_delay: DEFAULT_STEP_DELAY,
        }
    }

    /// Builder geometry derived from this configuration
    pub fn build_options(&self) -> BuildOptions {
        BuildOptions {
            viewport_width: self.viewport_width,
            base_y: self.base_y,
            level_gap: self.level_gap,
            level_shrink: self.level_shrink,
        }
    }
}

impl Default for VisualizerConfig {
    fn default() -> Self {
        Self::for_viewport(BuildOptions::default().viewport_width)
    }
}

/// Errors surfaced by a visualizer session
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VisualizerError {
    /// Input text is not a valid array
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// Input edits are blocked while a traversal runs
    #[error("Array input is locked while a traversal is running")]
    InputLocked,

    /// Tree too deep to lay out
    #[error(transparent)]
    Layout(#[from] LayoutError),

    /// Animation state machine rejected the request
    #[error(transparent)]
    Animation(#[from] AnimationError),

    /// Scene update referenced a missing node
    #[error(transparent)]
    Render(#[from] RenderError),
}

/// Result of feeding new input to a session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputOutcome {
    /// A tree was built; `nodes` real nodes are drawn
    Built {
        /// Drawn node count
        nodes: usize,
    },
    /// Input held no tree; the scene was cleared
    Cleared,
}

/// Run the full coordinate pipeline on flat slots.
///
/// Returns the recentered tree, or `None` when the slots hold no tree.
pub fn lay_out(slots: &[FlatSlot], config: &VisualizerConfig) -> Result<Option<Tree>, LayoutError> {
    let Some(mut tree) = tree::build_tree(slots, &config.build_options()) else {
        return Ok(None);
    };
    layout::layout(&mut tree, &config.layout)?;
    layout::recenter(&mut tree, config.viewport_width);

    debug!(nodes = tree.len(), levels = tree.total_levels(), "tree laid out");
    Ok(Some(tree))
}

/// Session state: current tree, its scene, and the traversal animation
#[derive(Debug)]
pub struct Visualizer {
    config: VisualizerConfig,
    tree: Option<Tree>,
    scene: RenderScene,
    animation: Animation,
}

impl Visualizer {
    /// Create an empty session
    pub fn new(config: VisualizerConfig) -> Self {
        let animation = Animation::new(config.step_delay);
        Self {
            config,
            tree: None,
            scene: RenderScene::new(),
            animation,
        }
    }

    /// Session configuration
    pub fn config(&self) -> &VisualizerConfig {
        &self.config
    }

    /// Current tree, if any
    pub fn tree(&self) -> Option<&Tree> {
        self.tree.as_ref()
    }

    /// Current drawable scene
    pub fn scene(&self) -> &RenderScene {
        &self.scene
    }

    /// Animation run state
    pub fn state(&self) -> RunState {
        self.animation.state()
    }

    /// Animation scheduler
    pub fn animation(&self) -> &Animation {
        &self.animation
    }

    /// Parse text and rebuild the tree.
    ///
    /// Invalid text, or a tree deeper than [`MAX_LEVELS`], leaves the current
    /// scene untouched.
    pub fn set_input(&mut self, raw: &str) -> Result<InputOutcome, VisualizerError> {
        if self.animation.is_running() {
            return Err(VisualizerError::InputLocked);
        }
        let slots = parse::parse_array(raw).map_err(|err| {
            debug!(%err, "input rejected");
            err
        })?;
        self.load_slots(&slots)
    }

    /// Rebuild from already-parsed slots.
    pub fn load_slots(&mut self, slots: &[FlatSlot]) -> Result<InputOutcome, VisualizerError> {
        let tree = lay_out(slots, &self.config).map_err(|err| {
            debug!(%err, "input rejected");
            err
        })?;
        self.scene.clear();
        self.tree = tree;

        Ok(match &self.tree {
            Some(tree) => {
                self.scene = RenderScene::from_tree(tree);
                InputOutcome::Built {
                    nodes: self.scene.len(),
                }
            }
            None => InputOutcome::Cleared,
        })
    }

    /// Start animating `order` at time `now`; returns the scheduled event count.
    pub fn start_traversal(
        &mut self,
        order: TraversalOrder,
        now: Duration,
    ) -> Result<usize, VisualizerError> {
        let events = self
            .tree
            .as_ref()
            .map(|tree| tree::events(tree, order))
            .unwrap_or_default();
        let scheduled = events.len();
        self.animation.start(events, now)?;
        Ok(scheduled)
    }

    /// Start from a selector label.
    ///
    /// An unrecognized label still enters the running state but schedules
    /// nothing.
    pub fn start_named(&mut self, selector: &str, now: Duration) -> Result<usize, VisualizerError> {
        match selector.parse::<TraversalOrder>() {
            Ok(order) => self.start_traversal(order, now),
            Err(err) => {
                debug!(%err, "no events scheduled");
                self.animation.start(Vec::new(), now)?;
                Ok(0)
            }
        }
    }

    /// Apply every event due by `now`; returns how many were applied.
    pub fn tick(&mut self, now: Duration) -> usize {
        let released = self.animation.advance(now);
        for event in &released {
            if let Err(err) = self.scene.apply(event) {
                warn!(%err, "released event has no drawn node");
            }
        }
        released.len()
    }

    /// Cancel the run and reset every node to `Unvisited`.
    pub fn stop(&mut self) {
        self.animation.cancel();
        self.scene.reset_status();
    }

    /// Report a drag: move node `id` to `(x, y)`.
    pub fn drag_node(&mut self, id: NodeId, x: f64, y: f64) -> Result<(), VisualizerError> {
        self.scene.move_node(id, x, y)?;
        Ok(())
    }
}

impl Default for Visualizer {
    fn default() -> Self {
        Self::new(VisualizerConfig::default())
    }
}
