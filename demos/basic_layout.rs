//! Lay out the default tree and step through a post-order run on a virtual clock.

use std::time::Duration;

use treeviz::{NodeStatus, TraversalOrder, Visualizer, VisualizerConfig, DEFAULT_INPUT};

fn main() -> anyhow::Result<()> {
    let mut viz = Visualizer::new(VisualizerConfig::for_viewport(640.0));
    viz.set_input(DEFAULT_INPUT)?;

    for node in viz.scene().nodes() {
        println!("node {} value={} at ({:.1}, {:.1})", node.id, node.value, node.x, node.y);
    }

    let steps = viz.start_traversal(TraversalOrder::PostOrder, Duration::ZERO)?;
    let delay = viz.config().step_delay;
    for step in 1..=steps as u32 {
        viz.tick(delay * step);
        println!(
            "t={:>5}ms exploring={} visited={}",
            (delay * step).as_millis(),
            viz.scene().count_status(NodeStatus::Exploring),
            viz.scene().count_status(NodeStatus::Visited)
        );
    }
    viz.stop();

    Ok(())
}
