use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use treeviz::{
    tree, Phase, Player, TraversalEvent, TraversalOrder, Visualizer, VisualizerConfig,
    DEFAULT_INPUT,
};

#[derive(Parser, Debug)]
#[command(name = "treeviz", about = "Lay out binary trees from level-order arrays and animate traversals")]
struct Cli {
    /// Viewport width in pixels.
    #[arg(long, global = true, default_value_t = 800.0)]
    width: f64,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print the laid-out scene (nodes and edges) as JSON.
    Layout {
        /// Array as `1,2,null,4` or `[1,2,null,4]`.
        #[arg(default_value = DEFAULT_INPUT)]
        values: String,
        /// Pretty-print the JSON.
        #[arg(long)]
        pretty: bool,
    },
    /// Play a traversal in real time, one line per status change.
    Traverse {
        /// Array as `1,2,null,4` or `[1,2,null,4]`.
        #[arg(default_value = DEFAULT_INPUT)]
        values: String,
        /// Traversal order: in-order, pre-order or post-order.
        #[arg(long, default_value = "in-order")]
        order: TraversalOrder,
        /// Milliseconds between status changes.
        #[arg(long, default_value_t = 500)]
        delay_ms: u64,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = VisualizerConfig::for_viewport(cli.width);

    match cli.command {
        Commands::Layout { values, pretty } => run_layout(config, &values, pretty)?,
        Commands::Traverse {
            values,
            order,
            delay_ms,
        } => run_traverse(
            VisualizerConfig {
                step_delay: Duration::from_millis(delay_ms),
                ..config
            },
            &values,
            order,
        )?,
    }

    Ok(())
}

fn run_layout(config: VisualizerConfig, values: &str, pretty: bool) -> Result<()> {
    let mut viz = Visualizer::new(config);
    viz.set_input(values)
        .with_context(|| format!("failed to read array '{}'", values))?;

    let json = if pretty {
        serde_json::to_string_pretty(viz.scene())
    } else {
        serde_json::to_string(viz.scene())
    }
    .context("failed to serialize scene")?;
    println!("{}", json);
    Ok(())
}

fn run_traverse(config: VisualizerConfig, values: &str, order: TraversalOrder) -> Result<()> {
    let mut viz = Visualizer::new(config);
    viz.set_input(values)
        .with_context(|| format!("failed to read array '{}'", values))?;

    let Some(tree) = viz.tree() else {
        println!("Empty array, nothing to traverse.");
        return Ok(());
    };

    let events = tree::events(tree, order);
    println!("{} traversal over {} nodes ({} steps)", order, tree.real_len(), events.len());

    let started = Instant::now();
    let handle = Player::new(viz.config().step_delay).spawn(events, move |event| {
        print_event(started.elapsed(), &event);
    });
    let released = handle.join();
    println!("done after {} steps", released);

    Ok(())
}

fn print_event(elapsed: Duration, event: &TraversalEvent) {
    let label = match event.phase {
        Phase::Exploring => "explore",
        Phase::Visited => "visit",
    };
    println!(
        "{:>6}ms\t{}\t{}\t{}",
        elapsed.as_millis(),
        label,
        event.node,
        event.value
    );
}
