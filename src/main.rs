use std::path::PathBuf;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use rackready::{
    bar::Bar,
    config::RackConfig,
    diff,
    inventory::Inventory,
    load_planner::{LoadPlan, LoadPlanner},
    plate::Plate,
    rounding::Rounding,
    transition::Transition,
    weight::Weight,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "rackready", version, about = "Plan barbell plate loads")]
struct Cli {
    /// Config file; defaults to ./rackready.toml when present.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Choose plates for a target total.
    Plan {
        #[arg(allow_negative_numbers = true)]
        target: f64,
        #[command(flatten)]
        rack: RackArgs,
    },
    /// List plate changes between two per-side stacks.
    Diff {
        #[arg(long, value_delimiter = ',')]
        from: Vec<Plate>,
        #[arg(long, value_delimiter = ',')]
        to: Vec<Plate>,
    },
    /// Plan a target and list the changes from what is loaded now.
    Transition {
        #[arg(allow_negative_numbers = true)]
        target: f64,
        /// Per-side stack currently on the bar.
        #[arg(long, value_delimiter = ',')]
        from: Vec<Plate>,
        #[command(flatten)]
        rack: RackArgs,
    },
}

#[derive(Args)]
struct RackArgs {
    #[arg(long, env = "RACKREADY_BAR")]
    bar: Option<Weight>,

    /// Plates on hand, both sides combined, e.g. `45:8,25:4,2.5:4`.
    #[arg(long, env = "RACKREADY_INVENTORY")]
    inventory: Option<Inventory>,

    #[arg(long, value_delimiter = ',')]
    denominations: Option<Vec<Plate>>,

    /// Round targets to this step; 0 disables rounding.
    #[arg(long)]
    increment: Option<Weight>,
}

struct Rack {
    bar: Bar,
    inventory: Inventory,
    denominations: Option<Vec<Plate>>,
    rounding: Rounding,
}

impl Rack {
    fn resolve(args: RackArgs, config: RackConfig) -> Self {
        Rack {
            bar: args.bar.map_or_else(|| config.bar(), Bar::new),
            inventory: args.inventory.unwrap_or_else(|| config.inventory()),
            rounding: args.increment.map_or_else(|| config.rounding(), Rounding::new),
            denominations: args.denominations.or(config.denominations),
        }
    }

    fn plan(&self, target: f64) -> LoadPlan {
        let planner = LoadPlanner::new(self.bar, &self.inventory).with_rounding(self.rounding);
        match &self.denominations {
            Some(denominations) => planner.with_denominations(denominations).plan(target),
            None => planner.plan(target),
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let config = match &cli.config {
        Some(path) => RackConfig::load(path),
        None => RackConfig::discover(&std::env::current_dir()?),
    }
    .context("Failed to load configuration")?;

    match cli.command {
        Command::Plan { target, rack } => {
            let rack = Rack::resolve(rack, config);
            let plan = rack.plan(target);
            info!(requested = target, bar = %rack.bar, "planned load");
            print_plan(&plan);
        }
        Command::Diff { from, to } => {
            print_transition(&diff(&from, &to));
        }
        Command::Transition { target, from, rack } => {
            let rack = Rack::resolve(rack, config);
            let plan = rack.plan(target);
            let transition = diff(&from, plan.per_side());
            info!(
                from = %rack.bar.loaded_weight(&from),
                to = %plan.achievable_total(),
                moves = transition.plate_moves(),
                "planned transition"
            );
            println!(
                "Current: {} lb {}",
                rack.bar.loaded_weight(&from),
                format_stack(&from)
            );
            print_plan(&plan);
            print_transition(&transition);
        }
    }

    Ok(())
}

fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn format_stack(per_side: &[Plate]) -> String {
    format!(
        "[{}]",
        per_side
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ")
    )
}

fn print_plan(plan: &LoadPlan) {
    println!("Target: {} lb", plan.target_rounded());
    println!("Per side: {}", format_stack(plan.per_side()));
    if plan.exact() {
        println!("Achievable: {} lb (exact)", plan.achievable_total());
    } else {
        println!(
            "Achievable: {} lb ({} lb short)",
            plan.achievable_total(),
            plan.shortfall()
        );
    }
}

fn print_transition(transition: &Transition) {
    if transition.is_empty() {
        println!("No plate change needed");
        return;
    }
    for step in transition.steps() {
        println!("  - {step}");
    }
}
