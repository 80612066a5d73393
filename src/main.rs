//! treefell - plant a tree in a fresh voxel world, chop its base and report what fell.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use serde::Serialize;
use tracing::info;
use treefell_core::{
    scoped_rng, Enchantment, EnchantmentType, ItemStack, SimTick, ToolMaterial, ToolType,
};
use treefell_felling::{BlockDestroyed, Coordinate, FellingConfig, FellingReport, TreeFeller};
use treefell_testkit::JsonlSink;
use treefell_world::{blocks, Player, Tree, TreeType, VoxelWorld, WorldEvent};

const GROUND_Y: i32 = 63;
const PLAYER_ID: u64 = 1;

#[derive(Parser, Debug)]
#[command(author, version, about = "Fell a generated tree and report what happened", long_about = None)]
struct Args {
    /// Felling config (TOML). Without it, config/treefell.toml is tried and defaults are used
    #[arg(long)]
    config: Option<PathBuf>,
    /// World seed for the wear rolls
    #[arg(long, default_value_t = 1337)]
    seed: u64,
    /// Tick at which the base log is chopped
    #[arg(long, default_value_t = 0)]
    tick: u64,
    /// Tree to plant
    #[arg(long, value_enum, default_value_t = TreeArg::Oak)]
    tree: TreeArg,
    /// Axe material
    #[arg(long, value_enum, default_value_t = MaterialArg::Iron)]
    material: MaterialArg,
    /// Remaining axe durability (defaults to a fresh axe)
    #[arg(long)]
    durability: Option<u32>,
    /// Unbreaking level on the axe
    #[arg(long, default_value_t = 0)]
    unbreaking: u8,
    /// Player health before chopping
    #[arg(long, default_value_t = 20.0)]
    health: f32,
    /// Append JSONL event records to this file
    #[arg(long)]
    log: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum TreeArg {
    Oak,
    Birch,
    Pine,
    LargeOak,
}

impl From<TreeArg> for TreeType {
    fn from(arg: TreeArg) -> Self {
        match arg {
            TreeArg::Oak => TreeType::Oak,
            TreeArg::Birch => TreeType::Birch,
            TreeArg::Pine => TreeType::Pine,
            TreeArg::LargeOak => TreeType::LargeOak,
        }
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum MaterialArg {
    Wood,
    Stone,
    Iron,
    Gold,
    Diamond,
}

impl From<MaterialArg> for ToolMaterial {
    fn from(arg: MaterialArg) -> Self {
        match arg {
            MaterialArg::Wood => ToolMaterial::Wood,
            MaterialArg::Stone => ToolMaterial::Stone,
            MaterialArg::Iron => ToolMaterial::Iron,
            MaterialArg::Gold => ToolMaterial::Gold,
            MaterialArg::Diamond => ToolMaterial::Diamond,
        }
    }
}

/// Printed to stdout as JSON.
#[derive(Debug, Serialize)]
struct Summary {
    tree: TreeType,
    felled: bool,
    report: Option<FellingReport>,
    health: f32,
    tool: Option<ItemStack>,
    events: Vec<WorldEvent>,
}

fn main() -> Result<()> {
    // Initialize tracing with WARN level by default (can be overridden via RUST_LOG env var)
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let args = Args::parse();
    let config = match &args.config {
        Some(path) => FellingConfig::from_path(path)
            .with_context(|| format!("failed to load felling config from {}", path.display()))?,
        None => FellingConfig::load(),
    };

    let summary = run(&args, config);

    if let Some(path) = &args.log {
        let mut sink = JsonlSink::append(path)?;
        let tick = SimTick(args.tick);
        for event in &summary.events {
            sink.write_data(tick, "WorldEvent", event)?;
        }
        sink.write_data(tick, "TreeFelled", &summary.report)?;
        info!(path = %path.display(), lines = sink.lines(), "event log written");
    }

    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}

fn run(args: &Args, config: FellingConfig) -> Summary {
    let tree_type = TreeType::from(args.tree);
    let base = Coordinate::new(0, GROUND_Y + 1, 0);

    let mut world = VoxelWorld::new();
    world.fill_ground(base.x, GROUND_Y, base.z, 8, blocks::GRASS);
    Tree::new(base, tree_type).generate_into_world(&mut world);

    let mut axe = ItemStack::tool(ToolType::Axe, args.material.into());
    if let Some(remaining) = args.durability {
        axe = axe.with_durability(remaining);
    }
    if args.unbreaking > 0 {
        axe = axe.enchanted(Enchantment::new(EnchantmentType::Unbreaking, args.unbreaking));
    }
    let mut player = Player::new(PLAYER_ID, 1.5, f64::from(base.y), 1.5).holding(axe);
    player.health = args.health.clamp(0.0, player.max_health);

    let rng = scoped_rng(args.seed, player.id, SimTick(args.tick));
    let mut feller = TreeFeller::new(config, rng);
    let event = BlockDestroyed::new(base, player.main_hand.clone());
    let felled = feller.on_destroy(&mut world, &mut player, &event);
    info!(?tree_type, felled, "chopped base log");

    Summary {
        tree: tree_type,
        felled,
        report: feller.last_report().cloned(),
        health: player.health,
        tool: player.main_hand,
        events: world.drain_events(),
    }
}
