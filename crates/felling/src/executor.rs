//! Felling: removing a discovered tree and settling its cost.

use crate::config::FellingConfig;
use crate::coord::Coordinate;
use crate::effects::apply_felling_damage;
use crate::session::DiscoverySession;
use crate::view::{ActorHandle, VoxelWorldView};
use crate::wear::{wear_held_tool, ToolWear, WearRoll};
use serde::Serialize;
use tracing::{info, instrument};

/// What one felling pass did.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FellingReport {
    pub base: Option<Coordinate>,
    /// Trunk and branch blocks removed.
    pub logs_felled: usize,
    pub foliage_felled: usize,
    pub drops_spawned: usize,
    /// Durability points lost by the tool.
    pub durability_lost: u32,
    /// Index (into the felled logs) of the block that broke the tool.
    pub tool_broke_at: Option<usize>,
    /// Damage accumulated after the break.
    pub damage_accrued: f32,
    /// Health the actor actually lost.
    pub health_lost: f32,
}

/// Remove every discovered block, logs first in discovery order, then foliage.
///
/// Each felled log is offered to the held tool until it breaks; every log after
/// that costs the actor `damage_per_block` health instead. Foliage never wears
/// the tool or hurts the actor.
#[instrument(level = "debug", skip_all, fields(base = %base, actor = actor.id()))]
pub fn fell_tree<W, A, R>(
    session: &DiscoverySession,
    base: Coordinate,
    world: &mut W,
    actor: &mut A,
    roll: &mut R,
    config: &FellingConfig,
) -> FellingReport
where
    W: VoxelWorldView + ?Sized,
    A: ActorHandle + ?Sized,
    R: WearRoll + ?Sized,
{
    let cause = actor.id();
    let mut report = FellingReport {
        base: Some(base),
        ..FellingReport::default()
    };

    let logs = session
        .trunk()
        .iter()
        .filter(|coord| config.fell_base_block || *coord != base);
    for coord in logs {
        if drop_and_remove(world, coord, cause) {
            report.drops_spawned += 1;
        }
        let index = report.logs_felled;
        report.logs_felled += 1;

        if report.tool_broke_at.is_some() {
            report.damage_accrued += config.damage_per_block;
            continue;
        }
        match wear_held_tool(actor, world, roll) {
            ToolWear::Broke => {
                report.durability_lost += 1;
                report.tool_broke_at = Some(index);
            }
            ToolWear::Worn => report.durability_lost += 1,
            ToolWear::Spared | ToolWear::Untouched => {}
        }
    }

    for coord in session.foliage().iter() {
        if drop_and_remove(world, coord, cause) {
            report.drops_spawned += 1;
        }
        report.foliage_felled += 1;
    }

    if report.damage_accrued > 0.0 {
        report.health_lost = apply_felling_damage(actor, report.damage_accrued);
    }

    info!(
        logs = report.logs_felled,
        foliage = report.foliage_felled,
        tool_broke_at = ?report.tool_broke_at,
        health_lost = report.health_lost,
        "tree felled"
    );
    report
}

fn drop_and_remove<W: VoxelWorldView + ?Sized>(world: &mut W, coord: Coordinate, cause: u64) -> bool {
    let dropped = match world.drop_for(coord) {
        Some(item) => {
            world.spawn_drop(coord, item, cause);
            true
        }
        None => false,
    };
    world.remove_block(coord);
    dropped
}
