//! Tool wear from felling.
//!
//! Every felled trunk or branch block may cost the held tool one point of
//! durability. The chance is `100 / (unbreaking + 1)` percent, so an
//! unenchanted tool always wears and Unbreaking III wears a quarter of the time.

use crate::view::{ActorHandle, VoxelWorldView};
use rand::rngs::StdRng;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use tracing::trace;

/// Source of percentile draws in `[0, 100)`.
pub trait WearRoll {
    fn roll_percent(&mut self) -> u32;
}

impl WearRoll for StdRng {
    fn roll_percent(&mut self) -> u32 {
        self.gen_range(0..100)
    }
}

/// Replays a fixed sequence of draws, then repeats `fallback` forever.
#[derive(Debug, Clone)]
pub struct ScriptedRolls {
    rolls: VecDeque<u32>,
    fallback: u32,
}

impl ScriptedRolls {
    pub fn new(rolls: impl IntoIterator<Item = u32>, fallback: u32) -> Self {
        Self {
            rolls: rolls.into_iter().collect(),
            fallback,
        }
    }

    /// The same draw every time.
    pub fn constant(roll: u32) -> Self {
        Self::new([0u32; 0], roll)
    }

    /// Draws still queued before the fallback kicks in.
    pub fn remaining(&self) -> usize {
        self.rolls.len()
    }
}

impl WearRoll for ScriptedRolls {
    fn roll_percent(&mut self) -> u32 {
        self.rolls.pop_front().unwrap_or(self.fallback)
    }
}

/// Outcome of offering one felled block to the held tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ToolWear {
    /// No tool, no durability, or nothing left to wear; no draw was made.
    Untouched,
    /// The draw fell outside the threshold.
    Spared,
    /// One point of durability was lost.
    Worn,
    /// The tool reached zero durability and left the actor's hand.
    Broke,
}

impl ToolWear {
    pub fn broke(self) -> bool {
        self == ToolWear::Broke
    }
}

/// Whether `roll` costs durability at the given Unbreaking level.
pub fn wears(roll: u32, mitigation_level: u8) -> bool {
    f64::from(roll) <= 100.0 / (f64::from(mitigation_level) + 1.0)
}

/// Offer one felled block to the tool the actor currently holds.
pub fn wear_held_tool<A, W, R>(actor: &mut A, world: &mut W, roll: &mut R) -> ToolWear
where
    A: ActorHandle + ?Sized,
    W: VoxelWorldView + ?Sized,
    R: WearRoll + ?Sized,
{
    let Some(mut tool) = actor.held_tool() else {
        return ToolWear::Untouched;
    };
    let remaining = match tool.durability {
        Some(remaining) if remaining > 0 => remaining,
        _ => return ToolWear::Untouched,
    };

    let level = actor.mitigation_level(&tool);
    let draw = roll.roll_percent();
    let worn = wears(draw, level);
    trace!(draw, level, remaining, worn, "wear draw");

    if !worn {
        return ToolWear::Spared;
    }

    tool.damage_durability(1);
    if tool.is_broken() {
        actor.set_held_tool(None);
        world.tool_break_cue(actor.id());
        return ToolWear::Broke;
    }

    actor.set_held_tool(Some(tool));
    ToolWear::Worn
}
