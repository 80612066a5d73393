//! End-to-end felling through `TreeFeller::on_destroy`.

use treefell_core::{ItemStack, ToolMaterial, ToolType};
use treefell_felling::{
    BlockDestroyed, BlockKind, Coordinate, FellingConfig, ScriptedRolls, SparseWorld, TestActor,
    TreeFeller, SPARSE_FOLIAGE_ITEM, SPARSE_LOG_ITEM,
};

const LEAF: BlockKind = BlockKind::Foliage { decayable: true };

/// Four logs with a leaf on top of and beside the topmost log.
fn four_log_tree() -> (SparseWorld, Coordinate) {
    let mut world = SparseWorld::new();
    let base = Coordinate::new(10, 64, -3);
    world.set_column(base, 4);
    world.set(base.offset(0, 4, 0), LEAF);
    world.set(base.offset(1, 3, 0), LEAF);
    (world, base)
}

fn iron_axe(remaining: u32) -> ItemStack {
    ItemStack::tool(ToolType::Axe, ToolMaterial::Iron).with_durability(remaining)
}

fn count_drops(world: &SparseWorld, item_id: u16) -> usize {
    world
        .drops()
        .iter()
        .filter(|drop| drop.item == ItemStack::block(item_id))
        .count()
}

#[test]
fn ample_durability_fells_without_damage() {
    let (mut world, base) = four_log_tree();
    let mut actor = TestActor::new(7, 20.0, Some(iron_axe(200)));
    let mut feller = TreeFeller::new(FellingConfig::default(), ScriptedRolls::constant(0));

    let event = BlockDestroyed::new(base, actor.hand.clone());
    assert!(feller.on_destroy(&mut world, &mut actor, &event));

    assert_eq!(count_drops(&world, SPARSE_LOG_ITEM), 4);
    assert_eq!(count_drops(&world, SPARSE_FOLIAGE_ITEM), 2);
    assert_eq!(world.count(BlockKind::Log), 0);
    assert_eq!(world.count(LEAF), 0);

    // One point per felled log at Unbreaking 0, none for leaves.
    assert_eq!(actor.hand.as_ref().and_then(|t| t.durability), Some(196));
    assert_eq!(actor.health, Some(20.0));

    let report = feller.last_report().expect("report recorded");
    assert_eq!(report.tool_broke_at, None);
    assert_eq!(report.health_lost, 0.0);
}

#[test]
fn breaking_axe_hurts_for_remaining_logs() {
    let (mut world, base) = four_log_tree();
    let mut actor = TestActor::new(7, 20.0, Some(iron_axe(1)));
    let mut feller = TreeFeller::new(FellingConfig::default(), ScriptedRolls::new([0], 99));

    let event = BlockDestroyed::new(base, actor.hand.clone());
    assert!(feller.on_destroy(&mut world, &mut actor, &event));

    assert!(actor.hand.is_none());
    assert_eq!(actor.health, Some(17.0));
    assert_eq!(world.break_cues(), &[7]);

    let report = feller.last_report().expect("report recorded");
    assert_eq!(report.tool_broke_at, Some(0));
    assert_eq!(report.damage_accrued, 3.0);
    assert_eq!(report.logs_felled, 4);
    // Only the first log consumed a draw.
    assert_eq!(feller.roll_mut().remaining(), 0);
}

#[test]
fn breaking_axe_damage_is_clamped_at_zero() {
    let (mut world, base) = four_log_tree();
    let mut actor = TestActor::new(7, 2.0, Some(iron_axe(1)));
    let mut feller = TreeFeller::new(FellingConfig::default(), ScriptedRolls::constant(0));

    let event = BlockDestroyed::new(base, actor.hand.clone());
    assert!(feller.on_destroy(&mut world, &mut actor, &event));

    assert_eq!(actor.health, Some(0.0));
    let report = feller.last_report().expect("report recorded");
    assert_eq!(report.health_lost, 2.0);
}

#[test]
fn felling_order_follows_discovery() {
    let mut world = SparseWorld::new();
    let base = Coordinate::new(0, 0, 0);
    world.set_column(base, 3);
    world.set(Coordinate::new(0, 3, 0), LEAF);
    world.set(Coordinate::new(1, 1, 0), BlockKind::Log);
    world.set(Coordinate::new(-1, 2, 0), BlockKind::Log);
    let mut actor = TestActor::new(1, 20.0, Some(iron_axe(50)));
    let mut feller = TreeFeller::new(FellingConfig::default(), ScriptedRolls::constant(0));

    let event = BlockDestroyed::new(base, actor.hand.clone());
    assert!(feller.on_destroy(&mut world, &mut actor, &event));

    // Trunk bottom to top, then the newest branch candidate first.
    assert_eq!(
        &world.removed()[..5],
        &[
            Coordinate::new(0, 0, 0),
            Coordinate::new(0, 1, 0),
            Coordinate::new(0, 2, 0),
            Coordinate::new(-1, 2, 0),
            Coordinate::new(1, 1, 0),
        ]
    );
    assert_eq!(world.removed()[5], Coordinate::new(0, 3, 0));
}

#[test]
fn persistent_leaves_survive_felling() {
    let (mut world, base) = four_log_tree();
    let planted = base.offset(-1, 3, 0);
    world.set(planted, BlockKind::Foliage { decayable: false });
    let mut actor = TestActor::new(1, 20.0, Some(iron_axe(50)));
    let mut feller = TreeFeller::new(FellingConfig::default(), ScriptedRolls::constant(0));

    let event = BlockDestroyed::new(base, actor.hand.clone());
    assert!(feller.on_destroy(&mut world, &mut actor, &event));
    assert_eq!(world.count(BlockKind::Foliage { decayable: false }), 1);
    assert!(!world.removed().contains(&planted));
}
