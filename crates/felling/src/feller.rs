//! Entry point: reacting to a destroyed block.

use crate::config::FellingConfig;
use crate::coord::Coordinate;
use crate::executor::{fell_tree, FellingReport};
use crate::session::DiscoverySession;
use crate::view::{ActorHandle, VoxelWorldView};
use crate::wear::WearRoll;
use tracing::{debug, instrument};
use treefell_core::ItemStack;

/// A block destroyed by an actor, as reported by the host.
#[derive(Debug, Clone, PartialEq)]
pub struct BlockDestroyed {
    pub base: Coordinate,
    /// Item in the actor's hand at the moment of destruction.
    pub held_item: Option<ItemStack>,
}

impl BlockDestroyed {
    pub fn new(base: Coordinate, held_item: Option<ItemStack>) -> Self {
        Self { base, held_item }
    }
}

/// Fells whole trees when their base log is chopped with an eligible axe.
///
/// Owns the discovery session, so one feller serves one event at a time; hosts
/// dispatching events from several workers keep one feller per worker.
pub struct TreeFeller<R: WearRoll> {
    config: FellingConfig,
    session: DiscoverySession,
    roll: R,
    last_report: Option<FellingReport>,
}

impl<R: WearRoll> TreeFeller<R> {
    pub fn new(config: FellingConfig, roll: R) -> Self {
        Self {
            config,
            session: DiscoverySession::new(),
            roll,
            last_report: None,
        }
    }

    pub fn config(&self) -> &FellingConfig {
        &self.config
    }

    pub fn roll_mut(&mut self) -> &mut R {
        &mut self.roll
    }

    /// Report of the most recent felling, if the last event felled a tree.
    pub fn last_report(&self) -> Option<&FellingReport> {
        self.last_report.as_ref()
    }

    /// Handle a destroyed block. Returns true if a tree was felled.
    #[instrument(level = "debug", skip_all, fields(base = %event.base, actor = actor.id()))]
    pub fn on_destroy<W, A>(&mut self, world: &mut W, actor: &mut A, event: &BlockDestroyed) -> bool
    where
        W: VoxelWorldView + ?Sized,
        A: ActorHandle + ?Sized,
    {
        self.last_report = None;
        let handled = self.try_fell(world, actor, event);
        self.session.clear();
        handled
    }

    fn try_fell<W, A>(&mut self, world: &mut W, actor: &mut A, event: &BlockDestroyed) -> bool
    where
        W: VoxelWorldView + ?Sized,
        A: ActorHandle + ?Sized,
    {
        if !self.config.enabled {
            return false;
        }
        let eligible = event
            .held_item
            .as_ref()
            .is_some_and(|item| self.config.is_eligible_tool(item));
        if !eligible || !world.classify(event.base).is_log() {
            return false;
        }

        if !self.session.discover(&*world, event.base) {
            debug!("not a tree");
            return false;
        }

        let report = fell_tree(
            &self.session,
            event.base,
            world,
            actor,
            &mut self.roll,
            &self.config,
        );
        self.last_report = Some(report);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sparse::{SparseWorld, TestActor};
    use crate::view::BlockKind;
    use crate::wear::ScriptedRolls;
    use treefell_core::{ToolMaterial, ToolType};

    fn crowned_column() -> (SparseWorld, Coordinate) {
        let mut world = SparseWorld::new();
        let base = Coordinate::new(0, 0, 0);
        world.set_column(base, 2);
        world.set(Coordinate::new(0, 2, 0), BlockKind::Foliage { decayable: true });
        (world, base)
    }

    fn axe() -> ItemStack {
        ItemStack::tool(ToolType::Axe, ToolMaterial::Stone)
    }

    #[test]
    fn fells_with_eligible_axe_and_clears_session() {
        let (mut world, base) = crowned_column();
        let mut actor = TestActor::new(1, 20.0, Some(axe()));
        let mut feller = TreeFeller::new(FellingConfig::default(), ScriptedRolls::constant(0));

        assert!(feller.on_destroy(&mut world, &mut actor, &BlockDestroyed::new(base, Some(axe()))));
        assert!(feller.session.is_empty());
        assert_eq!(feller.last_report().map(|r| r.logs_felled), Some(2));
        assert_eq!(world.count(BlockKind::Log), 0);
    }

    #[test]
    fn ignores_non_axes_and_empty_hands() {
        let (mut world, base) = crowned_column();
        let mut actor = TestActor::new(1, 20.0, None);
        let mut feller = TreeFeller::new(FellingConfig::default(), ScriptedRolls::constant(0));

        let pick = ItemStack::tool(ToolType::Pickaxe, ToolMaterial::Diamond);
        assert!(!feller.on_destroy(&mut world, &mut actor, &BlockDestroyed::new(base, Some(pick))));
        assert!(!feller.on_destroy(&mut world, &mut actor, &BlockDestroyed::new(base, None)));
        assert!(world.removed().is_empty());
        assert!(feller.last_report().is_none());
    }

    #[test]
    fn ignores_non_log_base() {
        let (mut world, _) = crowned_column();
        let mut actor = TestActor::new(1, 20.0, Some(axe()));
        let mut feller = TreeFeller::new(FellingConfig::default(), ScriptedRolls::constant(0));

        let event = BlockDestroyed::new(Coordinate::new(0, 2, 0), Some(axe()));
        assert!(!feller.on_destroy(&mut world, &mut actor, &event));
        assert!(world.removed().is_empty());
    }

    #[test]
    fn disabled_config_never_fells() {
        let (mut world, base) = crowned_column();
        let mut actor = TestActor::new(1, 20.0, Some(axe()));
        let config = FellingConfig {
            enabled: false,
            ..FellingConfig::default()
        };
        let mut feller = TreeFeller::new(config, ScriptedRolls::constant(0));

        assert!(!feller.on_destroy(&mut world, &mut actor, &BlockDestroyed::new(base, Some(axe()))));
        assert_eq!(world.count(BlockKind::Log), 2);
    }

    #[test]
    fn failed_discovery_leaves_world_and_session_clean() {
        let mut world = SparseWorld::new();
        let base = Coordinate::new(0, 0, 0);
        world.set_column(base, 3);
        let mut actor = TestActor::new(1, 20.0, Some(axe()));
        let mut feller = TreeFeller::new(FellingConfig::default(), ScriptedRolls::constant(0));

        assert!(!feller.on_destroy(&mut world, &mut actor, &BlockDestroyed::new(base, Some(axe()))));
        assert!(feller.session.is_empty());
        assert!(world.removed().is_empty());
        assert_eq!(actor.hand, Some(axe()));
    }
}
