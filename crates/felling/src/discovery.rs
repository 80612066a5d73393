//! Tree discovery: trunk walk, branch reachability and foliage collection.
//!
//! Discovery starts at a log and walks straight up while logs continue. Every
//! log on the way is a trunk block; horizontal log neighbors become branch
//! candidates. A tree is accepted when the trunk ends under decayable foliage,
//! or when the newest branch candidate passes the reachability test. On
//! acceptance the remaining candidates are tested as well so every reachable
//! branch joins the trunk set.
//!
//! The reachability test is a depth-limited search memoized on the trunk set:
//! a log that was already claimed is never explored twice. It runs on an
//! explicit frame stack instead of the call stack, probing in the same order a
//! recursive formulation would, so the discovered sets and their order are
//! identical.

use crate::coord::{Coordinate, Horizontal};
use crate::session::DiscoverySession;
use crate::view::VoxelWorldView;
use tracing::{debug, instrument};

/// Deepest branch level explored by the reachability test.
pub const BRANCH_DEPTH_LIMIT: u32 = 5;

/// Horizontal radius (and upward height) of the foliage box around each log.
pub const FOLIAGE_RADIUS: i32 = 1;

/// Probes per frame: the block above, the neighbors of the block above, then
/// the neighbors of the block itself.
const PROBES_PER_FRAME: usize = 1 + 2 * Horizontal::ALL.len();

/// One pending reachability test on the work stack.
#[derive(Debug, Clone, Copy)]
struct Frame {
    coord: Coordinate,
    up: Coordinate,
    depth: u32,
    next_probe: usize,
    reached: bool,
}

impl Frame {
    fn new(coord: Coordinate, depth: u32) -> Self {
        Self {
            coord,
            up: coord.up(),
            depth,
            next_probe: 0,
            reached: false,
        }
    }

    /// Next coordinate to probe, advancing the cursor.
    fn next_target(&mut self) -> Option<Coordinate> {
        let index = self.next_probe;
        if index >= PROBES_PER_FRAME {
            return None;
        }
        self.next_probe += 1;

        let horizontal = Horizontal::ALL.len();
        let target = match index {
            0 => self.up,
            i if i <= horizontal => self.up.step(Horizontal::ALL[i - 1]),
            i => self.coord.step(Horizontal::ALL[i - 1 - horizontal]),
        };
        Some(target)
    }
}

impl DiscoverySession {
    /// Decide whether `base` roots a tree, filling the trunk and foliage sets.
    ///
    /// The session is cleared first. On failure the sets hold partial results
    /// and must be cleared before any other use.
    #[instrument(level = "debug", skip_all, fields(base = %base))]
    pub fn discover<W: VoxelWorldView + ?Sized>(&mut self, world: &W, base: Coordinate) -> bool {
        self.clear();

        let mut cursor = base;
        while world.classify(cursor).is_log() {
            self.trunk.insert(cursor);
            self.collect_foliage(world, cursor);
            self.queue_branch_candidates(world, cursor);
            cursor = cursor.up();
        }
        self.queue_branch_candidates(world, cursor);

        let crowned = world.classify(cursor).is_tree_foliage();
        let is_tree = crowned
            || match self.branch_queue.pop_front() {
                Some(first) => self.branch_test(world, first, 1),
                None => false,
            };

        if is_tree {
            while let Some(candidate) = self.branch_queue.pop_front() {
                self.branch_test(world, candidate, 1);
            }
        }

        debug!(
            is_tree,
            crowned,
            terminal = %cursor,
            logs = self.trunk.len(),
            foliage = self.foliage.len(),
            "discovery finished"
        );
        is_tree
    }

    fn queue_branch_candidates<W: VoxelWorldView + ?Sized>(&mut self, world: &W, at: Coordinate) {
        for neighbor in at.horizontal_neighbors() {
            if world.classify(neighbor).is_log() {
                self.branch_queue.push_front(neighbor);
            }
        }
    }

    fn collect_foliage<W: VoxelWorldView + ?Sized>(&mut self, world: &W, log: Coordinate) {
        for cell in log.canopy_box(FOLIAGE_RADIUS) {
            if world.classify(cell).is_tree_foliage() {
                self.foliage.insert(cell);
            }
        }
    }

    /// Claim `coord` for the tree if it is an unclaimed log within the depth limit.
    fn try_claim<W: VoxelWorldView + ?Sized>(
        &mut self,
        world: &W,
        coord: Coordinate,
        depth: u32,
    ) -> bool {
        if !world.classify(coord).is_log()
            || depth > BRANCH_DEPTH_LIMIT
            || self.trunk.contains(&coord)
        {
            return false;
        }
        self.trunk.insert(coord);
        self.collect_foliage(world, coord);
        true
    }

    /// Reachability test for a branch candidate.
    ///
    /// True when some probe chain from `start` succeeds or `start` sits directly
    /// under decayable foliage. Claimed logs and collected foliage stay in the
    /// session even when the test fails.
    pub(crate) fn branch_test<W: VoxelWorldView + ?Sized>(
        &mut self,
        world: &W,
        start: Coordinate,
        depth: u32,
    ) -> bool {
        if !self.try_claim(world, start, depth) {
            return false;
        }

        let mut stack = vec![Frame::new(start, depth)];
        loop {
            let Some(frame) = stack.last_mut() else {
                return false;
            };

            if let Some(target) = frame.next_target() {
                let child_depth = frame.depth + 1;
                if self.try_claim(world, target, child_depth) {
                    stack.push(Frame::new(target, child_depth));
                }
                continue;
            }

            let done = *frame;
            stack.pop();
            let reached = done.reached || world.classify(done.up).is_tree_foliage();
            match stack.last_mut() {
                Some(parent) => parent.reached |= reached,
                None => return reached,
            }
        }
    }
}
