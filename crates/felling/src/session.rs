//! Per-invocation discovery state.

use crate::coord::Coordinate;
use std::collections::{HashSet, VecDeque};

/// Set of coordinates that remembers insertion order.
#[derive(Debug, Default, Clone)]
pub struct OrderedCoords {
    order: Vec<Coordinate>,
    members: HashSet<Coordinate>,
}

impl OrderedCoords {
    /// Insert `coord`; returns false (and keeps the original position) if already present.
    pub fn insert(&mut self, coord: Coordinate) -> bool {
        if !self.members.insert(coord) {
            return false;
        }
        self.order.push(coord);
        true
    }

    pub fn contains(&self, coord: &Coordinate) -> bool {
        self.members.contains(coord)
    }

    /// Remove `coord`, preserving the order of the remaining members.
    pub fn remove(&mut self, coord: &Coordinate) -> bool {
        if !self.members.remove(coord) {
            return false;
        }
        self.order.retain(|c| c != coord);
        true
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = Coordinate> + '_ {
        self.order.iter().copied()
    }

    pub fn as_slice(&self) -> &[Coordinate] {
        &self.order
    }

    pub fn clear(&mut self) {
        self.order.clear();
        self.members.clear();
    }
}

/// Transient state of one discovery/felling cycle.
///
/// Owned by a single [`crate::TreeFeller`] and cleared before and after every
/// invocation, so nothing leaks from one destroyed block to the next.
#[derive(Debug, Default)]
pub struct DiscoverySession {
    /// Confirmed trunk and branch logs, in discovery order.
    pub(crate) trunk: OrderedCoords,
    /// Branch candidates awaiting the reachability test; newest first.
    pub(crate) branch_queue: VecDeque<Coordinate>,
    /// Decayable foliage adjacent to any confirmed log.
    pub(crate) foliage: OrderedCoords,
}

impl DiscoverySession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn trunk(&self) -> &OrderedCoords {
        &self.trunk
    }

    pub fn foliage(&self) -> &OrderedCoords {
        &self.foliage
    }

    /// Branch candidates not yet tested.
    pub fn pending_branches(&self) -> impl Iterator<Item = Coordinate> + '_ {
        self.branch_queue.iter().copied()
    }

    pub fn clear(&mut self) {
        self.trunk.clear();
        self.branch_queue.clear();
        self.foliage.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.trunk.is_empty() && self.branch_queue.is_empty() && self.foliage.is_empty()
    }
}
