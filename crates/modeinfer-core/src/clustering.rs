//! Type clustering over slot constant sets
//!
//! Slots are nodes of an undirected graph with an edge between any two slots
//! whose constant sets intersect. Each connected component becomes one type.
//!
//! Two strategies compute the same partition:
//!
//! - [`ClusterStrategy::UnionFind`] unions every slot with the first slot seen
//!   holding each of its constants. Near-linear in the total set cardinality.
//! - [`ClusterStrategy::FloodFill`] grows one cluster at a time, absorbing any
//!   remaining slot whose set meets the union of the cluster's sets until a full
//!   pass absorbs nothing. Quadratic in the slot count.
//!
//! Both scan slots in `(head, position)` order and number clusters by first
//! discovery, so their labels agree as well.

use crate::hooks::{ClusterEvent, ClusterHook, emit};
use crate::position_sets::PositionSets;
use ahash::AHashMap;
use modeinfer_types::{SlotKey, TypeId};
use roaring::RoaringBitmap;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::collections::hash_map::Entry;
use std::fmt;
use std::str::FromStr;
use tracing::{debug, instrument};

/// Algorithm used to compute the connected components
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ClusterStrategy {
    #[default]
    UnionFind,
    FloodFill,
}

impl fmt::Display for ClusterStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClusterStrategy::UnionFind => write!(f, "union-find"),
            ClusterStrategy::FloodFill => write!(f, "flood-fill"),
        }
    }
}

impl FromStr for ClusterStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().replace('_', "-").as_str() {
            "union-find" => Ok(ClusterStrategy::UnionFind),
            "flood-fill" => Ok(ClusterStrategy::FloodFill),
            other => Err(format!(
                "unknown cluster strategy '{other}', expected 'union-find' or 'flood-fill'"
            )),
        }
    }
}

/// Type label of every slot
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TypeAssignment {
    types: BTreeMap<SlotKey, TypeId>,
    type_count: u32,
}

impl TypeAssignment {
    pub fn get(&self, slot: SlotKey) -> Option<TypeId> {
        self.types.get(&slot).copied()
    }

    /// Slots with their types, in slot order
    pub fn iter(&self) -> impl Iterator<Item = (SlotKey, TypeId)> + '_ {
        self.types.iter().map(|(&slot, &type_id)| (slot, type_id))
    }

    /// Number of typed slots
    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Number of distinct types
    pub fn type_count(&self) -> usize {
        self.type_count as usize
    }

    pub fn same_type(&self, a: SlotKey, b: SlotKey) -> bool {
        match (self.get(a), self.get(b)) {
            (Some(a), Some(b)) => a == b,
            _ => false,
        }
    }

    /// Slots grouped by type id
    pub fn clusters(&self) -> BTreeMap<TypeId, Vec<SlotKey>> {
        let mut clusters: BTreeMap<TypeId, Vec<SlotKey>> = BTreeMap::new();
        for (slot, type_id) in self.iter() {
            clusters.entry(type_id).or_default().push(slot);
        }
        clusters
    }

    /// The partition without its labels, for label-independent comparison
    pub fn partition(&self) -> Vec<Vec<SlotKey>> {
        let mut groups: Vec<Vec<SlotKey>> = self.clusters().into_values().collect();
        groups.sort();
        groups
    }
}

/// Cluster with the default strategy and no hook
pub fn cluster(sets: &PositionSets) -> TypeAssignment {
    cluster_with(sets, ClusterStrategy::default(), None)
}

/// Cluster with an explicit strategy, reporting progress to `hook`
#[instrument(skip(sets, hook), fields(slots = sets.slot_count()))]
pub fn cluster_with(
    sets: &PositionSets,
    strategy: ClusterStrategy,
    hook: Option<&dyn ClusterHook>,
) -> TypeAssignment {
    let slots: Vec<(SlotKey, &RoaringBitmap)> = sets.slots().collect();
    let labels = match strategy {
        ClusterStrategy::UnionFind => union_find(&slots, hook),
        ClusterStrategy::FloodFill => flood_fill(&slots, hook),
    };

    let type_count = labels.iter().map(|t| t.as_u32() + 1).max().unwrap_or(0);
    let types = slots.iter().map(|(slot, _)| *slot).zip(labels).collect();
    debug!(%strategy, types = type_count, "Clustered slots into types");
    TypeAssignment { types, type_count }
}

/// Disjoint-set forest with path halving and union by rank
#[derive(Debug)]
struct DisjointSets {
    parent: Vec<usize>,
    rank: Vec<u8>,
}

impl DisjointSets {
    fn new(size: usize) -> Self {
        Self { parent: (0..size).collect(), rank: vec![0; size] }
    }

    fn find(&mut self, mut node: usize) -> usize {
        while self.parent[node] != node {
            self.parent[node] = self.parent[self.parent[node]];
            node = self.parent[node];
        }
        node
    }

    fn union(&mut self, a: usize, b: usize) {
        let (a, b) = (self.find(a), self.find(b));
        if a == b {
            return;
        }
        match self.rank[a].cmp(&self.rank[b]) {
            std::cmp::Ordering::Less => self.parent[a] = b,
            std::cmp::Ordering::Greater => self.parent[b] = a,
            std::cmp::Ordering::Equal => {
                self.parent[b] = a;
                self.rank[a] += 1;
            }
        }
    }
}

fn union_find(slots: &[(SlotKey, &RoaringBitmap)], hook: Option<&dyn ClusterHook>) -> Vec<TypeId> {
    let mut forest = DisjointSets::new(slots.len());
    // first slot seen holding each constant
    let mut owners: AHashMap<u32, usize> = AHashMap::new();

    for (index, (_, set)) in slots.iter().enumerate() {
        for constant in set.iter() {
            match owners.entry(constant) {
                Entry::Occupied(owner) => forest.union(index, *owner.get()),
                Entry::Vacant(vacant) => {
                    vacant.insert(index);
                }
            }
        }
    }

    let mut root_labels: AHashMap<usize, TypeId> = AHashMap::new();
    let mut sizes: Vec<usize> = Vec::new();
    let mut labels = Vec::with_capacity(slots.len());

    for (index, (slot, _)) in slots.iter().enumerate() {
        let root = forest.find(index);
        let type_id = *root_labels.entry(root).or_insert_with(|| {
            let type_id = TypeId(sizes.len() as u32);
            sizes.push(0);
            emit(hook, ClusterEvent::ClusterOpened { type_id, anchor: *slot });
            type_id
        });
        sizes[type_id.as_u32() as usize] += 1;
        emit(hook, ClusterEvent::SlotAssigned { type_id, slot: *slot });
        labels.push(type_id);
    }

    for (id, size) in sizes.into_iter().enumerate() {
        emit(hook, ClusterEvent::ClusterClosed { type_id: TypeId(id as u32), size });
    }
    labels
}

fn flood_fill(slots: &[(SlotKey, &RoaringBitmap)], hook: Option<&dyn ClusterHook>) -> Vec<TypeId> {
    let mut labels: Vec<Option<TypeId>> = vec![None; slots.len()];
    let mut remaining: Vec<usize> = (0..slots.len()).collect();
    let mut next_id = 0u32;

    while !remaining.is_empty() {
        let anchor = remaining.remove(0);
        let type_id = TypeId(next_id);
        next_id += 1;

        emit(hook, ClusterEvent::ClusterOpened { type_id, anchor: slots[anchor].0 });
        emit(hook, ClusterEvent::SlotAssigned { type_id, slot: slots[anchor].0 });
        labels[anchor] = Some(type_id);

        // union of every set already in the cluster, not only the anchor's
        let mut covered = slots[anchor].1.clone();
        let mut size = 1;
        loop {
            let before = remaining.len();
            remaining.retain(|&index| {
                let (slot, set) = slots[index];
                if covered.is_disjoint(set) {
                    return true;
                }
                covered |= set;
                labels[index] = Some(type_id);
                size += 1;
                emit(hook, ClusterEvent::SlotAssigned { type_id, slot });
                false
            });
            if remaining.len() == before {
                break;
            }
        }

        emit(hook, ClusterEvent::ClusterClosed { type_id, size });
    }

    labels.into_iter().map(|label| label.unwrap_or(TypeId(0))).collect()
}
