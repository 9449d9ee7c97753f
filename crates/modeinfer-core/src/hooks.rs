//! Observation hooks for the type clusterer
//!
//! Clustering reports its progress as [`ClusterEvent`]s. Hooks are optional and
//! never influence the result; the default [`TracingHook`] forwards events to
//! `tracing`.

use modeinfer_types::{SlotKey, TypeId};
use std::sync::Mutex;
use tracing::{debug, trace};

/// Progress event emitted while clustering
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClusterEvent {
    /// A new cluster was started from an unclustered anchor slot
    ClusterOpened { type_id: TypeId, anchor: SlotKey },
    /// A slot joined a cluster
    SlotAssigned { type_id: TypeId, slot: SlotKey },
    /// No further slot can join the cluster
    ClusterClosed { type_id: TypeId, size: usize },
}

/// Receiver of clustering events
pub trait ClusterHook: Send + Sync + std::fmt::Debug {
    /// Called for every event that passes [`ClusterHook::should_process`]
    fn on_event(&self, event: &ClusterEvent);

    /// Hook name for identification
    fn name(&self) -> &str;

    /// Check if the hook wants this event
    fn should_process(&self, _event: &ClusterEvent) -> bool {
        true
    }
}

/// Forwards events to `tracing`: cluster boundaries at debug, assignments at trace
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingHook;

impl ClusterHook for TracingHook {
    fn on_event(&self, event: &ClusterEvent) {
        match event {
            ClusterEvent::ClusterOpened { type_id, anchor } => {
                debug!(type_id = type_id.as_u32(), anchor = %anchor, "Opened type cluster");
            }
            ClusterEvent::SlotAssigned { type_id, slot } => {
                trace!(type_id = type_id.as_u32(), slot = %slot, "Assigned slot");
            }
            ClusterEvent::ClusterClosed { type_id, size } => {
                debug!(type_id = type_id.as_u32(), size, "Closed type cluster");
            }
        }
    }

    fn name(&self) -> &str {
        "tracing"
    }
}

/// Keeps every event in memory, in emission order
#[derive(Debug, Default)]
pub struct RecordingHook {
    events: Mutex<Vec<ClusterEvent>>,
}

impl RecordingHook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the recorded events
    pub fn events(&self) -> Vec<ClusterEvent> {
        match self.events.lock() {
            Ok(events) => events.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

impl ClusterHook for RecordingHook {
    fn on_event(&self, event: &ClusterEvent) {
        let mut events = match self.events.lock() {
            Ok(events) => events,
            Err(poisoned) => poisoned.into_inner(),
        };
        events.push(event.clone());
    }

    fn name(&self) -> &str {
        "recording"
    }
}

/// Dispatch helper used by the clusterer
pub(crate) fn emit(hook: Option<&dyn ClusterHook>, event: ClusterEvent) {
    if let Some(hook) = hook {
        if hook.should_process(&event) {
            hook.on_event(&event);
        }
    }
}
