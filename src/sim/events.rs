//! One-shot simulation events
//!
//! Components push events while they update; outer collaborators (audio,
//! HUD) consume them. Consuming clears them, so each event is seen once, and
//! the queue is cleared at the start of every tick.

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Something that happened during a tick
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum SimEvent {
    /// A ripple was written into the field
    RippleCreated { pos: Vec3 },
    /// A stone skipped off the surface
    StoneSkipped { pos: Vec3, bounces: u32 },
    /// A stone entered the water without skipping
    StoneSank { pos: Vec3 },
    /// A stone struck a floating cube
    CubeHit { cube: usize },
    /// A stone struck the boat hull
    BoatHit,
    /// A stone left the hand
    StoneThrown { charge: f32 },
    /// The rod lure was released
    RodCast { charge: f32 },
    /// The lure touched down and is usable
    RodLanded { pos: Vec3 },
    /// A fish bit the lure and is fighting
    FishHooked { fish: usize },
    /// A fish finished fighting and was landed
    FishCaught { fish: usize },
    ChestSpawned { pos: Vec3 },
    ChestExpired,
    ChestCollected { prizes: u32 },
}

/// Discriminant-only view used for consuming
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    RippleCreated,
    StoneSkipped,
    StoneSank,
    CubeHit,
    BoatHit,
    StoneThrown,
    RodCast,
    RodLanded,
    FishHooked,
    FishCaught,
    ChestSpawned,
    ChestExpired,
    ChestCollected,
}

impl SimEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            SimEvent::RippleCreated { .. } => EventKind::RippleCreated,
            SimEvent::StoneSkipped { .. } => EventKind::StoneSkipped,
            SimEvent::StoneSank { .. } => EventKind::StoneSank,
            SimEvent::CubeHit { .. } => EventKind::CubeHit,
            SimEvent::BoatHit => EventKind::BoatHit,
            SimEvent::StoneThrown { .. } => EventKind::StoneThrown,
            SimEvent::RodCast { .. } => EventKind::RodCast,
            SimEvent::RodLanded { .. } => EventKind::RodLanded,
            SimEvent::FishHooked { .. } => EventKind::FishHooked,
            SimEvent::FishCaught { .. } => EventKind::FishCaught,
            SimEvent::ChestSpawned { .. } => EventKind::ChestSpawned,
            SimEvent::ChestExpired => EventKind::ChestExpired,
            SimEvent::ChestCollected { .. } => EventKind::ChestCollected,
        }
    }
}

/// Pending events in emission order
#[derive(Debug, Clone, Default)]
pub struct EventQueue {
    events: Vec<SimEvent>,
}

impl EventQueue {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn push(&mut self, event: SimEvent) {
        self.events.push(event);
    }

    /// Whether an event of `kind` is pending (does not consume)
    pub fn contains(&self, kind: EventKind) -> bool {
        self.events.iter().any(|e| e.kind() == kind)
    }

    /// Consume every pending event of `kind`; true if there was at least one
    pub fn take(&mut self, kind: EventKind) -> bool {
        let before = self.events.len();
        self.events.retain(|e| e.kind() != kind);
        self.events.len() != before
    }

    /// Drop everything pending
    pub fn clear(&mut self) {
        self.events.clear();
    }

    /// Consume everything
    pub fn drain(&mut self) -> Vec<SimEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn iter(&self) -> impl Iterator<Item = &SimEvent> {
        self.events.iter()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_take_clears_only_matching_kind() {
        let mut q = EventQueue::new();
        q.push(SimEvent::BoatHit);
        q.push(SimEvent::CubeHit { cube: 0 });
        q.push(SimEvent::BoatHit);

        assert!(q.take(EventKind::BoatHit));
        assert!(!q.take(EventKind::BoatHit));
        assert!(q.contains(EventKind::CubeHit));
        assert_eq!(q.len(), 1);
    }

    #[test]
    fn test_drain_empties_queue() {
        let mut q = EventQueue::new();
        q.push(SimEvent::ChestExpired);
        let drained = q.drain();
        assert_eq!(drained, vec![SimEvent::ChestExpired]);
        assert!(q.is_empty());
    }

    #[test]
    fn test_clear_drops_pending() {
        let mut q = EventQueue::new();
        q.push(SimEvent::RodCast { charge: 0.5 });
        q.push(SimEvent::ChestExpired);
        q.clear();
        assert!(q.is_empty());
        assert!(!q.take(EventKind::RodCast));
    }
}
