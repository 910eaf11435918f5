//! Treasure chest
//!
//! A single prize that appears near the player on a long timer, sits on the
//! seabed for a while, and is collected by swimming into it.

use glam::Vec3;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::events::{EventQueue, SimEvent};

/// Chest rests this far above the ground level
const GROUND_CLEARANCE: f32 = 0.4;

/// Chest timing and placement
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChestTiming {
    /// Seconds between a despawn and the next spawn
    pub interval: f32,
    /// Seconds a chest stays before expiring
    pub ttl: f32,
    /// Spawn offset half-extent around the reference point
    pub spawn_radius: f32,
    pub pickup_radius: f32,
    /// Respawn delay range after a collection
    pub respawn_min: f32,
    pub respawn_max: f32,
}

impl Default for ChestTiming {
    fn default() -> Self {
        Self {
            interval: 300.0,
            ttl: 15.0,
            spawn_radius: 12.0,
            pickup_radius: 0.8,
            respawn_min: 300.0,
            respawn_max: 300.0,
        }
    }
}

/// The chest entity
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Chest {
    pub active: bool,
    pub pos: Vec3,
    pub spawn_time: f32,
}

impl Chest {
    /// Place near `center` at a random XZ offset
    pub fn spawn_near<R: Rng>(&mut self, center: Vec3, radius: f32, now: f32, ground_y: f32, rng: &mut R) {
        let radius = radius.abs();
        self.active = true;
        self.spawn_time = now;
        self.pos.x = center.x + rng.random_range(-radius..=radius);
        self.pos.z = center.z + rng.random_range(-radius..=radius);
        self.pos.y = ground_y + GROUND_CLEARANCE;
    }

    pub fn is_expired(&self, now: f32, ttl: f32) -> bool {
        self.active && (now - self.spawn_time) > ttl
    }
}

/// Chest plus its schedule and the prize tally
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChestSpawner {
    pub chest: Chest,
    /// Earliest time the next chest may appear
    pub next_spawn: f32,
    pub prizes: u32,
    pub timing: ChestTiming,
    pub ground_y: f32,
}

impl ChestSpawner {
    /// First chest becomes due one interval after `now`
    pub fn new(timing: ChestTiming, ground_y: f32, now: f32) -> Self {
        Self {
            chest: Chest::default(),
            next_spawn: now + timing.interval,
            prizes: 0,
            timing,
            ground_y,
        }
    }

    /// Spawn when due
    pub fn try_spawn<R: Rng>(&mut self, center: Vec3, now: f32, rng: &mut R, events: &mut EventQueue) -> bool {
        if self.chest.active || now <= self.next_spawn {
            return false;
        }
        self.chest
            .spawn_near(center, self.timing.spawn_radius, now, self.ground_y, rng);
        self.next_spawn = now + self.timing.interval;
        events.push(SimEvent::ChestSpawned { pos: self.chest.pos });
        log::info!("Chest spawned at ({:.1}, {:.1})", self.chest.pos.x, self.chest.pos.z);
        true
    }

    /// Remove an aged-out chest and reschedule
    pub fn expire(&mut self, now: f32, events: &mut EventQueue) -> bool {
        if !self.chest.is_expired(now, self.timing.ttl) {
            return false;
        }
        self.chest.active = false;
        self.next_spawn = now + self.timing.interval;
        events.push(SimEvent::ChestExpired);
        true
    }

    /// Collect if `player` is within reach
    pub fn try_collect<R: Rng>(&mut self, player: Vec3, now: f32, rng: &mut R, events: &mut EventQueue) -> bool {
        if !self.chest.active {
            return false;
        }
        let reach = self.timing.pickup_radius;
        if player.distance_squared(self.chest.pos) >= reach * reach {
            return false;
        }
        self.chest.active = false;
        self.prizes += 1;
        let (lo, hi) = (self.timing.respawn_min, self.timing.respawn_max.max(self.timing.respawn_min));
        self.next_spawn = now + rng.random_range(lo..=hi);
        events.push(SimEvent::ChestCollected { prizes: self.prizes });
        log::info!("Chest collected! prizes={}", self.prizes);
        true
    }

    /// Spawn, expire, then collect, in that order
    pub fn update<R: Rng>(&mut self, center: Vec3, player: Vec3, now: f32, rng: &mut R, events: &mut EventQueue) {
        self.try_spawn(center, now, rng, events);
        self.expire(now, events);
        self.try_collect(player, now, rng, events);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::events::EventKind;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    const FAR: Vec3 = Vec3::new(1000.0, 0.0, 1000.0);

    #[test]
    fn test_chest_lifecycle_expiry() {
        let mut rng = Pcg32::seed_from_u64(1);
        let mut events = EventQueue::new();
        let mut spawner = ChestSpawner::new(ChestTiming::default(), -1.3, -400.0);
        spawner.next_spawn = -1.0;

        assert!(spawner.try_spawn(Vec3::ZERO, 0.0, &mut rng, &mut events));
        assert_eq!(spawner.next_spawn, 300.0);

        spawner.update(Vec3::ZERO, FAR, 10.0, &mut rng, &mut events);
        assert!(spawner.chest.active);

        assert!(spawner.chest.is_expired(16.0, 15.0));
        spawner.update(Vec3::ZERO, FAR, 16.0, &mut rng, &mut events);
        assert!(!spawner.chest.active);
        assert_eq!(spawner.next_spawn, 316.0);
        assert!(events.take(EventKind::ChestExpired));
    }

    #[test]
    fn test_spawn_placement() {
        let mut rng = Pcg32::seed_from_u64(2);
        let mut events = EventQueue::new();
        let mut spawner = ChestSpawner::new(ChestTiming::default(), -1.3, 0.0);
        assert!(!spawner.try_spawn(Vec3::ZERO, 300.0, &mut rng, &mut events));
        let center = Vec3::new(5.0, 3.0, -2.0);
        assert!(spawner.try_spawn(center, 300.5, &mut rng, &mut events));
        let p = spawner.chest.pos;
        assert!((p.x - center.x).abs() <= 12.0 && (p.z - center.z).abs() <= 12.0);
        assert!((p.y - (-0.9)).abs() < 1e-5);
        // Already active: no double spawn
        assert!(!spawner.try_spawn(center, 900.0, &mut rng, &mut events));
    }

    #[test]
    fn test_collect_increments_prizes_and_reschedules() {
        let mut rng = Pcg32::seed_from_u64(3);
        let mut events = EventQueue::new();
        let timing = ChestTiming {
            respawn_min: 20.0,
            respawn_max: 40.0,
            ..Default::default()
        };
        let mut spawner = ChestSpawner::new(timing, -1.3, -400.0);
        spawner.try_spawn(Vec3::ZERO, 0.0, &mut rng, &mut events);
        let at = spawner.chest.pos + Vec3::new(0.3, 0.0, 0.0);

        assert!(!spawner.try_collect(FAR, 5.0, &mut rng, &mut events));
        assert!(spawner.try_collect(at, 5.0, &mut rng, &mut events));
        assert_eq!(spawner.prizes, 1);
        assert!(!spawner.chest.active);
        assert!(spawner.next_spawn >= 25.0 && spawner.next_spawn <= 45.0);
        assert!(events.take(EventKind::ChestCollected));
        // Inactive chest can't be collected twice
        assert!(!spawner.try_collect(at, 5.1, &mut rng, &mut events));
        assert_eq!(spawner.prizes, 1);
    }
}
