//! Fish swarm
//!
//! Each fish wanders by random yaw kicks, steers away from the boat, the
//! floating cubes and a submerged player, and can bite the rod lure. A hooked
//! fish fights on the line for a short random time, is shown as caught for a
//! second, then despawns and respawns elsewhere after a cooldown.

use glam::Vec3;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::boat::Boat;
use super::buoyancy::FloatingCube;
use super::events::{EventQueue, SimEvent};
use super::rod::Rod;
use crate::consts::FISH_BOUNDS;
use crate::{flat, normalize_or, wrap_degrees, xz_distance};

const SWIM_SPEED: f32 = 1.2;
/// Continuous yaw drift (degrees per second)
const WANDER_YAW_RATE: f32 = 25.0;
/// Per-tick chance of a large yaw kick
const WANDER_KICK_CHANCE: f32 = 0.03;
const WANDER_KICK_DEG: f32 = 15.0;
/// Velocity smoothing rate toward the heading
const STEER_ACCEL: f32 = 4.0;

/// Spawn area half-extent
const SPAWN_EXTENT: f32 = 12.0;
const SPAWN_DEPTH_MIN: f32 = 0.2;
const SPAWN_DEPTH_MAX: f32 = 0.8;
/// Minimum XZ spacing for the initial layout
const SPAWN_SEPARATION: f32 = 1.0;
const SPAWN_TRIES: usize = 16;
const RESPAWN_COOLDOWN: f32 = 2.0;

const SWIM_DEPTH: f32 = 0.3;
const BOB_AMPLITUDE: f32 = 0.15;

const LURE_CATCH_RADIUS: f32 = 0.6;
const FIGHT_MIN: f32 = 0.9;
const FIGHT_MAX: f32 = 1.4;
/// Distance from the lure to where the fish is pinned
const HOOK_OFFSET: f32 = 0.35;
const HOOK_DEPTH: f32 = 0.2;
/// Struggle sweep: sin(rate * t) * amplitude * degrees
const STRUGGLE_RATE: f32 = 6.0;
const STRUGGLE_AMPLITUDE: f32 = 0.5;
const STRUGGLE_DEG: f32 = 20.0;
const CAUGHT_DISPLAY: f32 = 1.0;

/// Fraction of the avoidance radius treated as the inner band
const AVOID_INNER: f32 = 0.6;

/// A repulsion source: radius plus blend fractions inside / outside the inner band
#[derive(Debug, Clone, Copy)]
pub struct Avoidance {
    pub radius: f32,
    pub near: f32,
    pub far: f32,
}

pub const AVOID_BOAT: Avoidance = Avoidance {
    radius: 2.0,
    near: 1.0,
    far: 0.5,
};
pub const AVOID_CUBE: Avoidance = Avoidance {
    radius: 1.2,
    near: 0.9,
    far: 0.45,
};
pub const AVOID_PLAYER: Avoidance = Avoidance {
    radius: 2.5,
    near: 1.2,
    far: 0.7,
};

/// Behavior sub-state of an active fish
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum FishState {
    #[default]
    Idle,
    /// On the line, struggling
    Fighting,
}

/// A single fish
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Fish {
    pub pos: Vec3,
    pub vel: Vec3,
    pub active: bool,
    pub respawn_timer: f32,
    pub yaw_deg: f32,
    pub prev_yaw_deg: f32,
    /// Degrees per second, used for banking only
    pub yaw_vel: f32,
    pub caught: bool,
    pub caught_timer: f32,
    pub state: FishState,
    pub fight_timer: f32,
    pub fight_duration: f32,
    pub catch_counted: bool,
}

impl Fish {
    /// Fresh random placement; clears every transient field
    fn place<R: Rng>(&mut self, water_height: f32, rng: &mut R) {
        self.pos = Vec3::new(
            rng.random_range(-SPAWN_EXTENT..=SPAWN_EXTENT),
            water_height - rng.random_range(SPAWN_DEPTH_MIN..=SPAWN_DEPTH_MAX),
            rng.random_range(-SPAWN_EXTENT..=SPAWN_EXTENT),
        );
        self.vel = Vec3::new(rng.random_range(-1.0..=1.0), 0.0, rng.random_range(-1.0..=1.0));
        self.active = true;
        self.respawn_timer = 0.0;
        self.yaw_deg = self.vel.z.atan2(self.vel.x).to_degrees();
        self.prev_yaw_deg = self.yaw_deg;
        self.yaw_vel = 0.0;
        self.caught = false;
        self.caught_timer = 0.0;
        self.state = FishState::Idle;
        self.fight_timer = 0.0;
        self.fight_duration = 0.0;
        self.catch_counted = false;
    }

    /// Unit swim direction for a yaw (Z is flipped relative to the yaw angle)
    pub fn heading(yaw_deg: f32) -> Vec3 {
        let rad = yaw_deg.to_radians();
        Vec3::new(rad.cos(), 0.0, -rad.sin())
    }

    /// Roll for the renderer, banking into turns
    pub fn bank_roll(&self) -> f32 {
        (-self.yaw_vel * 0.005).clamp(-0.4, 0.4)
    }

    /// Free-swimming (not on the line and not being displayed as caught)
    pub fn is_swimming(&self) -> bool {
        self.active && !self.caught && self.state == FishState::Idle
    }

    fn steer_away(&mut self, from: Vec3, avoid: Avoidance) {
        let to = flat(self.pos) - flat(from);
        let dist = to.length();
        if dist < avoid.radius && dist > 1e-4 {
            let away = to / dist;
            let away_yaw = away.z.atan2(away.x).to_degrees();
            let delta = wrap_degrees(away_yaw - self.yaw_deg);
            let strength = if dist < avoid.radius * AVOID_INNER {
                avoid.near
            } else {
                avoid.far
            };
            self.yaw_deg += delta * strength;
        }
    }
}

/// What the swarm reacts to this tick
#[derive(Debug, Clone, Copy)]
pub struct Surroundings<'a> {
    pub boat: &'a Boat,
    pub cubes: &'a [FloatingCube],
    /// Player position when submerged; `None` when above water
    pub diver: Option<Vec3>,
}

/// All fish plus the running catch count
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FishSwarm {
    pub fish: Vec<Fish>,
    pub caught_total: u32,
}

impl FishSwarm {
    /// Lay out `count` fish with basic separation (rejection sampled)
    pub fn new<R: Rng>(count: usize, water_height: f32, rng: &mut R) -> Self {
        let mut fish: Vec<Fish> = Vec::with_capacity(count);
        for _ in 0..count {
            let mut f = Fish::default();
            for _ in 0..SPAWN_TRIES {
                f.place(water_height, rng);
                let crowded = fish
                    .iter()
                    .any(|other| xz_distance(f.pos, other.pos) < SPAWN_SEPARATION);
                if !crowded {
                    break;
                }
            }
            fish.push(f);
        }
        Self {
            fish,
            caught_total: 0,
        }
    }

    /// Advance every fish
    pub fn update<R: Rng>(
        &mut self,
        dt: f32,
        time: f32,
        water_height: f32,
        around: Surroundings<'_>,
        rod: &mut Rod,
        rng: &mut R,
        events: &mut EventQueue,
    ) {
        for (index, f) in self.fish.iter_mut().enumerate() {
            if !f.active {
                f.respawn_timer += dt;
                if f.respawn_timer > RESPAWN_COOLDOWN {
                    f.place(water_height, rng);
                }
                continue;
            }

            if f.caught {
                f.caught_timer += dt;
                if f.caught_timer > CAUGHT_DISPLAY {
                    f.caught = false;
                    f.active = false;
                    f.respawn_timer = 0.0;
                }
                continue;
            }

            if f.state == FishState::Fighting {
                f.fight_timer += dt;
                let dir = normalize_or(flat(rod.vel), 1e-3, Vec3::X);
                let wiggle = (f.fight_timer * STRUGGLE_RATE).sin() * STRUGGLE_AMPLITUDE;

                f.pos = rod.pos + dir * HOOK_OFFSET;
                f.pos.y = water_height - HOOK_DEPTH;
                let base_yaw = dir.z.atan2(dir.x).to_degrees();
                f.yaw_deg = base_yaw + wiggle * STRUGGLE_DEG;
                f.prev_yaw_deg = f.yaw_deg;
                f.yaw_vel = 0.0;
                f.vel = Vec3::ZERO;

                if f.fight_timer > f.fight_duration {
                    f.caught = true;
                    f.caught_timer = 0.0;
                    f.state = FishState::Idle;
                    if !f.catch_counted {
                        self.caught_total += 1;
                        f.catch_counted = true;
                        events.push(SimEvent::FishCaught { fish: index });
                        log::info!("Fish caught! total={}", self.caught_total);
                    }
                }
                continue;
            }

            if rng.random::<f32>() < WANDER_KICK_CHANCE {
                f.yaw_deg += rng.random_range(-WANDER_KICK_DEG..=WANDER_KICK_DEG);
            } else {
                f.yaw_deg += rng.random_range(-WANDER_YAW_RATE..=WANDER_YAW_RATE) * dt;
            }

            f.steer_away(around.boat.pos, AVOID_BOAT);
            for cube in around.cubes {
                f.steer_away(cube.pos, AVOID_CUBE);
            }
            if let Some(diver) = around.diver {
                f.steer_away(diver, AVOID_PLAYER);
            }

            f.yaw_deg = wrap_degrees(f.yaw_deg);
            let yaw_delta = wrap_degrees(f.yaw_deg - f.prev_yaw_deg);
            f.yaw_vel = if dt > 0.0 { yaw_delta / dt } else { 0.0 };
            f.prev_yaw_deg = f.yaw_deg;

            let desired = Fish::heading(f.yaw_deg) * SWIM_SPEED;
            f.vel += (desired - f.vel) * (1.0 - (-STEER_ACCEL * dt).exp());

            f.pos += f.vel * dt;
            f.pos.y = water_height - SWIM_DEPTH + BOB_AMPLITUDE * (time + f.pos.x * 0.5).sin();
            f.pos.x = f.pos.x.clamp(-FISH_BOUNDS, FISH_BOUNDS);
            f.pos.z = f.pos.z.clamp(-FISH_BOUNDS, FISH_BOUNDS);

            if rod.active && !rod.has_caught && xz_distance(f.pos, rod.pos) < LURE_CATCH_RADIUS {
                f.state = FishState::Fighting;
                f.fight_timer = 0.0;
                f.fight_duration = rng.random_range(FIGHT_MIN..=FIGHT_MAX);
                f.catch_counted = false;
                rod.has_caught = true;
                events.push(SimEvent::FishHooked { fish: index });
                log::debug!("Fish {index} hooked, fighting for {:.2}s", f.fight_duration);
            }
        }
    }

    pub fn active_count(&self) -> usize {
        self.fish.iter().filter(|f| f.active).count()
    }

    /// The fish currently on the line, if any
    pub fn hooked(&self) -> Option<usize> {
        self.fish
            .iter()
            .position(|f| f.active && f.state == FishState::Fighting)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::events::EventKind;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn far_boat() -> Boat {
        Boat {
            pos: Vec3::new(500.0, 0.0, 500.0),
            ..Default::default()
        }
    }

    fn lure_at(pos: Vec3) -> Rod {
        Rod {
            pos,
            active: true,
            flying: false,
            ..Default::default()
        }
    }

    fn swimming_fish(pos: Vec3) -> Fish {
        Fish {
            pos,
            active: true,
            ..Default::default()
        }
    }

    #[test]
    fn test_initial_layout_within_spawn_area() {
        let mut rng = Pcg32::seed_from_u64(7);
        let swarm = FishSwarm::new(20, 0.0, &mut rng);
        assert_eq!(swarm.fish.len(), 20);
        for f in &swarm.fish {
            assert!(f.active);
            assert!(f.pos.x.abs() <= 12.0 && f.pos.z.abs() <= 12.0);
            assert!(f.pos.y <= -0.2 && f.pos.y >= -0.8);
        }
    }

    #[test]
    fn test_same_seed_same_swarm() {
        let a = FishSwarm::new(10, 0.0, &mut Pcg32::seed_from_u64(3));
        let b = FishSwarm::new(10, 0.0, &mut Pcg32::seed_from_u64(3));
        for (x, y) in a.fish.iter().zip(&b.fish) {
            assert_eq!(x.pos, y.pos);
            assert_eq!(x.yaw_deg, y.yaw_deg);
        }
    }

    #[test]
    fn test_fish_stay_in_bounds_and_wrapped() {
        let mut rng = Pcg32::seed_from_u64(11);
        let mut swarm = FishSwarm::new(20, 0.0, &mut rng);
        let boat = far_boat();
        let mut rod = Rod::default();
        let mut events = EventQueue::new();
        let dt = 1.0 / 60.0;
        for i in 0..3000 {
            let around = Surroundings {
                boat: &boat,
                cubes: &[],
                diver: None,
            };
            swarm.update(dt, i as f32 * dt, 0.0, around, &mut rod, &mut rng, &mut events);
            for f in swarm.fish.iter().filter(|f| f.active) {
                assert!(f.pos.x.abs() <= FISH_BOUNDS && f.pos.z.abs() <= FISH_BOUNDS);
                assert!(f.yaw_deg > -180.0 && f.yaw_deg <= 180.0);
                assert!(f.vel.length() <= SWIM_SPEED * 1.5);
            }
        }
        assert_eq!(swarm.caught_total, 0);
    }

    #[test]
    fn test_fish_turns_away_from_boat() {
        let boat = Boat {
            pos: Vec3::new(0.5, 0.0, 0.0),
            ..Default::default()
        };
        // Heading straight at the boat (+X); away bearing is 180°
        let mut f = swimming_fish(Vec3::ZERO);
        f.yaw_deg = 0.0;
        f.steer_away(boat.pos, AVOID_BOAT);
        assert!((f.yaw_deg.abs() - 180.0).abs() < 1e-3);

        // Outside the radius nothing changes
        let mut g = swimming_fish(Vec3::new(-5.0, 0.0, 0.0));
        g.yaw_deg = 33.0;
        g.steer_away(boat.pos, AVOID_BOAT);
        assert_eq!(g.yaw_deg, 33.0);
    }

    #[test]
    fn test_outer_band_blends_half_way() {
        // 1.5 from the boat: inside the 2.0 radius, outside the 1.2 inner band
        let mut f = swimming_fish(Vec3::ZERO);
        f.yaw_deg = 0.0;
        f.steer_away(Vec3::new(1.5, 0.0, 0.0), AVOID_BOAT);
        assert!((f.yaw_deg - 90.0).abs() < 1e-3);
    }

    #[test]
    fn test_cube_bands() {
        let mut near = swimming_fish(Vec3::ZERO);
        near.steer_away(Vec3::new(0.5, 0.0, 0.0), AVOID_CUBE);
        assert!((near.yaw_deg - 180.0 * 0.9).abs() < 1e-3);

        let mut far = swimming_fish(Vec3::ZERO);
        far.steer_away(Vec3::new(1.0, 0.0, 0.0), AVOID_CUBE);
        assert!((far.yaw_deg - 180.0 * 0.45).abs() < 1e-3);
    }

    #[test]
    fn test_player_bands() {
        let mut near = swimming_fish(Vec3::ZERO);
        near.steer_away(Vec3::new(1.0, 0.0, 0.0), AVOID_PLAYER);
        assert!((near.yaw_deg - 180.0 * 1.2).abs() < 1e-3);

        let mut far = swimming_fish(Vec3::ZERO);
        far.steer_away(Vec3::new(2.0, 0.0, 0.0), AVOID_PLAYER);
        assert!((far.yaw_deg - 180.0 * 0.7).abs() < 1e-3);
    }

    fn yaw_after_one_step(cubes: &[FloatingCube], diver: Option<Vec3>) -> f32 {
        let mut rng = Pcg32::seed_from_u64(5);
        let boat = far_boat();
        let mut rod = Rod::default();
        let mut events = EventQueue::new();
        let mut swarm = FishSwarm {
            fish: vec![swimming_fish(Vec3::ZERO)],
            caught_total: 0,
        };
        let around = Surroundings {
            boat: &boat,
            cubes,
            diver,
        };
        swarm.update(1.0 / 60.0, 0.0, 0.0, around, &mut rod, &mut rng, &mut events);
        swarm.fish[0].yaw_deg
    }

    #[test]
    fn test_update_reacts_to_cubes_and_diver() {
        let baseline = yaw_after_one_step(&[], None);
        let cubes = [FloatingCube::new(Vec3::new(0.5, 0.3, 0.0))];
        assert!((yaw_after_one_step(&cubes, None) - baseline).abs() > 10.0);
        let diver = Some(Vec3::new(1.0, -1.0, 0.0));
        assert!((yaw_after_one_step(&[], diver) - baseline).abs() > 10.0);
    }

    #[test]
    fn test_only_one_fish_hooked_per_cast() {
        let mut rng = Pcg32::seed_from_u64(1);
        let boat = far_boat();
        let mut rod = lure_at(Vec3::new(3.0, 0.05, 3.0));
        let mut swarm = FishSwarm {
            fish: vec![
                swimming_fish(Vec3::new(3.0, -0.3, 3.0)),
                swimming_fish(Vec3::new(3.05, -0.3, 3.0)),
            ],
            caught_total: 0,
        };
        let mut events = EventQueue::new();
        let around = Surroundings {
            boat: &boat,
            cubes: &[],
            diver: None,
        };
        swarm.update(1.0 / 60.0, 0.0, 0.0, around, &mut rod, &mut rng, &mut events);

        let fighting = swarm
            .fish
            .iter()
            .filter(|f| f.state == FishState::Fighting)
            .count();
        assert_eq!(fighting, 1);
        assert!(rod.has_caught);
        assert_eq!(swarm.hooked(), Some(0));
        assert!(swarm.fish[1].is_swimming());
        assert!(events.take(EventKind::FishHooked));
    }

    #[test]
    fn test_catch_counted_once_over_lifecycle() {
        let mut rng = Pcg32::seed_from_u64(2);
        let boat = far_boat();
        let mut rod = lure_at(Vec3::new(-2.0, 0.05, 1.0));
        let mut swarm = FishSwarm {
            fish: vec![swimming_fish(Vec3::new(-2.0, -0.3, 1.0))],
            caught_total: 0,
        };
        let mut events = EventQueue::new();
        let dt = 1.0 / 60.0;
        let mut caught_events = 0;
        let mut saw_inactive = false;
        for i in 0..300 {
            let around = Surroundings {
                boat: &boat,
                cubes: &[],
                diver: None,
            };
            swarm.update(dt, i as f32 * dt, 0.0, around, &mut rod, &mut rng, &mut events);
            caught_events += events
                .drain()
                .iter()
                .filter(|e| matches!(e, SimEvent::FishCaught { .. }))
                .count();
            saw_inactive |= !swarm.fish[0].active;
        }
        assert_eq!(swarm.caught_total, 1);
        assert_eq!(caught_events, 1);
        assert!(saw_inactive);
    }

    #[test]
    fn test_hooked_fish_pinned_to_lure() {
        let mut rng = Pcg32::seed_from_u64(4);
        let boat = far_boat();
        let mut rod = lure_at(Vec3::new(1.0, 0.05, 1.0));
        rod.vel = Vec3::new(0.0, 0.0, 2.0);
        let mut f = swimming_fish(Vec3::ZERO);
        f.state = FishState::Fighting;
        f.fight_duration = 10.0;
        let mut swarm = FishSwarm {
            fish: vec![f],
            caught_total: 0,
        };
        let mut events = EventQueue::new();
        let around = Surroundings {
            boat: &boat,
            cubes: &[],
            diver: None,
        };
        swarm.update(0.1, 0.0, 0.0, around, &mut rod, &mut rng, &mut events);
        let f = &swarm.fish[0];
        assert!((f.pos - Vec3::new(1.0, -0.2, 1.35)).length() < 1e-5);
        assert_eq!(f.vel, Vec3::ZERO);
        assert!((f.yaw_deg - 90.0).abs() <= 10.0 + 1e-4);
        assert!(!f.caught);
    }

    #[test]
    fn test_respawn_after_cooldown() {
        let mut rng = Pcg32::seed_from_u64(9);
        let boat = far_boat();
        let mut rod = Rod::default();
        let mut f = Fish::default();
        f.caught = true;
        f.catch_counted = true;
        let mut swarm = FishSwarm {
            fish: vec![f],
            caught_total: 1,
        };
        swarm.fish[0].active = false;
        let mut events = EventQueue::new();
        for _ in 0..19 {
            let around = Surroundings {
                boat: &boat,
                cubes: &[],
                diver: None,
            };
            swarm.update(0.1, 0.0, 0.0, around, &mut rod, &mut rng, &mut events);
        }
        assert!(!swarm.fish[0].active);
        for _ in 0..3 {
            let around = Surroundings {
                boat: &boat,
                cubes: &[],
                diver: None,
            };
            swarm.update(0.1, 0.0, 0.0, around, &mut rod, &mut rng, &mut events);
        }
        let f = &swarm.fish[0];
        assert!(f.active);
        assert!(!f.caught && !f.catch_counted);
        assert_eq!(f.state, FishState::Idle);
    }
}
