//! Skipping stones
//!
//! A fixed pool of ballistic stones. Each one flies under reduced gravity,
//! skips off the composed water surface while it is fast and shallow enough,
//! and sinks otherwise. Stones also knock floating cubes and thud off the boat.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::buoyancy::FloatingCube;
use super::collision::point_in_box;
use super::events::{EventQueue, SimEvent};
use super::water::Water;
use crate::consts::{MAX_STONES, PROJECTILE_DRAG, STONE_LIFETIME, STYLIZED_GRAVITY};
use crate::{flat, normalize_or, xz_distance};

/// Vertical velocity scale kept on a skip (sign flipped)
const NORMAL_RESTITUTION: f32 = 0.6;
const TANGENT_DAMPING_BASE: f32 = 0.9;
const TANGENT_DAMPING_STEP: f32 = 0.04;
const TANGENT_DAMPING_MIN: f32 = 0.6;
/// Height above the surface a skipping stone is snapped to
const SKIP_SNAP: f32 = 0.02;

/// Cube half extent used for stone impacts
const CUBE_HIT_HALF: f32 = 0.6;
const CUBE_HIT_LIFT: f32 = 2.5;
const CUBE_HIT_NUDGE: f32 = 0.08;
/// Vertical band around the boat hull that counts as a hit
const BOAT_HIT_HEIGHT: f32 = 1.0;

/// Charge rate while the throw is held (per second)
const THROW_CHARGE_RATE: f32 = 1.0;
const THROW_MIN_ANGLE: f32 = 6.0;
const THROW_MAX_ANGLE: f32 = 22.0;
const THROW_MIN_SPEED: f32 = 6.0;
const THROW_MAX_SPEED: f32 = 20.0;

/// Thresholds that decide between a skip and a sink
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SkipRules {
    /// Impact speed must exceed this
    pub min_speed: f32,
    /// Impact angle below horizontal must be under this (degrees)
    pub max_angle_deg: f32,
    /// A stone that has already skipped this many times sinks
    pub max_bounces: u32,
}

impl Default for SkipRules {
    fn default() -> Self {
        Self {
            min_speed: 5.0,
            max_angle_deg: 30.0,
            max_bounces: 8,
        }
    }
}

/// Tangential velocity factor for the skip after `bounces` previous skips
#[inline]
pub fn tangent_damping(bounces: u32) -> f32 {
    (TANGENT_DAMPING_BASE - TANGENT_DAMPING_STEP * bounces as f32).max(TANGENT_DAMPING_MIN)
}

/// Impact angle below horizontal in degrees. Zero when there is no
/// horizontal motion to measure against.
#[inline]
pub fn impact_angle_deg(vel: Vec3) -> f32 {
    let horiz = flat(vel).length();
    if horiz > 1e-4 {
        (-vel.y).atan2(horiz).to_degrees()
    } else {
        0.0
    }
}

/// A single stone
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Stone {
    pub pos: Vec3,
    pub vel: Vec3,
    pub bounces: u32,
    /// Seconds since thrown
    pub life: f32,
    pub active: bool,
}

/// A hull the stones can hit
#[derive(Debug, Clone, Copy)]
pub struct HullProbe {
    pub center: Vec3,
    pub radius: f32,
}

/// Hold-to-charge throw state
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ThrowCharge {
    pub charging: bool,
    pub charge: f32,
}

impl ThrowCharge {
    /// Accumulate charge while held; starting a hold resets the charge
    pub fn hold(&mut self, dt: f32) {
        if !self.charging {
            self.charging = true;
            self.charge = 0.0;
        }
        self.charge = (self.charge + THROW_CHARGE_RATE * dt).min(1.0);
    }

    /// End the hold, returning the charge if one was in progress
    pub fn release(&mut self) -> Option<f32> {
        if !self.charging {
            return None;
        }
        let charge = self.charge;
        self.charging = false;
        self.charge = 0.0;
        Some(charge)
    }

    pub fn cancel(&mut self) {
        self.charging = false;
        self.charge = 0.0;
    }

    /// Launch angle below horizontal (degrees) and speed for a charge
    pub fn launch_params(charge: f32) -> (f32, f32) {
        let t = charge.clamp(0.0, 1.0);
        let angle = THROW_MAX_ANGLE - t * (THROW_MAX_ANGLE - THROW_MIN_ANGLE);
        let speed = THROW_MIN_SPEED + t * (THROW_MAX_SPEED - THROW_MIN_SPEED);
        (angle, speed)
    }
}

/// Fixed pool of stones
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StonePool {
    pub stones: [Stone; MAX_STONES],
    pub rules: SkipRules,
}

impl Default for StonePool {
    fn default() -> Self {
        Self::new(SkipRules::default())
    }
}

impl StonePool {
    pub fn new(rules: SkipRules) -> Self {
        Self {
            stones: Default::default(),
            rules,
        }
    }

    /// Pick a slot: first free, else the one that has lived longest
    fn allocate(&self) -> usize {
        if let Some(i) = self.stones.iter().position(|s| !s.active) {
            return i;
        }
        let mut idx = 0;
        let mut oldest = -1.0;
        for (i, s) in self.stones.iter().enumerate() {
            if s.life > oldest {
                oldest = s.life;
                idx = i;
            }
        }
        idx
    }

    /// Throw a stone from the camera. Always succeeds; returns the slot used.
    pub fn spawn(&mut self, camera: Vec3, forward: Vec3, up: Vec3, angle_down_deg: f32, speed: f32) -> usize {
        let idx = self.allocate();

        let forward_flat = normalize_or(flat(forward), 1e-3, Vec3::NEG_Z);
        let angle = angle_down_deg.to_radians();
        let dir = (forward_flat * angle.cos() + Vec3::new(0.0, -angle.sin(), 0.0)).normalize();

        let stone = &mut self.stones[idx];
        stone.active = true;
        stone.bounces = 0;
        stone.life = 0.0;
        stone.vel = dir * speed;
        stone.pos = camera + forward * 0.5 - up * 0.1;
        idx
    }

    /// Throw with launch parameters derived from a charge in [0, 1]
    pub fn throw_charged(&mut self, camera: Vec3, forward: Vec3, up: Vec3, charge: f32) -> usize {
        let (angle, speed) = ThrowCharge::launch_params(charge);
        log::debug!("Throw: charge={charge:.2} angle_down={angle:.1} speed={speed:.1}");
        self.spawn(camera, forward, up, angle, speed)
    }

    /// Advance every active stone
    pub fn update(
        &mut self,
        dt: f32,
        time: f32,
        water: &mut Water,
        cubes: &mut [FloatingCube],
        hull: Option<HullProbe>,
        events: &mut EventQueue,
    ) {
        let rules = self.rules;
        for stone in self.stones.iter_mut().filter(|s| s.active) {
            stone.life += dt;
            if stone.life > STONE_LIFETIME {
                stone.active = false;
                continue;
            }

            let old_pos = stone.pos;
            let mut vel = stone.vel;
            vel.y -= STYLIZED_GRAVITY * dt;
            vel *= (-PROJECTILE_DRAG * dt).exp();
            let mut new_pos = old_pos + vel * dt;

            let water_y = water.surface_height(new_pos, time);
            let was_above = old_pos.y > water_y;
            let is_below_or_on = new_pos.y <= water_y;

            if was_above && is_below_or_on && vel.y < 0.0 {
                let speed = vel.length();
                let angle = impact_angle_deg(vel);

                if speed > rules.min_speed && angle < rules.max_angle_deg && stone.bounces < rules.max_bounces {
                    let v_normal = Vec3::new(0.0, vel.y, 0.0);
                    let v_tangent = vel - v_normal;
                    vel = v_normal * -NORMAL_RESTITUTION + v_tangent * tangent_damping(stone.bounces);
                    new_pos.y = water_y + SKIP_SNAP;
                    stone.bounces += 1;

                    water.splash(new_pos, time);
                    events.push(SimEvent::RippleCreated { pos: new_pos });
                    events.push(SimEvent::StoneSkipped {
                        pos: new_pos,
                        bounces: stone.bounces,
                    });
                } else {
                    stone.active = false;
                    events.push(SimEvent::StoneSank { pos: new_pos });
                    continue;
                }
            }

            for (i, cube) in cubes.iter_mut().enumerate() {
                if point_in_box(new_pos, cube.pos, CUBE_HIT_HALF) {
                    cube.vel_y += CUBE_HIT_LIFT;
                    cube.pos += normalize_or(vel, 1e-6, Vec3::X) * CUBE_HIT_NUDGE;
                    water.splash_at(new_pos, time);
                    events.push(SimEvent::RippleCreated { pos: new_pos });
                    events.push(SimEvent::CubeHit { cube: i });
                    stone.active = false;
                    break;
                }
            }

            if let Some(hull) = hull.filter(|_| stone.active) {
                let near = xz_distance(new_pos, hull.center) < hull.radius;
                if near && (new_pos.y - hull.center.y).abs() < BOAT_HIT_HEIGHT {
                    stone.active = false;
                    events.push(SimEvent::BoatHit);
                }
            }

            stone.pos = new_pos;
            stone.vel = vel;
        }
    }

    pub fn active_count(&self) -> usize {
        self.stones.iter().filter(|s| s.active).count()
    }

    pub fn iter_active(&self) -> impl Iterator<Item = &Stone> {
        self.stones.iter().filter(|s| s.active)
    }
}
