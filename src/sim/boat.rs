//! Boat kinematics
//!
//! Yaw/speed vehicle model with exponential drag and low-pass bobbing on the
//! water surface. Physics yaw 0 points along +Z: the forward vector carries a
//! fixed +90° offset so it lines up with the hull mesh.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::buoyancy::FloatingCube;
use super::collision::{push_out_static, separate_pair};
use super::stone::HullProbe;
use super::water::Water;
use crate::consts::BOAT_RADIUS;

/// Offset between physics yaw and the heading used for motion and camera
pub const BOAT_HEADING_OFFSET_DEG: f32 = 90.0;
/// Offset applied when orienting the hull mesh
pub const BOAT_MODEL_YAW_OFFSET_DEG: f32 = 180.0;

/// Freeboard above the sampled surface
const BOAT_FREEBOARD: f32 = 0.05;
/// Fraction of the previous height kept each tick
const BOB_RETAIN: f32 = 0.8;
/// Speed decay rate (per second)
const SPEED_DRAG: f32 = 1.2;
/// Reverse speed limit as a fraction of max speed
const REVERSE_FRACTION: f32 = 0.4;

/// Footprint radius used when the hull pushes cubes
const CUBE_PUSH_RADIUS: f32 = 0.9 * std::f32::consts::SQRT_2;
/// Footprint radius used for cube-vs-cube separation
const CUBE_PAIR_RADIUS: f32 = 0.7 * std::f32::consts::SQRT_2;

/// Drive tuning
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoatTuning {
    pub accel: f32,
    pub max_speed: f32,
    /// Degrees per second
    pub turn_speed: f32,
    /// Sideways drift speed while a turn key is held
    pub side_accel: f32,
}

impl Default for BoatTuning {
    fn default() -> Self {
        Self {
            accel: 4.0,
            max_speed: 8.0,
            turn_speed: 60.0,
            side_accel: 2.5,
        }
    }
}

/// Steering keys for one tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BoatControls {
    pub forward: bool,
    pub back: bool,
    pub left: bool,
    pub right: bool,
}

impl BoatControls {
    pub fn any(&self) -> bool {
        self.forward || self.back || self.left || self.right
    }
}

/// The player's boat
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Boat {
    pub pos: Vec3,
    pub yaw_deg: f32,
    pub speed: f32,
    pub active: bool,
    pub tuning: BoatTuning,
}

impl Default for Boat {
    fn default() -> Self {
        Self {
            pos: Vec3::new(-4.0, 0.4, 1.0),
            yaw_deg: 20.0,
            speed: 0.0,
            active: true,
            tuning: BoatTuning::default(),
        }
    }
}

impl Boat {
    /// Unit heading in XZ, including the +90° offset
    pub fn forward(&self) -> Vec3 {
        let rad = (self.yaw_deg + BOAT_HEADING_OFFSET_DEG).to_radians();
        Vec3::new(rad.cos(), 0.0, rad.sin()).normalize()
    }

    /// Right-hand vector used for the turning drift
    pub fn right(&self) -> Vec3 {
        let fwd = self.forward();
        Vec3::new(-fwd.z, 0.0, fwd.x)
    }

    /// Advance one tick
    pub fn update(&mut self, controls: BoatControls, water: &Water, dt: f32, time: f32) {
        if !self.active {
            return;
        }
        let t = self.tuning;

        if controls.forward {
            self.speed += t.accel * dt;
        }
        if controls.back {
            self.speed -= t.accel * dt;
        }
        let max_speed = t.max_speed.abs();
        self.speed = self.speed.min(max_speed).max(-max_speed * REVERSE_FRACTION);

        if controls.left {
            self.yaw_deg += t.turn_speed * dt;
        }
        if controls.right {
            self.yaw_deg -= t.turn_speed * dt;
        }

        let fwd = self.forward();
        let mut side = 0.0;
        if controls.right {
            side += 1.0;
        }
        if controls.left {
            side -= 1.0;
        }
        self.pos += fwd * (self.speed * dt);
        if side != 0.0 {
            self.pos += self.right() * (side * t.side_accel * dt);
        }

        self.speed *= (-SPEED_DRAG * dt).exp();

        let target = water.surface_height(self.pos, time) + BOAT_FREEBOARD;
        self.pos.y = self.pos.y * BOB_RETAIN + target * (1.0 - BOB_RETAIN);
    }

    /// Push overlapping cubes out of the hull, then separate cube pairs
    pub fn push_cubes(&self, cubes: &mut [FloatingCube]) {
        for cube in cubes.iter_mut() {
            push_out_static(self.pos, BOAT_RADIUS, &mut cube.pos, CUBE_PUSH_RADIUS);
        }
        for i in 0..cubes.len() {
            let (head, tail) = cubes.split_at_mut(i + 1);
            let a = &mut head[i];
            for b in tail.iter_mut() {
                separate_pair(&mut a.pos, &mut b.pos, CUBE_PAIR_RADIUS);
            }
        }
    }

    /// Collision probe for stones, if the boat is in play
    pub fn hull_probe(&self) -> Option<HullProbe> {
        self.active.then_some(HullProbe {
            center: self.pos,
            radius: BOAT_RADIUS,
        })
    }
}
