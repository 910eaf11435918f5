//! Floating cubes
//!
//! Spring-damper toward the sampled surface plus a lateral drift down the
//! ripple slope. Also carries the press-and-release interaction that lets the
//! player dunk a cube and let it pop back up.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::water::Water;
use crate::consts::{BUOYANCY_DAMPING, BUOYANCY_STIFFNESS, CUBE_FREEBOARD};

/// Lateral drift gain applied to the ripple gradient
const RIPPLE_DRIFT: f32 = 0.5;
/// Downward velocity rate while pressed (m/s²)
const PRESS_STRENGTH: f32 = 20.0;
const RELEASE_BASE_IMPULSE: f32 = 4.0;
const RELEASE_IMPULSE_PER_SEC: f32 = 6.0;
/// Press time counted toward the release impulse
const MAX_PRESS_TIME: f32 = 2.0;

/// One vertical spring-damper step toward `target`
#[inline]
pub fn spring_step(y: &mut f32, vel_y: &mut f32, target: f32, dt: f32) {
    *vel_y += BUOYANCY_STIFFNESS * (target - *y) * dt;
    *vel_y *= (-BUOYANCY_DAMPING * dt).exp();
    *y += *vel_y * dt;
}

/// A floating cube
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FloatingCube {
    pub pos: Vec3,
    pub vel_y: f32,
}

impl FloatingCube {
    pub fn new(pos: Vec3) -> Self {
        Self { pos, vel_y: 0.0 }
    }

    /// Advance buoyancy against the current water surface
    pub fn update(&mut self, water: &Water, dt: f32, time: f32) {
        let target = water.surface_height(self.pos, time) + CUBE_FREEBOARD;
        spring_step(&mut self.pos.y, &mut self.vel_y, target, dt);

        let grad = water.ripple_gradient(self.pos, time);
        self.pos.x += grad.x * RIPPLE_DRIFT * dt;
        self.pos.z += grad.z * RIPPLE_DRIFT * dt;
    }
}

/// Press state for the player-controlled cube
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CubePress {
    /// Cube the next press will act on
    pub controlled: usize,
    /// Cube currently held down
    pub active: Option<usize>,
    pub held_time: f32,
}

impl CubePress {
    /// Switch the controlled cube among `count` cubes
    pub fn cycle(&mut self, count: usize) {
        if count > 0 {
            self.controlled = (self.controlled + 1) % count;
            log::debug!("Now controlling cube {}", self.controlled);
        }
    }

    /// Drive the press from the held state of the button this frame
    pub fn update(&mut self, cubes: &mut [FloatingCube], held: bool, dt: f32) {
        match (held, self.active) {
            (true, None) => {
                if self.controlled < cubes.len() {
                    self.active = Some(self.controlled);
                    self.held_time = 0.0;
                    self.push(cubes, dt);
                }
            }
            (true, Some(_)) => self.push(cubes, dt),
            (false, Some(index)) => {
                let t = self.held_time.min(MAX_PRESS_TIME);
                if let Some(cube) = cubes.get_mut(index) {
                    cube.vel_y += RELEASE_BASE_IMPULSE + RELEASE_IMPULSE_PER_SEC * t;
                }
                self.active = None;
                self.held_time = 0.0;
            }
            (false, None) => {}
        }
    }

    fn push(&mut self, cubes: &mut [FloatingCube], dt: f32) {
        self.held_time += dt;
        if let Some(cube) = self.active.and_then(|i| cubes.get_mut(i)) {
            cube.vel_y -= PRESS_STRENGTH * dt;
        }
    }

    /// Drop any in-progress press without an impulse
    pub fn cancel(&mut self) {
        self.active = None;
        self.held_time = 0.0;
    }
}
