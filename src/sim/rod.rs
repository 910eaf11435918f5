//! Fishing rod lure
//!
//! Hold to charge, release to cast. The lure flies ballistically, settles on
//! the surface and stays there as bait until its timer runs out.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::events::{EventQueue, SimEvent};
use super::water::Water;
use crate::consts::{PROJECTILE_DRAG, STYLIZED_GRAVITY};
use crate::normalize_or;

const CHARGE_RATE: f32 = 1.0;
/// Launch angle below the view direction at zero / full charge (degrees)
const MAX_ANGLE_DEG: f32 = 18.0;
const MIN_ANGLE_DEG: f32 = 8.0;
const MIN_SPEED: f32 = 4.0;
const MAX_SPEED: f32 = 20.0;
/// Lure rests this far above the surface
const FLOAT_HEIGHT: f32 = 0.05;
/// Total flight plus soak time before the lure is pulled
const LURE_LIFETIME: f32 = 6.0;

/// The rod and its lure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Rod {
    pub pos: Vec3,
    pub vel: Vec3,
    /// Seconds since release
    pub timer: f32,
    pub active: bool,
    pub flying: bool,
    pub charging: bool,
    /// Charge in [0, 1]
    pub charge: f32,
    /// This cast has already hooked a fish
    pub has_caught: bool,
}

impl Rod {
    /// Begin a new charge cycle; this is the only place a cast is unlocked
    pub fn start_charge(&mut self) {
        self.charging = true;
        self.charge = 0.0;
        self.has_caught = false;
    }

    pub fn tick_charge(&mut self, dt: f32) {
        if !self.charging {
            return;
        }
        self.charge = (self.charge + CHARGE_RATE * dt).min(1.0);
    }

    /// Launch angle (degrees) and speed for the current charge
    pub fn launch_params(&self) -> (f32, f32) {
        let t = self.charge.clamp(0.0, 1.0);
        let angle = MAX_ANGLE_DEG - t * (MAX_ANGLE_DEG - MIN_ANGLE_DEG);
        let speed = MIN_SPEED + t * (MAX_SPEED - MIN_SPEED);
        (angle, speed)
    }

    /// Cast the lure. No-op unless a charge is in progress.
    #[allow(clippy::too_many_arguments)]
    pub fn release(
        &mut self,
        camera: Vec3,
        forward: Vec3,
        right: Vec3,
        up: Vec3,
        water: &mut Water,
        time: f32,
        events: &mut EventQueue,
    ) {
        if !self.charging {
            return;
        }
        let charge = self.charge;
        let (angle_deg, speed) = self.launch_params();
        let dip = angle_deg.to_radians().sin();
        let dir = normalize_or(forward - Vec3::new(0.0, dip, 0.0), 1e-4, Vec3::X);

        self.active = true;
        self.flying = true;
        self.timer = 0.0;
        self.pos = camera + forward * 0.3 + right * 0.2 + up * 0.2;
        self.vel = dir * speed;
        water.splash(self.pos, time);
        events.push(SimEvent::RippleCreated { pos: self.pos });
        events.push(SimEvent::RodCast { charge });
        log::debug!("Rod cast: charge={charge:.2} angle_down={angle_deg:.1} speed={speed:.1}");

        self.charging = false;
        self.charge = 0.0;
    }

    /// Advance the lure
    pub fn update(&mut self, water: &Water, dt: f32, time: f32, events: &mut EventQueue) {
        if !self.active {
            return;
        }

        self.timer += dt;
        self.vel.y -= STYLIZED_GRAVITY * dt;
        self.vel *= (-PROJECTILE_DRAG * dt).exp();
        self.pos += self.vel * dt;

        let rest_y = water.surface_height(self.pos, time) + FLOAT_HEIGHT;
        if self.pos.y < rest_y {
            self.pos.y = rest_y;
            self.vel.y = 0.0;
            if self.flying {
                events.push(SimEvent::RodLanded { pos: self.pos });
            }
            self.flying = false;
        }

        if self.timer > LURE_LIFETIME {
            self.active = false;
            self.flying = false;
        }
    }

    /// Landed and usable as bait
    pub fn is_in_water(&self) -> bool {
        self.active && !self.flying
    }

    /// Drop any in-progress charge without casting
    pub fn cancel_charge(&mut self) {
        self.charging = false;
        self.charge = 0.0;
    }
}
