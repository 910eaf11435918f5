//! Player viewpoint
//!
//! Free-fly camera, or seated in the boat:
//! - Free mode: yaw/pitch look, move along the view basis, slower underwater
//! - Boat mode: camera rides the driver seat and eases toward the hull heading
//! - Steering in boat mode re-aligns the hull to where the player is looking

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::boat::{BOAT_HEADING_OFFSET_DEG, Boat, BoatControls};
use crate::wrap_degrees;

const PITCH_LIMIT_DEG: f32 = 89.0;
const FLY_SPEED: f32 = 4.0;
const SWIM_SPEED: f32 = 2.2;
/// Depth below the water line at which the view counts as submerged
const UNDERWATER_MARGIN: f32 = 0.05;
/// Lowest allowed camera height
const FLOOR_Y: f32 = -10.0;

const SEAT_HEIGHT: f32 = 1.8;
const SEAT_BACK: f32 = 0.01;
/// Seat yaw follow rate (per second)
const FOLLOW_RATE: f32 = 6.0;

/// Free-fly movement axes for one tick, each in [-1, 1]
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MoveAxes {
    pub forward: f32,
    pub right: f32,
    pub up: f32,
}

/// Camera position and orientation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Viewer {
    pub pos: Vec3,
    /// View yaw in degrees; 0 looks along +X
    pub yaw_deg: f32,
    pub pitch_deg: f32,
    pub boat_mode: bool,
    /// Seat yaw, eased toward the hull heading
    pub seat_yaw_deg: f32,
    /// Look-around offset from the seat yaw
    pub look_offset_deg: f32,
}

impl Default for Viewer {
    fn default() -> Self {
        Self {
            pos: Vec3::new(0.0, 2.0, 6.0),
            yaw_deg: -90.0,
            pitch_deg: -15.0,
            boat_mode: false,
            seat_yaw_deg: 0.0,
            look_offset_deg: 0.0,
        }
    }
}

/// Unit view direction for yaw/pitch in degrees
pub fn view_direction(yaw_deg: f32, pitch_deg: f32) -> Vec3 {
    let (yaw, pitch) = (yaw_deg.to_radians(), pitch_deg.to_radians());
    Vec3::new(yaw.cos() * pitch.cos(), pitch.sin(), yaw.sin() * pitch.cos()).normalize()
}

impl Viewer {
    pub fn forward(&self) -> Vec3 {
        view_direction(self.yaw_deg, self.pitch_deg)
    }

    /// (forward, right, up)
    pub fn basis(&self) -> (Vec3, Vec3, Vec3) {
        let forward = self.forward();
        let right = forward.cross(Vec3::Y).normalize();
        let up = right.cross(forward).normalize();
        (forward, right, up)
    }

    pub fn is_underwater(&self, water_height: f32) -> bool {
        self.pos.y < water_height - UNDERWATER_MARGIN
    }

    /// Apply look deltas. In the boat, yaw goes to the look-around offset.
    pub fn look(&mut self, yaw_delta: f32, pitch_delta: f32) {
        if self.boat_mode {
            self.look_offset_deg += yaw_delta;
        } else {
            self.yaw_deg += yaw_delta;
        }
        self.pitch_deg = (self.pitch_deg + pitch_delta).clamp(-PITCH_LIMIT_DEG, PITCH_LIMIT_DEG);
    }

    /// Free-fly along the view basis. Ignored while seated.
    pub fn fly(&mut self, axes: MoveAxes, water_height: f32, dt: f32) {
        if self.boat_mode {
            return;
        }
        let speed = if self.pos.y < water_height {
            SWIM_SPEED
        } else {
            FLY_SPEED
        };
        let (forward, right, _) = self.basis();
        self.pos += (forward * axes.forward + right * axes.right + Vec3::Y * axes.up) * (speed * dt);
        self.pos.y = self.pos.y.max(FLOOR_Y);
    }

    /// Enter or leave the boat. Entering points the hull where the camera looks.
    pub fn toggle_boat_mode(&mut self, boat: &mut Boat) {
        self.boat_mode = !self.boat_mode;
        if self.boat_mode {
            boat.yaw_deg = self.yaw_deg;
            boat.speed = 0.0;
            self.look_offset_deg = 0.0;
            self.seat_yaw_deg = boat.yaw_deg + BOAT_HEADING_OFFSET_DEG;
        }
        log::info!("Mode: {}", if self.boat_mode { "Boat" } else { "Free" });
    }

    /// While steering, swing the hull to the current view heading
    pub fn align_boat(&mut self, boat: &mut Boat, controls: BoatControls) {
        if !self.boat_mode || !controls.any() {
            return;
        }
        boat.yaw_deg = self.seat_yaw_deg + self.look_offset_deg - BOAT_HEADING_OFFSET_DEG;
        self.seat_yaw_deg = boat.yaw_deg + BOAT_HEADING_OFFSET_DEG;
        self.look_offset_deg = 0.0;
        self.yaw_deg = self.seat_yaw_deg;
    }

    /// Ride the driver seat after the boat has moved
    pub fn follow_boat(&mut self, boat: &Boat, dt: f32) {
        if !self.boat_mode {
            return;
        }
        let target = boat.yaw_deg + BOAT_HEADING_OFFSET_DEG;
        let diff = wrap_degrees(target - self.seat_yaw_deg);
        self.seat_yaw_deg += diff * (FOLLOW_RATE * dt).clamp(0.0, 1.0);

        self.pos = boat.pos - boat.forward() * SEAT_BACK + Vec3::new(0.0, SEAT_HEIGHT, 0.0);
        self.yaw_deg = self.seat_yaw_deg + self.look_offset_deg;
    }
}
