//! Ripple event field
//!
//! Transient circular wave sources stored in a fixed ring. New events
//! overwrite the slot under the write cursor regardless of age.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::consts::{MAX_RIPPLES, RIPPLE_LIFETIME};

const RIPPLE_FREQ: f32 = 9.0;
const RIPPLE_SPEED: f32 = 2.0;
const RIPPLE_DECAY: f32 = 0.35;
const RIPPLE_AGE_DECAY: f32 = 0.18;
const RIPPLE_SCALE: f32 = 0.12;
/// Forward-difference step for the gradient
const GRADIENT_EPS: f32 = 0.1;

/// A single ripple source
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct RippleEvent {
    /// Origin (Y is carried for the renderer but ignored by the field)
    pub pos: Vec3,
    pub start_time: f32,
    pub active: bool,
}

impl RippleEvent {
    #[inline]
    pub fn age(&self, time: f32) -> f32 {
        time - self.start_time
    }
}

/// Height of one ripple at planar distance `r` and `age` seconds
#[inline]
pub fn single_ripple_height(r: f32, age: f32) -> f32 {
    if !(0.0..=RIPPLE_LIFETIME).contains(&age) {
        return 0.0;
    }
    let phase = RIPPLE_FREQ * (r - RIPPLE_SPEED * age);
    let envelope = (-RIPPLE_DECAY * r).exp() * (-RIPPLE_AGE_DECAY * age).exp();
    RIPPLE_SCALE * envelope * phase.sin()
}

/// Fixed-capacity ring of ripple events
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RippleField {
    events: [RippleEvent; MAX_RIPPLES],
    cursor: usize,
}

impl Default for RippleField {
    fn default() -> Self {
        Self::new()
    }
}

impl RippleField {
    pub fn new() -> Self {
        Self {
            events: [RippleEvent::default(); MAX_RIPPLES],
            cursor: 0,
        }
    }

    /// Write a new event at the cursor and advance it. Returns the slot used.
    pub fn add(&mut self, pos: Vec3, time: f32) -> usize {
        let slot = self.cursor;
        self.events[slot] = RippleEvent {
            pos,
            start_time: time,
            active: true,
        };
        self.cursor = (self.cursor + 1) % MAX_RIPPLES;
        slot
    }

    /// Deactivate events older than the ripple lifetime
    pub fn prune(&mut self, time: f32) {
        for event in self.events.iter_mut().filter(|e| e.active) {
            if event.age(time) > RIPPLE_LIFETIME {
                event.active = false;
            }
        }
    }

    /// Summed ripple height at `pos` (XZ only)
    pub fn height(&self, pos: Vec3, time: f32) -> f32 {
        self.active()
            .map(|e| {
                let age = e.age(time);
                if !(0.0..=RIPPLE_LIFETIME).contains(&age) {
                    return 0.0;
                }
                let dx = pos.x - e.pos.x;
                let dz = pos.z - e.pos.z;
                single_ripple_height((dx * dx + dz * dz).sqrt(), age)
            })
            .sum()
    }

    /// Forward-difference gradient of [`height`](Self::height); Y is zero
    pub fn gradient(&self, pos: Vec3, time: f32) -> Vec3 {
        let h0 = self.height(pos, time);
        let hx = self.height(pos + Vec3::X * GRADIENT_EPS, time);
        let hz = self.height(pos + Vec3::Z * GRADIENT_EPS, time);
        Vec3::new((hx - h0) / GRADIENT_EPS, 0.0, (hz - h0) / GRADIENT_EPS)
    }

    /// Events with the active flag set, in slot order
    pub fn active(&self) -> impl Iterator<Item = &RippleEvent> {
        self.events.iter().filter(|e| e.active)
    }

    pub fn active_count(&self) -> usize {
        self.active().count()
    }

    /// Raw slot view, including inactive slots
    pub fn slots(&self) -> &[RippleEvent; MAX_RIPPLES] {
        &self.events
    }

    /// Next slot to be written
    pub fn cursor(&self) -> usize {
        self.cursor
    }
}
