//! Composed water surface
//!
//! Total height at a point is the base water level plus the Gerstner field
//! plus the ripple field. Every agent samples the surface through here so
//! they stay consistent within a frame.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::ripple::RippleField;
use super::waves;
use crate::flat;

/// Base level plus the shared ripple ring
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Water {
    /// Rest height of the water plane
    pub base_height: f32,
    pub ripples: RippleField,
}

impl Water {
    pub fn new(base_height: f32) -> Self {
        Self {
            base_height,
            ripples: RippleField::new(),
        }
    }

    /// Base level plus Gerstner height, without ripples
    #[inline]
    pub fn wave_height(&self, pos: Vec3, time: f32) -> f32 {
        self.base_height + waves::height(flat(pos), time)
    }

    /// Full surface height including ripples
    #[inline]
    pub fn surface_height(&self, pos: Vec3, time: f32) -> f32 {
        let sample = flat(pos);
        self.base_height + waves::height(sample, time) + self.ripples.height(sample, time)
    }

    /// Ripple slope at `pos` (Y is zero)
    #[inline]
    pub fn ripple_gradient(&self, pos: Vec3, time: f32) -> Vec3 {
        self.ripples.gradient(flat(pos), time)
    }

    /// Emit a ripple at the XZ of `pos`, resting on the base level
    pub fn splash(&mut self, pos: Vec3, time: f32) -> usize {
        self.ripples
            .add(Vec3::new(pos.x, self.base_height, pos.z), time)
    }

    /// Emit a ripple keeping the full position (impact points off the plane)
    pub fn splash_at(&mut self, pos: Vec3, time: f32) -> usize {
        self.ripples.add(pos, time)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_surface_without_ripples_matches_waves() {
        let water = Water::new(0.5);
        let p = Vec3::new(2.0, 9.0, -1.0);
        let expected = 0.5 + waves::height(Vec3::new(2.0, 0.0, -1.0), 1.25);
        assert!((water.surface_height(p, 1.25) - expected).abs() < 1e-6);
        assert_eq!(water.surface_height(p, 1.25), water.wave_height(p, 1.25));
    }

    #[test]
    fn test_splash_rests_on_base_level() {
        let mut water = Water::new(-0.25);
        let slot = water.splash(Vec3::new(1.0, 3.0, 2.0), 0.0);
        let event = water.ripples.slots()[slot];
        assert_eq!(event.pos, Vec3::new(1.0, -0.25, 2.0));
        assert!(water.surface_height(Vec3::new(1.3, 0.0, 2.0), 0.2) != water.wave_height(Vec3::new(1.3, 0.0, 2.0), 0.2));
    }
}
