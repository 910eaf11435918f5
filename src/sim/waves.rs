//! Gerstner wave field
//!
//! A static sum of four directional waves. Every query is a pure function of
//! (x, z, t), so the renderer can reproduce the same surface in its vertex
//! stage.

use glam::Vec3;
use serde::{Deserialize, Serialize};
use std::f32::consts::TAU;

/// One directional Gerstner component
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WaveComponent {
    /// Travel direction in XZ (normalized at evaluation)
    pub dir: (f32, f32),
    pub amplitude: f32,
    pub wavelength: f32,
    /// Horizontal pinch factor Q
    pub steepness: f32,
    /// Phase speed c
    pub speed: f32,
}

/// Number of summed wave components
pub const NUM_WAVES: usize = 4;

/// The fixed wave set
pub const WAVES: [WaveComponent; NUM_WAVES] = [
    WaveComponent {
        dir: (1.0, 0.3),
        amplitude: 0.12,
        wavelength: 6.0,
        steepness: 0.8,
        speed: 1.2,
    },
    WaveComponent {
        dir: (-0.8, 0.6),
        amplitude: 0.08,
        wavelength: 4.0,
        steepness: 0.7,
        speed: 1.4,
    },
    WaveComponent {
        dir: (0.3, -1.0),
        amplitude: 0.06,
        wavelength: 3.0,
        steepness: 0.6,
        speed: 1.6,
    },
    WaveComponent {
        dir: (-0.5, -0.9),
        amplitude: 0.04,
        wavelength: 2.5,
        steepness: 0.5,
        speed: 1.8,
    },
];

/// Evaluate the displaced surface point for the rest position `xz` at `time`.
///
/// Y of `xz` is ignored. The result carries the horizontal Gerstner
/// displacement in x/z on top of the input coordinates and the wave height
/// in y.
pub fn displaced(xz: Vec3, time: f32) -> Vec3 {
    let mut pos = Vec3::new(xz.x, 0.0, xz.z);
    for wave in &WAVES {
        let k = TAU / wave.wavelength;
        let d = Vec3::new(wave.dir.0, 0.0, wave.dir.1).normalize();
        let a = wave.amplitude;
        let q = wave.steepness;

        let phase = k * (d.x * xz.x + d.z * xz.z) + wave.speed * time;
        let (sin_p, cos_p) = phase.sin_cos();

        pos.x += q * a * d.x * cos_p;
        pos.z += q * a * d.z * cos_p;
        pos.y += a * sin_p;
    }
    pos
}

/// Wave height only
#[inline]
pub fn height(xz: Vec3, time: f32) -> f32 {
    displaced(xz, time).y
}

/// Upper bound on |height| (sum of amplitudes)
pub fn max_amplitude() -> f32 {
    WAVES.iter().map(|w| w.amplitude).sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_height_bounded_by_amplitude_sum() {
        let bound = max_amplitude() + 1e-5;
        for i in 0..200 {
            let x = i as f32 * 0.37 - 30.0;
            let z = i as f32 * -0.21 + 12.0;
            let h = height(Vec3::new(x, 0.0, z), i as f32 * 0.1);
            assert!(h.abs() <= bound, "height {h} exceeds {bound}");
        }
    }

    #[test]
    fn test_input_y_is_ignored() {
        let a = displaced(Vec3::new(1.5, 0.0, -2.0), 3.0);
        let b = displaced(Vec3::new(1.5, 42.0, -2.0), 3.0);
        assert_eq!(a, b);
    }

    #[test]
    fn test_origin_at_time_zero() {
        // Every phase is zero: no height, full horizontal displacement
        let p = displaced(Vec3::ZERO, 0.0);
        assert!(p.y.abs() < 1e-6);
        let expected_x: f32 = WAVES
            .iter()
            .map(|w| {
                let d = Vec3::new(w.dir.0, 0.0, w.dir.1).normalize();
                w.steepness * w.amplitude * d.x
            })
            .sum();
        assert!((p.x - expected_x).abs() < 1e-6);
    }

    proptest! {
        #[test]
        fn prop_displaced_is_pure(x in -100.0f32..100.0, z in -100.0f32..100.0, t in 0.0f32..1000.0) {
            let a = displaced(Vec3::new(x, 0.0, z), t);
            let b = displaced(Vec3::new(x, 0.0, z), t);
            prop_assert_eq!(a.x.to_bits(), b.x.to_bits());
            prop_assert_eq!(a.y.to_bits(), b.y.to_bits());
            prop_assert_eq!(a.z.to_bits(), b.z.to_bits());
        }
    }
}
