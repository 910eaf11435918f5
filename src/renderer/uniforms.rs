//! Water uniform block (must match shader)
//!
//! The shader re-evaluates the same Gerstner set and ripple sum the
//! simulation uses, so the block carries the wave table, the active ripples
//! and the clock.

use bytemuck::{Pod, Zeroable};

use crate::consts::MAX_RIPPLES;
use crate::sim::ripple::RippleField;
use crate::sim::waves::{NUM_WAVES, WAVES, WaveComponent};
use crate::sim::World;

#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct WaterGlobals {
    pub time: f32,         // offset 0
    pub base_height: f32,  // offset 4
    pub ripple_count: u32, // offset 8
    pub _pad: u32,         // pad to 16 bytes
}

#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct WaveData {
    pub dir: [f32; 2],
    pub amplitude: f32,
    pub wavelength: f32,
    pub steepness: f32,
    pub speed: f32,
    pub _pad: [f32; 2],
}

impl From<&WaveComponent> for WaveData {
    fn from(w: &WaveComponent) -> Self {
        Self {
            dir: [w.dir.0, w.dir.1],
            amplitude: w.amplitude,
            wavelength: w.wavelength,
            steepness: w.steepness,
            speed: w.speed,
            _pad: [0.0; 2],
        }
    }
}

#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct RippleData {
    pub pos: [f32; 3],
    pub start_time: f32,
}

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct WaterUniforms {
    pub globals: WaterGlobals,
    pub waves: [WaveData; NUM_WAVES],
    /// Active ripples packed to the front; `globals.ripple_count` are valid
    pub ripples: [RippleData; MAX_RIPPLES],
}

impl WaterUniforms {
    pub fn new(ripples: &RippleField, base_height: f32, time: f32) -> Self {
        let mut out = Self::zeroed();
        for (dst, src) in out.waves.iter_mut().zip(WAVES.iter()) {
            *dst = WaveData::from(src);
        }

        let mut count = 0;
        for (dst, src) in out.ripples.iter_mut().zip(ripples.active()) {
            *dst = RippleData {
                pos: src.pos.to_array(),
                start_time: src.start_time,
            };
            count += 1;
        }

        out.globals = WaterGlobals {
            time,
            base_height,
            ripple_count: count,
            _pad: 0,
        };
        out
    }

    pub fn from_world(world: &World) -> Self {
        Self::new(&world.water.ripples, world.water.base_height, world.time)
    }

    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::bytes_of(self)
    }
}
