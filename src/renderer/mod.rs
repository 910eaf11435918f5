//! Render data
//!
//! GPU-ready views of the world: per-entity model matrices and the water
//! uniform block. Layouts are `#[repr(C)]` + bytemuck so a host can upload
//! them as raw bytes.

pub mod instances;
pub mod uniforms;

pub use instances::{InstanceRaw, SceneInstances};
pub use uniforms::{RippleData, WaterUniforms, WaveData};
