//! Tidewater - simulation core for an ocean sandbox
//!
//! Core modules:
//! - `sim`: Water field, floating bodies, stones, boat, rod and fish
//! - `renderer`: Plain-data upload structs for the external renderer
//! - `audio`: Event-to-sound cue mapping for the external mixer
//! - `settings`: JSON-backed world configuration

pub mod audio;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use settings::Settings;

use glam::Vec3;

/// Simulation constants that are part of the numerical contract
pub mod consts {
    /// Default frame step used by the headless driver
    pub const SIM_DT: f32 = 1.0 / 60.0;

    /// Reduced gravity shared by stones and the rod lure (m/s²)
    pub const STYLIZED_GRAVITY: f32 = 9.81 * 0.25;
    /// Velocity drag rate for projectiles (applied as exp(-rate * dt))
    pub const PROJECTILE_DRAG: f32 = 1.5;

    /// Ripple ring capacity
    pub const MAX_RIPPLES: usize = 32;
    /// Ripple lifetime in seconds
    pub const RIPPLE_LIFETIME: f32 = 8.0;

    /// Stone pool size
    pub const MAX_STONES: usize = 8;
    /// Stones despawn after this many seconds
    pub const STONE_LIFETIME: f32 = 10.0;

    /// Floating cube freeboard above the sampled surface
    pub const CUBE_FREEBOARD: f32 = 0.3;
    /// Buoyancy spring stiffness
    pub const BUOYANCY_STIFFNESS: f32 = 4.0;
    /// Buoyancy velocity damping rate
    pub const BUOYANCY_DAMPING: f32 = 1.5;

    /// Boat hull footprint radius (XZ)
    pub const BOAT_RADIUS: f32 = 1.5;

    /// Square half-extent fish are confined to
    pub const FISH_BOUNDS: f32 = 14.0;
}

/// Wrap an angle in degrees into (-180, 180]
#[inline]
pub fn wrap_degrees(deg: f32) -> f32 {
    let wrapped = 180.0 - (180.0 - deg).rem_euclid(360.0);
    // rem_euclid may round up to exactly 360
    if wrapped <= -180.0 { wrapped + 360.0 } else { wrapped }
}

/// Project onto the XZ plane
#[inline]
pub fn flat(v: Vec3) -> Vec3 {
    Vec3::new(v.x, 0.0, v.z)
}

/// Normalize, substituting `fallback` when the length is below `min_len`
#[inline]
pub fn normalize_or(v: Vec3, min_len: f32, fallback: Vec3) -> Vec3 {
    let len = v.length();
    if len < min_len { fallback } else { v / len }
}

/// Planar distance ignoring Y
#[inline]
pub fn xz_distance(a: Vec3, b: Vec3) -> f32 {
    let dx = a.x - b.x;
    let dz = a.z - b.z;
    (dx * dx + dz * dz).sqrt()
}
