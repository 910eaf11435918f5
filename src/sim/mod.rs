//! Deterministic simulation module
//!
//! All water, projectile and creature logic lives here. This module must be
//! pure and deterministic:
//! - Time and dt are injected, never read from a clock
//! - Seeded RNG only
//! - Fixed-capacity pools with stable slot order
//! - No rendering or platform dependencies

pub mod boat;
pub mod buoyancy;
pub mod camera;
pub mod chest;
pub mod collision;
pub mod events;
pub mod fish;
pub mod ripple;
pub mod rod;
pub mod state;
pub mod stone;
pub mod tick;
pub mod water;
pub mod waves;

pub use boat::{Boat, BoatControls, BoatTuning, BOAT_HEADING_OFFSET_DEG, BOAT_MODEL_YAW_OFFSET_DEG};
pub use buoyancy::{CubePress, FloatingCube};
pub use camera::{MoveAxes, Viewer};
pub use chest::{Chest, ChestSpawner, ChestTiming};
pub use collision::CollisionResult;
pub use events::{EventKind, EventQueue, SimEvent};
pub use fish::{Fish, FishState, FishSwarm, Surroundings};
pub use ripple::{RippleEvent, RippleField};
pub use rod::Rod;
pub use state::{NUM_CUBES, World, WorldSnapshot};
pub use stone::{HullProbe, SkipRules, Stone, StonePool, ThrowCharge};
pub use tick::{TickInput, tick};
pub use water::Water;
