//! World state
//!
//! The `World` owns every pool and entity plus the seeded RNG. Nothing here
//! reads a clock: time only advances through `tick`.

use glam::Vec3;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::Serialize;

use super::boat::Boat;
use super::buoyancy::{CubePress, FloatingCube};
use super::camera::Viewer;
use super::chest::ChestSpawner;
use super::events::EventQueue;
use super::fish::FishSwarm;
use super::rod::Rod;
use super::stone::{StonePool, ThrowCharge};
use super::water::Water;
use crate::settings::Settings;

/// Number of floating cubes in the scene
pub const NUM_CUBES: usize = 2;

/// Initial cube positions
const CUBE_STARTS: [Vec3; NUM_CUBES] = [Vec3::new(0.0, 0.5, 0.0), Vec3::new(2.5, 0.5, -1.5)];

/// Complete simulation state
#[derive(Debug, Clone)]
pub struct World {
    pub settings: Settings,
    /// Absolute simulation time in seconds
    pub time: f32,
    /// Frames advanced so far
    pub frame: u64,
    pub water: Water,
    pub stones: StonePool,
    pub throw: ThrowCharge,
    pub cubes: [FloatingCube; NUM_CUBES],
    pub cube_press: CubePress,
    pub boat: Boat,
    pub rod: Rod,
    pub fish: FishSwarm,
    pub chest: ChestSpawner,
    pub viewer: Viewer,
    /// Events produced since the last drain
    pub events: EventQueue,
    pub(crate) rng: Pcg32,
}

impl World {
    pub fn new(settings: &Settings) -> Self {
        let mut rng = Pcg32::seed_from_u64(settings.seed);
        let fish = FishSwarm::new(settings.fish_count, settings.water_height, &mut rng);
        log::info!(
            "World created: seed={:#x} fish={} water={:.2}",
            settings.seed,
            settings.fish_count,
            settings.water_height
        );

        Self {
            settings: settings.clone(),
            time: 0.0,
            frame: 0,
            water: Water::new(settings.water_height),
            stones: StonePool::new(settings.stones),
            throw: ThrowCharge::default(),
            cubes: CUBE_STARTS.map(FloatingCube::new),
            cube_press: CubePress::default(),
            boat: Boat {
                tuning: settings.boat,
                ..Default::default()
            },
            rod: Rod::default(),
            fish,
            chest: ChestSpawner::new(settings.chest, settings.ground_height, 0.0),
            viewer: Viewer::default(),
            events: EventQueue::new(),
            rng,
        }
    }

    /// Start over with the same settings and seed
    pub fn reset(&mut self) {
        let settings = self.settings.clone();
        *self = Self::new(&settings);
    }

    /// Whether the player is below the surface
    pub fn is_underwater(&self) -> bool {
        self.viewer.is_underwater(self.water.base_height)
    }

    pub fn snapshot(&self) -> WorldSnapshot {
        WorldSnapshot {
            time: self.time,
            frame: self.frame,
            mode: if self.viewer.boat_mode { "boat" } else { "free" },
            viewer: self.viewer.pos,
            underwater: self.is_underwater(),
            boat_pos: self.boat.pos,
            boat_yaw_deg: self.boat.yaw_deg,
            boat_speed: self.boat.speed,
            cubes: self.cubes.each_ref().map(|c| c.pos),
            stones: self.stones.iter_active().map(|s| s.pos).collect(),
            ripples: self.water.ripples.active_count(),
            lure: self.rod.active.then_some(self.rod.pos),
            fish_active: self.fish.active_count(),
            fish_hooked: self.fish.hooked(),
            fish_caught: self.fish.caught_total,
            chest: self.chest.chest.active.then_some(self.chest.chest.pos),
            prizes: self.chest.prizes,
        }
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new(&Settings::default())
    }
}

/// Summary of the world for HUDs and headless runs
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WorldSnapshot {
    pub time: f32,
    pub frame: u64,
    pub mode: &'static str,
    pub viewer: Vec3,
    pub underwater: bool,
    pub boat_pos: Vec3,
    pub boat_yaw_deg: f32,
    pub boat_speed: f32,
    pub cubes: [Vec3; NUM_CUBES],
    pub stones: Vec<Vec3>,
    pub ripples: usize,
    pub lure: Option<Vec3>,
    pub fish_active: usize,
    pub fish_hooked: Option<usize>,
    pub fish_caught: u32,
    pub chest: Option<Vec3>,
    pub prizes: u32,
}
