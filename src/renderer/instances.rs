//! Per-entity model transforms

use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Quat, Vec3};

use crate::sim::{BOAT_MODEL_YAW_OFFSET_DEG, Fish, World};

/// Fish mesh nose points the opposite way from its swim yaw
const FISH_MODEL_YAW_OFFSET_DEG: f32 = 180.0;

const BOAT_SCALE: f32 = 0.016;
const FISH_SCALE: f32 = 0.03;
const STONE_SCALE: Vec3 = Vec3::new(0.25, 0.05, 0.25);
const LURE_SCALE: f32 = 0.12;
const CHEST_SCALE: f32 = 0.25;
/// Chest spin rate (radians per second)
const CHEST_SPIN: f32 = 0.5;
/// Light pillar marking the chest from a distance
const BEACON_OFFSET: Vec3 = Vec3::new(0.0, 3.0, 0.0);
const BEACON_SCALE: Vec3 = Vec3::new(0.55, 6.0, 0.55);

/// Instance data (must match shader)
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct InstanceRaw {
    pub model: [[f32; 4]; 4],
}

impl InstanceRaw {
    pub fn new(model: Mat4) -> Self {
        Self {
            model: model.to_cols_array_2d(),
        }
    }

    pub fn matrix(&self) -> Mat4 {
        Mat4::from_cols_array_2d(&self.model)
    }
}

/// Mesh authored lying down: stand it up and face it along `yaw_deg`
fn upright_model(pos: Vec3, yaw_deg: f32, roll: f32, scale: f32) -> Mat4 {
    Mat4::from_translation(pos)
        * Mat4::from_rotation_y(yaw_deg.to_radians())
        * Mat4::from_rotation_x(-std::f32::consts::FRAC_PI_2)
        * Mat4::from_rotation_z(roll)
        * Mat4::from_scale(Vec3::splat(scale))
}

pub fn cube_model(pos: Vec3) -> Mat4 {
    Mat4::from_translation(pos)
}

pub fn boat_model(pos: Vec3, yaw_deg: f32) -> Mat4 {
    upright_model(pos, yaw_deg + BOAT_MODEL_YAW_OFFSET_DEG, 0.0, BOAT_SCALE)
}

/// Fish transform; `banked` adds the turn roll used by the main pass
pub fn fish_model(fish: &Fish, banked: bool) -> Mat4 {
    let roll = if banked { fish.bank_roll() } else { 0.0 };
    upright_model(fish.pos, fish.yaw_deg + FISH_MODEL_YAW_OFFSET_DEG, roll, FISH_SCALE)
}

pub fn stone_model(pos: Vec3) -> Mat4 {
    Mat4::from_scale_rotation_translation(STONE_SCALE, Quat::IDENTITY, pos)
}

pub fn lure_model(pos: Vec3) -> Mat4 {
    Mat4::from_scale_rotation_translation(Vec3::splat(LURE_SCALE), Quat::IDENTITY, pos)
}

pub fn chest_model(pos: Vec3, time: f32) -> Mat4 {
    Mat4::from_translation(pos)
        * Mat4::from_rotation_y(time * CHEST_SPIN)
        * Mat4::from_scale(Vec3::splat(CHEST_SCALE))
}

pub fn beacon_model(pos: Vec3) -> Mat4 {
    Mat4::from_scale_rotation_translation(BEACON_SCALE, Quat::IDENTITY, pos + BEACON_OFFSET)
}

/// Instance lists for one frame, one per mesh
#[derive(Debug, Clone, Default)]
pub struct SceneInstances {
    pub cubes: Vec<InstanceRaw>,
    pub boat: Vec<InstanceRaw>,
    pub fish: Vec<InstanceRaw>,
    pub stones: Vec<InstanceRaw>,
    pub lure: Vec<InstanceRaw>,
    pub chest: Vec<InstanceRaw>,
    pub beacon: Vec<InstanceRaw>,
}

impl SceneInstances {
    /// Gather transforms for every visible entity
    pub fn from_world(world: &World) -> Self {
        let mut scene = Self::default();

        scene
            .cubes
            .extend(world.cubes.iter().map(|c| InstanceRaw::new(cube_model(c.pos))));
        if world.boat.active {
            scene
                .boat
                .push(InstanceRaw::new(boat_model(world.boat.pos, world.boat.yaw_deg)));
        }
        scene.fish.extend(
            world
                .fish
                .fish
                .iter()
                .filter(|f| f.active)
                .map(|f| InstanceRaw::new(fish_model(f, true))),
        );
        scene
            .stones
            .extend(world.stones.iter_active().map(|s| InstanceRaw::new(stone_model(s.pos))));
        if world.rod.active {
            scene.lure.push(InstanceRaw::new(lure_model(world.rod.pos)));
        }
        let chest = &world.chest.chest;
        if chest.active {
            scene.chest.push(InstanceRaw::new(chest_model(chest.pos, world.time)));
            scene.beacon.push(InstanceRaw::new(beacon_model(chest.pos)));
        }
        scene
    }

    pub fn total(&self) -> usize {
        self.cubes.len()
            + self.boat.len()
            + self.fish.len()
            + self.stones.len()
            + self.lure.len()
            + self.chest.len()
            + self.beacon.len()
    }
}
