//! Frame step
//!
//! Advances the world by one frame in a fixed order:
//! player controls, stones, rod, chest, buoyancy, boat, fish, ripple prune.

use super::boat::BoatControls;
use super::camera::MoveAxes;
use super::events::SimEvent;
use super::fish::Surroundings;
use super::state::World;

/// Input for a single frame (deterministic)
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Free-fly movement
    pub movement: MoveAxes,
    /// Look deltas in degrees
    pub look_yaw: f32,
    pub look_pitch: f32,
    /// Steering keys, used in boat mode
    pub boat: BoatControls,
    /// Stone throw button held
    pub throw_held: bool,
    /// Rod cast button held
    pub rod_held: bool,
    /// Cube press button held
    pub cube_push_held: bool,
    /// Switch which cube the press acts on (edge)
    pub toggle_cube: bool,
    /// Enter/leave the boat (edge)
    pub toggle_boat: bool,
    /// Menu overlay is up: player input is ignored and charges are dropped
    pub menu_open: bool,
}

/// Advance the world by `dt` seconds. Non-positive steps are ignored.
pub fn tick(world: &mut World, input: &TickInput, dt: f32) {
    if dt <= 0.0 {
        return;
    }
    world.events.clear();
    world.time += dt;
    world.frame += 1;
    let time = world.time;
    let water_height = world.water.base_height;

    if input.menu_open {
        world.throw.cancel();
        world.rod.cancel_charge();
        world.cube_press.cancel();
    } else {
        player_controls(world, input, dt);
    }

    world.stones.update(
        dt,
        time,
        &mut world.water,
        &mut world.cubes,
        world.boat.hull_probe(),
        &mut world.events,
    );

    world.rod.update(&world.water, dt, time, &mut world.events);

    let center = if world.viewer.boat_mode {
        world.boat.pos
    } else {
        world.viewer.pos
    };
    world
        .chest
        .update(center, world.viewer.pos, time, &mut world.rng, &mut world.events);

    for cube in world.cubes.iter_mut() {
        cube.update(&world.water, dt, time);
    }

    let controls = if world.viewer.boat_mode && !input.menu_open {
        input.boat
    } else {
        BoatControls::default()
    };
    world.viewer.align_boat(&mut world.boat, controls);
    world.boat.update(controls, &world.water, dt, time);
    world.viewer.follow_boat(&world.boat, dt);
    world.boat.push_cubes(&mut world.cubes);

    let diver = world
        .viewer
        .is_underwater(water_height)
        .then_some(world.viewer.pos);
    let around = Surroundings {
        boat: &world.boat,
        cubes: &world.cubes,
        diver,
    };
    world.fish.update(
        dt,
        time,
        water_height,
        around,
        &mut world.rod,
        &mut world.rng,
        &mut world.events,
    );

    world.water.ripples.prune(time);
}

/// Camera, throws, cube press and rod charge
fn player_controls(world: &mut World, input: &TickInput, dt: f32) {
    if input.toggle_boat {
        world.viewer.toggle_boat_mode(&mut world.boat);
    }
    world.viewer.look(input.look_yaw, input.look_pitch);
    world.viewer.fly(input.movement, world.water.base_height, dt);

    if input.toggle_cube {
        world.cube_press.cycle(world.cubes.len());
    }

    let (forward, right, up) = world.viewer.basis();
    let eye = world.viewer.pos;

    if input.throw_held {
        world.throw.hold(dt);
    } else if let Some(charge) = world.throw.release() {
        world.stones.throw_charged(eye, forward, up, charge);
        world.events.push(SimEvent::StoneThrown { charge });
    }

    world
        .cube_press
        .update(&mut world.cubes, input.cube_push_held, dt);

    if input.rod_held {
        if !world.rod.charging {
            world.rod.start_charge();
        }
        world.rod.tick_charge(dt);
    } else if world.rod.charging {
        world.rod.release(
            eye,
            forward,
            right,
            up,
            &mut world.water,
            world.time,
            &mut world.events,
        );
    }
}
