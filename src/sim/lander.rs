//! Lander: drift down under weak gravity and touch down on a landing pad
//!
//! Horizontal keys fire thrusters instead of walking. Landing on any
//! platform wins; brushing any wall is a crash.

use glam::Vec3;

use super::animation::{Animation, AnimationSet, Facing};
use super::collision::touching_any;
use super::entity::{Entity, Steering};
use super::state::{GameStatus, World};
use super::tick::TickInput;
use crate::consts::*;

const PAD_XS: [f32; 5] = [-1.0, 0.0, 1.0, -3.0, 3.0];

/// Floor hazards, the two side columns, then the ceiling
const WALL_POSITIONS: [(f32, f32); 26] = [
    (-2.0, -3.25),
    (-4.0, -3.25),
    (2.0, -3.25),
    (4.0, -3.25),
    (-5.0, -3.25),
    (-5.0, -2.25),
    (-5.0, -1.25),
    (-5.0, -0.25),
    (-5.0, 0.25),
    (-5.0, 1.25),
    (-5.0, 2.25),
    (-5.0, 3.25),
    (5.0, -3.25),
    (5.0, -2.25),
    (5.0, -1.25),
    (5.0, -0.25),
    (5.0, 0.25),
    (5.0, 1.25),
    (5.0, 2.25),
    (5.0, 3.25),
    (4.0, 3.25),
    (3.0, 3.25),
    (2.0, 3.25),
    (-2.0, 3.25),
    (-3.0, 3.25),
    (-4.0, 3.25),
];

/// Build the lander level; it starts running immediately
pub fn new_world() -> World {
    let mut player = Entity::player(Vec3::new(0.0, 3.5, 0.0))
        .with_size(BATTLE_PLAYER_SIZE, BATTLE_PLAYER_SIZE)
        .with_speed(BATTLE_PLAYER_SPEED)
        .with_sprite("george.png");
    player.acceleration = Vec3::new(0.0, LANDER_GRAVITY, 0.0);
    player.steering = Steering::Thrust;
    player.animation = Some(Animation::new(AnimationSet::PLAYER_SHEET, Facing::Down, 4, 4));

    let mut world = World::new(player, GameStatus::Running);

    world.platforms = PAD_XS
        .iter()
        .map(|&x| Entity::platform(Vec3::new(x, -3.25, 0.0)).with_sprite("platform.png"))
        .collect();
    world.walls = WALL_POSITIONS
        .iter()
        .map(|&(x, y)| Entity::wall(Vec3::new(x, y, 0.0)).with_sprite("wall.png"))
        .collect();

    world.settle_static();
    log::info!(
        "Lander level: {} pads, {} walls",
        world.platforms.len(),
        world.walls.len()
    );
    world
}

/// Held left/right fire the side thrusters
pub fn steer(player: &mut Entity, input: &TickInput) {
    player.movement = Vec3::ZERO;
    player.acceleration.x = 0.0;

    let facing = if input.left {
        player.acceleration.x = -LANDER_THRUST;
        Facing::Left
    } else if input.right {
        player.acceleration.x = LANDER_THRUST;
        Facing::Right
    } else {
        return;
    };

    if let Some(animation) = &mut player.animation {
        animation.face(facing);
    }
}

/// Advance the lander by one fixed step
pub fn tick(world: &mut World, input: &TickInput, dt: f32) {
    if world.status != GameStatus::Running {
        return;
    }

    steer(&mut world.player, input);
    world.step_entities(dt);

    let player = &mut world.player;
    if touching_any(player, &world.walls) {
        player.is_dead = true;
    } else if player.contacts.any() {
        player.has_won = true;
    }

    if player.position.y < -(HALF_HEIGHT + KILL_PLANE_MARGIN) {
        player.is_dead = true;
    }

    if world.player.is_dead {
        world.set_status(GameStatus::Lost);
    } else if world.player.has_won {
        world.set_status(GameStatus::Won);
    }
}
