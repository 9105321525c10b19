//! Battle: side-view platformer against three enemies
//!
//! Stomp every enemy to win. Touching one any other way, or falling out of
//! the play area, loses.

use glam::Vec3;

use super::ai::AiBehavior;
use super::animation::Facing;
use super::entity::Entity;
use super::state::{GameStatus, World};
use super::tick::TickInput;
use crate::consts::*;

/// Floor tiles along the bottom, then a four-tile ledge
pub const FLOOR_TILES: usize = 11;
pub const LEDGE_TILES: usize = 4;

/// Build the battle level, waiting on the title screen
pub fn new_world() -> World {
    let mut player = Entity::player(Vec3::new(-4.0, -1.0, 0.0))
        .with_size(BATTLE_PLAYER_SIZE, BATTLE_PLAYER_SIZE)
        .with_speed(BATTLE_PLAYER_SPEED)
        .with_sprite("main.jpg");
    player.acceleration = Vec3::new(0.0, BATTLE_GRAVITY, 0.0);
    player.jump_power = BATTLE_JUMP_POWER;

    let mut world = World::new(player, GameStatus::Sleeping);

    for i in 0..FLOOR_TILES {
        let x = -HALF_WIDTH + i as f32;
        world
            .platforms
            .push(Entity::platform(Vec3::new(x, -3.25, 0.0)).with_sprite("stone.png"));
    }
    for i in 0..LEDGE_TILES {
        let x = -1.0 + i as f32;
        world
            .platforms
            .push(Entity::platform(Vec3::new(x, 0.25, 0.0)).with_sprite("stone.png"));
    }

    let roster = [
        (AiBehavior::Stabber, Vec3::new(4.0, -2.45, 0.0), "side1.jpg"),
        (AiBehavior::Shooter, Vec3::new(2.0, -2.45, 0.0), "side2.jpg"),
        (AiBehavior::puncher(), Vec3::new(0.0, 1.10, 0.0), "side3.jpg"),
    ];
    for (behavior, position, sprite) in roster {
        world.enemies.push(
            Entity::enemy(behavior, position)
                .with_speed(ENEMY_SPEED)
                .with_sprite(sprite),
        );
    }

    world.settle_static();
    log::info!(
        "Battle level: {} platforms, {} enemies",
        world.platforms.len(),
        world.enemies.len()
    );
    world
}

/// Turn held keys into movement intent and a jump request
pub fn steer(player: &mut Entity, input: &TickInput) {
    player.movement = Vec3::ZERO;

    if input.left {
        player.movement.x = -1.0;
        if let Some(animation) = &mut player.animation {
            animation.face(Facing::Left);
        }
    } else if input.right {
        player.movement.x = 1.0;
        if let Some(animation) = &mut player.animation {
            animation.face(Facing::Right);
        }
    }

    if input.action {
        player.request_jump();
    }
}

/// Advance the battle by one fixed step
pub fn tick(world: &mut World, input: &TickInput, dt: f32) {
    match world.status {
        GameStatus::Sleeping => {
            if input.begin {
                world.set_status(GameStatus::Running);
            }
            return;
        }
        GameStatus::Won | GameStatus::Lost => return,
        GameStatus::Running => {}
    }

    steer(&mut world.player, input);
    world.step_entities(dt);

    if world.player.position.y < -(HALF_HEIGHT + KILL_PLANE_MARGIN) {
        log::info!("Player fell out of the arena");
        world.player.is_dead = true;
    }

    // Death outranks a simultaneous clear
    if world.player.is_dead {
        world.set_status(GameStatus::Lost);
    } else if world.enemies_alive() == 0 {
        world.set_status(GameStatus::Won);
    }
}
