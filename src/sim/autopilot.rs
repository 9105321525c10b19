//! Demo mode: derive inputs from the game state so a run plays itself

use super::pong::{PongPhase, PongState};
use super::state::{Game, GameStatus, World};
use super::tick::TickInput;

/// How close an enemy has to be before the battle autopilot jumps
const JUMP_TRIGGER_DISTANCE: f32 = 1.6;
/// Paddles ignore errors smaller than this
const DEAD_ZONE: f32 = 0.1;
/// Drift-speed error the lander tolerates before firing
const THRUST_DEAD_ZONE: f32 = 0.01;

/// Input a simple bot would press this tick
pub fn drive(game: &Game) -> TickInput {
    match game {
        Game::Battle(world) => drive_battle(world),
        Game::Lander(world) => drive_lander(world),
        Game::Pong(table) => drive_pong(table),
    }
}

fn drive_battle(world: &World) -> TickInput {
    match world.status {
        GameStatus::Sleeping => TickInput {
            begin: true,
            ..Default::default()
        },
        GameStatus::Running => {
            let player = &world.player;
            let enemy_ahead = world.enemies.iter().any(|enemy| {
                let dx = enemy.position.x - player.position.x;
                enemy.is_active && dx > 0.0 && dx < JUMP_TRIGGER_DISTANCE
            });

            TickInput {
                right: true,
                action: enemy_ahead && player.contacts.bottom,
                ..Default::default()
            }
        }
        GameStatus::Won | GameStatus::Lost => TickInput::default(),
    }
}

fn drive_lander(world: &World) -> TickInput {
    if world.status != GameStatus::Running {
        return TickInput::default();
    }

    let player = &world.player;
    let Some(pad) = world
        .platforms
        .iter()
        .filter(|p| p.is_active)
        .min_by(|a, b| {
            let da = (a.position.x - player.position.x).abs();
            let db = (b.position.x - player.position.x).abs();
            da.partial_cmp(&db).unwrap_or(std::cmp::Ordering::Equal)
        })
    else {
        return TickInput::default();
    };

    // Aim for a drift speed proportional to the remaining distance
    let wanted = (pad.position.x - player.position.x) * 0.5;
    let correction = wanted - player.velocity.x;

    TickInput {
        left: correction < -THRUST_DEAD_ZONE,
        right: correction > THRUST_DEAD_ZONE,
        ..Default::default()
    }
}

fn drive_pong(table: &PongState) -> TickInput {
    let ball_y = table.ball.position.y;
    let left_error = ball_y - table.left.position.y;
    let right_error = ball_y - table.right.position.y;

    TickInput {
        w: left_error > DEAD_ZONE,
        s: left_error < -DEAD_ZONE,
        up: right_error > DEAD_ZONE,
        down: right_error < -DEAD_ZONE,
        action: table.phase == PongPhase::Serve,
        ..Default::default()
    }
}
