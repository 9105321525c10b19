//! Pong: two paddles and a ball
//!
//! W/S drive the left paddle, Up/Down the right one. A serve launches the
//! ball on a random diagonal; letting it past a paddle scores for the other
//! side and resets the table.

use glam::Vec3;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::check_collision;
use super::entity::{Entity, EntityKind};
use super::state::GameStatus;
use super::tick::TickInput;
use crate::consts::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Side {
    Left,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PongPhase {
    /// Ball parked at the centre, waiting for a serve
    Serve,
    Rally,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PongState {
    pub ball: Entity,
    pub left: Entity,
    pub right: Entity,
    pub phase: PongPhase,
    pub status: GameStatus,
    pub score_left: u32,
    pub score_right: u32,
    pub last_point: Option<Side>,
    /// Run seed for reproducible serves
    pub seed: u64,
    serves: u64,
    pub time_ticks: u64,
}

impl PongState {
    pub fn new(seed: u64) -> Self {
        let ball = Entity::new(EntityKind::Ball, Vec3::ZERO)
            .with_size(PONG_BALL_SIZE, PONG_BALL_SIZE)
            .with_speed(PONG_BALL_SPEED)
            .with_sprite("ball.png");
        let paddle = |x: f32| {
            Entity::wall(Vec3::new(x, 0.0, 0.0))
                .with_size(PONG_PADDLE_WIDTH, PONG_PADDLE_HEIGHT)
                .with_speed(PONG_PADDLE_SPEED)
                .with_sprite("wall.jpg")
        };

        Self {
            ball,
            left: paddle(-HALF_WIDTH),
            right: paddle(HALF_WIDTH),
            phase: PongPhase::Serve,
            status: GameStatus::Running,
            score_left: 0,
            score_right: 0,
            last_point: None,
            seed,
            serves: 0,
            time_ticks: 0,
        }
    }

    /// Launch the ball along one of the four diagonals
    pub fn serve(&mut self) {
        let mut rng = Pcg32::seed_from_u64(self.seed.wrapping_add(self.serves));
        self.serves += 1;

        let (x, y) = match rng.random_range(0..4) {
            0 => (1.0, 1.0),
            1 => (1.0, -1.0),
            2 => (-1.0, 1.0),
            _ => (-1.0, -1.0),
        };
        self.ball.movement = Vec3::new(x, y, 0.0).normalize();
        self.phase = PongPhase::Rally;
        log::debug!("Serve #{} toward ({}, {})", self.serves, x, y);
    }

    /// Award a point and put everything back on its starting spot
    pub fn score(&mut self, side: Side) {
        match side {
            Side::Left => self.score_left += 1,
            Side::Right => self.score_right += 1,
        }
        self.last_point = Some(side);
        log::info!("Point {:?}: {} - {}", side, self.score_left, self.score_right);

        self.ball.position = Vec3::ZERO;
        self.ball.movement = Vec3::ZERO;
        self.left.position = Vec3::new(-HALF_WIDTH, 0.0, 0.0);
        self.right.position = Vec3::new(HALF_WIDTH, 0.0, 0.0);
        self.phase = PongPhase::Serve;
    }

    pub fn entities(&self) -> [&Entity; 3] {
        [&self.left, &self.right, &self.ball]
    }
}

fn drive_paddle(paddle: &mut Entity, up: bool, down: bool, dt: f32) {
    paddle.movement = if up {
        Vec3::Y
    } else if down {
        Vec3::NEG_Y
    } else {
        Vec3::ZERO
    };

    paddle.position += paddle.movement * paddle.speed * dt;
    let limit = HALF_HEIGHT - paddle.height / 2.0;
    paddle.position.y = paddle.position.y.clamp(-limit, limit);
}

/// Advance the table by one fixed step
pub fn tick(pong: &mut PongState, input: &TickInput, dt: f32) {
    pong.time_ticks += 1;

    drive_paddle(&mut pong.left, input.w, input.s, dt);
    drive_paddle(&mut pong.right, input.up, input.down, dt);

    if pong.phase == PongPhase::Serve && input.action {
        pong.serve();
    }

    if pong.phase == PongPhase::Rally {
        let ball = &mut pong.ball;

        if check_collision(ball, &pong.left) {
            ball.movement.x = 1.0;
        }
        if check_collision(ball, &pong.right) {
            ball.movement.x = -1.0;
        }

        let half = ball.width / 2.0;
        if ball.position.x + half >= HALF_WIDTH {
            pong.score(Side::Left);
        } else if ball.position.x - half <= -HALF_WIDTH {
            pong.score(Side::Right);
        } else {
            let half = ball.height / 2.0;
            if ball.position.y + half >= HALF_HEIGHT {
                ball.movement.y = -1.0;
            }
            if ball.position.y - half <= -HALF_HEIGHT {
                ball.movement.y = 1.0;
            }
            ball.position += ball.movement * ball.speed * dt;
        }
    }

    for entity in [&mut pong.ball, &mut pong.left, &mut pong.right] {
        entity.refresh_transform();
    }
}
