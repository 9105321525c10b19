//! Game state and the simulation context passed into updates
//!
//! A `World` owns every entity of a platformer-style game. Entities live in
//! plain vectors addressed by index and are deactivated, never removed, so
//! indices stay valid for the whole run.

use serde::{Deserialize, Serialize};

use super::collision::ContactPolicy;
use super::entity::{Entity, Neighbors};
use super::pong::PongState;
use crate::settings::SceneKind;

/// Outcome layer read by rendering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    /// Title screen, waiting for the begin key
    Sleeping,
    Running,
    Won,
    Lost,
}

impl GameStatus {
    pub fn is_over(&self) -> bool {
        matches!(self, GameStatus::Won | GameStatus::Lost)
    }
}

/// Entities and status for the battle and lander games
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct World {
    pub player: Entity,
    pub platforms: Vec<Entity>,
    pub walls: Vec<Entity>,
    pub enemies: Vec<Entity>,
    pub status: GameStatus,
    pub policy: ContactPolicy,
    /// Simulation tick counter
    pub time_ticks: u64,
}

impl World {
    pub fn new(player: Entity, status: GameStatus) -> Self {
        Self {
            player,
            platforms: Vec::new(),
            walls: Vec::new(),
            enemies: Vec::new(),
            status,
            policy: ContactPolicy::default(),
            time_ticks: 0,
        }
    }

    /// Compute initial transforms for the static geometry
    pub fn settle_static(&mut self) {
        for entity in self.platforms.iter_mut().chain(self.walls.iter_mut()) {
            entity.update(0.0, Neighbors::none());
        }
    }

    /// Update the player, then every enemy, for one fixed step
    pub fn step_entities(&mut self, dt: f32) {
        let World {
            player,
            platforms,
            enemies,
            policy,
            ..
        } = self;
        let platforms: &[Entity] = platforms;

        player.update(
            dt,
            Neighbors {
                player: None,
                platforms,
                enemies: enemies.as_mut_slice(),
                policy: *policy,
            },
        );

        for enemy in enemies.iter_mut() {
            enemy.update(
                dt,
                Neighbors {
                    player: Some(&mut *player),
                    platforms,
                    enemies: &mut [],
                    policy: *policy,
                },
            );
        }

        self.time_ticks += 1;
    }

    pub fn enemies_alive(&self) -> usize {
        self.enemies.iter().filter(|e| e.is_active).count()
    }

    /// Move to `status`, logging the transition
    pub fn set_status(&mut self, status: GameStatus) {
        if self.status != status {
            log::info!("Status {:?} -> {:?} at tick {}", self.status, status, self.time_ticks);
            self.status = status;
        }
    }
}

/// One of the three games
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Game {
    Battle(World),
    Lander(World),
    Pong(PongState),
}

impl Game {
    pub fn new(scene: SceneKind, seed: u64, policy: ContactPolicy) -> Self {
        match scene {
            SceneKind::Battle => {
                let mut world = super::battle::new_world();
                world.policy = policy;
                Game::Battle(world)
            }
            SceneKind::Lander => {
                let mut world = super::lander::new_world();
                world.policy = policy;
                Game::Lander(world)
            }
            SceneKind::Pong => Game::Pong(PongState::new(seed)),
        }
    }

    pub fn scene(&self) -> SceneKind {
        match self {
            Game::Battle(_) => SceneKind::Battle,
            Game::Lander(_) => SceneKind::Lander,
            Game::Pong(_) => SceneKind::Pong,
        }
    }

    pub fn status(&self) -> GameStatus {
        match self {
            Game::Battle(world) | Game::Lander(world) => world.status,
            Game::Pong(pong) => pong.status,
        }
    }

    pub fn world(&self) -> Option<&World> {
        match self {
            Game::Battle(world) | Game::Lander(world) => Some(world),
            Game::Pong(_) => None,
        }
    }
}
