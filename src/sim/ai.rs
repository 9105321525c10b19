//! Enemy behaviors
//!
//! Each enemy runs one behavior per step. Wall bounces react to the
//! contact flags of the enemy's previous step, so a reversal lands one
//! step after the hit.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::entity::{Contacts, Entity};
use crate::consts::PUNCH_RANGE;

/// Puncher state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AiState {
    #[default]
    Walking,
    /// Terminal: kills the player every step
    Attacking,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AiBehavior {
    /// Patrols, heading left by default
    Stabber,
    /// Patrols, heading right by default
    Shooter,
    /// Patrols left until the player is within punching range
    Puncher { state: AiState },
}

impl AiBehavior {
    pub fn puncher() -> Self {
        AiBehavior::Puncher {
            state: AiState::Walking,
        }
    }

    pub fn state(&self) -> AiState {
        match self {
            AiBehavior::Puncher { state } => *state,
            _ => AiState::Walking,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AiBehavior::Stabber => "stabber",
            AiBehavior::Shooter => "shooter",
            AiBehavior::Puncher { .. } => "puncher",
        }
    }

    /// Decide this step's movement. `previous` holds the enemy's own
    /// contact flags from the step before.
    pub fn think(
        &mut self,
        position: Vec3,
        previous: Contacts,
        movement: &mut Vec3,
        player: Option<&mut Entity>,
    ) {
        match self {
            AiBehavior::Stabber => *movement = patrol(-1.0, previous),
            AiBehavior::Shooter => *movement = patrol(1.0, previous),
            AiBehavior::Puncher { state } => match *state {
                AiState::Walking => {
                    *movement = patrol(-1.0, previous);

                    if let Some(player) = player
                        && position.distance(player.position) < PUNCH_RANGE
                    {
                        *state = AiState::Attacking;
                        log::info!("Puncher at ({:.2}, {:.2}) attacking", position.x, position.y);
                    }
                }
                AiState::Attacking => {
                    if let Some(player) = player {
                        player.is_dead = true;
                    }
                }
            },
        }
    }
}

/// Walk in `default_dir`, turning away from whatever was hit last step
fn patrol(default_dir: f32, previous: Contacts) -> Vec3 {
    if previous.right {
        Vec3::new(-1.0, 0.0, 0.0)
    } else if previous.left {
        Vec3::new(1.0, 0.0, 0.0)
    } else {
        Vec3::new(default_dir, 0.0, 0.0)
    }
}
