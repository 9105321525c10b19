//! Fixed timestep simulation tick
//!
//! Dispatches one step of whichever game is loaded.

use serde::{Deserialize, Serialize};

use super::state::Game;
use super::{battle, lander, pong};

/// Keyboard state sampled for a single tick
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickInput {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
    /// Left pong paddle
    pub w: bool,
    pub s: bool,
    /// Space: jump or serve (one-shot)
    pub action: bool,
    /// B: leave the title screen (one-shot)
    pub begin: bool,
    /// Window close / quit request, handled by the outer loop
    pub quit: bool,
}

impl TickInput {
    /// Forget key presses that should act only once per frame
    pub fn clear_one_shots(&mut self) {
        self.action = false;
        self.begin = false;
    }
}

/// Advance the game by one fixed timestep
pub fn tick(game: &mut Game, input: &TickInput, dt: f32) {
    match game {
        Game::Battle(world) => battle::tick(world, input, dt),
        Game::Lander(world) => lander::tick(world, input, dt),
        Game::Pong(table) => pong::tick(table, input, dt),
    }
}
