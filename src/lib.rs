//! Platform Battle - small 2D arcade prototypes on a shared simulation core
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, AABB collision, enemy AI, fixed timestep)
//! - `renderer`: Render/platform collaborator contract and a recording backend
//! - `settings`: JSON configuration

pub mod renderer;
pub mod settings;
pub mod sim;

pub use settings::{SceneKind, Settings, SettingsError};

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz)
    pub const FIXED_TIMESTEP: f32 = 1.0 / 60.0;

    /// Seconds each animation frame stays on screen
    pub const ANIM_FRAME_SECONDS: f32 = 0.25;

    /// Orthographic play area (half extents, world units)
    pub const HALF_WIDTH: f32 = 5.0;
    pub const HALF_HEIGHT: f32 = 3.75;
    /// Anything whose centre drops this far below the play area is out of bounds
    pub const KILL_PLANE_MARGIN: f32 = 1.0;

    /// Entity defaults
    pub const DEFAULT_SIZE: f32 = 1.0;

    /// Puncher switches to attacking inside this distance of the player
    pub const PUNCH_RANGE: f32 = 0.5;

    /// Battle tuning
    pub const BATTLE_GRAVITY: f32 = -9.81;
    pub const BATTLE_PLAYER_SPEED: f32 = 1.5;
    pub const BATTLE_JUMP_POWER: f32 = 5.0;
    pub const BATTLE_PLAYER_SIZE: f32 = 0.8;
    pub const ENEMY_SPEED: f32 = 0.5;

    /// Lander tuning
    pub const LANDER_GRAVITY: f32 = -0.1;
    pub const LANDER_THRUST: f32 = 1.0;

    /// Pong tuning
    pub const PONG_BALL_SIZE: f32 = 0.5;
    pub const PONG_BALL_SPEED: f32 = 1.0;
    pub const PONG_PADDLE_WIDTH: f32 = 0.5;
    pub const PONG_PADDLE_HEIGHT: f32 = 2.0;
    pub const PONG_PADDLE_SPEED: f32 = 1.0;
}
