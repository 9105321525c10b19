//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (entities addressed by index, never removed)
//! - No rendering or platform dependencies

pub mod ai;
pub mod animation;
pub mod autopilot;
pub mod battle;
pub mod collision;
pub mod entity;
pub mod lander;
pub mod pong;
pub mod state;
pub mod tick;
pub mod timestep;

pub use ai::{AiBehavior, AiState};
pub use animation::{Animation, AnimationSet, Facing};
pub use collision::{ContactPolicy, check_collision, resolve_x, resolve_y, touching_any};
pub use entity::{Contacts, Entity, EntityKind, Neighbors, Steering};
pub use pong::{PongPhase, PongState, Side};
pub use state::{Game, GameStatus, World};
pub use tick::{TickInput, tick};
pub use timestep::FixedTimestep;
