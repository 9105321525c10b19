//! The single mutable-state actor type
//!
//! Player, platforms, walls, enemies and the pong ball are all `Entity`
//! values. Entities never hold references to each other; whatever an
//! update needs from the rest of the world arrives through `Neighbors`
//! for that call only.

use glam::{Mat4, Vec3};
use serde::{Deserialize, Serialize};

use super::ai::AiBehavior;
use super::animation::Animation;
use super::collision::{self, ContactPolicy};
use crate::consts::DEFAULT_SIZE;

/// What an entity is, plus any per-kind state it carries
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum EntityKind {
    Player,
    /// Immovable, landable
    Platform,
    /// Immovable, blocking or hazardous depending on the game
    Wall,
    /// Pong ball, moved by the pong tick
    Ball,
    Enemy(AiBehavior),
}

/// How horizontal input turns into velocity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Steering {
    /// `velocity.x = movement.x * speed` every step
    #[default]
    Direct,
    /// Horizontal acceleration integrates into velocity
    Thrust,
}

/// Per-side collision flags for the most recent update
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Contacts {
    pub top: bool,
    pub bottom: bool,
    pub left: bool,
    pub right: bool,
}

impl Contacts {
    pub fn any(&self) -> bool {
        self.top || self.bottom || self.left || self.right
    }
}

/// The parts of the world one `Entity::update` call may touch
pub struct Neighbors<'a> {
    /// The player, when the updating entity is not the player itself
    pub player: Option<&'a mut Entity>,
    pub platforms: &'a [Entity],
    pub enemies: &'a mut [Entity],
    pub policy: ContactPolicy,
}

impl Neighbors<'_> {
    /// No neighbours at all (static geometry initialisation)
    pub fn none() -> Self {
        Self {
            player: None,
            platforms: &[],
            enemies: &mut [],
            policy: ContactPolicy::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Entity {
    pub kind: EntityKind,
    pub position: Vec3,
    /// Input intent, unit-length at most
    pub movement: Vec3,
    pub velocity: Vec3,
    pub acceleration: Vec3,
    pub width: f32,
    pub height: f32,
    pub speed: f32,
    pub jump_power: f32,
    pub steering: Steering,
    /// Set by input, consumed by the next update
    pub jump_requested: bool,
    pub contacts: Contacts,
    /// Inactive entities are skipped by update, collision, AI and rendering
    pub is_active: bool,
    pub is_dead: bool,
    pub has_won: bool,
    pub animation: Option<Animation>,
    /// Texture asset drawn for this entity
    pub sprite: Option<String>,
    pub model_matrix: Mat4,
}

impl Entity {
    pub fn new(kind: EntityKind, position: Vec3) -> Self {
        Self {
            kind,
            position,
            movement: Vec3::ZERO,
            velocity: Vec3::ZERO,
            acceleration: Vec3::ZERO,
            width: DEFAULT_SIZE,
            height: DEFAULT_SIZE,
            speed: 0.0,
            jump_power: 0.0,
            steering: Steering::Direct,
            jump_requested: false,
            contacts: Contacts::default(),
            is_active: true,
            is_dead: false,
            has_won: false,
            animation: None,
            sprite: None,
            model_matrix: Mat4::from_translation(position),
        }
    }

    pub fn player(position: Vec3) -> Self {
        Self::new(EntityKind::Player, position)
    }

    pub fn platform(position: Vec3) -> Self {
        Self::new(EntityKind::Platform, position)
    }

    pub fn wall(position: Vec3) -> Self {
        Self::new(EntityKind::Wall, position)
    }

    pub fn enemy(behavior: AiBehavior, position: Vec3) -> Self {
        Self::new(EntityKind::Enemy(behavior), position)
    }

    pub fn with_size(mut self, width: f32, height: f32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn with_speed(mut self, speed: f32) -> Self {
        self.speed = speed;
        self
    }

    pub fn with_sprite(mut self, sprite: &str) -> Self {
        self.sprite = Some(sprite.to_owned());
        self
    }

    pub fn is_player(&self) -> bool {
        self.kind == EntityKind::Player
    }

    pub fn is_enemy(&self) -> bool {
        matches!(self.kind, EntityKind::Enemy(_))
    }

    /// AI behavior, for enemies
    pub fn behavior(&self) -> Option<&AiBehavior> {
        match &self.kind {
            EntityKind::Enemy(behavior) => Some(behavior),
            _ => None,
        }
    }

    /// Queue a jump impulse for the next update
    pub fn request_jump(&mut self) {
        self.jump_requested = true;
    }

    /// Advance this entity by one fixed step
    pub fn update(&mut self, dt: f32, neighbors: Neighbors<'_>) {
        if !self.is_active {
            return;
        }

        // AI reacts to what happened last step; flags for this step start clean
        let previous = std::mem::take(&mut self.contacts);

        let Neighbors {
            player,
            platforms,
            enemies,
            policy,
        } = neighbors;

        if let EntityKind::Enemy(behavior) = &mut self.kind {
            behavior.think(self.position, previous, &mut self.movement, player);
        }

        if let Some(animation) = &mut self.animation {
            animation.advance(dt, self.movement);
        }

        if self.is_player() {
            if self.jump_requested {
                self.jump_requested = false;
                self.velocity.y += self.jump_power;
            }

            if self.steering == Steering::Direct {
                self.velocity.x = self.movement.x * self.speed;
            }
            self.velocity += self.acceleration * dt;

            // Y first, then X
            self.position.y += self.velocity.y * dt;
            collision::resolve_y(self, platforms, policy);

            self.position.x += self.velocity.x * dt;
            collision::resolve_x(self, platforms, policy);

            self.jump_enemies(enemies);
        }

        self.refresh_transform();
    }

    /// Stomp or be killed by every active enemy the player overlaps
    pub fn jump_enemies(&mut self, enemies: &mut [Entity]) {
        for enemy in enemies.iter_mut() {
            if !collision::check_collision(self, enemy) {
                continue;
            }

            if self.velocity.y < 0.0 && self.position.y > enemy.position.y {
                enemy.is_active = false;
                self.contacts.bottom = true;
                log::debug!("Enemy stomped at ({:.2}, {:.2})", enemy.position.x, enemy.position.y);
            } else {
                self.is_dead = true;
            }
        }
    }

    /// Recompute the model transform from the current position
    pub fn refresh_transform(&mut self) {
        self.model_matrix = Mat4::from_translation(self.position);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::FIXED_TIMESTEP;
    use crate::sim::ai::AiState;
    use crate::sim::animation::{AnimationSet, Facing};

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-5
    }

    #[test]
    fn test_free_fall_single_step() {
        let mut player = Entity::player(Vec3::new(0.0, 3.5, 0.0));
        player.acceleration = Vec3::new(0.0, -0.1, 0.0);

        player.update(FIXED_TIMESTEP, Neighbors::none());

        let expected_vy = -0.1 / 60.0;
        assert!(approx(player.velocity.y, expected_vy));
        assert!(approx(player.position.y, 3.5 + expected_vy / 60.0));
        assert!(!player.contacts.any());
        assert_eq!(player.model_matrix.w_axis.y, player.position.y);
    }

    #[test]
    fn test_landing_on_platform() {
        let platform = Entity::platform(Vec3::ZERO);
        let mut player = Entity::player(Vec3::new(0.0, 0.39, 0.0))
            .with_size(0.8, 0.8);
        player.velocity.y = -2.0;

        // Resolution alone, without the integration step moving the player
        collision::resolve_y(&mut player, std::slice::from_ref(&platform), ContactPolicy::Sequential);

        assert!(player.contacts.bottom);
        assert_eq!(player.velocity.y, 0.0);
        let penetration = (0.39f32 - 0.4 - 0.5).abs();
        assert!(approx(player.position.y, 0.39 + penetration));
    }

    #[test]
    fn test_contacts_do_not_carry_over() {
        let platforms = vec![Entity::platform(Vec3::ZERO)];
        let mut player = Entity::player(Vec3::new(0.0, 0.85, 0.0)).with_size(0.8, 0.8);
        player.acceleration.y = -9.81;

        let neighbors = Neighbors {
            player: None,
            platforms: &platforms,
            enemies: &mut [],
            policy: ContactPolicy::Sequential,
        };
        player.update(FIXED_TIMESTEP, neighbors);
        assert!(player.contacts.bottom);

        // Jump clear of the platform: next step has no contacts
        player.position.y = 3.0;
        let neighbors = Neighbors {
            player: None,
            platforms: &platforms,
            enemies: &mut [],
            policy: ContactPolicy::Sequential,
        };
        player.update(FIXED_TIMESTEP, neighbors);
        assert!(!player.contacts.any());
    }

    #[test]
    fn test_inactive_entity_is_frozen() {
        let mut player = Entity::player(Vec3::ZERO);
        player.acceleration.y = -9.81;
        player.is_active = false;
        player.contacts.left = true;

        player.update(FIXED_TIMESTEP, Neighbors::none());

        assert_eq!(player.position, Vec3::ZERO);
        assert!(player.contacts.left);
    }

    #[test]
    fn test_jump_impulse_consumed_once() {
        let mut player = Entity::player(Vec3::ZERO);
        player.jump_power = 5.0;
        player.request_jump();

        player.update(FIXED_TIMESTEP, Neighbors::none());
        assert!(approx(player.velocity.y, 5.0));
        assert!(!player.jump_requested);

        player.update(FIXED_TIMESTEP, Neighbors::none());
        assert!(approx(player.velocity.y, 5.0));
    }

    #[test]
    fn test_direct_steering_overrides_horizontal_velocity() {
        let mut player = Entity::player(Vec3::ZERO).with_speed(1.5);
        player.velocity.x = 10.0;
        player.movement = Vec3::X;

        player.update(FIXED_TIMESTEP, Neighbors::none());
        assert!(approx(player.velocity.x, 1.5));
    }

    #[test]
    fn test_thrust_steering_accumulates() {
        let mut player = Entity::player(Vec3::ZERO);
        player.steering = Steering::Thrust;
        player.velocity.x = 0.5;
        player.acceleration.x = 1.0;

        player.update(FIXED_TIMESTEP, Neighbors::none());
        assert!(approx(player.velocity.x, 0.5 + FIXED_TIMESTEP));
    }

    #[test]
    fn test_stomp_kills_enemy() {
        let mut enemies = vec![Entity::enemy(AiBehavior::Stabber, Vec3::ZERO)];
        let mut player = Entity::player(Vec3::new(0.0, 0.8, 0.0)).with_size(0.8, 0.8);
        player.velocity.y = -1.0;

        player.jump_enemies(&mut enemies);

        assert!(!enemies[0].is_active);
        assert!(player.contacts.bottom);
        assert!(!player.is_dead);
    }

    #[test]
    fn test_side_touch_kills_player() {
        let mut enemies = vec![Entity::enemy(AiBehavior::Shooter, Vec3::ZERO)];
        let mut player = Entity::player(Vec3::new(0.8, 0.0, 0.0)).with_size(0.8, 0.8);

        player.jump_enemies(&mut enemies);

        assert!(enemies[0].is_active);
        assert!(player.is_dead);
    }

    #[test]
    fn test_stomp_keeps_platform_landing_flag() {
        let mut enemies = vec![
            Entity::enemy(AiBehavior::Stabber, Vec3::new(0.0, 0.0, 0.0)),
            Entity::enemy(AiBehavior::Stabber, Vec3::new(20.0, 0.0, 0.0)),
        ];
        let mut player = Entity::player(Vec3::new(0.0, 0.8, 0.0)).with_size(0.8, 0.8);
        player.velocity.y = -1.0;

        player.jump_enemies(&mut enemies);

        // The second, distant enemy must not clear the flag set by the first
        assert!(player.contacts.bottom);
    }

    #[test]
    fn test_enemy_runs_ai_with_previous_contacts() {
        let mut player = Entity::player(Vec3::new(10.0, 0.0, 0.0));
        let mut stabber = Entity::enemy(AiBehavior::Stabber, Vec3::ZERO);
        stabber.contacts.left = true;

        let neighbors = Neighbors {
            player: Some(&mut player),
            ..Neighbors::none()
        };
        stabber.update(FIXED_TIMESTEP, neighbors);

        assert_eq!(stabber.movement, Vec3::new(1.0, 0.0, 0.0));
        assert!(!stabber.contacts.any());
        // Enemies do not integrate
        assert_eq!(stabber.position, Vec3::ZERO);
    }

    #[test]
    fn test_puncher_attacks_player_in_range() {
        let mut player = Entity::player(Vec3::new(0.3, 0.0, 0.0));
        let mut puncher = Entity::enemy(AiBehavior::puncher(), Vec3::ZERO);

        let neighbors = Neighbors {
            player: Some(&mut player),
            ..Neighbors::none()
        };
        puncher.update(FIXED_TIMESTEP, neighbors);
        assert_eq!(
            puncher.behavior(),
            Some(&AiBehavior::Puncher {
                state: AiState::Attacking
            })
        );
        assert!(!player.is_dead);

        let neighbors = Neighbors {
            player: Some(&mut player),
            ..Neighbors::none()
        };
        puncher.update(FIXED_TIMESTEP, neighbors);
        assert!(player.is_dead);
    }

    #[test]
    fn test_animation_follows_movement() {
        let mut player = Entity::player(Vec3::ZERO).with_speed(1.5);
        player.animation = Some(Animation::new(AnimationSet::PLAYER_SHEET, Facing::Right, 4, 4));
        player.movement = Vec3::X;

        for _ in 0..16 {
            player.update(FIXED_TIMESTEP, Neighbors::none());
        }
        let animation = player.animation.as_ref().map(|a| a.index);
        assert_eq!(animation, Some(1));

        player.movement = Vec3::ZERO;
        player.update(FIXED_TIMESTEP, Neighbors::none());
        assert_eq!(player.animation.as_ref().map(|a| a.index), Some(0));
    }
}
