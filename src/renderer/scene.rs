//! Draw a game state through any [`RenderBackend`]

use std::collections::HashMap;

use glam::{Mat4, Vec3};

use super::atlas::{UvRect, atlas_uv};
use super::{RenderBackend, TextureHandle};
use crate::sim::{Entity, Game, GameStatus, PongState, World};

pub const FONT_TEXTURE: &str = "font1.png";

/// Textures resolved once per game
#[derive(Debug, Clone)]
pub struct Assets {
    pub font: TextureHandle,
    sprites: HashMap<String, TextureHandle>,
}

impl Assets {
    /// Load the font and every sprite the game's entities name
    pub fn load(backend: &mut impl RenderBackend, game: &Game) -> Self {
        let font = backend.load_texture(FONT_TEXTURE);

        let mut sprites = HashMap::new();
        for entity in draw_order(game) {
            if let Some(name) = &entity.sprite
                && !sprites.contains_key(name)
            {
                sprites.insert(name.clone(), backend.load_texture(name));
            }
        }

        log::info!("Resolved {} sprite textures", sprites.len());
        Self { font, sprites }
    }

    pub fn sprite(&self, name: Option<&str>) -> TextureHandle {
        name.and_then(|n| self.sprites.get(n).copied())
            .unwrap_or(TextureHandle::MISSING)
    }
}

/// Entities back to front
fn draw_order(game: &Game) -> Vec<&Entity> {
    match game {
        Game::Battle(world) => world
            .platforms
            .iter()
            .chain(world.enemies.iter())
            .chain(std::iter::once(&world.player))
            .collect(),
        Game::Lander(world) => world
            .platforms
            .iter()
            .chain(world.walls.iter())
            .chain(std::iter::once(&world.player))
            .collect(),
        Game::Pong(table) => table.entities().to_vec(),
    }
}

fn draw_entity(backend: &mut impl RenderBackend, assets: &Assets, entity: &Entity) {
    if !entity.is_active {
        return;
    }

    let model = entity.model_matrix * Mat4::from_scale(Vec3::new(entity.width, entity.height, 1.0));
    let uv = match &entity.animation {
        Some(anim) => atlas_uv(anim.frame(), anim.cols, anim.rows),
        None => UvRect::FULL,
    };
    backend.draw_textured_quad(assets.sprite(entity.sprite.as_deref()), model, uv);
}

fn battle_banner(backend: &mut impl RenderBackend, font: TextureHandle, world: &World) {
    let at = Vec3::new(-2.25, 0.0, 0.0);
    match world.status {
        GameStatus::Won => backend.draw_text(font, "Congrats! You won the battle!", 0.4, -0.25, at),
        GameStatus::Lost => backend.draw_text(font, "Oh no! You loss the battle!", 0.4, -0.25, at),
        GameStatus::Sleeping => {
            backend.draw_text(font, "Defeat your opponents! Good luck!", 0.4, -0.25, at);
            backend.draw_text(font, "Press B to begin battle", 0.4, -0.25, Vec3::new(-1.25, -1.0, 0.0));
        }
        GameStatus::Running => {}
    }
}

fn lander_banner(backend: &mut impl RenderBackend, font: TextureHandle, world: &World) {
    let at = Vec3::new(-2.0, 0.0, 0.0);
    if world.player.is_dead {
        backend.draw_text(font, "Mission Failed", 0.5, -0.25, at);
    } else if world.player.has_won {
        backend.draw_text(font, "Mission Successful", 0.5, -0.25, at);
    }
}

fn pong_score(backend: &mut impl RenderBackend, font: TextureHandle, table: &PongState) {
    let score = format!("{} - {}", table.score_left, table.score_right);
    backend.draw_text(font, &score, 0.5, -0.25, Vec3::new(-0.5, 3.25, 0.0));
}

/// Record one frame of `game`; the caller presents it
pub fn render_game(backend: &mut impl RenderBackend, game: &Game, assets: &Assets) {
    for entity in draw_order(game) {
        draw_entity(backend, assets, entity);
    }

    match game {
        Game::Battle(world) => battle_banner(backend, assets.font, world),
        Game::Lander(world) => lander_banner(backend, assets.font, world),
        Game::Pong(table) => pong_score(backend, assets.font, table),
    }
}
