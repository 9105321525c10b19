//! Rendering collaborator
//!
//! The simulation never draws. A backend only needs to load textures, draw
//! one textured quad at a time and present a frame; text is built on top of
//! quads from the font atlas.

pub mod atlas;
pub mod draw_list;
pub mod scene;
pub mod textures;
pub mod vertex;

use glam::{Mat4, Vec3};
use serde::{Deserialize, Serialize};

pub use atlas::{UvRect, atlas_uv, glyph_quads};
pub use draw_list::DrawList;
pub use scene::{Assets, render_game};
pub use textures::{AssetError, TextureCache};
pub use vertex::Vertex;

/// Opaque id of a loaded texture
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TextureHandle(pub u32);

impl TextureHandle {
    /// Stand-in for a texture that failed to load
    pub const MISSING: Self = Self(0);
}

pub trait RenderBackend {
    /// Never fails hard; unusable files yield [`TextureHandle::MISSING`]
    fn load_texture(&mut self, name: &str) -> TextureHandle;

    fn draw_textured_quad(&mut self, texture: TextureHandle, model: Mat4, uv: UvRect);

    /// Present the finished frame
    fn swap_buffers(&mut self);

    fn draw_text(&mut self, font: TextureHandle, text: &str, size: f32, spacing: f32, position: Vec3) {
        for glyph in glyph_quads(text, size, spacing, position) {
            self.draw_textured_quad(font, glyph.model, glyph.uv);
        }
    }
}
