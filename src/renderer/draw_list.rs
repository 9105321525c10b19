//! Recording backend
//!
//! Collects every quad of a frame as textured vertices grouped by texture,
//! ready to be uploaded in one buffer. Used by the headless driver and tests.

use glam::Mat4;

use super::atlas::UvRect;
use super::textures::TextureCache;
use super::vertex::{Vertex, textured_quad};
use super::{RenderBackend, TextureHandle};

/// Consecutive vertices drawn with the same texture
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DrawBatch {
    pub texture: TextureHandle,
    pub first: u32,
    pub count: u32,
}

/// Summary of a presented frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameStats {
    pub quads: usize,
    pub batches: usize,
}

pub struct DrawList {
    pub textures: TextureCache,
    vertices: Vec<Vertex>,
    batches: Vec<DrawBatch>,
    frames: u64,
    last_frame: FrameStats,
}

impl DrawList {
    pub fn new(textures: TextureCache) -> Self {
        Self {
            textures,
            vertices: Vec::with_capacity(1024),
            batches: Vec::new(),
            frames: 0,
            last_frame: FrameStats::default(),
        }
    }

    /// Vertices recorded since the last swap
    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    pub fn batches(&self) -> &[DrawBatch] {
        &self.batches
    }

    /// Raw vertex bytes, as a GPU upload would see them
    pub fn vertex_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn last_frame(&self) -> FrameStats {
        self.last_frame
    }
}

impl RenderBackend for DrawList {
    fn load_texture(&mut self, name: &str) -> TextureHandle {
        self.textures.load(name)
    }

    fn draw_textured_quad(&mut self, texture: TextureHandle, model: Mat4, uv: UvRect) {
        let first = self.vertices.len() as u32;
        self.vertices.extend_from_slice(&textured_quad(model, uv));

        match self.batches.last_mut() {
            Some(batch) if batch.texture == texture => batch.count += 6,
            _ => self.batches.push(DrawBatch {
                texture,
                first,
                count: 6,
            }),
        }
    }

    fn swap_buffers(&mut self) {
        self.last_frame = FrameStats {
            quads: self.vertices.len() / 6,
            batches: self.batches.len(),
        };
        self.frames += 1;
        self.vertices.clear();
        self.batches.clear();
    }
}
