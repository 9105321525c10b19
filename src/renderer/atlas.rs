//! Sprite sheet and font atlas coordinates

use glam::{Mat4, Vec3};

/// Glyphs per row and column of the font texture
pub const FONT_GRID: u32 = 16;

/// Sub-rectangle of a texture in normalized coordinates, origin top-left
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UvRect {
    pub u: f32,
    pub v: f32,
    pub width: f32,
    pub height: f32,
}

impl UvRect {
    pub const FULL: Self = Self {
        u: 0.0,
        v: 0.0,
        width: 1.0,
        height: 1.0,
    };
}

/// Cell `index` of a `cols` x `rows` sheet, counted row-major
pub fn atlas_uv(index: u32, cols: u32, rows: u32) -> UvRect {
    let cols = cols.max(1);
    let rows = rows.max(1);
    UvRect {
        u: (index % cols) as f32 / cols as f32,
        v: (index / cols) as f32 / rows as f32,
        width: 1.0 / cols as f32,
        height: 1.0 / rows as f32,
    }
}

/// One character of laid-out text
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GlyphQuad {
    pub model: Mat4,
    pub uv: UvRect,
}

/// Lay out `text` on a single line starting at `position`.
///
/// Each byte selects a cell of the 16x16 font atlas. Glyph centres are
/// `size + spacing` apart; a negative spacing tightens the line.
pub fn glyph_quads(text: &str, size: f32, spacing: f32, position: Vec3) -> Vec<GlyphQuad> {
    text.bytes()
        .enumerate()
        .map(|(i, byte)| {
            let offset = (size + spacing) * i as f32;
            let model = Mat4::from_translation(position + Vec3::new(offset, 0.0, 0.0))
                * Mat4::from_scale(Vec3::new(size, size, 1.0));
            GlyphQuad {
                model,
                uv: atlas_uv(byte as u32, FONT_GRID, FONT_GRID),
            }
        })
        .collect()
}
