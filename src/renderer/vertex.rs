//! Vertex types for textured 2D quads

use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec3};

use super::atlas::UvRect;

/// 2D vertex with a texture coordinate
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 2],
    pub uv: [f32; 2],
}

impl Vertex {
    pub const fn new(x: f32, y: f32, u: f32, v: f32) -> Self {
        Self {
            position: [x, y],
            uv: [u, v],
        }
    }
}

/// Unit quad corners, two counter-clockwise triangles
const CORNERS: [(f32, f32); 6] = [
    (-0.5, -0.5),
    (0.5, -0.5),
    (0.5, 0.5),
    (-0.5, -0.5),
    (0.5, 0.5),
    (-0.5, 0.5),
];

/// Expand a unit quad through `model`, sampling `uv`.
/// Texture rows grow downward, so the quad's top edge samples `uv.v`.
pub fn textured_quad(model: Mat4, uv: UvRect) -> [Vertex; 6] {
    CORNERS.map(|(x, y)| {
        let p = model.transform_point3(Vec3::new(x, y, 0.0));
        let u = uv.u + (x + 0.5) * uv.width;
        let v = uv.v + (0.5 - y) * uv.height;
        Vertex::new(p.x, p.y, u, v)
    })
}
