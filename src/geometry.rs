//! Fixed host-side vertex and index data.

use std::mem;

use bytemuck::{Pod, Zeroable};

/// Floats per triangle vertex (x, y, z).
pub const COORDS_PER_VERTEX: i32 = 3;

/// Triangle corners: top, bottom-left, bottom-right.
pub const TRIANGLE_COORDS: [[f32; 3]; 3] = [
    [0.0, 0.2, 0.0],
    [-0.5, -0.5, 0.0],
    [0.5, -0.5, 0.0],
];

/// Index order for the element-buffer variants.
pub const TRIANGLE_INDICES: [u32; 3] = [0, 1, 2];

/// Default flat color of the triangle (opaque green).
pub const TRIANGLE_COLOR: [f32; 4] = [0.0, 1.0, 0.0, 1.0];

/// One interleaved vertex of the textured quad.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct TexturedVertex {
    /// Clip-space position before the MVP transform.
    pub position: [f32; 3],
    /// Texture coordinate; `v = 0` is the first (top) image row.
    pub tex_coord: [f32; 2],
}

impl TexturedVertex {
    /// Byte stride between consecutive vertices.
    pub const STRIDE: i32 = size_of::<Self>() as i32;
    /// Byte offset of [`Self::position`].
    pub const POSITION_OFFSET: i32 = mem::offset_of!(TexturedVertex, position) as i32;
    /// Byte offset of [`Self::tex_coord`].
    pub const TEX_COORD_OFFSET: i32 = mem::offset_of!(TexturedVertex, tex_coord) as i32;
}

const fn tv(x: f32, y: f32, u: f32, v: f32) -> TexturedVertex {
    TexturedVertex {
        position: [x, y, 0.0],
        tex_coord: [u, v],
    }
}

/// Full-screen quad as a triangle strip: top-left, bottom-left, top-right,
/// bottom-right.
pub const QUAD_VERTICES: [TexturedVertex; 4] = [
    tv(-1.0, 1.0, 0.0, 0.0),
    tv(-1.0, -1.0, 0.0, 1.0),
    tv(1.0, 1.0, 1.0, 0.0),
    tv(1.0, -1.0, 1.0, 1.0),
];

/// Number of vertices in [`TRIANGLE_COORDS`] as a draw count.
pub const TRIANGLE_VERTEX_COUNT: i32 = TRIANGLE_COORDS.len() as i32;

/// Number of vertices in [`QUAD_VERTICES`] as a draw count.
pub const QUAD_VERTEX_COUNT: i32 = QUAD_VERTICES.len() as i32;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interleaved_layout() {
        assert_eq!(TexturedVertex::STRIDE, 5 * 4);
        assert_eq!(TexturedVertex::POSITION_OFFSET, 0);
        assert_eq!(TexturedVertex::TEX_COORD_OFFSET, 3 * 4);
        let floats: &[f32] = bytemuck::cast_slice(&QUAD_VERTICES);
        assert_eq!(&floats[..5], &[-1.0, 1.0, 0.0, 0.0, 0.0]);
        assert_eq!(floats.len(), 20);
    }

    #[test]
    fn triangle_bytes() {
        let bytes: &[u8] = bytemuck::cast_slice(&TRIANGLE_COORDS);
        assert_eq!(bytes.len(), 9 * 4);
        let idx: &[u8] = bytemuck::cast_slice(&TRIANGLE_INDICES);
        assert_eq!(idx.len(), 12);
    }
}
