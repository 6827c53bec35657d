use glam::Mat4;

use super::{delete_with, Drawable};
use crate::{
    assets::{AssetSource, TEXTURE_FRAGMENT, TEXTURE_VERTEX},
    error::GlsurfaceError,
    geometry::{TexturedVertex, QUAD_VERTEX_COUNT, QUAD_VERTICES},
    gl::{BufferTarget, BufferUsage, Gl, Primitive},
    projection::Extent,
    shader::program_from_assets,
    texture::{upload_texture, Bitmap},
};

const POSITION_ATTRIBUTE: &str = "aPosition";
const TEX_COORD_ATTRIBUTE: &str = "aTexCoord";
const MATRIX_UNIFORM: &str = "uTMatrix";
const SAMPLER_UNIFORM: &str = "uSampler";

/// Texture unit the sampler reads from.
const TEXTURE_UNIT: u32 = 0;

/// Full-screen quad showing one image through an MVP matrix.
///
/// The matrix starts out as identity, so the quad covers the viewport until
/// a projection is supplied.
pub struct TextureRender<G: Gl> {
    program: Option<G::Program>,
    vertex_buffer: Option<G::Buffer>,
    texture: Option<G::Texture>,
    position: Option<u32>,
    tex_coord: Option<u32>,
    matrix_location: Option<G::UniformLocation>,
    sampler_location: Option<G::UniformLocation>,
    mvp: Mat4,
    image: Extent,
}

impl<G: Gl> TextureRender<G> {
    /// Build the program, upload the quad and consume `bitmap` into a
    /// texture.
    ///
    /// # Errors
    ///
    /// [`GlsurfaceError::GlObject`] if the buffer or texture cannot be
    /// created; objects allocated before the failure are deleted. A shader
    /// failure is only logged and leaves the renderer inert.
    pub fn new(
        gl: &G,
        assets: &dyn AssetSource,
        bitmap: Bitmap,
    ) -> Result<Self, GlsurfaceError> {
        let mut quad = Self {
            program: None,
            vertex_buffer: None,
            texture: None,
            position: None,
            tex_coord: None,
            matrix_location: None,
            sampler_location: None,
            mvp: Mat4::IDENTITY,
            image: Extent::new(bitmap.width(), bitmap.height()),
        };

        match program_from_assets(gl, assets, TEXTURE_VERTEX, TEXTURE_FRAGMENT) {
            Ok(program) => {
                quad.position = gl.attrib_location(program, POSITION_ATTRIBUTE);
                quad.tex_coord = gl.attrib_location(program, TEX_COORD_ATTRIBUTE);
                quad.matrix_location = gl.uniform_location(program, MATRIX_UNIFORM);
                quad.sampler_location = gl.uniform_location(program, SAMPLER_UNIFORM);
                for (name, found) in [
                    (POSITION_ATTRIBUTE, quad.position.is_some()),
                    (TEX_COORD_ATTRIBUTE, quad.tex_coord.is_some()),
                    (MATRIX_UNIFORM, quad.matrix_location.is_some()),
                    (SAMPLER_UNIFORM, quad.sampler_location.is_some()),
                ] {
                    if !found {
                        log::warn!("{name} not found in texture program");
                    }
                }
                quad.program = Some(program);
            }
            Err(e) => log::error!("Texture program unavailable, drawing disabled: {e}"),
        }

        if let Err(e) = quad.allocate(gl, bitmap) {
            quad.release(gl);
            return Err(e);
        }
        Ok(quad)
    }

    fn allocate(&mut self, gl: &G, bitmap: Bitmap) -> Result<(), GlsurfaceError> {
        let vbo = gl
            .create_buffer()
            .map_err(|msg| GlsurfaceError::gl_object("buffer", msg))?;
        self.vertex_buffer = Some(vbo);
        gl.bind_buffer(BufferTarget::Array, Some(vbo));
        gl.buffer_data(
            BufferTarget::Array,
            bytemuck::cast_slice(&QUAD_VERTICES),
            BufferUsage::StaticDraw,
        );
        gl.bind_buffer(BufferTarget::Array, None);

        self.texture = Some(upload_texture(gl, bitmap)?);
        Ok(())
    }

    /// Replace the MVP matrix with 16 column-major floats.
    ///
    /// # Errors
    ///
    /// [`GlsurfaceError::InvalidMatrix`] for any other length; the stored
    /// matrix is left untouched.
    pub fn set_custom_mvp_matrix(&mut self, matrix: &[f32]) -> Result<(), GlsurfaceError> {
        let Ok(columns) = <&[f32; 16]>::try_from(matrix) else {
            log::error!("Invalid MVP matrix: expected 16 floats, got {}", matrix.len());
            return Err(GlsurfaceError::InvalidMatrix { len: matrix.len() });
        };
        self.mvp = Mat4::from_cols_array(columns);
        Ok(())
    }

    /// Replace the MVP matrix.
    pub fn set_mvp(&mut self, mvp: Mat4) {
        self.mvp = mvp;
    }

    /// Matrix applied on the next draw.
    #[must_use]
    pub fn mvp(&self) -> Mat4 {
        self.mvp
    }

    /// Size of the uploaded image.
    #[must_use]
    pub fn image_size(&self) -> Extent {
        self.image
    }

    /// The program linked and drawing is enabled.
    #[must_use]
    pub fn is_drawable(&self) -> bool {
        self.program.is_some()
    }
}

impl<G: Gl> Drawable<G> for TextureRender<G> {
    fn draw(&self, gl: &G) {
        let (Some(program), Some(vbo)) = (self.program, self.vertex_buffer) else {
            return;
        };
        gl.use_program(Some(program));
        gl.bind_buffer(BufferTarget::Array, Some(vbo));

        let attributes = [
            (self.position, 3, TexturedVertex::POSITION_OFFSET),
            (self.tex_coord, 2, TexturedVertex::TEX_COORD_OFFSET),
        ];
        for (index, size, offset) in attributes {
            if let Some(index) = index {
                gl.enable_vertex_attrib_array(index);
                gl.vertex_attrib_pointer_f32(index, size, TexturedVertex::STRIDE, offset);
            }
        }

        gl.uniform_matrix_4_f32(self.matrix_location.as_ref(), &self.mvp.to_cols_array());
        gl.active_texture(TEXTURE_UNIT);
        gl.bind_texture_2d(self.texture);
        gl.uniform_1_i32(self.sampler_location.as_ref(), TEXTURE_UNIT as i32);

        gl.draw_arrays(Primitive::TriangleStrip, 0, QUAD_VERTEX_COUNT);

        for index in [self.position, self.tex_coord].into_iter().flatten() {
            gl.disable_vertex_attrib_array(index);
        }
        gl.bind_texture_2d(None);
        gl.bind_buffer(BufferTarget::Array, None);
        gl.use_program(None);
    }

    fn release(&mut self, gl: &G) {
        if !self.holds_gpu_objects() {
            return;
        }
        delete_with(&mut self.texture, |t| gl.delete_texture(t));
        delete_with(&mut self.vertex_buffer, |b| gl.delete_buffer(b));
        delete_with(&mut self.program, |p| gl.delete_program(p));
        self.position = None;
        self.tex_coord = None;
        self.matrix_location = None;
        self.sampler_location = None;
        log::debug!("Texture renderer released");
    }

    fn holds_gpu_objects(&self) -> bool {
        self.program.is_some() || self.vertex_buffer.is_some() || self.texture.is_some()
    }
}

impl<G: Gl> Drop for TextureRender<G> {
    fn drop(&mut self) {
        if self.holds_gpu_objects() {
            log::warn!("Texture renderer dropped without release; GPU objects leaked");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        assets::BundledAssets,
        gl::{
            mock::{Call, MockGl},
            NO_ERROR,
        },
    };

    fn bitmap() -> Bitmap {
        Bitmap::from_rgba(8, 4, vec![200; 8 * 4 * 4]).unwrap()
    }

    #[test]
    fn release_returns_counts_to_zero() {
        let gl = MockGl::new();
        let mut quad = TextureRender::new(&gl, &BundledAssets, bitmap()).unwrap();
        assert_eq!(gl.live_programs(), 1);
        assert_eq!(gl.live_buffers(), 1);
        assert_eq!(gl.live_textures(), 1);
        assert_eq!(gl.live_shaders(), 0);
        assert_eq!(quad.image_size(), Extent::new(8, 4));

        quad.release(&gl);
        assert_eq!(gl.live_objects(), 0);
        quad.release(&gl);
        assert_eq!(gl.stale_deletes(), 0);
    }

    #[test]
    fn mvp_defaults_to_identity() {
        let gl = MockGl::new();
        let mut quad = TextureRender::new(&gl, &BundledAssets, bitmap()).unwrap();
        assert_eq!(quad.mvp(), Mat4::IDENTITY);
        quad.release(&gl);
    }

    #[test]
    fn bad_matrix_length_keeps_previous() {
        let gl = MockGl::new();
        let mut quad = TextureRender::new(&gl, &BundledAssets, bitmap()).unwrap();
        let scale = Mat4::from_scale(glam::Vec3::splat(2.0));
        quad.set_custom_mvp_matrix(&scale.to_cols_array()).unwrap();
        assert_eq!(quad.mvp(), scale);

        let err = quad.set_custom_mvp_matrix(&[1.0; 15]).unwrap_err();
        assert!(matches!(err, GlsurfaceError::InvalidMatrix { len: 15 }));
        assert!(quad.set_custom_mvp_matrix(&[0.0; 17]).is_err());
        assert!(quad.set_custom_mvp_matrix(&[]).is_err());
        assert_eq!(quad.mvp(), scale);
        quad.release(&gl);
    }

    #[test]
    fn draw_binds_texture_unit_zero_and_draws_strip() {
        let gl = MockGl::new();
        let mut quad = TextureRender::new(&gl, &BundledAssets, bitmap()).unwrap();
        let texture = quad.texture.unwrap();
        gl.clear_calls();

        quad.draw(&gl);
        let calls = gl.calls();
        let expected_in_order = [
            Call::AttribPointer {
                index: 0,
                size: 3,
                stride: 20,
                offset: 0,
            },
            Call::AttribPointer {
                index: 1,
                size: 2,
                stride: 20,
                offset: 12,
            },
            Call::UniformMatrix4(quad.matrix_location, Mat4::IDENTITY.to_cols_array()),
            Call::ActiveTexture(0),
            Call::BindTexture(Some(texture)),
            Call::Uniform1(quad.sampler_location, 0),
            Call::DrawArrays {
                mode: Primitive::TriangleStrip,
                first: 0,
                count: 4,
            },
        ];
        let mut cursor = calls.iter();
        for call in &expected_in_order {
            assert!(cursor.any(|c| c == call), "missing or out of order: {call:?}");
        }
        assert_eq!(calls.last(), Some(&Call::UseProgram(None)));
        assert_eq!(gl.get_error(), NO_ERROR);
        quad.release(&gl);
    }

    #[test]
    fn draw_after_release_is_a_noop() {
        let gl = MockGl::new();
        let mut quad = TextureRender::new(&gl, &BundledAssets, bitmap()).unwrap();
        quad.release(&gl);
        gl.clear_calls();
        quad.draw(&gl);
        assert_eq!(gl.draw_count(), 0);
        assert_eq!(gl.get_error(), NO_ERROR);
    }

    #[test]
    fn texture_failure_deletes_program_and_buffer() {
        let gl = MockGl::new();
        // Two shaders, the program and the vertex buffer.
        gl.fail_create_after(4);
        let result = TextureRender::new(&gl, &BundledAssets, bitmap());
        assert!(matches!(
            result,
            Err(GlsurfaceError::GlObject { kind: "texture", .. })
        ));
        assert_eq!(gl.live_objects(), 0);
    }
}
