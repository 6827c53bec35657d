use std::fmt;

use super::{delete_with, Drawable};
use crate::{
    assets::{AssetSource, TRIANGLE_FRAGMENT, TRIANGLE_VERTEX},
    error::GlsurfaceError,
    geometry::{
        COORDS_PER_VERTEX, TRIANGLE_COLOR, TRIANGLE_COORDS, TRIANGLE_INDICES,
        TRIANGLE_VERTEX_COUNT,
    },
    gl::{BufferTarget, BufferUsage, Gl, Primitive},
    shader::program_from_assets,
};

const POSITION_ATTRIBUTE: &str = "vPosition";
const COLOR_UNIFORM: &str = "vColor";
const VERTEX_STRIDE: i32 = COORDS_PER_VERTEX * 4;
const INDEX_COUNT: i32 = TRIANGLE_INDICES.len() as i32;

/// How the triangle's vertices reach the GPU.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Submission {
    /// Host vertices are uploaded again on every draw into a stream buffer.
    Immediate,
    /// One static vertex buffer, drawn with `glDrawArrays`.
    Vbo,
    /// Static vertex buffer plus element buffer, drawn with `glDrawElements`.
    Indexed,
    /// A vertex array object captures the attribute pointer and the element
    /// buffer; drawing binds only the vertex array.
    VertexArray,
}

impl fmt::Display for Submission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Immediate => "immediate",
            Self::Vbo => "vbo",
            Self::Indexed => "indexed",
            Self::VertexArray => "vertex array",
        })
    }
}

/// Flat-colored triangle.
///
/// If the shader program fails to build the triangle is still created but
/// stays inert: its buffers exist, nothing is drawn.
pub struct Triangle<G: Gl> {
    submission: Submission,
    program: Option<G::Program>,
    vertex_buffer: Option<G::Buffer>,
    index_buffer: Option<G::Buffer>,
    vertex_array: Option<G::VertexArray>,
    position: Option<u32>,
    color_location: Option<G::UniformLocation>,
    color: [f32; 4],
}

impl<G: Gl> Triangle<G> {
    /// Build the program from `assets` and upload the vertex data the way
    /// `submission` requires.
    ///
    /// # Errors
    ///
    /// [`GlsurfaceError::GlObject`] if a buffer or vertex array cannot be
    /// created; anything allocated up to that point is deleted first. A
    /// shader failure is only logged.
    pub fn new(
        gl: &G,
        assets: &dyn AssetSource,
        submission: Submission,
    ) -> Result<Self, GlsurfaceError> {
        let mut triangle = Self {
            submission,
            program: None,
            vertex_buffer: None,
            index_buffer: None,
            vertex_array: None,
            position: None,
            color_location: None,
            color: TRIANGLE_COLOR,
        };

        match program_from_assets(gl, assets, TRIANGLE_VERTEX, TRIANGLE_FRAGMENT) {
            Ok(program) => {
                triangle.position = gl.attrib_location(program, POSITION_ATTRIBUTE);
                triangle.color_location = gl.uniform_location(program, COLOR_UNIFORM);
                if triangle.position.is_none() {
                    log::warn!("Attribute {POSITION_ATTRIBUTE} not found in triangle program");
                }
                if triangle.color_location.is_none() {
                    log::warn!("Uniform {COLOR_UNIFORM} not found in triangle program");
                }
                triangle.program = Some(program);
            }
            Err(e) => log::error!("Triangle program unavailable, drawing disabled: {e}"),
        }

        if let Err(e) = triangle.allocate(gl) {
            triangle.release(gl);
            return Err(e);
        }
        log::debug!("Triangle ready ({submission} submission)");
        Ok(triangle)
    }

    fn allocate(&mut self, gl: &G) -> Result<(), GlsurfaceError> {
        let vertices: &[u8] = bytemuck::cast_slice(&TRIANGLE_COORDS);
        let indices: &[u8] = bytemuck::cast_slice(&TRIANGLE_INDICES);

        let vbo = create_buffer(gl)?;
        self.vertex_buffer = Some(vbo);
        if self.submission == Submission::Immediate {
            return Ok(());
        }

        if self.submission == Submission::VertexArray {
            let vao = gl
                .create_vertex_array()
                .map_err(|msg| GlsurfaceError::gl_object("vertex array", msg))?;
            self.vertex_array = Some(vao);
            gl.bind_vertex_array(Some(vao));
        }

        gl.bind_buffer(BufferTarget::Array, Some(vbo));
        gl.buffer_data(BufferTarget::Array, vertices, BufferUsage::StaticDraw);

        if self.submission == Submission::Vbo {
            gl.bind_buffer(BufferTarget::Array, None);
            return Ok(());
        }

        let ebo = match create_buffer(gl) {
            Ok(ebo) => ebo,
            Err(e) => {
                gl.bind_vertex_array(None);
                gl.bind_buffer(BufferTarget::Array, None);
                return Err(e);
            }
        };
        self.index_buffer = Some(ebo);
        gl.bind_buffer(BufferTarget::ElementArray, Some(ebo));
        gl.buffer_data(BufferTarget::ElementArray, indices, BufferUsage::StaticDraw);

        if self.submission == Submission::VertexArray {
            self.point_position(gl);
            // The element binding is vertex array state; unbind the VAO first.
            gl.bind_vertex_array(None);
        }
        gl.bind_buffer(BufferTarget::Array, None);
        gl.bind_buffer(BufferTarget::ElementArray, None);
        Ok(())
    }

    /// Change the color used by subsequent draws.
    pub fn set_color(&mut self, rgba: [f32; 4]) {
        self.color = rgba;
    }

    /// The program linked and drawing is enabled.
    #[must_use]
    pub fn is_drawable(&self) -> bool {
        self.program.is_some()
    }

    fn point_position(&self, gl: &G) {
        if let Some(index) = self.position {
            gl.enable_vertex_attrib_array(index);
            gl.vertex_attrib_pointer_f32(index, COORDS_PER_VERTEX, VERTEX_STRIDE, 0);
        }
    }

    fn unpoint_position(&self, gl: &G) {
        if let Some(index) = self.position {
            gl.disable_vertex_attrib_array(index);
        }
    }
}

fn create_buffer<G: Gl>(gl: &G) -> Result<G::Buffer, GlsurfaceError> {
    gl.create_buffer()
        .map_err(|msg| GlsurfaceError::gl_object("buffer", msg))
}

impl<G: Gl> Drawable<G> for Triangle<G> {
    fn draw(&self, gl: &G) {
        let (Some(program), Some(vbo)) = (self.program, self.vertex_buffer) else {
            return;
        };
        gl.use_program(Some(program));

        match (self.submission, self.vertex_array) {
            (Submission::VertexArray, Some(vao)) => {
                gl.bind_vertex_array(Some(vao));
                gl.uniform_4_f32(self.color_location.as_ref(), &self.color);
                gl.draw_elements_u32(Primitive::Triangles, INDEX_COUNT, 0);
                gl.bind_vertex_array(None);
            }
            (Submission::Indexed, _) => {
                gl.bind_buffer(BufferTarget::Array, Some(vbo));
                gl.bind_buffer(BufferTarget::ElementArray, self.index_buffer);
                self.point_position(gl);
                gl.uniform_4_f32(self.color_location.as_ref(), &self.color);
                gl.draw_elements_u32(Primitive::Triangles, INDEX_COUNT, 0);
                self.unpoint_position(gl);
                gl.bind_buffer(BufferTarget::ElementArray, None);
                gl.bind_buffer(BufferTarget::Array, None);
            }
            (submission, _) => {
                gl.bind_buffer(BufferTarget::Array, Some(vbo));
                if submission == Submission::Immediate {
                    gl.buffer_data(
                        BufferTarget::Array,
                        bytemuck::cast_slice(&TRIANGLE_COORDS),
                        BufferUsage::StreamDraw,
                    );
                }
                self.point_position(gl);
                gl.uniform_4_f32(self.color_location.as_ref(), &self.color);
                gl.draw_arrays(Primitive::Triangles, 0, TRIANGLE_VERTEX_COUNT);
                self.unpoint_position(gl);
                gl.bind_buffer(BufferTarget::Array, None);
            }
        }

        gl.use_program(None);
    }

    fn release(&mut self, gl: &G) {
        if !self.holds_gpu_objects() {
            return;
        }
        delete_with(&mut self.vertex_array, |vao| gl.delete_vertex_array(vao));
        delete_with(&mut self.index_buffer, |b| gl.delete_buffer(b));
        delete_with(&mut self.vertex_buffer, |b| gl.delete_buffer(b));
        delete_with(&mut self.program, |p| gl.delete_program(p));
        self.position = None;
        self.color_location = None;
        log::debug!("Triangle ({} submission) released", self.submission);
    }

    fn holds_gpu_objects(&self) -> bool {
        self.program.is_some()
            || self.vertex_buffer.is_some()
            || self.index_buffer.is_some()
            || self.vertex_array.is_some()
    }
}

impl<G: Gl> Drop for Triangle<G> {
    fn drop(&mut self) {
        if self.holds_gpu_objects() {
            log::warn!(
                "Triangle ({} submission) dropped without release; GPU objects leaked",
                self.submission
            );
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
            ShaderStage,
        },
    };

    const ALL: [Submission; 4] = [
        Submission::Immediate,
        Submission::Vbo,
        Submission::Indexed,
        Submission::VertexArray,
    ];

    #[test]
    fn every_mode_releases_everything() {
        for submission in ALL {
            let gl = MockGl::new();
            let mut triangle = Triangle::new(&gl, &BundledAssets, submission).unwrap();
            assert!(triangle.is_drawable());
            assert_eq!(gl.live_programs(), 1);
            assert_eq!(gl.live_shaders(), 0);

            triangle.draw(&gl);
            triangle.release(&gl);
            assert_eq!(gl.live_objects(), 0, "{submission}");
            assert_eq!(gl.stale_deletes(), 0, "{submission}");
            assert_eq!(gl.get_error(), crate::gl::NO_ERROR, "{submission}");
        }
    }

    #[test]
    fn object_counts_per_mode() {
        let expected = [
            (Submission::Immediate, 1, 0),
            (Submission::Vbo, 1, 0),
            (Submission::Indexed, 2, 0),
            (Submission::VertexArray, 2, 1),
        ];
        for (submission, buffers, vaos) in expected {
            let gl = MockGl::new();
            let mut triangle = Triangle::new(&gl, &BundledAssets, submission).unwrap();
            assert_eq!(gl.live_buffers(), buffers, "{submission}");
            assert_eq!(gl.live_vertex_arrays(), vaos, "{submission}");
            triangle.release(&gl);
        }
    }

    #[test]
    fn immediate_mode_uploads_every_draw() {
        let gl = MockGl::new();
        let mut triangle = Triangle::new(&gl, &BundledAssets, Submission::Immediate).unwrap();
        let vbo = triangle.vertex_buffer.unwrap();
        assert_eq!(gl.buffer_len(vbo), Some(0));
        gl.clear_calls();
        triangle.draw(&gl);
        triangle.draw(&gl);
        let uploads = gl
            .calls()
            .into_iter()
            .filter(|c| {
                *c == Call::BufferData(BufferTarget::Array, 36, BufferUsage::StreamDraw)
            })
            .count();
        assert_eq!(uploads, 2);
        assert_eq!(gl.buffer_len(vbo), Some(36));
        assert_eq!(gl.draw_count(), 2);
        triangle.release(&gl);
    }

    #[test]
    fn vertex_array_draw_binds_only_the_vao() {
        let gl = MockGl::new();
        let mut triangle =
            Triangle::new(&gl, &BundledAssets, Submission::VertexArray).unwrap();
        let vao = triangle.vertex_array.unwrap();
        let program = triangle.program.unwrap();
        gl.clear_calls();

        triangle.set_color([1.0, 0.0, 0.0, 1.0]);
        triangle.draw(&gl);
        assert_eq!(
            gl.calls(),
            vec![
                Call::UseProgram(Some(program)),
                Call::BindVertexArray(Some(vao)),
                Call::Uniform4(triangle.color_location, [1.0, 0.0, 0.0, 1.0]),
                Call::DrawElements {
                    mode: Primitive::Triangles,
                    count: 3,
                    offset: 0
                },
                Call::BindVertexArray(None),
                Call::UseProgram(None),
            ]
        );
        triangle.release(&gl);
    }

    #[test]
    fn indexed_mode_draws_elements() {
        let gl = MockGl::new();
        let mut triangle = Triangle::new(&gl, &BundledAssets, Submission::Indexed).unwrap();
        let ebo = triangle.index_buffer.unwrap();
        assert_eq!(gl.buffer_len(ebo), Some(12));
        gl.clear_calls();

        triangle.draw(&gl);
        let calls = gl.calls();
        let bind = calls
            .iter()
            .position(|c| *c == Call::BindBuffer(BufferTarget::ElementArray, Some(ebo)))
            .unwrap();
        let draw = calls
            .iter()
            .position(|c| {
                *c == Call::DrawElements {
                    mode: Primitive::Triangles,
                    count: 3,
                    offset: 0,
                }
            })
            .unwrap();
        assert!(bind < draw);
        assert!(!calls.iter().any(|c| matches!(c, Call::DrawArrays { .. })));
        assert_eq!(gl.get_error(), crate::gl::NO_ERROR);
        triangle.release(&gl);
    }

    #[test]
    fn vertex_array_keeps_element_buffer_after_unbind() {
        let gl = MockGl::new();
        let mut triangle =
            Triangle::new(&gl, &BundledAssets, Submission::VertexArray).unwrap();
        // Setup ends with the default vertex array's element binding cleared.
        triangle.draw(&gl);
        assert_eq!(gl.draw_count(), 1);
        assert_eq!(gl.get_error(), crate::gl::NO_ERROR);
        triangle.release(&gl);
    }

    #[test]
    fn vao_setup_unbinds_vao_before_element_buffer() {
        let gl = MockGl::new();
        let mut triangle =
            Triangle::new(&gl, &BundledAssets, Submission::VertexArray).unwrap();
        let calls = gl.calls();
        let vao_unbind = calls
            .iter()
            .position(|c| *c == Call::BindVertexArray(None))
            .unwrap();
        let ebo_unbind = calls
            .iter()
            .position(|c| *c == Call::BindBuffer(BufferTarget::ElementArray, None))
            .unwrap();
        assert!(vao_unbind < ebo_unbind);
        triangle.release(&gl);
    }

    #[test]
    fn vbo_mode_draws_arrays() {
        let gl = MockGl::new();
        let mut triangle = Triangle::new(&gl, &BundledAssets, Submission::Vbo).unwrap();
        gl.clear_calls();
        triangle.draw(&gl);
        let calls = gl.calls();
        assert!(calls.contains(&Call::AttribPointer {
            index: 0,
            size: 3,
            stride: 12,
            offset: 0
        }));
        assert!(calls.contains(&Call::DrawArrays {
            mode: Primitive::Triangles,
            first: 0,
            count: 3
        }));
        assert_eq!(calls.last(), Some(&Call::UseProgram(None)));
        triangle.release(&gl);
    }

    #[test]
    fn draw_after_release_is_a_noop() {
        let gl = MockGl::new();
        let mut triangle = Triangle::new(&gl, &BundledAssets, Submission::Indexed).unwrap();
        triangle.release(&gl);
        gl.clear_calls();
        triangle.draw(&gl);
        assert!(gl.calls().is_empty());
    }

    #[test]
    fn release_twice_deletes_once() {
        let gl = MockGl::new();
        let mut triangle =
            Triangle::new(&gl, &BundledAssets, Submission::VertexArray).unwrap();
        triangle.release(&gl);
        triangle.release(&gl);
        assert!(!triangle.holds_gpu_objects());
        assert_eq!(gl.stale_deletes(), 0);
    }

    #[test]
    fn shader_failure_leaves_triangle_inert() {
        let gl = MockGl::new();
        gl.fail_compile(ShaderStage::Fragment);
        let mut triangle = Triangle::new(&gl, &BundledAssets, Submission::Vbo).unwrap();
        assert!(!triangle.is_drawable());
        assert_eq!(gl.live_shaders(), 0);
        assert_eq!(gl.live_programs(), 0);

        triangle.draw(&gl);
        assert_eq!(gl.draw_count(), 0);
        triangle.release(&gl);
        assert_eq!(gl.live_objects(), 0);
    }

    #[test]
    fn buffer_failure_cleans_up_partial_objects() {
        let gl = MockGl::new();
        // Two shaders, the program, the vertex array and the vertex buffer.
        gl.fail_create_after(5);
        let result = Triangle::new(&gl, &BundledAssets, Submission::VertexArray);
        assert!(matches!(
            result,
            Err(GlsurfaceError::GlObject { kind: "buffer", .. })
        ));
        assert_eq!(gl.live_objects(), 0);
        assert_eq!(gl.stale_deletes(), 0);
    }
}
