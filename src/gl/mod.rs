//! The slice of the OpenGL ES 3.0 API this crate drives.
//!
//! Drawables never talk to a binding directly. They go through [`Gl`],
//! which is implemented for a real `glow` context ([`GlowDriver`]) and for
//! an in-memory recording driver ([`MockGl`]) that tracks live objects.
//!
//! All calls are expected on the thread that owns the current context.

/// `glow`-backed driver for a current GL context.
pub mod glow_backend;
/// In-memory driver that records calls and counts live objects.
pub mod mock;

use std::fmt;

pub use glow_backend::GlowDriver;
pub use mock::MockGl;

/// `GL_NO_ERROR`.
pub const NO_ERROR: u32 = 0;
/// `GL_INVALID_ENUM`.
pub const INVALID_ENUM: u32 = 0x0500;
/// `GL_INVALID_VALUE`.
pub const INVALID_VALUE: u32 = 0x0501;
/// `GL_INVALID_OPERATION`.
pub const INVALID_OPERATION: u32 = 0x0502;
/// `GL_OUT_OF_MEMORY`.
pub const OUT_OF_MEMORY: u32 = 0x0505;
/// `GL_INVALID_FRAMEBUFFER_OPERATION`.
pub const INVALID_FRAMEBUFFER_OPERATION: u32 = 0x0506;

/// Programmable pipeline stage of a shader object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShaderStage {
    /// Vertex shader.
    Vertex,
    /// Fragment shader.
    Fragment,
}

impl fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Vertex => f.write_str("vertex"),
            Self::Fragment => f.write_str("fragment"),
        }
    }
}

/// Buffer binding point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BufferTarget {
    /// `GL_ARRAY_BUFFER`, vertex attributes.
    Array,
    /// `GL_ELEMENT_ARRAY_BUFFER`, primitive indices.
    ElementArray,
}

/// Data store usage hint passed to `glBufferData`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BufferUsage {
    /// Uploaded once, drawn many times.
    StaticDraw,
    /// Re-uploaded before (almost) every draw.
    StreamDraw,
}

/// Primitive assembly mode for draw calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Primitive {
    /// Independent triangles.
    Triangles,
    /// Triangle strip.
    TriangleStrip,
}

/// Pixel rectangle handed to `glViewport`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Viewport {
    /// Left edge in pixels.
    pub x: i32,
    /// Bottom edge in pixels.
    pub y: i32,
    /// Width in pixels.
    pub width: i32,
    /// Height in pixels.
    pub height: i32,
}

impl Viewport {
    /// A viewport covering a whole `width` x `height` surface.
    #[must_use]
    pub fn full(width: u32, height: u32) -> Self {
        Self {
            x: 0,
            y: 0,
            width: width as i32,
            height: height as i32,
        }
    }
}

/// Driver calls consumed by the drawables and the renderer.
///
/// Object-creating calls return `Err` with the driver's message when the
/// driver hands back no name. Location queries return `None` for inputs the
/// linked program does not expose.
pub trait Gl {
    /// Shader object name.
    type Shader: Copy + fmt::Debug;
    /// Program object name.
    type Program: Copy + fmt::Debug;
    /// Buffer object name.
    type Buffer: Copy + fmt::Debug;
    /// Vertex array object name.
    type VertexArray: Copy + fmt::Debug;
    /// Texture object name.
    type Texture: Copy + fmt::Debug;
    /// Uniform location inside a linked program.
    type UniformLocation: Clone + fmt::Debug;

    /// `glCreateShader`.
    fn create_shader(&self, stage: ShaderStage) -> Result<Self::Shader, String>;
    /// `glShaderSource`.
    fn shader_source(&self, shader: Self::Shader, source: &str);
    /// `glCompileShader`.
    fn compile_shader(&self, shader: Self::Shader);
    /// `GL_COMPILE_STATUS`.
    fn shader_compile_status(&self, shader: Self::Shader) -> bool;
    /// `glGetShaderInfoLog`.
    fn shader_info_log(&self, shader: Self::Shader) -> String;
    /// `glDeleteShader`.
    fn delete_shader(&self, shader: Self::Shader);

    /// `glCreateProgram`.
    fn create_program(&self) -> Result<Self::Program, String>;
    /// `glAttachShader`.
    fn attach_shader(&self, program: Self::Program, shader: Self::Shader);
    /// `glLinkProgram`.
    fn link_program(&self, program: Self::Program);
    /// `GL_LINK_STATUS`.
    fn program_link_status(&self, program: Self::Program) -> bool;
    /// `glGetProgramInfoLog`.
    fn program_info_log(&self, program: Self::Program) -> String;
    /// `glUseProgram`; `None` unbinds.
    fn use_program(&self, program: Option<Self::Program>);
    /// `glDeleteProgram`.
    fn delete_program(&self, program: Self::Program);
    /// `glGetAttribLocation`.
    fn attrib_location(&self, program: Self::Program, name: &str) -> Option<u32>;
    /// `glGetUniformLocation`.
    fn uniform_location(
        &self,
        program: Self::Program,
        name: &str,
    ) -> Option<Self::UniformLocation>;

    /// `glGenBuffers` for a single name.
    fn create_buffer(&self) -> Result<Self::Buffer, String>;
    /// `glBindBuffer`; `None` unbinds.
    fn bind_buffer(&self, target: BufferTarget, buffer: Option<Self::Buffer>);
    /// `glBufferData` into whatever is bound at `target`.
    fn buffer_data(&self, target: BufferTarget, data: &[u8], usage: BufferUsage);
    /// `glDeleteBuffers` for a single name.
    fn delete_buffer(&self, buffer: Self::Buffer);

    /// `glGenVertexArrays` for a single name.
    fn create_vertex_array(&self) -> Result<Self::VertexArray, String>;
    /// `glBindVertexArray`; `None` unbinds.
    fn bind_vertex_array(&self, vertex_array: Option<Self::VertexArray>);
    /// `glDeleteVertexArrays` for a single name.
    fn delete_vertex_array(&self, vertex_array: Self::VertexArray);

    /// `glEnableVertexAttribArray`.
    fn enable_vertex_attrib_array(&self, index: u32);
    /// `glDisableVertexAttribArray`.
    fn disable_vertex_attrib_array(&self, index: u32);
    /// `glVertexAttribPointer` for non-normalized `GL_FLOAT` components,
    /// reading from the bound array buffer at byte `offset`.
    fn vertex_attrib_pointer_f32(&self, index: u32, size: i32, stride: i32, offset: i32);

    /// `glUniform4fv` with a count of one.
    fn uniform_4_f32(&self, location: Option<&Self::UniformLocation>, value: &[f32; 4]);
    /// `glUniformMatrix4fv` with a count of one, column-major, no transpose.
    fn uniform_matrix_4_f32(
        &self,
        location: Option<&Self::UniformLocation>,
        value: &[f32; 16],
    );
    /// `glUniform1i`.
    fn uniform_1_i32(&self, location: Option<&Self::UniformLocation>, value: i32);

    /// `glGenTextures` for a single name.
    fn create_texture(&self) -> Result<Self::Texture, String>;
    /// `glActiveTexture(GL_TEXTURE0 + unit)`.
    fn active_texture(&self, unit: u32);
    /// `glBindTexture(GL_TEXTURE_2D, ..)`; `None` unbinds.
    fn bind_texture_2d(&self, texture: Option<Self::Texture>);
    /// `GL_LINEAR` min and mag filter on the bound 2D texture.
    fn texture_2d_linear_filtering(&self);
    /// `glTexImage2D` level 0, `GL_RGBA` / `GL_UNSIGNED_BYTE`.
    fn tex_image_2d_rgba(&self, width: u32, height: u32, pixels: &[u8]);
    /// `glDeleteTextures` for a single name.
    fn delete_texture(&self, texture: Self::Texture);

    /// `glClearColor`.
    fn clear_color(&self, rgba: [f32; 4]);
    /// `glClear(GL_COLOR_BUFFER_BIT)`.
    fn clear_color_buffer(&self);
    /// `glViewport`.
    fn viewport(&self, viewport: Viewport);
    /// `glDrawArrays`.
    fn draw_arrays(&self, mode: Primitive, first: i32, count: i32);
    /// `glDrawElements` with `GL_UNSIGNED_INT` indices read from the bound
    /// element buffer at byte `offset`.
    fn draw_elements_u32(&self, mode: Primitive, count: i32, offset: i32);
    /// `glGetError`, which also clears the reported flag.
    fn get_error(&self) -> u32;
}

/// Human-readable name of a `glGetError` code.
#[must_use]
pub fn error_name(code: u32) -> &'static str {
    match code {
        NO_ERROR => "GL_NO_ERROR",
        INVALID_ENUM => "GL_INVALID_ENUM",
        INVALID_VALUE => "GL_INVALID_VALUE",
        INVALID_OPERATION => "GL_INVALID_OPERATION",
        OUT_OF_MEMORY => "GL_OUT_OF_MEMORY",
        INVALID_FRAMEBUFFER_OPERATION => "GL_INVALID_FRAMEBUFFER_OPERATION",
        _ => "unknown GL error",
    }
}

/// Poll `glGetError` once and log anything pending.
///
/// Returns the code when one was pending. Only a single poll happens, so
/// further queued flags stay queued for the next frame.
pub fn check_error<G: Gl + ?Sized>(gl: &G, context: &str) -> Option<u32> {
    let code = gl.get_error();
    if code == NO_ERROR {
        return None;
    }
    log::error!("OpenGL error after {context}: {} (0x{code:04X})", error_name(code));
    Some(code)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_names() {
        assert_eq!(error_name(INVALID_OPERATION), "GL_INVALID_OPERATION");
        assert_eq!(error_name(0x1234), "unknown GL error");
    }

    #[test]
    fn check_error_reports_single_poll() {
        let gl = MockGl::new();
        gl.raise_error(INVALID_VALUE);
        gl.raise_error(INVALID_ENUM);
        assert_eq!(check_error(&gl, "test"), Some(INVALID_VALUE));
        assert_eq!(check_error(&gl, "test"), Some(INVALID_ENUM));
        assert_eq!(check_error(&gl, "test"), None);
    }

    #[test]
    fn full_viewport() {
        let vp = Viewport::full(640, 480);
        assert_eq!(
            vp,
            Viewport {
                x: 0,
                y: 0,
                width: 640,
                height: 480
            }
        );
    }
}
