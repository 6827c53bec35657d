//! GLSL compile and link helpers.
//!
//! [`create_program`] compiles a vertex and a fragment shader, links them
//! and deletes the individual shader objects again. Whatever step fails, the
//! driver's diagnostic is logged and every object created so far is deleted
//! before the error is returned.

use std::fmt;

use crate::{
    assets::{load_shader_source, AssetSource},
    gl::{Gl, ShaderStage},
};

/// Why a program could not be built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShaderError {
    /// The driver handed back no shader or program name.
    Create(String),
    /// A shader failed to compile.
    Compile {
        /// Stage that failed.
        stage: ShaderStage,
        /// Driver info log.
        log: String,
    },
    /// The program failed to link.
    Link {
        /// Driver info log.
        log: String,
    },
}

impl fmt::Display for ShaderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Create(msg) => write!(f, "object creation failed: {msg}"),
            Self::Compile { stage, log } => {
                write!(f, "{stage} shader failed to compile: {}", log.trim_end())
            }
            Self::Link { log } => {
                write!(f, "program failed to link: {}", log.trim_end())
            }
        }
    }
}

impl std::error::Error for ShaderError {}

/// Create and compile one shader object.
///
/// On failure the shader object is deleted before returning.
///
/// # Errors
///
/// [`ShaderError::Create`] if the driver returns no name,
/// [`ShaderError::Compile`] if the compile status is false.
pub fn compile_shader<G: Gl + ?Sized>(
    gl: &G,
    stage: ShaderStage,
    source: &str,
) -> Result<G::Shader, ShaderError> {
    let shader = gl.create_shader(stage).map_err(ShaderError::Create)?;
    gl.shader_source(shader, source);
    gl.compile_shader(shader);
    if gl.shader_compile_status(shader) {
        return Ok(shader);
    }

    let log = gl.shader_info_log(shader);
    log::error!("Failed to compile {stage} shader: {}", log.trim_end());
    gl.delete_shader(shader);
    Err(ShaderError::Compile { stage, log })
}

/// Compile both stages and link them into a program.
///
/// The shader objects are deleted once linked; the returned program is the
/// only live object and belongs to the caller.
///
/// # Errors
///
/// Any [`ShaderError`]; no objects stay alive in that case.
pub fn create_program<G: Gl + ?Sized>(
    gl: &G,
    vertex_source: &str,
    fragment_source: &str,
) -> Result<G::Program, ShaderError> {
    let vs = compile_shader(gl, ShaderStage::Vertex, vertex_source)?;
    let fs = match compile_shader(gl, ShaderStage::Fragment, fragment_source) {
        Ok(fs) => fs,
        Err(e) => {
            gl.delete_shader(vs);
            return Err(e);
        }
    };

    let program = match gl.create_program() {
        Ok(p) => p,
        Err(msg) => {
            log::error!("Failed to create GL program: {msg}");
            gl.delete_shader(vs);
            gl.delete_shader(fs);
            return Err(ShaderError::Create(msg));
        }
    };

    gl.attach_shader(program, vs);
    gl.attach_shader(program, fs);
    gl.link_program(program);

    if !gl.program_link_status(program) {
        let log = gl.program_info_log(program);
        log::error!("Failed to link program: {}", log.trim_end());
        gl.delete_program(program);
        gl.delete_shader(vs);
        gl.delete_shader(fs);
        return Err(ShaderError::Link { log });
    }

    gl.delete_shader(vs);
    gl.delete_shader(fs);
    log::info!("GL program created successfully");
    Ok(program)
}

/// Load two shader assets by name and build a program from them.
///
/// # Errors
///
/// Any [`ShaderError`]. A missing asset reads as empty source and fails
/// compilation.
pub fn program_from_assets<G: Gl + ?Sized>(
    gl: &G,
    assets: &dyn AssetSource,
    vertex_name: &str,
    fragment_name: &str,
) -> Result<G::Program, ShaderError> {
    let vertex_source = load_shader_source(assets, vertex_name);
    let fragment_source = load_shader_source(assets, fragment_name);
    create_program(gl, &vertex_source, &fragment_source)
}
