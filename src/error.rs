//! Crate-level error types.

use std::fmt;

use crate::shader::ShaderError;

/// Errors produced by the glsurface crate.
#[derive(Debug)]
pub enum GlsurfaceError {
    /// Shader compilation or program link failure.
    Shader(ShaderError),
    /// The driver refused to create a GPU object.
    GlObject {
        /// Kind of object ("buffer", "texture", ...).
        kind: &'static str,
        /// Driver message.
        message: String,
    },
    /// Failed to decode an image into a bitmap.
    Image(image::ImageError),
    /// Generic I/O failure.
    Io(std::io::Error),
    /// A transform matrix with the wrong number of elements.
    InvalidMatrix {
        /// Number of elements received.
        len: usize,
    },
    /// TOML options parsing/serialization failure.
    OptionsParse(String),
    /// Viewer event-loop or context failure.
    Viewer(String),
}

impl fmt::Display for GlsurfaceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Shader(e) => write!(f, "shader error: {e}"),
            Self::GlObject { kind, message } => {
                write!(f, "failed to create GL {kind}: {message}")
            }
            Self::Image(e) => write!(f, "image decode error: {e}"),
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::InvalidMatrix { len } => {
                write!(f, "expected a 16-element matrix, got {len} elements")
            }
            Self::OptionsParse(msg) => {
                write!(f, "options parse error: {msg}")
            }
            Self::Viewer(msg) => write!(f, "viewer error: {msg}"),
        }
    }
}

impl std::error::Error for GlsurfaceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Shader(e) => Some(e),
            Self::Image(e) => Some(e),
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ShaderError> for GlsurfaceError {
    fn from(e: ShaderError) -> Self {
        Self::Shader(e)
    }
}

impl From<image::ImageError> for GlsurfaceError {
    fn from(e: image::ImageError) -> Self {
        Self::Image(e)
    }
}

impl From<std::io::Error> for GlsurfaceError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl GlsurfaceError {
    /// Wrap a driver creation failure for an object of `kind`.
    pub(crate) fn gl_object(kind: &'static str, message: String) -> Self {
        Self::GlObject { kind, message }
    }
}
