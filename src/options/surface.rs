use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::drawable::Submission;

/// Which stage of the demo is rendered.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum Scene {
    /// Only clear the surface.
    Clear,
    /// Triangle re-uploaded from host memory each frame.
    TriangleImmediate,
    /// Triangle from a static vertex buffer.
    TriangleVbo,
    /// Triangle from vertex and element buffers.
    TriangleIndexed,
    /// Triangle from a vertex array object.
    TriangleVertexArray,
    /// Textured quad.
    #[default]
    Texture,
}

impl Scene {
    /// Every scene, in tutorial order.
    pub const ALL: [Self; 6] = [
        Self::Clear,
        Self::TriangleImmediate,
        Self::TriangleVbo,
        Self::TriangleIndexed,
        Self::TriangleVertexArray,
        Self::Texture,
    ];

    /// Name used in TOML and on the command line.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Clear => "clear",
            Self::TriangleImmediate => "triangle_immediate",
            Self::TriangleVbo => "triangle_vbo",
            Self::TriangleIndexed => "triangle_indexed",
            Self::TriangleVertexArray => "triangle_vertex_array",
            Self::Texture => "texture",
        }
    }

    /// Submission mode for the triangle scenes.
    #[must_use]
    pub const fn submission(self) -> Option<Submission> {
        match self {
            Self::TriangleImmediate => Some(Submission::Immediate),
            Self::TriangleVbo => Some(Submission::Vbo),
            Self::TriangleIndexed => Some(Submission::Indexed),
            Self::TriangleVertexArray => Some(Submission::VertexArray),
            Self::Clear | Self::Texture => None,
        }
    }
}

impl fmt::Display for Scene {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Scene {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|scene| scene.name() == s)
            .ok_or_else(|| {
                let names: Vec<_> = Self::ALL.iter().map(|s| s.name()).collect();
                format!("unknown scene '{s}', expected one of: {}", names.join(", "))
            })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
/// Surface-wide settings.
pub struct SurfaceOptions {
    /// RGBA color the surface is cleared to every frame.
    pub clear_color: [f32; 4],
    /// Demo stage to render.
    pub scene: Scene,
}

impl Default for SurfaceOptions {
    fn default() -> Self {
        Self {
            clear_color: [1.0, 1.0, 1.0, 1.0],
            scene: Scene::default(),
        }
    }
}
