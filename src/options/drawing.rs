use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::{geometry::TRIANGLE_COLOR, projection::FitMode};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
/// Flat-color triangle settings.
pub struct TriangleOptions {
    /// RGBA uniform color.
    pub color: [f32; 4],
}

impl Default for TriangleOptions {
    fn default() -> Self {
        Self {
            color: TRIANGLE_COLOR,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
/// Textured quad settings.
pub struct TextureOptions {
    /// How the image's aspect ratio is preserved.
    pub fit: FitMode,
    /// Image file to show instead of the bundled one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
/// Where shader sources come from.
pub struct AssetOptions {
    /// Directory holding the GLSL files; the bundled copies are used when
    /// unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shader_dir: Option<PathBuf>,
}
