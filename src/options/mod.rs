//! Demo options with TOML preset support.
//!
//! Everything the renderer can be told from outside (scene, colors, fit
//! mode, image and shader locations) lives here. Options serialize to/from
//! TOML for the presets stored in `assets/presets/`.

mod drawing;
mod surface;

use std::path::Path;

pub use drawing::{AssetOptions, TextureOptions, TriangleOptions};
use serde::{Deserialize, Serialize};
pub use surface::{Scene, SurfaceOptions};

use crate::error::GlsurfaceError;

/// Top-level options container. All sections use `#[serde(default)]` so
/// partial TOML files (e.g. only overriding `[triangle]`) work correctly.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct Options {
    /// Clear color and scene selection.
    pub surface: SurfaceOptions,
    /// Triangle color.
    pub triangle: TriangleOptions,
    /// Textured quad fit mode and image.
    pub texture: TextureOptions,
    /// Shader source location.
    pub assets: AssetOptions,
}

impl Options {
    /// Load options from a TOML file. Missing fields use defaults.
    ///
    /// # Errors
    ///
    /// [`GlsurfaceError::Io`] if the file cannot be read,
    /// [`GlsurfaceError::OptionsParse`] if it is not valid options TOML.
    pub fn load(path: &Path) -> Result<Self, GlsurfaceError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Parse options from TOML text.
    ///
    /// # Errors
    ///
    /// [`GlsurfaceError::OptionsParse`] on malformed input.
    pub fn from_toml(content: &str) -> Result<Self, GlsurfaceError> {
        toml::from_str(content).map_err(|e| GlsurfaceError::OptionsParse(e.to_string()))
    }

    /// Save options to a TOML file (pretty-printed).
    ///
    /// # Errors
    ///
    /// [`GlsurfaceError::OptionsParse`] if serialization fails,
    /// [`GlsurfaceError::Io`] if the file cannot be written.
    pub fn save(&self, path: &Path) -> Result<(), GlsurfaceError> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| GlsurfaceError::OptionsParse(e.to_string()))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, content)?;
        Ok(())
    }

    /// List available preset names (TOML file stems) in a directory.
    #[must_use]
    pub fn list_presets(dir: &Path) -> Vec<String> {
        let mut names = Vec::new();
        if let Ok(entries) = std::fs::read_dir(dir) {
            for entry in entries.flatten() {
                let path = entry.path();
                if path.extension().is_some_and(|ext| ext == "toml") {
                    if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                        names.push(stem.to_owned());
                    }
                }
            }
        }
        names.sort();
        names
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;
    use crate::{drawable::Submission, projection::FitMode};

    fn presets_dir() -> PathBuf {
        Path::new(env!("CARGO_MANIFEST_DIR")).join("assets/presets")
    }

    #[test]
    fn default_round_trips_through_toml() {
        let opts = Options::default();
        let toml_str = toml::to_string_pretty(&opts).unwrap();
        let parsed: Options = toml::from_str(&toml_str).unwrap();
        assert_eq!(opts, parsed);
    }

    #[test]
    fn paths_round_trip() {
        let mut opts = Options::default();
        opts.texture.image = Some(PathBuf::from("photos/wide.png"));
        opts.assets.shader_dir = Some(PathBuf::from("assets/shaders"));
        let parsed = Options::from_toml(&toml::to_string_pretty(&opts).unwrap()).unwrap();
        assert_eq!(opts, parsed);
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let toml_str = r#"
[surface]
scene = "triangle_vbo"
"#;
        let opts = Options::from_toml(toml_str).unwrap();
        assert_eq!(opts.surface.scene, Scene::TriangleVbo);
        // Everything else should be default
        assert_eq!(opts.surface.clear_color, [1.0, 1.0, 1.0, 1.0]);
        assert_eq!(opts.triangle.color, [0.0, 1.0, 0.0, 1.0]);
        assert_eq!(opts.texture.fit, FitMode::Orthographic);
        assert!(opts.texture.image.is_none());
    }

    #[test]
    fn unknown_scene_is_a_parse_error() {
        let err = Options::from_toml("[surface]\nscene = \"cube\"\n").unwrap_err();
        assert!(matches!(err, GlsurfaceError::OptionsParse(_)));
    }

    #[test]
    fn scene_names_parse_back() {
        for scene in Scene::ALL {
            assert_eq!(scene.name().parse::<Scene>(), Ok(scene));
        }
        assert!("triangle".parse::<Scene>().is_err());
        assert_eq!(
            Scene::TriangleIndexed.submission(),
            Some(Submission::Indexed)
        );
        assert_eq!(Scene::Texture.submission(), None);
    }

    #[test]
    fn bundled_presets_load() {
        let dir = presets_dir();
        let names = Options::list_presets(&dir);
        assert!(names.contains(&"letterbox".to_owned()), "{names:?}");
        for name in names {
            let opts = Options::load(&dir.join(format!("{name}.toml")));
            assert!(opts.is_ok(), "{name}: {opts:?}");
        }
        let letterbox = Options::load(&dir.join("letterbox.toml")).unwrap();
        assert_eq!(letterbox.texture.fit, FitMode::Viewport);
    }

    #[test]
    fn save_then_load() {
        let path = std::env::temp_dir()
            .join(format!("glsurface-options-{}", std::process::id()))
            .join("saved.toml");
        let mut opts = Options::default();
        opts.surface.scene = Scene::Clear;
        opts.surface.clear_color = [0.1, 0.2, 0.3, 1.0];
        opts.save(&path).unwrap();
        assert_eq!(Options::load(&path).unwrap(), opts);
        let _ = std::fs::remove_dir_all(path.parent().unwrap());
    }
}
