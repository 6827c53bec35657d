//! Bundled text and image assets.
//!
//! Shader sources are looked up by file name through an [`AssetSource`]:
//! either a directory on disk ([`AssetDir`]) or the copies compiled into
//! the crate ([`BundledAssets`]).

use std::{
    fs,
    io::{self, BufRead, BufReader},
    path::{Path, PathBuf},
};

/// Vertex shader of the flat-color triangle.
pub const TRIANGLE_VERTEX: &str = "triangle_vertex.glsl";
/// Fragment shader of the flat-color triangle.
pub const TRIANGLE_FRAGMENT: &str = "triangle_fragment.glsl";
/// Vertex shader of the textured quad.
pub const TEXTURE_VERTEX: &str = "texture_vertex_shader.glsl";
/// Fragment shader of the textured quad.
pub const TEXTURE_FRAGMENT: &str = "texture_fragment_shader.glsl";

/// Encoded demo image shipped with the crate.
pub const DEFAULT_IMAGE_PNG: &[u8] = include_bytes!("../assets/textures/android_logo.png");

/// Something that can hand out named text assets.
pub trait AssetSource {
    /// Read the whole asset `name` as UTF-8 text.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the asset does not exist or is not valid
    /// UTF-8.
    fn read_to_string(&self, name: &str) -> io::Result<String>;
}

/// Assets read from a directory, e.g. `assets/shaders`.
#[derive(Debug, Clone)]
pub struct AssetDir {
    root: PathBuf,
}

impl AssetDir {
    /// Serve assets from `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Directory the assets are read from.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl AssetSource for AssetDir {
    fn read_to_string(&self, name: &str) -> io::Result<String> {
        let file = fs::File::open(self.root.join(name))?;
        concat_lines(BufReader::new(file))
    }
}

/// The four GLSL files compiled into the crate.
#[derive(Debug, Clone, Copy, Default)]
pub struct BundledAssets;

impl AssetSource for BundledAssets {
    fn read_to_string(&self, name: &str) -> io::Result<String> {
        let text = match name {
            TRIANGLE_VERTEX => include_str!("../assets/shaders/triangle_vertex.glsl"),
            TRIANGLE_FRAGMENT => include_str!("../assets/shaders/triangle_fragment.glsl"),
            TEXTURE_VERTEX => include_str!("../assets/shaders/texture_vertex_shader.glsl"),
            TEXTURE_FRAGMENT => {
                include_str!("../assets/shaders/texture_fragment_shader.glsl")
            }
            _ => {
                return Err(io::Error::new(
                    io::ErrorKind::NotFound,
                    format!("no bundled asset named '{name}'"),
                ))
            }
        };
        concat_lines(text.as_bytes())
    }
}

/// Re-join `reader` line by line, terminating every line with `\n`.
fn concat_lines(reader: impl BufRead) -> io::Result<String> {
    let mut out = String::new();
    for line in reader.lines() {
        out.push_str(&line?);
        out.push('\n');
    }
    Ok(out)
}

/// Load a shader source, logging and returning an empty string on failure.
///
/// An empty source then fails compilation, which is where the drawable
/// notices the problem.
pub fn load_shader_source(assets: &dyn AssetSource, name: &str) -> String {
    match assets.read_to_string(name) {
        Ok(source) => source,
        Err(e) => {
            log::error!("Failed to read shader asset '{name}': {e}");
            String::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bundled_sources_are_line_terminated() {
        for name in [
            TRIANGLE_VERTEX,
            TRIANGLE_FRAGMENT,
            TEXTURE_VERTEX,
            TEXTURE_FRAGMENT,
        ] {
            let src = BundledAssets.read_to_string(name).unwrap();
            assert!(src.starts_with("#version 300 es"), "{name}");
            assert!(src.ends_with('\n'));
            assert!(!src.contains('\r'));
        }
    }

    #[test]
    fn crlf_is_normalized() {
        let text = concat_lines("a\r\nb".as_bytes()).unwrap();
        assert_eq!(text, "a\nb\n");
    }

    #[test]
    fn missing_asset_loads_as_empty() {
        assert_eq!(load_shader_source(&BundledAssets, "nope.glsl"), "");
        let dir = AssetDir::new("/definitely/not/here");
        assert_eq!(load_shader_source(&dir, TRIANGLE_VERTEX), "");
    }

    #[test]
    fn asset_dir_matches_bundled_copy() {
        let dir = AssetDir::new(concat!(env!("CARGO_MANIFEST_DIR"), "/assets/shaders"));
        assert!(dir.root().ends_with("assets/shaders"));
        assert_eq!(
            dir.read_to_string(TEXTURE_VERTEX).unwrap(),
            BundledAssets.read_to_string(TEXTURE_VERTEX).unwrap()
        );
    }
}
