//! Decoded images and their upload into GL textures.

use std::path::Path;

use crate::{error::GlsurfaceError, gl::Gl};

/// A decoded, unscaled RGBA8 image waiting to be uploaded.
///
/// [`upload_texture`] takes the bitmap by value, so its pixel memory is
/// freed as soon as the GPU copy exists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bitmap {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl Bitmap {
    /// Wrap raw RGBA8 pixels, top row first.
    ///
    /// Returns `None` if the pixel count does not match the dimensions or
    /// either dimension is zero.
    #[must_use]
    pub fn from_rgba(width: u32, height: u32, pixels: Vec<u8>) -> Option<Self> {
        let expected = (width as usize)
            .checked_mul(height as usize)?
            .checked_mul(4)?;
        (width > 0 && height > 0 && pixels.len() == expected).then_some(Self {
            width,
            height,
            pixels,
        })
    }

    /// Decode an encoded image (PNG) held in memory.
    ///
    /// # Errors
    ///
    /// [`GlsurfaceError::Image`] if the bytes are not a supported image.
    pub fn decode(bytes: &[u8]) -> Result<Self, GlsurfaceError> {
        let rgba = image::load_from_memory(bytes)?.to_rgba8();
        Ok(Self::from_image(rgba))
    }

    /// Decode an image file.
    ///
    /// # Errors
    ///
    /// [`GlsurfaceError::Image`] if the file cannot be read or decoded.
    pub fn open(path: &Path) -> Result<Self, GlsurfaceError> {
        let rgba = image::open(path)?.to_rgba8();
        log::debug!(
            "Decoded {} ({}x{})",
            path.display(),
            rgba.width(),
            rgba.height()
        );
        Ok(Self::from_image(rgba))
    }

    fn from_image(rgba: image::RgbaImage) -> Self {
        Self {
            width: rgba.width(),
            height: rgba.height(),
            pixels: rgba.into_raw(),
        }
    }

    /// Width in pixels.
    #[must_use]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    #[must_use]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Width divided by height.
    #[must_use]
    pub fn aspect_ratio(&self) -> f32 {
        self.width as f32 / self.height as f32
    }

    /// RGBA8 pixel data, top row first.
    #[must_use]
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }
}

/// Create a linear-filtered 2D texture from `bitmap` and drop the bitmap.
///
/// The texture is unbound again before returning.
///
/// # Errors
///
/// [`GlsurfaceError::GlObject`] if the driver hands back no texture name.
pub fn upload_texture<G: Gl + ?Sized>(
    gl: &G,
    bitmap: Bitmap,
) -> Result<G::Texture, GlsurfaceError> {
    let texture = gl
        .create_texture()
        .map_err(|msg| GlsurfaceError::gl_object("texture", msg))?;

    gl.bind_texture_2d(Some(texture));
    gl.texture_2d_linear_filtering();
    gl.tex_image_2d_rgba(bitmap.width, bitmap.height, &bitmap.pixels);
    gl.bind_texture_2d(None);

    log::debug!("Uploaded {}x{} texture", bitmap.width, bitmap.height);
    drop(bitmap);
    Ok(texture)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        assets::DEFAULT_IMAGE_PNG,
        gl::{mock::Call, MockGl},
    };

    #[test]
    fn from_rgba_validates_length() {
        assert!(Bitmap::from_rgba(2, 2, vec![0; 16]).is_some());
        assert!(Bitmap::from_rgba(2, 2, vec![0; 15]).is_none());
        assert!(Bitmap::from_rgba(0, 2, Vec::new()).is_none());
    }

    #[test]
    fn bundled_image_decodes() {
        let bitmap = Bitmap::decode(DEFAULT_IMAGE_PNG).unwrap();
        assert_eq!((bitmap.width(), bitmap.height()), (96, 64));
        assert!((bitmap.aspect_ratio() - 1.5).abs() < 1e-6);
        assert_eq!(bitmap.pixels().len(), 96 * 64 * 4);
    }

    #[test]
    fn garbage_is_an_image_error() {
        assert!(matches!(
            Bitmap::decode(b"not an image"),
            Err(GlsurfaceError::Image(_))
        ));
    }

    #[test]
    fn upload_binds_filters_and_unbinds() {
        let gl = MockGl::new();
        let bitmap = Bitmap::from_rgba(4, 2, vec![255; 32]).unwrap();
        let texture = upload_texture(&gl, bitmap).unwrap();
        assert_eq!(gl.texture_size(texture), Some((4, 2)));
        assert_eq!(
            gl.calls(),
            vec![
                Call::BindTexture(Some(texture)),
                Call::LinearFiltering,
                Call::TexImage {
                    width: 4,
                    height: 2
                },
                Call::BindTexture(None),
            ]
        );
    }

    #[test]
    fn upload_failure_creates_nothing() {
        let gl = MockGl::new();
        gl.set_fail_create(true);
        let bitmap = Bitmap::from_rgba(1, 1, vec![0; 4]).unwrap();
        assert!(matches!(
            upload_texture(&gl, bitmap),
            Err(GlsurfaceError::GlObject { kind: "texture", .. })
        ));
        assert_eq!(gl.live_textures(), 0);
    }
}
