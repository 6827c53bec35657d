//! Aspect-ratio preserving viewport and projection math.
//!
//! Two ways to show an image on a surface of a different shape:
//!
//! - [`letterbox_viewport`] shrinks the GL viewport to the image's aspect
//!   ratio and centers it, leaving bars on two sides.
//! - [`ortho_bounds`] keeps the full-surface viewport and widens one axis of
//!   an orthographic projection instead.
//!
//! Both follow the same policy: when the image is relatively wider than the
//! surface, width is the limiting dimension; otherwise height is.

use std::str::FromStr;

use glam::{Mat4, Vec3};
use serde::{Deserialize, Serialize};

use crate::gl::Viewport;

/// Pixel dimensions of an image or a surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Extent {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Extent {
    /// A `width` x `height` extent.
    #[must_use]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Width divided by height.
    #[must_use]
    pub fn aspect_ratio(self) -> f32 {
        self.width as f32 / self.height as f32
    }

    /// Either dimension is zero.
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// How the textured quad is fitted to the surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FitMode {
    /// Letterbox by shrinking the GL viewport.
    Viewport,
    /// Full-surface viewport, stretched orthographic projection.
    #[default]
    Orthographic,
}

impl FromStr for FitMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "viewport" => Ok(Self::Viewport),
            "orthographic" => Ok(Self::Orthographic),
            _ => Err(format!(
                "unknown fit mode '{s}', expected 'viewport' or 'orthographic'"
            )),
        }
    }
}

/// Centered viewport with the image's aspect ratio, as large as fits.
///
/// The derived dimension is truncated toward zero.
#[must_use]
pub fn letterbox_viewport(image: Extent, surface: Extent) -> Viewport {
    let image_ratio = image.aspect_ratio();
    let surface_ratio = surface.aspect_ratio();
    let (sw, sh) = (surface.width as i32, surface.height as i32);

    let (width, height) = if image_ratio > surface_ratio {
        (sw, (surface.width as f32 / image_ratio) as i32)
    } else {
        ((surface.height as f32 * image_ratio) as i32, sh)
    };

    Viewport {
        x: (sw - width) / 2,
        y: (sh - height) / 2,
        width,
        height,
    }
}

/// Clip-space rectangle of an orthographic projection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrthoBounds {
    /// Left plane.
    pub left: f32,
    /// Right plane.
    pub right: f32,
    /// Bottom plane.
    pub bottom: f32,
    /// Top plane.
    pub top: f32,
}

impl OrthoBounds {
    /// Unit square, `[-1, 1]` on both axes.
    pub const UNIT: Self = Self::symmetric(1.0, 1.0);

    /// Bounds `[-half_width, half_width] x [-half_height, half_height]`.
    #[must_use]
    pub const fn symmetric(half_width: f32, half_height: f32) -> Self {
        Self {
            left: -half_width,
            right: half_width,
            bottom: -half_height,
            top: half_height,
        }
    }

    /// Half of the horizontal range.
    #[must_use]
    pub fn half_width(&self) -> f32 {
        (self.right - self.left) * 0.5
    }

    /// Half of the vertical range.
    #[must_use]
    pub fn half_height(&self) -> f32 {
        (self.top - self.bottom) * 0.5
    }
}

/// Orthographic bounds that undo the stretch of a unit quad.
///
/// With `image_ratio > surface_ratio` the horizontal range stays `[-1, 1]`
/// and the vertical one grows to `image_ratio / surface_ratio`; otherwise
/// the vertical range stays fixed and the horizontal one grows to
/// `surface_ratio / image_ratio`. Non-finite ratios fall back to
/// [`OrthoBounds::UNIT`].
#[must_use]
pub fn ortho_bounds(image_ratio: f32, surface_ratio: f32) -> OrthoBounds {
    if !(image_ratio.is_finite() && surface_ratio.is_finite())
        || image_ratio <= 0.0
        || surface_ratio <= 0.0
    {
        return OrthoBounds::UNIT;
    }
    if image_ratio > surface_ratio {
        OrthoBounds::symmetric(1.0, image_ratio / surface_ratio)
    } else {
        OrthoBounds::symmetric(surface_ratio / image_ratio, 1.0)
    }
}

/// GL-convention orthographic projection with depth range `[-1, 1]`.
#[must_use]
pub fn ortho_projection(bounds: OrthoBounds) -> Mat4 {
    Mat4::orthographic_rh_gl(
        bounds.left,
        bounds.right,
        bounds.bottom,
        bounds.top,
        -1.0,
        1.0,
    )
}

/// Camera one unit in front of the quad, looking at the origin, +Y up.
#[must_use]
pub fn fixed_view() -> Mat4 {
    Mat4::look_at_rh(Vec3::new(0.0, 0.0, 1.0), Vec3::ZERO, Vec3::Y)
}

/// Projection times view for an image shown on a surface.
#[must_use]
pub fn model_view_projection(image: Extent, surface: Extent) -> Mat4 {
    let bounds = ortho_bounds(image.aspect_ratio(), surface.aspect_ratio());
    ortho_projection(bounds) * fixed_view()
}

/// What the renderer should apply after a resize.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Layout {
    /// GL viewport to set.
    pub viewport: Viewport,
    /// Matrix for the textured quad.
    pub mvp: Mat4,
}

/// Remembers the image size and the last surface size, and recomputes the
/// [`Layout`] on every resize.
#[derive(Debug, Clone)]
pub struct SurfaceLayout {
    image: Extent,
    mode: FitMode,
    surface: Option<Extent>,
    current: Option<Layout>,
}

impl SurfaceLayout {
    /// Layout for an `image` fitted with `mode`; no surface yet.
    #[must_use]
    pub fn new(image: Extent, mode: FitMode) -> Self {
        Self {
            image,
            mode,
            surface: None,
            current: None,
        }
    }

    /// Recompute for a new surface size.
    ///
    /// Zero-sized surfaces (minimized windows) are ignored and leave the
    /// previous layout in place; `None` is returned in that case.
    pub fn resize(&mut self, width: u32, height: u32) -> Option<Layout> {
        let surface = Extent::new(width, height);
        if surface.is_empty() {
            log::debug!("Ignoring zero-sized surface {width}x{height}");
            return None;
        }

        let layout = match self.mode {
            FitMode::Viewport => Layout {
                viewport: letterbox_viewport(self.image, surface),
                mvp: Mat4::IDENTITY,
            },
            FitMode::Orthographic => Layout {
                viewport: Viewport::full(width, height),
                mvp: model_view_projection(self.image, surface),
            },
        };
        log::debug!(
            "Surface {width}x{height}, image {}x{}: viewport {:?}",
            self.image.width,
            self.image.height,
            layout.viewport
        );

        self.surface = Some(surface);
        self.current = Some(layout);
        Some(layout)
    }

    /// Last non-empty surface size.
    #[must_use]
    pub fn surface(&self) -> Option<Extent> {
        self.surface
    }

    /// Layout computed for [`Self::surface`].
    #[must_use]
    pub fn current(&self) -> Option<Layout> {
        self.current
    }
}
