//! Surface lifecycle callbacks and the demo renderer behind them.
//!
//! A host owning a GL context calls [`Renderer`] methods on its render
//! thread in a fixed order: `on_surface_created` once per context, then any
//! number of `on_surface_changed` / `on_draw_frame`, then `on_destroy`.

use crate::{
    assets::{AssetDir, AssetSource, BundledAssets, DEFAULT_IMAGE_PNG},
    drawable::{Drawable, TextureRender, Triangle},
    error::GlsurfaceError,
    gl::{check_error, Gl, Viewport},
    options::{Options, Scene},
    projection::{Extent, SurfaceLayout},
    texture::Bitmap,
};

/// Callbacks a surface host drives.
pub trait Renderer<G: Gl> {
    /// A context became current; allocate GPU resources.
    ///
    /// # Errors
    ///
    /// Any [`GlsurfaceError`] that made resource creation fail. The
    /// renderer stays usable and draws only the clear color.
    fn on_surface_created(&mut self, gl: &G) -> Result<(), GlsurfaceError>;

    /// The surface was resized to `width` x `height` pixels.
    fn on_surface_changed(&mut self, gl: &G, width: u32, height: u32);

    /// Draw one frame.
    fn on_draw_frame(&mut self, gl: &G);

    /// The host is going away; delete every GPU object.
    fn on_destroy(&mut self, gl: &G);
}

enum Stage<G: Gl> {
    Empty,
    Triangle(Triangle<G>),
    Texture {
        quad: TextureRender<G>,
        layout: SurfaceLayout,
    },
}

/// Renders the [`Scene`] selected in [`Options`].
pub struct DemoRenderer<G: Gl> {
    options: Options,
    assets: Box<dyn AssetSource>,
    stage: Stage<G>,
    surface: Option<Extent>,
}

impl<G: Gl> DemoRenderer<G> {
    /// Renderer reading shaders from `options.assets.shader_dir`, or from
    /// the bundled copies when unset.
    #[must_use]
    pub fn new(options: Options) -> Self {
        let assets: Box<dyn AssetSource> = match &options.assets.shader_dir {
            Some(dir) => Box::new(AssetDir::new(dir)),
            None => Box::new(BundledAssets),
        };
        Self::with_assets(options, assets)
    }

    /// Renderer reading shaders from `assets`.
    #[must_use]
    pub fn with_assets(options: Options, assets: Box<dyn AssetSource>) -> Self {
        Self {
            options,
            assets,
            stage: Stage::Empty,
            surface: None,
        }
    }

    /// Scene that will be built on the next surface creation.
    #[must_use]
    pub fn scene(&self) -> Scene {
        self.options.surface.scene
    }

    /// Last non-empty surface size.
    #[must_use]
    pub fn surface_size(&self) -> Option<Extent> {
        self.surface
    }

    /// The current scene holds GPU objects.
    #[must_use]
    pub fn is_live(&self) -> bool {
        match &self.stage {
            Stage::Empty => false,
            Stage::Triangle(triangle) => triangle.holds_gpu_objects(),
            Stage::Texture { quad, .. } => quad.holds_gpu_objects(),
        }
    }

    fn load_bitmap(&self) -> Result<Bitmap, GlsurfaceError> {
        match &self.options.texture.image {
            Some(path) => Bitmap::open(path),
            None => Bitmap::decode(DEFAULT_IMAGE_PNG),
        }
    }

    fn build_stage(&self, gl: &G) -> Result<Stage<G>, GlsurfaceError> {
        let scene = self.scene();
        if let Some(submission) = scene.submission() {
            let mut triangle = Triangle::new(gl, self.assets.as_ref(), submission)?;
            triangle.set_color(self.options.triangle.color);
            return Ok(Stage::Triangle(triangle));
        }
        match scene {
            Scene::Texture => {
                let bitmap = self.load_bitmap()?;
                let image = Extent::new(bitmap.width(), bitmap.height());
                let quad = TextureRender::new(gl, self.assets.as_ref(), bitmap)?;
                Ok(Stage::Texture {
                    quad,
                    layout: SurfaceLayout::new(image, self.options.texture.fit),
                })
            }
            _ => Ok(Stage::Empty),
        }
    }

    fn apply_size(&mut self, gl: &G, surface: Extent) {
        match &mut self.stage {
            Stage::Texture { quad, layout } => {
                if let Some(fitted) = layout.resize(surface.width, surface.height) {
                    gl.viewport(fitted.viewport);
                    quad.set_mvp(fitted.mvp);
                }
            }
            Stage::Triangle(_) | Stage::Empty => {
                gl.viewport(Viewport::full(surface.width, surface.height));
            }
        }
    }

    fn release_stage(&mut self, gl: &G) {
        match &mut self.stage {
            Stage::Empty => {}
            Stage::Triangle(triangle) => triangle.release(gl),
            Stage::Texture { quad, .. } => quad.release(gl),
        }
        self.stage = Stage::Empty;
    }
}

impl<G: Gl> Renderer<G> for DemoRenderer<G> {
    fn on_surface_created(&mut self, gl: &G) -> Result<(), GlsurfaceError> {
        self.release_stage(gl);
        gl.clear_color(self.options.surface.clear_color);

        self.stage = self.build_stage(gl)?;
        log::info!("Surface created, scene '{}'", self.scene());

        if let Some(surface) = self.surface {
            self.apply_size(gl, surface);
        }
        Ok(())
    }

    fn on_surface_changed(&mut self, gl: &G, width: u32, height: u32) {
        let surface = Extent::new(width, height);
        if surface.is_empty() {
            log::debug!("Ignoring resize to {width}x{height}");
            return;
        }
        self.surface = Some(surface);
        self.apply_size(gl, surface);
    }

    fn on_draw_frame(&mut self, gl: &G) {
        gl.clear_color_buffer();
        match &self.stage {
            Stage::Empty => {}
            Stage::Triangle(triangle) => triangle.draw(gl),
            Stage::Texture { quad, .. } => quad.draw(gl),
        }
        let _ = check_error(gl, "frame");
    }

    fn on_destroy(&mut self, gl: &G) {
        self.release_stage(gl);
        log::info!("Renderer destroyed");
    }
}
