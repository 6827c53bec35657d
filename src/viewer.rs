//! Standalone desktop window that hosts a [`DemoRenderer`].
//!
//! winit owns the window and glutin provides an OpenGL ES 3.0 context,
//! normally through EGL (WGL on Windows drivers exposing
//! `WGL_EXT_create_context_es2_profile`). macOS has no GLES driver, so
//! [`Viewer::run`] fails there with [`GlsurfaceError::Viewer`]. The renderer
//! callbacks are driven from the window events on the event-loop thread.
//!
//! ```no_run
//! # use glsurface::Viewer;
//! Viewer::builder()
//!     .with_title("Triangle")
//!     .build()
//!     .run()
//!     .unwrap();
//! ```

use std::num::NonZeroU32;

use glutin::{
    config::{Config, ConfigTemplateBuilder, GlConfig},
    context::{
        ContextApi, ContextAttributesBuilder, NotCurrentGlContext, PossiblyCurrentContext,
        Version,
    },
    display::{GetGlDisplay, GlDisplay},
    surface::{GlSurface, Surface, SurfaceAttributesBuilder, WindowSurface},
};
use glutin_winit::{DisplayBuilder, GlWindow};
use raw_window_handle::HasWindowHandle;
use winit::{
    application::ApplicationHandler,
    dpi::LogicalSize,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    window::{Window, WindowId},
};

use crate::{
    error::GlsurfaceError,
    gl::GlowDriver,
    options::Options,
    renderer::{DemoRenderer, Renderer},
};

// ── Builder ──────────────────────────────────────────────────────────────

/// Fluent builder for [`Viewer`].
pub struct ViewerBuilder {
    options: Options,
    title: String,
    size: (u32, u32),
}

impl ViewerBuilder {
    fn new() -> Self {
        Self {
            options: Options::default(),
            title: "glsurface".into(),
            size: (720, 1280),
        }
    }

    /// Override the default options.
    #[must_use]
    pub fn with_options(mut self, options: Options) -> Self {
        self.options = options;
        self
    }

    /// Set the window title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Initial inner size in logical pixels.
    #[must_use]
    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.size = (width, height);
        self
    }

    /// Consume the builder and produce a [`Viewer`].
    #[must_use]
    pub fn build(self) -> Viewer {
        Viewer {
            options: self.options,
            title: self.title,
            size: self.size,
        }
    }
}

// ── Viewer ───────────────────────────────────────────────────────────────

/// A window with a GLES 3.0 surface rendering one demo scene.
///
/// Construct via [`Viewer::builder`], then call [`run`](Self::run) to
/// enter the event loop.
pub struct Viewer {
    options: Options,
    title: String,
    size: (u32, u32),
}

impl Viewer {
    /// Start a new builder.
    #[must_use]
    pub fn builder() -> ViewerBuilder {
        ViewerBuilder::new()
    }

    /// Open the window and run the event loop. Blocks until the window is
    /// closed.
    ///
    /// # Errors
    ///
    /// [`GlsurfaceError::Viewer`] if the event loop, window or GL context
    /// cannot be created.
    pub fn run(self) -> Result<(), GlsurfaceError> {
        let event_loop = EventLoop::new().map_err(viewer_error)?;
        event_loop.set_control_flow(ControlFlow::Poll);

        let mut app = ViewerApp {
            renderer: DemoRenderer::new(self.options),
            title: self.title,
            size: self.size,
            gl: None,
            failure: None,
        };
        event_loop.run_app(&mut app).map_err(viewer_error)?;

        app.failure.map_or(Ok(()), Err)
    }
}

fn viewer_error(e: impl std::fmt::Display) -> GlsurfaceError {
    GlsurfaceError::Viewer(e.to_string())
}

// ── Winit app ────────────────────────────────────────────────────────────

/// Window, surface and current context. Field order is drop order: the
/// driver goes first while the context is still current.
struct GlState {
    driver: GlowDriver,
    surface: Surface<WindowSurface>,
    context: PossiblyCurrentContext,
    window: Window,
}

struct ViewerApp {
    renderer: DemoRenderer<GlowDriver>,
    title: String,
    size: (u32, u32),
    gl: Option<GlState>,
    failure: Option<GlsurfaceError>,
}

/// Prefer the config with the most MSAA samples.
#[allow(clippy::expect_used)] // without any config there is no surface to render to
fn pick_config(configs: Box<dyn Iterator<Item = Config> + '_>) -> Config {
    configs
        .reduce(|best, c| if c.num_samples() > best.num_samples() { c } else { best })
        .expect("glutin offers at least one config")
}

impl ViewerApp {
    fn create_gl(&self, event_loop: &ActiveEventLoop) -> Result<GlState, GlsurfaceError> {
        let attrs = Window::default_attributes()
            .with_title(&self.title)
            .with_inner_size(LogicalSize::new(self.size.0, self.size.1));

        let template = ConfigTemplateBuilder::new().with_alpha_size(8);
        let (window, config) = DisplayBuilder::new()
            .with_window_attributes(Some(attrs.clone()))
            .build(event_loop, template, pick_config)
            .map_err(viewer_error)?;
        let window = match window {
            Some(window) => window,
            None => glutin_winit::finalize_window(event_loop, attrs, &config)
                .map_err(viewer_error)?,
        };

        let raw_handle = window
            .window_handle()
            .map_err(viewer_error)?
            .as_raw();
        let display = config.display();
        let context_attrs = ContextAttributesBuilder::new()
            .with_context_api(ContextApi::Gles(Some(Version::new(3, 0))))
            .build(Some(raw_handle));
        let not_current = unsafe { display.create_context(&config, &context_attrs) }
            .map_err(viewer_error)?;

        let surface_attrs = window
            .build_surface_attributes(SurfaceAttributesBuilder::<WindowSurface>::new())
            .map_err(viewer_error)?;
        let surface = unsafe { display.create_window_surface(&config, &surface_attrs) }
            .map_err(viewer_error)?;
        let context = not_current.make_current(&surface).map_err(viewer_error)?;

        let glow_context = unsafe {
            glow::Context::from_loader_function_cstr(|name| display.get_proc_address(name))
        };
        // The context was made current above and stays current on this
        // thread until `GlState` is dropped.
        let driver = unsafe { GlowDriver::new(glow_context) };
        log::info!("OpenGL ES context: {}", driver.version_string());

        Ok(GlState {
            driver,
            surface,
            context,
            window,
        })
    }

    fn destroy(&mut self) {
        if let Some(gl) = self.gl.take() {
            self.renderer.on_destroy(&gl.driver);
        }
    }
}

impl ApplicationHandler for ViewerApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.gl.is_some() {
            return;
        }

        let gl = match self.create_gl(event_loop) {
            Ok(gl) => gl,
            Err(e) => {
                log::error!("Failed to set up the GL surface: {e}");
                self.failure = Some(e);
                event_loop.exit();
                return;
            }
        };

        if let Err(e) = self.renderer.on_surface_created(&gl.driver) {
            log::error!("Scene setup failed, only clearing: {e}");
        }
        let size = gl.window.inner_size();
        self.renderer
            .on_surface_changed(&gl.driver, size.width, size.height);
        gl.window.request_redraw();
        self.gl = Some(gl);
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => {
                self.destroy();
                event_loop.exit();
            }

            WindowEvent::Resized(size) => {
                let Some(gl) = &self.gl else {
                    return;
                };
                if let (Some(w), Some(h)) =
                    (NonZeroU32::new(size.width), NonZeroU32::new(size.height))
                {
                    gl.surface.resize(&gl.context, w, h);
                }
                self.renderer
                    .on_surface_changed(&gl.driver, size.width, size.height);
            }

            WindowEvent::RedrawRequested => {
                let Some(gl) = &self.gl else {
                    return;
                };
                self.renderer.on_draw_frame(&gl.driver);
                if let Err(e) = gl.surface.swap_buffers(&gl.context) {
                    log::error!("swap_buffers failed: {e}");
                }
                gl.window.request_redraw();
            }

            _ => (),
        }
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        self.destroy();
    }
}
