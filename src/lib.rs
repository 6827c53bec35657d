// -- Lint policy ---------------------------------------------------------
// This is the single source of truth for crate-wide lints.

// Broad lint groups
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![deny(clippy::nursery)]
// Documentation
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]
#![deny(rustdoc::bare_urls)]
// No panicking in library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![deny(clippy::todo)]
#![deny(clippy::unimplemented)]
// No debug/print artifacts
#![deny(clippy::dbg_macro)]
#![deny(clippy::print_stdout)]
#![deny(clippy::print_stderr)]
// Import hygiene
#![deny(clippy::wildcard_imports)]
// Complexity limits (thresholds in clippy.toml)
#![deny(clippy::cognitive_complexity)]
#![deny(clippy::too_many_lines)]
#![deny(clippy::excessive_nesting)]
// Function signature hygiene
#![deny(clippy::too_many_arguments)]
#![deny(clippy::fn_params_excessive_bools)]
// Clone / pass-by-value hygiene
#![deny(clippy::needless_pass_by_value)]
#![deny(clippy::implicit_clone)]
// String hygiene
#![deny(clippy::inefficient_to_string)]
#![deny(clippy::redundant_closure_for_method_calls)]
#![deny(clippy::manual_string_new)]
#![deny(clippy::str_to_string)]
// Cargo lints (warn, not deny since cargo lints can be noisy)
#![warn(clippy::cargo)]
// Unused / redundant code
#![deny(unused_results)]
#![deny(unused_qualifications)]
// Cast hygiene
#![deny(trivial_casts)]
#![deny(trivial_numeric_casts)]

//! OpenGL ES 3.0 surface demo, from a cleared surface to textured quads.
//!
//! The crate walks through the usual first steps with a GLES context: a
//! flat-colored triangle submitted four different ways (host memory every
//! frame, a vertex buffer, vertex + element buffers, a vertex array
//! object), then an image drawn on a full-screen quad whose aspect ratio is
//! kept either by letterboxing the viewport or by an orthographic
//! projection.
//!
//! # Key entry points
//!
//! - [`renderer::Renderer`] - the callbacks a surface host drives
//! - [`renderer::DemoRenderer`] - renders the scene picked in [`Options`]
//! - [`drawable::Triangle`] / [`drawable::TextureRender`] - GPU-owning
//!   drawables with explicit release
//! - [`projection`] - letterbox viewport and orthographic fit math
//! - [`gl::Gl`] - the driver seam, implemented for `glow` and for an
//!   in-memory [`gl::MockGl`]
//!
//! With the `viewer` feature, `Viewer` hosts a [`renderer::DemoRenderer`]
//! in a winit window with a glutin GLES 3.0 context.

pub mod assets;
pub mod drawable;
pub mod error;
pub mod geometry;
pub mod gl;
pub mod options;
pub mod projection;
pub mod renderer;
pub mod shader;
pub mod texture;
#[cfg(feature = "viewer")]
pub mod viewer;

pub use error::GlsurfaceError;
pub use options::{Options, Scene};
pub use projection::FitMode;
#[cfg(feature = "viewer")]
pub use viewer::{Viewer, ViewerBuilder};
