//! Objects that own GPU state and know how to draw themselves.
//!
//! A drawable allocates its program, buffers, vertex arrays and textures in
//! its constructor and keeps them until [`Drawable::release`] is called.
//! Release is explicit because it needs the driver; dropping a drawable
//! that still holds GPU names only logs a warning.

mod texture_render;
mod triangle;

pub use texture_render::TextureRender;
pub use triangle::{Submission, Triangle};

use crate::gl::Gl;

/// A self-contained piece of GPU state with a draw call.
pub trait Drawable<G: Gl> {
    /// Issue this object's draw calls. A released or inert object draws
    /// nothing.
    fn draw(&self, gl: &G);

    /// Delete every GPU object this drawable created. Calling it again is a
    /// no-op.
    fn release(&mut self, gl: &G);

    /// Whether the drawable still holds GPU names.
    fn holds_gpu_objects(&self) -> bool;
}

/// Delete the object in `slot`, if any, leaving `None` behind.
pub(crate) fn delete_with<T>(slot: &mut Option<T>, delete: impl FnOnce(T)) {
    if let Some(name) = slot.take() {
        delete(name);
    }
}
