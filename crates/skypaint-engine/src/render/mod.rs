//! GPU rendering.
//!
//! Renderers own their GPU resources and create them lazily on first use
//! from the [`RenderCtx`] they are handed each frame.

mod ctx;
mod mesh;

pub use ctx::{RenderCtx, RenderTarget};
pub use mesh::{MeshRenderer, MeshVertex};
