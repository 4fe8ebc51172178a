//! skypaint engine crate.
//!
//! Owns the platform and GPU runtime: the winit event loop and window, the
//! wgpu device and surface, per-window input and timing, and the textured
//! mesh renderer. Painting logic lives in `skypaint-paint` and never sees
//! a winit or wgpu type.

pub mod color;
pub mod core;
pub mod device;
pub mod input;
pub mod logging;
pub mod render;
pub mod time;
pub mod window;

pub use color::Color;
