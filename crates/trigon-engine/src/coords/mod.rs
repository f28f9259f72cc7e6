//! Framebuffer-space types.
//!
//! Physical pixels, origin top-left.

mod color;
mod viewport;

pub use color::ColorRgba;
pub use viewport::Viewport;
