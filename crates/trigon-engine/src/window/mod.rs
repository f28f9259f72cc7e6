//! Window + runtime loop.
//!
//! Owns the window system, the single window and its graphics context, and
//! drives the render loop.

mod render_loop;
mod resize;
mod runtime;
mod system;

pub use render_loop::{LoopState, RenderLoop};
pub use resize::framebuffer_size_callback;
pub use runtime::{Runtime, RuntimeConfig};
pub use system::WindowSystem;
