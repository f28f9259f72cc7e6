//! Trigon engine crate.
//!
//! Window/context bootstrap, shader compilation and program linking, static
//! geometry upload, and the render loop that drives them.

pub mod coords;
pub mod core;
pub mod device;
pub mod error;
pub mod geometry;
pub mod input;
pub mod logging;
pub mod shader;
pub mod window;

pub use error::BootstrapError;
