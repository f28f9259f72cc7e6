//! Core engine-facing contracts.
//!
//! The interface between the runtime (platform loop) and the application:
//! a one-shot start hook for resource setup and a per-frame hook.

mod app;
mod ctx;

pub use app::{App, AppControl};
pub use ctx::{FrameCtx, StartCtx};
