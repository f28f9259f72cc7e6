use crate::error::BootstrapError;

use super::ctx::{FrameCtx, StartCtx};

/// Control directive returned by app callbacks.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum AppControl {
    Continue,
    Exit,
}

/// Application contract driven by the runtime.
pub trait App {
    /// Called once, after the window and its graphics context exist and the
    /// initial viewport is set. GPU resources are created here.
    ///
    /// An error stops the runtime before the first frame.
    fn on_start(&mut self, ctx: &mut StartCtx<'_, '_>) -> Result<(), BootstrapError>;

    /// Called once per frame while the loop is running.
    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl;
}
