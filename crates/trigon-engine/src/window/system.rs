use anyhow::Context;
use winit::application::ApplicationHandler;
use winit::event_loop::EventLoop;

use crate::error::BootstrapError;

/// Scoped ownership of the process-wide window-system state.
///
/// Initialized once per process; released when this guard (or the loop it
/// ran) goes away, on every exit path.
pub struct WindowSystem {
    event_loop: Option<EventLoop<()>>,
}

impl WindowSystem {
    pub fn init() -> Result<Self, BootstrapError> {
        let event_loop = EventLoop::new()
            .context("failed to initialize the window system")
            .map_err(|e| BootstrapError::WindowCreation(format!("{e:#}")))?;

        log::debug!("window system initialized");
        Ok(Self {
            event_loop: Some(event_loop),
        })
    }

    /// Runs `handler` on the calling thread until the loop exits.
    pub fn run<H>(mut self, handler: &mut H) -> Result<(), BootstrapError>
    where
        H: ApplicationHandler,
    {
        let Some(event_loop) = self.event_loop.take() else {
            return Err(BootstrapError::WindowCreation("window system already consumed".into()));
        };

        event_loop
            .run_app(handler)
            .context("window event loop terminated with error")
            .map_err(|e| BootstrapError::WindowCreation(format!("{e:#}")))
    }
}

impl Drop for WindowSystem {
    fn drop(&mut self) {
        log::debug!("window system terminated");
    }
}
