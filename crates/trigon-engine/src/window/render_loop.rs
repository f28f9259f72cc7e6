/// State of the render loop.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Default)]
pub enum LoopState {
    #[default]
    Running,
    Terminating,
}

/// Two-state render loop: `Running` until a close is requested.
///
/// A close request only arms the transition; the runtime observes it at the
/// next loop check, after the current frame has been presented.
#[derive(Debug, Default)]
pub struct RenderLoop {
    state: LoopState,
}

impl RenderLoop {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.state == LoopState::Running
    }

    /// Idempotent.
    pub fn request_close(&mut self) {
        if self.state == LoopState::Running {
            log::debug!("close requested");
            self.state = LoopState::Terminating;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_running() {
        assert_eq!(RenderLoop::new().state(), LoopState::Running);
    }

    #[test]
    fn close_request_terminates() {
        let mut l = RenderLoop::new();
        l.request_close();
        assert!(!l.is_running());
        l.request_close();
        assert_eq!(l.state(), LoopState::Terminating);
    }
}
