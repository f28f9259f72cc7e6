use std::fmt;

use crate::shader::{ProgramError, ShaderError};

/// Terminal startup failure.
///
/// None of these are retried. The runtime unwinds the window system and every
/// GPU object it owns before handing the error back to the caller.
#[derive(Debug)]
pub enum BootstrapError {
    /// The window system or the window itself could not be created.
    WindowCreation(String),
    /// No GPU context matching the requested capability profile could be loaded.
    ContextLoad(String),
    ShaderCompile(ShaderError),
    ProgramLink(ProgramError),
}

impl fmt::Display for BootstrapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::WindowCreation(msg) => write!(f, "failed to create window: {msg}"),
            Self::ContextLoad(msg) => write!(f, "failed to load graphics context: {msg}"),
            Self::ShaderCompile(e) => e.fmt(f),
            Self::ProgramLink(e) => e.fmt(f),
        }
    }
}

impl std::error::Error for BootstrapError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::ShaderCompile(e) => Some(e),
            Self::ProgramLink(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ShaderError> for BootstrapError {
    fn from(e: ShaderError) -> Self {
        Self::ShaderCompile(e)
    }
}

impl From<ProgramError> for BootstrapError {
    fn from(e: ProgramError) -> Self {
        Self::ProgramLink(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shader::ShaderStage;

    #[test]
    fn shader_error_converts_and_displays_log() {
        let err: BootstrapError = ShaderError::Compile {
            label: "vertex.glsl".into(),
            stage: ShaderStage::Vertex,
            log: "expected ';'".into(),
        }
        .into();

        assert!(matches!(err, BootstrapError::ShaderCompile(_)));
        let text = err.to_string();
        assert!(text.contains("vertex.glsl"));
        assert!(text.contains("expected ';'"));
    }

    #[test]
    fn window_creation_message() {
        let err = BootstrapError::WindowCreation("no display".into());
        assert_eq!(err.to_string(), "failed to create window: no display");
    }
}
