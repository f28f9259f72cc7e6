use std::fmt;
use std::io;
use std::path::PathBuf;

use super::ShaderStage;

/// Failure to produce a compiled shader.
#[derive(Debug)]
pub enum ShaderError {
    /// The source file could not be read.
    Read { path: PathBuf, source: io::Error },
    /// The compiler rejected the source. `log` is the (possibly truncated) diagnostic.
    Compile {
        label: String,
        stage: ShaderStage,
        log: String,
    },
}

impl ShaderError {
    /// Diagnostic text reported for this failure.
    pub fn log(&self) -> String {
        match self {
            Self::Read { source, .. } => source.to_string(),
            Self::Compile { log, .. } => log.clone(),
        }
    }
}

impl fmt::Display for ShaderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Read { path, source } => {
                write!(f, "failed to read shader source {}: {source}", path.display())
            }
            Self::Compile { label, stage, log } => {
                write!(f, "{stage} shader {label} failed to compile:\n{log}")
            }
        }
    }
}

impl std::error::Error for ShaderError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Read { source, .. } => Some(source),
            Self::Compile { .. } => None,
        }
    }
}

/// Failure to link shaders into a program.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgramError {
    pub label: String,
    /// Link diagnostic, one problem per line, possibly truncated.
    pub log: String,
}

impl fmt::Display for ProgramError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "program {} failed to link:\n{}", self.label, self.log)
    }
}

impl std::error::Error for ProgramError {}
