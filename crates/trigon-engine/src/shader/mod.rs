//! Shader compilation and program linking.
//!
//! GLSL sources are compiled and validated on the CPU, so compile and link
//! diagnostics are available before any GPU object is created. A `Shader`
//! exists only for a source that compiled; a `Program` only for stages that
//! linked.

mod compile;
mod error;
mod info_log;
mod interface;
mod program;
mod stage;
mod validation;

pub use compile::{compile_shader, load_shader_file, CompiledShader, Shader, ShaderInfo};
pub use error::{ProgramError, ShaderError};
pub use info_log::{ShaderOptions, DEFAULT_INFO_LOG_LIMIT};
pub use interface::{InterfaceSlot, StageInterface};
pub use program::{check_link, link_program, Program};
pub use stage::ShaderStage;
