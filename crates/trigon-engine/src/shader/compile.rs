use std::borrow::Cow;
use std::fs;
use std::path::Path;

use naga::front::glsl;
use naga::valid::{Capabilities, ValidationFlags, Validator};

use super::info_log::info_log;
use super::interface::StageInterface;
use super::validation::capture_validation;
use super::{ShaderError, ShaderOptions, ShaderStage};

/// Entry point name every GLSL stage exposes.
pub(crate) const ENTRY_POINT: &str = "main";

/// Language version sources are compiled as.
const FRONTEND_VERSION: u16 = 450;

/// Core-profile versions older than `FRONTEND_VERSION` that compile unchanged
/// under it.
const UPGRADABLE_VERSIONS: [u16; 5] = [330, 400, 410, 420, 430];

/// Stage, label and linkable interface of a successfully compiled shader.
#[derive(Debug, Clone, PartialEq)]
pub struct ShaderInfo {
    pub label: String,
    pub stage: ShaderStage,
    pub interface: StageInterface,
}

/// A shader that compiled and validated on the CPU but has no GPU object yet.
#[derive(Debug)]
pub struct CompiledShader {
    info: ShaderInfo,
    ir: naga::Module,
}

impl CompiledShader {
    pub fn info(&self) -> &ShaderInfo {
        &self.info
    }

    /// Creates the GPU shader object.
    ///
    /// A module the device rejects is reported as a compile failure.
    pub fn upload(
        self,
        device: &wgpu::Device,
        options: &ShaderOptions,
    ) -> Result<Shader, ShaderError> {
        let Self { info, ir } = self;

        let module = capture_validation(device, || {
            device.create_shader_module(wgpu::ShaderModuleDescriptor {
                label: Some(&info.label),
                source: wgpu::ShaderSource::Naga(Cow::Owned(ir)),
            })
        })
        .map_err(|full| {
            log::debug!("{} shader {} upload log:\n{full}", info.stage, info.label);
            ShaderError::Compile {
                label: info.label.clone(),
                stage: info.stage,
                log: info_log(&full, options.info_log_limit),
            }
        })?;

        Ok(Shader { info, module })
    }
}

/// GPU shader object. Only exists for sources that compiled successfully.
///
/// Dropping it after the owning program has been linked is fine; the program
/// keeps what it needs.
#[derive(Debug)]
pub struct Shader {
    info: ShaderInfo,
    module: wgpu::ShaderModule,
}

impl Shader {
    pub fn info(&self) -> &ShaderInfo {
        &self.info
    }

    pub fn stage(&self) -> ShaderStage {
        self.info.stage
    }

    pub(crate) fn module(&self) -> &wgpu::ShaderModule {
        &self.module
    }
}

/// Reads `path` and compiles it as a `stage` shader.
///
/// The file is read as raw bytes and decoded lossily; there is no include
/// mechanism and no preprocessing beyond what GLSL itself defines.
pub fn load_shader_file(
    path: impl AsRef<Path>,
    stage: ShaderStage,
    options: &ShaderOptions,
) -> Result<CompiledShader, ShaderError> {
    let path = path.as_ref();
    let bytes = fs::read(path).map_err(|source| ShaderError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let source = String::from_utf8_lossy(&bytes);

    log::debug!("loaded {stage} shader source {} ({} bytes)", path.display(), bytes.len());

    compile_shader(&source, stage, &path.display().to_string(), options)
}

/// Compiles GLSL `source` as a `stage` shader.
///
/// Any core-profile version from 330 up is accepted. On failure the
/// diagnostic is bounded by `options.info_log_limit`.
pub fn compile_shader(
    source: &str,
    stage: ShaderStage,
    label: &str,
    options: &ShaderOptions,
) -> Result<CompiledShader, ShaderError> {
    let fail = |full: String| {
        log::debug!("{stage} shader {label} compile log:\n{full}");
        ShaderError::Compile {
            label: label.to_owned(),
            stage,
            log: info_log(&full, options.info_log_limit),
        }
    };

    // Spans in diagnostics refer to the source the front end actually saw.
    let source = upgrade_version_directive(source);
    let source = source.as_ref();

    let mut frontend = glsl::Frontend::default();
    let ir = frontend
        .parse(&glsl::Options::from(stage.to_naga()), source)
        .map_err(|errors| fail(errors.emit_to_string(source)))?;

    Validator::new(ValidationFlags::all(), Capabilities::empty())
        .validate(&ir)
        .map_err(|e| fail(e.emit_to_string(source)))?;

    let Some(ep) = ir
        .entry_points
        .iter()
        .find(|ep| ep.stage == stage.to_naga() && ep.name == ENTRY_POINT)
    else {
        return Err(fail(format!("error: no `{ENTRY_POINT}` entry point for the {stage} stage")));
    };

    let interface = StageInterface::from_entry_point(&ir, ep);

    Ok(CompiledShader {
        info: ShaderInfo {
            label: label.to_owned(),
            stage,
            interface,
        },
        ir,
    })
}

/// Rewrites a leading `#version N [core]` directive with `N` in
/// `UPGRADABLE_VERSIONS` to `FRONTEND_VERSION`.
///
/// Everything else is left for the front end to accept or reject. Line
/// numbers are preserved.
fn upgrade_version_directive(source: &str) -> Cow<'_, str> {
    let mut offset = 0;

    for line in source.split_inclusive('\n') {
        let start = offset;
        offset += line.len();

        let text = line.trim();
        if text.is_empty() || text.starts_with("//") {
            continue;
        }

        let Some(rest) = text.strip_prefix('#') else { break };
        let Some(args) = rest.trim_start().strip_prefix("version") else { break };

        let mut tokens = args.split_whitespace();
        let version = tokens.next().and_then(|v| v.parse::<u16>().ok());
        let profile = tokens.next();

        let upgradable = version.is_some_and(|v| UPGRADABLE_VERSIONS.contains(&v))
            && matches!(profile, None | Some("core"))
            && tokens.next().is_none();
        if !upgradable {
            break;
        }

        let body_len = line.trim_end_matches(['\r', '\n']).len();
        let mut upgraded = String::with_capacity(source.len());
        upgraded.push_str(&source[..start]);
        upgraded.push_str(&format!("#version {FRONTEND_VERSION} core"));
        upgraded.push_str(&source[start + body_len..]);
        return Cow::Owned(upgraded);
    }

    Cow::Borrowed(source)
}

#[cfg(test)]
mod tests {
    use super::*;

    const PASS_THROUGH_VS: &str = "#version 450 core
layout(location = 0) in vec3 aPos;
void main() {
    gl_Position = vec4(aPos, 1.0);
}
";

    const SOLID_FS: &str = "#version 450 core
layout(location = 0) out vec4 FragColor;
void main() {
    FragColor = vec4(1.0, 0.5, 0.2, 1.0);
}
";

    const LEGACY_VS: &str = "#version 330 core
layout (location = 0) in vec3 aPos;

void main()
{
    gl_Position = vec4(aPos.x, aPos.y, aPos.z, 1.0);
}
";

    const LEGACY_FS: &str = "#version 330 core
out vec4 FragColor;

void main()
{
    FragColor = vec4(1.0, 0.5, 0.2, 1.0);
}
";

    fn compile(
        source: &str,
        stage: ShaderStage,
        label: &str,
    ) -> Result<CompiledShader, ShaderError> {
        compile_shader(source, stage, label, &ShaderOptions::default())
    }

    #[test]
    fn valid_vertex_shader_compiles() {
        let shader = compile(PASS_THROUGH_VS, ShaderStage::Vertex, "vs")
            .expect("pass-through vertex shader should compile");

        let info = shader.info();
        assert_eq!(info.stage, ShaderStage::Vertex);
        assert_eq!(info.interface.inputs.len(), 1);
        assert_eq!(info.interface.inputs[0].location, 0);
        assert_eq!(info.interface.inputs[0].type_name(), "vec3");
        // gl_Position is a built-in, not a user output.
        assert!(info.interface.outputs.is_empty());
    }

    #[test]
    fn valid_fragment_shader_compiles() {
        let shader = compile(SOLID_FS, ShaderStage::Fragment, "fs")
            .expect("solid fragment shader should compile");

        let iface = &shader.info().interface;
        assert!(iface.inputs.is_empty());
        assert_eq!(iface.output(0).map(|s| s.type_name()), Some("vec4".to_owned()));
    }

    #[test]
    fn syntax_error_yields_bounded_log() {
        let broken = "#version 450 core\nvoid main() {\n    gl_Position = vec4(0.0)\n}\n";
        let err = compile(broken, ShaderStage::Vertex, "broken")
            .expect_err("missing semicolon must not compile");

        match err {
            ShaderError::Compile { log, stage, label } => {
                assert_eq!(stage, ShaderStage::Vertex);
                assert_eq!(label, "broken");
                assert!(!log.is_empty());
                assert!(log.len() <= 512);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn version_330_pair_compiles() {
        let vs = compile(LEGACY_VS, ShaderStage::Vertex, "vs330")
            .expect("3.3 vertex shader should compile");
        let fs = compile(LEGACY_FS, ShaderStage::Fragment, "fs330")
            .expect("3.3 fragment shader should compile");

        let input = vs.info().interface.input(0).map(|s| s.type_name());
        assert_eq!(input.as_deref(), Some("vec3"));
        // An output without a layout qualifier lands on location 0.
        let output = fs.info().interface.output(0).map(|s| s.type_name());
        assert_eq!(output.as_deref(), Some("vec4"));
    }

    #[test]
    fn version_directive_upgrade() {
        assert_eq!(
            upgrade_version_directive("#version 330 core\nvoid main() {}\n"),
            "#version 450 core\nvoid main() {}\n"
        );
        assert_eq!(
            upgrade_version_directive("// header\r\n\n  # version 410\r\nvoid main() {}"),
            "// header\r\n\n#version 450 core\r\nvoid main() {}"
        );

        // Left for the front end to accept or reject.
        for untouched in [
            "#version 450 core\n",
            "#version 120\n",
            "#version 330 compatibility\n",
            "void main() {}\n#version 330 core\n",
        ] {
            let upgraded = upgrade_version_directive(untouched);
            assert!(matches!(upgraded, Cow::Borrowed(_)), "{untouched:?}");
        }
    }

    #[test]
    fn pre_330_version_is_rejected() {
        let err = compile("#version 120\nvoid main() {}\n", ShaderStage::Vertex, "old")
            .expect_err("GLSL 1.20 is below the supported range");
        assert!(err.log().contains("120"));
    }

    #[test]
    fn tiny_limit_truncates_log() {
        let options = ShaderOptions { info_log_limit: Some(8) };
        let err = compile_shader("not glsl at all", ShaderStage::Fragment, "junk", &options)
            .expect_err("garbage must not compile");
        let log = err.log();
        assert!(!log.is_empty());
        assert!(log.len() <= 8);
    }

    #[test]
    fn missing_file_is_a_read_error() {
        let err = load_shader_file(
            "definitely/not/here/vertex.glsl",
            ShaderStage::Vertex,
            &ShaderOptions::default(),
        )
        .expect_err("missing file");

        assert!(matches!(err, ShaderError::Read { .. }));
        assert!(err.to_string().contains("vertex.glsl"));
    }

    #[test]
    fn loads_source_from_disk() {
        let path = std::env::temp_dir().join(format!("trigon-vs-{}.glsl", std::process::id()));
        fs::write(&path, PASS_THROUGH_VS).unwrap();

        let shader = load_shader_file(&path, ShaderStage::Vertex, &ShaderOptions::default());
        fs::remove_file(&path).ok();

        let shader = shader.expect("file on disk should compile");
        assert_eq!(shader.info().label, path.display().to_string());
    }

    #[test]
    fn upload_creates_gpu_module() {
        let (device, _queue) = crate::device::noop_device();
        let options = ShaderOptions::default();

        let shader = compile(LEGACY_VS, ShaderStage::Vertex, "vs")
            .and_then(|s| s.upload(&device, &options))
            .expect("valid shader should upload");

        assert_eq!(shader.stage(), ShaderStage::Vertex);
        assert_eq!(shader.info().label, "vs");
    }
}
