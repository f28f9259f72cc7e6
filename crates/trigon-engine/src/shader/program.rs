use naga::ScalarKind;

use crate::geometry::VertexArray;

use super::compile::{ShaderInfo, ENTRY_POINT};
use super::info_log::info_log;
use super::validation::capture_validation;
use super::{ProgramError, Shader, ShaderOptions, ShaderStage};

/// Color attachment every fragment stage writes to.
const COLOR_TARGET_LOCATION: u32 = 0;

/// Linked vertex + fragment pair, ready to be bound for drawing.
#[derive(Debug)]
pub struct Program {
    label: String,
    pipeline: wgpu::RenderPipeline,
}

impl Program {
    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn pipeline(&self) -> &wgpu::RenderPipeline {
        &self.pipeline
    }

    /// Makes this the current program for subsequent draws in `rpass`.
    pub fn bind(&self, rpass: &mut wgpu::RenderPass<'_>) {
        rpass.set_pipeline(&self.pipeline);
    }
}

/// Checks that the attached stages form a complete, consistent program that
/// reads `vertex_array` and renders into `target_format`.
///
/// Stages are examined in attachment order. Every problem found is reported,
/// one per line, prefixed with `error: `.
pub fn check_link(
    shaders: &[&ShaderInfo],
    vertex_array: &VertexArray,
    target_format: wgpu::TextureFormat,
) -> Result<(), String> {
    if shaders.is_empty() {
        return Err("error: no shaders attached".to_owned());
    }

    let mut errors = Vec::new();
    let mut vertex: Option<&ShaderInfo> = None;
    let mut fragment: Option<&ShaderInfo> = None;

    for shader in shaders {
        let slot = match shader.stage {
            ShaderStage::Vertex => &mut vertex,
            ShaderStage::Fragment => &mut fragment,
        };
        match *slot {
            Some(first) => errors.push(format!(
                "error: {} stage attached twice ({} and {})",
                shader.stage, first.label, shader.label
            )),
            None => *slot = Some(*shader),
        }
    }

    match vertex {
        None => errors.push("error: no vertex stage attached".to_owned()),
        Some(vs) => {
            for input in &vs.interface.inputs {
                match vertex_array.attribute(input.location) {
                    None => errors.push(format!(
                        "error: vertex input at location {} ({}) has no vertex attribute",
                        input.location,
                        input.type_name()
                    )),
                    Some(attr) if !reads_as(&input.ty, vertex_format_kind(attr.format)) => {
                        errors.push(format!(
                            "error: vertex input at location {} ({}) cannot read a {:?} attribute",
                            input.location,
                            input.type_name(),
                            attr.format
                        ))
                    }
                    Some(_) => {}
                }
            }
        }
    }

    match (vertex, fragment) {
        (_, None) => errors.push("error: no fragment stage attached".to_owned()),
        (Some(vs), Some(fs)) => {
            for input in &fs.interface.inputs {
                match vs.interface.output(input.location) {
                    None => errors.push(format!(
                        "error: fragment input at location {} ({}) is not written by the vertex stage",
                        input.location,
                        input.type_name()
                    )),
                    Some(out) if out.ty != input.ty => errors.push(format!(
                        "error: location {} is {} in the vertex stage but {} in the fragment stage",
                        input.location,
                        out.type_name(),
                        input.type_name()
                    )),
                    Some(_) => {}
                }
            }
        }
        (None, Some(_)) => {}
    }

    if let Some(fs) = fragment {
        if let Some(output) = fs.interface.output(COLOR_TARGET_LOCATION) {
            match target_format_kind(target_format) {
                None => errors.push(format!("error: {target_format:?} is not a color format")),
                Some(kind) if !reads_as(&output.ty, kind) => errors.push(format!(
                    "error: fragment output at location {} ({}) cannot be written to a {:?} target",
                    output.location,
                    output.type_name(),
                    target_format
                )),
                Some(_) => {}
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors.join("\n"))
    }
}

fn reads_as(ty: &naga::TypeInner, kind: ScalarKind) -> bool {
    ty.scalar_kind() == Some(kind)
}

/// Scalar kind a shader sees when reading an attribute of `format`.
fn vertex_format_kind(format: wgpu::VertexFormat) -> ScalarKind {
    use wgpu::VertexFormat as F;

    match format {
        F::Uint8
        | F::Uint8x2
        | F::Uint8x4
        | F::Uint16
        | F::Uint16x2
        | F::Uint16x4
        | F::Uint32
        | F::Uint32x2
        | F::Uint32x3
        | F::Uint32x4 => ScalarKind::Uint,
        F::Sint8
        | F::Sint8x2
        | F::Sint8x4
        | F::Sint16
        | F::Sint16x2
        | F::Sint16x4
        | F::Sint32
        | F::Sint32x2
        | F::Sint32x3
        | F::Sint32x4 => ScalarKind::Sint,
        // Floats and normalized integers.
        _ => ScalarKind::Float,
    }
}

/// Scalar kind a fragment output needs to write `format`; `None` for
/// depth/stencil formats.
fn target_format_kind(format: wgpu::TextureFormat) -> Option<ScalarKind> {
    match format.sample_type(None, None)? {
        wgpu::TextureSampleType::Float { .. } => Some(ScalarKind::Float),
        wgpu::TextureSampleType::Sint => Some(ScalarKind::Sint),
        wgpu::TextureSampleType::Uint => Some(ScalarKind::Uint),
        wgpu::TextureSampleType::Depth => None,
    }
}

/// Links `shaders` into a program that reads vertices laid out as
/// `vertex_array` and renders into `target_format`.
///
/// The shaders are only borrowed; they can be dropped once this returns.
pub fn link_program(
    device: &wgpu::Device,
    label: &str,
    shaders: &[&Shader],
    vertex_array: &VertexArray,
    target_format: wgpu::TextureFormat,
    options: &ShaderOptions,
) -> Result<Program, ProgramError> {
    let fail = |full: String| {
        log::debug!("program {label} link log:\n{full}");
        ProgramError {
            label: label.to_owned(),
            log: info_log(&full, options.info_log_limit),
        }
    };

    let infos: Vec<&ShaderInfo> = shaders.iter().map(|s| s.info()).collect();
    check_link(&infos, vertex_array, target_format).map_err(fail)?;

    // check_link guarantees exactly one of each.
    let stage = |wanted: ShaderStage| shaders.iter().find(|s| s.stage() == wanted);
    let (Some(vs), Some(fs)) = (stage(ShaderStage::Vertex), stage(ShaderStage::Fragment)) else {
        return Err(fail("error: incomplete program".to_owned()));
    };

    let pipeline = capture_validation(device, || {
        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some(label),
            bind_group_layouts: &[],
            immediate_size: 0,
        });
        create_pipeline(device, label, vs, fs, vertex_array, target_format, &pipeline_layout)
    })
    .map_err(fail)?;

    log::info!("linked program {label} ({} + {})", vs.info().label, fs.info().label);

    Ok(Program {
        label: label.to_owned(),
        pipeline,
    })
}

fn create_pipeline(
    device: &wgpu::Device,
    label: &str,
    vs: &Shader,
    fs: &Shader,
    vertex_array: &VertexArray,
    target_format: wgpu::TextureFormat,
    layout: &wgpu::PipelineLayout,
) -> wgpu::RenderPipeline {
    device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some(label),
        layout: Some(layout),

        vertex: wgpu::VertexState {
            module: vs.module(),
            entry_point: Some(ENTRY_POINT),
            compilation_options: Default::default(),
            buffers: &[vertex_array.buffer_layout()],
        },

        fragment: Some(wgpu::FragmentState {
            module: fs.module(),
            entry_point: Some(ENTRY_POINT),
            compilation_options: Default::default(),
            targets: &[Some(wgpu::ColorTargetState {
                format: target_format,
                blend: None,
                write_mask: wgpu::ColorWrites::ALL,
            })],
        }),

        primitive: wgpu::PrimitiveState {
            topology: wgpu::PrimitiveTopology::TriangleList,
            strip_index_format: None,
            front_face: wgpu::FrontFace::Ccw,
            cull_mode: None,
            polygon_mode: wgpu::PolygonMode::Fill,
            unclipped_depth: false,
            conservative: false,
        },

        depth_stencil: None,
        multisample: wgpu::MultisampleState::default(),
        multiview_mask: None,
        cache: None,
    })
}
