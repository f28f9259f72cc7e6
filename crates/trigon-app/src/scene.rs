use std::path::PathBuf;

use trigon_engine::core::{App, AppControl, FrameCtx, StartCtx};
use trigon_engine::coords::ColorRgba;
use trigon_engine::geometry::{Mesh, TRIANGLE};
use trigon_engine::input::{InputState, Key};
use trigon_engine::shader::{link_program, load_shader_file, Program, ShaderOptions, ShaderStage};
use trigon_engine::window::RenderLoop;
use trigon_engine::BootstrapError;

/// What the scene loads and how it clears.
#[derive(Debug, Clone)]
pub struct SceneConfig {
    /// Resolved against the working directory, not the executable.
    pub vertex_shader: PathBuf,
    pub fragment_shader: PathBuf,
    pub clear_color: ColorRgba,
    pub shader_options: ShaderOptions,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            vertex_shader: PathBuf::from("shaders/vertex.glsl"),
            fragment_shader: PathBuf::from("shaders/fragment.glsl"),
            clear_color: ColorRgba::opaque(0.2, 0.3, 0.3),
            shader_options: ShaderOptions::default(),
        }
    }
}

struct SceneResources {
    program: Program,
    mesh: Mesh,
}

/// One static triangle drawn with one program, every frame.
pub struct TriangleScene {
    config: SceneConfig,
    resources: Option<SceneResources>,
}

impl TriangleScene {
    pub fn new(config: SceneConfig) -> Self {
        Self {
            config,
            resources: None,
        }
    }

    /// Uploads the triangle, then compiles and links the configured shaders
    /// for `target_format`.
    fn load(
        &mut self,
        device: &wgpu::Device,
        target_format: wgpu::TextureFormat,
    ) -> Result<(), BootstrapError> {
        let options = &self.config.shader_options;

        let mesh = Mesh::upload(device, "triangle", &TRIANGLE);

        let config = &self.config;

        let vertex = load_shader_file(&config.vertex_shader, ShaderStage::Vertex, options)?
            .upload(device, options)?;
        let fragment = load_shader_file(&config.fragment_shader, ShaderStage::Fragment, options)?
            .upload(device, options)?;

        let program = link_program(
            device,
            "triangle program",
            &[&vertex, &fragment],
            mesh.vertex_array(),
            target_format,
            options,
        )?;

        // The program keeps what it needs from the shader objects.
        drop(vertex);
        drop(fragment);

        self.resources = Some(SceneResources { program, mesh });
        Ok(())
    }
}

/// Escape held during a frame ends the loop after that frame.
fn close_on_escape(input: &InputState, render_loop: &mut RenderLoop) {
    if input.key_down(Key::Escape) {
        render_loop.request_close();
    }
}

impl App for TriangleScene {
    fn on_start(&mut self, ctx: &mut StartCtx<'_, '_>) -> Result<(), BootstrapError> {
        self.load(ctx.device(), ctx.surface_format())
    }

    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        close_on_escape(ctx.input, ctx.render_loop);

        let Some(res) = self.resources.as_ref() else {
            return AppControl::Continue;
        };

        ctx.render(self.config.clear_color, |rpass| {
            res.program.bind(rpass);
            res.mesh.draw(rpass);
        })
    }
}
