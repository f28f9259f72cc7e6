use anyhow::Result;

/// Minimum capabilities an adapter must offer before a context is created.
///
/// The default profile corresponds to an OpenGL 3.3 core class device:
/// downlevel limits and at least shader model 4.
#[derive(Debug, Clone)]
pub struct CapabilityProfile {
    /// Limits the adapter must meet or exceed.
    pub limits: wgpu::Limits,

    /// Lowest acceptable shader model.
    pub min_shader_model: wgpu::ShaderModel,
}

impl CapabilityProfile {
    pub fn gl33_core() -> Self {
        Self {
            limits: wgpu::Limits::downlevel_defaults(),
            min_shader_model: wgpu::ShaderModel::Sm4,
        }
    }

    /// Fails with a readable reason when `adapter` falls short of the profile.
    pub(crate) fn check(&self, adapter: &wgpu::Adapter) -> Result<()> {
        let caps = adapter.get_downlevel_capabilities();
        anyhow::ensure!(
            caps.shader_model >= self.min_shader_model,
            "adapter supports shader model {:?}, {:?} or newer is required",
            caps.shader_model,
            self.min_shader_model
        );
        anyhow::ensure!(
            self.limits.check_limits(&adapter.limits()),
            "adapter limits are below the requested capability profile"
        );
        Ok(())
    }
}

impl Default for CapabilityProfile {
    fn default() -> Self {
        Self::gl33_core()
    }
}

/// Initialization parameters for the GPU layer.
#[derive(Debug, Clone)]
pub struct GpuInit {
    /// Prefer an sRGB surface format when available.
    ///
    /// With `false`, clear colors and fragment outputs reach the screen unconverted.
    pub prefer_srgb: bool,

    /// Present mode (swap behavior).
    ///
    /// FIFO waits for vertical blank; whether that throttles the loop is up to the driver.
    pub present_mode: wgpu::PresentMode,

    /// Optional alpha mode preference for the surface.
    ///
    /// If provided but unsupported on the current surface, a supported mode is selected.
    pub alpha_mode: Option<wgpu::CompositeAlphaMode>,

    /// Required wgpu features.
    pub required_features: wgpu::Features,

    /// Capabilities the adapter must have.
    pub profile: CapabilityProfile,

    /// Desired maximum frame latency for the surface.
    pub desired_maximum_frame_latency: u32,
}

impl Default for GpuInit {
    fn default() -> Self {
        Self {
            prefer_srgb: true,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode: None,
            required_features: wgpu::Features::empty(),
            profile: CapabilityProfile::default(),
            desired_maximum_frame_latency: 2,
        }
    }
}
