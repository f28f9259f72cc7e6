//! GPU device + surface management.
//!
//! This module is responsible for:
//! - creating the wgpu Instance/Adapter/Device/Queue under a minimum capability profile
//! - creating & configuring the Surface (swapchain) and tracking the viewport
//! - acquiring frames and providing encoders/views for rendering

mod gpu;
mod init;
mod surface;

pub use gpu::{Gpu, GpuFrame};
pub use init::{CapabilityProfile, GpuInit};
pub use surface::SurfaceErrorAction;

use winit::dpi::PhysicalSize;

use crate::coords::Viewport;

/// Something that renders into a viewport of a resizable framebuffer.
pub trait ViewportTarget {
    fn set_viewport(&mut self, framebuffer: PhysicalSize<u32>, viewport: Viewport);
}

/// Device + queue on wgpu's no-op backend; accepts and validates every call
/// without touching real hardware.
#[cfg(test)]
pub(crate) fn noop_device() -> (wgpu::Device, wgpu::Queue) {
    wgpu::Device::noop(&wgpu::DeviceDescriptor {
        label: Some("trigon test device"),
        ..Default::default()
    })
}
