use wgpu::util::DeviceExt;

use super::vertex::{vertex_bytes, Vertex};

/// Attribute layout used to interpret a vertex buffer's bytes.
///
/// Described once at upload time; programs are linked against it and every
/// draw reuses it unchanged.
#[derive(Debug, Clone, PartialEq)]
pub struct VertexArray {
    array_stride: u64,
    attributes: Vec<wgpu::VertexAttribute>,
}

impl VertexArray {
    pub fn new(array_stride: u64, attributes: impl Into<Vec<wgpu::VertexAttribute>>) -> Self {
        Self {
            array_stride,
            attributes: attributes.into(),
        }
    }

    /// Slot 0 = 3 x f32 position, stride 12, offset 0.
    pub fn positions() -> Self {
        Self::new(std::mem::size_of::<Vertex>() as u64, Vertex::ATTRS)
    }

    #[inline]
    pub fn stride(&self) -> u64 {
        self.array_stride
    }

    #[inline]
    pub fn attributes(&self) -> &[wgpu::VertexAttribute] {
        &self.attributes
    }

    /// Attribute feeding shader input `location`, if any.
    pub fn attribute(&self, location: u32) -> Option<&wgpu::VertexAttribute> {
        self.attributes.iter().find(|a| a.shader_location == location)
    }

    pub fn buffer_layout(&self) -> wgpu::VertexBufferLayout<'_> {
        wgpu::VertexBufferLayout {
            array_stride: self.array_stride,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &self.attributes,
        }
    }
}

/// Static GPU copy of vertex data. Never written after upload.
#[derive(Debug)]
pub struct VertexBuffer {
    buffer: wgpu::Buffer,
    vertex_count: u32,
}

impl VertexBuffer {
    pub fn upload(device: &wgpu::Device, label: &str, vertices: &[Vertex]) -> Self {
        let buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(label),
            contents: vertex_bytes(vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });

        Self {
            buffer,
            vertex_count: vertices.len() as u32,
        }
    }

    #[inline]
    pub fn byte_len(&self) -> u64 {
        self.buffer.size()
    }

    #[inline]
    pub fn vertex_count(&self) -> u32 {
        self.vertex_count
    }
}

/// Vertex array + buffer pair for one non-indexed triangle list.
#[derive(Debug)]
pub struct Mesh {
    vertex_array: VertexArray,
    vertex_buffer: VertexBuffer,
}

impl Mesh {
    pub fn upload(device: &wgpu::Device, label: &str, vertices: &[Vertex]) -> Self {
        let vertex_array = VertexArray::positions();
        let vertex_buffer = VertexBuffer::upload(device, label, vertices);

        log::debug!(
            "uploaded mesh {label}: {} vertices, {} bytes, stride {}",
            vertex_buffer.vertex_count(),
            vertex_buffer.byte_len(),
            vertex_array.stride()
        );

        Self {
            vertex_array,
            vertex_buffer,
        }
    }

    pub fn vertex_array(&self) -> &VertexArray {
        &self.vertex_array
    }

    pub fn vertex_buffer(&self) -> &VertexBuffer {
        &self.vertex_buffer
    }

    /// Binds the buffer at slot 0 and draws every vertex as a triangle list.
    pub fn draw(&self, rpass: &mut wgpu::RenderPass<'_>) {
        rpass.set_vertex_buffer(0, self.vertex_buffer.buffer.slice(..));
        rpass.draw(0..self.vertex_buffer.vertex_count, 0..1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::TRIANGLE;

    #[test]
    fn position_layout() {
        let va = VertexArray::positions();
        assert_eq!(va.stride(), 12);

        let [attr] = va.attributes() else {
            panic!("expected a single attribute");
        };
        assert_eq!(attr.shader_location, 0);
        assert_eq!(attr.offset, 0);
        assert_eq!(attr.format, wgpu::VertexFormat::Float32x3);
        assert_eq!(attr.format.size(), 3 * 4);
    }

    #[test]
    fn feeds_only_slot_zero() {
        let va = VertexArray::positions();
        assert_eq!(va.attribute(0).map(|a| a.format), Some(wgpu::VertexFormat::Float32x3));
        assert!(va.attribute(1).is_none());
    }

    #[test]
    fn buffer_layout_is_per_vertex() {
        let va = VertexArray::positions();
        let layout = va.buffer_layout();
        assert_eq!(layout.array_stride, 12);
        assert_eq!(layout.step_mode, wgpu::VertexStepMode::Vertex);
        assert_eq!(layout.attributes.len(), 1);
    }

    #[test]
    fn triangle_upload_holds_nine_floats() {
        let (device, _queue) = crate::device::noop_device();
        let buffer = VertexBuffer::upload(&device, "triangle", &TRIANGLE);

        assert_eq!(buffer.byte_len(), 36);
        assert_eq!(buffer.vertex_count(), 3);
    }

    #[test]
    fn mesh_upload_pairs_buffer_with_position_layout() {
        let (device, _queue) = crate::device::noop_device();
        let mesh = Mesh::upload(&device, "triangle", &TRIANGLE);

        assert_eq!(mesh.vertex_array(), &VertexArray::positions());
        assert_eq!(mesh.vertex_buffer().byte_len(), 3 * mesh.vertex_array().stride());
    }
}
