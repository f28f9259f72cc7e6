use bytemuck::{Pod, Zeroable};

/// Position-only vertex, tightly packed.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
}

impl Vertex {
    #[inline]
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { position: [x, y, z] }
    }

    /// Slot 0: position.
    pub const ATTRS: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![0 => Float32x3];
}

/// The fixed triangle, in normalized device coordinates.
pub const TRIANGLE: [Vertex; 3] = [
    Vertex::new(-0.5, -0.5, 0.0),
    Vertex::new(0.5, -0.5, 0.0),
    Vertex::new(0.0, 0.5, 0.0),
];

/// Raw bytes uploaded to the vertex buffer for `vertices`.
#[inline]
pub fn vertex_bytes(vertices: &[Vertex]) -> &[u8] {
    bytemuck::cast_slice(vertices)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn triangle_is_nine_floats() {
        let floats: &[f32] = bytemuck::cast_slice(&TRIANGLE);
        assert_eq!(
            floats,
            &[-0.5, -0.5, 0.0, 0.5, -0.5, 0.0, 0.0, 0.5, 0.0]
        );
    }

    #[test]
    fn triangle_bytes() {
        assert_eq!(vertex_bytes(&TRIANGLE).len(), 9 * 4);
        assert_eq!(std::mem::size_of::<Vertex>(), 12);
    }
}
