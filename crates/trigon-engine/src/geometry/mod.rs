//! Static vertex geometry.

mod mesh;
mod vertex;

pub use mesh::{Mesh, VertexArray, VertexBuffer};
pub use vertex::{vertex_bytes, Vertex, TRIANGLE};
