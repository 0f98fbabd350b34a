use glam::{Vec2, Vec3};
use std::fmt::{Debug, Formatter};

#[derive(Clone, Default)]
pub struct Mesh {
    pub name: String,
    pub vertex_buffers: VertexBuffers,
    pub index_buffer: Vec<u32>,
    /// One entry per triangle, the resolved texture file name (if any).
    pub triangle_textures: Vec<Option<String>>,
}

impl Debug for Mesh {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{{ name: {:?}, ", self.name)?;
        write!(f, "vertex_buffers: {:?}, ", self.vertex_buffers)?;
        write!(f, "index_buffer: [{}], ", self.index_buffer.len())?;
        write!(f, "triangle_textures: [{}] }}", self.triangle_textures.len())
    }
}

#[derive(Clone, Default)]
pub struct VertexBuffers {
    pub position_buffer: Vec<Vec3>,
    pub normals_buffer: Vec<Vec3>,
    pub texcoord_buffer_0: Vec<Vec2>,
}

impl Debug for VertexBuffers {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{{ position_buffer: [{}], ", self.position_buffer.len())?;
        write!(f, "normals_buffer: [{}], ", self.normals_buffer.len())?;
        write!(f, "texcoord_buffer_0: [{}] }}", self.texcoord_buffer_0.len())
    }
}
