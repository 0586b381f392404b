use std::fmt;

use crate::device::{Gpu, NO_ID, RawId};
use crate::error::{Error, Result};
use crate::resource::{BufferDeleter, BufferHandle, VertexArrayDeleter, VertexArrayHandle};

use super::material::{MaterialId, Materials};
use super::shader::Program;
use super::vertex::Vertex;

fn refused(kind: &'static str) -> impl FnOnce(String) -> Error {
    move |message| Error::Resource { kind, message }
}

/// Indexed triangle geometry resident on the GPU.
///
/// Owns one vertex array and its two buffers; all three are deleted together
/// when the mesh drops. The material is referenced by id into the owning
/// model's [`Materials`].
pub struct Mesh {
    name: Option<String>,
    vao: VertexArrayHandle,
    vbo: BufferHandle,
    ebo: BufferHandle,
    index_count: i32,
    material: Option<MaterialId>,
}

impl Mesh {
    /// Uploads unnamed geometry with no material.
    pub fn new(gpu: &Gpu, vertices: &[Vertex], indices: &[u32]) -> Result<Self> {
        Self::with_parts(gpu, None, vertices, indices, None)
    }

    /// Uploads `vertices` and `indices` verbatim.
    ///
    /// Every index must be smaller than `vertices.len()`; this is not checked.
    pub fn with_parts(
        gpu: &Gpu,
        name: Option<String>,
        vertices: &[Vertex],
        indices: &[u32],
        material: Option<MaterialId>,
    ) -> Result<Self> {
        let vao = VertexArrayHandle::new(
            gpu.create_vertex_array().map_err(refused("vertex array"))?,
            VertexArrayDeleter(gpu.clone()),
        );
        let vbo = BufferHandle::new(
            gpu.create_buffer().map_err(refused("vertex buffer"))?,
            BufferDeleter(gpu.clone()),
        );
        let ebo = BufferHandle::new(
            gpu.create_buffer().map_err(refused("index buffer"))?,
            BufferDeleter(gpu.clone()),
        );

        gpu.bind_vertex_array(vao.id());

        gpu.bind_buffer(glow::ARRAY_BUFFER, vbo.id());
        gpu.buffer_data(
            glow::ARRAY_BUFFER,
            bytemuck::cast_slice(vertices),
            glow::STATIC_DRAW,
        );

        gpu.bind_buffer(glow::ELEMENT_ARRAY_BUFFER, ebo.id());
        gpu.buffer_data(
            glow::ELEMENT_ARRAY_BUFFER,
            bytemuck::cast_slice(indices),
            glow::STATIC_DRAW,
        );

        for (attr, size, offset) in Vertex::ATTRS {
            gpu.enable_vertex_attrib_array(attr as u32);
            gpu.vertex_attrib_pointer_f32(attr as u32, size, Vertex::STRIDE, offset);
        }

        gpu.bind_vertex_array(NO_ID);

        log::debug!(
            "uploaded mesh {} ({} vertices, {} indices)",
            name.as_deref().unwrap_or("<unnamed>"),
            vertices.len(),
            indices.len()
        );

        Ok(Self {
            name,
            vao,
            vbo,
            ebo,
            index_count: indices.len() as i32,
            material,
        })
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_material(mut self, material: MaterialId) -> Self {
        self.material = Some(material);
        self
    }

    /// Applies the mesh's material (when both it and `program` are present),
    /// then issues one indexed triangle draw.
    pub fn draw(&self, program: Option<&Program>, materials: &Materials) {
        if let (Some(program), Some(material)) =
            (program, self.material.and_then(|id| materials.get(id)))
        {
            material.apply(program);
        }

        let gpu = &self.vao.deleter().0;
        gpu.bind_vertex_array(self.vao.id());
        gpu.draw_elements(glow::TRIANGLES, self.index_count, glow::UNSIGNED_INT, 0);
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn index_count(&self) -> usize {
        self.index_count as usize
    }

    pub fn material(&self) -> Option<MaterialId> {
        self.material
    }

    pub fn set_material(&mut self, material: Option<MaterialId>) {
        self.material = material;
    }

    pub fn vao(&self) -> RawId {
        self.vao.id()
    }

    pub fn vbo(&self) -> RawId {
        self.vbo.id()
    }

    pub fn ebo(&self) -> RawId {
        self.ebo.id()
    }
}

impl fmt::Debug for Mesh {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Mesh")
            .field("name", &self.name)
            .field("vao", &self.vao.id())
            .field("index_count", &self.index_count)
            .field("material", &self.material)
            .finish()
    }
}
