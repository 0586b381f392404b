use super::material::Materials;
use super::mesh::Mesh;
use super::shader::Program;

/// A list of meshes plus the materials they refer to.
///
/// Meshes are drawn in order, each issuing its own draw call.
#[derive(Debug, Default)]
pub struct Model {
    meshes: Vec<Mesh>,
    materials: Materials,
}

impl Model {
    pub fn new(meshes: Vec<Mesh>, materials: Materials) -> Self {
        Self { meshes, materials }
    }

    pub fn draw(&self, program: Option<&Program>) {
        for mesh in &self.meshes {
            mesh.draw(program, &self.materials);
        }
    }

    pub fn meshes(&self) -> &[Mesh] {
        &self.meshes
    }

    pub fn meshes_mut(&mut self) -> &mut [Mesh] {
        &mut self.meshes
    }

    pub fn materials(&self) -> &Materials {
        &self.materials
    }

    /// Edits made here reach every mesh sharing the material on the next draw.
    pub fn materials_mut(&mut self) -> &mut Materials {
        &mut self.materials
    }

    /// Replaces the mesh list, dropping (and deleting) the previous meshes.
    pub fn set_meshes(&mut self, meshes: Vec<Mesh>) {
        self.meshes = meshes;
    }

    /// Replaces the arena. Mesh material ids are not remapped.
    pub fn set_materials(&mut self, materials: Materials) {
        self.materials = materials;
    }
}
