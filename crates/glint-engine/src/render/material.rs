use std::fmt;

use glam::Vec3;

use super::shader::Program;
use super::texture::TextureSlot;

/// Surface description consumed by the lighting shaders.
#[derive(Debug)]
pub struct Material {
    pub name: String,
    pub shininess: f32,

    pub diffuse_color: Vec3,
    pub specular_color: Vec3,
    pub ambient_color: Vec3,
    pub emissive_color: Vec3,

    pub diffuse_texture: TextureSlot,
    pub specular_texture: TextureSlot,
    pub ambient_texture: TextureSlot,
    pub emissive_texture: TextureSlot,
    pub ao_texture: TextureSlot,
    pub normal_texture: TextureSlot,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            name: String::new(),
            shininess: 0.0,
            diffuse_color: Vec3::ONE,
            specular_color: Vec3::ZERO,
            ambient_color: Vec3::ONE,
            emissive_color: Vec3::ZERO,
            diffuse_texture: TextureSlot::Empty,
            specular_texture: TextureSlot::Empty,
            ambient_texture: TextureSlot::Empty,
            emissive_texture: TextureSlot::Empty,
            ao_texture: TextureSlot::Empty,
            normal_texture: TextureSlot::Empty,
        }
    }
}

impl Material {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Slots in texture-unit order.
    pub fn slots(&self) -> [(&'static str, &TextureSlot); 6] {
        [
            ("diffuse", &self.diffuse_texture),
            ("specular", &self.specular_texture),
            ("ambient", &self.ambient_texture),
            ("emissive", &self.emissive_texture),
            ("ao", &self.ao_texture),
            ("normal", &self.normal_texture),
        ]
    }

    /// Writes the `material` uniform struct and binds slot `i` to unit `i`.
    ///
    /// Empty slots unbind their unit and report `bound = false`.
    pub fn apply(&self, program: &Program) {
        program.set_f32("material.shininess", self.shininess);
        program.set_vec3("material.diffuse_color", self.diffuse_color);
        program.set_vec3("material.specular_color", self.specular_color);
        program.set_vec3("material.ambient_color", self.ambient_color);
        program.set_vec3("material.emissive_color", self.emissive_color);

        for (unit, (slot_name, slot)) in self.slots().into_iter().enumerate() {
            slot.bind(program.gpu(), unit as u32);
            program.set_i32(&format!("material.{slot_name}_texture.texture"), unit as i32);
            program.set_bool(&format!("material.{slot_name}_texture.bound"), !slot.is_empty());
        }
    }
}

impl fmt::Display for Material {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Material {{")?;
        writeln!(f, "  name: {}", self.name)?;
        writeln!(f, "  shininess: {}", self.shininess)?;
        writeln!(f, "  diffuse_color: {}", self.diffuse_color)?;
        writeln!(f, "  specular_color: {}", self.specular_color)?;
        writeln!(f, "  ambient_color: {}", self.ambient_color)?;
        writeln!(f, "  emissive_color: {}", self.emissive_color)?;
        for (slot_name, slot) in self.slots() {
            writeln!(f, "  {slot_name}_texture: {slot}")?;
        }
        write!(f, "}}")
    }
}

/// Index of a material inside a [`Materials`] arena.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct MaterialId(pub u32);

/// Ordered material storage shared by the meshes of one model.
///
/// Meshes hold a [`MaterialId`]; editing a material through `get_mut` is seen
/// by every mesh that refers to it on its next draw.
#[derive(Debug, Default)]
pub struct Materials {
    items: Vec<Material>,
}

impl Materials {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, material: Material) -> MaterialId {
        let id = MaterialId(self.items.len() as u32);
        self.items.push(material);
        id
    }

    pub fn get(&self, id: MaterialId) -> Option<&Material> {
        self.items.get(id.0 as usize)
    }

    pub fn get_mut(&mut self, id: MaterialId) -> Option<&mut Material> {
        self.items.get_mut(id.0 as usize)
    }

    pub fn iter(&self) -> impl Iterator<Item = (MaterialId, &Material)> {
        self.items
            .iter()
            .enumerate()
            .map(|(i, m)| (MaterialId(i as u32), m))
    }

    pub fn ids(&self) -> impl Iterator<Item = MaterialId> + use<> {
        (0..self.items.len() as u32).map(MaterialId)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl FromIterator<Material> for Materials {
    fn from_iter<I: IntoIterator<Item = Material>>(iter: I) -> Self {
        Self {
            items: iter.into_iter().collect(),
        }
    }
}
