//! Scene import boundary.
//!
//! An [`AssetImporter`] turns a file into a flat [`RawScene`]: a list of
//! materials described as key/value properties and a list of meshes whose
//! transforms are already applied. The model loader only sees this form.

use std::fmt;
use std::path::{Path, PathBuf};

use bitflags::bitflags;
use glam::Vec3;

bitflags! {
    /// Post-processing steps applied by the importer.
    #[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
    pub struct PostProcess: u32 {
        /// Build smooth normals for meshes that have none.
        const GEN_NORMALS = 1 << 0;
        /// Merge bit-identical vertices and reindex faces.
        const JOIN_IDENTICAL_VERTICES = 1 << 1;
        /// Split polygons into triangles; drop points and lines.
        const TRIANGULATE = 1 << 2;
        /// Bake node transforms into vertex data.
        const PRE_TRANSFORM_VERTICES = 1 << 3;
        /// Replace `v` with `1 - v` in texture coordinates.
        const FLIP_UVS = 1 << 4;

        const DEFAULT = Self::GEN_NORMALS.bits()
            | Self::JOIN_IDENTICAL_VERTICES.bits()
            | Self::TRIANGULATE.bits()
            | Self::PRE_TRANSFORM_VERTICES.bits();
    }
}

impl Default for PostProcess {
    fn default() -> Self {
        Self::DEFAULT
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum ColorKey {
    Diffuse,
    Specular,
    Ambient,
    Emissive,
}

/// Texture usage as declared by the source file.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum TextureKind {
    Diffuse,
    Specular,
    Ambient,
    Emissive,
    /// Baked lighting / ambient occlusion.
    Lightmap,
    Normals,
}

#[derive(Debug, Clone, PartialEq)]
pub enum MaterialProperty {
    Name(String),
    Shininess(f32),
    Color(ColorKey, Vec3),
    /// `(kind, index within kind, path as written in the file)`.
    Texture(TextureKind, u32, PathBuf),
}

/// Imported material as an ordered property list.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawMaterial {
    pub properties: Vec<MaterialProperty>,
}

impl RawMaterial {
    pub fn with(mut self, property: MaterialProperty) -> Self {
        self.properties.push(property);
        self
    }

    pub fn name(&self) -> Option<&str> {
        self.properties.iter().find_map(|p| match p {
            MaterialProperty::Name(n) => Some(n.as_str()),
            _ => None,
        })
    }

    pub fn shininess(&self) -> Option<f32> {
        self.properties.iter().find_map(|p| match p {
            MaterialProperty::Shininess(s) => Some(*s),
            _ => None,
        })
    }

    pub fn color(&self, key: ColorKey) -> Option<Vec3> {
        self.properties.iter().find_map(|p| match p {
            MaterialProperty::Color(k, c) if *k == key => Some(*c),
            _ => None,
        })
    }

    pub fn texture(&self, kind: TextureKind, index: u32) -> Option<&Path> {
        self.properties.iter().find_map(|p| match p {
            MaterialProperty::Texture(k, i, path) if *k == kind && *i == index => {
                Some(path.as_path())
            }
            _ => None,
        })
    }
}

/// Imported mesh. Positions and normals are in model space.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawMesh {
    pub name: String,
    pub positions: Vec<[f32; 3]>,
    /// Empty when the source has none and normals were not generated.
    pub normals: Vec<[f32; 3]>,
    /// UV channel 0, if present.
    pub tex_coords: Option<Vec<[f32; 2]>>,
    pub faces: Vec<Vec<u32>>,
    pub material_index: usize,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawScene {
    pub materials: Vec<RawMaterial>,
    pub meshes: Vec<RawMesh>,
    /// Set when the importer could only read part of the file.
    pub incomplete: bool,
}

/// Importer-side failure; the loader wraps it with the file path.
#[derive(Debug, Clone, PartialEq)]
pub struct ImportFailure(pub String);

impl fmt::Display for ImportFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl<E: std::error::Error> From<E> for ImportFailure {
    fn from(err: E) -> Self {
        Self(err.to_string())
    }
}

pub trait AssetImporter {
    fn import(&self, path: &Path, flags: PostProcess) -> Result<RawScene, ImportFailure>;
}
