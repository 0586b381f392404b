//! glTF 2.0 importer (`.gltf` + `.bin`, or `.glb`).
//!
//! Images are not decoded here; texture references are returned as paths and
//! loaded later by the model loader. Texture coordinates come back with
//! `v = 0` at the bottom of the image.

use std::path::{Path, PathBuf};

use glam::{Mat4, Vec3};
use gltf::mesh::Mode;

use super::import::{
    AssetImporter, ColorKey, ImportFailure, MaterialProperty, PostProcess, RawMaterial, RawMesh,
    RawScene, TextureKind,
};
use super::postprocess;

#[derive(Debug, Default, Clone, Copy)]
pub struct GltfImporter;

impl AssetImporter for GltfImporter {
    fn import(&self, path: &Path, flags: PostProcess) -> Result<RawScene, ImportFailure> {
        let gltf::Gltf { document, blob } = gltf::Gltf::open(path)?;
        let base = path.parent().unwrap_or(Path::new("."));
        let buffers = gltf::import_buffers(&document, Some(base), blob)?;

        let mut walker = Walker {
            buffers: &buffers,
            flags,
            materials: document.materials().map(|m| convert_material(&m)).collect(),
            default_material: None,
            meshes: Vec::new(),
        };

        match document.default_scene().or_else(|| document.scenes().next()) {
            Some(scene) => {
                for node in scene.nodes() {
                    walker.node(&node, Mat4::IDENTITY)?;
                }
            }
            // No scene: every mesh once, untransformed.
            None => {
                for mesh in document.meshes() {
                    walker.mesh(&mesh, None, Mat4::IDENTITY)?;
                }
            }
        }

        if walker.materials.is_empty() {
            walker.default_material();
        }

        Ok(RawScene {
            incomplete: walker.meshes.is_empty(),
            materials: walker.materials,
            meshes: walker.meshes,
        })
    }
}

struct Walker<'a> {
    buffers: &'a [gltf::buffer::Data],
    flags: PostProcess,
    materials: Vec<RawMaterial>,
    default_material: Option<usize>,
    meshes: Vec<RawMesh>,
}

impl Walker<'_> {
    fn node(&mut self, node: &gltf::Node, parent: Mat4) -> Result<(), ImportFailure> {
        let world = parent * Mat4::from_cols_array_2d(&node.transform().matrix());
        if let Some(mesh) = node.mesh() {
            self.mesh(&mesh, node.name(), world)?;
        }
        for child in node.children() {
            self.node(&child, world)?;
        }
        Ok(())
    }

    fn mesh(
        &mut self,
        mesh: &gltf::Mesh,
        node_name: Option<&str>,
        world: Mat4,
    ) -> Result<(), ImportFailure> {
        let name = mesh.name().or(node_name).unwrap_or_default();
        let buffers = self.buffers;

        for primitive in mesh.primitives() {
            let mode = primitive.mode();
            if self.flags.contains(PostProcess::TRIANGULATE)
                && matches!(mode, Mode::Points | Mode::Lines | Mode::LineLoop | Mode::LineStrip)
            {
                log::warn!("skipping {mode:?} primitive in mesh '{name}'");
                continue;
            }

            let reader = primitive.reader(|buffer| Some(&*buffers[buffer.index()]));
            let positions: Vec<[f32; 3]> = reader
                .read_positions()
                .ok_or_else(|| ImportFailure(format!("mesh '{name}' has no positions")))?
                .collect();
            let normals: Vec<[f32; 3]> =
                reader.read_normals().map(Iterator::collect).unwrap_or_default();
            // glTF puts v = 0 at the top of the image; flip to the GL convention
            // used by flipped texture uploads.
            let tex_coords = reader
                .read_tex_coords(0)
                .map(|tc| tc.into_f32().map(|[u, v]| [u, 1.0 - v]).collect::<Vec<_>>());
            let indices: Vec<u32> = match reader.read_indices() {
                Some(indices) => indices.into_u32().collect(),
                None => (0..positions.len() as u32).collect(),
            };
            // Post-processing indexes vertex arrays directly.
            if let Some(&i) = indices.iter().find(|&&i| i as usize >= positions.len()) {
                return Err(ImportFailure(format!("mesh '{name}': index {i} out of range")));
            }

            let material_index = match primitive.material().index() {
                Some(i) => i,
                None => self.default_material(),
            };

            let mut raw = RawMesh {
                name: name.to_string(),
                positions,
                normals,
                tex_coords,
                faces: faces(mode, &indices),
                material_index,
            };
            if self.flags.contains(PostProcess::PRE_TRANSFORM_VERTICES) {
                postprocess::pretransform(&mut raw, &world);
            }
            postprocess::apply(&mut raw, self.flags);
            self.meshes.push(raw);
        }
        Ok(())
    }

    /// Index of the fallback material, appended on first use.
    fn default_material(&mut self) -> usize {
        *self.default_material.get_or_insert_with(|| {
            self.materials.push(
                RawMaterial::default()
                    .with(MaterialProperty::Name("default".into()))
                    .with(MaterialProperty::Color(ColorKey::Diffuse, Vec3::ONE)),
            );
            self.materials.len() - 1
        })
    }
}

/// Splits an index stream into faces according to the primitive mode.
fn faces(mode: Mode, idx: &[u32]) -> Vec<Vec<u32>> {
    match mode {
        Mode::Points => idx.iter().map(|&i| vec![i]).collect(),
        Mode::Lines => idx.chunks_exact(2).map(<[u32]>::to_vec).collect(),
        Mode::LineStrip => idx.windows(2).map(<[u32]>::to_vec).collect(),
        Mode::LineLoop => {
            let mut out: Vec<Vec<u32>> = idx.windows(2).map(<[u32]>::to_vec).collect();
            if idx.len() > 2 {
                out.push(vec![idx[idx.len() - 1], idx[0]]);
            }
            out
        }
        Mode::Triangles => idx.chunks_exact(3).map(<[u32]>::to_vec).collect(),
        // Odd triangles swap their first two vertices to keep winding consistent.
        Mode::TriangleStrip => (0..idx.len().saturating_sub(2))
            .map(|i| match i % 2 {
                0 => vec![idx[i], idx[i + 1], idx[i + 2]],
                _ => vec![idx[i + 1], idx[i], idx[i + 2]],
            })
            .collect(),
        Mode::TriangleFan => (1..idx.len().saturating_sub(1))
            .map(|i| vec![idx[0], idx[i], idx[i + 1]])
            .collect(),
    }
}

fn texture_path(texture: &gltf::Texture) -> Option<PathBuf> {
    match texture.source().source() {
        gltf::image::Source::Uri { uri, .. } if !uri.starts_with("data:") => {
            // URIs are percent-encoded (`my%20tex.png`).
            let path = urlencoding::decode(uri)
                .map_or_else(|_| uri.to_string(), |decoded| decoded.into_owned());
            Some(PathBuf::from(path))
        }
        _ => {
            log::warn!(
                "embedded image {} is not supported; texture slot left empty",
                texture.source().index()
            );
            None
        }
    }
}

fn convert_material(m: &gltf::Material) -> RawMaterial {
    let pbr = m.pbr_metallic_roughness();
    let [r, g, b, _] = pbr.base_color_factor();
    let mut raw = RawMaterial::default()
        .with(MaterialProperty::Name(m.name().unwrap_or_default().to_string()))
        .with(MaterialProperty::Shininess(
            (1.0 - pbr.roughness_factor()).clamp(0.0, 1.0) * 128.0,
        ))
        .with(MaterialProperty::Color(ColorKey::Diffuse, Vec3::new(r, g, b)))
        .with(MaterialProperty::Color(
            ColorKey::Emissive,
            Vec3::from(m.emissive_factor()),
        ));

    let textures = [
        (TextureKind::Diffuse, pbr.base_color_texture().map(|t| t.texture())),
        (TextureKind::Specular, pbr.metallic_roughness_texture().map(|t| t.texture())),
        (TextureKind::Emissive, m.emissive_texture().map(|t| t.texture())),
        (TextureKind::Lightmap, m.occlusion_texture().map(|t| t.texture())),
        (TextureKind::Normals, m.normal_texture().map(|t| t.texture())),
    ];
    for (kind, texture) in textures {
        if let Some(path) = texture.as_ref().and_then(texture_path) {
            raw.properties.push(MaterialProperty::Texture(kind, 0, path));
        }
    }
    raw
}
