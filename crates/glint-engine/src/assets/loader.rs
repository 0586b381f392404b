//! Imported scene → GPU [`Model`].

use std::path::{Path, PathBuf};

use crate::device::Gpu;
use crate::error::{Error, Result};
use crate::render::{
    Material, MaterialId, Materials, Mesh, Model, Texture, TextureOptions, TextureSlot, Vertex,
};

use super::gltf_importer::GltfImporter;
use super::import::{AssetImporter, ColorKey, PostProcess, RawMaterial, RawMesh, TextureKind};

/// What to do when a texture path from the asset does not exist.
///
/// Exporters often write absolute paths from the artist's machine. The
/// fallback retries the bare file name next to the asset.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub enum PathFallback {
    /// Retry the file name without logging.
    Silent,
    /// Retry the file name and log both paths.
    #[default]
    Warn,
    /// Use the path as written; a missing file fails the load.
    Disabled,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LoaderConfig {
    /// Post-processing requested from the importer. `PRE_TRANSFORM_VERTICES`
    /// is always added.
    pub flags: PostProcess,
    /// Applied to every texture the model references.
    pub texture_options: TextureOptions,
    pub path_fallback: PathFallback,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            flags: PostProcess::DEFAULT,
            texture_options: TextureOptions::default(),
            path_fallback: PathFallback::default(),
        }
    }
}

/// Resolves a texture path written in an asset against the asset's directory.
pub fn resolve_texture_path(dir: &Path, written: &Path, policy: PathFallback) -> PathBuf {
    let path = dir.join(written);
    if policy == PathFallback::Disabled || path.exists() {
        return path;
    }

    // Paths written on another OS may use either separator.
    let written = written.to_string_lossy();
    let Some(file_name) = written.rsplit(['/', '\\']).next().filter(|n| !n.is_empty()) else {
        return path;
    };
    let fallback = dir.join(file_name);
    if fallback == path {
        return path;
    }
    if policy == PathFallback::Warn {
        log::warn!(
            "texture {} not found, trying {}",
            path.display(),
            fallback.display()
        );
    }
    fallback
}

/// Turns one imported file into a [`Model`]: materials first, then meshes.
pub struct ModelLoader<I = GltfImporter> {
    gpu: Gpu,
    importer: I,
    config: LoaderConfig,
}

impl ModelLoader<GltfImporter> {
    pub fn new(gpu: &Gpu, config: LoaderConfig) -> Self {
        Self::with_importer(gpu, GltfImporter, config)
    }
}

impl<I: AssetImporter> ModelLoader<I> {
    pub fn with_importer(gpu: &Gpu, importer: I, config: LoaderConfig) -> Self {
        Self {
            gpu: gpu.clone(),
            importer,
            config,
        }
    }

    pub fn config(&self) -> &LoaderConfig {
        &self.config
    }

    /// Imports `path` and uploads everything it contains.
    ///
    /// Any failure (import, texture, GPU allocation) aborts the whole load;
    /// objects created so far are released on the way out.
    pub fn load(&self, path: impl AsRef<Path>) -> Result<Model> {
        let path = path.as_ref();
        let flags = self.config.flags | PostProcess::PRE_TRANSFORM_VERTICES;

        let scene = self
            .importer
            .import(path, flags)
            .map_err(|e| Error::decode(path, e.to_string()))?;
        if scene.incomplete {
            return Err(Error::decode(path, "scene is incomplete"));
        }

        let dir = path.parent().unwrap_or(Path::new(""));

        let mut materials = Materials::new();
        let mut ids = Vec::with_capacity(scene.materials.len());
        for raw in &scene.materials {
            ids.push(materials.insert(self.material(raw, dir)?));
        }

        let meshes = scene
            .meshes
            .iter()
            .map(|raw| self.mesh(raw, &ids))
            .collect::<Result<Vec<_>>>()?;

        log::debug!(
            "loaded model {} ({} meshes, {} materials)",
            path.display(),
            meshes.len(),
            materials.len()
        );
        Ok(Model::new(meshes, materials))
    }

    fn material(&self, raw: &RawMaterial, dir: &Path) -> Result<Material> {
        let mut m = Material::named(raw.name().unwrap_or_default());
        if let Some(shininess) = raw.shininess() {
            m.shininess = shininess;
        }
        if let Some(c) = raw.color(ColorKey::Diffuse) {
            m.diffuse_color = c;
        }
        if let Some(c) = raw.color(ColorKey::Specular) {
            m.specular_color = c;
        }
        m.ambient_color = raw.color(ColorKey::Ambient).unwrap_or(m.diffuse_color);
        if let Some(c) = raw.color(ColorKey::Emissive) {
            m.emissive_color = c;
        }

        m.diffuse_texture = self.texture(raw, TextureKind::Diffuse, dir)?;
        m.specular_texture = self.texture(raw, TextureKind::Specular, dir)?;
        m.ambient_texture = self.texture(raw, TextureKind::Ambient, dir)?;
        m.emissive_texture = self.texture(raw, TextureKind::Emissive, dir)?;
        m.ao_texture = self.texture(raw, TextureKind::Lightmap, dir)?;
        m.normal_texture = self.texture(raw, TextureKind::Normals, dir)?;
        Ok(m)
    }

    fn texture(&self, raw: &RawMaterial, kind: TextureKind, dir: &Path) -> Result<TextureSlot> {
        let Some(written) = raw.texture(kind, 0) else {
            return Ok(TextureSlot::Empty);
        };
        let path = resolve_texture_path(dir, written, self.config.path_fallback);
        Ok(Texture::load(&self.gpu, path, &self.config.texture_options)?.into())
    }

    fn mesh(&self, raw: &RawMesh, ids: &[MaterialId]) -> Result<Mesh> {
        let vertices: Vec<Vertex> = raw
            .positions
            .iter()
            .enumerate()
            .map(|(i, &position)| {
                let normal = raw.normals.get(i).copied().unwrap_or_default();
                let uv = raw
                    .tex_coords
                    .as_ref()
                    .and_then(|t| t.get(i))
                    .copied()
                    .unwrap_or_default();
                Vertex::new(position, normal, uv)
            })
            .collect();
        let indices: Vec<u32> = raw.faces.iter().flatten().copied().collect();

        let name = (!raw.name.is_empty()).then(|| raw.name.clone());
        Mesh::with_parts(
            &self.gpu,
            name,
            &vertices,
            &indices,
            ids.get(raw.material_index).copied(),
        )
    }
}

/// Loads a glTF file with default texture options and path fallback.
pub fn load_model(gpu: &Gpu, path: impl AsRef<Path>, flags: PostProcess) -> Result<Model> {
    let config = LoaderConfig {
        flags,
        ..LoaderConfig::default()
    };
    ModelLoader::new(gpu, config).load(path)
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use base64::Engine;
    use glam::Vec3;
    use serde_json::json;

    use super::*;
    use crate::assets::import::{ImportFailure, MaterialProperty, RawScene};
    use crate::device::testing::{ObjectKind, RecordingGl};

    struct FakeImporter {
        scene: RawScene,
        seen_flags: Cell<Option<PostProcess>>,
    }

    impl FakeImporter {
        fn new(scene: RawScene) -> Self {
            Self {
                scene,
                seen_flags: Cell::new(None),
            }
        }
    }

    impl AssetImporter for FakeImporter {
        fn import(
            &self,
            _path: &Path,
            flags: PostProcess,
        ) -> std::result::Result<RawScene, ImportFailure> {
            self.seen_flags.set(Some(flags));
            Ok(self.scene.clone())
        }
    }

    struct FailingImporter;

    impl AssetImporter for FailingImporter {
        fn import(
            &self,
            _path: &Path,
            _flags: PostProcess,
        ) -> std::result::Result<RawScene, ImportFailure> {
            Err(ImportFailure("unexpected end of file".into()))
        }
    }

    fn triangle(name: &str, material_index: usize) -> RawMesh {
        RawMesh {
            name: name.into(),
            positions: vec![[0.0; 3], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]],
            normals: vec![[0.0, 0.0, 1.0]; 3],
            tex_coords: None,
            faces: vec![vec![0, 1, 2]],
            material_index,
        }
    }

    fn named(name: &str) -> RawMaterial {
        RawMaterial::default().with(MaterialProperty::Name(name.into()))
    }

    fn write_png(path: &Path) {
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        ::image::RgbImage::new(2, 2).save(path).unwrap();
    }

    // ── material identity ─────────────────────────────────────────────────

    #[test]
    fn two_materials_three_meshes_keep_sharing() {
        let (gpu, _gl) = RecordingGl::gpu();
        let scene = RawScene {
            materials: vec![named("stone"), named("wood")],
            meshes: vec![triangle("a", 0), triangle("b", 1), triangle("c", 0)],
            incomplete: false,
        };
        let loader = ModelLoader::with_importer(&gpu, FakeImporter::new(scene), LoaderConfig::default());

        let model = loader.load("scene.fake").unwrap();

        let ids: Vec<_> = model.meshes().iter().map(|m| m.material().unwrap()).collect();
        assert_eq!(model.materials().len(), 2);
        assert_eq!(ids[0], ids[2]);
        assert_ne!(ids[0], ids[1]);
        assert_eq!(model.materials().get(ids[1]).unwrap().name, "wood");
        assert_eq!(model.meshes()[1].name(), Some("b"));
    }

    #[test]
    fn pretransform_is_always_requested() {
        let (gpu, _gl) = RecordingGl::gpu();
        let scene = RawScene {
            meshes: vec![triangle("a", 0)],
            ..RawScene::default()
        };
        let importer = FakeImporter::new(scene);
        let config = LoaderConfig {
            flags: PostProcess::TRIANGULATE,
            ..LoaderConfig::default()
        };
        let loader = ModelLoader::with_importer(&gpu, importer, config);

        let model = loader.load("x").unwrap();

        let flags = loader.importer.seen_flags.get().unwrap();
        assert!(flags.contains(PostProcess::PRE_TRANSFORM_VERTICES | PostProcess::TRIANGULATE));
        assert_eq!(model.meshes()[0].material(), None);
        assert_eq!(model.meshes()[0].index_count(), 3);
    }

    #[test]
    fn ambient_falls_back_to_diffuse() {
        let (gpu, _gl) = RecordingGl::gpu();
        let scene = RawScene {
            materials: vec![
                named("plain").with(MaterialProperty::Color(ColorKey::Diffuse, Vec3::new(0.2, 0.4, 0.6))),
                named("lit")
                    .with(MaterialProperty::Color(ColorKey::Diffuse, Vec3::ONE))
                    .with(MaterialProperty::Color(ColorKey::Ambient, Vec3::ZERO))
                    .with(MaterialProperty::Shininess(16.0)),
            ],
            meshes: vec![triangle("a", 0)],
            incomplete: false,
        };
        let loader = ModelLoader::with_importer(&gpu, FakeImporter::new(scene), LoaderConfig::default());

        let model = loader.load("x").unwrap();
        let mats: Vec<&Material> = model.materials().iter().map(|(_, m)| m).collect();

        assert_eq!(mats[0].ambient_color, Vec3::new(0.2, 0.4, 0.6));
        assert_eq!(mats[0].shininess, 0.0);
        assert_eq!(mats[1].ambient_color, Vec3::ZERO);
        assert_eq!(mats[1].shininess, 16.0);
    }

    // ── failures ──────────────────────────────────────────────────────────

    #[test]
    fn importer_failure_is_decode_error() {
        let (gpu, _gl) = RecordingGl::gpu();
        let loader = ModelLoader::with_importer(&gpu, FailingImporter, LoaderConfig::default());
        let err = loader.load("broken.gltf").unwrap_err();
        match err {
            Error::Decode { path, message } => {
                assert_eq!(path, PathBuf::from("broken.gltf"));
                assert_eq!(message, "unexpected end of file");
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn incomplete_scene_is_rejected() {
        let (gpu, gl) = RecordingGl::gpu();
        let scene = RawScene {
            incomplete: true,
            ..RawScene::default()
        };
        let loader = ModelLoader::with_importer(&gpu, FakeImporter::new(scene), LoaderConfig::default());
        assert!(matches!(loader.load("x"), Err(Error::Decode { .. })));
        assert_eq!(gl.live_count(), 0);
    }

    #[test]
    fn missing_texture_fails_and_releases_earlier_objects() {
        let dir = tempfile::tempdir().unwrap();
        write_png(&dir.path().join("ok.png"));
        let (gpu, gl) = RecordingGl::gpu();
        let scene = RawScene {
            materials: vec![
                named("good").with(MaterialProperty::Texture(TextureKind::Diffuse, 0, "ok.png".into())),
                named("bad").with(MaterialProperty::Texture(TextureKind::Diffuse, 0, "gone.png".into())),
            ],
            meshes: vec![triangle("a", 0)],
            incomplete: false,
        };
        let loader = ModelLoader::with_importer(&gpu, FakeImporter::new(scene), LoaderConfig::default());

        let err = loader.load(dir.path().join("scene.fake")).unwrap_err();
        assert!(matches!(err, Error::Io { .. }), "got {err:?}");
        assert_eq!(gl.created_of(ObjectKind::Texture), 1);
        assert_eq!(gl.live_count(), 0);
    }

    // ── texture paths ─────────────────────────────────────────────────────

    #[test]
    fn wrong_directory_falls_back_to_file_name() {
        let dir = tempfile::tempdir().unwrap();
        write_png(&dir.path().join("bricks.png"));

        let resolved = resolve_texture_path(
            dir.path(),
            Path::new("C:\\art\\export\\bricks.png"),
            PathFallback::Warn,
        );
        assert_eq!(resolved, dir.path().join("bricks.png"));

        let resolved = resolve_texture_path(dir.path(), Path::new("maps/bricks.png"), PathFallback::Silent);
        assert_eq!(resolved, dir.path().join("bricks.png"));
    }

    #[test]
    fn existing_path_and_disabled_policy_keep_written_path() {
        let dir = tempfile::tempdir().unwrap();
        write_png(&dir.path().join("maps/bricks.png"));

        let resolved = resolve_texture_path(dir.path(), Path::new("maps/bricks.png"), PathFallback::Warn);
        assert_eq!(resolved, dir.path().join("maps/bricks.png"));

        let resolved = resolve_texture_path(dir.path(), Path::new("old/bricks.png"), PathFallback::Disabled);
        assert_eq!(resolved, dir.path().join("old/bricks.png"));
    }

    #[test]
    fn bare_missing_name_resolves_to_itself() {
        let dir = tempfile::tempdir().unwrap();
        let resolved = resolve_texture_path(dir.path(), Path::new("gone.png"), PathFallback::Warn);
        assert_eq!(resolved, dir.path().join("gone.png"));
    }

    #[test]
    fn texture_kinds_fill_matching_slots() {
        let dir = tempfile::tempdir().unwrap();
        write_png(&dir.path().join("ao.png"));
        write_png(&dir.path().join("n.png"));
        let (gpu, _gl) = RecordingGl::gpu();
        let scene = RawScene {
            materials: vec![
                named("m")
                    .with(MaterialProperty::Texture(TextureKind::Lightmap, 0, "textures/ao.png".into()))
                    .with(MaterialProperty::Texture(TextureKind::Normals, 0, "n.png".into()))
                    .with(MaterialProperty::Texture(TextureKind::Diffuse, 1, "ignored.png".into())),
            ],
            meshes: vec![triangle("a", 0)],
            incomplete: false,
        };
        let loader = ModelLoader::with_importer(&gpu, FakeImporter::new(scene), LoaderConfig::default());

        let model = loader.load(dir.path().join("m.fake")).unwrap();
        let m = model.materials().get(MaterialId(0)).unwrap();

        assert!(!m.ao_texture.is_empty());
        assert!(!m.normal_texture.is_empty());
        assert!(m.diffuse_texture.is_empty());
        assert_eq!(m.ao_texture.texture().unwrap().path(), dir.path().join("ao.png"));
    }

    // ── glTF ──────────────────────────────────────────────────────────────

    /// One triangle under a translated node, with a base-color texture whose
    /// path points into a directory that does not exist.
    fn write_gltf(dir: &Path) -> PathBuf {
        write_gltf_with(dir, [0, 1, 2], "textures/paint.png")
    }

    fn write_gltf_with(dir: &Path, indices: [u32; 3], image_uri: &str) -> PathBuf {
        let positions: [f32; 9] = [0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0];
        let uvs: [f32; 6] = [0.0, 0.0, 1.0, 0.0, 0.0, 1.0];
        let mut bytes = Vec::new();
        bytes.extend_from_slice(bytemuck::cast_slice(&positions));
        bytes.extend_from_slice(bytemuck::cast_slice(&uvs));
        bytes.extend_from_slice(bytemuck::cast_slice(&indices));
        let uri = format!(
            "data:application/octet-stream;base64,{}",
            base64::engine::general_purpose::STANDARD.encode(&bytes)
        );

        let doc = json!({
            "asset": { "version": "2.0" },
            "scene": 0,
            "scenes": [{ "nodes": [0] }],
            "nodes": [{ "mesh": 0, "translation": [0.0, 0.0, 5.0] }],
            "meshes": [{
                "name": "tri",
                "primitives": [{
                    "attributes": { "POSITION": 0, "TEXCOORD_0": 1 },
                    "indices": 2,
                    "material": 0
                }]
            }],
            "materials": [{
                "name": "painted",
                "pbrMetallicRoughness": {
                    "baseColorFactor": [0.5, 0.25, 1.0, 1.0],
                    "roughnessFactor": 0.5,
                    "baseColorTexture": { "index": 0 }
                }
            }],
            "textures": [{ "source": 0 }],
            "images": [{ "uri": image_uri }],
            "buffers": [{ "byteLength": bytes.len(), "uri": uri }],
            "bufferViews": [
                { "buffer": 0, "byteOffset": 0, "byteLength": 36 },
                { "buffer": 0, "byteOffset": 36, "byteLength": 24 },
                { "buffer": 0, "byteOffset": 60, "byteLength": 12 }
            ],
            "accessors": [
                { "bufferView": 0, "componentType": 5126, "count": 3, "type": "VEC3",
                  "min": [0.0, 0.0, 0.0], "max": [1.0, 1.0, 0.0] },
                { "bufferView": 1, "componentType": 5126, "count": 3, "type": "VEC2" },
                { "bufferView": 2, "componentType": 5125, "count": 3, "type": "SCALAR" }
            ]
        });

        let path = dir.join("tri.gltf");
        std::fs::write(&path, serde_json::to_vec_pretty(&doc).unwrap()).unwrap();
        path
    }

    #[test]
    fn gltf_importer_bakes_node_transform() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_gltf(dir.path());

        let scene = GltfImporter.import(&path, PostProcess::DEFAULT).unwrap();

        assert!(!scene.incomplete);
        let mesh = &scene.meshes[0];
        assert_eq!(mesh.name, "tri");
        assert_eq!(mesh.positions[1], [1.0, 0.0, 5.0]);
        assert_eq!(mesh.normals, vec![[0.0, 0.0, 1.0]; 3]);
        assert_eq!(mesh.tex_coords.as_ref().unwrap()[0], [0.0, 1.0]);
        assert_eq!(mesh.faces, vec![vec![0, 1, 2]]);

        let material = &scene.materials[0];
        assert_eq!(material.name(), Some("painted"));
        assert_eq!(material.shininess(), Some(64.0));
        assert_eq!(material.color(ColorKey::Diffuse), Some(Vec3::new(0.5, 0.25, 1.0)));
        assert_eq!(
            material.texture(TextureKind::Diffuse, 0),
            Some(Path::new("textures/paint.png"))
        );
    }

    #[test]
    fn load_model_uploads_gltf_with_texture_fallback() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_gltf(dir.path());
        write_png(&dir.path().join("paint.png"));
        let (gpu, gl) = RecordingGl::gpu();

        let model = load_model(&gpu, &path, PostProcess::DEFAULT).unwrap();

        assert_eq!(model.meshes().len(), 1);
        assert_eq!(model.meshes()[0].index_count(), 3);
        let material = model.materials().get(MaterialId(0)).unwrap();
        assert!(!material.diffuse_texture.is_empty());
        assert_eq!(gl.live_of(ObjectKind::Texture), 1);

        drop(model);
        assert_eq!(gl.live_count(), 0);
    }

    #[test]
    fn out_of_range_index_is_decode_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_gltf_with(dir.path(), [0, 1, 99], "paint.png");
        write_png(&dir.path().join("paint.png"));
        let (gpu, gl) = RecordingGl::gpu();

        let err = load_model(&gpu, &path, PostProcess::DEFAULT).unwrap_err();

        match err {
            Error::Decode { message, .. } => assert!(message.contains("index 99"), "{message}"),
            other => panic!("unexpected {other:?}"),
        }
        assert_eq!(gl.live_count(), 0);
    }

    #[test]
    fn percent_encoded_image_uri_is_decoded() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_gltf_with(dir.path(), [0, 1, 2], "my%20tex.png");
        write_png(&dir.path().join("my tex.png"));

        let scene = GltfImporter.import(&path, PostProcess::DEFAULT).unwrap();
        assert_eq!(
            scene.materials[0].texture(TextureKind::Diffuse, 0),
            Some(Path::new("my tex.png"))
        );

        let (gpu, _gl) = RecordingGl::gpu();
        let model = load_model(&gpu, &path, PostProcess::DEFAULT).unwrap();
        let material = model.materials().get(MaterialId(0)).unwrap();
        assert_eq!(
            material.diffuse_texture.texture().unwrap().path(),
            dir.path().join("my tex.png")
        );
    }

    #[test]
    fn missing_gltf_is_decode_error() {
        let dir = tempfile::tempdir().unwrap();
        let (gpu, _gl) = RecordingGl::gpu();
        let err = load_model(&gpu, dir.path().join("none.gltf"), PostProcess::DEFAULT).unwrap_err();
        assert!(matches!(err, Error::Decode { .. }), "got {err:?}");
    }
}
