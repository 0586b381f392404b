//! File formats in, GPU objects out.
//!
//! `image` decodes texture files, `import` + `gltf_importer` read scenes into
//! a flat intermediate form, and `loader` turns that form into a `Model`.

mod gltf_importer;
pub mod image;
pub mod import;
mod loader;
pub mod postprocess;

pub use gltf_importer::GltfImporter;
pub use import::{AssetImporter, ImportFailure, PostProcess, RawMaterial, RawMesh, RawScene};
pub use loader::{LoaderConfig, ModelLoader, PathFallback, load_model, resolve_texture_path};
