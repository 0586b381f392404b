//! Immediate-mode rendering objects.
//!
//! Everything here owns its GPU objects through `resource` handles and is
//! drawn directly; there is no scene graph or batching.
//!
//! Convention:
//! - Vertex attributes live at fixed slots (see [`Attr`]).
//! - Material texture slot `i` is bound to texture unit `i`.

mod lights;
mod material;
mod mesh;
mod model;
pub mod primitives;
mod shader;
mod texture;
mod vertex;

pub use lights::{DirLight, PointLight, SpotLight};
pub use material::{Material, MaterialId, Materials};
pub use mesh::Mesh;
pub use model::Model;
pub use primitives::Geometry;
pub use shader::{ApplyUniforms, Program, ShaderStage, apply_array};
pub use texture::{Filter, Texture, TextureOptions, TextureSlot, Wrap};
pub use vertex::{Attr, Vertex};
