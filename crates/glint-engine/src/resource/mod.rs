//! Ownership of driver objects.
//!
//! `ScopedResource<D>` owns one raw id; `D` says how to destroy it. One
//! deleter per object kind, each holding the `Gpu` that created the object.

mod handle;

pub use handle::{ResourceDeleter, ScopedResource};

use crate::device::{Gpu, RawId};

macro_rules! gl_deleter {
    ($(#[$doc:meta])* $name:ident, $method:ident) => {
        $(#[$doc])*
        #[derive(Clone, Debug)]
        pub struct $name(pub Gpu);

        impl ResourceDeleter for $name {
            fn destroy(&self, id: RawId) {
                self.0.$method(id);
            }
        }
    };
}

gl_deleter!(
    /// Deletes buffer objects.
    BufferDeleter,
    delete_buffer
);
gl_deleter!(
    /// Deletes vertex array objects.
    VertexArrayDeleter,
    delete_vertex_array
);
gl_deleter!(
    /// Deletes texture objects.
    TextureDeleter,
    delete_texture
);
gl_deleter!(
    /// Deletes shader stage objects.
    ShaderDeleter,
    delete_shader
);
gl_deleter!(
    /// Deletes linked program objects.
    ProgramDeleter,
    delete_program
);

pub type BufferHandle = ScopedResource<BufferDeleter>;
pub type VertexArrayHandle = ScopedResource<VertexArrayDeleter>;
pub type TextureHandle = ScopedResource<TextureDeleter>;
pub type ShaderHandle = ScopedResource<ShaderDeleter>;
pub type ProgramHandle = ScopedResource<ProgramDeleter>;
