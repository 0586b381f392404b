use bytemuck::{Pod, Zeroable};

/// Fixed attribute slots shared by every mesh and shader.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
#[repr(u32)]
pub enum Attr {
    Position = 0,
    Normal = 1,
    TexCoords = 2,
}

/// Interleaved mesh vertex. Uploaded verbatim, so the layout is fixed.
#[repr(C)]
#[derive(Debug, Copy, Clone, Default, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub tex_coords: [f32; 2],
}

impl Vertex {
    pub const STRIDE: i32 = std::mem::size_of::<Vertex>() as i32;

    /// `(slot, component count, byte offset)` for each attribute.
    pub const ATTRS: [(Attr, i32, i32); 3] = [
        (Attr::Position, 3, std::mem::offset_of!(Vertex, position) as i32),
        (Attr::Normal, 3, std::mem::offset_of!(Vertex, normal) as i32),
        (Attr::TexCoords, 2, std::mem::offset_of!(Vertex, tex_coords) as i32),
    ];

    #[inline]
    pub const fn new(position: [f32; 3], normal: [f32; 3], tex_coords: [f32; 2]) -> Self {
        Self {
            position,
            normal,
            tex_coords,
        }
    }
}
