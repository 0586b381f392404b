//! Built-in CPU geometry: quads, a unit cube and a UV sphere.

use std::f32::consts::{PI, TAU};

use glam::{Mat3, Vec2, Vec3};

use crate::device::Gpu;
use crate::error::Result;

use super::mesh::Mesh;
use super::vertex::Vertex;

/// Vertex and index lists not yet on the GPU.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Geometry {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
}

impl Geometry {
    pub fn upload(&self, gpu: &Gpu) -> Result<Mesh> {
        Mesh::new(gpu, &self.vertices, &self.indices)
    }
}

/// Two triangles per quad, for `n` quads of 4 consecutive vertices each.
pub fn quad_indices(n: u32) -> Vec<u32> {
    (0..n)
        .flat_map(|i| {
            let b = 4 * i;
            [b, b + 1, b + 2, b + 2, b + 3, b]
        })
        .collect()
}

/// Indices for an `m × n` grid of quads over an `(m + 1) × (n + 1)` vertex lattice.
pub fn quad_grid_indices(m: u32, n: u32) -> Vec<u32> {
    let row = n + 1;
    let mut indices = Vec::with_capacity(6 * (m * n) as usize);
    for i in 0..m {
        for j in 0..n {
            let (a, b) = (row * i + j, row * i + j + 1);
            let (c, d) = (row * (i + 1) + j + 1, row * (i + 1) + j);
            indices.extend_from_slice(&[a, b, c, c, d, a]);
        }
    }
    indices
}

/// Unit normal of the counter-clockwise triangle `p0 p1 p2`.
pub fn tri_normal(p0: Vec3, p1: Vec3, p2: Vec3) -> Vec3 {
    (p1 - p0).cross(p2 - p0).normalize()
}

const QUAD_UVS: [[f32; 2]; 4] = [[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]];

/// Flat-shaded quad through four counter-clockwise corners.
pub fn quad(p0: Vec3, p1: Vec3, p2: Vec3, p3: Vec3) -> Geometry {
    let n = tri_normal(p0, p1, p3).to_array();
    let vertices = [p0, p1, p2, p3]
        .into_iter()
        .zip(QUAD_UVS)
        .map(|(p, uv)| Vertex::new(p.to_array(), n, uv))
        .collect();
    Geometry {
        vertices,
        indices: quad_indices(1),
    }
}

/// Like [`quad`], but each corner gets the normal of its own corner triangle,
/// so non-planar quads shade smoothly.
pub fn smooth_quad(p0: Vec3, p1: Vec3, p2: Vec3, p3: Vec3) -> Geometry {
    let normals = [
        tri_normal(p0, p1, p3),
        tri_normal(p1, p2, p0),
        tri_normal(p2, p3, p1),
        tri_normal(p3, p0, p2),
    ];
    let vertices = [p0, p1, p2, p3]
        .into_iter()
        .zip(normals)
        .zip(QUAD_UVS)
        .map(|((p, n), uv)| Vertex::new(p.to_array(), n.to_array(), uv))
        .collect();
    Geometry {
        vertices,
        indices: quad_indices(1),
    }
}

// `orient` columns: face x axis, face y axis, face normal.
// `net` is the face's cell in a 4×3 cube-net texture, from the bottom left.
fn cube_face(orient: Mat3, net: Vec2) -> [Vertex; 4] {
    const NET: Vec2 = Vec2::new(4.0, 3.0);
    let normal = orient.z_axis.to_array();
    QUAD_UVS.map(|uv| {
        let corner = Vec2::from(uv);
        let position = orient * (corner.extend(1.0) - 0.5);
        let tex = (net + corner) / NET;
        Vertex::new(position.to_array(), normal, tex.to_array())
    })
}

/// Unit cube centred on the origin: 24 vertices, one flat quad per face.
pub fn cube() -> Geometry {
    let face = |x: Vec3, y: Vec3, n: Vec3, net: [f32; 2]| {
        cube_face(Mat3::from_cols(x, y, n), Vec2::from(net))
    };
    let faces = [
        face(Vec3::NEG_X, Vec3::Y, Vec3::NEG_Z, [3.0, 1.0]), // back
        face(Vec3::X, Vec3::Y, Vec3::Z, [1.0, 1.0]),         // front
        face(Vec3::Z, Vec3::Y, Vec3::NEG_X, [0.0, 1.0]),     // left
        face(Vec3::NEG_Z, Vec3::Y, Vec3::X, [2.0, 1.0]),     // right
        face(Vec3::X, Vec3::Z, Vec3::NEG_Y, [1.0, 0.0]),     // bottom
        face(Vec3::X, Vec3::NEG_Z, Vec3::Y, [1.0, 2.0]),     // top
    ];
    Geometry {
        vertices: faces.into_iter().flatten().collect(),
        indices: quad_indices(6),
    }
}

/// Unit sphere with `nlat` rings and `nlon` segments.
///
/// The seam column is duplicated so `u` runs 0..=1 without wrapping.
pub fn sphere(nlat: u32, nlon: u32) -> Geometry {
    let mut vertices = Vec::with_capacity(((nlat + 1) * (nlon + 1)) as usize);
    for i in 0..=nlat {
        for j in 0..=nlon {
            let theta = (j % nlon) as f32 / nlon as f32 * TAU;
            let phi = i as f32 / nlat as f32 * PI;
            let p = [
                theta.cos() * phi.sin(),
                -phi.cos(),
                -theta.sin() * phi.sin(),
            ];
            let uv = [j as f32 / nlon as f32, i as f32 / nlat as f32];
            vertices.push(Vertex::new(p, p, uv));
        }
    }
    Geometry {
        vertices,
        indices: quad_grid_indices(nlat, nlon),
    }
}

pub fn make_quad(gpu: &Gpu, p0: Vec3, p1: Vec3, p2: Vec3, p3: Vec3) -> Result<Mesh> {
    quad(p0, p1, p2, p3).upload(gpu)
}

pub fn make_cube(gpu: &Gpu) -> Result<Mesh> {
    cube().upload(gpu)
}

pub fn make_sphere(gpu: &Gpu, nlat: u32, nlon: u32) -> Result<Mesh> {
    sphere(nlat, nlon).upload(gpu)
}
