//! Importer-side mesh clean-up steps, selected by [`PostProcess`] flags.

use std::collections::HashMap;

use glam::{Mat3, Mat4, Vec3};

use super::import::{PostProcess, RawMesh};

/// Runs every flagged step except pretransform, which needs the node matrix
/// and is applied by the importer while walking the hierarchy.
pub fn apply(mesh: &mut RawMesh, flags: PostProcess) {
    if flags.contains(PostProcess::TRIANGULATE) {
        triangulate(mesh);
    }
    if flags.contains(PostProcess::GEN_NORMALS) && mesh.normals.len() != mesh.positions.len() {
        gen_normals(mesh);
    }
    if flags.contains(PostProcess::JOIN_IDENTICAL_VERTICES) {
        join_identical_vertices(mesh);
    }
    if flags.contains(PostProcess::FLIP_UVS) {
        flip_uvs(mesh);
    }
}

/// Fans polygons into triangles and drops point and line faces.
pub fn triangulate(mesh: &mut RawMesh) {
    let faces = std::mem::take(&mut mesh.faces);
    for face in faces {
        match face.len() {
            0..=2 => {}
            3 => mesh.faces.push(face),
            _ => {
                for i in 1..face.len() - 1 {
                    mesh.faces.push(vec![face[0], face[i], face[i + 1]]);
                }
            }
        }
    }
}

/// Bakes `world` into positions and normals (normals via the inverse transpose).
pub fn pretransform(mesh: &mut RawMesh, world: &Mat4) {
    let normal_matrix = Mat3::from_mat4(*world).inverse().transpose();
    for p in &mut mesh.positions {
        *p = world.transform_point3(Vec3::from(*p)).to_array();
    }
    for n in &mut mesh.normals {
        *n = (normal_matrix * Vec3::from(*n)).normalize_or_zero().to_array();
    }
    // A mirroring transform flips triangle winding.
    if world.determinant() < 0.0 {
        for face in &mut mesh.faces {
            face.reverse();
        }
    }
}

/// Smooth per-vertex normals: area-weighted average of adjacent face normals.
pub fn gen_normals(mesh: &mut RawMesh) {
    let mut acc = vec![Vec3::ZERO; mesh.positions.len()];
    for face in &mesh.faces {
        if face.len() < 3 {
            continue;
        }
        let p = |i: u32| Vec3::from(mesh.positions[i as usize]);
        for k in 1..face.len() - 1 {
            let (a, b, c) = (face[0], face[k], face[k + 1]);
            let n = (p(b) - p(a)).cross(p(c) - p(a));
            for i in [a, b, c] {
                acc[i as usize] += n;
            }
        }
    }
    mesh.normals = acc
        .into_iter()
        .map(|n| n.normalize_or_zero().to_array())
        .collect();
}

/// Merges vertices whose position, normal and UV are bit-identical.
pub fn join_identical_vertices(mesh: &mut RawMesh) {
    let has_normals = mesh.normals.len() == mesh.positions.len();
    let key = |i: usize| -> [u32; 8] {
        let p = mesh.positions[i];
        let n = if has_normals { mesh.normals[i] } else { [0.0; 3] };
        let t = mesh.tex_coords.as_ref().map_or([0.0; 2], |t| t[i]);
        [p[0], p[1], p[2], n[0], n[1], n[2], t[0], t[1]].map(f32::to_bits)
    };

    let mut seen: HashMap<[u32; 8], u32> = HashMap::new();
    let mut remap = Vec::with_capacity(mesh.positions.len());
    let mut keep = Vec::new();
    for i in 0..mesh.positions.len() {
        let next = keep.len() as u32;
        let slot = *seen.entry(key(i)).or_insert(next);
        if slot == next {
            keep.push(i);
        }
        remap.push(slot);
    }
    if keep.len() == mesh.positions.len() {
        return;
    }

    mesh.positions = keep.iter().map(|&i| mesh.positions[i]).collect();
    if has_normals {
        mesh.normals = keep.iter().map(|&i| mesh.normals[i]).collect();
    }
    if let Some(uvs) = &mut mesh.tex_coords {
        *uvs = keep.iter().map(|&i| uvs[i]).collect();
    }
    for face in &mut mesh.faces {
        for idx in face.iter_mut() {
            *idx = remap[*idx as usize];
        }
    }
}

pub fn flip_uvs(mesh: &mut RawMesh) {
    if let Some(uvs) = &mut mesh.tex_coords {
        for uv in uvs {
            uv[1] = 1.0 - uv[1];
        }
    }
}
