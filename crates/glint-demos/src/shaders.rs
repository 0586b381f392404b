//! GLSL programs used by the demos.
//!
//! Sources are embedded at build time. A shader directory given on the
//! command line takes precedence, which makes shader edits possible without
//! a rebuild.

use std::path::Path;

use glint_engine::device::Gpu;
use glint_engine::render::Program;

/// A vertex + fragment source pair, named after its files in `shaders/`.
#[derive(Debug, Copy, Clone)]
pub struct ShaderPair {
    pub name: &'static str,
    pub vertex: &'static str,
    pub fragment: &'static str,
}

pub const FLAT: ShaderPair = ShaderPair {
    name: "flat",
    vertex: include_str!("../shaders/flat.vert"),
    fragment: include_str!("../shaders/flat.frag"),
};

pub const TEXTURED: ShaderPair = ShaderPair {
    name: "textured",
    vertex: include_str!("../shaders/textured.vert"),
    fragment: include_str!("../shaders/textured.frag"),
};

/// Blinn-Phong with the `material` struct and `dir_lights` / `point_lights` arrays.
pub const LIT: ShaderPair = ShaderPair {
    name: "lit",
    vertex: include_str!("../shaders/lit.vert"),
    fragment: include_str!("../shaders/lit.frag"),
};

impl ShaderPair {
    /// Builds the program from `dir/<name>.vert` and `dir/<name>.frag` when
    /// `dir` is given, else from the embedded sources.
    pub fn build(&self, gpu: &Gpu, dir: Option<&Path>) -> glint_engine::Result<Program> {
        match dir {
            Some(dir) => Program::load(
                gpu,
                dir.join(format!("{}.vert", self.name)),
                dir.join(format!("{}.frag", self.name)),
                None,
            ),
            None => {
                let program = Program::build(gpu, self.vertex, self.fragment, None)?;
                log::debug!("built embedded program '{}' ({})", self.name, program.id());
                Ok(program)
            }
        }
    }
}
