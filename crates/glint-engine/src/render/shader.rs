use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::path::Path;

use glam::{Mat3, Mat4, Vec2, Vec3, Vec4};

use crate::device::{Gpu, RawId};
use crate::error::{Error, Result};
use crate::resource::{ProgramDeleter, ProgramHandle, ShaderDeleter, ShaderHandle};

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum ShaderStage {
    Vertex,
    Fragment,
    Geometry,
}

impl ShaderStage {
    pub fn gl(self) -> u32 {
        match self {
            Self::Vertex => glow::VERTEX_SHADER,
            Self::Fragment => glow::FRAGMENT_SHADER,
            Self::Geometry => glow::GEOMETRY_SHADER,
        }
    }
}

impl fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Vertex => "vertex",
            Self::Fragment => "fragment",
            Self::Geometry => "geometry",
        })
    }
}

/// Compiles one stage. The returned handle deletes the shader object on drop.
fn compile(gpu: &Gpu, stage: ShaderStage, source: &str) -> Result<ShaderHandle> {
    let id = gpu.create_shader(stage.gl()).map_err(|message| Error::Resource {
        kind: "shader",
        message,
    })?;
    let shader = ShaderHandle::new(id, ShaderDeleter(gpu.clone()));

    gpu.shader_source(id, source);
    gpu.compile_shader(id);
    if !gpu.shader_compile_status(id) {
        return Err(Error::Compile {
            stage,
            log: gpu.shader_info_log(id),
        });
    }
    Ok(shader)
}

fn read_source(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|e| Error::io(path, e))
}

/// A linked shader program.
///
/// Uniform setters look the location up once per name and cache the result,
/// including "not found". Writing a uniform the program does not have is a
/// silent no-op, so optional inputs (e.g. unused material slots) cost nothing.
pub struct Program {
    handle: ProgramHandle,
    locations: RefCell<HashMap<String, Option<u32>>>,
}

impl Program {
    /// Compiles and links the given stages.
    pub fn build(gpu: &Gpu, vertex: &str, fragment: &str, geometry: Option<&str>) -> Result<Self> {
        let vs = compile(gpu, ShaderStage::Vertex, vertex)?;
        let fs = compile(gpu, ShaderStage::Fragment, fragment)?;
        let gs = geometry
            .map(|src| compile(gpu, ShaderStage::Geometry, src))
            .transpose()?;

        let id = gpu.create_program().map_err(|message| Error::Resource {
            kind: "program",
            message,
        })?;
        let handle = ProgramHandle::new(id, ProgramDeleter(gpu.clone()));

        for stage in [Some(&vs), Some(&fs), gs.as_ref()].into_iter().flatten() {
            gpu.attach_shader(id, stage.id());
        }
        gpu.link_program(id);
        if !gpu.program_link_status(id) {
            return Err(Error::Link {
                log: gpu.program_info_log(id),
            });
        }

        // Stage objects are flagged for deletion here; the driver keeps them
        // alive while attached.
        drop((vs, fs, gs));

        Ok(Self {
            handle,
            locations: RefCell::new(HashMap::new()),
        })
    }

    /// Reads the stage sources from disk, then [`build`](Self::build)s.
    pub fn load(
        gpu: &Gpu,
        vertex: impl AsRef<Path>,
        fragment: impl AsRef<Path>,
        geometry: Option<&Path>,
    ) -> Result<Self> {
        let vs = read_source(vertex.as_ref())?;
        let fs = read_source(fragment.as_ref())?;
        let gs = geometry.map(read_source).transpose()?;

        let program = Self::build(gpu, &vs, &fs, gs.as_deref())?;
        log::debug!(
            "built program {} from {}",
            program.id(),
            vertex.as_ref().display()
        );
        Ok(program)
    }

    pub fn bind(&self) {
        self.gpu().use_program(self.handle.id());
    }

    pub fn id(&self) -> RawId {
        self.handle.id()
    }

    pub(crate) fn gpu(&self) -> &Gpu {
        &self.handle.deleter().0
    }

    fn location(&self, name: &str) -> Option<u32> {
        if let Some(loc) = self.locations.borrow().get(name) {
            return *loc;
        }
        let loc = self.gpu().uniform_location(self.handle.id(), name);
        self.locations.borrow_mut().insert(name.to_string(), loc);
        loc
    }

    // ── uniforms ──────────────────────────────────────────────────────────

    pub fn set_bool(&self, name: &str, value: bool) {
        self.set_i32(name, value as i32);
    }

    pub fn set_i32(&self, name: &str, value: i32) {
        if let Some(loc) = self.location(name) {
            self.gpu().uniform_1_i32(loc, value);
        }
    }

    pub fn set_f32(&self, name: &str, value: f32) {
        if let Some(loc) = self.location(name) {
            self.gpu().uniform_1_f32(loc, value);
        }
    }

    pub fn set_vec2(&self, name: &str, value: Vec2) {
        if let Some(loc) = self.location(name) {
            self.gpu().uniform_2_f32(loc, value.to_array());
        }
    }

    pub fn set_vec3(&self, name: &str, value: Vec3) {
        if let Some(loc) = self.location(name) {
            self.gpu().uniform_3_f32(loc, value.to_array());
        }
    }

    pub fn set_vec4(&self, name: &str, value: Vec4) {
        if let Some(loc) = self.location(name) {
            self.gpu().uniform_4_f32(loc, value.to_array());
        }
    }

    /// Column-major, not transposed.
    pub fn set_mat3(&self, name: &str, value: &Mat3) {
        if let Some(loc) = self.location(name) {
            self.gpu().uniform_matrix_3_f32(loc, &value.to_cols_array());
        }
    }

    /// Column-major, not transposed.
    pub fn set_mat4(&self, name: &str, value: &Mat4) {
        if let Some(loc) = self.location(name) {
            self.gpu().uniform_matrix_4_f32(loc, &value.to_cols_array());
        }
    }
}

impl fmt::Debug for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Program")
            .field("id", &self.handle.id())
            .field("cached_locations", &self.locations.borrow().len())
            .finish()
    }
}

/// A value that writes itself into a struct-typed uniform.
pub trait ApplyUniforms {
    /// Writes `self` into the uniform struct called `name`.
    fn apply(&self, program: &Program, name: &str);
}

/// Writes `items` into `array_name[0..]` and their count into `count_name`.
pub fn apply_array<T: ApplyUniforms>(
    program: &Program,
    array_name: &str,
    count_name: &str,
    items: &[T],
) {
    for (i, item) in items.iter().enumerate() {
        item.apply(program, &format!("{array_name}[{i}]"));
    }
    program.set_i32(count_name, items.len() as i32);
}
