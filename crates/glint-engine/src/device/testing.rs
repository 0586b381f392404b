//! Recording `GlBackend` used by unit tests.
//!
//! Hands out sequential ids, logs every call, tracks which objects are alive
//! and how often each id was deleted. Uniform writes are logged by name.

use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::rc::Rc;

use super::backend::{GlBackend, RawId};
use super::gpu::Gpu;

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub(crate) enum ObjectKind {
    VertexArray,
    Buffer,
    Texture,
    Shader,
    Program,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum UniformValue {
    I32(i32),
    F32(f32),
    Vec2([f32; 2]),
    Vec3([f32; 3]),
    Vec4([f32; 4]),
    Mat3([f32; 9]),
    Mat4([f32; 16]),
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Call {
    Enable(u32),
    CullFace(u32),
    Viewport(i32, i32, i32, i32),
    ClearColor([f32; 4]),
    Clear(u32),
    Create(ObjectKind, RawId),
    Delete(ObjectKind, RawId),
    BindVertexArray(RawId),
    BindBuffer { target: u32, id: RawId },
    BufferData { target: u32, len: usize, usage: u32 },
    EnableAttrib(u32),
    AttribPointer { index: u32, size: i32, stride: i32, offset: i32 },
    DrawElements { mode: u32, count: i32, element_type: u32, offset: i32 },
    ActiveTexture(u32),
    BindTexture(RawId),
    PixelStore(u32, i32),
    TexImage { internal_format: i32, width: i32, height: i32, format: u32, len: usize },
    GenerateMipmap,
    TexParamI(u32, i32),
    TexParamF(u32, f32),
    TexParamSlice(u32, Vec<i32>),
    ShaderSource(RawId, String),
    CompileShader(RawId),
    AttachShader { program: RawId, shader: RawId },
    LinkProgram(RawId),
    UseProgram(RawId),
    Uniform { name: String, value: UniformValue },
}

#[derive(Default)]
struct State {
    next_id: RawId,
    calls: Vec<Call>,
    live: HashMap<RawId, ObjectKind>,
    deletes: HashMap<RawId, usize>,
    shader_stages: HashMap<RawId, u32>,

    fail_compile: Option<(u32, String)>,
    fail_link: Option<String>,
    hidden_uniforms: HashSet<String>,
    pending_errors: Vec<u32>,

    locations: HashMap<String, u32>,
    location_names: Vec<String>,
    lookups: HashMap<String, usize>,
}

#[derive(Default)]
pub(crate) struct RecordingGl {
    state: RefCell<State>,
}

impl RecordingGl {
    /// Returns a `Gpu` over a fresh recorder plus a handle for inspection.
    pub(crate) fn gpu() -> (Gpu, Rc<RecordingGl>) {
        let gl = Rc::new(RecordingGl::default());
        let backend: Rc<dyn GlBackend> = gl.clone();
        (Gpu::from_rc(backend), gl)
    }

    // ── configuration ─────────────────────────────────────────────────────

    pub(crate) fn fail_compile(&self, stage: u32, log: &str) {
        self.state.borrow_mut().fail_compile = Some((stage, log.to_string()));
    }

    pub(crate) fn fail_link(&self, log: &str) {
        self.state.borrow_mut().fail_link = Some(log.to_string());
    }

    pub(crate) fn hide_uniform(&self, name: &str) {
        self.state.borrow_mut().hidden_uniforms.insert(name.to_string());
    }

    pub(crate) fn push_error(&self, code: u32) {
        self.state.borrow_mut().pending_errors.push(code);
    }

    // ── inspection ────────────────────────────────────────────────────────

    pub(crate) fn calls(&self) -> Vec<Call> {
        self.state.borrow().calls.clone()
    }

    pub(crate) fn clear_calls(&self) {
        self.state.borrow_mut().calls.clear();
    }

    pub(crate) fn live_count(&self) -> usize {
        self.state.borrow().live.len()
    }

    pub(crate) fn live_of(&self, kind: ObjectKind) -> usize {
        self.state.borrow().live.values().filter(|k| **k == kind).count()
    }

    pub(crate) fn created_of(&self, kind: ObjectKind) -> usize {
        self.state
            .borrow()
            .calls
            .iter()
            .filter(|c| matches!(c, Call::Create(k, _) if *k == kind))
            .count()
    }

    pub(crate) fn delete_count(&self, id: RawId) -> usize {
        self.state.borrow().deletes.get(&id).copied().unwrap_or(0)
    }

    pub(crate) fn max_delete_count(&self) -> usize {
        self.state.borrow().deletes.values().copied().max().unwrap_or(0)
    }

    pub(crate) fn draws(&self) -> Vec<Call> {
        self.calls()
            .into_iter()
            .filter(|c| matches!(c, Call::DrawElements { .. }))
            .collect()
    }

    /// Last value written to the named uniform.
    pub(crate) fn uniform(&self, name: &str) -> Option<UniformValue> {
        self.state.borrow().calls.iter().rev().find_map(|c| match c {
            Call::Uniform { name: n, value } if n == name => Some(value.clone()),
            _ => None,
        })
    }

    pub(crate) fn lookups(&self, name: &str) -> usize {
        self.state.borrow().lookups.get(name).copied().unwrap_or(0)
    }

    // ── internals ─────────────────────────────────────────────────────────

    fn record(&self, call: Call) {
        self.state.borrow_mut().calls.push(call);
    }

    fn create(&self, kind: ObjectKind) -> Result<RawId, String> {
        let mut st = self.state.borrow_mut();
        st.next_id += 1;
        let id = st.next_id;
        st.live.insert(id, kind);
        st.calls.push(Call::Create(kind, id));
        Ok(id)
    }

    fn delete(&self, kind: ObjectKind, id: RawId) {
        let mut st = self.state.borrow_mut();
        if id == 0 {
            return;
        }
        st.live.remove(&id);
        *st.deletes.entry(id).or_insert(0) += 1;
        st.calls.push(Call::Delete(kind, id));
    }

    fn uniform_set(&self, location: u32, value: UniformValue) {
        let mut st = self.state.borrow_mut();
        let name = st.location_names[location as usize].clone();
        st.calls.push(Call::Uniform { name, value });
    }
}

impl GlBackend for RecordingGl {
    fn enable(&self, cap: u32) {
        self.record(Call::Enable(cap));
    }

    fn cull_face(&self, mode: u32) {
        self.record(Call::CullFace(mode));
    }

    fn viewport(&self, x: i32, y: i32, width: i32, height: i32) {
        self.record(Call::Viewport(x, y, width, height));
    }

    fn clear_color(&self, r: f32, g: f32, b: f32, a: f32) {
        self.record(Call::ClearColor([r, g, b, a]));
    }

    fn clear(&self, mask: u32) {
        self.record(Call::Clear(mask));
    }

    fn get_error(&self) -> u32 {
        let mut st = self.state.borrow_mut();
        if st.pending_errors.is_empty() {
            glow::NO_ERROR
        } else {
            st.pending_errors.remove(0)
        }
    }

    fn create_vertex_array(&self) -> Result<RawId, String> {
        self.create(ObjectKind::VertexArray)
    }

    fn delete_vertex_array(&self, id: RawId) {
        self.delete(ObjectKind::VertexArray, id);
    }

    fn bind_vertex_array(&self, id: RawId) {
        self.record(Call::BindVertexArray(id));
    }

    fn create_buffer(&self) -> Result<RawId, String> {
        self.create(ObjectKind::Buffer)
    }

    fn delete_buffer(&self, id: RawId) {
        self.delete(ObjectKind::Buffer, id);
    }

    fn bind_buffer(&self, target: u32, id: RawId) {
        self.record(Call::BindBuffer { target, id });
    }

    fn buffer_data(&self, target: u32, data: &[u8], usage: u32) {
        self.record(Call::BufferData {
            target,
            len: data.len(),
            usage,
        });
    }

    fn enable_vertex_attrib_array(&self, index: u32) {
        self.record(Call::EnableAttrib(index));
    }

    fn vertex_attrib_pointer_f32(&self, index: u32, size: i32, stride: i32, offset: i32) {
        self.record(Call::AttribPointer {
            index,
            size,
            stride,
            offset,
        });
    }

    fn draw_elements(&self, mode: u32, count: i32, element_type: u32, offset: i32) {
        self.record(Call::DrawElements {
            mode,
            count,
            element_type,
            offset,
        });
    }

    fn create_texture(&self) -> Result<RawId, String> {
        self.create(ObjectKind::Texture)
    }

    fn delete_texture(&self, id: RawId) {
        self.delete(ObjectKind::Texture, id);
    }

    fn active_texture(&self, unit: u32) {
        self.record(Call::ActiveTexture(unit));
    }

    fn bind_texture_2d(&self, id: RawId) {
        self.record(Call::BindTexture(id));
    }

    fn pixel_store_i32(&self, pname: u32, value: i32) {
        self.record(Call::PixelStore(pname, value));
    }

    fn tex_image_2d(
        &self,
        internal_format: i32,
        width: i32,
        height: i32,
        format: u32,
        pixels: &[u8],
    ) {
        self.record(Call::TexImage {
            internal_format,
            width,
            height,
            format,
            len: pixels.len(),
        });
    }

    fn generate_mipmap_2d(&self) {
        self.record(Call::GenerateMipmap);
    }

    fn tex_parameter_i32(&self, pname: u32, value: i32) {
        self.record(Call::TexParamI(pname, value));
    }

    fn tex_parameter_f32(&self, pname: u32, value: f32) {
        self.record(Call::TexParamF(pname, value));
    }

    fn tex_parameter_i32_slice(&self, pname: u32, values: &[i32]) {
        self.record(Call::TexParamSlice(pname, values.to_vec()));
    }

    fn create_shader(&self, stage: u32) -> Result<RawId, String> {
        let id = self.create(ObjectKind::Shader)?;
        self.state.borrow_mut().shader_stages.insert(id, stage);
        Ok(id)
    }

    fn delete_shader(&self, id: RawId) {
        self.delete(ObjectKind::Shader, id);
    }

    fn shader_source(&self, id: RawId, source: &str) {
        self.record(Call::ShaderSource(id, source.to_string()));
    }

    fn compile_shader(&self, id: RawId) {
        self.record(Call::CompileShader(id));
    }

    fn shader_compile_status(&self, id: RawId) -> bool {
        let st = self.state.borrow();
        match (&st.fail_compile, st.shader_stages.get(&id)) {
            (Some((stage, _)), Some(actual)) => stage != actual,
            _ => true,
        }
    }

    fn shader_info_log(&self, _id: RawId) -> String {
        let st = self.state.borrow();
        st.fail_compile
            .as_ref()
            .map(|(_, log)| log.clone())
            .unwrap_or_default()
    }

    fn create_program(&self) -> Result<RawId, String> {
        self.create(ObjectKind::Program)
    }

    fn delete_program(&self, id: RawId) {
        self.delete(ObjectKind::Program, id);
    }

    fn attach_shader(&self, program: RawId, shader: RawId) {
        self.record(Call::AttachShader { program, shader });
    }

    fn link_program(&self, program: RawId) {
        self.record(Call::LinkProgram(program));
    }

    fn program_link_status(&self, _program: RawId) -> bool {
        self.state.borrow().fail_link.is_none()
    }

    fn program_info_log(&self, _program: RawId) -> String {
        self.state.borrow().fail_link.clone().unwrap_or_default()
    }

    fn use_program(&self, program: RawId) {
        self.record(Call::UseProgram(program));
    }

    fn uniform_location(&self, _program: RawId, name: &str) -> Option<u32> {
        let mut st = self.state.borrow_mut();
        *st.lookups.entry(name.to_string()).or_insert(0) += 1;
        if st.hidden_uniforms.contains(name) {
            return None;
        }
        if let Some(loc) = st.locations.get(name) {
            return Some(*loc);
        }
        let loc = st.location_names.len() as u32;
        st.location_names.push(name.to_string());
        st.locations.insert(name.to_string(), loc);
        Some(loc)
    }

    fn uniform_1_i32(&self, location: u32, v: i32) {
        self.uniform_set(location, UniformValue::I32(v));
    }

    fn uniform_1_f32(&self, location: u32, v: f32) {
        self.uniform_set(location, UniformValue::F32(v));
    }

    fn uniform_2_f32(&self, location: u32, v: [f32; 2]) {
        self.uniform_set(location, UniformValue::Vec2(v));
    }

    fn uniform_3_f32(&self, location: u32, v: [f32; 3]) {
        self.uniform_set(location, UniformValue::Vec3(v));
    }

    fn uniform_4_f32(&self, location: u32, v: [f32; 4]) {
        self.uniform_set(location, UniformValue::Vec4(v));
    }

    fn uniform_matrix_3_f32(&self, location: u32, v: &[f32; 9]) {
        self.uniform_set(location, UniformValue::Mat3(*v));
    }

    fn uniform_matrix_4_f32(&self, location: u32, v: &[f32; 16]) {
        self.uniform_set(location, UniformValue::Mat4(*v));
    }
}
