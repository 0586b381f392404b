/// Raw driver-issued object name. `0` never names a live object.
pub type RawId = u32;

/// The empty/"no object" id.
pub const NO_ID: RawId = 0;

/// The subset of OpenGL used by this crate.
///
/// Object names travel as raw `u32` ids and enums as their GL values, so the
/// trait can be implemented by a real context (`glow::Context`) or by a
/// recording mock in tests.
///
/// Every method must be called on the thread that owns the current context.
pub trait GlBackend {
    // ── state ─────────────────────────────────────────────────────────────

    fn enable(&self, cap: u32);
    fn cull_face(&self, mode: u32);
    fn viewport(&self, x: i32, y: i32, width: i32, height: i32);
    fn clear_color(&self, r: f32, g: f32, b: f32, a: f32);
    fn clear(&self, mask: u32);
    fn get_error(&self) -> u32;

    // ── buffers + vertex arrays ───────────────────────────────────────────

    fn create_vertex_array(&self) -> Result<RawId, String>;
    fn delete_vertex_array(&self, id: RawId);
    fn bind_vertex_array(&self, id: RawId);

    fn create_buffer(&self) -> Result<RawId, String>;
    fn delete_buffer(&self, id: RawId);
    fn bind_buffer(&self, target: u32, id: RawId);
    fn buffer_data(&self, target: u32, data: &[u8], usage: u32);

    fn enable_vertex_attrib_array(&self, index: u32);
    fn vertex_attrib_pointer_f32(&self, index: u32, size: i32, stride: i32, offset: i32);

    fn draw_elements(&self, mode: u32, count: i32, element_type: u32, offset: i32);

    // ── textures ──────────────────────────────────────────────────────────

    fn create_texture(&self) -> Result<RawId, String>;
    fn delete_texture(&self, id: RawId);
    /// Selects texture unit `unit` (0-based, not `TEXTURE0 + unit`).
    fn active_texture(&self, unit: u32);
    fn bind_texture_2d(&self, id: RawId);
    fn pixel_store_i32(&self, pname: u32, value: i32);
    fn tex_image_2d(
        &self,
        internal_format: i32,
        width: i32,
        height: i32,
        format: u32,
        pixels: &[u8],
    );
    fn generate_mipmap_2d(&self);
    fn tex_parameter_i32(&self, pname: u32, value: i32);
    fn tex_parameter_f32(&self, pname: u32, value: f32);
    fn tex_parameter_i32_slice(&self, pname: u32, values: &[i32]);

    // ── shaders + programs ────────────────────────────────────────────────

    fn create_shader(&self, stage: u32) -> Result<RawId, String>;
    fn delete_shader(&self, id: RawId);
    fn shader_source(&self, id: RawId, source: &str);
    fn compile_shader(&self, id: RawId);
    fn shader_compile_status(&self, id: RawId) -> bool;
    fn shader_info_log(&self, id: RawId) -> String;

    fn create_program(&self) -> Result<RawId, String>;
    fn delete_program(&self, id: RawId);
    fn attach_shader(&self, program: RawId, shader: RawId);
    fn link_program(&self, program: RawId);
    fn program_link_status(&self, program: RawId) -> bool;
    fn program_info_log(&self, program: RawId) -> String;
    fn use_program(&self, program: RawId);

    // ── uniforms (current program) ────────────────────────────────────────

    fn uniform_location(&self, program: RawId, name: &str) -> Option<u32>;
    fn uniform_1_i32(&self, location: u32, v: i32);
    fn uniform_1_f32(&self, location: u32, v: f32);
    fn uniform_2_f32(&self, location: u32, v: [f32; 2]);
    fn uniform_3_f32(&self, location: u32, v: [f32; 3]);
    fn uniform_4_f32(&self, location: u32, v: [f32; 4]);
    fn uniform_matrix_3_f32(&self, location: u32, v: &[f32; 9]);
    fn uniform_matrix_4_f32(&self, location: u32, v: &[f32; 16]);
}
