//! `GlBackend` over a loaded `glow::Context`.
//!
//! Each call is a thin `unsafe` forward. Safety relies on the context being
//! current on the calling thread, which `Gpu` cannot move off (it is `!Send`).

use std::num::NonZeroU32;

use glow::HasContext;

use super::backend::{GlBackend, RawId};

fn buffer(id: RawId) -> Option<glow::NativeBuffer> {
    NonZeroU32::new(id).map(glow::NativeBuffer)
}

fn vertex_array(id: RawId) -> Option<glow::NativeVertexArray> {
    NonZeroU32::new(id).map(glow::NativeVertexArray)
}

fn texture(id: RawId) -> Option<glow::NativeTexture> {
    NonZeroU32::new(id).map(glow::NativeTexture)
}

fn shader(id: RawId) -> Option<glow::NativeShader> {
    NonZeroU32::new(id).map(glow::NativeShader)
}

fn program(id: RawId) -> Option<glow::NativeProgram> {
    NonZeroU32::new(id).map(glow::NativeProgram)
}

fn location(loc: u32) -> glow::NativeUniformLocation {
    glow::NativeUniformLocation(loc)
}

impl GlBackend for glow::Context {
    fn enable(&self, cap: u32) {
        unsafe { HasContext::enable(self, cap) }
    }

    fn cull_face(&self, mode: u32) {
        unsafe { HasContext::cull_face(self, mode) }
    }

    fn viewport(&self, x: i32, y: i32, width: i32, height: i32) {
        unsafe { HasContext::viewport(self, x, y, width, height) }
    }

    fn clear_color(&self, r: f32, g: f32, b: f32, a: f32) {
        unsafe { HasContext::clear_color(self, r, g, b, a) }
    }

    fn clear(&self, mask: u32) {
        unsafe { HasContext::clear(self, mask) }
    }

    fn get_error(&self) -> u32 {
        unsafe { HasContext::get_error(self) }
    }

    fn create_vertex_array(&self) -> Result<RawId, String> {
        unsafe { HasContext::create_vertex_array(self).map(|v| v.0.get()) }
    }

    fn delete_vertex_array(&self, id: RawId) {
        if let Some(v) = vertex_array(id) {
            unsafe { HasContext::delete_vertex_array(self, v) }
        }
    }

    fn bind_vertex_array(&self, id: RawId) {
        unsafe { HasContext::bind_vertex_array(self, vertex_array(id)) }
    }

    fn create_buffer(&self) -> Result<RawId, String> {
        unsafe { HasContext::create_buffer(self).map(|b| b.0.get()) }
    }

    fn delete_buffer(&self, id: RawId) {
        if let Some(b) = buffer(id) {
            unsafe { HasContext::delete_buffer(self, b) }
        }
    }

    fn bind_buffer(&self, target: u32, id: RawId) {
        unsafe { HasContext::bind_buffer(self, target, buffer(id)) }
    }

    fn buffer_data(&self, target: u32, data: &[u8], usage: u32) {
        unsafe { HasContext::buffer_data_u8_slice(self, target, data, usage) }
    }

    fn enable_vertex_attrib_array(&self, index: u32) {
        unsafe { HasContext::enable_vertex_attrib_array(self, index) }
    }

    fn vertex_attrib_pointer_f32(&self, index: u32, size: i32, stride: i32, offset: i32) {
        unsafe {
            HasContext::vertex_attrib_pointer_f32(
                self,
                index,
                size,
                glow::FLOAT,
                false,
                stride,
                offset,
            )
        }
    }

    fn draw_elements(&self, mode: u32, count: i32, element_type: u32, offset: i32) {
        unsafe { HasContext::draw_elements(self, mode, count, element_type, offset) }
    }

    fn create_texture(&self) -> Result<RawId, String> {
        unsafe { HasContext::create_texture(self).map(|t| t.0.get()) }
    }

    fn delete_texture(&self, id: RawId) {
        if let Some(t) = texture(id) {
            unsafe { HasContext::delete_texture(self, t) }
        }
    }

    fn active_texture(&self, unit: u32) {
        unsafe { HasContext::active_texture(self, glow::TEXTURE0 + unit) }
    }

    fn bind_texture_2d(&self, id: RawId) {
        unsafe { HasContext::bind_texture(self, glow::TEXTURE_2D, texture(id)) }
    }

    fn pixel_store_i32(&self, pname: u32, value: i32) {
        unsafe { HasContext::pixel_store_i32(self, pname, value) }
    }

    fn tex_image_2d(
        &self,
        internal_format: i32,
        width: i32,
        height: i32,
        format: u32,
        pixels: &[u8],
    ) {
        unsafe {
            HasContext::tex_image_2d(
                self,
                glow::TEXTURE_2D,
                0,
                internal_format,
                width,
                height,
                0,
                format,
                glow::UNSIGNED_BYTE,
                Some(pixels),
            )
        }
    }

    fn generate_mipmap_2d(&self) {
        unsafe { HasContext::generate_mipmap(self, glow::TEXTURE_2D) }
    }

    fn tex_parameter_i32(&self, pname: u32, value: i32) {
        unsafe { HasContext::tex_parameter_i32(self, glow::TEXTURE_2D, pname, value) }
    }

    fn tex_parameter_f32(&self, pname: u32, value: f32) {
        unsafe { HasContext::tex_parameter_f32(self, glow::TEXTURE_2D, pname, value) }
    }

    fn tex_parameter_i32_slice(&self, pname: u32, values: &[i32]) {
        unsafe { HasContext::tex_parameter_i32_slice(self, glow::TEXTURE_2D, pname, values) }
    }

    fn create_shader(&self, stage: u32) -> Result<RawId, String> {
        unsafe { HasContext::create_shader(self, stage).map(|s| s.0.get()) }
    }

    fn delete_shader(&self, id: RawId) {
        if let Some(s) = shader(id) {
            unsafe { HasContext::delete_shader(self, s) }
        }
    }

    fn shader_source(&self, id: RawId, source: &str) {
        if let Some(s) = shader(id) {
            unsafe { HasContext::shader_source(self, s, source) }
        }
    }

    fn compile_shader(&self, id: RawId) {
        if let Some(s) = shader(id) {
            unsafe { HasContext::compile_shader(self, s) }
        }
    }

    fn shader_compile_status(&self, id: RawId) -> bool {
        shader(id).is_some_and(|s| unsafe { HasContext::get_shader_compile_status(self, s) })
    }

    fn shader_info_log(&self, id: RawId) -> String {
        shader(id)
            .map(|s| unsafe { HasContext::get_shader_info_log(self, s) })
            .unwrap_or_default()
    }

    fn create_program(&self) -> Result<RawId, String> {
        unsafe { HasContext::create_program(self).map(|p| p.0.get()) }
    }

    fn delete_program(&self, id: RawId) {
        if let Some(p) = program(id) {
            unsafe { HasContext::delete_program(self, p) }
        }
    }

    fn attach_shader(&self, prog: RawId, sh: RawId) {
        if let (Some(p), Some(s)) = (program(prog), shader(sh)) {
            unsafe { HasContext::attach_shader(self, p, s) }
        }
    }

    fn link_program(&self, prog: RawId) {
        if let Some(p) = program(prog) {
            unsafe { HasContext::link_program(self, p) }
        }
    }

    fn program_link_status(&self, prog: RawId) -> bool {
        program(prog).is_some_and(|p| unsafe { HasContext::get_program_link_status(self, p) })
    }

    fn program_info_log(&self, prog: RawId) -> String {
        program(prog)
            .map(|p| unsafe { HasContext::get_program_info_log(self, p) })
            .unwrap_or_default()
    }

    fn use_program(&self, prog: RawId) {
        unsafe { HasContext::use_program(self, program(prog)) }
    }

    fn uniform_location(&self, prog: RawId, name: &str) -> Option<u32> {
        let p = program(prog)?;
        unsafe { HasContext::get_uniform_location(self, p, name).map(|l| l.0) }
    }

    fn uniform_1_i32(&self, loc: u32, v: i32) {
        unsafe { HasContext::uniform_1_i32(self, Some(&location(loc)), v) }
    }

    fn uniform_1_f32(&self, loc: u32, v: f32) {
        unsafe { HasContext::uniform_1_f32(self, Some(&location(loc)), v) }
    }

    fn uniform_2_f32(&self, loc: u32, v: [f32; 2]) {
        unsafe { HasContext::uniform_2_f32(self, Some(&location(loc)), v[0], v[1]) }
    }

    fn uniform_3_f32(&self, loc: u32, v: [f32; 3]) {
        unsafe { HasContext::uniform_3_f32(self, Some(&location(loc)), v[0], v[1], v[2]) }
    }

    fn uniform_4_f32(&self, loc: u32, v: [f32; 4]) {
        unsafe {
            HasContext::uniform_4_f32(self, Some(&location(loc)), v[0], v[1], v[2], v[3])
        }
    }

    fn uniform_matrix_3_f32(&self, loc: u32, v: &[f32; 9]) {
        unsafe { HasContext::uniform_matrix_3_f32_slice(self, Some(&location(loc)), false, v) }
    }

    fn uniform_matrix_4_f32(&self, loc: u32, v: &[f32; 16]) {
        unsafe { HasContext::uniform_matrix_4_f32_slice(self, Some(&location(loc)), false, v) }
    }
}
