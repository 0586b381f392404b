//! Phong light sources, written into struct-typed uniforms.

use glam::Vec3;

use super::shader::{ApplyUniforms, Program};

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct DirLight {
    pub direction: Vec3,
    pub ambient: Vec3,
    pub diffuse: Vec3,
    pub specular: Vec3,
}

impl Default for DirLight {
    fn default() -> Self {
        Self {
            direction: Vec3::NEG_Y,
            ambient: Vec3::ZERO,
            diffuse: Vec3::ONE,
            specular: Vec3::ONE,
        }
    }
}

impl ApplyUniforms for DirLight {
    fn apply(&self, program: &Program, name: &str) {
        program.set_vec3(&format!("{name}.direction"), self.direction);
        program.set_vec3(&format!("{name}.ambient"), self.ambient);
        program.set_vec3(&format!("{name}.diffuse"), self.diffuse);
        program.set_vec3(&format!("{name}.specular"), self.specular);
    }
}

/// Omnidirectional light with `1 / (constant + linear d + quadratic d²)` falloff.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PointLight {
    pub position: Vec3,
    pub constant: f32,
    pub linear: f32,
    pub quadratic: f32,
    pub ambient: Vec3,
    pub diffuse: Vec3,
    pub specular: Vec3,
}

impl Default for PointLight {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            constant: 1.0,
            linear: 0.0,
            quadratic: 0.0,
            ambient: Vec3::ZERO,
            diffuse: Vec3::ONE,
            specular: Vec3::ONE,
        }
    }
}

impl ApplyUniforms for PointLight {
    fn apply(&self, program: &Program, name: &str) {
        program.set_vec3(&format!("{name}.position"), self.position);
        program.set_f32(&format!("{name}.constant"), self.constant);
        program.set_f32(&format!("{name}.linear"), self.linear);
        program.set_f32(&format!("{name}.quadratic"), self.quadratic);
        program.set_vec3(&format!("{name}.ambient"), self.ambient);
        program.set_vec3(&format!("{name}.diffuse"), self.diffuse);
        program.set_vec3(&format!("{name}.specular"), self.specular);
    }
}

/// Cone light. Cutoffs are cosines of the cone half-angles.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct SpotLight {
    pub position: Vec3,
    pub direction: Vec3,
    pub inner_cutoff: f32,
    pub outer_cutoff: f32,
    pub constant: f32,
    pub linear: f32,
    pub quadratic: f32,
    pub ambient: Vec3,
    pub diffuse: Vec3,
    pub specular: Vec3,
}

impl Default for SpotLight {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            direction: Vec3::NEG_Y,
            inner_cutoff: 1.0,
            outer_cutoff: 0.0,
            constant: 1.0,
            linear: 0.0,
            quadratic: 0.0,
            ambient: Vec3::ZERO,
            diffuse: Vec3::ONE,
            specular: Vec3::ONE,
        }
    }
}

impl ApplyUniforms for SpotLight {
    fn apply(&self, program: &Program, name: &str) {
        program.set_vec3(&format!("{name}.position"), self.position);
        program.set_vec3(&format!("{name}.direction"), self.direction);
        program.set_f32(&format!("{name}.inner_cutoff"), self.inner_cutoff);
        program.set_f32(&format!("{name}.outer_cutoff"), self.outer_cutoff);
        program.set_f32(&format!("{name}.constant"), self.constant);
        program.set_f32(&format!("{name}.linear"), self.linear);
        program.set_f32(&format!("{name}.quadratic"), self.quadratic);
        program.set_vec3(&format!("{name}.ambient"), self.ambient);
        program.set_vec3(&format!("{name}.diffuse"), self.diffuse);
        program.set_vec3(&format!("{name}.specular"), self.specular);
    }
}
