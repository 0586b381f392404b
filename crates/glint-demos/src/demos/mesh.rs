use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::ValueEnum;
use glam::{Mat4, Vec3};
use glint_engine::core::{App, AppControl, FrameCtx, InitCtx};
use glint_engine::render::{
    DirLight, Material, Materials, Mesh, PointLight, Program, Texture, TextureOptions,
    apply_array, primitives,
};

use crate::camera::{Camera, background, spin};
use crate::shaders::LIT;

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
pub enum Shape {
    Quad,
    Cube,
    Sphere,
}

impl Shape {
    fn geometry(self) -> primitives::Geometry {
        match self {
            Self::Quad => primitives::quad(
                Vec3::new(-1.0, -1.0, 0.0),
                Vec3::new(1.0, -1.0, 0.0),
                Vec3::new(1.0, 1.0, 0.0),
                Vec3::new(-1.0, 1.0, 0.0),
            ),
            Self::Cube => primitives::cube(),
            Self::Sphere => primitives::sphere(16, 32),
        }
    }
}

pub struct MeshDemo {
    shape: Shape,
    texture_path: Option<PathBuf>,
    shader_dir: Option<PathBuf>,
    scene: Option<Scene>,
}

struct Scene {
    program: Program,
    mesh: Mesh,
    materials: Materials,
    camera: Camera,
}

impl MeshDemo {
    pub fn new(shape: Shape, texture_path: Option<PathBuf>, shader_dir: Option<PathBuf>) -> Self {
        Self {
            shape,
            texture_path,
            shader_dir,
            scene: None,
        }
    }
}

impl App for MeshDemo {
    fn init(&mut self, ctx: &mut InitCtx<'_>) -> Result<()> {
        let program = LIT
            .build(ctx.gpu, self.shader_dir.as_deref())
            .context("building lit shader")?;

        let mut material = Material {
            shininess: 32.0,
            specular_color: Vec3::splat(0.5),
            ambient_color: Vec3::splat(0.15),
            ..Material::named(format!("{:?}", self.shape).to_lowercase())
        };
        if let Some(path) = &self.texture_path {
            let options = TextureOptions {
                srgb: true,
                ..TextureOptions::default()
            };
            material.diffuse_texture = Texture::load(ctx.gpu, path, &options)?.into();
        } else {
            material.diffuse_color = Vec3::new(0.8, 0.35, 0.2);
        }

        let mut materials = Materials::new();
        let id = materials.insert(material);
        let mesh = self
            .shape
            .geometry()
            .upload(ctx.gpu)?
            .with_name(format!("{:?}", self.shape))
            .with_material(id);

        program.bind();
        let sun = DirLight {
            direction: Vec3::new(-1.0, -1.0, -1.0),
            diffuse: Vec3::splat(0.8),
            specular: Vec3::splat(0.6),
            ..DirLight::default()
        };
        let lamp = PointLight {
            position: Vec3::new(2.0, 1.0, -1.0),
            linear: 0.09,
            quadratic: 0.032,
            diffuse: Vec3::new(1.0, 0.9, 0.7),
            ..PointLight::default()
        };
        apply_array(&program, "dir_lights", "num_dir_lights", &[sun]);
        apply_array(&program, "point_lights", "num_point_lights", &[lamp]);

        self.scene = Some(Scene {
            program,
            mesh,
            materials,
            camera: Camera::default(),
        });
        Ok(())
    }

    fn on_frame(&mut self, ctx: &mut FrameCtx<'_>) -> AppControl {
        let Some(scene) = &self.scene else {
            return AppControl::Exit;
        };

        ctx.clear(background());
        let program = &scene.program;
        program.bind();
        program.set_mat4("projection", &scene.camera.projection(ctx.aspect()));
        program.set_mat4("view", &scene.camera.view());
        let model = Mat4::from_translation(Vec3::new(0.0, 0.0, -3.0)) * spin(ctx.time.elapsed);
        program.set_mat4("model", &model);

        scene.mesh.draw(Some(program), &scene.materials);
        AppControl::Continue
    }
}
