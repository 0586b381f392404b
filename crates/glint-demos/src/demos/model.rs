use std::path::PathBuf;

use anyhow::{Context, Result};
use glam::{Mat4, Vec3};
use glint_engine::assets::{PostProcess, load_model};
use glint_engine::core::{App, AppControl, FrameCtx, InitCtx};
use glint_engine::render::{DirLight, Model, PointLight, Program, apply_array};

use crate::camera::{Camera, background, spin};
use crate::shaders::LIT;

pub struct ModelDemo {
    path: PathBuf,
    scale: f32,
    distance: f32,
    shader_dir: Option<PathBuf>,
    scene: Option<Scene>,
}

struct Scene {
    program: Program,
    model: Model,
    camera: Camera,
}

impl ModelDemo {
    pub fn new(path: PathBuf, scale: f32, distance: f32, shader_dir: Option<PathBuf>) -> Self {
        Self {
            path,
            scale,
            distance,
            shader_dir,
            scene: None,
        }
    }
}

impl App for ModelDemo {
    fn init(&mut self, ctx: &mut InitCtx<'_>) -> Result<()> {
        let program = LIT
            .build(ctx.gpu, self.shader_dir.as_deref())
            .context("building lit shader")?;

        let mut model = load_model(ctx.gpu, &self.path, PostProcess::default())
            .with_context(|| format!("loading model {}", self.path.display()))?;
        for (_, material) in model.materials().iter() {
            log::debug!("{material}");
        }
        // Imported materials rarely carry a specular color; give them a highlight.
        for id in model.materials().ids() {
            if let Some(material) = model.materials_mut().get_mut(id) {
                material.specular_color = Vec3::ONE;
            }
        }
        log::info!(
            "loaded {}: {} meshes, {} materials",
            self.path.display(),
            model.meshes().len(),
            model.materials().len()
        );

        program.bind();
        let sun = DirLight {
            direction: Vec3::new(-1.0, -1.0, -1.0),
            ambient: Vec3::splat(0.1),
            ..DirLight::default()
        };
        apply_array(&program, "dir_lights", "num_dir_lights", &[sun]);
        apply_array::<PointLight>(&program, "point_lights", "num_point_lights", &[]);

        self.scene = Some(Scene {
            program,
            model,
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
        let model = Mat4::from_translation(Vec3::new(0.0, 0.0, -self.distance))
            * spin(ctx.time.elapsed)
            * Mat4::from_scale(Vec3::splat(self.scale));
        program.set_mat4("model", &model);

        scene.model.draw(Some(program));
        AppControl::Continue
    }
}
