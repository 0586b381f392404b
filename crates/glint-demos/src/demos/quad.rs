use std::path::PathBuf;

use anyhow::{Context, Result};
use glam::{Mat4, Vec3};
use glint_engine::assets::image::DecodedImage;
use glint_engine::core::{App, AppControl, FrameCtx, InitCtx};
use glint_engine::device::Gpu;
use glint_engine::render::{Filter, Materials, Mesh, Program, Texture, TextureOptions, primitives};

use crate::camera::{Camera, background};
use crate::shaders::TEXTURED;

pub struct QuadDemo {
    texture_path: Option<PathBuf>,
    shader_dir: Option<PathBuf>,
    scene: Option<Scene>,
}

struct Scene {
    program: Program,
    texture: Texture,
    mesh: Mesh,
    materials: Materials,
    camera: Camera,
}

impl QuadDemo {
    pub fn new(texture_path: Option<PathBuf>, shader_dir: Option<PathBuf>) -> Self {
        Self {
            texture_path,
            shader_dir,
            scene: None,
        }
    }
}

impl App for QuadDemo {
    fn init(&mut self, ctx: &mut InitCtx<'_>) -> Result<()> {
        let program = TEXTURED
            .build(ctx.gpu, self.shader_dir.as_deref())
            .context("building textured shader")?;

        let texture = match &self.texture_path {
            Some(path) => Texture::load(
                ctx.gpu,
                path,
                &TextureOptions {
                    srgb: true,
                    ..TextureOptions::default()
                },
            )?,
            None => checkerboard(ctx.gpu, 8)?,
        };
        log::info!("quad texture: {texture}");

        // Keep the image's aspect ratio.
        let (w, h) = texture.size();
        let half_w = w as f32 / h.max(1) as f32;
        let mesh = primitives::make_quad(
            ctx.gpu,
            Vec3::new(-half_w, -1.0, 0.0),
            Vec3::new(half_w, -1.0, 0.0),
            Vec3::new(half_w, 1.0, 0.0),
            Vec3::new(-half_w, 1.0, 0.0),
        )?;

        program.bind();
        texture.bind(0);
        program.set_i32("tex", 0);

        self.scene = Some(Scene {
            program,
            texture,
            mesh,
            materials: Materials::new(),
            camera: Camera::default(),
        });
        Ok(())
    }

    fn on_frame(&mut self, ctx: &mut FrameCtx<'_>) -> AppControl {
        let Some(scene) = &self.scene else {
            return AppControl::Exit;
        };

        ctx.clear(background());
        scene.program.bind();
        scene.texture.bind(0);
        scene
            .program
            .set_mat4("projection", &scene.camera.projection(ctx.aspect()));
        let modelview = scene.camera.view() * Mat4::from_translation(Vec3::new(0.0, 0.0, -3.0));
        scene.program.set_mat4("modelview", &modelview);

        scene.mesh.draw(Some(&scene.program), &scene.materials);
        AppControl::Continue
    }
}

/// `cells` x `cells` black and white RGB checkerboard, sampled without filtering.
fn checkerboard(gpu: &Gpu, cells: u32) -> glint_engine::Result<Texture> {
    let pixels = (0..cells * cells)
        .flat_map(|i| {
            let v = if (i / cells + i % cells) % 2 == 0 { 255 } else { 32 };
            [v, v, v]
        })
        .collect();
    let image = DecodedImage {
        width: cells,
        height: cells,
        channels: 3,
        pixels,
    };
    let options = TextureOptions {
        gen_mipmaps: false,
        min_filter: Filter::Nearest,
        mag_filter: Filter::Nearest,
        ..TextureOptions::default()
    };
    Texture::from_image(gpu, &image, &options, "<checkerboard>")
}
