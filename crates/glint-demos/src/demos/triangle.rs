use std::path::PathBuf;

use anyhow::{Context, Result};
use glint_engine::core::{App, AppControl, FrameCtx, InitCtx};
use glint_engine::render::{Materials, Mesh, Program, Vertex};

use crate::camera::background;
use crate::shaders::FLAT;

/// Position in clip space, RGB color in the normal slot.
const VERTICES: [Vertex; 3] = [
    Vertex::new([-0.5, -0.5, 0.0], [1.0, 0.0, 0.0], [0.0, 0.0]),
    Vertex::new([0.5, -0.5, 0.0], [0.0, 1.0, 0.0], [1.0, 0.0]),
    Vertex::new([0.0, 0.5, 0.0], [0.0, 0.0, 1.0], [0.5, 1.0]),
];

pub struct TriangleDemo {
    shader_dir: Option<PathBuf>,
    scene: Option<Scene>,
}

struct Scene {
    program: Program,
    mesh: Mesh,
    materials: Materials,
}

impl TriangleDemo {
    pub fn new(shader_dir: Option<PathBuf>) -> Self {
        Self {
            shader_dir,
            scene: None,
        }
    }
}

impl App for TriangleDemo {
    fn init(&mut self, ctx: &mut InitCtx<'_>) -> Result<()> {
        let program = FLAT
            .build(ctx.gpu, self.shader_dir.as_deref())
            .context("building flat shader")?;
        let mesh = Mesh::new(ctx.gpu, &VERTICES, &[0, 1, 2])?;

        self.scene = Some(Scene {
            program,
            mesh,
            materials: Materials::new(),
        });
        Ok(())
    }

    fn on_frame(&mut self, ctx: &mut FrameCtx<'_>) -> AppControl {
        let Some(scene) = &self.scene else {
            return AppControl::Exit;
        };

        ctx.clear(background());
        scene.program.bind();
        scene.mesh.draw(Some(&scene.program), &scene.materials);
        AppControl::Continue
    }
}
