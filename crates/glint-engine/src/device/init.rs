/// Initialization parameters for the GL context.
///
/// Keep this structure stable and minimal. Add configuration flags only when a
/// concrete platform or driver requirement exists.
#[derive(Debug, Clone)]
pub struct ContextConfig {
    /// Requested core-profile version `(major, minor)`.
    pub gl_version: (u8, u8),

    /// Wait for vblank on swap.
    pub vsync: bool,

    /// Enable `FRAMEBUFFER_SRGB` so linear shader output is encoded on write.
    pub srgb: bool,

    /// Request a depth buffer and enable depth testing.
    pub depth_test: bool,

    /// Cull back faces.
    pub cull_back_faces: bool,
}

impl Default for ContextConfig {
    fn default() -> Self {
        Self {
            gl_version: (3, 3),
            vsync: true,
            srgb: true,
            depth_test: true,
            cull_back_faces: true,
        }
    }
}
