//! One [`App`](glint_engine::core::App) per subcommand.
//!
//! Each demo keeps its command-line inputs until `init`, then builds its GPU
//! objects into a `Scene` that lives until the runtime drops the app.

mod mesh;
mod model;
mod quad;
mod triangle;

pub use mesh::{MeshDemo, Shape};
pub use model::ModelDemo;
pub use quad::QuadDemo;
pub use triangle::TriangleDemo;
