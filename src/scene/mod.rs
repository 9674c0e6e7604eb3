//! The ribbons + particles scene.

mod limits;
mod renderer;

pub use renderer::{SceneError, SceneRenderer};
