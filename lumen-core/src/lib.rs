/// Lumen Core Library - Transformation algebra and per-frame camera pipeline
///
/// This library provides the stateless core for rendering lit solids: homogeneous
/// matrices and vectors, normal-matrix derivation, camera/input state, lighting and
/// the frame pipeline that composes them. Front-ends own windowing and drawing.

pub mod camera;
pub mod config;
pub mod frame;
pub mod geometry;
pub mod lighting;
pub mod matrix;
pub mod vector;

// Re-export commonly used types
pub use camera::{CameraState, PanDirection, ProjectionMode};
pub use config::SceneConfig;
pub use frame::{Frame, Instance};
pub use geometry::{Mesh, Triangle, Vertex};
pub use lighting::{shade, Light, Material};
pub use matrix::{Matrix4, NormalMatrix};
pub use vector::Vector4;
