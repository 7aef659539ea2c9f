/// Fixed scene parameters shared by every frame
use nalgebra::{Point3, Vector3};

use crate::lighting::{Light, Material};

#[derive(Debug, Clone)]
pub struct SceneConfig {
    /// Camera position
    pub eye: Point3<f32>,
    /// Point the camera looks at
    pub target: Point3<f32>,
    pub up: Vector3<f32>,
    pub z_near: f32,
    pub z_far: f32,
    /// Axis the model spins around, one radian per second
    pub spin_axis: Vector3<f32>,
    /// Model-space offsets of each drawn instance; instance `i` uses material `i`
    pub instance_offsets: Vec<Vector3<f32>>,
    /// World-space lights
    pub lights: Vec<Light>,
    pub materials: Vec<Material>,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            eye: Point3::new(3.0, 4.0, 5.0),
            target: Point3::origin(),
            up: Vector3::y(),
            z_near: 1.0,
            z_far: 10.0,
            spin_axis: Vector3::y(),
            instance_offsets: vec![Vector3::zeros(), Vector3::new(0.0, 0.0, 3.0)],
            lights: Light::defaults(),
            materials: Material::defaults(),
        }
    }
}
