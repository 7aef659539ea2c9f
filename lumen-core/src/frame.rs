/// Per-frame composition of projection, view and model transforms
use crate::camera::{CameraState, ProjectionMode};
use crate::config::SceneConfig;
use crate::lighting::{Light, Material};
use crate::matrix::{Matrix4, NormalMatrix};

/// Transforms for one frame. A pure function of scene, camera, mode and time.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    pub projection: Matrix4,
    pub view: Matrix4,
    pub model: Matrix4,
    pub modelview: Matrix4,
    pub normal_matrix: NormalMatrix,
}

/// One drawn copy of the solid
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Instance {
    pub modelview: Matrix4,
    pub normal_matrix: NormalMatrix,
    pub material: Material,
}

impl Instance {
    pub fn new(modelview: Matrix4, material: Material) -> Self {
        Self {
            modelview,
            normal_matrix: modelview.normal_matrix(),
            material,
        }
    }
}

impl Frame {
    pub fn compute(
        config: &SceneConfig,
        camera: &CameraState,
        mode: ProjectionMode,
        time: f32,
    ) -> Self {
        let projection = camera.projection(mode, config.z_near, config.z_far);
        if projection == Matrix4::zero() {
            log::debug!(
                "degenerate {:?} projection for viewport {:?} at scale {}",
                mode,
                camera.size(),
                camera.scale()
            );
        }

        let [x, y] = camera.location();
        let axis = config.spin_axis;
        let model = Matrix4::translate(x, y, 0.0) * Matrix4::rotate(time, axis.x, axis.y, axis.z);
        let view = Matrix4::look_at(config.eye, config.target, config.up);
        let modelview = view * model;

        log::trace!("frame t={time:.3} pan=({x:.3}, {y:.3})");

        Self {
            projection,
            view,
            model,
            modelview,
            normal_matrix: modelview.normal_matrix(),
        }
    }

    /// Every configured instance, each offset in model space from the frame's modelview
    pub fn instances(&self, config: &SceneConfig) -> Vec<Instance> {
        if config.materials.is_empty() {
            return Vec::new();
        }

        config
            .instance_offsets
            .iter()
            .enumerate()
            .map(|(i, offset)| {
                let modelview = self.modelview * Matrix4::translate(offset.x, offset.y, offset.z);
                Instance::new(modelview, config.materials[i % config.materials.len()])
            })
            .collect()
    }

    /// Scene lights transformed into eye space
    pub fn lights(&self, config: &SceneConfig) -> Vec<Light> {
        config.lights.iter().map(|l| l.in_eye_space(&self.view)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vector::Vector4;

    #[test]
    fn test_frame_is_deterministic() {
        let config = SceneConfig::default();
        let camera = CameraState::default();
        let a = Frame::compute(&config, &camera, ProjectionMode::Perspective, 1.25);
        let b = Frame::compute(&config, &camera, ProjectionMode::Perspective, 1.25);
        assert_eq!(a, b);
    }

    #[test]
    fn test_modelview_composition() {
        let config = SceneConfig::default();
        let mut camera = CameraState::default();
        camera.drag_to(480.0, 120.0);
        let frame = Frame::compute(&config, &camera, ProjectionMode::Perspective, 0.5);

        assert_eq!(frame.model, Matrix4::translate(0.5, 0.5, 0.0) * Matrix4::rotate(0.5, 0.0, 1.0, 0.0));
        assert_eq!(frame.modelview, frame.view * frame.model);
        assert_eq!(frame.normal_matrix, frame.modelview.normal_matrix());
    }

    #[test]
    fn test_view_centers_target() {
        let config = SceneConfig::default();
        let frame = Frame::compute(&config, &CameraState::default(), ProjectionMode::Perspective, 0.0);
        let origin = frame.view * Vector4::point(0.0, 0.0, 0.0);
        let distance = (3.0f32 * 3.0 + 4.0 * 4.0 + 5.0 * 5.0).sqrt();
        assert!(origin.x.abs() < 1e-5 && origin.y.abs() < 1e-5);
        assert!((origin.z + distance).abs() < 1e-4);
    }

    #[test]
    fn test_projection_follows_mode() {
        let config = SceneConfig::default();
        let camera = CameraState::new(400.0, 200.0);
        let ortho = Frame::compute(&config, &camera, ProjectionMode::Orthographic, 0.0);
        assert_eq!(ortho.projection, Matrix4::orthogonal(-4.0, 4.0, -2.0, 2.0, 1.0, 10.0));
        let persp = Frame::compute(&config, &camera, ProjectionMode::Perspective, 0.0);
        assert_eq!(persp.projection.at(3, 2), -1.0);
    }

    #[test]
    fn test_instances_and_lights() {
        let config = SceneConfig::default();
        let frame = Frame::compute(&config, &CameraState::default(), ProjectionMode::Perspective, 2.0);

        let instances = frame.instances(&config);
        assert_eq!(instances.len(), 2);
        assert_eq!(instances[0].modelview, frame.modelview * Matrix4::identity());
        assert_eq!(instances[1].modelview, frame.modelview * Matrix4::translate(0.0, 0.0, 3.0));
        assert_eq!(instances[1].material, config.materials[1]);
        assert_eq!(instances[1].normal_matrix, instances[1].modelview.normal_matrix());

        let lights = frame.lights(&config);
        assert_eq!(lights[0].position, frame.view * Vector4::point(0.0, 0.0, 5.0));
    }
}
