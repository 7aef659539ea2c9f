/// Lumen Web - WASM bridge from the frame pipeline to WebGL2 uniforms
///
/// The page owns the canvas, shaders and draw calls. This module owns the camera
/// state, turns browser input into camera updates, and uploads each frame's
/// matrices and lights as uniforms.
use lumen_core::{CameraState, Frame, Instance, Light, PanDirection, ProjectionMode, SceneConfig};
use wasm_bindgen::prelude::*;
use web_sys::{WebGl2RenderingContext, WebGlProgram};

#[wasm_bindgen]
pub struct WebRenderer {
    scene: SceneConfig,
    camera: CameraState,
    mode: ProjectionMode,
    frame: Frame,
}

#[wasm_bindgen]
impl WebRenderer {
    #[wasm_bindgen(constructor)]
    pub fn new(width: f32, height: f32) -> WebRenderer {
        let scene = SceneConfig::default();
        let camera = CameraState::new(width, height);
        let mode = ProjectionMode::default();
        let frame = Frame::compute(&scene, &camera, mode, 0.0);
        WebRenderer {
            scene,
            camera,
            mode,
            frame,
        }
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        self.camera.resize(width, height);
    }

    /// Wheel delta in notches, positive widens the view
    pub fn scroll(&mut self, dy: f32) {
        self.camera.scroll(dy);
    }

    /// Pan by a `KeyboardEvent.key` arrow name; returns false for other keys
    pub fn pan(&mut self, key: &str) -> bool {
        let direction = match key {
            "ArrowLeft" => PanDirection::Left,
            "ArrowRight" => PanDirection::Right,
            "ArrowUp" => PanDirection::Up,
            "ArrowDown" => PanDirection::Down,
            _ => return false,
        };
        self.camera.pan(direction);
        true
    }

    /// Cursor position in canvas pixels
    pub fn drag_to(&mut self, x: f32, y: f32) {
        self.camera.drag_to(x, y);
    }

    pub fn set_orthographic(&mut self, orthographic: bool) {
        self.mode = if orthographic {
            ProjectionMode::Orthographic
        } else {
            ProjectionMode::Perspective
        };
    }

    /// Recompute the frame for `time` seconds since start
    pub fn advance(&mut self, time: f32) {
        self.frame = Frame::compute(&self.scene, &self.camera, self.mode, time);
    }

    pub fn instance_count(&self) -> usize {
        self.instances().len()
    }

    /// Column-major 4x4 projection matrix
    pub fn projection(&self) -> Vec<f32> {
        self.frame.projection.data().to_vec()
    }

    /// Column-major 4x4 modelview of an instance; empty when out of range
    pub fn modelview(&self, instance: usize) -> Vec<f32> {
        self.instances()
            .get(instance)
            .map(|i| i.modelview.data().to_vec())
            .unwrap_or_default()
    }

    /// Column-major 3x3 normal matrix of an instance; empty when out of range
    pub fn normal_matrix(&self, instance: usize) -> Vec<f32> {
        self.instances()
            .get(instance)
            .map(|i| i.normal_matrix.data().to_vec())
            .unwrap_or_default()
    }

    /// Eye-space light positions, four floats per light
    pub fn light_positions(&self) -> Vec<f32> {
        self.frame
            .lights(&self.scene)
            .iter()
            .flat_map(|l| l.position.data())
            .collect()
    }

    /// Set the frame's uniforms on `program` for drawing instance `instance`.
    ///
    /// Uniforms the program does not declare are skipped.
    pub fn upload(&self, gl: &WebGl2RenderingContext, program: &WebGlProgram, instance: usize) {
        let instances = self.instances();
        let Some(instance) = instances.get(instance) else {
            log::warn!("no instance {} of {}", instance, instances.len());
            return;
        };

        gl.use_program(Some(program));
        let location = |name: &str| gl.get_uniform_location(program, name);

        gl.uniform_matrix4fv_with_f32_array(
            location("projection").as_ref(),
            false,
            self.frame.projection.data(),
        );
        gl.uniform_matrix4fv_with_f32_array(
            location("modelview").as_ref(),
            false,
            instance.modelview.data(),
        );
        gl.uniform_matrix3fv_with_f32_array(
            location("normalMatrix").as_ref(),
            false,
            instance.normal_matrix.data(),
        );

        let lights = self.frame.lights(&self.scene);
        gl.uniform4fv_with_f32_array(
            location("Lpos").as_ref(),
            &flatten::<4>(&lights, |l| l.position.data()),
        );
        gl.uniform3fv_with_f32_array(
            location("Lamb").as_ref(),
            &flatten::<3>(&lights, |l| l.ambient.into()),
        );
        gl.uniform3fv_with_f32_array(
            location("Ldiff").as_ref(),
            &flatten::<3>(&lights, |l| l.diffuse.into()),
        );
        gl.uniform3fv_with_f32_array(
            location("Lspec").as_ref(),
            &flatten::<3>(&lights, |l| l.specular.into()),
        );

        let material = &instance.material;
        gl.uniform3fv_with_f32_array(location("Kamb").as_ref(), material.ambient.as_slice());
        gl.uniform3fv_with_f32_array(location("Kdiff").as_ref(), material.diffuse.as_slice());
        gl.uniform3fv_with_f32_array(location("Kspec").as_ref(), material.specular.as_slice());
        gl.uniform1f(location("Kshi").as_ref(), material.shininess);
    }
}

/// One uniform array element per light
fn flatten<const N: usize>(lights: &[Light], f: impl Fn(&Light) -> [f32; N]) -> Vec<f32> {
    lights.iter().flat_map(f).collect()
}

impl WebRenderer {
    fn instances(&self) -> Vec<Instance> {
        self.frame.instances(&self.scene)
    }
}

#[wasm_bindgen(start)]
pub fn main() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info)
        .map_err(|e| JsValue::from_str(&format!("failed to initialize logging: {e}")))?;
    log::info!("lumen web bridge ready");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use lumen_core::Matrix4;

    #[test]
    fn test_buffers_have_uniform_sizes() {
        let mut renderer = WebRenderer::new(640.0, 480.0);
        renderer.advance(1.0);
        assert_eq!(renderer.projection().len(), 16);
        assert_eq!(renderer.instance_count(), 2);
        assert_eq!(renderer.modelview(1).len(), 16);
        assert_eq!(renderer.normal_matrix(1).len(), 9);
        assert!(renderer.modelview(2).is_empty());
        assert_eq!(renderer.light_positions().len(), 8);
    }

    #[test]
    fn test_input_reaches_frame() {
        let mut renderer = WebRenderer::new(640.0, 480.0);
        assert!(renderer.pan("ArrowRight"));
        assert!(!renderer.pan("Enter"));
        renderer.drag_to(480.0, 240.0);
        renderer.advance(0.0);

        let expected = Frame::compute(
            &SceneConfig::default(),
            &{
                let mut camera = CameraState::new(640.0, 480.0);
                camera.drag_to(480.0, 240.0);
                camera
            },
            ProjectionMode::Perspective,
            0.0,
        );
        assert_eq!(renderer.modelview(0), (expected.modelview * Matrix4::identity()).data().to_vec());
    }

    #[test]
    fn test_orthographic_toggle() {
        let mut renderer = WebRenderer::new(400.0, 200.0);
        renderer.set_orthographic(true);
        renderer.advance(0.0);
        assert_eq!(
            renderer.projection(),
            Matrix4::orthogonal(-4.0, 4.0, -2.0, 2.0, 1.0, 10.0).data().to_vec()
        );
    }
}
