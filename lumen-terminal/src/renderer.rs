/// ASCII rasterizer with per-fragment lighting for terminal rendering
use crossterm::{
    style::{Color, Print, ResetColor, SetForegroundColor},
    QueueableCommand,
};
use lumen_core::{shade, Instance, Light, Matrix4, Mesh, Vector4, Vertex};
use nalgebra::Vector3;
use std::io::Write;

/// Character luminosity ramp for shading (darkest to lightest)
const LUMINOSITY_RAMP: &[char] = &[' ', '.', ':', '-', '=', '+', '*', '#', '%', '@'];

/// A vertex after the vertex stage: screen position plus eye-space attributes
#[derive(Debug, Clone, Copy)]
struct Projected {
    x: f32,
    y: f32,
    depth: f32,
    eye: Vector3<f32>,
    normal: Vector3<f32>,
}

/// ASCII renderer that converts lit meshes to terminal characters
pub struct AsciiRenderer {
    width: usize,
    height: usize,
    depth_buffer: Vec<f32>,
    char_buffer: Vec<char>,
    color_buffer: Vec<Color>,
}

impl AsciiRenderer {
    pub fn new(width: usize, height: usize) -> Self {
        let size = width * height;
        Self {
            width,
            height,
            depth_buffer: vec![f32::INFINITY; size],
            char_buffer: vec![' '; size],
            color_buffer: vec![Color::Reset; size],
        }
    }

    pub fn resize(&mut self, width: usize, height: usize) {
        *self = Self::new(width, height);
    }

    pub fn clear(&mut self) {
        self.depth_buffer.fill(f32::INFINITY);
        self.char_buffer.fill(' ');
        self.color_buffer.fill(Color::Reset);
    }

    /// Character at a cell, `None` outside the buffer
    pub fn cell(&self, x: usize, y: usize) -> Option<char> {
        (x < self.width && y < self.height).then(|| self.char_buffer[y * self.width + x])
    }

    /// Number of cells covered by geometry
    pub fn coverage(&self) -> usize {
        self.depth_buffer.iter().filter(|d| d.is_finite()).count()
    }

    /// Draw one instance of `mesh`. `lights` must be in eye space.
    pub fn render_instance(
        &mut self,
        mesh: &Mesh,
        instance: &Instance,
        projection: &Matrix4,
        lights: &[Light],
    ) {
        for triangle in mesh.triangles() {
            let [a, b, c] = triangle.vertices;
            let projected = [a, b, c].map(|v| self.project(v, instance, projection));
            // Triangles crossing behind the camera are dropped whole
            if let [Some(p0), Some(p1), Some(p2)] = projected {
                self.rasterize_triangle(&[p0, p1, p2], instance, lights);
            }
        }
    }

    fn project(&self, vertex: Vertex, instance: &Instance, projection: &Matrix4) -> Option<Projected> {
        let eye = instance.modelview * Vector4::from(vertex.position);
        let clip = *projection * eye;
        if clip.w <= 0.0 {
            return None;
        }
        let ndc = clip.project()?;

        Some(Projected {
            x: (ndc.x + 1.0) * 0.5 * self.width as f32,
            y: (1.0 - ndc.y) * 0.5 * self.height as f32,
            depth: ndc.z,
            eye: eye.xyz(),
            normal: instance.normal_matrix * vertex.normal,
        })
    }

    fn rasterize_triangle(&mut self, v: &[Projected; 3], instance: &Instance, lights: &[Light]) {
        if self.width == 0 || self.height == 0 {
            return;
        }

        // Bounding box, clipped to screen bounds
        let min_x = v[0].x.min(v[1].x).min(v[2].x).floor().max(0.0) as usize;
        let max_x = (v[0].x.max(v[1].x).max(v[2].x).ceil() as i64).min(self.width as i64 - 1);
        let min_y = v[0].y.min(v[1].y).min(v[2].y).floor().max(0.0) as usize;
        let max_y = (v[0].y.max(v[1].y).max(v[2].y).ceil() as i64).min(self.height as i64 - 1);
        if max_x < 0 || max_y < 0 {
            return;
        }

        for y in min_y..=max_y as usize {
            for x in min_x..=max_x as usize {
                let p = (x as f32 + 0.5, y as f32 + 0.5);
                let Some((w0, w1, w2)) =
                    barycentric((v[0].x, v[0].y), (v[1].x, v[1].y), (v[2].x, v[2].y), p)
                else {
                    return;
                };
                if w0 < 0.0 || w1 < 0.0 || w2 < 0.0 {
                    continue;
                }

                let depth = w0 * v[0].depth + w1 * v[1].depth + w2 * v[2].depth;
                let idx = y * self.width + x;
                if !(-1.0..=1.0).contains(&depth) || depth >= self.depth_buffer[idx] {
                    continue;
                }

                let eye = v[0].eye * w0 + v[1].eye * w1 + v[2].eye * w2;
                let normal = v[0].normal * w0 + v[1].normal * w1 + v[2].normal * w2;
                let color = shade(&eye, &normal, lights, &instance.material);

                self.depth_buffer[idx] = depth;
                self.char_buffer[idx] = ramp(luminance(&color));
                self.color_buffer[idx] = to_rgb(&color);
            }
        }
    }

    pub fn draw<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        for y in 0..self.height {
            for x in 0..self.width {
                let idx = y * self.width + x;
                writer.queue(SetForegroundColor(self.color_buffer[idx]))?;
                writer.queue(Print(self.char_buffer[idx]))?;
            }
            if y + 1 < self.height {
                writer.queue(Print("\r\n"))?;
            }
        }
        writer.queue(ResetColor)?;
        Ok(())
    }
}

fn luminance(color: &Vector3<f32>) -> f32 {
    (0.2126 * color.x + 0.7152 * color.y + 0.0722 * color.z).clamp(0.0, 1.0)
}

/// Covered cells never map to the blank character
fn ramp(brightness: f32) -> char {
    let char_index = (brightness * (LUMINOSITY_RAMP.len() - 1) as f32) as usize;
    LUMINOSITY_RAMP[char_index.clamp(1, LUMINOSITY_RAMP.len() - 1)]
}

fn to_rgb(color: &Vector3<f32>) -> Color {
    let channel = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
    Color::Rgb {
        r: channel(color.x),
        g: channel(color.y),
        b: channel(color.z),
    }
}

/// Calculate barycentric coordinates for a point in a triangle
fn barycentric(
    v0: (f32, f32),
    v1: (f32, f32),
    v2: (f32, f32),
    p: (f32, f32),
) -> Option<(f32, f32, f32)> {
    let denom = (v1.1 - v2.1) * (v0.0 - v2.0) + (v2.0 - v1.0) * (v0.1 - v2.1);

    if denom.abs() < 1e-6 {
        return None;
    }

    let w0 = ((v1.1 - v2.1) * (p.0 - v2.0) + (v2.0 - v1.0) * (p.1 - v2.1)) / denom;
    let w1 = ((v2.1 - v0.1) * (p.0 - v2.0) + (v0.0 - v2.0) * (p.1 - v2.1)) / denom;
    let w2 = 1.0 - w0 - w1;

    Some((w0, w1, w2))
}

#[cfg(test)]
mod tests {
    use super::*;
    use lumen_core::{CameraState, Frame, ProjectionMode, SceneConfig};

    fn render(mode: ProjectionMode, camera: &CameraState) -> AsciiRenderer {
        let config = SceneConfig::default();
        let frame = Frame::compute(&config, camera, mode, 0.0);
        let lights = frame.lights(&config);
        let mesh = Mesh::sphere(16, 8);

        let mut renderer = AsciiRenderer::new(80, 24);
        for instance in frame.instances(&config) {
            renderer.render_instance(&mesh, &instance, &frame.projection, &lights);
        }
        renderer
    }

    #[test]
    fn test_sphere_covers_screen_center() {
        let camera = CameraState::new(80.0, 48.0);
        for mode in [ProjectionMode::Perspective, ProjectionMode::Orthographic] {
            let renderer = render(mode, &camera);
            assert!(renderer.coverage() > 0);
            assert_ne!(renderer.cell(40, 12), Some(' '));
        }
    }

    #[test]
    fn test_degenerate_projection_draws_nothing() {
        let camera = CameraState::new(80.0, 0.0);
        let renderer = render(ProjectionMode::Orthographic, &camera);
        assert_eq!(renderer.coverage(), 0);
    }

    #[test]
    fn test_clear_resets_buffers() {
        let mut renderer = render(ProjectionMode::Perspective, &CameraState::new(80.0, 48.0));
        renderer.clear();
        assert_eq!(renderer.coverage(), 0);
        assert_eq!(renderer.cell(40, 12), Some(' '));
        assert_eq!(renderer.cell(80, 0), None);
    }

    #[test]
    fn test_ramp_and_color() {
        assert_eq!(ramp(0.0), '.');
        assert_eq!(ramp(1.0), '@');
        assert_eq!(to_rgb(&Vector3::new(2.0, 0.5, -1.0)), Color::Rgb { r: 255, g: 128, b: 0 });
    }

    #[test]
    fn test_barycentric() {
        let weights = barycentric((0.0, 0.0), (4.0, 0.0), (0.0, 4.0), (1.0, 1.0)).unwrap();
        assert!((weights.0 - 0.5).abs() < 1e-6);
        assert!((weights.1 - 0.25).abs() < 1e-6);
        assert!((weights.2 - 0.25).abs() < 1e-6);
        assert!(barycentric((0.0, 0.0), (1.0, 1.0), (2.0, 2.0), (1.0, 0.0)).is_none());
    }
}
