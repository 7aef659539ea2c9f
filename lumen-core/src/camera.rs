/// Camera and input state driven by window events
use crate::matrix::Matrix4;

/// Projection mode for rendering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProjectionMode {
    Orthographic,
    #[default]
    Perspective,
}

impl ProjectionMode {
    pub fn toggled(self) -> Self {
        match self {
            Self::Orthographic => Self::Perspective,
            Self::Perspective => Self::Orthographic,
        }
    }
}

/// Keyboard pan direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanDirection {
    Left,
    Right,
    Up,
    Down,
}

/// Viewport size, zoom scale and pan location.
///
/// Owned by the front-end, mutated by its input handlers and read once per frame.
#[derive(Debug, Clone, PartialEq)]
pub struct CameraState {
    size: [f32; 2],
    scale: f32,
    location: [f32; 2],
}

impl CameraState {
    pub const DEFAULT_SCALE: f32 = 100.0;

    pub fn new(width: f32, height: f32) -> Self {
        Self {
            size: [width, height],
            scale: Self::DEFAULT_SCALE,
            location: [0.0, 0.0],
        }
    }

    pub fn size(&self) -> [f32; 2] {
        self.size
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    /// Pan offset in normalized device units, y up
    pub fn location(&self) -> [f32; 2] {
        self.location
    }

    pub fn aspect(&self) -> f32 {
        self.size[0] / self.size[1]
    }

    /// Vertical field of view in radians derived from the zoom scale
    pub fn fovy(&self) -> f32 {
        self.scale * 0.01
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        self.size = [width, height];
    }

    /// Apply a scroll wheel delta to the zoom scale
    pub fn scroll(&mut self, dy: f32) {
        self.scale += dy;
    }

    /// Move the pan location by one pixel's worth of normalized device space
    pub fn pan(&mut self, direction: PanDirection) {
        match direction {
            PanDirection::Left => self.location[0] -= 2.0 / self.size[0],
            PanDirection::Right => self.location[0] += 2.0 / self.size[0],
            PanDirection::Down => self.location[1] -= 2.0 / self.size[1],
            PanDirection::Up => self.location[1] += 2.0 / self.size[1],
        }
    }

    /// Place the pan location under a cursor given in window pixels (y down)
    pub fn drag_to(&mut self, x: f32, y: f32) {
        self.location = [x * 2.0 / self.size[0] - 1.0, 1.0 - y * 2.0 / self.size[1]];
    }

    /// Projection for the current viewport and zoom
    pub fn projection(&self, mode: ProjectionMode, z_near: f32, z_far: f32) -> Matrix4 {
        match mode {
            ProjectionMode::Perspective => {
                Matrix4::perspective(self.fovy(), self.aspect(), z_near, z_far)
            }
            ProjectionMode::Orthographic => {
                let w = self.size[0] / self.scale;
                let h = self.size[1] / self.scale;
                Matrix4::orthogonal(-w, w, -h, h, z_near, z_far)
            }
        }
    }
}

impl Default for CameraState {
    fn default() -> Self {
        Self::new(640.0, 480.0)
    }
}
