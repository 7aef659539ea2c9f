/// Homogeneous 4-component vector
use nalgebra::{Point3, Vector3};

/// A point (`w = 1`) or direction (`w = 0`) in homogeneous coordinates
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vector4 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub w: f32,
}

impl Vector4 {
    pub const fn new(x: f32, y: f32, z: f32, w: f32) -> Self {
        Self { x, y, z, w }
    }

    /// A positional value, affected by translation and perspective divide
    pub const fn point(x: f32, y: f32, z: f32) -> Self {
        Self::new(x, y, z, 1.0)
    }

    /// A directional value, unaffected by translation
    pub const fn direction(x: f32, y: f32, z: f32) -> Self {
        Self::new(x, y, z, 0.0)
    }

    pub fn data(&self) -> [f32; 4] {
        [self.x, self.y, self.z, self.w]
    }

    pub fn xyz(&self) -> Vector3<f32> {
        Vector3::new(self.x, self.y, self.z)
    }

    /// Perspective divide; `None` when `w` is too close to zero
    pub fn project(&self) -> Option<Vector3<f32>> {
        if self.w.abs() < 1e-6 {
            return None;
        }
        Some(self.xyz() / self.w)
    }
}

impl From<Point3<f32>> for Vector4 {
    fn from(p: Point3<f32>) -> Self {
        Self::point(p.x, p.y, p.z)
    }
}

impl From<Vector3<f32>> for Vector4 {
    fn from(v: Vector3<f32>) -> Self {
        Self::direction(v.x, v.y, v.z)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_and_direction() {
        assert_eq!(Vector4::point(1.0, 2.0, 3.0).w, 1.0);
        assert_eq!(Vector4::direction(1.0, 2.0, 3.0).w, 0.0);
        assert_eq!(
            Vector4::from(Point3::new(4.0, 5.0, 6.0)).data(),
            [4.0, 5.0, 6.0, 1.0]
        );
    }

    #[test]
    fn test_project() {
        let v = Vector4::new(2.0, 4.0, -6.0, 2.0);
        let p = v.project().unwrap();
        assert!((p - Vector3::new(1.0, 2.0, -3.0)).norm() < 1e-6);
        assert!(Vector4::direction(1.0, 0.0, 0.0).project().is_none());
    }
}
