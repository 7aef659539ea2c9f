/// Point/directional lights, materials and per-fragment Phong shading
use nalgebra::Vector3;

use crate::matrix::Matrix4;
use crate::vector::Vector4;

/// A light source. `position.w == 0` makes it directional.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Light {
    pub position: Vector4,
    pub ambient: Vector3<f32>,
    pub diffuse: Vector3<f32>,
    pub specular: Vector3<f32>,
}

impl Light {
    pub fn new(position: Vector4, ambient: [f32; 3], diffuse: [f32; 3], specular: [f32; 3]) -> Self {
        Self {
            position,
            ambient: ambient.into(),
            diffuse: diffuse.into(),
            specular: specular.into(),
        }
    }

    /// The same light with its position moved into eye space
    pub fn in_eye_space(&self, view: &Matrix4) -> Self {
        Self {
            position: *view * self.position,
            ..*self
        }
    }

    /// Key light in front of the scene and a white fill light to the right
    pub fn defaults() -> Vec<Light> {
        vec![
            Light::new(
                Vector4::point(0.0, 0.0, 5.0),
                [0.2, 0.1, 0.1],
                [1.0, 0.5, 0.5],
                [1.0, 0.5, 0.5],
            ),
            Light::new(
                Vector4::point(8.0, 0.0, 0.0),
                [0.1, 0.1, 0.1],
                [0.9, 0.9, 0.9],
                [0.9, 0.9, 0.9],
            ),
        ]
    }
}

/// Surface reflectance
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Material {
    pub ambient: Vector3<f32>,
    pub diffuse: Vector3<f32>,
    pub specular: Vector3<f32>,
    pub shininess: f32,
}

impl Material {
    pub fn new(ambient: [f32; 3], diffuse: [f32; 3], specular: [f32; 3], shininess: f32) -> Self {
        Self {
            ambient: ambient.into(),
            diffuse: diffuse.into(),
            specular: specular.into(),
            shininess,
        }
    }

    /// Yellow and blue plastics
    pub fn defaults() -> Vec<Material> {
        vec![
            Material::new([0.6, 0.6, 0.2], [0.6, 0.6, 0.2], [0.3, 0.3, 0.3], 30.0),
            Material::new([0.1, 0.1, 0.5], [0.1, 0.1, 0.5], [0.4, 0.4, 0.4], 60.0),
        ]
    }
}

/// Phong lighting at an eye-space fragment.
///
/// `lights` must already be in eye space. `normal` need not be unit length. The
/// result is an unclamped linear RGB color.
pub fn shade(
    position: &Vector3<f32>,
    normal: &Vector3<f32>,
    lights: &[Light],
    material: &Material,
) -> Vector3<f32> {
    let mut color = Vector3::zeros();
    let n = normal.try_normalize(f32::EPSILON);
    let v = (-position).try_normalize(f32::EPSILON).unwrap_or_else(Vector3::z);

    for light in lights {
        color += material.ambient.component_mul(&light.ambient);

        let (Some(n), Some(l)) = (
            n,
            (light.position.xyz() - position * light.position.w).try_normalize(f32::EPSILON),
        ) else {
            continue;
        };

        let diffuse = n.dot(&l).max(0.0);
        color += material.diffuse.component_mul(&light.diffuse) * diffuse;

        if let Some(h) = (l + v).try_normalize(f32::EPSILON) {
            let specular = n.dot(&h).max(0.0).powf(material.shininess);
            color += material.specular.component_mul(&light.specular) * specular;
        }
    }

    color
}
