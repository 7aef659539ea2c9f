/// Geometry primitives for 3D rendering
use nalgebra::{Point3, Vector3};
use std::f32::consts::PI;

/// A 3D vertex with position and normal
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vertex {
    pub position: Point3<f32>,
    pub normal: Vector3<f32>,
}

impl Vertex {
    pub fn new(x: f32, y: f32, z: f32, nx: f32, ny: f32, nz: f32) -> Self {
        Self {
            position: Point3::new(x, y, z),
            normal: Vector3::new(nx, ny, nz),
        }
    }
}

/// A triangle face defined by three vertices
#[derive(Debug, Clone)]
pub struct Triangle {
    pub vertices: [Vertex; 3],
}

impl Triangle {
    pub fn new(v0: Vertex, v1: Vertex, v2: Vertex) -> Self {
        Self {
            vertices: [v0, v1, v2],
        }
    }

    /// Unnormalized face normal following counter-clockwise winding
    pub fn face_normal(&self) -> Vector3<f32> {
        let [v0, v1, v2] = self.vertices.map(|v| v.position);
        (v1 - v0).cross(&(v2 - v0))
    }
}

/// An indexed triangle mesh
#[derive(Debug, Clone, Default)]
pub struct Mesh {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
}

impl Mesh {
    pub fn new(vertices: Vec<Vertex>, indices: Vec<u32>) -> Self {
        Self { vertices, indices }
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Triangles assembled from the index buffer
    pub fn triangles(&self) -> impl Iterator<Item = Triangle> + '_ {
        self.indices.chunks_exact(3).map(|i| {
            Triangle::new(
                self.vertices[i[0] as usize],
                self.vertices[i[1] as usize],
                self.vertices[i[2] as usize],
            )
        })
    }

    /// Unit sphere split into `slices` around the y axis and `stacks` from pole to pole.
    ///
    /// Each vertex normal equals its position.
    pub fn sphere(slices: u32, stacks: u32) -> Self {
        let slices = slices.max(3);
        let stacks = stacks.max(2);

        let mut vertices = Vec::with_capacity(((slices + 1) * (stacks + 1)) as usize);
        for j in 0..=stacks {
            let t = j as f32 / stacks as f32;
            let (r, y) = (PI * t).sin_cos();

            for i in 0..=slices {
                let s = i as f32 / slices as f32;
                let (x, z) = (2.0 * PI * s).sin_cos();
                let (x, z) = (r * x, r * z);
                vertices.push(Vertex::new(x, y, z, x, y, z));
            }
        }

        let mut indices = Vec::with_capacity((slices * stacks * 6) as usize);
        for j in 0..stacks {
            let k = (slices + 1) * j;

            for i in 0..slices {
                let k0 = k + i;
                let k1 = k0 + 1;
                let k2 = k1 + slices;
                let k3 = k2 + 1;

                indices.extend_from_slice(&[k0, k2, k3, k0, k3, k1]);
            }
        }

        Self::new(vertices, indices)
    }

    /// Solid cube centered on the origin with flat per-face normals
    pub fn cube(size: f32) -> Self {
        let half = size / 2.0;
        // (normal, u, v) with u x v == normal
        let faces: [([f32; 3], [f32; 3], [f32; 3]); 6] = [
            ([-1.0, 0.0, 0.0], [0.0, 0.0, 1.0], [0.0, 1.0, 0.0]),
            ([0.0, 0.0, -1.0], [-1.0, 0.0, 0.0], [0.0, 1.0, 0.0]),
            ([0.0, -1.0, 0.0], [1.0, 0.0, 0.0], [0.0, 0.0, 1.0]),
            ([1.0, 0.0, 0.0], [0.0, 0.0, -1.0], [0.0, 1.0, 0.0]),
            ([0.0, 1.0, 0.0], [1.0, 0.0, 0.0], [0.0, 0.0, -1.0]),
            ([0.0, 0.0, 1.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]),
        ];

        let mut vertices = Vec::with_capacity(36);
        for (n, u, v) in faces {
            let (n, u, v) = (Vector3::from(n), Vector3::from(u), Vector3::from(v));
            let corner = |a: f32, b: f32| {
                let p = (n + u * a + v * b) * half;
                Vertex::new(p.x, p.y, p.z, n.x, n.y, n.z)
            };
            let quad = [corner(-1.0, -1.0), corner(1.0, -1.0), corner(1.0, 1.0), corner(-1.0, 1.0)];
            vertices.extend([quad[0], quad[1], quad[2], quad[0], quad[2], quad[3]]);
        }

        let indices = (0..vertices.len() as u32).collect();
        Self::new(vertices, indices)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sphere_counts() {
        let mesh = Mesh::sphere(16, 8);
        assert_eq!(mesh.vertices.len(), 17 * 9);
        assert_eq!(mesh.triangle_count(), 16 * 8 * 2);
        assert!(mesh.indices.iter().all(|&i| (i as usize) < mesh.vertices.len()));
    }

    #[test]
    fn test_sphere_vertices_on_unit_sphere() {
        for v in &Mesh::sphere(12, 6).vertices {
            assert!((v.position.coords.norm() - 1.0).abs() < 1e-5);
            assert_eq!(v.position.coords, v.normal);
        }
    }

    #[test]
    fn test_sphere_winding_faces_outward() {
        for triangle in Mesh::sphere(16, 8).triangles() {
            let n = triangle.face_normal();
            if n.norm() < 1e-6 {
                // collapsed at a pole
                continue;
            }
            let centroid = triangle.vertices.iter().map(|v| v.position.coords).sum::<Vector3<f32>>();
            assert!(n.dot(&centroid) > 0.0);
        }
    }

    #[test]
    fn test_cube_faces() {
        let cube = Mesh::cube(2.0);
        assert_eq!(cube.vertices.len(), 36);
        assert_eq!(cube.triangle_count(), 12);

        for triangle in cube.triangles() {
            let n = triangle.face_normal().normalize();
            for v in &triangle.vertices {
                assert!((n - v.normal).norm() < 1e-6);
                assert!(v.position.coords.iter().all(|c| c.abs() == 1.0));
            }
        }
    }
}
