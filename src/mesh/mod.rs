//! Scene model: meshes, their vertices and faces, and the camera
//!
//! Geometry can be built in code or loaded from Wavefront files through
//! [`wavefront`].
pub mod wavefront;

use crate::error::{RenderError, Result};
use crate::math::Vector3;

/// A mesh vertex.
///
/// The same type carries two spaces: mesh vertices hold local `coordinates`
/// and `normal`, while a projected vertex holds screen-space `coordinates`
/// (x px, y px, depth) and world-space `normal` / `world_coordinates`.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Vertex {
    pub coordinates: Vector3,
    pub normal: Vector3,
    pub world_coordinates: Vector3,
}

impl Vertex {
    pub fn new(coordinates: Vector3, normal: Vector3) -> Self {
        Self {
            coordinates,
            normal,
            world_coordinates: Vector3::ZERO,
        }
    }
}

/// Triangle as three indices into the owning mesh's vertices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Face {
    pub a: usize,
    pub b: usize,
    pub c: usize,
}

impl Face {
    pub fn new(a: usize, b: usize, c: usize) -> Self {
        Self { a, b, c }
    }

    pub fn indices(&self) -> [usize; 3] {
        [self.a, self.b, self.c]
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Mesh {
    pub name: String,
    vertices: Vec<Vertex>,
    faces: Vec<Face>,
    pub position: Vector3,
    /// Euler angles in radians: x = pitch, y = yaw, z = roll.
    pub rotation: Vector3,
}

impl Mesh {
    /// Builds a mesh, checking every face index against the vertex count.
    pub fn new(name: impl Into<String>, vertices: Vec<Vertex>, faces: Vec<Face>) -> Result<Self> {
        let name = name.into();
        for (face_idx, face) in faces.iter().enumerate() {
            if let Some(&index) = face.indices().iter().find(|&&i| i >= vertices.len()) {
                return Err(RenderError::FaceOutOfRange {
                    mesh: name,
                    face: face_idx,
                    index,
                    count: vertices.len(),
                });
            }
        }

        Ok(Mesh {
            name,
            vertices,
            faces,
            position: Vector3::ZERO,
            rotation: Vector3::ZERO,
        })
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    pub fn faces(&self) -> &[Face] {
        &self.faces
    }

    /// The three vertices of `face`. Indices were checked in [`Mesh::new`].
    pub fn face_vertices(&self, face: &Face) -> [Vertex; 3] {
        [
            self.vertices[face.a],
            self.vertices[face.b],
            self.vertices[face.c],
        ]
    }

    /// Advances the rotation, used between frames to animate.
    pub fn rotate(&mut self, delta: Vector3) {
        self.rotation = self.rotation + delta;
    }

    /// Bakes an offset into the vertex positions.
    pub fn translate(&mut self, offset: Vector3) {
        for v in self.vertices.iter_mut() {
            v.coordinates = v.coordinates + offset;
        }
    }

    /// Bakes a per-axis scale into the vertex positions.
    pub fn scale(&mut self, factor: Vector3) {
        for v in self.vertices.iter_mut() {
            v.coordinates = v.coordinates.scale_by(factor);
        }
    }

    /// Recentres the mesh and scales it uniformly so that it fits in the
    /// `[-1, 1]` cube. Meshes already inside the cube are left alone.
    pub fn normalize_vertices(&mut self) {
        let (min, max) = match self.bounds() {
            Some(b) => b,
            None => return,
        };

        let inside = |v: f32| (-1. ..=1.).contains(&v);
        if [min.x, min.y, min.z, max.x, max.y, max.z].iter().all(|&v| inside(v)) {
            return;
        }

        let half = (max - min) * 0.5;
        let centre = min + half;
        let largest = half.x.max(half.y).max(half.z);
        if largest <= 0. {
            return;
        }
        let scale_by = 1. / largest;

        for v in self.vertices.iter_mut() {
            v.coordinates = (v.coordinates - centre) * scale_by;
        }
    }

    /// Axis-aligned bounds of the vertex positions.
    pub fn bounds(&self) -> Option<(Vector3, Vector3)> {
        let first = self.vertices.first()?.coordinates;
        let bounds = self.vertices.iter().fold((first, first), |(lo, hi), v| {
            let p = v.coordinates;
            (
                Vector3::new(lo.x.min(p.x), lo.y.min(p.y), lo.z.min(p.z)),
                Vector3::new(hi.x.max(p.x), hi.y.max(p.y), hi.z.max(p.z)),
            )
        });
        Some(bounds)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub position: Vector3,
    pub target: Vector3,
}

impl Camera {
    pub fn new(position: Vector3, target: Vector3) -> Self {
        Self { position, target }
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(Vector3::new(0., 0., 10.), Vector3::ZERO)
    }
}

/// Unit cube centred on the origin with per-corner normals pointing outward
/// along the diagonals.
pub fn cube(name: &str) -> Mesh {
    let corners = [
        Vector3::new(-1., 1., 1.),
        Vector3::new(1., 1., 1.),
        Vector3::new(-1., -1., 1.),
        Vector3::new(1., -1., 1.),
        Vector3::new(-1., 1., -1.),
        Vector3::new(1., 1., -1.),
        Vector3::new(1., -1., -1.),
        Vector3::new(-1., -1., -1.),
    ];
    let vertices = corners
        .iter()
        .map(|&c| Vertex::new(c, c.normalize()))
        .collect();

    let faces = [
        [0, 1, 2],
        [1, 2, 3],
        [1, 3, 6],
        [1, 5, 6],
        [0, 1, 4],
        [1, 4, 5],
        [2, 3, 7],
        [3, 6, 7],
        [0, 2, 7],
        [0, 4, 7],
        [4, 5, 6],
        [4, 6, 7],
    ]
    .iter()
    .map(|f| Face::new(f[0], f[1], f[2]))
    .collect();

    // indices are constant and in range
    Mesh {
        name: name.to_string(),
        vertices,
        faces,
        position: Vector3::ZERO,
        rotation: Vector3::ZERO,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn rejects_face_out_of_range() {
        let vertices = vec![Vertex::default(); 3];
        let err = Mesh::new("tri", vertices, vec![Face::new(0, 1, 3)]).unwrap_err();
        match err {
            RenderError::FaceOutOfRange { face, index, count, .. } => {
                assert_eq!((face, index, count), (0, 3, 3));
            }
            other => panic!("unexpected error {other}"),
        }
    }

    #[test]
    fn translate_and_scale_bake_into_vertices() {
        let mut mesh = Mesh::new(
            "tri",
            vec![Vertex::new(Vector3::new(1., 2., 3.), Vector3::UNIT_Z)],
            vec![],
        )
        .unwrap();
        mesh.translate(Vector3::new(0., 1., 0.));
        mesh.scale(Vector3::new(1., 1., 3.));
        assert_eq!(mesh.vertices()[0].coordinates, Vector3::new(1., 3., 9.));
        assert_eq!(mesh.vertices()[0].normal, Vector3::UNIT_Z);
    }

    #[test]
    fn normalize_vertices_fits_unit_cube() {
        let mut mesh = Mesh::new(
            "box",
            vec![
                Vertex::new(Vector3::new(2., 0., 0.), Vector3::ZERO),
                Vertex::new(Vector3::new(10., 4., 1.), Vector3::ZERO),
            ],
            vec![],
        )
        .unwrap();
        mesh.normalize_vertices();
        let (lo, hi) = mesh.bounds().unwrap();
        assert_relative_eq!(lo.x, -1.);
        assert_relative_eq!(hi.x, 1.);
        assert_relative_eq!(hi.y, 0.5);
    }

    #[test]
    fn rotate_accumulates() {
        let mut mesh = cube("cube");
        mesh.rotate(Vector3::new(0.001, 0.001, 0.));
        mesh.rotate(Vector3::new(0.001, 0.001, 0.));
        assert_relative_eq!(mesh.rotation.x, 0.002);
        assert_eq!(mesh.rotation.z, 0.);
    }

    #[test]
    fn cube_faces_are_valid() {
        let c = cube("cube");
        assert_eq!(c.faces().len(), 12);
        assert!(Mesh::new("copy", c.vertices().to_vec(), c.faces().to_vec()).is_ok());
    }
}
