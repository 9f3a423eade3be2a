use crate::math::{Matrix, Vector2, Vector3};
use crate::mesh::Vertex;

/// Maps normalized device coordinates onto a `width` x `height` pixel grid
/// with the origin at the top left and Y growing downwards.
#[derive(Debug, Clone, Copy)]
pub struct Viewport {
    width: f32,
    height: f32,
}

impl Viewport {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width: width as f32,
            height: height as f32,
        }
    }

    fn to_screen(&self, ndc: Vector3) -> (f32, f32) {
        (
            ndc.x * self.width + self.width / 2.,
            -ndc.y * self.height + self.height / 2.,
        )
    }

    /// Projects a mesh vertex for shading.
    ///
    /// `transform` is `world * view * projection`. The result's
    /// `coordinates` are (x px, y px, depth); `world_coordinates` and
    /// `normal` are in world space for lighting. The normal goes through the
    /// same point transform as positions, translation included, rather than
    /// the inverse transpose.
    pub fn project(&self, vertex: Vertex, transform: &Matrix, world: &Matrix) -> Vertex {
        let ndc = transform.transform_coordinate(vertex.coordinates);
        let (x, y) = self.to_screen(ndc);

        Vertex {
            coordinates: Vector3::new(x, y, ndc.z),
            normal: world.transform_coordinate(vertex.normal),
            world_coordinates: world.transform_coordinate(vertex.coordinates),
        }
    }

    /// Pixel position only, for the point and wireframe paths.
    pub fn project_2d(&self, coordinates: Vector3, transform: &Matrix) -> Vector2 {
        let (x, y) = self.to_screen(transform.transform_coordinate(coordinates));
        Vector2::new(x, y)
    }
}
