use crate::sim::units::Float;
use nalgebra::{Vector2, Vector3, Vector4};

/// Casts the outline of a sphere from a point of view onto a plane
/// `a*x + b*y + c*z + d = 0`, stored as `(a, b, c, d)`.
#[derive(Clone, Debug)]
pub(crate) struct Projector {
    pub(crate) viewpoint: Vector3<Float>,
    pub(crate) plane: Vector4<Float>,
}

impl Projector {
    pub(crate) fn new(viewpoint: Vector3<Float>, plane: Vector4<Float>) -> Projector {
        Projector { viewpoint, plane }
    }

    /// Looks at the box from beyond its far wall, centered on the screen.
    pub(crate) fn for_box(dimensions: [Float; 3]) -> Projector {
        let [width, height, depth] = dimensions;
        Projector::new(
            Vector3::new(width / 2., height / 2., depth * 1.25),
            Vector4::new(0., 0., 1., -depth),
        )
    }

    /// Returns two opposite corners of the projected outline, or `None` when
    /// a ray runs parallel to the plane.
    pub(crate) fn project(
        &self,
        position: &Vector3<Float>,
        radius: Float,
    ) -> Option<(Vector2<Float>, Vector2<Float>)> {
        let to_view = position - self.viewpoint;
        let offset = Vector3::new(1., 1., 0.) * (std::f64::consts::SQRT_2 * radius);
        let corner1 = self.cast(position, &(to_view + offset))?;
        let corner2 = self.cast(position, &(to_view - offset))?;
        Some((corner1, corner2))
    }

    fn cast(&self, position: &Vector3<Float>, direction: &Vector3<Float>) -> Option<Vector2<Float>> {
        if direction.z == 0. {
            return None;
        }
        let t = -(self.plane.w + position.z) / direction.z;
        let point = Vector2::new(
            direction.x * t + position.x,
            direction.y * t + position.y,
        );
        if point.iter().all(|x| x.is_finite()) {
            Some(point)
        } else {
            None
        }
    }

    /// Center and radius of the disc inscribed in the projected corners.
    pub(crate) fn silhouette(
        &self,
        position: &Vector3<Float>,
        radius: Float,
    ) -> Option<(Vector2<Float>, Float)> {
        let (corner1, corner2) = self.project(position, radius)?;
        let center = (corner1 + corner2) / 2.;
        let extent = (corner2 - corner1).abs();
        Some((center, (extent.x + extent.y) / 4.))
    }
}
