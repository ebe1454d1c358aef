use crate::plate::circle::{Circle, PALETTE};
use crate::sim::units::{Float, PI};
use nalgebra::Vector2;
use rand::Rng;

// Only the first four palette entries are used for the background dots.
const BACKGROUND_COLORS: usize = 4;
const RADIUS_STEP: Float = 1.;

pub(crate) struct PackingParameters {
    pub(crate) count: usize,
    pub(crate) start_radius: Float,
    pub(crate) min_radius: Float,
    // Consecutive rejected candidates before the radius shrinks.
    pub(crate) max_fails: u32,
    pub(crate) center: Vector2<Float>,
    pub(crate) bounding_radius: Float,
    pub(crate) seed: Option<u64>,
}

impl Default for PackingParameters {
    fn default() -> Self {
        Self {
            count: 3000,
            start_radius: 7.,
            min_radius: 1.,
            max_fails: 500,
            center: Vector2::new(450., 450.),
            bounding_radius: 400.,
            seed: None,
        }
    }
}

#[derive(Clone, Debug)]
pub(crate) struct Packing {
    pub(crate) circles: Vec<Circle>,
    pub(crate) final_radius: Float,
    // Set when the radius shrank to the floor before `count` circles fit.
    pub(crate) exhausted: bool,
}

/// Uniform over the disc area.
pub(crate) fn random_point_in_circle<R: Rng + ?Sized>(
    rng: &mut R,
    center: &Vector2<Float>,
    radius: Float,
) -> Vector2<Float> {
    let r = radius * rng.gen::<Float>().sqrt();
    let theta = 2. * PI * rng.gen::<Float>();
    center + Vector2::new(r * theta.cos(), r * theta.sin())
}

pub(crate) fn pack<R: Rng + ?Sized>(params: &PackingParameters, rng: &mut R) -> Packing {
    let mut circles: Vec<Circle> = Vec::with_capacity(params.count);
    let mut radius = params.start_radius;
    let mut fails = 0;
    let mut exhausted = false;

    while circles.len() < params.count {
        let position = random_point_in_circle(rng, &params.center, params.bounding_radius);
        let color = PALETTE[rng.gen_range(0..BACKGROUND_COLORS)];
        let candidate = Circle::new(position, radius, color);

        if candidate.overlaps_any(&circles) {
            fails += 1;
        } else {
            circles.push(candidate);
            fails = 0;
        }

        if fails >= params.max_fails {
            radius -= RADIUS_STEP;
            fails = 0;
            log::debug!("Radius reduced to {} after {} circles", radius, circles.len());
        }
        if radius <= params.min_radius {
            log::warn!(
                "Radius got too small, stopping with {} of {} circles",
                circles.len(),
                params.count
            );
            exhausted = true;
            break;
        }
    }

    log::info!("Packed {} circles", circles.len());
    Packing {
        circles,
        final_radius: radius,
        exhausted,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    fn small_plate() -> PackingParameters {
        PackingParameters {
            count: 100,
            start_radius: 5.,
            min_radius: 1.,
            max_fails: 50,
            center: Vector2::new(100., 100.),
            bounding_radius: 90.,
            seed: None,
        }
    }

    #[test]
    fn random_points_stay_inside_the_circle() {
        let mut rng = StdRng::seed_from_u64(1);
        let center = Vector2::new(10., -20.);
        for _ in 0..1_000 {
            let point = random_point_in_circle(&mut rng, &center, 3.);
            assert!((point - center).norm() <= 3. + 1e-12);
        }
    }

    #[test]
    fn packed_circles_do_not_overlap() {
        let mut rng = StdRng::seed_from_u64(2);
        let params = small_plate();
        let packing = pack(&params, &mut rng);

        assert_eq!(packing.circles.len(), params.count);
        assert!(!packing.exhausted);
        for (i, circle) in packing.circles.iter().enumerate() {
            assert!(!circle.overlaps_any(&packing.circles[i + 1..]));
            assert!((circle.position - params.center).norm() <= params.bounding_radius + 1e-9);
            assert!(PALETTE[..BACKGROUND_COLORS].contains(&circle.color));
        }
    }

    #[test]
    fn crowded_plate_shrinks_then_gives_up() {
        let mut rng = StdRng::seed_from_u64(3);
        let params = PackingParameters {
            count: 10_000,
            bounding_radius: 20.,
            max_fails: 20,
            ..small_plate()
        };
        let packing = pack(&params, &mut rng);

        assert!(packing.exhausted);
        assert!(packing.circles.len() < params.count);
        assert!(!packing.circles.is_empty());
        assert!(packing.final_radius <= params.min_radius);
        assert_eq!(packing.circles[0].radius, params.start_radius);
    }

    #[test]
    fn first_circle_is_always_placed() {
        let mut rng = StdRng::seed_from_u64(4);
        let params = PackingParameters {
            count: 1,
            start_radius: 500.,
            ..small_plate()
        };
        let packing = pack(&params, &mut rng);
        assert_eq!(packing.circles.len(), 1);
        assert_eq!(packing.circles[0].radius, 500.);
    }
}
