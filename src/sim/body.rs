use crate::sim::initial_parameters::InitialParameters;
use crate::sim::units::{
    Float, Vector, COLLISION_MARGIN, COLLISION_RESPONSE, PI, WALL_MARGIN, WALL_PUSH,
    WALL_RESTITUTION,
};
use rand::Rng;
use rand_distr::{Distribution, Uniform};

#[derive(Clone, Debug)]
pub(crate) struct Body<const D: usize> {
    pub(crate) mass: Float,
    pub(crate) position: Vector<D>,
    pub(crate) velocity: Vector<D>,
    pub(crate) radius: Float,
    pub(crate) bounds: Vector<D>,
}

impl<const D: usize> Body<D> {
    pub(crate) fn new(
        mass: Float,
        position: Vector<D>,
        velocity: Vector<D>,
        bounds: Vector<D>,
    ) -> Body<D> {
        Body {
            mass,
            position,
            velocity,
            radius: Self::radius_for(mass),
            bounds,
        }
    }

    fn radius_for(mass: Float) -> Float {
        (mass / PI).cbrt()
    }

    pub(crate) fn random<R: Rng + ?Sized>(rng: &mut R, params: &InitialParameters<D>) -> Body<D> {
        let mass = match params.fixed_mass {
            Some(mass) => mass,
            None => rng.gen_range(params.mass_range.clone()) as Float,
        };
        let bounds = Vector::<D>::from(params.box_dimensions);
        let position =
            Vector::<D>::from_fn(|axis, _| rng.gen_range(params.spawn_margin..bounds[axis]).floor());
        let speed = Uniform::new_inclusive(-params.max_speed_per_axis, params.max_speed_per_axis);
        let velocity = Vector::<D>::from_fn(|_, _| speed.sample(&mut *rng));
        Body::new(mass, position, velocity, bounds)
    }

    pub(crate) fn distance_to(&self, other: &Self) -> Float {
        (self.position - other.position).norm()
    }

    // Coincident bodies and a massless self feel nothing.
    pub(crate) fn acceleration_towards(&self, other: &Self, g: Float) -> Vector<D> {
        let separation = self.position - other.position;
        let distance = separation.norm();
        if distance == 0. || self.mass == 0. {
            return Vector::<D>::zeros();
        }
        let force = separation * (-g * self.mass * other.mass / distance.powi(3));
        force / self.mass
    }

    pub(crate) fn collides_with(&self, other: &Self) -> bool {
        let distance = self.distance_to(other);
        distance > 0. && distance < self.radius + other.radius + COLLISION_MARGIN
    }

    pub(crate) fn resolve_collision(&self, other: &Self, acceleration: Vector<D>) -> Vector<D> {
        if self.collides_with(other) {
            acceleration * COLLISION_RESPONSE
        } else {
            acceleration
        }
    }

    // Axes are independent, a body in a corner bounces on two of them.
    pub(crate) fn resolve_bounds(&mut self) {
        for axis in 0..D {
            if self.position[axis] < WALL_MARGIN {
                self.velocity[axis] *= -WALL_RESTITUTION;
                self.position[axis] += WALL_PUSH;
            }
            if self.position[axis] > self.bounds[axis] - WALL_MARGIN {
                self.velocity[axis] *= -WALL_RESTITUTION;
                self.position[axis] -= WALL_PUSH;
            }
        }
    }
}
