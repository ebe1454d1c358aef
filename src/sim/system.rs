use crate::sim::{
    body::Body,
    initial_parameters::InitialParameters,
    units::{Float, Vector},
};
use rand::{rngs::StdRng, Rng, SeedableRng};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum RunState {
    Running,
    Finished,
}

#[derive(Clone, Debug)]
pub(crate) struct System<const D: usize> {
    pub(crate) tick: u64,
    pub(crate) max_ticks: Option<u64>,
    pub(crate) gravitational_constant: Float,
    pub(crate) bodies: Vec<Body<D>>,
}

impl<const D: usize> System<D> {
    pub(crate) fn new(params: &InitialParameters<D>) -> System<D> {
        let mut rng = match params.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self::with_rng(params, &mut rng)
    }

    pub(crate) fn with_rng<R: Rng + ?Sized>(params: &InitialParameters<D>, rng: &mut R) -> System<D> {
        let mut bodies = Vec::with_capacity(params.body_count as usize);
        for _ in 0..params.body_count {
            let body = Body::random(rng, params);
            log::debug!(
                "Body created: mass {}, position {:?}, velocity {:?}",
                body.mass,
                body.position.as_slice(),
                body.velocity.as_slice()
            );
            bodies.push(body);
        }
        log::info!(
            "Starting {}D system with {} bodies, G = {}",
            D,
            bodies.len(),
            params.gravitational_constant
        );
        Self::with_bodies(bodies, params.gravitational_constant, params.max_ticks)
    }

    pub(crate) fn with_bodies(
        bodies: Vec<Body<D>>,
        gravitational_constant: Float,
        max_ticks: Option<u64>,
    ) -> System<D> {
        System {
            tick: 0,
            max_ticks,
            gravitational_constant,
            bodies,
        }
    }

    pub(crate) fn state(&self) -> RunState {
        match self.max_ticks {
            Some(max) if self.tick >= max => RunState::Finished,
            _ => RunState::Running,
        }
    }

    pub(crate) fn pairwise_acceleration(&self, accelerated: usize, accelerating: usize) -> Vector<D> {
        if accelerated == accelerating {
            return Vector::<D>::zeros();
        }
        self.bodies[accelerated]
            .acceleration_towards(&self.bodies[accelerating], self.gravitational_constant)
    }

    pub(crate) fn velocity_change(&self, owner: usize) -> Vector<D> {
        let body = &self.bodies[owner];
        let mut change = Vector::<D>::zeros();
        for other in 0..self.bodies.len() {
            let acceleration = self.pairwise_acceleration(owner, other);
            change += body.resolve_collision(&self.bodies[other], acceleration);
        }
        change
    }

    /// Advances every body by one unit of time. Velocity changes all come
    /// from the positions at the start of the tick.
    pub(crate) fn tick(&mut self) -> RunState {
        if self.state() == RunState::Finished {
            return RunState::Finished;
        }

        let changes = (0..self.bodies.len())
            .map(|owner| self.velocity_change(owner))
            .collect::<Vec<Vector<D>>>();

        for (body, change) in self.bodies.iter_mut().zip(changes) {
            body.resolve_bounds();
            body.velocity += change;
            body.position += body.velocity;
        }
        self.tick += 1;

        let state = self.state();
        if state == RunState::Finished {
            log::info!("Simulation finished after {} ticks", self.tick);
        }
        state
    }

    pub(crate) fn evolve_for(&mut self, ticks: u64) -> RunState {
        for _ in 0..ticks {
            if self.tick() == RunState::Finished {
                return RunState::Finished;
            }
        }
        self.state()
    }
}
