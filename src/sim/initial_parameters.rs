use std::ops::Range;

use super::units::{Float, DEFAULT_G};

pub(crate) struct InitialParameters<const D: usize> {
    pub(crate) body_count: u32,
    pub(crate) box_dimensions: [Float; D],
    pub(crate) gravitational_constant: Float,
    pub(crate) mass_range: Range<u32>,
    // Overrides the random mass, so that projected sizes stay comparable.
    pub(crate) fixed_mass: Option<Float>,
    pub(crate) max_speed_per_axis: Float,
    // Bodies spawn at least this far from the lower walls.
    pub(crate) spawn_margin: Float,
    pub(crate) max_ticks: Option<u64>,
    pub(crate) seed: Option<u64>,
}

impl Default for InitialParameters<2> {
    fn default() -> Self {
        Self {
            body_count: 25,
            box_dimensions: [700., 700.],
            gravitational_constant: DEFAULT_G,
            mass_range: 10..500,
            fixed_mass: None,
            max_speed_per_axis: 0.5,
            spawn_margin: 50.,
            max_ticks: Some(100_000),
            seed: None,
        }
    }
}

impl Default for InitialParameters<3> {
    fn default() -> Self {
        Self {
            body_count: 25,
            box_dimensions: [700., 700., 700.],
            gravitational_constant: DEFAULT_G,
            mass_range: 10..500,
            fixed_mass: Some(250.),
            max_speed_per_axis: 0.5,
            spawn_margin: 50.,
            max_ticks: Some(100_000),
            seed: None,
        }
    }
}
