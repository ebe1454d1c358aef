use nalgebra::SVector;

pub(crate) type Float = f64;
pub(crate) type Vector<const D: usize> = SVector<Float, D>;

pub(crate) const PI: Float = std::f64::consts::PI;

//Simulation units: one tick is one unit of time, one pixel is one unit of length.
pub(crate) const DEFAULT_G: Float = 0.01;

//Distance added to the sum of radii below which two bodies repel.
pub(crate) const COLLISION_MARGIN: Float = 5.;
//Factor applied to the acceleration of a colliding pair.
pub(crate) const COLLISION_RESPONSE: Float = -0.5;

//Distance from each wall at which a body bounces back.
pub(crate) const WALL_MARGIN: Float = 5.;
pub(crate) const WALL_RESTITUTION: Float = 0.9;
//How far a bouncing body is pushed back inside the box.
pub(crate) const WALL_PUSH: Float = 1.;
