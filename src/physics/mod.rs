pub mod fill;
pub mod particle;

pub use fill::smooth_fill;
pub use particle::{spawn_batch, step, step_batch, Confinement, Particle, ParticleTint};
