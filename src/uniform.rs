use crate::random::RandomSource;
use glam::Vec3;

/// Samples any point on the surface of the implementer.
/// All possible points have approximately equal probability.
pub trait Uniform {
    fn uniform<R: RandomSource + ?Sized>(&self, random: &R) -> Vec3;
}
