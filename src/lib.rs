//! Weighted random sampling of points on triangle mesh surfaces:
//! * [`MeshIndex`](struct.MeshIndex.html) validates a flat triangle list with optional colors and weight attributes,
//! * [`SurfaceSampler`](struct.SurfaceSampler.html) draws points with probability proportional to face area, optionally scaled by a per-vertex weight,
//! * [`scatter`](fn.scatter.html) turns samples into object placements for a host renderer.

#[cfg(test)]
#[macro_use]
extern crate approx;

mod distribution;
mod error;
mod mesh;
mod random;
mod sampler;
mod scatter;
mod tri;
mod uniform;

pub use self::distribution::CumulativeDistribution;
pub use self::error::{Error, Result};
pub use self::mesh::{MeshIndex, TriangleMesh, VertexAttribute};
pub use self::random::{RandomSource, RngSource, Sequence, ThreadRandom};
pub use self::sampler::{SampleAttributes, SurfaceSample, SurfaceSampler};
pub use self::scatter::{scatter, Placement, ScatterConfig, UP};
pub use self::tri::{sample_bary, Triangle};
pub use self::uniform::Uniform;
