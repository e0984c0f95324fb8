//! Weighted random sampling of points on a mesh surface.
//!
//! Building is a one-time O(n) pass over the faces. Afterwards, any number
//! of samples can be drawn in O(log n) each.

use crate::distribution::CumulativeDistribution;
use crate::error::{Error, Result};
use crate::mesh::MeshIndex;
use crate::random::{RandomSource, ThreadRandom};
use crate::tri::{interpolate, sample_bary, Triangle};

use glam::Vec3;
use tracing::{debug, warn};

/// A point on the mesh surface with its local attributes, in the mesh's
/// own coordinate space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceSample {
    pub face: usize,
    pub position: Vec3,
    /// Flat normal of the sampled face.
    pub normal: Option<Vec3>,
    pub color: Option<Vec3>,
}

/// Optional outputs to compute for each sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SampleAttributes {
    pub normal: bool,
    pub color: bool,
}

impl SampleAttributes {
    pub const ALL: SampleAttributes = SampleAttributes {
        normal: true,
        color: true,
    };
    pub const POSITION: SampleAttributes = SampleAttributes {
        normal: false,
        color: false,
    };
}

impl Default for SampleAttributes {
    fn default() -> Self {
        SampleAttributes::ALL
    }
}

/// Draws points on a mesh surface with probability proportional to face
/// area, optionally scaled by a per-vertex weight attribute.
///
/// `build` must run before sampling and again after every change of the
/// bound weight attribute. Sampling borrows immutably, so a built sampler
/// can be shared across threads if `R` is `Sync`. `ThreadRandom` is.
#[derive(Debug)]
pub struct SurfaceSampler<R = ThreadRandom> {
    mesh: MeshIndex,
    distribution: Option<CumulativeDistribution>,
    random: R,
}

impl SurfaceSampler<ThreadRandom> {
    pub fn new(mesh: MeshIndex) -> Self {
        SurfaceSampler {
            mesh,
            distribution: None,
            random: ThreadRandom,
        }
    }
}

impl<R: RandomSource> SurfaceSampler<R> {
    /// Swaps the random source, keeping any built distribution.
    pub fn with_random_generator<S: RandomSource>(self, random: S) -> SurfaceSampler<S> {
        SurfaceSampler {
            mesh: self.mesh,
            distribution: self.distribution,
            random,
        }
    }

    pub fn set_random_generator(&mut self, random: R) -> &mut Self {
        self.random = random;
        self
    }

    /// Binds or unbinds the weight attribute, see `MeshIndex::set_weight_attribute`.
    ///
    /// Discards the current distribution, `build` has to run again before sampling.
    pub fn set_weight_attribute(&mut self, name: Option<&str>) -> Result<&mut Self> {
        self.mesh.set_weight_attribute(name)?;
        self.distribution = None;
        Ok(self)
    }

    pub fn mesh(&self) -> &MeshIndex {
        &self.mesh
    }

    pub fn random_generator(&self) -> &R {
        &self.random
    }

    /// The cumulative face weights, `None` before `build`.
    pub fn distribution(&self) -> Option<&CumulativeDistribution> {
        self.distribution.as_ref()
    }

    pub fn build(&mut self) -> &mut Self {
        let mesh = &self.mesh;
        let weighted = mesh.has_weights();

        let distribution: CumulativeDistribution = (0..mesh.triangle_count())
            .map(|face| {
                let face_weight = if weighted {
                    let (w0, w1, w2) = mesh.triangle_weights(face);
                    f64::from(w0) + f64::from(w1) + f64::from(w2)
                } else {
                    1.0
                };
                face_weight * Triangle::from(mesh.triangle_positions(face)).precise_area()
            })
            .collect();

        if distribution.total() > 0.0 {
            debug!(
                faces = distribution.len(),
                total = distribution.total(),
                weight_attribute = mesh.weight_attribute(),
                "built surface distribution"
            );
        } else {
            warn!(
                faces = distribution.len(),
                weight_attribute = mesh.weight_attribute(),
                "surface distribution has zero total weight, sampling will fail"
            );
        }

        self.distribution = Some(distribution);
        self
    }

    /// Samples a point along with its face normal and, if the mesh has colors,
    /// its interpolated color.
    pub fn sample(&self) -> Result<SurfaceSample> {
        self.sample_with(SampleAttributes::ALL)
    }

    pub fn sample_with(&self, attributes: SampleAttributes) -> Result<SurfaceSample> {
        let total = self.total_weight()?;
        let x = self.random.random() * total;
        let face = self.select_face(x)?;
        self.sample_face(face, attributes)
    }

    /// Index of the face owning `x` in `[0, total)` of the cumulative weights.
    pub fn select_face(&self, x: f64) -> Result<usize> {
        let total = self.total_weight()?;
        match self.distribution.as_ref().and_then(|d| d.search(x)) {
            Some(face) => Ok(face),
            None => Err(Error::SamplerInternalError { x, total }),
        }
    }

    /// Samples a uniformly distributed point on the given face.
    pub fn sample_face(&self, face: usize, attributes: SampleAttributes) -> Result<SurfaceSample> {
        let faces = self.mesh.triangle_count();
        if face >= faces {
            return Err(Error::FaceOutOfRange { face, faces });
        }

        let bary = sample_bary(self.random.random(), self.random.random());

        let triangle = Triangle::from(self.mesh.triangle_positions(face));
        let position = triangle.interpolate(bary);

        let normal = if attributes.normal {
            Some(triangle.normal())
        } else {
            None
        };

        let color = if attributes.color {
            self.mesh
                .triangle_colors(face)
                .map(|(c0, c1, c2)| interpolate(bary, c0, c1, c2))
        } else {
            None
        };

        Ok(SurfaceSample {
            face,
            position,
            normal,
            color,
        })
    }

    fn total_weight(&self) -> Result<f64> {
        match self.distribution {
            Some(ref distribution) if distribution.total() > 0.0 => Ok(distribution.total()),
            _ => Err(Error::EmptyDistribution),
        }
    }
}
