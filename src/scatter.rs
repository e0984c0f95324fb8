//! Placement of many objects on a sampled surface.
//!
//! Each placement carries a sampled position and face normal along with a
//! per-object scale. Composing these into instance transforms is left to
//! the renderer.

use crate::error::Result;
use crate::random::RandomSource;
use crate::sampler::{SampleAttributes, SurfaceSampler};

use glam::{Quat, Vec3};
use serde::Deserialize;
use tracing::debug;

/// The local axis of a placed object that is turned onto the surface normal.
pub const UP: Vec3 = Vec3::new(0.0, 0.0, -1.0);

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ScatterConfig {
    /// Number of objects to place.
    pub count: usize,
    /// Name of a vertex attribute whose first component weights the faces.
    /// Faces with zero weight receive no objects. Without one, objects are
    /// distributed by area alone.
    pub weight_attribute: Option<String>,
    pub scale: [f32; 3],
    /// Largest random amount added to `scale`.
    pub scale_jitter: [f32; 3],
    /// Jitter all axes with the same random factor (`true`) or each
    /// axis independently (`false`).
    pub uniform_jitter: bool,
}

impl Default for ScatterConfig {
    fn default() -> Self {
        ScatterConfig {
            count: 128,
            weight_attribute: None,
            scale: [1.0, 1.0, 1.0],
            scale_jitter: [0.0, 0.0, 0.0],
            uniform_jitter: true,
        }
    }
}

impl ScatterConfig {
    pub fn from_toml_str(source: &str) -> Result<Self> {
        Ok(toml::from_str(source)?)
    }

    /// Binds the configured weight attribute, or unbinds it if none is
    /// configured, and rebuilds the distribution.
    pub fn apply_to<'a, R: RandomSource>(
        &self,
        sampler: &'a mut SurfaceSampler<R>,
    ) -> Result<&'a mut SurfaceSampler<R>> {
        let weight_attribute = self
            .weight_attribute
            .as_ref()
            .map(String::as_str)
            .filter(|name| !name.is_empty());

        Ok(sampler.set_weight_attribute(weight_attribute)?.build())
    }

    /// Draws one scale per object.
    pub fn scales<J: RandomSource + ?Sized>(&self, jitter: &J) -> Vec<Vec3> {
        let scale = Vec3::from(self.scale);
        let scale_jitter = Vec3::from(self.scale_jitter);

        (0..self.count)
            .map(|_| {
                let factors = if self.uniform_jitter {
                    Vec3::splat(jitter.random() as f32)
                } else {
                    Vec3::new(
                        jitter.random() as f32,
                        jitter.random() as f32,
                        jitter.random() as f32,
                    )
                };
                scale + factors * scale_jitter
            })
            .collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub position: Vec3,
    pub normal: Vec3,
    pub scale: Vec3,
}

impl Placement {
    /// Shortest rotation taking `UP` onto the surface normal.
    ///
    /// Identity on degenerate faces, which have no normal.
    pub fn rotation(&self) -> Quat {
        if self.normal == Vec3::ZERO {
            Quat::IDENTITY
        } else {
            Quat::from_rotation_arc(UP, self.normal)
        }
    }
}

/// Places `config.count` objects on the surface of a built sampler.
///
/// Scales are drawn from `jitter`, positions and normals from the sampler's
/// own random source.
pub fn scatter<R, J>(
    sampler: &SurfaceSampler<R>,
    config: &ScatterConfig,
    jitter: &J,
) -> Result<Vec<Placement>>
where
    R: RandomSource,
    J: RandomSource + ?Sized,
{
    let attributes = SampleAttributes {
        normal: true,
        color: false,
    };

    let placements = config
        .scales(jitter)
        .into_iter()
        .map(|scale| -> Result<Placement> {
            let sample = sampler.sample_with(attributes)?;
            Ok(Placement {
                position: sample.position,
                normal: sample.normal.unwrap_or(Vec3::ZERO),
                scale,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    debug!(count = placements.len(), "scattered placements");
    Ok(placements)
}
