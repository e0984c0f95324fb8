use crate::error::{Error, Result};
use glam::Vec3;
use tracing::{debug, warn};

/// A flat buffer of per-vertex values, `item_size` components per vertex.
#[derive(Debug, Clone, PartialEq)]
pub struct VertexAttribute {
    values: Vec<f32>,
    item_size: usize,
}

impl VertexAttribute {
    pub fn new(values: Vec<f32>, item_size: usize) -> Self {
        VertexAttribute { values, item_size }
    }

    pub fn from_vec3(vectors: &[Vec3]) -> Self {
        let values = vectors.iter().flat_map(|v| v.to_array()).collect();
        VertexAttribute::new(values, 3)
    }

    /// One component per vertex.
    pub fn scalar(values: Vec<f32>) -> Self {
        VertexAttribute::new(values, 1)
    }

    pub fn item_size(&self) -> usize {
        self.item_size
    }

    /// Number of vertices, rounded down if the buffer has a partial last item.
    pub fn count(&self) -> usize {
        if self.item_size == 0 {
            0
        } else {
            self.values.len() / self.item_size
        }
    }

    pub fn get_x(&self, vertex: usize) -> f32 {
        self.values[vertex * self.item_size]
    }

    /// The first three components of the given vertex.
    pub fn get_vec3(&self, vertex: usize) -> Vec3 {
        let start = vertex * self.item_size;
        Vec3::from_slice(&self.values[start..start + 3])
    }

    fn is_well_formed(&self) -> bool {
        self.item_size > 0 && self.values.len() % self.item_size == 0
    }
}

/// A triangle list as handed over by the host: every three consecutive
/// vertices form one triangle, nothing is shared through an index buffer.
#[derive(Debug, Clone, PartialEq)]
pub struct TriangleMesh {
    pub positions: VertexAttribute,
    pub colors: Option<VertexAttribute>,
    /// Additional named attributes that may be bound as weights.
    pub attributes: Vec<(String, VertexAttribute)>,
}

impl TriangleMesh {
    pub fn new(positions: VertexAttribute) -> Self {
        TriangleMesh {
            positions,
            colors: None,
            attributes: Vec::new(),
        }
    }

    pub fn with_colors(mut self, colors: VertexAttribute) -> Self {
        self.colors = Some(colors);
        self
    }

    pub fn with_attribute<S: Into<String>>(mut self, name: S, attribute: VertexAttribute) -> Self {
        self.attributes.push((name.into(), attribute));
        self
    }
}

/// Validated, triangle-contiguous view of a mesh.
///
/// Positions and colors are resolved once at construction. A weight
/// attribute is resolved when it is bound with `set_weight_attribute`.
#[derive(Debug, Clone)]
pub struct MeshIndex {
    positions: Vec<Vec3>,
    colors: Option<Vec<Vec3>>,
    attributes: Vec<(String, VertexAttribute)>,
    weights: Option<BoundWeights>,
}

#[derive(Debug, Clone)]
struct BoundWeights {
    name: String,
    values: Vec<f32>,
}

impl MeshIndex {
    pub fn new(mesh: TriangleMesh) -> Result<Self> {
        let TriangleMesh {
            positions,
            colors,
            attributes,
        } = mesh;

        if positions.item_size() != 3 {
            return Err(invalid_geometry(format!(
                "positions must have 3 components per vertex, got {}",
                positions.item_size()
            )));
        }
        if !positions.is_well_formed() {
            return Err(invalid_geometry(format!(
                "position buffer of length {} is not made of whole vertices",
                positions.values.len()
            )));
        }

        let vertex_count = positions.count();
        if vertex_count % 3 != 0 {
            return Err(invalid_geometry(format!(
                "vertex count {} is not a multiple of 3",
                vertex_count
            )));
        }

        let colors = match colors {
            Some(colors) => {
                if colors.item_size() < 3 || !colors.is_well_formed() {
                    return Err(invalid_geometry(format!(
                        "colors must have at least 3 components per vertex, got {}",
                        colors.item_size()
                    )));
                }
                check_count("color", &colors, vertex_count)?;
                Some((0..vertex_count).map(|v| colors.get_vec3(v)).collect())
            }
            None => None,
        };

        for (name, attribute) in &attributes {
            if !attribute.is_well_formed() {
                return Err(invalid_geometry(format!(
                    "attribute \"{}\" buffer is not made of whole vertices",
                    name
                )));
            }
            check_count(name, attribute, vertex_count)?;
        }

        let positions: Vec<Vec3> = (0..vertex_count).map(|v| positions.get_vec3(v)).collect();
        if let Some(vertex) = positions.iter().position(|p| !p.is_finite()) {
            return Err(invalid_geometry(format!(
                "position of vertex {} is not finite",
                vertex
            )));
        }

        Ok(MeshIndex {
            positions,
            colors,
            attributes,
            weights: None,
        })
    }

    /// Builds an index without colors or extra attributes.
    pub fn from_triangles(triangles: &[[Vec3; 3]]) -> Self {
        MeshIndex {
            positions: triangles.iter().flat_map(|t| t.iter().cloned()).collect(),
            colors: None,
            attributes: Vec::new(),
            weights: None,
        }
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.positions.len() / 3
    }

    pub fn has_colors(&self) -> bool {
        self.colors.is_some()
    }

    pub fn triangle_positions(&self, triangle: usize) -> (Vec3, Vec3, Vec3) {
        corners(&self.positions, triangle)
    }

    pub fn triangle_colors(&self, triangle: usize) -> Option<(Vec3, Vec3, Vec3)> {
        self.colors.as_ref().map(|colors| corners(colors, triangle))
    }

    /// Per-vertex weights, `(1, 1, 1)` while no weight attribute is bound.
    pub fn triangle_weights(&self, triangle: usize) -> (f32, f32, f32) {
        match self.weights {
            Some(ref weights) => {
                let i = triangle * 3;
                (weights.values[i], weights.values[i + 1], weights.values[i + 2])
            }
            None => (1.0, 1.0, 1.0),
        }
    }

    pub fn weight_attribute(&self) -> Option<&str> {
        self.weights.as_ref().map(|w| w.name.as_str())
    }

    /// Binds the named attribute as per-vertex weight, or unbinds with `None`.
    ///
    /// Only the first component of each vertex is used. A distribution built
    /// before this call does not reflect the new weights.
    pub fn set_weight_attribute(&mut self, name: Option<&str>) -> Result<&mut Self> {
        let name = match name {
            Some(name) => name,
            None => {
                self.weights = None;
                return Ok(self);
            }
        };

        let attribute = match self.attributes.iter().find(|(n, _)| n == name) {
            Some((_, attribute)) => attribute,
            None => {
                warn!(attribute = name, "weight attribute not found on mesh");
                return Err(Error::UnknownAttribute(name.to_string()));
            }
        };

        let values: Vec<f32> = (0..self.vertex_count())
            .map(|v| attribute.get_x(v))
            .collect();

        if let Some((vertex, &value)) = values
            .iter()
            .enumerate()
            .find(|(_, w)| !w.is_finite() || **w < 0.0)
        {
            warn!(attribute = name, vertex, value, "rejecting weight attribute");
            return Err(Error::InvalidWeight {
                name: name.to_string(),
                vertex,
                value,
            });
        }

        debug!(attribute = name, vertices = values.len(), "bound weight attribute");
        self.weights = Some(BoundWeights {
            name: name.to_string(),
            values,
        });
        Ok(self)
    }

    pub(crate) fn has_weights(&self) -> bool {
        self.weights.is_some()
    }
}

fn corners(values: &[Vec3], triangle: usize) -> (Vec3, Vec3, Vec3) {
    let i = triangle * 3;
    (values[i], values[i + 1], values[i + 2])
}

fn check_count(name: &str, attribute: &VertexAttribute, expected: usize) -> Result<()> {
    if attribute.count() == expected {
        Ok(())
    } else {
        Err(Error::AttributeLength {
            name: name.to_string(),
            expected,
            found: attribute.count(),
        })
    }
}

fn invalid_geometry(reason: String) -> Error {
    Error::InvalidGeometryKind { reason }
}
