use thiserror::Error;

pub type Result<T> = ::std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// The input is not a flat triangle list with 3-component positions.
    #[error("Requires a triangle list mesh: {reason}")]
    InvalidGeometryKind { reason: String },

    #[error("Attribute \"{name}\" has {found} vertices, expected {expected}")]
    AttributeLength {
        name: String,
        expected: usize,
        found: usize,
    },

    #[error("No vertex attribute named \"{0}\"")]
    UnknownAttribute(String),

    /// Weights must be finite and non-negative, otherwise the cumulative
    /// distribution would not be monotonic.
    #[error("Attribute \"{name}\" has invalid weight {value} at vertex {vertex}")]
    InvalidWeight {
        name: String,
        vertex: usize,
        value: f32,
    },

    #[error("Cannot sample without a built distribution of positive total weight")]
    EmptyDistribution,

    #[error("Face {face} does not exist, mesh has {faces} faces")]
    FaceOutOfRange { face: usize, faces: usize },

    #[error("Face search found no face for x={x} in distribution with total {total}")]
    SamplerInternalError { x: f64, total: f64 },

    #[error("Invalid scatter configuration: {0}")]
    Config(#[from] toml::de::Error),
}
