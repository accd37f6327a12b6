//! Error taxonomy for the bake pipeline
//!
//! Every variant is fatal to the current bake. The only non-fatal condition,
//! trailing frames beyond the configured depth, is reported as a warning by
//! the orchestrator and never surfaces here.

/// Which declared dimension a [`BakeError::Capacity`] refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CapacityKind {
    /// Vertex count exceeds the texture's texel area (width × height)
    Vertices,
    /// Frame count exceeds the texture's depth
    Frames,
}

impl std::fmt::Display for CapacityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CapacityKind::Vertices => write!(f, "vertices"),
            CapacityKind::Frames => write!(f, "frames"),
        }
    }
}

/// Per-vertex attribute an element count refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Attribute {
    Positions,
    Normals,
    Uvs,
}

impl std::fmt::Display for Attribute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Attribute::Positions => write!(f, "positions"),
            Attribute::Normals => write!(f, "normals"),
            Attribute::Uvs => write!(f, "uvs"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum BakeError {
    /// Malformed or out-of-context CSV row (1-based line number)
    #[error("line {line}: {message}")]
    Format { line: usize, message: String },

    #[error("input contains no frames")]
    NoFrames,

    #[error("frame {frame} has {found} {attribute}, expected {expected}")]
    ShapeMismatch {
        attribute: Attribute,
        frame: usize,
        expected: usize,
        found: usize,
    },

    #[error("texture too small: {required} {kind} needed, capacity is {available}")]
    Capacity {
        kind: CapacityKind,
        required: usize,
        available: usize,
    },

    #[error("vertex count {vertex_count} is not divisible by 3")]
    Topology { vertex_count: usize },

    #[error("invalid configuration: {0}")]
    Config(String),
}

impl BakeError {
    pub(crate) fn format(line: usize, message: impl Into<String>) -> Self {
        BakeError::Format {
            line,
            message: message.into(),
        }
    }
}

pub type BakeResult<T> = Result<T, BakeError>;
