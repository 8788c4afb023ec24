//! Typed errors raised while turning parsed assets into renderable data.

use std::fmt;

use thiserror::Error;

/// Vertex attribute list an index points into.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AttributeKind {
    Position,
    TexCoord,
    Normal,
}

impl fmt::Display for AttributeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            AttributeKind::Position => "position",
            AttributeKind::TexCoord => "texture coordinate",
            AttributeKind::Normal => "normal",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum AssetError {
    #[error("{attribute} index out of bounds: {index} (len={len})")]
    IndexOutOfBounds {
        attribute: AttributeKind,
        index: usize,
        len: usize,
    },
    #[error("material '{name}' not found in library '{library}'")]
    MissingMaterial { library: String, name: String },
    #[error("material library '{library}' has no materials")]
    EmptyLibrary { library: String },
}

pub type AssetResult<T> = Result<T, AssetError>;
