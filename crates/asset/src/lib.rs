//! Asset loading for the demos: OBJ meshes, MTL material libraries, curve
//! control points, and the interleaved vertex stream built from a mesh.

pub mod assemble;
pub mod control_points;
pub mod error;
pub mod mesh;
pub mod model;
pub mod mtl;
pub mod obj;
pub mod tokenizer;

pub use assemble::{Assembler, Attribute, ColorSource, VertexBuffer, VertexLayout};
pub use error::{AssetError, AssetResult, AttributeKind};
pub use mesh::{Corner, Face, FaceLimits, ObjData};
pub use model::Model;
pub use mtl::Material;
