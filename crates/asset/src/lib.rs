//! Asset loading/parsers (meshes, textures).
//! OBJ subset loader producing a face-indexed `Mesh`, plus the flattener
//! that turns it into a non-indexed `FlatVertex` stream for the GPU.

pub mod error;
pub mod flatten;
pub mod mesh;
pub mod obj;
pub mod texture;

pub use error::{AttributeArray, FaceDefect, FlattenError, ParseError};
pub use flatten::{Bounds, UvLookup, flatten, flatten_with, vertex_floats};
pub use mesh::{FaceVertex, FlatVertex, Mesh};
pub use obj::{load_obj_from_path, load_obj_from_reader, load_obj_from_str, parse_obj};
