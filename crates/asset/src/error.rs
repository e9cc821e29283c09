//! Typed failures of the mesh parser and the flattener.

use std::{fmt, io};

use thiserror::Error;

/// Failure while reading an OBJ source into a [`Mesh`](crate::mesh::Mesh).
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("OBJ source '{source_name}' is unavailable: {source}")]
    SourceUnavailable {
        source_name: String,
        #[source]
        source: io::Error,
    },
    #[error("malformed face on line {line} ('{record}'): {defect}")]
    MalformedFace {
        line: usize,
        record: String,
        defect: FaceDefect,
    },
    #[error("malformed {field} on line {line}: {}", describe_token(.token))]
    MalformedNumber {
        line: usize,
        field: &'static str,
        token: String,
    },
}

fn describe_token(token: &str) -> String {
    if token.is_empty() {
        "value is missing".to_owned()
    } else {
        format!("'{token}' is not a number")
    }
}

/// Structural problem with an `f` record.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FaceDefect {
    /// Only triangles are supported; holds the number of groups found.
    GroupCount(usize),
    /// Group (0-based) is not of the form `pos/uv/normal`.
    GroupShape { group: usize, text: String },
}

impl fmt::Display for FaceDefect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FaceDefect::GroupCount(n) => {
                write!(f, "expected 3 index groups, found {n} (faces must be triangles)")
            }
            FaceDefect::GroupShape { group, text } => {
                write!(f, "group {} '{}' is not of the form pos/uv/normal", group + 1, text)
            }
        }
    }
}

/// Array an index was applied to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AttributeArray {
    Positions,
    Uvs,
    Normals,
    /// The uv index array itself, consulted through a position index.
    UvIndices,
}

impl fmt::Display for AttributeArray {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            AttributeArray::Positions => "positions",
            AttributeArray::Uvs => "uvs",
            AttributeArray::Normals => "normals",
            AttributeArray::UvIndices => "uv indices",
        };
        f.write_str(name)
    }
}

/// Failure while resolving a mesh's index arrays.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum FlattenError {
    #[error("index {index} is out of range for {array} (len={len}, indices are 1-based)")]
    IndexOutOfRange {
        array: AttributeArray,
        index: i64,
        len: usize,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_number_message_mentions_missing() {
        let err = ParseError::MalformedNumber {
            line: 4,
            field: "z coordinate",
            token: String::new(),
        };
        assert_eq!(err.to_string(), "malformed z coordinate on line 4: value is missing");
    }

    #[test]
    fn out_of_range_names_the_array() {
        let err = FlattenError::IndexOutOfRange {
            array: AttributeArray::Positions,
            index: 0,
            len: 3,
        };
        assert!(err.to_string().contains("positions"));
        assert!(err.to_string().contains("index 0"));
    }
}
