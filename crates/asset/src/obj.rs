//! Minimal OBJ parser: positions, normals, texture coordinates and
//! triangular `pos/uv/normal` faces. Other record kinds are skipped.

use std::{
    fs::File,
    io::{self, BufRead, BufReader},
    path::Path,
};

use crate::{
    error::{FaceDefect, ParseError},
    mesh::{FaceVertex, Mesh},
};

/// Load an OBJ mesh from a file path.
pub fn load_obj_from_path(path: impl AsRef<Path>) -> Result<Mesh, ParseError> {
    let path = path.as_ref();
    log::info!("Loading OBJ mesh from {:?}", path);
    let file = File::open(path).map_err(|source| ParseError::SourceUnavailable {
        source_name: path.display().to_string(),
        source,
    })?;
    let mesh = parse_named(BufReader::new(file), &path.display().to_string())?;
    log::info!(
        "Loaded {:?}: {} positions, {} uvs, {} normals, {} triangles",
        path,
        mesh.positions().len(),
        mesh.uvs().len(),
        mesh.normals().len(),
        mesh.face_count()
    );
    Ok(mesh)
}

/// Load an OBJ mesh from a [`BufRead`] implementation.
pub fn load_obj_from_reader<R: BufRead>(reader: R) -> Result<Mesh, ParseError> {
    parse_obj(reader)
}

/// Convenience helper to parse an OBJ string literal.
pub fn load_obj_from_str(contents: &str) -> Result<Mesh, ParseError> {
    parse_obj(io::Cursor::new(contents))
}

/// Scan `reader` line by line into a [`Mesh`]. Index bounds and
/// declaration order are not checked here; that happens when flattening.
pub fn parse_obj<R: BufRead>(reader: R) -> Result<Mesh, ParseError> {
    parse_named(reader, "<reader>")
}

fn parse_named<R: BufRead>(reader: R, source_name: &str) -> Result<Mesh, ParseError> {
    let mut mesh = Mesh::default();
    let mut skipped = 0usize;

    for (line_no, line) in reader.lines().enumerate() {
        let line = line.map_err(|source| ParseError::SourceUnavailable {
            source_name: source_name.to_owned(),
            source,
        })?;
        let line_no = line_no + 1;
        let line = match line.strip_prefix('\u{feff}') {
            Some(rest) if line_no == 1 => rest,
            _ => line.as_str(),
        };

        let mut parts = line.split_whitespace();
        let Some(tag) = parts.next() else {
            continue;
        };

        match tag {
            "v" => {
                let x = parse_f32(parts.next(), line_no, "x coordinate")?;
                let y = parse_f32(parts.next(), line_no, "y coordinate")?;
                let z = parse_f32(parts.next(), line_no, "z coordinate")?;
                mesh.push_position([x, y, z]);
            }
            "vt" => {
                let u = parse_f32(parts.next(), line_no, "u coordinate")?;
                let v = parse_f32(parts.next(), line_no, "v coordinate")?;
                mesh.push_uv([u, v]);
            }
            "vn" => {
                let nx = parse_f32(parts.next(), line_no, "nx coordinate")?;
                let ny = parse_f32(parts.next(), line_no, "ny coordinate")?;
                let nz = parse_f32(parts.next(), line_no, "nz coordinate")?;
                mesh.push_normal([nx, ny, nz]);
            }
            "f" => {
                let face = parse_face(parts, line.trim(), line_no)?;
                mesh.push_face(face);
            }
            _ => {
                // Comments, o/g/s/usemtl/mtllib and anything newer.
                skipped += 1;
            }
        }
    }

    log::debug!(
        "OBJ '{}' parsed: {} faces, {} lines skipped",
        source_name,
        mesh.face_count(),
        skipped
    );
    Ok(mesh)
}

fn parse_f32(value: Option<&str>, line_no: usize, field: &'static str) -> Result<f32, ParseError> {
    let malformed = |token: &str| ParseError::MalformedNumber {
        line: line_no,
        field,
        token: token.to_owned(),
    };
    let token = value.ok_or_else(|| malformed(""))?;
    token
        .parse::<f32>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| malformed(token))
}

/// Parse the payload of an `f` record. The whole face is validated before
/// anything is returned, so a bad face never leaves partial indices.
fn parse_face<'a>(
    parts: impl Iterator<Item = &'a str>,
    record: &str,
    line_no: usize,
) -> Result<[FaceVertex; 3], ParseError> {
    let malformed_face = |defect| ParseError::MalformedFace {
        line: line_no,
        record: record.to_owned(),
        defect,
    };

    let groups: Vec<&str> = parts.collect();
    let &[a, b, c] = groups.as_slice() else {
        return Err(malformed_face(FaceDefect::GroupCount(groups.len())));
    };

    let mut face = [FaceVertex::default(); 3];
    for (group, (slot, text)) in face.iter_mut().zip([a, b, c]).enumerate() {
        let mut split = text.split('/');
        let (Some(pos), Some(uv), Some(normal), None) =
            (split.next(), split.next(), split.next(), split.next())
        else {
            return Err(malformed_face(FaceDefect::GroupShape {
                group,
                text: text.to_owned(),
            }));
        };
        if pos.is_empty() || uv.is_empty() || normal.is_empty() {
            return Err(malformed_face(FaceDefect::GroupShape {
                group,
                text: text.to_owned(),
            }));
        }

        *slot = FaceVertex::new(
            parse_index(pos, line_no, "position index")?,
            parse_index(uv, line_no, "uv index")?,
            parse_index(normal, line_no, "normal index")?,
        );
    }
    Ok(face)
}

fn parse_index(token: &str, line_no: usize, field: &'static str) -> Result<i64, ParseError> {
    token
        .parse::<i64>()
        .map_err(|_| ParseError::MalformedNumber {
            line: line_no,
            field,
            token: token.to_owned(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    const TRIANGLE: &str = r#"
        v -1 -1 0
        v 1 -1 0
        v 0 1 0
        vt 0 0
        vt 1 0
        vt 0 1
        vn 0 0 1
        f 1/1/1 2/2/1 3/3/1
    "#;

    #[test]
    fn parse_simple_triangle() {
        let mesh = load_obj_from_str(TRIANGLE).expect("parse triangle");
        assert_eq!(mesh.positions().len(), 3);
        assert_eq!(mesh.uvs().len(), 3);
        assert_eq!(mesh.normals().len(), 1);
        assert_eq!(mesh.position_indices(), &[1, 2, 3]);
        assert_eq!(mesh.uv_indices(), &[1, 2, 3]);
        assert_eq!(mesh.normal_indices(), &[1, 1, 1]);
        assert_eq!(mesh.positions()[0], [-1.0, -1.0, 0.0]);
    }

    #[test]
    fn unknown_tags_are_ignored() {
        let with_noise = format!(
            "# exported by hand\nmtllib scene.mtl\no Triangle\ns off\n{TRIANGLE}\nusemtl red\nl 1 2\n"
        );
        let plain = load_obj_from_str(TRIANGLE).unwrap();
        let noisy = load_obj_from_str(&with_noise).expect("unknown tags tolerated");
        assert_eq!(plain, noisy);
    }

    #[test]
    fn comment_mentioning_tags_does_not_leak() {
        let src = "# v 9 9 9\n#f 1/1/1 1/1/1 1/1/1\nv 0 0 0\n";
        let mesh = load_obj_from_str(src).unwrap();
        assert_eq!(mesh.positions(), &[[0.0, 0.0, 0.0]]);
        assert_eq!(mesh.face_count(), 0);
    }

    #[test]
    fn face_with_two_groups_is_rejected() {
        let src = "v 0 0 0\nvt 0 0\nvn 0 0 1\nf 1/1/1 1/1/1\n";
        match load_obj_from_str(src) {
            Err(ParseError::MalformedFace { line, defect, .. }) => {
                assert_eq!(line, 4);
                assert_eq!(defect, FaceDefect::GroupCount(2));
            }
            other => panic!("expected MalformedFace, got {other:?}"),
        }
    }

    #[test]
    fn quads_are_rejected() {
        let src = "f 1/1/1 2/2/1 3/3/1 4/4/1\n";
        assert!(matches!(
            load_obj_from_str(src),
            Err(ParseError::MalformedFace {
                defect: FaceDefect::GroupCount(4),
                ..
            })
        ));
    }

    #[test]
    fn face_groups_need_all_three_components() {
        for bad in ["f 1//1 2/2/1 3/3/1", "f 1/1 2/2/1 3/3/1", "f 1 2 3", "f 1/1/1/1 2/2/1 3/3/1"] {
            assert!(
                matches!(
                    load_obj_from_str(bad),
                    Err(ParseError::MalformedFace {
                        defect: FaceDefect::GroupShape { group: 0, .. },
                        ..
                    })
                ),
                "{bad} should be a malformed face"
            );
        }
    }

    #[test]
    fn non_integer_index_is_a_malformed_number() {
        let err = load_obj_from_str("f 1/1/1 2/x/1 3/3/1").unwrap_err();
        match err {
            ParseError::MalformedNumber { line, field, token } => {
                assert_eq!(line, 1);
                assert_eq!(field, "uv index");
                assert_eq!(token, "x");
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn bad_and_missing_floats_are_malformed_numbers() {
        assert!(matches!(
            load_obj_from_str("v 1.0 abc 0.0"),
            Err(ParseError::MalformedNumber { field: "y coordinate", .. })
        ));
        assert!(matches!(
            load_obj_from_str("vt 0.5"),
            Err(ParseError::MalformedNumber { field: "v coordinate", ref token, .. }) if token.is_empty()
        ));
        assert!(matches!(
            load_obj_from_str("vn 0 NaN 1"),
            Err(ParseError::MalformedNumber { field: "ny coordinate", .. })
        ));
    }

    #[test]
    fn out_of_range_indices_parse_fine() {
        // Bounds are the flattener's job.
        let mesh = load_obj_from_str("f 0/0/0 -1/5/5 99/99/99").unwrap();
        assert_eq!(mesh.position_indices(), &[0, -1, 99]);
    }

    #[test]
    fn references_before_declarations_are_accepted() {
        let src = "f 1/1/1 2/2/1 3/3/1\nv 0 0 0\nv 1 0 0\nv 0 1 0\n";
        let mesh = load_obj_from_str(src).unwrap();
        assert_eq!(mesh.face_count(), 1);
        assert_eq!(mesh.positions().len(), 3);
    }

    #[test]
    fn trailing_components_and_missing_final_newline() {
        let mesh = load_obj_from_str("v 1 2 3 1.0\nvt 0.5 0.5 0.0").unwrap();
        assert_eq!(mesh.positions(), &[[1.0, 2.0, 3.0]]);
        assert_eq!(mesh.uvs(), &[[0.5, 0.5]]);
    }

    #[test]
    fn leading_byte_order_mark_is_stripped() {
        let mesh = load_obj_from_str("\u{feff}v 1 2 3\nv 4 5 6\n").unwrap();
        assert_eq!(mesh.positions(), &[[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]]);
    }

    #[test]
    fn invalid_utf8_is_unreadable_source() {
        let bytes: &[u8] = b"v 0 0 0\n\xff\xfe\n";
        assert!(matches!(
            parse_obj(bytes),
            Err(ParseError::SourceUnavailable { .. })
        ));
    }
}
