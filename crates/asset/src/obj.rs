//! OBJ mesh parser: positions, texture coordinates, normals, polygon faces and
//! the `mtllib`/`usemtl` references.
//!
//! The parser converts indices from 1-based (or negative, relative) to 0-based
//! and records on each face how many elements were declared before it. The
//! assembler range-checks against those counts, so forward references fail.

use std::{
    fs::File,
    io::{self, BufRead, BufReader},
    path::Path,
};

use anyhow::{Context, Result};

use crate::{
    mesh::{Corner, Face, FaceLimits, ObjData},
    tokenizer::{Tokens, split_fields},
};

/// Load an OBJ mesh from a file path. A missing file yields an empty mesh.
pub fn load_obj_from_path(path: impl AsRef<Path>) -> Result<ObjData> {
    let path = path.as_ref();
    let file = match File::open(path) {
        Ok(file) => file,
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            log::warn!("OBJ file not found: {}", path.display());
            return Ok(ObjData::default());
        }
        Err(err) => {
            return Err(err)
                .with_context(|| format!("Failed to open OBJ file: {}", path.display()));
        }
    };
    let data = load_obj_from_reader(BufReader::new(file))?;
    log::info!(
        "Loaded {}: {} positions, {} texcoords, {} normals, {} faces",
        path.display(),
        data.positions.len(),
        data.texcoords.len(),
        data.normals.len(),
        data.faces.len()
    );
    Ok(data)
}

/// Load an OBJ mesh from a [`BufRead`] implementation.
pub fn load_obj_from_reader<R: BufRead>(reader: R) -> Result<ObjData> {
    parse_obj(reader)
}

/// Convenience helper to parse an OBJ string literal.
pub fn load_obj_from_str(contents: &str) -> Result<ObjData> {
    parse_obj(io::Cursor::new(contents))
}

fn parse_obj<R: BufRead>(reader: R) -> Result<ObjData> {
    let mut data = ObjData::default();

    for (line_no, line) in reader.lines().enumerate() {
        let line = line.with_context(|| format!("Failed to read line {}", line_no + 1))?;
        let mut tokens = Tokens::new(&line);
        let Some(tag) = tokens.keyword() else {
            continue;
        };

        match tag {
            "v" => {
                data.positions.push(tokens.vec3());
                warn_if_malformed(&tokens, line_no, "position");
            }
            "vt" => {
                data.texcoords.push(tokens.vec2());
                warn_if_malformed(&tokens, line_no, "texture coordinate");
            }
            "vn" => {
                data.normals.push(tokens.vec3());
                warn_if_malformed(&tokens, line_no, "normal");
            }
            "f" => {
                let corners: Vec<Corner> = tokens
                    .remaining()
                    .filter_map(|part| parse_corner(part, &data, line_no))
                    .collect();
                if corners.len() < 3 {
                    log::warn!(
                        "Dropping face with {} usable corners on line {}",
                        corners.len(),
                        line_no + 1
                    );
                    continue;
                }
                let limits = FaceLimits {
                    positions: data.positions.len(),
                    texcoords: data.texcoords.len(),
                    normals: data.normals.len(),
                };
                data.faces.push(Face::new(corners, limits));
            }
            "mtllib" => {
                let name = tokens.rest();
                if !name.is_empty() {
                    data.material_library = Some(name.to_owned());
                }
            }
            "usemtl" => {
                let name = tokens.rest();
                if !name.is_empty() && data.material_name.is_none() {
                    data.material_name = Some(name.to_owned());
                }
            }
            _ => {
                // Comments, groups, smoothing groups and the like.
            }
        }
    }

    Ok(data)
}

fn warn_if_malformed(tokens: &Tokens<'_>, line_no: usize, what: &str) {
    if tokens.failed() {
        log::warn!(
            "Malformed {} on line {}; remaining fields set to zero",
            what,
            line_no + 1
        );
    }
}

fn parse_corner(token: &str, data: &ObjData, line_no: usize) -> Option<Corner> {
    let mut split = split_fields(token, '/');

    let Some(position) = split
        .next()
        .and_then(|raw| resolve_index(raw, data.positions.len()))
    else {
        log::warn!(
            "Skipping face corner '{}' with invalid position index on line {}",
            token,
            line_no + 1
        );
        return None;
    };

    let texcoord = optional_index(split.next(), data.texcoords.len(), token, line_no);
    let normal = optional_index(split.next(), data.normals.len(), token, line_no);

    Some(Corner::new(position, texcoord, normal))
}

fn optional_index(field: Option<&str>, len: usize, token: &str, line_no: usize) -> Option<usize> {
    match field {
        Some(raw) if !raw.is_empty() => {
            let idx = resolve_index(raw, len);
            if idx.is_none() {
                log::warn!(
                    "Ignoring invalid index '{}' in corner '{}' on line {}",
                    raw,
                    token,
                    line_no + 1
                );
            }
            idx
        }
        _ => None,
    }
}

/// 1-based index to 0-based; negative values count back from `len`.
/// Positive indices are bounded later against the face's limits.
fn resolve_index(token: &str, len: usize) -> Option<usize> {
    let raw = token.parse::<i64>().ok()?;
    match raw {
        0 => None,
        r if r > 0 => usize::try_from(r - 1).ok(),
        r => {
            let back = usize::try_from(r.unsigned_abs()).ok()?;
            len.checked_sub(back)
        }
    }
}
