//! Control-point files for curve animation: one `x y z` triple per line.

use std::{
    fs::File,
    io::{self, BufRead, BufReader},
    path::Path,
};

use anyhow::{Context, Result};

use crate::tokenizer::Tokens;

/// Load control points from `path`. A missing file yields no points.
pub fn load_control_points(path: impl AsRef<Path>) -> Result<Vec<[f32; 3]>> {
    let path = path.as_ref();
    let file = match File::open(path) {
        Ok(file) => file,
        Err(err) => {
            log::warn!("Failed to open control points {}: {}", path.display(), err);
            return Ok(Vec::new());
        }
    };
    let points = parse_points(BufReader::new(file))
        .with_context(|| format!("Failed to read control points: {}", path.display()))?;
    log::info!("Loaded {} control points from {}", points.len(), path.display());
    Ok(points)
}

pub fn load_control_points_from_str(contents: &str) -> Result<Vec<[f32; 3]>> {
    parse_points(io::Cursor::new(contents))
}

fn parse_points<R: BufRead>(reader: R) -> Result<Vec<[f32; 3]>> {
    let mut points = Vec::new();
    for (line_no, line) in reader.lines().enumerate() {
        let line = line.with_context(|| format!("Failed to read line {}", line_no + 1))?;
        if line.trim().is_empty() {
            continue;
        }
        let mut tokens = Tokens::new(&line);
        points.push(tokens.vec3());
        if tokens.failed() {
            log::warn!("Malformed control point on line {}", line_no + 1);
        }
    }
    Ok(points)
}
