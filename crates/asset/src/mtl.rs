//! MTL material library parser.

use std::{
    fs::File,
    io::{self, BufRead, BufReader},
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};

use crate::tokenizer::Tokens;

/// Surface appearance declared by one `newmtl` block.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Material {
    pub name: String,
    pub ambient: [f32; 3],
    pub diffuse: [f32; 3],
    pub specular: [f32; 3],
    pub shininess: f32,
    /// `map_Kd` joined with the asset folder.
    pub texture_path: Option<PathBuf>,
}

/// Load `file_name` from `assets_dir`. A library that cannot be opened is
/// logged and yields no materials.
pub fn load_mtl_from_path(
    assets_dir: impl AsRef<Path>,
    file_name: impl AsRef<Path>,
) -> Result<Vec<Material>> {
    let assets_dir = assets_dir.as_ref();
    let path = assets_dir.join(file_name);
    let file = match File::open(&path) {
        Ok(file) => file,
        Err(err) => {
            log::warn!("Failed to open MTL file {}: {}", path.display(), err);
            return Ok(Vec::new());
        }
    };
    let materials = load_mtl_from_reader(BufReader::new(file), assets_dir)
        .with_context(|| format!("Failed to read MTL file: {}", path.display()))?;
    log::info!("Loaded {} material(s) from {}", materials.len(), path.display());
    Ok(materials)
}

/// Parse a material library; texture paths are resolved against `assets_dir`.
pub fn load_mtl_from_reader<R: BufRead>(
    reader: R,
    assets_dir: impl AsRef<Path>,
) -> Result<Vec<Material>> {
    parse_mtl(reader, assets_dir.as_ref())
}

pub fn load_mtl_from_str(contents: &str, assets_dir: impl AsRef<Path>) -> Result<Vec<Material>> {
    parse_mtl(io::Cursor::new(contents), assets_dir.as_ref())
}

/// First material called `name`.
pub fn find_material<'a>(materials: &'a [Material], name: &str) -> Option<&'a Material> {
    materials.iter().find(|m| m.name == name)
}

fn parse_mtl<R: BufRead>(reader: R, assets_dir: &Path) -> Result<Vec<Material>> {
    let mut materials = Vec::new();
    let mut current = Material::default();

    for (line_no, line) in reader.lines().enumerate() {
        let line = line.with_context(|| format!("Failed to read line {}", line_no + 1))?;
        let mut tokens = Tokens::new(&line);
        let Some(tag) = tokens.keyword() else {
            continue;
        };

        match tag {
            "newmtl" => {
                close(&mut materials, std::mem::take(&mut current));
                current.name = tokens.next_token().unwrap_or_default().to_owned();
            }
            "Ka" => current.ambient = tokens.vec3(),
            "Ks" => current.specular = tokens.vec3(),
            // Ke shares the diffuse slot; whichever comes last wins.
            "Kd" | "Ke" => current.diffuse = tokens.vec3(),
            "Ns" => current.shininess = tokens.next_f32(),
            "map_Kd" => {
                let file_name = tokens.rest();
                if !file_name.is_empty() {
                    current.texture_path = Some(assets_dir.join(file_name));
                }
            }
            _ => {}
        }

        if tokens.failed() {
            log::warn!("Malformed '{}' values on MTL line {}", tag, line_no + 1);
        }
    }

    close(&mut materials, current);
    Ok(materials)
}

fn close(materials: &mut Vec<Material>, material: Material) {
    if !material.name.is_empty() {
        materials.push(material);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TWO_MATERIALS: &str = r#"
        # Blender MTL File
        newmtl Earth
        Ns 32.0
        Ka 0.1 0.1 0.1
        Kd 0.8 0.8 0.8
        Ks 0.5 0.5 0.5
        map_Kd   earth.jpg

        newmtl Moon
        Ka 0.2 0.2 0.2
        Ke 0.3 0.3 0.3
    "#;

    #[test]
    fn two_blocks_two_materials() {
        let materials = load_mtl_from_str(TWO_MATERIALS, "./assets").unwrap();
        assert_eq!(materials.len(), 2);

        let earth = &materials[0];
        assert_eq!(earth.name, "Earth");
        assert_eq!(earth.shininess, 32.0);
        assert_eq!(earth.ambient, [0.1, 0.1, 0.1]);
        assert_eq!(earth.diffuse, [0.8, 0.8, 0.8]);
        assert_eq!(earth.specular, [0.5, 0.5, 0.5]);
        assert_eq!(
            earth.texture_path.as_deref(),
            Some(Path::new("./assets/earth.jpg"))
        );

        let moon = &materials[1];
        assert_eq!(moon.name, "Moon");
        assert_eq!(moon.ambient, [0.2, 0.2, 0.2]);
        assert_eq!(moon.diffuse, [0.3, 0.3, 0.3]);
        assert_eq!(moon.specular, [0.0; 3]);
        assert_eq!(moon.shininess, 0.0);
        assert!(moon.texture_path.is_none());
    }

    #[test]
    fn later_diffuse_line_wins() {
        let src = "newmtl A\nKd 1 0 0\nKe 0 1 0\nnewmtl B\nKe 0 0 1\nKd 1 1 0\n";
        let materials = load_mtl_from_str(src, "").unwrap();
        assert_eq!(materials[0].diffuse, [0.0, 1.0, 0.0]);
        assert_eq!(materials[1].diffuse, [1.0, 1.0, 0.0]);
    }

    #[test]
    fn unnamed_blocks_are_dropped() {
        let src = "Kd 1 1 1\nnewmtl\nKa 1 1 1\nnewmtl Named\n";
        let materials = load_mtl_from_str(src, "").unwrap();
        assert_eq!(materials.len(), 1);
        assert_eq!(materials[0].name, "Named");
        assert_eq!(materials[0].ambient, [0.0; 3]);
    }

    #[test]
    fn find_by_name() {
        let materials = load_mtl_from_str(TWO_MATERIALS, "").unwrap();
        assert_eq!(find_material(&materials, "Moon").map(|m| m.name.as_str()), Some("Moon"));
        assert!(find_material(&materials, "Sun").is_none());
    }

    #[test]
    fn missing_library_yields_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let materials = load_mtl_from_path(dir.path(), "missing.mtl").unwrap();
        assert!(materials.is_empty());
    }

    #[test]
    fn texture_is_joined_with_assets_dir() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("moon.mtl"), "newmtl Moon\nmap_Kd moon.png \n").unwrap();
        let materials = load_mtl_from_path(dir.path(), "moon.mtl").unwrap();
        assert_eq!(
            materials[0].texture_path.as_deref(),
            Some(dir.path().join("moon.png").as_path())
        );
    }
}
