//! A mesh together with the material library it references.

use std::path::{Path, PathBuf};

use anyhow::Result;

use crate::{
    error::{AssetError, AssetResult},
    mesh::ObjData,
    mtl::{self, Material},
    obj,
};

#[derive(Clone, Debug, Default)]
pub struct Model {
    pub obj: ObjData,
    pub materials: Vec<Material>,
    pub assets_dir: PathBuf,
}

impl Model {
    /// Parse `assets_dir/obj_file` and, if it names one, the material library
    /// next to it.
    pub fn load(assets_dir: impl AsRef<Path>, obj_file: impl AsRef<Path>) -> Result<Self> {
        let assets_dir = assets_dir.as_ref();
        let obj = obj::load_obj_from_path(assets_dir.join(obj_file))?;
        let materials = match obj.material_library.as_deref() {
            Some(library) => mtl::load_mtl_from_path(assets_dir, library)?,
            None => Vec::new(),
        };
        Ok(Self {
            obj,
            materials,
            assets_dir: assets_dir.to_path_buf(),
        })
    }

    /// The material applied to the whole mesh.
    ///
    /// `Ok(None)` when the mesh declares no library. Otherwise the first
    /// `usemtl` name is looked up, falling back to the library's first entry.
    pub fn material(&self) -> AssetResult<Option<&Material>> {
        let Some(library) = self.obj.material_library.as_deref() else {
            return Ok(None);
        };
        let found = match self.obj.material_name.as_deref() {
            Some(name) => mtl::find_material(&self.materials, name).ok_or_else(|| {
                AssetError::MissingMaterial {
                    library: library.to_owned(),
                    name: name.to_owned(),
                }
            })?,
            None => self.materials.first().ok_or_else(|| AssetError::EmptyLibrary {
                library: library.to_owned(),
            })?,
        };
        Ok(Some(found))
    }
}
