//! CPU-side mesh representation produced by the OBJ parser.

/// One polygon corner. Indices are 0-based into the owning [`ObjData`] lists.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Corner {
    pub position: usize,
    pub texcoord: Option<usize>,
    pub normal: Option<usize>,
}

impl Corner {
    pub fn new(position: usize, texcoord: Option<usize>, normal: Option<usize>) -> Self {
        Self {
            position,
            texcoord,
            normal,
        }
    }
}

/// List lengths at the point a face was read. Corners may only address
/// elements declared before the face.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FaceLimits {
    pub positions: usize,
    pub texcoords: usize,
    pub normals: usize,
}

/// Polygon as written in the source file (three or more corners).
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Face {
    pub corners: Vec<Corner>,
    pub limits: FaceLimits,
}

impl Face {
    pub fn new(corners: Vec<Corner>, limits: FaceLimits) -> Self {
        Self { corners, limits }
    }

    /// Fan triangulation from corner 0: `(0, i, i + 1)` for `i` in `1..n-1`.
    /// Only correct for convex planar polygons.
    pub fn triangles(&self) -> impl Iterator<Item = [Corner; 3]> + '_ {
        let first = self.corners.first().copied();
        self.corners
            .windows(2)
            .skip(1)
            .filter_map(move |pair| first.map(|f| [f, pair[0], pair[1]]))
    }

    pub fn triangle_count(&self) -> usize {
        self.corners.len().saturating_sub(2)
    }
}

/// Everything read from a mesh file.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ObjData {
    pub positions: Vec<[f32; 3]>,
    pub texcoords: Vec<[f32; 2]>,
    pub normals: Vec<[f32; 3]>,
    pub faces: Vec<Face>,
    /// File named by `mtllib`, unresolved.
    pub material_library: Option<String>,
    /// First material named by `usemtl`.
    pub material_name: Option<String>,
}

impl ObjData {
    /// `true` when the file produced no faces.
    pub fn is_empty(&self) -> bool {
        self.faces.is_empty()
    }

    /// All faces, fan-triangulated, in file order.
    pub fn triangles(&self) -> impl Iterator<Item = [Corner; 3]> + '_ {
        self.faces.iter().flat_map(Face::triangles)
    }

    /// Corners emitted after triangulation (three per triangle).
    pub fn corner_count(&self) -> usize {
        self.faces.iter().map(Face::triangle_count).sum::<usize>() * 3
    }
}
