//! Flattens parsed OBJ data into an interleaved, non-indexed vertex stream.
//!
//! Every triangle corner becomes its own vertex; shared vertices are repeated.
//! The attribute order is described by a [`VertexLayout`], which is also what
//! the device-side binding reads stride and offsets from.

use rand::{Rng, SeedableRng, rngs::StdRng};

use crate::{
    error::{AssetError, AssetResult, AttributeKind},
    mesh::{Corner, FaceLimits, ObjData},
};

/// Placeholder color when nothing material-driven is requested.
pub const PLACEHOLDER_COLOR: [f32; 3] = [1.0, 1.0, 1.0];

const FLOAT_SIZE: usize = std::mem::size_of::<f32>();

/// Where the per-vertex color comes from.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ColorSource {
    Fixed([f32; 3]),
    /// Independent pseudo-random RGB in `[0, 1)` for every emitted vertex.
    Random,
}

impl Default for ColorSource {
    fn default() -> Self {
        ColorSource::Fixed(PLACEHOLDER_COLOR)
    }
}

/// One attribute group inside a vertex.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Attribute {
    Position,
    Color(ColorSource),
    TexCoord,
    Normal,
}

impl Attribute {
    /// Number of floats this group occupies.
    pub fn components(&self) -> usize {
        match self {
            Attribute::Position | Attribute::Color(_) | Attribute::Normal => 3,
            Attribute::TexCoord => 2,
        }
    }
}

/// Ordered attribute groups of one vertex.
#[derive(Clone, Debug, PartialEq)]
pub struct VertexLayout {
    attributes: Vec<Attribute>,
}

impl VertexLayout {
    pub fn new(attributes: Vec<Attribute>) -> Self {
        Self { attributes }
    }

    /// Position + pseudo-random color (6 floats).
    pub fn colored() -> Self {
        Self::new(vec![Attribute::Position, Attribute::Color(ColorSource::Random)])
    }

    /// Position + placeholder color + uv + normal (11 floats).
    pub fn textured() -> Self {
        Self::new(vec![
            Attribute::Position,
            Attribute::Color(ColorSource::default()),
            Attribute::TexCoord,
            Attribute::Normal,
        ])
    }

    pub fn attributes(&self) -> &[Attribute] {
        &self.attributes
    }

    /// Floats per vertex.
    pub fn stride(&self) -> usize {
        self.attributes.iter().map(Attribute::components).sum()
    }

    pub fn stride_bytes(&self) -> usize {
        self.stride() * FLOAT_SIZE
    }

    /// Float offset of the `slot`-th attribute group.
    pub fn offset_of(&self, slot: usize) -> Option<usize> {
        (slot < self.attributes.len()).then(|| {
            self.attributes[..slot]
                .iter()
                .map(Attribute::components)
                .sum()
        })
    }

    /// Byte offset of the `slot`-th attribute group.
    pub fn byte_offset_of(&self, slot: usize) -> Option<usize> {
        self.offset_of(slot).map(|o| o * FLOAT_SIZE)
    }
}

impl Default for VertexLayout {
    fn default() -> Self {
        Self::textured()
    }
}

/// Interleaved vertex data ready for upload.
#[derive(Clone, Debug, PartialEq)]
pub struct VertexBuffer {
    data: Vec<f32>,
    layout: VertexLayout,
}

impl VertexBuffer {
    pub fn layout(&self) -> &VertexLayout {
        &self.layout
    }

    /// Floats per vertex.
    pub fn stride(&self) -> usize {
        self.layout.stride()
    }

    pub fn vertex_count(&self) -> usize {
        match self.stride() {
            0 => 0,
            stride => self.data.len() / stride,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

    /// Raw bytes for a device upload call.
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.data)
    }

    /// Floats of vertex `i`.
    pub fn vertex(&self, i: usize) -> Option<&[f32]> {
        let stride = self.stride();
        let start = i.checked_mul(stride)?;
        let end = start.checked_add(stride)?;
        self.data.get(start..end)
    }

    pub fn into_vec(self) -> Vec<f32> {
        self.data
    }
}

/// Builds [`VertexBuffer`]s for a fixed layout.
pub struct Assembler {
    layout: VertexLayout,
    rng: StdRng,
}

impl Assembler {
    pub fn new(layout: VertexLayout) -> Self {
        Self {
            layout,
            rng: StdRng::from_os_rng(),
        }
    }

    /// Reproducible random colors.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    pub fn layout(&self) -> &VertexLayout {
        &self.layout
    }

    /// Emits one vertex per triangle corner, in face order.
    ///
    /// Fails on the first index that does not address an element declared
    /// before its face; nothing is returned in that case. Corners without a
    /// texcoord or normal get zeros in those groups.
    pub fn assemble(&mut self, obj: &ObjData) -> AssetResult<VertexBuffer> {
        let mut data = Vec::with_capacity(obj.corner_count() * self.layout.stride());

        for face in &obj.faces {
            for triangle in face.triangles() {
                for corner in &triangle {
                    self.emit(obj, &face.limits, corner, &mut data)?;
                }
            }
        }

        log::debug!(
            "Assembled {} vertices ({} floats each)",
            data.len() / self.layout.stride().max(1),
            self.layout.stride()
        );

        Ok(VertexBuffer {
            data,
            layout: self.layout.clone(),
        })
    }

    fn emit(
        &mut self,
        obj: &ObjData,
        limits: &FaceLimits,
        corner: &Corner,
        out: &mut Vec<f32>,
    ) -> AssetResult<()> {
        let Self { layout, rng } = self;
        for attribute in &layout.attributes {
            match *attribute {
                Attribute::Position => {
                    out.extend_from_slice(&lookup(
                        &obj.positions,
                        limits.positions,
                        corner.position,
                        AttributeKind::Position,
                    )?);
                }
                Attribute::Color(ColorSource::Fixed(rgb)) => out.extend_from_slice(&rgb),
                Attribute::Color(ColorSource::Random) => {
                    let rgb: [f32; 3] = [rng.random(), rng.random(), rng.random()];
                    out.extend_from_slice(&rgb);
                }
                Attribute::TexCoord => {
                    let uv = match corner.texcoord {
                        Some(i) => {
                            lookup(&obj.texcoords, limits.texcoords, i, AttributeKind::TexCoord)?
                        }
                        None => [0.0; 2],
                    };
                    out.extend_from_slice(&uv);
                }
                Attribute::Normal => {
                    let n = match corner.normal {
                        Some(i) => {
                            lookup(&obj.normals, limits.normals, i, AttributeKind::Normal)?
                        }
                        None => [0.0; 3],
                    };
                    out.extend_from_slice(&n);
                }
            }
        }
        Ok(())
    }
}

/// Element `index` of the first `limit` entries of `list`.
fn lookup<const N: usize>(
    list: &[[f32; N]],
    limit: usize,
    index: usize,
    attribute: AttributeKind,
) -> AssetResult<[f32; N]> {
    let visible = &list[..limit.min(list.len())];
    visible
        .get(index)
        .copied()
        .ok_or(AssetError::IndexOutOfBounds {
            attribute,
            index,
            len: visible.len(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::obj::load_obj_from_str;

    const TRIANGLE: &str = "v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 3\n";

    const TEXTURED_QUAD: &str = r#"
        v -1 -1 0
        v 1 -1 0
        v 1 1 0
        v -1 1 0
        vt 0 0
        vt 1 0
        vt 1 1
        vt 0 1
        vn 0 0 1
        f 1/1/1 2/2/1 3/3/1 4/4/1
    "#;

    fn position_only() -> VertexLayout {
        VertexLayout::new(vec![Attribute::Position])
    }

    #[test]
    fn triangle_emits_three_groups() {
        let obj = load_obj_from_str(TRIANGLE).unwrap();
        let buffer = Assembler::new(VertexLayout::textured())
            .assemble(&obj)
            .unwrap();
        assert_eq!(buffer.vertex_count(), 3);
        assert_eq!(buffer.as_slice().len(), 3 * 11);
        assert_eq!(&buffer.vertex(0).unwrap()[..3], &[0.0, 0.0, 0.0]);
        assert_eq!(&buffer.vertex(1).unwrap()[..3], &[1.0, 0.0, 0.0]);
    }

    #[test]
    fn length_is_corners_times_stride() {
        let src = "v 0 0 0\nv 1 0 0\nv 0 1 0\nv 1 1 0\nf 1 2 3\nf 2 4 3\nf 3 1 4\n";
        let obj = load_obj_from_str(src).unwrap();
        for layout in [VertexLayout::colored(), VertexLayout::textured(), position_only()] {
            let stride = layout.stride();
            let buffer = Assembler::new(layout).with_seed(1).assemble(&obj).unwrap();
            assert_eq!(buffer.as_slice().len(), 9 * stride);
        }
    }

    #[test]
    fn index_one_is_first_element() {
        let obj = load_obj_from_str("v 7 8 9\nv 0 0 0\nv 0 0 0\nf 1 2 3\n").unwrap();
        let buffer = Assembler::new(position_only()).assemble(&obj).unwrap();
        assert_eq!(buffer.vertex(0), Some(&[7.0, 8.0, 9.0][..]));
    }

    #[test]
    fn quad_fans_into_two_triangles() {
        let obj = load_obj_from_str(TEXTURED_QUAD).unwrap();
        let buffer = Assembler::new(VertexLayout::textured())
            .assemble(&obj)
            .unwrap();
        assert_eq!(buffer.vertex_count(), 6);

        // Second triangle is corners (0, 2, 3).
        let v3 = buffer.vertex(3).unwrap();
        let v4 = buffer.vertex(4).unwrap();
        assert_eq!(&v3[..3], &[-1.0, -1.0, 0.0]);
        assert_eq!(&v4[..3], &[1.0, 1.0, 0.0]);
        assert_eq!(&v4[6..8], &[1.0, 1.0]);
        assert_eq!(&v4[8..11], &[0.0, 0.0, 1.0]);
        assert_eq!(&v4[3..6], &PLACEHOLDER_COLOR);
    }

    #[test]
    fn attribute_order_follows_layout() {
        let obj = load_obj_from_str(TEXTURED_QUAD).unwrap();
        let layout = VertexLayout::new(vec![
            Attribute::Normal,
            Attribute::TexCoord,
            Attribute::Position,
        ]);
        let buffer = Assembler::new(layout).assemble(&obj).unwrap();
        assert_eq!(
            buffer.vertex(1).unwrap(),
            &[0.0, 0.0, 1.0, 1.0, 0.0, 1.0, -1.0, 0.0][..]
        );
    }

    #[test]
    fn missing_attributes_are_zero_filled() {
        let obj = load_obj_from_str(TRIANGLE).unwrap();
        let buffer = Assembler::new(VertexLayout::textured())
            .assemble(&obj)
            .unwrap();
        let v = buffer.vertex(2).unwrap();
        assert_eq!(&v[6..], &[0.0; 5]);
    }

    #[test]
    fn random_colors_are_seeded_and_in_range() {
        let obj = load_obj_from_str(TRIANGLE).unwrap();
        let a = Assembler::new(VertexLayout::colored())
            .with_seed(42)
            .assemble(&obj)
            .unwrap();
        let b = Assembler::new(VertexLayout::colored())
            .with_seed(42)
            .assemble(&obj)
            .unwrap();
        assert_eq!(a, b);
        for i in 0..a.vertex_count() {
            let color = &a.vertex(i).unwrap()[3..6];
            assert!(color.iter().all(|c| (0.0..1.0).contains(c)));
        }
    }

    #[test]
    fn out_of_range_position_fails() {
        let obj = load_obj_from_str("v 0 0 0\nv 1 0 0\nf 1 2 3\n").unwrap();
        let err = Assembler::new(position_only()).assemble(&obj).unwrap_err();
        assert_eq!(
            err,
            AssetError::IndexOutOfBounds {
                attribute: AttributeKind::Position,
                index: 2,
                len: 2,
            }
        );
    }

    #[test]
    fn face_before_its_vertices_fails() {
        let obj = load_obj_from_str("f 1 2 3\nv 0 0 0\nv 1 0 0\nv 0 1 0\n").unwrap();
        let err = Assembler::new(position_only()).assemble(&obj).unwrap_err();
        assert_eq!(
            err,
            AssetError::IndexOutOfBounds {
                attribute: AttributeKind::Position,
                index: 0,
                len: 0,
            }
        );
    }

    #[test]
    fn texcoord_declared_after_face_fails() {
        let src = "v 0 0 0\nv 1 0 0\nv 0 1 0\nvt 0 0\nf 1/1 2/2 3/1\nvt 1 0\n";
        let obj = load_obj_from_str(src).unwrap();
        let err = Assembler::new(VertexLayout::textured())
            .assemble(&obj)
            .unwrap_err();
        assert_eq!(
            err,
            AssetError::IndexOutOfBounds {
                attribute: AttributeKind::TexCoord,
                index: 1,
                len: 1,
            }
        );
    }

    #[test]
    fn out_of_range_normal_fails() {
        let obj = load_obj_from_str("v 0 0 0\nv 1 0 0\nv 0 1 0\nvn 0 0 1\nf 1//1 2//2 3//1\n")
            .unwrap();
        let err = Assembler::new(VertexLayout::textured())
            .assemble(&obj)
            .unwrap_err();
        assert!(matches!(
            err,
            AssetError::IndexOutOfBounds {
                attribute: AttributeKind::Normal,
                index: 1,
                len: 1
            }
        ));
        assert_eq!(err.to_string(), "normal index out of bounds: 1 (len=1)");
    }

    #[test]
    fn unused_attribute_indices_are_not_checked() {
        let obj = load_obj_from_str("v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1/9 2/9 3/9\n").unwrap();
        assert!(Assembler::new(position_only()).assemble(&obj).is_ok());
    }

    #[test]
    fn layout_strides_and_offsets() {
        let textured = VertexLayout::textured();
        assert_eq!(textured.stride(), 11);
        assert_eq!(textured.stride_bytes(), 44);
        assert_eq!(textured.offset_of(2), Some(6));
        assert_eq!(textured.byte_offset_of(3), Some(32));
        assert_eq!(textured.offset_of(4), None);
        assert_eq!(VertexLayout::colored().stride(), 6);
    }

    #[test]
    fn byte_view_matches_float_count() {
        let obj = load_obj_from_str(TRIANGLE).unwrap();
        let buffer = Assembler::new(VertexLayout::colored())
            .with_seed(3)
            .assemble(&obj)
            .unwrap();
        assert_eq!(buffer.as_bytes().len(), buffer.as_slice().len() * 4);
    }

    #[test]
    fn vertex_past_the_end_is_none() {
        let obj = load_obj_from_str(TRIANGLE).unwrap();
        let buffer = Assembler::new(position_only()).assemble(&obj).unwrap();
        assert!(buffer.vertex(3).is_none());
        assert!(buffer.vertex(usize::MAX).is_none());
        assert!(buffer.vertex(usize::MAX / 3).is_none());
    }

    #[test]
    fn empty_mesh_gives_empty_buffer() {
        let buffer = Assembler::new(VertexLayout::textured())
            .assemble(&ObjData::default())
            .unwrap();
        assert!(buffer.is_empty());
        assert_eq!(buffer.vertex_count(), 0);
    }
}
