//! 3D texel packing
//!
//! Vertex `i` of frame `z` lands at texel `(i % width, i / width, z)`.
//! The base mesh's secondary UVs use the same row-major mapping, so the two
//! must change together.

use glam::{UVec3, Vec3};
use rayon::prelude::*;
use vat_common::{TexelFormat, VatTextureHeader};

use crate::error::{BakeError, BakeResult, CapacityKind};

/// Texel column and row for a vertex index in a grid `width` texels wide
#[inline]
pub fn texel_coord(vertex: usize, width: u32) -> (u32, u32) {
    let width = width as usize;
    ((vertex % width) as u32, (vertex / width) as u32)
}

/// Dense width × height × depth grid of RGB texels
///
/// Texels not addressed by any vertex (or frames beyond the baked count)
/// stay zero.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TexelBuffer {
    pub width: u32,
    pub height: u32,
    pub depth: u32,
    pub format: TexelFormat,
    /// x fastest, then y, then z
    pub data: Vec<u8>,
}

impl TexelBuffer {
    pub fn new(width: u32, height: u32, depth: u32, format: TexelFormat) -> Self {
        let len = width as usize * height as usize * depth as usize * format.bytes_per_texel();
        Self {
            width,
            height,
            depth,
            format,
            data: vec![0; len],
        }
    }

    /// Bytes in one z slice
    pub fn slice_size(&self) -> usize {
        self.width as usize * self.height as usize * self.format.bytes_per_texel()
    }

    fn offset(&self, coord: UVec3) -> usize {
        let texel = (coord.z as usize * self.height as usize + coord.y as usize)
            * self.width as usize
            + coord.x as usize;
        texel * self.format.bytes_per_texel()
    }

    /// Decode the texel at `(x, y, z)` back to normalized floats
    ///
    /// Returns `None` outside the grid.
    pub fn texel(&self, x: u32, y: u32, z: u32) -> Option<Vec3> {
        if x >= self.width || y >= self.height || z >= self.depth {
            return None;
        }
        let start = self.offset(UVec3::new(x, y, z));
        let end = start + self.format.bytes_per_texel();
        Some(self.format.decode(&self.data[start..end]))
    }

    /// Decode the texel written for `vertex` in `frame`
    pub fn vertex_texel(&self, vertex: usize, frame: u32) -> Option<Vec3> {
        let (x, y) = texel_coord(vertex, self.width);
        self.texel(x, y, frame)
    }

    /// File header describing this buffer
    ///
    /// Dimensions are validated against the u16 range by `BakeConfig`.
    pub fn header(&self) -> VatTextureHeader {
        VatTextureHeader::new(
            self.width as u16,
            self.height as u16,
            self.depth as u16,
            self.format,
        )
    }
}

/// Pack normalized per-frame deltas into a texel grid
///
/// Fails if there are more frames than `depth` or more vertices in a frame
/// than `width * height`.
pub fn pack_texels(
    deltas: &[Vec<Vec3>],
    width: u32,
    height: u32,
    depth: u32,
    format: TexelFormat,
) -> BakeResult<TexelBuffer> {
    if width == 0 || height == 0 {
        return Err(BakeError::Config(format!(
            "texel grid {width}x{height} has no texels"
        )));
    }
    if deltas.len() > depth as usize {
        return Err(BakeError::Capacity {
            kind: CapacityKind::Frames,
            required: deltas.len(),
            available: depth as usize,
        });
    }

    let area = width as usize * height as usize;
    if let Some(widest) = deltas.iter().map(Vec::len).max()
        && widest > area
    {
        return Err(BakeError::Capacity {
            kind: CapacityKind::Vertices,
            required: widest,
            available: area,
        });
    }

    let mut buffer = TexelBuffer::new(width, height, depth, format);
    let slice_size = buffer.slice_size();
    let stride = format.bytes_per_texel();

    // One z slice per frame; vertex i occupies texel i of its slice
    buffer
        .data
        .par_chunks_mut(slice_size)
        .zip(deltas.par_iter())
        .for_each(|(slice, frame)| {
            for (texel, value) in slice.chunks_exact_mut(stride).zip(frame) {
                format.encode(*value, texel);
            }
        });

    tracing::debug!(
        "Packed {} frames into {}x{}x{} {:?} texels",
        deltas.len(),
        width,
        height,
        depth,
        format
    );

    Ok(buffer)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_texel_coord_row_major() {
        assert_eq!(texel_coord(0, 4), (0, 0));
        assert_eq!(texel_coord(3, 4), (3, 0));
        assert_eq!(texel_coord(4, 4), (0, 1));
        assert_eq!(texel_coord(13, 4), (1, 3));
    }

    #[test]
    fn test_pack_places_vertices_row_major() {
        let frame0 = vec![Vec3::ZERO; 5];
        let frame1 = vec![
            Vec3::ZERO,
            Vec3::ZERO,
            Vec3::ZERO,
            Vec3::ZERO,
            Vec3::new(1.0, 0.0, 1.0),
        ];
        let buffer = pack_texels(&[frame0, frame1], 2, 3, 4, TexelFormat::Rgb8Unorm).unwrap();

        // Vertex 4 in a 2-wide grid is (0, 2)
        assert_eq!(buffer.texel(0, 2, 1), Some(Vec3::new(1.0, 0.0, 1.0)));
        assert_eq!(buffer.vertex_texel(4, 1), Some(Vec3::new(1.0, 0.0, 1.0)));

        let offset = (2 * 3 + 4) * 3;
        assert_eq!(&buffer.data[offset..offset + 3], &[255, 0, 255]);
    }

    #[test]
    fn test_unaddressed_texels_stay_zero() {
        let frames = vec![vec![Vec3::ONE; 3]];
        let buffer = pack_texels(&frames, 2, 2, 3, TexelFormat::Rgb8Unorm).unwrap();

        assert_eq!(buffer.data.len(), 2 * 2 * 3 * 3);
        // Texel 3 of slice 0, plus slices 1 and 2
        assert!(buffer.data[9..].iter().all(|b| *b == 0));
        assert_eq!(buffer.texel(1, 1, 0), Some(Vec3::ZERO));
    }

    #[test]
    fn test_frames_equal_to_depth_fit() {
        let frames = vec![vec![Vec3::ONE]; 4];
        let buffer = pack_texels(&frames, 1, 1, 4, TexelFormat::Rgb8Unorm).unwrap();
        assert_eq!(buffer.texel(0, 0, 3), Some(Vec3::ONE));
    }

    #[test]
    fn test_frames_beyond_depth_rejected() {
        let frames = vec![vec![Vec3::ONE]; 5];
        let err = pack_texels(&frames, 1, 1, 4, TexelFormat::Rgb8Unorm).unwrap_err();
        assert_eq!(
            err,
            BakeError::Capacity {
                kind: CapacityKind::Frames,
                required: 5,
                available: 4
            }
        );
    }

    #[test]
    fn test_vertices_beyond_area_rejected() {
        let frames = vec![vec![Vec3::ONE; 5]];
        let err = pack_texels(&frames, 2, 2, 1, TexelFormat::Rgb8Unorm).unwrap_err();
        assert!(matches!(
            err,
            BakeError::Capacity {
                kind: CapacityKind::Vertices,
                required: 5,
                available: 4
            }
        ));
    }

    #[test]
    fn test_texel_out_of_range() {
        let buffer = TexelBuffer::new(2, 2, 2, TexelFormat::Rgb16Unorm);
        assert!(buffer.texel(2, 0, 0).is_none());
        assert!(buffer.texel(0, 0, 2).is_none());
        assert_eq!(buffer.slice_size(), 2 * 2 * 6);
    }

    #[test]
    fn test_sixteen_bit_precision() {
        let value = Vec3::new(0.1, 0.2, 0.3);
        let frames = vec![vec![value]];
        let buffer = pack_texels(&frames, 1, 1, 1, TexelFormat::Rgb16Unorm).unwrap();
        let decoded = buffer.texel(0, 0, 0).unwrap();
        assert!((decoded - value).abs().max_element() <= 1.0 / 65535.0 + 1e-7);
    }
}
