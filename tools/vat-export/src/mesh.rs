//! Base mesh construction
//!
//! The static mesh is the reference frame as a flat triangle soup, plus a
//! secondary UV channel that points each vertex at its texel column and row.

use glam::Vec2;
use vat_common::{MESH_FLAG_UV, VatMeshHeader, VatVertex};

use crate::csv::Frame;
use crate::error::{Attribute, BakeError, BakeResult, CapacityKind};
use crate::texel::texel_coord;

/// Static mesh ready for persistence
#[derive(Debug, Clone, PartialEq)]
pub struct MeshDescriptor {
    pub positions: Vec<glam::Vec3>,
    pub normals: Vec<glam::Vec3>,
    /// Primary UVs; empty if the export carried none
    pub uvs: Vec<Vec2>,
    /// Texel lookup UVs, one per vertex
    pub uv2: Vec<Vec2>,
    /// Identity indices, three per triangle
    pub indices: Vec<u32>,
}

impl MeshDescriptor {
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    pub fn has_uvs(&self) -> bool {
        !self.uvs.is_empty()
    }

    /// Interleave attributes for the mesh file, zero-filling missing UVs
    pub fn vertices(&self) -> Vec<VatVertex> {
        (0..self.vertex_count())
            .map(|i| VatVertex {
                position: self.positions[i].to_array(),
                normal: self.normals[i].to_array(),
                uv: self.uvs.get(i).copied().unwrap_or(Vec2::ZERO).to_array(),
                uv2: self.uv2[i].to_array(),
            })
            .collect()
    }

    pub fn header(&self) -> VatMeshHeader {
        let flags = if self.has_uvs() { MESH_FLAG_UV } else { 0 };
        VatMeshHeader::new(self.vertex_count() as u32, self.indices.len() as u32, flags)
    }
}

/// Secondary UV for a vertex: its texel column/row divided by the grid size
#[inline]
pub fn secondary_uv(vertex: usize, grid_size: u32) -> Vec2 {
    let (x, y) = texel_coord(vertex, grid_size);
    Vec2::new(x as f32, y as f32) / grid_size as f32
}

/// Build the base mesh from the reference frame
pub fn build_base_mesh(reference: &Frame, uv_grid_size: u32) -> BakeResult<MeshDescriptor> {
    let vertex_count = reference.vertex_count();

    let area = uv_grid_size as usize * uv_grid_size as usize;
    if vertex_count > area {
        return Err(BakeError::Capacity {
            kind: CapacityKind::Vertices,
            required: vertex_count,
            available: area,
        });
    }

    if reference.normals.len() != vertex_count {
        return Err(BakeError::ShapeMismatch {
            attribute: Attribute::Normals,
            frame: 0,
            expected: vertex_count,
            found: reference.normals.len(),
        });
    }
    if !reference.uvs.is_empty() && reference.uvs.len() != vertex_count {
        return Err(BakeError::ShapeMismatch {
            attribute: Attribute::Uvs,
            frame: 0,
            expected: vertex_count,
            found: reference.uvs.len(),
        });
    }

    if vertex_count % 3 != 0 {
        return Err(BakeError::Topology { vertex_count });
    }

    let uv2 = (0..vertex_count)
        .map(|i| secondary_uv(i, uv_grid_size))
        .collect();
    let indices = (0..vertex_count as u32).collect();

    Ok(MeshDescriptor {
        positions: reference.positions.clone(),
        normals: reference.normals.clone(),
        uvs: reference.uvs.clone(),
        uv2,
        indices,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    fn frame(vertices: usize) -> Frame {
        Frame {
            positions: (0..vertices).map(|i| Vec3::splat(i as f32)).collect(),
            normals: vec![Vec3::Y; vertices],
            uvs: Vec::new(),
        }
    }

    #[test]
    fn test_single_triangle() {
        let mesh = build_base_mesh(&frame(3), 2).unwrap();
        assert_eq!(mesh.vertex_count(), 3);
        assert_eq!(mesh.triangle_count(), 1);
        assert_eq!(mesh.indices, vec![0, 1, 2]);
        assert_eq!(
            mesh.uv2,
            vec![Vec2::new(0.0, 0.0), Vec2::new(0.5, 0.0), Vec2::new(0.0, 0.5)]
        );
    }

    #[test]
    fn test_secondary_uv_uses_whole_rows() {
        // Vertex 5 in a 4-wide grid: column 1, row 1
        assert_eq!(secondary_uv(5, 4), Vec2::new(0.25, 0.25));
        assert_eq!(secondary_uv(7, 4), Vec2::new(0.75, 0.25));
    }

    #[test]
    fn test_secondary_uv_matches_texel_coord() {
        let grid = 7;
        for i in 0..49 {
            let (x, y) = texel_coord(i, grid);
            let uv = secondary_uv(i, grid);
            assert_eq!((uv.x * grid as f32).round() as u32, x);
            assert_eq!((uv.y * grid as f32).round() as u32, y);
        }
    }

    #[test]
    fn test_vertex_count_equal_to_area_fits() {
        // 3x3 grid holds 9 vertices (three triangles)
        let mesh = build_base_mesh(&frame(9), 3).unwrap();
        assert_eq!(mesh.vertex_count(), 9);
    }

    #[test]
    fn test_vertex_count_beyond_area_rejected() {
        let err = build_base_mesh(&frame(5), 2).unwrap_err();
        assert_eq!(
            err,
            BakeError::Capacity {
                kind: CapacityKind::Vertices,
                required: 5,
                available: 4
            }
        );
    }

    #[test]
    fn test_non_triangle_count_rejected() {
        let err = build_base_mesh(&frame(4), 2).unwrap_err();
        assert_eq!(err, BakeError::Topology { vertex_count: 4 });
    }

    #[test]
    fn test_normal_count_mismatch_rejected() {
        let mut reference = frame(3);
        reference.normals.pop();
        let err = build_base_mesh(&reference, 2).unwrap_err();
        assert!(matches!(
            err,
            BakeError::ShapeMismatch {
                attribute: Attribute::Normals,
                found: 2,
                ..
            }
        ));
    }

    #[test]
    fn test_vertices_zero_fill_missing_uvs() {
        let mesh = build_base_mesh(&frame(3), 2).unwrap();
        assert!(!mesh.has_uvs());
        assert_eq!(mesh.header().flags, 0);

        let vertices = mesh.vertices();
        assert_eq!(vertices.len(), 3);
        assert_eq!(vertices[1].position, [1.0, 1.0, 1.0]);
        assert_eq!(vertices[1].uv, [0.0, 0.0]);
        assert_eq!(vertices[1].uv2, [0.5, 0.0]);
    }

    #[test]
    fn test_primary_uvs_carried() {
        let mut reference = frame(3);
        reference.uvs = vec![Vec2::new(0.1, 0.2); 3];
        let mesh = build_base_mesh(&reference, 2).unwrap();
        assert_eq!(mesh.header().flags, MESH_FLAG_UV);
        assert_eq!(mesh.vertices()[2].uv, [0.1, 0.2]);
    }
}
