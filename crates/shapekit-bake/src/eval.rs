//! Modifier geometry evaluation.
//!
//! Every modifier rewrites the mesh's position and triangle buffers in
//! place. Evaluation is deterministic: the same mesh and parameters always
//! produce the same buffers, which the reassembly step depends on when it
//! joins duplicates with matching topology.

use std::collections::HashMap;

use shapekit_scene::{Axis, DisplaceDirection, Mesh, ModifierKind};

use crate::error::{BakeError, BakeResult};

/// Applies a modifier's geometry to `mesh`.
///
/// Refuses meshes that carry shape keys (committing keys first is the bake
/// pipeline's job) and meshes whose triangles index outside the position
/// buffer, so malformed input fails fatally instead of panicking mid-eval.
pub fn apply_kind(mesh: &mut Mesh, kind: &ModifierKind) -> BakeResult<()> {
    if mesh.has_shape_keys() {
        return Err(BakeError::MeshHasShapeKeys);
    }
    if let Some(max) = mesh.max_triangle_index() {
        if max as usize >= mesh.vertex_count() {
            return Err(BakeError::TriangleIndexOutOfRange {
                index: max,
                vertex_count: mesh.vertex_count(),
            });
        }
    }
    match kind {
        ModifierKind::Displace {
            strength,
            direction,
        } => displace(mesh, *strength, *direction),
        ModifierKind::Smooth { factor, iterations } => smooth(mesh, *factor, *iterations),
        ModifierKind::Subdivide { levels } => {
            for _ in 0..*levels {
                subdivide_once(mesh);
            }
        }
        ModifierKind::Mirror {
            axis,
            merge_threshold,
        } => mirror(mesh, *axis, *merge_threshold),
        ModifierKind::Array { count, offset } => array(mesh, *count, *offset),
    }
    Ok(())
}

/// Area-weighted vertex normals accumulated from triangles.
///
/// Vertices touched by no triangle (or only degenerate ones) get a zero
/// normal.
pub fn vertex_normals(mesh: &Mesh) -> Vec<[f32; 3]> {
    let mut normals = vec![[0.0f32; 3]; mesh.positions.len()];
    for [a, b, c] in &mesh.triangles {
        let pa = mesh.positions[*a as usize];
        let pb = mesh.positions[*b as usize];
        let pc = mesh.positions[*c as usize];
        let e1 = [pb[0] - pa[0], pb[1] - pa[1], pb[2] - pa[2]];
        let e2 = [pc[0] - pa[0], pc[1] - pa[1], pc[2] - pa[2]];
        let face = [
            e1[1] * e2[2] - e1[2] * e2[1],
            e1[2] * e2[0] - e1[0] * e2[2],
            e1[0] * e2[1] - e1[1] * e2[0],
        ];
        for v in [*a, *b, *c] {
            let n = &mut normals[v as usize];
            n[0] += face[0];
            n[1] += face[1];
            n[2] += face[2];
        }
    }
    for n in &mut normals {
        let len = (n[0] * n[0] + n[1] * n[1] + n[2] * n[2]).sqrt();
        if len > 0.0 {
            n[0] /= len;
            n[1] /= len;
            n[2] /= len;
        }
    }
    normals
}

fn displace(mesh: &mut Mesh, strength: f32, direction: DisplaceDirection) {
    match direction {
        DisplaceDirection::X | DisplaceDirection::Y | DisplaceDirection::Z => {
            let axis = match direction {
                DisplaceDirection::X => 0,
                DisplaceDirection::Y => 1,
                _ => 2,
            };
            for p in &mut mesh.positions {
                p[axis] += strength;
            }
        }
        DisplaceDirection::Normal => {
            let normals = vertex_normals(mesh);
            for (p, n) in mesh.positions.iter_mut().zip(&normals) {
                p[0] += strength * n[0];
                p[1] += strength * n[1];
                p[2] += strength * n[2];
            }
        }
    }
}

fn smooth(mesh: &mut Mesh, factor: f32, iterations: u32) {
    let mut neighbors: Vec<Vec<u32>> = vec![Vec::new(); mesh.positions.len()];
    for [a, b, c] in &mesh.triangles {
        for (u, v) in [(*a, *b), (*b, *c), (*c, *a)] {
            neighbors[u as usize].push(v);
            neighbors[v as usize].push(u);
        }
    }
    for list in &mut neighbors {
        list.sort_unstable();
        list.dedup();
    }

    for _ in 0..iterations {
        let mut next = mesh.positions.clone();
        for (v, list) in neighbors.iter().enumerate() {
            if list.is_empty() {
                continue;
            }
            let mut avg = [0.0f32; 3];
            for n in list {
                let p = mesh.positions[*n as usize];
                avg[0] += p[0];
                avg[1] += p[1];
                avg[2] += p[2];
            }
            let inv = 1.0 / list.len() as f32;
            let p = mesh.positions[v];
            next[v] = [
                p[0] + factor * (avg[0] * inv - p[0]),
                p[1] + factor * (avg[1] * inv - p[1]),
                p[2] + factor * (avg[2] * inv - p[2]),
            ];
        }
        mesh.positions = next;
    }
}

fn subdivide_once(mesh: &mut Mesh) {
    let mut positions = mesh.positions.clone();
    let mut midpoints: HashMap<(u32, u32), u32> = HashMap::new();
    let mut triangles = Vec::with_capacity(mesh.triangles.len() * 4);

    for [a, b, c] in &mesh.triangles {
        let ab = edge_midpoint(*a, *b, &mut positions, &mut midpoints);
        let bc = edge_midpoint(*b, *c, &mut positions, &mut midpoints);
        let ca = edge_midpoint(*c, *a, &mut positions, &mut midpoints);
        triangles.push([*a, ab, ca]);
        triangles.push([ab, *b, bc]);
        triangles.push([ca, bc, *c]);
        triangles.push([ab, bc, ca]);
    }

    mesh.positions = positions;
    mesh.triangles = triangles;
}

/// Midpoint of a shared edge, welded through the cache so neighboring
/// triangles reuse one vertex.
fn edge_midpoint(
    a: u32,
    b: u32,
    positions: &mut Vec<[f32; 3]>,
    cache: &mut HashMap<(u32, u32), u32>,
) -> u32 {
    let key = if a < b { (a, b) } else { (b, a) };
    if let Some(index) = cache.get(&key) {
        return *index;
    }
    let pa = positions[a as usize];
    let pb = positions[b as usize];
    let index = positions.len() as u32;
    positions.push([
        (pa[0] + pb[0]) * 0.5,
        (pa[1] + pb[1]) * 0.5,
        (pa[2] + pb[2]) * 0.5,
    ]);
    cache.insert(key, index);
    index
}

fn mirror(mesh: &mut Mesh, axis: Axis, merge_threshold: f32) {
    let plane = axis.index();
    let source_count = mesh.positions.len();
    let mut remap = Vec::with_capacity(source_count);

    for v in 0..source_count {
        let p = mesh.positions[v];
        if p[plane].abs() <= merge_threshold {
            // On the mirror plane: weld to the source vertex.
            remap.push(v as u32);
        } else {
            let mut mirrored = p;
            mirrored[plane] = -mirrored[plane];
            remap.push(mesh.positions.len() as u32);
            mesh.positions.push(mirrored);
        }
    }

    let source_triangles = mesh.triangles.clone();
    for [a, b, c] in source_triangles {
        // Reversed winding keeps the mirrored half facing outward.
        mesh.triangles
            .push([remap[c as usize], remap[b as usize], remap[a as usize]]);
    }
}

fn array(mesh: &mut Mesh, count: u32, offset: [f32; 3]) {
    if count <= 1 {
        return;
    }
    let base_positions = mesh.positions.clone();
    let base_triangles = mesh.triangles.clone();
    for k in 1..count {
        let shift = [
            offset[0] * k as f32,
            offset[1] * k as f32,
            offset[2] * k as f32,
        ];
        let vertex_offset = mesh.positions.len() as u32;
        for p in &base_positions {
            mesh.positions
                .push([p[0] + shift[0], p[1] + shift[1], p[2] + shift[2]]);
        }
        for [a, b, c] in &base_triangles {
            mesh.triangles
                .push([a + vertex_offset, b + vertex_offset, c + vertex_offset]);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use shapekit_scene::ShapeKey;

    fn plane() -> Mesh {
        Mesh::new(
            vec![
                [0.0, 0.0, 0.0],
                [1.0, 0.0, 0.0],
                [1.0, 1.0, 0.0],
                [0.0, 1.0, 0.0],
            ],
            vec![[0, 1, 2], [0, 2, 3]],
        )
    }

    #[test]
    fn test_displace_along_axis() {
        let mut mesh = plane();
        apply_kind(
            &mut mesh,
            &ModifierKind::Displace {
                strength: 0.5,
                direction: DisplaceDirection::X,
            },
        )
        .unwrap();
        assert_eq!(mesh.positions[0], [0.5, 0.0, 0.0]);
        assert_eq!(mesh.positions[2], [1.5, 1.0, 0.0]);
    }

    #[test]
    fn test_displace_along_normals_inflates_plane() {
        let mut mesh = plane();
        apply_kind(
            &mut mesh,
            &ModifierKind::Displace {
                strength: 0.25,
                direction: DisplaceDirection::Normal,
            },
        )
        .unwrap();
        // The plane's triangles wind counter-clockwise, so normals point +Z.
        for p in &mesh.positions {
            assert_eq!(p[2], 0.25);
        }
    }

    #[test]
    fn test_displace_normal_without_faces_is_noop() {
        let mut mesh = Mesh::new(vec![[1.0, 2.0, 3.0]], vec![]);
        apply_kind(
            &mut mesh,
            &ModifierKind::Displace {
                strength: 5.0,
                direction: DisplaceDirection::Normal,
            },
        )
        .unwrap();
        assert_eq!(mesh.positions[0], [1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_vertex_normals_unit_length() {
        let normals = vertex_normals(&plane());
        for n in normals {
            assert_eq!(n, [0.0, 0.0, 1.0]);
        }
    }

    #[test]
    fn test_smooth_moves_toward_neighbor_average() {
        let mut mesh = Mesh::new(
            vec![[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]],
            vec![[0, 1, 2]],
        );
        apply_kind(
            &mut mesh,
            &ModifierKind::Smooth {
                factor: 1.0,
                iterations: 1,
            },
        )
        .unwrap();
        // Each vertex lands on the average of the other two.
        assert_eq!(mesh.positions[0], [0.5, 0.5, 0.0]);
        assert_eq!(mesh.positions[1], [0.0, 0.5, 0.0]);
        assert_eq!(mesh.positions[2], [0.5, 0.0, 0.0]);
    }

    #[test]
    fn test_smooth_zero_iterations_is_identity() {
        let mut mesh = plane();
        let before = mesh.positions.clone();
        apply_kind(
            &mut mesh,
            &ModifierKind::Smooth {
                factor: 0.5,
                iterations: 0,
            },
        )
        .unwrap();
        assert_eq!(mesh.positions, before);
    }

    #[test]
    fn test_subdivide_quadruples_triangles_and_welds_midpoints() {
        let mut mesh = plane();
        apply_kind(&mut mesh, &ModifierKind::Subdivide { levels: 1 }).unwrap();
        assert_eq!(mesh.triangle_count(), 8);
        // 4 corners + 5 unique edges (the diagonal is shared).
        assert_eq!(mesh.vertex_count(), 9);
    }

    #[test]
    fn test_subdivide_two_levels() {
        let mut mesh = plane();
        apply_kind(&mut mesh, &ModifierKind::Subdivide { levels: 2 }).unwrap();
        assert_eq!(mesh.triangle_count(), 32);
    }

    #[test]
    fn test_mirror_welds_plane_vertices() {
        let mut mesh = Mesh::new(
            vec![[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]],
            vec![[0, 1, 2]],
        );
        apply_kind(
            &mut mesh,
            &ModifierKind::Mirror {
                axis: Axis::X,
                merge_threshold: 0.001,
            },
        )
        .unwrap();
        // Vertices 0 and 2 sit on the plane and weld; vertex 1 duplicates.
        assert_eq!(mesh.vertex_count(), 4);
        assert_eq!(mesh.triangle_count(), 2);
        assert_eq!(mesh.positions[3], [-1.0, 0.0, 0.0]);
        // Mirrored triangle winds in reverse.
        assert_eq!(mesh.triangles[1], [2, 3, 0]);
    }

    #[test]
    fn test_mirror_threshold_catches_near_plane_vertices() {
        let mut mesh = Mesh::new(vec![[0.0005, 0.0, 0.0], [1.0, 0.0, 0.0]], vec![]);
        apply_kind(
            &mut mesh,
            &ModifierKind::Mirror {
                axis: Axis::X,
                merge_threshold: 0.001,
            },
        )
        .unwrap();
        assert_eq!(mesh.vertex_count(), 3);
    }

    #[test]
    fn test_array_repeats_geometry() {
        let mut mesh = plane();
        apply_kind(
            &mut mesh,
            &ModifierKind::Array {
                count: 3,
                offset: [2.0, 0.0, 0.0],
            },
        )
        .unwrap();
        assert_eq!(mesh.vertex_count(), 12);
        assert_eq!(mesh.triangle_count(), 6);
        let bbox = mesh.bounding_box().unwrap();
        assert_eq!(bbox.max[0], 5.0);
    }

    #[test]
    fn test_array_single_copy_is_identity() {
        let mut mesh = plane();
        let before = mesh.clone();
        apply_kind(
            &mut mesh,
            &ModifierKind::Array {
                count: 1,
                offset: [2.0, 0.0, 0.0],
            },
        )
        .unwrap();
        assert_eq!(mesh, before);
    }

    #[test]
    fn test_apply_refuses_out_of_range_triangle_index() {
        let mut mesh = plane();
        mesh.triangles.push([0, 1, 9]);
        let err = apply_kind(
            &mut mesh,
            &ModifierKind::Displace {
                strength: 0.5,
                direction: DisplaceDirection::Normal,
            },
        )
        .unwrap_err();
        assert!(matches!(
            err,
            BakeError::TriangleIndexOutOfRange {
                index: 9,
                vertex_count: 4
            }
        ));
    }

    #[test]
    fn test_apply_refuses_keyed_mesh() {
        let mut mesh = plane();
        mesh.shape_keys.push(ShapeKey::zero("Basis", 4));
        let err = apply_kind(&mut mesh, &ModifierKind::Subdivide { levels: 1 }).unwrap_err();
        assert!(matches!(err, BakeError::MeshHasShapeKeys));
    }
}
