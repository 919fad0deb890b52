// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Integrity checks and healing of face windings

use super::{NormalOrientation, Polyhedron, PolyhedronIntegrity};
use crate::error::{GravityError, GravityResult};
use crate::geometry::{count_ray_intersections, face_plane, triangle_area, triangle_centroid};
use ahash::AHashMap;
use nalgebra::Point3;
use rayon::prelude::*;
use tracing::{debug, info, warn};

/// Fraction of the bounding box diagonal below which two ray hits are the
/// same surface crossing.
const MERGE_FRACTION: f64 = 1e-9;

/// Apply an integrity policy to a freshly built polyhedron.
pub fn enforce_integrity(
    polyhedron: &mut Polyhedron,
    policy: PolyhedronIntegrity,
) -> GravityResult<()> {
    match policy {
        PolyhedronIntegrity::Disable => Ok(()),
        PolyhedronIntegrity::Verify => verify(polyhedron),
        PolyhedronIntegrity::Automatic => {
            warn!(
                faces = polyhedron.face_count(),
                "AUTOMATIC integrity check is quadratic in the number of faces; \
                 use VERIFY to keep it, HEAL to repair windings or DISABLE for trusted meshes"
            );
            verify(polyhedron)
        }
        PolyhedronIntegrity::Heal => heal(polyhedron),
    }
}

fn verify(polyhedron: &Polyhedron) -> GravityResult<()> {
    check_degenerate_faces(polyhedron)?;
    check_closed_manifold(polyhedron)?;

    let declared = polyhedron.orientation();
    let (majority, faces) = plane_unit_normal_orientation(polyhedron);
    if majority == declared && faces.is_empty() {
        return Ok(());
    }

    let reason = if faces.is_empty() {
        format!(
            "all plane unit normals point {} but {} was declared",
            majority, declared
        )
    } else {
        format!(
            "{} of {} faces disagree with the {} majority: {:?}",
            faces.len(),
            polyhedron.face_count(),
            majority,
            faces
        )
    };

    Err(GravityError::InvalidMesh {
        declared,
        majority,
        faces,
        reason,
    })
}

fn heal(polyhedron: &mut Polyhedron) -> GravityResult<()> {
    check_degenerate_faces(polyhedron)?;
    check_closed_manifold(polyhedron)?;

    let (majority, violating) = plane_unit_normal_orientation(polyhedron);
    let faces = polyhedron.faces_mut();
    for &index in &violating {
        faces[index].swap(0, 1);
    }

    if majority != polyhedron.orientation() || !violating.is_empty() {
        info!(
            flipped = violating.len(),
            declared = %polyhedron.orientation(),
            adopted = %majority,
            "Healed polyhedron face windings"
        );
    }
    polyhedron.set_orientation(majority);
    Ok(())
}

/// Fail on the first face with (near-)zero area.
pub(crate) fn check_degenerate_faces(polyhedron: &Polyhedron) -> GravityResult<()> {
    for (face, [v0, v1, v2]) in polyhedron.resolved_faces().enumerate() {
        if face_plane(&v0, &v1, &v2).is_none() {
            return Err(GravityError::DegenerateFace {
                face,
                area: triangle_area(&v0, &v1, &v2),
            });
        }
    }
    Ok(())
}

/// Every undirected edge must be shared by exactly two faces.
pub(crate) fn check_closed_manifold(polyhedron: &Polyhedron) -> GravityResult<()> {
    let mut edges: AHashMap<(usize, usize), Vec<usize>> = AHashMap::new();

    for (face, indices) in polyhedron.faces().iter().enumerate() {
        for i in 0..3 {
            let a = indices[i];
            let b = indices[(i + 1) % 3];
            let edge = if a < b { (a, b) } else { (b, a) };
            edges.entry(edge).or_default().push(face);
        }
    }

    let mut open: Vec<((usize, usize), usize)> = Vec::new();
    let mut faces: Vec<usize> = Vec::new();
    for (edge, users) in &edges {
        if users.len() != 2 {
            open.push((*edge, users.len()));
            faces.extend_from_slice(users);
        }
    }

    if open.is_empty() {
        return Ok(());
    }

    open.sort_unstable();
    faces.sort_unstable();
    faces.dedup();

    let ((a, b), count) = open[0];
    let declared = polyhedron.orientation();
    Err(GravityError::InvalidMesh {
        declared,
        majority: declared,
        faces,
        reason: format!(
            "mesh is not a closed 2-manifold: {} edges are not shared by exactly two faces \
             (edge ({}, {}) is used {} times)",
            open.len(),
            a,
            b,
            count
        ),
    })
}

/// Majority orientation of the plane unit normals and the faces whose normal
/// disagrees with it, ascending.
///
/// A ray leaves every face centroid along the face normal; an odd number of
/// surface crossings means the normal points into the body. An exact tie
/// keeps the declared orientation.
pub fn plane_unit_normal_orientation(polyhedron: &Polyhedron) -> (NormalOrientation, Vec<usize>) {
    let merge_distance = MERGE_FRACTION * bounding_diagonal(polyhedron.vertices());

    let per_face: Vec<Option<NormalOrientation>> = (0..polyhedron.face_count())
        .into_par_iter()
        .map(|face| face_orientation(polyhedron, face, merge_distance))
        .collect();

    let inwards = per_face
        .iter()
        .filter(|o| **o == Some(NormalOrientation::Inwards))
        .count();
    let outwards = per_face
        .iter()
        .filter(|o| **o == Some(NormalOrientation::Outwards))
        .count();

    let majority = if outwards > inwards {
        NormalOrientation::Outwards
    } else if inwards > outwards {
        NormalOrientation::Inwards
    } else {
        polyhedron.orientation()
    };

    let violating: Vec<usize> = per_face
        .iter()
        .enumerate()
        .filter(|(_, o)| **o == Some(majority.opposite()))
        .map(|(face, _)| face)
        .collect();

    debug!(
        outwards,
        inwards,
        majority = %majority,
        violating = violating.len(),
        "Plane unit normal orientation checked"
    );
    (majority, violating)
}

/// `None` for degenerate faces, which have no normal to test.
fn face_orientation(
    polyhedron: &Polyhedron,
    face: usize,
    merge_distance: f64,
) -> Option<NormalOrientation> {
    let [v0, v1, v2] = polyhedron.resolved_face(face)?;
    let plane = face_plane(&v0, &v1, &v2)?;
    let origin = triangle_centroid(&v0, &v1, &v2);

    let others = polyhedron
        .resolved_faces()
        .enumerate()
        .filter(|(other, _)| *other != face)
        .map(|(_, corners)| corners);
    let crossings = count_ray_intersections(&origin, &plane.normal, others, merge_distance);

    if crossings % 2 == 0 {
        Some(NormalOrientation::Outwards)
    } else {
        Some(NormalOrientation::Inwards)
    }
}

fn bounding_diagonal(vertices: &[Point3<f64>]) -> f64 {
    let Some(first) = vertices.first() else {
        return 0.0;
    };
    let (min, max) = vertices
        .iter()
        .fold((first.coords, first.coords), |(min, max), v| {
            (min.inf(&v.coords), max.sup(&v.coords))
        });
    (max - min).norm()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::polyhedron::PolyhedronOptions;

    fn prism() -> (Vec<[f64; 3]>, Vec<[usize; 3]>) {
        (
            vec![
                [0.0, 0.0, 0.0],
                [2.0, 0.0, 0.0],
                [0.0, 2.0, 0.0],
                [0.0, 0.0, 3.0],
                [2.0, 0.0, 3.0],
                [0.0, 2.0, 3.0],
            ],
            vec![
                [0, 2, 1],
                [3, 4, 5],
                [0, 1, 4],
                [0, 4, 3],
                [1, 2, 5],
                [1, 5, 4],
                [2, 0, 3],
                [2, 3, 5],
            ],
        )
    }

    fn disabled(faces: Vec<[usize; 3]>) -> Polyhedron {
        let (vertices, _) = prism();
        let options = PolyhedronOptions::default().with_integrity(PolyhedronIntegrity::Disable);
        Polyhedron::new(vertices, faces, 1.0, options).unwrap()
    }

    #[test]
    fn test_prism_is_outwards() {
        let (_, faces) = prism();
        let (majority, violating) = plane_unit_normal_orientation(&disabled(faces));
        assert_eq!(majority, NormalOrientation::Outwards);
        assert!(violating.is_empty());
    }

    #[test]
    fn test_minority_faces_reported() {
        let (_, mut faces) = prism();
        faces[1].swap(0, 1);
        faces[6].swap(1, 2);
        let (majority, violating) = plane_unit_normal_orientation(&disabled(faces));
        assert_eq!(majority, NormalOrientation::Outwards);
        assert_eq!(violating, vec![1, 6]);
    }

    #[test]
    fn test_open_mesh_rejected() {
        let (_, mut faces) = prism();
        faces.pop();
        let err = check_closed_manifold(&disabled(faces)).unwrap_err();
        match err {
            GravityError::InvalidMesh { faces, reason, .. } => {
                assert!(faces.contains(&6));
                assert!(reason.contains("closed 2-manifold"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_degenerate_face_reported() {
        let (mut vertices, faces) = prism();
        vertices.push([1.0, 1.0, 0.0]);
        let mut faces = faces;
        faces.push([0, 6, 6]);
        let options = PolyhedronOptions::default().with_integrity(PolyhedronIntegrity::Disable);
        let polyhedron = Polyhedron::new(vertices, faces, 1.0, options).unwrap();
        let err = check_degenerate_faces(&polyhedron).unwrap_err();
        assert!(matches!(err, GravityError::DegenerateFace { face: 8, .. }));
    }

    #[test]
    fn test_bounding_diagonal() {
        let (vertices, _) = prism();
        let points: Vec<Point3<f64>> = vertices.into_iter().map(Point3::from).collect();
        let expected = (4.0_f64 + 4.0 + 9.0).sqrt();
        assert!((bounding_diagonal(&points) - expected).abs() < 1e-12);
    }
}
