//! Rotation-invariant floor area of a vertex cloud.
//!
//! The dominant plane of the cloud comes from principal component analysis of
//! the point covariance: its normal is the direction of least spread. Within
//! that plane the area of the minimum-area bounding rectangle is returned, so
//! a room model rotated in world space reports the same floor area as the
//! axis-aligned original, square floors included.

use glam::{DVec2, DVec3};

const JACOBI_MAX_SWEEPS: usize = 64;
const JACOBI_EPSILON: f64 = 1e-24;

/// Area of the minimum bounding rectangle of `points` projected onto their
/// dominant plane.
///
/// Returns 0 for fewer than three points or a cloud with no spread in two
/// directions.
pub fn projected_floor_area(points: &[DVec3]) -> f64 {
    if points.len() < 3 {
        return 0.0;
    }

    let center = points.iter().copied().sum::<DVec3>() / points.len() as f64;
    let (eigenvalues, eigenvectors) = symmetric_eigen(covariance(points, center));

    let least_spread = (0..3)
        .min_by(|&a, &b| eigenvalues[a].total_cmp(&eigenvalues[b]))
        .unwrap_or(2);
    let normal = eigenvectors[least_spread].normalize_or_zero();
    if normal == DVec3::ZERO {
        return 0.0;
    }
    let axis_u = normal.any_orthonormal_vector();
    let axis_v = normal.cross(axis_u);

    let projected: Vec<DVec2> = points
        .iter()
        .map(|p| {
            let offset = *p - center;
            DVec2::new(offset.dot(axis_u), offset.dot(axis_v))
        })
        .collect();

    min_bounding_rect_area(&convex_hull(projected))
}

/// Convex hull in counter-clockwise order (monotone chain).
///
/// Collinear points are dropped, so a degenerate cloud yields fewer than three
/// vertices.
fn convex_hull(mut points: Vec<DVec2>) -> Vec<DVec2> {
    points.sort_by(|a, b| a.x.total_cmp(&b.x).then(a.y.total_cmp(&b.y)));
    points.dedup();
    if points.len() < 3 {
        return points;
    }

    let turn = |o: DVec2, a: DVec2, b: DVec2| (a - o).perp_dot(b - o);
    let mut hull: Vec<DVec2> = Vec::with_capacity(points.len() * 2);

    for &p in &points {
        while hull.len() >= 2 && turn(hull[hull.len() - 2], hull[hull.len() - 1], p) <= 0.0 {
            hull.pop();
        }
        hull.push(p);
    }
    let lower_len = hull.len() + 1;
    for &p in points.iter().rev().skip(1) {
        while hull.len() >= lower_len && turn(hull[hull.len() - 2], hull[hull.len() - 1], p) <= 0.0
        {
            hull.pop();
        }
        hull.push(p);
    }
    // last point repeats the first
    hull.pop();
    hull
}

/// Smallest rectangle enclosing a convex polygon.
///
/// One side of the optimal rectangle lies on a hull edge, so every edge
/// direction is tried.
fn min_bounding_rect_area(hull: &[DVec2]) -> f64 {
    if hull.len() < 3 {
        return 0.0;
    }

    hull.iter()
        .zip(hull.iter().cycle().skip(1))
        .filter_map(|(a, b)| {
            let along = (*b - *a).try_normalize()?;
            let across = along.perp();
            let mut min = DVec2::splat(f64::INFINITY);
            let mut max = DVec2::splat(f64::NEG_INFINITY);
            for p in hull {
                let uv = DVec2::new(p.dot(along), p.dot(across));
                min = min.min(uv);
                max = max.max(uv);
            }
            let size = max - min;
            Some(size.x * size.y)
        })
        .min_by(f64::total_cmp)
        .unwrap_or(0.0)
}

fn covariance(points: &[DVec3], center: DVec3) -> [[f64; 3]; 3] {
    let mut cov = [[0.0; 3]; 3];
    for p in points {
        let d = (*p - center).to_array();
        for (i, row) in cov.iter_mut().enumerate() {
            for (j, cell) in row.iter_mut().enumerate() {
                *cell += d[i] * d[j];
            }
        }
    }
    let n = points.len() as f64;
    for row in cov.iter_mut() {
        for cell in row.iter_mut() {
            *cell /= n;
        }
    }
    cov
}

/// Cyclic Jacobi eigen-decomposition of a symmetric 3x3 matrix.
///
/// Returns the eigenvalues and the matching unit eigenvectors.
fn symmetric_eigen(mut a: [[f64; 3]; 3]) -> ([f64; 3], [DVec3; 3]) {
    let mut v = [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]];

    for _ in 0..JACOBI_MAX_SWEEPS {
        let off = a[0][1] * a[0][1] + a[0][2] * a[0][2] + a[1][2] * a[1][2];
        if off < JACOBI_EPSILON {
            break;
        }

        for (p, q) in [(0, 1), (0, 2), (1, 2)] {
            if a[p][q] == 0.0 {
                continue;
            }
            let theta = (a[q][q] - a[p][p]) / (2.0 * a[p][q]);
            let t = theta.signum() / (theta.abs() + (theta * theta + 1.0).sqrt());
            let c = 1.0 / (t * t + 1.0).sqrt();
            let s = t * c;

            for k in 0..3 {
                let (akp, akq) = (a[k][p], a[k][q]);
                a[k][p] = c * akp - s * akq;
                a[k][q] = s * akp + c * akq;
            }
            for k in 0..3 {
                let (apk, aqk) = (a[p][k], a[q][k]);
                a[p][k] = c * apk - s * aqk;
                a[q][k] = s * apk + c * aqk;
            }
            for row in v.iter_mut() {
                let (vp, vq) = (row[p], row[q]);
                row[p] = c * vp - s * vq;
                row[q] = s * vp + c * vq;
            }
        }
    }

    let column = |k: usize| DVec3::new(v[0][k], v[1][k], v[2][k]);
    (
        [a[0][0], a[1][1], a[2][2]],
        [column(0), column(1), column(2)],
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::DQuat;

    fn slab(width: f64, depth: f64, thickness: f64) -> Vec<DVec3> {
        let mut points = Vec::new();
        for &x in &[0.0, width] {
            for &y in &[0.0, depth] {
                for &z in &[0.0, thickness] {
                    points.push(DVec3::new(x, y, z));
                }
            }
        }
        points
    }

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-6,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn test_axis_aligned_slab() {
        assert_close(projected_floor_area(&slab(4.0, 5.0, 0.1)), 20.0);
    }

    #[test]
    fn test_rotated_slab_keeps_area() {
        let rotation = DQuat::from_rotation_z(0.5) * DQuat::from_rotation_x(0.3);
        let rotated: Vec<DVec3> = slab(4.0, 5.0, 0.1)
            .into_iter()
            .map(|p| rotation * p + DVec3::new(10.0, -3.0, 1.0))
            .collect();
        assert_close(projected_floor_area(&rotated), 20.0);
    }

    #[test]
    fn test_rotated_square_keeps_area() {
        for angle in [0.0_f64, 30.0, 45.0, 60.0, 113.0] {
            let rotation = DQuat::from_rotation_z(angle.to_radians());
            let rotated: Vec<DVec3> = slab(4.0, 4.0, 0.1)
                .into_iter()
                .map(|p| rotation * p)
                .collect();
            assert_close(projected_floor_area(&rotated), 16.0);
        }
    }

    #[test]
    fn test_hull_drops_interior_and_collinear_points() {
        let hull = convex_hull(vec![
            DVec2::new(0.0, 0.0),
            DVec2::new(1.0, 0.0),
            DVec2::new(2.0, 0.0),
            DVec2::new(2.0, 2.0),
            DVec2::new(1.0, 1.0),
            DVec2::new(0.0, 2.0),
        ]);
        assert_eq!(hull.len(), 4);
        assert_close(min_bounding_rect_area(&hull), 4.0);
    }

    #[test]
    fn test_too_few_points() {
        assert_eq!(projected_floor_area(&[]), 0.0);
        assert_eq!(
            projected_floor_area(&[DVec3::ZERO, DVec3::new(1.0, 1.0, 0.0)]),
            0.0
        );
    }

    #[test]
    fn test_collinear_points() {
        let points = [
            DVec3::ZERO,
            DVec3::new(1.0, 0.0, 0.0),
            DVec3::new(2.0, 0.0, 0.0),
        ];
        assert_close(projected_floor_area(&points), 0.0);
    }

    #[test]
    fn test_eigen_of_diagonal_matrix() {
        let (values, vectors) =
            symmetric_eigen([[3.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 2.0]]);
        assert_eq!(values, [3.0, 1.0, 2.0]);
        assert_eq!(vectors[0], DVec3::X);
    }

    #[test]
    fn test_eigen_reconstructs_matrix() {
        let m = [[4.0, 1.0, 0.5], [1.0, 3.0, 0.25], [0.5, 0.25, 2.0]];
        let (values, vectors) = symmetric_eigen(m);
        for k in 0..3 {
            let v = vectors[k];
            let mv = DVec3::new(
                m[0][0] * v.x + m[0][1] * v.y + m[0][2] * v.z,
                m[1][0] * v.x + m[1][1] * v.y + m[1][2] * v.z,
                m[2][0] * v.x + m[2][1] * v.y + m[2][2] * v.z,
            );
            assert!((mv - v * values[k]).length() < 1e-9);
        }
    }
}
