use nalgebra::{DMatrix, Matrix3, Point2, Vector3};

use crate::record::{Point, Quad, Record};

/// Center of a recorded quad
pub fn quad_center(quad: &Quad) -> Point2<f32> {
    let (sx, sy) = quad
        .iter()
        .fold((0.0f32, 0.0f32), |(sx, sy), p| (sx + p.x() as f32, sy + p.y() as f32));
    Point2::new(sx / 4.0, sy / 4.0)
}

/// Maps sheet coordinates into a scanned image using the four anchors.
///
/// Observed anchor centers must be given in record order: top-left,
/// top-right, bottom-right, bottom-left.
#[derive(Debug, Clone)]
pub struct AnchorAlignment {
    homography: Matrix3<f32>,
}

impl AnchorAlignment {
    /// Fit the sheet-to-scan transform. `None` when the record does not hold
    /// exactly four anchors or the points are degenerate.
    pub fn from_record(record: &Record, observed: [Point2<f32>; 4]) -> Option<Self> {
        if record.anchors.len() != 4 {
            return None;
        }
        let src = [
            quad_center(&record.anchors[0]),
            quad_center(&record.anchors[1]),
            quad_center(&record.anchors[2]),
            quad_center(&record.anchors[3]),
        ];
        find_homography(src, observed).map(|homography| Self { homography })
    }

    /// Project a sheet point (e.g. a bubble center) into scan coordinates
    pub fn project(&self, p: Point) -> Option<Point2<f32>> {
        let v = self.homography * Vector3::new(p.x() as f32, p.y() as f32, 1.0);
        if v.z.abs() < 1e-6 {
            return None;
        }
        Some(Point2::new(v.x / v.z, v.y / v.z))
    }
}

/// Compute Homography Matrix mapping src_points to dst_points
/// Uses 4 corresponding points.
pub fn find_homography(src: [Point2<f32>; 4], dst: [Point2<f32>; 4]) -> Option<Matrix3<f32>> {
    // Sheet coordinates run into the thousands; normalizing keeps the SVD
    // well conditioned in f32.
    let (src_n, t_src) = normalize(&src);
    let (dst_n, t_dst) = normalize(&dst);
    if has_collinear_triple(&src_n) || has_collinear_triple(&dst_n) {
        return None;
    }

    let mut a = DMatrix::<f32>::zeros(9, 9);
    for i in 0..4 {
        let (x, y) = (src_n[i].x, src_n[i].y);
        let (u, v) = (dst_n[i].x, dst_n[i].y);

        a[(i * 2, 0)] = -x;
        a[(i * 2, 1)] = -y;
        a[(i * 2, 2)] = -1.0;
        a[(i * 2, 6)] = x * u;
        a[(i * 2, 7)] = y * u;
        a[(i * 2, 8)] = u;

        a[(i * 2 + 1, 3)] = -x;
        a[(i * 2 + 1, 4)] = -y;
        a[(i * 2 + 1, 5)] = -1.0;
        a[(i * 2 + 1, 6)] = x * v;
        a[(i * 2 + 1, 7)] = y * v;
        a[(i * 2 + 1, 8)] = v;
    }

    // Ninth row stays zero so V^T is a full 9x9 basis.
    let svd = a.svd(false, true);
    let v_t = svd.v_t?;
    let smallest = svd
        .singular_values
        .iter()
        .enumerate()
        .min_by(|l, r| l.1.total_cmp(r.1))
        .map(|(i, _)| i)?;
    let h = v_t.row(smallest);

    let h_n = Matrix3::new(h[0], h[1], h[2], h[3], h[4], h[5], h[6], h[7], h[8]);
    let h_full = t_dst.try_inverse()? * h_n * t_src;

    if h_full[(2, 2)].abs() < 1e-9 {
        return None;
    }
    Some(h_full / h_full[(2, 2)])
}

/// Any three of the (normalized) points on one line, coincident points
/// included
fn has_collinear_triple(points: &[Point2<f32>; 4]) -> bool {
    const TRIPLES: [(usize, usize, usize); 4] = [(0, 1, 2), (0, 1, 3), (0, 2, 3), (1, 2, 3)];
    TRIPLES.iter().any(|&(a, b, c)| {
        let ab = points[b] - points[a];
        let ac = points[c] - points[a];
        (ab.x * ac.y - ab.y * ac.x).abs() < 1e-3
    })
}

/// Translate to the centroid and scale to mean distance sqrt(2)
fn normalize(points: &[Point2<f32>; 4]) -> ([Point2<f32>; 4], Matrix3<f32>) {
    let cx = points.iter().map(|p| p.x).sum::<f32>() / 4.0;
    let cy = points.iter().map(|p| p.y).sum::<f32>() / 4.0;
    let mean = points
        .iter()
        .map(|p| ((p.x - cx).powi(2) + (p.y - cy).powi(2)).sqrt())
        .sum::<f32>()
        / 4.0;
    let s = if mean > 1e-6 { std::f32::consts::SQRT_2 / mean } else { 1.0 };

    let t = Matrix3::new(s, 0.0, -s * cx, 0.0, s, -s * cy, 0.0, 0.0, 1.0);
    let out = points.map(|p| Point2::new(s * (p.x - cx), s * (p.y - cy)));
    (out, t)
}
