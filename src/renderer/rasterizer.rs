//! Depth-tested, Gouraud-shaded scanline triangle fill
//!
//! Vertices are sorted top to bottom and the triangle is walked one pixel
//! row at a time. Each row is bounded by two edges; one of them is always
//! v1-v3, the other is v1-v2 above v2 and v2-v3 below it. Light intensity
//! is computed per vertex, interpolated down the edges and then across the
//! row. Spans are half-open: a row fills `sx..ex` with both ends floored.

use crate::framebuffer::Band;
use crate::math::{interpolate, Color4, Vector3};
use crate::mesh::Vertex;

/// Light intensities at the endpoints of the two edges of one row.
#[derive(Debug, Clone, Copy, Default)]
struct ScanlineData {
    current_y: i32,
    ndotla: f32,
    ndotlb: f32,
    ndotlc: f32,
    ndotld: f32,
}

/// Cosine between the vertex normal and the direction to the light,
/// clamped at 0.
pub fn compute_ndotl(vertex: Vector3, normal: Vector3, light_position: Vector3) -> f32 {
    let light_direction = (light_position - vertex).normalize();
    f32::max(0., normal.normalize().dot(light_direction))
}

/// Fraction of the way from `start` to `end` covered at `y`; 1 for a
/// horizontal edge.
fn edge_gradient(y: f32, start: Vector3, end: Vector3) -> f32 {
    if start.y != end.y {
        (y - start.y) / (end.y - start.y)
    } else {
        1.
    }
}

/// Fills one row between edge `va`-`vb` on the left and `vc`-`vd` on the
/// right.
fn process_scanline(
    band: &mut Band,
    data: &ScanlineData,
    va: &Vertex,
    vb: &Vertex,
    vc: &Vertex,
    vd: &Vertex,
    color: Color4,
) {
    let (pa, pb) = (va.coordinates, vb.coordinates);
    let (pc, pd) = (vc.coordinates, vd.coordinates);
    let y = data.current_y as f32;

    let gradient1 = edge_gradient(y, pa, pb);
    let gradient2 = edge_gradient(y, pc, pd);

    // Span ends stay floating point; projected x can be far outside i64.
    let sx = f64::from(interpolate(pa.x, pb.x, gradient1).floor());
    let ex = f64::from(interpolate(pc.x, pd.x, gradient2).floor());
    if ex <= sx {
        return;
    }

    let z1 = interpolate(pa.z, pb.z, gradient1);
    let z2 = interpolate(pc.z, pd.z, gradient2);

    let snl = interpolate(data.ndotla, data.ndotlb, gradient1);
    let enl = interpolate(data.ndotlc, data.ndotld, gradient2);

    // pixels left of 0 or right of the surface would be clipped anyway
    let first = sx.max(0.) as i64;
    let last = ex.min(band.width() as f64) as i64;
    let span = ex - sx;

    for x in first..last {
        let gradient = ((x as f64 - sx) / span) as f32;
        let z = interpolate(z1, z2, gradient);
        let ndotl = interpolate(snl, enl, gradient);
        band.draw_point(
            Vector3::new(x as f32, y, z),
            color.shade(ndotl).to_bgra(),
        );
    }
}

/// Rasterizes a projected triangle into `band`.
///
/// Vertices carry screen-space `coordinates` and world-space `normal` and
/// `world_coordinates`, as produced by
/// [`Viewport::project`](super::Viewport::project). Zero-area, inverted or
/// non-finite triangles draw nothing.
pub fn draw_triangle(
    band: &mut Band,
    mut v1: Vertex,
    mut v2: Vertex,
    mut v3: Vertex,
    color: Color4,
    light_position: Vector3,
) {
    if !(v1.coordinates.is_finite() && v2.coordinates.is_finite() && v3.coordinates.is_finite()) {
        return;
    }

    // v1 on top, v3 at the bottom
    if v1.coordinates.y > v2.coordinates.y {
        std::mem::swap(&mut v1, &mut v2);
    }
    if v2.coordinates.y > v3.coordinates.y {
        std::mem::swap(&mut v2, &mut v3);
    }
    if v1.coordinates.y > v2.coordinates.y {
        std::mem::swap(&mut v1, &mut v2);
    }

    let (p1, p2, p3) = (v1.coordinates, v2.coordinates, v3.coordinates);

    let rows = band.rows();
    let top = (p1.y.floor() as i64).max(rows.start as i64);
    let bottom = (p3.y.floor() as i64).min(rows.end as i64 - 1);
    if top > bottom {
        return;
    }

    let nl1 = compute_ndotl(v1.world_coordinates, v1.normal, light_position);
    let nl2 = compute_ndotl(v2.world_coordinates, v2.normal, light_position);
    let nl3 = compute_ndotl(v3.world_coordinates, v3.normal, light_position);

    // Inverse slopes dx/dy of v1-v2 and v1-v3, compared cross-multiplied so
    // a horizontal v1-v2 edge still lands on the right side.
    let v2_right = (p2.x - p1.x) * (p3.y - p1.y) > (p3.x - p1.x) * (p2.y - p1.y);

    let mut data = ScanlineData::default();
    for y in top..=bottom {
        data.current_y = y as i32;
        let upper = (y as f32) < p2.y;

        if v2_right {
            // left edge is v1-v3
            if upper {
                data.ndotla = nl1;
                data.ndotlb = nl3;
                data.ndotlc = nl1;
                data.ndotld = nl2;
                process_scanline(band, &data, &v1, &v3, &v1, &v2, color);
            } else {
                data.ndotla = nl1;
                data.ndotlb = nl3;
                data.ndotlc = nl2;
                data.ndotld = nl3;
                process_scanline(band, &data, &v1, &v3, &v2, &v3, color);
            }
        } else if upper {
            data.ndotla = nl1;
            data.ndotlb = nl2;
            data.ndotlc = nl1;
            data.ndotld = nl3;
            process_scanline(band, &data, &v1, &v2, &v1, &v3, color);
        } else {
            data.ndotla = nl2;
            data.ndotlb = nl3;
            data.ndotlc = nl1;
            data.ndotld = nl3;
            process_scanline(band, &data, &v2, &v3, &v1, &v3, color);
        }
    }
}
