use crate::framebuffer::Band;
use crate::math::Vector2;

/// How wireframe edges are turned into pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineAlgorithm {
    /// Integer error accumulator; every pixel of the line, both endpoints
    /// included.
    #[default]
    Bresenham,
    /// Recursive bisection drawing midpoints until segments are shorter
    /// than 2 pixels. Sparser than Bresenham and may leave single-pixel gaps
    /// on diagonals; endpoints are not drawn.
    Midpoint,
}

impl LineAlgorithm {
    pub fn draw(self, band: &mut Band, p0: Vector2, p1: Vector2, color: [u8; 4]) {
        match self {
            LineAlgorithm::Bresenham => draw_bline(band, p0, p1, color),
            LineAlgorithm::Midpoint => draw_line(band, p0, p1, color),
        }
    }
}

/// Keeps line work bounded when a projected endpoint lands far off-surface
/// (vertices near the camera plane project to huge coordinates). Lines
/// inside a guard area of one surface size around the visible rectangle are
/// drawn untouched; longer ones are cut back to that area with
/// Liang-Barsky clipping. Returns `None` when nothing can be visible.
fn clip_to_guard(band: &Band, p0: Vector2, p1: Vector2) -> Option<(Vector2, Vector2)> {
    let (w, h) = (band.width() as f32, band.height() as f32);
    let (x_min, x_max, y_min, y_max) = (-w, 2. * w, -h, 2. * h);

    if !(p0.x.is_finite() && p0.y.is_finite() && p1.x.is_finite() && p1.y.is_finite()) {
        return None;
    }
    let inside = |p: Vector2| p.x >= x_min && p.x <= x_max && p.y >= y_min && p.y <= y_max;
    if inside(p0) && inside(p1) {
        return Some((p0, p1));
    }

    let d = p1 - p0;
    let (mut t0, mut t1) = (0f32, 1f32);
    for (p, q) in [
        (-d.x, p0.x - x_min),
        (d.x, x_max - p0.x),
        (-d.y, p0.y - y_min),
        (d.y, y_max - p0.y),
    ] {
        if p == 0. {
            if q < 0. {
                return None;
            }
            continue;
        }
        let r = q / p;
        if p < 0. {
            t0 = t0.max(r);
        } else {
            t1 = t1.min(r);
        }
        if t0 > t1 {
            return None;
        }
    }
    Some((p0 + d * t0, p0 + d * t1))
}

/// Bresenham line from `point0` to `point1`, both endpoints drawn.
pub fn draw_bline(band: &mut Band, point0: Vector2, point1: Vector2, color: [u8; 4]) {
    let (point0, point1) = match clip_to_guard(band, point0, point1) {
        Some(segment) => segment,
        None => return,
    };

    let (mut x0, mut y0) = (point0.x as i32, point0.y as i32);
    let (x1, y1) = (point1.x as i32, point1.y as i32);

    let dx = (x1 - x0).abs();
    let dy = (y1 - y0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx - dy;

    loop {
        band.draw_point_2d(Vector2::new(x0 as f32, y0 as f32), color);

        if x0 == x1 && y0 == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 > -dy {
            err -= dy;
            x0 += sx;
        }
        if e2 < dx {
            err += dx;
            y0 += sy;
        }
    }
}

/// Recursive midpoint line between `point0` and `point1`.
pub fn draw_line(band: &mut Band, point0: Vector2, point1: Vector2, color: [u8; 4]) {
    if let Some((p0, p1)) = clip_to_guard(band, point0, point1) {
        bisect(band, p0, p1, color);
    }
}

fn bisect(band: &mut Band, point0: Vector2, point1: Vector2, color: [u8; 4]) {
    if (point1 - point0).length() < 2. {
        return;
    }
    let middle = point0 + (point1 - point0) / 2.;
    band.draw_point_2d(middle, color);
    bisect(band, point0, middle, color);
    bisect(band, middle, point1, color);
}
