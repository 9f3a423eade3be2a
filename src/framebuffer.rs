//! Colour and depth storage for one frame
//!
//! The colour buffer is packed BGRA, row-major, 4 bytes per pixel with a
//! stride of `width * 4`; this layout is what presenters and exporters read.
//! Depth is one `f32` per pixel where smaller is nearer, cleared to
//! `f32::MAX`.
//!
//! Writes go through a [`Band`]: a mutable view of a contiguous range of
//! rows. Parallel passes split the surface into disjoint bands, one per
//! worker, so every pixel has exactly one writer and the depth compare and
//! colour store for a pixel can never interleave with another thread's.

use std::ops::Range;
use std::path::Path;

use image::RgbaImage;
use tracing::info;

use crate::error::{RenderError, Result};
use crate::math::{Vector2, Vector3};

/// Depth of a pixel nothing has been drawn to.
pub const FAR_DEPTH: f32 = f32::MAX;

pub struct Framebuffer {
    width: usize,
    height: usize,
    color: Vec<u8>,
    depth: Vec<f32>,
}

impl Framebuffer {
    pub fn new(width: usize, height: usize) -> Result<Self> {
        if width == 0 || height == 0 || width > i32::MAX as usize || height > i32::MAX as usize {
            return Err(RenderError::InvalidSurface { width, height });
        }
        Ok(Self {
            width,
            height,
            color: vec![0; width * height * 4],
            depth: vec![FAR_DEPTH; width * height],
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Fills every pixel with the RGBA colour (stored as BGRA) and resets
    /// depth to [`FAR_DEPTH`].
    pub fn clear(&mut self, rgba: [u8; 4]) {
        let [r, g, b, a] = rgba;
        for pixel in self.color.chunks_exact_mut(4) {
            pixel.copy_from_slice(&[b, g, r, a]);
        }
        for d in self.depth.iter_mut() {
            *d = FAR_DEPTH;
        }
    }

    /// Raw BGRA bytes, row-major.
    pub fn color_buffer(&self) -> &[u8] {
        &self.color
    }

    pub fn depth_buffer(&self) -> &[f32] {
        &self.depth
    }

    /// BGRA bytes of one pixel.
    pub fn pixel(&self, x: usize, y: usize) -> [u8; 4] {
        let i = (x + y * self.width) * 4;
        [self.color[i], self.color[i + 1], self.color[i + 2], self.color[i + 3]]
    }

    pub fn depth_at(&self, x: usize, y: usize) -> f32 {
        self.depth[x + y * self.width]
    }

    /// The whole surface as a single band.
    pub fn as_band(&mut self) -> Band<'_> {
        Band {
            width: self.width,
            height: self.height,
            first_row: 0,
            color: &mut self.color,
            depth: &mut self.depth,
        }
    }

    /// Splits the surface into disjoint bands of `rows` rows each (the last
    /// one may be shorter).
    pub fn bands_mut(&mut self, rows: usize) -> Vec<Band<'_>> {
        let rows = rows.max(1);
        let (width, height) = (self.width, self.height);
        self.color
            .chunks_mut(rows * width * 4)
            .zip(self.depth.chunks_mut(rows * width))
            .enumerate()
            .map(|(i, (color, depth))| Band {
                width,
                height,
                first_row: i * rows,
                color,
                depth,
            })
            .collect()
    }

    /// Copies the colour buffer into an RGBA image. `None` if the buffer
    /// does not hold `width * height` pixels.
    pub fn to_image(&self) -> Option<RgbaImage> {
        let mut rgba = self.color.clone();
        for px in rgba.chunks_exact_mut(4) {
            px.swap(0, 2);
        }
        RgbaImage::from_raw(self.width as u32, self.height as u32, rgba)
    }

    /// Writes the frame to disk; the format follows the file extension.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let image = self.to_image().ok_or(RenderError::InvalidSurface {
            width: self.width,
            height: self.height,
        })?;
        image.save(path)?;
        info!("saved {}x{} frame to {:?}", self.width, self.height, path);
        Ok(())
    }
}

/// Mutable view of rows `first_row..first_row + rows` of a framebuffer.
///
/// Coordinates passed to a band are always surface coordinates; pixels
/// outside the band's rows are discarded like pixels outside the surface.
pub struct Band<'a> {
    width: usize,
    height: usize,
    first_row: usize,
    color: &'a mut [u8],
    depth: &'a mut [f32],
}

impl<'a> Band<'a> {
    /// Width of the whole surface.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Height of the whole surface.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Surface rows owned by this band.
    pub fn rows(&self) -> Range<i32> {
        let end = self.first_row + self.depth.len() / self.width;
        self.first_row as i32..end as i32
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || x as usize >= self.width || !self.rows().contains(&y) {
            return None;
        }
        Some(x as usize + (y as usize - self.first_row) * self.width)
    }

    /// Depth-tested write. A stored depth smaller than `z` wins; otherwise
    /// depth and colour are replaced. Out-of-band pixels are dropped.
    pub fn put_pixel(&mut self, x: i32, y: i32, z: f32, bgra: [u8; 4]) {
        let index = match self.index(x, y) {
            Some(i) => i,
            None => return,
        };
        if self.depth[index] < z {
            return;
        }
        self.depth[index] = z;
        self.color[index * 4..index * 4 + 4].copy_from_slice(&bgra);
    }

    /// Unconditional write used by the point and line paths; depth is left
    /// untouched.
    pub fn put_pixel_flat(&mut self, x: i32, y: i32, bgra: [u8; 4]) {
        if let Some(index) = self.index(x, y) {
            self.color[index * 4..index * 4 + 4].copy_from_slice(&bgra);
        }
    }

    fn on_surface(&self, x: f32, y: f32) -> bool {
        x >= 0. && y >= 0. && x < self.width as f32 && y < self.height as f32
    }

    /// Clips a screen-space point to the surface, then does a depth-tested
    /// write.
    pub fn draw_point(&mut self, point: Vector3, bgra: [u8; 4]) {
        if self.on_surface(point.x, point.y) {
            self.put_pixel(point.x as i32, point.y as i32, point.z, bgra);
        }
    }

    /// Clips a pixel position to the surface and writes without a depth test.
    pub fn draw_point_2d(&mut self, point: Vector2, bgra: [u8; 4]) {
        if self.on_surface(point.x, point.y) {
            self.put_pixel_flat(point.x as i32, point.y as i32, bgra);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: [u8; 4] = [0, 0, 255, 255];
    const BLUE: [u8; 4] = [255, 0, 0, 255];

    #[test]
    fn rejects_empty_surface() {
        assert!(matches!(
            Framebuffer::new(0, 10),
            Err(RenderError::InvalidSurface { width: 0, height: 10 })
        ));
    }

    #[test]
    fn buffer_sizes() {
        let fb = Framebuffer::new(7, 3).unwrap();
        assert_eq!(fb.color_buffer().len(), 7 * 3 * 4);
        assert_eq!(fb.depth_buffer().len(), 7 * 3);
    }

    #[test]
    fn clear_stores_bgra_and_far_depth() {
        let mut fb = Framebuffer::new(4, 4).unwrap();
        fb.as_band().put_pixel(1, 1, 0.5, RED);
        fb.clear([10, 20, 30, 40]);
        for px in fb.color_buffer().chunks_exact(4) {
            assert_eq!(px, &[30u8, 20, 10, 40]);
        }
        assert!(fb.depth_buffer().iter().all(|&d| d == FAR_DEPTH));
    }

    #[test]
    fn nearest_depth_wins() {
        let mut fb = Framebuffer::new(2, 2).unwrap();
        let mut band = fb.as_band();
        band.put_pixel(1, 0, 0.8, RED);
        band.put_pixel(1, 0, 0.2, BLUE);
        band.put_pixel(1, 0, 0.5, RED);
        assert_eq!(fb.pixel(1, 0), BLUE);
        assert_eq!(fb.depth_at(1, 0), 0.2);
    }

    #[test]
    fn equal_depth_overwrites() {
        let mut fb = Framebuffer::new(2, 2).unwrap();
        let mut band = fb.as_band();
        band.put_pixel(0, 0, 0.5, RED);
        band.put_pixel(0, 0, 0.5, BLUE);
        assert_eq!(fb.pixel(0, 0), BLUE);
    }

    #[test]
    fn points_outside_are_clipped() {
        let mut fb = Framebuffer::new(4, 4).unwrap();
        fb.clear([0, 0, 0, 255]);
        let mut band = fb.as_band();
        for p in [(-1., 0.), (0., -0.5), (4., 1.), (1., 4.), (f32::NAN, 1.)] {
            band.draw_point(Vector3::new(p.0, p.1, 0.), RED);
            band.draw_point_2d(Vector2::new(p.0, p.1), RED);
        }
        assert!(fb.color_buffer().chunks_exact(4).all(|px| px == [0u8, 0, 0, 255]));
    }

    #[test]
    fn bands_cover_surface_disjointly() {
        let mut fb = Framebuffer::new(3, 10).unwrap();
        let rows: Vec<_> = fb.bands_mut(4).iter().map(|b| b.rows()).collect();
        assert_eq!(rows, vec![0..4, 4..8, 8..10]);
    }

    #[test]
    fn band_drops_foreign_rows() {
        let mut fb = Framebuffer::new(3, 4).unwrap();
        fb.clear([0, 0, 0, 255]);
        {
            let mut bands = fb.bands_mut(2);
            bands[1].put_pixel(0, 0, 0.1, RED);
            bands[1].put_pixel(2, 3, 0.1, RED);
        }
        assert_eq!(fb.pixel(0, 0), [0, 0, 0, 255]);
        assert_eq!(fb.pixel(2, 3), RED);
    }

    #[test]
    fn image_is_rgba() {
        let mut fb = Framebuffer::new(3, 2).unwrap();
        fb.clear([1, 2, 3, 4]);
        let image = fb.to_image().unwrap();
        assert_eq!(image.dimensions(), (3, 2));
        assert_eq!(image.get_pixel(0, 0).0, [1, 2, 3, 4]);
    }

    #[test]
    fn short_color_buffer_is_not_exported() {
        let fb = Framebuffer {
            width: 2,
            height: 2,
            color: vec![0; 4],
            depth: vec![FAR_DEPTH; 4],
        };
        assert!(fb.to_image().is_none());
        let path = std::env::temp_dir().join("scanline-short-buffer.png");
        assert!(matches!(
            fb.save(&path),
            Err(RenderError::InvalidSurface { width: 2, height: 2 })
        ));
    }
}
