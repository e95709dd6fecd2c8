//! Synthetic test images.
//!
//! `demo_scene` draws a small flat-shaded scene (framed panel, disc,
//! rectangle, triangle) on a white background. The layout is designed on a
//! 600x400 canvas and scaled to the requested size.

use crate::image::{GrayImage, RgbImage};

pub const WHITE: [u8; 3] = [255, 255, 255];
pub const BLACK: [u8; 3] = [0, 0, 0];
pub const LIGHT_GRAY: [u8; 3] = [211, 211, 211];
pub const DARK_GRAY: [u8; 3] = [169, 169, 169];
pub const GRAY: [u8; 3] = [128, 128, 128];
pub const DIM_GRAY: [u8; 3] = [105, 105, 105];

const DESIGN_W: f32 = 600.0;
const DESIGN_H: f32 = 400.0;

struct Canvas {
    img: RgbImage,
    sx: f32,
    sy: f32,
}

impl Canvas {
    fn new(width: usize, height: usize) -> Self {
        Self {
            img: RgbImage::filled(width, height, WHITE),
            sx: width as f32 / DESIGN_W,
            sy: height as f32 / DESIGN_H,
        }
    }

    fn stroke(&self, w: f32) -> f32 {
        (w * self.sx.min(self.sy)).max(1.0)
    }

    /// Call `shade` with the design-space center of every pixel inside the
    /// scaled box; a `Some` result recolors that pixel.
    fn paint_box(
        &mut self,
        (x0, y0, x1, y1): (f32, f32, f32, f32),
        mut shade: impl FnMut(f32, f32) -> Option<[u8; 3]>,
    ) {
        let px0 = (x0 * self.sx).floor().max(0.0) as usize;
        let py0 = (y0 * self.sy).floor().max(0.0) as usize;
        let px1 = ((x1 * self.sx).ceil() as usize).min(self.img.width);
        let py1 = ((y1 * self.sy).ceil() as usize).min(self.img.height);
        for py in py0..py1 {
            for px in px0..px1 {
                let x = (px as f32 + 0.5) / self.sx;
                let y = (py as f32 + 0.5) / self.sy;
                if let Some(rgb) = shade(x, y) {
                    self.img.put_pixel(px, py, rgb);
                }
            }
        }
    }

    fn rectangle(&mut self, bounds: (f32, f32, f32, f32), fill: [u8; 3], outline: f32) {
        let (x0, y0, x1, y1) = bounds;
        let w = self.stroke(outline);
        let (wx, wy) = (w / self.sx, w / self.sy);
        self.paint_box(bounds, |x, y| {
            if x < x0 || x > x1 || y < y0 || y > y1 {
                return None;
            }
            let edge = x - x0 < wx || x1 - x < wx || y - y0 < wy || y1 - y < wy;
            Some(if edge { BLACK } else { fill })
        });
    }

    fn ellipse(&mut self, bounds: (f32, f32, f32, f32), fill: [u8; 3], outline: f32) {
        let (x0, y0, x1, y1) = bounds;
        let (cx, cy) = ((x0 + x1) * 0.5, (y0 + y1) * 0.5);
        let (rx, ry) = ((x1 - x0) * 0.5, (y1 - y0) * 0.5);
        let w = self.stroke(outline);
        let (irx, iry) = ((rx - w / self.sx).max(0.0), (ry - w / self.sy).max(0.0));
        self.paint_box(bounds, |x, y| {
            let (dx, dy) = (x - cx, y - cy);
            if (dx / rx).powi(2) + (dy / ry).powi(2) > 1.0 {
                return None;
            }
            let inner = irx > 0.0 && iry > 0.0 && (dx / irx).powi(2) + (dy / iry).powi(2) <= 1.0;
            Some(if inner { fill } else { BLACK })
        });
    }

    fn triangle(&mut self, pts: [(f32, f32); 3], fill: [u8; 3], outline: f32) {
        let xs = pts.map(|p| p.0);
        let ys = pts.map(|p| p.1);
        let bounds = (
            xs.iter().copied().fold(f32::MAX, f32::min),
            ys.iter().copied().fold(f32::MAX, f32::min),
            xs.iter().copied().fold(f32::MIN, f32::max),
            ys.iter().copied().fold(f32::MIN, f32::max),
        );
        let w = self.stroke(outline) / self.sx.min(self.sy);
        self.paint_box(bounds, |x, y| {
            let mut min_dist = f32::MAX;
            let mut sign = 0.0f32;
            for k in 0..3 {
                let (ax, ay) = pts[k];
                let (bx, by) = pts[(k + 1) % 3];
                let (ex, ey) = (bx - ax, by - ay);
                let cross = ex * (y - ay) - ey * (x - ax);
                if cross != 0.0 {
                    if sign == 0.0 {
                        sign = cross.signum();
                    } else if cross.signum() != sign {
                        return None;
                    }
                }
                min_dist = min_dist.min(cross.abs() / (ex * ex + ey * ey).sqrt());
            }
            Some(if min_dist < w { BLACK } else { fill })
        });
    }
}

/// Flat-shaded demo picture with five distinct levels plus black outlines.
pub fn demo_scene(width: usize, height: usize) -> RgbImage {
    let mut c = Canvas::new(width, height);
    c.rectangle((50.0, 50.0, 550.0, 350.0), LIGHT_GRAY, 3.0);
    c.ellipse((100.0, 100.0, 250.0, 250.0), DARK_GRAY, 2.0);
    c.rectangle((300.0, 100.0, 500.0, 250.0), GRAY, 2.0);
    c.triangle(
        [(150.0, 300.0), (250.0, 200.0), (350.0, 300.0)],
        DIM_GRAY,
        2.0,
    );
    c.img
}

/// Grayscale image whose top half is `top` and bottom half is `bottom`.
///
/// With an odd height the extra row belongs to the bottom half.
pub fn split_gray(width: usize, height: usize, top: u8, bottom: u8) -> GrayImage {
    let split = height / 2;
    let mut data = vec![top; width * split];
    data.resize(width * height, bottom);
    GrayImage {
        width,
        height,
        data,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_gray_has_equal_halves() {
        let img = split_gray(120, 80, 50, 200);
        assert_eq!(img.data.len(), 9600);
        assert_eq!(img.data.iter().filter(|&&v| v == 50).count(), 4800);
        assert_eq!(img.get(0, 39), 50);
        assert_eq!(img.get(119, 40), 200);
    }

    #[test]
    fn demo_scene_places_shapes() {
        let img = demo_scene(600, 400);
        let v = img.view();
        assert_eq!((img.width, img.height), (600, 400));
        assert_eq!(v.pixel(10, 10), WHITE);
        assert_eq!(v.pixel(51, 200), BLACK); // panel frame
        assert_eq!(v.pixel(80, 80), LIGHT_GRAY);
        assert_eq!(v.pixel(175, 175), DARK_GRAY);
        assert_eq!(v.pixel(400, 175), GRAY);
        assert_eq!(v.pixel(250, 280), DIM_GRAY);
    }

    #[test]
    fn demo_scene_scales_to_requested_size() {
        let img = demo_scene(300, 200);
        let v = img.view();
        assert_eq!(img.data.len(), 300 * 200 * 3);
        assert_eq!(v.pixel(5, 5), WHITE);
        assert_eq!(v.pixel(87, 87), DARK_GRAY);
        assert_eq!(v.pixel(125, 140), DIM_GRAY);
    }
}
