// src/card/canvas.rs
//
// Minimal RGBA drawing on top of `image::RgbaImage`.

use image::imageops::{self, FilterType};
use image::{DynamicImage, Rgba, RgbaImage};

use super::font::{glyph, text_width, GLYPH_H, GLYPH_W, ADVANCE};

pub type Color = [u8; 3];

/// `#RRGGBB` / `#RGB` → rgb; black on bad input.
pub fn hex(s: &str) -> Color {
    let h = s.trim_start_matches('#');
    let expand = |c: &str| u8::from_str_radix(c, 16).unwrap_or(0);
    match h.len() {
        6 => [expand(&h[0..2]), expand(&h[2..4]), expand(&h[4..6])],
        3 => {
            let one = |i: usize| expand(&h[i..i + 1]) * 17;
            [one(0), one(1), one(2)]
        }
        _ => [0, 0, 0],
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Align {
    Left,
    Center,
    Right,
}

pub struct Canvas {
    pub img: RgbaImage,
}

impl Canvas {
    /// Fully transparent canvas.
    pub fn new(w: u32, h: u32) -> Self {
        Self { img: RgbaImage::new(w, h) }
    }

    pub fn width(&self) -> u32 { self.img.width() }
    pub fn height(&self) -> u32 { self.img.height() }

    /// Source-over blend of one pixel; out-of-bounds writes are ignored.
    pub fn blend(&mut self, x: i64, y: i64, c: Color, alpha: f32) {
        if x < 0 || y < 0 || x >= self.width() as i64 || y >= self.height() as i64 {
            return;
        }
        let a = alpha.clamp(0.0, 1.0);
        let px = self.img.get_pixel_mut(x as u32, y as u32);
        let dst_a = px[3] as f32 / 255.0;
        let out_a = a + dst_a * (1.0 - a);
        if out_a <= 0.0 {
            return;
        }
        for i in 0..3 {
            let src = c[i] as f32 * a;
            let dst = px[i] as f32 * dst_a * (1.0 - a);
            px[i] = ((src + dst) / out_a).round() as u8;
        }
        px[3] = (out_a * 255.0).round() as u8;
    }

    pub fn fill_rect(&mut self, x: u32, y: u32, w: u32, h: u32, c: Color) {
        for yy in y..(y + h).min(self.height()) {
            for xx in x..(x + w).min(self.width()) {
                self.img.put_pixel(xx, yy, Rgba([c[0], c[1], c[2], 255]));
            }
        }
    }

    /// Left-to-right gradient over a band of rows.
    pub fn fill_hgradient(&mut self, y: u32, h: u32, from: Color, to: Color) {
        let w = self.width().max(2);
        for xx in 0..self.width() {
            let c = lerp(from, to, xx as f32 / (w - 1) as f32);
            for yy in y..(y + h).min(self.height()) {
                self.img.put_pixel(xx, yy, Rgba([c[0], c[1], c[2], 255]));
            }
        }
    }

    /// Top-left → bottom-right gradient inside a rounded rectangle covering the canvas.
    pub fn fill_rounded_diagonal(&mut self, radius: u32, from: Color, to: Color) {
        let (w, h) = (self.width() as f32, self.height() as f32);
        let r = radius as f32;
        let len2 = w * w + h * h;
        for yy in 0..self.height() {
            for xx in 0..self.width() {
                let (px, py) = (xx as f32 + 0.5, yy as f32 + 0.5);
                let cx = px.clamp(r, w - r);
                let cy = py.clamp(r, h - r);
                let d = ((px - cx).powi(2) + (py - cy).powi(2)).sqrt();
                let cover = (r - d + 0.5).clamp(0.0, 1.0);
                if cover <= 0.0 {
                    continue;
                }
                let t = ((px * w + py * h) / len2).clamp(0.0, 1.0);
                self.blend(xx as i64, yy as i64, lerp(from, to, t), cover);
            }
        }
    }

    /// Anti-aliased disc.
    pub fn fill_circle(&mut self, cx: f32, cy: f32, r: f32, c: Color) {
        self.each_in_circle(cx, cy, r + 1.0, |canvas, x, y, d| {
            let cover = (r - d + 0.5).clamp(0.0, 1.0);
            if cover > 0.0 {
                canvas.blend(x, y, c, cover);
            }
        });
    }

    /// Ring of `width` px centred on radius `r`.
    pub fn stroke_circle(&mut self, cx: f32, cy: f32, r: f32, width: f32, c: Color) {
        let half = width / 2.0;
        self.each_in_circle(cx, cy, r + half + 1.0, |canvas, x, y, d| {
            let cover = (half - (d - r).abs() + 0.5).clamp(0.0, 1.0);
            if cover > 0.0 {
                canvas.blend(x, y, c, cover);
            }
        });
    }

    /// Scale `src` to `size`×`size` and paint it clipped to a circle.
    pub fn draw_circular_image(&mut self, src: &DynamicImage, x: u32, y: u32, size: u32) {
        let scaled = imageops::resize(&src.to_rgba8(), size, size, FilterType::Triangle);
        let r = size as f32 / 2.0;
        for (sx, sy, p) in scaled.enumerate_pixels() {
            let d = ((sx as f32 + 0.5 - r).powi(2) + (sy as f32 + 0.5 - r).powi(2)).sqrt();
            let cover = (r - d + 0.5).clamp(0.0, 1.0);
            if cover <= 0.0 {
                continue;
            }
            let a = p[3] as f32 / 255.0 * cover;
            self.blend((x + sx) as i64, (y + sy) as i64, [p[0], p[1], p[2]], a);
        }
    }

    /// Bitmap text; `baseline` is the bottom edge of the glyph cells.
    pub fn text(&mut self, x: i64, baseline: i64, text: &str, scale: u32, c: Color, alpha: f32, align: Align) {
        let w = text_width(text, scale) as i64;
        let left = match align {
            Align::Left => x,
            Align::Center => x - w / 2,
            Align::Right => x - w,
        };
        let top = baseline - (GLYPH_H * scale) as i64;
        let s = scale as i64;
        for (i, ch) in text.chars().enumerate() {
            let ox = left + (i as i64) * (ADVANCE as i64) * s;
            for (row, bits) in glyph(ch).iter().enumerate() {
                for col in 0..GLYPH_W {
                    if bits & (1 << (GLYPH_W - 1 - col)) == 0 {
                        continue;
                    }
                    let px = ox + col as i64 * s;
                    let py = top + row as i64 * s;
                    for dy in 0..s {
                        for dx in 0..s {
                            self.blend(px + dx, py + dy, c, alpha);
                        }
                    }
                }
            }
        }
    }

    fn each_in_circle(&mut self, cx: f32, cy: f32, reach: f32, mut f: impl FnMut(&mut Self, i64, i64, f32)) {
        let x0 = (cx - reach).floor() as i64;
        let x1 = (cx + reach).ceil() as i64;
        let y0 = (cy - reach).floor() as i64;
        let y1 = (cy + reach).ceil() as i64;
        for y in y0..=y1 {
            for x in x0..=x1 {
                let d = ((x as f32 + 0.5 - cx).powi(2) + (y as f32 + 0.5 - cy).powi(2)).sqrt();
                f(self, x, y, d);
            }
        }
    }
}

fn lerp(a: Color, b: Color, t: f32) -> Color {
    let mix = |i: usize| (a[i] as f32 + (b[i] as f32 - a[i] as f32) * t).round() as u8;
    [mix(0), mix(1), mix(2)]
}
