//! Raster canvas
//!
//! Thin wrapper over an `RgbImage` with the handful of primitives the sheet
//! needs. Boxes use inclusive corners: `[x0, y0, x1, y1]` covers
//! `x1 - x0 + 1` pixels horizontally.

use std::io::Cursor;
use std::path::Path;

use image::{ImageFormat, Rgb, RgbImage};
use imageproc::drawing::{
    draw_filled_rect_mut, draw_hollow_circle_mut, draw_hollow_rect_mut, draw_line_segment_mut,
    draw_text_mut,
};
use imageproc::rect::Rect;

use crate::font::{builtin_glyph, builtin_scale, SheetFont, Typeface, BUILTIN_GLYPH_W};
use crate::SheetError;

pub const INK: Rgb<u8> = Rgb([0, 0, 0]);
pub const PAPER: Rgb<u8> = Rgb([255, 255, 255]);

/// Drawing surface for one sheet
#[derive(Debug, Clone, PartialEq)]
pub struct Canvas {
    img: RgbImage,
}

impl Canvas {
    /// White canvas of the given size
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            img: RgbImage::from_pixel(width, height, PAPER),
        }
    }

    pub fn width(&self) -> u32 {
        self.img.width()
    }

    pub fn height(&self) -> u32 {
        self.img.height()
    }

    pub fn image(&self) -> &RgbImage {
        &self.img
    }

    /// True when the pixel is ink; off-canvas reads as paper
    pub fn is_ink(&self, x: i32, y: i32) -> bool {
        if x < 0 || y < 0 || x as u32 >= self.width() || y as u32 >= self.height() {
            return false;
        }
        *self.img.get_pixel(x as u32, y as u32) == INK
    }

    /// Solid box over inclusive corners
    pub fn fill_box(&mut self, x0: i32, y0: i32, x1: i32, y1: i32) {
        if let Some(rect) = inclusive_rect(x0, y0, x1, y1) {
            draw_filled_rect_mut(&mut self.img, rect, INK);
        }
    }

    /// Box outline `width` pixels thick, growing inward
    pub fn outline_box(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, width: i32) {
        for i in 0..width.max(1) {
            if let Some(rect) = inclusive_rect(x0 + i, y0 + i, x1 - i, y1 - i) {
                draw_hollow_rect_mut(&mut self.img, rect, INK);
            }
        }
    }

    /// Vertical rule `width` pixels thick starting at `x`
    pub fn vertical_rule(&mut self, x: i32, y0: i32, y1: i32, width: i32) {
        for i in 0..width.max(1) {
            let xi = (x + i) as f32;
            draw_line_segment_mut(&mut self.img, (xi, y0 as f32), (xi, y1 as f32), INK);
        }
    }

    /// One-pixel circle outline
    pub fn circle(&mut self, cx: i32, cy: i32, radius: i32) {
        draw_hollow_circle_mut(&mut self.img, (cx, cy), radius, INK);
    }

    /// Text with its top-left corner at `(x, y)`
    pub fn text(&mut self, x: i32, y: i32, font: &SheetFont, text: &str) {
        match &font.typeface {
            Typeface::TrueType(face) => {
                draw_text_mut(&mut self.img, INK, x, y, font.size, &**face, text);
            }
            Typeface::Builtin => self.builtin_text(x, y, font.size, text),
        }
    }

    fn builtin_text(&mut self, x: i32, y: i32, size: f32, text: &str) {
        let scale = builtin_scale(size) as i32;
        let advance = (BUILTIN_GLYPH_W as i32 + 1) * scale;
        let mut pen_x = x;

        for ch in text.chars() {
            if let Some(rows) = builtin_glyph(ch) {
                for (row, bits) in rows.iter().enumerate() {
                    for col in 0..BUILTIN_GLYPH_W {
                        if bits & (1 << (BUILTIN_GLYPH_W - 1 - col)) == 0 {
                            continue;
                        }
                        let px = pen_x + col as i32 * scale;
                        let py = y + row as i32 * scale;
                        self.fill_box(px, py, px + scale - 1, py + scale - 1);
                    }
                }
            }
            pen_x += advance;
        }
    }

    /// PNG-encoded bytes
    pub fn png_bytes(&self) -> Result<Vec<u8>, SheetError> {
        let mut buf = Cursor::new(Vec::new());
        self.img.write_to(&mut buf, ImageFormat::Png)?;
        Ok(buf.into_inner())
    }

    /// Save as PNG regardless of the path's extension
    pub fn save_png(&self, path: &Path) -> Result<(), SheetError> {
        self.img.save_with_format(path, ImageFormat::Png)?;
        Ok(())
    }
}

fn inclusive_rect(x0: i32, y0: i32, x1: i32, y1: i32) -> Option<Rect> {
    if x1 < x0 || y1 < y0 {
        return None;
    }
    Some(Rect::at(x0, y0).of_size((x1 - x0 + 1) as u32, (y1 - y0 + 1) as u32))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_canvas_is_blank() {
        let canvas = Canvas::new(20, 10);
        assert_eq!((canvas.width(), canvas.height()), (20, 10));
        assert!(canvas.image().pixels().all(|p| *p == PAPER));
    }

    #[test]
    fn test_fill_box_is_inclusive() {
        let mut canvas = Canvas::new(20, 20);
        canvas.fill_box(2, 3, 5, 6);
        assert!(canvas.is_ink(2, 3));
        assert!(canvas.is_ink(5, 6));
        assert!(!canvas.is_ink(6, 6));
        assert!(!canvas.is_ink(1, 3));
    }

    #[test]
    fn test_outline_grows_inward() {
        let mut canvas = Canvas::new(30, 30);
        canvas.outline_box(5, 5, 20, 20, 2);
        assert!(canvas.is_ink(5, 10));
        assert!(canvas.is_ink(6, 10));
        assert!(!canvas.is_ink(7, 10));
        assert!(!canvas.is_ink(4, 10));
        assert!(canvas.is_ink(20, 20));
    }

    #[test]
    fn test_circle_rim() {
        let mut canvas = Canvas::new(60, 60);
        canvas.circle(30, 30, 10);
        assert!(canvas.is_ink(40, 30));
        assert!(canvas.is_ink(30, 20));
        assert!(!canvas.is_ink(30, 30));
    }

    #[test]
    fn test_builtin_text_draws_ink() {
        let mut canvas = Canvas::new(40, 30);
        let font = SheetFont {
            typeface: Typeface::Builtin,
            size: 20.0,
        };
        canvas.text(2, 2, &font, "1");
        assert!(canvas.image().pixels().any(|p| *p == INK));

        let mut blank = Canvas::new(40, 30);
        blank.text(2, 2, &font, "年");
        assert!(blank.image().pixels().all(|p| *p == PAPER));
    }

    #[test]
    fn test_png_roundtrip_dimensions() {
        let canvas = Canvas::new(16, 8);
        let bytes = canvas.png_bytes().unwrap();
        let decoded = image::load_from_memory(&bytes).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (16, 8));
    }
}
